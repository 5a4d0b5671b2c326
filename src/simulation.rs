//! The simulation driver. Ties the population, rule table, and economy
//! together: initialization seeds agents and the base disease rules, each
//! tick runs a randomized batch of pairwise interactions, and the upgrade
//! operations spend budget to change the protocol mid-session.
//!
//! Interactions are anonymous. A rule matches on the two health states of a
//! sampled pair regardless of role, and the first rule to match decides the
//! outcome. Upgrades are atomic: they either complete fully or leave the
//! session untouched.

use log::{debug, info, trace, warn};
use serde_derive::{Deserialize, Serialize};

use crate::agent::{HealthState, Role};
use crate::context::Context;
use crate::economy::{ContextEconomyExt, ContextEconomyExtInternal};
use crate::error::QuarantineError;
use crate::parameters::{ContextParametersExt, Parameters};
use crate::population::ContextPopulationExt;
use crate::random::ContextRandomExt;
use crate::rules::{RuleSet, TransitionRule};
use crate::{define_data_plugin, define_report, define_rng};

define_rng!(SimulationRng);

define_data_plugin!(RulesPlugin, RuleSet, RuleSet::new());

/// The rules in force from the start of every session: encounters with the
/// infected spread the disease silently, and two visibly infected agents
/// escalate until one of them dies.
fn base_rules() -> [TransitionRule; 3] {
    [
        TransitionRule::new(
            HealthState::Healthy,
            HealthState::Infected,
            HealthState::UnknowinglyInfected,
            HealthState::Infected,
        ),
        TransitionRule::new(
            HealthState::Healthy,
            HealthState::UnknowinglyInfected,
            HealthState::UnknowinglyInfected,
            HealthState::UnknowinglyInfected,
        ),
        TransitionRule::new(
            HealthState::Infected,
            HealthState::Infected,
            HealthState::Infected,
            HealthState::Deceased,
        ),
    ]
}

/// The rules appended by `introduce_cure`: an agent carrying the cure
/// immunizes whichever susceptible or infected agent it meets, and keeps
/// carrying the cure afterwards.
fn cure_rules() -> [TransitionRule; 3] {
    [
        TransitionRule::new(
            HealthState::Healthy,
            HealthState::Cure,
            HealthState::Immune,
            HealthState::Cure,
        ),
        TransitionRule::new(
            HealthState::Infected,
            HealthState::Cure,
            HealthState::Immune,
            HealthState::Cure,
        ),
        TransitionRule::new(
            HealthState::UnknowinglyInfected,
            HealthState::Cure,
            HealthState::Immune,
            HealthState::Cure,
        ),
    ]
}

// floor(rate * population), clamped so a negative effective rate yields a
// tick with no interactions rather than a panic.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
#[allow(clippy::cast_sign_loss)]
fn interaction_count(rate: f64, population: usize) -> u64 {
    let raw = (rate * population as f64).floor();
    if raw <= 0.0 {
        0
    } else {
        raw as u64
    }
}

/// End-of-tick snapshot of the displayed statistics, in real-world units.
/// Also the row format of the per-tick CSV report.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct TickSummary {
    pub tick: u64,
    pub population: u64,
    pub infected: u64,
    pub deceased: u64,
    pub police: u64,
    pub health_workers: u64,
    pub budget: f64,
    pub income: f64,
}

define_report!(TickSummary);

pub trait ContextSimulationExt {
    /// Validates `parameters`, then seeds the population (police first),
    /// installs the base disease rules, funds the economy, and marks the
    /// initially infected. Must be called exactly once per context.
    ///
    /// # Errors
    ///
    /// Returns a `QuarantineError` if the parameters fail validation or if
    /// the simulation has already been initialized.
    fn init_simulation(&mut self, parameters: Parameters) -> Result<(), QuarantineError>;

    /// Advances the session by one tick: draws this tick's interaction rate,
    /// runs the resulting number of pairwise interactions, accrues income,
    /// and increments the tick counter.
    fn tick(&mut self);

    /// Runs `count` ticks back to back.
    fn run_ticks(&mut self, count: u64);

    /// Unlocks the cure: debits `price`, appends the cure rules to the rule
    /// table, and converts `count` citizens into health workers carrying the
    /// cure.
    ///
    /// # Errors
    ///
    /// Returns `QuarantineError::InsufficientEligibleAgents` if fewer than
    /// `count` citizens remain. Nothing is debited or changed on failure.
    fn introduce_cure(&mut self, price: f64, count: usize) -> Result<(), QuarantineError>;

    /// Converts `count` citizens into police officers, keeping their health
    /// states, then debits `price`.
    ///
    /// # Errors
    ///
    /// Returns `QuarantineError::InsufficientEligibleAgents` if fewer than
    /// `count` citizens remain. Nothing is debited or changed on failure.
    fn buy_police_officers(&mut self, price: f64, count: usize) -> Result<(), QuarantineError>;

    /// Converts `count` citizens into health workers carrying the cure, then
    /// debits `price`. Health workers only cure anyone if `introduce_cure`
    /// has added the cure rules.
    ///
    /// # Errors
    ///
    /// Returns `QuarantineError::InsufficientEligibleAgents` if fewer than
    /// `count` citizens remain. Nothing is debited or changed on failure.
    fn buy_health_workers(&mut self, price: f64, count: usize) -> Result<(), QuarantineError>;

    /// Reassigns `count` uniformly sampled citizens to `role`. Police keep
    /// their current health state; health workers start out carrying the
    /// cure. Distributing `Role::Citizen` is ignored with a warning.
    ///
    /// # Errors
    ///
    /// Returns `QuarantineError::InsufficientEligibleAgents` if fewer than
    /// `count` citizens remain.
    fn distribute_new_roles(&mut self, count: usize, role: Role) -> Result<(), QuarantineError>;

    /// Returns the rules currently in force, in priority order.
    fn rules(&self) -> &[TransitionRule];

    /// Returns the current tick's displayed statistics. Counts are scaled by
    /// the population factor; hidden carriers are not included in `infected`.
    fn tick_summary(&self) -> TickSummary;
}

impl ContextSimulationExt for Context {
    fn init_simulation(&mut self, parameters: Parameters) -> Result<(), QuarantineError> {
        parameters.validate()?;
        if self.population() > 0 {
            return Err(QuarantineError::from(
                "simulation has already been initialized",
            ));
        }
        #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
        #[allow(clippy::cast_sign_loss)]
        let police = (parameters.population as f64 * parameters.police_share).floor() as usize;

        self.init_economy(parameters.initial_budget, parameters.income);
        self.seed_population(parameters.population, police);
        let rules = self.get_data_container_mut(RulesPlugin);
        for rule in base_rules() {
            rules.add_rule(rule);
        }
        self.seed_infected(parameters.initially_infected)?;
        info!(
            "Initialized simulation: {} agents ({} police), {} initially infected",
            parameters.population, police, parameters.initially_infected
        );
        self.set_parameters(parameters);
        Ok(())
    }

    fn tick(&mut self) {
        let (basic_rate, variance) = {
            let parameters = self.parameters();
            (
                parameters.basic_interaction_rate,
                parameters.max_interaction_variance,
            )
        };

        // The direction of the variance is redrawn every tick.
        let sign = if self.sample_bool(SimulationRng, 0.5) {
            1.0
        } else {
            -1.0
        };
        let rate = basic_rate + sign * variance;
        let interactions = interaction_count(rate, self.population());
        trace!(
            "Tick {}: rate {rate}, running {interactions} interactions",
            self.get_current_tick()
        );

        for _ in 0..interactions {
            if self.population() < 2 {
                debug!(
                    "Tick {}: population too small to interact, stopping early",
                    self.get_current_tick()
                );
                break;
            }
            let (first, second) = self.sample_distinct_pair();
            let outcome = self
                .get_data_container(RulesPlugin)
                .expect("simulation rules have not been initialized")
                .find_match(
                    self.agent(first).health_state(),
                    self.agent(second).health_state(),
                );
            if let Some((first_state, second_state)) = outcome {
                self.set_health_state(first, first_state);
                self.set_health_state(second, second_state);

                // Deceased agents leave the store immediately so later
                // samples draw from the smaller population. When both die,
                // the higher index goes first so the lower one stays valid.
                let first_died = first_state == HealthState::Deceased;
                let second_died = second_state == HealthState::Deceased;
                if first_died && second_died {
                    self.remove_agent(first.max(second));
                    self.remove_agent(first.min(second));
                } else if first_died {
                    self.remove_agent(first);
                } else if second_died {
                    self.remove_agent(second);
                }
            }
        }

        // Income accrues once per tick no matter how many interactions ran.
        self.accrue_income();
        self.advance_tick();
    }

    fn run_ticks(&mut self, count: u64) {
        for _ in 0..count {
            self.tick();
        }
    }

    fn introduce_cure(&mut self, price: f64, count: usize) -> Result<(), QuarantineError> {
        let eligible = self.eligible_count();
        if eligible < count {
            return Err(QuarantineError::InsufficientEligibleAgents {
                requested: count,
                eligible,
            });
        }
        self.debit_budget(price);
        let rules = self.get_data_container_mut(RulesPlugin);
        for rule in cure_rules() {
            rules.add_rule(rule);
        }
        info!("Cure introduced: {count} health workers dispatched");
        self.distribute_new_roles(count, Role::HealthWorker)
    }

    fn buy_police_officers(&mut self, price: f64, count: usize) -> Result<(), QuarantineError> {
        self.distribute_new_roles(count, Role::Police)?;
        self.debit_budget(price);
        Ok(())
    }

    fn buy_health_workers(&mut self, price: f64, count: usize) -> Result<(), QuarantineError> {
        self.distribute_new_roles(count, Role::HealthWorker)?;
        self.debit_budget(price);
        Ok(())
    }

    fn distribute_new_roles(&mut self, count: usize, role: Role) -> Result<(), QuarantineError> {
        if role == Role::Citizen {
            warn!("Cannot distribute {role:?}, ignoring");
            return Ok(());
        }
        let eligible = self.eligible_count();
        if eligible < count {
            return Err(QuarantineError::InsufficientEligibleAgents {
                requested: count,
                eligible,
            });
        }
        let mut assigned = 0;
        while assigned < count {
            let index = self.sample_agent_index();
            let agent = self.agent(index);
            if agent.is_privileged() {
                // Already holds a role, resample
                continue;
            }
            let health_state = if role == Role::Police {
                agent.health_state()
            } else {
                HealthState::Cure
            };
            self.reassign_role(index, role, health_state);
            assigned += 1;
        }
        trace!("Distributed {role:?} to {count} agents");
        Ok(())
    }

    fn rules(&self) -> &[TransitionRule] {
        match self.get_data_container(RulesPlugin) {
            Some(rule_set) => rule_set.rules(),
            None => &[],
        }
    }

    fn tick_summary(&self) -> TickSummary {
        TickSummary {
            tick: self.get_current_tick(),
            population: self.scaled_population(),
            infected: self.scaled_infected(),
            deceased: self.scaled_deceased(),
            police: self.scaled_police(),
            health_workers: self.scaled_health_workers(),
            budget: self.budget(),
            income: self.income(),
        }
    }
}
