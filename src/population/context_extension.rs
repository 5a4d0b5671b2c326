use log::trace;

use crate::agent::{Agent, HealthState, Role};
use crate::context::Context;
use crate::error::QuarantineError;
use crate::random::ContextRandomExt;

use super::data::PopulationData;
use super::{PopulationPlugin, PopulationRng};

/// Context methods for reading and mutating the population store.
pub trait ContextPopulationExt {
    /// Fills the store with healthy agents: `police` police officers plus
    /// citizens for the remainder. Placement within the store is irrelevant
    /// because all sampling is uniform over indices.
    ///
    /// # Panics
    ///
    /// Panics if `police > population`.
    fn seed_population(&mut self, population: usize, police: usize);

    /// Turns exactly `count` currently-healthy agents unknowingly infected,
    /// resampling until that many distinct healthy agents have been struck.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than `count` agents are healthy, which would
    /// otherwise leave the resampling loop spinning forever.
    fn seed_infected(&mut self, count: usize) -> Result<(), QuarantineError>;

    /// The number of live agents.
    fn population(&self) -> usize;

    /// Returns the agent at `index`.
    ///
    /// # Panics
    ///
    /// Panics if the index is out of bounds.
    fn agent(&self, index: usize) -> Agent;

    /// Sets the health state of the agent at `index`, keeping the per-state
    /// counts exact.
    ///
    /// # Panics
    ///
    /// Panics if the index is out of bounds.
    fn set_health_state(&mut self, index: usize, state: HealthState);

    /// Removes the agent at `index`; the last agent is swapped into the
    /// vacated slot. Returns the removed agent.
    ///
    /// # Panics
    ///
    /// Panics if the index is out of bounds.
    fn remove_agent(&mut self, index: usize) -> Agent;

    /// Replaces the agent at `index` with a new variant for `role` carrying
    /// `health_state`.
    ///
    /// # Panics
    ///
    /// Panics if the agent at `index` already holds a privileged role.
    fn reassign_role(&mut self, index: usize, role: Role, health_state: HealthState);

    /// A uniformly random index into the current population.
    ///
    /// # Panics
    ///
    /// Panics if the population is empty; the simulation cannot proceed
    /// without agents.
    fn sample_agent_index(&self) -> usize;

    /// Two distinct uniformly random indices, drawn by resampling the second
    /// until it differs from the first.
    ///
    /// # Panics
    ///
    /// Panics if fewer than 2 agents are alive.
    fn sample_distinct_pair(&self) -> (usize, usize);

    fn count_in_state(&self, state: HealthState) -> usize;

    fn police_count(&self) -> usize;

    fn health_worker_count(&self) -> usize;

    /// Deceased agents removed from the store since the session started.
    fn deceased_total(&self) -> usize;

    /// Agents holding no privileged role, available for reassignment.
    fn eligible_count(&self) -> usize;

    /// Counts agents satisfying `predicate` with a linear scan. The standard
    /// statistics are maintained incrementally; this is for ad-hoc queries.
    fn count_agents(&self, predicate: impl Fn(&Agent) -> bool) -> usize;
}

impl ContextPopulationExt for Context {
    fn seed_population(&mut self, population: usize, police: usize) {
        assert!(
            police <= population,
            "cannot seed more police than the total population"
        );
        let data = self.get_data_container_mut(PopulationPlugin);
        for i in 0..population {
            let role = if i < police { Role::Police } else { Role::Citizen };
            data.add_agent(Agent::new(role, HealthState::Healthy));
        }
        trace!("seeded population with {population} agents ({police} police)");
    }

    fn seed_infected(&mut self, count: usize) -> Result<(), QuarantineError> {
        let healthy = self.count_in_state(HealthState::Healthy);
        if healthy < count {
            return Err(format!(
                "cannot seed {count} infections with only {healthy} healthy agents"
            )
            .into());
        }
        let mut remaining = count;
        while remaining > 0 {
            let index = self.sample_agent_index();
            if self.agent(index).health_state() == HealthState::Healthy {
                self.set_health_state(index, HealthState::UnknowinglyInfected);
                remaining -= 1;
            }
        }
        trace!("seeded {count} unknowing infections");
        Ok(())
    }

    fn population(&self) -> usize {
        self.get_data_container(PopulationPlugin)
            .map_or(0, PopulationData::population)
    }

    fn agent(&self, index: usize) -> Agent {
        self.get_data_container(PopulationPlugin)
            .expect("the population has not been seeded")
            .agent(index)
    }

    fn set_health_state(&mut self, index: usize, state: HealthState) {
        self.get_data_container_mut(PopulationPlugin)
            .set_health_state(index, state);
    }

    fn remove_agent(&mut self, index: usize) -> Agent {
        self.get_data_container_mut(PopulationPlugin)
            .remove_agent(index)
    }

    fn reassign_role(&mut self, index: usize, role: Role, health_state: HealthState) {
        self.get_data_container_mut(PopulationPlugin)
            .reassign_role(index, role, health_state);
    }

    fn sample_agent_index(&self) -> usize {
        let population = self.population();
        assert!(population > 0, "cannot sample from an empty population");
        self.sample_range(PopulationRng, 0..population)
    }

    fn sample_distinct_pair(&self) -> (usize, usize) {
        assert!(
            self.population() >= 2,
            "cannot sample a distinct pair from fewer than 2 agents"
        );
        let first = self.sample_agent_index();
        let mut second = self.sample_agent_index();
        while second == first {
            second = self.sample_agent_index();
        }
        (first, second)
    }

    fn count_in_state(&self, state: HealthState) -> usize {
        self.get_data_container(PopulationPlugin)
            .map_or(0, |data| data.count_in_state(state))
    }

    fn police_count(&self) -> usize {
        self.get_data_container(PopulationPlugin)
            .map_or(0, PopulationData::police_count)
    }

    fn health_worker_count(&self) -> usize {
        self.get_data_container(PopulationPlugin)
            .map_or(0, PopulationData::health_worker_count)
    }

    fn deceased_total(&self) -> usize {
        self.get_data_container(PopulationPlugin)
            .map_or(0, PopulationData::deceased_total)
    }

    fn eligible_count(&self) -> usize {
        self.get_data_container(PopulationPlugin)
            .map_or(0, PopulationData::eligible_count)
    }

    fn count_agents(&self, predicate: impl Fn(&Agent) -> bool) -> usize {
        self.get_data_container(PopulationPlugin)
            .map_or(0, |data| data.count_agents(&predicate))
    }
}
