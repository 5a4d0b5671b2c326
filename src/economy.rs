//! Budget and income bookkeeping, plus the scaled statistics the display
//! layer reads. Scaled values project the simulated population onto the
//! displayed one by multiplying raw counters with the population factor.

use crate::agent::HealthState;
use crate::context::Context;
use crate::define_data_plugin;
use crate::parameters::ContextParametersExt;
use crate::population::ContextPopulationExt;

#[derive(Default)]
struct EconomyData {
    budget: f64,
    income: f64,
}

define_data_plugin!(EconomyPlugin, EconomyData, EconomyData::default());

/// Read accessors for the economy and the scaled display statistics.
pub trait ContextEconomyExt {
    /// Current budget. May go negative; checking affordability before a
    /// purchase is the caller's concern.
    fn budget(&self) -> f64;

    /// The amount added to the budget once per tick.
    fn income(&self) -> f64;

    /// Displayed population figure.
    fn scaled_population(&self) -> u64;

    /// Displayed count of known infections. Unknowing carriers are deliberately
    /// not included.
    fn scaled_infected(&self) -> u64;

    /// Displayed count of deaths since session start.
    fn scaled_deceased(&self) -> u64;

    fn scaled_police(&self) -> u64;

    fn scaled_health_workers(&self) -> u64;
}

impl ContextEconomyExt for Context {
    fn budget(&self) -> f64 {
        self.get_data_container(EconomyPlugin)
            .map_or(0.0, |data| data.budget)
    }

    fn income(&self) -> f64 {
        self.get_data_container(EconomyPlugin)
            .map_or(0.0, |data| data.income)
    }

    fn scaled_population(&self) -> u64 {
        self.population() as u64 * self.population_factor()
    }

    fn scaled_infected(&self) -> u64 {
        self.count_in_state(HealthState::Infected) as u64 * self.population_factor()
    }

    fn scaled_deceased(&self) -> u64 {
        self.deceased_total() as u64 * self.population_factor()
    }

    fn scaled_police(&self) -> u64 {
        self.police_count() as u64 * self.population_factor()
    }

    fn scaled_health_workers(&self) -> u64 {
        self.health_worker_count() as u64 * self.population_factor()
    }
}

// Mutators used by the simulation module; not part of the public surface.
pub(crate) trait ContextEconomyExtInternal {
    fn init_economy(&mut self, initial_budget: f64, income: f64);
    fn debit_budget(&mut self, price: f64);
    fn accrue_income(&mut self);
}

impl ContextEconomyExtInternal for Context {
    fn init_economy(&mut self, initial_budget: f64, income: f64) {
        let data = self.get_data_container_mut(EconomyPlugin);
        data.budget = initial_budget;
        data.income = income;
    }

    fn debit_budget(&mut self, price: f64) {
        self.get_data_container_mut(EconomyPlugin).budget -= price;
    }

    fn accrue_income(&mut self) {
        let data = self.get_data_container_mut(EconomyPlugin);
        data.budget += data.income;
    }
}
