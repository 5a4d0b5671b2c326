//! Session configuration: the parameter set a simulation is initialized
//! from. A session either starts from one of the canned difficulty presets
//! or from a JSON parameters file.

use std::fs;
use std::path::Path;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::context::Context;
use crate::define_data_plugin;
use crate::error::QuarantineError;

/// Session-level configuration. Agent counts are simulated agents; displayed
/// figures multiply the raw counters by `population_factor`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameters {
    /// Number of simulated agents at session start.
    pub population: usize,
    /// Share of the starting population holding the police role.
    pub police_share: f64,
    /// Simulated agents seeded unknowingly infected at session start.
    pub initially_infected: usize,
    pub initial_budget: f64,
    /// Added to the budget once per tick.
    pub income: f64,
    /// Baseline share of the population interacting each tick.
    pub basic_interaction_rate: f64,
    /// Swing applied to the interaction rate, with the sign redrawn per tick.
    pub max_interaction_variance: f64,
    /// Multiplier projecting simulated counts onto displayed figures.
    pub population_factor: u64,
}

impl Parameters {
    /// Checks the parameter set for values the simulation cannot start from.
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid field found.
    pub fn validate(&self) -> Result<(), QuarantineError> {
        if self.population == 0 {
            return Err("population must be positive".into());
        }
        if !(0.0..=1.0).contains(&self.police_share) {
            return Err("police_share must lie within [0, 1]".into());
        }
        if self.initially_infected > self.population {
            return Err(format!(
                "cannot seed {} infections into a population of {}",
                self.initially_infected, self.population
            )
            .into());
        }
        if self.population_factor == 0 {
            return Err("population_factor must be positive".into());
        }
        if !self.basic_interaction_rate.is_finite() || !self.max_interaction_variance.is_finite() {
            return Err("interaction rate parameters must be finite".into());
        }
        Ok(())
    }
}

/// Canned parameter sets. `Normal` is the baseline balancing; `Easy` and
/// `Hard` loosen or tighten the money supply and the infection pressure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Difficulty {
    Easy,
    Normal,
    Hard,
}

impl Difficulty {
    #[must_use]
    pub fn parameters(self) -> Parameters {
        match self {
            Difficulty::Easy => Parameters {
                population: 32_400,
                police_share: 0.01,
                initially_infected: 500,
                initial_budget: 4_000_000.0,
                income: 50_000.0,
                basic_interaction_rate: 0.01,
                max_interaction_variance: 0.03,
                population_factor: 50,
            },
            Difficulty::Normal => Parameters {
                population: 32_400,
                police_share: 0.01,
                initially_infected: 1_000,
                initial_budget: 2_000_000.0,
                income: 30_000.0,
                basic_interaction_rate: 0.01,
                max_interaction_variance: 0.05,
                population_factor: 50,
            },
            Difficulty::Hard => Parameters {
                population: 32_400,
                police_share: 0.01,
                initially_infected: 2_000,
                initial_budget: 1_000_000.0,
                income: 15_000.0,
                basic_interaction_rate: 0.02,
                max_interaction_variance: 0.05,
                population_factor: 50,
            },
        }
    }
}

/// Reads and validates a `Parameters` JSON file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not valid JSON for
/// `Parameters`, or fails validation.
pub fn load_parameters_from_json(path: &Path) -> Result<Parameters, QuarantineError> {
    let data = fs::read_to_string(path)?;
    let parameters: Parameters = serde_json::from_str(&data)?;
    parameters.validate()?;
    Ok(parameters)
}

define_data_plugin!(ParametersPlugin, Option<Parameters>, None);

pub trait ContextParametersExt {
    /// Stores the session parameters on the context.
    fn set_parameters(&mut self, parameters: Parameters);

    /// The session parameters.
    ///
    /// # Panics
    ///
    /// Panics if parameters have not been set.
    fn parameters(&self) -> &Parameters;

    fn population_factor(&self) -> u64;
}

impl ContextParametersExt for Context {
    fn set_parameters(&mut self, parameters: Parameters) {
        *self.get_data_container_mut(ParametersPlugin) = Some(parameters);
    }

    fn parameters(&self) -> &Parameters {
        self.get_data_container(ParametersPlugin)
            .and_then(Option::as_ref)
            .expect("simulation parameters have not been set")
    }

    fn population_factor(&self) -> u64 {
        self.parameters().population_factor
    }
}
