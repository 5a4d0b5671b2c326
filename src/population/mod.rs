//! The population store: the authoritative, exclusively-owning collection of
//! all live agents. Agents are addressed by index; an index is only valid
//! until the next removal, and nothing in the simulation may rely on index
//! stability across ticks (removal compacts by swapping the last agent into
//! the vacated slot).
//!
//! Exact counters (per health state, per privileged role, cumulative deaths)
//! are maintained incrementally on every mutation, so per-tick statistics
//! never require rescanning the store.

mod context_extension;
mod data;

use crate::{define_data_plugin, define_rng};

pub use context_extension::ContextPopulationExt;
use data::PopulationData;

define_rng!(PopulationRng);

define_data_plugin!(PopulationPlugin, PopulationData, PopulationData::new());
