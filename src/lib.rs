//! An engine for budget-coupled epidemic simulations
//!
//! Quarantine-core simulates the spread of a disease through a population of
//! anonymous agents. Agents interact pairwise at random, and a table of
//! transition rules maps the health states of the interacting pair to their
//! next health states. A parallel economy accrues income every tick and pays
//! for upgrades that change the protocol mid-session, such as hiring police
//! officers or dispatching health workers carrying a cure.
//!
//! The central object of a session is the `Context` that is responsible for
//! managing all the behavior of the simulation. All of the session-specific
//! logic is embedded in modules that rely on the `Context` for core services
//! such as:
//! * Maintaining the tick counter that clocks the session
//! * Holding module-specific data so that the module and other modules can
//!   access it
//! * Drawing reproducible random samples from named streams
//!
//! In practice, a session consists of a set of modules that work together.
//! A full run of the engine wires up the following:
//! * A population store that seeds the agents and keeps exact counts of
//!   every health state and role.
//! * A rule table that decides the outcome of each pairwise interaction,
//!   first match wins.
//! * An economy that accrues income each tick and funds upgrades.
//! * A simulation driver that runs the per-tick interaction loop and applies
//!   upgrades atomically.
//! * A reporter that writes a per-tick CSV summary of the displayed
//!   statistics.
pub mod agent;
pub mod context;
pub mod economy;
pub mod error;
pub mod hashing;
pub mod log;
pub mod numeric;
pub mod parameters;
pub mod population;
pub mod prelude;
pub mod random;
pub mod report;
pub mod rules;
pub mod runner;
pub mod simulation;

pub use crate::context::{Context, DataPlugin};
pub use crate::error::QuarantineError;
pub use crate::hashing::{HashMap, HashMapExt, HashSet, HashSetExt};
pub use crate::log::{debug, error, info, trace, warn};

// Re-exported for the define_* macros, which refer to these crates through
// `$crate` so callers do not need them as direct dependencies.
pub use csv;
pub use paste;
pub use rand;
