pub use crate::agent::{Agent, HealthState, Role};
pub use crate::context::{Context, DataPlugin};
pub use crate::economy::ContextEconomyExt;
pub use crate::error::QuarantineError;
pub use crate::log::{debug, error, info, trace, warn};
pub use crate::parameters::{ContextParametersExt, Difficulty, Parameters};
pub use crate::population::ContextPopulationExt;
pub use crate::random::ContextRandomExt;
pub use crate::report::ContextReportExt;
pub use crate::rules::{RuleSet, TransitionRule};
pub use crate::runner::{run_with_args, run_with_custom_args, BaseArgs};
pub use crate::simulation::{ContextSimulationExt, TickSummary};
pub use crate::{assert_almost_eq, define_data_plugin, define_report, define_rng};
