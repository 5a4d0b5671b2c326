use std::path::{Path, PathBuf};

use crate::error::QuarantineError;
use crate::log::set_log_level;
use crate::parameters::{load_parameters_from_json, Difficulty};
use crate::random::ContextRandomExt;
use crate::report::ContextReportExt;
use crate::simulation::{ContextSimulationExt, TickSummary};
use crate::context::Context;
use clap::{Args, Command, FromArgMatches as _};
use log::LevelFilter;

/// Default cli arguments for the session runner
#[derive(Args, Debug)]
pub struct BaseArgs {
    /// Random seed
    #[arg(short, long, default_value = "0")]
    pub random_seed: u64,

    /// Difficulty preset used when no parameter file is given
    #[arg(short, long, value_enum, default_value = "normal")]
    pub difficulty: Difficulty,

    /// Optional path for a simulation parameters file
    #[arg(short, long, default_value = "")]
    pub config: String,

    /// Optional path for report output
    #[arg(short, long, default_value = "")]
    pub output_dir: String,

    /// Number of ticks to run the session for
    #[arg(short, long, default_value = "365")]
    pub max_ticks: u64,

    /// Enable logging at the given level
    #[arg(short, long)]
    pub log_level: Option<LevelFilter>,
}

#[derive(Args)]
pub struct PlaceholderCustom {}

fn create_session_cli() -> Command {
    let cli = Command::new("quarantine");
    BaseArgs::augment_args(cli)
}

/// Runs a session with custom cli arguments.
///
/// This function allows you to define custom arguments and a setup function
///
/// # Parameters
/// - `setup_fn`: A function that takes a mutable reference to a `Context`, a `BaseArgs` struct,
///    a Option<A> where A is the custom cli arguments struct
///
/// # Errors
/// Returns an error if argument parsing or the setup function fails
#[allow(clippy::missing_errors_doc)]
pub fn run_with_custom_args<A, F>(setup_fn: F) -> Result<Context, Box<dyn std::error::Error>>
where
    A: Args,
    F: Fn(&mut Context, BaseArgs, Option<A>) -> Result<(), QuarantineError>,
{
    let mut cli = create_session_cli();
    cli = A::augment_args(cli);
    let matches = cli.get_matches();

    let base_args_matches = BaseArgs::from_arg_matches(&matches)?;
    let custom_matches = A::from_arg_matches(&matches)?;
    run_with_args_internal(base_args_matches, Some(custom_matches), setup_fn)
}

/// Runs a session with default cli arguments
///
/// This function parses command line arguments allows you to define a setup function
///
/// # Parameters
/// - `setup_fn`: A function that takes a mutable reference to a `Context`and `BaseArgs` struct
///
/// # Errors
/// Returns an error if argument parsing or the setup function fails
#[allow(clippy::missing_errors_doc)]
pub fn run_with_args<F>(setup_fn: F) -> Result<Context, Box<dyn std::error::Error>>
where
    F: Fn(&mut Context, BaseArgs, Option<PlaceholderCustom>) -> Result<(), QuarantineError>,
{
    let cli = create_session_cli();
    let matches = cli.get_matches();

    let base_args_matches = BaseArgs::from_arg_matches(&matches)?;
    run_with_args_internal(base_args_matches, None, setup_fn)
}

fn run_with_args_internal<A, F>(
    args: BaseArgs,
    custom_args: Option<A>,
    setup_fn: F,
) -> Result<Context, Box<dyn std::error::Error>>
where
    F: Fn(&mut Context, BaseArgs, Option<A>) -> Result<(), QuarantineError>,
{
    if let Some(level) = args.log_level {
        set_log_level(level);
    }

    // Parameters come from a file when one is given, the preset otherwise
    let parameters = if args.config.is_empty() {
        args.difficulty.parameters()
    } else {
        println!("Loading parameters from: {}", args.config);
        load_parameters_from_json(Path::new(&args.config))?
    };

    // Instantiate a context and seed the session
    let mut context = Context::new();
    context.init_random(args.random_seed);
    context.init_simulation(parameters)?;

    // Optionally write the per-tick report under the output dir
    let reporting = !args.output_dir.is_empty();
    if reporting {
        let report_path = PathBuf::from(&args.output_dir).join("tick_report.csv");
        context.add_report::<TickSummary>(
            report_path
                .to_str()
                .expect("output path is not valid UTF-8"),
        )?;
    }

    let max_ticks = args.max_ticks;

    // Run the provided Fn
    setup_fn(&mut context, args, custom_args)?;

    // Execute the session
    for _ in 0..max_ticks {
        context.tick();
        if reporting {
            context.send_report(context.tick_summary());
        }
    }

    let summary = context.tick_summary();
    println!(
        "Session ended at tick {}: population {}, infected {}, deceased {}, budget {:.2}",
        summary.tick, summary.population, summary.infected, summary.deceased, summary.budget
    );
    Ok(context)
}
