//! Command-line interface for the Sojourn multi-day itinerary planner.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod plan;
mod problem;
mod report;

pub use error::CliError;

use plan::{PlanArgs, run_plan};

pub(crate) const ARG_PROBLEM: &str = "problem";
pub(crate) const ARG_DAYS: &str = "days";
pub(crate) const ARG_START: &str = "start";
pub(crate) const ARG_END: &str = "end";
pub(crate) const ARG_SERVICE: &str = "service";
pub(crate) const ARG_TIME_LIMIT: &str = "time-limit";
pub(crate) const ARG_DROP_PENALTY: &str = "drop-penalty";
pub(crate) const ARG_NO_GUIDED_LOCAL: &str = "no-guided-local";
pub(crate) const ARG_SKIP_MORNINGS: &str = "skip-mornings";
pub(crate) const ARG_DEBUG: &str = "debug";
pub(crate) const ARG_HOURS: &str = "hours";
pub(crate) const ENV_PROBLEM: &str = "SOJOURN_CMDS_PLAN_PROBLEM";

/// Run the Sojourn CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when arguments, configuration or the problem file
/// are invalid, when no itinerary can be found, or when the report cannot be
/// written.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Plan(args) => run_plan(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "sojourn",
    about = "Plan multi-day itineraries that return home every night",
    version
)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Plan an itinerary for a problem file.
    Plan(PlanArgs),
}

#[cfg(test)]
mod tests;
