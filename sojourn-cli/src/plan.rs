//! `plan` command implementation for the Sojourn CLI.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use sojourn_core::{ScheduleConfig, SearchSettings, SolveRequest, Solver, TimeFormat};
use sojourn_search::VrpSolver;
use tracing_subscriber::filter::LevelFilter;

use crate::problem::load_problem;
use crate::report::PlanReport;
use crate::{
    ARG_DAYS, ARG_DEBUG, ARG_DROP_PENALTY, ARG_END, ARG_HOURS, ARG_NO_GUIDED_LOCAL, ARG_PROBLEM,
    ARG_SERVICE, ARG_SKIP_MORNINGS, ARG_START, ARG_TIME_LIMIT, CliError, ENV_PROBLEM,
};

/// CLI arguments for the `plan` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Plan a multi-day itinerary over the locations in a JSON \
                 problem file. Locations 0 and 1 are the start and end of \
                 the trip; every other location is visited when the daily \
                 opening hours allow and dropped otherwise.",
    about = "Plan a multi-day itinerary"
)]
#[ortho_config(prefix = "SOJOURN")]
pub(crate) struct PlanArgs {
    /// Path to a JSON problem file.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) problem: Option<Utf8PathBuf>,
    /// Number of travel days.
    #[arg(long = ARG_DAYS, value_name = "n")]
    #[serde(default)]
    pub(crate) days: Option<i32>,
    /// Hour the day starts.
    #[arg(long = ARG_START, value_name = "hour")]
    #[serde(default)]
    pub(crate) start: Option<u32>,
    /// Hour the day ends.
    #[arg(long = ARG_END, value_name = "hour")]
    #[serde(default)]
    pub(crate) end: Option<u32>,
    /// Minutes spent at each visited location.
    #[arg(long = ARG_SERVICE, value_name = "minutes")]
    #[serde(default)]
    pub(crate) service: Option<u32>,
    /// Search time limit in seconds.
    #[arg(long = ARG_TIME_LIMIT, value_name = "seconds")]
    #[serde(default)]
    pub(crate) time_limit: Option<u64>,
    /// Penalty for leaving a location out.
    #[arg(long = ARG_DROP_PENALTY, value_name = "penalty")]
    #[serde(default)]
    pub(crate) drop_penalty: Option<i64>,
    /// Stop at the first local optimum instead of running guided local
    /// search.
    #[arg(long = ARG_NO_GUIDED_LOCAL)]
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub(crate) no_guided_local: bool,
    /// Leave out the morning departure nodes.
    #[arg(long = ARG_SKIP_MORNINGS)]
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub(crate) skip_mornings: bool,
    /// Log at debug level and report search progress.
    #[arg(long = ARG_DEBUG)]
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub(crate) debug: bool,
    /// Print times as fractional hours instead of HH:MM.
    #[arg(long = ARG_HOURS)]
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub(crate) hours: bool,
}

impl PlanArgs {
    pub(crate) fn into_config(self) -> Result<PlanConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        PlanConfig::try_from(merged)
    }
}

/// Resolved `plan` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PlanConfig {
    pub(crate) problem: Utf8PathBuf,
    pub(crate) request: SolveRequest,
    pub(crate) format: TimeFormat,
    pub(crate) debug: bool,
}

impl TryFrom<PlanArgs> for PlanConfig {
    type Error = CliError;

    fn try_from(args: PlanArgs) -> Result<Self, Self::Error> {
        let problem = args.problem.ok_or(CliError::MissingArgument {
            field: ARG_PROBLEM,
            env: ENV_PROBLEM,
        })?;

        let defaults = ScheduleConfig::default();
        let schedule = ScheduleConfig {
            days: args.days.unwrap_or(defaults.days),
            day_start_hour: args.start.unwrap_or(defaults.day_start_hour),
            day_end_hour: args.end.unwrap_or(defaults.day_end_hour),
            service_minutes: args.service.unwrap_or(defaults.service_minutes),
            drop_penalty: args.drop_penalty.unwrap_or(defaults.drop_penalty),
            skip_morning_anchor_nodes: args.skip_mornings,
        };
        let search = SearchSettings {
            time_limit_seconds: args
                .time_limit
                .unwrap_or(SearchSettings::default().time_limit_seconds),
            guided_local_search: !args.no_guided_local,
            verbose_search_log: args.debug,
        };
        let request = SolveRequest { schedule, search };
        request.validate()?;

        Ok(Self {
            problem,
            request,
            format: if args.hours {
                TimeFormat::Hours
            } else {
                TimeFormat::Clock
            },
            debug: args.debug,
        })
    }
}

pub(crate) fn run_plan(args: PlanArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_plan_with(args, &mut stdout, true)
}

pub(crate) fn run_plan_with(
    args: PlanArgs,
    writer: &mut dyn Write,
    install_logging: bool,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    if install_logging {
        init_logging(config.debug)?;
    }
    let report = execute_plan(&config)?;
    write_report(writer, &report)
}

fn execute_plan(config: &PlanConfig) -> Result<PlanReport, CliError> {
    let problem = load_problem(&config.problem)?;
    let solver = VrpSolver::new(problem.matrix.clone());
    let response = solver
        .solve(&config.request)
        .map_err(|source| CliError::Solve { source })?;
    Ok(PlanReport::new(&problem, &response, config.format))
}

/// Send `log` records from the library crates to stderr.
pub(crate) fn init_logging(debug: bool) -> Result<(), CliError> {
    let level = if debug {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(CliError::Logging)
}

fn write_report(writer: &mut dyn Write, report: &PlanReport) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(report).map_err(CliError::SerialiseReport)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<PlanConfig, CliError> {
    let merged = PlanArgs::merge_from_layers(layers).map_err(CliError::from)?;
    PlanConfig::try_from(merged)
}
