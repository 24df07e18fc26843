//! Error types emitted by the Sojourn CLI.
//!
//! Keep this error type reasonably small, as every CLI helper returns
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use sojourn_core::{ConfigError, MatrixError, SolveError};
use thiserror::Error;

/// Errors emitted by the Sojourn CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Argument name.
        field: &'static str,
        /// Environment variable that could supply it.
        env: &'static str,
    },
    /// The merged schedule settings are invalid.
    #[error("invalid schedule: {0}")]
    InvalidSchedule(#[from] ConfigError),
    /// Opening the problem file failed.
    #[error("failed to open problem file at {path:?}: {source}")]
    OpenProblem {
        /// Problem file path.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// Problem JSON could not be decoded.
    #[error("failed to parse problem JSON at {path:?}: {source}")]
    ParseProblem {
        /// Problem file path.
        path: Utf8PathBuf,
        /// Underlying JSON failure.
        #[source]
        source: serde_json::Error,
    },
    /// The travel matrix in the problem file is unusable.
    #[error("problem file {path:?} has an invalid travel matrix: {source}")]
    InvalidMatrix {
        /// Problem file path.
        path: Utf8PathBuf,
        /// Matrix validation failure.
        #[source]
        source: MatrixError,
    },
    /// The number of location names does not match the matrix.
    #[error("problem file {path:?} names {found} locations but the matrix has {expected}")]
    NameCount {
        /// Problem file path.
        path: Utf8PathBuf,
        /// Locations in the matrix.
        expected: usize,
        /// Names supplied.
        found: usize,
    },
    /// The solver produced no itinerary.
    #[error("solver failed: {source}")]
    Solve {
        /// Solver failure.
        source: SolveError,
    },
    /// Serialising the report failed.
    #[error("failed to serialise itinerary report: {0}")]
    SerialiseReport(#[source] serde_json::Error),
    /// The stderr log subscriber could not be installed.
    #[error("failed to install logging: {0}")]
    Logging(#[source] Box<dyn std::error::Error + Send + Sync>),
    /// Writing the report failed.
    #[error("failed to write itinerary report: {0}")]
    WriteOutput(#[source] std::io::Error),
}
