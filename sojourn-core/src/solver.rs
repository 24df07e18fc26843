//! Solver boundary: request in, itinerary out.

use std::time::{Duration, Instant};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::builder::{BuildError, build_schedule_model};
use crate::config::{ConfigError, ScheduleConfig, SearchSettings};
use crate::decode::{DecodeError, decode};
use crate::engine::{RouteSearchEngine, SearchError};
use crate::itinerary::Itinerary;
use crate::matrix::TravelMatrix;
use crate::search::run_search;

/// Parameters for a solve request.
///
/// # Examples
/// ```rust
/// use sojourn_core::{ScheduleConfig, SearchSettings, SolveRequest};
///
/// let request = SolveRequest {
///     schedule: ScheduleConfig { days: 3, ..ScheduleConfig::default() },
///     search: SearchSettings::default(),
/// };
/// assert!(request.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SolveRequest {
    /// Calendar and stop parameters.
    pub schedule: ScheduleConfig,
    /// Search controls.
    pub search: SearchSettings,
}

impl SolveRequest {
    /// Validate the request before solving.
    ///
    /// # Errors
    /// Returns [`ConfigError`] when either part is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.schedule.validate()?;
        self.search.validate()
    }
}

/// Diagnostics describing how a solve went.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostics {
    /// Wall-clock time spent building, searching and decoding.
    pub solve_time: Duration,
    /// Nodes in the augmented graph.
    pub total_nodes: usize,
    /// Real locations, depots included.
    pub real_locations: usize,
}

/// Response from a successful solve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolveResponse {
    /// The decoded itinerary.
    pub itinerary: Itinerary,
    /// Solve diagnostics.
    pub diagnostics: Diagnostics,
}

/// Errors returned by [`Solver::solve`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveError {
    /// Request parameters were invalid, e.g. zero days.
    #[error("invalid request: {0}")]
    InvalidRequest(#[from] ConfigError),
    /// The schedule could not be compiled.
    #[error("failed to build schedule model: {0}")]
    Build(#[from] BuildError),
    /// No feasible itinerary was found within the time limit.
    #[error("no feasible itinerary found within {time_limit:?}")]
    NoSolution {
        /// Budget that was exhausted.
        time_limit: Duration,
    },
    /// The search engine failed.
    #[error("search failed: {0}")]
    Search(SearchError),
    /// The engine returned a solution that could not be decoded.
    #[error("failed to decode solution: {0}")]
    Decode(#[from] DecodeError),
}

/// Plan an itinerary satisfying the caller's calendar.
///
/// Implementations return [`SolveError::InvalidRequest`] for invalid
/// parameters rather than panicking. Solvers must be `Send + Sync` to operate
/// safely across threads.
pub trait Solver: Send + Sync {
    /// Solve a request, producing an itinerary or an error.
    ///
    /// # Errors
    /// Returns [`SolveError`] describing why no itinerary was produced.
    fn solve(&self, request: &SolveRequest) -> Result<SolveResponse, SolveError>;
}

/// Run the full pipeline over `matrix` with `engine`: validate, compile,
/// search and decode.
///
/// # Errors
/// Returns [`SolveError`] from whichever stage failed.
pub fn solve_with_engine<M, E>(
    matrix: &M,
    engine: &E,
    request: &SolveRequest,
) -> Result<SolveResponse, SolveError>
where
    M: TravelMatrix + ?Sized,
    E: RouteSearchEngine + ?Sized,
{
    request.validate()?;
    let started_at = Instant::now();
    let schedule = build_schedule_model(matrix, &request.schedule)?;
    let assignment = run_search(engine, &schedule, &request.search)?;
    let itinerary = decode(&schedule, &assignment)?;
    Ok(SolveResponse {
        itinerary,
        diagnostics: Diagnostics {
            solve_time: started_at.elapsed(),
            total_nodes: schedule.graph().total_nodes(),
            real_locations: schedule.graph().real_count(),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    use crate::engine::{Assignment, SearchParameters};
    use crate::matrix::DenseMatrix;
    use crate::model::{CumulRange, RoutingModel};

    /// Visits every node in index order after the start, end depot last.
    struct InOrder;

    impl RouteSearchEngine for InOrder {
        fn search(
            &self,
            model: &RoutingModel,
            _parameters: &SearchParameters,
        ) -> Result<Assignment, SearchError> {
            let mut route = vec![model.start()];
            route.extend((0..model.node_count()).filter(|&n| n != model.start() && n != model.end()));
            route.push(model.end());
            let cumuls = model
                .dimensions()
                .iter()
                .map(|_| {
                    (0..model.node_count())
                        .map(|n| i64::try_from(n).ok().map(CumulRange::fixed))
                        .collect()
                })
                .collect();
            Ok(Assignment::from_route(model, &route, 0, cumuls))
        }
    }

    fn matrix() -> DenseMatrix {
        DenseMatrix::from_seconds(vec![vec![0; 4]; 4]).expect("valid matrix")
    }

    #[rstest]
    fn pipeline_decodes_engine_output() {
        let request = SolveRequest {
            schedule: ScheduleConfig {
                days: 1,
                ..ScheduleConfig::default()
            },
            search: SearchSettings::default(),
        };
        let response = solve_with_engine(&matrix(), &InOrder, &request).expect("solve succeeds");
        let nodes: Vec<usize> = response
            .itinerary
            .scheduled()
            .iter()
            .map(|stop| stop.node)
            .collect();
        assert_eq!(nodes, vec![0, 2, 3, 1]);
        assert!(response.itinerary.dropped().is_empty());
        assert_eq!(response.diagnostics.total_nodes, 4);
        assert_eq!(response.diagnostics.real_locations, 4);
    }

    #[rstest]
    fn zero_days_rejected_before_search() {
        let request = SolveRequest {
            schedule: ScheduleConfig {
                days: 0,
                ..ScheduleConfig::default()
            },
            search: SearchSettings::default(),
        };
        let err = solve_with_engine(&matrix(), &InOrder, &request).expect_err("invalid days");
        assert_eq!(
            err,
            SolveError::InvalidRequest(ConfigError::NonPositiveDays { days: 0 })
        );
    }

    #[rstest]
    fn zero_time_limit_rejected() {
        let request = SolveRequest {
            schedule: ScheduleConfig::default(),
            search: SearchSettings {
                time_limit_seconds: 0,
                ..SearchSettings::default()
            },
        };
        assert_eq!(request.validate(), Err(ConfigError::ZeroTimeLimit));
    }
}
