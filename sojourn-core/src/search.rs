//! Hand a compiled schedule to a search engine.

use log::{info, warn};

use crate::builder::ScheduleModel;
use crate::config::SearchSettings;
use crate::engine::{
    Assignment, FirstSolutionStrategy, LocalSearchMetaheuristic, RouteSearchEngine, SearchError,
    SearchParameters,
};
use crate::solver::SolveError;

/// Translate caller settings into engine parameters.
///
/// The first solution is always built by parallel cheapest insertion;
/// guided local search is used unless disabled.
#[must_use]
pub const fn search_parameters(settings: &SearchSettings) -> SearchParameters {
    SearchParameters {
        first_solution_strategy: FirstSolutionStrategy::ParallelCheapestInsertion,
        local_search_metaheuristic: if settings.guided_local_search {
            LocalSearchMetaheuristic::GuidedLocalSearch
        } else {
            LocalSearchMetaheuristic::GreedyDescent
        },
        time_limit: settings.time_limit(),
        log_search: settings.verbose_search_log,
    }
}

/// Search `schedule` with `engine`.
///
/// # Errors
/// Returns [`SolveError::NoSolution`] when the engine finds no feasible
/// route within the time limit and [`SolveError::Search`] for any other
/// engine failure.
pub fn run_search<E>(
    engine: &E,
    schedule: &ScheduleModel,
    settings: &SearchSettings,
) -> Result<Assignment, SolveError>
where
    E: RouteSearchEngine + ?Sized,
{
    let parameters = search_parameters(settings);
    info!(
        "searching {} nodes for up to {:?}",
        schedule.model().node_count(),
        parameters.time_limit
    );
    match engine.search(schedule.model(), &parameters) {
        Ok(assignment) => {
            info!("search finished with objective {}", assignment.objective());
            Ok(assignment)
        }
        Err(SearchError::NoSolution { elapsed }) => {
            warn!("no feasible itinerary found after {elapsed:?}");
            Err(SolveError::NoSolution {
                time_limit: parameters.time_limit,
            })
        }
        Err(err) => Err(SolveError::Search(err)),
    }
}
