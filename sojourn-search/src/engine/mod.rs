//! `VrpSearchEngine`: route search over a [`RoutingModel`] backed by
//! `vrp-core`.
//!
//! The model is handed to `vrp-core` as a single-vehicle problem whose
//! features enforce the model's dimensions and side constraints. The best
//! route found is then stripped of free nodes it does not need and scored
//! against the model, which also yields the feasible cumulative ranges.

mod evaluate;
mod items;
mod vrp;

use std::sync::Arc;
use std::time::Instant;

use log::Level;
use sojourn_core::{
    Assignment, LocalSearchMetaheuristic, RouteSearchEngine, RoutingModel, SearchError,
    SearchParameters,
};

use self::evaluate::{Completeness, Evaluator};
use self::items::{Item, insertion_items, remove_nodes};
use self::vrp::{VrpSolveContext, complete_route};

/// Configuration for [`VrpSearchEngine`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VrpSearchConfig {
    /// Upper bound on `vrp-core` generations when guided search is
    /// requested.
    pub max_generations: usize,
    /// Upper bound on `vrp-core` generations for plain descent.
    pub descent_generations: usize,
}

impl Default for VrpSearchConfig {
    fn default() -> Self {
        Self {
            max_generations: 300,
            descent_generations: 30,
        }
    }
}

/// Route search engine using `vrp-core`.
///
/// # Examples
/// ```rust
/// use sojourn_core::{RouteSearchEngine, RoutingModel, SearchParameters};
/// use sojourn_search::VrpSearchEngine;
///
/// let mut model = RoutingModel::new(3, 0, 1)?;
/// model.set_arc_cost_evaluator(|from, to| i64::from(from != to));
/// model.add_disjunction(vec![2], 100)?;
/// let assignment = VrpSearchEngine::new()
///     .search(&model, &SearchParameters::default())?;
/// assert_eq!(assignment.route(), Some(vec![0, 2, 1]));
/// assert_eq!(assignment.objective(), 2);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct VrpSearchEngine {
    config: VrpSearchConfig,
}

impl VrpSearchEngine {
    /// Construct an engine using default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(VrpSearchConfig::default())
    }

    /// Construct an engine with explicit configuration.
    #[must_use]
    pub const fn with_config(config: VrpSearchConfig) -> Self {
        Self { config }
    }

    /// Configuration in use.
    #[must_use]
    pub const fn config(&self) -> &VrpSearchConfig {
        &self.config
    }
}

impl RouteSearchEngine for VrpSearchEngine {
    fn search(
        &self,
        model: &RoutingModel,
        parameters: &SearchParameters,
    ) -> Result<Assignment, SearchError> {
        model.validate()?;
        let started_at = Instant::now();
        let level = if parameters.log_search {
            Level::Info
        } else {
            Level::Debug
        };
        let evaluator = Arc::new(Evaluator::new(Arc::new(model.clone())));
        let items = insertion_items(model);
        let guided =
            parameters.local_search_metaheuristic == LocalSearchMetaheuristic::GuidedLocalSearch;
        let max_time_seconds =
            usize::try_from(parameters.time_limit.as_secs().max(1)).unwrap_or(usize::MAX);
        log::log!(
            level,
            "vrp-core search over {} jobs, guided: {guided}, limit {max_time_seconds}s",
            items.len()
        );

        let found = if items.is_empty() {
            complete_route(model, Vec::new())
        } else {
            VrpSolveContext::new(&self.config, &evaluator)
                .solve(&items, max_time_seconds, guided)
                .map_err(|err| SearchError::Engine {
                    message: err.to_string(),
                })?
        };
        let route = prune_free_items(&evaluator, &items, found);

        let evaluation = evaluator
            .evaluate(&route, Completeness::Complete)
            .ok_or(SearchError::NoSolution {
                elapsed: started_at.elapsed(),
            })?;
        log::log!(
            level,
            "search finished: {} nodes visited, arc cost {}, objective {}",
            route.len(),
            evaluation.arc_cost,
            evaluation.cost
        );
        let cumuls = evaluation.node_ranges(&route, model.node_count());
        Ok(Assignment::from_route(model, &route, evaluation.cost, cumuls))
    }
}

/// Drop free items that `route` can do without, latest first.
///
/// `vrp-core` inserts every job it can place, so zero-penalty nodes end up
/// on the route even when they only add a cost-neutral detour.
fn prune_free_items(evaluator: &Evaluator, items: &[Item], mut route: Vec<usize>) -> Vec<usize> {
    let Some(mut cost) = evaluator
        .evaluate(&route, Completeness::Complete)
        .map(|evaluation| evaluation.cost)
    else {
        return route;
    };
    for item in items.iter().rev().filter(|item| item.is_free()) {
        if !item.is_on(&route) {
            continue;
        }
        let candidate = remove_nodes(&route, &item.nodes);
        if let Some(evaluation) = evaluator.evaluate(&candidate, Completeness::Complete)
            && evaluation.cost <= cost
        {
            cost = evaluation.cost;
            route = candidate;
        }
    }
    route
}
