//! Route search engine boundary.
//!
//! Engines receive a finished [`RoutingModel`] and return an [`Assignment`]:
//! the successor of every node plus the feasible range of each cumulative
//! value. Unvisited nodes are their own successor.

use std::time::Duration;

use thiserror::Error;

use crate::model::{CumulRange, DimensionId, ModelError, RoutingModel};

/// How the engine builds its first route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FirstSolutionStrategy {
    /// Repeatedly insert the node whose cheapest insertion costs least.
    #[default]
    ParallelCheapestInsertion,
}

/// How the engine improves the first route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LocalSearchMetaheuristic {
    /// Run a short improvement phase after the first route.
    GreedyDescent,
    /// Keep ruining and recreating the route until the time limit or the
    /// engine's generation cap.
    #[default]
    GuidedLocalSearch,
}

/// Parameters for a single search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParameters {
    /// Construction heuristic.
    pub first_solution_strategy: FirstSolutionStrategy,
    /// Improvement strategy.
    pub local_search_metaheuristic: LocalSearchMetaheuristic,
    /// Wall-clock budget.
    pub time_limit: Duration,
    /// Log search progress at info level.
    pub log_search: bool,
}

impl Default for SearchParameters {
    fn default() -> Self {
        Self {
            first_solution_strategy: FirstSolutionStrategy::default(),
            local_search_metaheuristic: LocalSearchMetaheuristic::default(),
            time_limit: Duration::from_secs(10),
            log_search: false,
        }
    }
}

/// Errors returned by [`RouteSearchEngine::search`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// No feasible route was found before the budget ran out.
    #[error("no feasible solution found after {elapsed:?}")]
    NoSolution {
        /// Time spent searching.
        elapsed: Duration,
    },
    /// The engine could not interpret the model.
    #[error(transparent)]
    InvalidModel(#[from] ModelError),
    /// The underlying search library failed.
    #[error("search engine failed: {message}")]
    Engine {
        /// Message reported by the library.
        message: String,
    },
}

/// A solution as reported by a search engine.
///
/// # Examples
/// ```rust
/// use sojourn_core::{Assignment, CumulRange};
///
/// // Route 0 -> 2 -> 1 over three nodes, one dimension.
/// let assignment = Assignment::new(
///     0,
///     1,
///     vec![2, 1, 1],
///     42,
///     vec![vec![
///         Some(CumulRange::fixed(0)),
///         Some(CumulRange::fixed(2)),
///         Some(CumulRange::fixed(1)),
///     ]],
/// );
/// assert!(assignment.is_active(2));
/// assert_eq!(assignment.next(0), Some(2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    start: usize,
    end: usize,
    next: Vec<usize>,
    objective: i64,
    cumuls: Vec<Vec<Option<CumulRange>>>,
}

impl Assignment {
    /// Build an assignment.
    ///
    /// `next[node]` is the successor of `node`; `next[node] == node` marks an
    /// unvisited node and the end node. `cumuls[dimension][node]` is the
    /// feasible range at each visited node.
    #[must_use]
    pub const fn new(
        start: usize,
        end: usize,
        next: Vec<usize>,
        objective: i64,
        cumuls: Vec<Vec<Option<CumulRange>>>,
    ) -> Self {
        Self {
            start,
            end,
            next,
            objective,
            cumuls,
        }
    }

    /// Build an assignment from the visited sequence `route`.
    #[must_use]
    pub fn from_route(
        model: &RoutingModel,
        route: &[usize],
        objective: i64,
        cumuls: Vec<Vec<Option<CumulRange>>>,
    ) -> Self {
        let mut next: Vec<usize> = (0..model.node_count()).collect();
        for pair in route.windows(2) {
            if let [from, to] = *pair {
                if let Some(slot) = next.get_mut(from) {
                    *slot = to;
                }
            }
        }
        Self::new(model.start(), model.end(), next, objective, cumuls)
    }

    /// Start node.
    #[must_use]
    pub const fn start(&self) -> usize {
        self.start
    }

    /// End node.
    #[must_use]
    pub const fn end(&self) -> usize {
        self.end
    }

    /// Whether `node` is the end node.
    #[must_use]
    pub const fn is_end(&self, node: usize) -> bool {
        node == self.end
    }

    /// Successor of `node`.
    #[must_use]
    pub fn next(&self, node: usize) -> Option<usize> {
        self.next.get(node).copied()
    }

    /// Whether `node` lies on the route.
    #[must_use]
    pub fn is_active(&self, node: usize) -> bool {
        node == self.start || node == self.end || self.next(node).is_some_and(|n| n != node)
    }

    /// Objective value: arc costs plus penalties of unvisited nodes.
    #[must_use]
    pub const fn objective(&self) -> i64 {
        self.objective
    }

    /// Feasible range of `dimension` at `node`.
    #[must_use]
    pub fn cumul_range(&self, dimension: DimensionId, node: usize) -> Option<CumulRange> {
        self.cumuls
            .get(dimension.index())
            .and_then(|ranges| ranges.get(node))
            .copied()
            .flatten()
    }

    /// Earliest feasible value of `dimension` at `node`.
    #[must_use]
    pub fn cumul_value(&self, dimension: DimensionId, node: usize) -> Option<i64> {
        self.cumul_range(dimension, node).map(|range| range.min)
    }

    /// Visited nodes in route order, or `None` when the successors do not
    /// lead from start to end.
    #[must_use]
    pub fn route(&self) -> Option<Vec<usize>> {
        let mut route = vec![self.start];
        let mut node = self.start;
        while !self.is_end(node) {
            node = self.next(node)?;
            if route.len() > self.next.len() {
                return None;
            }
            route.push(node);
        }
        Some(route)
    }
}

/// Searches a [`RoutingModel`] for a low-cost feasible route.
///
/// Implementations honour the parameters' time limit and return
/// [`SearchError::NoSolution`] when no feasible route is found in time.
pub trait RouteSearchEngine {
    /// Search `model` under `parameters`.
    ///
    /// # Errors
    /// Returns [`SearchError`] when no feasible route is found or the model
    /// cannot be searched.
    fn search(
        &self,
        model: &RoutingModel,
        parameters: &SearchParameters,
    ) -> Result<Assignment, SearchError>;
}
