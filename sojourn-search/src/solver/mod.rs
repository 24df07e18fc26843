//! `VrpSolver`: the full pipeline over an owned travel matrix.

use sojourn_core::{
    SolveError, SolveRequest, SolveResponse, Solver, TravelMatrix, solve_with_engine,
};

use crate::engine::{VrpSearchConfig, VrpSearchEngine};

/// Solver pairing a travel matrix with [`VrpSearchEngine`].
///
/// # Examples
/// ```rust
/// use sojourn_core::{DenseMatrix, SolveRequest, Solver};
/// use sojourn_search::VrpSolver;
///
/// let matrix = DenseMatrix::from_seconds(vec![
///     vec![0, 0, 600],
///     vec![0, 0, 600],
///     vec![600, 600, 0],
/// ])?;
/// let mut request = SolveRequest::default();
/// request.schedule.days = 1;
/// request.search.time_limit_seconds = 1;
/// let response = VrpSolver::new(matrix).solve(&request)?;
/// assert_eq!(response.itinerary.visits().count(), 1);
/// assert!(response.itinerary.dropped().is_empty());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct VrpSolver<M>
where
    M: TravelMatrix,
{
    matrix: M,
    engine: VrpSearchEngine,
}

impl<M> VrpSolver<M>
where
    M: TravelMatrix,
{
    /// Construct a solver using default engine configuration.
    #[must_use]
    pub fn new(matrix: M) -> Self {
        Self::with_config(matrix, VrpSearchConfig::default())
    }

    /// Construct a solver with explicit engine configuration.
    #[must_use]
    pub const fn with_config(matrix: M, config: VrpSearchConfig) -> Self {
        Self {
            matrix,
            engine: VrpSearchEngine::with_config(config),
        }
    }

    /// Travel matrix the solver plans over.
    #[must_use]
    pub const fn matrix(&self) -> &M {
        &self.matrix
    }
}

impl<M> Solver for VrpSolver<M>
where
    M: TravelMatrix + Send + Sync,
{
    fn solve(&self, request: &SolveRequest) -> Result<SolveResponse, SolveError> {
        solve_with_engine(&self.matrix, &self.engine, request)
    }
}

#[cfg(test)]
mod tests;
