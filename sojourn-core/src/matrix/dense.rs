//! Square travel tables held in memory.

use geo::Coord;

use super::error::MatrixError;
use super::geodesic::haversine_metres;
use super::provider::TravelMatrix;

/// Explicit travel-time and travel-cost tables.
///
/// Lookups outside the table return zero; construction guarantees every
/// in-range pair is present.
///
/// # Examples
/// ```rust
/// use sojourn_core::{DenseMatrix, TravelMatrix};
///
/// let matrix = DenseMatrix::from_seconds(vec![vec![0, 60], vec![90, 0]])?;
/// assert_eq!(matrix.location_count(), 2);
/// assert_eq!(matrix.arc_time(1, 0), 90);
/// assert_eq!(matrix.arc_cost(1, 0), 90);
/// # Ok::<(), sojourn_core::MatrixError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DenseMatrix {
    times: Vec<Vec<i64>>,
    costs: Vec<Vec<i64>>,
}

impl DenseMatrix {
    /// Build a matrix whose cost equals its travel time in seconds.
    ///
    /// # Errors
    /// Returns [`MatrixError`] when the table is empty, ragged or negative.
    pub fn from_seconds(times: Vec<Vec<i64>>) -> Result<Self, MatrixError> {
        check_table(&times)?;
        Ok(Self {
            costs: times.clone(),
            times,
        })
    }

    /// Build a matrix with separate time and cost tables.
    ///
    /// # Errors
    /// Returns [`MatrixError`] when either table is invalid or the two
    /// disagree in size.
    pub fn with_costs(times: Vec<Vec<i64>>, costs: Vec<Vec<i64>>) -> Result<Self, MatrixError> {
        check_table(&times)?;
        check_table(&costs)?;
        if times.len() != costs.len() {
            return Err(MatrixError::SizeMismatch {
                times: times.len(),
                costs: costs.len(),
            });
        }
        Ok(Self { times, costs })
    }

    /// Derive tables from coordinates travelled at a constant speed.
    ///
    /// Costs are great-circle metres; times are the seconds needed to cover
    /// that distance at `speed_kmh`, rounded to the nearest second.
    ///
    /// # Errors
    /// Returns [`MatrixError::EmptyInput`] for no coordinates and
    /// [`MatrixError::InvalidSpeed`] when the speed is not a positive
    /// finite number.
    pub fn from_coordinates(coords: &[Coord<f64>], speed_kmh: f64) -> Result<Self, MatrixError> {
        if coords.is_empty() {
            return Err(MatrixError::EmptyInput);
        }
        if !speed_kmh.is_finite() || speed_kmh <= 0.0 {
            return Err(MatrixError::InvalidSpeed);
        }
        let metres_per_second = speed_kmh * 1_000.0 / 3_600.0;
        let mut times = Vec::with_capacity(coords.len());
        let mut costs = Vec::with_capacity(coords.len());
        for from in coords {
            let distances: Vec<f64> = coords
                .iter()
                .map(|to| haversine_metres(*from, *to))
                .collect();
            times.push(
                distances
                    .iter()
                    .map(|metres| (metres / metres_per_second).round() as i64)
                    .collect(),
            );
            costs.push(distances.iter().map(|metres| metres.round() as i64).collect());
        }
        Ok(Self { times, costs })
    }

    /// Travel-time table in seconds.
    #[must_use]
    pub fn times(&self) -> &[Vec<i64>] {
        &self.times
    }

    /// Travel-cost table.
    #[must_use]
    pub fn costs(&self) -> &[Vec<i64>] {
        &self.costs
    }
}

impl TravelMatrix for DenseMatrix {
    fn location_count(&self) -> usize {
        self.times.len()
    }

    fn arc_cost(&self, from: usize, to: usize) -> i64 {
        lookup(&self.costs, from, to)
    }

    fn arc_time(&self, from: usize, to: usize) -> i64 {
        lookup(&self.times, from, to)
    }
}

fn lookup(table: &[Vec<i64>], from: usize, to: usize) -> i64 {
    debug_assert!(from < table.len() && to < table.len(), "index out of range");
    table
        .get(from)
        .and_then(|row| row.get(to))
        .copied()
        .unwrap_or(0)
}

fn check_table(table: &[Vec<i64>]) -> Result<(), MatrixError> {
    if table.is_empty() {
        return Err(MatrixError::EmptyInput);
    }
    let expected = table.len();
    for (from, row) in table.iter().enumerate() {
        if row.len() != expected {
            return Err(MatrixError::NotSquare {
                row: from,
                len: row.len(),
                expected,
            });
        }
        if let Some((to, value)) = row.iter().enumerate().find(|(_, value)| **value < 0) {
            return Err(MatrixError::NegativeEntry {
                from,
                to,
                value: *value,
            });
        }
    }
    Ok(())
}
