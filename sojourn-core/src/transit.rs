//! Travel cost and time over the augmented graph.
//!
//! Synthetic nodes are coincident with the start depot, so any lookup
//! involving one is answered by the underlying matrix for the depot. The
//! time transit also adds service time at visited locations.
//!
//! A night node's Time value is the clock time of the arrival home, so the
//! night window caps the return at the end of the day. The overnight offset
//! is applied on the arc leaving the night: together with the night's slack
//! it rolls the clock back to the next morning.

use crate::augment::{AugmentedGraph, NodeKind};
use crate::config::ScheduleConfig;
use crate::matrix::TravelMatrix;

/// Arc evaluators for the schedule model.
///
/// # Examples
/// ```rust
/// use sojourn_core::{AugmentedGraph, DenseMatrix, ScheduleConfig, ScheduleTransit};
///
/// let matrix = DenseMatrix::from_seconds(vec![
///     vec![0, 0, 600],
///     vec![0, 0, 600],
///     vec![600, 600, 0],
/// ])?;
/// let config = ScheduleConfig::default();
/// let graph = AugmentedGraph::from_config(3, &config)?;
/// let transit = ScheduleTransit::new(&matrix, &graph, &config);
///
/// // Location 2 -> night node 3: serve, then travel home.
/// assert_eq!(transit.arc_time(2, 3), 1_800 + 600);
/// // Night -> morning rewinds the clock by the overnight offset.
/// assert_eq!(transit.arc_time(3, 4), -12 * 3_600);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ScheduleTransit<'a, M: ?Sized> {
    matrix: &'a M,
    graph: &'a AugmentedGraph,
    service_time: i64,
    overnight_offset: i64,
}

impl<'a, M> ScheduleTransit<'a, M>
where
    M: TravelMatrix + ?Sized,
{
    /// Wrap `matrix` for the node layout in `graph`.
    #[must_use]
    pub fn new(matrix: &'a M, graph: &'a AugmentedGraph, config: &ScheduleConfig) -> Self {
        Self {
            matrix,
            graph,
            service_time: config.service_time(),
            overnight_offset: config.overnight_offset(),
        }
    }

    /// Cost of the arc `from -> to`.
    #[must_use]
    pub fn arc_cost(&self, from: usize, to: usize) -> i64 {
        self.matrix
            .arc_cost(self.physical(from), self.physical(to))
    }

    /// Time consumed by the arc `from -> to`, including service at `from`.
    ///
    /// Arcs leaving a night node also carry the overnight offset.
    #[must_use]
    pub fn arc_time(&self, from: usize, to: usize) -> i64 {
        let travel = self
            .matrix
            .arc_time(self.physical(from), self.physical(to));
        match self.graph.kind(from) {
            Some(NodeKind::Night { .. }) => travel + self.overnight_offset,
            _ => travel + self.service(from),
        }
    }

    fn service(&self, node: usize) -> i64 {
        if self.graph.is_droppable_location(node) {
            self.service_time
        } else {
            0
        }
    }

    fn physical(&self, node: usize) -> usize {
        self.graph.physical_location(node).unwrap_or(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::DenseMatrix;
    use rstest::{fixture, rstest};

    const HOUR: i64 = 3_600;

    #[fixture]
    fn matrix() -> DenseMatrix {
        DenseMatrix::from_seconds(vec![
            vec![0, 0, HOUR, 2 * HOUR],
            vec![0, 0, HOUR, 2 * HOUR],
            vec![HOUR, HOUR, 0, 3 * HOUR],
            vec![2 * HOUR, 2 * HOUR, 3 * HOUR, 0],
        ])
        .expect("valid matrix")
    }

    #[rstest]
    fn location_to_location_adds_service(matrix: DenseMatrix) {
        let config = ScheduleConfig::default();
        let graph = AugmentedGraph::from_config(4, &config).expect("valid layout");
        let transit = ScheduleTransit::new(&matrix, &graph, &config);
        assert_eq!(transit.arc_time(2, 3), 3 * HOUR + 1_800);
        assert_eq!(transit.arc_time(0, 2), HOUR);
        assert_eq!(transit.arc_cost(2, 3), 3 * HOUR);
    }

    #[rstest]
    fn entering_night_is_the_trip_home(matrix: DenseMatrix) {
        let config = ScheduleConfig {
            days: 3,
            ..ScheduleConfig::default()
        };
        let graph = AugmentedGraph::from_config(4, &config).expect("valid layout");
        let transit = ScheduleTransit::new(&matrix, &graph, &config);
        let night = graph.night_nodes().start;
        assert_eq!(transit.arc_time(3, night), 2 * HOUR + 1_800);
        assert_eq!(transit.arc_cost(3, night), 2 * HOUR);
        assert_eq!(transit.arc_time(0, night), 0);
    }

    #[rstest]
    fn leaving_night_rewinds_to_the_morning(matrix: DenseMatrix) {
        let config = ScheduleConfig::default();
        let graph = AugmentedGraph::from_config(4, &config).expect("valid layout");
        let transit = ScheduleTransit::new(&matrix, &graph, &config);
        let night = graph.night_nodes().start;
        let morning = graph.morning_for(night).expect("paired morning");
        assert_eq!(transit.arc_time(night, morning), -12 * HOUR);
        assert_eq!(transit.arc_time(morning, 3), 2 * HOUR);
        assert_eq!(transit.arc_cost(morning, 3), 2 * HOUR);
        assert_eq!(transit.arc_cost(night, morning), 0);
    }

    #[rstest]
    fn skipped_mornings_leave_from_night(matrix: DenseMatrix) {
        let config = ScheduleConfig {
            skip_morning_anchor_nodes: true,
            ..ScheduleConfig::default()
        };
        let graph = AugmentedGraph::from_config(4, &config).expect("valid layout");
        let transit = ScheduleTransit::new(&matrix, &graph, &config);
        let night = graph.night_nodes().start;
        assert_eq!(transit.arc_time(night, 2), HOUR - 12 * HOUR);
    }
}
