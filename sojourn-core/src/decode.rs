//! Read an engine [`Assignment`] back as an [`Itinerary`].

use thiserror::Error;

use crate::augment::NodeKind;
use crate::builder::ScheduleModel;
use crate::engine::Assignment;
use crate::itinerary::{Itinerary, ScheduledStop, StopKind};

/// Errors raised when an assignment does not describe a single route.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// A visited node has no successor.
    #[error("node {node} has no successor")]
    MissingSuccessor {
        /// Node lacking a successor.
        node: usize,
    },
    /// Following successors from the start never reaches the end.
    #[error("route does not reach the end depot within {steps} steps")]
    UnterminatedRoute {
        /// Steps taken before giving up.
        steps: usize,
    },
    /// The assignment names a node outside the schedule.
    #[error("node {node} is not part of the schedule")]
    UnknownNode {
        /// Offending node.
        node: usize,
    },
    /// A visited node lacks a cumulative value.
    #[error("no {dimension} value for node {node}")]
    MissingCumul {
        /// Dimension name.
        dimension: &'static str,
        /// Node lacking the value.
        node: usize,
    },
}

/// Decode `assignment` against the layout and dimensions in `schedule`.
///
/// Dropped nodes are the real, non-depot locations that are their own
/// successor. Scheduled stops follow successors from the start depot to the
/// end depot, which is always the final stop. Times are the feasible
/// arrival range in the Time dimension.
///
/// # Errors
/// Returns [`DecodeError`] when the successors do not form a route from
/// start to end or a visited node lacks a cumulative value.
pub fn decode(schedule: &ScheduleModel, assignment: &Assignment) -> Result<Itinerary, DecodeError> {
    let graph = schedule.graph();
    let dropped: Vec<usize> = graph
        .droppable_locations()
        .filter(|&node| assignment.next(node) == Some(node))
        .collect();

    let limit = graph.total_nodes();
    let mut scheduled = Vec::new();
    let mut day = 1_u32;
    let mut node = assignment.start();
    loop {
        let stop = scheduled_stop(schedule, assignment, node, day)?;
        if let StopKind::Overnight { .. } = stop.kind {
            day += 1;
        }
        scheduled.push(stop);
        if assignment.is_end(node) {
            break;
        }
        if scheduled.len() > limit {
            return Err(DecodeError::UnterminatedRoute { steps: limit });
        }
        node = assignment
            .next(node)
            .ok_or(DecodeError::MissingSuccessor { node })?;
    }

    Ok(Itinerary::new(scheduled, dropped, assignment.objective()))
}

fn scheduled_stop(
    schedule: &ScheduleModel,
    assignment: &Assignment,
    node: usize,
    day: u32,
) -> Result<ScheduledStop, DecodeError> {
    let kind = match schedule.graph().kind(node) {
        Some(NodeKind::StartDepot) => StopKind::Departure,
        Some(NodeKind::EndDepot) => StopKind::Arrival,
        Some(NodeKind::Location) => StopKind::Visit,
        Some(NodeKind::Night { night }) => StopKind::Overnight { night },
        Some(NodeKind::Morning { night }) => StopKind::DayStart { night },
        None => return Err(DecodeError::UnknownNode { node }),
    };
    let order = assignment
        .cumul_value(schedule.order_dimension(), node)
        .ok_or(DecodeError::MissingCumul {
            dimension: crate::builder::ORDER_DIMENSION,
            node,
        })?;
    let time = assignment
        .cumul_range(schedule.time_dimension(), node)
        .ok_or(DecodeError::MissingCumul {
            dimension: crate::builder::TIME_DIMENSION,
            node,
        })?;
    Ok(ScheduledStop {
        node,
        kind,
        day,
        order,
        earliest: time.min,
        latest: time.max,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build_schedule_model;
    use crate::config::ScheduleConfig;
    use crate::matrix::DenseMatrix;
    use crate::model::CumulRange;
    use rstest::{fixture, rstest};

    const HOUR: i64 = 3_600;

    #[fixture]
    fn schedule() -> ScheduleModel {
        let matrix = DenseMatrix::from_seconds(vec![vec![HOUR; 5]; 5]).expect("valid matrix");
        build_schedule_model(&matrix, &ScheduleConfig::default()).expect("valid schedule")
    }

    /// Assignment for route `0 -> 2 -> 5 -> 6 -> 3 -> 1`, node 4 dropped.
    fn two_day_assignment() -> Assignment {
        let next = vec![2, 1, 5, 1, 4, 6, 3];
        let time = vec![
            Some(CumulRange::new(6 * HOUR, 16 * HOUR)),
            Some(CumulRange::new(10 * HOUR, 18 * HOUR)),
            Some(CumulRange::new(7 * HOUR, 17 * HOUR)),
            Some(CumulRange::new(7 * HOUR, 16 * HOUR)),
            None,
            Some(CumulRange::new(6 * HOUR, 6 * HOUR)),
            Some(CumulRange::new(6 * HOUR, 15 * HOUR)),
        ];
        let order = vec![
            Some(CumulRange::fixed(0)),
            Some(CumulRange::fixed(5)),
            Some(CumulRange::fixed(1)),
            Some(CumulRange::fixed(4)),
            None,
            Some(CumulRange::fixed(2)),
            Some(CumulRange::fixed(3)),
        ];
        Assignment::new(0, 1, next, 123, vec![time, order])
    }

    #[rstest]
    fn decodes_scheduled_and_dropped(schedule: ScheduleModel) {
        let itinerary = decode(&schedule, &two_day_assignment()).expect("valid assignment");
        assert_eq!(itinerary.dropped(), &[4]);
        let nodes: Vec<usize> = itinerary.scheduled().iter().map(|s| s.node).collect();
        assert_eq!(nodes, vec![0, 2, 5, 6, 3, 1]);
        let days: Vec<u32> = itinerary.scheduled().iter().map(|s| s.day).collect();
        assert_eq!(days, vec![1, 1, 1, 2, 2, 2]);
        assert_eq!(itinerary.objective(), 123);
    }

    #[rstest]
    fn labels_synthetic_stops(schedule: ScheduleModel) {
        let itinerary = decode(&schedule, &two_day_assignment()).expect("valid assignment");
        let labels: Vec<String> = itinerary.scheduled().iter().map(ScheduledStop::label).collect();
        assert_eq!(
            labels,
            vec![
                "0",
                "2",
                "Overnight stay (night 1)",
                "Day-start departure (day 2)",
                "3",
                "1"
            ]
        );
        let morning = itinerary.scheduled().get(3).expect("morning stop");
        assert_eq!(morning.earliest, 6 * HOUR);
        assert_eq!(morning.order, 3);
    }

    #[rstest]
    fn end_depot_is_always_last(schedule: ScheduleModel) {
        let next = vec![1, 1, 2, 3, 4, 5, 6];
        let ranges = vec![Some(CumulRange::new(6 * HOUR, 18 * HOUR)); 7];
        let assignment = Assignment::new(0, 1, next, 3 * 10_000_000, vec![ranges.clone(), ranges]);
        let itinerary = decode(&schedule, &assignment).expect("valid assignment");
        assert_eq!(itinerary.dropped(), &[2, 3, 4]);
        assert_eq!(itinerary.scheduled().len(), 2);
        assert_eq!(
            itinerary.scheduled().last().map(|s| s.kind),
            Some(StopKind::Arrival)
        );
    }

    #[rstest]
    fn cyclic_successors_are_rejected(schedule: ScheduleModel) {
        let next = vec![2, 1, 3, 2, 4, 5, 6];
        let ranges = vec![Some(CumulRange::fixed(0)); 7];
        let assignment = Assignment::new(0, 1, next, 0, vec![ranges.clone(), ranges]);
        assert_eq!(
            decode(&schedule, &assignment),
            Err(DecodeError::UnterminatedRoute { steps: 7 })
        );
    }

    #[rstest]
    fn missing_cumul_is_reported(schedule: ScheduleModel) {
        let next = vec![1, 1, 2, 3, 4, 5, 6];
        let assignment = Assignment::new(0, 1, next, 0, Vec::new());
        assert_eq!(
            decode(&schedule, &assignment),
            Err(DecodeError::MissingCumul {
                dimension: "Counting",
                node: 0
            })
        );
    }
}
