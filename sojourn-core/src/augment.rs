//! Overnight node augmentation.
//!
//! A single-day location graph is extended with one *night* node per day
//! boundary and, optionally, one *morning* node paired with each night.
//! Indices are laid out contiguously: real locations first, then nights,
//! then mornings. Synthetic nodes are physically the start depot.

use std::ops::Range;

use thiserror::Error;

use crate::config::ScheduleConfig;

/// Index of the start depot.
pub const START_DEPOT: usize = 0;
/// Index of the end depot.
pub const END_DEPOT: usize = 1;
/// Number of real indices reserved for depots.
pub const RESERVED_DEPOTS: usize = 2;

/// Errors raised while laying out the augmented graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AugmentError {
    /// At least one day is required.
    #[error("days must be positive, got {days}")]
    NonPositiveDays {
        /// Rejected day count.
        days: i32,
    },
    /// Both depots must be present among the real locations.
    #[error("expected at least two real locations for the depots, got {found}")]
    MissingDepot {
        /// Real locations supplied.
        found: usize,
    },
}

/// Role of a node in the augmented graph.
///
/// `night` is the zero-based index of the day boundary: night 0 separates
/// day 1 from day 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Where the route begins.
    StartDepot,
    /// Where the route finishes.
    EndDepot,
    /// A candidate location that may be dropped.
    Location,
    /// Return to the depot at the end of a day.
    Night {
        /// Day boundary index.
        night: usize,
    },
    /// Departure from the depot at the start of the following day.
    Morning {
        /// Day boundary index shared with the paired night.
        night: usize,
    },
}

impl NodeKind {
    /// Whether the node was added by augmentation.
    #[must_use]
    pub const fn is_synthetic(self) -> bool {
        matches!(self, Self::Night { .. } | Self::Morning { .. })
    }
}

/// Node layout of the augmented graph.
///
/// # Examples
/// ```rust
/// use sojourn_core::{AugmentedGraph, NodeKind};
///
/// let graph = AugmentedGraph::new(5, 2, false)?;
/// assert_eq!(graph.total_nodes(), 7);
/// assert_eq!(graph.kind(5), Some(NodeKind::Night { night: 0 }));
/// assert_eq!(graph.kind(6), Some(NodeKind::Morning { night: 0 }));
/// # Ok::<(), sojourn_core::AugmentError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AugmentedGraph {
    real_count: usize,
    night_nodes: Range<usize>,
    morning_nodes: Range<usize>,
}

impl AugmentedGraph {
    /// Lay out nodes for `real_count` locations over `days` days.
    ///
    /// # Errors
    /// Returns [`AugmentError::NonPositiveDays`] when `days <= 0` and
    /// [`AugmentError::MissingDepot`] when fewer than two real locations are
    /// supplied.
    pub fn new(
        real_count: usize,
        days: i32,
        skip_morning_anchor_nodes: bool,
    ) -> Result<Self, AugmentError> {
        if days <= 0 {
            return Err(AugmentError::NonPositiveDays { days });
        }
        if real_count < RESERVED_DEPOTS {
            return Err(AugmentError::MissingDepot { found: real_count });
        }
        let overnight = usize::try_from(days - 1).unwrap_or(0);
        let night_end = real_count + overnight;
        let morning_end = if skip_morning_anchor_nodes {
            night_end
        } else {
            night_end + overnight
        };
        Ok(Self {
            real_count,
            night_nodes: real_count..night_end,
            morning_nodes: night_end..morning_end,
        })
    }

    /// Lay out nodes using the day count and anchoring choice from `config`.
    ///
    /// # Errors
    /// See [`AugmentedGraph::new`].
    pub fn from_config(real_count: usize, config: &ScheduleConfig) -> Result<Self, AugmentError> {
        Self::new(real_count, config.days, config.skip_morning_anchor_nodes)
    }

    /// Number of real locations, depots included.
    #[must_use]
    pub const fn real_count(&self) -> usize {
        self.real_count
    }

    /// Number of nodes after augmentation.
    #[must_use]
    pub const fn total_nodes(&self) -> usize {
        self.morning_nodes.end
    }

    /// Number of overnight stays.
    #[must_use]
    pub const fn overnight_count(&self) -> usize {
        self.night_nodes.end - self.night_nodes.start
    }

    /// Whether morning nodes were generated.
    #[must_use]
    pub const fn has_morning_anchors(&self) -> bool {
        self.morning_nodes.end > self.morning_nodes.start
    }

    /// Indices of the night nodes.
    #[must_use]
    pub fn night_nodes(&self) -> Range<usize> {
        self.night_nodes.clone()
    }

    /// Indices of the morning nodes; empty when anchoring is skipped.
    #[must_use]
    pub fn morning_nodes(&self) -> Range<usize> {
        self.morning_nodes.clone()
    }

    /// Indices of the real locations that may be dropped.
    #[must_use]
    pub const fn droppable_locations(&self) -> Range<usize> {
        RESERVED_DEPOTS..self.real_count
    }

    /// Classify `node`, or `None` when it lies outside the graph.
    #[must_use]
    pub fn kind(&self, node: usize) -> Option<NodeKind> {
        match node {
            START_DEPOT => Some(NodeKind::StartDepot),
            END_DEPOT => Some(NodeKind::EndDepot),
            n if n < self.real_count => Some(NodeKind::Location),
            n if self.night_nodes.contains(&n) => Some(NodeKind::Night {
                night: n - self.night_nodes.start,
            }),
            n if self.morning_nodes.contains(&n) => Some(NodeKind::Morning {
                night: n - self.morning_nodes.start,
            }),
            _ => None,
        }
    }

    /// Whether `node` is a night or morning node.
    #[must_use]
    pub fn is_synthetic(&self, node: usize) -> bool {
        self.kind(node).is_some_and(NodeKind::is_synthetic)
    }

    /// Whether `node` is a real location other than a depot.
    #[must_use]
    pub const fn is_droppable_location(&self, node: usize) -> bool {
        node >= RESERVED_DEPOTS && node < self.real_count
    }

    /// Morning node paired with the night node `night_node`.
    #[must_use]
    pub fn morning_for(&self, night_node: usize) -> Option<usize> {
        match self.kind(night_node)? {
            NodeKind::Night { night } => {
                let morning = self.morning_nodes.start + night;
                self.morning_nodes.contains(&morning).then_some(morning)
            }
            _ => None,
        }
    }

    /// Night node paired with the morning node `morning_node`.
    #[must_use]
    pub fn night_for(&self, morning_node: usize) -> Option<usize> {
        match self.kind(morning_node)? {
            NodeKind::Morning { night } => Some(self.night_nodes.start + night),
            _ => None,
        }
    }

    /// Real location a node stands for; synthetic nodes sit on the start
    /// depot.
    #[must_use]
    pub fn physical_location(&self, node: usize) -> Option<usize> {
        match self.kind(node)? {
            NodeKind::Night { .. } | NodeKind::Morning { .. } => Some(START_DEPOT),
            _ => Some(node),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(5, 2, false, 7)]
    #[case(5, 2, true, 6)]
    #[case(5, 1, false, 5)]
    #[case(4, 4, false, 10)]
    #[case(2, 3, true, 4)]
    fn total_node_count(
        #[case] real: usize,
        #[case] days: i32,
        #[case] skip: bool,
        #[case] expected: usize,
    ) {
        let graph = AugmentedGraph::new(real, days, skip).expect("valid layout");
        assert_eq!(graph.total_nodes(), expected);
    }

    #[rstest]
    fn ranges_are_contiguous() {
        let graph = AugmentedGraph::new(6, 3, false).expect("valid layout");
        assert_eq!(graph.night_nodes(), 6..8);
        assert_eq!(graph.morning_nodes(), 8..10);
        assert_eq!(graph.droppable_locations(), 2..6);
        assert!(graph.has_morning_anchors());
    }

    #[rstest]
    fn classifies_nodes() {
        let graph = AugmentedGraph::new(4, 3, false).expect("valid layout");
        assert_eq!(graph.kind(0), Some(NodeKind::StartDepot));
        assert_eq!(graph.kind(1), Some(NodeKind::EndDepot));
        assert_eq!(graph.kind(3), Some(NodeKind::Location));
        assert_eq!(graph.kind(5), Some(NodeKind::Night { night: 1 }));
        assert_eq!(graph.kind(7), Some(NodeKind::Morning { night: 1 }));
        assert_eq!(graph.kind(8), None);
        assert!(graph.is_synthetic(4));
        assert!(!graph.is_synthetic(3));
        assert!(graph.is_droppable_location(2));
        assert!(!graph.is_droppable_location(1));
        assert!(!graph.is_droppable_location(4));
    }

    #[rstest]
    fn pairs_nights_with_mornings() {
        let graph = AugmentedGraph::new(4, 3, false).expect("valid layout");
        assert_eq!(graph.morning_for(4), Some(6));
        assert_eq!(graph.morning_for(5), Some(7));
        assert_eq!(graph.night_for(7), Some(5));
        assert_eq!(graph.morning_for(2), None);
        assert_eq!(graph.physical_location(6), Some(START_DEPOT));
        assert_eq!(graph.physical_location(3), Some(3));
    }

    #[rstest]
    fn skipped_mornings_leave_nights_unpaired() {
        let graph = AugmentedGraph::new(4, 3, true).expect("valid layout");
        assert!(!graph.has_morning_anchors());
        assert_eq!(graph.morning_for(4), None);
        assert_eq!(graph.overnight_count(), 2);
    }

    #[rstest]
    #[case(0)]
    #[case(-2)]
    fn rejects_non_positive_days(#[case] days: i32) {
        assert_eq!(
            AugmentedGraph::new(5, days, false),
            Err(AugmentError::NonPositiveDays { days })
        );
    }

    #[rstest]
    fn rejects_missing_depot() {
        assert_eq!(
            AugmentedGraph::new(1, 2, false),
            Err(AugmentError::MissingDepot { found: 1 })
        );
    }
}
