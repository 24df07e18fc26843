//! Optional-visit groups and side constraints linking nodes.

use super::DimensionId;

/// A set of nodes of which at most one is visited.
///
/// When none of the nodes is on the route, `penalty` is added to the
/// objective.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Disjunction {
    nodes: Vec<usize>,
    penalty: i64,
}

impl Disjunction {
    pub(crate) const fn new(nodes: Vec<usize>, penalty: i64) -> Self {
        Self { nodes, penalty }
    }

    /// Member nodes.
    #[must_use]
    pub fn nodes(&self) -> &[usize] {
        &self.nodes
    }

    /// Cost of leaving every member unvisited.
    #[must_use]
    pub const fn penalty(&self) -> i64 {
        self.penalty
    }

    /// Most members that may be visited together.
    #[must_use]
    pub const fn max_cardinality(&self) -> usize {
        1
    }
}

/// Constraint between the activation or cumulative values of two nodes.
///
/// A node is *active* when it lies on the route. Constraints that mention
/// cumulative values are vacuous unless both nodes are active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelConstraint {
    /// Visiting `node` requires visiting `requires`.
    RequiresActive {
        /// Dependent node.
        node: usize,
        /// Node that must be active whenever `node` is.
        requires: usize,
    },
    /// Both nodes are visited or neither is.
    SameActivation {
        /// First node.
        first: usize,
        /// Second node.
        second: usize,
    },
    /// When both are visited, `before` does not come after `after`.
    OrderedWhenActive {
        /// Dimension the comparison is made in.
        dimension: DimensionId,
        /// Node with the smaller cumulative value.
        before: usize,
        /// Node with the larger cumulative value.
        after: usize,
    },
    /// When both are visited, `cumul(to) == cumul(from) + offset`.
    CumulOffset {
        /// Dimension the offset is measured in.
        dimension: DimensionId,
        /// Reference node.
        from: usize,
        /// Offset node.
        to: usize,
        /// Required difference.
        offset: i64,
    },
}

impl ModelConstraint {
    /// Nodes the constraint refers to.
    #[must_use]
    pub const fn nodes(&self) -> [usize; 2] {
        match *self {
            Self::RequiresActive { node, requires } => [node, requires],
            Self::SameActivation { first, second } => [first, second],
            Self::OrderedWhenActive { before, after, .. } => [before, after],
            Self::CumulOffset { from, to, .. } => [from, to],
        }
    }

    /// Dimension the constraint reads, if any.
    #[must_use]
    pub const fn dimension(&self) -> Option<DimensionId> {
        match *self {
            Self::OrderedWhenActive { dimension, .. } | Self::CumulOffset { dimension, .. } => {
                Some(dimension)
            }
            Self::RequiresActive { .. } | Self::SameActivation { .. } => None,
        }
    }

    /// Check the constraint against a candidate solution.
    ///
    /// `active` reports whether a node is on the route and `cumul` returns
    /// the cumulative value of an active node. A missing cumulative value
    /// for an active node fails the check.
    pub fn is_satisfied<A, C>(&self, active: A, cumul: C) -> bool
    where
        A: Fn(usize) -> bool,
        C: Fn(DimensionId, usize) -> Option<i64>,
    {
        match *self {
            Self::RequiresActive { node, requires } => !active(node) || active(requires),
            Self::SameActivation { first, second } => active(first) == active(second),
            Self::OrderedWhenActive {
                dimension,
                before,
                after,
            } => {
                if !(active(before) && active(after)) {
                    return true;
                }
                matches!(
                    (cumul(dimension, before), cumul(dimension, after)),
                    (Some(b), Some(a)) if b <= a
                )
            }
            Self::CumulOffset {
                dimension,
                from,
                to,
                offset,
            } => {
                if !(active(from) && active(to)) {
                    return true;
                }
                matches!(
                    (cumul(dimension, from), cumul(dimension, to)),
                    (Some(f), Some(t)) if f.checked_add(offset) == Some(t)
                )
            }
        }
    }
}
