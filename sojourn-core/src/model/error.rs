use thiserror::Error;

use super::DimensionId;

/// Errors raised while assembling a [`RoutingModel`](super::RoutingModel).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// A node index lies outside the model.
    #[error("node {node} is outside the model of {node_count} nodes")]
    NodeOutOfRange {
        /// Rejected index.
        node: usize,
        /// Nodes in the model.
        node_count: usize,
    },
    /// The route must start and end at different nodes.
    #[error("start and end must differ, both are {node}")]
    StartEqualsEnd {
        /// Shared index.
        node: usize,
    },
    /// A dimension handle does not belong to this model.
    #[error("unknown dimension {0:?}")]
    UnknownDimension(DimensionId),
    /// Two dimensions share a name.
    #[error("dimension {name} is already defined")]
    DuplicateDimension {
        /// Repeated name.
        name: String,
    },
    /// A bound, capacity or penalty is negative.
    #[error("{what} must not be negative, got {value}")]
    NegativeValue {
        /// Which quantity was rejected.
        what: &'static str,
        /// Rejected value.
        value: i64,
    },
    /// Tightening a cumulative range left it empty.
    #[error("cumul range of node {node} in dimension {dimension} is empty")]
    EmptyCumulRange {
        /// Dimension name.
        dimension: String,
        /// Node whose range collapsed.
        node: usize,
    },
    /// Depots are always visited and cannot be optional.
    #[error("depot {node} cannot belong to a disjunction")]
    DepotInDisjunction {
        /// Depot index.
        node: usize,
    },
    /// A node may belong to one disjunction at most.
    #[error("node {node} already belongs to a disjunction")]
    RepeatedDisjunctionNode {
        /// Repeated index.
        node: usize,
    },
    /// A disjunction must name at least one node.
    #[error("disjunction has no nodes")]
    EmptyDisjunction,
}
