//! Engine-neutral vocabulary for single-vehicle routing models.
//!
//! A [`RoutingModel`] describes one route from a start node to an end node
//! over `0..node_count`. It carries an arc-cost table, named cumulative
//! [`Dimension`]s with slack and per-node ranges, optional-visit
//! [`Disjunction`]s, and side constraints ([`ModelConstraint`]) linking the
//! activation and cumulative values of pairs of nodes. Search engines read
//! the model; the schedule builder writes it.
//!
//! Cost and transit evaluators are evaluated for every ordered pair when
//! registered so engines never call back into user code.

mod constraint;
mod dimension;
mod error;

pub use constraint::{Disjunction, ModelConstraint};
pub use dimension::{CumulRange, Dimension, DimensionId};
pub use error::ModelError;

/// Routing model for a single vehicle.
///
/// # Examples
/// ```rust
/// use sojourn_core::{ModelConstraint, RoutingModel};
///
/// let mut model = RoutingModel::new(4, 0, 1)?;
/// model.set_arc_cost_evaluator(|from, to| i64::from(from != to));
/// let order = model.add_constant_dimension(1, 5, true, "Counting")?;
/// model.add_disjunction(vec![2], 100)?;
/// model.add_disjunction(vec![3], 100)?;
/// model.add_constraint(ModelConstraint::OrderedWhenActive {
///     dimension: order,
///     before: 2,
///     after: 3,
/// })?;
/// model.validate()?;
/// assert!(model.is_optional(2));
/// # Ok::<(), sojourn_core::ModelError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingModel {
    node_count: usize,
    start: usize,
    end: usize,
    arc_costs: Vec<i64>,
    dimensions: Vec<Dimension>,
    disjunctions: Vec<Disjunction>,
    disjunction_of: Vec<Option<usize>>,
    constraints: Vec<ModelConstraint>,
}

impl RoutingModel {
    /// Create a model over `node_count` nodes with zero arc costs.
    ///
    /// # Errors
    /// Returns [`ModelError`] when `start` or `end` lies outside the model or
    /// when they coincide.
    pub fn new(node_count: usize, start: usize, end: usize) -> Result<Self, ModelError> {
        for node in [start, end] {
            if node >= node_count {
                return Err(ModelError::NodeOutOfRange { node, node_count });
            }
        }
        if start == end {
            return Err(ModelError::StartEqualsEnd { node: start });
        }
        Ok(Self {
            node_count,
            start,
            end,
            arc_costs: vec![0; node_count * node_count],
            dimensions: Vec::new(),
            disjunctions: Vec::new(),
            disjunction_of: vec![None; node_count],
            constraints: Vec::new(),
        })
    }

    /// Number of nodes.
    #[must_use]
    pub const fn node_count(&self) -> usize {
        self.node_count
    }

    /// Node every route starts from.
    #[must_use]
    pub const fn start(&self) -> usize {
        self.start
    }

    /// Node every route finishes at.
    #[must_use]
    pub const fn end(&self) -> usize {
        self.end
    }

    /// Evaluate and cache the cost of every arc.
    pub fn set_arc_cost_evaluator<F>(&mut self, cost: F)
    where
        F: Fn(usize, usize) -> i64,
    {
        let n = self.node_count;
        self.arc_costs = (0..n)
            .flat_map(|from| (0..n).map(move |to| (from, to)))
            .map(|(from, to)| cost(from, to))
            .collect();
    }

    /// Cached cost of the arc `from -> to`; zero outside the model.
    #[must_use]
    pub fn arc_cost(&self, from: usize, to: usize) -> i64 {
        if from >= self.node_count || to >= self.node_count {
            return 0;
        }
        self.arc_costs
            .get(from * self.node_count + to)
            .copied()
            .unwrap_or(0)
    }

    /// Register a dimension whose transit is given by `transit`.
    ///
    /// Every node starts with slack maximum `slack_max` and range
    /// `[0, capacity]`. With `fix_start_cumul_to_zero` the start node's
    /// range is pinned to zero.
    ///
    /// # Errors
    /// Returns [`ModelError`] for a repeated name or a negative bound.
    pub fn add_dimension<F>(
        &mut self,
        name: &str,
        transit: F,
        slack_max: i64,
        capacity: i64,
        fix_start_cumul_to_zero: bool,
    ) -> Result<DimensionId, ModelError>
    where
        F: Fn(usize, usize) -> i64,
    {
        if self.dimension_by_name(name).is_some() {
            return Err(ModelError::DuplicateDimension {
                name: name.to_owned(),
            });
        }
        if slack_max < 0 {
            return Err(ModelError::NegativeValue {
                what: "slack maximum",
                value: slack_max,
            });
        }
        if capacity < 0 {
            return Err(ModelError::NegativeValue {
                what: "capacity",
                value: capacity,
            });
        }
        let mut dimension = Dimension::new(
            name,
            self.node_count,
            transit,
            slack_max,
            capacity,
            fix_start_cumul_to_zero,
        );
        if fix_start_cumul_to_zero {
            dimension.set_cumul_range(self.start, 0, 0)?;
        }
        let id = DimensionId(self.dimensions.len());
        self.dimensions.push(dimension);
        Ok(id)
    }

    /// Register a dimension adding `value` on every arc, without slack.
    ///
    /// # Errors
    /// See [`RoutingModel::add_dimension`].
    pub fn add_constant_dimension(
        &mut self,
        value: i64,
        capacity: i64,
        fix_start_cumul_to_zero: bool,
        name: &str,
    ) -> Result<DimensionId, ModelError> {
        self.add_dimension(name, |_, _| value, 0, capacity, fix_start_cumul_to_zero)
    }

    /// Look up a dimension.
    #[must_use]
    pub fn dimension(&self, id: DimensionId) -> Option<&Dimension> {
        self.dimensions.get(id.0)
    }

    /// Look up a dimension for modification.
    ///
    /// # Errors
    /// Returns [`ModelError::UnknownDimension`] for a foreign handle.
    pub fn dimension_mut(&mut self, id: DimensionId) -> Result<&mut Dimension, ModelError> {
        self.dimensions
            .get_mut(id.0)
            .ok_or(ModelError::UnknownDimension(id))
    }

    /// Find a dimension by name.
    #[must_use]
    pub fn dimension_by_name(&self, name: &str) -> Option<DimensionId> {
        self.dimensions
            .iter()
            .position(|dimension| dimension.name() == name)
            .map(DimensionId)
    }

    /// All dimensions in registration order.
    #[must_use]
    pub fn dimensions(&self) -> &[Dimension] {
        &self.dimensions
    }

    /// Make `nodes` optional: at most one is visited and `penalty` is paid
    /// when none is.
    ///
    /// # Errors
    /// Returns [`ModelError`] for an empty set, unknown nodes, depots, nodes
    /// already in a disjunction or a negative penalty.
    pub fn add_disjunction(&mut self, nodes: Vec<usize>, penalty: i64) -> Result<(), ModelError> {
        if nodes.is_empty() {
            return Err(ModelError::EmptyDisjunction);
        }
        if penalty < 0 {
            return Err(ModelError::NegativeValue {
                what: "penalty",
                value: penalty,
            });
        }
        for &node in &nodes {
            self.check_node(node)?;
            if node == self.start || node == self.end {
                return Err(ModelError::DepotInDisjunction { node });
            }
            if self.disjunction_of.get(node).copied().flatten().is_some() {
                return Err(ModelError::RepeatedDisjunctionNode { node });
            }
        }
        let index = self.disjunctions.len();
        for &node in &nodes {
            if let Some(slot) = self.disjunction_of.get_mut(node) {
                *slot = Some(index);
            }
        }
        self.disjunctions.push(Disjunction::new(nodes, penalty));
        Ok(())
    }

    /// All disjunctions in registration order.
    #[must_use]
    pub fn disjunctions(&self) -> &[Disjunction] {
        &self.disjunctions
    }

    /// Disjunction containing `node`, if any.
    #[must_use]
    pub fn disjunction_of(&self, node: usize) -> Option<&Disjunction> {
        self.disjunction_of
            .get(node)
            .copied()
            .flatten()
            .and_then(|index| self.disjunctions.get(index))
    }

    /// Whether the route may leave `node` out.
    #[must_use]
    pub fn is_optional(&self, node: usize) -> bool {
        self.disjunction_of(node).is_some()
    }

    /// Add a side constraint.
    ///
    /// # Errors
    /// Returns [`ModelError`] when the constraint mentions unknown nodes or
    /// dimensions.
    pub fn add_constraint(&mut self, constraint: ModelConstraint) -> Result<(), ModelError> {
        self.check_constraint(&constraint)?;
        self.constraints.push(constraint);
        Ok(())
    }

    /// All side constraints in insertion order.
    #[must_use]
    pub fn constraints(&self) -> &[ModelConstraint] {
        &self.constraints
    }

    /// Re-check every reference held by the model.
    ///
    /// # Errors
    /// Returns the first [`ModelError`] found.
    pub fn validate(&self) -> Result<(), ModelError> {
        for disjunction in &self.disjunctions {
            for &node in disjunction.nodes() {
                self.check_node(node)?;
                if node == self.start || node == self.end {
                    return Err(ModelError::DepotInDisjunction { node });
                }
            }
        }
        for constraint in &self.constraints {
            self.check_constraint(constraint)?;
        }
        for dimension in &self.dimensions {
            if let Some(node) = (0..self.node_count).find(|&n| dimension.cumul_range(n).is_empty())
            {
                return Err(ModelError::EmptyCumulRange {
                    dimension: dimension.name().to_owned(),
                    node,
                });
            }
        }
        Ok(())
    }

    const fn check_node(&self, node: usize) -> Result<(), ModelError> {
        if node >= self.node_count {
            return Err(ModelError::NodeOutOfRange {
                node,
                node_count: self.node_count,
            });
        }
        Ok(())
    }

    fn check_constraint(&self, constraint: &ModelConstraint) -> Result<(), ModelError> {
        for node in constraint.nodes() {
            self.check_node(node)?;
        }
        if let Some(id) = constraint.dimension() {
            if self.dimension(id).is_none() {
                return Err(ModelError::UnknownDimension(id));
            }
        }
        Ok(())
    }
}
