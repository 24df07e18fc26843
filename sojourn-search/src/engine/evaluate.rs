//! Feasibility and cost of a candidate route.
//!
//! Each dimension is checked by interval propagation. Walking forwards,
//! the reachable values at the next node are
//! `[lo + transit, hi + transit + slack_max]` clipped to that node's range.
//! Walking backwards then removes values with no feasible continuation,
//! leaving the exact feasible range at every position. The per-position
//! minima form a feasible schedule of their own (the earliest one), which
//! is what side constraints are checked against.

use std::sync::Arc;

use sojourn_core::{CumulRange, Dimension, DimensionId, ModelConstraint, RoutingModel};

/// How much of the route is in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Completeness {
    /// Route under construction: missing mandatory nodes are tolerated and
    /// nodes that share activation may still be waiting for their partner.
    Partial,
    /// Finished route; every mandatory node must be visited.
    Complete,
}

/// Outcome of evaluating a feasible route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Evaluation {
    /// Arc costs plus penalties of unvisited disjunctions.
    pub(crate) cost: i64,
    /// Arc costs alone.
    pub(crate) arc_cost: i64,
    /// `ranges[dimension][position]`, aligned with the route.
    pub(crate) ranges: Vec<Vec<CumulRange>>,
}

impl Evaluation {
    /// Feasible ranges indexed by node instead of route position.
    pub(crate) fn node_ranges(
        &self,
        route: &[usize],
        node_count: usize,
    ) -> Vec<Vec<Option<CumulRange>>> {
        self.ranges
            .iter()
            .map(|ranges| {
                let mut by_node = vec![None; node_count];
                for (&node, range) in route.iter().zip(ranges) {
                    if let Some(slot) = by_node.get_mut(node) {
                        *slot = Some(*range);
                    }
                }
                by_node
            })
            .collect()
    }
}

/// Evaluates candidate routes against a model.
#[derive(Debug)]
pub(crate) struct Evaluator {
    model: Arc<RoutingModel>,
    optional: Vec<bool>,
}

impl Evaluator {
    pub(crate) fn new(model: Arc<RoutingModel>) -> Self {
        let optional = (0..model.node_count())
            .map(|node| model.is_optional(node))
            .collect();
        Self { model, optional }
    }

    pub(crate) fn model(&self) -> &RoutingModel {
        &self.model
    }

    /// Cost and feasible ranges of `route`, or `None` when infeasible.
    pub(crate) fn evaluate(&self, route: &[usize], completeness: Completeness) -> Option<Evaluation> {
        let model = self.model();
        if route.first() != Some(&model.start()) || route.last() != Some(&model.end()) {
            return None;
        }
        let position = self.positions(route)?;
        if completeness == Completeness::Complete
            && position
                .iter()
                .zip(&self.optional)
                .any(|(at, optional)| at.is_none() && !optional)
        {
            return None;
        }

        let arc_cost = route
            .windows(2)
            .filter_map(|pair| match *pair {
                [from, to] => Some(model.arc_cost(from, to)),
                _ => None,
            })
            .fold(0_i64, i64::saturating_add);
        let mut cost = arc_cost;
        for disjunction in model.disjunctions() {
            let visited = disjunction
                .nodes()
                .iter()
                .filter(|&&node| position.get(node).copied().flatten().is_some())
                .count();
            if visited > disjunction.max_cardinality() {
                return None;
            }
            if visited == 0 {
                cost = cost.saturating_add(disjunction.penalty());
            }
        }

        let ranges = model
            .dimensions()
            .iter()
            .map(|dimension| propagate(dimension, route))
            .collect::<Option<Vec<_>>>()?;

        let active = |node: usize| position.get(node).copied().flatten().is_some();
        let cumul = |dimension: DimensionId, node: usize| {
            let at = position.get(node).copied().flatten()?;
            ranges
                .get(dimension.index())
                .and_then(|by_position| by_position.get(at))
                .map(|range| range.min)
        };
        let checked = |constraint: &&ModelConstraint| {
            completeness == Completeness::Complete
                || !matches!(constraint, ModelConstraint::SameActivation { .. })
        };
        if !model
            .constraints()
            .iter()
            .filter(checked)
            .all(|constraint| constraint.is_satisfied(active, cumul))
        {
            return None;
        }

        Some(Evaluation {
            cost,
            arc_cost,
            ranges,
        })
    }

    /// Route position of every node; `None` when a node repeats or is
    /// unknown.
    fn positions(&self, route: &[usize]) -> Option<Vec<Option<usize>>> {
        let mut position = vec![None; self.model().node_count()];
        for (at, &node) in route.iter().enumerate() {
            let slot = position.get_mut(node)?;
            if slot.is_some() {
                return None;
            }
            *slot = Some(at);
        }
        Some(position)
    }
}

#[expect(
    clippy::indexing_slicing,
    reason = "positions are bounded by the route length checked above"
)]
fn propagate(dimension: &Dimension, route: &[usize]) -> Option<Vec<CumulRange>> {
    let first = *route.first()?;
    let mut ranges = Vec::with_capacity(route.len());
    let mut current = dimension.cumul_range(first);
    if current.is_empty() {
        return None;
    }
    ranges.push(current);
    for at in 1..route.len() {
        let (from, to) = (route[at - 1], route[at]);
        let transit = dimension.transit(from, to);
        let reach = CumulRange::new(
            current.min.saturating_add(transit),
            current
                .max
                .saturating_add(transit)
                .saturating_add(dimension.slack_max(from)),
        );
        current = reach.intersect(dimension.cumul_range(to));
        if current.is_empty() {
            return None;
        }
        ranges.push(current);
    }
    for at in (0..route.len() - 1).rev() {
        let (from, to) = (route[at], route[at + 1]);
        let transit = dimension.transit(from, to);
        let next = ranges[at + 1];
        let allowed = CumulRange::new(
            next.min
                .saturating_sub(transit)
                .saturating_sub(dimension.slack_max(from)),
            next.max.saturating_sub(transit),
        );
        let tightened = ranges[at].intersect(allowed);
        if tightened.is_empty() {
            return None;
        }
        ranges[at] = tightened;
    }
    Some(ranges)
}
