//! Units of insertion and removal.
//!
//! Nodes that must share activation are moved together: they form one
//! item, which becomes a single `vrp-core` job (a multi-job visiting its
//! nodes in ascending order when there are several).

use sojourn_core::{ModelConstraint, RoutingModel};

/// A group of nodes inserted and removed together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Item {
    pub(crate) nodes: Vec<usize>,
    /// Penalty saved by visiting the item.
    pub(crate) penalty: i64,
    /// Whether the route must contain the item.
    pub(crate) mandatory: bool,
}

impl Item {
    pub(crate) fn is_on(&self, route: &[usize]) -> bool {
        self.nodes.first().is_some_and(|node| route.contains(node))
    }

    /// Visiting the item is worth nothing, so it is only kept when it helps
    /// other nodes fit.
    pub(crate) const fn is_free(&self) -> bool {
        !self.mandatory && self.penalty == 0
    }
}

/// Group every node other than the start and end into items.
pub(crate) fn insertion_items(model: &RoutingModel) -> Vec<Item> {
    let mut groups = Groups::new(model.node_count());
    for constraint in model.constraints() {
        if let ModelConstraint::SameActivation { first, second } = *constraint {
            groups.union(first, second);
        }
    }

    let mut members: Vec<Vec<usize>> = vec![Vec::new(); model.node_count()];
    for node in (0..model.node_count()).filter(|&n| n != model.start() && n != model.end()) {
        let root = groups.find(node);
        if let Some(group) = members.get_mut(root) {
            group.push(node);
        }
    }

    let mut items: Vec<Item> = members
        .into_iter()
        .filter(|nodes| !nodes.is_empty())
        .map(|nodes| {
            let penalty = nodes
                .iter()
                .filter_map(|&node| model.disjunction_of(node))
                .map(sojourn_core::Disjunction::penalty)
                .fold(0_i64, i64::saturating_add);
            let mandatory = nodes.iter().any(|&node| !model.is_optional(node));
            Item {
                nodes,
                penalty,
                mandatory,
            }
        })
        .collect();
    items.sort_by_key(|item| item.nodes.first().copied());
    items
}

/// Copy of `route` without `nodes`.
pub(crate) fn remove_nodes(route: &[usize], nodes: &[usize]) -> Vec<usize> {
    route
        .iter()
        .copied()
        .filter(|node| !nodes.contains(node))
        .collect()
}

/// Union-find over node indices.
struct Groups {
    parent: Vec<usize>,
}

impl Groups {
    fn new(size: usize) -> Self {
        Self {
            parent: (0..size).collect(),
        }
    }

    fn find(&mut self, node: usize) -> usize {
        let mut root = node;
        while let Some(&parent) = self.parent.get(root) {
            if parent == root {
                break;
            }
            root = parent;
        }
        let mut current = node;
        while let Some(slot) = self.parent.get_mut(current) {
            if *slot == root {
                break;
            }
            current = std::mem::replace(slot, root);
        }
        root
    }

    fn union(&mut self, a: usize, b: usize) {
        let (ra, rb) = (self.find(a), self.find(b));
        let (keep, merge) = if ra <= rb { (ra, rb) } else { (rb, ra) };
        if let Some(slot) = self.parent.get_mut(merge) {
            *slot = keep;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn paired_model() -> RoutingModel {
        let mut model = RoutingModel::new(6, 0, 1).expect("valid model");
        model.add_disjunction(vec![2], 100).expect("optional");
        model.add_disjunction(vec![4], 0).expect("optional");
        model.add_disjunction(vec![5], 0).expect("optional");
        model
            .add_constraint(ModelConstraint::SameActivation { first: 4, second: 5 })
            .expect("pairing");
        model
    }

    #[rstest]
    fn groups_paired_nodes() {
        let items = insertion_items(&paired_model());
        let nodes: Vec<Vec<usize>> = items.iter().map(|item| item.nodes.clone()).collect();
        assert_eq!(nodes, vec![vec![2], vec![3], vec![4, 5]]);
        let flags: Vec<(i64, bool)> = items.iter().map(|i| (i.penalty, i.mandatory)).collect();
        assert_eq!(flags, vec![(100, false), (0, true), (0, false)]);
        let free: Vec<bool> = items.iter().map(Item::is_free).collect();
        assert_eq!(free, vec![false, false, true]);
    }

    #[rstest]
    fn removes_whole_items() {
        let route = [0, 2, 4, 5, 1];
        assert_eq!(remove_nodes(&route, &[4, 5]), vec![0, 2, 1]);
        assert_eq!(remove_nodes(&route, &[3]), route.to_vec());
    }

    #[rstest]
    fn union_find_merges_chains() {
        let mut groups = Groups::new(5);
        groups.union(3, 4);
        groups.union(4, 2);
        assert_eq!(groups.find(4), 2);
        assert_eq!(groups.find(3), 2);
        assert_eq!(groups.find(1), 1);
    }
}
