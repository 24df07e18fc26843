//! Cumulative quantities accumulated along a route.

use super::error::ModelError;

/// Handle to a dimension registered on a [`RoutingModel`](super::RoutingModel).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DimensionId(pub(crate) usize);

impl DimensionId {
    /// Position of the dimension in registration order.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Closed interval of admissible cumulative values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CumulRange {
    /// Smallest admissible value.
    pub min: i64,
    /// Largest admissible value.
    pub max: i64,
}

impl CumulRange {
    /// Interval `[min, max]`.
    #[must_use]
    pub const fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    /// Interval holding a single value.
    #[must_use]
    pub const fn fixed(value: i64) -> Self {
        Self::new(value, value)
    }

    /// Whether no value satisfies the interval.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.min > self.max
    }

    /// Whether `value` lies inside the interval.
    #[must_use]
    pub const fn contains(self, value: i64) -> bool {
        self.min <= value && value <= self.max
    }

    /// Intersection of two intervals; may be empty.
    #[must_use]
    pub fn intersect(self, other: Self) -> Self {
        Self::new(self.min.max(other.min), self.max.min(other.max))
    }
}

/// A quantity accumulated along the route, such as elapsed time.
///
/// For consecutive nodes `a -> b` the cumulative values satisfy
/// `cumul(b) = cumul(a) + transit(a, b) + slack(a)` with
/// `0 <= slack(a) <= slack_max(a)`. Every cumulative value also lies in
/// `[0, capacity]` and inside the node's own range.
///
/// Transit values are evaluated once for every ordered pair when the
/// dimension is registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dimension {
    name: String,
    node_count: usize,
    transits: Vec<i64>,
    slack_max: Vec<i64>,
    capacity: i64,
    cumul_ranges: Vec<CumulRange>,
    fix_start_cumul_to_zero: bool,
}

impl Dimension {
    pub(crate) fn new<F>(
        name: &str,
        node_count: usize,
        transit: F,
        slack_max: i64,
        capacity: i64,
        fix_start_cumul_to_zero: bool,
    ) -> Self
    where
        F: Fn(usize, usize) -> i64,
    {
        let transits = (0..node_count)
            .flat_map(|from| (0..node_count).map(move |to| (from, to)))
            .map(|(from, to)| transit(from, to))
            .collect();
        Self {
            name: name.to_owned(),
            node_count,
            transits,
            slack_max: vec![slack_max; node_count],
            capacity,
            cumul_ranges: vec![CumulRange::new(0, capacity); node_count],
            fix_start_cumul_to_zero,
        }
    }

    /// Name given at registration.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Upper bound on every cumulative value.
    #[must_use]
    pub const fn capacity(&self) -> i64 {
        self.capacity
    }

    /// Whether the route start is pinned to zero.
    #[must_use]
    pub const fn fix_start_cumul_to_zero(&self) -> bool {
        self.fix_start_cumul_to_zero
    }

    /// Cached transit for the arc `from -> to`; zero outside the model.
    #[must_use]
    pub fn transit(&self, from: usize, to: usize) -> i64 {
        if from >= self.node_count || to >= self.node_count {
            return 0;
        }
        self.transits
            .get(from * self.node_count + to)
            .copied()
            .unwrap_or(0)
    }

    /// Largest slack that may follow `node`.
    #[must_use]
    pub fn slack_max(&self, node: usize) -> i64 {
        self.slack_max.get(node).copied().unwrap_or(0)
    }

    /// Admissible cumulative values at `node`.
    #[must_use]
    pub fn cumul_range(&self, node: usize) -> CumulRange {
        self.cumul_ranges
            .get(node)
            .copied()
            .unwrap_or(CumulRange::new(1, 0))
    }

    /// Cap the slack that may follow `node`.
    ///
    /// # Errors
    /// Returns [`ModelError`] for an unknown node or a negative bound.
    pub fn set_slack_max(&mut self, node: usize, slack_max: i64) -> Result<(), ModelError> {
        if slack_max < 0 {
            return Err(ModelError::NegativeValue {
                what: "slack maximum",
                value: slack_max,
            });
        }
        let node_count = self.node_count;
        let slot = self
            .slack_max
            .get_mut(node)
            .ok_or(ModelError::NodeOutOfRange { node, node_count })?;
        *slot = slack_max;
        Ok(())
    }

    /// Forbid any waiting after `node`.
    ///
    /// # Errors
    /// Returns [`ModelError::NodeOutOfRange`] for an unknown node.
    pub fn pin_slack(&mut self, node: usize) -> Result<(), ModelError> {
        self.set_slack_max(node, 0)
    }

    /// Tighten the range of `node` to its intersection with `[min, max]`.
    ///
    /// # Errors
    /// Returns [`ModelError`] for an unknown node or when the resulting
    /// range is empty.
    pub fn set_cumul_range(&mut self, node: usize, min: i64, max: i64) -> Result<(), ModelError> {
        let node_count = self.node_count;
        let slot = self
            .cumul_ranges
            .get_mut(node)
            .ok_or(ModelError::NodeOutOfRange { node, node_count })?;
        let tightened = slot.intersect(CumulRange::new(min, max));
        if tightened.is_empty() {
            return Err(ModelError::EmptyCumulRange {
                dimension: self.name.clone(),
                node,
            });
        }
        *slot = tightened;
        Ok(())
    }

    /// Raise the lower bound of `node`.
    ///
    /// # Errors
    /// See [`Dimension::set_cumul_range`].
    pub fn set_cumul_min(&mut self, node: usize, min: i64) -> Result<(), ModelError> {
        self.set_cumul_range(node, min, i64::MAX)
    }

    /// Lower the upper bound of `node`.
    ///
    /// # Errors
    /// See [`Dimension::set_cumul_range`].
    pub fn set_cumul_max(&mut self, node: usize, max: i64) -> Result<(), ModelError> {
        self.set_cumul_range(node, i64::MIN, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn counting(node_count: usize) -> Dimension {
        Dimension::new("Counting", node_count, |_, _| 1, 0, 10, false)
    }

    #[rstest]
    fn caches_every_transit() {
        let dimension = Dimension::new("Time", 3, |from, to| (from * 10 + to) as i64, 5, 100, false);
        assert_eq!(dimension.transit(2, 1), 21);
        assert_eq!(dimension.transit(0, 2), 2);
        assert_eq!(dimension.transit(3, 0), 0);
        assert_eq!(dimension.slack_max(1), 5);
    }

    #[rstest]
    fn ranges_start_at_capacity_and_tighten() {
        let mut dimension = counting(2);
        assert_eq!(dimension.cumul_range(0), CumulRange::new(0, 10));
        dimension.set_cumul_min(0, 3).expect("valid bound");
        dimension.set_cumul_range(0, -5, 7).expect("valid bound");
        assert_eq!(dimension.cumul_range(0), CumulRange::new(3, 7));
    }

    #[rstest]
    fn empty_range_is_rejected() {
        let mut dimension = counting(2);
        let err = dimension
            .set_cumul_range(1, 20, 30)
            .expect_err("range beyond capacity");
        assert_eq!(
            err,
            ModelError::EmptyCumulRange {
                dimension: "Counting".to_owned(),
                node: 1
            }
        );
    }

    #[rstest]
    fn slack_updates_check_bounds() {
        let mut dimension = Dimension::new("Time", 2, |_, _| 0, 50, 100, false);
        dimension.pin_slack(1).expect("valid node");
        assert_eq!(dimension.slack_max(1), 0);
        assert_eq!(
            dimension.pin_slack(4),
            Err(ModelError::NodeOutOfRange {
                node: 4,
                node_count: 2
            })
        );
        assert!(dimension.set_slack_max(0, -1).is_err());
    }

    #[rstest]
    fn interval_helpers() {
        let range = CumulRange::new(2, 5);
        assert!(range.contains(2));
        assert!(!range.contains(6));
        assert!(range.intersect(CumulRange::fixed(9)).is_empty());
    }
}
