//! Matrix provider trait for real locations.

/// Pairwise travel cost and time between real locations.
///
/// Indices run over `0..location_count()`. Index 0 is the start depot and
/// index 1 the end depot. Times are whole seconds; costs are in whatever
/// unit the objective should minimise.
///
/// # Examples
///
/// ```rust
/// use sojourn_core::TravelMatrix;
///
/// struct Corridor;
///
/// impl TravelMatrix for Corridor {
///     fn location_count(&self) -> usize {
///         3
///     }
///
///     fn arc_cost(&self, from: usize, to: usize) -> i64 {
///         self.arc_time(from, to)
///     }
///
///     fn arc_time(&self, from: usize, to: usize) -> i64 {
///         let gap = from.abs_diff(to);
///         i64::try_from(gap).unwrap_or(i64::MAX) * 600
///     }
/// }
///
/// assert_eq!(Corridor.arc_time(0, 2), 1_200);
/// ```
pub trait TravelMatrix {
    /// Number of real locations, depots included.
    fn location_count(&self) -> usize;

    /// Cost of travelling from `from` to `to`.
    fn arc_cost(&self, from: usize, to: usize) -> i64;

    /// Seconds needed to travel from `from` to `to`.
    fn arc_time(&self, from: usize, to: usize) -> i64;
}

impl<T: TravelMatrix + ?Sized> TravelMatrix for &T {
    fn location_count(&self) -> usize {
        (**self).location_count()
    }

    fn arc_cost(&self, from: usize, to: usize) -> i64 {
        (**self).arc_cost(from, to)
    }

    fn arc_time(&self, from: usize, to: usize) -> i64 {
        (**self).arc_time(from, to)
    }
}
