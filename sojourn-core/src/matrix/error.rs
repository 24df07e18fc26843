use thiserror::Error;

/// Errors from building a [`DenseMatrix`](crate::DenseMatrix).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatrixError {
    /// No locations were supplied.
    #[error("at least one location is required")]
    EmptyInput,
    /// A row does not have one entry per location.
    #[error("row {row} has {len} entries, expected {expected}")]
    NotSquare {
        /// Index of the offending row.
        row: usize,
        /// Entries found in the row.
        len: usize,
        /// Number of locations.
        expected: usize,
    },
    /// The cost table and the time table disagree in size.
    #[error("cost table covers {costs} locations but time table covers {times}")]
    SizeMismatch {
        /// Locations in the time table.
        times: usize,
        /// Locations in the cost table.
        costs: usize,
    },
    /// Travel cannot take negative time or cost.
    #[error("entry ({from}, {to}) is negative: {value}")]
    NegativeEntry {
        /// Origin index.
        from: usize,
        /// Destination index.
        to: usize,
        /// Rejected value.
        value: i64,
    },
    /// Travel speed must be finite and positive.
    #[error("travel speed must be positive")]
    InvalidSpeed,
}
