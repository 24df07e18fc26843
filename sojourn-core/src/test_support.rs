//! Test fixtures for schedules and matrices.

use crate::matrix::DenseMatrix;

const HOUR: i64 = 3_600;

/// Matrix over `count` locations where every distinct pair is `seconds`
/// apart and the two depots coincide.
///
/// # Panics
/// Panics when `count` is zero.
#[must_use]
pub fn uniform_matrix(count: usize, seconds: i64) -> DenseMatrix {
    let rows = (0..count)
        .map(|from| {
            (0..count)
                .map(|to| {
                    let depots = from < 2 && to < 2;
                    if from == to || depots { 0 } else { seconds }
                })
                .collect()
        })
        .collect();
    DenseMatrix::from_seconds(rows).expect("uniform matrix is square")
}

/// Five locations whose three candidates cannot all fit into one 06:00-18:00
/// day with 30-minute stops.
///
/// Each candidate is 2.5 hours from home and 4 hours from every other
/// candidate. Two candidates fill a day (10 hours including service); the
/// third needs a second day.
#[must_use]
pub fn two_day_matrix() -> DenseMatrix {
    let home = 5 * HOUR / 2;
    let apart = 4 * HOUR;
    let rows = (0..5_usize)
        .map(|from| {
            (0..5_usize)
                .map(|to| match (from < 2, to < 2) {
                    _ if from == to => 0,
                    (true, true) => 0,
                    (true, false) | (false, true) => home,
                    (false, false) => apart,
                })
                .collect()
        })
        .collect();
    DenseMatrix::from_seconds(rows).expect("fixture matrix is square")
}
