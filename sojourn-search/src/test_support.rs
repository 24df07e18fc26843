//! Test-only utilities for `sojourn-search`.
//!
//! The helpers in this module are available to unit tests, behavioural tests
//! and benchmarks. They are gated behind the `test-support` feature (and
//! `cfg(test)`).

use sojourn_core::{ScheduleConfig, SearchSettings, SolveRequest};

pub use sojourn_core::test_support::{two_day_matrix, uniform_matrix};

/// Request for a `days`-long schedule with default hours and a short search.
///
/// # Examples
/// ```rust
/// use sojourn_search::test_support::quick_request;
///
/// let request = quick_request(3);
/// assert_eq!(request.schedule.days, 3);
/// assert_eq!(request.search.time_limit_seconds, 2);
/// ```
#[must_use]
pub fn quick_request(days: i32) -> SolveRequest {
    SolveRequest {
        schedule: ScheduleConfig {
            days,
            ..ScheduleConfig::default()
        },
        search: SearchSettings {
            time_limit_seconds: 2,
            ..SearchSettings::default()
        },
    }
}

/// Time windows of a schedule in seconds since midnight.
#[must_use]
pub fn day_window(config: &ScheduleConfig) -> (i64, i64) {
    (config.day_start(), config.day_end())
}
