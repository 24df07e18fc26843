//! Scheduling and search configuration.
//!
//! [`ScheduleConfig`] describes the operating calendar: how many days the
//! agent travels, the daily opening hours and the service time spent at each
//! stop. [`SearchSettings`] controls the route search. Both carry the
//! defaults used by the command-line front end.

use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Seconds in one hour.
pub const SECONDS_PER_HOUR: i64 = 3_600;

/// Penalty charged for every location the itinerary leaves out.
pub const DEFAULT_DROP_PENALTY: i64 = 10_000_000;

const HOURS_PER_DAY: u32 = 24;

/// Errors raised when validating configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The itinerary must span at least one day.
    #[error("days must be positive, got {days}")]
    NonPositiveDays {
        /// Rejected day count.
        days: i32,
    },
    /// An hour-of-day field lies outside `0..=24`.
    #[error("{field} must be between 0 and 24, got {hour}")]
    HourOutOfRange {
        /// Name of the offending field.
        field: &'static str,
        /// Rejected hour.
        hour: u32,
    },
    /// The daily window does not open before it closes.
    #[error("day must start before it ends (start {start}, end {end})")]
    EmptyDay {
        /// Opening hour.
        start: u32,
        /// Closing hour.
        end: u32,
    },
    /// The penalty for dropping a location is negative.
    #[error("drop penalty must not be negative, got {penalty}")]
    NegativePenalty {
        /// Rejected penalty.
        penalty: i64,
    },
    /// The search was given no time to run.
    #[error("search time limit must be positive")]
    ZeroTimeLimit,
}

/// Calendar and stop parameters for a multi-day itinerary.
///
/// # Examples
/// ```rust
/// use sojourn_core::ScheduleConfig;
///
/// let config = ScheduleConfig::default();
/// assert_eq!(config.overnight_count(), 1);
/// assert_eq!(config.overnight_offset(), -12 * 3_600);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScheduleConfig {
    /// Number of travel days. Must be at least one.
    pub days: i32,
    /// Hour of day at which visits may begin.
    pub day_start_hour: u32,
    /// Hour of day by which the agent must be done.
    pub day_end_hour: u32,
    /// Minutes spent at each visited location.
    pub service_minutes: u32,
    /// Cost added to the objective for each dropped location.
    pub drop_penalty: i64,
    /// Omit the day-start departure nodes that follow each overnight stay.
    pub skip_morning_anchor_nodes: bool,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            days: 2,
            day_start_hour: 6,
            day_end_hour: 18,
            service_minutes: 30,
            drop_penalty: DEFAULT_DROP_PENALTY,
            skip_morning_anchor_nodes: false,
        }
    }
}

impl ScheduleConfig {
    /// Check the configuration before any model is built.
    ///
    /// # Errors
    /// Returns [`ConfigError`] describing the first invalid field.
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.days <= 0 {
            return Err(ConfigError::NonPositiveDays { days: self.days });
        }
        if self.day_start_hour > HOURS_PER_DAY {
            return Err(ConfigError::HourOutOfRange {
                field: "day_start_hour",
                hour: self.day_start_hour,
            });
        }
        if self.day_end_hour > HOURS_PER_DAY {
            return Err(ConfigError::HourOutOfRange {
                field: "day_end_hour",
                hour: self.day_end_hour,
            });
        }
        if self.day_start_hour >= self.day_end_hour {
            return Err(ConfigError::EmptyDay {
                start: self.day_start_hour,
                end: self.day_end_hour,
            });
        }
        if self.drop_penalty < 0 {
            return Err(ConfigError::NegativePenalty {
                penalty: self.drop_penalty,
            });
        }
        Ok(())
    }

    /// Number of overnight stays, `max(days - 1, 0)`.
    #[must_use]
    pub fn overnight_count(&self) -> usize {
        usize::try_from(self.days.saturating_sub(1)).unwrap_or(0)
    }

    /// Opening time in seconds since midnight.
    #[must_use]
    pub fn day_start(&self) -> i64 {
        i64::from(self.day_start_hour) * SECONDS_PER_HOUR
    }

    /// Closing time in seconds since midnight.
    #[must_use]
    pub fn day_end(&self) -> i64 {
        i64::from(self.day_end_hour) * SECONDS_PER_HOUR
    }

    /// Usable seconds in one day.
    #[must_use]
    pub fn day_span(&self) -> i64 {
        self.day_end() - self.day_start()
    }

    /// Service time per visited location in seconds.
    #[must_use]
    pub fn service_time(&self) -> i64 {
        i64::from(self.service_minutes) * 60
    }

    /// Shift applied when leaving an overnight stay.
    ///
    /// Negative: with the night's slack it rewinds the clock from the
    /// arrival home back to the next morning, so cumulative time stays
    /// inside one day's window.
    #[must_use]
    pub fn overnight_offset(&self) -> i64 {
        self.day_start() - self.day_end()
    }
}

/// Search controls passed to the route search engine.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchSettings {
    /// Wall-clock budget for the search in seconds.
    pub time_limit_seconds: u64,
    /// Escape local optima with guided local search.
    pub guided_local_search: bool,
    /// Log every improvement found during the search.
    pub verbose_search_log: bool,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            time_limit_seconds: 10,
            guided_local_search: true,
            verbose_search_log: false,
        }
    }
}

impl SearchSettings {
    /// Search budget as a [`Duration`].
    #[must_use]
    pub const fn time_limit(&self) -> Duration {
        Duration::from_secs(self.time_limit_seconds)
    }

    /// Check the settings before searching.
    ///
    /// # Errors
    /// Returns [`ConfigError::ZeroTimeLimit`] when no time is allotted.
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.time_limit_seconds == 0 {
            return Err(ConfigError::ZeroTimeLimit);
        }
        Ok(())
    }
}
