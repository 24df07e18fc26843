//! Decoded multi-day itineraries and their presentation.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::SECONDS_PER_HOUR;

/// What happens at a scheduled stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum StopKind {
    /// Leaving the start depot on the first day.
    Departure,
    /// Arriving at the end depot on the last day.
    Arrival,
    /// Visiting a real location.
    Visit,
    /// Returning to the depot for the night.
    Overnight {
        /// Zero-based day boundary index.
        night: usize,
    },
    /// Leaving the depot the following morning.
    DayStart {
        /// Zero-based day boundary index.
        night: usize,
    },
}

/// One row of an itinerary.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScheduledStop {
    /// Node index in the augmented graph.
    pub node: usize,
    /// Role of the stop.
    pub kind: StopKind,
    /// Day of travel, starting at 1.
    pub day: u32,
    /// Position along the route; the start depot is 0.
    pub order: i64,
    /// Earliest feasible arrival, seconds since midnight.
    pub earliest: i64,
    /// Latest feasible arrival, seconds since midnight.
    pub latest: i64,
}

impl ScheduledStop {
    /// Human-readable description of the stop.
    ///
    /// Real nodes are labelled with their index; overnight nodes with the
    /// night or day they separate.
    #[must_use]
    pub fn label(&self) -> String {
        match self.kind {
            StopKind::Overnight { night } => format!("Overnight stay (night {})", night + 1),
            StopKind::DayStart { night } => format!("Day-start departure (day {})", night + 2),
            StopKind::Departure | StopKind::Arrival | StopKind::Visit => self.node.to_string(),
        }
    }

    /// Whether the stop stands for a real location.
    #[must_use]
    pub const fn is_real(&self) -> bool {
        !matches!(
            self.kind,
            StopKind::Overnight { .. } | StopKind::DayStart { .. }
        )
    }
}

/// A decoded multi-day route.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Itinerary {
    scheduled: Vec<ScheduledStop>,
    dropped: Vec<usize>,
    objective: i64,
}

impl Itinerary {
    /// Build an itinerary from its parts.
    #[must_use]
    pub const fn new(scheduled: Vec<ScheduledStop>, dropped: Vec<usize>, objective: i64) -> Self {
        Self {
            scheduled,
            dropped,
            objective,
        }
    }

    /// Stops in visiting order, start and end depots included.
    #[must_use]
    pub fn scheduled(&self) -> &[ScheduledStop] {
        &self.scheduled
    }

    /// Real locations left out of the route.
    #[must_use]
    pub fn dropped(&self) -> &[usize] {
        &self.dropped
    }

    /// Objective value of the underlying solution.
    #[must_use]
    pub const fn objective(&self) -> i64 {
        self.objective
    }

    /// Number of travel days the route actually spans.
    #[must_use]
    pub fn days_used(&self) -> u32 {
        self.scheduled.iter().map(|stop| stop.day).max().unwrap_or(0)
    }

    /// Visited real locations in order.
    pub fn visits(&self) -> impl Iterator<Item = &ScheduledStop> {
        self.scheduled
            .iter()
            .filter(|stop| stop.kind == StopKind::Visit)
    }

    /// Render every stop with times in `format`.
    #[must_use]
    pub fn rows(&self, format: TimeFormat) -> Vec<ItineraryRow> {
        self.scheduled
            .iter()
            .map(|stop| ItineraryRow {
                label: stop.label(),
                day: stop.day,
                order: stop.order,
                earliest: format.render(stop.earliest),
                latest: format.render(stop.latest),
            })
            .collect()
    }
}

/// A stop rendered for display.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ItineraryRow {
    /// Stop description.
    pub label: String,
    /// Day of travel.
    pub day: u32,
    /// Position along the route.
    pub order: i64,
    /// Earliest arrival.
    pub earliest: String,
    /// Latest arrival.
    pub latest: String,
}

/// How clock times are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TimeFormat {
    /// `HH:MM`.
    #[default]
    Clock,
    /// Fractional hours with two decimals, e.g. `6.50`.
    Hours,
}

impl TimeFormat {
    /// Render `seconds` since midnight.
    ///
    /// # Examples
    /// ```rust
    /// use sojourn_core::TimeFormat;
    ///
    /// assert_eq!(TimeFormat::Clock.render(6 * 3_600 + 30 * 60), "06:30");
    /// assert_eq!(TimeFormat::Hours.render(6 * 3_600 + 30 * 60), "6.50");
    /// ```
    #[must_use]
    pub fn render(self, seconds: i64) -> String {
        match self {
            Self::Clock => ClockTime(seconds).to_string(),
            Self::Hours => format!("{:.2}", seconds as f64 / SECONDS_PER_HOUR as f64),
        }
    }
}

/// Seconds since midnight displayed as `HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ClockTime(pub i64);

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let minutes = self.0.unsigned_abs() / 60;
        write!(f, "{sign}{:02}:{:02}", minutes / 60, minutes % 60)
    }
}
