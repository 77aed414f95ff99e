//! Time-of-day windows for departure and arrival filtering.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::TimeOfDay;

use super::error::FilterError;

/// One of the four fixed time-of-day buckets a user can pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeWindow {
    /// Strictly before the early boundary (06:00).
    #[serde(rename = "BEFORE_06")]
    Before06,
    /// Between the early and midday boundaries, inclusive.
    #[serde(rename = "06_TO_12")]
    From06To12,
    /// Between the midday and evening boundaries, inclusive.
    #[serde(rename = "12_TO_18")]
    From12To18,
    /// Strictly after the evening boundary (18:00).
    #[serde(rename = "AFTER_18")]
    After18,
}

impl TimeWindow {
    /// All windows in chronological order.
    pub const ALL: [TimeWindow; 4] = [
        TimeWindow::Before06,
        TimeWindow::From06To12,
        TimeWindow::From12To18,
        TimeWindow::After18,
    ];

    /// Parse a window token.
    ///
    /// Accepts the canonical tokens (`BEFORE_06`, `06_TO_12`, `12_TO_18`,
    /// `AFTER_18`) case-insensitively. Anything else is rejected rather than
    /// silently matching every trip.
    ///
    /// # Examples
    ///
    /// ```
    /// use bus_server::filter::TimeWindow;
    ///
    /// assert_eq!(TimeWindow::parse("before_06").unwrap(), TimeWindow::Before06);
    /// assert!(TimeWindow::parse("midnight").is_err());
    /// ```
    pub fn parse(token: &str) -> Result<Self, FilterError> {
        let normalized = token.trim().to_ascii_uppercase();
        match normalized.as_str() {
            "BEFORE_06" => Ok(TimeWindow::Before06),
            "06_TO_12" => Ok(TimeWindow::From06To12),
            "12_TO_18" => Ok(TimeWindow::From12To18),
            "AFTER_18" => Ok(TimeWindow::After18),
            _ => Err(FilterError::UnknownTimeWindow(token.to_string())),
        }
    }

    /// The canonical token for this window.
    pub fn token(&self) -> &'static str {
        match self {
            TimeWindow::Before06 => "BEFORE_06",
            TimeWindow::From06To12 => "06_TO_12",
            TimeWindow::From12To18 => "12_TO_18",
            TimeWindow::After18 => "AFTER_18",
        }
    }

    /// Resolve this window to a concrete comparison using the given boundaries.
    pub fn comparison(&self, bounds: &WindowBounds) -> TimeComparison {
        match self {
            TimeWindow::Before06 => TimeComparison::Before(bounds.early),
            TimeWindow::From06To12 => TimeComparison::Between(bounds.early, bounds.midday),
            TimeWindow::From12To18 => TimeComparison::Between(bounds.midday, bounds.evening),
            TimeWindow::After18 => TimeComparison::After(bounds.evening),
        }
    }
}

impl FromStr for TimeWindow {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// The three boundaries splitting the day into four windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowBounds {
    /// Boundary between `BEFORE_06` and `06_TO_12`.
    pub early: TimeOfDay,
    /// Boundary between `06_TO_12` and `12_TO_18`.
    pub midday: TimeOfDay,
    /// Boundary between `12_TO_18` and `AFTER_18`.
    pub evening: TimeOfDay,
}

impl WindowBounds {
    /// Check that the boundaries are strictly increasing.
    pub fn validate(&self) -> Result<(), FilterError> {
        if self.early < self.midday && self.midday < self.evening {
            Ok(())
        } else {
            Err(FilterError::InvalidConfig(format!(
                "window bounds must be increasing, got {} / {} / {}",
                self.early, self.midday, self.evening
            )))
        }
    }
}

impl Default for WindowBounds {
    fn default() -> Self {
        Self {
            early: hm(6, 0),
            midday: hm(12, 0),
            evening: hm(18, 0),
        }
    }
}

fn hm(hour: u32, minute: u32) -> TimeOfDay {
    TimeOfDay::from_hm(hour, minute).expect("constant time is in range")
}

/// A resolved time-of-day comparison.
///
/// `Between` is closed on both ends; `Before` and `After` are strict, so the
/// boundary instants themselves fall into the adjacent `Between` windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeComparison {
    Before(TimeOfDay),
    Between(TimeOfDay, TimeOfDay),
    After(TimeOfDay),
}

impl TimeComparison {
    /// Whether `t` satisfies this comparison.
    pub fn contains(&self, t: TimeOfDay) -> bool {
        match *self {
            TimeComparison::Before(bound) => t < bound,
            TimeComparison::Between(lo, hi) => lo <= t && t <= hi,
            TimeComparison::After(bound) => t > bound,
        }
    }
}
