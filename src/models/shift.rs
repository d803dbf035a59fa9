//! Shift window model.
//!
//! A shift is configured as a pair of `HH:MM` times of day and anchored to a
//! calendar day when simulated.
//!
//! # Overnight shifts
//! When the end time of day is earlier than the start (e.g. 19:00 → 07:00),
//! the window wraps past midnight and ends on the following day. A start
//! equal to the end is rejected.
//!
//! # Interval semantics
//! A shift window is closed on both ends: a patient arriving exactly at the
//! end is in scope.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Configured start/end times of day for a named shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftTimes {
    /// Start time of day (`HH:MM`).
    pub start: String,
    /// End time of day (`HH:MM`).
    pub end: String,
}

impl ShiftTimes {
    /// Creates a start/end pair.
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Default window when nothing is configured for a shift.
    pub fn day() -> Self {
        Self::new("07:00", "19:00")
    }

    /// Night window, wrapping past midnight.
    pub fn night() -> Self {
        Self::new("19:00", "07:00")
    }
}

/// Parses an `HH:MM` time of day.
///
/// # Errors
/// [`Error::InvalidShiftTime`] for anything else.
pub fn parse_time_of_day(value: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M").map_err(|_| Error::InvalidShiftTime {
        value: value.to_string(),
    })
}

/// A shift anchored to concrete instants: `[start, end]`, closed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftWindow {
    /// Shift label (matched against staff shift labels).
    pub name: String,
    /// First instant of the shift.
    pub start: NaiveDateTime,
    /// Last instant at which an appointment may start.
    pub end: NaiveDateTime,
}

impl ShiftWindow {
    /// Creates a window from explicit instants.
    ///
    /// # Errors
    /// [`Error::EmptyShiftWindow`] if `end <= start`.
    pub fn new(name: impl Into<String>, start: NaiveDateTime, end: NaiveDateTime) -> Result<Self> {
        if end <= start {
            return Err(Error::EmptyShiftWindow {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self {
            name: name.into(),
            start,
            end,
        })
    }

    /// Anchors a time-of-day pair to `date`, wrapping overnight shifts.
    ///
    /// # Errors
    /// [`Error::EmptyShiftWindow`] if `start == end`.
    pub fn on_date(
        name: impl Into<String>,
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
    ) -> Result<Self> {
        if start == end {
            return Err(Error::EmptyShiftWindow {
                start: start.format("%H:%M").to_string(),
                end: end.format("%H:%M").to_string(),
            });
        }

        let start_at = date.and_time(start);
        let mut end_at = date.and_time(end);
        if end < start {
            end_at += TimeDelta::days(1);
        }
        Self::new(name, start_at, end_at)
    }

    /// Anchors configured `HH:MM` times to `date`.
    pub fn from_times(name: impl Into<String>, date: NaiveDate, times: &ShiftTimes) -> Result<Self> {
        let start = parse_time_of_day(&times.start)?;
        let end = parse_time_of_day(&times.end)?;
        Self::on_date(name, date, start, end)
    }

    /// Whether `instant` lies within `[start, end]`.
    #[inline]
    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        instant >= self.start && instant <= self.end
    }

    /// Whether the window crosses midnight.
    pub fn is_overnight(&self) -> bool {
        self.end.date() > self.start.date()
    }

    /// Window length in minutes.
    pub fn length_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 2, 13).unwrap()
    }

    #[test]
    fn test_day_window() {
        let w = ShiftWindow::from_times("Day", date(), &ShiftTimes::day()).unwrap();
        assert_eq!(w.start, date().and_hms_opt(7, 0, 0).unwrap());
        assert_eq!(w.end, date().and_hms_opt(19, 0, 0).unwrap());
        assert!(!w.is_overnight());
        assert_eq!(w.length_minutes(), 12 * 60);
    }

    #[test]
    fn test_night_window_wraps() {
        let w = ShiftWindow::from_times("Night", date(), &ShiftTimes::night()).unwrap();
        let next = date().succ_opt().unwrap();
        assert_eq!(w.end, next.and_hms_opt(7, 0, 0).unwrap());
        assert!(w.is_overnight());
        assert!(w.contains(next.and_hms_opt(2, 30, 0).unwrap()));
        assert!(!w.contains(date().and_hms_opt(2, 30, 0).unwrap()));
    }

    #[test]
    fn test_closed_interval() {
        let w = ShiftWindow::from_times("Day", date(), &ShiftTimes::day()).unwrap();
        assert!(w.contains(w.start));
        assert!(w.contains(w.end));
        assert!(!w.contains(w.end + TimeDelta::minutes(1)));
        assert!(!w.contains(w.start - TimeDelta::minutes(1)));
    }

    #[test]
    fn test_zero_length_rejected() {
        let err = ShiftWindow::from_times("Odd", date(), &ShiftTimes::new("08:00", "08:00"));
        assert!(matches!(err, Err(Error::EmptyShiftWindow { .. })));
    }

    #[test]
    fn test_bad_time_rejected() {
        assert!(matches!(
            parse_time_of_day("7 o'clock"),
            Err(Error::InvalidShiftTime { .. })
        ));
        assert!(parse_time_of_day("25:00").is_err());
        assert_eq!(
            parse_time_of_day(" 07:30 ").unwrap(),
            NaiveTime::from_hms_opt(7, 30, 0).unwrap()
        );
    }
}
