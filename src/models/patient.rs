//! Patient models.
//!
//! Patients come in as [`PatientRecord`]s, the raw stored form with a
//! textual arrival timestamp. The scheduler parses them into [`Patient`]s
//! before filtering; a record that does not parse is an input error, never a
//! silent drop.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Storage format for arrival timestamps.
pub const ARRIVAL_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Accepted without the seconds field.
const ARRIVAL_FORMAT_MINUTES: &str = "%Y-%m-%d %H:%M";

/// Triage level, 1 (least urgent) to 5 (most urgent).
///
/// Carried through for reporting; arrival order alone drives scheduling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub struct TriageLevel(u8);

impl TriageLevel {
    /// Least urgent level.
    pub const MIN: u8 = 1;
    /// Most urgent level.
    pub const MAX: u8 = 5;

    /// Creates a triage level, clamped to `[MIN, MAX]`.
    pub fn new(level: u8) -> Self {
        Self(level.clamp(Self::MIN, Self::MAX))
    }

    /// Numeric level.
    #[inline]
    pub fn value(&self) -> u8 {
        self.0
    }
}

impl Default for TriageLevel {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

impl From<u8> for TriageLevel {
    fn from(level: u8) -> Self {
        Self::new(level)
    }
}

impl From<TriageLevel> for u8 {
    fn from(level: TriageLevel) -> Self {
        level.0
    }
}

/// A patient as held by storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    /// Patient identifier.
    pub id: u64,
    /// Triage level.
    pub triage_level: TriageLevel,
    /// Arrival timestamp text (`YYYY-MM-DD HH:MM[:SS]`).
    pub arrival: String,
}

/// A patient with a parsed arrival instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    /// Patient identifier.
    pub id: u64,
    /// Triage level.
    pub triage_level: TriageLevel,
    /// Arrival instant.
    pub arrival: NaiveDateTime,
}

impl PatientRecord {
    /// Creates a record from raw parts.
    pub fn new(id: u64, triage_level: TriageLevel, arrival: impl Into<String>) -> Self {
        Self {
            id,
            triage_level,
            arrival: arrival.into(),
        }
    }

    /// Creates a record from a parsed instant, formatted for storage.
    pub fn from_instant(id: u64, triage_level: TriageLevel, arrival: NaiveDateTime) -> Self {
        Self::new(id, triage_level, arrival.format(ARRIVAL_FORMAT).to_string())
    }

    /// Parses the arrival timestamp.
    ///
    /// # Errors
    /// [`Error::InvalidArrivalFormat`] if the text matches neither
    /// `YYYY-MM-DD HH:MM:SS` nor `YYYY-MM-DD HH:MM`.
    pub fn parse(&self) -> Result<Patient> {
        let text = self.arrival.trim();
        let arrival = NaiveDateTime::parse_from_str(text, ARRIVAL_FORMAT)
            .or_else(|_| NaiveDateTime::parse_from_str(text, ARRIVAL_FORMAT_MINUTES))
            .map_err(|_| Error::InvalidArrivalFormat {
                patient_id: self.id,
                value: self.arrival.clone(),
            })?;

        Ok(Patient {
            id: self.id,
            triage_level: self.triage_level,
            arrival,
        })
    }
}

impl Patient {
    /// Creates a patient with a parsed arrival.
    pub fn new(id: u64, triage_level: TriageLevel, arrival: NaiveDateTime) -> Self {
        Self {
            id,
            triage_level,
            arrival,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 2, 13)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn test_parse_with_seconds() {
        let rec = PatientRecord::new(1, TriageLevel::new(3), "2025-02-13 09:10:00");
        let p = rec.parse().unwrap();
        assert_eq!(p.arrival, at(9, 10));
        assert_eq!(p.triage_level.value(), 3);
    }

    #[test]
    fn test_parse_minute_precision() {
        let rec = PatientRecord::new(1, TriageLevel::default(), "2025-02-13 18:50");
        assert_eq!(rec.parse().unwrap().arrival, at(18, 50));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let rec = PatientRecord::new(42, TriageLevel::default(), "13/02/2025 9am");
        match rec.parse() {
            Err(Error::InvalidArrivalFormat { patient_id, value }) => {
                assert_eq!(patient_id, 42);
                assert_eq!(value, "13/02/2025 9am");
            }
            other => panic!("expected InvalidArrivalFormat, got {other:?}"),
        }
    }

    #[test]
    fn test_from_instant_round_trip() {
        let rec = PatientRecord::from_instant(5, TriageLevel::new(5), at(7, 0));
        assert_eq!(rec.arrival, "2025-02-13 07:00:00");
        assert_eq!(rec.parse().unwrap().arrival, at(7, 0));
    }

    #[test]
    fn test_triage_clamping() {
        assert_eq!(TriageLevel::new(0).value(), 1);
        assert_eq!(TriageLevel::new(9).value(), 5);
    }

    #[test]
    fn test_triage_deserialize_clamps() {
        let low: TriageLevel = serde_json::from_str("0").unwrap();
        assert_eq!(low.value(), 1);
        let high: TriageLevel = serde_json::from_str("9").unwrap();
        assert_eq!(high.value(), 5);
        assert_eq!(serde_json::to_string(&TriageLevel::new(3)).unwrap(), "3");

        let record: PatientRecord = serde_json::from_str(
            r#"{"id": 1, "triage_level": 7, "arrival": "2025-02-13 09:00:00"}"#,
        )
        .unwrap();
        assert_eq!(record.triage_level, TriageLevel::new(5));
    }
}
