//! Scheduling policy parameters.
//!
//! Both values are checked on construction, so a [`SchedulingPolicy`] that
//! exists is always in domain and the scheduling loop never re-validates.

use serde::{Deserialize, Serialize};

use crate::validation::{ValidationError, ValidationErrorKind};

/// Probability in `[0, 1]` that an appointment is cancelled.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct CancellationRate(f64);

impl CancellationRate {
    /// Never cancel.
    pub const NEVER: Self = Self(0.0);
    /// Always cancel.
    pub const ALWAYS: Self = Self(1.0);

    /// Creates a rate.
    ///
    /// # Errors
    /// Rejects values outside `[0, 1]` and NaN.
    pub fn new(rate: f64) -> Result<Self, ValidationError> {
        if (0.0..=1.0).contains(&rate) {
            Ok(Self(rate))
        } else {
            Err(ValidationError::new(
                ValidationErrorKind::CancellationRateOutOfRange,
                format!("cancellation_rate {rate} is outside [0, 1]"),
            ))
        }
    }

    /// Probability value.
    #[inline]
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Bernoulli outcome for a uniform draw in `[0, 1)`.
    #[inline]
    pub fn fires(&self, draw: f64) -> bool {
        draw < self.0
    }
}

impl TryFrom<f64> for CancellationRate {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CancellationRate> for f64 {
    fn from(rate: CancellationRate) -> Self {
        rate.0
    }
}

/// Inclusive range of appointment durations, in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "[u32; 2]", into = "[u32; 2]")]
pub struct DurationRange {
    min: u32,
    max: u32,
}

impl DurationRange {
    /// Creates a range.
    ///
    /// # Errors
    /// Rejects `min > max`. Zero-minute durations are allowed.
    pub fn new(min: u32, max: u32) -> Result<Self, ValidationError> {
        if min > max {
            return Err(ValidationError::new(
                ValidationErrorKind::InvalidDurationRange,
                format!("duration_range min {min} exceeds max {max}"),
            ));
        }
        Ok(Self { min, max })
    }

    /// A range that always yields `minutes`.
    pub fn fixed(minutes: u32) -> Result<Self, ValidationError> {
        Self::new(minutes, minutes)
    }

    /// Shortest duration.
    #[inline]
    pub fn min(&self) -> u32 {
        self.min
    }

    /// Longest duration.
    #[inline]
    pub fn max(&self) -> u32 {
        self.max
    }
}

impl Default for DurationRange {
    fn default() -> Self {
        Self { min: 15, max: 45 }
    }
}

impl TryFrom<[u32; 2]> for DurationRange {
    type Error = ValidationError;

    fn try_from([min, max]: [u32; 2]) -> Result<Self, Self::Error> {
        Self::new(min, max)
    }
}

impl From<DurationRange> for [u32; 2] {
    fn from(range: DurationRange) -> Self {
        [range.min, range.max]
    }
}

/// Per-run scheduling parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SchedulingPolicy {
    /// Probability that an appointment is cancelled.
    pub cancellation_rate: CancellationRate,
    /// Duration sampling range.
    pub duration_range: DurationRange,
}

impl SchedulingPolicy {
    /// Creates a policy.
    pub fn new(cancellation_rate: CancellationRate, duration_range: DurationRange) -> Self {
        Self {
            cancellation_rate,
            duration_range,
        }
    }
}

impl Default for SchedulingPolicy {
    fn default() -> Self {
        Self {
            cancellation_rate: CancellationRate(0.1),
            duration_range: DurationRange::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_bounds() {
        assert!(CancellationRate::new(0.0).is_ok());
        assert!(CancellationRate::new(1.0).is_ok());
        assert!(CancellationRate::new(-0.01).is_err());
        assert!(CancellationRate::new(1.01).is_err());
        assert!(CancellationRate::new(f64::NAN).is_err());
    }

    #[test]
    fn test_rate_fires() {
        assert!(!CancellationRate::NEVER.fires(0.0));
        assert!(CancellationRate::ALWAYS.fires(0.999_999));
        let r = CancellationRate::new(0.25).unwrap();
        assert!(r.fires(0.1));
        assert!(!r.fires(0.25));
    }

    #[test]
    fn test_duration_range() {
        let r = DurationRange::new(15, 45).unwrap();
        assert_eq!((r.min(), r.max()), (15, 45));
        assert_eq!(DurationRange::fixed(30).unwrap().max(), 30);

        let err = DurationRange::new(45, 15).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::InvalidDurationRange);
        assert!(DurationRange::new(0, 10).is_ok());
        assert_eq!(DurationRange::fixed(0).unwrap().max(), 0);
    }

    #[test]
    fn test_serde_validates() {
        let r: DurationRange = serde_json::from_str("[20, 40]").unwrap();
        assert_eq!(r, DurationRange::new(20, 40).unwrap());
        assert!(serde_json::from_str::<DurationRange>("[40, 20]").is_err());
        assert!(serde_json::from_str::<CancellationRate>("2.0").is_err());
    }
}
