//! Appointment (output) model.
//!
//! An appointment records that a patient was bound to a staff member at a
//! start instant. Cancelled appointments still carry a sampled duration;
//! only completed ones consumed staff time.

use chrono::{NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of an appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    /// The patient was seen; the staff member was busy for the duration.
    Completed,
    /// The appointment was booked but did not happen.
    Cancelled,
}

impl AppointmentStatus {
    /// Storage label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A scheduled appointment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    /// Served patient.
    pub patient_id: u64,
    /// Bound staff member.
    pub staff_id: String,
    /// Department of the bound staff member.
    pub department_id: u32,
    /// Start instant.
    pub scheduled_time: NaiveDateTime,
    /// Sampled duration in minutes.
    pub duration_minutes: u32,
    /// Outcome.
    pub status: AppointmentStatus,
}

impl Appointment {
    /// Instant at which the appointment ends.
    #[inline]
    pub fn end_time(&self) -> NaiveDateTime {
        self.scheduled_time + TimeDelta::minutes(i64::from(self.duration_minutes))
    }

    /// Whether the appointment consumed staff time.
    #[inline]
    pub fn is_completed(&self) -> bool {
        self.status == AppointmentStatus::Completed
    }
}
