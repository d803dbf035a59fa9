//! Crate error type.
//!
//! Scheduling policy outcomes (a patient lost to a full shift, a cancelled
//! appointment) are never errors. Only malformed input, invalid
//! configuration, and an empty staff pool surface here.

use thiserror::Error;

use crate::validation::ValidationError;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the shift simulation.
#[derive(Error, Debug)]
pub enum Error {
    /// No staff are eligible for the shift.
    ///
    /// Callers recover from this locally as a zero-appointment run.
    #[error("no eligible staff for this shift")]
    EmptyPool,

    /// A patient arrival timestamp could not be parsed.
    #[error("patient {patient_id}: invalid arrival timestamp '{value}'")]
    InvalidArrivalFormat {
        /// Offending patient.
        patient_id: u64,
        /// Raw arrival text.
        value: String,
    },

    /// A shift boundary is not a valid `HH:MM` time of day.
    #[error("invalid shift time '{value}' (expected HH:MM)")]
    InvalidShiftTime {
        /// Raw time text.
        value: String,
    },

    /// A shift window starts and ends at the same time of day.
    #[error("shift window {start}-{end} has zero length")]
    EmptyShiftWindow {
        /// Start time of day.
        start: String,
        /// End time of day.
        end: String,
    },

    /// Configuration or input data failed validation.
    #[error("validation failed: {}", join_messages(.0))]
    Validation(Vec<ValidationError>),

    /// I/O failure while reading configuration.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration is not valid JSON for the expected shape.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Whether the caller should treat this as an empty result rather than a failure.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::EmptyPool)
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
