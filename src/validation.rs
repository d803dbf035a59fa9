//! Input validation for shift simulations.
//!
//! Checks configuration and roster integrity before any shift is simulated.
//! Detects:
//! - Out-of-domain policy values (cancellation rate, duration range)
//! - Unparseable or zero-length shift windows
//! - Staffing tables with unknown roles or inverted ranges
//! - Duplicate staff, patient, and department identifiers
//!
//! Every problem is reported, not just the first.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::SimulationConfig;
use crate::models::{
    parse_time_of_day, CancellationRate, DurationRange, EligibleStaff, PatientRecord, StaffRole,
};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID or name.
    DuplicateId,
    /// Cancellation rate outside `[0, 1]`.
    CancellationRateOutOfRange,
    /// Duration range with `min > max` or a zero minimum.
    InvalidDurationRange,
    /// Shift time is not `HH:MM`.
    InvalidShiftTime,
    /// Shift starts and ends at the same time of day.
    EmptyShiftWindow,
    /// Staffing range with `min > max`.
    InvalidStaffingRange,
    /// Staffing table names a role that does not exist.
    UnknownRole,
    /// Clinical departments exist but no shift labels are configured.
    NoShifts,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Validates a simulation configuration.
///
/// Checks:
/// 1. `cancellation_rate` lies in `[0, 1]`
/// 2. `duration_range` has `min <= max`
/// 3. Every configured shift time parses as `HH:MM`
/// 4. No shift window has zero length
/// 5. Department names are unique
/// 6. Staffing tables name known roles with `min <= max`
/// 7. Shift labels exist when any department is clinical
pub fn validate_config(config: &SimulationConfig) -> ValidationResult {
    let mut errors = Vec::new();

    if let Err(e) = CancellationRate::new(config.cancellation_rate) {
        errors.push(e);
    }
    let [min, max] = config.duration_range;
    if let Err(e) = DurationRange::new(min, max) {
        errors.push(e);
    }

    for (name, times) in &config.shift_times {
        let start = parse_time_of_day(&times.start);
        let end = parse_time_of_day(&times.end);
        for (label, parsed, raw) in [("start", &start, &times.start), ("end", &end, &times.end)] {
            if parsed.is_err() {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidShiftTime,
                    format!("Shift '{name}' {label} '{raw}' is not HH:MM"),
                ));
            }
        }
        if let (Ok(s), Ok(e)) = (start, end) {
            if s == e {
                errors.push(ValidationError::new(
                    ValidationErrorKind::EmptyShiftWindow,
                    format!("Shift '{name}' starts and ends at {}", times.start),
                ));
            }
        }
    }

    let mut department_names = HashSet::new();
    for dept in &config.departments_info {
        if !department_names.insert(dept.name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate department name: {}", dept.name),
            ));
        }

        for (role, [lo, hi]) in &dept.staffing {
            if role.parse::<StaffRole>().is_err() {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownRole,
                    format!("Department '{}' staffs unknown role '{role}'", dept.name),
                ));
            }
            if lo > hi {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidStaffingRange,
                    format!(
                        "Department '{}' role '{role}' staffing min {lo} exceeds max {hi}",
                        dept.name
                    ),
                ));
            }
        }
    }

    if config.shifts.is_empty() && config.departments_info.iter().any(|d| d.is_clinical) {
        errors.push(ValidationError::new(
            ValidationErrorKind::NoShifts,
            "Clinical departments are configured but no shifts are listed",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates the scheduler inputs for one shift.
///
/// Checks:
/// 1. No duplicate staff IDs in the eligible pool
/// 2. No duplicate patient IDs in the queue
///
/// Arrival timestamps are not checked here; the scheduler parses them and
/// fails on the first malformed one.
pub fn validate_roster(staff: &[EligibleStaff], patients: &[PatientRecord]) -> ValidationResult {
    let mut errors = Vec::new();

    let mut staff_ids = HashSet::new();
    for s in staff {
        if !staff_ids.insert(s.staff_id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate staff ID: {}", s.staff_id),
            ));
        }
    }

    let mut patient_ids = HashSet::new();
    for p in patients {
        if !patient_ids.insert(p.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate patient ID: {}", p.id),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
