//! Simulation configuration.
//!
//! Loaded from a JSON file. Every field is optional; missing fields take the
//! defaults below. Values are validated as a whole at load time, so a
//! [`SimulationConfig`] returned by [`SimulationConfig::load`] never carries an
//! out-of-domain policy into a shift run.
//!
//! ```json
//! {
//!   "departments_info": [
//!     { "name": "Cardiology", "capacity": 30, "is_clinical": true,
//!       "staffing": { "Doctor": [5, 6], "Registered Nurse": [8, 10] } }
//!   ],
//!   "num_patients": 200,
//!   "cancellation_rate": 0.1,
//!   "duration_range": [15, 45],
//!   "shifts": ["Day", "Night"],
//!   "shift_times": {
//!     "Day": { "start": "07:00", "end": "19:00" },
//!     "Night": { "start": "19:00", "end": "07:00" }
//!   }
//! }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::{
    CancellationRate, DurationRange, SchedulingPolicy, ShiftTimes, ShiftWindow, StaffRole,
};
use crate::validation::validate_config;

/// Top-level simulation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Departments and their staffing tables.
    pub departments_info: Vec<DepartmentInfo>,
    /// Patients generated per populate call.
    pub num_patients: usize,
    /// Probability that an appointment is cancelled.
    pub cancellation_rate: f64,
    /// Appointment duration range in minutes, `[min, max]` inclusive.
    pub duration_range: [u32; 2],
    /// Shift labels assigned to clinical staff.
    pub shifts: Vec<String>,
    /// Time-of-day windows per shift label.
    pub shift_times: BTreeMap<String, ShiftTimes>,
    /// Random seed; `None` draws from the OS.
    pub seed: Option<u64>,
}

/// A department entry with its staffing table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentInfo {
    /// Display name.
    pub name: String,
    /// Capacity.
    #[serde(default)]
    pub capacity: u32,
    /// Whether the department delivers patient care.
    #[serde(default)]
    pub is_clinical: bool,
    /// Role name → `[min, max]` headcount.
    #[serde(default)]
    pub staffing: BTreeMap<String, [u32; 2]>,
}

impl DepartmentInfo {
    /// Creates a department with an empty staffing table.
    pub fn new(name: impl Into<String>, capacity: u32, is_clinical: bool) -> Self {
        Self {
            name: name.into(),
            capacity,
            is_clinical,
            staffing: BTreeMap::new(),
        }
    }

    /// Adds a staffing range for a role.
    pub fn with_staffing(mut self, role: StaffRole, min: u32, max: u32) -> Self {
        self.staffing.insert(role.name().to_string(), [min, max]);
        self
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        let mut shift_times = BTreeMap::new();
        shift_times.insert("Day".to_string(), ShiftTimes::day());
        shift_times.insert("Night".to_string(), ShiftTimes::night());
        Self {
            departments_info: Vec::new(),
            num_patients: 200,
            cancellation_rate: 0.1,
            duration_range: [15, 45],
            shifts: vec!["Day".to_string(), "Night".to_string()],
            shift_times,
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// Reads, parses, and validates a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&text)
    }

    /// Parses and validates a JSON configuration.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Runs all configuration checks.
    pub fn validate(&self) -> Result<()> {
        validate_config(self).map_err(Error::Validation)
    }

    /// Builds the scheduling policy.
    pub fn policy(&self) -> Result<SchedulingPolicy> {
        let rate = CancellationRate::new(self.cancellation_rate)
            .map_err(|e| Error::Validation(vec![e]))?;
        let [min, max] = self.duration_range;
        let range = DurationRange::new(min, max).map_err(|e| Error::Validation(vec![e]))?;
        Ok(SchedulingPolicy::new(rate, range))
    }

    /// Configured times for a shift, falling back to 07:00–19:00.
    pub fn shift_times_for(&self, shift: &str) -> ShiftTimes {
        self.shift_times
            .get(shift)
            .cloned()
            .unwrap_or_else(ShiftTimes::day)
    }

    /// Resolves the window for `shift` on `date`.
    ///
    /// The `start`/`end` overrides apply only as a pair. If either is
    /// missing, the configured times for `shift` are used for both ends.
    pub fn window_for(
        &self,
        shift: &str,
        date: NaiveDate,
        start: Option<&str>,
        end: Option<&str>,
    ) -> Result<ShiftWindow> {
        let times = match (start, end) {
            (Some(start), Some(end)) => ShiftTimes::new(start, end),
            _ => self.shift_times_for(shift),
        };
        ShiftWindow::from_times(shift, date, &times)
    }
}
