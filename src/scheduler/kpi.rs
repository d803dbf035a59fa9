//! Shift quality metrics (KPIs).
//!
//! Computes per-run indicators from a [`ShiftOutcome`] and the patients it
//! was built from.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Completed / Cancelled | Appointment counts by status |
//! | Cancellation Ratio | cancelled / appointments |
//! | Avg / Max Wait | scheduled_time - arrival, minutes |
//! | Busy Minutes | Sum of completed durations per eligible staff member |
//! | Utilization | busy minutes / shift length per eligible staff member |
//! | Skipped | Patients lost to a full shift |

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use super::ShiftOutcome;
use crate::models::{AppointmentStatus, Patient, ShiftWindow};

/// Shift performance indicators.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShiftKpi {
    /// Shift label.
    pub shift: String,
    /// Appointment records produced.
    pub appointments: usize,
    /// Completed appointments.
    pub completed: usize,
    /// Cancelled appointments.
    pub cancelled: usize,
    /// Patients lost because the shift was full.
    pub skipped: usize,
    /// Fraction of appointments cancelled (0.0 when none were produced).
    pub cancellation_ratio: f64,
    /// Mean wait from arrival to start, minutes.
    pub avg_wait_minutes: f64,
    /// Longest wait from arrival to start, minutes.
    pub max_wait_minutes: i64,
    /// Completed minutes per eligible staff member (0 when idle).
    pub busy_minutes_by_staff: BTreeMap<String, u32>,
    /// Busy minutes over shift length per staff member (can exceed 1.0 when
    /// the last appointment overruns the shift end).
    pub utilization_by_staff: BTreeMap<String, f64>,
    /// Mean utilization across the eligible pool.
    pub avg_utilization: f64,
}

impl ShiftKpi {
    /// Computes KPIs.
    ///
    /// # Arguments
    /// * `outcome` - The finished shift run.
    /// * `patients` - Parsed patients (for arrival instants).
    /// * `window` - The shift window (for utilization).
    pub fn calculate(outcome: &ShiftOutcome, patients: &[Patient], window: &ShiftWindow) -> Self {
        let arrivals: HashMap<u64, _> = patients.iter().map(|p| (p.id, p.arrival)).collect();

        let completed = outcome.count_with_status(AppointmentStatus::Completed);
        let cancelled = outcome.count_with_status(AppointmentStatus::Cancelled);

        let mut total_wait: i64 = 0;
        let mut max_wait: i64 = 0;
        let mut waited: usize = 0;
        let mut busy: BTreeMap<String, u32> = outcome
            .eligible_staff
            .iter()
            .map(|id| (id.clone(), 0))
            .collect();

        for a in &outcome.appointments {
            if let Some(&arrival) = arrivals.get(&a.patient_id) {
                let wait = (a.scheduled_time - arrival).num_minutes();
                total_wait += wait;
                max_wait = max_wait.max(wait);
                waited += 1;
            }
            if a.is_completed() {
                *busy.entry(a.staff_id.clone()).or_insert(0) += a.duration_minutes;
            }
        }

        let horizon = window.length_minutes();
        let utilization_by_staff: BTreeMap<String, f64> = if horizon > 0 {
            busy.iter()
                .map(|(id, &minutes)| (id.clone(), f64::from(minutes) / horizon as f64))
                .collect()
        } else {
            BTreeMap::new()
        };
        let avg_utilization = if utilization_by_staff.is_empty() {
            0.0
        } else {
            utilization_by_staff.values().sum::<f64>() / utilization_by_staff.len() as f64
        };

        let total = outcome.count();
        Self {
            shift: outcome.shift.clone(),
            appointments: total,
            completed,
            cancelled,
            skipped: outcome.skipped_patient_ids.len(),
            cancellation_ratio: if total == 0 {
                0.0
            } else {
                cancelled as f64 / total as f64
            },
            avg_wait_minutes: if waited == 0 {
                0.0
            } else {
                total_wait as f64 / waited as f64
            },
            max_wait_minutes: max_wait,
            busy_minutes_by_staff: busy,
            utilization_by_staff,
            avg_utilization,
        }
    }
}
