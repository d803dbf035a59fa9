//! Greedy earliest-available shift scheduler.
//!
//! # Algorithm
//!
//! 1. Parse every patient arrival (a malformed one fails the run).
//! 2. Keep patients arriving within `[shift_start, shift_end]`.
//! 3. Stable-sort them by arrival (simultaneous arrivals keep input order).
//! 4. For each patient, bind the earliest-available resource and start at
//!    `max(arrival, next_available)`.
//! 5. A start past the shift end loses the patient: no record, no mutation.
//! 6. Draw a duration, then draw the cancellation outcome. Only completed
//!    appointments advance the resource to `start + duration`.
//!
//! Triage level does not influence the order.
//!
//! # Complexity
//! O(p log p + p * s) where p=patients, s=staff.

use chrono::TimeDelta;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::ResourcePool;
use crate::error::{Error, Result};
use crate::models::{
    Appointment, AppointmentStatus, EligibleStaff, Patient, PatientRecord, SchedulingPolicy,
    ShiftWindow,
};
use crate::random::RandomSource;

/// Result of simulating one shift.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShiftOutcome {
    /// Shift label.
    pub shift: String,
    /// Appointment records in emission order.
    pub appointments: Vec<Appointment>,
    /// Patients whose arrival fell within the window.
    pub patients_in_window: usize,
    /// Patients lost because their start would fall past the shift end.
    pub skipped_patient_ids: Vec<u64>,
    /// Staff IDs of the eligible pool, in pool order.
    pub eligible_staff: Vec<String>,
}

impl ShiftOutcome {
    fn unstaffed(shift: &str, patients_in_window: usize) -> Self {
        Self {
            shift: shift.to_string(),
            appointments: Vec::new(),
            patients_in_window,
            skipped_patient_ids: Vec::new(),
            eligible_staff: Vec::new(),
        }
    }

    /// Number of appointment records produced.
    pub fn count(&self) -> usize {
        self.appointments.len()
    }

    /// Whether the run had nobody to schedule against.
    pub fn is_unstaffed(&self) -> bool {
        self.eligible_staff.is_empty()
    }

    /// Number of appointments with the given status.
    pub fn count_with_status(&self, status: AppointmentStatus) -> usize {
        self.appointments
            .iter()
            .filter(|a| a.status == status)
            .count()
    }
}

/// Greedy shift scheduler.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use u_shift::models::{
///     CancellationRate, DurationRange, EligibleStaff, PatientRecord, SchedulingPolicy,
///     ShiftTimes, ShiftWindow, TriageLevel,
/// };
/// use u_shift::scheduler::ShiftScheduler;
///
/// let date = NaiveDate::from_ymd_opt(2025, 2, 13).unwrap();
/// let window = ShiftWindow::from_times("Day", date, &ShiftTimes::day()).unwrap();
/// let staff = vec![EligibleStaff::new("MD7001", 1)];
/// let patients = vec![
///     PatientRecord::new(1, TriageLevel::new(2), "2025-02-13 09:00:00"),
///     PatientRecord::new(2, TriageLevel::new(4), "2025-02-13 09:10:00"),
/// ];
/// let policy = SchedulingPolicy::new(CancellationRate::NEVER, DurationRange::fixed(30).unwrap());
///
/// let outcome = ShiftScheduler::new(policy)
///     .run_shift(&patients, &staff, &window, &mut StdRng::seed_from_u64(1))
///     .unwrap();
/// assert_eq!(outcome.count(), 2);
/// assert_eq!(outcome.appointments[1].scheduled_time.format("%H:%M").to_string(), "09:30");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ShiftScheduler {
    policy: SchedulingPolicy,
}

impl ShiftScheduler {
    /// Creates a scheduler with the given policy.
    pub fn new(policy: SchedulingPolicy) -> Self {
        Self { policy }
    }

    /// Scheduling policy in use.
    pub fn policy(&self) -> &SchedulingPolicy {
        &self.policy
    }

    /// Simulates one shift from stored records.
    ///
    /// Builds a fresh [`ResourcePool`] at the window start. An empty staff
    /// set yields an unstaffed outcome with zero appointments, not an error.
    ///
    /// # Errors
    /// - [`Error::InvalidArrivalFormat`] on the first unparseable arrival.
    /// - [`Error::Validation`] on duplicate staff IDs.
    pub fn run_shift<R: RandomSource + ?Sized>(
        &self,
        patients: &[PatientRecord],
        staff: &[EligibleStaff],
        window: &ShiftWindow,
        rng: &mut R,
    ) -> Result<ShiftOutcome> {
        let parsed = patients
            .iter()
            .map(PatientRecord::parse)
            .collect::<Result<Vec<_>>>()?;

        let mut pool = match ResourcePool::initialize(staff, window.start) {
            Ok(pool) => pool,
            Err(Error::EmptyPool) => {
                let in_window = parsed.iter().filter(|p| window.contains(p.arrival)).count();
                warn!(
                    shift = %window.name,
                    patients_in_window = in_window,
                    "No clinical staff available for shift"
                );
                return Ok(ShiftOutcome::unstaffed(&window.name, in_window));
            }
            Err(e) => return Err(e),
        };

        let outcome = self.schedule(&parsed, &mut pool, window, rng);
        info!(
            shift = %outcome.shift,
            appointments = outcome.count(),
            skipped = outcome.skipped_patient_ids.len(),
            "Shift simulation complete: {} appointments scheduled for the {} shift",
            outcome.count(),
            outcome.shift
        );
        Ok(outcome)
    }

    /// Runs the assignment loop against a caller-owned pool.
    ///
    /// The pool is mutated in place; inspecting it afterwards shows each
    /// resource's final availability.
    pub fn schedule<R: RandomSource + ?Sized>(
        &self,
        patients: &[Patient],
        pool: &mut ResourcePool,
        window: &ShiftWindow,
        rng: &mut R,
    ) -> ShiftOutcome {
        let queue = arrival_queue(patients, window);
        let mut outcome = ShiftOutcome {
            shift: window.name.clone(),
            appointments: Vec::with_capacity(queue.len()),
            patients_in_window: queue.len(),
            skipped_patient_ids: Vec::new(),
            eligible_staff: pool
                .resources()
                .iter()
                .map(|r| r.staff_id.clone())
                .collect(),
        };

        let range = self.policy.duration_range;
        for patient in queue {
            let Some(resource) = pool.earliest_available() else {
                break;
            };

            let start = patient.arrival.max(resource.next_available());
            if start > window.end {
                debug!(
                    patient_id = patient.id,
                    start = %start,
                    "Patient skipped: start falls past shift end"
                );
                outcome.skipped_patient_ids.push(patient.id);
                continue;
            }

            let duration = rng.uniform_int(range.min(), range.max());
            let status = if self.policy.cancellation_rate.fires(rng.uniform_unit()) {
                AppointmentStatus::Cancelled
            } else {
                AppointmentStatus::Completed
            };

            let appointment = Appointment {
                patient_id: patient.id,
                staff_id: resource.staff_id.clone(),
                department_id: resource.department_id,
                scheduled_time: start,
                duration_minutes: duration,
                status,
            };

            if status == AppointmentStatus::Completed {
                pool.advance(
                    &appointment.staff_id,
                    start + TimeDelta::minutes(i64::from(duration)),
                );
            }

            debug!(
                patient_id = appointment.patient_id,
                staff_id = %appointment.staff_id,
                start = %appointment.scheduled_time,
                duration,
                status = %status,
                "Appointment emitted"
            );
            outcome.appointments.push(appointment);
        }

        outcome
    }
}

/// Patients arriving within the window, stably sorted by arrival.
pub fn arrival_queue<'a>(patients: &'a [Patient], window: &ShiftWindow) -> Vec<&'a Patient> {
    let mut queue: Vec<&Patient> = patients
        .iter()
        .filter(|p| window.contains(p.arrival))
        .collect();
    queue.sort_by_key(|p| p.arrival);
    queue
}
