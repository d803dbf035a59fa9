//! In-memory hospital store.
//!
//! Stands in for the persistence layer: holds the roster, the patient
//! table, and recorded appointments, and answers the two queries the
//! simulation needs (eligible staff for a shift, the patient queue) plus the
//! status-count report.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::info;

use crate::config::SimulationConfig;
use crate::error::Result;
use crate::generation::{generate_patients, generate_roster, RoleCounter};
use crate::models::{
    Appointment, AppointmentStatus, Department, EligibleStaff, PatientRecord, ShiftWindow,
    StaffMember,
};
use crate::random::RandomSource;

/// A persisted appointment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredAppointment {
    /// Appointment identifier (1.., in recording order).
    pub id: u64,
    /// The appointment record.
    #[serde(flatten)]
    pub appointment: Appointment,
}

/// In-memory tables for one simulation session.
#[derive(Debug, Clone, Default, Serialize)]
pub struct HospitalStore {
    departments: Vec<Department>,
    staff: Vec<StaffMember>,
    patients: Vec<PatientRecord>,
    appointments: Vec<StoredAppointment>,
    #[serde(skip)]
    counter: RoleCounter,
}

impl HospitalStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops every table and restarts staff numbering.
    pub fn reset(&mut self) {
        self.departments.clear();
        self.staff.clear();
        self.patients.clear();
        self.appointments.clear();
        self.counter = RoleCounter::new();
    }

    /// Generates departments and staff from the configuration.
    ///
    /// Repeated calls append: staff IDs keep counting per role and department
    /// IDs continue after the highest stored one.
    pub fn populate_roster<R: RandomSource + ?Sized>(
        &mut self,
        config: &SimulationConfig,
        rng: &mut R,
    ) -> Result<()> {
        let first_department_id = self.departments.iter().map(|d| d.id).max().unwrap_or(0) + 1;
        let roster = generate_roster(
            &config.departments_info,
            &config.shifts,
            first_department_id,
            &mut self.counter,
            rng,
        )?;
        info!(
            departments = roster.departments.len(),
            staff = roster.staff.len(),
            "Departments and staff data populated"
        );
        self.departments.extend(roster.departments);
        self.staff.extend(roster.staff);
        Ok(())
    }

    /// Generates `count` patients arriving within `window`, continuing the ID sequence.
    pub fn populate_patients<R: RandomSource + ?Sized>(
        &mut self,
        count: usize,
        window: &ShiftWindow,
        rng: &mut R,
    ) -> usize {
        let first_id = self.patients.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        let generated = generate_patients(count, first_id, window, rng);
        let n = generated.len();
        self.patients.extend(generated);
        info!(patients = n, shift = %window.name, "Patients data populated");
        n
    }

    /// Adds staff directly.
    pub fn add_staff(&mut self, staff: impl IntoIterator<Item = StaffMember>) {
        self.staff.extend(staff);
    }

    /// Adds patient records directly.
    pub fn add_patients(&mut self, patients: impl IntoIterator<Item = PatientRecord>) {
        self.patients.extend(patients);
    }

    /// Clinical staff whose shift label equals `shift`, in roster order.
    pub fn eligible_staff(&self, shift: &str) -> Vec<EligibleStaff> {
        self.staff
            .iter()
            .filter(|s| s.role.is_clinical() && s.shift == shift)
            .map(|s| EligibleStaff::new(s.id.clone(), s.department_id))
            .collect()
    }

    /// All stored patients.
    pub fn patient_queue(&self) -> &[PatientRecord] {
        &self.patients
    }

    /// Persists appointments, assigning sequential IDs. Returns the count.
    pub fn record(&mut self, appointments: impl IntoIterator<Item = Appointment>) -> usize {
        let before = self.appointments.len();
        for appointment in appointments {
            let id = self.appointments.len() as u64 + 1;
            self.appointments.push(StoredAppointment { id, appointment });
        }
        self.appointments.len() - before
    }

    /// Appointment counts grouped by status.
    pub fn status_counts(&self) -> BTreeMap<AppointmentStatus, usize> {
        let mut counts = BTreeMap::new();
        for stored in &self.appointments {
            *counts.entry(stored.appointment.status).or_insert(0) += 1;
        }
        counts
    }

    /// Departments.
    pub fn departments(&self) -> &[Department] {
        &self.departments
    }

    /// Staff members.
    pub fn staff(&self) -> &[StaffMember] {
        &self.staff
    }

    /// Recorded appointments.
    pub fn appointments(&self) -> &[StoredAppointment] {
        &self.appointments
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DepartmentInfo;
    use crate::models::{ShiftTimes, StaffRole, TriageLevel};
    use crate::scheduler::ShiftScheduler;
    use chrono::NaiveDate;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn member(id: &str, role: StaffRole, shift: &str) -> StaffMember {
        StaffMember {
            id: id.into(),
            role,
            department_id: 1,
            shift: shift.into(),
        }
    }

    fn appt(patient_id: u64, status: AppointmentStatus) -> Appointment {
        Appointment {
            patient_id,
            staff_id: "MD7001".into(),
            department_id: 1,
            scheduled_time: NaiveDate::from_ymd_opt(2025, 2, 13)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
            duration_minutes: 20,
            status,
        }
    }

    #[test]
    fn test_eligible_staff_filters_role_and_shift() {
        let mut store = HospitalStore::new();
        store.add_staff([
            member("MD7001", StaffRole::Doctor, "Day"),
            member("RN7001", StaffRole::RegisteredNurse, "Night"),
            member("PH7001", StaffRole::Pharmacist, "Day"),
            member("NA7001", StaffRole::NursingAssistant, "Day"),
            member("MD7002", StaffRole::Doctor, "day"),
        ]);

        let day: Vec<String> = store
            .eligible_staff("Day")
            .into_iter()
            .map(|s| s.staff_id)
            .collect();
        assert_eq!(day, vec!["MD7001", "NA7001"]);
        assert_eq!(store.eligible_staff("Night").len(), 1);
        assert!(store.eligible_staff("Evening").is_empty());
    }

    #[test]
    fn test_record_and_report() {
        let mut store = HospitalStore::new();
        let n = store.record([
            appt(1, AppointmentStatus::Completed),
            appt(2, AppointmentStatus::Cancelled),
            appt(3, AppointmentStatus::Completed),
        ]);
        assert_eq!(n, 3);
        assert_eq!(store.appointments()[2].id, 3);

        let counts = store.status_counts();
        assert_eq!(counts[&AppointmentStatus::Completed], 2);
        assert_eq!(counts[&AppointmentStatus::Cancelled], 1);
    }

    #[test]
    fn test_populate_and_reset() {
        let config = SimulationConfig {
            departments_info: vec![
                DepartmentInfo::new("Cardiology", 30, true).with_staffing(StaffRole::Doctor, 2, 2)
            ],
            ..SimulationConfig::default()
        };
        let date = NaiveDate::from_ymd_opt(2025, 2, 13).unwrap();
        let window = ShiftWindow::from_times("Day", date, &ShiftTimes::day()).unwrap();
        let mut rng = SmallRng::seed_from_u64(8);

        let mut store = HospitalStore::new();
        store.populate_roster(&config, &mut rng).unwrap();
        store.populate_patients(5, &window, &mut rng);
        store.add_patients([PatientRecord::new(100, TriageLevel::new(2), "2025-02-13 10:00")]);
        store.populate_patients(2, &window, &mut rng);

        assert_eq!(store.departments().len(), 1);
        assert_eq!(store.staff().len(), 2);
        let ids: Vec<u64> = store.patient_queue().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 100, 101, 102]);

        store.reset();
        assert!(store.staff().is_empty());
        assert!(store.patient_queue().is_empty());
        assert!(store.status_counts().is_empty());

        store.populate_roster(&config, &mut rng).unwrap();
        let ids: Vec<&str> = store.staff().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["MD7001", "MD7002"]);
    }

    #[test]
    fn test_populate_roster_twice_keeps_ids_unique() {
        let config = SimulationConfig {
            departments_info: vec![
                DepartmentInfo::new("Cardiology", 30, true).with_staffing(StaffRole::Doctor, 2, 2)
            ],
            shifts: vec!["Day".into()],
            ..SimulationConfig::default()
        };
        let mut rng = SmallRng::seed_from_u64(8);

        let mut store = HospitalStore::new();
        store.populate_roster(&config, &mut rng).unwrap();
        store.populate_roster(&config, &mut rng).unwrap();

        let ids: Vec<&str> = store.staff().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["MD7001", "MD7002", "MD7003", "MD7004"]);
        let departments: Vec<u32> = store.departments().iter().map(|d| d.id).collect();
        assert_eq!(departments, vec![1, 2]);
        let staff_departments: Vec<u32> = store.staff().iter().map(|s| s.department_id).collect();
        assert_eq!(staff_departments, vec![1, 1, 2, 2]);

        let eligible = store.eligible_staff("Day");
        assert_eq!(eligible.len(), 4);
        let date = NaiveDate::from_ymd_opt(2025, 2, 13).unwrap();
        let window = ShiftWindow::from_times("Day", date, &ShiftTimes::day()).unwrap();
        let outcome = ShiftScheduler::default()
            .run_shift(&[], &eligible, &window, &mut rng)
            .unwrap();
        assert!(!outcome.is_unstaffed());
    }
}
