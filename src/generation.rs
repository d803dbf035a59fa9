//! Synthetic roster and patient generation.
//!
//! Staff IDs follow `{PREFIX}700{n}` (first doctor `MD7001`, first nurse
//! `RN7001`). Numbering lives in a [`RoleCounter`] owned by the caller, so two
//! runs in one process never share counters.

use std::collections::HashMap;

use chrono::TimeDelta;
use serde::Serialize;
use tracing::debug;

use crate::config::DepartmentInfo;
use crate::error::{Error, Result};
use crate::models::{
    Department, PatientRecord, ShiftWindow, StaffMember, StaffRole, TriageLevel,
};
use crate::random::RandomSource;
use crate::validation::{ValidationError, ValidationErrorKind};

/// Shift label given to staff of non-clinical departments.
pub const NON_CLINICAL_SHIFT: &str = "day";

/// Per-run staff ID counter.
#[derive(Debug, Clone, Default)]
pub struct RoleCounter {
    counts: HashMap<StaffRole, u32>,
}

impl RoleCounter {
    /// Creates a counter with every role at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues the next ID for `role`.
    pub fn next_id(&mut self, role: StaffRole) -> String {
        let n = self.counts.entry(role).or_insert(0);
        *n += 1;
        format!("{}700{}", role.id_prefix(), n)
    }

    /// Number of IDs issued for `role`.
    pub fn issued(&self, role: StaffRole) -> u32 {
        self.counts.get(&role).copied().unwrap_or(0)
    }
}

/// Generated departments and staff.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Roster {
    /// Departments, numbered consecutively in configuration order.
    pub departments: Vec<Department>,
    /// Staff members.
    pub staff: Vec<StaffMember>,
}

/// Generates departments and staff from staffing tables.
///
/// For each department and role, the headcount is drawn uniformly from the
/// configured `[min, max]`. Clinical departments give each member a random
/// label from `shifts`; non-clinical departments use [`NON_CLINICAL_SHIFT`].
/// Department IDs run from `first_department_id`.
///
/// # Errors
/// [`Error::Validation`] if a staffing table names an unknown role.
pub fn generate_roster<R: RandomSource + ?Sized>(
    departments: &[DepartmentInfo],
    shifts: &[String],
    first_department_id: u32,
    counter: &mut RoleCounter,
    rng: &mut R,
) -> Result<Roster> {
    let mut roster = Roster::default();

    for (i, info) in departments.iter().enumerate() {
        let department_id = first_department_id + i as u32;
        roster.departments.push(Department {
            id: department_id,
            name: info.name.clone(),
            capacity: info.capacity,
            is_clinical: info.is_clinical,
        });

        for (role_name, &[min, max]) in &info.staffing {
            let role: StaffRole = role_name.parse().map_err(|msg: String| {
                Error::Validation(vec![ValidationError::new(
                    ValidationErrorKind::UnknownRole,
                    msg,
                )])
            })?;
            let headcount = rng.uniform_int(min.min(max), max.max(min));

            for _ in 0..headcount {
                let shift = if info.is_clinical && !shifts.is_empty() {
                    let pick = rng.uniform_int(0, shifts.len() as u32 - 1) as usize;
                    shifts[pick].clone()
                } else {
                    NON_CLINICAL_SHIFT.to_string()
                };
                roster.staff.push(StaffMember {
                    id: counter.next_id(role),
                    role,
                    department_id,
                    shift,
                });
            }
        }
    }

    debug!(
        departments = roster.departments.len(),
        staff = roster.staff.len(),
        "Roster generated"
    );
    Ok(roster)
}

/// Generates `count` patients arriving within `window`.
///
/// IDs run from `first_id`. Triage is uniform over 1–5; arrivals are uniform
/// on the minute grid of `[window.start, window.end]`.
pub fn generate_patients<R: RandomSource + ?Sized>(
    count: usize,
    first_id: u64,
    window: &ShiftWindow,
    rng: &mut R,
) -> Vec<PatientRecord> {
    let span = u32::try_from(window.length_minutes().max(0)).unwrap_or(u32::MAX);

    (0..count as u64)
        .map(|i| {
            let triage = TriageLevel::new(
                rng.uniform_int(u32::from(TriageLevel::MIN), u32::from(TriageLevel::MAX)) as u8,
            );
            let offset = rng.uniform_int(0, span);
            let arrival = window.start + TimeDelta::minutes(i64::from(offset));
            PatientRecord::from_instant(first_id + i, triage, arrival)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ShiftTimes;
    use chrono::NaiveDate;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn departments() -> Vec<DepartmentInfo> {
        vec![
            DepartmentInfo::new("Emergency Department", 50, true)
                .with_staffing(StaffRole::Doctor, 2, 3)
                .with_staffing(StaffRole::RegisteredNurse, 4, 4),
            DepartmentInfo::new("Kitchen", 10, false).with_staffing(StaffRole::Cook, 1, 2),
        ]
    }

    #[test]
    fn test_role_counter_ids() {
        let mut counter = RoleCounter::new();
        assert_eq!(counter.next_id(StaffRole::Doctor), "MD7001");
        assert_eq!(counter.next_id(StaffRole::Doctor), "MD7002");
        assert_eq!(counter.next_id(StaffRole::RadiologyTechnician), "RDT7001");
        assert_eq!(counter.issued(StaffRole::Doctor), 2);
        assert_eq!(counter.issued(StaffRole::Cook), 0);
    }

    #[test]
    fn test_counters_are_per_run() {
        let mut a = RoleCounter::new();
        let mut b = RoleCounter::new();
        a.next_id(StaffRole::Doctor);
        assert_eq!(b.next_id(StaffRole::Doctor), "MD7001");
    }

    #[test]
    fn test_roster_headcounts_and_shifts() {
        let shifts = vec!["Day".to_string(), "Night".to_string()];
        let mut rng = SmallRng::seed_from_u64(3);
        let roster =
            generate_roster(&departments(), &shifts, 1, &mut RoleCounter::new(), &mut rng).unwrap();

        assert_eq!(roster.departments.len(), 2);
        assert_eq!(roster.departments[1].id, 2);

        let doctors = roster.staff.iter().filter(|s| s.role == StaffRole::Doctor).count();
        assert!((2..=3).contains(&doctors));
        let nurses = roster
            .staff
            .iter()
            .filter(|s| s.role == StaffRole::RegisteredNurse)
            .count();
        assert_eq!(nurses, 4);

        for s in &roster.staff {
            if s.department_id == 1 {
                assert!(shifts.contains(&s.shift));
            } else {
                assert_eq!(s.shift, NON_CLINICAL_SHIFT);
            }
        }
    }

    #[test]
    fn test_roster_department_offset() {
        let shifts = vec!["Day".to_string()];
        let mut counter = RoleCounter::new();
        let mut rng = SmallRng::seed_from_u64(8);
        let first = generate_roster(&departments(), &shifts, 1, &mut counter, &mut rng).unwrap();
        let second = generate_roster(&departments(), &shifts, 3, &mut counter, &mut rng).unwrap();

        let ids: Vec<u32> = second.departments.iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![3, 4]);
        assert!(second.staff.iter().all(|s| s.department_id >= 3));
        assert!(second
            .staff
            .iter()
            .all(|s| first.staff.iter().all(|f| f.id != s.id)));
    }

    #[test]
    fn test_roster_unknown_role() {
        let mut dept = DepartmentInfo::new("Surgery", 10, true);
        dept.staffing.insert("Surgeon".into(), [1, 1]);
        let result = generate_roster(
            &[dept],
            &["Day".to_string()],
            1,
            &mut RoleCounter::new(),
            &mut SmallRng::seed_from_u64(0),
        );
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[test]
    fn test_patients_within_window() {
        let date = NaiveDate::from_ymd_opt(2025, 2, 13).unwrap();
        let window = ShiftWindow::from_times("Night", date, &ShiftTimes::night()).unwrap();
        let patients = generate_patients(100, 1, &window, &mut SmallRng::seed_from_u64(5));

        assert_eq!(patients.len(), 100);
        assert_eq!(patients[0].id, 1);
        assert_eq!(patients[99].id, 100);
        for rec in &patients {
            let p = rec.parse().unwrap();
            assert!(window.contains(p.arrival));
            assert!((1..=5).contains(&p.triage_level.value()));
        }
    }
}
