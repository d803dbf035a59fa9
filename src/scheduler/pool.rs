//! Per-shift resource pool.
//!
//! Holds one "next available" instant per eligible staff member. A pool is
//! built fresh for every shift run and owned by that run alone; Day and
//! Night never share availability state.

use std::collections::HashMap;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::models::EligibleStaff;
use crate::validation::validate_roster;

/// A staff member viewed as a schedulable unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resource {
    /// Staff identifier.
    pub staff_id: String,
    /// Department copied onto appointments.
    pub department_id: u32,
    next_available: NaiveDateTime,
}

impl Resource {
    /// Earliest instant at which this resource can start a new appointment.
    #[inline]
    pub fn next_available(&self) -> NaiveDateTime {
        self.next_available
    }
}

/// Availability state for the staff of one shift.
///
/// Resources keep their input order, which is the tie-break when several
/// are free at the same instant.
#[derive(Debug, Clone, Serialize)]
pub struct ResourcePool {
    resources: Vec<Resource>,
    index: HashMap<String, usize>,
}

impl ResourcePool {
    /// Creates a pool with every resource available at `shift_start`.
    ///
    /// # Errors
    /// - [`Error::EmptyPool`] if `staff` is empty.
    /// - [`Error::Validation`] if a staff ID appears twice.
    pub fn initialize(staff: &[EligibleStaff], shift_start: NaiveDateTime) -> Result<Self> {
        if staff.is_empty() {
            return Err(Error::EmptyPool);
        }
        validate_roster(staff, &[]).map_err(Error::Validation)?;

        let resources: Vec<Resource> = staff
            .iter()
            .map(|s| Resource {
                staff_id: s.staff_id.clone(),
                department_id: s.department_id,
                next_available: shift_start,
            })
            .collect();
        let index = resources
            .iter()
            .enumerate()
            .map(|(i, r)| (r.staff_id.clone(), i))
            .collect();

        Ok(Self { resources, index })
    }

    /// The resource with the smallest `next_available`.
    ///
    /// Ties go to the resource that came first in the input.
    pub fn earliest_available(&self) -> Option<&Resource> {
        self.resources.iter().min_by_key(|r| r.next_available)
    }

    /// Moves a resource's availability to `new_time`.
    ///
    /// Availability never moves backward: an earlier `new_time` leaves the
    /// resource unchanged. Returns `false` for an unknown staff ID.
    pub fn advance(&mut self, staff_id: &str, new_time: NaiveDateTime) -> bool {
        match self.index.get(staff_id) {
            Some(&i) => {
                let r = &mut self.resources[i];
                r.next_available = r.next_available.max(new_time);
                true
            }
            None => false,
        }
    }

    /// Availability of one resource.
    pub fn next_available(&self, staff_id: &str) -> Option<NaiveDateTime> {
        self.index
            .get(staff_id)
            .map(|&i| self.resources[i].next_available)
    }

    /// Resources in input order.
    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    /// Number of resources.
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Whether the pool has no resources.
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeDelta};

    fn t(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 2, 13)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn staff(ids: &[&str]) -> Vec<EligibleStaff> {
        ids.iter().map(|id| EligibleStaff::new(*id, 1)).collect()
    }

    #[test]
    fn test_initialize_sets_shift_start() {
        let pool = ResourcePool::initialize(&staff(&["S1", "S2"]), t(7, 0)).unwrap();
        assert_eq!(pool.len(), 2);
        assert!(pool.resources().iter().all(|r| r.next_available() == t(7, 0)));
    }

    #[test]
    fn test_empty_pool() {
        assert!(matches!(
            ResourcePool::initialize(&[], t(7, 0)),
            Err(Error::EmptyPool)
        ));
    }

    #[test]
    fn test_duplicate_staff_rejected() {
        assert!(matches!(
            ResourcePool::initialize(&staff(&["S1", "S1"]), t(7, 0)),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn test_tie_break_is_input_order() {
        let pool = ResourcePool::initialize(&staff(&["S2", "S1", "S3"]), t(7, 0)).unwrap();
        assert_eq!(pool.earliest_available().unwrap().staff_id, "S2");
    }

    #[test]
    fn test_earliest_after_advance() {
        let mut pool = ResourcePool::initialize(&staff(&["S1", "S2"]), t(7, 0)).unwrap();
        assert!(pool.advance("S1", t(7, 30)));
        assert_eq!(pool.earliest_available().unwrap().staff_id, "S2");
        assert!(pool.advance("S2", t(8, 0)));
        assert_eq!(pool.earliest_available().unwrap().staff_id, "S1");
    }

    #[test]
    fn test_advance_never_moves_backward() {
        let mut pool = ResourcePool::initialize(&staff(&["S1"]), t(7, 0)).unwrap();
        pool.advance("S1", t(9, 0));
        pool.advance("S1", t(8, 0));
        assert_eq!(pool.next_available("S1"), Some(t(9, 0)));
        pool.advance("S1", t(9, 0) + TimeDelta::minutes(1));
        assert_eq!(pool.next_available("S1"), Some(t(9, 1)));
    }

    #[test]
    fn test_advance_unknown() {
        let mut pool = ResourcePool::initialize(&staff(&["S1"]), t(7, 0)).unwrap();
        assert!(!pool.advance("S9", t(8, 0)));
        assert_eq!(pool.next_available("S9"), None);
    }
}
