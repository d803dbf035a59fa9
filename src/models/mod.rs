//! Hospital shift domain models.
//!
//! Provides the data types exchanged between the scheduling engine and its
//! collaborators (generation, storage, reporting).
//!
//! # Domain Mappings
//!
//! | u-shift | Scheduling theory | Original record |
//! |---------|-------------------|-----------------|
//! | PatientRecord / Patient | Job with release time | patients row |
//! | EligibleStaff | Machine | clinical staff on shift |
//! | Appointment | Assignment | appointments row |
//! | ShiftWindow | Planning horizon | shift start/end |
//!
//! # Time Model
//! Instants are `chrono::NaiveDateTime` with minute precision; durations are
//! whole minutes. Times carry no timezone: a shift window is anchored to one
//! calendar day chosen by the caller.

mod appointment;
mod patient;
mod policy;
mod shift;
mod staff;

pub use appointment::{Appointment, AppointmentStatus};
pub use patient::{Patient, PatientRecord, TriageLevel, ARRIVAL_FORMAT};
pub use policy::{CancellationRate, DurationRange, SchedulingPolicy};
pub use shift::{parse_time_of_day, ShiftTimes, ShiftWindow};
pub use staff::{Department, EligibleStaff, StaffMember, StaffRole};
