//! Shift scheduling engine and KPI evaluation.
//!
//! # Algorithm
//!
//! `ShiftScheduler` binds each patient, in arrival order, to whichever
//! `ResourcePool` entry becomes free soonest. It is greedy and ignores
//! department and triage: first come, first served.
//!
//! # KPI
//!
//! `ShiftKpi` summarizes a run: status counts, waits, and staff utilization.

mod kpi;
mod pool;
mod shift;

pub use kpi::ShiftKpi;
pub use pool::{Resource, ResourcePool};
pub use shift::{arrival_queue, ShiftOutcome, ShiftScheduler};
