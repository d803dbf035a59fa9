//! Hospital shift simulation for the U-Engine ecosystem.
//!
//! Synthetic patients arrive over a shift window; a pool of on-shift clinical
//! staff is greedily assigned to them in arrival order, producing
//! appointment records with completed/cancelled outcomes.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `PatientRecord`, `EligibleStaff`,
//!   `Appointment`, `ShiftWindow`, `SchedulingPolicy`
//! - **`scheduler`**: `ResourcePool`, `ShiftScheduler`, `ShiftKpi`
//! - **`random`**: Injected random source for reproducible runs
//! - **`generation`**: Synthetic roster and patient generation
//! - **`store`**: In-memory tables and the status-count report
//! - **`config`**: JSON configuration
//! - **`validation`**: Configuration and roster integrity checks
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use u_shift::config::{DepartmentInfo, SimulationConfig};
//! use u_shift::models::StaffRole;
//! use u_shift::scheduler::ShiftScheduler;
//! use u_shift::store::HospitalStore;
//!
//! let config = SimulationConfig {
//!     departments_info: vec![
//!         DepartmentInfo::new("Cardiology", 30, true).with_staffing(StaffRole::Doctor, 4, 6),
//!     ],
//!     ..SimulationConfig::default()
//! };
//! let date = NaiveDate::from_ymd_opt(2025, 2, 13).unwrap();
//! let window = config.window_for("Day", date, None, None).unwrap();
//! let mut rng = StdRng::seed_from_u64(42);
//!
//! let mut store = HospitalStore::new();
//! store.populate_roster(&config, &mut rng).unwrap();
//! store.populate_patients(config.num_patients, &window, &mut rng);
//!
//! let scheduler = ShiftScheduler::new(config.policy().unwrap());
//! let outcome = scheduler
//!     .run_shift(store.patient_queue(), &store.eligible_staff("Day"), &window, &mut rng)
//!     .unwrap();
//! store.record(outcome.appointments);
//! ```

pub mod config;
pub mod error;
pub mod generation;
pub mod models;
pub mod random;
pub mod scheduler;
pub mod store;
pub mod validation;

pub use error::{Error, Result};
