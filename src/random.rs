//! Injected randomness.
//!
//! The scheduler never reaches for a global generator. Every draw goes
//! through a [`RandomSource`] supplied by the caller, so a fixed seed
//! reproduces an identical appointment sequence.
//!
//! Any [`rand::Rng`] is a `RandomSource`:
//!
//! ```
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use u_shift::random::RandomSource;
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let d = rng.uniform_int(15, 45);
//! assert!((15..=45).contains(&d));
//! assert!(rng.uniform_unit() < 1.0);
//! ```

use rand::Rng;

/// Source of the two draws the simulation needs.
pub trait RandomSource {
    /// Uniform float in `[0, 1)`.
    fn uniform_unit(&mut self) -> f64;

    /// Uniform integer in `[lo, hi]` (inclusive). Requires `lo <= hi`.
    fn uniform_int(&mut self, lo: u32, hi: u32) -> u32;
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn uniform_unit(&mut self) -> f64 {
        self.random::<f64>()
    }

    fn uniform_int(&mut self, lo: u32, hi: u32) -> u32 {
        self.random_range(lo..=hi)
    }
}
