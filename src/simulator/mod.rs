//! Hourly basin simulation
//!
//! This module turns a [`SimulationConfig`](crate::config::SimulationConfig)
//! into a [`SimulationTrace`] by applying the physics strategies one hour at a
//! time.
//!
//! # Recurrence
//!
//! For each hour `h` of the horizon:
//!
//! | Step | Quantity | Rule |
//! |---|---|---|
//! | 1 | irradiance `I` | profile at `h mod 24`, noise in daylight only, `I ≥ 0` |
//! | 2 | temperatures | thermal model, glass kept below water |
//! | 3 | efficiency `η` | condensation model at glass temperature |
//! | 4 | evaporation `e` | `k · I · ΔT · A · penalty(c) · η`, clamped to `[0, V]` |
//! | 5 | discharge `d` | `min(f · V, rate, V − e)` when enabled |
//! | 6 | energy | `I · A · (1 − ε)` absorbed, a fraction of it lost |
//! | 7 | state | `V' = max(V − e − d, 0)`, `F' = F + e`, `c' = c · (V − d) / V'` |
//!
//! Evaporation is exactly zero once the basin is dry or the concentration has
//! reached the saturation cutoff.
//!
//! # Module Organization
//!
//! - `state`: [`SimulationState`] and the pure mass balance
//! - `trace`: [`HourRecord`], [`SimulationTrace`], [`TraceQuantity`]
//! - `summary`: [`TraceSummary`]
//! - `basin`: [`BasinSimulator`], the stepper
//! - [`sweep`]: independent runs over many configurations
//!
//! # Example
//!
//! ```rust
//! use solar_still::config::SimulationConfig;
//! use solar_still::simulator::{BasinSimulator, TraceSummary};
//!
//! let config = SimulationConfig::default();
//! let trace = BasinSimulator::default().run(&config).unwrap();
//! let summary = TraceSummary::from_trace(&trace, config.max_salt_concentration).unwrap();
//!
//! assert!(summary.total_fresh_water > 0.0);
//! assert!(summary.total_fresh_water < config.initial_volume_liters);
//! assert!((10..=14).contains(&summary.peak_hour));
//! ```

// =================================================================================================
// Module Declarations
// =================================================================================================
mod state;
mod trace;
mod summary;
mod noise;
mod basin;
pub mod sweep;

// =================================================================================================
// Parallel Execution Threshold
// =================================================================================================
//
// Sweeps with fewer points than the threshold stay on the calling thread.
// The value is a performance hint, not a synchronisation point, so Relaxed
// ordering is enough.
// =================================================================================================

use std::sync::atomic::{AtomicUsize, Ordering};

/// Default number of sweep points above which Rayon is used
///
/// A 24-hour run is a few microseconds, so a handful of runs per thread is
/// needed before dispatch pays off.
const DEFAULT_PARALLEL_THRESHOLD: usize = 8;

static PARALLEL_THRESHOLD: AtomicUsize = AtomicUsize::new(DEFAULT_PARALLEL_THRESHOLD);

/// Current parallel-execution threshold for sweeps
///
/// Only meaningful when the crate is compiled with the `parallel` feature.
///
/// ```rust
/// use solar_still::simulator::parallel_threshold;
///
/// assert!(parallel_threshold() > 0);
/// ```
pub fn parallel_threshold() -> usize {
    PARALLEL_THRESHOLD.load(Ordering::Relaxed)
}

/// Set the parallel-execution threshold
///
/// # Panics
///
/// Panics when `threshold == 0`.
pub fn set_parallel_threshold(threshold: usize) {
    assert!(threshold > 0, "parallel threshold must be at least 1");
    PARALLEL_THRESHOLD.store(threshold, Ordering::Relaxed);
}

#[cfg(test)]
static THRESHOLD_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

/// RAII guard that sets the threshold and restores the previous value on drop
///
/// Holds a lock for its lifetime so tests changing the threshold never overlap.
#[cfg(test)]
pub(crate) struct ThresholdGuard {
    previous: usize,
    _lock: std::sync::MutexGuard<'static, ()>,
}

#[cfg(test)]
impl ThresholdGuard {
    pub(crate) fn save(new_value: usize) -> Self {
        let lock = THRESHOLD_LOCK
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let previous = parallel_threshold();
        set_parallel_threshold(new_value);
        Self {
            previous,
            _lock: lock,
        }
    }
}

#[cfg(test)]
impl Drop for ThresholdGuard {
    fn drop(&mut self) {
        // Runs before the lock field is released
        PARALLEL_THRESHOLD.store(self.previous, Ordering::Relaxed);
    }
}

// =================================================================================================
// Public Re-exports
// =================================================================================================

pub use basin::BasinSimulator;
pub use state::{HourFluxes, SimulationState};
pub use summary::TraceSummary;
pub use sweep::SweepPoint;
pub use trace::{EnergyBalance, HourRecord, SimulationTrace, TraceQuantity};

// =================================================================================================
// Tests
// =================================================================================================
