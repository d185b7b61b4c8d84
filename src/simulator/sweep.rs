//! Parameter sweeps
//!
//! Runs are independent, so a sweep evaluates one [`BasinSimulator`] over many
//! configurations. With the `parallel` feature, sweeps of at least
//! [`parallel_threshold()`](super::parallel_threshold) points are dispatched to
//! Rayon. The output order always matches the input order.
//!
//! # Example
//!
//! ```rust
//! use solar_still::config::SimulationConfig;
//! use solar_still::simulator::{sweep, BasinSimulator};
//!
//! let grid = sweep::yield_grid(
//!     &BasinSimulator::default(),
//!     &SimulationConfig::default(),
//!     &[5.0, 10.0, 15.0],
//!     &[35.0, 70.0],
//! )
//! .unwrap();
//!
//! assert_eq!(grid.dim(), (3, 2));
//! ```

use ndarray::Array2;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::basin::BasinSimulator;
#[cfg(feature = "parallel")]
use super::parallel_threshold;
use super::summary::TraceSummary;
use crate::config::SimulationConfig;
use crate::error::InvalidConfigError;

/// Starting water body of one sweep run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepPoint {
    pub initial_volume_liters: f64,
    pub initial_salt_concentration: f64,
}

impl SweepPoint {
    pub fn new(initial_volume_liters: f64, initial_salt_concentration: f64) -> Self {
        Self {
            initial_volume_liters,
            initial_salt_concentration,
        }
    }

    /// `base` with this point's water body
    pub fn apply(&self, base: &SimulationConfig) -> SimulationConfig {
        base.clone()
            .with_water(self.initial_volume_liters, self.initial_salt_concentration)
    }
}

fn summarise(
    simulator: &BasinSimulator,
    config: &SimulationConfig,
) -> Result<TraceSummary, InvalidConfigError> {
    let trace = simulator.run(config)?;
    // A validated config always has a non-empty horizon
    TraceSummary::from_trace(&trace, config.max_salt_concentration).ok_or(InvalidConfigError::ZeroHorizon)
}

/// Run `base` once per point and summarise each run
///
/// Invalid points yield their own error without affecting the others.
pub fn run_sweep(
    simulator: &BasinSimulator,
    base: &SimulationConfig,
    points: &[SweepPoint],
) -> Vec<Result<TraceSummary, InvalidConfigError>> {
    let evaluate = |point: &SweepPoint| summarise(simulator, &point.apply(base));

    #[cfg(feature = "parallel")]
    {
        if points.len() >= parallel_threshold() {
            return points.par_iter().map(evaluate).collect();
        }
    }

    points.iter().map(evaluate).collect()
}

/// Total fresh water (L) for every `(volume, salinity)` pair
///
/// Rows follow `volumes`, columns follow `salinities`. The first invalid pair
/// aborts the whole grid.
pub fn yield_grid(
    simulator: &BasinSimulator,
    base: &SimulationConfig,
    volumes: &[f64],
    salinities: &[f64],
) -> Result<Array2<f64>, InvalidConfigError> {
    let points: Vec<SweepPoint> = volumes
        .iter()
        .flat_map(|&v| salinities.iter().map(move |&s| SweepPoint::new(v, s)))
        .collect();

    let totals = run_sweep(simulator, base, &points)
        .into_iter()
        .map(|summary| summary.map(|s| s.total_fresh_water))
        .collect::<Result<Vec<f64>, _>>()?;

    // Row-major, matching the flat_map order above
    let columns = salinities.len();
    Ok(Array2::from_shape_fn((volumes.len(), columns), |(i, j)| {
        totals[i * columns + j]
    }))
}

// =================================================================================================
// Tests
// =================================================================================================
