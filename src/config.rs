//! Simulation configuration
//!
//! [`SimulationConfig`] is the immutable input of a run. It groups the basin
//! geometry, the starting water body, the empirical coefficients and the
//! optional brine discharge and jitter sub-configurations.
//!
//! Every numeric coefficient has a documented valid range (see the `*_BOUNDS`
//! constants). [`SimulationConfig::validate`] enforces them before stepping.
//!
//! Configurations can also be read from TOML:
//!
//! ```toml
//! [simulation]
//! initial_volume_liters = 10.0
//! initial_salt_concentration = 35.0
//! horizon_hours = 24
//!
//! [simulation.jitter]
//! seed = 42
//!
//! [model.solar]
//! kind = "sine_squared"
//! peak_irradiance = 1000.0
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{ConfigFileError, InvalidConfigError};
use crate::physics::ModelConfig;

// =================================================================================================
// Documented Ranges
// =================================================================================================

/// Closed interval of admissible values for a coefficient
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    /// Whether `value` lies in `[min, max]`
    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Evaporation scale factor k, in L/h per (W/m² · K · m²)
///
/// 0.00025 reproduces the Omara single-slope still (about 2.5 L/m²/day).
pub const EVAPORATION_COEFFICIENT_BOUNDS: Bounds = Bounds { min: 1e-7, max: 0.01 };

/// Fraction of absorbed energy lost to the surroundings
pub const ENERGY_LOSS_FRACTION_BOUNDS: Bounds = Bounds { min: 0.0, max: 1.0 };

/// Glass cover emissivity (exclusive of both ends)
pub const EMISSIVITY_BOUNDS: Bounds = Bounds { min: 0.0, max: 1.0 };

/// Largest share of the basin that may be discharged as brine in one hour
pub const DISCHARGE_FRACTION_BOUNDS: Bounds = Bounds { min: 0.0, max: 0.10 };

/// Liters per cubic meter
pub const LITERS_PER_M3: f64 = 1000.0;

// =================================================================================================
// Sub-configurations
// =================================================================================================

/// Periodic removal of concentrated brine
///
/// Each hour, `min(max_fraction * V, max_rate_liters_per_hour)` is discharged,
/// never more than what is left after evaporation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrineDischarge {
    /// Fraction of the current volume, in `(0, 0.10]`
    pub max_fraction: f64,

    /// Absolute cap on the hourly discharge (L/h)
    pub max_rate_liters_per_hour: f64,
}

impl Default for BrineDischarge {
    fn default() -> Self {
        Self {
            max_fraction: 0.10,
            max_rate_liters_per_hour: 0.02,
        }
    }
}

impl BrineDischarge {
    /// Volume to discharge from a basin holding `volume` liters, of which
    /// `evaporated` liters already left this hour
    pub fn volume_for(&self, volume: f64, evaporated: f64) -> f64 {
        let available = (volume - evaporated).max(0.0);
        (self.max_fraction * volume)
            .min(self.max_rate_liters_per_hour)
            .min(available)
            .max(0.0)
    }

    fn validate(&self) -> Result<(), InvalidConfigError> {
        if !(self.max_fraction > 0.0) || !DISCHARGE_FRACTION_BOUNDS.contains(self.max_fraction) {
            return Err(InvalidConfigError::out_of_range(
                "discharge.max_fraction",
                self.max_fraction,
                DISCHARGE_FRACTION_BOUNDS.min,
                DISCHARGE_FRACTION_BOUNDS.max,
            ));
        }
        require_positive("discharge.max_rate_liters_per_hour", self.max_rate_liters_per_hour)
    }
}

/// Seeded measurement noise
///
/// Each amplitude `a` draws a uniform perturbation in `[-a, a]`. Two runs with
/// the same seed produce bit-identical traces.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JitterConfig {
    /// Seed of the pseudo-random generator
    pub seed: u64,

    /// Irradiance noise (W/m²), applied during daylight only
    pub solar_w_m2: f64,

    /// Water temperature noise (°C)
    pub water_temp_c: f64,

    /// Glass temperature noise (°C)
    pub glass_temp_c: f64,

    /// Noise on the energy loss fraction
    pub energy_loss_fraction: f64,
}

impl Default for JitterConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            solar_w_m2: 30.0,
            water_temp_c: 0.5,
            glass_temp_c: 0.3,
            energy_loss_fraction: 0.02,
        }
    }
}

impl JitterConfig {
    /// Default amplitudes with a specific seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed,
            ..Default::default()
        }
    }

    fn validate(&self) -> Result<(), InvalidConfigError> {
        for (parameter, value) in [
            ("jitter.solar_w_m2", self.solar_w_m2),
            ("jitter.water_temp_c", self.water_temp_c),
            ("jitter.glass_temp_c", self.glass_temp_c),
            ("jitter.energy_loss_fraction", self.energy_loss_fraction),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(InvalidConfigError::out_of_range(parameter, value, 0.0, f64::MAX));
            }
        }
        Ok(())
    }
}

// =================================================================================================
// Simulation Configuration
// =================================================================================================

/// Immutable input of [`BasinSimulator::run`](crate::simulator::BasinSimulator::run)
///
/// Defaults describe a 1 m² single-slope still with 2 cm of seawater
/// (10 L at 35 g/L) over one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Saline water loaded at hour 0 (L)
    pub initial_volume_liters: f64,

    /// Salt concentration at hour 0 (g/L)
    pub initial_salt_concentration: f64,

    /// Saturation cutoff (g/L): no evaporation at or above this value
    pub max_salt_concentration: f64,

    /// Basin surface area (m²)
    pub surface_area_m2: f64,

    /// Basin water depth (m), bounds the initial volume
    pub water_depth_m: f64,

    /// Glass cover emissivity, in `(0, 1)`
    pub glass_emissivity: f64,

    /// Number of hourly steps
    pub horizon_hours: usize,

    /// Evaporation scale factor, see [`EVAPORATION_COEFFICIENT_BOUNDS`]
    pub evaporation_coefficient: f64,

    /// Share of absorbed energy that is lost, see [`ENERGY_LOSS_FRACTION_BOUNDS`]
    pub energy_loss_fraction: f64,

    /// Record absorbed/lost energy in the trace
    pub track_energy: bool,

    /// Optional brine discharge
    pub discharge: Option<BrineDischarge>,

    /// Optional seeded noise
    pub jitter: Option<JitterConfig>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            initial_volume_liters: 10.0,
            initial_salt_concentration: 35.0,
            max_salt_concentration: 120.0,
            surface_area_m2: 1.0,
            water_depth_m: 0.02,
            glass_emissivity: 0.88,
            horizon_hours: 24,
            evaporation_coefficient: 0.00025,
            energy_loss_fraction: 0.15,
            track_energy: true,
            discharge: None,
            jitter: None,
        }
    }
}

impl SimulationConfig {
    /// Builder pattern: set the starting water body
    pub fn with_water(mut self, volume_liters: f64, salt_concentration: f64) -> Self {
        self.initial_volume_liters = volume_liters;
        self.initial_salt_concentration = salt_concentration;
        self
    }

    /// Builder pattern: set the horizon
    pub fn with_horizon(mut self, hours: usize) -> Self {
        self.horizon_hours = hours;
        self
    }

    /// Builder pattern: enable brine discharge
    pub fn with_discharge(mut self, discharge: BrineDischarge) -> Self {
        self.discharge = Some(discharge);
        self
    }

    /// Builder pattern: enable seeded jitter
    pub fn with_jitter(mut self, jitter: JitterConfig) -> Self {
        self.jitter = Some(jitter);
        self
    }

    /// Basin capacity (L)
    pub fn basin_capacity_liters(&self) -> f64 {
        self.surface_area_m2 * self.water_depth_m * LITERS_PER_M3
    }

    /// Whether the initial volume is above the basin capacity
    ///
    /// Not an error: the mass balance does not depend on the depth, so such a
    /// run is only reported.
    pub fn overfills_basin(&self) -> bool {
        self.initial_volume_liters > self.basin_capacity_liters()
    }

    /// Whether the water starts at or above the saturation cutoff
    ///
    /// Such a run is valid and never evaporates.
    pub fn starts_saturated(&self) -> bool {
        self.initial_salt_concentration >= self.max_salt_concentration
    }

    /// Check every parameter against its documented range
    pub fn validate(&self) -> Result<(), InvalidConfigError> {
        require_positive("initial_volume_liters", self.initial_volume_liters)?;
        require_positive("initial_salt_concentration", self.initial_salt_concentration)?;
        require_positive("max_salt_concentration", self.max_salt_concentration)?;
        require_positive("surface_area_m2", self.surface_area_m2)?;
        require_positive("water_depth_m", self.water_depth_m)?;

        if self.horizon_hours == 0 {
            return Err(InvalidConfigError::ZeroHorizon);
        }

        // Emissivity is open on both ends: 0 absorbs everything, 1 absorbs nothing
        if !(self.glass_emissivity > EMISSIVITY_BOUNDS.min && self.glass_emissivity < EMISSIVITY_BOUNDS.max) {
            return Err(InvalidConfigError::out_of_range(
                "glass_emissivity",
                self.glass_emissivity,
                EMISSIVITY_BOUNDS.min,
                EMISSIVITY_BOUNDS.max,
            ));
        }

        require_within(
            "evaporation_coefficient",
            self.evaporation_coefficient,
            EVAPORATION_COEFFICIENT_BOUNDS,
        )?;
        require_within(
            "energy_loss_fraction",
            self.energy_loss_fraction,
            ENERGY_LOSS_FRACTION_BOUNDS,
        )?;

        if let Some(discharge) = &self.discharge {
            discharge.validate()?;
        }
        if let Some(jitter) = &self.jitter {
            jitter.validate()?;
        }

        Ok(())
    }
}

fn require_positive(parameter: &'static str, value: f64) -> Result<(), InvalidConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(InvalidConfigError::non_positive(parameter, value))
    }
}

fn require_within(parameter: &'static str, value: f64, bounds: Bounds) -> Result<(), InvalidConfigError> {
    if bounds.contains(value) {
        Ok(())
    } else {
        Err(InvalidConfigError::out_of_range(parameter, value, bounds.min, bounds.max))
    }
}

// =================================================================================================
// TOML Files
// =================================================================================================

/// Contents of a configuration file: run parameters plus strategy choices
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StillConfig {
    pub simulation: SimulationConfig,
    pub model: ModelConfig,
}

/// Parse a configuration from TOML text and validate both sections
pub fn parse_config(content: &str) -> Result<StillConfig, ConfigFileError> {
    let config: StillConfig = toml::from_str(content)?;
    config.simulation.validate()?;
    config.model.validate()?;
    Ok(config)
}

/// Load and validate a configuration file
pub fn load_config(path: impl AsRef<Path>) -> Result<StillConfig, ConfigFileError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Write a configuration file
pub fn save_config(config: &StillConfig, path: impl AsRef<Path>) -> Result<(), ConfigFileError> {
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================
