//! Basin state and the hourly mass balance

use crate::config::SimulationConfig;
use crate::physics::BasinTemperatures;

/// State of the basin at the end of an hour
///
/// One instance is created per run and replaced by [`SimulationState::advance`]
/// at every step. Nothing is shared between runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationState {
    /// Last hour applied to this state
    ///
    /// The initial condition also carries 0, so it shares its `hour` with the
    /// state reached after hour 0. Use
    /// [`SimulationTrace::initial_state`](super::SimulationTrace::initial_state)
    /// rather than this field to tell them apart.
    pub hour: usize,

    /// Saline water left in the basin (L), never negative
    pub saline_volume_liters: f64,

    /// Dissolved salt (g/L), capped at the saturation cutoff
    pub salt_concentration: f64,

    /// Distillate collected so far (L)
    pub cumulative_fresh_water_liters: f64,

    /// Water temperature (°C)
    pub water_temp_c: f64,

    /// Glass temperature (°C)
    pub glass_temp_c: f64,
}

/// Volumes leaving the basin during one hour
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HourFluxes {
    pub hour: usize,
    pub temperatures: BasinTemperatures,

    /// Water evaporated and collected (L)
    pub evaporation: f64,

    /// Brine removed (L)
    pub discharge: f64,
}

impl SimulationState {
    /// Initial condition of a run
    ///
    /// The starting concentration is clamped to the saturation cutoff.
    pub fn initial(config: &SimulationConfig, temperatures: BasinTemperatures) -> Self {
        Self {
            hour: 0,
            saline_volume_liters: config.initial_volume_liters,
            salt_concentration: config
                .initial_salt_concentration
                .min(config.max_salt_concentration),
            cumulative_fresh_water_liters: 0.0,
            water_temp_c: temperatures.water_c,
            glass_temp_c: temperatures.glass_c,
        }
    }

    /// Salt held in the basin (g)
    pub fn salt_mass_grams(&self) -> f64 {
        self.salt_concentration * self.saline_volume_liters
    }

    /// Whether no saline water is left
    pub fn is_dry(&self) -> bool {
        self.saline_volume_liters <= 0.0
    }

    /// Apply one hour of evaporation and discharge
    ///
    /// ```text
    /// V' = max(V − e − d, 0)
    /// F' = F + e
    /// c' = min(c · (V − d) / V', c_max)    if V' > 0
    /// c' = c                               otherwise
    /// ```
    ///
    /// Discharged brine leaves at the current concentration, so only the
    /// evaporated water concentrates the salt that remains.
    pub fn advance(&self, fluxes: &HourFluxes, max_concentration: f64) -> Self {
        let volume = self.saline_volume_liters;
        let new_volume = (volume - fluxes.evaporation - fluxes.discharge).max(0.0);

        let salt_concentration = if new_volume > 0.0 {
            let retained = (volume - fluxes.discharge).max(0.0);
            (self.salt_concentration * (retained / new_volume)).min(max_concentration)
        } else {
            self.salt_concentration
        };

        Self {
            hour: fluxes.hour,
            saline_volume_liters: new_volume,
            salt_concentration,
            cumulative_fresh_water_liters: self.cumulative_fresh_water_liters + fluxes.evaporation,
            water_temp_c: fluxes.temperatures.water_c,
            glass_temp_c: fluxes.temperatures.glass_c,
        }
    }
}

// =================================================================================================
// Tests
// =================================================================================================
