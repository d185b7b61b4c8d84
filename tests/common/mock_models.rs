//! Deterministic stand-ins for the physical strategies
//!
//! With all four mocks plugged in, the hourly evaporation is the constant
//! `k · I · ΔT · A`, so the whole trace can be computed by hand.

use solar_still::physics::{
    BasinTemperatures,
    CondensationModel,
    IrradianceModel,
    SalinityPenalty,
    ThermalModel,
};

// =================================================================================================
// Constant Sun: I(h) = I₀
// =================================================================================================

/// Same irradiance at every hour, day and night
pub struct ConstantSun(pub f64);

impl IrradianceModel for ConstantSun {
    fn irradiance(&self, _hour_of_day: f64) -> f64 {
        self.0
    }

    fn name(&self) -> &str {
        "Constant sun"
    }
}

// =================================================================================================
// Fixed Thermal: temperatures independent of irradiance
// =================================================================================================

pub struct FixedThermal {
    pub water_c: f64,
    pub glass_c: f64,
}

impl FixedThermal {
    pub fn new(water_c: f64, glass_c: f64) -> Self {
        Self { water_c, glass_c }
    }
}

impl ThermalModel for FixedThermal {
    fn temperatures(&self, _irradiance: f64) -> BasinTemperatures {
        BasinTemperatures {
            water_c: self.water_c,
            glass_c: self.glass_c,
        }
    }

    fn condensation_gap(&self) -> f64 {
        0.5 * (self.water_c - self.glass_c)
    }

    fn name(&self) -> &str {
        "Fixed thermal"
    }
}

// =================================================================================================
// No penalty / perfect condensation
// =================================================================================================

/// Salt never slows evaporation (the saturation cutoff still applies)
pub struct NoPenalty;

impl SalinityPenalty for NoPenalty {
    fn factor(&self, _concentration: f64, _max_concentration: f64) -> f64 {
        1.0
    }

    fn name(&self) -> &str {
        "No penalty"
    }
}

/// Every evaporated liter is collected
pub struct PerfectCondensation;

impl CondensationModel for PerfectCondensation {
    fn efficiency(&self, _glass_temp_c: f64) -> f64 {
        1.0
    }

    fn name(&self) -> &str {
        "Perfect condensation"
    }
}
