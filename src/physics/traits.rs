//! Strategy traits for the basin physics
//!
//! The simulator never hardcodes a closed form. Each physical relation is a
//! trait object it calls once per hour:
//!
//! - [`IrradianceModel`]: solar input as a function of hour of day
//! - [`ThermalModel`]: water and glass temperature as a function of irradiance
//! - [`SalinityPenalty`]: multiplicative evaporation penalty in `[0, 1]`
//! - [`CondensationModel`]: share of vapor recovered on the glass
//!
//! All traits require `Send + Sync` so a single simulator can serve a parallel
//! parameter sweep.

/// Solar irradiance over a day
pub trait IrradianceModel: Send + Sync {
    /// Irradiance (W/m²) at `hour_of_day` in `[0, 24)`
    ///
    /// Implementations must return a non-negative value and be unimodal over
    /// the day, peaking inside the daylight window.
    fn irradiance(&self, hour_of_day: f64) -> f64;

    /// Name used in logs and reports
    fn name(&self) -> &str;
}

/// Water and glass cover temperatures
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BasinTemperatures {
    /// Basin water temperature (°C)
    pub water_c: f64,

    /// Condensing glass temperature (°C), below `water_c`
    pub glass_c: f64,
}

impl BasinTemperatures {
    /// Driving temperature difference of condensation (K)
    pub fn differential(&self) -> f64 {
        self.water_c - self.glass_c
    }
}

/// Thermal response of the still to irradiance
pub trait ThermalModel: Send + Sync {
    /// Temperatures reached under `irradiance` (W/m²)
    ///
    /// Both temperatures must increase with irradiance and the glass must stay
    /// strictly cooler than the water.
    fn temperatures(&self, irradiance: f64) -> BasinTemperatures;

    /// Smallest water/glass difference (K) that noise may leave
    fn condensation_gap(&self) -> f64;

    fn name(&self) -> &str;
}

/// Reduction of evaporation by dissolved salt
pub trait SalinityPenalty: Send + Sync {
    /// Penalty factor for `concentration` given the saturation cutoff `max_concentration`
    ///
    /// Must be `1` at zero salinity, `0` at saturation and decrease monotonically in between.
    fn factor(&self, concentration: f64, max_concentration: f64) -> f64;

    fn name(&self) -> &str;
}

/// Fraction of evaporated vapor collected as fresh water
pub trait CondensationModel: Send + Sync {
    /// Efficiency in `(0, 1]` for a glass cover at `glass_temp_c`
    fn efficiency(&self, glass_temp_c: f64) -> f64;

    fn name(&self) -> &str;
}

// =================================================================================================
// Tests
// =================================================================================================
