//! Basin physics
//!
//! This module provides the physical relations of a single-basin solar still
//! as interchangeable strategies. The simulator provides the hourly
//! recurrence; the physics provides the curves it evaluates at each step.
//!
//! # Core Concepts
//!
//! - **Irradiance** ([`IrradianceModel`]): solar input over the day
//! - **Thermal response** ([`ThermalModel`]): water and glass temperatures
//! - **Salinity penalty** ([`SalinityPenalty`]): evaporation suppression by salt
//! - **Condensation** ([`CondensationModel`]): share of vapor recovered
//!
//! # Architecture
//!
//! Physics is **separate from the stepping loop**:
//! - A strategy answers "how much?" for one instant
//! - The simulator decides "what happens to the basin?" over the horizon
//!
//! This separation allows:
//! - The same simulator for different still designs
//! - Deterministic stand-ins in tests (any closure or mock struct will do)
//!
//! # Example
//!
//! ```rust
//! use solar_still::physics::{IrradianceModel, SalinityPenalty, SalinityCurve, SolarProfile};
//!
//! let sun = SolarProfile::clipped_sine(900.0, 6.0, 18.0);
//! assert_eq!(sun.irradiance(3.0), 0.0);
//!
//! let penalty = SalinityCurve::Linear;
//! assert!((penalty.factor(60.0, 120.0) - 0.5).abs() < 1e-12);
//! ```
//!
//! # Implementing a New Strategy
//!
//! ```rust
//! use solar_still::physics::IrradianceModel;
//!
//! struct OvercastDay;
//!
//! impl IrradianceModel for OvercastDay {
//!     fn irradiance(&self, hour_of_day: f64) -> f64 {
//!         if (8.0..16.0).contains(&hour_of_day) { 250.0 } else { 0.0 }
//!     }
//!
//!     fn name(&self) -> &str {
//!         "Overcast"
//!     }
//! }
//! ```

pub mod traits;
pub mod solar;
pub mod thermal;
pub mod salinity;
pub mod condensation;

pub use traits::{
    BasinTemperatures,
    CondensationModel,
    IrradianceModel,
    SalinityPenalty,
    ThermalModel,
};
pub use solar::SolarProfile;
pub use thermal::LinearThermal;
pub use salinity::SalinityCurve;
pub use condensation::CondensationEfficiency;

use serde::{Deserialize, Serialize};

use crate::error::InvalidConfigError;

/// Serializable choice of built-in strategies
///
/// Used by configuration files and by
/// [`BasinSimulator::from_model`](crate::simulator::BasinSimulator::from_model).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub solar: SolarProfile,
    pub thermal: LinearThermal,
    pub salinity: SalinityCurve,
    pub condensation: CondensationEfficiency,
}

impl ModelConfig {
    /// Validate every strategy
    pub fn validate(&self) -> Result<(), InvalidConfigError> {
        self.solar.validate()?;
        self.thermal.validate()?;
        self.salinity.validate()?;
        self.condensation.validate()
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_model_is_valid() {
        assert!(ModelConfig::default().validate().is_ok());
    }

    #[test]
    fn test_model_from_toml() {
        let model: ModelConfig = toml::from_str(
            r#"
            [solar]
            kind = "dark"

            [salinity]
            kind = "logistic"
            steepness = 6.0

            [condensation]
            kind = "fixed"
            efficiency = 0.85
            "#,
        )
        .unwrap();

        assert!(matches!(model.solar, SolarProfile::Dark));
        assert!(matches!(model.salinity, SalinityCurve::Logistic { steepness } if steepness == 6.0));
        assert_eq!(model.condensation, CondensationEfficiency::fixed(0.85));
        assert_eq!(model.thermal, LinearThermal::default());
    }

    #[test]
    fn test_invalid_strategy_rejected() {
        let model = ModelConfig {
            thermal: LinearThermal::new(20.0, 0.015, -1.0),
            ..Default::default()
        };
        assert!(model.validate().is_err());
    }
}
