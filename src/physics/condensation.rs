//! Condensation efficiency of the glass cover

use serde::{Deserialize, Serialize};

use super::traits::CondensationModel;
use crate::error::InvalidConfigError;

/// Share of the evaporated vapor recovered as distillate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CondensationEfficiency {
    /// Constant efficiency in `(0, 1]`
    Fixed { efficiency: f64 },

    /// Logistic response to glass temperature, clipped to `[min, max]`
    ///
    /// ```text
    /// η(T) = scale / (1 + exp(−(T − midpoint_c) / width_c))    [%]
    /// ```
    ///
    /// Defaults reproduce the 75–90 % band reported by Omara et al.
    GlassTemperature {
        scale: f64,
        midpoint_c: f64,
        width_c: f64,
        min: f64,
        max: f64,
    },
}

impl Default for CondensationEfficiency {
    fn default() -> Self {
        Self::GlassTemperature {
            scale: 0.825,
            midpoint_c: 25.0,
            width_c: 2.0,
            min: 0.75,
            max: 0.90,
        }
    }
}

impl CondensationEfficiency {
    pub fn fixed(efficiency: f64) -> Self {
        Self::Fixed { efficiency }
    }

    pub fn validate(&self) -> Result<(), InvalidConfigError> {
        match *self {
            Self::Fixed { efficiency } => check_fraction("condensation.efficiency", efficiency),
            Self::GlassTemperature { scale, width_c, min, max, .. } => {
                if !(scale > 0.0 && scale.is_finite()) {
                    return Err(InvalidConfigError::non_positive("condensation.scale", scale));
                }
                if !(width_c > 0.0 && width_c.is_finite()) {
                    return Err(InvalidConfigError::non_positive("condensation.width_c", width_c));
                }
                check_fraction("condensation.min", min)?;
                check_fraction("condensation.max", max)?;
                if min > max {
                    return Err(InvalidConfigError::out_of_range("condensation.min", min, 0.0, max));
                }
                Ok(())
            }
        }
    }
}

fn check_fraction(parameter: &'static str, value: f64) -> Result<(), InvalidConfigError> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(InvalidConfigError::out_of_range(parameter, value, 0.0, 1.0))
    }
}

impl CondensationModel for CondensationEfficiency {
    fn efficiency(&self, glass_temp_c: f64) -> f64 {
        match *self {
            Self::Fixed { efficiency } => efficiency,
            Self::GlassTemperature { scale, midpoint_c, width_c, min, max } => {
                let raw = scale / (1.0 + (-(glass_temp_c - midpoint_c) / width_c).exp());
                // NaN input falls back to the lower bound
                if raw.is_nan() { min } else { raw.clamp(min, max) }
            }
        }
    }

    fn name(&self) -> &str {
        match self {
            Self::Fixed { .. } => "Fixed condensation",
            Self::GlassTemperature { .. } => "Glass-temperature condensation",
        }
    }
}

// =================================================================================================
// Tests
// =================================================================================================
