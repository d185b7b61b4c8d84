//! Salinity penalty on evaporation
//!
//! Dissolved salt lowers the vapor pressure of the basin water, so a saltier
//! basin evaporates less under the same sun. The penalty is a multiplicative
//! factor `f(c)` with `f(0) = 1`, `f(c_max) = 0` and `f` decreasing in between.
//!
//! # Available curves
//!
//! | Curve | Formula (x = c / c_max) |
//! |---|---|
//! | `Linear` (default) | `1 − x` |
//! | `Logistic { steepness }` | `(σ(k(½ − x)) − σ(−k/2)) / (σ(k/2) − σ(−k/2))` |
//! | `Custom` | user closure, clamped to `[0, 1]` |
//!
//! The linear form is the default because it is the only one with a published
//! coefficient for single-basin stills (Omara-style `1 − S` scaling).

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::traits::SalinityPenalty;
use crate::error::InvalidConfigError;

/// Evaporation penalty as a function of relative salinity
#[derive(Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SalinityCurve {
    /// `1 − c / c_max`
    #[default]
    Linear,

    /// Normalised logistic drop centred on `c_max / 2`
    Logistic { steepness: f64 },

    /// User-defined curve of `(concentration, max_concentration)`
    #[serde(skip)]
    Custom(Arc<dyn Fn(f64, f64) -> f64 + Send + Sync>),
}

impl Clone for SalinityCurve {
    fn clone(&self) -> Self {
        match self {
            Self::Linear => Self::Linear,
            Self::Logistic { steepness } => Self::Logistic { steepness: *steepness },
            Self::Custom(f) => Self::Custom(Arc::clone(f)),
        }
    }
}

impl std::fmt::Debug for SalinityCurve {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Linear => f.debug_struct("Linear").finish(),
            Self::Logistic { steepness } => f
                .debug_struct("Logistic")
                .field("steepness", steepness)
                .finish(),
            Self::Custom(_) => f
                .debug_struct("Custom")
                .field("function", &"<user-defined>")
                .finish(),
        }
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

impl SalinityCurve {
    pub fn logistic(steepness: f64) -> Self {
        Self::Logistic { steepness }
    }

    pub fn custom(curve: impl Fn(f64, f64) -> f64 + Send + Sync + 'static) -> Self {
        Self::Custom(Arc::new(curve))
    }

    pub fn validate(&self) -> Result<(), InvalidConfigError> {
        match self {
            Self::Logistic { steepness } if !(*steepness > 0.0 && steepness.is_finite()) => Err(
                InvalidConfigError::non_positive("salinity.steepness", *steepness),
            ),
            _ => Ok(()),
        }
    }
}

impl SalinityPenalty for SalinityCurve {
    fn factor(&self, concentration: f64, max_concentration: f64) -> f64 {
        if !(max_concentration > 0.0) || concentration >= max_concentration {
            return 0.0;
        }
        let x = (concentration / max_concentration).max(0.0);

        let value = match self {
            Self::Linear => 1.0 - x,
            Self::Logistic { steepness } => {
                let k = *steepness;
                let top = sigmoid(0.5 * k);
                let bottom = sigmoid(-0.5 * k);
                (sigmoid(k * (0.5 - x)) - bottom) / (top - bottom)
            }
            Self::Custom(f) => f(concentration, max_concentration),
        };

        if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) }
    }

    fn name(&self) -> &str {
        match self {
            Self::Linear => "Linear salinity penalty",
            Self::Logistic { .. } => "Logistic salinity penalty",
            Self::Custom(_) => "Custom salinity penalty",
        }
    }
}

// =================================================================================================
// Tests
// =================================================================================================
