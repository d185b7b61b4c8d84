//! Diurnal irradiance profiles
//!
//! Defines how solar input on the basin varies with the hour of the day.
//!
//! # Profiles
//!
//! - **SineSquared**: `I(t) = I₀ · sin²(πt/24)`. Zero at midnight, peak at noon, and
//!   smooth at both ends. This is the default.
//! - **ClippedSine**: half sine between sunrise and sunset, zero at night
//! - **Dark**: no sun at all (night-time or shaded basin)
//! - **Custom**: user-defined closure
//!
//! # Example
//!
//! ```rust
//! use solar_still::physics::{IrradianceModel, SolarProfile};
//!
//! let sun = SolarProfile::sine_squared(1000.0);
//! assert!(sun.irradiance(0.0).abs() < 1e-9);
//! assert!((sun.irradiance(12.0) - 1000.0).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::sync::Arc;

use super::traits::IrradianceModel;
use crate::error::InvalidConfigError;

/// Hours in a solar day
pub const HOURS_PER_DAY: f64 = 24.0;

/// Irradiance profile over one day
#[derive(Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SolarProfile {
    /// `peak_irradiance · sin²(π t / 24)`
    SineSquared { peak_irradiance: f64 },

    /// `peak_irradiance · sin(π (t − sunrise) / (sunset − sunrise))` during daylight
    ClippedSine {
        peak_irradiance: f64,
        sunrise: f64,
        sunset: f64,
    },

    /// No irradiance
    Dark,

    /// User-defined profile, clamped to non-negative values
    #[serde(skip)]
    Custom(Arc<dyn Fn(f64) -> f64 + Send + Sync>),
}

impl Clone for SolarProfile {
    fn clone(&self) -> Self {
        match self {
            Self::SineSquared { peak_irradiance } => Self::SineSquared {
                peak_irradiance: *peak_irradiance,
            },
            Self::ClippedSine { peak_irradiance, sunrise, sunset } => Self::ClippedSine {
                peak_irradiance: *peak_irradiance,
                sunrise: *sunrise,
                sunset: *sunset,
            },
            Self::Dark => Self::Dark,
            Self::Custom(f) => Self::Custom(Arc::clone(f)),
        }
    }
}

impl std::fmt::Debug for SolarProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SineSquared { peak_irradiance } => f
                .debug_struct("SineSquared")
                .field("peak_irradiance", peak_irradiance)
                .finish(),
            Self::ClippedSine { peak_irradiance, sunrise, sunset } => f
                .debug_struct("ClippedSine")
                .field("peak_irradiance", peak_irradiance)
                .field("sunrise", sunrise)
                .field("sunset", sunset)
                .finish(),
            Self::Dark => f.debug_struct("Dark").finish(),
            Self::Custom(_) => f
                .debug_struct("Custom")
                .field("function", &"<user-defined>")
                .finish(),
        }
    }
}

impl Default for SolarProfile {
    fn default() -> Self {
        Self::sine_squared(1000.0)
    }
}

impl SolarProfile {
    /// Sine-squared day peaking at noon
    pub fn sine_squared(peak_irradiance: f64) -> Self {
        Self::SineSquared { peak_irradiance }
    }

    /// Half-sine day between `sunrise` and `sunset` (hours)
    pub fn clipped_sine(peak_irradiance: f64, sunrise: f64, sunset: f64) -> Self {
        Self::ClippedSine {
            peak_irradiance,
            sunrise,
            sunset,
        }
    }

    /// User-defined profile
    ///
    /// # Example
    ///
    /// ```rust
    /// use solar_still::physics::{IrradianceModel, SolarProfile};
    ///
    /// let plateau = SolarProfile::custom(|t| if (10.0..14.0).contains(&t) { 800.0 } else { 0.0 });
    /// assert_eq!(plateau.irradiance(11.0), 800.0);
    /// ```
    pub fn custom(profile: impl Fn(f64) -> f64 + Send + Sync + 'static) -> Self {
        Self::Custom(Arc::new(profile))
    }

    /// Check profile parameters
    pub fn validate(&self) -> Result<(), InvalidConfigError> {
        match self {
            Self::SineSquared { peak_irradiance } => check_peak(*peak_irradiance),
            Self::ClippedSine { peak_irradiance, sunrise, sunset } => {
                check_peak(*peak_irradiance)?;
                if !(0.0..HOURS_PER_DAY).contains(sunrise) {
                    return Err(InvalidConfigError::out_of_range(
                        "solar.sunrise",
                        *sunrise,
                        0.0,
                        HOURS_PER_DAY,
                    ));
                }
                if !(*sunset > *sunrise && *sunset <= HOURS_PER_DAY) {
                    return Err(InvalidConfigError::out_of_range(
                        "solar.sunset",
                        *sunset,
                        *sunrise,
                        HOURS_PER_DAY,
                    ));
                }
                Ok(())
            }
            Self::Dark | Self::Custom(_) => Ok(()),
        }
    }
}

fn check_peak(peak: f64) -> Result<(), InvalidConfigError> {
    if peak > 0.0 && peak.is_finite() {
        Ok(())
    } else {
        Err(InvalidConfigError::non_positive("solar.peak_irradiance", peak))
    }
}

impl IrradianceModel for SolarProfile {
    fn irradiance(&self, hour_of_day: f64) -> f64 {
        let value = match self {
            Self::SineSquared { peak_irradiance } => {
                peak_irradiance * (PI * hour_of_day / HOURS_PER_DAY).sin().powi(2)
            }
            Self::ClippedSine { peak_irradiance, sunrise, sunset } => {
                if hour_of_day <= *sunrise || hour_of_day >= *sunset {
                    0.0
                } else {
                    let phase = (hour_of_day - sunrise) / (sunset - sunrise);
                    peak_irradiance * (PI * phase).sin()
                }
            }
            Self::Dark => 0.0,
            Self::Custom(f) => f(hour_of_day),
        };

        // Negative or NaN curves are treated as darkness
        if value > 0.0 { value } else { 0.0 }
    }

    fn name(&self) -> &str {
        match self {
            Self::SineSquared { .. } => "Sine-squared day",
            Self::ClippedSine { .. } => "Clipped sine day",
            Self::Dark => "Dark",
            Self::Custom(_) => "Custom profile",
        }
    }
}

// =================================================================================================
// Tests
// =================================================================================================
