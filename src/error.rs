//! Error types
//!
//! Two families of errors exist in this crate:
//!
//! - [`InvalidConfigError`]: a physical parameter is out of range. Raised by
//!   [`SimulationConfig::validate`](crate::config::SimulationConfig::validate)
//!   before the first hour is stepped, so a failed run never yields a partial trace.
//! - [`ConfigFileError`]: a TOML configuration file could not be read or parsed.
//!
//! Numerical hazards inside the hourly loop (empty basin, negative jitter, ...)
//! are clamped where they occur and never surface as errors. Physically odd
//! but well-defined inputs, such as water that starts saturated or a volume
//! above the basin capacity, run normally and are only logged.

use thiserror::Error;

/// Rejected simulation configuration
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidConfigError {
    /// A strictly positive parameter is zero, negative or not finite
    #[error("{parameter} must be positive and finite, got {value}")]
    NonPositive {
        parameter: &'static str,
        value: f64,
    },

    /// A bounded parameter falls outside its documented range
    #[error("{parameter} = {value} is out of bounds [{min}, {max}]")]
    OutOfRange {
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// The horizon must cover at least one hour
    #[error("horizon_hours must be at least 1")]
    ZeroHorizon,
}

impl InvalidConfigError {
    /// Shorthand for [`InvalidConfigError::NonPositive`]
    pub fn non_positive(parameter: &'static str, value: f64) -> Self {
        Self::NonPositive { parameter, value }
    }

    /// Shorthand for [`InvalidConfigError::OutOfRange`]
    pub fn out_of_range(parameter: &'static str, value: f64, min: f64, max: f64) -> Self {
        Self::OutOfRange {
            parameter,
            value,
            min,
            max,
        }
    }
}

/// Failure while loading or saving a TOML configuration file
#[derive(Debug, Error)]
pub enum ConfigFileError {
    /// File system error
    #[error("cannot access configuration file: {0}")]
    Io(#[from] std::io::Error),

    /// TOML syntax or schema error
    #[error("cannot parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// Serialization error
    #[error("cannot serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// The file parsed but describes an invalid simulation
    #[error("invalid configuration: {0}")]
    Invalid(#[from] InvalidConfigError),
}

// =================================================================================================
// Tests
// =================================================================================================
