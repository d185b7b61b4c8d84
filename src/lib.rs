//! solar-still: Single-Basin Solar Still Simulator
//!
//! Hour-by-hour mass and energy balance of a passive solar still: a shallow
//! basin of saline water under a sloped glass cover. Sunlight heats the water,
//! vapour condenses on the cooler glass and runs off as fresh water, and the
//! salt stays behind.
//!
//! # Architecture
//!
//! solar-still is built on two core principles:
//!
//! 1. **Separation of Physics and Stepping**
//!    - Strategy traits describe the environment (sun, temperatures, salinity, condensation)
//!    - The simulator owns the recurrence and its clamps
//!
//! 2. **Plain, Reproducible Data**
//!    - A run is a pure function of its configuration (seed included)
//!    - The trace is an ordered list of hourly records
//!
//! # Quick Start
//!
//! ```rust
//! use solar_still::prelude::*;
//!
//! // 1. Configure the still: 10 L of seawater over one day
//! let config = SimulationConfig::default()
//!     .with_water(10.0, 35.0)
//!     .with_horizon(24);
//!
//! // 2. Run with the default strategies
//! let trace = BasinSimulator::default().run(&config).unwrap();
//!
//! // 3. Access results
//! assert_eq!(trace.len(), 24);
//! let summary = TraceSummary::from_trace(&trace, config.max_salt_concentration).unwrap();
//! assert!(summary.total_fresh_water > 0.0);
//! println!("{}", render_summary(&summary));
//! ```
//!
//! # Modules
//!
//! - [`config`]: Run configuration and TOML files
//! - [`error`]: Error types
//! - [`physics`]: Environment strategies (equations)
//! - [`simulator`]: Hourly stepping, traces, summaries, sweeps
//! - [`output`]: Text report, charts and CSV export

pub mod error;
pub mod config;
pub mod physics;
pub mod simulator;
pub mod output;

pub mod prelude {
    //! Convenient imports for common usage
    //!
    //! ```rust
    //! use solar_still::prelude::*;
    //! ```
    pub use crate::config::{BrineDischarge,
                            JitterConfig,
                            SimulationConfig,
                            StillConfig};
    pub use crate::error::{ConfigFileError,
                           InvalidConfigError};
    pub use crate::physics::{CondensationEfficiency,
                             LinearThermal,
                             ModelConfig,
                             SalinityCurve,
                             SolarProfile};
    pub use crate::simulator::{BasinSimulator,
                               HourRecord,
                               SimulationTrace,
                               TraceQuantity,
                               TraceSummary};
    pub use crate::output::render_summary;
}
