//! Visualization of simulation traces
//!
//! This module renders traces to PNG or SVG images using the `plotters` library.
//!
//! # Organization
//!
//! - **config**: Shared plot configuration (`PlotConfig`)
//! - **charts**: Time-series charts against the hour of simulation
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use solar_still::output::visualization::{plot_dashboard, plot_series, PlotConfig};
//! use solar_still::simulator::TraceQuantity;
//!
//! let trace = BasinSimulator::default().run(&config)?;
//!
//! // Everything at once
//! plot_dashboard(&trace, "dashboard.png", None)?;
//!
//! // One series with a custom title
//! let config = PlotConfig::time_series("Fresh water, 14 July");
//! plot_series(&trace, TraceQuantity::CumulativeFreshWater, "fresh.svg", Some(&config))?;
//! ```
//!
//! # When to Use Which Function
//!
//! | Use Case | Function |
//! |----------|----------|
//! | One quantity vs hour | `plot_series` |
//! | Two quantities with different units | `plot_dual_axis` |
//! | Overview of a whole run | `plot_dashboard` |

pub mod config;
pub mod charts;

pub use config::{IntoOptionalTitle, PlotConfig, NO_TITLE};

pub use charts::{plot_dashboard, plot_dual_axis, plot_series};
