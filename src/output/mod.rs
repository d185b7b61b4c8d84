//! Output of simulation results
//!
//! This module turns a trace into something a person or another program reads:
//! - **Report**: plain-text summary for the console
//! - **Visualization**: PNG/SVG charts using plotters
//! - **Export**: CSV data for external analysis
//!
//! # Architecture
//!
//! ```text
//! output/
//! ├── mod.rs
//! ├── report.rs           ← Text summary
//! ├── visualization/      ← Charts
//! │   ├── mod.rs
//! │   ├── config.rs
//! │   └── charts.rs
//! └── export/             ← Data export
//!     ├── mod.rs
//!     └── csv.rs
//! ```
//!
//! All three only read the trace; none of them can alter a run.

pub mod report;
pub mod visualization;
pub mod export;

pub use report::render_summary;

pub use visualization::{
    plot_dashboard,
    plot_dual_axis,
    plot_series,
    PlotConfig,
};

pub use export::{
    export_trace_csv,
    export_yield_grid_csv,
    CsvConfig,
};
