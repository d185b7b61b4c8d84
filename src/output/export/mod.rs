//! Export of simulation results
//!
//! # Architecture
//!
//! The [`Exporter`] trait abstracts the file format. Each format lives in its
//! own sub-module, so a new format is a new file.
//!
//! # Available formats
//!
//! | Format | Module    |
//! |--------|-----------|
//! | CSV    | [`csv`]   |
//!
//! # Usage example
//!
//! ```rust,ignore
//! use solar_still::output::export::{CsvConfig, CsvExporter, Exporter};
//!
//! let exporter = CsvExporter::new(CsvConfig::european());
//! exporter.export_trace(&trace, "still.csv".as_ref())?;
//! ```

pub mod csv;

pub use csv::{export_trace_csv, export_yield_grid_csv, CsvConfig, CsvMetadata};

use std::error::Error;
use std::path::Path;

use crate::simulator::SimulationTrace;

/// Abstraction over export formats
pub trait Exporter {
    /// Error type of this format
    type Error;

    /// Write every recorded series of `trace` to `path`
    fn export_trace(&self, trace: &SimulationTrace, path: &Path) -> Result<(), Self::Error>;
}

/// [`Exporter`] writing CSV files with a fixed [`CsvConfig`]
#[derive(Debug, Clone, Default)]
pub struct CsvExporter {
    pub config: CsvConfig,
}

impl CsvExporter {
    pub fn new(config: CsvConfig) -> Self {
        Self { config }
    }
}

impl Exporter for CsvExporter {
    type Error = Box<dyn Error>;

    fn export_trace(&self, trace: &SimulationTrace, path: &Path) -> Result<(), Self::Error> {
        export_trace_csv(trace, path, Some(&self.config))
    }
}

// =================================================================================================
// Tests
// =================================================================================================
