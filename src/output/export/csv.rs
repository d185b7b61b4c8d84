//! CSV export of simulation traces
//!
//! Writes one row per simulated hour, compatible with Excel, pandas and most
//! data analysis tools.
//!
//! # Features
//!
//! - **One call**: [`export_trace_csv`] writes every series of a trace
//! - **Energy-aware**: energy columns appear only when the trace tracks energy
//! - **Metadata support**: optional `#` header with run parameters and a timestamp
//! - **Customizable**: delimiter, decimal separator, precision
//! - **Validation**: rejects empty traces and NaN/Inf values
//!
//! # Quick Examples
//!
//! ## Minimal Export
//!
//! ```rust,ignore
//! use solar_still::output::export::export_trace_csv;
//!
//! export_trace_csv(&trace, "still.csv", None)?;
//! ```
//!
//! **Output** (`still.csv`, first rows):
//! ```csv
//! Hour,Solar Radiation (W/m²),Water Temperature (°C),...
//! 0,0.000000,20.000000,...
//! 1,17.037087,20.255556,...
//! ```
//!
//! ## With Metadata
//!
//! ```rust,ignore
//! use solar_still::output::export::{export_trace_csv, CsvConfig, CsvMetadata};
//!
//! let config = CsvConfig::default()
//!     .with_metadata(CsvMetadata::from_config(&simulation).model("Omara single slope"));
//!
//! export_trace_csv(&trace, "still.csv", Some(&config))?;
//! ```
//!
//! **Output** (`still.csv`):
//! ```csv
//! # Solar Still Simulation Data
//! # Generated: 2026-10-18T09:12:44+00:00
//! # Model: Omara single slope
//! # Horizon: 24 h
//! # Initial Volume: 10 L
//! # Initial Salt Concentration: 35 g/L
//! #
//! Hour,Solar Radiation (W/m²),...
//! ```

use ndarray::Array2;
use std::error::Error;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::config::SimulationConfig;
use crate::simulator::SimulationTrace;

// =============================================================================
// Configuration Structures
// =============================================================================

/// Configuration for CSV export
///
/// # Example
///
/// ```rust
/// use solar_still::output::export::CsvConfig;
///
/// let config = CsvConfig {
///     delimiter: ';',
///     precision: 10,
///     ..Default::default()
/// };
/// assert!(!config.include_metadata);
/// ```
#[derive(Debug, Clone)]
pub struct CsvConfig {
    /// Column delimiter (default: ',')
    pub delimiter: char,

    /// Decimal separator (default: '.')
    pub decimal_separator: char,

    /// Number of decimal places for floating-point values (default: 6)
    pub precision: usize,

    /// Include metadata header comments (default: false)
    pub include_metadata: bool,

    /// Metadata to include in header
    pub metadata: Option<CsvMetadata>,

    /// Header of the hour column (default: "Hour")
    pub hour_header: String,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            decimal_separator: '.',
            precision: 6,
            include_metadata: false,
            metadata: None,
            hour_header: "Hour".to_string(),
        }
    }
}

impl CsvConfig {
    /// European CSV format (semicolon, comma for decimal)
    pub fn european() -> Self {
        Self {
            delimiter: ';',
            decimal_separator: ',',
            ..Default::default()
        }
    }

    /// Builder pattern: set delimiter
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Builder pattern: set precision
    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Builder pattern: enable metadata
    pub fn with_metadata(mut self, metadata: CsvMetadata) -> Self {
        self.include_metadata = true;
        self.metadata = Some(metadata);
        self
    }
}

/// Metadata for CSV header comments
///
/// All fields are optional. Only non-None fields are written.
#[derive(Debug, Clone, Default)]
pub struct CsvMetadata {
    /// Free-form model description (e.g., "Omara single slope")
    pub model_name: Option<String>,

    /// Number of simulated hours
    pub horizon_hours: Option<usize>,

    /// L
    pub initial_volume: Option<f64>,

    /// g/L
    pub initial_salt_concentration: Option<f64>,

    /// g/L
    pub max_salt_concentration: Option<f64>,

    /// m²
    pub surface_area: Option<f64>,

    /// Jitter seed, when noise is enabled
    pub seed: Option<u64>,

    /// Additional custom parameters
    pub custom: Vec<(String, String)>,
}

impl CsvMetadata {
    /// Metadata describing the run parameters of `config`
    pub fn from_config(config: &SimulationConfig) -> Self {
        Self {
            horizon_hours: Some(config.horizon_hours),
            initial_volume: Some(config.initial_volume_liters),
            initial_salt_concentration: Some(config.initial_salt_concentration),
            max_salt_concentration: Some(config.max_salt_concentration),
            surface_area: Some(config.surface_area_m2),
            seed: config.jitter.map(|j| j.seed),
            ..Default::default()
        }
    }

    /// Builder pattern: set the model description
    pub fn model(mut self, name: impl Into<String>) -> Self {
        self.model_name = Some(name.into());
        self
    }

    /// Add custom parameter
    pub fn add_custom(&mut self, key: String, value: String) {
        self.custom.push((key, value));
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn write_metadata_header(
    file: &mut impl Write,
    metadata: &CsvMetadata,
) -> Result<(), Box<dyn Error>> {
    writeln!(file, "# Solar Still Simulation Data")?;

    let now = chrono::Utc::now();
    writeln!(file, "# Generated: {}", now.to_rfc3339())?;

    if let Some(model) = &metadata.model_name {
        writeln!(file, "# Model: {}", model)?;
    }
    if let Some(hours) = metadata.horizon_hours {
        writeln!(file, "# Horizon: {} h", hours)?;
    }
    if let Some(volume) = metadata.initial_volume {
        writeln!(file, "# Initial Volume: {} L", volume)?;
    }
    if let Some(salt) = metadata.initial_salt_concentration {
        writeln!(file, "# Initial Salt Concentration: {} g/L", salt)?;
    }
    if let Some(max) = metadata.max_salt_concentration {
        writeln!(file, "# Saturation Cutoff: {} g/L", max)?;
    }
    if let Some(area) = metadata.surface_area {
        writeln!(file, "# Surface Area: {} m²", area)?;
    }
    if let Some(seed) = metadata.seed {
        writeln!(file, "# Seed: {}", seed)?;
    }

    for (key, value) in &metadata.custom {
        writeln!(file, "# {}: {}", key, value)?;
    }

    writeln!(file, "#")?;

    Ok(())
}

/// Format number with configured precision and decimal separator
fn format_number(value: f64, config: &CsvConfig) -> String {
    let formatted = format!("{:.prec$}", value, prec = config.precision);

    if config.decimal_separator != '.' {
        formatted.replace('.', &config.decimal_separator.to_string())
    } else {
        formatted
    }
}

fn open_with_metadata(
    output_path: &Path,
    configuration: &CsvConfig,
) -> Result<BufWriter<File>, Box<dyn Error>> {
    let mut file = BufWriter::new(File::create(output_path)?);

    if configuration.include_metadata {
        if let Some(metadata) = &configuration.metadata {
            write_metadata_header(&mut file, metadata)?;
        }
    }

    Ok(file)
}

// =============================================================================
// Export Functions
// =============================================================================

/// Export a full trace to CSV
///
/// Writes a header row followed by one row per hour. Columns follow
/// [`TraceQuantity::ALL`](crate::simulator::TraceQuantity::ALL); the two
/// energy columns are omitted when the trace does not track energy.
///
/// # Errors
///
/// - Empty trace
/// - NaN or Inf values
/// - File creation or write errors
///
/// # Example
///
/// ```rust,ignore
/// export_trace_csv(&trace, "still.csv", None)?;
/// ```
pub fn export_trace_csv(
    trace: &SimulationTrace,
    output_path: impl AsRef<Path>,
    configuration: Option<&CsvConfig>,
) -> Result<(), Box<dyn Error>> {

    // ============================= Validation =============================

    if trace.is_empty() {
        return Err("Empty data: the trace holds no records".into());
    }

    let quantities = trace.available_quantities();

    let mut columns = Vec::with_capacity(quantities.len());
    for quantity in &quantities {
        let column = trace
            .column(*quantity)
            .ok_or_else(|| format!("Missing data: {} is not recorded", quantity.label()))?;

        if column.iter().any(|v| !v.is_finite()) {
            return Err(format!("Invalid data: NaN or Inf detected in {}", quantity.label()).into());
        }
        columns.push(column);
    }

    // ============================= Configuration ==========================

    let binding = CsvConfig::default();
    let configuration = configuration.unwrap_or(&binding);

    let mut file = open_with_metadata(output_path.as_ref(), configuration)?;

    // ============================= Write Header ===========================

    write!(file, "{}", configuration.hour_header)?;
    for quantity in &quantities {
        write!(file, "{}{}", configuration.delimiter, quantity.label())?;
    }
    writeln!(file)?;

    // ============================= Write Data =============================

    for (row, record) in trace.iter().enumerate() {
        write!(file, "{}", record.hour)?;
        for column in &columns {
            write!(
                file,
                "{}{}",
                configuration.delimiter,
                format_number(column[row], configuration)
            )?;
        }
        writeln!(file)?;
    }

    file.flush()?;
    Ok(())
}

/// Export a sweep yield grid to CSV
///
/// The first column holds the initial volumes, the header row the initial
/// salinities, and each cell the fresh water (L) of that pair.
pub fn export_yield_grid_csv(
    grid: &Array2<f64>,
    volumes: &[f64],
    salinities: &[f64],
    output_path: impl AsRef<Path>,
    configuration: Option<&CsvConfig>,
) -> Result<(), Box<dyn Error>> {

    // ============================= Validation =============================

    if grid.is_empty() {
        return Err("Empty data: the yield grid holds no values".into());
    }

    if grid.dim() != (volumes.len(), salinities.len()) {
        return Err(format!(
            "Data length mismatch: grid is {:?} but axes are ({}, {})",
            grid.dim(),
            volumes.len(),
            salinities.len()
        )
        .into());
    }

    if grid.iter().any(|v| !v.is_finite()) {
        return Err("Invalid data: NaN or Inf detected in yield grid".into());
    }

    // ============================= Write ==================================

    let binding = CsvConfig::default();
    let configuration = configuration.unwrap_or(&binding);

    let mut file = open_with_metadata(output_path.as_ref(), configuration)?;

    write!(file, "Volume (L) \\ Salinity (g/L)")?;
    for salinity in salinities {
        write!(file, "{}{}", configuration.delimiter, format_number(*salinity, configuration))?;
    }
    writeln!(file)?;

    for (volume, row) in volumes.iter().zip(grid.rows()) {
        write!(file, "{}", format_number(*volume, configuration))?;
        for value in row {
            write!(file, "{}{}", configuration.delimiter, format_number(*value, configuration))?;
        }
        writeln!(file)?;
    }

    file.flush()?;
    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================
