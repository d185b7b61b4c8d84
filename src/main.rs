//! solar-still - Runs one simulation from the command line
//!
//! Loads an optional TOML configuration, applies command-line overrides,
//! prints the text summary and optionally writes the trace as CSV and a
//! dashboard chart.
//!
//! ```text
//! solar-still --config still.toml --hours 72 --seed 7 --csv trace.csv --plot dashboard.png
//! ```
//!
//! Log verbosity follows `RUST_LOG` (default `solar_still=info`).

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use solar_still::config::{load_config, JitterConfig, StillConfig};
use solar_still::output::export::{export_trace_csv, CsvConfig, CsvMetadata};
use solar_still::output::visualization::{plot_dashboard, PlotConfig};
use solar_still::output::render_summary;
use solar_still::simulator::{BasinSimulator, TraceSummary};

#[derive(Parser, Debug)]
#[command(name = "solar-still")]
#[command(about = "Simulate the hourly yield of a single-basin solar still")]
struct Cli {
    /// TOML configuration file (defaults are used when omitted)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the number of simulated hours
    #[arg(long)]
    hours: Option<usize>,

    /// Enable jitter with this seed (keeps amplitudes from the file, if any)
    #[arg(long)]
    seed: Option<u64>,

    /// Write the hourly trace to this CSV file
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Write the dashboard chart to this file (.png or .svg)
    #[arg(long)]
    plot: Option<PathBuf>,

    /// Do not track absorbed/lost energy
    #[arg(long)]
    no_energy: bool,
}

impl Cli {
    fn still_config(&self) -> Result<StillConfig, Box<dyn Error>> {
        let mut still = match &self.config {
            Some(path) => {
                log::info!("Loading configuration from {}", path.display());
                load_config(path)?
            }
            None => StillConfig::default(),
        };

        let simulation = &mut still.simulation;
        if let Some(hours) = self.hours {
            simulation.horizon_hours = hours;
        }
        if let Some(seed) = self.seed {
            simulation.jitter = Some(match simulation.jitter {
                Some(jitter) => JitterConfig { seed, ..jitter },
                None => JitterConfig::seeded(seed),
            });
        }
        if self.no_energy {
            simulation.track_energy = false;
        }

        Ok(still)
    }
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "solar_still=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let still = cli.still_config()?;
    let simulation = &still.simulation;

    let simulator = BasinSimulator::from_model(&still.model)?;
    let trace = simulator.run(simulation)?;

    if let Some(summary) = TraceSummary::from_trace(&trace, simulation.max_salt_concentration) {
        print!("{}", render_summary(&summary));
    }

    if let Some(path) = &cli.csv {
        let metadata = CsvMetadata::from_config(simulation).model(simulator.describe());
        let csv_config = CsvConfig::default().with_metadata(metadata);
        export_trace_csv(&trace, path, Some(&csv_config))?;
        log::info!("Trace written to {}", path.display());
    }

    if let Some(path) = &cli.plot {
        let title = match &cli.config {
            Some(file) => format!("Solar Still ({})", file.display()),
            None => "Solar Still".to_string(),
        };
        plot_dashboard(&trace, path, Some(&PlotConfig::dashboard(title)))?;
        log::info!("Dashboard written to {}", path.display());
    }

    Ok(())
}
