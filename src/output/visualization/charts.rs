//! Time-series charts of a simulation trace
//!
//! Every chart takes the hour of simulation as abscissa. The backend is chosen
//! from the file extension: `.svg` renders vector graphics, anything else a
//! bitmap.
//!
//! # Available functions
//!
//! - [`plot_series`]: one quantity vs hour
//! - [`plot_dual_axis`]: two quantities on left and right axes (e.g. irradiance and water temperature)
//! - [`plot_dashboard`]: eight panels covering every recorded series
//!
//! # Usage
//!
//! ```rust,ignore
//! use solar_still::output::visualization::{plot_dual_axis, plot_series, PlotConfig};
//! use solar_still::simulator::TraceQuantity;
//!
//! plot_series(&trace, TraceQuantity::SaltConcentration, "salinity.png", None)?;
//! plot_dual_axis(
//!     &trace,
//!     TraceQuantity::SolarRadiation,
//!     TraceQuantity::WaterTemperature,
//!     "solar_vs_water.svg",
//!     Some(&PlotConfig::time_series("Solar Radiation & Water Temperature")),
//! )?;
//! ```

use plotters::coord::Shift;
use plotters::prelude::*;
use std::error::Error;
use std::path::Path;

use super::config::{PlotConfig, NO_TITLE};
use crate::simulator::{SimulationTrace, TraceQuantity};

/// One dashboard panel; its quantities share an axis
struct Panel {
    caption: &'static str,
    quantities: &'static [TraceQuantity],
}

const DASHBOARD_PANELS: [Panel; 8] = [
    Panel {
        caption: "Solar Radiation",
        quantities: &[TraceQuantity::SolarRadiation],
    },
    Panel {
        caption: "Temperatures",
        quantities: &[TraceQuantity::WaterTemperature, TraceQuantity::GlassTemperature],
    },
    Panel {
        caption: "Evaporation Rate",
        quantities: &[TraceQuantity::EvaporationRate],
    },
    Panel {
        caption: "Salt Concentration",
        quantities: &[TraceQuantity::SaltConcentration],
    },
    Panel {
        caption: "Water Collection and Volumes",
        quantities: &[TraceQuantity::CumulativeFreshWater, TraceQuantity::RemainingSalineWater],
    },
    Panel {
        caption: "Condensation Efficiency",
        quantities: &[TraceQuantity::CondensationEfficiency],
    },
    Panel {
        caption: "Brine Discharge",
        quantities: &[TraceQuantity::BrineDischarge],
    },
    Panel {
        caption: "Energy Balance",
        quantities: &[TraceQuantity::EnergyAbsorbed, TraceQuantity::EnergyLost],
    },
];

// =================================================================================================
// Helper Functions
// =================================================================================================

struct Series {
    label: &'static str,
    values: Vec<f64>,
    color: RGBColor,
}

fn extract(trace: &SimulationTrace, quantity: TraceQuantity) -> Result<Vec<f64>, Box<dyn Error>> {
    if trace.is_empty() {
        return Err("Empty data: the trace holds no records".into());
    }
    let column = trace
        .column(quantity)
        .ok_or_else(|| format!("Missing data: {} is not recorded", quantity.label()))?;
    Ok(column.iter().copied().collect())
}

/// Axis range covering `values`, padded by 10 %, never collapsed to a point
fn value_range<'a>(values: impl IntoIterator<Item = &'a f64>) -> (f64, f64) {
    let (min, max) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(*v), hi.max(*v)));

    if !min.is_finite() {
        return (0.0, 1.0);
    }

    // Physical series are anchored at zero unless they sit far above it
    let lower = if min >= 0.0 && min < 0.5 * max { 0.0 } else { min };
    let span = (max - lower).max(1e-9);
    let padding = if max > lower { 0.1 * span } else { 1.0_f64.max(max.abs() * 0.1) };

    (lower - if lower == 0.0 { 0.0 } else { padding }, max + padding)
}

fn hour_range(hours: &[f64]) -> f64 {
    hours.last().copied().unwrap_or(1.0).max(1.0)
}

fn is_svg(path: &Path) -> bool {
    path.extension().and_then(|s| s.to_str()) == Some("svg")
}

// =================================================================================================
// Public Chart Functions
// =================================================================================================

/// Plot one quantity against the hour
///
/// # Errors
///
/// Returns `Err` for an empty trace, for an energy quantity when the trace
/// does not track energy, or if the backend cannot write to `output_path`.
pub fn plot_series(
    trace: &SimulationTrace,
    quantity: TraceQuantity,
    output_path: impl AsRef<Path>,
    config: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>> {
    let values = extract(trace, quantity)?;
    let hours = trace.hours();

    let default_config = PlotConfig::time_series(quantity.label());
    let config = config.unwrap_or(&default_config);

    let series = [Series {
        label: quantity.label(),
        values,
        color: config.line_color,
    }];

    let path = output_path.as_ref();
    if is_svg(path) {
        let root = SVGBackend::new(path, (config.width, config.height)).into_drawing_area();
        render_single(&root, &hours, &series, config)
    } else {
        let root = BitMapBackend::new(path, (config.width, config.height)).into_drawing_area();
        render_single(&root, &hours, &series, config)
    }
}

/// Plot two quantities with independent left and right axes
///
/// # Errors
///
/// Same as [`plot_series`], for either quantity.
pub fn plot_dual_axis(
    trace: &SimulationTrace,
    left: TraceQuantity,
    right: TraceQuantity,
    output_path: impl AsRef<Path>,
    config: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>> {
    let hours = trace.hours();

    let default_config = PlotConfig::time_series(format!("{} & {}", left, right));
    let config = config.unwrap_or(&default_config);

    let left = Series {
        label: left.label(),
        values: extract(trace, left)?,
        color: config.line_color,
    };
    let right = Series {
        label: right.label(),
        values: extract(trace, right)?,
        color: config.secondary_color,
    };

    let path = output_path.as_ref();
    if is_svg(path) {
        let backend = SVGBackend::new(path, (config.width, config.height));
        plot_dual_axis_impl(backend, &hours, &left, &right, config)
    } else {
        let backend = BitMapBackend::new(path, (config.width, config.height));
        plot_dual_axis_impl(backend, &hours, &left, &right, config)
    }
}

/// Plot every recorded series in a 4 × 2 grid
///
/// The energy panel stays empty when the trace does not track energy.
pub fn plot_dashboard(
    trace: &SimulationTrace,
    output_path: impl AsRef<Path>,
    config: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>> {
    if trace.is_empty() {
        return Err("Empty data: the trace holds no records".into());
    }

    let default_config = PlotConfig::dashboard(NO_TITLE);
    let config = config.unwrap_or(&default_config);

    let path = output_path.as_ref();
    if is_svg(path) {
        let backend = SVGBackend::new(path, (config.width, config.height));
        plot_dashboard_impl(backend, trace, config)
    } else {
        let backend = BitMapBackend::new(path, (config.width, config.height));
        plot_dashboard_impl(backend, trace, config)
    }
}

// =================================================================================================
// Private Plot Implementations
// =================================================================================================

fn render_single<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    hours: &[f64],
    series: &[Series],
    config: &PlotConfig,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    root.fill(&config.background)?;
    draw_panel(root, &config.title, 40, hours, series, config)?;
    root.present()?;
    Ok(())
}

/// Draw one chart with any number of series sharing the y axis
fn draw_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    caption: &str,
    caption_size: u32,
    hours: &[f64],
    series: &[Series],
    config: &PlotConfig,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let max_hour = hour_range(hours);
    let (y_min, y_max) = value_range(series.iter().flat_map(|s| s.values.iter()));

    let ylabel = if !config.ylabel.is_empty() {
        config.ylabel.as_str()
    } else if series.len() == 1 {
        series[0].label
    } else {
        ""
    };

    let mut chart = ChartBuilder::on(area)
        .caption(caption, ("sans-serif", caption_size).into_font())
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(70)
        .build_cartesian_2d(0.0..max_hour, y_min..y_max)?;

    let hour_format = |x: &f64| format!("{:.0}", x);
    let value_format = |y: &f64| format!("{:.2}", y);

    {
        let mut mesh = chart.configure_mesh();
        mesh.x_desc(config.xlabel.as_str())
            .y_desc(ylabel)
            .x_label_formatter(&hour_format)
            .y_label_formatter(&value_format);
        if !config.show_grid {
            mesh.disable_mesh();
        }
        mesh.draw()?;
    }

    for s in series {
        let color = s.color;
        chart
            .draw_series(LineSeries::new(
                hours.iter().zip(s.values.iter()).map(|(h, v)| (*h, *v)),
                ShapeStyle::from(&color).stroke_width(config.line_width),
            ))?
            .label(s.label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &color));
    }

    if series.len() > 1 {
        chart
            .configure_series_labels()
            .background_style(&config.background.mix(0.8))
            .border_style(&BLACK)
            .draw()?;
    }

    Ok(())
}

fn plot_dual_axis_impl<DB: DrawingBackend>(
    backend: DB,
    hours: &[f64],
    left: &Series,
    right: &Series,
    config: &PlotConfig,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let root = backend.into_drawing_area();
    root.fill(&config.background)?;

    let max_hour = hour_range(hours);
    let (left_min, left_max) = value_range(&left.values);
    let (right_min, right_max) = value_range(&right.values);

    let mut chart = ChartBuilder::on(&root)
        .caption(&config.title, ("sans-serif", 40).into_font())
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(70)
        .right_y_label_area_size(70)
        .build_cartesian_2d(0.0..max_hour, left_min..left_max)?
        .set_secondary_coord(0.0..max_hour, right_min..right_max);

    let hour_format = |x: &f64| format!("{:.0}", x);
    let value_format = |y: &f64| format!("{:.1}", y);

    {
        let mut mesh = chart.configure_mesh();
        mesh.x_desc(config.xlabel.as_str())
            .y_desc(left.label)
            .x_label_formatter(&hour_format)
            .y_label_formatter(&value_format);
        if !config.show_grid {
            mesh.disable_mesh();
        }
        mesh.draw()?;
    }

    chart
        .configure_secondary_axes()
        .y_desc(right.label)
        .y_label_formatter(&value_format)
        .draw()?;

    let left_color = left.color;
    chart
        .draw_series(LineSeries::new(
            hours.iter().zip(left.values.iter()).map(|(h, v)| (*h, *v)),
            ShapeStyle::from(&left_color).stroke_width(config.line_width),
        ))?
        .label(left.label)
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &left_color));

    let right_color = right.color;
    chart
        .draw_secondary_series(LineSeries::new(
            hours.iter().zip(right.values.iter()).map(|(h, v)| (*h, *v)),
            ShapeStyle::from(&right_color).stroke_width(config.line_width),
        ))?
        .label(right.label)
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &right_color));

    chart
        .configure_series_labels()
        .background_style(&config.background.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

fn plot_dashboard_impl<DB: DrawingBackend>(
    backend: DB,
    trace: &SimulationTrace,
    config: &PlotConfig,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let root = backend.into_drawing_area();
    root.fill(&config.background)?;
    let root = root.titled(&config.title, ("sans-serif", 40))?;

    let hours = trace.hours();
    // Panels label their own series; a shared ylabel would be wrong for most of them
    let panel_config = PlotConfig {
        ylabel: String::new(),
        ..config.clone()
    };

    for (area, panel) in root.split_evenly((4, 2)).iter().zip(DASHBOARD_PANELS) {
        let series: Vec<Series> = panel
            .quantities
            .iter()
            .enumerate()
            .filter_map(|(i, q)| {
                trace.column(*q).map(|column| Series {
                    label: q.label(),
                    values: column.iter().copied().collect(),
                    color: panel_config.series_color(i),
                })
            })
            .collect();

        if series.is_empty() {
            continue;
        }
        draw_panel(area, panel.caption, 24, &hours, &series, &panel_config)?;
    }

    root.present()?;
    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimulationConfig;
    use crate::simulator::BasinSimulator;

    fn trace(track_energy: bool) -> SimulationTrace {
        let config = SimulationConfig {
            track_energy,
            ..Default::default()
        };
        BasinSimulator::default().run(&config).unwrap()
    }

    #[test]
    fn test_value_range_anchors_at_zero() {
        let (lo, hi) = value_range(&[0.0, 500.0, 1000.0]);
        assert_eq!(lo, 0.0);
        assert!((hi - 1100.0).abs() < 1e-9);
    }

    #[test]
    fn test_value_range_keeps_offset_series() {
        let (lo, hi) = value_range(&[20.0, 35.0]);
        assert!(lo < 20.0 && lo > 0.0);
        assert!(hi > 35.0);
    }

    #[test]
    fn test_value_range_flat_and_empty() {
        let (lo, hi) = value_range(&[0.0, 0.0]);
        assert!(hi > lo);

        let (lo, hi) = value_range(&[35.0, 35.0]);
        assert!(lo < 35.0 && hi > 35.0);

        assert_eq!(value_range(&[]), (0.0, 1.0));
    }

    #[test]
    fn test_plot_series_png() {
        let trace = trace(true);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("concentration.png");
        plot_series(&trace, TraceQuantity::SaltConcentration, &path, None).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_plot_series_svg() {
        let trace = trace(true);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("evaporation.svg");
        plot_series(&trace, TraceQuantity::EvaporationRate, &path, None).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_plot_series_missing_energy() {
        let trace = trace(false);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("energy_lost.png");
        assert!(plot_series(&trace, TraceQuantity::EnergyLost, &path, None).is_err());
    }

    #[test]
    fn test_plot_dual_axis() {
        let trace = trace(true);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("solar_and_water.svg");
        let config = PlotConfig::time_series("Solar Radiation & Water Temperature");
        plot_dual_axis(
            &trace,
            TraceQuantity::SolarRadiation,
            TraceQuantity::WaterTemperature,
            &path,
            Some(&config),
        )
        .unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_plot_dashboard_with_and_without_energy() {
        for track_energy in [true, false] {
            let trace = trace(track_energy);
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("dashboard.png");
            plot_dashboard(&trace, &path, None).unwrap();
            assert!(path.exists());
        }
    }
}
