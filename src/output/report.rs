//! Plain-text summary of a run
//!
//! ```rust
//! use solar_still::config::SimulationConfig;
//! use solar_still::output::render_summary;
//! use solar_still::simulator::{BasinSimulator, TraceSummary};
//!
//! let config = SimulationConfig::default();
//! let trace = BasinSimulator::default().run(&config).unwrap();
//! let summary = TraceSummary::from_trace(&trace, config.max_salt_concentration).unwrap();
//!
//! let report = render_summary(&summary);
//! assert!(report.contains("Total fresh water"));
//! ```

use std::fmt::Write;

use crate::simulator::TraceSummary;

/// Width of the label column
const LABEL_WIDTH: usize = 30;

/// Render `summary` as an aligned, human-readable block
///
/// Energy lines appear only when the run tracked energy. Saturation and
/// dry-out lines appear only when those events happened.
pub fn render_summary(summary: &TraceSummary) -> String {
    let mut out = String::new();

    out.push_str("Solar still simulation summary\n");
    out.push_str(&"=".repeat(LABEL_WIDTH + 20));
    out.push('\n');

    line(&mut out, "Simulated hours", format!("{}", summary.hours));
    line(&mut out, "Total fresh water", format!("{:.3} L", summary.total_fresh_water));
    line(&mut out, "Yield", format!("{:.3} L/m²", summary.yield_per_m2));
    line(
        &mut out,
        "Peak evaporation",
        format!(
            "{:.4} L/h at hour {}",
            summary.peak_evaporation_rate, summary.peak_hour
        ),
    );
    line(
        &mut out,
        "Final salt concentration",
        format!("{:.2} g/L", summary.final_salt_concentration),
    );
    line(
        &mut out,
        "Remaining saline water",
        format!("{:.3} L", summary.remaining_saline_water),
    );

    if summary.total_brine_discharged > 0.0 {
        line(
            &mut out,
            "Brine discharged",
            format!("{:.3} L", summary.total_brine_discharged),
        );
    }

    line(
        &mut out,
        "Mean condensation efficiency",
        format!("{:.1} %", summary.mean_condensation_efficiency * 100.0),
    );

    if let Some(hour) = summary.saturation_hour {
        line(&mut out, "Saturation reached", format!("hour {hour}"));
    }
    if let Some(hour) = summary.dry_hour {
        line(&mut out, "Basin dry", format!("hour {hour}"));
    }

    if let (Some(absorbed), Some(lost)) = (summary.energy_absorbed, summary.energy_lost) {
        line(&mut out, "Energy absorbed", format!("{absorbed:.1} Wh"));
        line(&mut out, "Energy lost", format!("{lost:.1} Wh"));
        if let Some(ratio) = summary.loss_ratio() {
            line(&mut out, "Loss ratio", format!("{:.1} %", ratio * 100.0));
        }
    }

    out
}

fn line(out: &mut String, label: &str, value: String) {
    // Writing to a String cannot fail
    let _ = writeln!(out, "{:<width$}{}", format!("{label}:"), value, width = LABEL_WIDTH);
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn summary() -> TraceSummary {
        TraceSummary {
            hours: 24,
            total_fresh_water: 1.2345,
            yield_per_m2: 0.61725,
            peak_evaporation_rate: 0.21,
            peak_hour: 11,
            final_salt_concentration: 39.8,
            remaining_saline_water: 8.7655,
            total_brine_discharged: 0.0,
            mean_condensation_efficiency: 0.75,
            saturation_hour: None,
            dry_hour: None,
            energy_absorbed: Some(6000.0),
            energy_lost: Some(900.0),
        }
    }

    #[test]
    fn test_headline_figures() {
        let report = render_summary(&summary());

        assert!(report.starts_with("Solar still simulation summary\n"));
        assert!(report.contains("1.234 L") || report.contains("1.235 L"));
        assert!(report.contains("0.617 L/m²"));
        assert!(report.contains("at hour 11"));
        assert!(report.contains("39.80 g/L"));
        assert!(report.contains("75.0 %"));
    }

    #[test]
    fn test_energy_lines_only_when_tracked() {
        let tracked = render_summary(&summary());
        assert!(tracked.contains("Energy absorbed:"));
        assert!(tracked.contains("15.0 %"));

        let untracked = render_summary(&TraceSummary {
            energy_absorbed: None,
            energy_lost: None,
            ..summary()
        });
        assert!(!untracked.contains("Energy"));
    }

    #[test]
    fn test_events_and_discharge_are_optional() {
        let quiet = render_summary(&summary());
        assert!(!quiet.contains("Basin dry"));
        assert!(!quiet.contains("Saturation"));
        assert!(!quiet.contains("Brine discharged"));

        let eventful = render_summary(&TraceSummary {
            dry_hour: Some(2),
            saturation_hour: Some(1),
            total_brine_discharged: 0.48,
            ..summary()
        });
        assert!(eventful.contains("Basin dry:"));
        assert!(eventful.contains("hour 2"));
        assert!(eventful.contains("hour 1"));
        assert!(eventful.contains("0.480 L"));
    }

    #[test]
    fn test_values_start_in_one_column() {
        let report = render_summary(&summary());
        for l in report.lines().skip(2) {
            assert_eq!(l.chars().nth(LABEL_WIDTH - 1), Some(' '), "misaligned: {l}");
            assert_ne!(l.chars().nth(LABEL_WIDTH), Some(' '), "misaligned: {l}");
        }
    }
}
