//! Scalar summaries of a trace

use super::trace::{SimulationTrace, TraceQuantity};

/// Headline figures of one run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceSummary {
    /// Number of simulated hours
    pub hours: usize,

    /// Distillate collected over the run (L)
    pub total_fresh_water: f64,

    /// Distillate per m² of basin (L/m²)
    pub yield_per_m2: f64,

    /// Highest hourly evaporation (L/h)
    pub peak_evaporation_rate: f64,

    /// Hour of the peak; the earliest one on ties
    pub peak_hour: usize,

    /// g/L at the end of the run
    pub final_salt_concentration: f64,

    /// L at the end of the run
    pub remaining_saline_water: f64,

    /// Brine removed over the run (L)
    pub total_brine_discharged: f64,

    /// Mean condensation efficiency over the run
    pub mean_condensation_efficiency: f64,

    /// First hour that ended at the saturation cutoff
    pub saturation_hour: Option<usize>,

    /// First hour that ended with an empty basin
    pub dry_hour: Option<usize>,

    /// Total energy absorbed (Wh), when tracked
    pub energy_absorbed: Option<f64>,

    /// Total energy lost (Wh), when tracked
    pub energy_lost: Option<f64>,
}

impl TraceSummary {
    /// Summarise `trace` against the saturation cutoff `max_salt_concentration`
    ///
    /// Returns `None` for an empty trace.
    pub fn from_trace(trace: &SimulationTrace, max_salt_concentration: f64) -> Option<Self> {
        let last = trace.last()?;

        let evaporation = trace.column(TraceQuantity::EvaporationRate)?;
        let discharge = trace.column(TraceQuantity::BrineDischarge)?;
        let efficiency = trace.column(TraceQuantity::CondensationEfficiency)?;

        // imax returns the first maximum
        let peak_index = evaporation.imax();

        let saturation_hour = trace
            .iter()
            .find(|r| r.salt_concentration >= max_salt_concentration)
            .map(|r| r.hour);
        let dry_hour = trace
            .iter()
            .find(|r| r.remaining_saline_water <= 0.0)
            .map(|r| r.hour);

        Some(Self {
            hours: trace.len(),
            total_fresh_water: last.cumulative_fresh_water,
            yield_per_m2: last.cumulative_fresh_water / trace.surface_area_m2(),
            peak_evaporation_rate: evaporation[peak_index],
            peak_hour: trace.records()[peak_index].hour,
            final_salt_concentration: last.salt_concentration,
            remaining_saline_water: last.remaining_saline_water,
            total_brine_discharged: discharge.sum(),
            mean_condensation_efficiency: efficiency.mean(),
            saturation_hour,
            dry_hour,
            energy_absorbed: trace.column(TraceQuantity::EnergyAbsorbed).map(|c| c.sum()),
            energy_lost: trace.column(TraceQuantity::EnergyLost).map(|c| c.sum()),
        })
    }

    /// Share of absorbed energy lost, when tracked
    pub fn loss_ratio(&self) -> Option<f64> {
        match (self.energy_absorbed, self.energy_lost) {
            (Some(absorbed), Some(lost)) if absorbed > 0.0 => Some(lost / absorbed),
            _ => None,
        }
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimulationConfig;
    use crate::physics::BasinTemperatures;
    use crate::simulator::state::SimulationState;
    use crate::simulator::trace::{EnergyBalance, HourRecord};

    fn build(rates: &[f64], area: f64, tracks_energy: bool) -> SimulationTrace {
        let initial = SimulationState::initial(
            &SimulationConfig::default(),
            BasinTemperatures { water_c: 20.0, glass_c: 16.0 },
        );
        let mut trace = SimulationTrace::with_capacity(initial, area, tracks_energy, rates.len());
        let mut fresh = 0.0;
        let mut volume = 10.0;
        for (hour, &rate) in rates.iter().enumerate() {
            fresh += rate;
            volume -= rate;
            trace.push(HourRecord {
                hour,
                solar_radiation: 500.0,
                water_temp: 30.0,
                glass_temp: 26.0,
                condensation_efficiency: 0.8,
                evaporation_rate: rate,
                brine_discharge: 0.01,
                salt_concentration: 350.0 / volume,
                cumulative_fresh_water: fresh,
                remaining_saline_water: volume,
                energy: tracks_energy.then_some(EnergyBalance { absorbed: 60.0, lost: 9.0 }),
            });
        }
        trace
    }

    #[test]
    fn test_peak_and_totals() {
        let trace = build(&[0.0, 0.2, 0.5, 0.5, 0.1], 2.0, true);
        let summary = TraceSummary::from_trace(&trace, 120.0).unwrap();

        assert_eq!(summary.hours, 5);
        assert_eq!(summary.peak_hour, 2);
        assert_eq!(summary.peak_evaporation_rate, 0.5);
        assert!((summary.total_fresh_water - 1.3).abs() < 1e-12);
        assert!((summary.yield_per_m2 - 0.65).abs() < 1e-12);
        assert!((summary.total_brine_discharged - 0.05).abs() < 1e-12);
        assert!((summary.mean_condensation_efficiency - 0.8).abs() < 1e-12);
        assert_eq!(summary.energy_absorbed, Some(300.0));
        assert_eq!(summary.energy_lost, Some(45.0));
        assert!((summary.loss_ratio().unwrap() - 0.15).abs() < 1e-12);
        assert_eq!(summary.saturation_hour, None);
        assert_eq!(summary.dry_hour, None);
    }

    #[test]
    fn test_saturation_and_dry_hours() {
        // 350 g of salt: 120 g/L is passed once volume drops below 2.92 L
        let trace = build(&[3.0, 4.5, 2.5], 1.0, false);
        let summary = TraceSummary::from_trace(&trace, 120.0).unwrap();

        assert_eq!(summary.saturation_hour, Some(1));
        assert_eq!(summary.dry_hour, Some(2));
        assert_eq!(summary.energy_absorbed, None);
        assert_eq!(summary.loss_ratio(), None);
    }

    #[test]
    fn test_empty_trace_has_no_summary() {
        let trace = build(&[], 1.0, true);
        assert!(TraceSummary::from_trace(&trace, 120.0).is_none());
    }
}
