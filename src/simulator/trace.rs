//! Simulation trace
//!
//! A [`SimulationTrace`] holds one [`HourRecord`] per simulated hour, in order.
//! It is built once by the simulator and then only read by reports, exporters
//! and charts.
//!
//! Series are addressed with the type-safe [`TraceQuantity`] enum rather than
//! by string:
//!
//! ```rust
//! use solar_still::config::SimulationConfig;
//! use solar_still::simulator::{BasinSimulator, TraceQuantity};
//!
//! let trace = BasinSimulator::default().run(&SimulationConfig::default()).unwrap();
//! let salinity = trace.column(TraceQuantity::SaltConcentration).unwrap();
//! assert_eq!(salinity.len(), 24);
//! ```

use nalgebra::DVector;
use std::fmt;

use super::state::SimulationState;

// =================================================================================================
// Records
// =================================================================================================

/// Energy bookkeeping for one hour
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergyBalance {
    /// Energy absorbed by the basin over the hour (Wh)
    pub absorbed: f64,

    /// Energy lost to the surroundings over the hour (Wh)
    pub lost: f64,
}

/// Everything known about the still for one hour
///
/// Driving terms (irradiance, temperatures, fluxes) apply during the hour;
/// basin state (concentration, volumes) is taken at the end of it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HourRecord {
    pub hour: usize,

    /// W/m²
    pub solar_radiation: f64,

    /// °C
    pub water_temp: f64,

    /// °C
    pub glass_temp: f64,

    /// Fraction of vapor recovered
    pub condensation_efficiency: f64,

    /// L/h
    pub evaporation_rate: f64,

    /// L/h
    pub brine_discharge: f64,

    /// g/L
    pub salt_concentration: f64,

    /// L
    pub cumulative_fresh_water: f64,

    /// L
    pub remaining_saline_water: f64,

    /// Present only when energy tracking is enabled
    pub energy: Option<EnergyBalance>,
}

// =================================================================================================
// Quantities
// =================================================================================================

/// Series that can be extracted from a trace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TraceQuantity {
    SolarRadiation,
    WaterTemperature,
    GlassTemperature,
    CondensationEfficiency,
    EvaporationRate,
    BrineDischarge,
    SaltConcentration,
    CumulativeFreshWater,
    RemainingSalineWater,
    EnergyAbsorbed,
    EnergyLost,
}

impl TraceQuantity {
    /// Every quantity, in export column order
    pub const ALL: [TraceQuantity; 11] = [
        TraceQuantity::SolarRadiation,
        TraceQuantity::WaterTemperature,
        TraceQuantity::GlassTemperature,
        TraceQuantity::CondensationEfficiency,
        TraceQuantity::EvaporationRate,
        TraceQuantity::BrineDischarge,
        TraceQuantity::SaltConcentration,
        TraceQuantity::CumulativeFreshWater,
        TraceQuantity::RemainingSalineWater,
        TraceQuantity::EnergyAbsorbed,
        TraceQuantity::EnergyLost,
    ];

    /// Machine-friendly column name
    pub fn key(&self) -> &'static str {
        match self {
            Self::SolarRadiation => "solar_radiation",
            Self::WaterTemperature => "water_temp",
            Self::GlassTemperature => "glass_temp",
            Self::CondensationEfficiency => "condensation_efficiency",
            Self::EvaporationRate => "evaporation_rate",
            Self::BrineDischarge => "brine_discharge",
            Self::SaltConcentration => "salt_concentration",
            Self::CumulativeFreshWater => "cumulative_fresh_water",
            Self::RemainingSalineWater => "remaining_saline_water",
            Self::EnergyAbsorbed => "energy_absorbed",
            Self::EnergyLost => "energy_lost",
        }
    }

    /// Human-readable label with unit, used by charts and CSV headers
    pub fn label(&self) -> &'static str {
        match self {
            Self::SolarRadiation => "Solar Radiation (W/m²)",
            Self::WaterTemperature => "Water Temperature (°C)",
            Self::GlassTemperature => "Glass Temperature (°C)",
            Self::CondensationEfficiency => "Condensation Efficiency (-)",
            Self::EvaporationRate => "Evaporation Rate (L/h)",
            Self::BrineDischarge => "Brine Discharge (L/h)",
            Self::SaltConcentration => "Salt Concentration (g/L)",
            Self::CumulativeFreshWater => "Cumulative Fresh Water (L)",
            Self::RemainingSalineWater => "Remaining Saline Water (L)",
            Self::EnergyAbsorbed => "Energy Absorbed (Wh)",
            Self::EnergyLost => "Energy Lost (Wh)",
        }
    }

    /// Whether the quantity only exists with energy tracking
    pub fn is_energy(&self) -> bool {
        matches!(self, Self::EnergyAbsorbed | Self::EnergyLost)
    }

    /// Value of this quantity in `record`
    pub fn value(&self, record: &HourRecord) -> Option<f64> {
        match self {
            Self::SolarRadiation => Some(record.solar_radiation),
            Self::WaterTemperature => Some(record.water_temp),
            Self::GlassTemperature => Some(record.glass_temp),
            Self::CondensationEfficiency => Some(record.condensation_efficiency),
            Self::EvaporationRate => Some(record.evaporation_rate),
            Self::BrineDischarge => Some(record.brine_discharge),
            Self::SaltConcentration => Some(record.salt_concentration),
            Self::CumulativeFreshWater => Some(record.cumulative_fresh_water),
            Self::RemainingSalineWater => Some(record.remaining_saline_water),
            Self::EnergyAbsorbed => record.energy.map(|e| e.absorbed),
            Self::EnergyLost => record.energy.map(|e| e.lost),
        }
    }
}

impl fmt::Display for TraceQuantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =================================================================================================
// Trace
// =================================================================================================

/// Ordered, append-only sequence of hourly records
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationTrace {
    initial_state: SimulationState,
    surface_area_m2: f64,
    tracks_energy: bool,
    records: Vec<HourRecord>,
}

impl SimulationTrace {
    pub(crate) fn with_capacity(
        initial_state: SimulationState,
        surface_area_m2: f64,
        tracks_energy: bool,
        hours: usize,
    ) -> Self {
        Self {
            initial_state,
            surface_area_m2,
            tracks_energy,
            records: Vec::with_capacity(hours),
        }
    }

    pub(crate) fn push(&mut self, record: HourRecord) {
        self.records.push(record);
    }

    /// Basin state before the first hour
    pub fn initial_state(&self) -> &SimulationState {
        &self.initial_state
    }

    /// Basin surface area of the run (m²)
    pub fn surface_area_m2(&self) -> f64 {
        self.surface_area_m2
    }

    /// Whether records carry an [`EnergyBalance`]
    pub fn tracks_energy(&self) -> bool {
        self.tracks_energy
    }

    pub fn records(&self) -> &[HourRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HourRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record of the last hour
    pub fn last(&self) -> Option<&HourRecord> {
        self.records.last()
    }

    /// Hour indices as floating-point abscissae
    pub fn hours(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.hour as f64).collect()
    }

    /// Quantities present in this trace
    pub fn available_quantities(&self) -> Vec<TraceQuantity> {
        TraceQuantity::ALL
            .into_iter()
            .filter(|q| self.tracks_energy || !q.is_energy())
            .collect()
    }

    /// Full series of `quantity`, or `None` for energy terms when energy is not tracked
    pub fn column(&self, quantity: TraceQuantity) -> Option<DVector<f64>> {
        self.records
            .iter()
            .map(|record| quantity.value(record))
            .collect::<Option<Vec<f64>>>()
            .map(DVector::from_vec)
    }

    /// Total distillate (L)
    pub fn total_fresh_water(&self) -> f64 {
        self.last().map_or(0.0, |r| r.cumulative_fresh_water)
    }
}

impl<'a> IntoIterator for &'a SimulationTrace {
    type Item = &'a HourRecord;
    type IntoIter = std::slice::Iter<'a, HourRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
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

    fn record(hour: usize, evaporation: f64, energy: Option<EnergyBalance>) -> HourRecord {
        HourRecord {
            hour,
            solar_radiation: 100.0 * hour as f64,
            water_temp: 30.0,
            glass_temp: 26.0,
            condensation_efficiency: 0.8,
            evaporation_rate: evaporation,
            brine_discharge: 0.0,
            salt_concentration: 35.0,
            cumulative_fresh_water: evaporation * (hour + 1) as f64,
            remaining_saline_water: 10.0 - evaporation * (hour + 1) as f64,
            energy,
        }
    }

    fn trace(tracks_energy: bool) -> SimulationTrace {
        let initial = SimulationState::initial(
            &SimulationConfig::default(),
            BasinTemperatures { water_c: 20.0, glass_c: 16.0 },
        );
        let mut trace = SimulationTrace::with_capacity(initial, 1.0, tracks_energy, 3);
        for hour in 0..3 {
            let energy = tracks_energy.then_some(EnergyBalance {
                absorbed: 12.0,
                lost: 1.8,
            });
            trace.push(record(hour, 0.5, energy));
        }
        trace
    }

    #[test]
    fn test_column_extraction() {
        let trace = trace(true);
        let solar = trace.column(TraceQuantity::SolarRadiation).unwrap();
        assert_eq!(solar.as_slice(), &[0.0, 100.0, 200.0]);

        let absorbed = trace.column(TraceQuantity::EnergyAbsorbed).unwrap();
        assert_eq!(absorbed.sum(), 36.0);
    }

    #[test]
    fn test_energy_columns_absent_without_tracking() {
        let trace = trace(false);
        assert!(trace.column(TraceQuantity::EnergyLost).is_none());
        assert!(trace.column(TraceQuantity::EvaporationRate).is_some());
        assert_eq!(trace.available_quantities().len(), 9);
    }

    #[test]
    fn test_total_fresh_water_and_hours() {
        let trace = trace(true);
        assert_eq!(trace.len(), 3);
        assert_eq!(trace.hours(), vec![0.0, 1.0, 2.0]);
        assert!((trace.total_fresh_water() - 1.5).abs() < 1e-12);
        assert_eq!(trace.iter().count(), 3);
    }

    #[test]
    fn test_quantity_labels_are_unique() {
        let mut keys: Vec<&str> = TraceQuantity::ALL.iter().map(|q| q.key()).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), TraceQuantity::ALL.len());
        assert_eq!(TraceQuantity::SaltConcentration.to_string(), "Salt Concentration (g/L)");
    }
}
