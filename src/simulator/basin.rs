//! Hour-by-hour stepper of a single-basin still

use crate::config::SimulationConfig;
use crate::error::InvalidConfigError;
use crate::physics::{
    BasinTemperatures,
    CondensationEfficiency,
    CondensationModel,
    IrradianceModel,
    LinearThermal,
    ModelConfig,
    SalinityCurve,
    SalinityPenalty,
    SolarProfile,
    ThermalModel,
};
use crate::physics::solar::HOURS_PER_DAY;

use super::noise::{HourNoise, JitterSource};
use super::state::{HourFluxes, SimulationState};
use super::trace::{EnergyBalance, HourRecord, SimulationTrace};

/// Floor on the water/glass difference left by temperature noise (K)
const MIN_CONDENSATION_GAP: f64 = 0.1;

/// Records reserved up front; longer runs grow the trace as they go
const MAX_PREALLOCATED_HOURS: usize = 8760;

fn preallocated_hours(horizon: usize) -> usize {
    horizon.min(MAX_PREALLOCATED_HOURS)
}

/// Single-basin solar still simulator
///
/// Holds the four physical strategies and nothing else: every call to
/// [`run`](Self::run) starts from a fresh [`SimulationState`], so one
/// simulator can serve any number of runs, from any number of threads.
///
/// # Example
///
/// ```rust
/// use solar_still::config::SimulationConfig;
/// use solar_still::physics::{CondensationEfficiency, SolarProfile};
/// use solar_still::simulator::BasinSimulator;
///
/// let simulator = BasinSimulator::default()
///     .with_solar(SolarProfile::clipped_sine(950.0, 6.0, 18.0))
///     .with_condensation(CondensationEfficiency::fixed(0.85));
///
/// let trace = simulator.run(&SimulationConfig::default()).unwrap();
/// assert_eq!(trace.len(), 24);
/// assert!(trace.total_fresh_water() > 0.0);
/// ```
pub struct BasinSimulator {
    solar: Box<dyn IrradianceModel>,
    thermal: Box<dyn ThermalModel>,
    salinity: Box<dyn SalinityPenalty>,
    condensation: Box<dyn CondensationModel>,
}

impl Default for BasinSimulator {
    fn default() -> Self {
        Self {
            solar: Box::new(SolarProfile::default()),
            thermal: Box::new(LinearThermal::default()),
            salinity: Box::new(SalinityCurve::default()),
            condensation: Box::new(CondensationEfficiency::default()),
        }
    }
}

impl std::fmt::Debug for BasinSimulator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasinSimulator")
            .field("solar", &self.solar.name())
            .field("thermal", &self.thermal.name())
            .field("salinity", &self.salinity.name())
            .field("condensation", &self.condensation.name())
            .finish()
    }
}

impl BasinSimulator {
    /// Build a simulator from a serializable strategy description
    pub fn from_model(model: &ModelConfig) -> Result<Self, InvalidConfigError> {
        model.validate()?;
        Ok(Self {
            solar: Box::new(model.solar.clone()),
            thermal: Box::new(model.thermal),
            salinity: Box::new(model.salinity.clone()),
            condensation: Box::new(model.condensation),
        })
    }

    pub fn with_solar(mut self, solar: impl IrradianceModel + 'static) -> Self {
        self.solar = Box::new(solar);
        self
    }

    pub fn with_thermal(mut self, thermal: impl ThermalModel + 'static) -> Self {
        self.thermal = Box::new(thermal);
        self
    }

    pub fn with_salinity(mut self, salinity: impl SalinityPenalty + 'static) -> Self {
        self.salinity = Box::new(salinity);
        self
    }

    pub fn with_condensation(mut self, condensation: impl CondensationModel + 'static) -> Self {
        self.condensation = Box::new(condensation);
        self
    }

    /// Names of the four strategies, e.g. for file metadata
    pub fn describe(&self) -> String {
        format!(
            "{} / {} / {} / {}",
            self.solar.name(),
            self.thermal.name(),
            self.salinity.name(),
            self.condensation.name()
        )
    }

    /// Simulate `config.horizon_hours` hours
    ///
    /// The configuration is validated first; an invalid one yields an error
    /// and no trace. Once stepping starts nothing can fail: numerical hazards
    /// (empty basin, negative or NaN rates, noise pushing the glass above the
    /// water) are clamped in place.
    pub fn run(&self, config: &SimulationConfig) -> Result<SimulationTrace, InvalidConfigError> {
        config.validate()?;

        let horizon = config.horizon_hours;
        let mut jitter = config.jitter.map(JitterSource::new);

        let mut state = SimulationState::initial(config, self.thermal.temperatures(0.0));
        let mut trace = SimulationTrace::with_capacity(
            state,
            config.surface_area_m2,
            config.track_energy,
            preallocated_hours(horizon),
        );

        if config.overfills_basin() {
            log::warn!(
                "initial volume {} L exceeds the basin capacity of {} L",
                config.initial_volume_liters,
                config.basin_capacity_liters()
            );
        }

        let mut saturation_reported = config.starts_saturated();
        if saturation_reported {
            log::warn!(
                "initial concentration {} g/L is at or above the saturation cutoff of {} g/L, nothing will evaporate",
                config.initial_salt_concentration,
                config.max_salt_concentration
            );
        }
        let mut dry_reported = false;

        for hour in 0..horizon {
            let noise = jitter.as_mut().map(JitterSource::draw).unwrap_or_default();

            let irradiance = self.irradiance(hour, &noise);
            let temperatures = self.temperatures(irradiance, &noise);
            let efficiency = self.condensation.efficiency(temperatures.glass_c);
            let evaporation = self.evaporation(config, &state, irradiance, temperatures, efficiency);

            let discharge = config
                .discharge
                .map_or(0.0, |d| d.volume_for(state.saline_volume_liters, evaporation));

            let energy = config
                .track_energy
                .then(|| energy_balance(config, irradiance, noise.energy_loss));

            state = state.advance(
                &HourFluxes {
                    hour,
                    temperatures,
                    evaporation,
                    discharge,
                },
                config.max_salt_concentration,
            );

            log::debug!(
                "hour {:>3}: I = {:7.1} W/m², evaporation = {:.4} L/h, V = {:.4} L, c = {:.2} g/L",
                hour,
                irradiance,
                evaporation,
                state.saline_volume_liters,
                state.salt_concentration,
            );

            if !saturation_reported && state.salt_concentration >= config.max_salt_concentration {
                log::warn!(
                    "saturation cutoff of {} g/L reached at hour {}, evaporation stops",
                    config.max_salt_concentration,
                    hour
                );
                saturation_reported = true;
            }
            if !dry_reported && state.is_dry() {
                log::warn!("basin ran dry at hour {}", hour);
                dry_reported = true;
            }

            trace.push(HourRecord {
                hour,
                solar_radiation: irradiance,
                water_temp: temperatures.water_c,
                glass_temp: temperatures.glass_c,
                condensation_efficiency: efficiency,
                evaporation_rate: evaporation,
                brine_discharge: discharge,
                salt_concentration: state.salt_concentration,
                cumulative_fresh_water: state.cumulative_fresh_water_liters,
                remaining_saline_water: state.saline_volume_liters,
                energy,
            });
        }

        log::info!(
            "{} h simulated ({}, {}): {:.3} L fresh water, {:.3} L brine left",
            horizon,
            self.solar.name(),
            self.salinity.name(),
            state.cumulative_fresh_water_liters,
            state.saline_volume_liters,
        );

        Ok(trace)
    }

    fn irradiance(&self, hour: usize, noise: &HourNoise) -> f64 {
        let hour_of_day = (hour as f64) % HOURS_PER_DAY;
        let base = self.solar.irradiance(hour_of_day);

        // Night stays dark under noise
        if base > 0.0 {
            (base + noise.solar).max(0.0)
        } else {
            0.0
        }
    }

    fn temperatures(&self, irradiance: f64, noise: &HourNoise) -> BasinTemperatures {
        let nominal = self.thermal.temperatures(irradiance);
        let water_c = nominal.water_c + noise.water_temp;
        let gap = self.thermal.condensation_gap().max(MIN_CONDENSATION_GAP);

        BasinTemperatures {
            water_c,
            glass_c: (nominal.glass_c + noise.glass_temp).min(water_c - gap),
        }
    }

    /// `k · I · ΔT · A · penalty(c) · η`, clamped to `[0, V]`
    fn evaporation(
        &self,
        config: &SimulationConfig,
        state: &SimulationState,
        irradiance: f64,
        temperatures: BasinTemperatures,
        efficiency: f64,
    ) -> f64 {
        let volume = state.saline_volume_liters;
        if volume <= 0.0 || state.salt_concentration >= config.max_salt_concentration {
            return 0.0;
        }

        let penalty = self
            .salinity
            .factor(state.salt_concentration, config.max_salt_concentration);
        let rate = config.evaporation_coefficient
            * irradiance
            * temperatures.differential()
            * config.surface_area_m2
            * penalty
            * efficiency;

        if rate.is_nan() { 0.0 } else { rate.clamp(0.0, volume) }
    }
}

/// Energy absorbed and lost over a one-hour step (Wh)
fn energy_balance(config: &SimulationConfig, irradiance: f64, loss_noise: f64) -> EnergyBalance {
    let absorbed = irradiance * config.surface_area_m2 * (1.0 - config.glass_emissivity);
    let loss_fraction = (config.energy_loss_fraction + loss_noise).clamp(0.0, 1.0);
    EnergyBalance {
        absorbed,
        lost: absorbed * loss_fraction,
    }
}

// =================================================================================================
// Tests
// =================================================================================================
