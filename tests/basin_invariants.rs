//! Integration tests: invariants of the hourly mass balance
//!
//! These tests run whole simulations, with the built-in strategies and with
//! the deterministic mocks of `common`, and check the properties every trace
//! must satisfy.

use solar_still::config::{BrineDischarge, JitterConfig, SimulationConfig};
use solar_still::physics::SolarProfile;
use solar_still::simulator::{BasinSimulator, SimulationTrace};

mod common;
use common::{assert_close, constant_rate_simulator, relative_error, salt_mass};

/// Power of two so that `k · 1024 W/m² · 10 K · 1 m²` is exactly 2.5 L/h
const EXACT_COEFFICIENT: f64 = 1.0 / 4096.0;

fn exact_config() -> SimulationConfig {
    SimulationConfig {
        evaporation_coefficient: EXACT_COEFFICIENT,
        max_salt_concentration: 1000.0,
        ..Default::default()
    }
}

fn exact_simulator() -> BasinSimulator {
    constant_rate_simulator(1024.0, 40.0, 30.0)
}

/// (volume, fresh water) before each hour followed by the record of that hour
fn volume_steps(trace: &SimulationTrace) -> Vec<(f64, f64, f64, f64)> {
    let initial = trace.initial_state();
    let mut previous = (initial.saline_volume_liters, initial.cumulative_fresh_water_liters);
    trace
        .iter()
        .map(|r| {
            let step = (previous.0, previous.1, r.remaining_saline_water, r.cumulative_fresh_water);
            previous = (r.remaining_saline_water, r.cumulative_fresh_water);
            step
        })
        .collect()
}

// =================================================================================================
// Hand-Computed Trace
// =================================================================================================

#[test]
fn test_constant_rate_matches_hand_calculation() {
    let trace = exact_simulator().run(&exact_config()).unwrap();
    let records = trace.records();

    let expected_volume = [7.5, 5.0, 2.5, 0.0];
    let expected_fresh = [2.5, 5.0, 7.5, 10.0];
    for hour in 0..4 {
        assert_eq!(records[hour].evaporation_rate, 2.5, "hour {hour}");
        assert_eq!(records[hour].remaining_saline_water, expected_volume[hour]);
        assert_eq!(records[hour].cumulative_fresh_water, expected_fresh[hour]);
    }

    assert_close(records[0].salt_concentration, 350.0 / 7.5, 1e-12, "hour 0");
    assert_close(records[1].salt_concentration, 70.0, 1e-12, "hour 1");
    assert_close(records[2].salt_concentration, 140.0, 1e-12, "hour 2");

    // Empty basin: nothing more to evaporate, concentration frozen
    for record in &records[3..] {
        assert_eq!(record.remaining_saline_water, 0.0);
        assert_eq!(record.cumulative_fresh_water, 10.0);
        assert_close(record.salt_concentration, 140.0, 1e-12, "after dry-out");
    }
    for record in &records[4..] {
        assert_eq!(record.evaporation_rate, 0.0);
    }
}

// =================================================================================================
// Mass Balance
// =================================================================================================

#[test]
fn test_volume_and_fresh_water_are_monotone() {
    let configs = [
        SimulationConfig::default(),
        SimulationConfig::default().with_horizon(72).with_jitter(JitterConfig::seeded(5)),
        SimulationConfig::default().with_discharge(BrineDischarge::default()),
        exact_config(),
    ];

    for (i, config) in configs.iter().enumerate() {
        for simulator in [BasinSimulator::default(), exact_simulator()] {
            let trace = simulator.run(config).unwrap();
            for (hour, (v0, f0, v1, f1)) in volume_steps(&trace).into_iter().enumerate() {
                assert!(v1 <= v0, "config {i}, hour {hour}: volume rose {v0} -> {v1}");
                assert!(v1 >= 0.0, "config {i}, hour {hour}: negative volume");
                assert!(f1 >= f0, "config {i}, hour {hour}: fresh water fell {f0} -> {f1}");
            }
            assert!(trace.total_fresh_water() <= config.initial_volume_liters + 1e-9);
        }
    }
}

#[test]
fn test_salt_mass_conserved_without_discharge() {
    let config = SimulationConfig {
        max_salt_concentration: 1000.0,
        ..Default::default()
    }
    .with_horizon(48)
    .with_jitter(JitterConfig::seeded(11));

    for simulator in [BasinSimulator::default(), exact_simulator()] {
        let trace = simulator.run(&config).unwrap();
        let initial = config.initial_volume_liters * config.initial_salt_concentration;

        // Capped hours shed salt by construction
        let uncapped = trace.iter().filter(|r| {
            r.remaining_saline_water > 0.0 && r.salt_concentration < config.max_salt_concentration
        });
        for record in uncapped {
            let error = relative_error(salt_mass(record), initial);
            assert!(error < 1e-9, "hour {}: salt mass drifted by {error}", record.hour);
        }
    }
}

#[test]
fn test_discharged_brine_carries_its_salt() {
    let config = SimulationConfig::default()
        .with_horizon(48)
        .with_discharge(BrineDischarge::default());
    let trace = BasinSimulator::default().run(&config).unwrap();

    let mut concentration = trace.initial_state().salt_concentration;
    let mut mass = trace.initial_state().salt_mass_grams();
    for record in &trace {
        let expected = mass - concentration * record.brine_discharge;
        let error = relative_error(salt_mass(record), expected);
        assert!(error < 1e-9, "hour {}: salt mass off by {error}", record.hour);

        concentration = record.salt_concentration;
        mass = salt_mass(record);
    }
}

#[test]
fn test_saturation_cutoff_stops_evaporation() {
    let config = SimulationConfig {
        max_salt_concentration: 40.0,
        ..exact_config()
    };
    let trace = exact_simulator().run(&config).unwrap();
    let records = trace.records();

    // First hour overshoots 46.7 g/L and is capped
    assert_eq!(records[0].salt_concentration, 40.0);
    assert_eq!(records[0].evaporation_rate, 2.5);

    for record in &records[1..] {
        assert_eq!(record.evaporation_rate, 0.0, "hour {}", record.hour);
        assert_eq!(record.salt_concentration, 40.0);
        assert_eq!(record.remaining_saline_water, 7.5);
        assert_eq!(record.cumulative_fresh_water, 2.5);
    }
}

#[test]
fn test_saturation_with_discharge_keeps_draining() {
    let config = SimulationConfig {
        max_salt_concentration: 40.0,
        ..exact_config()
    }
    .with_discharge(BrineDischarge::default());
    let trace = exact_simulator().run(&config).unwrap();
    let records = trace.records();

    // Hour 0 evaporates 2.5 L and discharges the 0.02 L/h rate limit
    assert_eq!(records[0].evaporation_rate, 2.5);
    assert_eq!(records[0].brine_discharge, 0.02);
    assert_eq!(records[0].salt_concentration, 40.0);
    assert_close(records[0].remaining_saline_water, 7.48, 1e-12, "hour 0");

    for (hour, (v0, f0, v1, f1)) in volume_steps(&trace).into_iter().enumerate().skip(1) {
        let record = &records[hour];
        assert_eq!(record.evaporation_rate, 0.0, "hour {hour}");
        assert_eq!(record.brine_discharge, 0.02, "hour {hour}");
        assert_eq!(record.salt_concentration, 40.0, "hour {hour}");
        assert_close(v0 - v1, 0.02, 1e-12, "drained volume");
        assert_eq!(f1, f0);
    }
    let last = records.last().unwrap();
    assert_close(last.remaining_saline_water, 7.48 - 0.02 * 23.0, 1e-9, "final volume");
}

#[test]
fn test_starting_at_saturation_never_evaporates() {
    for discharge in [None, Some(BrineDischarge::default())] {
        let config = SimulationConfig {
            initial_salt_concentration: 120.0,
            max_salt_concentration: 120.0,
            discharge,
            ..Default::default()
        }
        .with_horizon(48);

        for simulator in [BasinSimulator::default(), exact_simulator()] {
            let trace = simulator.run(&config).unwrap();
            assert_eq!(trace.len(), 48);
            for record in &trace {
                assert_eq!(record.evaporation_rate, 0.0, "hour {}", record.hour);
                assert_eq!(record.cumulative_fresh_water, 0.0);
                assert_eq!(record.salt_concentration, 120.0);
            }
            if discharge.is_none() {
                assert!(trace.iter().all(|r| r.remaining_saline_water == 10.0));
            }
        }
    }
}

#[test]
fn test_concentration_never_exceeds_cutoff() {
    let config = SimulationConfig {
        evaporation_coefficient: 0.002,
        ..Default::default()
    }
    .with_horizon(96)
    .with_jitter(JitterConfig::seeded(21));
    let trace = BasinSimulator::default().run(&config).unwrap();

    assert!(trace.iter().all(|r| r.salt_concentration <= config.max_salt_concentration));
    assert!(trace.iter().all(|r| r.salt_concentration >= config.initial_salt_concentration));
}

// =================================================================================================
// Trace Shape
// =================================================================================================

#[test]
fn test_trace_completeness() {
    for horizon in [1, 5, 24, 100] {
        let config = SimulationConfig::default()
            .with_horizon(horizon)
            .with_jitter(JitterConfig::seeded(horizon as u64));
        let trace = BasinSimulator::default().run(&config).unwrap();

        assert_eq!(trace.len(), horizon);
        for (i, record) in trace.iter().enumerate() {
            assert_eq!(record.hour, i);
            for value in [
                record.solar_radiation,
                record.water_temp,
                record.glass_temp,
                record.condensation_efficiency,
                record.evaporation_rate,
                record.brine_discharge,
                record.salt_concentration,
                record.cumulative_fresh_water,
                record.remaining_saline_water,
            ] {
                assert!(value.is_finite(), "horizon {horizon}, hour {i}");
            }
            assert!(record.energy.is_some());
        }
    }
}

// =================================================================================================
// Reference Scenarios
// =================================================================================================

#[test]
fn test_scenario_one_sunny_day() {
    let config = SimulationConfig::default().with_water(10.0, 35.0).with_horizon(24);
    let trace = BasinSimulator::default().run(&config).unwrap();

    let fresh = trace.total_fresh_water();
    assert!(fresh > 0.0 && fresh < 10.0, "fresh water {fresh}");

    let peak = trace
        .iter()
        .max_by(|a, b| a.solar_radiation.total_cmp(&b.solar_radiation))
        .unwrap();
    assert_eq!(peak.hour, 12);
}

#[test]
fn test_scenario_small_basin_runs_dry() {
    let config = SimulationConfig {
        evaporation_coefficient: 0.01,
        max_salt_concentration: 1000.0,
        ..Default::default()
    }
    .with_water(1.0, 35.0);
    let trace = BasinSimulator::default().run(&config).unwrap();
    let records = trace.records();

    let dry = records
        .iter()
        .position(|r| r.remaining_saline_water == 0.0)
        .expect("basin never ran dry");
    assert!(dry < 23, "dry at hour {dry}");

    let collected = records[dry].cumulative_fresh_water;
    for record in &records[dry + 1..] {
        assert_eq!(record.evaporation_rate, 0.0);
        assert_eq!(record.remaining_saline_water, 0.0);
        assert_eq!(record.cumulative_fresh_water, collected);
    }
}

#[test]
fn test_scenario_no_sun() {
    for jitter in [None, Some(JitterConfig::seeded(8))] {
        let config = SimulationConfig {
            jitter,
            ..Default::default()
        };
        let trace = BasinSimulator::default()
            .with_solar(SolarProfile::Dark)
            .run(&config)
            .unwrap();

        for record in &trace {
            assert_eq!(record.solar_radiation, 0.0);
            assert_eq!(record.evaporation_rate, 0.0);
            assert_eq!(record.cumulative_fresh_water, 0.0);
            assert_eq!(record.remaining_saline_water, config.initial_volume_liters);
            assert_eq!(record.salt_concentration, config.initial_salt_concentration);
        }
    }
}

// =================================================================================================
// Reproducibility and Noise
// =================================================================================================

#[test]
fn test_same_seed_gives_identical_traces() {
    let config = SimulationConfig::default()
        .with_horizon(72)
        .with_discharge(BrineDischarge::default())
        .with_jitter(JitterConfig::seeded(99));

    let simulator = BasinSimulator::default();
    let first = simulator.run(&config).unwrap();
    let second = simulator.run(&config).unwrap();
    let fresh_simulator = BasinSimulator::default().run(&config).unwrap();

    assert_eq!(first, second);
    assert_eq!(first, fresh_simulator);

    let other_seed = simulator
        .run(&config.clone().with_jitter(JitterConfig::seeded(100)))
        .unwrap();
    assert_ne!(first, other_seed);
}

#[test]
fn test_glass_below_water_for_many_seeds() {
    let simulator = BasinSimulator::default();
    for seed in 0..20 {
        let config = SimulationConfig::default().with_jitter(JitterConfig {
            seed,
            water_temp_c: 3.0,
            glass_temp_c: 3.0,
            ..Default::default()
        });
        let trace = simulator.run(&config).unwrap();
        for record in &trace {
            assert!(
                record.glass_temp < record.water_temp,
                "seed {seed}, hour {}: glass {} >= water {}",
                record.hour, record.glass_temp, record.water_temp
            );
            assert!(record.solar_radiation >= 0.0);
        }
    }
}

#[test]
fn test_discharge_respects_its_bounds() {
    let discharge = BrineDischarge {
        max_fraction: 0.05,
        max_rate_liters_per_hour: 0.3,
    };
    let config = SimulationConfig::default()
        .with_horizon(120)
        .with_discharge(discharge);
    let trace = BasinSimulator::default().run(&config).unwrap();

    let mut volume = trace.initial_state().saline_volume_liters;
    for record in &trace {
        let d = record.brine_discharge;
        assert!(d >= 0.0);
        assert!(d <= discharge.max_fraction * volume + 1e-12, "hour {}", record.hour);
        assert!(d <= discharge.max_rate_liters_per_hour + 1e-12);
        assert!(d + record.evaporation_rate <= volume + 1e-12);
        volume = record.remaining_saline_water;
    }
}
