//! Helper functions for integration tests

use solar_still::simulator::{BasinSimulator, HourRecord};

use super::mock_models::{ConstantSun, FixedThermal, NoPenalty, PerfectCondensation};

/// Simulator whose hourly evaporation is `k · irradiance · (water − glass) · A`
pub fn constant_rate_simulator(irradiance: f64, water_c: f64, glass_c: f64) -> BasinSimulator {
    BasinSimulator::default()
        .with_solar(ConstantSun(irradiance))
        .with_thermal(FixedThermal::new(water_c, glass_c))
        .with_salinity(NoPenalty)
        .with_condensation(PerfectCondensation)
}

/// Dissolved salt (g) at the end of the recorded hour
pub fn salt_mass(record: &HourRecord) -> f64 {
    record.salt_concentration * record.remaining_saline_water
}

/// Relative error |computed - expected| / |expected|
pub fn relative_error(computed: f64, expected: f64) -> f64 {
    if expected.abs() < 1e-14 {
        computed.abs()
    } else {
        (computed - expected).abs() / expected.abs()
    }
}

/// Assert that two values are within `tolerance` of each other
pub fn assert_close(actual: f64, expected: f64, tolerance: f64, message: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{}: got {}, expected {} (diff {}, tolerance {})",
        message, actual, expected, diff, tolerance
    );
}
