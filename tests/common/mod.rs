//! Common utilities for integration tests

pub mod mock_models;
pub mod test_helpers;

// Re-export commonly used items
pub use mock_models::{ConstantSun, FixedThermal, NoPenalty, PerfectCondensation};
pub use test_helpers::{
    assert_close,
    constant_rate_simulator,
    relative_error,
    salt_mass,
};
