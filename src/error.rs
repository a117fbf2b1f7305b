//! Error types shared by the analytic and simulation pricers.

use thiserror::Error;

use crate::config::MAX_SIMULATIONS;

/// Errors returned by pricing and configuration routines.
///
/// Validation happens before any arithmetic, so a pricing call either
/// succeeds or fails with one of these; it never hands back NaN.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PricingError {
    /// A contract parameter is outside its domain.
    #[error("invalid parameter '{name}' = {value}: {constraint}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        constraint: &'static str,
    },

    /// Simulation count outside `[1, MAX_SIMULATIONS]`.
    #[error("invalid simulation count {0}: must be in range [1, {max}]", max = MAX_SIMULATIONS)]
    InvalidSimulationCount(usize),

    /// A result was requested before the simulator drew a single sample.
    #[error("simulation has not run any iterations yet")]
    NoSamples,

    /// A sample overflowed; the estimate after this many samples is inf or NaN.
    #[error("simulation estimate is not finite after {0} samples")]
    NonFiniteEstimate(usize),

    #[error("implied volatility: {0}")]
    ImpliedVolatility(String),

    #[error("config error: {0}")]
    Config(String),
}

impl From<toml::de::Error> for PricingError {
    fn from(e: toml::de::Error) -> Self {
        PricingError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PricingError>;
