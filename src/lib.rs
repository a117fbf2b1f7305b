//! # Callprice-Lib: European Call Pricing by Formula and by Simulation
//!
//! `callprice-lib` prices European call options and their sensitivities two
//! independent ways: the closed-form Black-Scholes formula, and a Monte Carlo
//! estimator over exactly-simulated terminal prices of geometric Brownian
//! motion. The two share inputs but no state, so each can be used to check
//! the other.
//!
//! ## Core Features
//!
//! - **Analytic Pricer**: call and put prices, Delta/Gamma/Theta/Vega and
//!   implied volatility, with an optional continuous dividend yield
//! - **Simulation Pricer**: seeded Monte Carlo with a per-sample convergence
//!   trace and an optional pathwise Delta estimator
//! - **Typed validation**: invalid inputs are rejected with a
//!   [`PricingError`] naming the offending field instead of producing NaN
//!
//! ## Quick Start
//!
//! ```rust
//! use callprice_lib::{call_greeks, price_call, simulate_call, default_configs, ContractParams};
//!
//! let params = ContractParams::new(100.0, 100.0, 0.05, 0.2, 1.0);
//!
//! let price = price_call(&params)?;
//! let greeks = call_greeks(&params)?;
//! assert!((price - 10.4506).abs() < 1e-3);
//! assert!(greeks.delta > 0.6 && greeks.delta < 0.65);
//!
//! // Seeded run: repeatable output
//! let result = simulate_call(&params, &default_configs::quick())?;
//! assert_eq!(result.trace.len(), 1_000);
//! assert_eq!(result.price, result.trace.last().unwrap().price);
//! # Ok::<(), callprice_lib::PricingError>(())
//! ```
//!
//! ## Dividends
//!
//! [`ContractParams::dividend_yield`] defaults to zero. A non-zero yield is
//! carried by the same formulas rather than a separate code path, and the
//! simulation drifts at `r - q`.
//!
//! ## Configuration Presets
//!
//! - `quick()`: 1,000 samples, seed 42
//! - `standard()`: 15,000 samples, fresh entropy
//! - `convergence()`: 200,000 samples, seed 42

// ================================================================================================
// MODULES
// ================================================================================================

pub mod config;
pub mod error;
pub mod models;
pub mod types;

// ================================================================================================
// PUBLIC RE-EXPORTS
// ================================================================================================

pub use config::{SimulationConfig, MAX_SIMULATIONS};
pub use error::{PricingError, Result};
pub use types::{ContractParams, Greeks, SimulationResult, TracePoint};

// Analytic pricer
pub use models::bs::{
    calculate_d1_d2, call_price, greeks, implied_volatility, put_price, BlackScholes,
};

// Simulation pricer
pub use models::mc::{
    simulate, McPricer, MonteCarloSimulator, PathEstimator, PathwiseDelta, PayoffSum,
    SimulationRng,
};

pub use models::traits::CallPricer;

// ================================================================================================
// DEFAULT CONFIGURATIONS
// ================================================================================================

/// Pre-configured simulation settings.
///
/// - [`quick()`]: seeded smoke-test run
/// - [`standard()`]: default sample count, unseeded
/// - [`convergence()`]: large seeded run for comparison with the closed form
pub mod default_configs {
    use crate::config::SimulationConfig;

    /// 1,000 samples with seed 42.
    ///
    /// ```rust
    /// let config = callprice_lib::default_configs::quick();
    /// assert_eq!(config.seed, Some(42));
    /// ```
    pub fn quick() -> SimulationConfig {
        SimulationConfig::quick()
    }

    /// 15,000 samples drawn from a fresh entropy-seeded stream.
    pub fn standard() -> SimulationConfig {
        SimulationConfig::standard()
    }

    /// 200,000 samples with seed 42. The standard error for an
    /// at-the-money one-year call is a few cents.
    pub fn convergence() -> SimulationConfig {
        SimulationConfig::convergence()
    }
}

// ================================================================================================
// CONVENIENCE ENTRY POINTS
// ================================================================================================

/// Closed-form Black-Scholes call price.
///
/// # Errors
///
/// [`PricingError::InvalidParameter`] when S0, K, σ or T is not strictly
/// positive, q is negative, or any input is non-finite.
///
/// # Example
///
/// ```rust
/// use callprice_lib::{price_call, ContractParams};
///
/// let params = ContractParams::new(100.0, 100.0, 0.05, 0.2, 1.0).with_dividend_yield(0.02);
/// let price = price_call(&params)?;
/// assert!(price > 0.0 && price < 100.0);
/// # Ok::<(), callprice_lib::PricingError>(())
/// ```
pub fn price_call(params: &ContractParams) -> Result<f64> {
    models::bs::call_price(params)
}

/// Closed-form Delta, Gamma, Theta and Vega of a call, computed from one
/// shared evaluation of d1 and d2.
pub fn call_greeks(params: &ContractParams) -> Result<Greeks> {
    models::bs::greeks(params)
}

/// Monte Carlo call price with its convergence trace.
///
/// The trace holds `(index, running estimate)` for indices
/// `1..=num_simulations` and its last price equals `result.price`.
/// When `config.estimate_delta` is set the pathwise Delta estimate is
/// returned too.
///
/// # Errors
///
/// [`PricingError::InvalidParameter`] for invalid contract inputs,
/// [`PricingError::InvalidSimulationCount`] for `num_simulations == 0`.
///
/// # Example
///
/// ```rust
/// use callprice_lib::{simulate_call, ContractParams, SimulationConfig};
///
/// let params = ContractParams::new(100.0, 100.0, 0.05, 0.2, 1.0);
/// let config = SimulationConfig::default().with_seed(7).with_num_simulations(2_000);
/// let result = simulate_call(&params, &config)?;
/// assert_eq!(result.trace.len(), 2_000);
/// assert!(result.delta.is_some());
/// # Ok::<(), callprice_lib::PricingError>(())
/// ```
pub fn simulate_call(
    params: &ContractParams,
    config: &SimulationConfig,
) -> Result<SimulationResult> {
    models::mc::simulate(params, config)
}
