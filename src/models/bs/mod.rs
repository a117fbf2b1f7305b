// src/models/bs/mod.rs

//! Closed-form Black-Scholes pricing for European calls with an optional
//! continuous dividend yield q:
//!
//! C = S·e^(-qT)·N(d1) - K·e^(-rT)·N(d2)
//!
//! d1 = (ln(S/K) + (r - q + σ²/2)·T) / (σ·√T),  d2 = d1 - σ·√T
//!
//! Setting q = 0 gives the textbook no-dividend formula through the same code.

use roots::{find_root_brent, SimpleConvergency};
use tracing::warn;

use crate::error::{PricingError, Result};
use crate::models::traits::CallPricer;
use crate::models::utils::{norm_cdf, norm_pdf};
use crate::types::{ContractParams, Greeks};

/// Volatility search interval for implied-volatility solving
const IV_LOWER: f64 = 1e-6;
const IV_UPPER: f64 = 5.0;
const IV_TOLERANCE: f64 = 1e-10;
const IV_MAX_ITER: usize = 200;

/// Intermediate quantities shared by the price and every Greek.
#[derive(Debug, Clone, Copy)]
struct Terms {
    d1: f64,
    d2: f64,
    sqrt_t: f64,
    /// φ(d1)
    norm_prime_d1: f64,
    /// e^(-qT)
    dividend_discount: f64,
    /// e^(-rT)
    discount: f64,
}

impl Terms {
    /// Caller must have validated `params`.
    fn compute(params: &ContractParams) -> Self {
        let sqrt_t = params.time_to_maturity.sqrt();
        let sigma_sqrt_t = params.volatility * sqrt_t;

        let log_term = (params.current_price / params.strike_price).ln();
        let drift_term = params.risk_free_rate - params.dividend_yield
            + 0.5 * params.volatility * params.volatility;

        let d1 = (log_term + drift_term * params.time_to_maturity) / sigma_sqrt_t;
        let d2 = d1 - sigma_sqrt_t;

        Self {
            d1,
            d2,
            sqrt_t,
            norm_prime_d1: norm_pdf(d1),
            dividend_discount: params.dividend_discount_factor(),
            discount: params.discount_factor(),
        }
    }
}

/// Returns `(d1, d2)` for the given contract.
///
/// # Errors
///
/// [`PricingError::InvalidParameter`] when S0, K, σ or T is not strictly
/// positive (or any input is non-finite).
pub fn calculate_d1_d2(params: &ContractParams) -> Result<(f64, f64)> {
    params.validate()?;
    let terms = Terms::compute(params);
    Ok((terms.d1, terms.d2))
}

fn call_from_terms(params: &ContractParams, t: &Terms) -> f64 {
    params.current_price * t.dividend_discount * norm_cdf(t.d1)
        - params.strike_price * t.discount * norm_cdf(t.d2)
}

/// Price of a European call.
pub fn call_price(params: &ContractParams) -> Result<f64> {
    params.validate()?;
    Ok(call_from_terms(params, &Terms::compute(params)))
}

/// Price of a European put, K·e^(-rT)·N(-d2) - S·e^(-qT)·N(-d1).
pub fn put_price(params: &ContractParams) -> Result<f64> {
    params.validate()?;
    let t = Terms::compute(params);
    Ok(params.strike_price * t.discount * norm_cdf(-t.d2)
        - params.current_price * t.dividend_discount * norm_cdf(-t.d1))
}

/// Delta, Gamma, Theta and Vega of a call from one shared evaluation of
/// d1, d2, φ(d1) and e^(-qT).
///
/// - Delta = N(d1)·e^(-qT)
/// - Gamma = e^(-qT)·φ(d1) / (S·σ·√T)
/// - Vega  = S·e^(-qT)·T·φ(d1)
/// - Theta = -S·e^(-qT)·φ(d1)·σ / (2√T) - r·K·e^(-rT)·N(d2)
///
/// Theta is per year and Vega per unit of volatility.
pub fn greeks(params: &ContractParams) -> Result<Greeks> {
    params.validate()?;
    let t = Terms::compute(params);

    let s = params.current_price;
    let sigma = params.volatility;

    let delta = norm_cdf(t.d1) * t.dividend_discount;
    let gamma = t.dividend_discount * t.norm_prime_d1 / (s * sigma * t.sqrt_t);
    let vega = s * t.dividend_discount * params.time_to_maturity * t.norm_prime_d1;
    let theta = -(s * t.dividend_discount * t.norm_prime_d1 * sigma) / (2.0 * t.sqrt_t)
        - params.risk_free_rate * params.strike_price * t.discount * norm_cdf(t.d2);

    Ok(Greeks {
        delta,
        gamma,
        theta,
        vega,
    })
}

/// Solves for the volatility at which the call price equals `target_price`.
///
/// The `volatility` field of `params` is ignored. The target must lie
/// strictly inside the no-arbitrage band
/// `(max(S·e^(-qT) - K·e^(-rT), 0), S·e^(-qT))`.
pub fn implied_volatility(params: &ContractParams, target_price: f64) -> Result<f64> {
    // Any positive volatility lets the other fields go through validation
    let base = params.with_volatility(IV_UPPER);
    base.validate()?;

    let upper_bound = base.current_price * base.dividend_discount_factor();
    let lower_bound = (upper_bound - base.strike_price * base.discount_factor()).max(0.0);
    if !target_price.is_finite() || target_price <= lower_bound || target_price >= upper_bound {
        return Err(PricingError::ImpliedVolatility(format!(
            "target price {} outside arbitrage bounds ({}, {})",
            target_price, lower_bound, upper_bound
        )));
    }

    let objective = |sigma: f64| -> f64 {
        let p = base.with_volatility(sigma);
        call_from_terms(&p, &Terms::compute(&p)) - target_price
    };

    let mut convergency = SimpleConvergency {
        eps: IV_TOLERANCE,
        max_iter: IV_MAX_ITER,
    };
    match find_root_brent(IV_LOWER, IV_UPPER, &objective, &mut convergency) {
        Ok(sigma) => Ok(sigma),
        Err(e) => {
            warn!(target_price, error = ?e, "implied volatility root finding failed");
            Err(PricingError::ImpliedVolatility(format!(
                "root finding failed for target price {}: {:?}",
                target_price, e
            )))
        }
    }
}

/// Closed-form pricer usable behind [`CallPricer`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BlackScholes;

impl CallPricer for BlackScholes {
    fn name(&self) -> &'static str {
        "Black-Scholes"
    }

    fn price_call(&self, params: &ContractParams) -> Result<f64> {
        call_price(params)
    }
}
