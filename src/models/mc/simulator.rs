// src/models/mc/simulator.rs

//! Monte Carlo call pricer under geometric Brownian motion.
//!
//! Only the terminal value is needed, so each sample is drawn exactly:
//!
//! S_T = S0 · exp((r - q - σ²/2)·T + σ·√T·z),  z ~ N(0, 1)
//!
//! After sample i the running price is e^(-rT) · (Σ payoff / i), recorded
//! in the trace. Samples are generated as present values,
//! e^(-rT)·S_T = S0 · exp(-(q + σ²/2)·T + σ·√T·z), against the discounted
//! strike K·e^(-rT); the rate cancels out of the exponent, so an extreme
//! rate cannot overflow S_T. The state is consistent at every iteration
//! boundary, so a run can be stopped early and still yield a valid
//! (noisier) estimate.

use std::ops::ControlFlow;

use tracing::{debug, warn};

use super::estimator::{PathEstimator, PathwiseDelta, PayoffSum};
use super::rng::SimulationRng;
use crate::config::SimulationConfig;
use crate::error::{PricingError, Result};
use crate::types::{ContractParams, SimulationResult, TracePoint};

/// Largest number of trace points reserved up front; longer runs grow the
/// trace as they go.
pub const TRACE_RESERVE_CAP: usize = 1 << 20;

/// Stateful simulation of one pricing run.
#[derive(Debug, Clone)]
pub struct MonteCarloSimulator {
    params: ContractParams,
    num_simulations: usize,
    /// -(q + σ²/2)·T, the drift of the discounted price
    discounted_drift: f64,
    /// σ·√T
    diffusion: f64,
    /// K·e^(-rT)
    discounted_strike: f64,
    rng: SimulationRng,
    payoff: PayoffSum,
    delta: Option<PathwiseDelta>,
    trace: Vec<TracePoint>,
}

impl MonteCarloSimulator {
    /// Validates inputs and seeds the stream from `config.seed`, or from
    /// entropy when no seed is set.
    pub fn new(params: &ContractParams, config: &SimulationConfig) -> Result<Self> {
        let rng = match config.seed {
            Some(seed) => SimulationRng::from_seed(seed),
            None => SimulationRng::from_entropy(),
        };
        Self::with_rng(params, config, rng)
    }

    /// Like [`MonteCarloSimulator::new`] but with a caller-supplied stream;
    /// `config.seed` is ignored.
    pub fn with_rng(
        params: &ContractParams,
        config: &SimulationConfig,
        rng: SimulationRng,
    ) -> Result<Self> {
        params.validate()?;
        config.validate()?;

        let sigma = params.volatility;
        let t = params.time_to_maturity;

        debug!(
            s0 = params.current_price,
            strike = params.strike_price,
            r = params.risk_free_rate,
            q = params.dividend_yield,
            sigma,
            t,
            num_simulations = config.num_simulations,
            seed = rng.seed(),
            "starting monte carlo simulation"
        );

        Ok(Self {
            params: *params,
            num_simulations: config.num_simulations,
            discounted_drift: -(params.dividend_yield + 0.5 * sigma * sigma) * t,
            diffusion: sigma * t.sqrt(),
            discounted_strike: params.strike_price * params.discount_factor(),
            rng,
            payoff: PayoffSum::default(),
            delta: config.estimate_delta.then(PathwiseDelta::default),
            trace: Vec::with_capacity(config.num_simulations.min(TRACE_RESERVE_CAP)),
        })
    }

    /// Samples drawn so far.
    pub fn completed(&self) -> usize {
        self.trace.len()
    }

    pub fn is_complete(&self) -> bool {
        self.trace.len() >= self.num_simulations
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Latest running estimate, if any sample has been drawn.
    pub fn current_estimate(&self) -> Option<TracePoint> {
        self.trace.last().copied()
    }

    /// Draws one sample and appends the new running estimate to the trace.
    /// Returns `None` once `num_simulations` samples have been drawn.
    pub fn step(&mut self) -> Option<TracePoint> {
        if self.is_complete() {
            return None;
        }

        let z = self.rng.gen_normal();
        let s0 = self.params.current_price;
        let pv_s_t = s0 * (self.discounted_drift + self.diffusion * z).exp();

        self.payoff.observe(s0, pv_s_t, self.discounted_strike);
        if let Some(delta) = self.delta.as_mut() {
            delta.observe(s0, pv_s_t, self.discounted_strike);
        }

        let index = self.trace.len() + 1;
        let point = TracePoint {
            index,
            price: self.payoff.sum() / index as f64,
        };
        self.trace.push(point);
        Some(point)
    }

    /// Runs every remaining sample.
    pub fn run(mut self) -> Result<SimulationResult> {
        while self.step().is_some() {}
        self.into_result()
    }

    /// Runs samples until completion or until `f` returns `Break` for the
    /// latest trace point; the result covers every sample drawn.
    pub fn run_while<F>(mut self, mut f: F) -> Result<SimulationResult>
    where
        F: FnMut(&TracePoint) -> ControlFlow<()>,
    {
        while let Some(point) = self.step() {
            if f(&point).is_break() {
                break;
            }
        }
        self.into_result()
    }

    /// Final (or partial) result from the samples drawn so far.
    ///
    /// # Errors
    ///
    /// [`PricingError::NoSamples`] if `step` has never been called,
    /// [`PricingError::NonFiniteEstimate`] if a sample overflowed.
    pub fn into_result(self) -> Result<SimulationResult> {
        let n = self.trace.len();
        let last = self.trace.last().copied().ok_or(PricingError::NoSamples)?;

        if n < self.num_simulations {
            warn!(
                completed = n,
                requested = self.num_simulations,
                "monte carlo simulation stopped early"
            );
        }

        let delta = self.delta.as_ref().map(|d| d.sum() / n as f64);
        let standard_error = self.payoff.standard_error();

        if !last.price.is_finite() || !delta.map_or(true, f64::is_finite) {
            warn!(price = last.price, delta = ?delta, "monte carlo estimate is not finite");
            return Err(PricingError::NonFiniteEstimate(n));
        }

        debug!(
            price = last.price,
            delta = ?delta,
            standard_error,
            num_simulations = n,
            "monte carlo simulation finished"
        );

        Ok(SimulationResult {
            price: last.price,
            delta,
            standard_error,
            num_simulations: n,
            seed: self.rng.seed(),
            trace: self.trace,
        })
    }
}
