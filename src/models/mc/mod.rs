pub mod estimator;
pub mod rng;
pub mod simulator;

pub use estimator::{PathEstimator, PathwiseDelta, PayoffSum};
pub use rng::SimulationRng;
pub use simulator::MonteCarloSimulator;

use crate::config::SimulationConfig;
use crate::error::Result;
use crate::models::traits::CallPricer;
use crate::types::{ContractParams, SimulationResult};

/// Runs a full simulation for `params` under `config`.
pub fn simulate(params: &ContractParams, config: &SimulationConfig) -> Result<SimulationResult> {
    MonteCarloSimulator::new(params, config)?.run()
}

/// Monte Carlo pricer usable behind [`CallPricer`]. Prices are statistical
/// estimates; set `config.seed` for repeatable output.
#[derive(Debug, Clone, Default)]
pub struct McPricer {
    pub config: SimulationConfig,
}

impl McPricer {
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }
}

impl CallPricer for McPricer {
    fn name(&self) -> &'static str {
        "Monte Carlo"
    }

    fn price_call(&self, params: &ContractParams) -> Result<f64> {
        let config = SimulationConfig {
            estimate_delta: false,
            ..self.config.clone()
        };
        Ok(simulate(params, &config)?.price)
    }
}
