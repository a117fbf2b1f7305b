use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::error::{PricingError, Result};

/// Upper bound on the number of samples a single run may draw.
pub const MAX_SIMULATIONS: usize = 100_000_000;

/// Monte Carlo run configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Number of terminal-price samples to draw
    #[serde(default = "default_num_simulations")]
    pub num_simulations: usize,

    /// Random seed for reproducibility (None draws one from OS entropy)
    #[serde(default)]
    pub seed: Option<u64>,

    /// Whether to accumulate the pathwise Delta estimator alongside the price
    #[serde(default = "default_estimate_delta")]
    pub estimate_delta: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            num_simulations: default_num_simulations(),
            seed: None,
            estimate_delta: default_estimate_delta(),
        }
    }
}

impl SimulationConfig {
    /// Small seeded run for smoke tests and debugging
    pub fn quick() -> Self {
        Self {
            num_simulations: 1_000,
            seed: Some(42),
            ..Self::default()
        }
    }

    /// Unseeded run with the default sample count
    pub fn standard() -> Self {
        Self::default()
    }

    /// Large seeded run, close enough to the closed form for comparisons
    pub fn convergence() -> Self {
        Self {
            num_simulations: 200_000,
            seed: Some(42),
            ..Self::default()
        }
    }

    pub fn with_seed(self, seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..self
        }
    }

    pub fn with_num_simulations(self, num_simulations: usize) -> Self {
        Self {
            num_simulations,
            ..self
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.num_simulations == 0 || self.num_simulations > MAX_SIMULATIONS {
            return Err(PricingError::InvalidSimulationCount(self.num_simulations));
        }
        Ok(())
    }

    /// Parses and validates a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading simulation config {}", path.display()))?;
        Self::from_toml_str(&raw)
            .with_context(|| format!("parsing simulation config {}", path.display()))
    }
}

fn default_num_simulations() -> usize {
    15_000
}

fn default_estimate_delta() -> bool {
    true
}
