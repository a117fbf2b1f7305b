use serde::{Deserialize, Serialize};

use crate::error::{PricingError, Result};

/// Market and contract inputs for pricing a single European call.
///
/// `dividend_yield` may be omitted when deserializing and defaults to zero,
/// which gives the textbook no-dividend formulas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContractParams {
    /// Spot price of the underlying (S0)
    pub current_price: f64,
    /// Exercise price (K)
    pub strike_price: f64,
    /// Continuously-compounded annual rate (r), may be zero or negative
    pub risk_free_rate: f64,
    /// Annualized volatility of log-returns (sigma)
    pub volatility: f64,
    /// Years until expiry (T)
    pub time_to_maturity: f64,
    /// Continuous dividend yield (q)
    #[serde(default)]
    pub dividend_yield: f64,
}

fn positive(name: &'static str, value: f64) -> Result<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(PricingError::InvalidParameter {
            name,
            value,
            constraint: "must be > 0 and finite",
        })
    }
}

impl ContractParams {
    /// Dividend-free contract. Use [`ContractParams::with_dividend_yield`] to add `q`.
    pub fn new(
        current_price: f64,
        strike_price: f64,
        risk_free_rate: f64,
        volatility: f64,
        time_to_maturity: f64,
    ) -> Self {
        Self {
            current_price,
            strike_price,
            risk_free_rate,
            volatility,
            time_to_maturity,
            dividend_yield: 0.0,
        }
    }

    pub fn with_dividend_yield(self, dividend_yield: f64) -> Self {
        Self {
            dividend_yield,
            ..self
        }
    }

    pub fn with_volatility(self, volatility: f64) -> Self {
        Self { volatility, ..self }
    }

    /// Checks every field against its domain.
    ///
    /// S0, K, sigma and T must be strictly positive so that `ln(S0/K)` and
    /// `sigma * sqrt(T)` are well defined; q must be non-negative; r only
    /// has to be finite.
    pub fn validate(&self) -> Result<()> {
        positive("current_price", self.current_price)?;
        positive("strike_price", self.strike_price)?;
        positive("volatility", self.volatility)?;
        positive("time_to_maturity", self.time_to_maturity)?;

        if !self.risk_free_rate.is_finite() {
            return Err(PricingError::InvalidParameter {
                name: "risk_free_rate",
                value: self.risk_free_rate,
                constraint: "must be finite",
            });
        }
        if !(self.dividend_yield >= 0.0 && self.dividend_yield.is_finite()) {
            return Err(PricingError::InvalidParameter {
                name: "dividend_yield",
                value: self.dividend_yield,
                constraint: "must be >= 0 and finite",
            });
        }
        Ok(())
    }

    /// Present-value factor e^(-rT).
    pub fn discount_factor(&self) -> f64 {
        (-self.risk_free_rate * self.time_to_maturity).exp()
    }

    /// Dividend scaling factor e^(-qT).
    pub fn dividend_discount_factor(&self) -> f64 {
        (-self.dividend_yield * self.time_to_maturity).exp()
    }
}

/// First and second order sensitivities of a call, computed together.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Greeks {
    pub delta: f64,
    pub gamma: f64,
    pub theta: f64,
    pub vega: f64,
}

/// One point of the Monte Carlo convergence trace.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TracePoint {
    /// Number of samples drawn so far (1-based)
    pub index: usize,
    /// Discounted running average of the payoff after `index` samples
    pub price: f64,
}

/// Output of a Monte Carlo run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Running estimate after each sample, indices 1..=num_simulations
    pub trace: Vec<TracePoint>,
    /// Final price estimate (equals the last trace value)
    pub price: f64,
    /// Pathwise Delta estimate, when requested
    pub delta: Option<f64>,
    /// Sample standard error of the discounted payoff mean
    pub standard_error: f64,
    /// Number of samples actually drawn
    pub num_simulations: usize,
    /// Seed of the random stream that produced this run
    pub seed: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contract_params_validation() {
        assert!(ContractParams::new(100.0, 100.0, 0.05, 0.2, 1.0)
            .validate()
            .is_ok());
        // Negative and zero rates are legitimate
        assert!(ContractParams::new(100.0, 100.0, -0.01, 0.2, 1.0)
            .validate()
            .is_ok());
        assert!(ContractParams::new(100.0, 100.0, 0.0, 0.2, 1.0)
            .validate()
            .is_ok());

        assert!(ContractParams::new(0.0, 100.0, 0.05, 0.2, 1.0)
            .validate()
            .is_err());
        assert!(ContractParams::new(100.0, -5.0, 0.05, 0.2, 1.0)
            .validate()
            .is_err());
        assert!(ContractParams::new(100.0, 100.0, 0.05, 0.0, 1.0)
            .validate()
            .is_err());
        assert!(ContractParams::new(100.0, 100.0, 0.05, 0.2, 0.0)
            .validate()
            .is_err());
        assert!(ContractParams::new(100.0, 100.0, f64::NAN, 0.2, 1.0)
            .validate()
            .is_err());
        assert!(ContractParams::new(100.0, 100.0, 0.05, 0.2, 1.0)
            .with_dividend_yield(-0.01)
            .validate()
            .is_err());
    }

    #[test]
    fn test_validation_reports_offending_field() {
        let err = ContractParams::new(100.0, 100.0, 0.05, 0.2, 0.0)
            .validate()
            .unwrap_err();
        match err {
            PricingError::InvalidParameter { name, value, .. } => {
                assert_eq!(name, "time_to_maturity");
                assert_eq!(value, 0.0);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_dividend_yield_defaults_to_zero() {
        let params: ContractParams = toml::from_str(
            r#"
            current_price = 100.0
            strike_price = 95.0
            risk_free_rate = 0.03
            volatility = 0.25
            time_to_maturity = 0.5
            "#,
        )
        .unwrap();
        assert_eq!(params.dividend_yield, 0.0);
        assert_eq!(params.strike_price, 95.0);
    }
}
