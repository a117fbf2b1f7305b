pub mod bs;
pub mod mc;

/// Common traits shared by the pricers
pub mod traits {
    use crate::error::Result;
    use crate::types::ContractParams;

    /// Anything that can produce a European call price from contract inputs.
    pub trait CallPricer {
        fn name(&self) -> &'static str;
        fn price_call(&self, params: &ContractParams) -> Result<f64>;
    }
}

/// Standard normal helpers used by the closed-form formulas
pub mod utils {
    use std::f64::consts::{PI, SQRT_2};

    /// Standard normal cumulative distribution function N(x), via `erfc` so
    /// the far lower tail does not cancel to zero.
    pub fn norm_cdf(x: f64) -> f64 {
        0.5 * libm::erfc(-x / SQRT_2)
    }

    /// Standard normal density (1/sqrt(2 pi)) e^(-x^2/2).
    pub fn norm_pdf(x: f64) -> f64 {
        (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
    }

}
