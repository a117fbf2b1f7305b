//! Per-sample accumulators plugged into the simulation loop.
//!
//! Estimators are fed present values: the terminal price and the strike
//! both already multiplied by e^(-rT). Payoff and in-the-money test are
//! unchanged by the common factor, and the running estimate is just
//! `sum / n`. Keeping the discount inside the per-sample exponent means an
//! extreme rate cannot overflow S_T before it is discounted back.

/// Accumulates a per-sample quantity over discounted terminal prices.
pub trait PathEstimator {
    /// `s_t` and `strike` are present values; `s0` is the spot.
    fn observe(&mut self, s0: f64, s_t: f64, strike: f64);
    fn sum(&self) -> f64;
}

/// Call payoff max(S_T - K, 0). Also tracks mean and M2 (Welford) for the
/// standard error of the mean.
#[derive(Debug, Clone, Default)]
pub struct PayoffSum {
    sum: f64,
    count: usize,
    mean: f64,
    m2: f64,
}

impl PayoffSum {
    pub fn payoff(s_t: f64, strike: f64) -> f64 {
        (s_t - strike).max(0.0)
    }

    /// Sample standard error of the payoff mean; zero below two samples.
    pub fn standard_error(&self) -> f64 {
        if self.count < 2 {
            return 0.0;
        }
        let n = self.count as f64;
        let var = self.m2 / (n - 1.0);
        (var / n).sqrt()
    }
}

impl PathEstimator for PayoffSum {
    #[inline]
    fn observe(&mut self, _s0: f64, s_t: f64, strike: f64) {
        let payoff = Self::payoff(s_t, strike);
        self.sum += payoff;

        self.count += 1;
        let delta = payoff - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (payoff - self.mean);
    }

    fn sum(&self) -> f64 {
        self.sum
    }
}

/// Pathwise Delta: each sample contributes S_T/S0 when it finishes in the
/// money, otherwise zero.
#[derive(Debug, Clone, Default)]
pub struct PathwiseDelta {
    sum: f64,
}

impl PathEstimator for PathwiseDelta {
    #[inline]
    fn observe(&mut self, s0: f64, s_t: f64, strike: f64) {
        if s_t > strike {
            self.sum += s_t / s0;
        }
    }

    fn sum(&self) -> f64 {
        self.sum
    }
}
