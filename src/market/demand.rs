//! Multinomial-logit demand allocation.
//!
//! Each firm `p` offers utility `u_p = (quality_p - price_p) / h`; the
//! outside good offers `u_0 = outside_good / h`. Market shares are
//!
//! ```text
//! share_p = exp(u_p) / (exp(u_0) + sum_i exp(u_i))
//! ```
//!
//! and a firm's round profit is `(price_p - marginal_cost) * share_p`.

/// Above this exponent `exp` overflows `f64`, so shares are computed from
/// utilities shifted by their maximum instead.
const MAX_UNSHIFTED_EXPONENT: f64 = 700.0;

/// Logit demand for a single market.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LogitDemand {
    horizontal_differentiation: f64,
    outside_good: f64,
    marginal_cost: f64,
}

impl LogitDemand {
    /// Create a demand model.
    ///
    /// `horizontal_differentiation` must be positive; `GameConfig::validate`
    /// guarantees this for configured games.
    #[must_use]
    pub fn new(horizontal_differentiation: f64, outside_good: f64, marginal_cost: f64) -> Self {
        debug_assert!(horizontal_differentiation > 0.0);
        Self {
            horizontal_differentiation,
            outside_good,
            marginal_cost,
        }
    }

    #[must_use]
    pub fn marginal_cost(&self) -> f64 {
        self.marginal_cost
    }

    /// Market share of every firm, given prices and quality constants.
    #[must_use]
    pub fn shares(&self, prices: &[f64], quality: &[f64]) -> Vec<f64> {
        let (weights, denominator) = self.weights(prices, quality);
        weights.into_iter().map(|w| w / denominator).collect()
    }

    /// Net profit of every firm for one round.
    ///
    /// Evaluated as `((price - cost) * weight) / denominator`, with the
    /// denominator summed outside good first and then firms in player order.
    /// Terminal winners compare points exactly, so this order is fixed.
    #[must_use]
    pub fn profits(&self, prices: &[f64], quality: &[f64]) -> Vec<f64> {
        let (weights, denominator) = self.weights(prices, quality);
        weights
            .into_iter()
            .zip(prices)
            .map(|(w, &price)| ((price - self.marginal_cost) * w) / denominator)
            .collect()
    }

    /// Unnormalized logit weights and their denominator.
    fn weights(&self, prices: &[f64], quality: &[f64]) -> (Vec<f64>, f64) {
        debug_assert_eq!(prices.len(), quality.len());
        let h = self.horizontal_differentiation;

        let outside = self.outside_good / h;
        let utilities: Vec<f64> = prices
            .iter()
            .zip(quality)
            .map(|(&price, &q)| (q - price) / h)
            .collect();

        let max_utility = utilities.iter().copied().fold(outside, f64::max);
        if max_utility > MAX_UNSHIFTED_EXPONENT {
            let weights: Vec<f64> = utilities.iter().map(|u| (u - max_utility).exp()).collect();
            let mut denominator = (outside - max_utility).exp();
            for w in &weights {
                denominator += w;
            }
            return (weights, denominator);
        }

        let weights: Vec<f64> = utilities.iter().map(|u| u.exp()).collect();
        let mut denominator = outside.exp();
        for w in &weights {
            denominator += w;
        }
        (weights, denominator)
    }
}
