//! Price grid: maps option indices to real prices.
//!
//! The grid spans `[lo, hi]`, obtained by extending the band between the
//! Nash price and the monopoly price on both sides by
//! `interval_size * (monopoly - nash)`. Option 0 is `lo`, option `O - 1`
//! is `hi`, evenly spaced.

use crate::core::{Action, EngineResult, GameError};

/// Approximate Nash equilibrium price of the default market.
///
/// Calibration constant, not derived from the other parameters.
pub const NASH_PRICE: f64 = 1.47292;

/// Approximate monopoly price of the default market.
///
/// Calibration constant, not derived from the other parameters.
pub const MONOPOLY_PRICE: f64 = 1.92498;

/// Evenly spaced prices over the extended equilibrium interval.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PriceGrid {
    monopoly_price: f64,
    lo: f64,
    hi: f64,
    step: f64,
}

impl PriceGrid {
    /// Build the grid from the interval extension factor and tier count.
    pub fn new(interval_size: f64, num_options: usize) -> EngineResult<Self> {
        if num_options <= 1 {
            return Err(GameError::TooFewOptions(num_options));
        }

        let band = MONOPOLY_PRICE - NASH_PRICE;
        let lo = NASH_PRICE - interval_size * band;
        let hi = MONOPOLY_PRICE + interval_size * band;
        // O - 1 steps so that option 0 is lo and option O - 1 is hi.
        let step = (hi - lo) / (num_options - 1) as f64;
        if !(lo.is_finite() && hi.is_finite() && step.is_finite()) {
            return Err(GameError::InvalidInterval(interval_size));
        }

        Ok(Self {
            monopoly_price: MONOPOLY_PRICE,
            lo,
            hi,
            step,
        })
    }

    /// Real price of an option index.
    #[must_use]
    pub fn price(&self, option: Action) -> f64 {
        option as f64 * self.step + self.lo
    }

    #[must_use]
    pub fn monopoly_price(&self) -> f64 {
        self.monopoly_price
    }

    /// Lowest price on the grid (option 0).
    #[must_use]
    pub fn lo(&self) -> f64 {
        self.lo
    }

    /// Highest price on the grid (option `O - 1`).
    #[must_use]
    pub fn hi(&self) -> f64 {
        self.hi
    }

    #[must_use]
    pub fn step(&self) -> f64 {
        self.step
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn test_default_grid() {
        let grid = PriceGrid::new(0.1, 15).unwrap();
        let band = MONOPOLY_PRICE - NASH_PRICE;

        assert!((grid.lo() - (NASH_PRICE - 0.1 * band)).abs() < EPS);
        assert!((grid.hi() - (MONOPOLY_PRICE + 0.1 * band)).abs() < EPS);
        assert!((grid.step() - (grid.hi() - grid.lo()) / 14.0).abs() < EPS);
    }

    #[test]
    fn test_grid_endpoints() {
        let grid = PriceGrid::new(0.1, 15).unwrap();
        assert!((grid.price(0) - grid.lo()).abs() < EPS);
        assert!((grid.price(14) - grid.hi()).abs() < EPS);
    }

    #[test]
    fn test_grid_monotone() {
        let grid = PriceGrid::new(0.5, 7).unwrap();
        for a in 1..7 {
            assert!(grid.price(a) > grid.price(a - 1));
        }
    }

    #[test]
    fn test_zero_interval_spans_anchors() {
        let grid = PriceGrid::new(0.0, 2).unwrap();
        assert_eq!(grid.price(0), NASH_PRICE);
        assert!((grid.price(1) - MONOPOLY_PRICE).abs() < EPS);
    }

    #[test]
    fn test_unbounded_interval_rejected() {
        assert_eq!(
            PriceGrid::new(f64::INFINITY, 15),
            Err(GameError::InvalidInterval(f64::INFINITY))
        );
        assert!(matches!(
            PriceGrid::new(f64::NAN, 15),
            Err(GameError::InvalidInterval(_))
        ));
    }

    #[test]
    fn test_single_option_rejected() {
        assert_eq!(PriceGrid::new(0.1, 1), Err(GameError::TooFewOptions(1)));
        assert_eq!(PriceGrid::new(0.1, 0), Err(GameError::TooFewOptions(0)));
    }
}
