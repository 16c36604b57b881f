//! Market model: price grid and logit demand.
//!
//! - `PriceGrid`: option index -> real price
//! - `LogitDemand`: prices + quality -> shares and per-round profits

pub mod pricing;
pub mod demand;

pub use pricing::{PriceGrid, MONOPOLY_PRICE, NASH_PRICE};
pub use demand::LogitDemand;
