//! Technical indicator implementations.
//!
//! Pure functions over close series or candle slices. Inputs are borrowed
//! and never modified.

pub mod atr;
pub mod ema;
pub mod rsi;
pub mod stats;
pub mod trend;
pub mod vwap;

pub use atr::{atr, average_range, true_range};
pub use ema::ema;
pub use rsi::rsi;
pub use stats::{mean, std_dev, z_score};
pub use trend::trend_slope;
pub use vwap::{typical_price, vwap};
