//! Trading signals service module.
//!
//! Indicator calculations, regime classification, weighted factor scoring
//! and level derivation, combined by the engine into a single decision.

pub mod config;
pub mod engine;
pub mod indicators;
pub mod levels;
pub mod regime;
pub mod scoring;

pub use config::{Factor, FactorWeights, ScoringConfig};
pub use engine::{compute_indicators, evaluate, SignalEngine};
pub use levels::compute_levels;
