//! Technical indicator implementations.
//!
//! All functions are pure transforms over a price slice, producing one
//! output per input bar. Outputs that have no defined value yet (warm-up
//! windows) are NaN; strict comparisons against NaN are false, which lets
//! strategies treat warm-up bars as Hold without special-casing.

pub mod ema;
pub mod macd;
pub mod rsi;

pub use ema::calculate_ema;
pub use macd::{calculate_macd, MacdSeries};
pub use rsi::calculate_rsi;
