//! Strategy contract and built-in strategies.
//!
//! A strategy is a pure signal generator: given a candle series it
//! produces one [`Signal`] per candle, using only indicator state at or
//! before that candle. All position handling lives in the backtest
//! engine, so strategies never see trades.

pub mod macd_cross;
pub mod rsi_trend;

pub use macd_cross::MacdCrossStrategy;
pub use rsi_trend::RsiTrendStrategy;

use super::candle::Candle;
use super::signal::Signal;

pub trait Strategy: std::fmt::Debug {
    /// Name used to label trades and report files.
    fn name(&self) -> &str;

    /// One signal per candle, aligned by index.
    fn generate_signals(&self, candles: &[Candle]) -> Vec<Signal>;
}
