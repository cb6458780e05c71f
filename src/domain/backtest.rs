//! Single-position trade simulation.
//!
//! Walks a time-ordered candle series against an aligned signal series,
//! holding at most one open trade at any point:
//!
//! - Buy with no open trade: enter at that candle's close.
//! - Sell with an open trade: exit at that candle's close.
//! - Anything else: no-op (no pyramiding, no re-entry while a position
//!   is open).
//!
//! A trade still open after the last candle is force-closed at the final
//! close price, so every entry appears in the output exactly once.

use super::candle::{check_monotonic, Candle};
use super::error::KlinebtError;
use super::metrics::Metrics;
use super::signal::Signal;
use super::trade::Trade;

pub const DEFAULT_POSITION_SIZE: f64 = 1.0;

/// One strategy's completed run, as handed to report writers.
#[derive(Debug, Clone)]
pub struct StrategyRun {
    pub strategy: String,
    pub trades: Vec<Trade>,
    pub metrics: Metrics,
}

/// Simulate a single-position account over `candles` driven by `signals`.
///
/// `signals` must align 1:1 with `candles` and the candle timestamps must
/// be strictly increasing; either violation fails before any trade is
/// produced. An empty candle series yields an empty trade list.
pub fn run_backtest(
    candles: &[Candle],
    signals: &[Signal],
    strategy_name: &str,
    position_size: f64,
) -> Result<Vec<Trade>, KlinebtError> {
    if signals.len() != candles.len() {
        return Err(KlinebtError::SignalMismatch {
            candles: candles.len(),
            signals: signals.len(),
        });
    }
    check_monotonic(candles)?;

    // Single slot, not a collection: at most one concurrent position.
    let mut open_trade: Option<Trade> = None;
    let mut trades = Vec::new();

    for (candle, signal) in candles.iter().zip(signals) {
        match signal {
            Signal::Buy if open_trade.is_none() => {
                open_trade = Some(Trade::open(strategy_name, candle.timestamp, candle.close));
            }
            Signal::Sell => {
                if let Some(mut trade) = open_trade.take() {
                    trade.close(candle.timestamp, candle.close, position_size);
                    trades.push(trade);
                }
            }
            _ => {}
        }
    }

    // End of data acts as an implicit sell for whatever is still open.
    if let (Some(mut trade), Some(last)) = (open_trade.take(), candles.last()) {
        trade.close(last.timestamp, last.close, position_size);
        trades.push(trade);
    }

    Ok(trades)
}
