//! RSI + EMA trend filter strategy.
//!
//! Buy where RSI trades above the oversold level while price holds above
//! its EMA. Sell where RSI is overbought or price drops below the EMA.
//! The sell condition is applied second, so a candle satisfying both
//! resolves to Sell.

use super::Strategy;
use crate::domain::candle::Candle;
use crate::domain::indicator::{calculate_ema, calculate_rsi};
use crate::domain::signal::Signal;

#[derive(Debug, Clone, PartialEq)]
pub struct RsiTrendStrategy {
    pub rsi_period: usize,
    pub ema_period: usize,
    pub rsi_oversold: f64,
    pub rsi_overbought: f64,
}

impl Default for RsiTrendStrategy {
    fn default() -> Self {
        RsiTrendStrategy {
            rsi_period: 14,
            ema_period: 21,
            rsi_oversold: 30.0,
            rsi_overbought: 70.0,
        }
    }
}

impl Strategy for RsiTrendStrategy {
    fn name(&self) -> &str {
        "rsi_trend"
    }

    fn generate_signals(&self, candles: &[Candle]) -> Vec<Signal> {
        let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();

        let rsi = calculate_rsi(&closes, self.rsi_period);
        let ema = calculate_ema(&closes, self.ema_period);

        let mut signals = vec![Signal::default(); candles.len()];
        for i in 0..candles.len() {
            if rsi[i] > self.rsi_oversold && closes[i] > ema[i] {
                signals[i] = Signal::Buy;
            }
            // Evaluated after the buy assignment: a candle matching both
            // conditions resolves to Sell.
            if rsi[i] > self.rsi_overbought || closes[i] < ema[i] {
                signals[i] = Signal::Sell;
            }
        }
        signals
    }
}
