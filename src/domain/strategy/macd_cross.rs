//! MACD crossover strategy.
//!
//! Buy while the MACD line sits above its own EMA, sell while below,
//! hold on exact ties.

use super::Strategy;
use crate::domain::candle::Candle;
use crate::domain::indicator::{calculate_ema, calculate_macd};
use crate::domain::signal::Signal;

#[derive(Debug, Clone, PartialEq)]
pub struct MacdCrossStrategy {
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    /// Period of the EMA applied to the MACD line itself.
    pub ema_period: usize,
}

impl Default for MacdCrossStrategy {
    fn default() -> Self {
        MacdCrossStrategy {
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            ema_period: 10,
        }
    }
}

impl Strategy for MacdCrossStrategy {
    fn name(&self) -> &str {
        "macd_cross"
    }

    fn generate_signals(&self, candles: &[Candle]) -> Vec<Signal> {
        let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();

        let macd = calculate_macd(&closes, self.macd_fast, self.macd_slow, self.macd_signal);
        let macd_ema = calculate_ema(&macd.line, self.ema_period);

        let mut signals = vec![Signal::default(); candles.len()];
        for i in 0..candles.len() {
            if macd.line[i] > macd_ema[i] {
                signals[i] = Signal::Buy;
            }
            if macd.line[i] < macd_ema[i] {
                signals[i] = Signal::Sell;
            }
        }
        signals
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn make_candles(closes: &[f64]) -> Vec<Candle> {
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| Candle {
                symbol: "BTCUSDT".into(),
                timestamp: Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap()
                    + chrono::Duration::minutes(i as i64),
                open: close,
                high: close,
                low: close,
                close,
                volume: 1000.0,
            })
            .collect()
    }

    #[test]
    fn rising_prices_signal_buy() {
        // A steady uptrend keeps the fast EMA above the slow one, so the
        // MACD line pulls ahead of its own EMA from the second bar on.
        let closes: Vec<f64> = (0..40).map(|i| 100.0 + i as f64).collect();
        let signals = MacdCrossStrategy::default().generate_signals(&make_candles(&closes));

        assert_eq!(signals[0], Signal::Hold);
        assert!(signals[1..].iter().all(|s| *s == Signal::Buy));
    }

    #[test]
    fn falling_prices_signal_sell() {
        let closes: Vec<f64> = (0..40).map(|i| 100.0 - i as f64).collect();
        let signals = MacdCrossStrategy::default().generate_signals(&make_candles(&closes));

        assert_eq!(signals[0], Signal::Hold);
        assert!(signals[1..].iter().all(|s| *s == Signal::Sell));
    }

    #[test]
    fn flat_prices_hold() {
        let signals = MacdCrossStrategy::default().generate_signals(&make_candles(&[100.0; 30]));
        assert!(signals.iter().all(|s| *s == Signal::Hold));
    }

    #[test]
    fn one_signal_per_candle() {
        let closes: Vec<f64> = (0..10).map(|i| 100.0 + (i % 3) as f64).collect();
        let candles = make_candles(&closes);
        let signals = MacdCrossStrategy::default().generate_signals(&candles);
        assert_eq!(signals.len(), candles.len());
    }

    #[test]
    fn empty_series() {
        let signals = MacdCrossStrategy::default().generate_signals(&[]);
        assert!(signals.is_empty());
    }

    #[test]
    fn default_parameters() {
        let strategy = MacdCrossStrategy::default();
        assert_eq!(strategy.macd_fast, 12);
        assert_eq!(strategy.macd_slow, 26);
        assert_eq!(strategy.macd_signal, 9);
        assert_eq!(strategy.ema_period, 10);
        assert_eq!(strategy.name(), "macd_cross");
    }
}
