//! MACD (Moving Average Convergence Divergence).
//!
//! Line = EMA(fast) - EMA(slow); signal line = EMA(line, signal period).
//! Default parameters: fast=12, slow=26, signal=9.

use super::ema::calculate_ema;

pub const DEFAULT_FAST: usize = 12;
pub const DEFAULT_SLOW: usize = 26;
pub const DEFAULT_SIGNAL: usize = 9;

#[derive(Debug, Clone)]
pub struct MacdSeries {
    pub line: Vec<f64>,
    pub signal: Vec<f64>,
}

pub fn calculate_macd(
    values: &[f64],
    fast: usize,
    slow: usize,
    signal_period: usize,
) -> MacdSeries {
    let ema_fast = calculate_ema(values, fast);
    let ema_slow = calculate_ema(values, slow);

    let line: Vec<f64> = ema_fast
        .iter()
        .zip(&ema_slow)
        .map(|(fast, slow)| fast - slow)
        .collect();
    let signal = calculate_ema(&line, signal_period);

    MacdSeries { line, signal }
}

pub fn calculate_macd_default(values: &[f64]) -> MacdSeries {
    calculate_macd(values, DEFAULT_FAST, DEFAULT_SLOW, DEFAULT_SIGNAL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn line_is_fast_minus_slow() {
        let values: Vec<f64> = (0..20).map(|i| 100.0 + i as f64).collect();
        let macd = calculate_macd(&values, 3, 5, 2);

        let ema_fast = calculate_ema(&values, 3);
        let ema_slow = calculate_ema(&values, 5);

        for i in 0..values.len() {
            assert_relative_eq!(macd.line[i], ema_fast[i] - ema_slow[i]);
        }
    }

    #[test]
    fn signal_is_ema_of_line() {
        let values: Vec<f64> = (0..20).map(|i| 100.0 + (i as f64 * 0.7).sin() * 5.0).collect();
        let macd = calculate_macd(&values, 3, 5, 2);

        let expected = calculate_ema(&macd.line, 2);
        for i in 0..values.len() {
            assert_relative_eq!(macd.signal[i], expected[i]);
        }
    }

    #[test]
    fn constant_input_gives_zero_line() {
        let macd = calculate_macd(&[100.0; 10], 3, 5, 2);
        for value in &macd.line {
            assert_relative_eq!(*value, 0.0);
        }
    }

    #[test]
    fn outputs_align_with_input() {
        let macd = calculate_macd(&[1.0, 2.0, 3.0], 3, 5, 2);
        assert_eq!(macd.line.len(), 3);
        assert_eq!(macd.signal.len(), 3);

        let empty = calculate_macd(&[], 3, 5, 2);
        assert!(empty.line.is_empty());
        assert!(empty.signal.is_empty());
    }

    #[test]
    fn default_constants() {
        assert_eq!(DEFAULT_FAST, 12);
        assert_eq!(DEFAULT_SLOW, 26);
        assert_eq!(DEFAULT_SIGNAL, 9);

        let values: Vec<f64> = (0..40).map(|i| 100.0 + i as f64).collect();
        let via_default = calculate_macd_default(&values);
        let explicit = calculate_macd(&values, DEFAULT_FAST, DEFAULT_SLOW, DEFAULT_SIGNAL);
        assert_eq!(via_default.line, explicit.line);
        assert_eq!(via_default.signal, explicit.signal);
    }
}
