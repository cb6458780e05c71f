//! OHLCV candle representation.

use chrono::{DateTime, Utc};

use super::error::KlinebtError;

#[derive(Debug, Clone, PartialEq)]
pub struct Candle {
    pub symbol: String,
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// Check that candle timestamps are strictly increasing, no duplicates.
///
/// The simulation assumes this ordering; a violation means the upstream
/// data is corrupt and the run must fail before producing any trades.
pub fn check_monotonic(candles: &[Candle]) -> Result<(), KlinebtError> {
    for (i, pair) in candles.windows(2).enumerate() {
        if pair[1].timestamp <= pair[0].timestamp {
            return Err(KlinebtError::NonMonotonic { position: i + 1 });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn make_candle(minute: u32, close: f64) -> Candle {
        Candle {
            symbol: "BTCUSDT".into(),
            timestamp: Utc.with_ymd_and_hms(2024, 1, 15, 12, minute, 0).unwrap(),
            open: close,
            high: close + 1.0,
            low: close - 1.0,
            close,
            volume: 1000.0,
        }
    }

    #[test]
    fn monotonic_series_passes() {
        let candles = vec![make_candle(0, 100.0), make_candle(1, 101.0), make_candle(2, 99.0)];
        assert!(check_monotonic(&candles).is_ok());
    }

    #[test]
    fn empty_and_single_pass() {
        assert!(check_monotonic(&[]).is_ok());
        assert!(check_monotonic(&[make_candle(0, 100.0)]).is_ok());
    }

    #[test]
    fn duplicate_timestamp_fails() {
        let candles = vec![make_candle(0, 100.0), make_candle(1, 101.0), make_candle(1, 102.0)];
        let err = check_monotonic(&candles).unwrap_err();
        assert!(matches!(err, KlinebtError::NonMonotonic { position: 2 }));
    }

    #[test]
    fn decreasing_timestamp_fails() {
        let candles = vec![make_candle(5, 100.0), make_candle(3, 101.0)];
        let err = check_monotonic(&candles).unwrap_err();
        assert!(matches!(err, KlinebtError::NonMonotonic { position: 1 }));
    }
}
