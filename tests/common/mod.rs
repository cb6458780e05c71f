#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use klinebt::domain::candle::Candle;
use klinebt::domain::error::KlinebtError;
use klinebt::ports::data_port::DataPort;
use std::collections::HashMap;

pub fn time(minute: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap() + Duration::minutes(minute)
}

pub fn make_candle(minute: i64, close: f64) -> Candle {
    Candle {
        symbol: "BTCUSDT".into(),
        timestamp: time(minute),
        open: close,
        high: close,
        low: close,
        close,
        volume: 1000.0,
    }
}

pub fn make_candles(closes: &[f64]) -> Vec<Candle> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| make_candle(i as i64, close))
        .collect()
}

pub struct MockDataPort {
    pub data: HashMap<String, Vec<Candle>>,
    pub errors: HashMap<String, String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_candles(mut self, symbol: &str, candles: Vec<Candle>) -> Self {
        self.data.insert(symbol.to_string(), candles);
        self
    }

    pub fn with_error(mut self, symbol: &str, reason: &str) -> Self {
        self.errors.insert(symbol.to_string(), reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn fetch_candles(
        &self,
        symbol: &str,
        _interval: &str,
        limit: usize,
    ) -> Result<Vec<Candle>, KlinebtError> {
        if let Some(reason) = self.errors.get(symbol) {
            return Err(KlinebtError::Data {
                reason: reason.clone(),
            });
        }
        let mut candles = self.data.get(symbol).cloned().unwrap_or_default();
        candles.truncate(limit);
        Ok(candles)
    }
}
