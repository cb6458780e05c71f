//! Binance klines REST adapter.
//!
//! Fetches candlestick data from `GET /api/v3/klines`. The endpoint
//! returns an array of arrays: open time in milliseconds, then
//! string-encoded prices and volume; on failure it returns an object
//! carrying `code` and `msg` instead.

use crate::domain::candle::Candle;
use crate::domain::error::KlinebtError;
use crate::ports::data_port::DataPort;
use chrono::DateTime;
use serde_json::Value;

pub const DEFAULT_BASE_URL: &str = "https://api.binance.com";

/// Binance caps a single klines request at this many rows.
pub const MAX_LIMIT: usize = 1000;

pub struct BinanceAdapter {
    // The client owns the connection pool for every request this adapter
    // makes; dropping the adapter releases it.
    client: reqwest::blocking::Client,
    base_url: String,
}

impl BinanceAdapter {
    pub fn new(base_url: &str) -> Self {
        BinanceAdapter {
            client: reqwest::blocking::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn klines_url(&self, symbol: &str, interval: &str, limit: usize) -> String {
        format!(
            "{}/api/v3/klines?symbol={}&interval={}&limit={}",
            self.base_url, symbol, interval, limit
        )
    }
}

impl Default for BinanceAdapter {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl DataPort for BinanceAdapter {
    fn fetch_candles(
        &self,
        symbol: &str,
        interval: &str,
        limit: usize,
    ) -> Result<Vec<Candle>, KlinebtError> {
        let symbol = symbol.to_uppercase();
        let url = self.klines_url(&symbol, interval, limit.min(MAX_LIMIT));

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| KlinebtError::Http {
                reason: e.to_string(),
            })?;
        let body = response.text().map_err(|e| KlinebtError::Http {
            reason: e.to_string(),
        })?;

        parse_klines(&symbol, &body)
    }
}

/// Parse a klines response body into candles, surfacing Binance error
/// objects as [`KlinebtError::Api`].
fn parse_klines(symbol: &str, body: &str) -> Result<Vec<Candle>, KlinebtError> {
    let value: Value = serde_json::from_str(body).map_err(|e| KlinebtError::Data {
        reason: format!("kline payload is not JSON: {e}"),
    })?;

    if let Some(code) = value.get("code").and_then(Value::as_i64) {
        let msg = value
            .get("msg")
            .and_then(Value::as_str)
            .unwrap_or("unknown error")
            .to_string();
        return Err(KlinebtError::Api { code, msg });
    }

    let rows = value.as_array().ok_or_else(|| KlinebtError::Data {
        reason: "expected a kline array".into(),
    })?;

    let mut candles = Vec::with_capacity(rows.len());
    for row in rows {
        candles.push(parse_kline_row(symbol, row)?);
    }
    Ok(candles)
}

fn parse_kline_row(symbol: &str, row: &Value) -> Result<Candle, KlinebtError> {
    let fields = row.as_array().ok_or_else(|| KlinebtError::Data {
        reason: "kline row is not an array".into(),
    })?;

    let open_time = fields
        .first()
        .and_then(Value::as_i64)
        .ok_or_else(|| KlinebtError::Data {
            reason: "missing open time in kline row".into(),
        })?;
    let timestamp =
        DateTime::from_timestamp_millis(open_time).ok_or_else(|| KlinebtError::Data {
            reason: format!("open time {open_time} out of range"),
        })?;

    Ok(Candle {
        symbol: symbol.to_string(),
        timestamp,
        open: field_f64(fields, 1, "open")?,
        high: field_f64(fields, 2, "high")?,
        low: field_f64(fields, 3, "low")?,
        close: field_f64(fields, 4, "close")?,
        volume: field_f64(fields, 5, "volume")?,
    })
}

fn field_f64(fields: &[Value], index: usize, name: &str) -> Result<f64, KlinebtError> {
    fields
        .get(index)
        .and_then(Value::as_str)
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| KlinebtError::Data {
            reason: format!("invalid {name} in kline row"),
        })
}
