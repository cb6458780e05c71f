//! CSV candle file adapter.
//!
//! Candle files live in a base directory, one file per symbol and
//! interval (`{SYMBOL}_{interval}.csv`), with the header
//! `timestamp,open,high,low,close,volume` and RFC 3339 timestamps.
//! The same layout is written by the `fetch` command and read back for
//! offline backtests.

use crate::domain::candle::Candle;
use crate::domain::error::KlinebtError;
use crate::ports::data_port::DataPort;
use chrono::{DateTime, Utc};
use std::fs;
use std::path::PathBuf;

pub struct CsvAdapter {
    base_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    pub fn candle_path(&self, symbol: &str, interval: &str) -> PathBuf {
        self.base_path
            .join(format!("{}_{}.csv", symbol.to_uppercase(), interval))
    }

    /// Write candles to the file for `symbol`/`interval`, creating the
    /// base directory if needed.
    pub fn save_candles(
        &self,
        candles: &[Candle],
        symbol: &str,
        interval: &str,
    ) -> Result<PathBuf, KlinebtError> {
        fs::create_dir_all(&self.base_path)?;
        let path = self.candle_path(symbol, interval);

        let mut writer = csv::Writer::from_path(&path).map_err(csv_error)?;
        writer
            .write_record(["timestamp", "open", "high", "low", "close", "volume"])
            .map_err(csv_error)?;
        for candle in candles {
            writer
                .write_record([
                    candle.timestamp.to_rfc3339(),
                    candle.open.to_string(),
                    candle.high.to_string(),
                    candle.low.to_string(),
                    candle.close.to_string(),
                    candle.volume.to_string(),
                ])
                .map_err(csv_error)?;
        }
        writer.flush()?;
        Ok(path)
    }
}

impl DataPort for CsvAdapter {
    fn fetch_candles(
        &self,
        symbol: &str,
        interval: &str,
        limit: usize,
    ) -> Result<Vec<Candle>, KlinebtError> {
        let path = self.candle_path(symbol, interval);
        let content = fs::read_to_string(&path).map_err(|e| KlinebtError::Data {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut reader = csv::Reader::from_reader(content.as_bytes());
        let mut candles = Vec::new();

        for result in reader.records() {
            let record = result.map_err(csv_error)?;

            let timestamp_str = record.get(0).ok_or_else(|| KlinebtError::Data {
                reason: "missing timestamp column".into(),
            })?;
            let timestamp = DateTime::parse_from_rfc3339(timestamp_str)
                .map_err(|e| KlinebtError::Data {
                    reason: format!("invalid timestamp {timestamp_str}: {e}"),
                })?
                .with_timezone(&Utc);

            candles.push(Candle {
                symbol: symbol.to_uppercase(),
                timestamp,
                open: column_f64(&record, 1, "open")?,
                high: column_f64(&record, 2, "high")?,
                low: column_f64(&record, 3, "low")?,
                close: column_f64(&record, 4, "close")?,
                volume: column_f64(&record, 5, "volume")?,
            });
        }

        candles.sort_by_key(|c| c.timestamp);
        candles.truncate(limit);
        Ok(candles)
    }
}

fn column_f64(record: &csv::StringRecord, index: usize, name: &str) -> Result<f64, KlinebtError> {
    record
        .get(index)
        .ok_or_else(|| KlinebtError::Data {
            reason: format!("missing {name} column"),
        })?
        .parse()
        .map_err(|e| KlinebtError::Data {
            reason: format!("invalid {name} value: {e}"),
        })
}

fn csv_error(e: csv::Error) -> KlinebtError {
    KlinebtError::Data {
        reason: format!("CSV error: {e}"),
    }
}
