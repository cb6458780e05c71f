//! CSV report adapter.
//!
//! Writes one `{strategy}_trades.csv` per strategy run plus a single
//! `summary.csv` with a metrics row per strategy. Prices and PnL are
//! rounded to two decimals in the files; in-memory values stay exact.

use crate::domain::backtest::StrategyRun;
use crate::domain::error::KlinebtError;
use crate::domain::trade::Trade;
use crate::ports::report_port::ReportPort;
use serde::Serialize;
use std::fs;
use std::path::Path;

pub struct CsvReportAdapter;

#[derive(Debug, Serialize)]
struct TradeRow {
    entry_time: String,
    entry_price: String,
    exit_time: String,
    exit_price: String,
    strategy: String,
    pnl: String,
    status: String,
}

impl TradeRow {
    fn from_trade(trade: &Trade) -> Self {
        TradeRow {
            entry_time: trade.entry_time.to_rfc3339(),
            entry_price: format!("{:.2}", trade.entry_price),
            exit_time: trade
                .exit_time
                .map(|t| t.to_rfc3339())
                .unwrap_or_default(),
            exit_price: trade
                .exit_price
                .map(|p| format!("{p:.2}"))
                .unwrap_or_default(),
            strategy: trade.strategy.clone(),
            pnl: format!("{:.2}", trade.pnl),
            status: trade.status.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
struct SummaryRow {
    strategy: String,
    total_trades: usize,
    win_rate: String,
    total_pnl: String,
    average_pnl: String,
}

impl ReportPort for CsvReportAdapter {
    fn write(&self, runs: &[StrategyRun], output_dir: &Path) -> Result<(), KlinebtError> {
        fs::create_dir_all(output_dir)?;

        for run in runs {
            let path = output_dir.join(format!("{}_trades.csv", run.strategy));
            let mut writer = csv::Writer::from_path(&path).map_err(csv_error)?;
            for trade in &run.trades {
                writer
                    .serialize(TradeRow::from_trade(trade))
                    .map_err(csv_error)?;
            }
            writer.flush()?;
        }

        let mut writer =
            csv::Writer::from_path(output_dir.join("summary.csv")).map_err(csv_error)?;
        for run in runs {
            writer
                .serialize(SummaryRow {
                    strategy: run.strategy.clone(),
                    total_trades: run.metrics.total_trades,
                    win_rate: format!("{:.2}", run.metrics.win_rate),
                    total_pnl: format!("{:.2}", run.metrics.total_pnl),
                    average_pnl: format!("{:.2}", run.metrics.average_pnl),
                })
                .map_err(csv_error)?;
        }
        writer.flush()?;

        Ok(())
    }
}

fn csv_error(e: csv::Error) -> KlinebtError {
    KlinebtError::Data {
        reason: format!("CSV error: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::metrics::Metrics;
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    fn make_run(strategy: &str, pnls: &[f64]) -> StrategyRun {
        let entry_time = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
        let trades: Vec<Trade> = pnls
            .iter()
            .map(|&pnl| {
                let mut trade = Trade::open(strategy, entry_time, 100.0);
                trade.close(
                    Utc.with_ymd_and_hms(2024, 1, 15, 12, 5, 0).unwrap(),
                    100.0 + pnl,
                    1.0,
                );
                trade
            })
            .collect();
        let metrics = Metrics::compute(&trades);
        StrategyRun {
            strategy: strategy.to_string(),
            trades,
            metrics,
        }
    }

    #[test]
    fn writes_trades_and_summary_files() {
        let dir = TempDir::new().unwrap();
        let runs = vec![make_run("macd_cross", &[10.0, -5.0]), make_run("rsi_trend", &[])];

        CsvReportAdapter.write(&runs, dir.path()).unwrap();

        assert!(dir.path().join("macd_cross_trades.csv").exists());
        assert!(dir.path().join("rsi_trend_trades.csv").exists());
        assert!(dir.path().join("summary.csv").exists());
    }

    #[test]
    fn trade_rows_carry_rounded_values() {
        let dir = TempDir::new().unwrap();
        let runs = vec![make_run("macd_cross", &[10.126])];

        CsvReportAdapter.write(&runs, dir.path()).unwrap();

        let content = fs::read_to_string(dir.path().join("macd_cross_trades.csv")).unwrap();
        let mut lines = content.lines();
        assert_eq!(
            lines.next().unwrap(),
            "entry_time,entry_price,exit_time,exit_price,strategy,pnl,status"
        );
        let row = lines.next().unwrap();
        assert!(row.contains("100.00"));
        assert!(row.contains("110.13"));
        assert!(row.contains("10.13"));
        assert!(row.contains("WIN"));
    }

    #[test]
    fn summary_has_one_row_per_strategy() {
        let dir = TempDir::new().unwrap();
        let runs = vec![make_run("macd_cross", &[10.0, -5.0]), make_run("rsi_trend", &[-3.0])];

        CsvReportAdapter.write(&runs, dir.path()).unwrap();

        let content = fs::read_to_string(dir.path().join("summary.csv")).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(
            lines[0],
            "strategy,total_trades,win_rate,total_pnl,average_pnl"
        );
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("macd_cross,2,50.00,5.00,2.50"));
        assert!(lines[2].starts_with("rsi_trend,1,0.00,-3.00,-3.00"));
    }

    #[test]
    fn empty_run_list_still_writes_summary() {
        let dir = TempDir::new().unwrap();
        CsvReportAdapter.write(&[], dir.path()).unwrap();

        let content = fs::read_to_string(dir.path().join("summary.csv")).unwrap();
        assert!(content.trim().is_empty() || content.lines().count() <= 1);
    }

    #[test]
    fn creates_missing_output_directory() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("reports").join("today");

        CsvReportAdapter.write(&[make_run("macd_cross", &[1.0])], &nested).unwrap();
        assert!(nested.join("summary.csv").exists());
    }
}
