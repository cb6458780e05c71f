//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::binance_adapter::{BinanceAdapter, DEFAULT_BASE_URL};
use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::csv_report_adapter::CsvReportAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::backtest::{run_backtest, StrategyRun, DEFAULT_POSITION_SIZE};
use crate::domain::error::KlinebtError;
use crate::domain::metrics::Metrics;
use crate::domain::strategy::{MacdCrossStrategy, RsiTrendStrategy, Strategy};
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(name = "klinebt", about = "Candle-based trading strategy backtester")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run every configured strategy against historical candles
    Backtest {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        symbol: Option<String>,
        #[arg(long)]
        interval: Option<String>,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Download candles from Binance into a CSV file
    Fetch {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        symbol: Option<String>,
        #[arg(long)]
        interval: Option<String>,
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Backtest {
            config,
            symbol,
            interval,
            output,
        } => run_backtest_cmd(&config, symbol.as_deref(), interval.as_deref(), output.as_ref()),
        Command::Fetch {
            config,
            symbol,
            interval,
            limit,
        } => run_fetch(&config, symbol.as_deref(), interval.as_deref(), limit),
        Command::Validate { config } => run_validate(&config),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = KlinebtError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    Binance,
    Csv,
}

#[derive(Debug, Clone)]
pub struct DataSettings {
    pub source: DataSource,
    pub symbol: String,
    pub interval: String,
    pub limit: usize,
    pub base_url: String,
    pub csv_dir: PathBuf,
}

pub fn build_data_settings(config: &dyn ConfigPort) -> Result<DataSettings, KlinebtError> {
    let source = match config
        .get_string("data", "source")
        .unwrap_or_else(|| "binance".to_string())
        .as_str()
    {
        "binance" => DataSource::Binance,
        "csv" => DataSource::Csv,
        other => {
            return Err(KlinebtError::ConfigInvalid {
                section: "data".into(),
                key: "source".into(),
                reason: format!("unknown source {other} (expected binance or csv)"),
            });
        }
    };

    let symbol = config
        .get_string("data", "symbol")
        .ok_or_else(|| KlinebtError::ConfigMissing {
            section: "data".into(),
            key: "symbol".into(),
        })?
        .to_uppercase();

    let limit = config.get_int("data", "limit", 1000);
    if limit <= 0 {
        return Err(KlinebtError::ConfigInvalid {
            section: "data".into(),
            key: "limit".into(),
            reason: "must be a positive integer".into(),
        });
    }

    Ok(DataSettings {
        source,
        symbol,
        interval: config
            .get_string("data", "interval")
            .unwrap_or_else(|| "1m".to_string()),
        limit: limit as usize,
        base_url: config
            .get_string("data", "base_url")
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        csv_dir: PathBuf::from(
            config
                .get_string("data", "csv_dir")
                .unwrap_or_else(|| "data".to_string()),
        ),
    })
}

/// Build the configured strategy list. Each strategy reads its parameters
/// from its own section, falling back to the built-in defaults.
pub fn build_strategies(config: &dyn ConfigPort) -> Result<Vec<Box<dyn Strategy>>, KlinebtError> {
    let list = config
        .get_string("backtest", "strategies")
        .unwrap_or_else(|| "macd_cross, rsi_trend".to_string());

    let mut strategies: Vec<Box<dyn Strategy>> = Vec::new();
    for name in list.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        match name {
            "macd_cross" => {
                let defaults = MacdCrossStrategy::default();
                strategies.push(Box::new(MacdCrossStrategy {
                    macd_fast: get_period(config, "macd_cross", "macd_fast", defaults.macd_fast)?,
                    macd_slow: get_period(config, "macd_cross", "macd_slow", defaults.macd_slow)?,
                    macd_signal: get_period(
                        config,
                        "macd_cross",
                        "macd_signal",
                        defaults.macd_signal,
                    )?,
                    ema_period: get_period(config, "macd_cross", "ema_period", defaults.ema_period)?,
                }));
            }
            "rsi_trend" => {
                let defaults = RsiTrendStrategy::default();
                strategies.push(Box::new(RsiTrendStrategy {
                    rsi_period: get_period(config, "rsi_trend", "rsi_period", defaults.rsi_period)?,
                    ema_period: get_period(config, "rsi_trend", "ema_period", defaults.ema_period)?,
                    rsi_oversold: config.get_double(
                        "rsi_trend",
                        "rsi_oversold",
                        defaults.rsi_oversold,
                    ),
                    rsi_overbought: config.get_double(
                        "rsi_trend",
                        "rsi_overbought",
                        defaults.rsi_overbought,
                    ),
                }));
            }
            other => {
                return Err(KlinebtError::ConfigInvalid {
                    section: "backtest".into(),
                    key: "strategies".into(),
                    reason: format!("unknown strategy {other}"),
                });
            }
        }
    }

    if strategies.is_empty() {
        return Err(KlinebtError::ConfigInvalid {
            section: "backtest".into(),
            key: "strategies".into(),
            reason: "no strategies configured".into(),
        });
    }

    Ok(strategies)
}

fn get_period(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
    default: usize,
) -> Result<usize, KlinebtError> {
    let value = config.get_int(section, key, default as i64);
    if value <= 0 {
        return Err(KlinebtError::ConfigInvalid {
            section: section.into(),
            key: key.into(),
            reason: "must be a positive integer".into(),
        });
    }
    Ok(value as usize)
}

fn run_backtest_cmd(
    config_path: &PathBuf,
    symbol_override: Option<&str>,
    interval_override: Option<&str>,
    output_override: Option<&PathBuf>,
) -> ExitCode {
    // Stage 1: Load and validate config
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    let mut settings = match build_data_settings(&adapter) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    if let Some(symbol) = symbol_override {
        settings.symbol = symbol.to_uppercase();
    }
    if let Some(interval) = interval_override {
        settings.interval = interval.to_string();
    }

    let strategies = match build_strategies(&adapter) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    let position_size = adapter.get_double("backtest", "position_size", DEFAULT_POSITION_SIZE);

    // Stage 2: Fetch candles
    let data_port: Box<dyn DataPort> = match settings.source {
        DataSource::Binance => Box::new(BinanceAdapter::new(&settings.base_url)),
        DataSource::Csv => Box::new(CsvAdapter::new(settings.csv_dir.clone())),
    };

    eprintln!(
        "Fetching {} candles for {} at {}...",
        settings.limit, settings.symbol, settings.interval
    );
    let candles = match data_port.fetch_candles(&settings.symbol, &settings.interval, settings.limit)
    {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    if candles.is_empty() {
        let err = KlinebtError::NoData {
            symbol: settings.symbol.clone(),
            interval: settings.interval.clone(),
        };
        eprintln!("error: {err}");
        return (&err).into();
    }

    // Stage 3: Run every strategy through the simulation
    eprintln!(
        "Running backtest: {} candles, {} strategies",
        candles.len(),
        strategies.len()
    );

    let mut runs = Vec::with_capacity(strategies.len());
    for strategy in &strategies {
        let signals = strategy.generate_signals(&candles);
        let trades = match run_backtest(&candles, &signals, strategy.name(), position_size) {
            Ok(t) => t,
            Err(e) => {
                eprintln!("error: {e}");
                return (&e).into();
            }
        };
        let metrics = Metrics::compute(&trades);

        eprintln!("\n=== {} ===", strategy.name());
        eprintln!("Total Trades:  {}", metrics.total_trades);
        eprintln!("Win Rate:      {:.1}%", metrics.win_rate);
        eprintln!("Total PnL:     {:.2}", metrics.total_pnl);
        eprintln!("Average PnL:   {:.2}", metrics.average_pnl);

        runs.push(StrategyRun {
            strategy: strategy.name().to_string(),
            trades,
            metrics,
        });
    }

    // Stage 4: Write the CSV report
    let output_dir = output_override.cloned().unwrap_or_else(|| {
        PathBuf::from(
            adapter
                .get_string("report", "output_dir")
                .unwrap_or_else(|| "reports".to_string()),
        )
    });

    match CsvReportAdapter.write(&runs, &output_dir) {
        Ok(()) => {
            eprintln!("\nReport written to: {}", output_dir.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn run_fetch(
    config_path: &PathBuf,
    symbol_override: Option<&str>,
    interval_override: Option<&str>,
    limit_override: Option<usize>,
) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    let mut settings = match build_data_settings(&adapter) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    if let Some(symbol) = symbol_override {
        settings.symbol = symbol.to_uppercase();
    }
    if let Some(interval) = interval_override {
        settings.interval = interval.to_string();
    }
    if let Some(limit) = limit_override {
        settings.limit = limit;
    }

    let source = BinanceAdapter::new(&settings.base_url);
    eprintln!(
        "Fetching {} candles for {} at {}...",
        settings.limit, settings.symbol, settings.interval
    );
    let candles = match source.fetch_candles(&settings.symbol, &settings.interval, settings.limit) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    if candles.is_empty() {
        let err = KlinebtError::NoData {
            symbol: settings.symbol.clone(),
            interval: settings.interval.clone(),
        };
        eprintln!("error: {err}");
        return (&err).into();
    }

    let store = CsvAdapter::new(settings.csv_dir.clone());
    match store.save_candles(&candles, &settings.symbol, &settings.interval) {
        Ok(path) => {
            eprintln!("Saved {} candles to {}", candles.len(), path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn run_validate(config_path: &PathBuf) -> ExitCode {
    eprintln!("Validating config: {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    let settings = match build_data_settings(&adapter) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    let strategies = match build_strategies(&adapter) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    eprintln!("\nData:");
    eprintln!("  source:   {:?}", settings.source);
    eprintln!("  symbol:   {}", settings.symbol);
    eprintln!("  interval: {}", settings.interval);
    eprintln!("  limit:    {}", settings.limit);

    eprintln!("\nStrategies:");
    for strategy in &strategies {
        eprintln!("  {}", strategy.name());
    }

    eprintln!("\nConfiguration is valid.");
    ExitCode::SUCCESS
}
