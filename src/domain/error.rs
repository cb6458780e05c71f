//! Domain error types.

/// Top-level error type for klinebt.
#[derive(Debug, thiserror::Error)]
pub enum KlinebtError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("http request failed: {reason}")]
    Http { reason: String },

    #[error("exchange API error {code}: {msg}")]
    Api { code: i64, msg: String },

    #[error("data error: {reason}")]
    Data { reason: String },

    #[error("no candles for {symbol} at interval {interval}")]
    NoData { symbol: String, interval: String },

    #[error("candle timestamps not strictly increasing at index {position}")]
    NonMonotonic { position: usize },

    #[error("signal series has {signals} entries for {candles} candles")]
    SignalMismatch { candles: usize, signals: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&KlinebtError> for std::process::ExitCode {
    fn from(err: &KlinebtError) -> Self {
        let code: u8 = match err {
            KlinebtError::Io(_) => 1,
            KlinebtError::ConfigParse { .. }
            | KlinebtError::ConfigMissing { .. }
            | KlinebtError::ConfigInvalid { .. } => 2,
            KlinebtError::Http { .. }
            | KlinebtError::Api { .. }
            | KlinebtError::Data { .. }
            | KlinebtError::NoData { .. } => 3,
            KlinebtError::NonMonotonic { .. } | KlinebtError::SignalMismatch { .. } => 4,
        };
        std::process::ExitCode::from(code)
    }
}
