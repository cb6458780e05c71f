//! Round-trip trade records.

use chrono::{DateTime, Utc};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeStatus {
    Open,
    Win,
    Loss,
}

impl fmt::Display for TradeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeStatus::Open => write!(f, "OPEN"),
            TradeStatus::Win => write!(f, "WIN"),
            TradeStatus::Loss => write!(f, "LOSS"),
        }
    }
}

/// One round-trip position. Created open on a buy, mutated exactly once
/// at close; a flat close (pnl == 0) counts as a loss.
#[derive(Debug, Clone, PartialEq)]
pub struct Trade {
    pub strategy: String,
    pub entry_time: DateTime<Utc>,
    pub entry_price: f64,
    pub exit_time: Option<DateTime<Utc>>,
    pub exit_price: Option<f64>,
    pub pnl: f64,
    pub status: TradeStatus,
}

impl Trade {
    pub fn open(strategy: &str, entry_time: DateTime<Utc>, entry_price: f64) -> Self {
        Trade {
            strategy: strategy.to_string(),
            entry_time,
            entry_price,
            exit_time: None,
            exit_price: None,
            pnl: 0.0,
            status: TradeStatus::Open,
        }
    }

    pub fn close(&mut self, exit_time: DateTime<Utc>, exit_price: f64, position_size: f64) {
        self.exit_time = Some(exit_time);
        self.exit_price = Some(exit_price);
        self.pnl = (exit_price - self.entry_price) * position_size;
        self.status = if self.pnl > 0.0 {
            TradeStatus::Win
        } else {
            TradeStatus::Loss
        };
    }

    pub fn is_open(&self) -> bool {
        self.status == TradeStatus::Open
    }
}
