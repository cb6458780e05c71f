//! Summary statistics over a completed trade list.

use super::trade::Trade;

/// Aggregate performance figures, recomputed fresh from the full trade
/// list on every call rather than maintained incrementally.
#[derive(Debug, Clone, PartialEq)]
pub struct Metrics {
    pub total_trades: usize,
    /// Percentage of trades with pnl strictly greater than zero.
    pub win_rate: f64,
    pub total_pnl: f64,
    pub average_pnl: f64,
}

impl Metrics {
    pub fn compute(trades: &[Trade]) -> Self {
        let total_trades = trades.len();
        if total_trades == 0 {
            return Metrics {
                total_trades: 0,
                win_rate: 0.0,
                total_pnl: 0.0,
                average_pnl: 0.0,
            };
        }

        let wins = trades.iter().filter(|t| t.pnl > 0.0).count();
        let total_pnl: f64 = trades.iter().map(|t| t.pnl).sum();

        Metrics {
            total_trades,
            win_rate: wins as f64 / total_trades as f64 * 100.0,
            total_pnl,
            average_pnl: total_pnl / total_trades as f64,
        }
    }
}
