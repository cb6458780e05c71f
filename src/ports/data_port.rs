//! Candle data access port trait.

use crate::domain::candle::Candle;
use crate::domain::error::KlinebtError;

/// Supplies the backtester with an ordered candle series. Implementations
/// must return candles sorted by ascending timestamp with no duplicates.
pub trait DataPort {
    fn fetch_candles(
        &self,
        symbol: &str,
        interval: &str,
        limit: usize,
    ) -> Result<Vec<Candle>, KlinebtError>;
}
