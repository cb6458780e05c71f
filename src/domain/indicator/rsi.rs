//! RSI (Relative Strength Index).
//!
//! Average gain/loss is a simple rolling mean over the lookback window;
//! the first bar has no prior close, so its change counts as zero.
//! RSI = 100 - 100/(1 + avg_gain/avg_loss). IEEE division handles the
//! zero-loss case (RS -> inf, RSI -> 100) and the flat-window case
//! (0/0 -> NaN, which strategies treat as Hold).
//! Warm-up: the first period-1 outputs are NaN.

pub fn calculate_rsi(values: &[f64], period: usize) -> Vec<f64> {
    if period == 0 {
        return vec![f64::NAN; values.len()];
    }

    let n = values.len();
    let mut gains = vec![0.0; n];
    let mut losses = vec![0.0; n];
    for i in 1..n {
        let change = values[i] - values[i - 1];
        if change > 0.0 {
            gains[i] = change;
        } else {
            losses[i] = -change;
        }
    }

    let mut out = vec![f64::NAN; n];
    for i in (period.saturating_sub(1))..n {
        let start = i + 1 - period;
        let avg_gain = gains[start..=i].iter().sum::<f64>() / period as f64;
        let avg_loss = losses[start..=i].iter().sum::<f64>() / period as f64;
        out[i] = 100.0 - 100.0 / (1.0 + avg_gain / avg_loss);
    }

    out
}
