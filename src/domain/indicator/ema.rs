//! Exponential Moving Average.
//!
//! k = 2/(n+1), seeded with the first input value, then
//! EMA[i] = x[i]*k + EMA[i-1]*(1-k). Defined from index 0.

pub fn calculate_ema(values: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || values.is_empty() {
        return vec![f64::NAN; values.len()];
    }

    let k = 2.0 / (period as f64 + 1.0);
    let mut out = Vec::with_capacity(values.len());
    let mut ema = values[0];
    out.push(ema);

    for &value in &values[1..] {
        ema = value * k + ema * (1.0 - k);
        out.push(ema);
    }

    out
}
