use crate::domain::{DailyBar, PriceLevels, SessionQuote};

use super::series::{round2, VolatilityParams};

const SUPPORT_QUANTILES: [f64; 3] = [0.10, 0.25, 0.40];
const RESISTANCE_QUANTILES: [f64; 3] = [0.60, 0.75, 0.90];
const TARGET_STEPS: [f64; 3] = [0.5, 1.0, 1.5];

/// Derive supports, resistances, and targets from the finished series.
///
/// Supports and resistances are point samples of the pooled price
/// distribution (all four fields of every bar, sorted), not cluster or mode
/// detection. Targets are volatility multiples of the real close.
pub(crate) fn derive(
    bars: &[DailyBar],
    quote: &SessionQuote,
    params: VolatilityParams,
) -> PriceLevels {
    let mut pool: Vec<f64> = bars
        .iter()
        .flat_map(|bar| [bar.open, bar.high, bar.low, bar.close])
        .collect();
    pool.sort_by(f64::total_cmp);

    PriceLevels {
        supports: SUPPORT_QUANTILES.map(|quantile| sample(&pool, quantile)),
        resistances: RESISTANCE_QUANTILES.map(|quantile| sample(&pool, quantile)),
        upward_targets: TARGET_STEPS
            .map(|step| round2(quote.close * (1.0 + step * params.base_volatility))),
        downward_targets: TARGET_STEPS
            .map(|step| round2(quote.close * (1.0 - step * params.base_volatility))),
    }
}

/// The pooled value at `floor(quantile * n)`.
fn sample(pool: &[f64], quantile: f64) -> f64 {
    if pool.is_empty() {
        return 0.0;
    }
    let index = ((quantile * pool.len() as f64).floor() as usize).min(pool.len() - 1);
    pool[index]
}
