use fastrand::Rng;
use time::Date;

use crate::domain::{DailyBar, SessionQuote};

/// Smallest value any synthetic price field may take after sanitation.
const PRICE_FLOOR: f64 = 0.01;

/// Repo-wide monetary rounding: two decimals, half away from zero.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Volatility inputs derived once from the real session quote.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct VolatilityParams {
    pub average_daily_range: f64,
    pub base_volatility: f64,
}

impl VolatilityParams {
    pub fn from_quote(quote: &SessionQuote) -> Self {
        Self {
            average_daily_range: round2((quote.high - quote.low) * 0.3),
            base_volatility: round2((quote.high - quote.low) / quote.low),
        }
    }
}

/// Fabricate the OHLC history for the given date axis.
///
/// Bars are produced oldest-first from a seed one volatility step below the
/// real close; the final slot is the quote's literal session values, the one
/// anchor downstream consumers rely on.
pub(crate) fn synthesize(
    quote: &SessionQuote,
    dates: &[Date],
    params: VolatilityParams,
    rng: &mut Rng,
) -> Vec<DailyBar> {
    let mut bars = Vec::with_capacity(dates.len());
    if dates.is_empty() {
        return bars;
    }

    let last = dates.len() - 1;
    let mut prev_close = round2(quote.close * (1.0 - params.base_volatility));

    for &date in &dates[..last] {
        let day_volatility = round2(params.base_volatility * uniform(rng, 0.5, 1.5));
        let price_range = round2(params.average_daily_range * uniform(rng, 0.5, 1.5));
        let trend = round2(uniform(rng, -1.0, 1.0));

        let open = prev_close;
        let close = round2(open * (1.0 + day_volatility * trend));

        let body_high = open.max(close);
        let body_low = open.min(close);

        // Up days stretch the wick above the body, down/flat days below it.
        let (mut high, mut low) = if close > open {
            (
                round2(body_high + price_range * rng.f64()),
                round2(body_low - price_range * rng.f64() * 0.5),
            )
        } else {
            (
                round2(body_high + price_range * rng.f64() * 0.5),
                round2(body_low - price_range * rng.f64()),
            )
        };
        high = high.max(body_high);
        low = low.min(body_low);

        bars.push(DailyBar {
            date,
            open,
            high,
            low,
            close,
        });
        prev_close = close;
    }

    bars.push(DailyBar {
        date: dates[last],
        open: quote.open,
        high: quote.high,
        low: quote.low,
        close: quote.close,
    });

    sanitize(&mut bars);
    bars
}

/// Re-clamp wicks and floor every price of the synthetic bars. The anchor bar
/// is real market data and stays untouched.
fn sanitize(bars: &mut [DailyBar]) {
    let Some(last) = bars.len().checked_sub(1) else {
        return;
    };

    for bar in &mut bars[..last] {
        bar.high = bar.high.max(bar.open).max(bar.close);
        bar.low = bar.low.min(bar.open).min(bar.close);

        bar.open = bar.open.max(PRICE_FLOOR);
        bar.high = bar.high.max(PRICE_FLOOR);
        bar.low = bar.low.max(PRICE_FLOOR);
        bar.close = bar.close.max(PRICE_FLOOR);
    }
}

fn uniform(rng: &mut Rng, lo: f64, hi: f64) -> f64 {
    lo + (hi - lo) * rng.f64()
}
