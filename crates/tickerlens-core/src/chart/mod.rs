//! # Chart Pipeline
//!
//! Turns one real session quote into the full renderer payload: a fabricated
//! 30-trading-day OHLC history whose final bar is the real quote, plus
//! support/resistance levels sampled from the fabricated price pool and
//! volatility-multiple price targets.
//!
//! The pipeline is a pure function of the quote, the date-axis origin, and
//! the injected randomness source. It never fails: the quote was validated at
//! the provider boundary, and sanitation keeps every synthetic bar inside the
//! candle invariants.

mod dates;
mod levels;
mod series;

use fastrand::Rng;
use time::{Date, OffsetDateTime};

use crate::domain::{ChartData, SessionQuote};

use series::VolatilityParams;

pub use dates::trading_dates;

/// Number of trading days in the fabricated history.
pub const SERIES_LEN: usize = 30;

/// Build the chart payload for a resolved quote using the current UTC date
/// and an entropy-seeded randomness source.
pub fn generate(quote: &SessionQuote) -> ChartData {
    let mut rng = Rng::new();
    generate_with(quote, OffsetDateTime::now_utc().date(), &mut rng)
}

/// Build the chart payload with the date-axis origin and randomness source
/// supplied by the caller. Two calls with the same quote, origin, and seed
/// produce identical payloads.
pub fn generate_with(quote: &SessionQuote, today: Date, rng: &mut Rng) -> ChartData {
    let dates = dates::trading_dates(today, SERIES_LEN);
    let params = VolatilityParams::from_quote(quote);
    let bars = series::synthesize(quote, &dates, params, rng);
    let levels = levels::derive(&bars, quote, params);
    ChartData::from_parts(quote.symbol.clone(), &bars, levels)
}
