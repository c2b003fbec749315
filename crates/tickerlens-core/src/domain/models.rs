use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::{Date, Month};

use crate::{Symbol, ValidationError};

/// Latest-session price snapshot for one symbol, as delivered by the quote
/// provider. Construction enforces the session-bar shape the chart generator
/// relies on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionQuote {
    pub symbol: Symbol,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

impl SessionQuote {
    pub fn new(
        symbol: Symbol,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: u64,
    ) -> Result<Self, ValidationError> {
        validate_positive("open", open)?;
        validate_positive("high", high)?;
        validate_positive("low", low)?;
        validate_positive("close", close)?;

        if high < open.max(close) {
            return Err(ValidationError::QuoteHighOutOfRange);
        }
        if low > open.min(close) {
            return Err(ValidationError::QuoteLowOutOfRange);
        }

        Ok(Self {
            symbol,
            open,
            high,
            low,
            close,
            volume,
        })
    }
}

/// One fabricated trading day. Bars are produced in bulk by the chart
/// generator and never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyBar {
    #[serde(with = "calendar_date")]
    pub date: Date,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

/// Derived price levels: percentile-sampled supports/resistances plus
/// volatility-multiple targets in each direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceLevels {
    /// Ascending; the lowest sample sits closest to the distribution floor.
    pub supports: [f64; 3],
    /// Ascending.
    pub resistances: [f64; 3],
    /// Ascending: short, medium, long term.
    pub upward_targets: [f64; 3],
    /// Descending: short, medium, long term.
    pub downward_targets: [f64; 3],
}

/// The full payload handed to a chart renderer: parallel arrays over the
/// 30-day axis plus the derived levels. Monetary values are plain decimals in
/// the source currency unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub symbol: Symbol,
    #[serde(
        serialize_with = "serialize_dates",
        deserialize_with = "deserialize_dates"
    )]
    pub dates: Vec<Date>,
    pub open: Vec<f64>,
    pub high: Vec<f64>,
    pub low: Vec<f64>,
    pub close: Vec<f64>,
    #[serde(flatten)]
    pub levels: PriceLevels,
}

impl ChartData {
    /// Split a bar series into the renderer's parallel-array shape.
    pub fn from_parts(symbol: Symbol, bars: &[DailyBar], levels: PriceLevels) -> Self {
        let mut data = Self {
            symbol,
            dates: Vec::with_capacity(bars.len()),
            open: Vec::with_capacity(bars.len()),
            high: Vec::with_capacity(bars.len()),
            low: Vec::with_capacity(bars.len()),
            close: Vec::with_capacity(bars.len()),
            levels,
        };

        for bar in bars {
            data.dates.push(bar.date);
            data.open.push(bar.open);
            data.high.push(bar.high);
            data.low.push(bar.low);
            data.close.push(bar.close);
        }

        data
    }

    pub fn bar_count(&self) -> usize {
        self.dates.len()
    }
}

/// Format a calendar date as `YYYY-MM-DD`.
pub fn format_calendar_date(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

/// Parse a `YYYY-MM-DD` calendar date.
pub fn parse_calendar_date(value: &str) -> Result<Date, ValidationError> {
    let invalid = || ValidationError::InvalidCalendarDate {
        value: value.to_owned(),
    };

    let mut parts = value.splitn(3, '-');
    let (Some(year), Some(month), Some(day)) = (parts.next(), parts.next(), parts.next()) else {
        return Err(invalid());
    };

    let year: i32 = year.parse().map_err(|_| invalid())?;
    let month: u8 = month.parse().map_err(|_| invalid())?;
    let day: u8 = day.parse().map_err(|_| invalid())?;

    let month = Month::try_from(month).map_err(|_| invalid())?;
    Date::from_calendar_date(year, month, day).map_err(|_| invalid())
}

mod calendar_date {
    use super::*;

    pub fn serialize<S>(date: &Date, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format_calendar_date(*date))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Date, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        parse_calendar_date(&value).map_err(DeError::custom)
    }
}

fn serialize_dates<S>(dates: &[Date], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_seq(dates.iter().map(|date| format_calendar_date(*date)))
}

fn deserialize_dates<'de, D>(deserializer: D) -> Result<Vec<Date>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<String>::deserialize(deserializer)?;
    raw.iter()
        .map(|value| parse_calendar_date(value).map_err(DeError::custom))
        .collect()
}

fn validate_positive(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteValue { field });
    }
    if value <= 0.0 {
        return Err(ValidationError::NonPositiveValue { field });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbol() -> Symbol {
        Symbol::parse("RELIANCE").expect("valid symbol")
    }

    #[test]
    fn accepts_well_formed_quote() {
        let quote =
            SessionQuote::new(symbol(), 100.0, 105.0, 95.0, 102.0, 1_000).expect("must validate");
        assert_eq!(quote.close, 102.0);
    }

    #[test]
    fn rejects_quote_with_high_below_close() {
        let err = SessionQuote::new(symbol(), 100.0, 101.0, 95.0, 102.0, 1_000)
            .expect_err("must fail");
        assert!(matches!(err, ValidationError::QuoteHighOutOfRange));
    }

    #[test]
    fn rejects_quote_with_low_above_open() {
        let err = SessionQuote::new(symbol(), 100.0, 105.0, 101.0, 102.0, 1_000)
            .expect_err("must fail");
        assert!(matches!(err, ValidationError::QuoteLowOutOfRange));
    }

    #[test]
    fn rejects_non_positive_price() {
        let err =
            SessionQuote::new(symbol(), 100.0, 105.0, 0.0, 102.0, 1_000).expect_err("must fail");
        assert!(matches!(
            err,
            ValidationError::NonPositiveValue { field: "low" }
        ));
    }

    #[test]
    fn calendar_dates_round_trip() {
        let date = parse_calendar_date("2024-03-08").expect("must parse");
        assert_eq!(format_calendar_date(date), "2024-03-08");

        assert!(matches!(
            parse_calendar_date("08/03/2024"),
            Err(ValidationError::InvalidCalendarDate { .. })
        ));
    }

    #[test]
    fn chart_data_splits_bars_into_parallel_arrays() {
        let date = parse_calendar_date("2024-03-08").expect("must parse");
        let bars = [
            DailyBar {
                date,
                open: 10.0,
                high: 12.0,
                low: 9.0,
                close: 11.0,
            },
            DailyBar {
                date,
                open: 11.0,
                high: 13.0,
                low: 10.0,
                close: 12.0,
            },
        ];
        let levels = PriceLevels {
            supports: [9.0, 9.5, 10.0],
            resistances: [11.0, 12.0, 13.0],
            upward_targets: [12.0, 13.0, 14.0],
            downward_targets: [10.0, 9.0, 8.0],
        };

        let data = ChartData::from_parts(symbol(), &bars, levels);
        assert_eq!(data.bar_count(), 2);
        assert_eq!(data.open, vec![10.0, 11.0]);
        assert_eq!(data.close, vec![11.0, 12.0]);

        let json = serde_json::to_value(&data).expect("must serialize");
        assert_eq!(json["dates"][0], "2024-03-08");
        assert_eq!(json["supports"][2], 10.0);
    }
}
