//! Behavior-driven tests for the chart pipeline.
//!
//! These tests verify WHAT a consumer of the generated payload can rely on:
//! shape, the real-quote anchor, candle invariants, the weekday date axis,
//! target ordering, and determinism under a fixed seed.

use fastrand::Rng;
use tickerlens_core::{chart, ChartData, SessionQuote, Symbol};
use time::{Date, Month, Weekday};

fn sample_quote() -> SessionQuote {
    SessionQuote::new(
        Symbol::parse("RELIANCE").expect("valid symbol"),
        100.0,
        105.0,
        95.0,
        102.0,
        1_000,
    )
    .expect("valid quote")
}

fn wednesday() -> Date {
    Date::from_calendar_date(2024, Month::March, 13).expect("valid date")
}

fn generate_seeded(seed: u64) -> ChartData {
    let mut rng = Rng::with_seed(seed);
    chart::generate_with(&sample_quote(), wednesday(), &mut rng)
}

// =============================================================================
// Shape and anchor
// =============================================================================

#[test]
fn payload_has_the_fixed_renderer_shape() {
    // Given: any valid session quote
    // When: the payload is generated
    let payload = generate_seeded(7);

    // Then: 30 bars split into parallel arrays, plus 3 of every level
    assert_eq!(payload.bar_count(), chart::SERIES_LEN);
    assert_eq!(payload.dates.len(), 30);
    assert_eq!(payload.open.len(), 30);
    assert_eq!(payload.high.len(), 30);
    assert_eq!(payload.low.len(), 30);
    assert_eq!(payload.close.len(), 30);
    assert_eq!(payload.levels.supports.len(), 3);
    assert_eq!(payload.levels.resistances.len(), 3);
    assert_eq!(payload.levels.upward_targets.len(), 3);
    assert_eq!(payload.levels.downward_targets.len(), 3);
}

#[test]
fn last_bar_is_anchored_on_the_real_quote() {
    let payload = generate_seeded(7);

    assert_eq!(payload.open[29], 100.0);
    assert_eq!(payload.high[29], 105.0);
    assert_eq!(payload.low[29], 95.0);
    assert_eq!(payload.close[29], 102.0);
}

// =============================================================================
// Candle and date invariants
// =============================================================================

#[test]
fn every_bar_satisfies_candle_invariants() {
    for seed in [1_u64, 17, 99, 4242] {
        let payload = generate_seeded(seed);

        for index in 0..payload.bar_count() {
            let (open, high, low, close) = (
                payload.open[index],
                payload.high[index],
                payload.low[index],
                payload.close[index],
            );
            assert!(low <= open.min(close), "seed {seed} bar {index}: low above body");
            assert!(high >= open.max(close), "seed {seed} bar {index}: high below body");
            assert!(low >= 0.01, "seed {seed} bar {index}: price below floor");
        }
    }
}

#[test]
fn date_axis_is_weekdays_only_and_non_decreasing() {
    let payload = generate_seeded(3);

    for date in &payload.dates {
        assert!(
            !matches!(date.weekday(), Weekday::Saturday | Weekday::Sunday),
            "axis contains weekend date {date}"
        );
    }
    for pair in payload.dates.windows(2) {
        assert!(pair[0] <= pair[1], "axis must be non-decreasing");
    }
}

#[test]
fn weekend_origin_still_yields_weekday_axis() {
    // Given: the lookup happens on a Sunday
    let sunday = Date::from_calendar_date(2024, Month::March, 10).expect("valid date");
    let mut rng = Rng::with_seed(5);

    // When: the payload is generated
    let payload = chart::generate_with(&sample_quote(), sunday, &mut rng);

    // Then: every date is a weekday and the axis stays ordered (repeats are
    // allowed where offsets collapse onto the same Friday)
    for date in &payload.dates {
        assert!(!matches!(
            date.weekday(),
            Weekday::Saturday | Weekday::Sunday
        ));
    }
    for pair in payload.dates.windows(2) {
        assert!(pair[0] <= pair[1]);
    }
    assert_eq!(payload.dates[29], payload.dates[28]);
}

// =============================================================================
// Targets and determinism
// =============================================================================

#[test]
fn targets_are_strictly_ordered_for_positive_volatility() {
    let levels = generate_seeded(11).levels;

    assert!(levels.upward_targets[0] < levels.upward_targets[1]);
    assert!(levels.upward_targets[1] < levels.upward_targets[2]);
    assert!(levels.downward_targets[0] > levels.downward_targets[1]);
    assert!(levels.downward_targets[1] > levels.downward_targets[2]);
}

#[test]
fn supports_and_resistances_are_ascending_samples() {
    let levels = generate_seeded(13).levels;

    assert!(levels.supports[0] <= levels.supports[1]);
    assert!(levels.supports[1] <= levels.supports[2]);
    assert!(levels.resistances[0] <= levels.resistances[1]);
    assert!(levels.resistances[1] <= levels.resistances[2]);
    assert!(levels.supports[2] <= levels.resistances[0]);
}

#[test]
fn same_seed_and_origin_reproduce_the_payload() {
    let first = generate_seeded(21);
    let second = generate_seeded(21);
    assert_eq!(first, second);

    let different = generate_seeded(22);
    assert_ne!(first.close, different.close);
}

#[test]
fn known_quote_yields_known_volatility_and_targets() {
    // Quote {open: 100, high: 105, low: 95, close: 102} gives
    // base_volatility = round2(10 / 95) = 0.11.
    let levels = generate_seeded(1).levels;

    assert_eq!(levels.upward_targets, [107.61, 113.22, 118.83]);
    assert_eq!(levels.downward_targets, [96.39, 90.78, 85.17]);
}

// =============================================================================
// Wire shape
// =============================================================================

#[test]
fn payload_serializes_to_the_renderer_contract() {
    let payload = generate_seeded(31);
    let json = serde_json::to_value(&payload).expect("must serialize");

    for field in [
        "symbol",
        "dates",
        "open",
        "high",
        "low",
        "close",
        "supports",
        "resistances",
        "upward_targets",
        "downward_targets",
    ] {
        assert!(json.get(field).is_some(), "payload must expose '{field}'");
    }

    let first_date = json["dates"][0].as_str().expect("dates are strings");
    assert_eq!(first_date.len(), 10, "dates use YYYY-MM-DD");
    assert!(json["open"][0].is_number());
}
