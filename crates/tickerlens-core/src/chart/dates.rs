use time::{Date, Duration, Weekday};

/// Calendar axis for the fabricated history: one entry per offset from
/// `today`, each walked backward until it lands on a weekday, returned in
/// ascending order.
///
/// When `today` falls on or near a weekend several offsets collapse onto the
/// same preceding Friday, so the axis may contain repeated dates. Consumers
/// only rely on "weekday" and "non-decreasing".
pub fn trading_dates(today: Date, len: usize) -> Vec<Date> {
    let mut dates = Vec::with_capacity(len);
    for offset in 0..len {
        let mut candidate = today - Duration::days(offset as i64);
        while is_weekend(candidate) {
            candidate = candidate - Duration::days(1);
        }
        dates.push(candidate);
    }
    dates.reverse();
    dates
}

fn is_weekend(date: Date) -> bool {
    matches!(date.weekday(), Weekday::Saturday | Weekday::Sunday)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::Month;

    fn date(year: i32, month: Month, day: u8) -> Date {
        Date::from_calendar_date(year, month, day).expect("valid date")
    }

    #[test]
    fn axis_is_ascending_and_weekdays_only() {
        let dates = trading_dates(date(2024, Month::March, 13), 30);

        assert_eq!(dates.len(), 30);
        for pair in dates.windows(2) {
            assert!(pair[0] <= pair[1], "axis must be non-decreasing");
        }
        for day in &dates {
            assert!(!is_weekend(*day), "axis must not contain weekends");
        }
        assert_eq!(*dates.last().expect("non-empty"), date(2024, Month::March, 13));
    }

    #[test]
    fn weekend_origin_collapses_onto_prior_friday() {
        // Sunday the 10th: offsets 0, 1, and 2 all walk back to Friday the 8th.
        let dates = trading_dates(date(2024, Month::March, 10), 30);

        let friday = date(2024, Month::March, 8);
        assert_eq!(dates[29], friday);
        assert_eq!(dates[28], friday);
        assert_eq!(dates[27], friday);
        assert_eq!(dates[26], date(2024, Month::March, 7));
    }
}
