use jiff::civil::Date;
use jiff::tz::TimeZone;
use jiff::ToSpan;
use proptest::prelude::*;
use recur::{count_in_dates, count_occurrences, DayOfWeek, RecurrenceRequest, TimeOfDay, TimeWindow};

fn base() -> Date {
    Date::new(2000, 1, 1).unwrap()
}

/// A date between 2000-01-01 and roughly 2035.
fn arb_date() -> impl Strategy<Value = Date> {
    (0i64..13_000).prop_map(|n| base().checked_add(n.days()).unwrap())
}

/// A start date and an inclusive end date up to about four years later.
fn arb_range() -> impl Strategy<Value = (Date, Date)> {
    (arb_date(), 0i64..1_500).prop_map(|(s, len)| (s, s.checked_add(len.days()).unwrap()))
}

fn arb_day() -> impl Strategy<Value = DayOfWeek> {
    (0u8..7).prop_map(|n| DayOfWeek::from_number(n).unwrap())
}

fn arb_days() -> impl Strategy<Value = Vec<DayOfWeek>> {
    prop::collection::vec(arb_day(), 0..7)
}

fn arb_window() -> impl Strategy<Value = TimeWindow> {
    (0u8..24, 0u8..60, 0u8..24, 0u8..60).prop_map(|(h1, m1, h2, m2)| {
        let a = TimeOfDay::new(h1, m1).unwrap();
        let b = TimeOfDay::new(h2, m2).unwrap();
        TimeWindow::new(a.min(b), a.max(b)).unwrap()
    })
}

fn arb_tz() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("UTC"),
        Just("America/Denver"),
        Just("Europe/Berlin"),
        Just("Australia/Sydney"),
        Just("Asia/Kolkata"),
    ]
}

/// Closed-form count of a weekday in `[start, end]`.
fn expected_count(start: Date, end: Date, day: DayOfWeek) -> usize {
    if start > end {
        return 0;
    }
    let len = start.until(end).unwrap().get_days() as i64 + 1;
    let first_offset =
        i64::from(day.iso_number() - start.weekday().to_monday_one_offset()).rem_euclid(7);
    (len / 7 + i64::from(first_offset < len % 7)) as usize
}

proptest! {
    #[test]
    fn count_matches_closed_form((start, end) in arb_range(), day in arb_day()) {
        prop_assert_eq!(count_in_dates(start, end, day), expected_count(start, end, day));
    }

    #[test]
    fn zoned_count_agrees_with_dates((start, end) in arb_range(), day in arb_day()) {
        let s = start.to_zoned(TimeZone::UTC).unwrap();
        let e = end.at(23, 59, 59, 0).to_zoned(TimeZone::UTC).unwrap();
        prop_assert_eq!(count_occurrences(&s, &e, day), count_in_dates(start, end, day));
    }

    #[test]
    fn single_day_counts_once(d in arb_date(), day in arb_day()) {
        let expected = usize::from(DayOfWeek::from_jiff(d.weekday()) == day);
        prop_assert_eq!(count_in_dates(d, d, day), expected);
    }

    #[test]
    fn expansion_is_sorted_and_on_requested_days(
        (start, end) in arb_range(),
        days in arb_days(),
        window in arb_window(),
        tz in arb_tz(),
    ) {
        let req = RecurrenceRequest::new(start, days.clone(), end, TimeZone::get(tz).unwrap())
            .unwrap()
            .with_window(window);
        let events = req.expand().unwrap();

        for pair in events.windows(2) {
            prop_assert!(pair[0].start_date() <= pair[1].start_date());
        }
        for e in &events {
            prop_assert!(days.contains(&e.weekday()), "{} not requested", e.weekday());
            prop_assert!(e.start_date() >= start && e.start_date() <= end);
            prop_assert_eq!(e.duration_ms(), window.duration_ms());
        }
    }

    #[test]
    fn expansion_count_per_day_matches_counter(
        (start, end) in arb_range(),
        days in arb_days(),
    ) {
        let req = RecurrenceRequest::new(start, days.clone(), end, TimeZone::UTC).unwrap();
        let events = req.expand().unwrap();
        for day in req.days() {
            let emitted = events.iter().filter(|e| e.weekday() == *day).count();
            prop_assert_eq!(emitted, count_in_dates(start, end, *day));
        }
        let total: usize = req.days().iter().map(|d| count_in_dates(start, end, *d)).sum();
        prop_assert_eq!(events.len(), total);
    }

    #[test]
    fn consecutive_occurrences_are_a_week_apart(
        (start, end) in arb_range(),
        day in arb_day(),
    ) {
        let req = RecurrenceRequest::new(start, [day], end, TimeZone::UTC).unwrap();
        let events = req.expand().unwrap();
        for pair in events.windows(2) {
            let gap = pair[0].start_date().until(pair[1].start_date()).unwrap().get_days();
            prop_assert_eq!(gap, 7);
        }
    }
}
