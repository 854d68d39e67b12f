use jiff::civil::Date;
use jiff::Zoned;

use crate::weekday::DayOfWeek;

/// Count how many times `weekday` occurs in the closed range `[start, end]`.
///
/// The cursor starts at `start` and advances one calendar day at a time in
/// `start`'s timezone, so every candidate keeps `start`'s wall-clock time.
/// A range with `start > end` is empty and counts zero.
pub fn count_occurrences(start: &Zoned, end: &Zoned, weekday: DayOfWeek) -> usize {
    let mut count = 0;
    let mut cursor = start.clone();
    while cursor <= *end {
        if weekday.matches(cursor.weekday()) {
            count += 1;
        }
        cursor = match cursor.tomorrow() {
            Ok(next) => next,
            Err(_) => break,
        };
    }
    tracing::trace!(%start, %end, %weekday, count, "counted weekday occurrences");
    count
}

/// Count how many times `weekday` falls on a civil date in `[start, end]`.
pub fn count_in_dates(start: Date, end: Date, weekday: DayOfWeek) -> usize {
    let mut count = 0;
    let mut cursor = start;
    while cursor <= end {
        if weekday.matches(cursor.weekday()) {
            count += 1;
        }
        cursor = match cursor.tomorrow() {
            Ok(next) => next,
            Err(_) => break,
        };
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::tz::TimeZone;

    fn date(s: &str) -> Date {
        s.parse().unwrap()
    }

    fn zoned(s: &str) -> Zoned {
        s.parse().unwrap()
    }

    #[test]
    fn test_single_day_matching() {
        // 2024-01-01 is a Monday
        let d = zoned("2024-01-01T00:00:00+00:00[UTC]");
        assert_eq!(count_occurrences(&d, &d, DayOfWeek::Monday), 1);
    }

    #[test]
    fn test_single_day_not_matching() {
        let d = zoned("2024-01-01T00:00:00+00:00[UTC]");
        assert_eq!(count_occurrences(&d, &d, DayOfWeek::Tuesday), 0);
    }

    #[test]
    fn test_four_mondays_in_january_range() {
        let start = zoned("2024-01-01T00:00:00+00:00[UTC]");
        let end = zoned("2024-01-22T23:59:59.999+00:00[UTC]");
        assert_eq!(count_occurrences(&start, &end, DayOfWeek::Monday), 4);
        assert_eq!(count_occurrences(&start, &end, DayOfWeek::Sunday), 3);
    }

    #[test]
    fn test_end_is_inclusive_of_exact_instant() {
        let start = zoned("2024-01-01T09:00:00+00:00[UTC]");
        let end = zoned("2024-01-08T09:00:00+00:00[UTC]");
        assert_eq!(count_occurrences(&start, &end, DayOfWeek::Monday), 2);
        let just_before = zoned("2024-01-08T08:59:59+00:00[UTC]");
        assert_eq!(count_occurrences(&start, &just_before, DayOfWeek::Monday), 1);
    }

    #[test]
    fn test_reversed_range_is_empty() {
        let start = zoned("2024-02-01T00:00:00+00:00[UTC]");
        let end = zoned("2024-01-01T00:00:00+00:00[UTC]");
        assert_eq!(count_occurrences(&start, &end, DayOfWeek::Thursday), 0);
    }

    #[test]
    fn test_caller_value_untouched() {
        let start = zoned("2024-01-01T00:00:00+00:00[UTC]");
        let copy = start.clone();
        let end = zoned("2024-03-01T00:00:00+00:00[UTC]");
        count_occurrences(&start, &end, DayOfWeek::Friday);
        assert_eq!(start, copy);
    }

    #[test]
    fn test_across_dst_transition() {
        // US spring-forward on 2024-03-10 shortens that Sunday to 23 hours
        let tz = TimeZone::get("America/New_York").unwrap();
        let start = date("2024-03-03").to_zoned(tz.clone()).unwrap();
        let end = date("2024-03-17").at(23, 59, 59, 0).to_zoned(tz).unwrap();
        assert_eq!(count_occurrences(&start, &end, DayOfWeek::Sunday), 3);
    }

    #[test]
    fn test_count_in_dates_full_year() {
        // 2024 is a leap year starting on Monday: 53 Mondays and Tuesdays
        let start = date("2024-01-01");
        let end = date("2024-12-31");
        assert_eq!(count_in_dates(start, end, DayOfWeek::Monday), 53);
        assert_eq!(count_in_dates(start, end, DayOfWeek::Tuesday), 53);
        assert_eq!(count_in_dates(start, end, DayOfWeek::Wednesday), 52);
    }
}
