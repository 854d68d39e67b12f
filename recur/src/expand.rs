use std::fmt;

use jiff::civil::{Date, Time};
use jiff::tz::TimeZone;
use jiff::{Span, Zoned};
#[cfg(feature = "serde")]
use serde::{Serialize, Serializer};

use crate::count::count_occurrences;
use crate::error::EventError;
use crate::request::RecurrenceRequest;
use crate::time::TimeOfDay;
use crate::weekday::DayOfWeek;

/// One concrete instance of a recurring event.
///
/// Start and end are kept as zoned datetimes in the request's timezone; the
/// end is always `start + duration` in absolute time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventOccurrence {
    start: Zoned,
    end: Zoned,
    duration: jiff::SignedDuration,
}

impl EventOccurrence {
    pub fn start(&self) -> &Zoned {
        &self.start
    }

    pub fn end(&self) -> &Zoned {
        &self.end
    }

    /// Local calendar date the occurrence starts on.
    pub fn start_date(&self) -> Date {
        self.start.date()
    }

    pub fn start_time(&self) -> TimeOfDay {
        TimeOfDay::from_jiff(self.start.time())
    }

    pub fn end_time(&self) -> TimeOfDay {
        TimeOfDay::from_jiff(self.end.time())
    }

    pub fn weekday(&self) -> DayOfWeek {
        DayOfWeek::from_jiff(self.start.weekday())
    }

    pub fn duration(&self) -> jiff::SignedDuration {
        self.duration
    }

    pub fn duration_ms(&self) -> i64 {
        // Windows are at most a day long, far inside i64.
        self.duration.as_millis() as i64
    }
}

impl fmt::Display for EventOccurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}-{} ({}ms)",
            self.start_date(),
            self.start_time(),
            self.end_time(),
            self.duration_ms()
        )
    }
}

/// Serializes as `{"startDate", "startTime", "endTime", "duration"}`.
#[cfg(feature = "serde")]
impl Serialize for EventOccurrence {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(4))?;
        map.serialize_entry("startDate", &self.start_date().to_string())?;
        map.serialize_entry("startTime", &self.start_time())?;
        map.serialize_entry("endTime", &self.end_time())?;
        map.serialize_entry("duration", &self.duration_ms())?;
        map.end()
    }
}

/// Set the time on a date in a timezone, returning a Zoned datetime.
fn at_time_on_date(date: Date, time: Time, tz: &TimeZone) -> Result<Zoned, EventError> {
    date.to_datetime(time)
        .to_zoned(tz.clone())
        .map_err(|e| EventError::eval(format!("cannot create zoned datetime: {e}")))
}

/// Move forward day by day until the cursor lands on `day`.
fn align_forward(mut cursor: Zoned, day: DayOfWeek) -> Result<Zoned, EventError> {
    while !day.matches(cursor.weekday()) {
        cursor = cursor
            .tomorrow()
            .map_err(|e| EventError::eval(format!("overflow aligning start: {e}")))?;
    }
    Ok(cursor)
}

/// Move backward day by day until the cursor lands on `day`.
fn align_backward(mut cursor: Zoned, day: DayOfWeek) -> Result<Zoned, EventError> {
    while !day.matches(cursor.weekday()) {
        cursor = cursor
            .yesterday()
            .map_err(|e| EventError::eval(format!("overflow aligning end: {e}")))?;
    }
    Ok(cursor)
}

/// Expand a recurrence into concrete occurrences, sorted by start date.
///
/// For each requested weekday the range is narrowed to the first and last
/// matching day (the last day counts until 23:59:59.999 local), the counter
/// sizes the run, and each occurrence is placed seven days after the
/// previous one at the window's start time. Occurrences from all weekdays are
/// merged with a stable sort on the calendar date alone.
#[tracing::instrument(
    level = "debug",
    skip(request),
    fields(start = %request.start_date(), until = %request.repeat_until())
)]
pub fn expand(request: &RecurrenceRequest) -> Result<Vec<EventOccurrence>, EventError> {
    let tz = request.time_zone();
    let window = request.window();
    let duration = window.duration();
    let start_time = window.start().to_jiff();

    let range_start = at_time_on_date(request.start_date(), Time::midnight(), tz)?;
    let range_end = at_time_on_date(
        request.repeat_until(),
        Time::constant(23, 59, 59, 999_000_000),
        tz,
    )?;

    let mut events = Vec::new();
    for &day in request.days() {
        let first = align_forward(range_start.clone(), day)?;
        let last = align_backward(range_end.clone(), day)?;
        let n = count_occurrences(&first, &last, day);
        tracing::debug!(weekday = %day, %first, %last, count = n, "aligned weekday range");

        let first_date = first.date();
        for i in 0..n {
            let offset = i64::try_from(i)
                .ok()
                .and_then(|i| Span::new().try_days(7 * i).ok())
                .ok_or_else(|| EventError::eval("occurrence offset out of range"))?;
            let date = first_date
                .checked_add(offset)
                .map_err(|e| EventError::eval(format!("overflow computing occurrence: {e}")))?;
            let start = at_time_on_date(date, start_time, tz)?;
            let end = start
                .checked_add(duration)
                .map_err(|e| EventError::eval(format!("overflow computing end time: {e}")))?;
            events.push(EventOccurrence {
                start,
                end,
                duration,
            });
        }
    }

    events.sort_by_key(EventOccurrence::start_date);
    tracing::debug!(total = events.len(), "expanded recurrence");
    Ok(events)
}
