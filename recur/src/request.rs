//! Recurrence requests: the raw string-shaped parameters and the validated,
//! typed request the expander works on.

use jiff::civil::Date;
use jiff::tz::TimeZone;

use crate::error::{EventError, Span};
use crate::expand::{self, EventOccurrence};
use crate::time::TimeWindow;
use crate::weekday::DayOfWeek;

/// String-shaped parameters, as a calendar front end sends them.
///
/// In JSON the keys are camelCase: `startDate`, `dayOfWeek`, `repeatUntil`,
/// `startTime`, `endTime`, `timeZone`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct EventDateParams {
    /// First day of the range, `YYYY-MM-DD`.
    pub start_date: String,
    pub day_of_week: Vec<DayOfWeek>,
    /// Last day of the range (inclusive), `YYYY-MM-DD`.
    pub repeat_until: String,
    /// `HH:mm`, defaults to `00:00`.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub start_time: Option<String>,
    /// `HH:mm`, defaults to `23:59`.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub end_time: Option<String>,
    /// IANA timezone name, e.g. `America/Denver`.
    pub time_zone: String,
}

impl EventDateParams {
    pub fn new(
        start_date: impl Into<String>,
        day_of_week: Vec<DayOfWeek>,
        repeat_until: impl Into<String>,
        time_zone: impl Into<String>,
    ) -> Self {
        Self {
            start_date: start_date.into(),
            day_of_week,
            repeat_until: repeat_until.into(),
            start_time: None,
            end_time: None,
            time_zone: time_zone.into(),
        }
    }

    pub fn with_times(mut self, start_time: impl Into<String>, end_time: impl Into<String>) -> Self {
        self.start_time = Some(start_time.into());
        self.end_time = Some(end_time.into());
        self
    }

    /// Read parameters from a JSON document.
    #[cfg(feature = "serde")]
    pub fn from_json(input: &str) -> Result<Self, EventError> {
        serde_json::from_str(input).map_err(|e| {
            let at = byte_offset(input, e.line(), e.column());
            EventError::parse(
                format!("invalid request: {e}"),
                Span::new(at, (at + 1).min(input.len())),
                input,
            )
        })
    }

    /// Parse and validate into a [`RecurrenceRequest`].
    pub fn to_request(&self) -> Result<RecurrenceRequest, EventError> {
        RecurrenceRequest::try_from(self)
    }
}

/// Byte offset of a 1-based line/column position reported by serde_json.
#[cfg(feature = "serde")]
fn byte_offset(input: &str, line: usize, column: usize) -> usize {
    let line_start: usize = input
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum();
    (line_start + column.saturating_sub(1)).min(input.len())
}

/// A validated weekly recurrence.
///
/// Construction guarantees `start_date <= repeat_until`, a known timezone
/// and a same-day time window. Requested weekdays form a set: duplicates are
/// dropped, first-seen order is kept.
#[derive(Debug, Clone, PartialEq)]
pub struct RecurrenceRequest {
    start_date: Date,
    days: Vec<DayOfWeek>,
    repeat_until: Date,
    window: TimeWindow,
    time_zone: TimeZone,
}

impl RecurrenceRequest {
    /// Create a whole-day (00:00-23:59) recurrence.
    pub fn new(
        start_date: Date,
        days: impl IntoIterator<Item = DayOfWeek>,
        repeat_until: Date,
        time_zone: TimeZone,
    ) -> Result<Self, EventError> {
        if start_date > repeat_until {
            return Err(EventError::validation(format!(
                "repeat-until date {repeat_until} is before start date {start_date}"
            )));
        }
        let mut unique = Vec::new();
        for day in days {
            if !unique.contains(&day) {
                unique.push(day);
            }
        }
        Ok(Self {
            start_date,
            days: unique,
            repeat_until,
            window: TimeWindow::default(),
            time_zone,
        })
    }

    /// Set the daily time window.
    pub fn with_window(mut self, window: TimeWindow) -> Self {
        self.window = window;
        self
    }

    pub fn start_date(&self) -> Date {
        self.start_date
    }

    pub fn days(&self) -> &[DayOfWeek] {
        &self.days
    }

    pub fn repeat_until(&self) -> Date {
        self.repeat_until
    }

    pub fn window(&self) -> TimeWindow {
        self.window
    }

    pub fn time_zone(&self) -> &TimeZone {
        &self.time_zone
    }

    /// Expand into concrete occurrences, sorted by date.
    pub fn expand(&self) -> Result<Vec<EventOccurrence>, EventError> {
        expand::expand(self)
    }
}

impl TryFrom<&EventDateParams> for RecurrenceRequest {
    type Error = EventError;

    fn try_from(params: &EventDateParams) -> Result<Self, Self::Error> {
        let start_date = parse_date("start date", &params.start_date)?;
        let repeat_until = parse_date("repeat-until date", &params.repeat_until)?;
        let window =
            TimeWindow::parse(params.start_time.as_deref(), params.end_time.as_deref())?;
        let time_zone = resolve_tz(&params.time_zone)?;
        Ok(Self::new(
            start_date,
            params.day_of_week.iter().copied(),
            repeat_until,
            time_zone,
        )?
        .with_window(window))
    }
}

impl TryFrom<EventDateParams> for RecurrenceRequest {
    type Error = EventError;

    fn try_from(params: EventDateParams) -> Result<Self, Self::Error> {
        Self::try_from(&params)
    }
}

/// Parse a `YYYY-MM-DD` calendar date.
pub fn parse_date(what: &str, input: &str) -> Result<Date, EventError> {
    input
        .trim()
        .parse::<Date>()
        .map_err(|e| EventError::parse(format!("invalid {what} '{input}': {e}"), Span::whole(input), input))
}

/// Look up an IANA timezone by name.
pub fn resolve_tz(name: &str) -> Result<TimeZone, EventError> {
    TimeZone::get(name).map_err(|e| EventError::timezone(format!("invalid timezone '{name}': {e}")))
}
