//! Times of day and the daily window an event occupies.

use std::fmt;
use std::str::FromStr;

use jiff::civil::Time;
use jiff::SignedDuration;
#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{EventError, Span};

/// Time of day (hours and minutes), written `HH:mm` on a 24-hour clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay {
    pub hour: u8,
    pub minute: u8,
}

impl TimeOfDay {
    pub const MIDNIGHT: TimeOfDay = TimeOfDay { hour: 0, minute: 0 };
    pub const LAST_MINUTE: TimeOfDay = TimeOfDay {
        hour: 23,
        minute: 59,
    };

    pub fn new(hour: u8, minute: u8) -> Result<Self, EventError> {
        if hour > 23 || minute > 59 {
            return Err(EventError::validation(format!(
                "invalid time of day {hour:02}:{minute:02}"
            )));
        }
        Ok(Self { hour, minute })
    }

    /// Parse `HH:mm` (the hour may be a single digit).
    pub fn parse(input: &str) -> Result<Self, EventError> {
        let Some(colon) = input.find(':') else {
            return Err(EventError::parse(
                format!("expected a time as HH:mm, got '{input}'"),
                Span::whole(input),
                input,
            ));
        };
        let (hour_str, minute_str) = (&input[..colon], &input[colon + 1..]);
        let hour_span = Span::new(0, colon);
        let minute_span = Span::new(colon + 1, input.len());

        if hour_str.is_empty() || hour_str.len() > 2 || !is_digits(hour_str) {
            return Err(EventError::parse("invalid hour", hour_span, input));
        }
        if minute_str.len() != 2 || !is_digits(minute_str) {
            return Err(EventError::parse(
                "invalid minute, expected two digits",
                minute_span,
                input,
            ));
        }

        let hour: u8 = hour_str
            .parse()
            .map_err(|_| EventError::parse("invalid hour", hour_span, input))?;
        let minute: u8 = minute_str
            .parse()
            .map_err(|_| EventError::parse("invalid minute", minute_span, input))?;

        if hour > 23 {
            return Err(EventError::parse(
                format!("hour {hour} out of range (0-23)"),
                hour_span,
                input,
            ));
        }
        if minute > 59 {
            return Err(EventError::parse(
                format!("minute {minute} out of range (0-59)"),
                minute_span,
                input,
            ));
        }
        Ok(Self { hour, minute })
    }

    /// Minutes since midnight.
    pub fn total_minutes(self) -> i64 {
        i64::from(self.hour) * 60 + i64::from(self.minute)
    }

    pub fn to_jiff(self) -> Time {
        Time::constant(self.hour as i8, self.minute as i8, 0, 0)
    }

    pub fn from_jiff(time: Time) -> Self {
        Self {
            hour: time.hour() as u8,
            minute: time.minute() as u8,
        }
    }
}

fn is_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}

impl FromStr for TimeOfDay {
    type Err = EventError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

#[cfg(feature = "serde")]
impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        TimeOfDay::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// The daily window each occurrence occupies.
///
/// Windows never cross midnight: `end` is on the same day as `start` and
/// not before it. An equal start and end is a zero-length event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeWindow {
    start: TimeOfDay,
    end: TimeOfDay,
}

impl TimeWindow {
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Result<Self, EventError> {
        if end < start {
            return Err(EventError::validation(format!(
                "end time {end} is before start time {start}; overnight windows are not supported"
            )));
        }
        Ok(Self { start, end })
    }

    /// Parse optional `HH:mm` bounds, defaulting to the whole day (00:00-23:59).
    pub fn parse(start: Option<&str>, end: Option<&str>) -> Result<Self, EventError> {
        let start = start
            .map(TimeOfDay::parse)
            .transpose()?
            .unwrap_or(TimeOfDay::MIDNIGHT);
        let end = end
            .map(TimeOfDay::parse)
            .transpose()?
            .unwrap_or(TimeOfDay::LAST_MINUTE);
        Self::new(start, end)
    }

    pub fn start(&self) -> TimeOfDay {
        self.start
    }

    pub fn end(&self) -> TimeOfDay {
        self.end
    }

    pub fn duration(&self) -> SignedDuration {
        SignedDuration::from_mins(self.end.total_minutes() - self.start.total_minutes())
    }

    pub fn duration_ms(&self) -> i64 {
        (self.end.total_minutes() - self.start.total_minutes()) * 60_000
    }
}

impl Default for TimeWindow {
    fn default() -> Self {
        Self {
            start: TimeOfDay::MIDNIGHT,
            end: TimeOfDay::LAST_MINUTE,
        }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}
