//! Day-of-week numbering.
//!
//! The public numbering is Sunday-first (`Sunday = 0` .. `Saturday = 6`),
//! the way calendar front ends usually send it. Alignment against the
//! calendar uses ISO numbering (`Monday = 1` .. `Sunday = 7`); the mapping
//! between the two lives in [`ISO_WEEKDAY`] and nowhere else.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{EventError, Span};

/// ISO weekday number indexed by Sunday-first day number.
///
/// `0 -> 7` (Sunday), `1 -> 1` (Monday), ..., `6 -> 6` (Saturday).
pub const ISO_WEEKDAY: [i8; 7] = [7, 1, 2, 3, 4, 5, 6];

/// A day of the week, numbered Sunday-first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DayOfWeek {
    Sunday = 0,
    Monday = 1,
    Tuesday = 2,
    Wednesday = 3,
    Thursday = 4,
    Friday = 5,
    Saturday = 6,
}

impl DayOfWeek {
    pub const ALL: [DayOfWeek; 7] = [
        Self::Sunday,
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sunday => "sunday",
            Self::Monday => "monday",
            Self::Tuesday => "tuesday",
            Self::Wednesday => "wednesday",
            Self::Thursday => "thursday",
            Self::Friday => "friday",
            Self::Saturday => "saturday",
        }
    }

    /// Sunday-first day number: Sunday=0, Saturday=6.
    pub fn number(self) -> u8 {
        self as u8
    }

    /// ISO 8601 day number: Monday=1, Sunday=7.
    pub fn iso_number(self) -> i8 {
        ISO_WEEKDAY[self as usize]
    }

    pub fn from_number(n: u8) -> Option<Self> {
        Self::ALL.get(usize::from(n)).copied()
    }

    pub fn to_jiff(self) -> jiff::civil::Weekday {
        match self {
            Self::Sunday => jiff::civil::Weekday::Sunday,
            Self::Monday => jiff::civil::Weekday::Monday,
            Self::Tuesday => jiff::civil::Weekday::Tuesday,
            Self::Wednesday => jiff::civil::Weekday::Wednesday,
            Self::Thursday => jiff::civil::Weekday::Thursday,
            Self::Friday => jiff::civil::Weekday::Friday,
            Self::Saturday => jiff::civil::Weekday::Saturday,
        }
    }

    pub fn from_jiff(wd: jiff::civil::Weekday) -> Self {
        match wd {
            jiff::civil::Weekday::Sunday => Self::Sunday,
            jiff::civil::Weekday::Monday => Self::Monday,
            jiff::civil::Weekday::Tuesday => Self::Tuesday,
            jiff::civil::Weekday::Wednesday => Self::Wednesday,
            jiff::civil::Weekday::Thursday => Self::Thursday,
            jiff::civil::Weekday::Friday => Self::Friday,
            jiff::civil::Weekday::Saturday => Self::Saturday,
        }
    }

    /// True if a jiff weekday lands on this day, compared by ISO number.
    pub fn matches(self, wd: jiff::civil::Weekday) -> bool {
        wd.to_monday_one_offset() == self.iso_number()
    }
}

impl TryFrom<i64> for DayOfWeek {
    type Error = EventError;

    fn try_from(n: i64) -> Result<Self, Self::Error> {
        u8::try_from(n)
            .ok()
            .and_then(Self::from_number)
            .ok_or_else(|| {
                EventError::validation(format!("day of week must be between 0 and 6, got {n}"))
            })
    }
}

impl FromStr for DayOfWeek {
    type Err = EventError;

    /// Accepts a Sunday-first number (`"0"`..`"6"`) or an English day name,
    /// full or abbreviated, in any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(n) = trimmed.parse::<i64>() {
            return Self::try_from(n);
        }
        parse_day_name(trimmed).ok_or_else(|| {
            EventError::parse(format!("unknown day of week '{trimmed}'"), Span::whole(s), s)
        })
    }
}

fn parse_day_name(s: &str) -> Option<DayOfWeek> {
    match s.to_lowercase().as_str() {
        "sunday" | "sun" => Some(DayOfWeek::Sunday),
        "monday" | "mon" => Some(DayOfWeek::Monday),
        "tuesday" | "tue" | "tues" => Some(DayOfWeek::Tuesday),
        "wednesday" | "wed" => Some(DayOfWeek::Wednesday),
        "thursday" | "thu" | "thurs" => Some(DayOfWeek::Thursday),
        "friday" | "fri" => Some(DayOfWeek::Friday),
        "saturday" | "sat" => Some(DayOfWeek::Saturday),
        _ => None,
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl Serialize for DayOfWeek {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.number())
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for DayOfWeek {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DayVisitor;

        impl serde::de::Visitor<'_> for DayVisitor {
            type Value = DayOfWeek;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a day number between 0 (sunday) and 6 (saturday) or a day name")
            }

            fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<DayOfWeek, E> {
                DayOfWeek::try_from(v).map_err(E::custom)
            }

            fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<DayOfWeek, E> {
                let n = i64::try_from(v).unwrap_or(i64::MAX);
                DayOfWeek::try_from(n).map_err(E::custom)
            }

            fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<DayOfWeek, E> {
                v.parse().map_err(E::custom)
            }
        }

        deserializer.deserialize_any(DayVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iso_table_maps_sunday_to_seven() {
        assert_eq!(DayOfWeek::Sunday.iso_number(), 7);
        assert_eq!(DayOfWeek::Monday.iso_number(), 1);
        assert_eq!(DayOfWeek::Saturday.iso_number(), 6);
    }

    #[test]
    fn test_iso_table_agrees_with_jiff() {
        for day in DayOfWeek::ALL {
            assert_eq!(day.to_jiff().to_monday_one_offset(), day.iso_number());
            assert!(day.matches(day.to_jiff()));
            assert_eq!(DayOfWeek::from_jiff(day.to_jiff()), day);
        }
    }

    #[test]
    fn test_from_number_bounds() {
        assert_eq!(DayOfWeek::from_number(0), Some(DayOfWeek::Sunday));
        assert_eq!(DayOfWeek::from_number(6), Some(DayOfWeek::Saturday));
        assert_eq!(DayOfWeek::from_number(7), None);
    }

    #[test]
    fn test_try_from_out_of_range() {
        let err = DayOfWeek::try_from(9i64).unwrap_err();
        assert!(matches!(err, EventError::Validation { .. }));
        assert_eq!(err.to_string(), "day of week must be between 0 and 6, got 9");
        assert!(DayOfWeek::try_from(-1i64).is_err());
    }

    #[test]
    fn test_parse_names_and_numbers() {
        assert_eq!("Mon".parse::<DayOfWeek>().unwrap(), DayOfWeek::Monday);
        assert_eq!("saturday".parse::<DayOfWeek>().unwrap(), DayOfWeek::Saturday);
        assert_eq!(" 0 ".parse::<DayOfWeek>().unwrap(), DayOfWeek::Sunday);
        assert!(matches!(
            "funday".parse::<DayOfWeek>(),
            Err(EventError::Parse { .. })
        ));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_number_and_name() {
        let days: Vec<DayOfWeek> = serde_json::from_str(r#"[0, "fri", 6]"#).unwrap();
        assert_eq!(
            days,
            vec![DayOfWeek::Sunday, DayOfWeek::Friday, DayOfWeek::Saturday]
        );
        assert_eq!(serde_json::to_string(&DayOfWeek::Wednesday).unwrap(), "3");
        assert!(serde_json::from_str::<DayOfWeek>("7").is_err());
    }
}
