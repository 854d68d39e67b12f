//! recur — expand weekly recurrence rules into concrete event dates.
//!
//! Given a start date, a set of weekdays, a repeat-until date, a daily time
//! window and a timezone, recur produces every occurrence of the event in
//! date order.
//!
//! # Examples
//!
//! ```
//! use recur::{create_event_dates, DayOfWeek, EventDateParams};
//!
//! let params = EventDateParams::new(
//!     "2024-01-01",
//!     vec![DayOfWeek::Monday],
//!     "2024-01-22",
//!     "America/Denver",
//! );
//! let events = create_event_dates(&params).unwrap();
//! assert_eq!(events.len(), 4);
//! println!("{}", events[0]); // "2024-01-01 00:00-23:59 (86340000ms)"
//! ```

pub mod count;
pub mod error;
pub mod expand;
pub mod request;
pub mod time;
pub mod weekday;

pub use count::{count_in_dates, count_occurrences};
pub use error::EventError;
pub use expand::EventOccurrence;
pub use request::{EventDateParams, RecurrenceRequest};
pub use time::{TimeOfDay, TimeWindow};
pub use weekday::DayOfWeek;

/// Parse `params` and expand them into occurrences sorted by start date.
///
/// Missing start and end times default to `00:00` and `23:59`.
pub fn create_event_dates(params: &EventDateParams) -> Result<Vec<EventOccurrence>, EventError> {
    params.to_request()?.expand()
}

/// Parse a JSON request document and expand it.
#[cfg(feature = "serde")]
pub fn create_event_dates_from_json(input: &str) -> Result<Vec<EventOccurrence>, EventError> {
    create_event_dates(&EventDateParams::from_json(input)?)
}
