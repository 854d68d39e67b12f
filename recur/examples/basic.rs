//! Basic recur walkthrough: count weekdays, expand a recurrence, emit JSON.

use jiff::civil::Date;
use jiff::tz::TimeZone;
use recur::{count_in_dates, create_event_dates, DayOfWeek, EventDateParams, RecurrenceRequest, TimeWindow};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Count a weekday in a closed date range
    let start = Date::new(2024, 1, 1)?;
    let end = Date::new(2024, 12, 31)?;
    println!("Mondays in 2024: {}", count_in_dates(start, end, DayOfWeek::Monday));

    // Expand from string-shaped parameters
    let params = EventDateParams::new(
        "2024-01-01",
        vec![DayOfWeek::Tuesday, DayOfWeek::Thursday],
        "2024-01-31",
        "America/Denver",
    )
    .with_times("18:30", "20:00");
    println!("\nEvening class:");
    for event in create_event_dates(&params)? {
        println!("  {event}");
    }

    // Build a typed request directly
    let request = RecurrenceRequest::new(
        start,
        [DayOfWeek::Saturday, DayOfWeek::Sunday],
        Date::new(2024, 1, 14)?,
        TimeZone::get("Europe/Berlin")?,
    )?
    .with_window(TimeWindow::parse(Some("10:00"), Some("12:00"))?);
    let events = request.expand()?;

    println!("\nWeekend brunch as JSON:");
    println!("{}", serde_json::to_string_pretty(&events)?);

    Ok(())
}
