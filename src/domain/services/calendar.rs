use chrono::{Duration, NaiveDateTime, TimeZone, Utc};
use icalendar::{Calendar, Component, Event as IcalEvent, EventLike};
use crate::domain::models::{booking::Booking, event::Event};

const CALENDAR_BASE: &str = "https://calendar.google.com/calendar/render?action=TEMPLATE";

/// No per-event duration is stored; the product assumes two hours.
const ASSUMED_DURATION_HOURS: i64 = 2;

fn stamp(dt: NaiveDateTime) -> String {
    dt.format("%Y%m%dT%H%M%SZ").to_string()
}

/// Builds the calendar "quick add" deep link for an event. The stored
/// wall-clock date+time is taken as UTC.
pub fn quick_add_link(event: &Event) -> String {
    let start = event.starts_at();
    let end = start + Duration::hours(ASSUMED_DURATION_HOURS);
    format!(
        "{}&text={}&dates={}/{}&details={}&location={}",
        CALENDAR_BASE,
        urlencoding::encode(&event.title),
        stamp(start),
        stamp(end),
        urlencoding::encode(&event.description),
        urlencoding::encode(&event.location_name),
    )
}

/// Generates an iCalendar (.ics) string for a specific booking
pub fn generate_ics(event: &Event, booking: &Booking) -> String {
    let start = Utc.from_utc_datetime(&event.starts_at());
    let end = start + Duration::hours(ASSUMED_DURATION_HOURS);

    let mut calendar = Calendar::new();

    let ical_event = IcalEvent::new()
        .summary(&event.title)
        .description(&event.description)
        .location(&event.location_name)
        .starts(start)
        .ends(end)
        .uid(&booking.id)
        .done();

    calendar.push(ical_event);
    calendar.to_string()
}
