use chrono::{Days, Utc};
use ical::generator::{Emitter, IcalCalendarBuilder, IcalEventBuilder};
use ical::parser::ical::component::IcalAlarm;
use ical::property::Property;
use ical::ical_property;
use shared_types::{CalendarEvent, CalendarEventError};

use super::parse_event_date;

const PRODID: &str = "-//release-reminder//release-reminder//EN";

/// Content lines are folded every 75 octets, then every 74 after the leading space.
const FIRST_FOLD: usize = 75;
const NEXT_FOLD: usize = 74;

/// Renders `event` as an iCalendar document with one all-day VEVENT.
///
/// DTEND is exclusive in iCalendar, so it is the day after the release.
pub fn to_ics(event: &CalendarEvent) -> Result<String, CalendarEventError> {
    let start = parse_event_date(&event.start.date)?;
    let end = start
        .checked_add_days(Days::new(1))
        .ok_or_else(|| CalendarEventError::InvalidDate(event.start.date.clone()))?;
    let start_day = start.format("%Y%m%d").to_string();

    let mut ical_event = IcalEventBuilder::tzid("UTC")
        .uid(format!("{}-{}@release-reminder", start_day, slug(&event.summary)))
        .changed_utc(Utc::now().format("%Y%m%dT%H%M%SZ").to_string())
        .start_day(start_day)
        .end_day(end.format("%Y%m%d").to_string())
        .set(text_property("SUMMARY", &event.summary)?)
        .set(text_property("DESCRIPTION", &event.description)?)
        .build();

    for reminder in &event.reminders.overrides {
        let mut alarm = IcalAlarm::new();
        alarm.properties.push(ical_property!("ACTION", "DISPLAY"));
        alarm
            .properties
            .push(text_property("DESCRIPTION", &event.summary)?);
        alarm
            .properties
            .push(ical_property!("TRIGGER", format!("-PT{}M", reminder.minutes)));
        ical_event.alarms.push(alarm);
    }

    let calendar = IcalCalendarBuilder::version("2.0")
        .gregorian()
        .prodid(PRODID)
        .add_event(ical_event)
        .build();

    Ok(calendar.generate())
}

/// TEXT value property, escaped here since the emitter only folds lines
fn text_property(name: &str, value: &str) -> Result<Property, CalendarEventError> {
    let value = value
        .replace('\\', "\\\\")
        .replace(';', "\\;")
        .replace(',', "\\,")
        .replace('\n', "\\n");

    // Lines are folded at fixed octet offsets, which must not split a character
    let line = format!("{}:{}", name, value);
    let splits_char = (FIRST_FOLD..line.len())
        .step_by(NEXT_FOLD)
        .any(|offset| !line.is_char_boundary(offset));
    if splits_char {
        return Err(CalendarEventError::UnfoldableText(name.to_string()));
    }

    Ok(Property {
        name: name.to_string(),
        params: None,
        value: Some(value),
    })
}

fn slug(value: &str) -> String {
    value
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '-' })
        .collect::<String>()
        .split('-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}
