mod ics;

pub use ics::to_ics;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use shared_types::{
    CalendarEvent, CalendarEventError, EventDate, EventReminders, ReminderMethod,
    ReminderOverride,
};
use std::sync::LazyLock;

static EVENT_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("event date regex"));

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReminderConfig {
    /// Popup reminders, in minutes before the start of the release day
    pub offsets_minutes: Vec<u32>,
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            offsets_minutes: vec![24 * 60, 9 * 60],
        }
    }
}

/// Checks `date` is a real calendar day written exactly as `YYYY-MM-DD`.
pub fn parse_event_date(date: &str) -> Result<NaiveDate, CalendarEventError> {
    if !EVENT_DATE.is_match(date) {
        return Err(CalendarEventError::InvalidDate(date.to_string()));
    }
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| CalendarEventError::InvalidDate(date.to_string()))
}

/// Builds an all-day release reminder for `title` on `date`.
pub fn build_release_event(
    title: &str,
    date: &str,
    reminders: &ReminderConfig,
) -> Result<CalendarEvent, CalendarEventError> {
    let title = title.trim();
    if title.is_empty() || title == "N/A" {
        return Err(CalendarEventError::MissingTitle);
    }
    parse_event_date(date)?;

    let overrides = reminders
        .offsets_minutes
        .iter()
        .map(|&minutes| ReminderOverride {
            method: ReminderMethod::Popup,
            minutes,
        })
        .collect();

    Ok(CalendarEvent {
        summary: format!("{} - Release Reminder", title),
        description: format!(
            "This is a reminder for the release of: {}.\nOriginal date string from page: {}",
            title, date
        ),
        start: EventDate {
            date: date.to_string(),
        },
        end: EventDate {
            date: date.to_string(),
        },
        reminders: EventReminders {
            use_default: false,
            overrides,
        },
    })
}
