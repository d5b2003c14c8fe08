use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// All-day calendar event in the shape the Google Calendar API accepts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub summary: String,
    pub description: String,
    pub start: EventDate,
    pub end: EventDate,
    pub reminders: EventReminders,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
pub struct EventDate {
    /// `YYYY-MM-DD`, no time component
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct EventReminders {
    pub use_default: bool,
    pub overrides: Vec<ReminderOverride>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
pub struct ReminderOverride {
    pub method: ReminderMethod,
    pub minutes: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
pub enum ReminderMethod {
    Popup,
}

/// Reasons a calendar event cannot be built
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CalendarEventError {
    #[error("Invalid date format for calendar event: {0:?}. Expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Cannot create reminder without a title")]
    MissingTitle,

    #[error("Cannot fold the {0} line of the calendar file without splitting a character")]
    UnfoldableText(String),
}
