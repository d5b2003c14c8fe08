use serde::{Deserialize, Serialize};

pub mod event;
pub mod page;
pub mod release;

pub use event::{
    CalendarEvent, CalendarEventError, EventDate, EventReminders, ReminderMethod,
    ReminderOverride,
};
pub use page::{PageExtraction, PageText, TextSource};
pub use release::{Candidate, PatternClass, ReleaseDateResolver};

/// Error payload handed back to the extension popup
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
