use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Where on a page a block of text came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
pub enum TextSource {
    Description,
    Title,
    Comment,
    Selection,
}

/// Text blocks collected from a page by the browser side
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
pub struct PageText {
    pub title: String,
    pub description: String,
    pub comments: Vec<String>,
}

/// Best release date found across a page's text blocks.
///
/// `confidence` is already weighted by `source`, so it is comparable across
/// pages but no longer equals the raw tier confidence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
pub struct PageExtraction {
    pub title: String,
    pub release_date: Option<String>,
    pub confidence: f32,
    pub source: Option<TextSource>,
    pub source_text: String,
    pub matched_context: String,
    pub pattern_label: String,
}

impl PageExtraction {
    pub fn has_date(&self) -> bool {
        self.release_date.is_some()
    }

    /// Year of the extracted date, used to sharpen fallback searches
    pub fn year(&self) -> Option<i32> {
        self.release_date.as_deref()?.get(..4)?.parse().ok()
    }
}
