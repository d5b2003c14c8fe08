use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Anything that can pick the most credible release date out of free text.
///
/// Implementations must be pure: the same `text` and `reference_date` always
/// yield the same answer, and no state survives between calls.
pub trait ReleaseDateResolver {
    fn resolve(&self, text: &str, reference_date: NaiveDate) -> Option<Candidate>;
}

/// Evidentiary class of a pattern tier, strongest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
pub enum PatternClass {
    KeywordFullDate,
    KeywordNumericDate,
    KeywordPartialDate,
    KeywordMonthYear,
    SeasonOrQuarter,
    StandaloneFullDate,
    StandaloneMonthYear,
}

/// A date mention that survived normalization and the plausibility window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct Candidate {
    /// Canonical `YYYY-MM-DD`
    pub canonical_date: String,
    pub confidence: f32,
    pub raw_text: String,
    pub context_snippet: String,
    pub pattern_label: String,
    pub pattern_class: PatternClass,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(date: &str) -> Candidate {
        Candidate {
            canonical_date: date.to_string(),
            confidence: 0.97,
            raw_text: "March 5, 2026".to_string(),
            context_snippet: "Release date: March 5, 2026".to_string(),
            pattern_label: "Keyword + Full Date (Month Day, Year)".to_string(),
            pattern_class: PatternClass::KeywordFullDate,
        }
    }

    #[test]
    fn test_serializes_class_kebab_case() {
        let json = serde_json::to_value(candidate("2026-03-05")).unwrap();
        assert_eq!(json["pattern_class"], "keyword-full-date");
        assert_eq!(json["canonical_date"], "2026-03-05");
    }
}
