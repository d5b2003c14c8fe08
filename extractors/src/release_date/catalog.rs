use chrono::{Datelike, NaiveDate};
use regex::{Captures, Regex};
use shared_types::PatternClass;

use super::normalizer::month_number;

/// Words that mark a date as a release announcement
const KEYWORDS: &str = r"release\s+date|releas(?:e|es|ed|ing)|coming|comes?\s+out|launch(?:es|ed|ing)?|premier(?:e|es|ed|ing)|available|out|ships|shipping|set\s+for|expected|due|in\s+theat(?:re|er)s\s+from";

/// Keywords that may follow a full date ("March 5, 2026 is the release date")
const TRAILING_KEYWORDS: &str = r"release\s+date|launch\s+date|premiere|set\s+for|coming";

const PREPOSITION: &str = r"(?:(?:on|in|by|around|for)\s+)?(?:the\s+)?";

const MONTH: &str = r"[A-Za-z]+\.?";
const DAY: &str = r"\d{1,2}(?:st|nd|rd|th)?";

/// How a tier turns its match into something the normalizer understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformKind {
    /// Capture is a complete date expression
    None,
    /// `(season) (year)` maps to a fixed day of that season
    SeasonMap,
    /// `(Qn) (year)` maps to the first day of the quarter
    QuarterMap,
    /// Capture has no year; one is inferred from the reference date
    YearInferPartialDate,
}

impl TransformKind {
    /// Returns either a canonical date or a year-completed expression.
    pub fn apply(&self, captures: &Captures, raw_text: &str, reference: NaiveDate) -> Option<String> {
        match self {
            TransformKind::None => Some(raw_text.to_string()),
            TransformKind::SeasonMap => {
                let season = captures.get(1)?.as_str().to_lowercase();
                let year = captures.get(2)?.as_str();
                let month_day = match season.as_str() {
                    "spring" => "03-20",
                    "summer" => "06-21",
                    "fall" | "autumn" => "09-22",
                    "winter" => "12-21",
                    _ => return None,
                };
                Some(format!("{}-{}", year, month_day))
            }
            TransformKind::QuarterMap => {
                let quarter = captures.get(1)?.as_str().to_uppercase();
                let year = captures.get(2)?.as_str();
                let month = match quarter.as_str() {
                    "Q1" => "01",
                    "Q2" => "04",
                    "Q3" => "07",
                    "Q4" => "10",
                    _ => return None,
                };
                Some(format!("{}-{}-01", year, month))
            }
            TransformKind::YearInferPartialDate => {
                let month = raw_text.split_whitespace().find_map(month_number)?;
                let year = infer_year(month, reference);
                Some(format!("{} {}", raw_text, year))
            }
        }
    }
}

/// Picks the year for a month mentioned without one.
///
/// A month more than one month behind the reference month is taken to mean
/// next year's occurrence.
pub fn infer_year(month: u32, reference: NaiveDate) -> i32 {
    let current = reference.month();
    if month < current && current - month > 1 {
        reference.year() + 1
    } else {
        reference.year()
    }
}

/// One grammar rule of the catalog
#[derive(Debug, Clone)]
pub struct PatternTier {
    pub label: String,
    pub class: PatternClass,
    /// Regex source, matched case-insensitively
    pub pattern: String,
    pub confidence: f32,
    /// Capture group holding the date expression; whole match when `None`
    pub date_group: Option<usize>,
    pub transform: TransformKind,
}

impl PatternTier {
    fn new(
        label: &str,
        class: PatternClass,
        pattern: String,
        confidence: f32,
        date_group: Option<usize>,
        transform: TransformKind,
    ) -> Self {
        Self {
            label: label.to_string(),
            class,
            pattern,
            confidence,
            date_group,
            transform,
        }
    }

    pub fn compile(&self) -> Result<Regex, regex::Error> {
        Regex::new(&format!("(?i){}", self.pattern))
    }
}

fn month_day_year() -> String {
    format!(r"{MONTH}\s+{DAY},?\s+\d{{4}}")
}

fn day_month_year() -> String {
    format!(r"{DAY}\s+(?:of\s+)?{MONTH},?\s+\d{{4}}")
}

fn keyword_prefix() -> String {
    format!(r"\b(?:{KEYWORDS})\b\s*:?\s*{PREPOSITION}")
}

/// The built-in catalog, strongest evidence first.
///
/// Order is informational; every tier is tried on every scan.
pub fn release_date_tiers() -> Vec<PatternTier> {
    let keyword = keyword_prefix();

    vec![
        // Keyword + full date
        PatternTier::new(
            "Keyword + Full Date (Month Day, Year)",
            PatternClass::KeywordFullDate,
            format!(r"{keyword}({})\b", month_day_year()),
            0.97,
            Some(1),
            TransformKind::None,
        ),
        PatternTier::new(
            "Keyword + Full Date (Day Month, Year)",
            PatternClass::KeywordFullDate,
            format!(r"{keyword}({})\b", day_month_year()),
            0.97,
            Some(1),
            TransformKind::None,
        ),
        PatternTier::new(
            "Full Date (Month Day, Year) + Keyword",
            PatternClass::KeywordFullDate,
            format!(
                r"\b({})\s+(?:is\s+the\s+)?(?:{TRAILING_KEYWORDS})\b",
                month_day_year()
            ),
            0.96,
            Some(1),
            TransformKind::None,
        ),
        PatternTier::new(
            "Full Date (Day Month, Year) + Keyword",
            PatternClass::KeywordFullDate,
            format!(
                r"\b({})\s+(?:is\s+the\s+)?(?:{TRAILING_KEYWORDS})\b",
                day_month_year()
            ),
            0.96,
            Some(1),
            TransformKind::None,
        ),
        // Keyword + numeric date
        PatternTier::new(
            "Keyword + Full Numeric Date (MM/DD/YYYY or YYYY-MM-DD)",
            PatternClass::KeywordNumericDate,
            format!(r"{keyword}(\d{{1,2}}/\d{{1,2}}/\d{{4}}|\d{{4}}-\d{{1,2}}-\d{{1,2}})\b"),
            0.92,
            Some(1),
            TransformKind::None,
        ),
        // Keyword + partial date, year inferred
        PatternTier::new(
            "Keyword + Day Month (Infer Year)",
            PatternClass::KeywordPartialDate,
            format!(r"{keyword}({DAY}\s+(?:of\s+)?[A-Za-z]+)\b"),
            0.88,
            Some(1),
            TransformKind::YearInferPartialDate,
        ),
        PatternTier::new(
            "Keyword + Month Day (Infer Year)",
            PatternClass::KeywordPartialDate,
            format!(r"{keyword}({MONTH}\s+{DAY})\b"),
            0.87,
            Some(1),
            TransformKind::YearInferPartialDate,
        ),
        PatternTier::new(
            "Keyword + Month Year",
            PatternClass::KeywordMonthYear,
            format!(r"{keyword}({MONTH}\s+\d{{4}})\b"),
            0.80,
            Some(1),
            TransformKind::None,
        ),
        // Seasons and quarters
        PatternTier::new(
            "Season Year",
            PatternClass::SeasonOrQuarter,
            r"\b(spring|summer|fall|autumn|winter)\s+(?:of\s+)?(\d{4})\b".to_string(),
            0.70,
            None,
            TransformKind::SeasonMap,
        ),
        PatternTier::new(
            "Quarter Year",
            PatternClass::SeasonOrQuarter,
            r"\b(Q[1-4])\s*(?:of\s*)?(\d{4})\b".to_string(),
            0.65,
            None,
            TransformKind::QuarterMap,
        ),
        // Standalone full dates
        PatternTier::new(
            "Day Month, Year (Standalone)",
            PatternClass::StandaloneFullDate,
            format!(r"\b({})\b", day_month_year()),
            0.61,
            Some(1),
            TransformKind::None,
        ),
        PatternTier::new(
            "Month Day, Year (Standalone)",
            PatternClass::StandaloneFullDate,
            format!(r"\b({})\b", month_day_year()),
            0.60,
            Some(1),
            TransformKind::None,
        ),
        PatternTier::new(
            "YYYY-MM-DD (Standalone)",
            PatternClass::StandaloneFullDate,
            r"\b(\d{4}-\d{1,2}-\d{1,2})\b".to_string(),
            0.55,
            Some(1),
            TransformKind::None,
        ),
        PatternTier::new(
            "MM/DD/YYYY (Standalone)",
            PatternClass::StandaloneFullDate,
            r"\b(\d{1,2}/\d{1,2}/\d{4})\b".to_string(),
            0.50,
            Some(1),
            TransformKind::None,
        ),
        // Standalone month/year
        PatternTier::new(
            "Month Year (Standalone)",
            PatternClass::StandaloneMonthYear,
            r"\b([A-Za-z]+\s+\d{4})\b".to_string(),
            0.35,
            Some(1),
            TransformKind::None,
        ),
    ]
}
