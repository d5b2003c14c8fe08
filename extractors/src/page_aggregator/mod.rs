use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared_types::{Candidate, PageExtraction, PageText, ReleaseDateResolver, TextSource};
use tracing::debug;

/// Characters of a text selection kept as its title
const SELECTION_TITLE_CHARS: usize = 100;

/// How much a date is trusted depending on where on the page it was found
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub title_weight: f32,
    pub comment_weight: f32,
    /// A comment replaces the current date when its raw confidence beats
    /// the current confidence times this factor
    pub comment_override_factor: f32,
    /// Comments are only consulted below this confidence
    pub comment_recheck_below: f32,
    pub max_comments: usize,
    /// Below this the caller should offer a web search instead
    pub low_confidence_threshold: f32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            title_weight: 0.8,
            comment_weight: 0.6,
            comment_override_factor: 0.65,
            comment_recheck_below: 0.7,
            max_comments: 5,
            low_confidence_threshold: 0.65,
        }
    }
}

impl ScoringConfig {
    pub fn needs_search_fallback(&self, extraction: &PageExtraction) -> bool {
        !extraction.has_date() || extraction.confidence < self.low_confidence_threshold
    }
}

/// Resolves the text blocks of one page into a single weighted result
pub struct PageAggregator<'r, R: ReleaseDateResolver + ?Sized> {
    resolver: &'r R,
    scoring: ScoringConfig,
}

impl<'r, R: ReleaseDateResolver + ?Sized> PageAggregator<'r, R> {
    pub fn new(resolver: &'r R, scoring: ScoringConfig) -> Self {
        Self { resolver, scoring }
    }

    pub fn scoring(&self) -> &ScoringConfig {
        &self.scoring
    }

    /// Description first, then the title, then the first few comments.
    pub fn extract(&self, page: &PageText, reference_date: NaiveDate) -> PageExtraction {
        let mut extraction = PageExtraction {
            title: page.title.trim().to_string(),
            source_text: page.description.clone(),
            ..Default::default()
        };

        if !page.description.trim().is_empty() {
            if let Some(found) = self.resolver.resolve(&page.description, reference_date) {
                apply(&mut extraction, found, TextSource::Description, 1.0);
            }
        }

        if !extraction.has_date() && !page.title.trim().is_empty() {
            if let Some(found) = self.resolver.resolve(&page.title, reference_date) {
                apply(&mut extraction, found, TextSource::Title, self.scoring.title_weight);
            }
        }

        if !extraction.has_date() || extraction.confidence < self.scoring.comment_recheck_below {
            for comment in page.comments.iter().take(self.scoring.max_comments) {
                let Some(found) = self.resolver.resolve(comment, reference_date) else {
                    continue;
                };
                let bar = if extraction.has_date() {
                    extraction.confidence * self.scoring.comment_override_factor
                } else {
                    0.0
                };
                if found.confidence > bar {
                    apply(&mut extraction, found, TextSource::Comment, self.scoring.comment_weight);
                }
            }
        }

        debug!(
            date = ?extraction.release_date,
            confidence = extraction.confidence,
            source = ?extraction.source,
            "page extraction finished"
        );
        extraction
    }

    /// Resolves a user's text selection, using its start as the title.
    pub fn extract_selection(&self, selection: &str, reference_date: NaiveDate) -> PageExtraction {
        let mut extraction = PageExtraction {
            title: selection.chars().take(SELECTION_TITLE_CHARS).collect(),
            source_text: selection.to_string(),
            ..Default::default()
        };
        if let Some(found) = self.resolver.resolve(selection, reference_date) {
            apply(&mut extraction, found, TextSource::Selection, 1.0);
        }
        extraction
    }
}

fn apply(extraction: &mut PageExtraction, found: Candidate, source: TextSource, weight: f32) {
    extraction.release_date = Some(found.canonical_date);
    extraction.confidence = found.confidence * weight;
    extraction.source = Some(source);
    extraction.matched_context = found.context_snippet;
    extraction.pattern_label = found.pattern_label;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ReleaseDateExtractor;
    use shared_types::PatternClass;
    use std::collections::HashMap;

    fn reference() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    /// Answers from a fixed table so weighting can be tested in isolation
    struct StubResolver(HashMap<&'static str, (&'static str, f32)>);

    impl ReleaseDateResolver for StubResolver {
        fn resolve(&self, text: &str, _reference_date: NaiveDate) -> Option<Candidate> {
            let (date, confidence) = self.0.get(text)?;
            Some(Candidate {
                canonical_date: date.to_string(),
                confidence: *confidence,
                raw_text: text.to_string(),
                context_snippet: text.to_string(),
                pattern_label: "stub".to_string(),
                pattern_class: PatternClass::StandaloneFullDate,
            })
        }
    }

    fn page(title: &str, description: &str, comments: &[&str]) -> PageText {
        PageText {
            title: title.to_string(),
            description: description.to_string(),
            comments: comments.iter().map(|c| c.to_string()).collect(),
        }
    }

    #[test]
    fn test_description_wins_at_full_weight() {
        let extractor = ReleaseDateExtractor::new();
        let aggregator = PageAggregator::new(&extractor, ScoringConfig::default());
        let result = aggregator.extract(
            &page("Official Trailer", "Release date: March 5, 2026", &[]),
            reference(),
        );
        assert_eq!(result.release_date.as_deref(), Some("2026-03-05"));
        assert_eq!(result.source, Some(TextSource::Description));
        assert_eq!(result.confidence, 0.97);
        assert_eq!(result.title, "Official Trailer");
    }

    #[test]
    fn test_title_is_discounted() {
        let extractor = ReleaseDateExtractor::new();
        let aggregator = PageAggregator::new(&extractor, ScoringConfig::default());
        let result = aggregator.extract(
            &page("Out on March 5, 2026 | Teaser", "Like and subscribe", &[]),
            reference(),
        );
        assert_eq!(result.release_date.as_deref(), Some("2026-03-05"));
        assert_eq!(result.source, Some(TextSource::Title));
        assert!((result.confidence - 0.97 * 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_comments_fill_in_when_nothing_else() {
        let stub = StubResolver(HashMap::from([("first comment", ("2025-12-01", 0.9))]));
        let aggregator = PageAggregator::new(&stub, ScoringConfig::default());
        let result = aggregator.extract(&page("", "", &["nothing here", "first comment"]), reference());
        assert_eq!(result.release_date.as_deref(), Some("2025-12-01"));
        assert_eq!(result.source, Some(TextSource::Comment));
        assert!((result.confidence - 0.54).abs() < 1e-6);
    }

    #[test]
    fn test_comments_skipped_when_confident() {
        let stub = StubResolver(HashMap::from([
            ("desc", ("2025-10-01", 0.92)),
            ("comment", ("2025-12-01", 0.97)),
        ]));
        let aggregator = PageAggregator::new(&stub, ScoringConfig::default());
        let result = aggregator.extract(&page("", "desc", &["comment"]), reference());
        assert_eq!(result.release_date.as_deref(), Some("2025-10-01"));
        assert_eq!(result.source, Some(TextSource::Description));
    }

    #[test]
    fn test_comment_overrides_weak_date() {
        let stub = StubResolver(HashMap::from([
            ("desc", ("2025-10-15", 0.35)),
            ("comment", ("2025-11-20", 0.6)),
        ]));
        let aggregator = PageAggregator::new(&stub, ScoringConfig::default());
        let result = aggregator.extract(&page("", "desc", &["comment"]), reference());
        assert_eq!(result.release_date.as_deref(), Some("2025-11-20"));
        assert!((result.confidence - 0.36).abs() < 1e-6);
    }

    #[test]
    fn test_only_first_comments_are_read() {
        let stub = StubResolver(HashMap::from([("late", ("2025-12-01", 0.9))]));
        let scoring = ScoringConfig {
            max_comments: 2,
            ..Default::default()
        };
        let aggregator = PageAggregator::new(&stub, scoring);
        let result = aggregator.extract(&page("", "", &["a", "b", "late"]), reference());
        assert!(!result.has_date());
    }

    #[test]
    fn test_selection_title_is_truncated() {
        let extractor = ReleaseDateExtractor::new();
        let aggregator = PageAggregator::new(&extractor, ScoringConfig::default());
        let selection = format!("{} coming Winter 2025", "x".repeat(120));
        let result = aggregator.extract_selection(&selection, reference());
        assert_eq!(result.title.chars().count(), 100);
        assert_eq!(result.release_date.as_deref(), Some("2025-12-21"));
        assert_eq!(result.source, Some(TextSource::Selection));
    }

    #[test]
    fn test_search_fallback_threshold() {
        let scoring = ScoringConfig::default();
        let mut extraction = PageExtraction::default();
        assert!(scoring.needs_search_fallback(&extraction));

        extraction.release_date = Some("2025-12-21".to_string());
        extraction.confidence = 0.64;
        assert!(scoring.needs_search_fallback(&extraction));

        extraction.confidence = 0.7;
        assert!(!scoring.needs_search_fallback(&extraction));
    }
}
