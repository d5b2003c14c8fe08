//! Free-text release date resolver.
//!
//! Text flows through four stages: every [`PatternTier`] of the catalog is
//! scanned over the whole input, each raw match is normalized to a calendar
//! date, dates outside the plausibility window are dropped, and the strongest
//! survivor is returned.

mod catalog;
mod normalizer;
mod ranker;
mod scanner;

pub use catalog::{infer_year, release_date_tiers, PatternTier, TransformKind};
pub use normalizer::{month_number, normalize, normalize_to_canonical, strip_ordinals};
pub use ranker::{is_plausible, select_best, FUTURE_HORIZON_MONTHS, PAST_TOLERANCE_DAYS};
pub use scanner::{scan, CompiledTier, RawCandidate};

use chrono::{NaiveDate, Utc};
use shared_types::{Candidate, ReleaseDateResolver};
use std::borrow::Cow;
use std::sync::LazyLock;
use tracing::debug;

/// Built-in catalog, compiled once per process
static BUILTIN_TIERS: LazyLock<Vec<CompiledTier>> = LazyLock::new(|| {
    release_date_tiers()
        .into_iter()
        .map(|tier| CompiledTier::new(tier).expect("built-in release date tier must compile"))
        .collect()
});

pub struct ReleaseDateExtractor {
    tiers: Cow<'static, [CompiledTier]>,
}

impl ReleaseDateExtractor {
    /// Extractor over the built-in catalog
    pub fn new() -> Self {
        Self {
            tiers: Cow::Borrowed(BUILTIN_TIERS.as_slice()),
        }
    }

    /// Extractor over a custom catalog, e.g. one with recalibrated weights
    pub fn from_tiers(tiers: Vec<PatternTier>) -> Result<Self, regex::Error> {
        let tiers = tiers
            .into_iter()
            .map(CompiledTier::new)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            tiers: Cow::Owned(tiers),
        })
    }

    pub fn tiers(&self) -> impl Iterator<Item = &PatternTier> {
        self.tiers.iter().map(|c| &c.tier)
    }

    /// Every normalized, plausible candidate in scan order
    pub fn candidates(&self, text: &str, reference_date: NaiveDate) -> Vec<Candidate> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        scan(&self.tiers, text, reference_date)
            .into_iter()
            .filter_map(|raw| {
                let Some(date) = normalize(&raw.date_expression) else {
                    debug!(tier = %raw.tier.label, expression = %raw.date_expression, "unparsable date, dropping");
                    return None;
                };
                if !is_plausible(date, reference_date) {
                    debug!(tier = %raw.tier.label, %date, "date outside plausibility window, dropping");
                    return None;
                }
                Some(Candidate {
                    canonical_date: date.format("%Y-%m-%d").to_string(),
                    confidence: raw.tier.confidence,
                    raw_text: raw.raw_text,
                    context_snippet: raw.context_snippet,
                    pattern_label: raw.tier.label.clone(),
                    pattern_class: raw.tier.class,
                })
            })
            .collect()
    }

    /// Most credible release date in `text` relative to `reference_date`
    pub fn resolve(&self, text: &str, reference_date: NaiveDate) -> Option<Candidate> {
        let best = select_best(self.candidates(text, reference_date));
        if let Some(candidate) = &best {
            debug!(
                date = %candidate.canonical_date,
                confidence = candidate.confidence,
                label = %candidate.pattern_label,
                "resolved release date"
            );
        }
        best
    }

    /// Like [`resolve`](Self::resolve) with today's UTC date as the reference
    pub fn resolve_today(&self, text: &str) -> Option<Candidate> {
        self.resolve(text, Utc::now().date_naive())
    }
}

impl Default for ReleaseDateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ReleaseDateResolver for ReleaseDateExtractor {
    fn resolve(&self, text: &str, reference_date: NaiveDate) -> Option<Candidate> {
        ReleaseDateExtractor::resolve(self, text, reference_date)
    }
}
