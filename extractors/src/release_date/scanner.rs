use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;
use tracing::trace;

use super::catalog::{PatternTier, TransformKind};

/// A year right after a partial date means the date was not partial after all
static TRAILING_YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\s,]*\d{4}").expect("trailing year regex"));

/// A tier paired with its compiled matcher
#[derive(Debug, Clone)]
pub struct CompiledTier {
    pub tier: PatternTier,
    regex: Regex,
}

impl CompiledTier {
    pub fn new(tier: PatternTier) -> Result<Self, regex::Error> {
        let regex = tier.compile()?;
        Ok(Self { tier, regex })
    }
}

/// One match, before normalization
#[derive(Debug, Clone)]
pub struct RawCandidate<'t> {
    pub tier: &'t PatternTier,
    pub raw_text: String,
    pub context_snippet: String,
    /// Output of the tier's transform, fed to the normalizer
    pub date_expression: String,
}

/// Collects every match of every tier in `text`.
///
/// Nothing is filtered here beyond what a tier's transform rejects; a weak
/// tier may hold the only candidate that survives validation.
pub fn scan<'t>(tiers: &'t [CompiledTier], text: &str, reference: NaiveDate) -> Vec<RawCandidate<'t>> {
    let mut candidates = Vec::new();

    for compiled in tiers {
        let tier = &compiled.tier;

        for captures in compiled.regex.captures_iter(text) {
            let Some(whole) = captures.get(0) else {
                continue;
            };
            let raw = tier
                .date_group
                .and_then(|g| captures.get(g))
                .unwrap_or(whole);

            if tier.transform == TransformKind::YearInferPartialDate
                && TRAILING_YEAR.is_match(&text[whole.end()..])
            {
                trace!(tier = %tier.label, context = whole.as_str(), "partial date followed by a year, skipping");
                continue;
            }

            let Some(date_expression) = tier.transform.apply(&captures, raw.as_str(), reference)
            else {
                trace!(tier = %tier.label, raw = raw.as_str(), "transform rejected match");
                continue;
            };

            trace!(tier = %tier.label, raw = raw.as_str(), expression = %date_expression, "raw candidate");
            candidates.push(RawCandidate {
                tier,
                raw_text: raw.as_str().to_string(),
                context_snippet: whole.as_str().to_string(),
                date_expression,
            });
        }
    }

    candidates
}
