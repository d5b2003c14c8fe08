use chrono::{Days, Months, NaiveDate};
use shared_types::Candidate;

/// Days before the reference date a release may still be reported
pub const PAST_TOLERANCE_DAYS: u64 = 7;

/// Months after the reference date beyond which a date is noise
pub const FUTURE_HORIZON_MONTHS: u32 = 5 * 12;

/// True when `date` lies in `[reference - 7 days, reference + 5 years]`.
pub fn is_plausible(date: NaiveDate, reference: NaiveDate) -> bool {
    let Some(earliest) = reference.checked_sub_days(Days::new(PAST_TOLERANCE_DAYS)) else {
        return false;
    };
    let Some(latest) = reference.checked_add_months(Months::new(FUTURE_HORIZON_MONTHS)) else {
        return false;
    };
    earliest <= date && date <= latest
}

/// Highest confidence wins, then the longer context snippet.
///
/// Remaining ties keep the earliest candidate in scan order.
pub fn select_best(candidates: Vec<Candidate>) -> Option<Candidate> {
    let mut best: Option<Candidate> = None;

    for candidate in candidates {
        let replace = match &best {
            None => true,
            Some(current) => outranks(&candidate, current),
        };
        if replace {
            best = Some(candidate);
        }
    }

    best
}

fn outranks(challenger: &Candidate, current: &Candidate) -> bool {
    if challenger.confidence != current.confidence {
        return challenger.confidence > current.confidence;
    }
    challenger.context_snippet.chars().count() > current.context_snippet.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::PatternClass;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn candidate(day: &str, confidence: f32, context: &str) -> Candidate {
        Candidate {
            canonical_date: day.to_string(),
            confidence,
            raw_text: context.to_string(),
            context_snippet: context.to_string(),
            pattern_label: "test".to_string(),
            pattern_class: PatternClass::StandaloneFullDate,
        }
    }

    #[test]
    fn test_window_bounds() {
        let today = date(2024, 1, 1);
        assert!(is_plausible(date(2023, 12, 25), today));
        assert!(!is_plausible(date(2023, 12, 24), today));
        assert!(is_plausible(date(2029, 1, 1), today));
        assert!(!is_plausible(date(2029, 1, 2), today));
    }

    #[test]
    fn test_leap_day_reference_clamps_horizon() {
        let today = date(2024, 2, 29);
        assert!(is_plausible(date(2029, 2, 28), today));
        assert!(!is_plausible(date(2029, 3, 1), today));
        assert!(is_plausible(date(2024, 2, 22), today));
    }

    #[test]
    fn test_window_rejects_far_past_and_future() {
        let today = date(2024, 1, 1);
        assert!(!is_plausible(date(2010, 1, 1), today));
        assert!(!is_plausible(date(2035, 1, 1), today));
    }

    #[test]
    fn test_highest_confidence_wins() {
        let best = select_best(vec![
            candidate("2025-01-01", 0.60, "a much longer context snippet"),
            candidate("2025-02-02", 0.97, "short"),
        ])
        .unwrap();
        assert_eq!(best.canonical_date, "2025-02-02");
    }

    #[test]
    fn test_tie_prefers_longer_context() {
        let best = select_best(vec![
            candidate("2025-01-01", 0.97, "out on 6 March"),
            candidate("2025-02-02", 0.97, "Release date: March 5, 2026"),
        ])
        .unwrap();
        assert_eq!(best.canonical_date, "2025-02-02");
    }

    #[test]
    fn test_full_tie_keeps_first() {
        let best = select_best(vec![
            candidate("2025-01-01", 0.5, "same"),
            candidate("2025-02-02", 0.5, "same"),
        ])
        .unwrap();
        assert_eq!(best.canonical_date, "2025-01-01");
    }

    #[test]
    fn test_empty_is_none() {
        assert!(select_best(Vec::new()).is_none());
    }
}
