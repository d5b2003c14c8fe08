use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;

static ORDINAL_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+)(?:st|nd|rd|th)").expect("ordinal suffix regex"));

static CANONICAL_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("canonical date regex"));

static MONTH_YEAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z]+\.?)\s+(\d{4})$").expect("month year regex")
});

/// Day used when an expression names only a month and a year
const MID_MONTH_DAY: u32 = 15;

/// Turns an English month name or abbreviation into its number.
pub fn month_number(token: &str) -> Option<u32> {
    let name = token.trim_end_matches('.').to_ascii_lowercase();
    let month = match name.as_str() {
        "jan" | "january" => 1,
        "feb" | "february" => 2,
        "mar" | "march" => 3,
        "apr" | "april" => 4,
        "may" => 5,
        "jun" | "june" => 6,
        "jul" | "july" => 7,
        "aug" | "august" => 8,
        "sep" | "sept" | "september" => 9,
        "oct" | "october" => 10,
        "nov" | "november" => 11,
        "dec" | "december" => 12,
        _ => return None,
    };
    Some(month)
}

/// Removes ordinal suffixes: "1st" becomes "1", "23rd" becomes "23".
pub fn strip_ordinals(expression: &str) -> String {
    ORDINAL_SUFFIX.replace_all(expression, "$1").into_owned()
}

/// Parses a free-form date expression into a calendar date.
///
/// Accepts canonical `YYYY-MM-DD`, "Month Year" (anchored to the 15th),
/// "Month Day, Year", "Day Month Year", `M/D/YYYY` and `YYYY-M-D`.
/// Anything else, including impossible days such as February 30, is `None`.
pub fn normalize(expression: &str) -> Option<NaiveDate> {
    let cleaned = strip_ordinals(expression.trim());

    if CANONICAL_DATE.is_match(&cleaned) {
        return NaiveDate::parse_from_str(&cleaned, "%Y-%m-%d").ok();
    }

    if let Some(caps) = MONTH_YEAR.captures(&cleaned) {
        let month = month_number(caps.get(1)?.as_str())?;
        let year = caps.get(2)?.as_str().parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, MID_MONTH_DAY);
    }

    parse_calendar_expression(&cleaned)
}

/// Canonical `YYYY-MM-DD` string for an expression, built from calendar fields.
pub fn normalize_to_canonical(expression: &str) -> Option<String> {
    normalize(expression).map(|date| date.format("%Y-%m-%d").to_string())
}

fn parse_calendar_expression(expression: &str) -> Option<NaiveDate> {
    let tokens: Vec<&str> = expression
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty() && !t.eq_ignore_ascii_case("of"))
        .collect();

    match tokens.as_slice() {
        [numeric] if numeric.contains('/') => parse_numeric(numeric, '/', NumericOrder::MonthDayYear),
        [numeric] if numeric.contains('-') => parse_numeric(numeric, '-', NumericOrder::YearMonthDay),
        [first, second, year] => {
            let year: i32 = parse_year(year)?;
            if let Some(month) = month_number(first) {
                let day = second.parse().ok()?;
                NaiveDate::from_ymd_opt(year, month, day)
            } else {
                let month = month_number(second)?;
                let day = first.parse().ok()?;
                NaiveDate::from_ymd_opt(year, month, day)
            }
        }
        _ => None,
    }
}

enum NumericOrder {
    MonthDayYear,
    YearMonthDay,
}

fn parse_numeric(token: &str, separator: char, order: NumericOrder) -> Option<NaiveDate> {
    let parts: Vec<&str> = token.split(separator).collect();
    let [a, b, c] = parts.as_slice() else {
        return None;
    };

    match order {
        NumericOrder::MonthDayYear => {
            NaiveDate::from_ymd_opt(parse_year(c)?, a.parse().ok()?, b.parse().ok()?)
        }
        NumericOrder::YearMonthDay => {
            NaiveDate::from_ymd_opt(parse_year(a)?, b.parse().ok()?, c.parse().ok()?)
        }
    }
}

fn parse_year(token: &str) -> Option<i32> {
    if token.len() != 4 || !token.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    token.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_ordinals() {
        assert_eq!(strip_ordinals("August 1st, 2025"), "August 1, 2025");
        assert_eq!(strip_ordinals("22nd March 2026"), "22 March 2026");
        assert_eq!(strip_ordinals("3rd and 4TH"), "3 and 4");
    }

    #[test]
    fn test_canonical_is_idempotent() {
        assert_eq!(normalize_to_canonical("2026-03-05").as_deref(), Some("2026-03-05"));
        let once = normalize_to_canonical("March 5, 2026").unwrap();
        assert_eq!(normalize_to_canonical(&once), Some(once));
    }

    #[test]
    fn test_month_day_year() {
        assert_eq!(normalize_to_canonical("March 5, 2026").as_deref(), Some("2026-03-05"));
        assert_eq!(normalize_to_canonical("Aug 14th 2025").as_deref(), Some("2025-08-14"));
        assert_eq!(normalize_to_canonical("Sept. 9, 2025").as_deref(), Some("2025-09-09"));
    }

    #[test]
    fn test_day_month_year() {
        assert_eq!(normalize_to_canonical("14th August 2025").as_deref(), Some("2025-08-14"));
        assert_eq!(normalize_to_canonical("5 of march, 2026").as_deref(), Some("2026-03-05"));
    }

    #[test]
    fn test_numeric_dates() {
        assert_eq!(normalize_to_canonical("03/05/2026").as_deref(), Some("2026-03-05"));
        assert_eq!(normalize_to_canonical("2026-3-5").as_deref(), Some("2026-03-05"));
    }

    #[test]
    fn test_month_year_anchors_mid_month() {
        assert_eq!(normalize_to_canonical("August 2025").as_deref(), Some("2025-08-15"));
        assert_eq!(normalize_to_canonical("dec 2025").as_deref(), Some("2025-12-15"));
    }

    #[test]
    fn test_rejects_unparsable() {
        assert_eq!(normalize("Fall 2025"), None);
        assert_eq!(normalize("Friday 12, 2025"), None);
        assert_eq!(normalize("next week"), None);
        assert_eq!(normalize(""), None);
    }

    #[test]
    fn test_rejects_impossible_days() {
        assert_eq!(normalize("February 30, 2025"), None);
        assert_eq!(normalize("13/01/2025"), None);
        assert_eq!(normalize("2025-02-29"), None);
    }

    #[test]
    fn test_leap_day() {
        assert_eq!(normalize_to_canonical("February 29, 2028").as_deref(), Some("2028-02-29"));
    }
}
