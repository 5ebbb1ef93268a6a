//! Field validation rules
//!
//! Pure predicates over raw form values plus the [`ValidationIssue`] type the
//! forms collect them into. Nothing here caches or has side effects; callers
//! re-evaluate on every change.
//!
//! # Examples
//!
//! ```
//! use portal_common::validation::{is_range_valid, is_valid_identifier, is_valid_iso_date};
//!
//! assert!(is_valid_iso_date("2025-03-01"));
//! assert!(is_range_valid("2025-03-01", "2025-03-01"));
//! assert!(!is_valid_identifier("1bad"));
//! ```

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::sync::LazyLock;

// ASCII classes only: `\d` in the regex crate also matches non-ASCII digits.
static YEAR_PATTERN: LazyLock<Regex> = LazyLock::new(|| compile(r"^[0-9]{4}$"));

static ISO_DATE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| compile(r"^[0-9]{4}-(0[1-9]|1[0-2])-(0[1-9]|[12][0-9]|3[01])$"));

static IDENTIFIER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| compile(r"^[A-Za-z_][A-Za-z0-9_]*$"));

/// Full English month names, January first
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

#[allow(clippy::expect_used)]
fn compile(pattern: &str) -> Regex {
    // Patterns are literals in this module and covered by the tests below
    Regex::new(pattern).expect("static validation pattern must compile")
}

/// A single human-readable problem with the current field values
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub message: String,
}

impl ValidationIssue {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Non-empty after trimming whitespace
pub fn is_present(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Exactly four ASCII digits
pub fn is_valid_year(value: &str) -> bool {
    YEAR_PATTERN.is_match(value)
}

/// `YYYY-MM-DD` with month 01-12 and day 01-31
///
/// This is a pattern check only: `2025-02-30` passes.
pub fn is_valid_iso_date(value: &str) -> bool {
    ISO_DATE_PATTERN.is_match(value)
}

/// Both dates are valid and the first is on or before the second
pub fn is_range_valid(from: &str, to: &str) -> bool {
    if !is_valid_iso_date(from) || !is_valid_iso_date(to) {
        return false;
    }

    match (parse_date(from), parse_date(to)) {
        (Some(a), Some(b)) => a <= b,
        // Fixed-width YYYY-MM-DD strings sort chronologically
        _ => from <= to,
    }
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// SQL-style identifier: `[A-Za-z_][A-Za-z0-9_]*`
pub fn is_valid_identifier(value: &str) -> bool {
    IDENTIFIER_PATTERN.is_match(value)
}

/// First name that occurs more than once, in input order
pub fn find_duplicate<'a, I>(names: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    names.into_iter().find(|name| !seen.insert(*name))
}

/// Map a month number 1-12 to its English name
///
/// The input is trimmed. Anything that is not an integer in range (a month
/// name, `13`, `2.5`, an empty string) comes back unchanged.
pub fn normalize_month(value: &str) -> String {
    let trimmed = value.trim();

    match trimmed.parse::<f64>() {
        Ok(n) if n.fract() == 0.0 && (1.0..=12.0).contains(&n) => {
            MONTH_NAMES[n as usize - 1].to_string()
        },
        _ => trimmed.to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_is_present() {
        assert!(is_present("Big Chain"));
        assert!(!is_present(""));
        assert!(!is_present("   \t"));
    }

    #[test]
    fn test_year() {
        assert!(is_valid_year("2025"));
        assert!(is_valid_year("0000"));
        assert!(!is_valid_year("25"));
        assert!(!is_valid_year("20255"));
        assert!(!is_valid_year(" 2025"));
        assert!(!is_valid_year("２０２５"));
    }

    #[test]
    fn test_iso_date() {
        assert!(is_valid_iso_date("2025-03-01"));
        assert!(is_valid_iso_date("2025-02-30"));
        assert!(!is_valid_iso_date("2025-13-01"));
        assert!(!is_valid_iso_date("2025-00-10"));
        assert!(!is_valid_iso_date("2025-01-32"));
        assert!(!is_valid_iso_date("2025/01/01"));
        assert!(!is_valid_iso_date("2025-1-1"));
        assert!(!is_valid_iso_date(""));
    }

    #[test]
    fn test_range() {
        assert!(is_range_valid("2025-01-01", "2025-01-31"));
        assert!(is_range_valid("2025-01-01", "2025-01-01"));
        assert!(!is_range_valid("2025-02-01", "2025-01-31"));
        assert!(!is_range_valid("2025-01-01", "not a date"));
        // Not a calendar date, still ordered by its digits
        assert!(is_range_valid("2025-02-28", "2025-02-30"));
        assert!(!is_range_valid("2025-02-30", "2025-02-28"));
    }

    #[test]
    fn test_identifier() {
        assert!(is_valid_identifier("sales_items"));
        assert!(is_valid_identifier("_tmp1"));
        assert!(!is_valid_identifier("1bad"));
        assert!(!is_valid_identifier("has space"));
        assert!(!is_valid_identifier("dash-ed"));
        assert!(!is_valid_identifier(""));
    }

    #[test]
    fn test_find_duplicate() {
        assert_eq!(find_duplicate(["id", "name", "id"]), Some("id"));
        assert_eq!(find_duplicate(["a", "b", "b", "a"]), Some("b"));
        assert_eq!(find_duplicate(["id", "created_at"]), None);
        assert_eq!(find_duplicate(Vec::<&str>::new()), None);
    }

    #[test]
    fn test_normalize_month() {
        assert_eq!(normalize_month("1"), "January");
        assert_eq!(normalize_month("3"), "March");
        assert_eq!(normalize_month(" 12 "), "December");
        assert_eq!(normalize_month("03"), "March");
        assert_eq!(normalize_month("13"), "13");
        assert_eq!(normalize_month("0"), "0");
        assert_eq!(normalize_month("2.5"), "2.5");
        assert_eq!(normalize_month("January"), "January");
        assert_eq!(normalize_month(""), "");
    }

    #[test]
    fn test_issue_display() {
        let issue = ValidationIssue::new("Month is required.");
        assert_eq!(issue.to_string(), "Month is required.");
    }

    proptest! {
        #[test]
        fn prop_year_is_four_ascii_digits(s in "\\PC{0,6}") {
            let expected = s.len() == 4 && s.bytes().all(|b| b.is_ascii_digit());
            prop_assert_eq!(is_valid_year(&s), expected);
        }

        #[test]
        fn prop_identifier_matches_definition(s in "[A-Za-z0-9_ -]{0,12}") {
            let mut chars = s.chars();
            let expected = match chars.next() {
                Some(c) if c.is_ascii_alphabetic() || c == '_' => {
                    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
                },
                _ => false,
            };
            prop_assert_eq!(is_valid_identifier(&s), expected);
        }

        #[test]
        fn prop_range_matches_calendar_order(
            a in (2000i32..2030, 1u32..=12, 1u32..=28),
            b in (2000i32..2030, 1u32..=12, 1u32..=28),
        ) {
            let da = NaiveDate::from_ymd_opt(a.0, a.1, a.2).unwrap();
            let db = NaiveDate::from_ymd_opt(b.0, b.1, b.2).unwrap();
            let sa = da.format("%Y-%m-%d").to_string();
            let sb = db.format("%Y-%m-%d").to_string();
            prop_assert_eq!(is_range_valid(&sa, &sb), da <= db);
        }

        #[test]
        fn prop_normalize_month_in_range(n in 1u32..=12) {
            prop_assert_eq!(normalize_month(&n.to_string()), MONTH_NAMES[n as usize - 1]);
        }

        #[test]
        fn prop_normalize_month_out_of_range_is_identity(n in 13u32..10_000) {
            prop_assert_eq!(normalize_month(&n.to_string()), n.to_string());
        }
    }
}
