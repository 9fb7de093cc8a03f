//! Normalization rules, one pure function per rule.
//!
//! [`super::clean_record`] composes them in a fixed order: date parsing, sentinel
//! substitution, rating canonicalization, country separator trim, duration decomposition, text
//! trimming.

use chrono::NaiveDate;

use crate::types::ContentType;

/// Placeholder substituted for missing or non-informative grouping values.
pub const SENTINEL: &str = "Unknown";

/// Literal values treated as missing in director, cast, country and rating (case-sensitive).
pub const INVALID_LITERALS: [&str; 8] = [
    "",
    "Unknown",
    "unknown",
    "Not Available",
    "No cast",
    "nan",
    "NaN",
    "N/A",
];

const DATE_FORMATS: [&str; 4] = ["%B %d, %Y", "%b %d, %Y", "%Y-%m-%d", "%m/%d/%Y"];

/// Parse a date-added cell. Anything unparseable is `None`, never an error.
pub fn parse_date_added(raw: Option<&str>) -> Option<NaiveDate> {
    let text = raw?.trim();
    if text.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
}

/// Whether `value` is one of [`INVALID_LITERALS`].
pub fn is_invalid_literal(value: &str) -> bool {
    INVALID_LITERALS.contains(&value)
}

/// Trim a grouping cell and replace missing / invalid literals with [`SENTINEL`].
pub fn substitute_sentinel(raw: Option<&str>) -> String {
    match raw.map(str::trim) {
        Some(value) if !is_invalid_literal(value) => value.to_owned(),
        _ => SENTINEL.to_owned(),
    }
}

/// Upper-case a rating and drop periods so `tv-ma.` and `TV-MA` collapse.
///
/// A value that is empty or an invalid literal after stripping (`n/a`, `N/A.`) becomes the
/// upper-cased sentinel.
pub fn canonicalize_rating(value: &str) -> String {
    let stripped: String = value
        .chars()
        .filter(|c| *c != '.')
        .flat_map(char::to_uppercase)
        .collect();
    let canonical = stripped.trim();
    if is_invalid_literal(canonical) {
        SENTINEL.to_uppercase()
    } else {
        canonical.to_owned()
    }
}

/// Remove trailing `,` separators (and surrounding whitespace) from a country list.
///
/// What remains is checked against [`INVALID_LITERALS`] again, so `N/A,` becomes the sentinel.
pub fn trim_country_separators(value: &str) -> String {
    let trimmed = value.trim_end_matches(|c: char| c == ',' || c.is_whitespace());
    if is_invalid_literal(trimmed) {
        SENTINEL.to_owned()
    } else {
        trimmed.to_owned()
    }
}

/// Numeric duration split by unit. At most one side is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DurationParts {
    pub minutes: Option<u32>,
    pub seasons: Option<u32>,
}

/// Split a duration cell into minutes (movies, `"90 min"`) or seasons (series, `"2 Seasons"`).
///
/// The unit keyword must match the content type; the magnitude is the first whitespace token.
/// A missing keyword or an unparseable magnitude leaves both sides unset.
pub fn decompose_duration(content_type: ContentType, raw: Option<&str>) -> DurationParts {
    let Some(text) = raw else {
        return DurationParts::default();
    };
    let magnitude = || text.split_whitespace().next()?.parse::<u32>().ok();

    match content_type {
        ContentType::Movie if text.contains("min") => DurationParts {
            minutes: magnitude(),
            seasons: None,
        },
        ContentType::Series if text.contains("Season") => DurationParts {
            minutes: None,
            seasons: magnitude(),
        },
        _ => DurationParts::default(),
    }
}

/// Trim a free-text field.
pub fn trim_text(value: &str) -> String {
    value.trim().to_owned()
}
