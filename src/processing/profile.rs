//! Column profile of a clean table: per-column invalid counts and numeric summaries.
//!
//! Numeric summaries skip missing values, and a column with no values at all reports
//! `count = 0` with every statistic unset.

use crate::types::{CatalogColumn, CleanRecord, CleanTable};
use crate::views::{ColumnQuality, NumericSummary};

/// Text values the quality report counts as invalid, after trimming (case-sensitive).
///
/// This list is separate from the cleaning literals: it also flags `"NA"`, and it counts the
/// sentinel itself, so a backfilled director shows up as invalid here.
pub const QUALITY_INVALID: [&str; 5] = ["", "Unknown", "unknown", "Not Available", "NA"];

fn is_invalid_text(value: &str) -> bool {
    QUALITY_INVALID.contains(&value.trim())
}

/// A column of a clean record: one of the source columns or a derived duration column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileColumn {
    Source(CatalogColumn),
    DurationMinutes,
    DurationSeasons,
}

impl ProfileColumn {
    /// Source columns in canonical order, then the derived columns.
    pub fn all() -> impl Iterator<Item = ProfileColumn> {
        CatalogColumn::ALL
            .into_iter()
            .map(ProfileColumn::Source)
            .chain([ProfileColumn::DurationMinutes, ProfileColumn::DurationSeasons])
    }

    pub fn name(self) -> &'static str {
        match self {
            ProfileColumn::Source(column) => column.name(),
            ProfileColumn::DurationMinutes => "duration_minutes",
            ProfileColumn::DurationSeasons => "duration_seasons",
        }
    }

    /// Storage type label shown next to the column.
    pub fn data_type(self) -> &'static str {
        match self {
            ProfileColumn::Source(CatalogColumn::ContentType) => "category",
            ProfileColumn::Source(CatalogColumn::DateAdded) => "date",
            ProfileColumn::Source(CatalogColumn::ReleaseYear)
            | ProfileColumn::DurationMinutes
            | ProfileColumn::DurationSeasons => "integer",
            ProfileColumn::Source(_) => "text",
        }
    }

    fn is_invalid(self, record: &CleanRecord) -> bool {
        let column = match self {
            ProfileColumn::Source(column) => column,
            ProfileColumn::DurationMinutes => return record.duration_minutes.is_none(),
            ProfileColumn::DurationSeasons => return record.duration_seasons.is_none(),
        };
        match column {
            CatalogColumn::ContentType | CatalogColumn::ReleaseYear => false,
            CatalogColumn::DateAdded => record.date_added.is_none(),
            CatalogColumn::Duration => record.duration.as_deref().is_none_or(is_invalid_text),
            CatalogColumn::ShowId => is_invalid_text(&record.show_id),
            CatalogColumn::Title => is_invalid_text(&record.title),
            CatalogColumn::Director => is_invalid_text(&record.director),
            CatalogColumn::Cast => is_invalid_text(&record.cast),
            CatalogColumn::Country => is_invalid_text(&record.country),
            CatalogColumn::Rating => is_invalid_text(&record.rating),
            CatalogColumn::ListedIn => is_invalid_text(&record.listed_in),
            CatalogColumn::Description => is_invalid_text(&record.description),
        }
    }
}

/// Missing plus invalid values per column, one row per [`ProfileColumn`].
///
/// Typed columns that cannot be missing (content type, release year) always report 0.
pub fn column_quality(table: &CleanTable) -> Vec<ColumnQuality> {
    ProfileColumn::all()
        .map(|column| ColumnQuality {
            column: column.name().to_owned(),
            data_type: column.data_type().to_owned(),
            invalid: table.iter().filter(|rec| column.is_invalid(rec)).count() as u64,
        })
        .collect()
}

/// Count, mean, sample standard deviation, min and max of `release_year`,
/// `duration_minutes` and `duration_seasons`.
pub fn numeric_summary(table: &CleanTable) -> Vec<NumericSummary> {
    vec![
        summarize(
            "release_year",
            table.iter().map(|rec| f64::from(rec.release_year)),
        ),
        summarize(
            "duration_minutes",
            table.iter().filter_map(|rec| rec.duration_minutes).map(f64::from),
        ),
        summarize(
            "duration_seasons",
            table.iter().filter_map(|rec| rec.duration_seasons).map(f64::from),
        ),
    ]
}

fn summarize(column: &str, values: impl Iterator<Item = f64>) -> NumericSummary {
    let values: Vec<f64> = values.collect();
    let mut summary = NumericSummary {
        column: column.to_owned(),
        count: values.len() as u64,
        mean: None,
        std: None,
        min: None,
        max: None,
    };
    if values.is_empty() {
        return summary;
    }

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    summary.mean = Some(mean);
    // Sample deviation (n - 1); undefined for a single value.
    if values.len() > 1 {
        let squares: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
        summary.std = Some((squares / (n - 1.0)).sqrt());
    }
    summary.min = values.iter().copied().reduce(f64::min);
    summary.max = values.iter().copied().reduce(f64::max);
    summary
}
