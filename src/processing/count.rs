//! Single-field counts over one categorical [`Dimension`].

use std::fmt;

use chrono::Datelike;

use crate::types::{CleanRecord, CleanTable};
use crate::views::{CategoryCount, CategoryShare};

use super::counter::{Counter, TieBreak};

/// Value of a grouping dimension. Numeric keys sort numerically.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DimensionKey {
    Int(i64),
    Text(String),
}

impl fmt::Display for DimensionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DimensionKey::Int(v) => write!(f, "{v}"),
            DimensionKey::Text(s) => f.write_str(s),
        }
    }
}

/// Single-valued fields a count or cross-tab can group by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    ContentType,
    Rating,
    ReleaseYear,
    /// Calendar year of `date_added`.
    YearAdded,
    DurationMinutes,
    DurationSeasons,
}

impl Dimension {
    /// Key of `record` on this dimension; `None` when the value is missing.
    pub fn key(self, record: &CleanRecord) -> Option<DimensionKey> {
        match self {
            Dimension::ContentType => Some(DimensionKey::Text(record.content_type.label().to_owned())),
            Dimension::Rating => Some(DimensionKey::Text(record.rating.clone())),
            Dimension::ReleaseYear => Some(DimensionKey::Int(record.release_year.into())),
            Dimension::YearAdded => record.date_added.map(|d| DimensionKey::Int(d.year().into())),
            Dimension::DurationMinutes => record.duration_minutes.map(|m| DimensionKey::Int(m.into())),
            Dimension::DurationSeasons => record.duration_seasons.map(|s| DimensionKey::Int(s.into())),
        }
    }
}

/// Output order of a count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountOrder {
    /// Highest count first (ranking views).
    Descending(TieBreak),
    /// Ascending key (distribution and time-series views).
    ByKey,
}

/// Count rows per value of `dimension`. Rows missing the value are skipped.
pub fn count_by(table: &CleanTable, dimension: Dimension, order: CountOrder) -> Vec<CategoryCount> {
    let counter: Counter<DimensionKey> = table.iter().filter_map(|r| dimension.key(r)).collect();
    let entries = match order {
        CountOrder::Descending(tie_break) => counter.ranked(tie_break),
        CountOrder::ByKey => counter.sorted_by_key(),
    };
    entries
        .into_iter()
        .map(|(key, count)| CategoryCount::new(key.to_string(), count))
        .collect()
}

/// Ranked counts per value of `dimension`, each with its percentage of the counted rows.
pub fn count_shares(
    table: &CleanTable,
    dimension: Dimension,
    tie_break: TieBreak,
    precision: Option<u32>,
) -> Vec<CategoryShare> {
    with_shares(count_by(table, dimension, CountOrder::Descending(tie_break)), precision)
}

/// Attach percentage-of-total to counts. `precision` rounds to that many decimals.
pub fn with_shares(counts: Vec<CategoryCount>, precision: Option<u32>) -> Vec<CategoryShare> {
    let total: u64 = counts.iter().map(|c| c.count).sum();
    counts
        .into_iter()
        .map(|c| {
            let raw = if total == 0 {
                0.0
            } else {
                c.count as f64 / total as f64 * 100.0
            };
            let percentage = match precision {
                Some(digits) => round_to(raw, digits),
                None => raw,
            };
            CategoryShare {
                category: c.category,
                count: c.count,
                percentage,
            }
        })
        .collect()
}

fn round_to(value: f64, digits: u32) -> f64 {
    let scale = 10f64.powi(digits as i32);
    (value * scale).round() / scale
}
