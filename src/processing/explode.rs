//! Multi-valued field expansion and counting.
//!
//! Director, cast, country and genre cells hold several values joined by [`DELIMITER`].
//! Exploding yields one [`ExplodedRow`] per (record, value) pair, skipping [`DENYLIST`] values.
//! Percentages computed here are over exploded values, so a record contributing `k` values is
//! counted `k` times in the denominator.

use crate::types::{CleanRecord, CleanTable};
use crate::views::{CategoryCount, CategoryShare};

use super::count::with_shares;
use super::counter::{Counter, TieBreak};

/// Separator between values of a multi-valued cell.
pub const DELIMITER: &str = ", ";

/// Non-informative values excluded from every exploded count (case-sensitive).
pub const DENYLIST: [&str; 6] = ["unknown", "Unknown", "Not Available", "No cast", "No director", ""];

/// Whether `value` survives the denylist.
pub fn is_informative(value: &str) -> bool {
    !DENYLIST.contains(&value)
}

/// Split a multi-valued cell, dropping denylisted values.
pub fn split_values(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(DELIMITER).filter(|v| is_informative(v))
}

/// Multi-valued fields of a clean record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MultiField {
    Director,
    Cast,
    Country,
    /// The `listed_in` genre list.
    Genre,
}

impl MultiField {
    /// The joined cell text.
    pub fn raw(self, record: &CleanRecord) -> &str {
        match self {
            MultiField::Director => &record.director,
            MultiField::Cast => &record.cast,
            MultiField::Country => &record.country,
            MultiField::Genre => &record.listed_in,
        }
    }

    /// Informative values of this field in `record`.
    pub fn values(self, record: &CleanRecord) -> impl Iterator<Item = &str> {
        split_values(self.raw(record))
    }
}

/// One value of a multi-valued field, tagged with the index of its record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExplodedRow<'a> {
    pub record_index: usize,
    pub value: &'a str,
}

/// Expand `field` into one row per informative value.
pub fn explode(table: &CleanTable, field: MultiField) -> Vec<ExplodedRow<'_>> {
    table
        .iter()
        .enumerate()
        .flat_map(|(record_index, record)| {
            field
                .values(record)
                .map(move |value| ExplodedRow { record_index, value })
        })
        .collect()
}

fn exploded_counter(table: &CleanTable, field: MultiField) -> Counter<&str> {
    explode(table, field).into_iter().map(|row| row.value).collect()
}

/// Occurrences per value of `field`, highest first.
pub fn explode_count(table: &CleanTable, field: MultiField, tie_break: TieBreak) -> Vec<CategoryCount> {
    to_counts(exploded_counter(table, field).ranked(tie_break))
}

/// The `n` most frequent values of `field`.
pub fn explode_top(table: &CleanTable, field: MultiField, n: usize, tie_break: TieBreak) -> Vec<CategoryCount> {
    to_counts(exploded_counter(table, field).top(n, tie_break))
}

/// Occurrences per value of `field` with percentage of all exploded values.
pub fn explode_shares(
    table: &CleanTable,
    field: MultiField,
    tie_break: TieBreak,
    precision: Option<u32>,
) -> Vec<CategoryShare> {
    with_shares(explode_count(table, field, tie_break), precision)
}

fn to_counts(entries: Vec<(&&str, u64)>) -> Vec<CategoryCount> {
    entries
        .into_iter()
        .map(|(value, count)| CategoryCount::new(*value, count))
        .collect()
}
