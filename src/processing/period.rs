//! Time-bucketed counts over `date_added`.
//!
//! Month and weekday buckets are reindexed onto a fixed label domain: every label appears, in
//! calendar order, with a zero count when no title falls in it.

use chrono::Datelike;

use crate::types::CleanTable;
use crate::views::CategoryCount;

use super::counter::Counter;

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

pub const WEEKDAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Bucket granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Period {
    /// Release year of titles with a known `date_added`, ascending.
    Year,
    /// Month name of `date_added`, always 12 rows.
    Month,
    /// Weekday name of `date_added`, always 7 rows.
    Weekday,
}

/// Count titles with a known `date_added` per period bucket.
pub fn count_by_period(table: &CleanTable, period: Period) -> Vec<CategoryCount> {
    let dated = table
        .iter()
        .filter_map(|r| r.date_added.map(|d| (r.release_year, d)));

    match period {
        Period::Year => {
            let counter: Counter<i32> = dated.map(|(year, _)| year).collect();
            counter
                .sorted_by_key()
                .into_iter()
                .map(|(year, count)| CategoryCount::new(year.to_string(), count))
                .collect()
        }
        Period::Month => reindex(&MONTH_NAMES, dated.map(|(_, d)| d.month0() as usize)),
        Period::Weekday => reindex(
            &WEEKDAY_NAMES,
            dated.map(|(_, d)| d.weekday().num_days_from_monday() as usize),
        ),
    }
}

fn reindex(labels: &[&str], slots: impl Iterator<Item = usize>) -> Vec<CategoryCount> {
    let mut counts = vec![0u64; labels.len()];
    for slot in slots {
        if let Some(c) = counts.get_mut(slot) {
            *c += 1;
        }
    }
    labels
        .iter()
        .zip(counts)
        .map(|(label, count)| CategoryCount::new(*label, count))
        .collect()
}
