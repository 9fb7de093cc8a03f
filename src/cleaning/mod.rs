//! Cleaning: turns a [`RawTable`] into a [`CleanTable`].
//!
//! Cleaning is a pure function of its input. Each row goes through the [`rules`] in order:
//!
//! 1. `date_added` is parsed; unparseable values become `None`
//! 2. director/cast/country/rating are trimmed and invalid literals become [`rules::SENTINEL`]
//! 3. rating is upper-cased with periods stripped; an invalid literal left over (`n/a`) becomes
//!    the upper-cased sentinel
//! 4. trailing separators are trimmed from country; an invalid literal left over (`N/A,`)
//!    becomes the sentinel
//! 5. duration is split into `duration_minutes` or `duration_seasons` by content type
//! 6. free-text fields are trimmed
//!
//! Exact duplicate rows are then dropped, keeping the first occurrence. Re-cleaning a cleaned
//! table (via [`CleanTable::to_raw_table`]) returns the same table.

pub mod rules;

use indexmap::IndexSet;
use tracing::debug;

use crate::types::{CleanRecord, CleanTable, RawRecord, RawTable};

use rules::{
    canonicalize_rating, decompose_duration, parse_date_added, substitute_sentinel, trim_country_separators,
    trim_text,
};

/// Counters describing one cleaning pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CleanReport {
    pub input_rows: usize,
    pub output_rows: usize,
    pub duplicates_removed: usize,
    /// Rows whose `date_added` is missing after parsing.
    pub missing_dates: usize,
    /// Rows with neither `duration_minutes` nor `duration_seasons`.
    pub missing_durations: usize,
}

/// Clean a raw table.
pub fn clean(raw: &RawTable) -> CleanTable {
    clean_with_report(raw).0
}

/// Clean a raw table and report what happened.
pub fn clean_with_report(raw: &RawTable) -> (CleanTable, CleanReport) {
    let unique: IndexSet<CleanRecord> = raw.iter().map(clean_record).collect();
    let table: CleanTable = unique.into_iter().collect();

    let report = table.reduce_rows(
        CleanReport {
            input_rows: raw.row_count(),
            output_rows: table.row_count(),
            duplicates_removed: raw.row_count() - table.row_count(),
            ..CleanReport::default()
        },
        |mut report, rec| {
            if rec.date_added.is_none() {
                report.missing_dates += 1;
            }
            if rec.duration_minutes.is_none() && rec.duration_seasons.is_none() {
                report.missing_durations += 1;
            }
            report
        },
    );

    debug!(
        input_rows = report.input_rows,
        output_rows = report.output_rows,
        duplicates_removed = report.duplicates_removed,
        missing_dates = report.missing_dates,
        missing_durations = report.missing_durations,
        "catalog cleaned"
    );

    (table, report)
}

/// Apply every row-level rule to one record.
pub fn clean_record(raw: &RawRecord) -> CleanRecord {
    let date_added = parse_date_added(raw.date_added.as_deref());

    let director = substitute_sentinel(raw.director.as_deref());
    let cast = substitute_sentinel(raw.cast.as_deref());
    let country = substitute_sentinel(raw.country.as_deref());
    let rating = substitute_sentinel(raw.rating.as_deref());

    let rating = canonicalize_rating(&rating);
    let country = trim_country_separators(&country);

    let duration = raw
        .duration
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty());
    let parts = decompose_duration(raw.content_type, duration);

    CleanRecord {
        show_id: trim_text(&raw.show_id),
        content_type: raw.content_type,
        title: trim_text(&raw.title),
        director,
        cast,
        country,
        date_added,
        release_year: raw.release_year,
        rating,
        duration: duration.map(str::to_owned),
        duration_minutes: parts.minutes,
        duration_seasons: parts.seasons,
        listed_in: trim_text(&raw.listed_in),
        description: trim_text(&raw.description),
    }
}
