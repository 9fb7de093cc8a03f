//! Two-dimensional cross tabulation.

use crate::types::{CleanRecord, CleanTable};
use crate::views::CrossCount;

use super::count::{Dimension, DimensionKey};
use super::counter::Counter;
use super::explode::MultiField;

/// One side of a cross tabulation: a single-valued dimension or an exploded field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Single(Dimension),
    Exploded(MultiField),
}

impl Axis {
    fn keys(self, record: &CleanRecord) -> Vec<DimensionKey> {
        match self {
            Axis::Single(dimension) => dimension.key(record).into_iter().collect(),
            Axis::Exploded(field) => field
                .values(record)
                .map(|v| DimensionKey::Text(v.to_owned()))
                .collect(),
        }
    }
}

/// Count every observed `(row, col)` combination.
///
/// Combinations that never occur are omitted rather than zero-filled. Rows are ordered by
/// `(row_key, col_key)` ascending.
pub fn cross_tabulate(table: &CleanTable, rows: Axis, cols: Axis) -> Vec<CrossCount> {
    let counter = table.reduce_rows(Counter::new(), |mut counter, record| {
        let row_keys = rows.keys(record);
        if row_keys.is_empty() {
            return counter;
        }
        let col_keys = cols.keys(record);
        for r in &row_keys {
            for c in &col_keys {
                counter.add((r.clone(), c.clone()));
            }
        }
        counter
    });

    counter
        .sorted_by_key()
        .into_iter()
        .map(|((row_key, col_key), count)| CrossCount {
            row_key: row_key.to_string(),
            col_key: col_key.to_string(),
            count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{cross_tabulate, Axis};
    use crate::processing::count::Dimension;
    use crate::processing::explode::MultiField;
    use crate::testing::{credited, dated, record};
    use crate::types::{CleanTable, ContentType};
    use crate::views::CrossCount;

    fn cross(row_key: &str, col_key: &str, count: u64) -> CrossCount {
        CrossCount {
            row_key: row_key.to_string(),
            col_key: col_key.to_string(),
            count,
        }
    }

    #[test]
    fn type_by_rating_omits_absent_combinations() {
        let mut a = record("s1", ContentType::Movie);
        a.rating = "PG".to_string();
        let mut b = record("s2", ContentType::Series);
        b.rating = "TV-MA".to_string();
        let mut c = record("s3", ContentType::Movie);
        c.rating = "PG".to_string();
        let table = CleanTable::new(vec![a, b, c]);

        let out = cross_tabulate(
            &table,
            Axis::Single(Dimension::ContentType),
            Axis::Single(Dimension::Rating),
        );
        assert_eq!(out, vec![cross("Movie", "PG", 2), cross("TV Show", "TV-MA", 1)]);
        assert_eq!(out.iter().map(|c| c.count).sum::<u64>(), 3);
    }

    #[test]
    fn missing_row_key_skips_the_record() {
        let mut a = dated("s1", 2021, 9, 24);
        a.country = "India, United Kingdom".to_string();
        let mut undated = credited("s2", "Unknown", "Unknown", "India", "Dramas");
        undated.date_added = None;
        let table = CleanTable::new(vec![a, undated]);

        let out = cross_tabulate(
            &table,
            Axis::Single(Dimension::YearAdded),
            Axis::Exploded(MultiField::Country),
        );
        assert_eq!(out, vec![cross("2021", "India", 1), cross("2021", "United Kingdom", 1)]);
    }

    #[test]
    fn empty_table_gives_empty_crosstab() {
        let out = cross_tabulate(
            &CleanTable::default(),
            Axis::Single(Dimension::ContentType),
            Axis::Single(Dimension::Rating),
        );
        assert!(out.is_empty());
    }
}
