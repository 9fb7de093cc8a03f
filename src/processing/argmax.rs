//! Per-group argmax: the dominant value of one exploded field within each value of another.

use indexmap::IndexMap;

use crate::types::CleanTable;
use crate::views::DominantValue;

use super::counter::{Counter, TieBreak};
use super::explode::MultiField;

/// For each value of `key`, the value of `value` that co-occurs most often.
///
/// Both fields are exploded independently per record, pairs are counted, and each key keeps
/// its highest pair. With [`TieBreak::FirstSeen`] the pair encountered first wins a tie. Output
/// is ordered by key.
pub fn dominant_values(
    table: &CleanTable,
    key: MultiField,
    value: MultiField,
    tie_break: TieBreak,
) -> Vec<DominantValue> {
    let grouped = table.reduce_rows(IndexMap::<&str, Counter<&str>>::new(), |mut grouped, record| {
        for k in key.values(record) {
            let counter = grouped.entry(k).or_default();
            for v in value.values(record) {
                counter.add(v);
            }
        }
        grouped
    });

    let mut out: Vec<DominantValue> = grouped
        .iter()
        .filter_map(|(k, counter)| {
            counter.argmax(tie_break).map(|(v, count)| DominantValue {
                key: (*k).to_owned(),
                dominant_value: (*v).to_owned(),
                count,
            })
        })
        .collect();
    out.sort_by(|a, b| a.key.cmp(&b.key));
    out
}
