//! CSV ingestion implementation.

use std::path::Path;

use crate::error::{CatalogError, CatalogResult};
use crate::types::{CatalogColumn, RawTable};

use super::record::build_raw_record;

/// Ingest a catalog CSV file into an in-memory [`RawTable`].
///
/// Rules:
///
/// - CSV must have headers.
/// - Headers must contain every required catalog column (order can differ).
/// - `director`, `cast`, `country` and `rating` may be missing entirely; their cells read as empty.
pub fn ingest_csv_from_path(path: impl AsRef<Path>) -> CatalogResult<RawTable> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)?;
    ingest_csv_from_reader(&mut rdr)
}

/// Ingest CSV data from an existing CSV reader.
pub fn ingest_csv_from_reader<R: std::io::Read>(rdr: &mut csv::Reader<R>) -> CatalogResult<RawTable> {
    let headers = rdr.headers()?.clone();

    // Map catalog columns -> CSV column indexes (allows re-ordered CSV columns).
    let mut col_idxs: [Option<usize>; CatalogColumn::ALL.len()] = [None; CatalogColumn::ALL.len()];
    for column in CatalogColumn::ALL {
        let idx = headers
            .iter()
            .position(|h| h.trim_start_matches('\u{feff}').trim() == column.name());
        if idx.is_none() && !column.is_optional() {
            return Err(CatalogError::SchemaMismatch {
                message: format!(
                    "missing required column '{column}'. headers={:?}",
                    headers.iter().collect::<Vec<_>>()
                ),
            });
        }
        col_idxs[column.index()] = idx;
    }

    let mut rows = Vec::new();
    for (row_idx0, result) in rdr.records().enumerate() {
        // Report 1-based row number for users; +1 again because header is row 1.
        let user_row = row_idx0 + 2;
        let record = result?;

        rows.push(build_raw_record(user_row, |column| {
            col_idxs[column.index()]
                .and_then(|idx| record.get(idx))
                .map(str::to_owned)
        })?);
    }

    Ok(RawTable::new(rows))
}
