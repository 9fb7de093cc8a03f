//! JSON ingestion implementation.
//!
//! Supported inputs:
//! - A JSON array of objects: `[{"show_id":"s1", ...}, ...]`
//! - Newline-delimited JSON (NDJSON): one object per line
//!
//! Keys are the catalog column names. `null` and absent optional keys read as empty cells;
//! numbers and booleans are read as their text form.

use std::fs;
use std::path::Path;

use crate::error::{CatalogError, CatalogResult};
use crate::types::{CatalogColumn, RawTable};

use super::record::build_raw_record;

/// Ingest a catalog JSON / NDJSON file into an in-memory [`RawTable`].
pub fn ingest_json_from_path(path: impl AsRef<Path>) -> CatalogResult<RawTable> {
    let text = fs::read_to_string(path)?;
    ingest_json_from_str(&text)
}

/// Ingest JSON from an in-memory string into a [`RawTable`].
pub fn ingest_json_from_str(input: &str) -> CatalogResult<RawTable> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(CatalogError::SchemaMismatch {
            message: "json input is empty".to_string(),
        });
    }

    // First try parsing as a single JSON value (array or object).
    if let Ok(v) = serde_json::from_str::<serde_json::Value>(trimmed) {
        match v {
            serde_json::Value::Array(items) => ingest_json_values(&items),
            serde_json::Value::Object(_) => ingest_json_values(std::slice::from_ref(&v)),
            _ => Err(CatalogError::SchemaMismatch {
                message: "json must be an object, an array of objects, or NDJSON".to_string(),
            }),
        }
    } else {
        // Fall back to NDJSON.
        let mut values = Vec::new();
        for (i, line) in trimmed.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let v = serde_json::from_str::<serde_json::Value>(line).map_err(|e| {
                CatalogError::SchemaMismatch {
                    message: format!("invalid ndjson at line {}: {}", i + 1, e),
                }
            })?;
            values.push(v);
        }
        ingest_json_values(&values)
    }
}

fn ingest_json_values(values: &[serde_json::Value]) -> CatalogResult<RawTable> {
    let mut rows = Vec::with_capacity(values.len());

    for (idx0, v) in values.iter().enumerate() {
        let row_num = idx0 + 1;
        let obj = v.as_object().ok_or_else(|| CatalogError::SchemaMismatch {
            message: format!("row {row_num} is not a json object"),
        })?;

        for column in CatalogColumn::ALL {
            if !column.is_optional() && !obj.contains_key(column.name()) {
                return Err(CatalogError::SchemaMismatch {
                    message: format!("row {row_num} missing required field '{column}'"),
                });
            }
        }

        rows.push(build_raw_record(row_num, |column| {
            obj.get(column.name()).and_then(scalar_text)
        })?);
    }

    Ok(RawTable::new(rows))
}

fn scalar_text(v: &serde_json::Value) -> Option<String> {
    match v {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
