//! Shared row assembly for the format-specific readers.

use crate::error::{CatalogError, CatalogResult};
use crate::types::{CatalogColumn, ContentType, RawRecord};

/// Build a [`RawRecord`] from a per-column cell lookup.
///
/// `row` is the user-facing row number used in error messages. Blank cells become `None`;
/// the content-type tag and release year are the only coerced fields.
pub(crate) fn build_raw_record<F>(row: usize, mut cell: F) -> CatalogResult<RawRecord>
where
    F: FnMut(CatalogColumn) -> Option<String>,
{
    let mut text = |column: CatalogColumn| cell(column).filter(|s| !s.trim().is_empty());

    let type_raw = text(CatalogColumn::ContentType).unwrap_or_default();
    let content_type = ContentType::parse(&type_raw).ok_or_else(|| CatalogError::ParseError {
        row,
        column: CatalogColumn::ContentType.name().to_owned(),
        raw: type_raw.clone(),
        message: "expected 'Movie' or 'TV Show'".to_string(),
    })?;

    let year_raw = text(CatalogColumn::ReleaseYear).unwrap_or_default();
    let release_year = year_raw
        .trim()
        .parse::<i32>()
        .map_err(|e| CatalogError::ParseError {
            row,
            column: CatalogColumn::ReleaseYear.name().to_owned(),
            raw: year_raw.clone(),
            message: e.to_string(),
        })?;

    Ok(RawRecord {
        show_id: text(CatalogColumn::ShowId).unwrap_or_default(),
        content_type,
        title: text(CatalogColumn::Title).unwrap_or_default(),
        director: text(CatalogColumn::Director),
        cast: text(CatalogColumn::Cast),
        country: text(CatalogColumn::Country),
        date_added: text(CatalogColumn::DateAdded),
        release_year,
        rating: text(CatalogColumn::Rating),
        duration: text(CatalogColumn::Duration),
        listed_in: text(CatalogColumn::ListedIn).unwrap_or_default(),
        description: text(CatalogColumn::Description).unwrap_or_default(),
    })
}
