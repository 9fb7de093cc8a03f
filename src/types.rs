//! Core data model types.
//!
//! The catalog has a fixed schema ([`CatalogColumn`]). Ingestion produces a [`RawTable`] of
//! [`RawRecord`]s; cleaning turns it into a [`CleanTable`] of [`CleanRecord`]s which every
//! aggregation reads without mutating.

use std::fmt;

use chrono::NaiveDate;

/// Columns of the catalog source, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogColumn {
    ShowId,
    ContentType,
    Title,
    Director,
    Cast,
    Country,
    DateAdded,
    ReleaseYear,
    Rating,
    Duration,
    ListedIn,
    Description,
}

impl CatalogColumn {
    /// Every column, in canonical order.
    pub const ALL: [CatalogColumn; 12] = [
        CatalogColumn::ShowId,
        CatalogColumn::ContentType,
        CatalogColumn::Title,
        CatalogColumn::Director,
        CatalogColumn::Cast,
        CatalogColumn::Country,
        CatalogColumn::DateAdded,
        CatalogColumn::ReleaseYear,
        CatalogColumn::Rating,
        CatalogColumn::Duration,
        CatalogColumn::ListedIn,
        CatalogColumn::Description,
    ];

    /// Column name as it appears in the source header / JSON keys.
    pub fn name(self) -> &'static str {
        match self {
            CatalogColumn::ShowId => "show_id",
            CatalogColumn::ContentType => "type",
            CatalogColumn::Title => "title",
            CatalogColumn::Director => "director",
            CatalogColumn::Cast => "cast",
            CatalogColumn::Country => "country",
            CatalogColumn::DateAdded => "date_added",
            CatalogColumn::ReleaseYear => "release_year",
            CatalogColumn::Rating => "rating",
            CatalogColumn::Duration => "duration",
            CatalogColumn::ListedIn => "listed_in",
            CatalogColumn::Description => "description",
        }
    }

    /// Position of the column in [`CatalogColumn::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Whether a source may omit this column entirely.
    ///
    /// Only the grouping fields that the cleaner backfills with a sentinel are optional.
    pub fn is_optional(self) -> bool {
        matches!(
            self,
            CatalogColumn::Director
                | CatalogColumn::Cast
                | CatalogColumn::Country
                | CatalogColumn::Rating
        )
    }
}

impl fmt::Display for CatalogColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Two-valued content-type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ContentType {
    /// Feature-length title; duration is measured in minutes.
    Movie,
    /// Episodic title; duration is measured in seasons.
    Series,
}

impl ContentType {
    /// Parse a source tag (`Movie` / `TV Show`, case-insensitive; `series` is also accepted).
    pub fn parse(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "movie" => Some(Self::Movie),
            "tv show" | "series" => Some(Self::Series),
            _ => None,
        }
    }

    /// Label used by the source and by views.
    pub fn label(self) -> &'static str {
        match self {
            Self::Movie => "Movie",
            Self::Series => "TV Show",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One row as read from the source.
///
/// Multi-valued fields (director, cast, country, listed_in) are kept as delimiter-joined text.
/// Empty cells are `None`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RawRecord {
    pub show_id: String,
    pub content_type: ContentType,
    pub title: String,
    pub director: Option<String>,
    pub cast: Option<String>,
    pub country: Option<String>,
    pub date_added: Option<String>,
    pub release_year: i32,
    pub rating: Option<String>,
    pub duration: Option<String>,
    pub listed_in: String,
    pub description: String,
}

/// One normalized row.
///
/// Grouping fields are never empty (see [`crate::cleaning::rules::SENTINEL`]), and at most one
/// of `duration_minutes` / `duration_seasons` is set, matching `content_type`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CleanRecord {
    pub show_id: String,
    pub content_type: ContentType,
    pub title: String,
    pub director: String,
    pub cast: String,
    pub country: String,
    pub date_added: Option<NaiveDate>,
    pub release_year: i32,
    pub rating: String,
    pub duration: Option<String>,
    pub duration_minutes: Option<u32>,
    pub duration_seasons: Option<u32>,
    pub listed_in: String,
    pub description: String,
}

impl CleanRecord {
    /// Convert back into raw shape (dates rendered as `YYYY-MM-DD`).
    ///
    /// Cleaning the result yields this record again.
    pub fn to_raw(&self) -> RawRecord {
        RawRecord {
            show_id: self.show_id.clone(),
            content_type: self.content_type,
            title: self.title.clone(),
            director: Some(self.director.clone()),
            cast: Some(self.cast.clone()),
            country: Some(self.country.clone()),
            date_added: self.date_added.map(|d| d.format("%Y-%m-%d").to_string()),
            release_year: self.release_year,
            rating: Some(self.rating.clone()),
            duration: self.duration.clone(),
            listed_in: self.listed_in.clone(),
            description: self.description.clone(),
        }
    }
}

/// In-memory table of typed rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table<R> {
    /// Row storage in source order.
    pub rows: Vec<R>,
}

/// Table produced by ingestion.
pub type RawTable = Table<RawRecord>;

/// Table produced by cleaning; shared read-only by every aggregation.
pub type CleanTable = Table<CleanRecord>;

impl<R> Table<R> {
    /// Create a table from rows.
    pub fn new(rows: Vec<R>) -> Self {
        Self { rows }
    }

    /// Number of rows in the table.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate rows in order.
    pub fn iter(&self) -> std::slice::Iter<'_, R> {
        self.rows.iter()
    }

    /// Create a new table by applying `mapper` to every row.
    pub fn map_rows<T, F>(&self, mapper: F) -> Table<T>
    where
        F: FnMut(&R) -> T,
    {
        Table::new(self.rows.iter().map(mapper).collect())
    }

    /// Reduce (fold) all rows into an accumulator value.
    ///
    /// This is similar to `Iterator::fold`, but provides each row by reference.
    /// Rows are borrowed for the lifetime of the table, so the accumulator may hold references
    /// into them.
    pub fn reduce_rows<'a, A, F>(&'a self, init: A, mut reducer: F) -> A
    where
        F: FnMut(A, &'a R) -> A,
    {
        self.rows.iter().fold(init, |acc, row| reducer(acc, row))
    }
}

impl CleanTable {
    /// Convert every row back into raw shape (see [`CleanRecord::to_raw`]).
    pub fn to_raw_table(&self) -> RawTable {
        self.map_rows(CleanRecord::to_raw)
    }
}

impl<R> Default for Table<R> {
    fn default() -> Self {
        Self { rows: Vec::new() }
    }
}

impl<R> FromIterator<R> for Table<R> {
    fn from_iter<I: IntoIterator<Item = R>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a, R> IntoIterator for &'a Table<R> {
    type Item = &'a R;
    type IntoIter = std::slice::Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
