//! Aggregation algorithms over a [`crate::types::CleanTable`].
//!
//! Every function here borrows the clean table read-only and returns freshly built rows
//! (see [`crate::views`]). The families are:
//!
//! - [`count_by()`] / [`count_shares()`] / [`count_by_period()`]: single-field counts, with
//!   fixed-domain reindexing for month and weekday buckets
//! - [`explode_count()`] / [`explode_top()`] / [`explode_shares()`]: multi-valued fields
//! - [`cross_tabulate()`]: two-dimensional counts, absent combinations omitted
//! - [`dominant_values()`]: per-group argmax
//! - [`director_genre_actor()`]: nested top-N
//! - [`column_quality()`] / [`numeric_summary()`]: column profile (invalid counts, descriptive
//!   statistics)
//!
//! Ranked outputs resolve equal counts with a [`TieBreak`].
//!
//! ## Example
//!
//! ```rust
//! use catalog_views::processing::{explode_top, MultiField, TieBreak};
//! use catalog_views::types::{CleanTable, RawRecord, RawTable, ContentType};
//!
//! let raw = RawTable::new(vec![RawRecord {
//!     show_id: "s1".to_string(),
//!     content_type: ContentType::Movie,
//!     title: "Dick Johnson Is Dead".to_string(),
//!     director: None,
//!     cast: None,
//!     country: Some("India, United Kingdom".to_string()),
//!     date_added: Some("September 25, 2021".to_string()),
//!     release_year: 2020,
//!     rating: Some("PG-13".to_string()),
//!     duration: Some("90 min".to_string()),
//!     listed_in: "Documentaries".to_string(),
//!     description: String::new(),
//! }]);
//! let table: CleanTable = catalog_views::cleaning::clean(&raw);
//!
//! let top = explode_top(&table, MultiField::Country, 20, TieBreak::FirstSeen);
//! assert_eq!(top.len(), 2);
//! assert_eq!(top[0].category, "India");
//! ```

pub mod argmax;
pub mod count;
pub mod counter;
pub mod crosstab;
pub mod explode;
pub mod hierarchy;
pub mod period;
pub mod profile;

pub use argmax::dominant_values;
pub use count::{count_by, count_shares, with_shares, CountOrder, Dimension, DimensionKey};
pub use counter::{Counter, TieBreak};
pub use crosstab::{cross_tabulate, Axis};
pub use explode::{explode, explode_count, explode_shares, explode_top, ExplodedRow, MultiField, DENYLIST};
pub use hierarchy::director_genre_actor;
pub use period::{count_by_period, Period};
pub use profile::{column_quality, numeric_summary, ProfileColumn, QUALITY_INVALID};
