//! `catalog-views` turns a flat media-title catalog into ready-to-render analytical tables.
//!
//! The pipeline has four stages:
//!
//! - **Loader** ([`ingestion`]): reads a CSV or JSON snapshot into a [`types::RawTable`], once.
//! - **Cleaner** ([`cleaning`]): normalizes every row into a [`types::CleanRecord`] and drops
//!   duplicates. Pure and infallible.
//! - **Aggregator** ([`processing`], [`views`]): counts, exploded counts, cross tabulations,
//!   per-group argmax and a nested director → genre → actor top-N, each answering one
//!   [`views::ViewKind`].
//! - **View Cache** ([`cache`], [`pipeline`]): the clean table and computed views are memoized
//!   so repeated requests skip cleaning and aggregation.
//!
//! ## Quick example
//!
//! ```no_run
//! use catalog_views::config::PipelineOptions;
//! use catalog_views::pipeline::CatalogPipeline;
//! use catalog_views::views::ViewKind;
//!
//! # fn main() -> Result<(), catalog_views::CatalogError> {
//! let pipeline = CatalogPipeline::new(PipelineOptions::from_json_path("pipeline.json")?)?;
//! for (kind, view) in pipeline.views(&[ViewKind::ContentTypeSplit, ViewKind::TopDirectors])? {
//!     println!("{kind}: {} rows", view.len());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Without a pipeline, every stage can be used on its own:
//!
//! ```no_run
//! use catalog_views::cleaning::clean;
//! use catalog_views::config::AggregationOptions;
//! use catalog_views::ingestion::{ingest_from_path, IngestionOptions};
//! use catalog_views::views::ViewKind;
//!
//! # fn main() -> Result<(), catalog_views::CatalogError> {
//! let raw = ingest_from_path("data/netflix.csv", &IngestionOptions::default())?;
//! let table = clean(&raw);
//! let weekdays = ViewKind::AddedByWeekday.compute(&table, &AggregationOptions::default());
//! assert_eq!(weekdays.len(), 7);
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`ingestion`]: loader, format-specific readers and ingestion observers
//! - [`types`]: catalog schema and row/table types
//! - [`cleaning`]: normalization rules and the composed cleaner
//! - [`processing`]: aggregation algorithms
//! - [`views`]: output row shapes and the view catalog
//! - [`execution`]: parallel view computation with metrics
//! - [`cache`]: single-flight snapshot cell and view memo
//! - [`config`]: pipeline options
//! - [`pipeline`]: everything composed
//! - [`error`]: error types

pub mod cache;
pub mod cleaning;
pub mod config;
pub mod error;
pub mod execution;
pub mod ingestion;
pub mod pipeline;
pub mod processing;
pub mod types;
pub mod views;

#[cfg(test)]
mod testing;

pub use error::{CatalogError, CatalogResult};
