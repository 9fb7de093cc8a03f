//! Pipeline configuration.
//!
//! Every field has a default, so an empty JSON object (`{}`) is a valid configuration and
//! callers only spell out what they change.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::CatalogResult;
use crate::execution::ExecutionOptions;
use crate::ingestion::IngestionFormat;

pub use crate::processing::TieBreak;

/// Per-level limits of the director → genre → actor view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HierarchyLimits {
    /// Directors kept, ranked by total count.
    pub directors: usize,
    /// Genres kept per director.
    pub genres: usize,
    /// Actor rows kept per (director, genre) pair.
    pub actors: usize,
}

impl Default for HierarchyLimits {
    fn default() -> Self {
        Self {
            directors: 5,
            genres: 3,
            actors: 2,
        }
    }
}

/// Knobs shared by every aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregationOptions {
    /// Row limit of the top-N ranking views (countries, actors, directors).
    pub top_n: usize,
    pub hierarchy: HierarchyLimits,
    pub tie_break: TieBreak,
    /// Decimal places percentages are rounded to; `None` keeps full precision.
    pub share_precision: Option<u32>,
}

impl Default for AggregationOptions {
    fn default() -> Self {
        Self {
            top_n: 20,
            hierarchy: HierarchyLimits::default(),
            tie_break: TieBreak::FirstSeen,
            share_precision: Some(2),
        }
    }
}

impl AggregationOptions {
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    pub fn with_hierarchy(mut self, hierarchy: HierarchyLimits) -> Self {
        self.hierarchy = hierarchy;
        self
    }

    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    pub fn with_share_precision(mut self, share_precision: Option<u32>) -> Self {
        self.share_precision = share_precision;
        self
    }
}

/// Top-level configuration of a [`crate::pipeline::CatalogPipeline`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineOptions {
    /// Path of the static catalog snapshot.
    pub source: PathBuf,
    /// Forced source format; inferred from the extension when `None`.
    pub format: Option<IngestionFormat>,
    pub aggregation: AggregationOptions,
    pub execution: ExecutionOptions,
    /// Memoize computed views until [`crate::pipeline::CatalogPipeline::invalidate`].
    pub cache_views: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            source: PathBuf::from("data/netflix.csv"),
            format: None,
            aggregation: AggregationOptions::default(),
            execution: ExecutionOptions::default(),
            cache_views: true,
        }
    }
}

impl PipelineOptions {
    /// Parse options from JSON text. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> CatalogResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read options from a JSON file.
    pub fn from_json_path(path: impl AsRef<Path>) -> CatalogResult<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&text)
    }

    pub fn with_source(mut self, source: impl Into<PathBuf>) -> Self {
        self.source = source.into();
        self
    }

    pub fn with_format(mut self, format: Option<IngestionFormat>) -> Self {
        self.format = format;
        self
    }

    pub fn with_aggregation(mut self, aggregation: AggregationOptions) -> Self {
        self.aggregation = aggregation;
        self
    }

    pub fn with_execution(mut self, execution: ExecutionOptions) -> Self {
        self.execution = execution;
        self
    }

    pub fn with_cache_views(mut self, cache_views: bool) -> Self {
        self.cache_views = cache_views;
        self
    }
}
