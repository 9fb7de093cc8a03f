//! Output tables handed to the rendering layer.
//!
//! Every analytical question is a [`ViewKind`]; computing one over a [`CleanTable`] yields an
//! [`AggregateView`], an ordered sequence of uniformly shaped rows that serializes to plain
//! JSON.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::AggregationOptions;
use crate::processing::{
    column_quality, count_by, count_by_period, count_shares, cross_tabulate, director_genre_actor,
    dominant_values, explode_shares, explode_top, numeric_summary, Axis, CountOrder, Dimension,
    MultiField, Period,
};
use crate::types::CleanTable;

/// `{category, count}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: u64,
}

impl CategoryCount {
    pub fn new(category: impl Into<String>, count: u64) -> Self {
        Self {
            category: category.into(),
            count,
        }
    }
}

/// `{category, count, percentage}`; percentages are in `0..=100`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryShare {
    pub category: String,
    pub count: u64,
    pub percentage: f64,
}

/// `{row_key, col_key, count}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossCount {
    pub row_key: String,
    pub col_key: String,
    pub count: u64,
}

/// `{key, dominant_value, count}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DominantValue {
    pub key: String,
    pub dominant_value: String,
    pub count: u64,
}

/// `{director, genre, actor, count}`: one leaf of the director → genre → actor hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HierarchyLeaf {
    pub director: String,
    pub genre: String,
    pub actor: String,
    pub count: u64,
}

/// `{column, data_type, invalid}`: missing plus invalid values of one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnQuality {
    pub column: String,
    pub data_type: String,
    pub invalid: u64,
}

/// `{column, count, mean, std, min, max}` over the non-missing values of a numeric column.
///
/// Statistics are `null` when the column has no values; `std` is also `null` for one value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericSummary {
    pub column: String,
    pub count: u64,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// A computed view. The variant names the row shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", content = "rows", rename_all = "snake_case")]
pub enum AggregateView {
    Counts(Vec<CategoryCount>),
    Shares(Vec<CategoryShare>),
    CrossTab(Vec<CrossCount>),
    Dominant(Vec<DominantValue>),
    Hierarchy(Vec<HierarchyLeaf>),
    Quality(Vec<ColumnQuality>),
    Summary(Vec<NumericSummary>),
}

impl AggregateView {
    /// Number of rows.
    pub fn len(&self) -> usize {
        match self {
            AggregateView::Counts(rows) => rows.len(),
            AggregateView::Shares(rows) => rows.len(),
            AggregateView::CrossTab(rows) => rows.len(),
            AggregateView::Dominant(rows) => rows.len(),
            AggregateView::Hierarchy(rows) => rows.len(),
            AggregateView::Quality(rows) => rows.len(),
            AggregateView::Summary(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_counts(&self) -> Option<&[CategoryCount]> {
        match self {
            AggregateView::Counts(rows) => Some(rows),
            _ => None,
        }
    }

    pub fn as_shares(&self) -> Option<&[CategoryShare]> {
        match self {
            AggregateView::Shares(rows) => Some(rows),
            _ => None,
        }
    }

    pub fn as_cross_tab(&self) -> Option<&[CrossCount]> {
        match self {
            AggregateView::CrossTab(rows) => Some(rows),
            _ => None,
        }
    }

    pub fn as_dominant(&self) -> Option<&[DominantValue]> {
        match self {
            AggregateView::Dominant(rows) => Some(rows),
            _ => None,
        }
    }

    pub fn as_hierarchy(&self) -> Option<&[HierarchyLeaf]> {
        match self {
            AggregateView::Hierarchy(rows) => Some(rows),
            _ => None,
        }
    }

    pub fn as_quality(&self) -> Option<&[ColumnQuality]> {
        match self {
            AggregateView::Quality(rows) => Some(rows),
            _ => None,
        }
    }

    pub fn as_summary(&self) -> Option<&[NumericSummary]> {
        match self {
            AggregateView::Summary(rows) => Some(rows),
            _ => None,
        }
    }

    /// Serialize the rows (without the shape tag) as a JSON array.
    pub fn rows_json(&self) -> serde_json::Result<serde_json::Value> {
        match self {
            AggregateView::Counts(rows) => serde_json::to_value(rows),
            AggregateView::Shares(rows) => serde_json::to_value(rows),
            AggregateView::CrossTab(rows) => serde_json::to_value(rows),
            AggregateView::Dominant(rows) => serde_json::to_value(rows),
            AggregateView::Hierarchy(rows) => serde_json::to_value(rows),
            AggregateView::Quality(rows) => serde_json::to_value(rows),
            AggregateView::Summary(rows) => serde_json::to_value(rows),
        }
    }
}

/// The analytical questions the pipeline answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewKind {
    /// Share of movies vs. series.
    ContentTypeSplit,
    RatingDistribution,
    /// Content type × rating.
    TypeByRating,
    /// Release year of titles with a known date added.
    ReleasesByYear,
    AddedByMonth,
    AddedByWeekday,
    AddedPerYear,
    MovieDurations,
    SeriesSeasons,
    TopCountries,
    /// Year added × country.
    CountriesByYearAdded,
    GenreShares,
    DominantGenreByCountry,
    TopActors,
    TopDirectors,
    DirectorGenreActor,
    /// Missing/invalid count per column.
    ColumnQuality,
    /// Descriptive statistics of the numeric columns.
    NumericSummary,
}

impl ViewKind {
    pub const ALL: [ViewKind; 18] = [
        ViewKind::ContentTypeSplit,
        ViewKind::RatingDistribution,
        ViewKind::TypeByRating,
        ViewKind::ReleasesByYear,
        ViewKind::AddedByMonth,
        ViewKind::AddedByWeekday,
        ViewKind::AddedPerYear,
        ViewKind::MovieDurations,
        ViewKind::SeriesSeasons,
        ViewKind::TopCountries,
        ViewKind::CountriesByYearAdded,
        ViewKind::GenreShares,
        ViewKind::DominantGenreByCountry,
        ViewKind::TopActors,
        ViewKind::TopDirectors,
        ViewKind::DirectorGenreActor,
        ViewKind::ColumnQuality,
        ViewKind::NumericSummary,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ViewKind::ContentTypeSplit => "content_type_split",
            ViewKind::RatingDistribution => "rating_distribution",
            ViewKind::TypeByRating => "type_by_rating",
            ViewKind::ReleasesByYear => "releases_by_year",
            ViewKind::AddedByMonth => "added_by_month",
            ViewKind::AddedByWeekday => "added_by_weekday",
            ViewKind::AddedPerYear => "added_per_year",
            ViewKind::MovieDurations => "movie_durations",
            ViewKind::SeriesSeasons => "series_seasons",
            ViewKind::TopCountries => "top_countries",
            ViewKind::CountriesByYearAdded => "countries_by_year_added",
            ViewKind::GenreShares => "genre_shares",
            ViewKind::DominantGenreByCountry => "dominant_genre_by_country",
            ViewKind::TopActors => "top_actors",
            ViewKind::TopDirectors => "top_directors",
            ViewKind::DirectorGenreActor => "director_genre_actor",
            ViewKind::ColumnQuality => "column_quality",
            ViewKind::NumericSummary => "numeric_summary",
        }
    }

    /// Compute this view over `table`. Never mutates the table.
    pub fn compute(self, table: &CleanTable, options: &AggregationOptions) -> AggregateView {
        let tie = options.tie_break;
        let precision = options.share_precision;
        match self {
            ViewKind::ContentTypeSplit => {
                AggregateView::Shares(count_shares(table, Dimension::ContentType, tie, precision))
            }
            ViewKind::RatingDistribution => {
                AggregateView::Shares(count_shares(table, Dimension::Rating, tie, precision))
            }
            ViewKind::TypeByRating => AggregateView::CrossTab(cross_tabulate(
                table,
                Axis::Single(Dimension::ContentType),
                Axis::Single(Dimension::Rating),
            )),
            ViewKind::ReleasesByYear => AggregateView::Counts(count_by_period(table, Period::Year)),
            ViewKind::AddedByMonth => AggregateView::Counts(count_by_period(table, Period::Month)),
            ViewKind::AddedByWeekday => AggregateView::Counts(count_by_period(table, Period::Weekday)),
            ViewKind::AddedPerYear => {
                AggregateView::Counts(count_by(table, Dimension::YearAdded, CountOrder::ByKey))
            }
            ViewKind::MovieDurations => {
                AggregateView::Counts(count_by(table, Dimension::DurationMinutes, CountOrder::ByKey))
            }
            ViewKind::SeriesSeasons => {
                AggregateView::Counts(count_by(table, Dimension::DurationSeasons, CountOrder::ByKey))
            }
            ViewKind::TopCountries => {
                AggregateView::Counts(explode_top(table, MultiField::Country, options.top_n, tie))
            }
            ViewKind::CountriesByYearAdded => AggregateView::CrossTab(cross_tabulate(
                table,
                Axis::Single(Dimension::YearAdded),
                Axis::Exploded(MultiField::Country),
            )),
            ViewKind::GenreShares => {
                AggregateView::Shares(explode_shares(table, MultiField::Genre, tie, precision))
            }
            ViewKind::DominantGenreByCountry => AggregateView::Dominant(dominant_values(
                table,
                MultiField::Country,
                MultiField::Genre,
                tie,
            )),
            ViewKind::TopActors => {
                AggregateView::Counts(explode_top(table, MultiField::Cast, options.top_n, tie))
            }
            ViewKind::TopDirectors => {
                AggregateView::Counts(explode_top(table, MultiField::Director, options.top_n, tie))
            }
            ViewKind::DirectorGenreActor => {
                AggregateView::Hierarchy(director_genre_actor(table, &options.hierarchy, tie))
            }
            ViewKind::ColumnQuality => AggregateView::Quality(column_quality(table)),
            ViewKind::NumericSummary => AggregateView::Summary(numeric_summary(table)),
        }
    }
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
