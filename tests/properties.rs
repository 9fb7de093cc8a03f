use catalog_views::cleaning::clean;
use catalog_views::cleaning::rules::{INVALID_LITERALS, SENTINEL};
use catalog_views::config::{AggregationOptions, HierarchyLimits, TieBreak};
use catalog_views::processing::{
    cross_tabulate, director_genre_actor, dominant_values, explode, Axis, Dimension, MultiField, DENYLIST,
};
use catalog_views::types::{CleanTable, ContentType, RawRecord, RawTable};
use catalog_views::views::ViewKind;
use proptest::prelude::*;

static PEOPLE: [&str; 8] = [
    "Steven Spielberg",
    "Mike Flanagan",
    "Kate Siegel",
    "Haile Gerima",
    "Ava DuVernay",
    "Sam Neill",
    "Laura Dern",
    "Kofi Ghanaba",
];
static COUNTRIES: [&str; 6] = ["United States", "India", "United Kingdom", "Ghana", "South Africa", "Spain"];
static RATINGS: [&str; 8] = ["PG-13", "tv-ma.", "TV-MA", "p.g.", "R", "tv-14", "TV-Y7-FV", "nc-17."];
/// Non-informative literals, including some that are only invalid after another rule runs.
static NOISE: [&str; 10] = [
    "",
    "Unknown",
    "unknown",
    "Not Available",
    "No cast",
    "No director",
    "nan",
    "NaN",
    "N/A",
    "NA",
];
static NOISE_SUFFIXES: [&str; 6] = ["", ".", ",", ", ", " ", " .,"];
static DATES: [&str; 7] = [
    "September 25, 2021",
    " Sep 24, 2021",
    "2020-06-02",
    "12/01/2019",
    "February 30, 2021",
    "garbage",
    "",
];
static DURATIONS: [&str; 9] = [
    "90 min",
    " 125 min ",
    "2 Seasons",
    "1 Season",
    "",
    "min",
    "abc Seasons",
    "45 min",
    "10 Seasons",
];
static GENRES: [&str; 6] = [
    "Dramas, International Movies",
    "Comedies",
    "TV Dramas, TV Mysteries, Dramas",
    "",
    "Documentaries, Dramas ",
    "Unknown, Dramas",
];

fn opt(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}

/// A non-informative literal in some casing, padded and followed by stray punctuation.
fn arb_noise() -> impl Strategy<Value = String> {
    (
        prop::sample::select(NOISE.to_vec()),
        0u8..3,
        any::<bool>(),
        prop::sample::select(NOISE_SUFFIXES.to_vec()),
    )
        .prop_map(|(literal, case, padded, suffix)| {
            let literal = match case {
                0 => literal.to_string(),
                1 => literal.to_uppercase(),
                _ => literal.to_lowercase(),
            };
            let pad = if padded { " " } else { "" };
            format!("{pad}{literal}{suffix}")
        })
}

fn arb_value(pool: &'static [&'static str]) -> impl Strategy<Value = String> {
    prop_oneof![
        3 => prop::sample::select(pool).prop_map(|v: &str| v.to_string()),
        2 => arb_noise(),
        1 => "[A-Za-z ./,-]{0,10}",
    ]
}

/// A possibly-missing cell holding one or more values joined by `", "`.
fn arb_multi_cell(pool: &'static [&'static str]) -> impl Strategy<Value = Option<String>> {
    prop::option::of(prop::collection::vec(arb_value(pool), 1..4).prop_map(|values| values.join(", ")))
}

fn arb_rating() -> impl Strategy<Value = Option<String>> {
    prop::option::of(prop_oneof![
        3 => prop::sample::select(RATINGS.to_vec()).prop_map(|v: &str| v.to_string()),
        2 => arb_noise(),
        1 => "[A-Za-z .-]{0,6}",
    ])
}

fn arb_raw_record() -> impl Strategy<Value = RawRecord> {
    let grouping = (
        arb_multi_cell(&PEOPLE),
        arb_multi_cell(&PEOPLE),
        arb_multi_cell(&COUNTRIES),
        arb_rating(),
    );
    let rest = (
        0usize..6,
        any::<bool>(),
        prop::sample::select(DATES.to_vec()),
        1990i32..2022,
        prop::sample::select(DURATIONS.to_vec()),
        prop::sample::select(GENRES.to_vec()),
        0usize..3,
    );
    (grouping, rest).prop_map(
        |((director, cast, country, rating), (id, series, date, release_year, duration, genres, title))| RawRecord {
            show_id: format!("s{id}"),
            content_type: if series { ContentType::Series } else { ContentType::Movie },
            title: format!(" Title {title} "),
            director,
            cast,
            country,
            date_added: opt(date),
            release_year,
            rating,
            duration: opt(duration),
            listed_in: genres.to_string(),
            description: String::new(),
        },
    )
}

/// A messy raw table whose first few rows are repeated at the end.
fn arb_raw_table() -> impl Strategy<Value = RawTable> {
    (prop::collection::vec(arb_raw_record(), 0..30), 0usize..4).prop_map(|(mut rows, repeats)| {
        let repeated: Vec<RawRecord> = rows.iter().take(repeats).cloned().collect();
        rows.extend(repeated);
        RawTable::new(rows)
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn cleaning_is_idempotent(raw in arb_raw_table()) {
        let once = clean(&raw);
        let twice = clean(&once.to_raw_table());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn grouping_fields_are_closed_under_the_sentinel(raw in arb_raw_table()) {
        for rec in clean(&raw).iter() {
            for value in [&rec.director, &rec.cast, &rec.country, &rec.rating] {
                prop_assert!(!value.is_empty());
                prop_assert!(
                    value == SENTINEL || !INVALID_LITERALS.contains(&value.as_str()),
                    "invalid literal survived: {:?}",
                    value
                );
            }
            prop_assert!(!rec.country.ends_with(','));
            prop_assert_eq!(&rec.rating, &rec.rating.to_uppercase());
            prop_assert!(!rec.rating.contains('.'));
        }
    }

    #[test]
    fn durations_are_exclusive_and_match_content_type(raw in arb_raw_table()) {
        for rec in clean(&raw).iter() {
            prop_assert!(rec.duration_minutes.is_none() || rec.duration_seasons.is_none());
            match rec.content_type {
                ContentType::Movie => {
                    prop_assert!(rec.duration_seasons.is_none());
                }
                ContentType::Series => {
                    prop_assert!(rec.duration_minutes.is_none());
                }
            }
        }
    }

    #[test]
    fn explode_conserves_post_filter_value_counts(raw in arb_raw_table()) {
        let table = clean(&raw);
        for field in [MultiField::Director, MultiField::Cast, MultiField::Country, MultiField::Genre] {
            let expected: usize = table
                .iter()
                .map(|rec| {
                    field
                        .raw(rec)
                        .split(", ")
                        .filter(|v| !DENYLIST.contains(v))
                        .count()
                })
                .sum();
            prop_assert_eq!(explode(&table, field).len(), expected, "{:?}", field);
        }
    }

    #[test]
    fn cross_tab_counts_every_record_with_both_keys(raw in arb_raw_table()) {
        let table = clean(&raw);

        let single = cross_tabulate(
            &table,
            Axis::Single(Dimension::ContentType),
            Axis::Single(Dimension::Rating),
        );
        prop_assert_eq!(single.iter().map(|c| c.count).sum::<u64>(), table.row_count() as u64);

        let by_year = cross_tabulate(
            &table,
            Axis::Single(Dimension::YearAdded),
            Axis::Single(Dimension::DurationMinutes),
        );
        let both = table
            .iter()
            .filter(|r| r.date_added.is_some() && r.duration_minutes.is_some())
            .count();
        prop_assert_eq!(by_year.iter().map(|c| c.count).sum::<u64>(), both as u64);
        prop_assert!(by_year.iter().all(|c| c.count > 0));
    }

    #[test]
    fn hierarchy_respects_default_bounds(raw in arb_raw_table(), lexicographic in any::<bool>()) {
        let table = clean(&raw);
        let tie = if lexicographic { TieBreak::Lexicographic } else { TieBreak::FirstSeen };
        let leaves = director_genre_actor(&table, &HierarchyLimits::default(), tie);

        let mut directors: Vec<&str> = leaves.iter().map(|l| l.director.as_str()).collect();
        directors.dedup();
        prop_assert!(directors.len() <= 5);

        for director in &directors {
            let mut genres: Vec<&str> = leaves
                .iter()
                .filter(|l| l.director == *director)
                .map(|l| l.genre.as_str())
                .collect();
            genres.dedup();
            prop_assert!(genres.len() <= 3);
            for genre in genres {
                let actors = leaves
                    .iter()
                    .filter(|l| l.director == *director && l.genre == genre)
                    .count();
                prop_assert!(actors <= 2);
            }
        }
    }

    #[test]
    fn weekday_view_always_has_seven_rows(raw in arb_raw_table()) {
        let table = clean(&raw);
        let view = ViewKind::AddedByWeekday.compute(&table, &AggregationOptions::default());
        let labels: Vec<&str> = view
            .as_counts()
            .unwrap()
            .iter()
            .map(|c| c.category.as_str())
            .collect();
        prop_assert_eq!(labels, WEEKDAYS.to_vec());
    }
}

const WEEKDAYS: [&str; 7] = ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday"];

#[test]
fn weekday_view_of_empty_table_is_zero_filled() {
    let view = ViewKind::AddedByWeekday.compute(&CleanTable::default(), &AggregationOptions::default());
    let counts = view.as_counts().unwrap();
    assert_eq!(counts.len(), 7);
    assert!(counts.iter().all(|c| c.count == 0));
    assert_eq!(counts[0].category, WEEKDAYS[0]);
}

#[test]
fn noise_exposed_by_later_rules_is_replaced() {
    let mut rec = RawRecord {
        show_id: "s1".to_string(),
        content_type: ContentType::Movie,
        title: "T".to_string(),
        director: Some("nan,".to_string()),
        cast: None,
        country: Some("N/A,".to_string()),
        date_added: None,
        release_year: 2020,
        rating: Some("n/a".to_string()),
        duration: None,
        listed_in: String::new(),
        description: String::new(),
    };
    let table = clean(&RawTable::new(vec![rec.clone()]));
    assert_eq!(table.rows[0].rating, "UNKNOWN");
    assert_eq!(table.rows[0].country, SENTINEL);
    assert_eq!(clean(&table.to_raw_table()), table);

    rec.rating = Some("N/A.".to_string());
    assert_eq!(clean(&RawTable::new(vec![rec])).rows[0].rating, "UNKNOWN");
}

#[test]
fn three_row_scenario() {
    let row = |id: &str, content_type, duration: &str, country: &str| RawRecord {
        show_id: id.to_string(),
        content_type,
        title: id.to_string(),
        director: None,
        cast: None,
        country: opt(country),
        date_added: None,
        release_year: 2020,
        rating: None,
        duration: opt(duration),
        listed_in: String::new(),
        description: String::new(),
    };
    let raw = RawTable::new(vec![
        row("a", ContentType::Movie, "90 min", "India, UK"),
        row("b", ContentType::Series, "2 Seasons", "India"),
        row("c", ContentType::Movie, "", ""),
    ]);
    let table = clean(&raw);

    let minutes: Vec<Option<u32>> = table.iter().map(|r| r.duration_minutes).collect();
    let seasons: Vec<Option<u32>> = table.iter().map(|r| r.duration_seasons).collect();
    assert_eq!(minutes, vec![Some(90), None, None]);
    assert_eq!(seasons, vec![None, Some(2), None]);

    let countries = ViewKind::TopCountries.compute(&table, &AggregationOptions::default());
    let countries: Vec<(&str, u64)> = countries
        .as_counts()
        .unwrap()
        .iter()
        .map(|c| (c.category.as_str(), c.count))
        .collect();
    assert_eq!(countries, vec![("India", 2), ("UK", 1)]);
}

#[test]
fn argmax_tie_is_deterministic_first_seen() {
    let row = |id: usize, genre: &str| RawRecord {
        show_id: format!("s{id}"),
        content_type: ContentType::Movie,
        title: String::new(),
        director: None,
        cast: None,
        country: Some("Spain".to_string()),
        date_added: None,
        release_year: 2020,
        rating: None,
        duration: None,
        listed_in: genre.to_string(),
        description: String::new(),
    };
    let rows: Vec<RawRecord> = (0..10)
        .map(|i| row(i, if i % 2 == 0 { "Drama" } else { "Comedy" }))
        .collect();
    let table = clean(&RawTable::new(rows));

    let first = dominant_values(&table, MultiField::Country, MultiField::Genre, TieBreak::FirstSeen);
    assert_eq!(first.len(), 1);
    assert_eq!(first[0].dominant_value, "Drama");
    assert_eq!(first[0].count, 5);
    for _ in 0..20 {
        assert_eq!(
            dominant_values(&table, MultiField::Country, MultiField::Genre, TieBreak::FirstSeen),
            first
        );
    }
}
