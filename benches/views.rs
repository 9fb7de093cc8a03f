use criterion::{black_box, criterion_group, criterion_main, Criterion};

use catalog_views::cleaning::clean;
use catalog_views::config::AggregationOptions;
use catalog_views::execution::{ExecutionEngine, ExecutionOptions};
use catalog_views::types::{ContentType, RawRecord, RawTable};
use catalog_views::views::ViewKind;

const DIRECTORS: [&str; 6] = ["Steven Spielberg", "Mike Flanagan", "", "Not Available", "Ava DuVernay", "Haile Gerima"];
const COUNTRIES: [&str; 5] = ["United States", "India, United Kingdom", "India,", "", "Ghana, Germany"];
const GENRES: [&str; 4] = [
    "Dramas, International Movies",
    "Comedies",
    "TV Dramas, TV Mysteries",
    "Documentaries, Dramas, Comedies",
];
const DATES: [&str; 4] = ["September 25, 2021", "June 2, 2020", "not a date", "2019-12-01"];

fn synthetic_raw(n: usize) -> RawTable {
    (0..n)
        .map(|i| {
            let series = i % 4 == 0;
            RawRecord {
                show_id: format!("s{i}"),
                content_type: if series { ContentType::Series } else { ContentType::Movie },
                title: format!("Title {i}"),
                director: Some(DIRECTORS[i % DIRECTORS.len()].to_string()),
                cast: Some(format!("Actor {}, Actor {}, Actor {}", i % 97, i % 31, i % 13)),
                country: Some(COUNTRIES[i % COUNTRIES.len()].to_string()),
                date_added: Some(DATES[i % DATES.len()].to_string()),
                release_year: 1960 + (i % 62) as i32,
                rating: Some(["PG-13", "tv-ma.", "R", "nan"][i % 4].to_string()),
                duration: Some(if series {
                    format!("{} Seasons", 1 + i % 5)
                } else {
                    format!("{} min", 60 + i % 120)
                }),
                listed_in: GENRES[i % GENRES.len()].to_string(),
                description: String::new(),
            }
        })
        .collect()
}

fn bench_clean(c: &mut Criterion) {
    let raw = synthetic_raw(10_000);
    c.bench_function("clean_10k", |b| b.iter(|| clean(black_box(&raw))));
}

fn bench_views(c: &mut Criterion) {
    let table = clean(&synthetic_raw(10_000));
    let options = AggregationOptions::default();

    c.bench_function("director_genre_actor_10k", |b| {
        b.iter(|| ViewKind::DirectorGenreActor.compute(black_box(&table), &options))
    });

    let sequential = ExecutionEngine::new(&ExecutionOptions {
        num_threads: Some(1),
        max_in_flight_views: None,
    })
    .expect("engine");
    c.bench_function("all_views_10k_sequential", |b| {
        b.iter(|| sequential.compute_views(black_box(&table), &ViewKind::ALL, &options))
    });

    let parallel = ExecutionEngine::new(&ExecutionOptions::default()).expect("engine");
    c.bench_function("all_views_10k_parallel", |b| {
        b.iter(|| parallel.compute_views(black_box(&table), &ViewKind::ALL, &options))
    });
}

criterion_group!(benches, bench_clean, bench_views);
criterion_main!(benches);
