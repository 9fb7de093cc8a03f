//! Record builders shared by unit tests.

use chrono::NaiveDate;

use crate::types::{CleanRecord, ContentType};

pub(crate) fn record(show_id: &str, content_type: ContentType) -> CleanRecord {
    CleanRecord {
        show_id: show_id.to_string(),
        content_type,
        title: format!("Title {show_id}"),
        director: "Unknown".to_string(),
        cast: "Unknown".to_string(),
        country: "Unknown".to_string(),
        date_added: None,
        release_year: 2020,
        rating: "UNKNOWN".to_string(),
        duration: None,
        duration_minutes: None,
        duration_seasons: None,
        listed_in: String::new(),
        description: String::new(),
    }
}

pub(crate) fn dated(show_id: &str, y: i32, m: u32, d: u32) -> CleanRecord {
    let mut rec = record(show_id, ContentType::Movie);
    rec.date_added = NaiveDate::from_ymd_opt(y, m, d);
    rec
}

pub(crate) fn credited(show_id: &str, director: &str, cast: &str, country: &str, genres: &str) -> CleanRecord {
    let mut rec = record(show_id, ContentType::Movie);
    rec.director = director.to_string();
    rec.cast = cast.to_string();
    rec.country = country.to_string();
    rec.listed_in = genres.to_string();
    rec
}
