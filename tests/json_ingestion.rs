use catalog_views::ingestion::json::{ingest_json_from_path, ingest_json_from_str};
use catalog_views::types::ContentType;

#[test]
fn ingest_ndjson_from_path_happy_path() {
    let raw = ingest_json_from_path("tests/fixtures/catalog.ndjson").unwrap();

    assert_eq!(raw.row_count(), 3);
    assert_eq!(raw.rows[0].country.as_deref(), Some("India, UK"));
    assert_eq!(raw.rows[0].director, None);
    assert_eq!(raw.rows[1].content_type, ContentType::Series);
    // Numeric strings are accepted for the release year.
    assert_eq!(raw.rows[1].release_year, 2021);
    assert_eq!(raw.rows[2].country, None);
    assert_eq!(raw.rows[2].date_added, None);
    assert_eq!(raw.rows[2].rating, None);
}

#[test]
fn ingest_json_accepts_single_object() {
    let raw = ingest_json_from_str(
        r#"{"show_id":"s1","type":"movie","title":"Jaws","date_added":"","release_year":1975,"duration":"124 min","listed_in":"Dramas","description":""}"#,
    )
    .unwrap();
    assert_eq!(raw.row_count(), 1);
    assert_eq!(raw.rows[0].content_type, ContentType::Movie);
    assert_eq!(raw.rows[0].date_added, None);
}

#[test]
fn ingest_json_rejects_non_object_rows() {
    let err = ingest_json_from_str("[1, 2]").unwrap_err();
    assert!(err.to_string().contains("row 1 is not a json object"));
}

#[test]
fn ingest_json_rejects_fractional_release_year() {
    let err = ingest_json_from_str(
        r#"[{"show_id":"s1","type":"Movie","title":"Jaws","date_added":null,"release_year":1975.5,"duration":"","listed_in":"","description":""}]"#,
    )
    .unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("column 'release_year'"));
    assert!(msg.contains("1975.5"));
}
