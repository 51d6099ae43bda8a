use super::ScriptedFetcher;
use crate::wayback::{
    availability_query, parse_availability, resolve_snapshot, wayback_timestamp,
    WAYBACK_AVAILABLE_URL,
};

const INDEX: &str = "http://index.test/wayback/available";

const FOUND: &str = r#"{
    "url": "nike.com",
    "archived_snapshots": {
        "closest": {
            "status": "200",
            "available": true,
            "url": "http://web.archive.org/web/20200101003623/https://www.nike.com/",
            "timestamp": "20200101003623"
        }
    },
    "timestamp": "20200101"
}"#;

#[test]
fn test_timestamp_format() {
    assert_eq!(wayback_timestamp(2020, 1, 1).unwrap(), "20200101");
    assert_eq!(wayback_timestamp(1999, 12, 31).unwrap(), "19991231");
    assert!(wayback_timestamp(2023, 2, 29).is_err());
    assert!(wayback_timestamp(2023, 13, 1).is_err());
}

#[test]
fn test_query_carries_url_and_timestamp() {
    let query = availability_query(WAYBACK_AVAILABLE_URL, "https://www.nike.com", "20200101").unwrap();
    assert_eq!(query.host_str(), Some("archive.org"));
    assert_eq!(query.path(), "/wayback/available");

    let pairs: Vec<(String, String)> = query
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("url".to_string(), "https://www.nike.com".to_string()),
            ("timestamp".to_string(), "20200101".to_string()),
        ]
    );

    assert!(availability_query("not a url", "https://www.nike.com", "20200101").is_err());
}

#[test]
fn test_resolves_closest_snapshot() {
    let fetcher = ScriptedFetcher::new().respond("timestamp=20200101", FOUND);

    let snapshot = resolve_snapshot(&fetcher, INDEX, "https://www.nike.com", "20200101");

    assert!(snapshot.is_found());
    assert_eq!(
        snapshot.archive_url.as_deref(),
        Some("http://web.archive.org/web/20200101003623/https://www.nike.com/")
    );
    assert_eq!(snapshot.captured_at.as_deref(), Some("20200101003623"));
    assert_eq!(snapshot.capture_status.as_deref(), Some("200"));
    assert_eq!(snapshot.url, "https://www.nike.com");
    assert_eq!(snapshot.timestamp, "20200101");

    let requests = fetcher.requests();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].starts_with(INDEX));
}

#[test]
fn test_missing_archived_snapshots_is_no_snapshot() {
    let fetcher = ScriptedFetcher::new()
        .respond("timestamp=20200101", r#"{"url": "https://www.nike.com", "timestamp": "20200101"}"#);

    let snapshot = resolve_snapshot(&fetcher, INDEX, "https://www.nike.com", "20200101");
    assert!(!snapshot.is_found());
    assert_eq!(snapshot.archive_url, None);
}

#[test]
fn test_empty_archived_snapshots_is_no_snapshot() {
    let fetcher = ScriptedFetcher::new().respond("available", r#"{"archived_snapshots": {}}"#);
    let snapshot = resolve_snapshot(&fetcher, INDEX, "https://example.com", "20210101");
    assert!(!snapshot.is_found());
}

#[test]
fn test_malformed_response_is_no_snapshot() {
    for body in [
        "<html>rate limited</html>",
        r#"{"archived_snapshots": {"closest": {"timestamp": "2020"}}}"#,
        r#"{"archived_snapshots": "none"}"#,
        "",
    ] {
        let fetcher = ScriptedFetcher::new().respond("available", body);
        let snapshot = resolve_snapshot(&fetcher, INDEX, "https://example.com", "20200101");
        assert!(!snapshot.is_found(), "body: {}", body);
    }
}

#[test]
fn test_index_error_status_is_no_snapshot() {
    let fetcher = ScriptedFetcher::new().fail("available", 503);
    let snapshot = resolve_snapshot(&fetcher, INDEX, "https://example.com", "20200101");
    assert!(!snapshot.is_found());
}

#[test]
fn test_bad_endpoint_is_no_snapshot_without_request() {
    let fetcher = ScriptedFetcher::new().respond("", FOUND);
    let snapshot = resolve_snapshot(&fetcher, "::not an endpoint::", "https://example.com", "20200101");
    assert!(!snapshot.is_found());
    assert!(fetcher.requests().is_empty());
}

#[test]
fn test_parse_availability_fields() {
    let closest = parse_availability(FOUND.as_bytes()).unwrap();
    assert_eq!(closest.available, Some(true));
    assert_eq!(closest.status.as_deref(), Some("200"));
}
