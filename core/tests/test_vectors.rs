//! Verify request building against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file lists inputs and the expected outcome of
//! `build_request`/`query_string`, so the encoding rules live in one
//! reviewable table.

use fetch_core::{build_request, query_string, ClientError, Header, HttpMethod, Query, USER_AGENT};

/// Parse `[["k", "v"], ...]` into query parameters.
fn parse_query(value: &serde_json::Value) -> Vec<Query> {
    value
        .as_array()
        .unwrap()
        .iter()
        .map(|pair| {
            let pair = pair.as_array().unwrap();
            Query::new(pair[0].as_str().unwrap(), pair[1].as_str().unwrap())
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Query strings
// ---------------------------------------------------------------------------

#[test]
fn query_test_vectors() {
    let raw = include_str!("../../test-vectors/query.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let url = case["url"].as_str().unwrap();
        let query = parse_query(&case["query"]);

        assert_eq!(
            query_string(&query),
            case["expected_query_string"].as_str().unwrap(),
            "{name}: query string"
        );

        let req = build_request(HttpMethod::Get, url, &query, &[], None).unwrap();
        assert_eq!(req.url, case["expected_url"].as_str().unwrap(), "{name}: url");
        assert!(!req.url.ends_with('&'), "{name}: trailing '&'");
        assert!(!req.url.ends_with('?'), "{name}: trailing '?'");
        assert!(req.body.is_none(), "{name}: body should be None");
        assert_eq!(
            req.headers,
            vec![Header::new("User-Agent", USER_AGENT)],
            "{name}: headers"
        );
    }
}

// ---------------------------------------------------------------------------
// URL validation
// ---------------------------------------------------------------------------

#[test]
fn url_test_vectors() {
    let raw = include_str!("../../test-vectors/urls.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let url = case["url"].as_str().unwrap();
        let result = build_request(HttpMethod::Get, url, &[], &[], None);

        if case["valid"].as_bool().unwrap() {
            assert!(result.is_ok(), "{name}: expected success, got {result:?}");
        } else {
            let err = result.unwrap_err();
            assert!(matches!(err, ClientError::Build(_)), "{name}: expected Build, got {err:?}");
        }
    }
}
