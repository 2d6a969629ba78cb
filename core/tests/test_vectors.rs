//! Verify request building and response decoding against JSON test vectors
//! stored in `test-vectors/`.
//!
//! Each vector file describes inputs, expected requests, simulated responses,
//! and expected results. Comparing parsed JSON (not raw strings) avoids false
//! negatives from field-ordering differences.

use hn_core::{
    ApiError, ClientConfig, HnClient, HttpRequest, HttpResponse, StoryList, User,
};
use serde_json::Value;

const BASE_URL: &str = "http://localhost:3000";

type VectorClient = HnClient<Box<dyn Fn(&HttpRequest) -> Result<HttpResponse, ApiError>>>;

/// A client whose transport answers every request with the case's simulated
/// response.
fn client_replaying(case: &Value) -> VectorClient {
    let sim = &case["simulated_response"];
    let response = HttpResponse {
        status: sim["status"].as_u64().unwrap() as u16,
        body: sim["body"].as_str().unwrap().to_string(),
    };
    let transport: Box<dyn Fn(&HttpRequest) -> Result<HttpResponse, ApiError>> =
        Box::new(move |_| Ok(response.clone()));
    HnClient::with_transport(ClientConfig::default().with_base_uri(BASE_URL), transport)
}

fn expected_url(case: &Value) -> String {
    format!("{BASE_URL}{}", case["expected_request"]["path"].as_str().unwrap())
}

fn assert_expected_error(name: &str, case: &Value, err: ApiError) {
    match case["expected_error"].as_str().unwrap() {
        "NotFound" => assert_eq!(err, ApiError::NotFound, "{name}"),
        "DecodeError" => assert!(matches!(err, ApiError::DecodeError { .. }), "{name}: {err}"),
        "HttpError" => assert!(matches!(err, ApiError::HttpError { .. }), "{name}: {err}"),
        "TypeMismatch" => match err {
            ApiError::TypeMismatch { actual, operation, .. } => {
                assert_eq!(actual, case["expected_actual"].as_str().unwrap(), "{name}");
                assert_eq!(operation, case["operation"].as_str().unwrap(), "{name}");
            }
            other => panic!("{name}: expected TypeMismatch, got {other}"),
        },
        other => panic!("{name}: unknown expected_error: {other}"),
    }
}

fn story_list(endpoint: &str) -> StoryList {
    StoryList::ALL
        .into_iter()
        .find(|list| list.endpoint() == endpoint)
        .unwrap_or_else(|| panic!("unknown story list: {endpoint}"))
}

// ---------------------------------------------------------------------------
// Items
// ---------------------------------------------------------------------------

#[test]
fn item_test_vectors() {
    let raw = include_str!("../../test-vectors/items.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let id = case["input_id"].as_u64().unwrap();
        let c = client_replaying(case);

        // Verify build
        let req = c.build_item(id);
        assert_eq!(req.url, expected_url(case), "{name}: url");

        // Verify fetch + dispatch + projection
        let result = match case["operation"].as_str().unwrap() {
            "get_story" => c.get_story(id).map(|v| serde_json::to_value(v).unwrap()),
            "get_comment" => c.get_comment(id).map(|v| serde_json::to_value(v).unwrap()),
            "get_poll" => c.get_poll(id).map(|v| serde_json::to_value(v).unwrap()),
            "get_part" => c.get_part(id).map(|v| serde_json::to_value(v).unwrap()),
            other => panic!("{name}: unknown operation: {other}"),
        };

        if case.get("expected_error").is_some() {
            assert_expected_error(name, case, result.unwrap_err());
        } else {
            assert_eq!(result.unwrap(), case["expected_result"], "{name}: projected result");
        }
    }
}

// ---------------------------------------------------------------------------
// Story lists
// ---------------------------------------------------------------------------

#[test]
fn index_test_vectors() {
    let raw = include_str!("../../test-vectors/index.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let list = story_list(case["endpoint"].as_str().unwrap());
        let c = client_replaying(case);

        let req = c.build_story_ids(list);
        assert_eq!(req.url, expected_url(case), "{name}: url");

        match c.get_story_ids(list) {
            Ok(ids) => {
                let expected: Vec<u64> =
                    serde_json::from_value(case["expected_result"].clone()).unwrap();
                assert_eq!(ids, expected, "{name}: ids");
            }
            Err(err) => assert_expected_error(name, case, err),
        }
    }
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[test]
fn user_test_vectors() {
    let raw = include_str!("../../test-vectors/users.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let id = case["input_id"].as_str().unwrap();
        let c = client_replaying(case);

        let req = c.build_user(id).unwrap();
        assert_eq!(req.url, expected_url(case), "{name}: url");

        match c.get_user(id) {
            Ok(user) => {
                let expected: User =
                    serde_json::from_value(case["expected_result"].clone()).unwrap();
                assert_eq!(user, expected, "{name}: user");
            }
            Err(err) => assert_expected_error(name, case, err),
        }
    }
}
