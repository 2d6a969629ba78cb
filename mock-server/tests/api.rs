use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, app_with, Fixtures, NOT_FOUND_BODY};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn get(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

// --- items ---

#[tokio::test]
async fn item_returns_fixture() {
    let resp = app().oneshot(get("/v0/item/8412605.json")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let item: Value = body_json(resp).await;
    assert_eq!(item["type"], "story");
    assert_eq!(item["by"], "example_user");
    assert_eq!(item["score"], 42);
}

#[tokio::test]
async fn unknown_item_returns_null() {
    let resp = app().oneshot(get("/v0/item/99999999.json")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let item: Value = body_json(resp).await;
    assert!(item.is_null());
}

#[tokio::test]
async fn item_without_suffix_is_404() {
    let resp = app().oneshot(get("/v0/item/8412605")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_bytes(resp).await, NOT_FOUND_BODY.as_bytes());
}

#[tokio::test]
async fn non_numeric_item_is_404() {
    let resp = app().oneshot(get("/v0/item/abc.json")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- users ---

#[tokio::test]
async fn user_returns_fixture() {
    let resp = app().oneshot(get("/v0/user/jl.json")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let user: Value = body_json(resp).await;
    assert_eq!(user["karma"], 2937);
    assert_eq!(user["submitted"], json!([8265435, 8168423, 8090946]));
}

#[tokio::test]
async fn unknown_user_returns_null() {
    let resp = app().oneshot(get("/v0/user/nobody-here.json")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let user: Value = body_json(resp).await;
    assert!(user.is_null());
}

// --- index endpoints ---

#[tokio::test]
async fn topstories_keep_fixture_order() {
    let resp = app().oneshot(get("/v0/topstories.json")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let ids: Vec<u64> = body_json(resp).await;
    assert_eq!(ids, vec![8412605, 192327, 126809]);
}

#[tokio::test]
async fn maxitem_is_a_bare_integer() {
    let resp = app().oneshot(get("/v0/maxitem.json")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_bytes(resp).await, "8412720".as_bytes());
}

#[tokio::test]
async fn updates_return_items_and_profiles() {
    let resp = app().oneshot(get("/v0/updates.json")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let updates: Value = body_json(resp).await;
    assert_eq!(updates["items"], json!([8412720, 8412700, 8412605]));
    assert_eq!(updates["profiles"], json!(["pg", "jl"]));
}

#[tokio::test]
async fn unknown_list_is_404() {
    let resp = app().oneshot(get("/v0/hotstories.json")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_route_is_404_with_text_body() {
    let resp = app().oneshot(get("/v1/item/8412605.json")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_bytes(resp).await, NOT_FOUND_BODY.as_bytes());
}

// --- custom fixtures ---

#[tokio::test]
async fn custom_fixtures_are_served() {
    let fixtures = Fixtures::default()
        .with_item(json!({"id": 1, "type": "job", "title": "Hiring"}))
        .with_list("jobstories", vec![1]);
    let app = app_with(fixtures);

    let resp = app.clone().oneshot(get("/v0/jobstories.json")).await.unwrap();
    let ids: Vec<u64> = body_json(resp).await;
    assert_eq!(ids, vec![1]);

    let resp = app.clone().oneshot(get("/v0/maxitem.json")).await.unwrap();
    let max: u64 = body_json(resp).await;
    assert_eq!(max, 1);

    let resp = app.oneshot(get("/v0/topstories.json")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
