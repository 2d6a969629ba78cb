use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;

pub const NOT_FOUND_BODY: &str = "404 page not found";

/// Canned Firebase API content. Unknown item and user ids answer `null`,
/// the way the real service does.
#[derive(Clone, Debug, Default)]
pub struct Fixtures {
    pub items: HashMap<u64, Value>,
    pub users: HashMap<String, Value>,
    pub lists: HashMap<String, Vec<u64>>,
    pub updates: Value,
    /// Overrides the computed `/maxitem` answer.
    pub max_item: Option<u64>,
}

impl Fixtures {
    pub fn with_item(mut self, item: Value) -> Self {
        let id = item["id"].as_u64().unwrap_or_default();
        self.items.insert(id, item);
        self
    }

    pub fn with_user(mut self, user: Value) -> Self {
        let id = user["id"].as_str().unwrap_or_default().to_string();
        self.users.insert(id, user);
        self
    }

    pub fn with_list(mut self, endpoint: &str, ids: Vec<u64>) -> Self {
        self.lists.insert(endpoint.to_string(), ids);
        self
    }

    pub fn with_updates(mut self, updates: Value) -> Self {
        self.updates = updates;
        self
    }

    pub fn max_item_id(&self) -> u64 {
        self.max_item
            .or_else(|| self.items.keys().max().copied())
            .unwrap_or_default()
    }

    /// A small, internally consistent slice of Hacker News.
    pub fn sample() -> Self {
        Fixtures::default()
            .with_item(json!({
                "by": "example_user", "descendants": 2, "id": 8412605,
                "kids": [8412700, 8412650], "score": 42, "time": 1412190101,
                "title": "Example Title", "type": "story",
                "url": "https://example.com/post"
            }))
            .with_item(json!({
                "by": "norvig", "id": 8412700, "kids": [8412720], "parent": 8412605,
                "text": "Aw shucks, guys ... you make me blush with your compliments.",
                "time": 1412190300, "type": "comment"
            }))
            .with_item(json!({
                "by": "pg", "id": 8412720, "parent": 8412700,
                "text": "Thanks.", "time": 1412190400, "type": "comment"
            }))
            .with_item(json!({
                "deleted": true, "id": 8412650, "parent": 8412605,
                "time": 1412190250, "type": "comment"
            }))
            .with_item(json!({
                "by": "pg", "descendants": 54, "id": 126809,
                "parts": [126810, 126811], "score": 46,
                "text": "", "time": 1204403652,
                "title": "Poll: What would happen if News.YC had explicit support for polls?",
                "type": "poll"
            }))
            .with_item(json!({
                "by": "pg", "id": 126810, "poll": 126809, "score": 335,
                "text": "Yes, ban them; I'm tired of seeing Valleywag stories on News.YC.",
                "time": 1207886576, "type": "pollopt"
            }))
            .with_item(json!({
                "by": "pg", "id": 126811, "poll": 126809, "score": 12,
                "text": "No, leave them.", "time": 1207886576, "type": "pollopt"
            }))
            .with_item(json!({
                "by": "justin", "id": 192327, "score": 6,
                "text": "Justin.tv is the biggest live video site online.",
                "time": 1210981217, "title": "Justin.tv is looking for a Lead Flash Engineer!",
                "type": "job", "url": ""
            }))
            .with_user(json!({
                "about": "This is a test", "created": 1173923446, "id": "jl",
                "karma": 2937, "submitted": [8265435, 8168423, 8090946]
            }))
            .with_user(json!({
                "created": 1160418092, "id": "pg", "karma": 155111,
                "submitted": [8412720, 126809, 126810, 126811]
            }))
            .with_list("topstories", vec![8412605, 192327, 126809])
            .with_list("newstories", vec![8412605])
            .with_list("beststories", vec![126809, 8412605])
            .with_list("askstories", Vec::new())
            .with_list("showstories", Vec::new())
            .with_list("jobstories", vec![192327])
            .with_updates(json!({
                "items": [8412720, 8412700, 8412605],
                "profiles": ["pg", "jl"]
            }))
    }
}

pub type Db = Arc<Fixtures>;

pub fn app() -> Router {
    app_with(Fixtures::sample())
}

pub fn app_with(fixtures: Fixtures) -> Router {
    let db: Db = Arc::new(fixtures);
    Router::new()
        .route("/v0/item/{file}", get(get_item))
        .route("/v0/user/{file}", get(get_user))
        .route("/v0/{file}", get(get_index))
        .fallback(not_found)
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with(listener, Fixtures::sample()).await
}

pub async fn run_with(listener: TcpListener, fixtures: Fixtures) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(fixtures)).await
}

async fn not_found() -> Response {
    (StatusCode::NOT_FOUND, NOT_FOUND_BODY).into_response()
}

/// Strip the `.json` format suffix the API requires on every path.
fn resource(file: &str) -> Option<&str> {
    file.strip_suffix(".json")
}

async fn get_item(State(db): State<Db>, Path(file): Path<String>) -> Response {
    let Some(id) = resource(&file).and_then(|id| id.parse::<u64>().ok()) else {
        return not_found().await;
    };
    Json(db.items.get(&id).cloned().unwrap_or(Value::Null)).into_response()
}

async fn get_user(State(db): State<Db>, Path(file): Path<String>) -> Response {
    let Some(id) = resource(&file) else {
        return not_found().await;
    };
    Json(db.users.get(id).cloned().unwrap_or(Value::Null)).into_response()
}

async fn get_index(State(db): State<Db>, Path(file): Path<String>) -> Response {
    match resource(&file) {
        Some("maxitem") => Json(db.max_item_id()).into_response(),
        Some("updates") => Json(db.updates.clone()).into_response(),
        Some(list) => match db.lists.get(list) {
            Some(ids) => Json(ids.clone()).into_response(),
            None => not_found().await,
        },
        None => not_found().await,
    }
}
