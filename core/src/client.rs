//! Blocking client for the Hacker News Firebase API.
//!
//! # Design
//! `HnClient` holds only immutable configuration and a transport handle, so a
//! shared `&HnClient` can serve any number of threads when the transport is
//! `Sync`. Each endpoint is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`; the
//! `get_*` methods compose the two around a single `Transport::execute` call.
//! Callers that want to run the I/O themselves can use the halves directly.

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::{excerpt, ApiError};
use crate::http::{HttpRequest, HttpResponse, Transport, UreqTransport};
use crate::item::{Item, ItemKind};
use crate::types::{Changes, Comment, Entity, Job, Part, Poll, Story, StoryList, User};

/// Body some upstream proxies send with a 404, occasionally with status 200.
const NOT_FOUND_BODY: &str = "404 page not found";

/// Where requests are sent. URLs are `{base_uri}/{version}/{path}{suffix}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_uri: String,
    pub version: String,
    pub suffix: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_uri: "https://hacker-news.firebaseio.com/".to_string(),
            version: "v0".to_string(),
            suffix: ".json".to_string(),
        }
    }
}

impl ClientConfig {
    pub fn with_base_uri(mut self, base_uri: impl Into<String>) -> Self {
        self.base_uri = base_uri.into();
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }
}

/// Synchronous, stateless client for the Hacker News API.
#[derive(Debug, Clone)]
pub struct HnClient<T = UreqTransport> {
    config: ClientConfig,
    transport: T,
}

impl HnClient<UreqTransport> {
    /// Client for the public API over a default ureq agent.
    pub fn new() -> Self {
        Self::with_transport(ClientConfig::default(), UreqTransport::default())
    }
}

impl Default for HnClient<UreqTransport> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Transport> HnClient<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn endpoint(&self, path: &str) -> String {
        let base = self.config.base_uri.trim_end_matches('/');
        let version = self.config.version.trim_matches('/');
        let suffix = &self.config.suffix;
        if version.is_empty() {
            format!("{base}/{path}{suffix}")
        } else {
            format!("{base}/{version}/{path}{suffix}")
        }
    }

    fn get(&self, path: &str) -> HttpRequest {
        HttpRequest {
            url: self.endpoint(path),
            headers: vec![("accept".to_string(), "application/json".to_string())],
        }
    }

    pub fn build_item(&self, id: u64) -> HttpRequest {
        self.get(&format!("item/{id}"))
    }

    /// User ids are spliced into the path, so only the characters Hacker
    /// News allows in user names are accepted.
    pub fn build_user(&self, id: &str) -> Result<HttpRequest, ApiError> {
        if !is_user_id(id) {
            return Err(ApiError::InvalidUserId(id.to_string()));
        }
        Ok(self.get(&format!("user/{id}")))
    }

    pub fn build_story_ids(&self, list: StoryList) -> HttpRequest {
        self.get(list.endpoint())
    }

    pub fn build_max_item(&self) -> HttpRequest {
        self.get("maxitem")
    }

    pub fn build_changes(&self) -> HttpRequest {
        self.get("updates")
    }

    /// Decode an `/item` response into the generic record.
    pub fn parse_item(&self, response: HttpResponse) -> Result<Item, ApiError> {
        check_status(&response)?;
        if response.body == NOT_FOUND_BODY {
            return Err(ApiError::NotFound);
        }
        reject_null(&response.body)?;
        Item::from_json(&response.body)
    }

    pub fn parse_user(&self, response: HttpResponse) -> Result<User, ApiError> {
        decode(&response)
    }

    pub fn parse_story_ids(&self, response: HttpResponse) -> Result<Vec<u64>, ApiError> {
        decode(&response)
    }

    pub fn parse_max_item_id(&self, response: HttpResponse) -> Result<u64, ApiError> {
        decode(&response)
    }

    pub fn parse_changes(&self, response: HttpResponse) -> Result<Changes, ApiError> {
        decode(&response)
    }

    fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(url = %request.url, "sending request");
        self.transport.execute(&request)
    }

    /// Fetch an item without checking its kind.
    pub fn fetch_item(&self, id: u64) -> Result<Item, ApiError> {
        let response = self.send(self.build_item(id))?;
        self.parse_item(response)
    }

    fn fetch_kind<E>(
        &self,
        id: u64,
        operation: &'static str,
        expected: ItemKind,
        project: fn(&Item) -> E,
    ) -> Result<E, ApiError> {
        let item = self.fetch_item(id)?;
        if item.kind() != expected {
            warn!(id, operation, actual = item.kind_str(), "item type mismatch");
            return Err(ApiError::TypeMismatch {
                id,
                operation,
                actual: item.kind_str().to_string(),
            });
        }
        Ok(project(&item))
    }

    pub fn get_story(&self, id: u64) -> Result<Story, ApiError> {
        self.fetch_kind(id, "get_story", ItemKind::Story, Item::to_story)
    }

    pub fn get_comment(&self, id: u64) -> Result<Comment, ApiError> {
        self.fetch_kind(id, "get_comment", ItemKind::Comment, Item::to_comment)
    }

    pub fn get_poll(&self, id: u64) -> Result<Poll, ApiError> {
        self.fetch_kind(id, "get_poll", ItemKind::Poll, Item::to_poll)
    }

    /// Fetch a poll option.
    pub fn get_part(&self, id: u64) -> Result<Part, ApiError> {
        self.fetch_kind(id, "get_part", ItemKind::PollOpt, Item::to_part)
    }

    pub fn get_job(&self, id: u64) -> Result<Job, ApiError> {
        self.fetch_kind(id, "get_job", ItemKind::Job, Item::to_job)
    }

    /// Fetch an item of any known kind.
    pub fn get_entity(&self, id: u64) -> Result<Entity, ApiError> {
        self.fetch_item(id)?.into_entity().map_err(|item| {
            warn!(id, actual = item.kind_str(), "unknown item type");
            ApiError::TypeMismatch {
                id,
                operation: "get_entity",
                actual: item.kind_str().to_string(),
            }
        })
    }

    /// Fetch a user profile. Unknown ids fail with `NotFound`.
    pub fn get_user(&self, id: &str) -> Result<User, ApiError> {
        let response = self.send(self.build_user(id)?)?;
        self.parse_user(response)
    }

    pub fn get_story_ids(&self, list: StoryList) -> Result<Vec<u64>, ApiError> {
        let response = self.send(self.build_story_ids(list))?;
        self.parse_story_ids(response)
    }

    pub fn get_top_stories(&self) -> Result<Vec<u64>, ApiError> {
        self.get_story_ids(StoryList::Top)
    }

    pub fn get_max_item_id(&self) -> Result<u64, ApiError> {
        let response = self.send(self.build_max_item())?;
        self.parse_max_item_id(response)
    }

    /// Resolve the current largest item id, then fetch that item.
    pub fn get_max_item(&self) -> Result<Item, ApiError> {
        let id = self.get_max_item_id()?;
        self.fetch_item(id)
    }

    pub fn get_changes(&self) -> Result<Changes, ApiError> {
        let response = self.send(self.build_changes())?;
        self.parse_changes(response)
    }
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if (200..300).contains(&response.status) {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: excerpt(&response.body),
    })
}

fn is_user_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

/// The API answers `null` for ids that do not exist.
fn reject_null(body: &str) -> Result<(), ApiError> {
    if body.trim() == "null" {
        return Err(ApiError::NotFound);
    }
    Ok(())
}

fn decode<D: DeserializeOwned>(response: &HttpResponse) -> Result<D, ApiError> {
    check_status(response)?;
    reject_null(&response.body)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::decode(e, &response.body))
}
