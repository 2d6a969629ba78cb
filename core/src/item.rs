//! The generic item record and its per-kind projections.
//!
//! # Design
//! `/item/{id}` returns one of several shapes distinguished by the `type`
//! field. The body is decoded once into `Item`, an untyped field map, and then
//! projected into the requested fixed-shape type. The upstream service omits
//! absent fields instead of nulling them, so every accessor here is
//! defensive: a missing key, a `null`, or a value of the wrong JSON type
//! reads as the zero value rather than failing.

use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::ApiError;
use crate::types::{Comment, Entity, Job, Part, Poll, Story};

/// Value of an item's `type` field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Story,
    Comment,
    Poll,
    PollOpt,
    Job,
    /// A discriminant this client does not know, or none at all (`""`).
    Other(String),
}

impl ItemKind {
    pub fn as_str(&self) -> &str {
        match self {
            ItemKind::Story => "story",
            ItemKind::Comment => "comment",
            ItemKind::Poll => "poll",
            ItemKind::PollOpt => "pollopt",
            ItemKind::Job => "job",
            ItemKind::Other(raw) => raw,
        }
    }
}

impl From<&str> for ItemKind {
    fn from(raw: &str) -> Self {
        match raw {
            "story" => ItemKind::Story,
            "comment" => ItemKind::Comment,
            "poll" => ItemKind::Poll,
            "pollopt" => ItemKind::PollOpt,
            "job" => ItemKind::Job,
            other => ItemKind::Other(other.to_string()),
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A decoded `/item/{id}` body before projection.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Item {
    fields: Map<String, Value>,
}

impl From<Map<String, Value>> for Item {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

impl Item {
    /// Decode a response body. Anything but a JSON object is a decode error;
    /// an object with no recognizable fields is a valid, all-zero item.
    pub fn from_json(body: &str) -> Result<Self, ApiError> {
        match serde_json::from_str::<Value>(body) {
            Ok(Value::Object(fields)) => Ok(Self { fields }),
            Ok(other) => Err(ApiError::decode(
                format!("expected an item object, found {}", json_kind(&other)),
                body,
            )),
            Err(e) => Err(ApiError::decode(e, body)),
        }
    }

    /// Raw access to any field, including ones without an accessor.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn id(&self) -> u64 {
        self.uint("id")
    }

    /// The raw `type` discriminant, `""` when absent.
    pub fn kind_str(&self) -> &str {
        self.string("type")
    }

    pub fn kind(&self) -> ItemKind {
        ItemKind::from(self.kind_str())
    }

    pub fn by(&self) -> &str {
        self.string("by")
    }

    pub fn time(&self) -> i64 {
        self.int("time")
    }

    pub fn text(&self) -> &str {
        self.string("text")
    }

    pub fn parent(&self) -> u64 {
        self.uint("parent")
    }

    pub fn poll(&self) -> u64 {
        self.uint("poll")
    }

    pub fn kids(&self) -> Vec<u64> {
        self.ids("kids")
    }

    pub fn url(&self) -> &str {
        self.string("url")
    }

    pub fn score(&self) -> i64 {
        self.int("score")
    }

    pub fn title(&self) -> &str {
        self.string("title")
    }

    pub fn parts(&self) -> Vec<u64> {
        self.ids("parts")
    }

    pub fn descendants(&self) -> u64 {
        self.uint("descendants")
    }

    pub fn deleted(&self) -> bool {
        self.flag("deleted")
    }

    pub fn dead(&self) -> bool {
        self.flag("dead")
    }

    fn string(&self, key: &str) -> &str {
        self.fields.get(key).and_then(Value::as_str).unwrap_or_default()
    }

    fn int(&self, key: &str) -> i64 {
        self.fields.get(key).and_then(Value::as_i64).unwrap_or_default()
    }

    fn uint(&self, key: &str) -> u64 {
        self.fields.get(key).and_then(Value::as_u64).unwrap_or_default()
    }

    fn flag(&self, key: &str) -> bool {
        self.fields.get(key).and_then(Value::as_bool).unwrap_or_default()
    }

    // Non-integer entries are skipped; order is preserved.
    fn ids(&self, key: &str) -> Vec<u64> {
        match self.fields.get(key) {
            Some(Value::Array(values)) => values.iter().filter_map(Value::as_u64).collect(),
            _ => Vec::new(),
        }
    }
}

// Projections. Each is a pure read; the discriminant is checked by the caller.
impl Item {
    pub fn to_story(&self) -> Story {
        Story {
            by: self.by().to_string(),
            descendants: self.descendants(),
            id: self.id(),
            kids: self.kids(),
            score: self.score(),
            time: self.time(),
            title: self.title().to_string(),
            kind: self.kind_str().to_string(),
            url: self.url().to_string(),
        }
    }

    pub fn to_comment(&self) -> Comment {
        Comment {
            by: self.by().to_string(),
            id: self.id(),
            kids: self.kids(),
            parent: self.parent(),
            text: self.text().to_string(),
            time: self.time(),
            kind: self.kind_str().to_string(),
        }
    }

    pub fn to_poll(&self) -> Poll {
        Poll {
            by: self.by().to_string(),
            descendants: self.descendants(),
            id: self.id(),
            kids: self.kids(),
            parts: self.parts(),
            score: self.score(),
            text: self.text().to_string(),
            time: self.time(),
            title: self.title().to_string(),
            kind: self.kind_str().to_string(),
        }
    }

    pub fn to_part(&self) -> Part {
        Part {
            by: self.by().to_string(),
            id: self.id(),
            parent: self.parent(),
            poll: self.poll(),
            score: self.score(),
            text: self.text().to_string(),
            time: self.time(),
            kind: self.kind_str().to_string(),
        }
    }

    pub fn to_job(&self) -> Job {
        Job {
            by: self.by().to_string(),
            id: self.id(),
            score: self.score(),
            text: self.text().to_string(),
            time: self.time(),
            title: self.title().to_string(),
            kind: self.kind_str().to_string(),
            url: self.url().to_string(),
        }
    }

    /// Project into whichever variant the discriminant names. An unknown
    /// discriminant hands the item back unchanged.
    pub fn into_entity(self) -> Result<Entity, Item> {
        match self.kind() {
            ItemKind::Story => Ok(Entity::Story(self.to_story())),
            ItemKind::Comment => Ok(Entity::Comment(self.to_comment())),
            ItemKind::Poll => Ok(Entity::Poll(self.to_poll())),
            ItemKind::PollOpt => Ok(Entity::Part(self.to_part())),
            ItemKind::Job => Ok(Entity::Job(self.to_job())),
            ItemKind::Other(_) => Err(self),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
