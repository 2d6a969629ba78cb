//! Domain DTOs for the Hacker News API.
//!
//! # Design
//! `Story`, `Comment`, `Poll`, `Part` and `Job` are fixed-shape projections of
//! the generic `Item` record (see `item.rs`); they are never decoded from JSON
//! by the client directly. `User` and `Changes` have their own shapes and are
//! decoded straight from their endpoints. Every type implements `Default`,
//! which is its zero value, and round-trips through serde so callers can
//! re-encode what they fetched.

use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Story {
    pub by: String,
    pub descendants: u64,
    pub id: u64,
    pub kids: Vec<u64>,
    pub score: i64,
    pub time: i64,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Comment {
    pub by: String,
    pub id: u64,
    pub kids: Vec<u64>,
    pub parent: u64,
    pub text: String,
    pub time: i64,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Poll {
    pub by: String,
    pub descendants: u64,
    pub id: u64,
    pub kids: Vec<u64>,
    pub parts: Vec<u64>,
    pub score: i64,
    pub text: String,
    pub time: i64,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// A poll option (`pollopt`).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Part {
    pub by: String,
    pub id: u64,
    pub parent: u64,
    pub poll: u64,
    pub score: i64,
    pub text: String,
    pub time: i64,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Job {
    pub by: String,
    pub id: u64,
    pub score: i64,
    pub text: String,
    pub time: i64,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
}

/// An item resolved to whichever concrete kind its discriminant names.
///
/// Each variant already carries its `type` field, so it serializes untagged.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Entity {
    Story(Story),
    Comment(Comment),
    Poll(Poll),
    Part(Part),
    Job(Job),
}

impl Entity {
    pub fn id(&self) -> u64 {
        match self {
            Entity::Story(s) => s.id,
            Entity::Comment(c) => c.id,
            Entity::Poll(p) => p.id,
            Entity::Part(p) => p.id,
            Entity::Job(j) => j.id,
        }
    }
}

/// A user profile from `/user/{id}`. Absent or `null` fields decode to zero
/// values.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct User {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub about: String,
    #[serde(deserialize_with = "null_as_default")]
    pub created: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub karma: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub submitted: Vec<u64>,
}

/// Recently changed items and profiles from `/updates`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Changes {
    #[serde(deserialize_with = "null_as_default")]
    pub items: Vec<u64>,
    #[serde(deserialize_with = "null_as_default")]
    pub profiles: Vec<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// The story id lists published by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoryList {
    Top,
    New,
    Best,
    Ask,
    Show,
    Job,
}

impl StoryList {
    pub const ALL: [StoryList; 6] = [
        StoryList::Top,
        StoryList::New,
        StoryList::Best,
        StoryList::Ask,
        StoryList::Show,
        StoryList::Job,
    ];

    /// Endpoint path segment, without leading slash or suffix.
    pub fn endpoint(self) -> &'static str {
        match self {
            StoryList::Top => "topstories",
            StoryList::New => "newstories",
            StoryList::Best => "beststories",
            StoryList::Ask => "askstories",
            StoryList::Show => "showstories",
            StoryList::Job => "jobstories",
        }
    }
}
