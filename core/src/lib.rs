//! Blocking client for the Hacker News Firebase API.
//!
//! # Overview
//! Fetches items, users and the index endpoints (story lists, max item id,
//! recent changes) and decodes them into typed values. Items are decoded once
//! into a generic [`Item`] record and then projected into [`Story`],
//! [`Comment`], [`Poll`], [`Part`] or [`Job`] after checking the `type`
//! discriminant.
//!
//! # Design
//! - `HnClient` is stateless; it holds configuration and a transport handle.
//! - Each endpoint is split into `build_*` (produces request) and `parse_*`
//!   (consumes response), composed by `get_*` around one `Transport` call.
//! - The default transport is a blocking `ureq` agent; any
//!   `Fn(&HttpRequest) -> Result<HttpResponse, ApiError>` can replace it.
//! - Nothing is retried, cached or suppressed; every error reaches the caller.

pub mod client;
pub mod error;
pub mod http;
pub mod item;
pub mod types;

pub use client::{ClientConfig, HnClient};
pub use error::ApiError;
pub use http::{HttpRequest, HttpResponse, Transport, UreqTransport};
pub use item::{Item, ItemKind};
pub use types::{Changes, Comment, Entity, Job, Part, Poll, Story, StoryList, User};
