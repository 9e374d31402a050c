//! Common types used throughout the load-more kit
//!
//! This module contains the domain model for posts, the query criteria the
//! fetch handler resolves against, and the wire types shared by the client
//! controller and the server handler.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Fixed action identifier carried in every fetch request
pub const LOAD_MORE_ACTION: &str = "load_more_posts";

/// Authoritative end-of-data message returned for an empty page
pub const NO_MORE_POSTS_MESSAGE: &str = "No more posts found.";

// ============================================================================
// Post Model
// ============================================================================

/// Post format, selecting which template renders the post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostFormat {
    /// Default layout
    #[default]
    Standard,
    /// Image gallery layout
    Gallery,
    /// Pull-quote layout
    Quote,
    /// External link layout
    Link,
    /// Embedded video layout
    Video,
}

impl PostFormat {
    /// Template key for this format
    pub fn as_str(&self) -> &'static str {
        match self {
            PostFormat::Standard => "standard",
            PostFormat::Gallery => "gallery",
            PostFormat::Quote => "quote",
            PostFormat::Link => "link",
            PostFormat::Video => "video",
        }
    }
}

/// Publication status of a post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostStatus {
    /// Publicly visible
    #[default]
    Publish,
    /// Not yet published
    Draft,
    /// Visible to authors only
    Private,
}

/// A single post in the listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    /// Unique post id
    pub id: u64,

    /// Post title
    pub title: String,

    /// Short excerpt shown in the listing
    #[serde(default)]
    pub excerpt: String,

    /// Publication date (ISO 8601 date)
    pub date: chrono::NaiveDate,

    /// Post format (selects the template)
    #[serde(default)]
    pub format: PostFormat,

    /// Publication status
    #[serde(default)]
    pub status: PostStatus,

    /// Post type (e.g. "post", "page")
    #[serde(default = "default_post_type")]
    pub post_type: String,

    /// Optional category slug
    #[serde(default)]
    pub category: Option<String>,
}

fn default_post_type() -> String {
    "post".to_string()
}

// ============================================================================
// Query Types
// ============================================================================

/// Filter criteria for a page query
///
/// The fetch handler uses the same criteria as the initial page load so that
/// appended pages continue the listing seamlessly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryCriteria {
    /// Post type to match
    pub post_type: String,
    /// Status to match
    pub status: PostStatus,
    /// Optional category narrowing
    pub category: Option<String>,
}

impl Default for QueryCriteria {
    fn default() -> Self {
        Self {
            post_type: default_post_type(),
            status: PostStatus::Publish,
            category: None,
        }
    }
}

impl QueryCriteria {
    /// Narrow the criteria to a category
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

/// One page of query results with listing totals
#[derive(Debug, Clone)]
pub struct PostPage {
    /// Posts on this page, in listing order
    pub posts: Vec<Post>,
    /// Total matching posts across all pages
    pub total_posts: usize,
    /// Total page count at the configured page size
    pub total_pages: u32,
    /// Whether pages exist beyond this one
    pub has_more: bool,
}

// ============================================================================
// Wire Types
// ============================================================================

/// Request body posted to the load-more endpoint
///
/// `page` stays a raw JSON value so the server can coerce it the same way
/// for numbers, numeric strings, and garbage alike. Unknown fields are
/// collected into `extra` and folded into the query criteria.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchRequest {
    /// Action identifier, must equal [`LOAD_MORE_ACTION`]
    pub action: String,

    /// Opaque security token issued with the initial page
    #[serde(default)]
    pub nonce: Option<String>,

    /// Requested page number (coerced server-side)
    #[serde(default)]
    pub page: Value,

    /// Extra filter fields (e.g. `category`)
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl FetchRequest {
    /// Create a request for the given page
    pub fn new(nonce: impl Into<String>, page: u32) -> Self {
        Self {
            action: LOAD_MORE_ACTION.to_string(),
            nonce: Some(nonce.into()),
            page: Value::from(page),
            extra: HashMap::new(),
        }
    }

    /// Add an extra filter field
    #[must_use]
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// Coerce a JSON value to a positive page number
///
/// Accepts positive integers and numeric strings; anything else, including
/// zero, negatives, and fractions, falls back to page 1. Oversized numbers
/// saturate so they resolve past the end of the listing rather than
/// wrapping back to page 1.
pub fn coerce_page(value: &Value) -> u32 {
    let page = match value {
        Value::Number(n) => n.as_u64().unwrap_or(0),
        Value::String(s) => s.trim().parse::<u64>().unwrap_or(0),
        _ => 0,
    };
    u32::try_from(page).unwrap_or(u32::MAX).max(1)
}

/// Settled outcome of one page fetch
///
/// The tagged variant the controller acts on. `Empty` is the authoritative
/// end-of-data signal regardless of any page count the client has cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchResult {
    /// A rendered fragment to append
    Success {
        /// Markup for one page of posts, no surrounding shell
        html: String,
    },
    /// No more posts exist server-side
    Empty {
        /// Diagnostic message, not shown to the user
        message: String,
    },
    /// Transport or server failure; the request may be retried
    Failure {
        /// Human-readable reason
        reason: String,
    },
}

impl FetchResult {
    /// Check if this is a success result
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Check if this is the end-of-data result
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty { .. })
    }

    /// Check if this is a failure result
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure { .. })
    }
}

/// JSON response envelope for the load-more endpoint
///
/// `{ "success": true, "data": { "html": … } }` on success,
/// `{ "success": false, "data": { "message": … } }` otherwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope {
    /// Whether the request produced a fragment
    pub success: bool,
    /// Payload
    pub data: EnvelopeData,
}

/// Payload of a response envelope
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnvelopeData {
    /// Rendered markup fragment (success only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,

    /// Human-readable reason (failure and end-of-data only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Envelope {
    /// Success envelope carrying a markup fragment
    pub fn html(html: impl Into<String>) -> Self {
        Self {
            success: true,
            data: EnvelopeData {
                html: Some(html.into()),
                message: None,
            },
        }
    }

    /// Error envelope carrying a message
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: EnvelopeData {
                html: None,
                message: Some(message.into()),
            },
        }
    }
}
