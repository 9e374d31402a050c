// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # loadmore
//!
//! Incremental "load more" pagination for post listings: a typed client-side
//! controller, an HTTP fetch endpoint, and format-aware post rendering.
//!
//! ## Features
//!
//! - **Pagination Controller**: Explicit Idle/Loading/Ready/Exhausted state
//!   machine with a reentrancy guard and retryable failures
//! - **Fetch Endpoint**: Token-checked JSON endpoint returning rendered
//!   markup fragments in a `{success, data}` envelope
//! - **Post Rendering**: Per-format templates with `{{ var }}` interpolation
//!   and HTML escaping
//! - **Feed Configuration**: YAML feed definitions with page size, filter
//!   criteria, and UI strings
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use loadmore::config::load_feed;
//! use loadmore::server::{serve, ServerConfig};
//!
//! #[tokio::main]
//! async fn main() -> loadmore::Result<()> {
//!     let config = ServerConfig {
//!         feed: load_feed("feeds/demo.yaml")?,
//!         secret: "change-me".to_string(),
//!     };
//!     serve(config, 8080).await
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                 LoadMoreController (client)              │
//! │  activate() → dispatch → PageFetcher → settle → ListView │
//! └────────────────────────────┬─────────────────────────────┘
//!                              │ POST {action, nonce, page}
//! ┌────────────────────────────┴─────────────────────────────┐
//! │                    load-more endpoint                    │
//! │  verify token → query store → render page → envelope     │
//! └──────────────────────────────────────────────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Security token issuing and verification
pub mod token;

/// Feed configuration
pub mod config;

/// Post data sources
pub mod store;

/// Format-aware post and page rendering
pub mod render;

/// Client-side pagination controller
pub mod pagination;

/// HTTP page fetcher
pub mod http;

/// Listing server and fetch endpoint
pub mod server;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

pub use config::{load_feed, load_feed_from_str, FeedConfig};
pub use pagination::{LoadMoreController, PageFetcher, PaginationState};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
