//! HTTP page fetcher
//!
//! The wire-level [`PageFetcher`](crate::pagination::PageFetcher)
//! implementation. Posts fetch requests as JSON to the server endpoint and
//! classifies the response envelope into a settled
//! [`FetchResult`](crate::types::FetchResult).

mod client;

pub use client::{FetchClient, FetchClientConfig};

#[cfg(test)]
mod tests;
