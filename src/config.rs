//! Feed configuration
//!
//! A feed definition is a YAML document describing the listing: site
//! settings (page size, filter criteria, localized strings) and the post
//! corpus served by the in-memory store.

use crate::error::Result;
use crate::types::{Post, PostStatus, QueryCriteria};
use serde::{Deserialize, Serialize};
use std::path::Path;

// ============================================================================
// Feed Definition
// ============================================================================

/// Complete feed definition loaded from YAML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Listing title shown in the page shell
    pub title: String,

    /// Listing behavior settings
    #[serde(default)]
    pub settings: FeedSettings,

    /// Post corpus, in listing order
    #[serde(default)]
    pub posts: Vec<Post>,
}

impl FeedConfig {
    /// Filter criteria for the initial page load and every fetch
    pub fn criteria(&self) -> QueryCriteria {
        QueryCriteria {
            post_type: self.settings.post_type.clone(),
            status: self.settings.post_status,
            category: None,
        }
    }
}

/// Listing behavior settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedSettings {
    /// Posts per page (the host-configured default)
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Post type the listing shows
    #[serde(default = "default_post_type")]
    pub post_type: String,

    /// Status the listing shows
    #[serde(default)]
    pub post_status: PostStatus,

    /// Localized UI strings injected into the client bootstrap config
    #[serde(default)]
    pub strings: UiStrings,
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            post_type: default_post_type(),
            post_status: PostStatus::default(),
            strings: UiStrings::default(),
        }
    }
}

fn default_page_size() -> usize {
    5
}

fn default_post_type() -> String {
    "post".to_string()
}

/// Localized strings for the pagination control
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiStrings {
    /// Control label at rest
    #[serde(default = "default_button_label")]
    pub button_label: String,

    /// Control label while a request is in flight
    #[serde(default = "default_loading_text")]
    pub loading_text: String,

    /// Notice shown after a transport failure
    #[serde(default = "default_error_message")]
    pub error_message: String,
}

impl Default for UiStrings {
    fn default() -> Self {
        Self {
            button_label: default_button_label(),
            loading_text: default_loading_text(),
            error_message: default_error_message(),
        }
    }
}

fn default_button_label() -> String {
    "Load More".to_string()
}

fn default_loading_text() -> String {
    "Loading...".to_string()
}

fn default_error_message() -> String {
    "Something went wrong. Please try again.".to_string()
}

// ============================================================================
// Loading
// ============================================================================

/// Load a feed definition from a YAML file
pub fn load_feed(path: impl AsRef<Path>) -> Result<FeedConfig> {
    let content = std::fs::read_to_string(path)?;
    load_feed_from_str(&content)
}

/// Load a feed definition from a YAML string
pub fn load_feed_from_str(yaml: &str) -> Result<FeedConfig> {
    let config: FeedConfig = serde_yaml::from_str(yaml)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PostFormat;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_minimal_feed() {
        let yaml = r#"
title: "My Blog"
"#;
        let config = load_feed_from_str(yaml).unwrap();

        assert_eq!(config.title, "My Blog");
        assert_eq!(config.settings.page_size, 5);
        assert_eq!(config.settings.post_type, "post");
        assert_eq!(config.settings.strings.loading_text, "Loading...");
        assert!(config.posts.is_empty());
    }

    #[test]
    fn test_parse_full_feed() {
        let yaml = r#"
title: "News"
settings:
  page_size: 2
  post_type: post
  post_status: publish
  strings:
    button_label: "More news"
    loading_text: "Fetching..."
posts:
  - id: 1
    title: "First"
    excerpt: "Opening post"
    date: "2026-01-01"
    format: quote
    category: news
  - id: 2
    title: "Second"
    date: "2026-01-02"
"#;
        let config = load_feed_from_str(yaml).unwrap();

        assert_eq!(config.settings.page_size, 2);
        assert_eq!(config.settings.strings.button_label, "More news");
        // Unset strings keep their defaults
        assert_eq!(
            config.settings.strings.error_message,
            "Something went wrong. Please try again."
        );
        assert_eq!(config.posts.len(), 2);
        assert_eq!(config.posts[0].format, PostFormat::Quote);
        assert_eq!(config.posts[0].category.as_deref(), Some("news"));
    }

    #[test]
    fn test_criteria_from_settings() {
        let yaml = r#"
title: "Pages"
settings:
  post_type: page
  post_status: private
"#;
        let config = load_feed_from_str(yaml).unwrap();
        let criteria = config.criteria();

        assert_eq!(criteria.post_type, "page");
        assert_eq!(criteria.status, PostStatus::Private);
        assert!(criteria.category.is_none());
    }

    #[test]
    fn test_load_feed_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("feed.yaml");
        std::fs::write(&path, "title: \"From disk\"\n").unwrap();

        let config = load_feed(&path).unwrap();
        assert_eq!(config.title, "From disk");
    }

    #[test]
    fn test_load_feed_missing_file() {
        let result = load_feed("/nonexistent/feed.yaml");
        assert!(result.is_err());
    }
}
