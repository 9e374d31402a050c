//! Post rendering
//!
//! Renders posts into HTML fragments through format-aware templates with
//! `{{ var }}` interpolation, and assembles the initial listing shell that
//! embeds the pagination attributes and client bootstrap config.

use crate::error::{Error, Result};
use crate::types::{FetchResult, Post, PostFormat, NO_MORE_POSTS_MESSAGE};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::LazyLock;

/// Regex for matching template variables: {{ variable }}
static TEMPLATE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{\s*([a-zA-Z_][a-zA-Z0-9_]*)\s*\}\}").unwrap());

/// Container element id the client appends fragments into
pub const CONTAINER_ID: &str = "loadmore-posts-container";

/// Pagination control element id
pub const CONTROL_ID: &str = "loadmore-btn";

/// Bootstrap config element id
pub const CONFIG_ID: &str = "loadmore-config";

// ============================================================================
// Built-in Templates
// ============================================================================

const STANDARD_TEMPLATE: &str = r#"<article class="post format-standard" data-post-id="{{ id }}"><h2>{{ title }}</h2><time datetime="{{ date }}">{{ date }}</time><p>{{ excerpt }}</p></article>"#;

const GALLERY_TEMPLATE: &str = r#"<article class="post format-gallery" data-post-id="{{ id }}"><h2>{{ title }}</h2><div class="gallery-strip" aria-label="{{ title }}"></div><p>{{ excerpt }}</p></article>"#;

const QUOTE_TEMPLATE: &str = r#"<article class="post format-quote" data-post-id="{{ id }}"><blockquote><p>{{ excerpt }}</p><cite>{{ title }}</cite></blockquote></article>"#;

const LINK_TEMPLATE: &str = r##"<article class="post format-link" data-post-id="{{ id }}"><h2><a href="#post-{{ id }}" rel="bookmark">{{ title }}</a></h2></article>"##;

const VIDEO_TEMPLATE: &str = r#"<article class="post format-video" data-post-id="{{ id }}"><h2>{{ title }}</h2><figure class="video-frame" data-post-id="{{ id }}"></figure><p>{{ excerpt }}</p></article>"#;

// ============================================================================
// Post Renderer
// ============================================================================

/// Format-aware renderer for post fragments
#[derive(Debug, Clone)]
pub struct PostRenderer {
    templates: HashMap<PostFormat, String>,
}

impl Default for PostRenderer {
    fn default() -> Self {
        let mut templates = HashMap::new();
        templates.insert(PostFormat::Standard, STANDARD_TEMPLATE.to_string());
        templates.insert(PostFormat::Gallery, GALLERY_TEMPLATE.to_string());
        templates.insert(PostFormat::Quote, QUOTE_TEMPLATE.to_string());
        templates.insert(PostFormat::Link, LINK_TEMPLATE.to_string());
        templates.insert(PostFormat::Video, VIDEO_TEMPLATE.to_string());
        Self { templates }
    }
}

impl PostRenderer {
    /// Create a renderer with the built-in templates
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the template for one format
    #[must_use]
    pub fn with_template(mut self, format: PostFormat, template: impl Into<String>) -> Self {
        self.templates.insert(format, template.into());
        self
    }

    /// Render one post through its format template
    ///
    /// Falls back to the standard template when a format has no template of
    /// its own, mirroring how themes fall back to the plain content part.
    pub fn render_post(&self, post: &Post) -> Result<String> {
        let template = self
            .templates
            .get(&post.format)
            .or_else(|| self.templates.get(&PostFormat::Standard))
            .ok_or_else(|| Error::MissingTemplate {
                format: post.format.as_str().to_string(),
            })?;

        let vars = post_vars(post);
        interpolate(template, &vars)
    }

    /// Render one page of posts into a concatenated fragment
    ///
    /// An empty slice always yields `Empty` with the fixed end-of-data
    /// message, regardless of any prior state.
    pub fn render_page(&self, posts: &[Post]) -> Result<FetchResult> {
        if posts.is_empty() {
            return Ok(FetchResult::Empty {
                message: NO_MORE_POSTS_MESSAGE.to_string(),
            });
        }

        let mut html = String::new();
        for post in posts {
            html.push_str(&self.render_post(post)?);
            html.push('\n');
        }

        Ok(FetchResult::Success { html })
    }
}

/// Template variables for a post
fn post_vars(post: &Post) -> HashMap<&'static str, String> {
    let mut vars = HashMap::new();
    vars.insert("id", post.id.to_string());
    vars.insert("title", escape_html(&post.title));
    vars.insert("excerpt", escape_html(&post.excerpt));
    vars.insert("date", post.date.to_string());
    vars.insert(
        "category",
        escape_html(post.category.as_deref().unwrap_or("")),
    );
    vars
}

/// Substitute `{{ var }}` occurrences, failing on undefined variables
fn interpolate(template: &str, vars: &HashMap<&'static str, String>) -> Result<String> {
    let mut result = template.to_string();
    let mut missing = Vec::new();

    for cap in TEMPLATE_REGEX.captures_iter(template) {
        let full_match = cap.get(0).unwrap().as_str();
        let name = cap.get(1).unwrap().as_str();

        match vars.get(name) {
            Some(value) => {
                result = result.replace(full_match, value);
            }
            None => missing.push(name.to_string()),
        }
    }

    if missing.is_empty() {
        Ok(result)
    } else {
        Err(Error::undefined_var(missing.join(", ")))
    }
}

/// Escape a string for safe HTML interpolation
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

// ============================================================================
// Listing Shell
// ============================================================================

/// Configuration injected into the initial page for the client controller
///
/// The explicit replacement for a page-global script object: the controller
/// receives this at construction instead of reading ambient globals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BootstrapConfig {
    /// Absolute or root-relative URL of the load-more endpoint
    pub endpoint: String,
    /// Security token for fetch requests from this page
    pub nonce: String,
    /// Control label while a request is in flight
    pub loading_text: String,
    /// Notice shown after a transport failure
    pub error_message: String,
}

impl BootstrapConfig {
    /// Extract the bootstrap config embedded in a listing page
    pub fn from_markup(markup: &str) -> Result<Self> {
        static CONFIG_REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r#"(?s)<script type="application/json" id="loadmore-config">(.*?)</script>"#)
                .unwrap()
        });

        let raw = CONFIG_REGEX
            .captures(markup)
            .and_then(|cap| cap.get(1))
            .ok_or_else(|| Error::config("listing page has no bootstrap config"))?;

        Ok(serde_json::from_str(raw.as_str())?)
    }
}

/// Render the initial listing page
///
/// Page 1 is rendered through the same templates as every fetched page. The
/// pagination control carries `data-page` and `data-total-pages` attributes
/// and is omitted entirely when one page (or none) exists, so the client
/// never mounts a dead control.
pub fn render_listing_page(
    title: &str,
    first_page_html: &str,
    total_pages: u32,
    button_label: &str,
    bootstrap: &BootstrapConfig,
) -> Result<String> {
    let mut page = String::new();
    page.push_str("<!doctype html>\n<html>\n<head><meta charset=\"utf-8\"><title>");
    page.push_str(&escape_html(title));
    page.push_str("</title></head>\n<body>\n<h1>");
    page.push_str(&escape_html(title));
    page.push_str("</h1>\n<div id=\"");
    page.push_str(CONTAINER_ID);
    page.push_str("\">\n");
    page.push_str(first_page_html);
    page.push_str("</div>\n");

    if total_pages > 1 {
        page.push_str(&format!(
            "<button id=\"{CONTROL_ID}\" data-page=\"1\" data-total-pages=\"{total_pages}\">{}</button>\n",
            escape_html(button_label)
        ));
        page.push_str(&format!(
            "<script type=\"application/json\" id=\"{CONFIG_ID}\">{}</script>\n",
            serde_json::to_string(bootstrap)?
        ));
    }

    page.push_str("</body>\n</html>\n");
    Ok(page)
}
