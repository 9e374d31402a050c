//! HTTP server for the listing page and the load-more endpoint
//!
//! `GET /` renders the initial listing (page 1 plus the pagination control);
//! `POST /load-more` is the fetch endpoint the client controller posts to.
//! Every fetch response is a `{success, data}` envelope, and the status code
//! carries the classification: 403 for a failed security check, 400 for an
//! unknown action, 500 for a render failure, and 200 for both fragments and
//! the end-of-data signal.

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, warn};

use crate::config::{FeedConfig, UiStrings};
use crate::error::{Error, Result};
use crate::render::{render_listing_page, BootstrapConfig, PostRenderer};
use crate::store::{MemoryStore, PostStore};
use crate::token::NonceService;
use crate::types::{coerce_page, Envelope, FetchRequest, FetchResult, QueryCriteria};
use crate::types::{LOAD_MORE_ACTION, NO_MORE_POSTS_MESSAGE};

/// Message returned when the security token is missing or invalid
pub const SECURITY_FAILED_MESSAGE: &str = "Security check failed.";

/// Message returned when rendering fails; details stay in the server log
pub const RENDER_FAILED_MESSAGE: &str = "Could not render posts.";

/// Path of the fetch endpoint
pub const FETCH_PATH: &str = "/load-more";

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// The feed to serve
    pub feed: FeedConfig,
    /// Secret for issuing and verifying security tokens
    pub secret: String,
}

/// App state shared across handlers
pub struct AppState {
    store: Arc<dyn PostStore>,
    renderer: PostRenderer,
    nonces: NonceService,
    criteria: QueryCriteria,
    page_size: usize,
    strings: UiStrings,
    title: String,
}

impl AppState {
    /// Build app state from a feed config
    pub fn from_config(config: ServerConfig) -> Self {
        let criteria = config.feed.criteria();
        Self {
            store: Arc::new(MemoryStore::new(config.feed.posts)),
            renderer: PostRenderer::new(),
            nonces: NonceService::new(&config.secret),
            criteria,
            page_size: config.feed.settings.page_size,
            strings: config.feed.settings.strings,
            title: config.feed.title,
        }
    }

    /// Replace the post store, keeping the rest of the state
    pub fn with_store(mut self, store: Arc<dyn PostStore>) -> Self {
        self.store = store;
        self
    }

    /// Replace the renderer, keeping the rest of the state
    pub fn with_renderer(mut self, renderer: PostRenderer) -> Self {
        self.renderer = renderer;
        self
    }
}

/// Build the application router
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(listing))
        .route(FETCH_PATH, post(load_more))
        .route("/health", get(health))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP server
pub async fn serve(config: ServerConfig, port: u16) -> Result<()> {
    let state = Arc::new(AppState::from_config(config));
    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Starting HTTP server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| Error::config(format!("Failed to bind to port {port}: {e}")))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| Error::config(format!("Server error: {e}")))?;

    Ok(())
}

/// Health check endpoint
async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// Render the initial listing page
async fn listing(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match render_listing(&state).await {
        Ok(page) => Html(page).into_response(),
        Err(e) => {
            warn!(error = %e, "failed to render listing page");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html("<h1>Internal server error</h1>".to_string()),
            )
                .into_response()
        }
    }
}

async fn render_listing(state: &AppState) -> Result<String> {
    let first = state
        .store
        .query(&state.criteria, 1, state.page_size)
        .await?;

    let first_page_html = match state.renderer.render_page(&first.posts)? {
        FetchResult::Success { html } => html,
        _ => String::new(),
    };

    let bootstrap = BootstrapConfig {
        endpoint: FETCH_PATH.to_string(),
        nonce: state.nonces.issue()?,
        loading_text: state.strings.loading_text.clone(),
        error_message: state.strings.error_message.clone(),
    };

    render_listing_page(
        &state.title,
        &first_page_html,
        first.total_pages,
        &state.strings.button_label,
        &bootstrap,
    )
}

/// Handle one page fetch
async fn load_more(
    State(state): State<Arc<AppState>>,
    Json(req): Json<FetchRequest>,
) -> impl IntoResponse {
    if req.action != LOAD_MORE_ACTION {
        let err = Error::UnknownAction { action: req.action };
        debug!(error = %err, "rejected fetch");
        return (
            StatusCode::BAD_REQUEST,
            Json(Envelope::message(err.to_string())),
        );
    }

    // The token gate comes before any query work
    let token = req.nonce.as_deref().unwrap_or_default();
    if let Err(e) = state.nonces.verify(token) {
        debug!(error = %e, "security check failed");
        return (
            StatusCode::FORBIDDEN,
            Json(Envelope::message(SECURITY_FAILED_MESSAGE)),
        );
    }

    let page = coerce_page(&req.page);
    let criteria = criteria_for(&state, &req);

    let result = state
        .store
        .query(&criteria, page, state.page_size)
        .await
        .and_then(|page| state.renderer.render_page(&page.posts));

    match result {
        Ok(FetchResult::Success { html }) => (StatusCode::OK, Json(Envelope::html(html))),
        Ok(_) => (
            StatusCode::OK,
            Json(Envelope::message(NO_MORE_POSTS_MESSAGE)),
        ),
        Err(e) => {
            warn!(error = %e, page, "failed to render page");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(Envelope::message(RENDER_FAILED_MESSAGE)),
            )
        }
    }
}

/// Fold recognized extra request fields into the feed's query criteria
fn criteria_for(state: &AppState, req: &FetchRequest) -> QueryCriteria {
    let mut criteria = state.criteria.clone();
    if let Some(category) = req.extra.get("category").and_then(|v| v.as_str()) {
        criteria = criteria.with_category(category);
    }
    criteria
}
