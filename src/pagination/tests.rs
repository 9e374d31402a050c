//! Tests for the pagination controller

use super::*;
use crate::types::{FetchRequest, FetchResult};
use async_trait::async_trait;
use pretty_assertions::assert_eq;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Scripted fetcher: returns queued results and records requested pages
struct StubFetcher {
    script: Mutex<VecDeque<FetchResult>>,
    pages: Mutex<Vec<u32>>,
}

impl StubFetcher {
    fn new(results: Vec<FetchResult>) -> Self {
        Self {
            script: Mutex::new(results.into()),
            pages: Mutex::new(Vec::new()),
        }
    }

    fn requested_pages(&self) -> Vec<u32> {
        self.pages.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageFetcher for &StubFetcher {
    async fn fetch(&self, request: FetchRequest) -> FetchResult {
        self.pages
            .lock()
            .unwrap()
            .push(crate::types::coerce_page(&request.page));
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected fetch")
    }
}

fn config() -> ControllerConfig {
    ControllerConfig {
        nonce: "tok".to_string(),
        button_label: "Load More".to_string(),
        loading_text: "Loading...".to_string(),
        error_message: "Something went wrong. Please try again.".to_string(),
        extra: std::collections::HashMap::new(),
    }
}

fn success(html: &str) -> FetchResult {
    FetchResult::Success {
        html: html.to_string(),
    }
}

// ============================================================================
// Mounting
// ============================================================================

#[test]
fn test_state_from_markup() {
    let markup = r#"<button id="loadmore-btn" data-page="1" data-total-pages="3">Load More</button>"#;
    let state = PaginationState::from_markup(markup).unwrap();

    assert_eq!(state.current_page, 1);
    assert_eq!(state.total_pages, 3);
    assert!(!state.is_loading);
}

#[test]
fn test_state_from_markup_missing_attributes() {
    assert!(PaginationState::from_markup("<button>Load More</button>").is_none());
    assert!(PaginationState::from_markup("").is_none());
}

#[test]
fn test_state_from_markup_zero_total() {
    let markup = r#"<button data-page="1" data-total-pages="0"></button>"#;
    assert!(PaginationState::from_markup(markup).is_none());
}

#[tokio::test]
async fn test_activate_without_control_is_noop() {
    let fetcher = StubFetcher::new(vec![]);
    let mut controller = LoadMoreController::mount(config(), &fetcher, "<div></div>");

    assert_eq!(controller.activate().await, Activation::Ignored);
    assert!(controller.state().is_none());
    assert!(fetcher.requested_pages().is_empty());
}

// ============================================================================
// Success Path
// ============================================================================

#[tokio::test]
async fn test_success_advances_to_ready() {
    // currentPage=1, totalPages=3: one click appends and lands in Ready
    let fetcher = StubFetcher::new(vec![success("<a/><b/>")]);
    let mut controller =
        LoadMoreController::with_state(config(), &fetcher, PaginationState::new(1, 3));

    let outcome = controller.activate().await;

    assert_eq!(outcome, Activation::Settled(ControlPhase::Ready));
    assert_eq!(fetcher.requested_pages(), vec![2]);
    assert_eq!(controller.current_page(), Some(2));
    assert_eq!(controller.view().container_html, "<a/><b/>");
    assert_eq!(
        controller.view().control.as_ref().unwrap().label,
        "Load More"
    );
    assert!(!controller.view().control.as_ref().unwrap().disabled);
}

#[tokio::test]
async fn test_success_on_last_page_exhausts() {
    let fetcher = StubFetcher::new(vec![success("<z/>")]);
    let mut controller =
        LoadMoreController::with_state(config(), &fetcher, PaginationState::new(1, 2));

    let outcome = controller.activate().await;

    assert_eq!(outcome, Activation::Settled(ControlPhase::Exhausted));
    assert!(controller.view().control.is_none());
    assert!(controller.state().is_none());
    assert_eq!(controller.view().container_html, "<z/>");
}

#[tokio::test]
async fn test_overshoot_request_exhausts() {
    // currentPage already equals totalPages: the next page overshoots, and a
    // Success still terminates the control
    let fetcher = StubFetcher::new(vec![success("<tail/>")]);
    let mut controller =
        LoadMoreController::with_state(config(), &fetcher, PaginationState::new(2, 2));

    let outcome = controller.activate().await;

    assert_eq!(fetcher.requested_pages(), vec![3]);
    assert_eq!(outcome, Activation::Settled(ControlPhase::Exhausted));
}

#[tokio::test]
async fn test_walk_through_all_pages() {
    let fetcher = StubFetcher::new(vec![success("<p2/>"), success("<p3/>")]);
    let mut controller =
        LoadMoreController::with_state(config(), &fetcher, PaginationState::new(1, 3));

    assert_eq!(
        controller.activate().await,
        Activation::Settled(ControlPhase::Ready)
    );
    assert_eq!(
        controller.activate().await,
        Activation::Settled(ControlPhase::Exhausted)
    );
    assert_eq!(fetcher.requested_pages(), vec![2, 3]);
    assert_eq!(controller.view().container_html, "<p2/><p3/>");
}

// ============================================================================
// Empty (server-authoritative end-of-data)
// ============================================================================

#[tokio::test]
async fn test_empty_exhausts_despite_cached_total() {
    // Cached total says 5 pages remain; the server's Empty wins
    let fetcher = StubFetcher::new(vec![FetchResult::Empty {
        message: "No more posts found.".to_string(),
    }]);
    let mut controller =
        LoadMoreController::with_state(config(), &fetcher, PaginationState::new(1, 5));

    let outcome = controller.activate().await;

    assert_eq!(outcome, Activation::Settled(ControlPhase::Exhausted));
    assert!(controller.view().control.is_none());
    assert!(controller.view().notice.is_none(), "no notice on exhaustion");
    assert_eq!(controller.view().container_html, "");
}

// ============================================================================
// Failure (retryable)
// ============================================================================

#[tokio::test]
async fn test_failure_returns_to_ready_with_notice() {
    let fetcher = StubFetcher::new(vec![FetchResult::Failure {
        reason: "connection refused".to_string(),
    }]);
    let mut controller =
        LoadMoreController::with_state(config(), &fetcher, PaginationState::new(1, 3));

    let outcome = controller.activate().await;

    assert_eq!(outcome, Activation::Settled(ControlPhase::Ready));
    assert_eq!(controller.current_page(), Some(1), "page unchanged");
    assert_eq!(
        controller.view().notice.as_deref(),
        Some("Something went wrong. Please try again.")
    );
    let control = controller.view().control.as_ref().unwrap();
    assert_eq!(control.label, "Load More", "label restored");
    assert!(!control.disabled);
}

#[tokio::test]
async fn test_retry_after_failure_requests_same_page() {
    let fetcher = StubFetcher::new(vec![
        FetchResult::Failure {
            reason: "timeout".to_string(),
        },
        success("<ok/>"),
    ]);
    let mut controller =
        LoadMoreController::with_state(config(), &fetcher, PaginationState::new(1, 3));

    controller.activate().await;
    controller.activate().await;

    assert_eq!(fetcher.requested_pages(), vec![2, 2]);
    assert_eq!(controller.current_page(), Some(2));
    assert!(
        controller.view().notice.is_none(),
        "notice cleared by next success"
    );
}

// ============================================================================
// Guards
// ============================================================================

#[tokio::test]
async fn test_activation_ignored_while_loading() {
    let fetcher = StubFetcher::new(vec![]);
    let mut state = PaginationState::new(1, 3);
    state.is_loading = true;
    let mut controller = LoadMoreController::with_state(config(), &fetcher, state);

    assert_eq!(controller.activate().await, Activation::Ignored);
    assert!(fetcher.requested_pages().is_empty());
}

#[tokio::test]
async fn test_no_transition_leaves_exhausted() {
    let fetcher = StubFetcher::new(vec![success("<last/>")]);
    let mut controller =
        LoadMoreController::with_state(config(), &fetcher, PaginationState::new(1, 2));

    controller.activate().await;
    assert_eq!(controller.phase(), ControlPhase::Exhausted);

    assert_eq!(controller.activate().await, Activation::Ignored);
    assert_eq!(controller.phase(), ControlPhase::Exhausted);
    assert_eq!(fetcher.requested_pages(), vec![2]);
}

#[tokio::test]
async fn test_extra_params_fold_into_requests() {
    struct Capture(Mutex<Option<FetchRequest>>);

    #[async_trait]
    impl PageFetcher for &Capture {
        async fn fetch(&self, request: FetchRequest) -> FetchResult {
            *self.0.lock().unwrap() = Some(request);
            FetchResult::Empty {
                message: "No more posts found.".to_string(),
            }
        }
    }

    let mut cfg = config();
    cfg.extra
        .insert("category".to_string(), serde_json::json!("news"));
    let capture = Capture(Mutex::new(None));
    let mut controller =
        LoadMoreController::with_state(cfg, &capture, PaginationState::new(1, 2));

    controller.activate().await;

    let request = capture.0.lock().unwrap().take().unwrap();
    assert_eq!(request.extra.get("category"), Some(&serde_json::json!("news")));
    assert_eq!(request.nonce.as_deref(), Some("tok"));
}

// ============================================================================
// View helpers
// ============================================================================

#[test]
fn test_view_busy_and_ready() {
    let mut view = ListView::with_control("Load More");

    view.set_busy("Loading...");
    let control = view.control.as_ref().unwrap();
    assert_eq!(control.label, "Loading...");
    assert!(control.disabled);

    view.set_ready("Load More");
    let control = view.control.as_ref().unwrap();
    assert_eq!(control.label, "Load More");
    assert!(!control.disabled);
}

#[test]
fn test_control_phase_predicates() {
    assert!(ControlPhase::Idle.can_activate());
    assert!(ControlPhase::Ready.can_activate());
    assert!(!ControlPhase::Loading.can_activate());
    assert!(!ControlPhase::Exhausted.can_activate());
    assert!(ControlPhase::Exhausted.is_terminal());
}
