//! Load-more controller
//!
//! Owns the pagination state, drives the request/response cycle through a
//! [`PageFetcher`], and reflects every settled outcome in the view.

use super::types::{ControlPhase, ListView, PaginationState};
use crate::render::BootstrapConfig;
use crate::types::{FetchRequest, FetchResult};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

/// Issues one page fetch and returns its settled outcome
///
/// Implementations fold transport errors into `FetchResult::Failure`; the
/// controller never sees an unsettled request.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch one page
    async fn fetch(&self, request: FetchRequest) -> FetchResult;
}

/// Explicit controller configuration
///
/// Passed in at construction; the controller performs no ambient lookup.
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Security token sent with every request
    pub nonce: String,
    /// Control label at rest
    pub button_label: String,
    /// Control label while a request is in flight
    pub loading_text: String,
    /// Notice shown after a transport failure
    pub error_message: String,
    /// Extra filter fields folded into every request (e.g. category)
    pub extra: HashMap<String, Value>,
}

impl ControllerConfig {
    /// Build controller config from a page's embedded bootstrap config
    pub fn from_bootstrap(bootstrap: &BootstrapConfig, button_label: impl Into<String>) -> Self {
        Self {
            nonce: bootstrap.nonce.clone(),
            button_label: button_label.into(),
            loading_text: bootstrap.loading_text.clone(),
            error_message: bootstrap.error_message.clone(),
            extra: HashMap::new(),
        }
    }
}

/// Outcome of an activation attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    /// No control mounted, request in flight, or already exhausted
    Ignored,
    /// A request was dispatched and settled into the given phase
    Settled(ControlPhase),
}

/// Client-side pagination controller
pub struct LoadMoreController<F> {
    config: ControllerConfig,
    fetcher: F,
    state: Option<PaginationState>,
    phase: ControlPhase,
    view: ListView,
}

impl<F: PageFetcher> LoadMoreController<F> {
    /// Mount a controller against the initial listing markup
    ///
    /// When the markup carries no pagination attributes, or the page count
    /// is zero, no control is mounted and every activation is a no-op.
    pub fn mount(config: ControllerConfig, fetcher: F, markup: &str) -> Self {
        let state = PaginationState::from_markup(markup);
        let view = if state.is_some() {
            ListView::with_control(&config.button_label)
        } else {
            ListView::default()
        };

        Self {
            config,
            fetcher,
            state,
            phase: ControlPhase::Idle,
            view,
        }
    }

    /// Mount a controller with known counters
    pub fn with_state(config: ControllerConfig, fetcher: F, state: PaginationState) -> Self {
        let view = ListView::with_control(&config.button_label);
        Self {
            config,
            fetcher,
            state: Some(state),
            phase: ControlPhase::Idle,
            view,
        }
    }

    /// Handle one activation of the control
    ///
    /// No-op when no control is mounted; the `is_loading` reentrancy guard
    /// drops repeated activation while a request is in flight rather than
    /// queueing it.
    pub async fn activate(&mut self) -> Activation {
        if !self.phase.can_activate() {
            return Activation::Ignored;
        }
        let Some(state) = &self.state else {
            return Activation::Ignored;
        };
        if state.is_loading {
            return Activation::Ignored;
        }

        let next_page = self.dispatch();
        let result = self.fetcher.fetch(self.build_request(next_page)).await;
        self.settle(result, next_page);

        Activation::Settled(self.phase)
    }

    /// Mark the request in flight and return the page it asks for
    fn dispatch(&mut self) -> u32 {
        let state = self.state.as_mut().expect("dispatch requires state");
        state.is_loading = true;
        self.phase = ControlPhase::Loading;
        self.view.set_busy(&self.config.loading_text);
        state.next_page()
    }

    fn build_request(&self, page: u32) -> FetchRequest {
        let mut request = FetchRequest::new(&self.config.nonce, page);
        for (key, value) in &self.config.extra {
            request = request.with_extra(key.clone(), value.clone());
        }
        request
    }

    /// Apply a settled result
    fn settle(&mut self, result: FetchResult, next_page: u32) {
        match result {
            FetchResult::Success { html } => {
                self.view.append(&html);
                self.view.notice = None;

                let state = self.state.as_mut().expect("settle requires state");
                state.current_page = next_page;
                state.is_loading = false;

                if next_page >= state.total_pages {
                    self.exhaust();
                } else {
                    self.phase = ControlPhase::Ready;
                    self.view.set_ready(&self.config.button_label);
                }
            }
            FetchResult::Empty { message } => {
                // Server is authoritative about end-of-data, whatever the
                // cached total says.
                debug!(message, "no more posts");
                self.exhaust();
            }
            FetchResult::Failure { reason } => {
                debug!(reason, "page fetch failed");
                if let Some(state) = self.state.as_mut() {
                    state.is_loading = false;
                }
                self.phase = ControlPhase::Ready;
                self.view.set_ready(&self.config.button_label);
                self.view.notice = Some(self.config.error_message.clone());
            }
        }
    }

    /// Enter the terminal phase: control removed, state dropped
    fn exhaust(&mut self) {
        self.phase = ControlPhase::Exhausted;
        self.view.remove_control();
        self.state = None;
    }

    /// Current control phase
    pub fn phase(&self) -> ControlPhase {
        self.phase
    }

    /// Current pagination state, absent once exhausted or never mounted
    pub fn state(&self) -> Option<&PaginationState> {
        self.state.as_ref()
    }

    /// Page currently shown, if a control is mounted
    pub fn current_page(&self) -> Option<u32> {
        self.state.as_ref().map(|s| s.current_page)
    }

    /// The UI mirror
    pub fn view(&self) -> &ListView {
        &self.view
    }
}
