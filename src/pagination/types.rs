//! Pagination state types
//!
//! The explicit state entity the controller owns (the single source of
//! truth), the control phases, and the view mirror it synchronizes as a
//! side effect.

use regex::Regex;
use std::sync::LazyLock;

/// Tracks pagination progress for one listing
///
/// Created once per mount from the attributes embedded in the initial
/// markup, mutated only by the controller on settled requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationState {
    /// Page currently shown (1-based)
    pub current_page: u32,
    /// Server-computed page count at load time
    pub total_pages: u32,
    /// True only between dispatch and settlement
    pub is_loading: bool,
}

impl PaginationState {
    /// Create state for a freshly loaded listing
    pub fn new(current_page: u32, total_pages: u32) -> Self {
        Self {
            current_page,
            total_pages,
            is_loading: false,
        }
    }

    /// Page the next dispatch will request
    pub fn next_page(&self) -> u32 {
        self.current_page + 1
    }

    /// Parse state from the control's embedded markup attributes
    ///
    /// Returns `None` when the attributes are absent or the page count is
    /// zero; the controller must not mount a control in that case.
    pub fn from_markup(markup: &str) -> Option<Self> {
        static PAGE_REGEX: LazyLock<Regex> =
            LazyLock::new(|| Regex::new(r#"data-page="(\d+)""#).unwrap());
        static TOTAL_REGEX: LazyLock<Regex> =
            LazyLock::new(|| Regex::new(r#"data-total-pages="(\d+)""#).unwrap());

        let current = capture_u32(&PAGE_REGEX, markup)?;
        let total = capture_u32(&TOTAL_REGEX, markup)?;

        if total == 0 {
            return None;
        }

        Some(Self::new(current.max(1), total))
    }
}

fn capture_u32(regex: &Regex, markup: &str) -> Option<u32> {
    regex
        .captures(markup)
        .and_then(|cap| cap.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Phase of the pagination control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControlPhase {
    /// Mounted, never activated
    #[default]
    Idle,
    /// A request is in flight
    Loading,
    /// Settled, further activation allowed
    Ready,
    /// Terminal: no further pages will be requested
    Exhausted,
}

impl ControlPhase {
    /// Check if this phase permits activation
    pub fn can_activate(&self) -> bool {
        matches!(self, Self::Idle | Self::Ready)
    }

    /// Check if this is the terminal phase
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Exhausted)
    }
}

/// The visible pagination control
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlView {
    /// Current label text
    pub label: String,
    /// Whether activation is blocked in the UI
    pub disabled: bool,
}

/// UI mirror the controller mutates as a side effect of state changes
///
/// `container_html` accumulates appended fragments; `notice` holds at most
/// one transport-failure message, cleared by the next success; `control` is
/// removed permanently on exhaustion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListView {
    /// Accumulated listing markup
    pub container_html: String,
    /// Error notice appended after the container, if any
    pub notice: Option<String>,
    /// The control, absent once exhausted (or never mounted)
    pub control: Option<ControlView>,
}

impl ListView {
    /// Create a view with a mounted control
    pub fn with_control(label: impl Into<String>) -> Self {
        Self {
            container_html: String::new(),
            notice: None,
            control: Some(ControlView {
                label: label.into(),
                disabled: false,
            }),
        }
    }

    /// Append a fragment to the container
    pub fn append(&mut self, html: &str) {
        self.container_html.push_str(html);
    }

    /// Remove the control permanently
    pub fn remove_control(&mut self) {
        self.control = None;
    }

    /// Mark the control busy with the given label
    pub fn set_busy(&mut self, label: &str) {
        if let Some(control) = &mut self.control {
            control.label = label.to_string();
            control.disabled = true;
        }
    }

    /// Restore the control to its resting label
    pub fn set_ready(&mut self, label: &str) {
        if let Some(control) = &mut self.control {
            control.label = label.to_string();
            control.disabled = false;
        }
    }
}
