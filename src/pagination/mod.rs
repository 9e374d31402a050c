//! Client-side pagination
//!
//! The controller that drives the load-more request/response cycle:
//! page-number tracking, terminal-state detection, and error recovery.
//!
//! # State machine
//!
//! Idle → (activate) → Loading → (success, more pages) → Ready → … →
//! (success, last page | empty) → Exhausted. A failure returns Loading to
//! Ready so the user may retry. Nothing leaves Exhausted.

mod controller;
mod types;

pub use controller::{Activation, ControllerConfig, LoadMoreController, PageFetcher};
pub use types::{ControlPhase, ControlView, ListView, PaginationState};

#[cfg(test)]
mod tests;
