//! CLI module
//!
//! Command-line interface for serving and exercising a feed.
//!
//! # Commands
//!
//! - `serve` - Start the listing server
//! - `render` - Render one page of the feed to stdout
//! - `fetch` - Walk a running server's listing to exhaustion
//! - `validate` - Check a feed definition

mod commands;
mod runner;

pub use commands::{Cli, Commands};
pub use runner::Runner;
