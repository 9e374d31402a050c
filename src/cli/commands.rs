//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Load-more feed server CLI
#[derive(Parser, Debug)]
#[command(name = "loadmore")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Feed definition file (YAML)
    #[arg(short, long, global = true, default_value = "feeds/demo.yaml")]
    pub feed: PathBuf,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the listing server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8080")]
        port: u16,

        /// Token secret (falls back to the LOADMORE_SECRET env var)
        #[arg(long)]
        secret: Option<String>,
    },

    /// Render one page of the feed to stdout
    Render {
        /// Page to render (1-based)
        #[arg(short, long, default_value = "1")]
        page: u32,
    },

    /// Fetch every page from a running server, printing each fragment
    Fetch {
        /// Base URL of the server
        #[arg(default_value = "http://127.0.0.1:8080")]
        url: String,
    },

    /// Validate a feed definition
    Validate,
}
