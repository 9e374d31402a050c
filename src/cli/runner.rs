//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands};
use crate::config::{load_feed, FeedConfig};
use crate::error::{Error, Result};
use crate::http::FetchClient;
use crate::pagination::{Activation, ControllerConfig, LoadMoreController};
use crate::render::{BootstrapConfig, PostRenderer};
use crate::server::{serve, ServerConfig};
use crate::store::{total_pages, MemoryStore, PostStore};
use crate::types::FetchResult;
use url::Url;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Serve { port, secret } => self.serve(*port, secret.as_deref()).await,
            Commands::Render { page } => self.render(*page).await,
            Commands::Fetch { url } => self.fetch(url).await,
            Commands::Validate => self.validate(),
        }
    }

    /// Load the feed definition
    fn load_feed(&self) -> Result<FeedConfig> {
        load_feed(&self.cli.feed)
    }

    async fn serve(&self, port: u16, secret: Option<&str>) -> Result<()> {
        let secret = match secret {
            Some(s) => s.to_string(),
            None => std::env::var("LOADMORE_SECRET").map_err(|_| {
                Error::config("Token secret not specified (use --secret or LOADMORE_SECRET)")
            })?,
        };

        let config = ServerConfig {
            feed: self.load_feed()?,
            secret,
        };
        serve(config, port).await
    }

    async fn render(&self, page: u32) -> Result<()> {
        let feed = self.load_feed()?;
        let criteria = feed.criteria();
        let page_size = feed.settings.page_size;
        let store = MemoryStore::new(feed.posts);

        let result = store.query(&criteria, page, page_size).await?;
        match PostRenderer::new().render_page(&result.posts)? {
            FetchResult::Success { html } => println!("{html}"),
            FetchResult::Empty { message } | FetchResult::Failure { reason: message } => {
                println!("{message}");
            }
        }

        Ok(())
    }

    /// Walk a running server's listing to exhaustion, client-side
    async fn fetch(&self, base_url: &str) -> Result<()> {
        let base = Url::parse(base_url)?;
        let markup = reqwest::get(base.clone()).await?.text().await?;

        let bootstrap = BootstrapConfig::from_markup(&markup)?;
        let endpoint = base.join(&bootstrap.endpoint)?;
        let client = FetchClient::new(endpoint.as_str())?;

        let config = ControllerConfig::from_bootstrap(&bootstrap, "Load More");
        let mut controller = LoadMoreController::mount(config, client, &markup);

        let mut printed = 0;
        loop {
            let outcome = controller.activate().await;
            if self.cli.verbose {
                eprintln!("activation: {outcome:?} (phase {:?})", controller.phase());
            }

            let html = &controller.view().container_html;
            if html.len() > printed {
                println!("{}", &html[printed..]);
                printed = html.len();
            }

            if let Some(notice) = &controller.view().notice {
                return Err(Error::Other(notice.clone()));
            }
            if outcome == Activation::Ignored || controller.phase().is_terminal() {
                break;
            }
        }

        Ok(())
    }

    fn validate(&self) -> Result<()> {
        let feed = self.load_feed()?;
        let pages = total_pages(feed.posts.len(), feed.settings.page_size);

        println!("Feed: {}", feed.title);
        println!("  posts: {}", feed.posts.len());
        println!("  page size: {}", feed.settings.page_size);
        println!("  pages: {pages}");
        if self.cli.verbose {
            println!("  criteria: {:?}", feed.criteria());
        }

        Ok(())
    }
}
