//! Runtime Configuration
//!
//! Defaults are tuned for interactive typing. Every value can be overridden
//! from the environment, and the binary additionally accepts `--bind` and
//! `--api` flags.

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://optcgapi.com/api";
pub const DEFAULT_BIND: &str = "127.0.0.1:8090";

/// Tuning knobs of the incremental search loop.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Quiet period after the last keystroke before a search starts.
    pub debounce: Duration,
    /// Result cap of the first batch of a session (keeps first paint fast).
    pub first_batch_max_results: usize,
    /// Result cap of every later batch.
    pub max_results_per_batch: usize,
    /// Maximum number of sets fetched by one batch.
    pub max_pages_per_batch: usize,
    /// Sets planned when a search-all session starts.
    pub initial_window: usize,
    /// Sets appended each time the plan runs dry.
    pub extension_window: usize,
    /// Consecutive sets without a match after which the search gives up.
    pub empty_page_threshold: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(500),
            first_batch_max_results: 20,
            max_results_per_batch: 40,
            max_pages_per_batch: 2,
            initial_window: 2,
            extension_window: 2,
            empty_page_threshold: 3,
        }
    }
}

/// Where and how to reach the card API.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub base_url: String,
    pub request_timeout: Duration,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            request_timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub catalog: CatalogConfig,
    pub search: SearchConfig,
}

impl AppConfig {
    /// Builds the configuration from environment variables, then applies
    /// command line flags on top.
    pub fn load(args: &[String]) -> Result<Self> {
        let mut config = Self::from_env()?;

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--bind" => {
                    let value = args.get(i + 1).context("--bind requires a value")?;
                    config.bind_addr = value
                        .parse()
                        .with_context(|| format!("invalid --bind address: {}", value))?;
                    i += 2;
                }
                "--api" => {
                    let value = args.get(i + 1).context("--api requires a value")?;
                    config.catalog.base_url = normalize_base_url(value);
                    i += 2;
                }
                other => {
                    tracing::warn!("Ignoring unknown argument: {}", other);
                    i += 1;
                }
            }
        }

        Ok(config)
    }

    pub fn from_env() -> Result<Self> {
        let bind_addr = std::env::var("CARD_SEARCH_BIND")
            .unwrap_or_else(|_| DEFAULT_BIND.to_string())
            .parse()
            .context("invalid CARD_SEARCH_BIND")?;

        let mut catalog = CatalogConfig::default();
        if let Ok(url) = std::env::var("CARD_API_URL") {
            catalog.base_url = normalize_base_url(&url);
        }

        let mut search = SearchConfig::default();
        if let Ok(ms) = std::env::var("CARD_SEARCH_DEBOUNCE_MS") {
            let ms: u64 = ms.parse().context("invalid CARD_SEARCH_DEBOUNCE_MS")?;
            search.debounce = Duration::from_millis(ms);
        }

        Ok(Self {
            bind_addr,
            catalog,
            search,
        })
    }
}

pub fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
