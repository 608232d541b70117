pub mod monitor;
pub mod swarms;

use anyhow::{Context, Result};
use norn_tui::HttpSwarmSource;

use crate::config::NornConfig;

/// Builds the HTTP source described by `config`.
fn http_source(config: &NornConfig) -> Result<HttpSwarmSource> {
    HttpSwarmSource::new(&config.api.url, config.api.timeout())
        .with_context(|| format!("Failed to create HTTP client for {}", config.api.url))
}
