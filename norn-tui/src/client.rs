//! HTTP client for the norn API.
//!
//! Provides an `HttpSwarmSource` that fetches the swarm list with a single
//! `GET /api/swarms` per refresh.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::model::Swarm;
use crate::source::{SourceError, SwarmSource};

/// Default address of a local norn API.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Maximum number of body bytes echoed into an error message.
const ERROR_BODY_LIMIT: usize = 200;

/// Swarm source backed by the norn HTTP API.
#[derive(Debug, Clone)]
pub struct HttpSwarmSource {
    client: Client,
    base_url: String,
}

impl HttpSwarmSource {
    /// Create a source for the API at `base_url`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, SourceError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url))
    }

    /// Create a source that sends through an already configured client.
    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// URL of the swarm list endpoint.
    pub fn swarms_url(&self) -> String {
        format!("{}/api/swarms", self.base_url)
    }
}

#[async_trait]
impl SwarmSource for HttpSwarmSource {
    async fn get_swarms(&self) -> Result<Vec<Swarm>, SourceError> {
        let url = self.swarms_url();
        debug!(%url, "Fetching swarm list");

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::Status {
                status: status.as_u16(),
                body: truncate_body(body.trim()),
            });
        }

        let bytes = response.bytes().await?;
        decode_swarms(&bytes)
    }
}

/// Decode the body of `GET /api/swarms`.
pub fn decode_swarms(body: &[u8]) -> Result<Vec<Swarm>, SourceError> {
    Ok(serde_json::from_slice(body)?)
}

fn truncate_body(body: &str) -> String {
    match body.char_indices().nth(ERROR_BODY_LIMIT) {
        Some((idx, _)) => format!("{}…", &body[..idx]),
        None => body.to_string(),
    }
}
