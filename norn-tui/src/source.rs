//! Data source abstraction for swarm records.
//!
//! The monitor never fetches on its own; it asks a `SwarmSource` for the full
//! list. The call is all-or-nothing.

use async_trait::async_trait;
use thiserror::Error;

use crate::model::Swarm;

/// Message shown when a failure carries no description.
pub const FETCH_FAILED_FALLBACK: &str = "Failed to load swarms";

/// Errors from fetching the swarm list.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Could not reach the norn API: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("norn API returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid swarm payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("{0}")]
    Message(String),
}

impl SourceError {
    /// The operator-facing description, or the generic fallback when the
    /// failure has none.
    pub fn display_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            FETCH_FAILED_FALLBACK.to_string()
        } else {
            message
        }
    }
}

/// Provider of the full swarm list.
#[async_trait]
pub trait SwarmSource: Send + Sync {
    /// Fetch every swarm the API knows about.
    async fn get_swarms(&self) -> Result<Vec<Swarm>, SourceError>;
}
