//! Fixtures shared by unit tests.

use async_trait::async_trait;

use crate::model::{AgentStatus, Quality, Swarm, SwarmAgent};
use crate::source::{SourceError, SwarmSource};

/// Returns the same list on every call.
pub struct StaticSource(pub Vec<Swarm>);

#[async_trait]
impl SwarmSource for StaticSource {
    async fn get_swarms(&self) -> Result<Vec<Swarm>, SourceError> {
        Ok(self.0.clone())
    }
}

/// Fails every call with the given message.
pub struct FailingSource(pub &'static str);

#[async_trait]
impl SwarmSource for FailingSource {
    async fn get_swarms(&self) -> Result<Vec<Swarm>, SourceError> {
        Err(SourceError::Message(self.0.into()))
    }
}

pub fn agent(name: &str, quality: &str) -> SwarmAgent {
    SwarmAgent {
        session_id: format!("sess-{}", name.to_lowercase()),
        agent_name: name.into(),
        swarm_order: None,
        overall_quality: Quality::from(quality),
        efficiency_score: None,
        security_score: None,
        task: String::new(),
        status: AgentStatus::Other("completed".into()),
        total_steps: 0,
    }
}

pub fn swarm(id: &str, drift_score: f64, agents: Vec<SwarmAgent>) -> Swarm {
    Swarm {
        swarm_id: id.into(),
        agent_count: agents.len() as u32,
        overall_quality: Quality::Good,
        drift_score,
        started_at: None,
        ended_at: None,
        agents,
    }
}
