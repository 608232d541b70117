//! Pipeline ordering for a swarm's agents.
//!
//! Agents are rendered in the order the API supplies them. `swarm_order`
//! only changes the step label, never the position.

use crate::model::SwarmAgent;

/// One rendered step of a swarm pipeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipelineRow<'a> {
    pub agent: &'a SwarmAgent,
    /// `swarm_order` when present, otherwise the 1-based position.
    pub label: u32,
    /// True for every step except the last.
    pub has_connector: bool,
}

/// Derives the display rows for `agents` in supplied order.
pub fn pipeline_rows(agents: &[SwarmAgent]) -> Vec<PipelineRow<'_>> {
    let last = agents.len().saturating_sub(1);

    agents
        .iter()
        .enumerate()
        .map(|(idx, agent)| PipelineRow {
            agent,
            label: agent.swarm_order.unwrap_or(idx as u32 + 1),
            has_connector: idx < last,
        })
        .collect()
}
