//! Swarm records as delivered by the norn API.
//!
//! Records are immutable snapshots: every refresh replaces the whole list.

use std::fmt;

use chrono::{DateTime, Local, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

use crate::state::{SessionId, SwarmId};

/// Outcome grade reported for a swarm or an individual agent.
///
/// Labels outside the known set are kept verbatim in `Unknown` so new
/// upstream grades still render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Quality {
    Excellent,
    Good,
    Poor,
    Failed,
    Stuck,
    Unknown(String),
}

impl Quality {
    /// The label as received from the API.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Excellent => "EXCELLENT",
            Self::Good => "GOOD",
            Self::Poor => "POOR",
            Self::Failed => "FAILED",
            Self::Stuck => "STUCK",
            Self::Unknown(label) => label,
        }
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self::Unknown(String::new())
    }
}

impl From<&str> for Quality {
    fn from(label: &str) -> Self {
        match label {
            "EXCELLENT" => Self::Excellent,
            "GOOD" => Self::Good,
            "POOR" => Self::Poor,
            "FAILED" => Self::Failed,
            "STUCK" => Self::Stuck,
            other => Self::Unknown(other.to_string()),
        }
    }
}

impl From<String> for Quality {
    fn from(label: String) -> Self {
        Self::from(label.as_str())
    }
}

impl From<Quality> for String {
    fn from(quality: Quality) -> Self {
        quality.as_str().to_string()
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Execution status of an agent. Only `running` drives the live marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AgentStatus {
    Running,
    Other(String),
}

impl AgentStatus {
    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Running => "running",
            Self::Other(status) => status,
        }
    }
}

impl Default for AgentStatus {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl From<String> for AgentStatus {
    fn from(status: String) -> Self {
        if status == "running" {
            Self::Running
        } else {
            Self::Other(status)
        }
    }
}

impl From<AgentStatus> for String {
    fn from(status: AgentStatus) -> Self {
        status.as_str().to_string()
    }
}

/// One step of a swarm pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwarmAgent {
    pub session_id: SessionId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub agent_name: String,
    /// Explicit step label. Never used to reorder agents.
    #[serde(default, deserialize_with = "positive_label")]
    pub swarm_order: Option<u32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub overall_quality: Quality,
    /// Percentage, `None` until measured.
    #[serde(default)]
    pub efficiency_score: Option<f64>,
    /// Percentage, `None` until measured.
    #[serde(default)]
    pub security_score: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub task: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: AgentStatus,
    #[serde(default, deserialize_with = "lenient_count")]
    pub total_steps: u32,
}

/// A monitored multi-agent pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Swarm {
    pub swarm_id: SwarmId,
    /// Reported by the API; may disagree with `agents.len()`.
    #[serde(default, deserialize_with = "lenient_count")]
    pub agent_count: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub overall_quality: Quality,
    /// Alignment fraction, 1.0 = no drift. Not range checked; missing or
    /// null reads as 0.
    #[serde(default, deserialize_with = "null_as_default")]
    pub drift_score: f64,
    #[serde(default, deserialize_with = "non_empty")]
    pub started_at: Option<String>,
    #[serde(default, deserialize_with = "non_empty")]
    pub ended_at: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub agents: Vec<SwarmAgent>,
}

/// Reads `null` as the field's default so one sparse record cannot fail the
/// whole list.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts any JSON value; only positive integers that fit a `u32` are kept.
fn positive_label<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(serde_json::Value::as_u64)
        .filter(|&n| n > 0)
        .and_then(|n| u32::try_from(n).ok()))
}

/// Accepts any JSON value; anything but a non-negative integer reads as 0.
fn lenient_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(serde_json::Value::as_u64)
        .map_or(0, |n| u32::try_from(n).unwrap_or(u32::MAX)))
}

fn non_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

/// Formats an API timestamp in the operator's local time.
///
/// Accepts RFC 3339 and naive ISO-8601 (treated as local). Anything else is
/// shown as received.
pub fn format_timestamp(raw: &str) -> String {
    const DISPLAY: &str = "%Y-%m-%d %H:%M:%S";

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed.with_timezone(&Local).format(DISPLAY).to_string();
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return naive.format(DISPLAY).to_string();
    }
    raw.to_string()
}

/// Rounds a percentage score to the one decimal that is displayed.
pub fn round_score(score: f64) -> f64 {
    (score * 10.0).round() / 10.0
}

/// Formats a percentage score without trailing zeros ("87", "87.5").
pub fn format_score(score: f64) -> String {
    format!("{}%", round_score(score))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SWARM_JSON: &str = r#"{
        "swarm_id": "hashtrade-20250301-101500",
        "agent_count": 2,
        "overall_quality": "GOOD",
        "drift_score": 0.82,
        "started_at": "2025-03-01T10:15:00",
        "ended_at": "",
        "agents": [
            {
                "session_id": "s-1",
                "agent_name": "Controller",
                "swarm_order": 1,
                "overall_quality": "EXCELLENT",
                "efficiency_score": 91.0,
                "security_score": null,
                "task": "Get system status",
                "status": "completed",
                "total_steps": 7
            },
            {
                "session_id": "s-2",
                "agent_name": "Thinker",
                "swarm_order": null,
                "overall_quality": "BRAND_NEW_GRADE",
                "efficiency_score": null,
                "security_score": 64.5,
                "task": "",
                "status": "running",
                "total_steps": 3
            }
        ]
    }"#;

    #[test]
    fn swarm_decodes_from_api_payload() {
        let swarm: Swarm = serde_json::from_str(SWARM_JSON).unwrap();

        assert_eq!(swarm.swarm_id, "hashtrade-20250301-101500");
        assert_eq!(swarm.overall_quality, Quality::Good);
        assert_eq!(swarm.agents.len(), 2);
        assert_eq!(swarm.agents[0].swarm_order, Some(1));
        assert_eq!(swarm.agents[1].swarm_order, None);
    }

    #[test]
    fn empty_timestamp_is_absent() {
        let swarm: Swarm = serde_json::from_str(SWARM_JSON).unwrap();
        assert_eq!(swarm.started_at.as_deref(), Some("2025-03-01T10:15:00"));
        assert!(swarm.ended_at.is_none());
    }

    #[test]
    fn null_scores_stay_unmeasured() {
        let swarm: Swarm = serde_json::from_str(SWARM_JSON).unwrap();
        assert_eq!(swarm.agents[0].efficiency_score, Some(91.0));
        assert!(swarm.agents[0].security_score.is_none());
        assert!(swarm.agents[1].efficiency_score.is_none());
    }

    #[test]
    fn unknown_quality_keeps_raw_label() {
        let swarm: Swarm = serde_json::from_str(SWARM_JSON).unwrap();
        assert_eq!(
            swarm.agents[1].overall_quality,
            Quality::Unknown("BRAND_NEW_GRADE".into())
        );
        assert_eq!(swarm.agents[1].overall_quality.as_str(), "BRAND_NEW_GRADE");
    }

    #[test]
    fn only_running_status_is_live() {
        let swarm: Swarm = serde_json::from_str(SWARM_JSON).unwrap();
        assert!(!swarm.agents[0].status.is_running());
        assert!(swarm.agents[1].status.is_running());
        assert!(!AgentStatus::from("Running".to_string()).is_running());
    }

    #[test]
    fn missing_agents_decode_to_empty_pipeline() {
        let swarm: Swarm =
            serde_json::from_str(r#"{"swarm_id": "s", "drift_score": 1.0}"#).unwrap();
        assert!(swarm.agents.is_empty());
        assert!(swarm.started_at.is_none());
        assert_eq!(swarm.overall_quality.as_str(), "");
    }

    #[test]
    fn quality_serializes_back_to_label() {
        let json = serde_json::to_string(&Quality::Stuck).unwrap();
        assert_eq!(json, "\"STUCK\"");
    }

    #[test]
    fn format_timestamp_handles_naive_iso() {
        assert_eq!(
            format_timestamp("2025-03-01T10:15:00.123456"),
            "2025-03-01 10:15:00"
        );
    }

    #[test]
    fn format_timestamp_passes_through_garbage() {
        assert_eq!(format_timestamp("yesterday"), "yesterday");
    }

    #[test]
    fn format_score_drops_trailing_zero() {
        assert_eq!(format_score(87.0), "87%");
        assert_eq!(format_score(64.5), "64.5%");
        assert_eq!(format_score(70.04), "70%");
    }

    #[test]
    fn null_labels_decode_as_unknown() {
        let body = r#"{
            "swarm_id": "s1",
            "overall_quality": null,
            "drift_score": 0.9,
            "agents": [{
                "session_id": "a",
                "agent_name": null,
                "overall_quality": null,
                "task": null,
                "status": null,
                "total_steps": null
            }]
        }"#;
        let swarm: Swarm = serde_json::from_str(body).unwrap();

        assert_eq!(swarm.overall_quality, Quality::Unknown(String::new()));
        let agent = &swarm.agents[0];
        assert_eq!(agent.overall_quality, Quality::Unknown(String::new()));
        assert_eq!(agent.agent_name, "");
        assert_eq!(agent.task, "");
        assert!(!agent.status.is_running());
        assert_eq!(agent.total_steps, 0);
    }

    #[test]
    fn null_or_missing_drift_score_reads_as_zero() {
        let swarms: Vec<Swarm> = serde_json::from_str(
            r#"[
                {"swarm_id": "bad", "drift_score": null},
                {"swarm_id": "missing"},
                {"swarm_id": "ok", "drift_score": 0.82}
            ]"#,
        )
        .unwrap();

        assert_eq!(swarms.len(), 3);
        assert_eq!(swarms[0].drift_score, 0.0);
        assert_eq!(swarms[1].drift_score, 0.0);
        assert_eq!(swarms[2].drift_score, 0.82);
    }

    #[test]
    fn non_positive_swarm_order_falls_back_to_position() {
        let swarm: Swarm = serde_json::from_str(
            r#"{"swarm_id": "s", "drift_score": 1.0, "agents": [
                {"session_id": "a", "swarm_order": 0},
                {"session_id": "b", "swarm_order": -1},
                {"session_id": "c", "swarm_order": "2"},
                {"session_id": "d", "swarm_order": 4}
            ]}"#,
        )
        .unwrap();

        let orders: Vec<_> = swarm.agents.iter().map(|a| a.swarm_order).collect();
        assert_eq!(orders, vec![None, None, None, Some(4)]);
    }

    #[test]
    fn negative_counts_read_as_zero() {
        let swarm: Swarm = serde_json::from_str(
            r#"{"swarm_id": "s", "agent_count": -2, "drift_score": 1.0, "agents": null}"#,
        )
        .unwrap();
        assert_eq!(swarm.agent_count, 0);
        assert!(swarm.agents.is_empty());
    }

    #[test]
    fn round_score_matches_display() {
        assert_eq!(round_score(69.96), 70.0);
        assert_eq!(round_score(69.94), 69.9);
    }
}
