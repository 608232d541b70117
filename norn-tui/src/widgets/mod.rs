//! Widgets for the norn swarm monitor.

mod swarm_card;

pub use swarm_card::{
    GAUGE_WIDTH, SECURITY_WARNING_THRESHOLD, SwarmCard, quality_badge, task_preview,
};
