//! Terminal swarm monitor for norn.
//!
//! Shows every multi-agent swarm the norn API knows about, grades each one by
//! outcome quality and inter-agent alignment, and expands a swarm into its
//! agent pipeline. Built on ratatui and crossterm; the list refreshes on a
//! fixed interval while the screen is open.

mod app;
mod client;
mod controller;
pub mod grading;
mod keybindings;
mod model;
pub mod pipeline;
mod source;
mod state;
mod terminal;
mod theme;
mod views;
mod widgets;

#[cfg(test)]
mod test_support;

pub use app::App;
pub use client::{DEFAULT_API_URL, DEFAULT_TIMEOUT, HttpSwarmSource, decode_swarms};
pub use controller::{DEFAULT_REFRESH_INTERVAL, ListState, SwarmListController, Update};
pub use grading::{DriftBand, DriftReading, QualityCategory};
pub use keybindings::{Action, KeyBindings};
pub use model::{
    AgentStatus, Quality, Swarm, SwarmAgent, format_score, format_timestamp, round_score,
};
pub use source::{FETCH_FAILED_FALLBACK, SourceError, SwarmSource};
pub use state::{AppState, CardStates, SessionId, SwarmCardState, SwarmId};
pub use terminal::{NornTerminal, install_panic_hook, restore_terminal, setup_terminal};
pub use theme::{Theme, norn_default};
pub use views::{MonitorView, ViewRenderer};
pub use widgets::{GAUGE_WIDTH, SECURITY_WARNING_THRESHOLD, SwarmCard, quality_badge, task_preview};
