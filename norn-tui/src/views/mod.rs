//! View system for the norn monitor.
//!
//! This module provides:
//! - `ViewRenderer` trait for view rendering
//! - `MonitorView`, the swarm list screen

mod monitor;
mod traits;

pub use monitor::MonitorView;
pub use traits::ViewRenderer;
