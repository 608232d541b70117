//! Presentation grading for swarm records.
//!
//! Both classifiers are total: any input produces a displayable result.

pub mod drift;
pub mod quality;

pub use drift::{DriftBand, DriftReading};
pub use quality::QualityCategory;
