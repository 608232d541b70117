//! Quality label to display category mapping.

use ratatui::style::Color;

use crate::Theme;
use crate::model::Quality;

/// Visual category for a quality badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QualityCategory {
    Excellent,
    Good,
    Poor,
    Failed,
    Stuck,
    /// Anything upstream sends that we do not know yet.
    Neutral,
}

impl QualityCategory {
    /// Returns the badge color for this category.
    pub fn color(&self, theme: &Theme) -> Color {
        match self {
            Self::Excellent => theme.excellent,
            Self::Good => theme.good,
            Self::Poor => theme.poor,
            Self::Failed => theme.failed,
            Self::Stuck => theme.stuck,
            Self::Neutral => theme.neutral,
        }
    }
}

/// Classifies a parsed quality grade.
pub fn categorize(quality: &Quality) -> QualityCategory {
    match quality {
        Quality::Excellent => QualityCategory::Excellent,
        Quality::Good => QualityCategory::Good,
        Quality::Poor => QualityCategory::Poor,
        Quality::Failed => QualityCategory::Failed,
        Quality::Stuck => QualityCategory::Stuck,
        Quality::Unknown(_) => QualityCategory::Neutral,
    }
}

/// Classifies a raw quality label.
pub fn classify(label: &str) -> QualityCategory {
    categorize(&Quality::from(label))
}
