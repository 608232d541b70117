//! Drift score banding.
//!
//! The score is rounded to a whole percent first and the band is picked from
//! the rounded value, so 0.495 lands in `SlightDrift`.

use ratatui::style::Color;

use crate::Theme;

/// Lowest percent still considered aligned.
pub const ALIGNED_MIN_PERCENT: i64 = 80;

/// Lowest percent considered slight drift.
pub const SLIGHT_DRIFT_MIN_PERCENT: i64 = 50;

/// Alignment band shown next to a swarm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriftBand {
    Aligned,
    SlightDrift,
    HighDrift,
}

impl DriftBand {
    /// Returns the display label for this band.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Aligned => "Aligned",
            Self::SlightDrift => "Slight Drift",
            Self::HighDrift => "High Drift",
        }
    }

    /// Returns the color for this band based on the theme.
    pub fn color(&self, theme: &Theme) -> Color {
        match self {
            Self::Aligned => theme.success,
            Self::SlightDrift => theme.warning,
            Self::HighDrift => theme.error,
        }
    }
}

/// A classified drift score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriftReading {
    pub band: DriftBand,
    /// Rounded percent. Out-of-range scores pass through unclamped.
    pub percent: i64,
}

impl DriftReading {
    /// Number of filled cells for a gauge of `width` cells.
    ///
    /// Only the fill is clamped to 0..=100; the band is untouched.
    pub fn filled_cells(&self, width: usize) -> usize {
        let clamped = self.percent.clamp(0, 100) as f64 / 100.0;
        (clamped * width as f64).round() as usize
    }

    /// Renders the gauge using `█` for filled and `░` for empty cells.
    pub fn gauge(&self, width: usize) -> String {
        let filled = self.filled_cells(width);
        "█".repeat(filled) + &"░".repeat(width.saturating_sub(filled))
    }
}

/// Classifies a drift score.
pub fn classify(score: f64) -> DriftReading {
    // NaN casts to 0.
    let percent = (score * 100.0).round() as i64;

    let band = if percent >= ALIGNED_MIN_PERCENT {
        DriftBand::Aligned
    } else if percent >= SLIGHT_DRIFT_MIN_PERCENT {
        DriftBand::SlightDrift
    } else {
        DriftBand::HighDrift
    };

    DriftReading { band, percent }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aligned_score() {
        let reading = classify(0.82);
        assert_eq!(reading.percent, 82);
        assert_eq!(reading.band, DriftBand::Aligned);
    }

    #[test]
    fn half_score_is_slight_drift() {
        let reading = classify(0.5);
        assert_eq!(reading.percent, 50);
        assert_eq!(reading.band, DriftBand::SlightDrift);
    }

    #[test]
    fn band_uses_rounded_percent() {
        let reading = classify(0.495);
        assert_eq!(reading.percent, 50);
        assert_eq!(reading.band, DriftBand::SlightDrift);

        let reading = classify(0.499);
        assert_eq!(reading.percent, 50);
        assert_eq!(reading.band, DriftBand::SlightDrift);

        let reading = classify(0.795);
        assert_eq!(reading.percent, 80);
        assert_eq!(reading.band, DriftBand::Aligned);
    }

    #[test]
    fn just_below_boundaries() {
        assert_eq!(classify(0.79).band, DriftBand::SlightDrift);
        assert_eq!(classify(0.49).band, DriftBand::HighDrift);
        assert_eq!(classify(0.0).band, DriftBand::HighDrift);
        assert_eq!(classify(1.0).percent, 100);
    }

    #[test]
    fn every_hundredth_matches_percent_rule() {
        for step in 0..=1000 {
            let score = step as f64 / 1000.0;
            let reading = classify(score);
            let expected = (score * 100.0).round() as i64;
            assert_eq!(reading.percent, expected, "score {score}");

            let band = if expected >= 80 {
                DriftBand::Aligned
            } else if expected >= 50 {
                DriftBand::SlightDrift
            } else {
                DriftBand::HighDrift
            };
            assert_eq!(reading.band, band, "score {score}");
        }
    }

    #[test]
    fn out_of_range_scores_pass_through() {
        let over = classify(1.5);
        assert_eq!(over.percent, 150);
        assert_eq!(over.band, DriftBand::Aligned);

        let under = classify(-0.2);
        assert_eq!(under.percent, -20);
        assert_eq!(under.band, DriftBand::HighDrift);
    }

    #[test]
    fn nan_score_reads_as_zero() {
        let reading = classify(f64::NAN);
        assert_eq!(reading.percent, 0);
        assert_eq!(reading.band, DriftBand::HighDrift);
    }

    #[test]
    fn gauge_fill_is_clamped() {
        assert_eq!(classify(1.5).filled_cells(10), 10);
        assert_eq!(classify(-0.2).filled_cells(10), 0);
        assert_eq!(classify(0.5).filled_cells(10), 5);
    }

    #[test]
    fn gauge_renders_full_width() {
        let gauge = classify(0.3).gauge(10);
        assert_eq!(gauge.chars().count(), 10);
        assert_eq!(gauge, "███░░░░░░░");
    }

    #[test]
    fn band_labels() {
        assert_eq!(DriftBand::Aligned.label(), "Aligned");
        assert_eq!(DriftBand::SlightDrift.label(), "Slight Drift");
        assert_eq!(DriftBand::HighDrift.label(), "High Drift");
    }
}
