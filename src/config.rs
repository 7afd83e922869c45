use std::time::Duration;

use crate::error::{RaceError, RaceResult};
use crate::render::ease::Ease;

/// Upper bound on frames rendered for a single keyframe transition.
pub const MAX_FRAMES_PER_TRANSITION: usize = 10_000;
/// Upper bound on bars drawn per frame.
pub const MAX_BARS: usize = 1_000;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margin {
    fn default() -> Self {
        Self {
            top: 16.0,
            right: 6.0,
            bottom: 6.0,
            left: 0.0,
        }
    }
}

/// Layout and timing of the rendered chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    pub width: f64,
    pub bar_size: f64,
    /// Number of bars drawn per frame.
    pub bars: usize,
    pub margin: Margin,
    /// Length of one keyframe transition.
    pub duration: Duration,
    pub fps: u32,
    pub ease: Ease,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 695.0,
            bar_size: 48.0,
            bars: 12,
            margin: Margin::default(),
            duration: Duration::from_millis(250),
            fps: 60,
            ease: Ease::Linear,
        }
    }
}

impl ChartConfig {
    pub fn height(&self) -> f64 {
        self.margin.top + self.bar_size * self.bars as f64 + self.margin.bottom
    }

    pub fn frames_per_transition(&self) -> usize {
        let frames = (self.fps as f64 * self.duration.as_secs_f64()).round() as usize;
        frames.max(1)
    }

    pub fn validate(&self) -> RaceResult<()> {
        if !(self.width.is_finite() && self.width > 0.0) {
            return Err(RaceError::configuration("width must be greater than 0"));
        }
        if !(self.bar_size.is_finite() && self.bar_size > 0.0) {
            return Err(RaceError::configuration("bar size must be greater than 0"));
        }
        if self.bars == 0 {
            return Err(RaceError::configuration("bar count must be greater than 0"));
        }
        if self.bars > MAX_BARS {
            return Err(RaceError::configuration(format!(
                "bar count must be at most {MAX_BARS}"
            )));
        }
        if self.fps == 0 {
            return Err(RaceError::configuration("fps must be greater than 0"));
        }
        if self.duration.is_zero() {
            return Err(RaceError::configuration(
                "transition duration must be greater than 0",
            ));
        }
        // Checked before the saturating cast in `frames_per_transition`.
        let frames = self.fps as f64 * self.duration.as_secs_f64();
        if frames.round() > MAX_FRAMES_PER_TRANSITION as f64 {
            return Err(RaceError::configuration(format!(
                "{} fps over {:?} exceeds {MAX_FRAMES_PER_TRANSITION} frames per transition",
                self.fps, self.duration
            )));
        }
        if self.margin.left + self.margin.right >= self.width {
            return Err(RaceError::configuration(
                "horizontal margins leave no room for bars",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_chart_layout() {
        let config = ChartConfig::default();
        assert_eq!(config.height(), 16.0 + 48.0 * 12.0 + 6.0);
        assert_eq!(config.frames_per_transition(), 15);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn short_transitions_still_get_a_frame() {
        let config = ChartConfig {
            fps: 1,
            duration: Duration::from_millis(10),
            ..ChartConfig::default()
        };
        assert_eq!(config.frames_per_transition(), 1);
    }

    #[test]
    fn rejects_degenerate_layouts() {
        let zero_bars = ChartConfig {
            bars: 0,
            ..ChartConfig::default()
        };
        assert!(matches!(
            zero_bars.validate(),
            Err(RaceError::Configuration(_))
        ));

        let narrow = ChartConfig {
            width: 6.0,
            ..ChartConfig::default()
        };
        assert!(narrow.validate().is_err());

        let instant = ChartConfig {
            duration: Duration::ZERO,
            ..ChartConfig::default()
        };
        assert!(instant.validate().is_err());

        let endless = ChartConfig {
            duration: Duration::from_millis(u64::MAX),
            ..ChartConfig::default()
        };
        assert!(matches!(
            endless.validate(),
            Err(RaceError::Configuration(_))
        ));

        let crowded = ChartConfig {
            bars: usize::MAX,
            ..ChartConfig::default()
        };
        assert!(matches!(
            crowded.validate(),
            Err(RaceError::Configuration(_))
        ));
    }

    #[test]
    fn frame_cap_is_inclusive() {
        let at_cap = ChartConfig {
            fps: 100,
            duration: Duration::from_secs(100),
            ..ChartConfig::default()
        };
        assert_eq!(at_cap.frames_per_transition(), MAX_FRAMES_PER_TRANSITION);
        assert!(at_cap.validate().is_ok());

        let over_cap = ChartConfig {
            fps: 101,
            ..at_cap
        };
        assert!(over_cap.validate().is_err());
    }
}
