//! Fixed-step clock for headless runs.

use crate::error::{FieldError, Result};

/// Headless playback configuration
#[derive(Debug, Clone)]
pub struct PlaybackConfig {
    /// Simulated duration (seconds)
    pub duration_s: f64,

    /// Frame rate (FPS)
    pub fps: u32,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            duration_s: 5.0,
            fps: 60,
        }
    }
}

impl PlaybackConfig {
    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.fps == 0 {
            return Err(FieldError::playback("frame rate must be at least 1 FPS"));
        }
        if !(self.duration_s.is_finite() && self.duration_s >= 0.0) {
            return Err(FieldError::playback(format!(
                "duration must be non-negative, got {} s",
                self.duration_s
            )));
        }
        // Frame indices must fit in usize
        if self.duration_s * self.fps as f64 >= usize::MAX as f64 {
            return Err(FieldError::playback(format!(
                "{} s at {} FPS is too many frames",
                self.duration_s, self.fps
            )));
        }
        Ok(())
    }

    /// Seconds between frames
    pub fn frame_interval_s(&self) -> f64 {
        1.0 / self.fps as f64
    }

    /// Total number of frames to simulate (including t = 0)
    pub fn total_frames(&self) -> usize {
        ((self.duration_s * self.fps as f64).ceil() as usize).saturating_add(1)
    }

    /// Simulated time of frame `index`
    pub fn frame_time(&self, index: usize) -> f64 {
        index as f64 / self.fps as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_timing() {
        let config = PlaybackConfig {
            duration_s: 1.0,
            fps: 30,
        };
        assert_eq!(config.total_frames(), 31);
        assert_eq!(config.frame_time(0), 0.0);
        assert!((config.frame_time(30) - 1.0).abs() < 1e-12);
        assert!((config.frame_interval_s() - 1.0 / 30.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_fps_rejected() {
        let config = PlaybackConfig {
            fps: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_huge_duration_rejected() {
        let config = PlaybackConfig {
            duration_s: 1e300,
            fps: 60,
        };
        assert!(matches!(
            config.validate(),
            Err(FieldError::InvalidPlayback(_))
        ));
        assert_eq!(config.total_frames(), usize::MAX);
    }
}
