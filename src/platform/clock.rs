//! Frame delta-time clock

use crate::consts::{FALLBACK_FRAME_DT, MAX_FRAME_DT};

/// Turns host timestamps (milliseconds) into clamped frame deltas
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds since the previous call, at most [`MAX_FRAME_DT`]. The first
    /// frame and non-positive gaps use [`FALLBACK_FRAME_DT`].
    pub fn delta(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(last) => ((now_ms - last) / 1000.0) as f32,
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        if dt > 0.0 && dt.is_finite() {
            dt.min(MAX_FRAME_DT)
        } else {
            FALLBACK_FRAME_DT
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_uses_fallback() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.delta(1234.0), FALLBACK_FRAME_DT);
    }

    #[test]
    fn test_regular_frames() {
        let mut clock = FrameClock::new();
        clock.delta(1000.0);
        assert!((clock.delta(1016.0) - 0.016).abs() < 1e-6);
        assert!((clock.delta(1049.0) - 0.033).abs() < 1e-6);
    }

    #[test]
    fn test_long_gap_is_clamped() {
        let mut clock = FrameClock::new();
        clock.delta(0.0);
        assert_eq!(clock.delta(5000.0), MAX_FRAME_DT);
    }

    #[test]
    fn test_zero_or_backwards_gap_uses_fallback() {
        let mut clock = FrameClock::new();
        clock.delta(500.0);
        assert_eq!(clock.delta(500.0), FALLBACK_FRAME_DT);
        assert_eq!(clock.delta(400.0), FALLBACK_FRAME_DT);
    }
}
