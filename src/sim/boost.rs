//! Planet speed boost
//!
//! Idle -> Boosting (faster fall) -> Cooldown -> Idle, driven by frame time
//! so a restart or a paused tab never leaves a stray timer behind.

use crate::tuning::BoostTuning;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoostPhase {
    /// Multiplier 1, may be triggered
    Idle,
    /// Boost multiplier active for `remaining` seconds
    Boosting { remaining: f32 },
    /// Multiplier 1, cannot be triggered for `remaining` seconds
    Cooldown { remaining: f32 },
}

impl BoostPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            BoostPhase::Idle => "idle",
            BoostPhase::Boosting { .. } => "boosting",
            BoostPhase::Cooldown { .. } => "cooldown",
        }
    }
}

#[derive(Debug, Clone)]
pub struct SpeedBoost {
    phase: BoostPhase,
    tuning: BoostTuning,
}

impl SpeedBoost {
    pub fn new(tuning: BoostTuning) -> Self {
        Self {
            phase: BoostPhase::Idle,
            tuning,
        }
    }

    pub fn phase(&self) -> BoostPhase {
        self.phase
    }

    /// Fall-speed multiplier for the current phase
    pub fn multiplier(&self) -> f32 {
        match self.phase {
            BoostPhase::Boosting { .. } => self.tuning.multiplier,
            _ => 1.0,
        }
    }

    pub fn can_trigger(&self) -> bool {
        self.phase == BoostPhase::Idle
    }

    /// Start a boost. No-op (returns false) unless idle.
    pub fn trigger(&mut self) -> bool {
        if !self.can_trigger() {
            return false;
        }
        self.phase = BoostPhase::Boosting {
            remaining: self.tuning.duration_secs,
        };
        true
    }

    /// Count down the active window. Time left over when a window closes
    /// is carried into the next one. Returns the new phase on a transition.
    pub fn advance(&mut self, dt: f32) -> Option<BoostPhase> {
        let before = self.phase;
        let mut carry = dt.max(0.0);
        loop {
            match self.phase {
                BoostPhase::Idle => break,
                BoostPhase::Boosting { remaining } => {
                    if remaining > carry {
                        self.phase = BoostPhase::Boosting {
                            remaining: remaining - carry,
                        };
                        break;
                    }
                    carry -= remaining;
                    self.phase = BoostPhase::Cooldown {
                        remaining: self.tuning.cooldown_secs,
                    };
                }
                BoostPhase::Cooldown { remaining } => {
                    if remaining > carry {
                        self.phase = BoostPhase::Cooldown {
                            remaining: remaining - carry,
                        };
                        break;
                    }
                    self.phase = BoostPhase::Idle;
                    break;
                }
            }
        }
        let changed = std::mem::discriminant(&before) != std::mem::discriminant(&self.phase);
        changed.then_some(self.phase)
    }

    /// Back to idle, dropping any active window
    pub fn reset(&mut self) {
        self.phase = BoostPhase::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::{Difficulty, Tuning};

    fn boost() -> SpeedBoost {
        SpeedBoost::new(Tuning::for_difficulty(Difficulty::Normal).boost)
    }

    /// Advance in 50 ms frames
    fn run(b: &mut SpeedBoost, secs: f32) {
        let frames = (secs / 0.05).round() as u32;
        for _ in 0..frames {
            b.advance(0.05);
        }
    }

    #[test]
    fn test_trigger_from_idle() {
        let mut b = boost();
        assert_eq!(b.multiplier(), 1.0);
        assert!(b.trigger());
        assert!(matches!(b.phase(), BoostPhase::Boosting { .. }));
        assert_eq!(b.multiplier(), 1.9);
    }

    #[test]
    fn test_trigger_is_exclusive() {
        let mut b = boost();
        b.trigger();
        run(&mut b, 2.0);
        let phase = b.phase();
        assert!(!b.trigger());
        assert_eq!(b.phase(), phase);
        assert_eq!(b.multiplier(), 1.9);

        run(&mut b, 4.5);
        assert!(matches!(b.phase(), BoostPhase::Cooldown { .. }));
        let phase = b.phase();
        assert!(!b.trigger());
        assert_eq!(b.phase(), phase);
        assert_eq!(b.multiplier(), 1.0);
    }

    #[test]
    fn test_full_cycle_timing() {
        let mut b = boost();
        b.trigger();
        run(&mut b, 5.9);
        assert!(matches!(b.phase(), BoostPhase::Boosting { .. }));
        run(&mut b, 0.2);
        assert!(matches!(b.phase(), BoostPhase::Cooldown { .. }));
        run(&mut b, 8.7);
        assert!(!b.can_trigger());
        run(&mut b, 0.3);
        assert_eq!(b.phase(), BoostPhase::Idle);
        assert!(b.trigger());
    }

    #[test]
    fn test_transition_reporting_and_carry() {
        let mut b = boost();
        b.trigger();
        // One huge step crosses both windows
        assert_eq!(b.advance(100.0), Some(BoostPhase::Idle));
        assert_eq!(b.advance(1.0), None);

        b.trigger();
        let t = b.advance(6.5);
        match t {
            Some(BoostPhase::Cooldown { remaining }) => assert!((remaining - 8.5).abs() < 1e-4),
            other => panic!("unexpected transition {:?}", other),
        }
    }

    #[test]
    fn test_reset() {
        let mut b = boost();
        b.trigger();
        b.reset();
        assert_eq!(b.phase(), BoostPhase::Idle);
    }
}
