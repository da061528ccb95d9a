//! Audio output
//!
//! The game has a single cue: an explosion, played once per cleared
//! asteroid. On the web it is synthesized with the Web Audio API, so no
//! asset files are needed.

/// Destination for game sound cues
pub trait AudioSink {
    /// Play the explosion cue (no-op while muted)
    fn play_explosion(&mut self);
    fn set_muted(&mut self, muted: bool);
    fn is_muted(&self) -> bool;
    /// Output volume (0.0 - 1.0)
    fn set_volume(&mut self, volume: f32);
    /// Allow playback. Browsers only honor this from inside a user
    /// gesture handler, so hosts call it before queueing the input.
    fn unlock(&mut self) {}
}

/// Sink that plays nothing. Counts cues so tests and the headless demo
/// can observe them.
#[derive(Debug, Clone, Default)]
pub struct SilentAudio {
    pub played: usize,
    pub unlocks: usize,
    muted: bool,
    volume: f32,
}

impl SilentAudio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }
}

impl AudioSink for SilentAudio {
    fn play_explosion(&mut self) {
        if !self.muted {
            self.played += 1;
        }
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn is_muted(&self) -> bool {
        self.muted
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    fn unlock(&mut self) {
        self.unlocks += 1;
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::WebAudio;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::AudioSink;

    /// Web Audio explosion synth
    pub struct WebAudio {
        ctx: Option<AudioContext>,
        volume: f32,
        muted: bool,
    }

    impl WebAudio {
        pub fn new(volume: f32, muted: bool) -> Self {
            // May fail outside a secure context
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                volume: volume.clamp(0.0, 1.0),
                muted,
            }
        }

        /// Resume a suspended context. Only effective inside a user gesture.
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                if ctx.state() == web_sys::AudioContextState::Suspended {
                    let _ = ctx.resume();
                }
            }
        }

        fn create_osc(
            &self,
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }
    }

    impl AudioSink for WebAudio {
        /// Low sawtooth boom with a short square crackle on top
        fn play_explosion(&mut self) {
            if self.muted || self.volume <= 0.0 {
                return;
            }
            self.resume();
            let Some(ctx) = &self.ctx else { return };
            let vol = self.volume;
            let t = ctx.current_time();

            if let Some((osc, gain)) = self.create_osc(ctx, 110.0, OscillatorType::Sawtooth) {
                gain.gain().set_value_at_time(vol, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.001, t + 0.45)
                    .ok();
                osc.frequency().set_value_at_time(110.0, t).ok();
                osc.frequency()
                    .exponential_ramp_to_value_at_time(28.0, t + 0.45)
                    .ok();
                osc.start().ok();
                osc.stop_with_when(t + 0.5).ok();
            }

            if let Some((osc, gain)) = self.create_osc(ctx, 1400.0, OscillatorType::Square) {
                gain.gain().set_value_at_time(vol * 0.35, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.001, t + 0.08)
                    .ok();
                osc.frequency().set_value_at_time(1400.0, t).ok();
                osc.frequency().set_value_at_time(300.0, t + 0.03).ok();
                osc.frequency().set_value_at_time(900.0, t + 0.05).ok();
                osc.start().ok();
                osc.stop_with_when(t + 0.1).ok();
            }
        }

        fn set_muted(&mut self, muted: bool) {
            self.muted = muted;
        }

        fn is_muted(&self) -> bool {
            self.muted
        }

        fn set_volume(&mut self, volume: f32) {
            self.volume = volume.clamp(0.0, 1.0);
        }

        fn unlock(&mut self) {
            self.resume();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silent_counts_unless_muted() {
        let mut sink = SilentAudio::new();
        sink.play_explosion();
        sink.set_muted(true);
        sink.play_explosion();
        assert!(sink.is_muted());
        assert_eq!(sink.played, 1);
    }

    #[test]
    fn test_volume_clamped() {
        let mut sink = SilentAudio::new();
        sink.set_volume(4.0);
        assert_eq!(sink.volume(), 1.0);
    }

    #[test]
    fn test_unlock_is_independent_of_mute() {
        let mut sink = SilentAudio::new();
        sink.set_muted(true);
        sink.unlock();
        assert_eq!(sink.unlocks, 1);
        assert_eq!(sink.played, 0);
    }
}
