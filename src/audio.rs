//! Audio system using Web Audio API
//!
//! Procedurally generated sound effects - no external files needed. On
//! native builds the manager is a silent stub with the same API.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Player fired
    Shoot,
    /// Non-lethal hit (enemy armor, shield absorb, life lost)
    Hit,
    /// Enemy destroyed
    Explosion,
    /// Power-up collected
    PickupCollect,
    /// Wave cleared
    WaveClear,
    /// Run ended
    GameOver,
    /// New best score
    HighScore,
}

impl SoundEffect {
    /// Cue for an outbound simulation event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Shoot => Some(Self::Shoot),
            GameEvent::Hit => Some(Self::Hit),
            GameEvent::Explosion { .. } => Some(Self::Explosion),
            GameEvent::PowerupCollected => Some(Self::PickupCollect),
            GameEvent::WaveCompleted => Some(Self::WaveClear),
            GameEvent::GameOver => Some(Self::GameOver),
            GameEvent::HighScore(_) => Some(Self::HighScore),
            _ => None,
        }
    }
}

#[cfg(target_arch = "wasm32")]
mod imp {
    use super::SoundEffect;
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        master_volume: f32,
        sfx_volume: f32,
        muted: bool,
    }

    impl Default for AudioManager {
        fn default() -> Self {
            Self::new()
        }
    }

    impl AudioManager {
        pub fn new() -> Self {
            // May fail outside a secure context
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                master_volume: 0.8,
                sfx_volume: 1.0,
                muted: false,
            }
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        pub fn set_master_volume(&mut self, vol: f32) {
            self.master_volume = vol.clamp(0.0, 1.0);
        }

        pub fn set_sfx_volume(&mut self, vol: f32) {
            self.sfx_volume = vol.clamp(0.0, 1.0);
        }

        pub fn set_muted(&mut self, muted: bool) {
            self.muted = muted;
        }

        fn effective_volume(&self) -> f32 {
            if self.muted {
                0.0
            } else {
                self.master_volume * self.sfx_volume
            }
        }

        /// Play a sound effect
        pub fn play(&self, effect: SoundEffect) {
            let vol = self.effective_volume();
            if vol <= 0.0 {
                return;
            }

            let Some(ctx) = &self.ctx else { return };

            // Browsers suspend the context until a user gesture
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            match effect {
                SoundEffect::Shoot => self.play_shoot(ctx, vol),
                SoundEffect::Hit => self.play_hit(ctx, vol),
                SoundEffect::Explosion => self.play_explosion(ctx, vol),
                SoundEffect::PickupCollect => self.play_pickup(ctx, vol),
                SoundEffect::WaveClear => self.play_wave_clear(ctx, vol),
                SoundEffect::GameOver => self.play_game_over(ctx, vol),
                SoundEffect::HighScore => self.play_high_score(ctx, vol),
            }
        }

        // === Sound generators ===

        /// Create an oscillator with gain envelope
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

        /// Laser zap - fast square sweep down
        fn play_shoot(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 880.0, OscillatorType::Square) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.15, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.001, t + 0.1)
                .ok();
            osc.frequency().set_value_at_time(880.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(220.0, t + 0.1)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.1).ok();
        }

        /// Impact thud - sawtooth dropping into the floor
        fn play_hit(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 200.0, OscillatorType::Sawtooth) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.2, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.001, t + 0.15)
                .ok();
            osc.frequency().set_value_at_time(200.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(50.0, t + 0.15)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.15).ok();
        }

        /// Rumbling burst - low sawtooth sweep standing in for filtered noise
        fn play_explosion(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 120.0, OscillatorType::Sawtooth) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.25, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.001, t + 0.3)
                .ok();
            osc.frequency().set_value_at_time(120.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(30.0, t + 0.3)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.3).ok();
        }

        /// Rising two-tone chime
        fn play_pickup(&self, ctx: &AudioContext, vol: f32) {
            let t = ctx.current_time();
            for (start, end) in [(440.0, 1760.0), (660.0, 2640.0)] {
                let Some((osc, gain)) = self.create_osc(ctx, start, OscillatorType::Sine) else {
                    continue;
                };
                gain.gain().set_value_at_time(vol * 0.15, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.001, t + 0.3)
                    .ok();
                osc.frequency().set_value_at_time(start, t).ok();
                osc.frequency()
                    .exponential_ramp_to_value_at_time(end, t + 0.2)
                    .ok();
                osc.start().ok();
                osc.stop_with_when(t + 0.3).ok();
            }
        }

        /// Ascending arpeggio
        fn play_wave_clear(&self, ctx: &AudioContext, vol: f32) {
            let t = ctx.current_time();
            for (i, freq) in [523.0, 659.0, 784.0, 1047.0].into_iter().enumerate() {
                let Some((osc, gain)) = self.create_osc(ctx, freq, OscillatorType::Sine) else {
                    continue;
                };
                let at = t + i as f64 * 0.15;
                gain.gain().set_value_at_time(vol * 0.12, at).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.001, at + 0.2)
                    .ok();
                osc.start_with_when(at).ok();
                osc.stop_with_when(at + 0.2).ok();
            }
        }

        /// Descending square-wave dirge
        fn play_game_over(&self, ctx: &AudioContext, vol: f32) {
            let t = ctx.current_time();
            for (i, freq) in [440.0, 370.0, 311.0, 261.0].into_iter().enumerate() {
                let Some((osc, gain)) = self.create_osc(ctx, freq, OscillatorType::Square) else {
                    continue;
                };
                let at = t + i as f64 * 0.3;
                gain.gain().set_value_at_time(vol * 0.15, at).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.001, at + 0.3)
                    .ok();
                osc.start_with_when(at).ok();
                osc.stop_with_when(at + 0.3).ok();
            }
        }

        /// Triumphant major chord sweep
        fn play_high_score(&self, ctx: &AudioContext, vol: f32) {
            let t = ctx.current_time();
            for freq in [523.0, 659.0, 784.0] {
                let Some((osc, gain)) = self.create_osc(ctx, freq, OscillatorType::Sine) else {
                    continue;
                };
                gain.gain().set_value_at_time(vol * 0.1, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.001, t + 0.5)
                    .ok();
                osc.start().ok();
                osc.stop_with_when(t + 0.5).ok();
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod imp {
    use super::SoundEffect;

    /// Silent stand-in for headless/native builds
    #[derive(Debug, Default)]
    pub struct AudioManager {
        muted: bool,
    }

    impl AudioManager {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn resume(&self) {}

        pub fn set_master_volume(&mut self, _vol: f32) {}

        pub fn set_sfx_volume(&mut self, _vol: f32) {}

        pub fn set_muted(&mut self, muted: bool) {
            self.muted = muted;
        }

        pub fn play(&self, effect: SoundEffect) {
            if !self.muted {
                log::trace!("sfx: {effect:?}");
            }
        }
    }
}

pub use imp::AudioManager;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_cue_mapping() {
        assert_eq!(
            SoundEffect::for_event(&GameEvent::Shoot),
            Some(SoundEffect::Shoot)
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::HighScore(100)),
            Some(SoundEffect::HighScore)
        );
        // Pure visual events have no cue
        assert_eq!(
            SoundEffect::for_event(&GameEvent::HideGravityWell),
            None
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::TeslaArc {
                x1: 0.0,
                y1: 0.0,
                x2: 1.0,
                y2: 1.0
            }),
            None
        );
    }
}
