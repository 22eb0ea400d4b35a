//! HUD view model
//!
//! A plain snapshot of everything the overlay displays, rebuilt from the
//! simulation each frame. The shell renders it however it likes (DOM on
//! wasm, log lines in the headless build); nothing here touches the
//! simulation.

use crate::sim::{GamePhase, GameState, PowerupKind};

/// Active power-up as shown in the HUD bar
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerupStatus {
    pub kind: PowerupKind,
    /// Fraction of the duration remaining, in [0, 1]
    pub remaining: f32,
}

/// One frame's worth of HUD state
#[derive(Debug, Clone, PartialEq)]
pub struct HudSnapshot {
    pub phase: GamePhase,
    pub score: u32,
    pub high_score: u32,
    pub wave: u32,
    pub lives: u32,
    pub max_lives: u32,
    /// Kills inside the current combo window (0 = no combo shown)
    pub combo_count: u32,
    /// Current score multiplier
    pub multiplier: f32,
    /// Remaining shield charges (0 = indicator hidden)
    pub shield_hits: u32,
    pub powerup: Option<PowerupStatus>,
}

impl HudSnapshot {
    pub fn capture(state: &GameState) -> Self {
        let powerup = state.player.active_powerup.map(|kind| {
            let total = kind.def().duration;
            let remaining = if total > 0.0 {
                (state.player.powerup_timer / total).clamp(0.0, 1.0)
            } else {
                0.0
            };
            PowerupStatus { kind, remaining }
        });

        Self {
            phase: state.phase,
            score: state.score,
            high_score: state.high_score,
            wave: state.wave,
            lives: state.lives,
            max_lives: crate::consts::PLAYER_LIVES,
            combo_count: state.combo_count,
            multiplier: state.combo_multiplier(),
            shield_hits: state.player.shield_hits,
            powerup,
        }
    }

    /// Combo label, e.g. "12 HITS x2.1" (empty below two kills)
    pub fn combo_label(&self) -> String {
        if self.combo_count < 2 {
            String::new()
        } else {
            format!("{} HITS x{:.1}", self.combo_count, self.multiplier)
        }
    }
}
