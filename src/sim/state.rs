//! Game state and core simulation types
//!
//! The orchestrator owns everything here exclusively and touches it only
//! during its synchronous per-frame pass. Outbound communication with the
//! audio/fx/HUD/persistence collaborators goes through the `GameEvent`
//! queue - fire-and-forget, drained by the shell after each frame.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::Aabb;
use super::formation::Formation;
use super::pickup::PickupField;
use super::powerup::PowerupKind;
use super::projectile::ProjectilePool;
use crate::consts::*;

/// Current mode of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Title screen, waiting for confirm
    Menu,
    /// Full-screen wave announcement (2 seconds)
    WaveIntro,
    /// Active gameplay
    Playing,
    Paused,
    /// Run ended (out of lives or formation breach)
    GameOver,
}

/// Outbound notification for the external collaborators. The core never
/// waits on these and never consumes a return value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// Audio cue: player fired
    Shoot,
    /// Audio cue: something took a non-lethal hit
    Hit,
    /// Burst fx + explosion cue at a position
    Explosion { x: f32, y: f32, color: u32, count: u32 },
    PowerupCollected,
    WaveCompleted,
    GameOver,
    /// Synchronous mode-change notification for full-screen HUD panels
    PhaseChanged {
        phase: GamePhase,
        score: u32,
        high_score: u32,
        wave: u32,
    },
    /// New high score for the persistence collaborator to store
    HighScore(u32),
    /// Transient arc fx between two points
    TeslaArc { x1: f32, y1: f32, x2: f32, y2: f32 },
    /// Persistent pull marker (re-shown every frame while active)
    ShowGravityWell { x: f32, y: f32 },
    HideGravityWell,
    /// Full-height beam fx at a column
    OrbitalBeam { x: f32 },
}

/// A transient firing clone. Purely visual plus an extra bolt per player
/// shot - no collision footprint of its own.
#[derive(Debug, Clone, Copy)]
pub struct Decoy {
    pub pos: Vec2,
}

/// The player ship
#[derive(Debug)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub speed: f32,
    pub fire_rate: f32,
    pub fire_cooldown: f32,
    /// One-shot flag set during `tick`, consumed by the orchestrator
    pub wants_fire: bool,

    pub active_powerup: Option<PowerupKind>,
    pub powerup_timer: f32,
    pub shield_hits: u32,
    pub phase_active: bool,
    pub decoys: Vec<Decoy>,

    /// Drives the hover bob shared with decoys (visual only)
    bob_time: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    pub fn new() -> Self {
        Self {
            x: 0.0,
            y: PLAYER_Y,
            speed: PLAYER_SPEED,
            fire_rate: PLAYER_FIRE_RATE,
            fire_cooldown: 0.0,
            wants_fire: false,
            active_powerup: None,
            powerup_timer: 0.0,
            shield_hits: 0,
            phase_active: false,
            decoys: Vec::new(),
            bob_time: 0.0,
        }
    }

    /// Move, clamp, and resolve the fire cooldown for one frame.
    /// `move_dir` is -1/0/1, `fire_held` the level state of the fire key.
    pub fn tick(&mut self, dt: f32, move_dir: f32, fire_held: bool) {
        self.bob_time += dt;

        self.x += move_dir * self.speed * dt;
        let half = GAME_WIDTH / 2.0 - 0.5;
        self.x = self.x.clamp(-half, half);

        self.fire_cooldown -= dt;
        self.wants_fire = fire_held && self.fire_cooldown <= 0.0;
        if self.wants_fire {
            self.fire_cooldown = self.fire_interval();
        }

        // Power-up expiry clears everything in one shot
        if self.active_powerup.is_some() && self.powerup_timer > 0.0 {
            self.powerup_timer -= dt;
            if self.powerup_timer <= 0.0 {
                self.clear_powerup();
            }
        }

        // Decoys mirror the hover bob, offset in phase
        let bob = (self.bob_time * 3.0 + 1.0).sin() * 0.05;
        for decoy in &mut self.decoys {
            decoy.pos.y = self.y + bob;
        }
    }

    /// Seconds between shots under the active power-up
    pub fn fire_interval(&self) -> f32 {
        match self.active_powerup {
            Some(PowerupKind::TriShot) => self.fire_rate * 1.2,
            Some(PowerupKind::QuantumBeam) => self.fire_rate * 2.0,
            _ => self.fire_rate,
        }
    }

    /// Activate a power-up, cancelling whatever was active before. At most
    /// one power-up runs at a time; leftover shield charges and decoys are
    /// discarded, never carried over.
    pub fn activate(&mut self, kind: PowerupKind) {
        self.clear_powerup();
        self.active_powerup = Some(kind);

        match kind {
            PowerupKind::PlasmaShield => {
                self.shield_hits = 3;
                self.powerup_timer = kind.def().duration; // until depleted
            }
            PowerupKind::PhaseShift => {
                self.phase_active = true;
                self.powerup_timer = kind.def().duration;
            }
            PowerupKind::HoloDecoy => {
                self.powerup_timer = kind.def().duration;
                for offset in [-3.0, 3.0] {
                    self.decoys.push(Decoy {
                        pos: Vec2::new(self.x + offset, self.y),
                    });
                }
            }
            PowerupKind::OrbitalCannon => {
                // Instant - the orchestrator fires it and clears us
                self.powerup_timer = 0.0;
            }
            _ => {
                self.powerup_timer = kind.def().duration;
            }
        }
    }

    /// Drop the active power-up and all of its sub-state
    pub fn clear_powerup(&mut self) {
        self.active_powerup = None;
        self.powerup_timer = 0.0;
        self.shield_hits = 0;
        self.phase_active = false;
        self.decoys.clear();
    }

    pub fn collision_box(&self) -> Aabb {
        Aabb::from_center_size(Vec2::new(self.x, self.y), Vec2::new(1.2, 0.5))
    }
}

/// Complete session state, owned by the orchestrator
#[derive(Debug)]
pub struct GameState {
    pub phase: GamePhase,

    pub score: u32,
    pub high_score: u32,
    pub lives: u32,
    pub wave: u32,
    pub combo_count: u32,
    pub combo_timer: f32,

    pub player: Player,
    /// None only between wave clear and the next spawn
    pub formation: Option<Formation>,
    pub projectiles: ProjectilePool,
    pub pickups: PickupField,

    pub wave_intro_timer: f32,
    /// Post-hit grace; enemy fire is ignored while positive
    pub invuln_timer: f32,
    pub nano_timer: f32,
    pub tesla_timer: f32,
    pub gravity_timer: f32,
    /// Whether the pull marker is currently shown (so hide fires once)
    pub gravity_visible: bool,

    pub seed: u64,
    pub rng: Pcg32,

    /// Drained by the shell after each frame
    pub events: Vec<GameEvent>,
}

impl GameState {
    pub fn new(seed: u64) -> Self {
        Self {
            phase: GamePhase::Menu,
            score: 0,
            high_score: 0,
            lives: PLAYER_LIVES,
            wave: 1,
            combo_count: 0,
            combo_timer: 0.0,
            player: Player::new(),
            formation: None,
            projectiles: ProjectilePool::new(),
            pickups: PickupField::new(),
            wave_intro_timer: 0.0,
            invuln_timer: 0.0,
            nano_timer: 0.0,
            tesla_timer: 0.0,
            gravity_timer: 0.0,
            gravity_visible: false,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
        }
    }

    /// Switch mode and notify the HUD synchronously
    pub fn set_phase(&mut self, phase: GamePhase) {
        if self.phase == phase {
            return;
        }
        self.phase = phase;
        self.events.push(GameEvent::PhaseChanged {
            phase,
            score: self.score,
            high_score: self.high_score,
            wave: self.wave,
        });
    }

    /// Award a kill: bump the combo, apply the multiplier, track the high
    /// score. The multiplier is monotonic in the combo count, capped 3x.
    pub fn add_score(&mut self, base: u32) {
        self.combo_count += 1;
        self.combo_timer = COMBO_WINDOW;
        let multiplier =
            (1.0 + (self.combo_count - 1) as f32 * 0.1).min(COMBO_MAX_MULTIPLIER);
        self.score += (base as f32 * multiplier).round() as u32;
        if self.score > self.high_score {
            self.high_score = self.score;
            self.events.push(GameEvent::HighScore(self.high_score));
        }
    }

    /// Current score multiplier (1.0 when no combo is running)
    pub fn combo_multiplier(&self) -> f32 {
        if self.combo_count == 0 {
            1.0
        } else {
            (1.0 + (self.combo_count - 1) as f32 * 0.1).min(COMBO_MAX_MULTIPLIER)
        }
    }

    /// Decay the combo window; the count resets only on expiry
    pub fn tick_combo(&mut self, dt: f32) {
        if self.combo_timer > 0.0 {
            self.combo_timer -= dt;
            if self.combo_timer <= 0.0 {
                self.combo_count = 0;
            }
        }
    }

    /// Back to session-start values. The high score survives.
    pub fn reset(&mut self) {
        self.score = 0;
        self.lives = PLAYER_LIVES;
        self.wave = 1;
        self.combo_count = 0;
        self.combo_timer = 0.0;
        self.invuln_timer = 0.0;
        self.nano_timer = 0.0;
        self.tesla_timer = 0.0;
        self.gravity_timer = 0.0;
        self.gravity_visible = false;
    }

    /// Move the queued events out for the shell to dispatch
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_clamps_to_field() {
        let mut p = Player::new();
        for _ in 0..600 {
            p.tick(1.0 / 60.0, 1.0, false);
        }
        assert_eq!(p.x, GAME_WIDTH / 2.0 - 0.5);
        for _ in 0..1200 {
            p.tick(1.0 / 60.0, -1.0, false);
        }
        assert_eq!(p.x, -(GAME_WIDTH / 2.0 - 0.5));
    }

    #[test]
    fn test_fire_cooldown_gates_shots() {
        let mut p = Player::new();
        let dt = 1.0 / 60.0;
        let mut shots = 0;
        for _ in 0..60 {
            p.tick(dt, 0.0, true);
            if p.wants_fire {
                shots += 1;
            }
        }
        // 0.25s interval at 60fps over 1s -> 4 shots (first is immediate)
        assert_eq!(shots, 4);
    }

    #[test]
    fn test_fire_interval_per_powerup() {
        let mut p = Player::new();
        assert_eq!(p.fire_interval(), PLAYER_FIRE_RATE);
        p.activate(PowerupKind::TriShot);
        assert!((p.fire_interval() - PLAYER_FIRE_RATE * 1.2).abs() < 1e-6);
        p.activate(PowerupKind::QuantumBeam);
        assert!((p.fire_interval() - PLAYER_FIRE_RATE * 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_activate_replaces_previous() {
        let mut p = Player::new();
        p.activate(PowerupKind::PlasmaShield);
        assert_eq!(p.shield_hits, 3);
        // Activating something new discards the remaining charges
        p.activate(PowerupKind::TriShot);
        assert_eq!(p.shield_hits, 0);
        assert_eq!(p.active_powerup, Some(PowerupKind::TriShot));
        assert!((p.powerup_timer - 10.0).abs() < 1e-6);
    }

    #[test]
    fn test_decoys_spawn_and_clear() {
        let mut p = Player::new();
        p.activate(PowerupKind::HoloDecoy);
        assert_eq!(p.decoys.len(), 2);
        assert_eq!(p.decoys[0].pos.x, p.x - 3.0);
        assert_eq!(p.decoys[1].pos.x, p.x + 3.0);
        p.activate(PowerupKind::NanoSwarm);
        assert!(p.decoys.is_empty());
    }

    #[test]
    fn test_powerup_expiry_clears_state() {
        let mut p = Player::new();
        p.activate(PowerupKind::PhaseShift);
        assert!(p.phase_active);
        // 4 second duration
        for _ in 0..(4 * 60 + 5) {
            p.tick(1.0 / 60.0, 0.0, false);
        }
        assert!(!p.phase_active);
        assert!(p.active_powerup.is_none());
    }

    #[test]
    fn test_combo_multiplier_caps_at_3x() {
        let mut gs = GameState::new(1);
        for _ in 0..40 {
            gs.add_score(10);
        }
        assert_eq!(gs.combo_count, 40);
        assert_eq!(gs.combo_multiplier(), COMBO_MAX_MULTIPLIER);
        // 21st kill onward is exactly 30 points for a 10-base kill
        let before = gs.score;
        gs.add_score(10);
        assert_eq!(gs.score - before, 30);
    }

    #[test]
    fn test_combo_monotonic_within_window() {
        let mut gs = GameState::new(1);
        let mut last = 0.0;
        for _ in 0..25 {
            gs.add_score(10);
            let m = gs.combo_multiplier();
            assert!(m >= last);
            last = m;
        }
    }

    #[test]
    fn test_combo_resets_after_window() {
        let mut gs = GameState::new(1);
        gs.add_score(10);
        gs.add_score(10);
        assert_eq!(gs.combo_count, 2);
        // No kills for longer than the 2s window
        for _ in 0..150 {
            gs.tick_combo(1.0 / 60.0);
        }
        assert_eq!(gs.combo_count, 0);
        assert_eq!(gs.combo_multiplier(), 1.0);
    }

    #[test]
    fn test_high_score_survives_reset() {
        let mut gs = GameState::new(1);
        gs.add_score(500);
        let high = gs.high_score;
        assert!(high >= 500);
        gs.reset();
        assert_eq!(gs.score, 0);
        assert_eq!(gs.high_score, high);
        assert_eq!(gs.lives, PLAYER_LIVES);
    }

    #[test]
    fn test_set_phase_notifies_once() {
        let mut gs = GameState::new(1);
        gs.set_phase(GamePhase::WaveIntro);
        gs.set_phase(GamePhase::WaveIntro); // no duplicate event
        let events = gs.drain_events();
        let changes = events
            .iter()
            .filter(|e| matches!(e, GameEvent::PhaseChanged { .. }))
            .count();
        assert_eq!(changes, 1);
    }
}
