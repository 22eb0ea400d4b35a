//! Space Invaded - a neon wave-based arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic gameplay simulation (formation, projectiles, power-ups)
//! - `hud`: HUD snapshot projection for the presentation layer
//! - `audio`: Procedural sound cue playback
//! - `highscores`: Persisted high score
//! - `settings`: Player preferences

pub mod audio;
pub mod highscores;
pub mod hud;
pub mod settings;
pub mod sim;

pub use highscores::HighScore;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Nominal frame step (the balance numbers are calibrated for 60 fps)
    pub const FRAME_DT: f32 = 1.0 / 60.0;
    /// Delta-time cap to avoid physics blow-ups on frame hitches
    pub const MAX_FRAME_DT: f32 = 0.05;

    /// Playfield dimensions (world units, origin at center)
    pub const GAME_WIDTH: f32 = 20.0;
    pub const GAME_HEIGHT: f32 = 28.0;

    /// Player ship
    pub const PLAYER_Y: f32 = -12.0;
    pub const PLAYER_SPEED: f32 = 12.0;
    /// Seconds between shots
    pub const PLAYER_FIRE_RATE: f32 = 0.25;
    pub const PLAYER_LIVES: u32 = 3;
    /// Post-hit grace period (seconds)
    pub const INVULN_DURATION: f32 = 2.0;

    /// Projectiles
    pub const PROJECTILE_SPEED: f32 = 25.0;
    pub const ENEMY_PROJECTILE_SPEED: f32 = 12.0;

    /// Enemy formation
    pub const ENEMY_LATERAL_SPEED: f32 = 2.0;
    pub const ENEMY_DROP_DISTANCE: f32 = 0.6;
    /// Fire chance per candidate per 60fps-equivalent frame
    pub const ENEMY_FIRE_CHANCE: f32 = 0.003;
    pub const ENEMY_SPACING: f32 = 1.4;
    /// Y of the formation's top row at wave start
    pub const FORMATION_TOP_Y: f32 = 10.0;
    /// An alive enemy at or below this line ends the game
    pub const BREACH_LINE_Y: f32 = -11.0;

    /// Power-up pickups
    pub const POWERUP_DROP_CHANCE: f32 = 0.07;
    pub const POWERUP_FALL_SPEED: f32 = 4.0;

    /// Wave intro panel duration (seconds)
    pub const WAVE_INTRO_DURATION: f32 = 2.0;

    /// Combo window (seconds without a kill before the multiplier resets)
    pub const COMBO_WINDOW: f32 = 2.0;
    pub const COMBO_MAX_MULTIPLIER: f32 = 3.0;
}

/// Neon palette shared by the fx/HUD collaborators (0xRRGGBB)
pub mod colors {
    pub const PLAYER: u32 = 0x00ffcc;
    pub const EXPLOSION: u32 = 0xff6600;
    pub const ORBITAL: u32 = 0xff00ff;
    pub const TESLA: u32 = 0xffff00;
    pub const GRAVITY: u32 = 0x6600ff;
}
