//! Deterministic gameplay simulation
//!
//! All combat logic lives here. This module must be pure and deterministic:
//! - Delta-time scaled, capped at `consts::MAX_FRAME_DT`
//! - Seeded RNG only
//! - No rendering, audio or platform dependencies; outward communication
//!   happens through the `GameEvent` queue drained by the shell

pub mod collision;
pub mod enemy;
pub mod formation;
pub mod pickup;
pub mod powerup;
pub mod projectile;
pub mod state;
pub mod tick;
pub mod wave;

pub use collision::Aabb;
pub use enemy::{Enemy, EnemyKind};
pub use formation::Formation;
pub use pickup::{Pickup, PickupField};
pub use powerup::{ALL_POWERUPS, PowerupDef, PowerupKind};
pub use projectile::{Owner, Projectile, ProjectilePool};
pub use state::{GameEvent, GamePhase, GameState, Player};
pub use tick::{TickInput, tick};
pub use wave::{WaveDef, generate};
