//! Enemy kinds and per-kind constants
//!
//! Tagged variants plus lookup tables - no behavior here beyond data.

use glam::Vec2;

/// Enemy types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnemyKind {
    Drone,
    Rocket,
    Mech,
    Boss,
}

impl EnemyKind {
    /// Hit points before the wave HP multiplier
    pub fn base_hp(self) -> u32 {
        match self {
            EnemyKind::Drone => 1,
            EnemyKind::Rocket => 2,
            EnemyKind::Mech => 4,
            EnemyKind::Boss => 30,
        }
    }

    /// Score awarded on kill (before the combo multiplier)
    pub fn score(self) -> u32 {
        match self {
            EnemyKind::Drone => 10,
            EnemyKind::Rocket => 25,
            EnemyKind::Mech => 50,
            EnemyKind::Boss => 500,
        }
    }

    /// Collision box size (width, height); the boss hull is much wider
    pub fn box_size(self) -> Vec2 {
        match self {
            EnemyKind::Boss => Vec2::new(2.5, 0.8),
            _ => Vec2::new(0.7, 0.7),
        }
    }

    /// HP for a given wave multiplier, rounded up
    pub fn hp_for(self, hp_multiplier: f32) -> u32 {
        (self.base_hp() as f32 * hp_multiplier).ceil() as u32
    }
}

/// One enemy in a formation grid
#[derive(Debug, Clone)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub hp: i32,
    pub max_hp: i32,
    pub grid_col: i32,
    /// -1 for the boss (it floats above the grid)
    pub grid_row: i32,
    /// Position local to the formation; world = local + formation offset
    pub local_pos: Vec2,
    pub alive: bool,
    /// Seconds remaining of the hit-flash visual
    pub hit_flash: f32,
}

impl Enemy {
    pub fn new(kind: EnemyKind, grid_col: i32, grid_row: i32, local_pos: Vec2, hp: u32) -> Self {
        Self {
            kind,
            hp: hp as i32,
            max_hp: hp as i32,
            grid_col,
            grid_row,
            local_pos,
            alive: true,
            hit_flash: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hp_scaling_rounds_up() {
        // 4 * 1.1 = 4.4 -> 5
        assert_eq!(EnemyKind::Mech.hp_for(1.1), 5);
        assert_eq!(EnemyKind::Drone.hp_for(1.0), 1);
        assert_eq!(EnemyKind::Boss.hp_for(1.15), 35);
    }

    #[test]
    fn test_boss_has_wide_box() {
        assert!(EnemyKind::Boss.box_size().x > EnemyKind::Mech.box_size().x);
    }

    #[test]
    fn test_score_table() {
        assert_eq!(EnemyKind::Drone.score(), 10);
        assert_eq!(EnemyKind::Rocket.score(), 25);
        assert_eq!(EnemyKind::Mech.score(), 50);
        assert_eq!(EnemyKind::Boss.score(), 500);
    }
}
