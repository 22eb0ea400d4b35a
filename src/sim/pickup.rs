//! Falling power-up pickups
//!
//! Spawned probabilistically on enemy death, fall straight down, collected
//! on contact with the player. Same lazy-compaction lifecycle as the
//! projectile pool, with a smaller threshold.

use glam::Vec2;
use rand::Rng;

use super::collision::Aabb;
use super::powerup::{ALL_POWERUPS, PowerupKind};
use crate::consts::POWERUP_FALL_SPEED;

/// Pickups below this line are gone
const FLOOR_Y: f32 = -15.0;

const COMPACT_THRESHOLD: usize = 50;

#[derive(Debug, Clone)]
pub struct Pickup {
    pub kind: PowerupKind,
    pub pos: Vec2,
    pub alive: bool,
}

impl Pickup {
    pub fn collision_box(&self) -> Aabb {
        Aabb::from_center_size(self.pos, Vec2::new(0.7, 0.7))
    }
}

/// All falling pickups currently in the field
#[derive(Debug, Default)]
pub struct PickupField {
    pickups: Vec<Pickup>,
}

impl PickupField {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn a pickup of a uniformly random kind at (x, y)
    pub fn spawn<R: Rng>(&mut self, x: f32, y: f32, rng: &mut R) {
        let kind = ALL_POWERUPS[rng.random_range(0..ALL_POWERUPS.len())];
        self.spawn_kind(kind, x, y);
    }

    pub fn spawn_kind(&mut self, kind: PowerupKind, x: f32, y: f32) {
        self.pickups.push(Pickup {
            kind,
            pos: Vec2::new(x, y),
            alive: true,
        });
    }

    pub fn tick(&mut self, dt: f32) {
        for p in &mut self.pickups {
            if !p.alive {
                continue;
            }
            p.pos.y -= POWERUP_FALL_SPEED * dt;
            if p.pos.y < FLOOR_Y {
                p.alive = false;
            }
        }

        if self.pickups.len() > COMPACT_THRESHOLD {
            self.pickups.retain(|p| p.alive);
        }
    }

    /// Remove on collection; returns the kind granted
    pub fn collect(&mut self, index: usize) -> Option<PowerupKind> {
        let p = self.pickups.get_mut(index)?;
        if !p.alive {
            return None;
        }
        p.alive = false;
        Some(p.kind)
    }

    pub fn clear(&mut self) {
        self.pickups.clear();
    }

    pub fn get(&self, index: usize) -> Option<&Pickup> {
        self.pickups.get(index)
    }

    /// Indices of alive pickups
    pub fn alive_indices(&self) -> Vec<usize> {
        self.pickups
            .iter()
            .enumerate()
            .filter(|(_, p)| p.alive)
            .map(|(i, _)| i)
            .collect()
    }

    pub fn alive_count(&self) -> usize {
        self.pickups.iter().filter(|p| p.alive).count()
    }

    pub fn iter_alive(&self) -> impl Iterator<Item = &Pickup> {
        self.pickups.iter().filter(|p| p.alive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_falls_and_expires() {
        let mut field = PickupField::new();
        field.spawn_kind(PowerupKind::TriShot, 0.0, -14.9);
        field.tick(0.1);
        // Fell 0.4 units past the floor
        assert_eq!(field.alive_count(), 0);
    }

    #[test]
    fn test_collect_once() {
        let mut field = PickupField::new();
        field.spawn_kind(PowerupKind::TeslaCoil, 1.0, 2.0);
        assert_eq!(field.collect(0), Some(PowerupKind::TeslaCoil));
        assert_eq!(field.collect(0), None);
        assert_eq!(field.alive_count(), 0);
    }

    #[test]
    fn test_spawn_uses_catalog() {
        let mut field = PickupField::new();
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..100 {
            field.spawn(0.0, 5.0, &mut rng);
        }
        assert_eq!(field.alive_count(), 100);
        for p in field.iter_alive() {
            assert!(ALL_POWERUPS.contains(&p.kind));
        }
    }

    #[test]
    fn test_compaction_threshold() {
        let mut field = PickupField::new();
        for _ in 0..60 {
            field.spawn_kind(PowerupKind::NanoSwarm, 0.0, 5.0);
        }
        for i in 0..30 {
            field.collect(i);
        }
        field.tick(0.0);
        assert_eq!(field.alive_count(), 30);
        assert_eq!(field.alive_indices().len(), 30);
    }
}
