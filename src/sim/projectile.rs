//! Projectile pool
//!
//! Owns every in-flight shot. Dense storage with alive flags; dead entries
//! are compacted lazily once the pool grows past a threshold, matching the
//! arena-style lifecycle used by the pickup field.

use glam::Vec2;

use super::collision::Aabb;
use crate::consts::{ENEMY_PROJECTILE_SPEED, PROJECTILE_SPEED};

/// Who fired a projectile (decides which collision pass sees it)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Owner {
    Player,
    Enemy,
}

#[derive(Debug, Clone)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    pub owner: Owner,
    /// Piercing shots survive hits and keep traveling
    pub piercing: bool,
    pub damage: i32,
    pub alive: bool,
}

impl Projectile {
    /// Collision box; player shots are slightly larger than enemy shots
    pub fn collision_box(&self) -> Aabb {
        let size = match self.owner {
            Owner::Player => Vec2::new(0.3, 0.5),
            Owner::Enemy => Vec2::new(0.2, 0.3),
        };
        Aabb::from_center_size(self.pos, size)
    }
}

/// Compact once more than this many entries (alive or dead) accumulate
const COMPACT_THRESHOLD: usize = 200;

/// Generous despawn bounds - well outside the visible field
const OUT_TOP: f32 = 18.0;
const OUT_BOTTOM: f32 = -16.0;
const OUT_SIDE: f32 = 15.0;

/// Pool of all live shots (player bolts, enemy bolts, beams, homing darts)
#[derive(Debug, Default)]
pub struct ProjectilePool {
    projectiles: Vec<Projectile>,
}

impl ProjectilePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Player bolt; `angle` is radians off vertical, positive leaning right
    pub fn fire_player_bolt(&mut self, x: f32, y: f32, angle: f32, piercing: bool) {
        self.projectiles.push(Projectile {
            pos: Vec2::new(x, y + 0.3),
            vel: Vec2::new(angle.sin(), angle.cos()) * PROJECTILE_SPEED,
            owner: Owner::Player,
            piercing,
            damage: 1,
            alive: true,
        });
    }

    pub fn fire_enemy_bolt(&mut self, x: f32, y: f32) {
        self.projectiles.push(Projectile {
            pos: Vec2::new(x, y - 0.3),
            vel: Vec2::new(0.0, -ENEMY_PROJECTILE_SPEED),
            owner: Owner::Enemy,
            piercing: false,
            damage: 1,
            alive: true,
        });
    }

    /// Quantum Beam shot: fast, piercing, double damage
    pub fn fire_beam(&mut self, x: f32, y: f32) {
        self.projectiles.push(Projectile {
            pos: Vec2::new(x, y + 0.5),
            vel: Vec2::new(0.0, PROJECTILE_SPEED * 2.0),
            owner: Owner::Player,
            piercing: true,
            damage: 2,
            alive: true,
        });
    }

    /// Nano Swarm dart aimed at the target's position at spawn time only -
    /// there is no re-aiming after launch
    pub fn fire_homing(&mut self, x: f32, y: f32, target_x: f32, target_y: f32) {
        let delta = Vec2::new(target_x - x, target_y - y);
        let dir = delta.normalize_or(Vec2::Y);
        self.projectiles.push(Projectile {
            pos: Vec2::new(x, y),
            vel: dir * (PROJECTILE_SPEED * 0.8),
            owner: Owner::Player,
            piercing: false,
            damage: 1,
            alive: true,
        });
    }

    /// Advance all alive projectiles and expire the ones leaving the field
    pub fn tick(&mut self, dt: f32) {
        for p in &mut self.projectiles {
            if !p.alive {
                continue;
            }
            p.pos += p.vel * dt;
            if p.pos.y > OUT_TOP || p.pos.y < OUT_BOTTOM || p.pos.x.abs() > OUT_SIDE {
                p.alive = false;
            }
        }

        if self.projectiles.len() > COMPACT_THRESHOLD {
            self.projectiles.retain(|p| p.alive);
        }
    }

    /// Mark dead immediately (hit consumption)
    pub fn kill(&mut self, index: usize) {
        if let Some(p) = self.projectiles.get_mut(index) {
            p.alive = false;
        }
    }

    pub fn clear(&mut self) {
        self.projectiles.clear();
    }

    pub fn get(&self, index: usize) -> Option<&Projectile> {
        self.projectiles.get(index)
    }

    /// Indices of alive player-owned projectiles, in fire order
    pub fn player_indices(&self) -> Vec<usize> {
        self.indices_for(Owner::Player)
    }

    /// Indices of alive enemy-owned projectiles, in fire order
    pub fn enemy_indices(&self) -> Vec<usize> {
        self.indices_for(Owner::Enemy)
    }

    fn indices_for(&self, owner: Owner) -> Vec<usize> {
        self.projectiles
            .iter()
            .enumerate()
            .filter(|(_, p)| p.alive && p.owner == owner)
            .map(|(i, _)| i)
            .collect()
    }

    pub fn alive_count(&self) -> usize {
        self.projectiles.iter().filter(|p| p.alive).count()
    }

    pub fn iter_alive(&self) -> impl Iterator<Item = &Projectile> {
        self.projectiles.iter().filter(|p| p.alive)
    }

    #[cfg(test)]
    pub fn raw_len(&self) -> usize {
        self.projectiles.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_bolt_goes_up() {
        let mut pool = ProjectilePool::new();
        pool.fire_player_bolt(0.0, -12.0, 0.0, false);
        let p = pool.get(0).unwrap();
        assert_eq!(p.owner, Owner::Player);
        assert!(p.vel.y > 0.0);
        assert_eq!(p.vel.x, 0.0);
        assert!((p.pos.y - (-11.7)).abs() < 1e-4);
    }

    #[test]
    fn test_spread_bolt_angle() {
        let mut pool = ProjectilePool::new();
        pool.fire_player_bolt(0.0, -12.0, 0.15, false);
        let p = pool.get(0).unwrap();
        assert!((p.vel.x - 0.15f32.sin() * PROJECTILE_SPEED).abs() < 1e-4);
        assert!(p.vel.y > 0.0);
    }

    #[test]
    fn test_enemy_bolt_goes_down() {
        let mut pool = ProjectilePool::new();
        pool.fire_enemy_bolt(1.0, 5.0);
        let p = pool.get(0).unwrap();
        assert_eq!(p.owner, Owner::Enemy);
        assert_eq!(p.vel, Vec2::new(0.0, -ENEMY_PROJECTILE_SPEED));
    }

    #[test]
    fn test_beam_is_piercing_double_damage() {
        let mut pool = ProjectilePool::new();
        pool.fire_beam(0.0, -12.0);
        let p = pool.get(0).unwrap();
        assert!(p.piercing);
        assert_eq!(p.damage, 2);
        assert_eq!(p.vel.y, PROJECTILE_SPEED * 2.0);
    }

    #[test]
    fn test_homing_aims_at_spawn_target() {
        let mut pool = ProjectilePool::new();
        pool.fire_homing(0.0, 0.0, 3.0, 4.0);
        let p = pool.get(0).unwrap();
        let speed = p.vel.length();
        assert!((speed - PROJECTILE_SPEED * 0.8).abs() < 1e-3);
        // Direction (3,4)/5
        assert!((p.vel.x / speed - 0.6).abs() < 1e-4);
        assert!((p.vel.y / speed - 0.8).abs() < 1e-4);
    }

    #[test]
    fn test_out_of_bounds_expiry() {
        let mut pool = ProjectilePool::new();
        pool.fire_player_bolt(0.0, 17.5, 0.0, false);
        pool.tick(0.1);
        assert_eq!(pool.alive_count(), 0);
    }

    #[test]
    fn test_lazy_compaction_keeps_alive() {
        let mut pool = ProjectilePool::new();
        for i in 0..250 {
            pool.fire_player_bolt(0.0, 0.0, 0.0, false);
            if i % 2 == 0 {
                pool.kill(i);
            }
        }
        assert_eq!(pool.raw_len(), 250);
        pool.tick(0.0);
        // Dead entries removed, alive ones untouched
        assert_eq!(pool.raw_len(), pool.alive_count());
        assert_eq!(pool.alive_count(), 125);
    }

    #[test]
    fn test_owner_views() {
        let mut pool = ProjectilePool::new();
        pool.fire_player_bolt(0.0, 0.0, 0.0, false);
        pool.fire_enemy_bolt(0.0, 0.0);
        pool.fire_player_bolt(1.0, 0.0, 0.0, false);
        assert_eq!(pool.player_indices(), vec![0, 2]);
        assert_eq!(pool.enemy_indices(), vec![1]);
        pool.kill(0);
        assert_eq!(pool.player_indices(), vec![2]);
    }
}
