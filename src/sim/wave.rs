//! Wave generation
//!
//! Pure function from wave number to formation layout. Every 5th wave is a
//! boss wave with a fixed short grid plus the boss itself; regular waves
//! grow in size and scale their multipliers linearly.

use super::enemy::EnemyKind;

/// Formation specification for one wave - a pure value, regenerated
/// deterministically from the wave number
#[derive(Debug, Clone, PartialEq)]
pub struct WaveDef {
    pub wave: u32,
    pub cols: u32,
    pub rows: u32,
    /// One entry per grid row, row 0 first
    pub composition: Vec<EnemyKind>,
    pub speed_multiplier: f32,
    pub fire_rate_multiplier: f32,
    pub hp_multiplier: f32,
    pub is_boss: bool,
}

/// Generate the definition for wave `n`. Total for all n >= 0.
pub fn generate(n: u32) -> WaveDef {
    let is_boss = n % 5 == 0 && n > 0;

    if is_boss {
        return WaveDef {
            wave: n,
            cols: (6 + n / 10).min(10),
            rows: 3,
            composition: vec![EnemyKind::Mech, EnemyKind::Rocket, EnemyKind::Drone],
            speed_multiplier: 1.0 + n as f32 * 0.08,
            fire_rate_multiplier: 1.0 + n as f32 * 0.06,
            hp_multiplier: 1.0 + n as f32 * 0.15,
            is_boss: true,
        };
    }

    let cols = (8 + n / 3).min(12);
    let rows = (5 + n / 4).min(8);

    // Leading rows are drones, middle rockets, trailing mechs
    let composition = (0..rows)
        .map(|r| {
            let ratio = r as f32 / (rows - 1) as f32;
            if ratio < 0.4 {
                EnemyKind::Drone
            } else if ratio < 0.75 {
                EnemyKind::Rocket
            } else {
                EnemyKind::Mech
            }
        })
        .collect();

    WaveDef {
        wave: n,
        cols,
        rows,
        composition,
        speed_multiplier: 1.0 + n as f32 * 0.06,
        fire_rate_multiplier: 1.0 + n as f32 * 0.04,
        hp_multiplier: 1.0 + n as f32 * 0.1,
        is_boss: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_wave_5_is_boss() {
        let def = generate(5);
        assert!(def.is_boss);
        assert_eq!(def.rows, 3);
        assert_eq!(def.cols, 6);
        assert_eq!(
            def.composition,
            vec![EnemyKind::Mech, EnemyKind::Rocket, EnemyKind::Drone]
        );
    }

    #[test]
    fn test_wave_1_layout() {
        let def = generate(1);
        assert!(!def.is_boss);
        assert_eq!(def.cols, 8);
        assert_eq!(def.rows, 5);
        assert_eq!(def.composition.len(), 5);
        // Front row is always drones
        assert_eq!(def.composition[0], EnemyKind::Drone);
        // Back row is always mechs
        assert_eq!(def.composition[4], EnemyKind::Mech);
    }

    #[test]
    fn test_caps() {
        let def = generate(100);
        assert!(def.is_boss);
        assert_eq!(def.cols, 10);
        let def = generate(101);
        assert_eq!(def.cols, 12);
        assert_eq!(def.rows, 8);
    }

    #[test]
    fn test_multipliers_scale() {
        let d3 = generate(3);
        assert!((d3.speed_multiplier - 1.18).abs() < 1e-5);
        assert!((d3.fire_rate_multiplier - 1.12).abs() < 1e-5);
        assert!((d3.hp_multiplier - 1.3).abs() < 1e-5);
        let d10 = generate(10);
        assert!((d10.speed_multiplier - 1.8).abs() < 1e-5);
        assert!((d10.hp_multiplier - 2.5).abs() < 1e-5);
    }

    proptest! {
        #[test]
        fn prop_deterministic_and_total(n in 0u32..10_000) {
            let a = generate(n);
            let b = generate(n);
            prop_assert_eq!(&a, &b);
            prop_assert_eq!(a.is_boss, n % 5 == 0 && n > 0);
            prop_assert_eq!(a.composition.len() as u32, a.rows);
            prop_assert!(a.cols >= 1);
            prop_assert!(a.hp_multiplier >= 1.0);
        }
    }
}
