//! Power-up catalog
//!
//! Ten temporary combat modifiers. Per-kind constants live in a lookup
//! table keyed by the tag; activation behavior is on `Player`, ongoing
//! per-frame behavior on the orchestrator.

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PowerupKind {
    /// Absorbs 3 hits, no timer
    PlasmaShield,
    /// Fires 3 spread projectiles
    TriShot,
    /// Slows enemies to 50%
    ChronoField,
    /// Pulses damage around a point above the player
    GravityWell,
    /// Piercing laser through all enemies
    QuantumBeam,
    /// Spawns 2 firing decoy copies
    HoloDecoy,
    /// Auto-targeting mini projectiles
    NanoSwarm,
    /// Invulnerable, pass through shots
    PhaseShift,
    /// Chain lightning between enemies
    TeslaCoil,
    /// Instant: massive beam clears a column
    OrbitalCannon,
}

/// Every kind, in pickup-roll order
pub const ALL_POWERUPS: [PowerupKind; 10] = [
    PowerupKind::PlasmaShield,
    PowerupKind::TriShot,
    PowerupKind::ChronoField,
    PowerupKind::GravityWell,
    PowerupKind::QuantumBeam,
    PowerupKind::HoloDecoy,
    PowerupKind::NanoSwarm,
    PowerupKind::PhaseShift,
    PowerupKind::TeslaCoil,
    PowerupKind::OrbitalCannon,
];

/// Static per-kind data (display + timing + fx colors)
#[derive(Debug, Clone, Copy)]
pub struct PowerupDef {
    pub name: &'static str,
    pub description: &'static str,
    /// Seconds; 0 = instant, effectively-infinite for until-depleted
    pub duration: f32,
    pub color: u32,
    pub glow_color: u32,
}

impl PowerupKind {
    pub fn def(self) -> &'static PowerupDef {
        match self {
            PowerupKind::PlasmaShield => &PowerupDef {
                name: "Plasma Shield",
                description: "Absorbs 3 hits",
                duration: 999.0, // until depleted
                color: 0x00aaff,
                glow_color: 0x0088ff,
            },
            PowerupKind::TriShot => &PowerupDef {
                name: "Tri-Shot",
                description: "Fires 3 spread projectiles",
                duration: 10.0,
                color: 0xff6600,
                glow_color: 0xff4400,
            },
            PowerupKind::ChronoField => &PowerupDef {
                name: "Chrono Field",
                description: "Slows enemies to 50%",
                duration: 8.0,
                color: 0xaa00ff,
                glow_color: 0x8800cc,
            },
            PowerupKind::GravityWell => &PowerupDef {
                name: "Gravity Well",
                description: "Pulls & damages nearby enemies",
                duration: 6.0,
                color: 0x6600ff,
                glow_color: 0x4400cc,
            },
            PowerupKind::QuantumBeam => &PowerupDef {
                name: "Quantum Beam",
                description: "Piercing laser through all enemies",
                duration: 5.0,
                color: 0x00ffff,
                glow_color: 0x00cccc,
            },
            PowerupKind::HoloDecoy => &PowerupDef {
                name: "Holo Decoy",
                description: "Spawns 2 firing decoy copies",
                duration: 12.0,
                color: 0x00ff66,
                glow_color: 0x00cc44,
            },
            PowerupKind::NanoSwarm => &PowerupDef {
                name: "Nano Swarm",
                description: "Auto-targeting mini projectiles",
                duration: 8.0,
                color: 0xccff00,
                glow_color: 0xaacc00,
            },
            PowerupKind::PhaseShift => &PowerupDef {
                name: "Phase Shift",
                description: "Invulnerable, pass through shots",
                duration: 4.0,
                color: 0xffffff,
                glow_color: 0xccccff,
            },
            PowerupKind::TeslaCoil => &PowerupDef {
                name: "Tesla Coil",
                description: "Chain lightning between enemies",
                duration: 7.0,
                color: 0xffff00,
                glow_color: 0xcccc00,
            },
            PowerupKind::OrbitalCannon => &PowerupDef {
                name: "Orbital Cannon",
                description: "Massive beam clears a column",
                duration: 0.0, // instant
                color: 0xff00ff,
                glow_color: 0xcc00cc,
            },
        }
    }

    /// True for effects resolved entirely at activation time
    pub fn is_instant(self) -> bool {
        matches!(self, PowerupKind::OrbitalCannon)
    }
}
