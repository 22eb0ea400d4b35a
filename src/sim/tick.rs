//! Per-frame orchestrator
//!
//! `tick` is the single entry point for advancing the simulation. The shell
//! samples input, calls it once per frame, then drains the event queue. The
//! update order within a playing frame is fixed: player movement, firing,
//! formation sweep, enemy fire, end conditions, projectile/pickup motion,
//! collisions, ongoing power-up effects, combo decay.

use glam::Vec2;
use rand::Rng;

use super::formation::Formation;
use super::powerup::PowerupKind;
use super::state::{GameEvent, GamePhase, GameState};
use super::wave;
use crate::consts::*;
use crate::colors;

/// One frame of sampled input. `left`/`right`/`fire` are level state;
/// `fire_pressed`, `pause` and `confirm` are edge-triggered (true on the
/// press frame only). `fire_pressed` guarantees a quick tap released
/// between samples still fires.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub fire: bool,
    pub fire_pressed: bool,
    pub pause: bool,
    pub confirm: bool,
}

impl TickInput {
    fn move_dir(&self) -> f32 {
        match (self.left, self.right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
}

/// Advance the simulation by one frame. `dt` is wall-clock seconds since
/// the last call, capped so a stalled tab cannot tunnel entities through
/// each other.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    let dt = dt.min(MAX_FRAME_DT);

    handle_input(state, input);

    match state.phase {
        GamePhase::Playing => update_playing(state, input, dt),
        GamePhase::WaveIntro => update_wave_intro(state, dt),
        _ => {}
    }
}

fn handle_input(state: &mut GameState, input: &TickInput) {
    match state.phase {
        GamePhase::Menu | GamePhase::GameOver => {
            if input.confirm {
                start_new_game(state);
            }
        }
        GamePhase::Playing => {
            if input.pause {
                state.set_phase(GamePhase::Paused);
            }
        }
        GamePhase::Paused => {
            if input.pause || input.confirm {
                state.set_phase(GamePhase::Playing);
            }
        }
        GamePhase::WaveIntro => {}
    }
}

fn start_new_game(state: &mut GameState) {
    state.reset();
    state.player.clear_powerup();
    state.player.x = 0.0;
    state.projectiles.clear();
    state.pickups.clear();
    state.formation = None;
    start_wave(state, 1);
}

fn start_wave(state: &mut GameState, wave_num: u32) {
    state.wave = wave_num;
    state.wave_intro_timer = WAVE_INTRO_DURATION;
    state.set_phase(GamePhase::WaveIntro);

    state.projectiles.clear();
    state.pickups.clear();

    let def = wave::generate(wave_num);
    log::info!(
        "wave {wave_num}: {}x{} grid{}",
        def.cols,
        def.rows,
        if def.is_boss { " + boss" } else { "" }
    );
    state.formation = Some(Formation::new(&def));
}

fn update_wave_intro(state: &mut GameState, dt: f32) {
    state.wave_intro_timer -= dt;
    if state.wave_intro_timer <= 0.0 {
        state.set_phase(GamePhase::Playing);
    }
}

fn update_playing(state: &mut GameState, input: &TickInput, dt: f32) {
    state.player.tick(dt, input.move_dir(), input.fire || input.fire_pressed);

    if state.invuln_timer > 0.0 {
        state.invuln_timer -= dt;
    }

    if state.player.wants_fire {
        state.events.push(GameEvent::Shoot);
        let (px, py) = (state.player.x, state.player.y);
        match state.player.active_powerup {
            Some(PowerupKind::TriShot) => {
                state.projectiles.fire_player_bolt(px, py, -0.15, false);
                state.projectiles.fire_player_bolt(px, py, 0.0, false);
                state.projectiles.fire_player_bolt(px, py, 0.15, false);
            }
            Some(PowerupKind::QuantumBeam) => {
                state.projectiles.fire_beam(px, py);
            }
            _ => {
                state.projectiles.fire_player_bolt(px, py, 0.0, false);
            }
        }
        // Decoys echo every shot with a straight bolt
        for i in 0..state.player.decoys.len() {
            let pos = state.player.decoys[i].pos;
            state.projectiles.fire_player_bolt(pos.x, pos.y, 0.0, false);
        }
    }

    if let Some(mut formation) = state.formation.take() {
        let chrono = state.player.active_powerup == Some(PowerupKind::ChronoField);
        formation.tick(dt, chrono);

        if let Some(pos) = formation.choose_firer(dt, &mut state.rng) {
            state.projectiles.fire_enemy_bolt(pos.x, pos.y);
        }

        let breached = formation.has_breached();
        let cleared = formation.is_cleared();
        state.formation = Some(formation);

        if breached {
            game_over(state);
            return;
        }
        if cleared {
            state.events.push(GameEvent::WaveCompleted);
            let next = state.wave + 1;
            start_wave(state, next);
            return;
        }
    }

    state.projectiles.tick(dt);
    state.pickups.tick(dt);

    check_collisions(state);
    update_powerup_effects(state, dt);
    state.tick_combo(dt);
}

fn check_collisions(state: &mut GameState) {
    // Taken out for the duration so damage and scoring can interleave
    let Some(mut formation) = state.formation.take() else {
        return;
    };

    // Player projectiles vs enemies. Piercing shots damage everything in
    // their path this frame; regular shots are consumed by the first hit.
    for pi in state.projectiles.player_indices() {
        let proj = match state.projectiles.get(pi) {
            Some(p) if p.alive => p.clone(),
            _ => continue,
        };
        let proj_box = proj.collision_box();

        for ei in formation.alive_indices() {
            if !formation.enemy(ei).alive {
                continue;
            }
            if !proj_box.intersects(&formation.collision_box(ei)) {
                continue;
            }

            let pos = formation.world_pos(ei);
            let kind = formation.enemy(ei).kind;
            if formation.apply_damage(ei, proj.damage) {
                award_kill(state, pos, kind.score(), colors::EXPLOSION, 30);
                if state.rng.random::<f32>() < POWERUP_DROP_CHANCE {
                    state.pickups.spawn(pos.x, pos.y, &mut state.rng);
                }
            } else {
                state.events.push(GameEvent::Hit);
            }

            if !proj.piercing {
                state.projectiles.kill(pi);
                break;
            }
        }
    }

    // Enemy projectiles vs player. The whole pass is skipped while the
    // player is intangible, so shots fly straight through unconsumed.
    if state.invuln_timer <= 0.0 && !state.player.phase_active {
        let player_box = state.player.collision_box();
        for pi in state.projectiles.enemy_indices() {
            let Some(proj) = state.projectiles.get(pi) else {
                continue;
            };
            if proj.alive && proj.collision_box().intersects(&player_box) {
                state.projectiles.kill(pi);
                player_take_hit(state);
                break;
            }
        }
    }

    // Player vs falling pickups
    let player_box = state.player.collision_box();
    for i in state.pickups.alive_indices() {
        let hit = state
            .pickups
            .get(i)
            .is_some_and(|p| p.alive && p.collision_box().intersects(&player_box));
        if hit {
            if let Some(kind) = state.pickups.collect(i) {
                state.events.push(GameEvent::PowerupCollected);
                activate_powerup(state, &mut formation, kind);
            }
        }
    }

    state.formation = Some(formation);
}

/// Kill consequences shared by every damage source: fx burst, scoring,
/// high-score tracking via `add_score`.
fn award_kill(state: &mut GameState, pos: Vec2, score: u32, color: u32, count: u32) {
    state.events.push(GameEvent::Explosion {
        x: pos.x,
        y: pos.y,
        color,
        count,
    });
    state.add_score(score);
}

fn player_take_hit(state: &mut GameState) {
    // Shield charges absorb the hit before lives do
    if state.player.active_powerup == Some(PowerupKind::PlasmaShield)
        && state.player.shield_hits > 0
    {
        state.player.shield_hits -= 1;
        state.events.push(GameEvent::Hit);
        if state.player.shield_hits == 0 {
            state.player.clear_powerup();
        }
        return;
    }

    state.lives = state.lives.saturating_sub(1);
    state.events.push(GameEvent::Hit);
    state.events.push(GameEvent::Explosion {
        x: state.player.x,
        y: state.player.y,
        color: colors::PLAYER,
        count: 20,
    });
    state.invuln_timer = INVULN_DURATION;

    if state.lives == 0 {
        game_over(state);
    }
}

fn game_over(state: &mut GameState) {
    log::info!("game over at wave {} with score {}", state.wave, state.score);
    state.events.push(GameEvent::GameOver);
    state.set_phase(GamePhase::GameOver);
    state.player.clear_powerup();
}

fn activate_powerup(state: &mut GameState, formation: &mut Formation, kind: PowerupKind) {
    log::debug!("power-up collected: {}", kind.def().name);
    state.player.activate(kind);

    match kind {
        PowerupKind::OrbitalCannon => {
            fire_orbital_cannon(state, formation);
            state.player.clear_powerup();
        }
        PowerupKind::GravityWell => {
            state.gravity_timer = 0.0;
            state.events.push(GameEvent::ShowGravityWell {
                x: state.player.x,
                y: state.player.y + 5.0,
            });
            state.gravity_visible = true;
        }
        PowerupKind::NanoSwarm => state.nano_timer = 0.0,
        PowerupKind::TeslaCoil => state.tesla_timer = 0.0,
        _ => {}
    }
}

/// Instant strike: everything near the player's column takes massive damage
fn fire_orbital_cannon(state: &mut GameState, formation: &mut Formation) {
    state.events.push(GameEvent::OrbitalBeam { x: state.player.x });
    for ei in formation.alive_indices() {
        let pos = formation.world_pos(ei);
        if (pos.x - state.player.x).abs() < 1.5 {
            let kind = formation.enemy(ei).kind;
            if formation.apply_damage(ei, 100) {
                award_kill(state, pos, kind.score(), colors::ORBITAL, 30);
            }
        }
    }
}

fn update_powerup_effects(state: &mut GameState, dt: f32) {
    let Some(mut formation) = state.formation.take() else {
        return;
    };

    match state.player.active_powerup {
        // Periodic homing dart at a random alive enemy
        Some(PowerupKind::NanoSwarm) => {
            state.nano_timer -= dt;
            if state.nano_timer <= 0.0 {
                state.nano_timer = 0.2;
                let targets = formation.alive_indices();
                if !targets.is_empty() {
                    let ti = targets[state.rng.random_range(0..targets.len())];
                    let target = formation.world_pos(ti);
                    let jitter = (state.rng.random::<f32>() - 0.5) * 0.5;
                    state.projectiles.fire_homing(
                        state.player.x + jitter,
                        state.player.y + 0.3,
                        target.x,
                        target.y,
                    );
                }
            }
        }

        // Periodic chain lightning through the nearest enemies
        Some(PowerupKind::TeslaCoil) => {
            state.tesla_timer -= dt;
            if state.tesla_timer <= 0.0 {
                state.tesla_timer = 0.3;
                let player_pos = Vec2::new(state.player.x, state.player.y);

                let mut nearest: Vec<(usize, Vec2)> = formation
                    .alive_indices()
                    .into_iter()
                    .map(|i| (i, formation.world_pos(i)))
                    .collect();
                nearest.sort_by(|a, b| {
                    let da = a.1.distance(player_pos);
                    let db = b.1.distance(player_pos);
                    da.total_cmp(&db)
                });
                nearest.truncate(4);

                let mut prev = player_pos;
                for (ei, pos) in nearest {
                    state.events.push(GameEvent::TeslaArc {
                        x1: prev.x,
                        y1: prev.y,
                        x2: pos.x,
                        y2: pos.y,
                    });
                    let kind = formation.enemy(ei).kind;
                    if formation.apply_damage(ei, 1) {
                        award_kill(state, pos, kind.score(), colors::TESLA, 30);
                        if state.rng.random::<f32>() < POWERUP_DROP_CHANCE {
                            state.pickups.spawn(pos.x, pos.y, &mut state.rng);
                        }
                    }
                    prev = pos;
                }
            }
        }

        // Periodic area pulse around a point above the player. Kills here
        // never roll pickup drops.
        Some(PowerupKind::GravityWell) => {
            state.gravity_timer -= dt;
            let center = Vec2::new(state.player.x, state.player.y + 5.0);

            // Marker follows the player every frame
            state.events.push(GameEvent::ShowGravityWell {
                x: center.x,
                y: center.y,
            });
            state.gravity_visible = true;

            if state.gravity_timer <= 0.0 {
                state.gravity_timer = 0.5;
                for ei in formation.alive_indices() {
                    let pos = formation.world_pos(ei);
                    if pos.distance(center) < 5.0 {
                        let kind = formation.enemy(ei).kind;
                        if formation.apply_damage(ei, 1) {
                            award_kill(state, pos, kind.score(), colors::GRAVITY, 30);
                        }
                    }
                }
            }
        }

        _ => {
            if state.gravity_visible {
                state.events.push(GameEvent::HideGravityWell);
                state.gravity_visible = false;
            }
        }
    }

    state.formation = Some(formation);
}
