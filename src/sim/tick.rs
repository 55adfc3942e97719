//! Per-frame simulation step
//!
//! Fixed order every frame: restart -> selections -> steering -> spawning ->
//! firing -> projectile motion -> collisions. Rendering reads the state after
//! `tick` returns.

use super::collision::{CollisionEvent, resolve_projectile_hits, resolve_ship_hits};
use super::motion::{advance_projectile, steer_ship};
use super::spawn::{ShapeSelector, spawn_edge_hazard};
use super::state::GameState;
use super::weapon::fire;

/// Commands for a single frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameInput {
    /// Held movement keys
    pub move_up: bool,
    pub move_down: bool,
    pub move_left: bool,
    pub move_right: bool,
    /// Fire held
    pub fire: bool,
    /// Cycle weapon (pressed this frame)
    pub cycle_weapon: bool,
    /// Shape picked this frame, if any
    pub select_shape: Option<ShapeSelector>,
    /// Restart (pressed this frame; ignored while the ship lives)
    pub restart: bool,
}

/// Advance the game by one frame of `dt` seconds.
///
/// Returns what the collision passes did so callers can react (sound, score).
pub fn tick(state: &mut GameState, input: &FrameInput, dt: f32) -> Vec<CollisionEvent> {
    state.frame += 1;
    state.elapsed += dt;

    if input.restart && !state.ship.is_alive() {
        state.restart();
    }

    if input.cycle_weapon {
        state.weapon = state.weapon.next();
        log::info!("Weapon: {}", state.weapon.display_name());
    }
    if let Some(shape) = input.select_shape {
        if shape != state.shape {
            log::info!("Spawn shape: {:?}", shape);
        }
        state.shape = shape;
    }

    steer_ship(&mut state.ship, input, dt);

    spawn_step(state, dt);
    fire_step(state, input, dt);

    let screen = state.screen;
    state
        .projectiles
        .retain_mut(|projectile| !advance_projectile(projectile, dt, screen));

    collide_step(state, dt)
}

/// Count down to the next spawn and add one hazard when due and under the cap
fn spawn_step(state: &mut GameState, dt: f32) {
    state.spawn_timer += dt;
    if state.spawn_timer < state.spawn_interval || state.hazards.len() >= state.tuning.max_hazards {
        return;
    }

    let hazard = spawn_edge_hazard(&mut state.rng, &state.tuning, state.screen, state.shape, None);
    log::debug!(
        "Spawned {:?} {:?} at ({:.0}, {:.0})",
        hazard.kind,
        hazard.size,
        hazard.pos().x,
        hazard.pos().y
    );
    state.hazards.push(hazard);
    state.spawn_timer = 0.0;
    state.resample_spawn_interval();
}

/// Turn held trigger time into volleys from the ship's muzzle
fn fire_step(state: &mut GameState, input: &FrameInput, dt: f32) {
    let weapon = state.weapon;
    let tuning = *state.ship.weapon(weapon);
    let firing = input.fire && state.ship.is_alive();

    let volleys = state.fire.advance(firing, dt, tuning.fire_rate);
    if volleys == 0 {
        return;
    }

    let origin = state.ship.muzzle();
    let speed = tuning.projectile_speed();
    for _ in 0..volleys {
        let shots = fire(weapon, origin, speed, &state.hazards);
        state.projectiles.extend(shots);
    }
    log::trace!(
        "Fired {} volley(s) of {:?}, {} projectiles live",
        volleys,
        weapon,
        state.projectiles.len()
    );
}

/// Projectile pass, then ship pass (which also moves surviving hazards)
fn collide_step(state: &mut GameState, dt: f32) -> Vec<CollisionEvent> {
    let screen = state.screen;
    let mut events = resolve_projectile_hits(
        &mut state.projectiles,
        &mut state.hazards,
        &mut state.rng,
        &state.tuning,
        screen,
    );

    let was_alive = state.ship.is_alive();
    events.extend(resolve_ship_hits(&mut state.ship, &mut state.hazards, dt, screen));

    for event in &events {
        if let CollisionEvent::HazardDestroyed { kind, split: true, .. } = event {
            log::debug!("{:?} split into two", kind);
        }
    }
    if was_alive && !state.ship.is_alive() {
        log::info!(
            "Ship destroyed at frame {} ({} hazards on screen)",
            state.frame,
            state.hazards.len()
        );
    }

    events
}
