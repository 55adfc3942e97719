//! Motion integration and screen-bounds lifetime

use glam::Vec2;

use super::state::{Hazard, Projectile, Ship, WeaponKind};
use super::tick::FrameInput;
use crate::consts::SPRAY_GROWTH;

/// Move and spin a hazard; returns `false` once it is fully off screen
/// (outside the screen grown by its radius on every side)
pub fn advance_hazard(hazard: &mut Hazard, dt: f32, screen: Vec2) -> bool {
    hazard.transform.pos += hazard.motion.vel * dt;
    hazard.transform.rotation += hazard.motion.angular_vel * dt;

    let p = hazard.transform.pos;
    let r = hazard.radius();
    !(p.x < -r || p.x > screen.x + r || p.y < -r || p.y > screen.y + r)
}

/// Move a projectile; returns `true` once it has left the screen rectangle
pub fn advance_projectile(projectile: &mut Projectile, dt: f32, screen: Vec2) -> bool {
    projectile.transform.pos += projectile.motion.vel * dt;
    if projectile.kind == WeaponKind::Spray {
        projectile.scale += SPRAY_GROWTH * dt;
    }

    let p = projectile.transform.pos;
    p.x < 0.0 || p.x > screen.x || p.y < 0.0 || p.y > screen.y
}

/// Apply held movement keys. A dead ship ignores input and sinks.
pub fn steer_ship(ship: &mut Ship, input: &FrameInput, dt: f32) {
    let step = ship.speed * dt;
    if !ship.is_alive() {
        ship.transform.pos.y += step;
        return;
    }

    let pos = &mut ship.transform.pos;
    if input.move_up {
        pos.y -= step;
    }
    if input.move_down {
        pos.y += step;
    }
    if input.move_left {
        pos.x -= step;
    }
    if input.move_right {
        pos.x += step;
    }
}
