//! Komar Swarm - a frame-stepped arcade shooter core
//!
//! Core modules:
//! - `sim`: Simulation (spawning, weapons, motion, collisions, frame loop)
//! - `renderer`: Draw-call contract and per-frame drawing
//! - `platform`: Input abstraction (key state, frame delta)
//! - `tuning`: Data-driven game balance

pub mod platform;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use tuning::{Tuning, TuningError};

use glam::Vec2;
use rand::Rng;

/// Game configuration constants
pub mod consts {
    /// Default screen size
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 800.0;

    /// Polygon hazard radius per size-class unit
    pub const HAZARD_RADIUS_UNIT: f32 = 16.0;
    /// Collision radius of both homing kinds
    pub const HOMING_RADIUS: f32 = 32.0;

    /// Hazard visual scales
    pub const POLYGON_SCALE: f32 = 0.15;
    pub const HOMING_SCALE: f32 = 0.20;
    pub const SPLIT_SCALE: f32 = 0.10;
    /// Ship sprite scale
    pub const SHIP_SCALE: f32 = 0.20;

    /// Projectile radii
    pub const BALL_RADIUS: f32 = 5.0;
    pub const PROJECTILE_RADIUS: f32 = 2.0;

    /// Spray sprite growth per second
    pub const SPRAY_GROWTH: f32 = 0.9;

    /// Spray fan offsets (degrees), in emission order after the direct shot
    pub const SPRAY_FAN_DEGREES: [f32; 4] = [-6.0, 6.0, -3.0, 3.0];

    /// Ship defaults
    pub const SHIP_HIT_POINTS: i32 = 100;
    pub const SHIP_SPEED: f32 = 250.0;
    pub const SHIP_RADIUS: f32 = 20.0;

    /// Dead ship blink period (seconds); hidden during the second half
    pub const DEAD_BLINK_PERIOD: f32 = 0.4;
}

/// Rotate a vector by an angle given in degrees (counter-clockwise in math
/// coordinates, clockwise on a y-down screen)
#[inline]
pub fn rotate_degrees(v: Vec2, degrees: f32) -> Vec2 {
    Vec2::from_angle(degrees.to_radians()).rotate(v)
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Random point in a disk of `max_radius` around `center`.
///
/// Angle and radius are both sampled uniformly, so points cluster toward the
/// center (this is not an area-uniform sample).
pub fn random_in_disk<R: Rng + ?Sized>(rng: &mut R, center: Vec2, max_radius: f32) -> Vec2 {
    let angle = rng.random_range(0.0..std::f32::consts::TAU);
    let radius = rng.random_range(0.0..=max_radius.max(0.0));
    center + polar_to_cartesian(radius, angle)
}
