//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering
//! and platform dependencies:
//! - One `tick` per rendered frame, variable `dt`
//! - Seeded RNG only
//! - Stable removal (retain / remove), never index juggling mid-iteration

pub mod collision;
pub mod motion;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod weapon;

pub use collision::{CollisionEvent, circles_overlap, resolve_projectile_hits, resolve_ship_hits};
pub use motion::{advance_hazard, advance_projectile, steer_ship};
pub use spawn::{Edge, ShapeSelector, spawn_edge_hazard, spawn_split};
pub use state::{
    GameState, Hazard, HazardKind, Motion, Projectile, Ship, SizeClass, Transform, WeaponKind,
};
pub use tick::{FrameInput, tick};
pub use weapon::{FireControl, fire, nearest_hazard};
