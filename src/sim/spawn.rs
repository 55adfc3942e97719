//! Hazard spawning
//!
//! Fresh hazards appear just outside a random screen edge and head for a
//! jittered screen center. Split offspring reuse the same path but are pulled
//! toward the death point.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{Hazard, HazardKind, Motion, Transform};
use crate::consts::SPLIT_SCALE;
use crate::random_in_disk;
use crate::tuning::Tuning;

/// Which hazard kind new spawns use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ShapeSelector {
    Triangle,
    Square,
    Pentagon,
    Komar,
    KomarDebil,
    /// Either homing kind, picked per spawn
    #[default]
    Random,
}

impl ShapeSelector {
    /// Resolve to a concrete kind (`Random` is a coin flip between homing kinds)
    pub fn resolve<R: Rng + ?Sized>(self, rng: &mut R) -> HazardKind {
        match self {
            ShapeSelector::Triangle => HazardKind::Triangle,
            ShapeSelector::Square => HazardKind::Square,
            ShapeSelector::Pentagon => HazardKind::Pentagon,
            ShapeSelector::Komar => HazardKind::Komar,
            ShapeSelector::KomarDebil => HazardKind::KomarDebil,
            ShapeSelector::Random => HazardKind::HOMING[rng.random_range(0..HazardKind::HOMING.len())],
        }
    }
}

/// Screen edge a hazard enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Right, Edge::Bottom, Edge::Left];

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    /// Random point just outside this edge, `margin` pixels beyond it
    pub fn point_outside<R: Rng + ?Sized>(self, rng: &mut R, screen: Vec2, margin: f32) -> Vec2 {
        match self {
            Edge::Top => Vec2::new(rng.random_range(0.0..=screen.x), -margin),
            Edge::Right => Vec2::new(screen.x + margin, rng.random_range(0.0..=screen.y)),
            Edge::Bottom => Vec2::new(rng.random_range(0.0..=screen.x), screen.y + margin),
            Edge::Left => Vec2::new(-margin, rng.random_range(0.0..=screen.y)),
        }
    }
}

/// Create a hazard entering from a random edge.
///
/// With `origin` set the edge position is pulled toward it:
/// `origin + split_bias * (edge - origin)`. Never fails; the caller owns the
/// population cap.
pub fn spawn_edge_hazard<R: Rng + ?Sized>(
    rng: &mut R,
    tuning: &Tuning,
    screen: Vec2,
    shape: ShapeSelector,
    origin: Option<Vec2>,
) -> Hazard {
    let kind = shape.resolve(rng);
    let size = kind.roll_size(rng);
    let mut hazard = Hazard::new(kind, size, Vec2::ZERO, Vec2::ZERO);

    let edge_pos = Edge::random(rng).point_outside(rng, screen, hazard.radius());
    let pos = match origin {
        Some(origin) => origin + (edge_pos - origin) * tuning.split_bias,
        None => edge_pos,
    };

    let jitter = screen.x.min(screen.y) * tuning.aim_jitter;
    let target = random_in_disk(rng, screen * 0.5, jitter);
    let dir = (target - pos).normalize_or_zero();
    let speed = rng.random_range(tuning.hazard_speed_min..=tuning.hazard_speed_max);
    let spin = rng.random_range(tuning.hazard_spin_min..=tuning.hazard_spin_max);
    let rotation = rng.random_range(0.0..360.0);

    hazard.transform = Transform { pos, rotation };
    hazard.motion = Motion {
        vel: dir * speed,
        angular_vel: spin,
    };
    hazard
}

/// Offspring of a destroyed splitting hazard: two large homing hazards
pub fn spawn_split<R: Rng + ?Sized>(
    rng: &mut R,
    tuning: &Tuning,
    screen: Vec2,
    origin: Vec2,
) -> [Hazard; 2] {
    [(); 2].map(|_| {
        let mut child =
            spawn_edge_hazard(&mut *rng, tuning, screen, ShapeSelector::Komar, Some(origin));
        child.scale = SPLIT_SCALE;
        child
    })
}
