//! Game state and entity types
//!
//! Hazards, projectiles and the ship are plain tagged structs; everything
//! derived from a kind or size class is computed on demand.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::spawn::ShapeSelector;
use super::weapon::FireControl;
use crate::consts::*;
use crate::tuning::{ShipTuning, Tuning, TuningError, WeaponTable, WeaponTuning};

/// Position and facing (degrees)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub pos: Vec2,
    pub rotation: f32,
}

/// Linear velocity (pixels/sec) and spin (degrees/sec)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Motion {
    pub vel: Vec2,
    pub angular_vel: f32,
}

/// Hazard size class; the discriminant is the radius/damage multiplier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SizeClass {
    Small = 1,
    Medium = 2,
    Large = 4,
}

impl SizeClass {
    pub const ALL: [SizeClass; 3] = [SizeClass::Small, SizeClass::Medium, SizeClass::Large];

    #[inline]
    pub fn multiplier(self) -> i32 {
        self as i32
    }

    /// Uniform pick from the three classes
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

/// Hazard kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HazardKind {
    Triangle,
    Square,
    Pentagon,
    /// Large homing hazard
    Komar,
    /// Small homing hazard; splits into two `Komar` when destroyed
    KomarDebil,
}

impl HazardKind {
    pub const POLYGONS: [HazardKind; 3] =
        [HazardKind::Triangle, HazardKind::Square, HazardKind::Pentagon];
    pub const HOMING: [HazardKind; 2] = [HazardKind::Komar, HazardKind::KomarDebil];

    pub fn base_damage(self) -> i32 {
        match self {
            HazardKind::Triangle => 5,
            HazardKind::Square => 10,
            HazardKind::Pentagon | HazardKind::Komar | HazardKind::KomarDebil => 15,
        }
    }

    pub fn is_homing(self) -> bool {
        matches!(self, HazardKind::Komar | HazardKind::KomarDebil)
    }

    /// Whether destroying this hazard spawns offspring
    pub fn splits_on_death(self) -> bool {
        self == HazardKind::KomarDebil
    }

    /// Outline side count for polygon kinds
    pub fn side_count(self) -> Option<u32> {
        match self {
            HazardKind::Triangle => Some(3),
            HazardKind::Square => Some(4),
            HazardKind::Pentagon => Some(5),
            HazardKind::Komar | HazardKind::KomarDebil => None,
        }
    }

    /// Size class for a fresh hazard of this kind
    pub fn roll_size<R: Rng + ?Sized>(self, rng: &mut R) -> SizeClass {
        if self.is_homing() {
            SizeClass::Medium
        } else {
            SizeClass::random(rng)
        }
    }
}

/// A hazard entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hazard {
    pub kind: HazardKind,
    pub size: SizeClass,
    pub transform: Transform,
    pub motion: Motion,
    /// Sprite scale (cosmetic)
    pub scale: f32,
}

impl Hazard {
    pub fn new(kind: HazardKind, size: SizeClass, pos: Vec2, vel: Vec2) -> Self {
        let scale = if kind.is_homing() {
            HOMING_SCALE
        } else {
            POLYGON_SCALE
        };
        Self {
            kind,
            size,
            transform: Transform { pos, rotation: 0.0 },
            motion: Motion {
                vel,
                angular_vel: 0.0,
            },
            scale,
        }
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.transform.pos
    }

    pub fn radius(&self) -> f32 {
        if self.kind.is_homing() {
            HOMING_RADIUS
        } else {
            HAZARD_RADIUS_UNIT * self.size.multiplier() as f32
        }
    }

    pub fn damage(&self) -> i32 {
        self.kind.base_damage() * self.size.multiplier()
    }
}

/// Weapon kinds (each fires its own projectile kind)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponKind {
    /// Homing fan aimed at the nearest hazard
    Spray,
    Slipper,
    Ball,
}

impl WeaponKind {
    pub const ALL: [WeaponKind; 3] = [WeaponKind::Spray, WeaponKind::Slipper, WeaponKind::Ball];

    /// Next weapon in the cycle order
    pub fn next(self) -> Self {
        match self {
            WeaponKind::Spray => WeaponKind::Slipper,
            WeaponKind::Slipper => WeaponKind::Ball,
            WeaponKind::Ball => WeaponKind::Spray,
        }
    }

    pub fn damage(self) -> i32 {
        match self {
            WeaponKind::Spray => 8,
            WeaponKind::Slipper => 20,
            WeaponKind::Ball => 10,
        }
    }

    pub fn projectile_radius(self) -> f32 {
        match self {
            WeaponKind::Ball => BALL_RADIUS,
            WeaponKind::Spray | WeaponKind::Slipper => PROJECTILE_RADIUS,
        }
    }

    fn initial_scale(self) -> f32 {
        match self {
            WeaponKind::Spray => 0.25,
            WeaponKind::Slipper => 0.1,
            WeaponKind::Ball => 1.0,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            WeaponKind::Spray => "MOSQUITO SPRAY",
            WeaponKind::Slipper => "SLIPPER",
            WeaponKind::Ball => "RUBBER BALL",
        }
    }
}

/// A projectile entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub kind: WeaponKind,
    pub transform: Transform,
    pub motion: Motion,
    pub damage: i32,
    /// Sprite scale; grows over the lifetime of spray particles
    pub scale: f32,
}

impl Projectile {
    pub fn new(kind: WeaponKind, pos: Vec2, vel: Vec2, damage: i32) -> Self {
        Self {
            kind,
            transform: Transform { pos, rotation: 0.0 },
            motion: Motion {
                vel,
                angular_vel: 0.0,
            },
            damage,
            scale: kind.initial_scale(),
        }
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.transform.pos
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.kind.projectile_radius()
    }
}

/// The player's ship
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ship {
    pub transform: Transform,
    pub hp: i32,
    pub speed: f32,
    pub radius: f32,
    alive: bool,
    weapons: WeaponTable,
}

impl Ship {
    /// Fresh ship centered on screen
    pub fn new(screen: Vec2, tuning: &ShipTuning, weapons: WeaponTable) -> Self {
        Self {
            transform: Transform {
                pos: screen * 0.5,
                rotation: 0.0,
            },
            hp: tuning.hit_points,
            speed: tuning.speed,
            radius: tuning.radius,
            alive: true,
            weapons,
        }
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.transform.pos
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Apply damage; a dead ship ignores further hits
    pub fn take_damage(&mut self, damage: i32) {
        if !self.alive {
            return;
        }
        self.hp -= damage;
        if self.hp <= 0 {
            self.alive = false;
        }
    }

    pub fn weapon(&self, weapon: WeaponKind) -> &WeaponTuning {
        self.weapons.get(weapon)
    }

    pub fn fire_rate(&self, weapon: WeaponKind) -> f32 {
        self.weapon(weapon).fire_rate
    }

    pub fn spacing(&self, weapon: WeaponKind) -> f32 {
        self.weapon(weapon).spacing
    }

    /// Where projectiles leave the ship (top edge)
    pub fn muzzle(&self) -> Vec2 {
        self.transform.pos - Vec2::new(0.0, self.radius)
    }
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Screen size, read once at creation
    pub screen: Vec2,
    /// Player ship (replaced on restart)
    pub ship: Ship,
    /// Live hazards
    pub hazards: Vec<Hazard>,
    /// Live projectiles
    pub projectiles: Vec<Projectile>,
    /// Selected weapon
    pub weapon: WeaponKind,
    /// Shape requested for fresh spawns
    pub shape: ShapeSelector,
    /// Fire pacing accumulator
    pub fire: FireControl,
    /// Seconds since last spawn
    pub spawn_timer: f32,
    /// Seconds until the next spawn is due
    pub spawn_interval: f32,
    /// Seconds since the run (or restart) began
    pub elapsed: f32,
    /// Frames simulated since creation
    pub frame: u64,
    pub(super) tuning: Tuning,
    pub(super) rng: Pcg32,
}

impl GameState {
    /// Create a new game state; fails only on invalid tuning
    pub fn new(tuning: Tuning, screen: Vec2, seed: u64) -> Result<Self, TuningError> {
        tuning.validate()?;
        let mut rng = Pcg32::seed_from_u64(seed);
        let spawn_interval = sample_spawn_interval(&tuning, &mut rng);
        let state = Self {
            seed,
            screen,
            ship: Ship::new(screen, &tuning.ship, tuning.weapons),
            hazards: Vec::new(),
            projectiles: Vec::new(),
            weapon: tuning.initial_weapon,
            shape: tuning.initial_shape,
            fire: FireControl::default(),
            spawn_timer: 0.0,
            spawn_interval,
            elapsed: 0.0,
            frame: 0,
            tuning,
            rng,
        };
        log::info!(
            "New run: seed={} screen={}x{} weapon={:?} shape={:?}",
            seed,
            screen.x,
            screen.y,
            state.weapon,
            state.shape
        );
        Ok(state)
    }

    /// Replace the ship, drop every entity and reset timers.
    /// Weapon and shape selections survive.
    pub fn restart(&mut self) {
        self.ship = Ship::new(self.screen, &self.tuning.ship, self.tuning.weapons);
        self.hazards.clear();
        self.projectiles.clear();
        self.fire = FireControl::default();
        self.spawn_timer = 0.0;
        self.spawn_interval = sample_spawn_interval(&self.tuning, &mut self.rng);
        self.elapsed = 0.0;
        log::info!("Restarted run at frame {}", self.frame);
    }

    /// Draw a fresh spawn interval
    pub fn resample_spawn_interval(&mut self) {
        self.spawn_interval = sample_spawn_interval(&self.tuning, &mut self.rng);
    }
}

fn sample_spawn_interval(tuning: &Tuning, rng: &mut Pcg32) -> f32 {
    rng.random_range(tuning.spawn_interval_min..=tuning.spawn_interval_max)
}
