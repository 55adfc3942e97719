//! Game balance and configuration
//!
//! Every number the simulation reads lives here so a run can be retuned from
//! a JSON file without recompiling. Defaults are the stock game balance.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::{ShapeSelector, WeaponKind};

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum TuningError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A weapon would never fire (or divide by zero when pacing)
    #[error("fire rate for {weapon:?} must be positive and finite, got {rate}")]
    NonPositiveFireRate { weapon: WeaponKind, rate: f32 },

    /// Negative spacing would fire projectiles backwards
    #[error("spacing for {weapon:?} must be non-negative, got {spacing}")]
    NegativeSpacing { weapon: WeaponKind, spacing: f32 },

    /// A min/max pair is inverted or not usable as a sampling range
    #[error("invalid range for {name}: [{min}, {max}]")]
    InvalidRange {
        name: &'static str,
        min: f32,
        max: f32,
    },

    /// Screen must have a positive area
    #[error("invalid screen size {width}x{height}")]
    InvalidScreen { width: f32, height: f32 },

    /// Ship would start dead
    #[error("ship hit points must be positive, got {0}")]
    InvalidHitPoints(i32),
}

/// Fire rate and projectile spacing for one weapon
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeaponTuning {
    /// Shots per second
    pub fire_rate: f32,
    /// Pixels between consecutive shots (converted to speed via the fire rate)
    pub spacing: f32,
}

impl WeaponTuning {
    /// Projectile travel speed in pixels per second
    pub fn projectile_speed(&self) -> f32 {
        self.spacing * self.fire_rate
    }
}

/// Per-weapon tuning table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeaponTable {
    pub spray: WeaponTuning,
    pub slipper: WeaponTuning,
    pub ball: WeaponTuning,
}

impl Default for WeaponTable {
    fn default() -> Self {
        // Everything but the slipper shares the fast "ball" cadence
        Self {
            spray: WeaponTuning {
                fire_rate: 22.0,
                spacing: 20.0,
            },
            slipper: WeaponTuning {
                fire_rate: 5.0,
                spacing: 60.0,
            },
            ball: WeaponTuning {
                fire_rate: 22.0,
                spacing: 20.0,
            },
        }
    }
}

impl WeaponTable {
    pub fn get(&self, weapon: WeaponKind) -> &WeaponTuning {
        match weapon {
            WeaponKind::Spray => &self.spray,
            WeaponKind::Slipper => &self.slipper,
            WeaponKind::Ball => &self.ball,
        }
    }
}

/// Player ship tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShipTuning {
    pub hit_points: i32,
    /// Movement speed (pixels/sec)
    pub speed: f32,
    /// Collision radius (pixels)
    pub radius: f32,
}

impl Default for ShipTuning {
    fn default() -> Self {
        Self {
            hit_points: SHIP_HIT_POINTS,
            speed: SHIP_SPEED,
            radius: SHIP_RADIUS,
        }
    }
}

/// Complete balance sheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Headless screen size (a real renderer reports its own)
    pub screen_width: f32,
    pub screen_height: f32,

    // === Spawning ===
    /// Population cap; no fresh spawns while at or above it
    pub max_hazards: usize,
    /// Seconds between spawns, resampled after each spawn
    pub spawn_interval_min: f32,
    pub spawn_interval_max: f32,
    /// Hazard travel speed (pixels/sec)
    pub hazard_speed_min: f32,
    pub hazard_speed_max: f32,
    /// Hazard spin (degrees/sec)
    pub hazard_spin_min: f32,
    pub hazard_spin_max: f32,
    /// Aim jitter radius as a fraction of the smaller screen side
    pub aim_jitter: f32,
    /// How far split offspring are pulled from the death point toward an edge
    pub split_bias: f32,

    // === Player ===
    pub ship: ShipTuning,
    pub weapons: WeaponTable,
    pub initial_weapon: WeaponKind,
    pub initial_shape: ShapeSelector,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,

            max_hazards: 150,
            spawn_interval_min: 0.5,
            spawn_interval_max: 3.0,
            hazard_speed_min: 125.0,
            hazard_speed_max: 250.0,
            hazard_spin_min: 50.0,
            hazard_spin_max: 240.0,
            aim_jitter: 0.1,
            split_bias: 0.3,

            ship: ShipTuning::default(),
            weapons: WeaponTable::default(),
            initial_weapon: WeaponKind::Spray,
            initial_shape: ShapeSelector::Random,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON (missing fields fall back to defaults)
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load and validate tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every invariant the simulation relies on
    pub fn validate(&self) -> Result<(), TuningError> {
        if !(self.screen_width > 0.0 && self.screen_height > 0.0) {
            return Err(TuningError::InvalidScreen {
                width: self.screen_width,
                height: self.screen_height,
            });
        }

        for weapon in WeaponKind::ALL {
            let w = self.weapons.get(weapon);
            if !(w.fire_rate > 0.0 && w.fire_rate.is_finite()) {
                return Err(TuningError::NonPositiveFireRate {
                    weapon,
                    rate: w.fire_rate,
                });
            }
            if !(w.spacing >= 0.0) {
                return Err(TuningError::NegativeSpacing {
                    weapon,
                    spacing: w.spacing,
                });
            }
        }

        check_range(
            "spawn_interval",
            self.spawn_interval_min,
            self.spawn_interval_max,
        )?;
        if self.spawn_interval_min <= 0.0 {
            return Err(TuningError::InvalidRange {
                name: "spawn_interval",
                min: self.spawn_interval_min,
                max: self.spawn_interval_max,
            });
        }
        check_range("hazard_speed", self.hazard_speed_min, self.hazard_speed_max)?;
        check_range("hazard_spin", self.hazard_spin_min, self.hazard_spin_max)?;
        check_range("aim_jitter", 0.0, self.aim_jitter)?;
        check_range("split_bias", 0.0, self.split_bias)?;

        if self.ship.hit_points <= 0 {
            return Err(TuningError::InvalidHitPoints(self.ship.hit_points));
        }
        check_range("ship_radius", 0.0, self.ship.radius)?;

        Ok(())
    }
}

fn check_range(name: &'static str, min: f32, max: f32) -> Result<(), TuningError> {
    if min.is_finite() && max.is_finite() && min <= max {
        Ok(())
    } else {
        Err(TuningError::InvalidRange { name, min, max })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_projectile_speed_from_spacing() {
        let table = WeaponTable::default();
        assert_eq!(table.slipper.projectile_speed(), 300.0);
        assert_eq!(table.ball.projectile_speed(), 440.0);
    }

    #[test]
    fn test_zero_fire_rate_rejected() {
        let mut tuning = Tuning::default();
        tuning.weapons.slipper.fire_rate = 0.0;
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::NonPositiveFireRate {
                weapon: WeaponKind::Slipper,
                ..
            })
        ));
    }

    #[test]
    fn test_nan_fire_rate_rejected() {
        let mut tuning = Tuning::default();
        tuning.weapons.spray.fire_rate = f32::NAN;
        assert!(tuning.validate().is_err());
    }

    #[test]
    fn test_inverted_spawn_interval_rejected() {
        let mut tuning = Tuning::default();
        tuning.spawn_interval_min = 4.0;
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::InvalidRange {
                name: "spawn_interval",
                ..
            })
        ));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let tuning = Tuning::from_json(r#"{ "max_hazards": 3, "initial_weapon": "Ball" }"#)
            .expect("valid json");
        assert_eq!(tuning.max_hazards, 3);
        assert_eq!(tuning.initial_weapon, WeaponKind::Ball);
        assert_eq!(tuning.weapons, WeaponTable::default());
    }

    #[test]
    fn test_json_round_trip() {
        let tuning = Tuning {
            initial_shape: ShapeSelector::Pentagon,
            ..Tuning::default()
        };
        let json = tuning.to_json().expect("serializes");
        assert_eq!(Tuning::from_json(&json).expect("parses"), tuning);
    }

    #[test]
    fn test_bad_json_is_parse_error() {
        assert!(matches!(
            Tuning::from_json("{ not json"),
            Err(TuningError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        assert!(matches!(
            Tuning::load("/definitely/not/here.json"),
            Err(TuningError::Io(_))
        ));
    }
}
