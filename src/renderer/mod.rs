//! Rendering contract
//!
//! The simulation never touches pixels. A backend implements [`RenderSink`]
//! and [`draw_frame`] walks the finished state once per frame issuing shape,
//! sprite and text calls.

pub mod recording;

pub use recording::{DrawCall, RecordingRenderer};

use glam::Vec2;

use crate::consts::{DEAD_BLINK_PERIOD, SHIP_SCALE};
use crate::sim::{GameState, HazardKind, WeaponKind};

/// RGBA color, 0-1 per channel
pub type Rgba = [f32; 4];

pub const GREEN: Rgba = [0.0, 0.89, 0.19, 1.0];
pub const BLUE: Rgba = [0.0, 0.47, 0.95, 1.0];

/// HUD layout
const HUD_TEXT_SIZE: f32 = 20.0;
const HUD_HP_POS: Vec2 = Vec2::new(10.0, 10.0);
const HUD_WEAPON_POS: Vec2 = Vec2::new(10.0, 40.0);

/// Sprites a backend must be able to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sprite {
    Ship,
    Komar,
    KomarDebil,
    Spray,
    Slipper,
    Ball,
}

impl Sprite {
    pub fn for_projectile(kind: WeaponKind) -> Self {
        match kind {
            WeaponKind::Spray => Sprite::Spray,
            WeaponKind::Slipper => Sprite::Slipper,
            WeaponKind::Ball => Sprite::Ball,
        }
    }
}

/// Draw calls the simulation needs from a backend
pub trait RenderSink {
    /// Drawable area in pixels
    fn screen_size(&self) -> Vec2;

    /// Outline of a regular polygon (`rotation` in degrees)
    fn draw_polygon(&mut self, pos: Vec2, sides: u32, radius: f32, rotation: f32);

    /// Sprite centered on `pos`
    fn draw_sprite(&mut self, sprite: Sprite, pos: Vec2, scale: f32);

    fn draw_text(&mut self, text: &str, pos: Vec2, size: f32, color: Rgba);
}

/// Whether the ship is drawn this frame (a dead ship blinks)
pub fn ship_visible(state: &GameState) -> bool {
    state.ship.is_alive() || state.elapsed % DEAD_BLINK_PERIOD <= DEAD_BLINK_PERIOD / 2.0
}

/// Issue every draw call for the current state: HUD, projectiles, hazards, ship
pub fn draw_frame(state: &GameState, sink: &mut impl RenderSink) {
    sink.draw_text(
        &format!("HP: {}", state.ship.hp),
        HUD_HP_POS,
        HUD_TEXT_SIZE,
        GREEN,
    );
    sink.draw_text(
        &format!("Weapon type: {}", state.weapon.display_name()),
        HUD_WEAPON_POS,
        HUD_TEXT_SIZE,
        BLUE,
    );

    for projectile in &state.projectiles {
        sink.draw_sprite(
            Sprite::for_projectile(projectile.kind),
            projectile.pos(),
            projectile.scale,
        );
    }

    for hazard in &state.hazards {
        match hazard.kind.side_count() {
            Some(sides) => {
                sink.draw_polygon(hazard.pos(), sides, hazard.radius(), hazard.transform.rotation)
            }
            None => {
                let sprite = if hazard.kind == HazardKind::Komar {
                    Sprite::Komar
                } else {
                    Sprite::KomarDebil
                };
                sink.draw_sprite(sprite, hazard.pos(), hazard.scale);
            }
        }
    }

    if ship_visible(state) {
        sink.draw_sprite(Sprite::Ship, state.ship.pos(), SHIP_SCALE);
    }
}
