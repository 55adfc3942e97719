//! Platform abstraction layer
//!
//! Backends expose key state and frame timing through [`InputSource`]; the
//! simulation only ever sees the [`FrameInput`] built from it.

use std::collections::HashSet;

use crate::sim::{FrameInput, ShapeSelector};

/// Logical keys the game reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Fire,
    CycleWeapon,
    /// Shape selection keys 1, 2, 3
    ShapeKomar,
    ShapeKomarDebil,
    ShapeRandom,
    Restart,
}

/// Key state and timing provided by a window/input backend
pub trait InputSource {
    /// Key is down this frame
    fn is_key_held(&self, key: Key) -> bool;
    /// Key went down this frame
    fn was_key_pressed(&self, key: Key) -> bool;
    /// Seconds since the previous frame
    fn frame_delta(&self) -> f32;
}

impl FrameInput {
    /// Sample one frame of commands
    pub fn poll(source: &impl InputSource) -> Self {
        // Later keys win when several are pressed in one frame
        let select_shape = [
            (Key::ShapeKomar, ShapeSelector::Komar),
            (Key::ShapeKomarDebil, ShapeSelector::KomarDebil),
            (Key::ShapeRandom, ShapeSelector::Random),
        ]
        .into_iter()
        .filter(|(key, _)| source.was_key_pressed(*key))
        .map(|(_, shape)| shape)
        .last();

        Self {
            move_up: source.is_key_held(Key::Up),
            move_down: source.is_key_held(Key::Down),
            move_left: source.is_key_held(Key::Left),
            move_right: source.is_key_held(Key::Right),
            fire: source.is_key_held(Key::Fire),
            cycle_weapon: source.was_key_pressed(Key::CycleWeapon),
            select_shape,
            restart: source.was_key_pressed(Key::Restart),
        }
    }
}

/// In-memory input for headless runs and tests
#[derive(Debug, Clone)]
pub struct ScriptedInput {
    held: HashSet<Key>,
    pressed: HashSet<Key>,
    dt: f32,
}

impl ScriptedInput {
    pub fn new(dt: f32) -> Self {
        Self {
            held: HashSet::new(),
            pressed: HashSet::new(),
            dt,
        }
    }

    pub fn hold(&mut self, key: Key) {
        self.held.insert(key);
    }

    pub fn release(&mut self, key: Key) {
        self.held.remove(&key);
    }

    /// Press a key for the next frame only
    pub fn press(&mut self, key: Key) {
        self.pressed.insert(key);
    }

    /// Clear one-shot presses after a frame has been sampled
    pub fn end_frame(&mut self) {
        self.pressed.clear();
    }

    pub fn set_frame_delta(&mut self, dt: f32) {
        self.dt = dt;
    }
}

impl InputSource for ScriptedInput {
    fn is_key_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    fn was_key_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }

    fn frame_delta(&self) -> f32 {
        self.dt
    }
}
