//! Headless backend that records draw calls
//!
//! Used by the native runner and by tests in place of a real window.

use glam::Vec2;

use super::{RenderSink, Rgba, Sprite};

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Polygon {
        pos: Vec2,
        sides: u32,
        radius: f32,
        rotation: f32,
    },
    Sprite {
        sprite: Sprite,
        pos: Vec2,
        scale: f32,
    },
    Text {
        text: String,
        pos: Vec2,
        size: f32,
        color: Rgba,
    },
}

/// Collects the calls of the current frame
#[derive(Debug, Clone)]
pub struct RecordingRenderer {
    screen: Vec2,
    pub calls: Vec<DrawCall>,
    /// Frames presented so far
    pub frames: u64,
}

impl RecordingRenderer {
    pub fn new(screen: Vec2) -> Self {
        Self {
            screen,
            calls: Vec::new(),
            frames: 0,
        }
    }

    /// Start a new frame, dropping the previous frame's calls
    pub fn begin_frame(&mut self) {
        self.calls.clear();
        self.frames += 1;
    }

    pub fn polygons(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Polygon { .. }))
            .count()
    }

    pub fn sprites(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Sprite { .. }))
            .count()
    }
}

impl RenderSink for RecordingRenderer {
    fn screen_size(&self) -> Vec2 {
        self.screen
    }

    fn draw_polygon(&mut self, pos: Vec2, sides: u32, radius: f32, rotation: f32) {
        self.calls.push(DrawCall::Polygon {
            pos,
            sides,
            radius,
            rotation,
        });
    }

    fn draw_sprite(&mut self, sprite: Sprite, pos: Vec2, scale: f32) {
        self.calls.push(DrawCall::Sprite { sprite, pos, scale });
    }

    fn draw_text(&mut self, text: &str, pos: Vec2, size: f32, color: Rgba) {
        self.calls.push(DrawCall::Text {
            text: text.to_string(),
            pos,
            size,
            color,
        });
    }
}
