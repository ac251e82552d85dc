//! Drawing-surface abstraction

use glam::Vec2;
use serde::Serialize;

/// Convert 0xRRGGBB to normalized RGBA
pub fn rgba(color: u32, alpha: f32) -> [f32; 4] {
    let r = ((color >> 16) & 0xFF) as f32 / 255.0;
    let g = ((color >> 8) & 0xFF) as f32 / 255.0;
    let b = (color & 0xFF) as f32 / 255.0;
    [r, g, b, alpha]
}

/// 2D primitive target, in screen coordinates (y-down)
pub trait Surface {
    fn clear(&mut self);
    fn draw_circle(&mut self, center: Vec2, radius: f32, color: [f32; 4]);
    fn draw_line(&mut self, from: Vec2, to: Vec2, color: [f32; 4], width: f32);
    fn draw_text(&mut self, text: &str, pos: Vec2, font: &str, color: [f32; 4]);
}

/// A recorded primitive
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DrawCommand {
    Clear,
    Circle {
        center: Vec2,
        radius: f32,
        color: [f32; 4],
    },
    Line {
        from: Vec2,
        to: Vec2,
        color: [f32; 4],
        width: f32,
    },
    Text {
        text: String,
        pos: Vec2,
        font: String,
        color: [f32; 4],
    },
}

/// Surface that records commands instead of drawing (headless hosts, tests)
#[derive(Debug, Clone, Default, Serialize)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl Surface for DrawList {
    fn clear(&mut self) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear);
    }

    fn draw_circle(&mut self, center: Vec2, radius: f32, color: [f32; 4]) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, color: [f32; 4], width: f32) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            color,
            width,
        });
    }

    fn draw_text(&mut self, text: &str, pos: Vec2, font: &str, color: [f32; 4]) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            pos,
            font: font.to_string(),
            color,
        });
    }
}
