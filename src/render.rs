//! Render adapter
//!
//! The game draws through a [`Surface`], an immediate-mode 2D target that
//! only knows flat-colored rectangles, circles and text. Canvas/DOM glue lives
//! on the other side of this trait.

use std::fmt;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::sim::geometry::{Circle, Rect};
use crate::sim::state::{Ball, Brick, Paddle, Round};

/// 24-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color(pub u32);

impl Color {
    /// Ball, paddle, text and starting brick color
    pub const DEFAULT: Color = Color(0x0095DD);

    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self((r as u32) << 16 | (g as u32) << 8 | b as u32)
    }

    /// Uniformly random opaque color
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self(rng.random::<u32>() & 0xFF_FFFF)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06X}", self.0 & 0xFF_FFFF)
    }
}

/// Immediate-mode drawing target
pub trait Surface {
    fn clear(&mut self);
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color);
    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: Color);
    fn draw_text(&mut self, text: &str, x: f32, y: f32);
}

/// A flat-filled shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    Rect(Rect),
    Circle(Circle),
}

impl Primitive {
    pub fn fill(&self, surface: &mut dyn Surface, color: Color) {
        match self {
            Primitive::Rect(r) => surface.fill_rect(r.pos.x, r.pos.y, r.width, r.height, color),
            Primitive::Circle(c) => surface.fill_circle(c.center.x, c.center.y, c.radius, color),
        }
    }
}

/// Anything that draws as a single primitive
pub trait Drawable {
    fn primitive(&self) -> Primitive;

    fn render(&self, surface: &mut dyn Surface, color: Color) {
        self.primitive().fill(surface, color);
    }
}

impl Drawable for Ball {
    fn primitive(&self) -> Primitive {
        Primitive::Circle(self.circle())
    }
}

impl Drawable for Paddle {
    fn primitive(&self) -> Primitive {
        Primitive::Rect(self.rect)
    }
}

impl Drawable for Brick {
    fn primitive(&self) -> Primitive {
        Primitive::Rect(self.rect)
    }
}

/// Score readout anchor (text baseline)
pub const SCORE_POS: Vec2 = Vec2::new(8.0, 20.0);
/// Life readout sits this far left of the right edge
pub const LIFE_INSET: f32 = 65.0;

/// Draw bricks, paddle, ball and the HUD
pub fn render_round(surface: &mut dyn Surface, round: &Round, field_width: f32) {
    for (_, _, brick) in round.bricks.iter_alive() {
        brick.render(surface, round.brick_color);
    }
    round.paddle.render(surface, Color::DEFAULT);
    round.ball.render(surface, Color::DEFAULT);

    surface.draw_text(
        &format!("Score: {}", round.score.value),
        SCORE_POS.x,
        SCORE_POS.y,
    );
    surface.draw_text(
        &format!("Life: {}", round.lives.value),
        field_width - LIFE_INSET,
        SCORE_POS.y,
    );
}

/// A recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    Rect { rect: Rect, color: Color },
    Circle { circle: Circle, color: Color },
    Text { text: String, pos: Vec2 },
}

/// Surface that records the calls of the current frame
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rect_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Rect { .. }))
            .count()
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear);
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color) {
        self.commands.push(DrawCommand::Rect {
            rect: Rect::new(x, y, width, height),
            color,
        });
    }

    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: Color) {
        self.commands.push(DrawCommand::Circle {
            circle: Circle::new(Vec2::new(x, y), radius),
            color,
        });
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            pos: Vec2::new(x, y),
        });
    }
}
