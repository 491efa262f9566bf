//! Render-state projection and draw batching
//!
//! The core never talks to a window. After each tick it projects the drops
//! and the cloth onto a 320×240 logical surface and returns the result as a
//! [`Frame`]: an ordered list of clear/point/line commands. A [`Renderer`]
//! replays that list against whatever surface it owns.
//!
//! # Projections
//!
//! ```text
//! drop:  px = drop_scale × x + width / 2     py = height - drop_scale × y
//!        colour (b, b, 255),  b = clamp(100 + 50 z, 0, 255)
//! cloth: px = cloth_scale × x + (width - cloth_scale × cols × spacing_x) / 2
//!        py = cloth_scale × y
//!        grey g = clamp(150 + 10 z, 50, 255)
//! ```
//!
//! Float-to-pixel conversions truncate toward zero.

use crate::config::RenderConfig;
use crate::core_types::rain_drop::RainDrop;
use crate::core_types::vec3::Vec3;
use crate::physics::{ClothGrid, Neighbor};
use crate::simulation::SimulationContext;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// 8-bit RGBA colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);

    /// Opaque colour
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Rgba { r, g, b, a: 255 }
    }

    /// Opaque grey with all three channels set to `level`
    #[must_use]
    pub const fn grey(level: u8) -> Self {
        Rgba::rgb(level, level, level)
    }
}

/// Integer pixel position on the logical surface (may lie off-surface)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: i32,
    pub y: i32,
}

impl ScreenPoint {
    /// Truncate a floating pixel position toward zero
    #[must_use]
    pub fn truncate(x: f64, y: f64) -> Self {
        ScreenPoint {
            x: x as i32,
            y: y as i32,
        }
    }

    /// Whether the point lies on a `width × height` surface
    pub fn is_within(&self, width: u32, height: u32) -> bool {
        self.x >= 0 && self.y >= 0 && (self.x as u32) < width && (self.y as u32) < height
    }
}

/// One drawing primitive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawCommand {
    Clear(Rgba),
    Point {
        at: ScreenPoint,
        color: Rgba,
    },
    Line {
        from: ScreenPoint,
        to: ScreenPoint,
        color: Rgba,
    },
}

/// Draw commands for one tick, in paint order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    commands: Vec<DrawCommand>,
}

impl Frame {
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Frame {
            commands: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Number of point commands
    pub fn point_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Point { .. }))
            .count()
    }

    /// Number of line commands
    pub fn line_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
            .count()
    }
}

/// Drawing surface owned by a front end
pub trait Renderer {
    fn clear(&mut self, color: Rgba);

    fn draw_point(&mut self, at: ScreenPoint, color: Rgba);

    fn draw_line(&mut self, from: ScreenPoint, to: ScreenPoint, color: Rgba);

    /// Show everything drawn since the last present
    fn present(&mut self);

    /// Replay `frame` in order, then present
    fn submit(&mut self, frame: &Frame) {
        for command in frame.commands() {
            match *command {
                DrawCommand::Clear(color) => self.clear(color),
                DrawCommand::Point { at, color } => self.draw_point(at, color),
                DrawCommand::Line { from, to, color } => self.draw_line(from, to, color),
            }
        }
        self.present();
    }
}

/// Projected drop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sprite {
    pub at: ScreenPoint,
    pub color: Rgba,
}

/// Projected cloth cell plus the cells it draws edges to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClothVertex {
    pub at: ScreenPoint,
    pub color: Rgba,
    /// Projected left neighbor, absent in the first column
    pub left: Option<ScreenPoint>,
    /// Projected upper neighbor, absent in the first row
    pub up: Option<ScreenPoint>,
}

/// Brightness channel: `trunc(base + gain × z)` clamped to `[min, 255]`
fn channel(base: f64, gain: f64, z: f64, min: i32) -> u8 {
    ((base + gain * z) as i32).clamp(min, 255) as u8
}

/// Screen position and colour of a drop
#[must_use]
pub fn drop_sprite(drop: &RainDrop, config: &RenderConfig) -> Sprite {
    let p = drop.position();
    let at = ScreenPoint::truncate(
        config.drop_scale * p.x + f64::from(config.surface_width) / 2.0,
        -config.drop_scale * p.y + f64::from(config.surface_height),
    );
    let b = channel(100.0, 50.0, p.z, 0);
    Sprite {
        at,
        color: Rgba::rgb(b, b, 255),
    }
}

fn project_cloth(p: &Vec3, config: &RenderConfig, offset_x: f64) -> ScreenPoint {
    ScreenPoint::truncate(config.cloth_scale * p.x + offset_x, config.cloth_scale * p.y)
}

/// Every cloth cell projected, row-major, with its left/up edge endpoints
#[must_use]
pub fn cloth_vertices(grid: &ClothGrid, config: &RenderConfig) -> Vec<ClothVertex> {
    let cloth_width = config.cloth_scale * grid.cols() as f64 * grid.spacing_x();
    let offset_x = (f64::from(config.surface_width) - cloth_width) / 2.0;

    let mut vertices = Vec::with_capacity(grid.len());
    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            let p = grid.position(col, row);
            let edge = |dir| {
                grid.neighbor(col, row, dir)
                    .map(|(c, r)| project_cloth(&grid.position(c, r), config, offset_x))
            };
            vertices.push(ClothVertex {
                at: project_cloth(&p, config, offset_x),
                color: Rgba::grey(channel(150.0, 10.0, p.z, 50)),
                left: edge(Neighbor::Left),
                up: edge(Neighbor::Up),
            });
        }
    }
    vertices
}

/// Draw batch for the current state: clear to black, the cloth, then drops
#[must_use]
pub fn compose_frame<R: Rng>(ctx: &SimulationContext<R>) -> Frame {
    let config = &ctx.config().render;
    let vertices = cloth_vertices(ctx.cloth(), config);

    let mut frame = Frame::with_capacity(1 + 3 * vertices.len() + ctx.particles().len());
    frame.push(DrawCommand::Clear(Rgba::BLACK));

    for vertex in &vertices {
        frame.push(DrawCommand::Point {
            at: vertex.at,
            color: vertex.color,
        });
        for to in [vertex.left, vertex.up].into_iter().flatten() {
            frame.push(DrawCommand::Line {
                from: vertex.at,
                to,
                color: vertex.color,
            });
        }
    }

    for drop in ctx.particles().drops() {
        let sprite = drop_sprite(drop, config);
        frame.push(DrawCommand::Point {
            at: sprite.at,
            color: sprite.color,
        });
    }
    frame
}
