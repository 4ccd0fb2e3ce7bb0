//! Rendering interface
//!
//! The engine never rasterizes anything itself. Drawing goes through the
//! [`Renderer`] trait in grid-cell coordinates; implementations own the
//! scaling to pixels or characters.

pub mod ascii;
pub mod overlay;

pub use ascii::AsciiCanvas;
pub use overlay::{OverlayStyle, draw_map_view};

use serde::{Deserialize, Serialize};

use crate::sim::Vector2;

/// 24-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Wall cells
    pub const WALL: Color = Color::new(0x00, 0x00, 0x00);
    /// Grid lines
    pub const GRID: Color = Color::new(0x70, 0x70, 0x70);
    /// Debug coordinate labels
    pub const LABEL: Color = Color::new(0x98, 0x98, 0x98);
    /// Rays and walk markers
    pub const RAY: Color = Color::new(0xff, 0x00, 0x00);
    /// View frustum
    pub const FRUSTUM: Color = Color::new(0xff, 0xc0, 0xcb);
    pub const PLAYER: Color = Color::new(0xff, 0xff, 0x00);

    /// CSS-style `#rrggbb`
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Drawing surface consumed by the engine, in grid-cell units
pub trait Renderer {
    fn draw_line(&mut self, from: Vector2, to: Vector2, width: f64, color: Color);
    fn draw_circle(&mut self, center: Vector2, radius: f64, color: Color);
    /// Fill the unit cell whose top-left corner is `cell`
    fn draw_rect(&mut self, cell: Vector2, color: Color);
    fn draw_text(&mut self, text: &str, pos: Vector2, color: Color, size: f64);
}
