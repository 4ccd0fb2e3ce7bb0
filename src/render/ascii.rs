//! Character-cell canvas implementing [`Renderer`]
//!
//! Each grid cell maps to a fixed block of characters. Colors pick the
//! glyph; grid lines and text are not drawn since they would cover the map at
//! terminal resolution.

use std::fmt;

use crate::sim::Vector2;

use super::{Color, Renderer};

const EMPTY: char = ' ';
const WALL: char = '#';

/// Text framebuffer for a grid of `cols` x `rows` cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsciiCanvas {
    width: usize,
    height: usize,
    /// Characters per grid cell (horizontal, vertical)
    cell_size: (usize, usize),
    chars: Vec<char>,
}

impl AsciiCanvas {
    pub fn new(cols: usize, rows: usize, cell_w: usize, cell_h: usize) -> Self {
        let width = cols * cell_w;
        let height = rows * cell_h;
        Self {
            width,
            height,
            cell_size: (cell_w, cell_h),
            chars: vec![EMPTY; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Character at canvas column `x`, line `y`
    pub fn get(&self, x: usize, y: usize) -> Option<char> {
        (x < self.width && y < self.height).then(|| self.chars[y * self.width + x])
    }

    fn glyph(color: Color) -> Option<char> {
        match color {
            Color::GRID | Color::LABEL => None,
            Color::WALL => Some(WALL),
            Color::RAY => Some('.'),
            Color::FRUSTUM => Some('+'),
            Color::PLAYER => Some('@'),
            _ => Some('*'),
        }
    }

    fn to_canvas(&self, p: Vector2) -> (i64, i64) {
        (
            (p.x * self.cell_size.0 as f64).floor() as i64,
            (p.y * self.cell_size.1 as f64).floor() as i64,
        )
    }

    /// Plot a glyph; walls are never painted over
    fn plot(&mut self, x: i64, y: i64, ch: char) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let idx = y as usize * self.width + x as usize;
        if self.chars[idx] != WALL || ch == WALL {
            self.chars[idx] = ch;
        }
    }
}

impl Renderer for AsciiCanvas {
    fn draw_line(&mut self, from: Vector2, to: Vector2, _width: f64, color: Color) {
        let Some(ch) = Self::glyph(color) else {
            return;
        };
        let (x0, y0) = self.to_canvas(from);
        let (x1, y1) = self.to_canvas(to);
        let steps = (x1 - x0).abs().max((y1 - y0).abs()).max(1);
        for i in 0..=steps {
            let t = i as f64 / steps as f64;
            let x = x0 as f64 + (x1 - x0) as f64 * t;
            let y = y0 as f64 + (y1 - y0) as f64 * t;
            self.plot(x.round() as i64, y.round() as i64, ch);
        }
    }

    fn draw_circle(&mut self, center: Vector2, _radius: f64, color: Color) {
        if let Some(ch) = Self::glyph(color) {
            let (x, y) = self.to_canvas(center);
            self.plot(x, y, ch);
        }
    }

    fn draw_rect(&mut self, cell: Vector2, color: Color) {
        let Some(ch) = Self::glyph(color) else {
            return;
        };
        let (x0, y0) = self.to_canvas(cell);
        let (w, h) = self.cell_size;
        for y in y0..y0 + h as i64 {
            for x in x0..x0 + w as i64 {
                self.plot(x, y, ch);
            }
        }
    }

    fn draw_text(&mut self, _text: &str, _pos: Vector2, _color: Color, _size: f64) {}
}

impl fmt::Display for AsciiCanvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, line) in self.chars.chunks(self.width.max(1)).enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            let line: String = line.iter().collect();
            write!(f, "{}", line.trim_end())?;
        }
        Ok(())
    }
}
