//! Top-down map view
//!
//! Draws the grid, the ray fan from the last frame and the player. With the
//! debug layers on it also labels every cell, marks each walker crossing and
//! outlines the view frustum.

use crate::settings::Settings;
use crate::sim::geometry::heading;
use crate::sim::{Frame, Grid, Vector2};

use super::{Color, Renderer};

const GRID_LINE_WIDTH: f64 = 0.01;
const RAY_WIDTH: f64 = 0.01;
const FRUSTUM_WIDTH: f64 = 0.1;
const LABEL_SIZE: f64 = 0.25;
const MARKER_RADIUS: f64 = 0.03;
const PLAYER_RADIUS: f64 = 0.1;

/// Which layers of the map view to draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayStyle {
    /// `(x, y)` label in every cell
    pub labels: bool,
    /// Circle at every walker crossing (needs a traced frame)
    pub markers: bool,
    /// Field of view edges, projection plane and facing line
    pub frustum: bool,
    /// Field of view (radians) for the frustum
    pub fov: f64,
    /// Projection plane distance for the frustum
    pub plane: f64,
}

impl OverlayStyle {
    pub fn from_settings(settings: &Settings) -> Self {
        let debug = settings.debug_overlay;
        Self {
            labels: debug,
            markers: debug,
            frustum: debug,
            fov: settings.fov(),
            plane: settings.plane_distance,
        }
    }
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

/// Draw the map view for `frame`; nothing is drawn while the view is closed
pub fn draw_map_view<R: Renderer + ?Sized>(
    renderer: &mut R,
    grid: &Grid,
    frame: &Frame,
    style: &OverlayStyle,
) {
    if !frame.map_view_open {
        return;
    }
    draw_grid(renderer, grid, style);
    draw_rays(renderer, frame, style);
    draw_player(renderer, frame, style);
}

fn draw_grid<R: Renderer + ?Sized>(renderer: &mut R, grid: &Grid, style: &OverlayStyle) {
    let cols = grid.cols() as f64;
    let rows = grid.rows() as f64;
    for x in 0..=grid.cols() {
        let x = x as f64;
        renderer.draw_line(
            Vector2::new(x, 0.0),
            Vector2::new(x, rows),
            GRID_LINE_WIDTH,
            Color::GRID,
        );
    }
    for y in 0..=grid.rows() {
        let y = y as f64;
        renderer.draw_line(
            Vector2::new(0.0, y),
            Vector2::new(cols, y),
            GRID_LINE_WIDTH,
            Color::GRID,
        );
    }

    for wall in grid.walls() {
        renderer.draw_rect(wall.as_dvec2(), Color::WALL);
    }

    if style.labels {
        for x in 0..grid.cols() {
            for y in 0..grid.rows() {
                let (x, y) = (x as f64, y as f64);
                renderer.draw_text(
                    &format!("({x:.1}, {y:.1})"),
                    Vector2::new(x, y + 0.2),
                    Color::LABEL,
                    LABEL_SIZE,
                );
            }
        }
    }
}

fn draw_rays<R: Renderer + ?Sized>(renderer: &mut R, frame: &Frame, style: &OverlayStyle) {
    let origin = frame.player.pos;
    if style.markers {
        for point in &frame.crossings {
            renderer.draw_circle(*point, MARKER_RADIUS, Color::RAY);
        }
    }
    for hit in &frame.hits {
        renderer.draw_line(origin, hit.point, RAY_WIDTH, Color::RAY);
    }
}

fn draw_player<R: Renderer + ?Sized>(renderer: &mut R, frame: &Frame, style: &OverlayStyle) {
    let player = &frame.player;
    if style.frustum {
        let half = style.fov / 2.0;
        // Edge length that puts the far ends on the projection plane
        let side = style.plane / half.cos();
        let left = player.pos + heading(player.angle - half) * side;
        let right = player.pos + heading(player.angle + half) * side;
        let ahead = player.pos + player.direction() * style.plane;

        renderer.draw_line(player.pos, left, FRUSTUM_WIDTH, Color::FRUSTUM);
        renderer.draw_line(player.pos, right, FRUSTUM_WIDTH, Color::FRUSTUM);
        renderer.draw_line(left, right, FRUSTUM_WIDTH, Color::FRUSTUM);
        renderer.draw_line(player.pos, ahead, FRUSTUM_WIDTH, Color::FRUSTUM);
    }
    renderer.draw_circle(player.pos, PLAYER_RADIUS, Color::PLAYER);
}
