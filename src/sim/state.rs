//! Simulation state: the player and the map-view flag
//!
//! All mutable state lives in [`SimState`] and is only changed by
//! [`tick`](super::tick::tick).

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::geometry::{Vector2, heading};
use super::grid::Grid;
use crate::consts::START_ANGLE;

/// The viewpoint moving through the grid
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Position in grid-cell units
    pub pos: Vector2,
    /// Facing angle (radians, 0 = +x, increasing toward +y)
    pub angle: f64,
    /// Signed speed per tick. Positive values move against the facing
    /// direction, so "forward" is a negative velocity.
    pub velocity: f64,
}

impl Player {
    pub fn new(pos: Vector2, angle: f64) -> Self {
        Self {
            pos,
            angle,
            velocity: 0.0,
        }
    }

    /// Start position for a grid: near the middle, facing -x
    pub fn spawn(grid: &Grid) -> Self {
        let pos = Vector2::new(grid.cols() as f64 / 2.0 - 0.7, grid.rows() as f64 / 2.0 - 0.5);
        Self::new(pos, START_ANGLE)
    }

    /// Unit facing direction, always derived from `angle`
    #[inline]
    pub fn direction(&self) -> Vector2 {
        heading(self.angle)
    }

    /// Integrate one tick of motion.
    ///
    /// The displacement `direction * velocity` is subtracted from the
    /// position. If the destination cell is blocked the whole move is undone;
    /// there is no sliding along the open axis. Returns whether the player
    /// moved.
    pub fn step(&mut self, grid: &Grid) -> bool {
        if self.velocity == 0.0 {
            return false;
        }
        let delta = self.direction() * self.velocity;
        let target = self.pos - delta;
        if cell_blocked(grid, target) {
            log::warn!("Move to ({:.3}, {:.3}) blocked", target.x, target.y);
            return false;
        }
        self.pos = target;
        true
    }
}

/// Is the cell containing `pos` a wall? Positions outside the grid count
/// as blocked.
pub fn cell_blocked(grid: &Grid, pos: Vector2) -> bool {
    let cell = IVec2::new(pos.x.floor() as i32, pos.y.floor() as i32);
    grid.get(cell.x, cell.y).unwrap_or(true)
}

/// Complete simulation state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimState {
    pub player: Player,
    /// Whether the top-down map view is drawn
    pub map_view_open: bool,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl SimState {
    pub fn new(player: Player) -> Self {
        Self {
            player,
            map_view_open: true,
            time_ticks: 0,
        }
    }
}
