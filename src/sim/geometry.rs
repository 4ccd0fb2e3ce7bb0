//! Geometry primitives shared by the walker, caster and player motion
//!
//! Positions are continuous grid-cell coordinates held in [`DVec2`]. Double
//! precision is needed because the walker works with offsets around 1e-9.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// 2D point/direction used throughout the engine
pub type Vector2 = DVec2;

/// Which family of grid lines a crossing point lies on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// A vertical line (integer x)
    X,
    /// A horizontal line (integer y)
    Y,
}

/// Nearest grid-line crossing ahead of a segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Crossing {
    pub point: Vector2,
    pub side: Axis,
}

/// Unit vector in the direction of `v`.
///
/// Unlike `DVec2::normalize_or_zero`, a zero vector yields NaN components,
/// so callers must never pass one.
#[inline]
pub fn unit(v: Vector2) -> Vector2 {
    v / v.length()
}

/// Sign of `v` as -1, 0 or 1 (`f64::signum` reports 1 for +0.0)
#[inline]
pub fn sign(v: f64) -> f64 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Unit direction for an angle in radians (0 = +x, increasing toward +y)
#[inline]
pub fn heading(angle: f64) -> Vector2 {
    Vector2::new(angle.cos(), angle.sin())
}

/// True when `v` sits exactly on an integer grid line
#[inline]
pub fn on_grid_line(v: f64) -> bool {
    v == v.floor()
}
