//! Field-of-view sampler: a fan of rays centered on the facing angle

use serde::{Deserialize, Serialize};

use super::caster::{RayHit, cast_ray_traced};
use super::geometry::{Crossing, Vector2, heading};
use super::grid::Grid;

/// How ray angles are spread across the field of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FanSpacing {
    /// `θ - F/2 + i·F/N`: the left edge is sampled, the right edge is not
    #[default]
    HalfOpen,
    /// `θ - F/2 + i·F/(N-1)`: both edges are sampled
    Inclusive,
}

/// Ray angles for facing angle `facing`, field of view `fov` and `count`
/// rays, ordered left to right
pub fn ray_angles(facing: f64, fov: f64, count: usize, spacing: FanSpacing) -> Vec<f64> {
    let left = facing - fov / 2.0;
    let step = match spacing {
        FanSpacing::HalfOpen => fov / count as f64,
        FanSpacing::Inclusive if count > 1 => fov / (count - 1) as f64,
        // A single inclusive ray looks straight ahead
        FanSpacing::Inclusive => return vec![facing; count],
    };
    (0..count).map(|i| left + i as f64 * step).collect()
}

/// Cast one ray per angle from [`ray_angles`], returning the hits in the
/// same order
pub fn sample(
    grid: &Grid,
    origin: Vector2,
    facing: f64,
    fov: f64,
    count: usize,
    spacing: FanSpacing,
) -> Vec<RayHit> {
    sample_traced(grid, origin, facing, fov, count, spacing, |_| {})
}

/// [`sample`], reporting every crossing of every ray to `visit`
pub fn sample_traced<F>(
    grid: &Grid,
    origin: Vector2,
    facing: f64,
    fov: f64,
    count: usize,
    spacing: FanSpacing,
    mut visit: F,
) -> Vec<RayHit>
where
    F: FnMut(&Crossing),
{
    ray_angles(facing, fov, count, spacing)
        .into_iter()
        .map(|angle| cast_ray_traced(grid, origin, heading(angle), &mut visit))
        .collect()
}
