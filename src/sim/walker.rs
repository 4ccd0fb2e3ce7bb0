//! Boundary walker: next grid-line crossing ahead of a directed segment
//!
//! The segment `p1 -> p2` fixes a line. The walker returns the first point
//! beyond `p2` on that line where it meets an integer x (vertical grid line)
//! or an integer y (horizontal grid line), whichever comes first.

use super::geometry::{Axis, Crossing, Vector2, on_grid_line, sign};
use crate::consts::WALK_NUDGE;

/// Find the nearest grid-line crossing ahead of `p2` in the direction `p1 -> p2`.
///
/// A `p2` already sitting exactly on a grid line is first pushed
/// [`WALK_NUDGE`] past it, on that axis only; nudging an axis that is not on
/// a line could jump over a line lying within the nudge. The line equation is
/// anchored at `p1`, so repeated calls with the same origin do not accumulate
/// drift. Ties between the two candidate crossings go to the horizontal line.
pub fn walk(p1: Vector2, p2: Vector2) -> Crossing {
    let d = p2 - p1;
    let nudge = Vector2::new(
        if on_grid_line(p2.x) { sign(d.x) } else { 0.0 },
        if on_grid_line(p2.y) { sign(d.y) } else { 0.0 },
    );
    let p2 = p2 + nudge * WALK_NUDGE;

    if d.x == 0.0 {
        // Vertical segment: only horizontal lines can be crossed
        return Crossing {
            point: Vector2::new(p2.x, next_line(p2.y, d.y)),
            side: Axis::Y,
        };
    }
    if d.y == 0.0 {
        // Horizontal segment: only vertical lines can be crossed
        return Crossing {
            point: Vector2::new(next_line(p2.x, d.x), p2.y),
            side: Axis::X,
        };
    }

    let k = d.y / d.x;
    let c = p1.y - k * p1.x;

    let y = next_line(p2.y, d.y);
    let horizontal = Vector2::new((y - c) / k, y);

    let x = next_line(p2.x, d.x);
    let vertical = Vector2::new(x, k * x + c);

    let crossing = if p2.distance(vertical) < p2.distance(horizontal) {
        Crossing {
            point: vertical,
            side: Axis::X,
        }
    } else {
        Crossing {
            point: horizontal,
            side: Axis::Y,
        }
    };
    log::trace!("walk {:?} -> {:?}", p2, crossing);
    crossing
}

/// Next integer line from `v` when moving with sign `dir`
#[inline]
fn next_line(v: f64, dir: f64) -> f64 {
    if dir > 0.0 { v.ceil() } else { v.floor() }
}
