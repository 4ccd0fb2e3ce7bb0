//! Ray caster: walk grid-line crossings until the ray enters a wall
//!
//! Termination relies on the grid's closed border. Each step moves strictly
//! past one grid line, so a ray started inside the map always reaches a
//! border cell.

use glam::IVec2;

use super::geometry::{Axis, Crossing, Vector2, on_grid_line};
use super::grid::Grid;
use super::walker::walk;
use crate::consts::RAY_SEED;

/// Where a ray met a wall
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Point on the wall face (continuous grid coordinates)
    pub point: Vector2,
    /// Grid line family of the wall face
    pub side: Axis,
    /// Occupied cell the ray entered
    pub cell: IVec2,
    /// Euclidean distance from the ray origin
    pub distance: f64,
}

/// Cast a ray from `origin` along `direction` and return the first wall hit.
///
/// `direction` only needs to be non-zero; it is scaled down to a
/// [`RAY_SEED`] length seed segment before walking.
pub fn cast_ray(grid: &Grid, origin: Vector2, direction: Vector2) -> RayHit {
    cast_ray_traced(grid, origin, direction, |_| {})
}

/// [`cast_ray`], reporting every grid-line crossing to `visit` as the ray
/// walks (the final, wall-hitting crossing included)
pub fn cast_ray_traced<F>(grid: &Grid, origin: Vector2, direction: Vector2, mut visit: F) -> RayHit
where
    F: FnMut(&Crossing),
{
    let seed = origin + direction * RAY_SEED;
    let d = seed - origin;

    let mut crossing = walk(origin, seed);
    loop {
        visit(&crossing);
        let cell = entered_cell(&crossing, d);
        if grid.occupied_cell(cell) {
            return RayHit {
                point: crossing.point,
                side: crossing.side,
                cell,
                distance: origin.distance(crossing.point),
            };
        }
        crossing = walk(origin, crossing.point);
    }
}

/// Cell a ray moving along `d` has just entered at `crossing`.
///
/// Moving forward on an axis, the cell is the truncated coordinate. Moving
/// backward across a grid line of that axis, it is the cell before the line.
/// At a lattice corner both coordinates sit on grid lines, so the diagonal
/// cell is the one entered.
pub fn entered_cell(crossing: &Crossing, d: Vector2) -> IVec2 {
    let p = crossing.point;
    let x_line = crossing.side == Axis::X || on_grid_line(p.x);
    let y_line = crossing.side == Axis::Y || on_grid_line(p.y);
    IVec2::new(axis_cell(p.x, d.x, x_line), axis_cell(p.y, d.y, y_line))
}

#[inline]
fn axis_cell(v: f64, dir: f64, on_line: bool) -> i32 {
    if dir < 0.0 && on_line {
        (v - 1.0).ceil() as i32
    } else {
        v.trunc() as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::geometry::heading;
    use proptest::prelude::*;
    use std::f64::consts::{FRAC_PI_2, PI, TAU};

    #[test]
    fn test_corridor_hit() {
        let grid = Grid::reference();
        let hit = cast_ray(&grid, Vector2::new(5.3, 5.5), heading(0.0));
        assert!((hit.point.x - 7.0).abs() < 1e-6);
        assert!((hit.point.y - 5.5).abs() < 1e-6);
        assert_eq!(hit.side, Axis::X);
        assert_eq!(hit.cell, IVec2::new(7, 5));
        assert!((hit.distance - 1.7).abs() < 1e-6);
    }

    #[test]
    fn test_backward_hit_lands_on_near_face() {
        let grid = Grid::reference();
        // Facing -x from the start position: open all the way to the border
        let hit = cast_ray(&grid, Vector2::new(5.3, 5.5), heading(PI));
        assert!((hit.point.x - 1.0).abs() < 1e-6);
        assert_eq!(hit.side, Axis::X);
        assert_eq!(hit.cell, IVec2::new(0, 5));
    }

    #[test]
    fn test_origin_on_grid_line_skips_cell_behind() {
        let grid = Grid::reference();
        // Cell (1, 3) is a wall, but the first line tested from x = 2 going
        // -x is x = 1, so the ray only stops at the border cell (0, 3)
        assert!(grid.occupied(1, 3));
        let hit = cast_ray(&grid, Vector2::new(2.0, 3.5), heading(PI));
        assert!((hit.point.x - 1.0).abs() < 1e-6);
        assert_eq!(hit.cell, IVec2::new(0, 3));
    }

    #[test]
    fn test_vertical_hits() {
        let grid = Grid::reference();
        // Column 5 from row 5 downward (+y): rows 6, 7, 8, 9 -> (5, 9) is a pillar
        let hit = cast_ray(&grid, Vector2::new(5.5, 5.5), Vector2::new(0.0, 1.0));
        assert_eq!(hit.side, Axis::Y);
        assert_eq!(hit.cell, IVec2::new(5, 9));
        assert!((hit.point.y - 9.0).abs() < 1e-9);

        // Upward (-y): (5, 2) is a pillar, face at y = 3
        let hit = cast_ray(&grid, Vector2::new(5.5, 5.5), Vector2::new(0.0, -1.0));
        assert_eq!(hit.cell, IVec2::new(5, 2));
        assert!((hit.point.y - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_trace_reports_each_crossing() {
        let grid = Grid::reference();
        let mut points = Vec::new();
        let hit = cast_ray_traced(&grid, Vector2::new(5.3, 5.5), heading(0.0), |c| {
            points.push(c.point)
        });
        assert_eq!(points.len(), 2);
        assert!((points[0].x - 6.0).abs() < 1e-9);
        assert_eq!(points[1], hit.point);
    }

    #[test]
    fn test_entered_cell_rules() {
        let d_neg = Vector2::new(-1.0, -0.5);
        // Crossing a vertical line while moving -x: cell before the line
        let c = Crossing {
            point: Vector2::new(3.0, 2.4),
            side: Axis::X,
        };
        assert_eq!(entered_cell(&c, d_neg), IVec2::new(2, 2));

        // Crossing a horizontal line while moving -y
        let c = Crossing {
            point: Vector2::new(3.6, 2.0),
            side: Axis::Y,
        };
        assert_eq!(entered_cell(&c, d_neg), IVec2::new(3, 1));

        // Positive direction always truncates
        let c = Crossing {
            point: Vector2::new(3.0, 2.4),
            side: Axis::X,
        };
        assert_eq!(entered_cell(&c, Vector2::new(1.0, 1.0)), IVec2::new(3, 2));

        // Lattice corner moving (-, -): the diagonal cell
        let c = Crossing {
            point: Vector2::new(3.0, 2.0),
            side: Axis::Y,
        };
        assert_eq!(entered_cell(&c, d_neg), IVec2::new(2, 1));
    }

    #[test]
    fn test_diagonal_through_border_corner_stays_in_bounds() {
        // Exact -45 degree ray toward the corner (1, 1) of the reference map
        let grid = Grid::reference();
        let hit = cast_ray(&grid, Vector2::new(2.5, 2.5), Vector2::new(-1.0, -1.0));
        assert!(grid.occupied_cell(hit.cell));
    }

    #[test]
    fn test_ray_along_grid_line() {
        // Travelling exactly on y = 4 toward +x: checks the row below the line
        let grid = Grid::reference();
        let hit = cast_ray(&grid, Vector2::new(4.5, 4.0), Vector2::new(1.0, 0.0));
        assert_eq!(hit.cell, IVec2::new(7, 4));
        assert!((hit.point.x - 7.0).abs() < 1e-9);
    }

    fn closed_grid(cols: usize, rows: usize, walls: &[bool]) -> Grid {
        let table: Vec<Vec<u8>> = (0..rows)
            .map(|r| {
                (0..cols)
                    .map(|c| {
                        let border = r == 0 || c == 0 || r == rows - 1 || c == cols - 1;
                        u8::from(border || walls[(r * cols + c) % walls.len()])
                    })
                    .collect()
            })
            .collect();
        Grid::from_rows(&table).expect("closed grid")
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]

        #[test]
        fn prop_cast_terminates_in_occupied_cell(
            cols in 3usize..16,
            rows in 3usize..16,
            walls in prop::collection::vec(prop::bool::weighted(0.2), 1..64),
            fx in 0.05f64..0.95,
            fy in 0.05f64..0.95,
            angle in 0.0f64..TAU,
        ) {
            let grid = closed_grid(cols, rows, &walls);
            let open: Vec<IVec2> = (1..rows as i32 - 1)
                .flat_map(|r| (1..cols as i32 - 1).map(move |c| IVec2::new(c, r)))
                .filter(|c| !grid.occupied_cell(*c))
                .collect();
            prop_assume!(!open.is_empty());

            let start = open[((fx * 977.0) as usize) % open.len()];
            let origin = start.as_dvec2() + Vector2::new(fx, fy);
            let hit = cast_ray(&grid, origin, heading(angle));

            prop_assert!(grid.occupied_cell(hit.cell));
            prop_assert!(hit.distance.is_finite());
            // The hit point lies on the boundary of the entered cell
            let lo = hit.cell.as_dvec2() - Vector2::splat(1e-6);
            let hi = lo + Vector2::splat(1.0 + 2e-6);
            prop_assert!(hit.point.cmpge(lo).all() && hit.point.cmple(hi).all());
        }
    }

    #[test]
    fn test_quarter_turns_hit_walls() {
        let grid = Grid::reference();
        for i in 0..4 {
            let hit = cast_ray(&grid, Vector2::new(2.5, 5.5), heading(i as f64 * FRAC_PI_2));
            assert!(grid.occupied_cell(hit.cell), "ray {i} missed");
        }
    }
}
