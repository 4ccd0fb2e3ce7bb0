//! Ray casting and player simulation
//!
//! Everything here is pure and deterministic:
//! - The grid is immutable once built
//! - All mutable state lives in `SimState` and changes only inside `tick`
//! - No rendering or platform dependencies

pub mod caster;
pub mod fov;
pub mod geometry;
pub mod grid;
pub mod input;
pub mod state;
pub mod tick;
pub mod walker;

pub use caster::{RayHit, cast_ray, cast_ray_traced, entered_cell};
pub use fov::{FanSpacing, ray_angles, sample, sample_traced};
pub use geometry::{Axis, Crossing, Vector2};
pub use grid::{Grid, REFERENCE_MAP};
pub use input::{Command, CommandQueue, KeyAction, KeyBindings};
pub use state::{Player, SimState, cell_blocked};
pub use tick::{Frame, Simulation, ViewConfig, apply_command, tick};
pub use walker::walk;
