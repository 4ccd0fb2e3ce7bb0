//! Ray Grid - first-person ray casting over a 2D tile map
//!
//! Core modules:
//! - `sim`: Deterministic simulation (grid, boundary walker, ray caster,
//!   field-of-view sampler, player motion and collision)
//! - `render`: Renderer interface and the top-down map view built on it
//! - `settings`: Data-driven configuration

pub mod error;
pub mod render;
pub mod settings;
pub mod sim;

pub use error::{ConfigError, MapError};
pub use settings::Settings;
pub use sim::{Frame, Grid, Simulation};

/// Engine configuration constants
pub mod consts {
    /// Field of view (90 degrees)
    pub const FOV: f64 = std::f64::consts::FRAC_PI_2;
    /// Distance from the player to the projection plane, in cells
    pub const PLANE: f64 = 0.5;
    /// Rays cast per tick
    pub const RAY_COUNT: usize = 100;

    /// Walk speed (cells per tick)
    pub const MOVE_SPEED: f64 = 0.03;
    /// Angle per turn key press (radians)
    pub const TURN_STEP: f64 = 0.1;
    /// Initial facing angle (-x)
    pub const START_ANGLE: f64 = std::f64::consts::PI;

    /// Length of the seed segment that gives a ray its direction
    pub const RAY_SEED: f64 = 1e-9;
    /// Push applied to a point sitting on a grid line so the walker moves past it
    pub const WALK_NUDGE: f64 = 1e-7;
}
