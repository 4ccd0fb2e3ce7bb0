//! Per-frame simulation step
//!
//! Order within a tick: apply queued commands, move the player (with
//! collision), then sample the field of view from the post-move position.

use serde::{Deserialize, Serialize};

use super::caster::RayHit;
use super::fov::{FanSpacing, sample_traced};
use super::geometry::Vector2;
use super::grid::Grid;
use super::input::{Command, CommandQueue, KeyAction, KeyBindings};
use super::state::{Player, SimState, cell_blocked};
use crate::consts::{FOV, RAY_COUNT};
use crate::error::ConfigError;
use crate::settings::Settings;

/// Ray fan parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewConfig {
    /// Total fan width (radians)
    pub fov: f64,
    /// Rays per tick
    pub ray_count: usize,
    pub spacing: FanSpacing,
    /// Record every walker crossing in [`Frame::crossings`]
    pub trace: bool,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            fov: FOV,
            ray_count: RAY_COUNT,
            spacing: FanSpacing::HalfOpen,
            trace: false,
        }
    }
}

/// Output of one tick, ready for a renderer
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Tick number that produced this frame
    pub tick: u64,
    /// Player after movement
    pub player: Player,
    /// One hit per ray, left to right
    pub hits: Vec<RayHit>,
    /// Every grid-line crossing walked, when tracing is on
    pub crossings: Vec<Vector2>,
    /// Whether the player's position changed this tick
    pub moved: bool,
    pub map_view_open: bool,
}

/// Apply a single command to the state
pub fn apply_command(state: &mut SimState, command: Command) {
    match command {
        Command::SetVelocity(v) => state.player.velocity = v,
        Command::Rotate(delta) => state.player.angle += delta,
        Command::ToggleMapView => {
            state.map_view_open = !state.map_view_open;
            log::info!("Map view {}", if state.map_view_open { "opened" } else { "closed" });
        }
    }
}

/// Advance the simulation by one frame
pub fn tick<I>(state: &mut SimState, grid: &Grid, commands: I, view: &ViewConfig) -> Frame
where
    I: IntoIterator<Item = Command>,
{
    for command in commands {
        apply_command(state, command);
    }

    state.time_ticks += 1;
    let moved = state.player.step(grid);

    let player = state.player;
    let mut crossings = Vec::new();
    let hits = sample_traced(
        grid,
        player.pos,
        player.angle,
        view.fov,
        view.ray_count,
        view.spacing,
        |c| {
            if view.trace {
                crossings.push(c.point);
            }
        },
    );

    log::debug!(
        "Tick {}: pos=({:.3}, {:.3}) angle={:.3} rays={} moved={}",
        state.time_ticks,
        player.pos.x,
        player.pos.y,
        player.angle,
        hits.len(),
        moved
    );

    Frame {
        tick: state.time_ticks,
        player,
        hits,
        crossings,
        moved,
        map_view_open: state.map_view_open,
    }
}

/// Simulation root: owns the grid, the state and the pending input
#[derive(Debug, Clone)]
pub struct Simulation {
    grid: Grid,
    pub state: SimState,
    pub view: ViewConfig,
    pub keys: KeyBindings,
    queue: CommandQueue,
}

impl Simulation {
    /// Start at the grid's spawn point. When that lands in a wall the player
    /// is moved to the centre of the first open cell instead.
    pub fn new(grid: Grid, view: ViewConfig) -> Self {
        let mut player = Player::spawn(&grid);
        if cell_blocked(&grid, player.pos) {
            if let Some(cell) = grid.first_open() {
                let pos = cell.as_dvec2() + Vector2::splat(0.5);
                log::warn!(
                    "Spawn ({:.2}, {:.2}) is inside a wall, starting at ({:.2}, {:.2})",
                    player.pos.x,
                    player.pos.y,
                    pos.x,
                    pos.y
                );
                player.pos = pos;
            }
        }
        let state = SimState::new(player);
        Self {
            grid,
            state,
            view,
            keys: KeyBindings::default(),
            queue: CommandQueue::new(),
        }
    }

    /// Build the grid, start state and view from validated settings
    pub fn from_settings(settings: &Settings) -> Result<Self, ConfigError> {
        settings.validate()?;
        let grid = settings.grid()?;
        if settings.start.is_none() {
            let spawn = Player::spawn(&grid).pos;
            if cell_blocked(&grid, spawn) {
                return Err(ConfigError::Invalid(format!(
                    "default spawn ({:.2}, {:.2}) is inside a wall; set a start pose",
                    spawn.x, spawn.y
                )));
            }
        }
        let mut sim = Self::new(grid, settings.view());
        sim.keys = KeyBindings::new(settings.move_speed, settings.turn_step);
        sim.state.map_view_open = settings.map_view_open;
        if let Some(start) = settings.start {
            let pos = Vector2::new(start.x, start.y);
            if cell_blocked(&sim.grid, pos) {
                return Err(ConfigError::Invalid(format!(
                    "start ({}, {}) is inside a wall",
                    start.x, start.y
                )));
            }
            sim.state.player = Player::new(pos, start.angle);
        }
        log::info!(
            "Simulation ready: {} rays over {:.1} degrees",
            sim.view.ray_count,
            sim.view.fov.to_degrees()
        );
        Ok(sim)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Queue a command for the next tick
    pub fn push(&mut self, command: Command) {
        self.queue.push(command);
    }

    /// Queue the command bound to a key event, if any
    pub fn key(&mut self, key: char, action: KeyAction) {
        if let Some(command) = self.keys.command(key, action) {
            self.queue.push(command);
        }
    }

    /// Consume pending input and advance one frame
    pub fn tick(&mut self) -> Frame {
        tick(&mut self.state, &self.grid, self.queue.drain(), &self.view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_tick_moves_then_samples() {
        let grid = Grid::reference();
        let mut state = SimState::new(Player::new(Vector2::new(5.3, 5.5), 0.0));
        let view = ViewConfig {
            ray_count: 1,
            fov: 0.0,
            ..Default::default()
        };

        // Walk forward toward the corridor wall at x = 7
        let frame = tick(&mut state, &grid, [Command::SetVelocity(-0.5)], &view);
        assert!(frame.moved);
        assert_eq!(frame.tick, 1);
        assert!((frame.player.pos.x - 5.8).abs() < 1e-9);
        // The hit distance reflects the post-move position
        assert!((frame.hits[0].distance - 1.2).abs() < 1e-6);
    }

    #[test]
    fn test_tick_rejects_blocked_move() {
        let grid = Grid::reference();
        let mut state = SimState::new(Player::new(Vector2::new(2.0, 2.0), 0.0));
        let frame = tick(
            &mut state,
            &grid,
            [Command::SetVelocity(1.1)],
            &ViewConfig::default(),
        );
        assert!(!frame.moved);
        assert_eq!(state.player.pos, Vector2::new(2.0, 2.0));
        assert_eq!(frame.hits.len(), RAY_COUNT);
    }

    #[test]
    fn test_commands_apply_in_order() {
        let grid = Grid::reference();
        let mut state = SimState::new(Player::spawn(&grid));
        let commands = [
            Command::SetVelocity(-0.03),
            Command::SetVelocity(0.0),
            Command::Rotate(0.1),
            Command::Rotate(0.1),
            Command::ToggleMapView,
        ];
        let frame = tick(&mut state, &grid, commands, &ViewConfig::default());
        assert!(!frame.moved);
        assert!((state.player.angle - (PI + 0.2)).abs() < 1e-12);
        assert!(!frame.map_view_open);
    }

    #[test]
    fn test_trace_collects_crossings() {
        let grid = Grid::reference();
        let mut state = SimState::new(Player::new(Vector2::new(5.3, 5.5), 0.0));
        let view = ViewConfig {
            ray_count: 1,
            fov: 0.0,
            trace: true,
            ..Default::default()
        };
        let no_input: [Command; 0] = [];
        let frame = tick(&mut state, &grid, no_input, &view);
        assert_eq!(frame.crossings.len(), 2);

        let quiet = tick(&mut state, &grid, no_input, &ViewConfig { trace: false, ..view });
        assert!(quiet.crossings.is_empty());
    }

    #[test]
    fn test_simulation_key_events() {
        let mut sim = Simulation::new(Grid::reference(), ViewConfig::default());
        let start = sim.state.player.pos;

        sim.key('w', KeyAction::Press);
        let frame = sim.tick();
        assert!(frame.moved);
        // Facing -x, so forward decreases x
        assert!(frame.player.pos.x < start.x);

        sim.key('w', KeyAction::Release);
        let before = sim.state.player.pos;
        let frame = sim.tick();
        assert!(!frame.moved);
        assert_eq!(frame.player.pos, before);

        sim.key('d', KeyAction::Press);
        sim.key('d', KeyAction::Press);
        sim.tick();
        assert!((sim.state.player.angle - (PI + 0.2)).abs() < 1e-12);
    }

    #[test]
    fn test_from_settings() {
        let settings = Settings {
            ray_count: 7,
            map_view_open: false,
            start: Some(crate::settings::StartPose {
                x: 2.5,
                y: 1.5,
                angle: FRAC_PI_2,
            }),
            ..Default::default()
        };
        let mut sim = Simulation::from_settings(&settings).unwrap();
        assert_eq!(sim.state.player.pos, Vector2::new(2.5, 1.5));
        let frame = sim.tick();
        assert_eq!(frame.hits.len(), 7);
        assert!(!frame.map_view_open);
        assert!(!frame.crossings.is_empty());
    }

    #[test]
    fn test_from_settings_rejects_start_in_wall() {
        let settings = Settings {
            start: Some(crate::settings::StartPose {
                x: 0.5,
                y: 0.5,
                angle: 0.0,
            }),
            ..Default::default()
        };
        assert!(matches!(
            Simulation::from_settings(&settings),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_from_settings_rejects_default_spawn_in_wall() {
        // Spawn on a 3x3 map is (0.8, 1.0), inside border cell (0, 1)
        let settings = Settings {
            map: Some(vec![vec![1, 1, 1], vec![1, 0, 1], vec![1, 1, 1]]),
            ..Default::default()
        };
        assert!(matches!(
            Simulation::from_settings(&settings),
            Err(ConfigError::Invalid(_))
        ));

        let placed = Settings {
            start: Some(crate::settings::StartPose {
                x: 1.5,
                y: 1.5,
                angle: 0.0,
            }),
            ..settings
        };
        let mut sim = Simulation::from_settings(&placed).unwrap();
        assert_eq!(sim.tick().hits.len(), RAY_COUNT);
    }

    #[test]
    fn test_new_moves_blocked_spawn_to_open_cell() {
        let table: [[u8; 3]; 3] = [[1, 1, 1], [1, 0, 1], [1, 1, 1]];
        let grid = Grid::from_rows(&table).unwrap();
        let mut sim = Simulation::new(grid, ViewConfig::default());
        assert_eq!(sim.state.player.pos, Vector2::new(1.5, 1.5));

        let frame = sim.tick();
        assert_eq!(frame.hits.len(), RAY_COUNT);
        // Every hit lies on the single open cell's walls
        let corner = 0.5f64.hypot(0.5);
        assert!(frame.hits.iter().all(|h| h.distance <= corner + 1e-9));
    }

    #[test]
    fn test_determinism() {
        let mut a = Simulation::new(Grid::reference(), ViewConfig::default());
        let mut b = Simulation::new(Grid::reference(), ViewConfig::default());
        let script = [
            Command::SetVelocity(-0.03),
            Command::Rotate(FRAC_PI_2 / 3.0),
            Command::Rotate(-0.1),
        ];
        for command in script {
            a.push(command);
            b.push(command);
            for _ in 0..20 {
                assert_eq!(a.tick(), b.tick());
            }
        }
    }
}
