//! Ray Grid entry point
//!
//! Runs the simulation headless for a number of frames with a scripted
//! walk, then prints the map view as text.
//!
//! Usage: `ray-grid [settings.json] [frames]`

use std::path::PathBuf;
use std::process;

use ray_grid::render::{AsciiCanvas, OverlayStyle, draw_map_view};
use ray_grid::sim::KeyAction;
use ray_grid::{ConfigError, Frame, Settings, Simulation};

const DEFAULT_SETTINGS: &str = "ray-grid.json";
const DEFAULT_FRAMES: u64 = 120;

/// Key events fed to the simulation: (frame, key, action)
const SCRIPT: &[(u64, char, KeyAction)] = &[
    (0, 'w', KeyAction::Press),
    (30, 'w', KeyAction::Release),
    (31, 'a', KeyAction::Press),
    (32, 'a', KeyAction::Press),
    (33, 'a', KeyAction::Press),
    (40, 'w', KeyAction::Press),
    (90, 'w', KeyAction::Release),
];

fn main() {
    env_logger::init();
    log::info!("Ray Grid (native) starting...");

    let mut args = std::env::args().skip(1);
    let settings_path = PathBuf::from(args.next().unwrap_or_else(|| DEFAULT_SETTINGS.into()));
    let frames = match args.next().map(|s| s.parse::<u64>()) {
        None => DEFAULT_FRAMES,
        Some(Ok(n)) => n,
        Some(Err(e)) => {
            log::error!("Invalid frame count: {}", e);
            process::exit(2);
        }
    };

    if let Err(e) = run(&settings_path, frames) {
        log::error!("{}", e);
        process::exit(1);
    }
}

fn run(settings_path: &std::path::Path, frames: u64) -> Result<(), ConfigError> {
    let settings = Settings::load_or_default(settings_path)?;
    let mut sim = Simulation::from_settings(&settings)?;

    let mut last: Option<Frame> = None;
    for frame_index in 0..frames {
        for (_, key, action) in SCRIPT.iter().filter(|(at, _, _)| *at == frame_index) {
            sim.key(*key, *action);
        }
        last = Some(sim.tick());
    }

    let Some(frame) = last else {
        log::warn!("No frames simulated");
        return Ok(());
    };

    let nearest = frame
        .hits
        .iter()
        .map(|h| h.distance)
        .fold(f64::INFINITY, f64::min);
    log::info!(
        "Frame {}: player at ({:.2}, {:.2}), {} rays, nearest wall {:.2}",
        frame.tick,
        frame.player.pos.x,
        frame.player.pos.y,
        frame.hits.len(),
        nearest
    );

    let grid = sim.grid();
    let mut canvas = AsciiCanvas::new(grid.cols(), grid.rows(), 2, 1);
    let style = OverlayStyle {
        // Labels do not fit at one character per half cell
        labels: false,
        ..OverlayStyle::from_settings(&settings)
    };
    draw_map_view(&mut canvas, grid, &frame, &style);
    println!("{}", canvas);
    Ok(())
}
