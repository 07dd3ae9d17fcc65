// SPDX-License-Identifier: MIT
//
// lifeterm — Conway's Game of Life in the terminal.
//
// This is the main binary that wires together the two crates:
//
//   life-core → field, B3/S23 step, viewport, save format, simulation state
//   life-term → terminal control, rendering, input parsing, event loop
//
// `LifeApp` implements life-term's App trait around a `Simulation`:
//
//   stdin → parser → on_event → keymap → Simulation::apply
//   frame clock → on_tick → Simulation::tick
//   paint → framebuffer → diff renderer → terminal

mod app;
mod keymap;

use std::fs::File;
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use env_logger::{Builder, Env, Target};

use life_core::config::DEFAULT_SAVE_PATH;
use life_core::{Config, Simulation, Tint};
use life_term::event_loop::{EventLoop, LoopConfig};

use crate::app::{LifeApp, view_dims};

/// Conway's Game of Life with a scrollable, editable field.
///
/// Keys: w/a/s/d or arrows scroll, p or space pauses, n steps, R randomizes,
/// c clears, S saves, L loads, g/b/r/W pick a color, q quits. Click a cell
/// to toggle it.
#[derive(Debug, Parser)]
#[command(name = "lifeterm", version)]
struct Cli {
    /// Field width in cells.
    #[arg(long, default_value_t = 250)]
    width: usize,

    /// Field height in cells.
    #[arg(long, default_value_t = 50)]
    height: usize,

    /// Generations per second.
    #[arg(long, default_value_t = 20)]
    fps: u32,

    /// File used by save (S) and load (L).
    #[arg(long, default_value = DEFAULT_SAVE_PATH)]
    save_path: PathBuf,

    /// Live cell color: green, blue, red or white.
    #[arg(long, default_value_t = Tint::White)]
    color: Tint,

    /// Start paused.
    #[arg(long)]
    paused: bool,

    /// Start from a random field instead of an empty one.
    #[arg(long)]
    random: bool,

    /// Write logs to this file. `RUST_LOG` sets the level (default info).
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn config(&self) -> Config {
        Config {
            width: self.width,
            height: self.height,
            fps: self.fps,
            save_path: self.save_path.clone(),
            tint: self.color,
            start_paused: self.paused,
            random_start: self.random,
        }
    }
}

/// Logs go to a file or nowhere; stderr is under the alternate screen.
fn init_logging(path: Option<&Path>) -> std::io::Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)?;
    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.log_file.as_deref()) {
        eprintln!("lifeterm: cannot open log file: {e}");
        process::exit(1);
    }

    let config = cli.config();
    let mut event_loop = EventLoop::with_config(LoopConfig {
        frame_interval: config.frame_interval(),
    });
    let size = event_loop.size();
    let (view_h, view_w) = view_dims(size);

    let sim = Simulation::new(&config, view_h, view_w).unwrap_or_else(|e| {
        eprintln!("lifeterm: {e}");
        process::exit(1);
    });
    let mut app = LifeApp::new(sim, size);

    if let Err(e) = event_loop.run(&mut app) {
        log::error!("terminal error: {e}");
        eprintln!("lifeterm: {e}");
        process::exit(1);
    }
    log::info!("exited at generation {}", app.simulation().generation());
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_match_config_defaults() {
        let cli = Cli::parse_from(["lifeterm"]);
        assert_eq!(cli.config(), Config::default());
        assert_eq!(cli.log_file, None);
    }

    #[test]
    fn flags_reach_config() {
        let cli = Cli::parse_from([
            "lifeterm",
            "--width",
            "80",
            "--height",
            "30",
            "--fps",
            "5",
            "--save-path",
            "glider.bin",
            "--color",
            "Green",
            "--paused",
            "--random",
        ]);
        let config = cli.config();
        assert_eq!(config.width, 80);
        assert_eq!(config.height, 30);
        assert_eq!(config.fps, 5);
        assert_eq!(config.save_path, PathBuf::from("glider.bin"));
        assert_eq!(config.tint, Tint::Green);
        assert!(config.start_paused);
        assert!(config.random_start);
    }

    #[test]
    fn oversized_field_fails_validation() {
        let cli = Cli::parse_from(["lifeterm", "--width", "2147483648"]);
        assert!(cli.config().validate().is_err());
    }

    #[test]
    fn unknown_color_is_rejected() {
        assert!(Cli::try_parse_from(["lifeterm", "--color", "mauve"]).is_err());
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
