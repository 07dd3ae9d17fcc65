//! Simulation — the state the driving loop owns and mutates.
//!
//! A [`Simulation`] bundles the field, the viewport onto it, the generation
//! counter, the live-cell tint and the save path. The loop feeds it one
//! [`Command`] at a time through [`apply`](Simulation::apply) and calls
//! [`tick`](Simulation::tick) once per frame; nothing here touches a
//! terminal.

use std::path::{Path, PathBuf};

use crate::codec;
use crate::command::{Command, Tint};
use crate::config::Config;
use crate::edit;
use crate::error::Result;
use crate::field::Field;
use crate::step::{self, StepReport};
use crate::viewport::Viewport;

/// What the loop should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Continue,
    Quit,
}

/// Result of applying one [`Command`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub action: Action,
    /// Status text for the user, if the command produced any.
    pub message: Option<String>,
}

impl Outcome {
    const fn proceed() -> Self {
        Self {
            action: Action::Continue,
            message: None,
        }
    }

    fn say(message: impl Into<String>) -> Self {
        Self {
            action: Action::Continue,
            message: Some(message.into()),
        }
    }

    const fn quit() -> Self {
        Self {
            action: Action::Quit,
            message: None,
        }
    }
}

/// A running game: field, viewport onto it, generation count, tint and save path.
pub struct Simulation {
    field: Field,
    viewport: Viewport,
    generation: u64,
    tint: Tint,
    save_path: PathBuf,
}

impl Simulation {
    /// Build the startup state for a `view_h × view_w` window.
    ///
    /// # Errors
    ///
    /// Returns [`LifeError::InvalidConfig`](crate::LifeError::InvalidConfig)
    /// if `config` fails validation, and
    /// [`LifeError::InvalidDimensions`](crate::LifeError::InvalidDimensions)
    /// if the field cannot be allocated.
    pub fn new(config: &Config, view_h: usize, view_w: usize) -> Result<Self> {
        config.validate()?;
        let mut field = Field::new(config.height, config.width)?;
        if config.random_start {
            field.randomize();
        }
        field.set_active(!config.start_paused);
        log::info!(
            "simulation {}×{} at {} fps, view {view_h}×{view_w}",
            config.height,
            config.width,
            config.fps
        );
        Ok(Self::from_field(field, config, view_h, view_w))
    }

    /// Start from an existing field instead of a blank one. The field's own
    /// dimensions and active flag win over `config`.
    #[must_use]
    pub fn from_field(field: Field, config: &Config, view_h: usize, view_w: usize) -> Self {
        let mut viewport = Viewport::new(view_h, view_w);
        viewport.clamp_to(&field);
        Self {
            field,
            viewport,
            generation: 0,
            tint: config.tint,
            save_path: config.save_path.clone(),
        }
    }

    // -- Accessors ----------------------------------------------------------

    #[must_use]
    pub const fn field(&self) -> &Field {
        &self.field
    }

    #[must_use]
    pub const fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Generations since start or the last load, randomize or clear.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub const fn tint(&self) -> Tint {
        self.tint
    }

    #[must_use]
    pub fn save_path(&self) -> &Path {
        &self.save_path
    }

    /// The cells currently under the window.
    #[must_use]
    pub fn visible_cells(&self) -> Vec<Vec<bool>> {
        self.viewport.visible_cells(&self.field)
    }

    // -- Driving ------------------------------------------------------------

    /// Advance one generation if the simulation is running.
    pub fn tick(&mut self) -> Option<StepReport> {
        if !self.field.is_active() {
            return None;
        }
        Some(self.step_once())
    }

    /// The render surface changed size.
    pub fn resize_view(&mut self, view_h: usize, view_w: usize) {
        self.viewport.resize(view_h, view_w, &self.field);
    }

    /// Apply one command.
    pub fn apply(&mut self, command: Command) -> Outcome {
        match command {
            Command::Move(direction) => {
                self.viewport.scroll(direction, &self.field);
                Outcome::proceed()
            }
            Command::TogglePause => {
                let running = self.field.toggle_active();
                log::debug!("{}", if running { "resumed" } else { "paused" });
                Outcome::proceed()
            }
            Command::Randomize => {
                self.field.randomize();
                self.generation = 0;
                Outcome::say("randomized")
            }
            Command::Clear => {
                self.field.clear();
                self.generation = 0;
                Outcome::say("cleared")
            }
            Command::Step => {
                self.step_once();
                Outcome::proceed()
            }
            Command::Save => self.save(),
            Command::Load => self.load(),
            Command::SetTint(tint) => {
                self.tint = tint;
                Outcome::proceed()
            }
            Command::Pointer { y, x, pressed } => {
                if pressed {
                    edit::toggle(&mut self.field, &self.viewport, y, x);
                }
                Outcome::proceed()
            }
            Command::Quit => Outcome::quit(),
        }
    }

    fn step_once(&mut self) -> StepReport {
        let report = step::advance(&mut self.field);
        self.generation += 1;
        report
    }

    fn save(&self) -> Outcome {
        match codec::save(&self.field, &self.save_path) {
            Ok(()) => Outcome::say(format!(
                "saved {}×{} to {}",
                self.field.height(),
                self.field.width(),
                self.save_path.display()
            )),
            Err(e) => {
                log::warn!("save to {} failed: {e}", self.save_path.display());
                Outcome::say(format!("save failed: {e}"))
            }
        }
    }

    fn load(&mut self) -> Outcome {
        match codec::load(&self.save_path) {
            Ok(mut loaded) => {
                loaded.set_active(self.field.is_active());
                self.field = loaded;
                self.viewport.clamp_to(&self.field);
                self.generation = 0;
                Outcome::say(format!(
                    "loaded {}×{} from {}",
                    self.field.height(),
                    self.field.width(),
                    self.save_path.display()
                ))
            }
            Err(e) => {
                log::warn!("load from {} failed: {e}", self.save_path.display());
                Outcome::say(format!("load failed: {e}"))
            }
        }
    }
}
