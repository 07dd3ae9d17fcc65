//! Startup parameters for a [`Simulation`](crate::simulation::Simulation).

use std::path::PathBuf;
use std::time::Duration;

use crate::command::Tint;
use crate::error::{LifeError, Result};
use crate::field;

/// Default save file name, relative to the working directory.
pub const DEFAULT_SAVE_PATH: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Field columns.
    pub width: usize,
    /// Field rows.
    pub height: usize,
    /// Generations per second while running.
    pub fps: u32,
    pub save_path: PathBuf,
    pub tint: Tint,
    pub start_paused: bool,
    /// Seed the field randomly instead of starting all dead.
    pub random_start: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: 250,
            height: 50,
            fps: 20,
            save_path: PathBuf::from(DEFAULT_SAVE_PATH),
            tint: Tint::default(),
            start_paused: false,
            random_start: false,
        }
    }
}

impl Config {
    /// Reject values no simulation can run with.
    ///
    /// # Errors
    ///
    /// Returns [`LifeError::InvalidConfig`] for a field size no save file
    /// can describe (zero, or a side above `i32::MAX`), a zero frame rate,
    /// or an empty save path.
    pub fn validate(&self) -> Result<()> {
        field::check_dimensions(self.height, self.width)
            .map_err(|e| LifeError::InvalidConfig(e.to_string()))?;
        if self.fps == 0 {
            return Err(LifeError::InvalidConfig("fps must be at least 1".into()));
        }
        if self.save_path.as_os_str().is_empty() {
            return Err(LifeError::InvalidConfig("save path is empty".into()));
        }
        Ok(())
    }

    /// Time between generations.
    #[must_use]
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs(1) / self.fps.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.width, 250);
        assert_eq!(config.height, 50);
        assert_eq!(config.fps, 20);
        assert_eq!(config.save_path, PathBuf::from("info"));
        assert_eq!(config.tint, Tint::White);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_dimensions_rejected() {
        let config = Config {
            width: 0,
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(LifeError::InvalidConfig(_))));
        let config = Config {
            height: 0,
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(LifeError::InvalidConfig(_))));
    }

    #[test]
    fn dimension_beyond_save_header_rejected() {
        let too_wide = i32::MAX as usize + 1;
        let config = Config {
            width: too_wide,
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(LifeError::InvalidConfig(_))));
        let config = Config {
            height: too_wide,
            width: too_wide,
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(LifeError::InvalidConfig(_))));

        let widest = Config {
            height: 1,
            width: i32::MAX as usize,
            ..Config::default()
        };
        assert!(widest.validate().is_ok());
    }

    #[test]
    fn zero_fps_rejected() {
        let config = Config {
            fps: 0,
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(LifeError::InvalidConfig(_))));
    }

    #[test]
    fn empty_save_path_rejected() {
        let config = Config {
            save_path: PathBuf::new(),
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(LifeError::InvalidConfig(_))));
    }

    #[test]
    fn frame_interval_from_fps() {
        let config = Config::default();
        assert_eq!(config.frame_interval(), Duration::from_millis(50));
    }
}
