//! The discrete commands an input source can issue against a simulation.

use std::fmt;
use std::str::FromStr;

use crate::error::LifeError;

pub use crate::viewport::Direction;

/// Color used for live cells. Purely presentational; the core never reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tint {
    Green,
    Blue,
    Red,
    #[default]
    White,
}

impl Tint {
    pub const ALL: [Self; 4] = [Self::Green, Self::Blue, Self::Red, Self::White];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Green => "green",
            Self::Blue => "blue",
            Self::Red => "red",
            Self::White => "white",
        }
    }
}

impl fmt::Display for Tint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Tint {
    type Err = LifeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                LifeError::InvalidConfig(format!(
                    "unknown color {s:?} (expected green, blue, red or white)"
                ))
            })
    }
}

/// One user intent, decoded from a key or pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Scroll the viewport one cell.
    Move(Direction),
    /// Flip between running and paused.
    TogglePause,
    /// Fill the field with random cells.
    Randomize,
    /// Kill every cell.
    Clear,
    /// Advance exactly one generation, even while paused.
    Step,
    Save,
    Load,
    SetTint(Tint),
    /// A pointer event at window cell `(y, x)`. Only presses edit the field.
    Pointer { y: usize, x: usize, pressed: bool },
    Quit,
}
