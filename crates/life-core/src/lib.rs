//! life-core — Conway's Game of Life engine with no terminal dependency.
//!
//! # Modules
//!
//! - [`field`]: the cell grid and its running/paused flag
//! - [`neighbors`]: edge-clipped Moore neighbor counts
//! - [`step`]: the B3/S23 generation step
//! - [`viewport`]: a scrollable window onto the field
//! - [`codec`]: binary save/load format
//! - [`edit`]: pointer-driven cell toggling
//! - [`command`], [`config`], [`simulation`]: the state the driving loop
//!   owns and the commands it applies

pub mod codec;
pub mod command;
pub mod config;
pub mod edit;
pub mod error;
pub mod field;
pub mod neighbors;
pub mod simulation;
pub mod step;
pub mod viewport;

pub use command::{Command, Direction, Tint};
pub use config::Config;
pub use error::{LifeError, Result};
pub use field::Field;
pub use simulation::{Action, Outcome, Simulation};
pub use step::StepReport;
pub use viewport::Viewport;
