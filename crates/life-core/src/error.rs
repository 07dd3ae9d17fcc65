//! Error type shared by every core operation.
//!
//! Nothing in the core is fatal. Each failure is reported to the caller with
//! the prior state intact: a rejected `set` leaves the field untouched, a
//! failed load leaves the caller's field in place.

use std::io;

use thiserror::Error;

/// Everything that can go wrong inside the simulation core.
#[derive(Debug, Error)]
pub enum LifeError {
    /// A coordinate fell outside the field (or the viewport's window onto it).
    #[error("cell ({y}, {x}) is outside the {height}×{width} field")]
    OutOfBounds {
        y: usize,
        x: usize,
        height: usize,
        width: usize,
    },

    /// A field dimension was zero, exceeded `i32::MAX`, or the whole field
    /// was too large to allocate.
    #[error("field of {height}×{width} is out of range (each side 1 to 2147483647 cells, and it must fit in memory)")]
    InvalidDimensions { height: usize, width: usize },

    /// The persistence medium could not be read or written.
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    /// Save data is truncated or declares impossible dimensions.
    #[error("corrupt save data: {0}")]
    CorruptData(String),

    /// A startup parameter failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Shorthand used throughout the core.
pub type Result<T> = std::result::Result<T, LifeError>;
