//! The B3/S23 step engine.
//!
//! [`advance`] computes the entire next generation from the current one into
//! a separate buffer, then swaps that buffer into the field in one move. No
//! cell's new value is visible to any other cell during the same step.

use crate::field::Field;
use crate::neighbors::count_alive_neighbors;

/// What changed during one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepReport {
    /// Dead cells that came alive.
    pub births: usize,
    /// Live cells that died.
    pub deaths: usize,
}

impl StepReport {
    /// Whether the step left every cell as it was (a still life or empty field).
    #[inline]
    #[must_use]
    pub const fn is_stable(&self) -> bool {
        self.births == 0 && self.deaths == 0
    }
}

/// The Game of Life rule: a live cell survives on 2 or 3 neighbors, a dead
/// cell is born on exactly 3.
#[inline]
#[must_use]
pub const fn next_state(alive: bool, neighbors: u8) -> bool {
    matches!((alive, neighbors), (true, 2 | 3) | (false, 3))
}

/// Replace `field` with its next generation.
///
/// The `active` flag is not consulted; pausing is the caller's decision.
pub fn advance(field: &mut Field) -> StepReport {
    let height = field.height();
    let width = field.width();
    let current = field.cells();

    let mut report = StepReport::default();
    let mut next = Vec::with_capacity(current.len());

    for y in 0..height {
        for x in 0..width {
            let alive = current[y * width + x];
            let becomes = next_state(alive, count_alive_neighbors(field, y, x));
            match (alive, becomes) {
                (false, true) => report.births += 1,
                (true, false) => report.deaths += 1,
                _ => {}
            }
            next.push(becomes);
        }
    }

    field.replace_cells(next);
    report
}
