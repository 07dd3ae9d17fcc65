//! Moore-neighborhood counting with clipped edges.
//!
//! The field does not wrap. A neighbor whose row or column falls outside
//! `[0, height) × [0, width)` is dead and is never read. Bounds are strict
//! (`< height`, `< width`) and the field's own dimensions are only read,
//! never adjusted, while counting.

use crate::field::Field;

/// Row/column offsets of the eight Moore neighbors.
const OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Number of live cells among the eight neighbors of `(y, x)`, in `0..=8`.
///
/// `(y, x)` itself is expected to be inside the field; neighbors that fall
/// outside it count as dead.
#[must_use]
pub fn count_alive_neighbors(field: &Field, y: usize, x: usize) -> u8 {
    let height = field.height();
    let width = field.width();

    let mut alive = 0;
    for (dy, dx) in OFFSETS {
        let (Some(ny), Some(nx)) = (y.checked_add_signed(dy), x.checked_add_signed(dx)) else {
            continue;
        };
        if ny < height && nx < width && field.alive_at(ny, nx) {
            alive += 1;
        }
    }
    alive
}
