//! Pointer editing: flip the cell under a window-relative position.

use crate::field::Field;
use crate::viewport::Viewport;

/// Toggle the field cell under `(pointer_y, pointer_x)` in window coordinates.
///
/// Positions outside the window, or past the edge of a field smaller than
/// the window, are ignored. Returns whether a cell was flipped.
pub fn toggle(field: &mut Field, viewport: &Viewport, pointer_y: usize, pointer_x: usize) -> bool {
    let Ok((y, x)) = viewport.to_field_coord(pointer_y, pointer_x, field) else {
        return false;
    };
    field.toggle(y, x).is_ok()
}
