//! Viewport — the window of the field currently on screen.
//!
//! A `Viewport` is a `view_h × view_w` window (in cells) positioned at
//! `(offset_y, offset_x)` in field coordinates. It holds no cell data; every
//! operation that needs the field's extent takes the field as a parameter.
//!
//! Scrolling is clamped so the window never extends past the field:
//!
//! ```text
//! 0 ≤ offset_x ≤ width  − view_w
//! 0 ≤ offset_y ≤ height − view_h
//! ```
//!
//! When the field is smaller than the window along an axis, that offset is
//! pinned to 0 and the window cells beyond the field are reported dead and
//! are not addressable.

use crate::error::{LifeError, Result};
use crate::field::Field;

/// A scroll direction, one cell at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// A movable window onto a [`Field`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    view_h: usize,
    view_w: usize,
    offset_y: usize,
    offset_x: usize,
}

impl Viewport {
    /// A window of `view_h × view_w` cells at the field's top-left corner.
    #[must_use]
    pub const fn new(view_h: usize, view_w: usize) -> Self {
        Self {
            view_h,
            view_w,
            offset_y: 0,
            offset_x: 0,
        }
    }

    /// Window height in cells.
    #[inline]
    #[must_use]
    pub const fn height(&self) -> usize {
        self.view_h
    }

    /// Window width in cells.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> usize {
        self.view_w
    }

    /// Top-left corner of the window in field coordinates, `(y, x)`.
    #[inline]
    #[must_use]
    pub const fn offset(&self) -> (usize, usize) {
        (self.offset_y, self.offset_x)
    }

    // -- Scrolling ----------------------------------------------------------

    /// Scroll one cell up. Returns `false` (and does nothing) at the top edge.
    pub const fn move_up(&mut self) -> bool {
        if self.offset_y == 0 {
            return false;
        }
        self.offset_y -= 1;
        true
    }

    /// Scroll one cell down, unless the window already shows the last row.
    pub fn move_down(&mut self, field: &Field) -> bool {
        if self.offset_y >= self.max_offset_y(field) {
            return false;
        }
        self.offset_y += 1;
        true
    }

    /// Scroll one cell left. Returns `false` (and does nothing) at the left edge.
    pub const fn move_left(&mut self) -> bool {
        if self.offset_x == 0 {
            return false;
        }
        self.offset_x -= 1;
        true
    }

    /// Scroll one cell right, unless the window already shows the last column.
    pub fn move_right(&mut self, field: &Field) -> bool {
        if self.offset_x >= self.max_offset_x(field) {
            return false;
        }
        self.offset_x += 1;
        true
    }

    /// Scroll one cell in `direction`. Returns whether the window moved.
    pub fn scroll(&mut self, direction: Direction, field: &Field) -> bool {
        match direction {
            Direction::Up => self.move_up(),
            Direction::Down => self.move_down(field),
            Direction::Left => self.move_left(),
            Direction::Right => self.move_right(field),
        }
    }

    /// Pull the offset back inside the field after its dimensions changed.
    pub fn clamp_to(&mut self, field: &Field) {
        self.offset_y = self.offset_y.min(self.max_offset_y(field));
        self.offset_x = self.offset_x.min(self.max_offset_x(field));
    }

    /// Change the window size (terminal resize) and re-clamp the offset.
    pub fn resize(&mut self, view_h: usize, view_w: usize, field: &Field) {
        self.view_h = view_h;
        self.view_w = view_w;
        self.clamp_to(field);
    }

    fn max_offset_y(&self, field: &Field) -> usize {
        field.height().saturating_sub(self.view_h)
    }

    fn max_offset_x(&self, field: &Field) -> usize {
        field.width().saturating_sub(self.view_w)
    }

    // -- Mapping ------------------------------------------------------------

    /// The `view_h × view_w` matrix of cells under the window.
    ///
    /// Window cells that fall beyond the field are reported dead.
    #[must_use]
    pub fn visible_cells(&self, field: &Field) -> Vec<Vec<bool>> {
        (0..self.view_h)
            .map(|vy| {
                let fy = self.offset_y + vy;
                (0..self.view_w)
                    .map(|vx| {
                        let fx = self.offset_x + vx;
                        field.contains(fy, fx) && field.alive_at(fy, fx)
                    })
                    .collect()
            })
            .collect()
    }

    /// Map a window-relative `(view_y, view_x)` to field coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`LifeError::OutOfBounds`] if the position is outside the
    /// window, or if it lands outside the field (field smaller than window).
    pub fn to_field_coord(&self, view_y: usize, view_x: usize, field: &Field) -> Result<(usize, usize)> {
        if view_y >= self.view_h || view_x >= self.view_w {
            return Err(LifeError::OutOfBounds {
                y: view_y,
                x: view_x,
                height: self.view_h,
                width: self.view_w,
            });
        }

        let fy = self.offset_y + view_y;
        let fx = self.offset_x + view_x;
        if !field.contains(fy, fx) {
            return Err(LifeError::OutOfBounds {
                y: fy,
                x: fx,
                height: field.height(),
                width: field.width(),
            });
        }
        Ok((fy, fx))
    }
}
