// SPDX-License-Identifier: MIT
//
// FrameBuffer — the cell grid the application paints each frame.
//
// The diff renderer compares this frame against the previous one and emits
// escape sequences only for what changed.
//
// Cells live in a flat `Vec<Cell>` indexed row-major (`y * width + x`), so
// the renderer's left-to-right scan is linear in memory. Coordinates are
// `(x, y)` in terminal columns and rows. Writes outside the buffer are
// dropped, never panics.

use unicode_width::UnicodeWidthChar;

use crate::cell::{Attr, Cell};
use crate::color::CellColor;

// ─── FrameBuffer ────────────────────────────────────────────────────────────────

/// A 2D buffer of terminal cells.
///
/// ```
/// use life_term::buffer::FrameBuffer;
/// use life_term::cell::Cell;
///
/// let mut buf = FrameBuffer::new(80, 24);
/// buf.set(5, 3, Cell::new('X'));
/// assert_eq!(buf.get(5, 3).unwrap().character(), Some('X'));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    /// A buffer of empty cells.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::EMPTY; usize::from(width) * usize::from(height)],
        }
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    #[inline]
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }

    #[inline]
    #[must_use]
    pub const fn in_bounds(&self, x: u16, y: u16) -> bool {
        x < self.width && y < self.height
    }

    #[inline]
    const fn index(&self, x: u16, y: u16) -> usize {
        y as usize * self.width as usize + x as usize
    }

    #[inline]
    #[must_use]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        if self.in_bounds(x, y) {
            Some(&self.cells[self.index(x, y)])
        } else {
            None
        }
    }

    /// The raw cell slice, row-major.
    #[inline]
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[inline]
    #[must_use]
    pub fn row(&self, y: u16) -> Option<&[Cell]> {
        if y < self.height {
            let start = self.index(0, y);
            Some(&self.cells[start..start + usize::from(self.width)])
        } else {
            None
        }
    }

    // ─── Clear & Resize ──────────────────────────────────────────────────

    pub fn clear(&mut self) {
        self.cells.fill(Cell::EMPTY);
    }

    /// Resize, discarding all content.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.cells.clear();
        self.cells
            .resize(usize::from(width) * usize::from(height), Cell::EMPTY);
    }

    // ─── Painting ────────────────────────────────────────────────────────

    /// Bounds-checked write of one cell. Returns whether it landed.
    #[inline]
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) -> bool {
        if !self.in_bounds(x, y) {
            return false;
        }
        let idx = self.index(x, y);
        self.cells[idx] = cell;
        true
    }

    /// Fill a rectangle with blank cells of background `bg`, clipped to the
    /// buffer.
    pub fn fill_rect(&mut self, x: u16, y: u16, width: u16, height: u16, bg: CellColor) {
        let x2 = x.saturating_add(width).min(self.width);
        let y2 = y.saturating_add(height).min(self.height);
        if x >= x2 || y >= y2 {
            return;
        }
        for row in y..y2 {
            let start = self.index(x, row);
            let end = self.index(x2, row);
            self.cells[start..end].fill(Cell::blank(bg));
        }
    }

    /// Paint `text` left to right from `(x, y)`.
    ///
    /// Wide characters take two columns (the second a continuation cell);
    /// one that would straddle the right edge is replaced by a space.
    /// Zero-width characters are skipped. Returns the columns consumed.
    pub fn paint_text(
        &mut self,
        x: u16,
        y: u16,
        text: &str,
        fg: CellColor,
        bg: CellColor,
        attrs: Attr,
    ) -> u16 {
        if y >= self.height {
            return 0;
        }

        let mut col = x;
        for ch in text.chars() {
            if col >= self.width {
                break;
            }
            let char_w = ch.width().unwrap_or(0);
            if char_w == 0 {
                continue;
            }

            if char_w == 2 {
                if col + 1 >= self.width {
                    self.set(col, y, Cell::styled(' ', fg, bg, attrs));
                    col += 1;
                    break;
                }
                self.set(col, y, Cell::styled(ch, fg, bg, attrs));
                self.set(col + 1, y, Cell::continuation(fg, bg, attrs));
                col += 2;
            } else {
                self.set(col, y, Cell::styled(ch, fg, bg, attrs));
                col += 1;
            }
        }

        col - x
    }
}

impl std::fmt::Debug for FrameBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "FrameBuffer({}x{})", self.width, self.height)
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────────
