// SPDX-License-Identifier: MIT
//
// Differential renderer.
//
// Each frame is compared against the one drawn before it and only changed
// cells are sent to the terminal. A running simulation changes a fraction
// of the screen per generation and a paused one changes nothing, so most
// frames cost a few hundred bytes or none at all.
//
// Per frame:
//
//   1. The app paints a FrameBuffer.
//   2. `render` walks it row by row; a row equal to the previous frame's
//      row is skipped with one slice comparison.
//   3. Changed cells go through the CellWriter into the OutputBuffer.
//   4. `flush` writes the frame in one call, wrapped in synchronized
//      output (DEC 2026).
//
// A size change or `force_redraw` clears the screen and draws every cell.

use std::io::{self, Write};

use crate::ansi;
use crate::buffer::FrameBuffer;
use crate::output::{CellWriter, OutputBuffer};

// ─── RenderStats ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderStats {
    pub cells_rendered: usize,
    pub cells_skipped: usize,
    /// Rows skipped without a per-cell comparison.
    pub rows_skipped: usize,
    pub bytes_written: usize,
}

// ─── DiffRenderer ────────────────────────────────────────────────────────────

/// Emits escape sequences only for cells that changed since the last frame.
///
/// ```no_run
/// use life_term::buffer::FrameBuffer;
/// use life_term::diff::DiffRenderer;
///
/// let mut renderer = DiffRenderer::new();
/// let frame = FrameBuffer::new(80, 24);
/// renderer.render(&frame);
/// renderer.flush().unwrap();
/// ```
pub struct DiffRenderer {
    output: OutputBuffer,
    writer: CellWriter,
    previous: Option<FrameBuffer>,
}

impl DiffRenderer {
    /// A renderer whose first frame is a full redraw.
    #[must_use]
    pub fn new() -> Self {
        Self {
            output: OutputBuffer::new(),
            writer: CellWriter::new(),
            previous: None,
        }
    }

    /// Diff `current` against the last frame and buffer the output.
    pub fn render(&mut self, current: &FrameBuffer) -> RenderStats {
        self.output.clear();
        self.writer.reset_state();

        let width = current.width();
        let height = current.height();
        let mut stats = RenderStats::default();

        if width == 0 || height == 0 {
            self.store_frame(current);
            return stats;
        }

        ansi::begin_sync(&mut self.output).ok();

        let previous = self
            .previous
            .as_ref()
            .filter(|prev| prev.width() == width && prev.height() == height);
        if previous.is_none() {
            ansi::clear_screen(&mut self.output).ok();
        }

        for y in 0..height {
            let (Some(row), prev_row) = (current.row(y), previous.and_then(|p| p.row(y))) else {
                continue;
            };
            if prev_row == Some(row) {
                stats.rows_skipped += 1;
                stats.cells_skipped += row.len();
                continue;
            }

            for (x, cell) in (0..width).zip(row) {
                if prev_row.is_some_and(|prev| prev[usize::from(x)] == *cell) {
                    stats.cells_skipped += 1;
                } else {
                    self.writer.render_cell(&mut self.output, x, y, cell);
                    stats.cells_rendered += 1;
                }
            }
        }

        // Leave the terminal's SGR state clean between frames.
        ansi::reset(&mut self.output).ok();
        ansi::end_sync(&mut self.output).ok();

        stats.bytes_written = self.output.len();
        self.store_frame(current);
        stats
    }

    /// Bytes produced by the last [`render`](Self::render).
    #[must_use]
    pub fn output_bytes(&self) -> &[u8] {
        self.output.as_bytes()
    }

    /// Write the buffered frame to stdout.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to stdout fails.
    pub fn flush(&mut self) -> io::Result<()> {
        self.output.flush_stdout()
    }

    /// Write the buffered frame to `w`.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `w` fails.
    pub fn flush_to(&mut self, w: &mut impl Write) -> io::Result<()> {
        self.output.flush_to(w)
    }

    /// Make the next render a full redraw.
    pub fn force_redraw(&mut self) {
        self.previous = None;
    }

    fn store_frame(&mut self, current: &FrameBuffer) {
        match &mut self.previous {
            Some(prev) => prev.clone_from(current),
            None => self.previous = Some(current.clone()),
        }
    }
}

impl Default for DiffRenderer {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
