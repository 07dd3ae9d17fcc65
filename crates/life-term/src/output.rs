// SPDX-License-Identifier: MIT
//
// Frame output: one buffered write per frame, minimal SGR traffic.
//
//   OutputBuffer: collects every byte of a frame in memory so the whole
//   frame reaches the terminal in a single write.
//
//   CellWriter: remembers the cursor position, colors and attributes it
//   last emitted and skips sequences that would not change anything. A run
//   of identically styled cells costs one SGR sequence plus the characters.

use std::io::{self, Write};

use crate::ansi;
use crate::cell::{Attr, Cell};
use crate::color::CellColor;

// ─── OutputBuffer ────────────────────────────────────────────────────────────

/// Byte buffer for one frame of terminal output.
pub struct OutputBuffer {
    buf: Vec<u8>,
}

const DEFAULT_CAPACITY: usize = 16_384;

impl OutputBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(DEFAULT_CAPACITY),
        }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Append a codepoint as UTF-8. Invalid codepoints and the continuation
    /// marker become `?`.
    pub fn write_codepoint(&mut self, cp: u32) {
        match char::from_u32(cp).filter(|&ch| ch != '\0') {
            Some(ch) => {
                let mut enc = [0u8; 4];
                self.buf.extend_from_slice(ch.encode_utf8(&mut enc).as_bytes());
            }
            None => self.buf.push(b'?'),
        }
    }

    #[inline]
    pub fn clear(&mut self) {
        self.buf.clear();
    }

    /// Write everything to stdout and empty the buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to stdout fails.
    pub fn flush_stdout(&mut self) -> io::Result<()> {
        self.flush_to(&mut io::stdout().lock())
    }

    /// Write everything to `w` and empty the buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `w` fails.
    pub fn flush_to(&mut self, w: &mut impl Write) -> io::Result<()> {
        if !self.buf.is_empty() {
            w.write_all(&self.buf)?;
            w.flush()?;
            self.buf.clear();
        }
        Ok(())
    }
}

impl Write for OutputBuffer {
    #[inline]
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(buf);
        Ok(buf.len())
    }

    /// No-op; see [`flush_stdout`](Self::flush_stdout).
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Default for OutputBuffer {
    fn default() -> Self {
        Self::new()
    }
}

// ─── CellWriter ──────────────────────────────────────────────────────────────

/// Emits cells while tracking terminal state to skip redundant escapes.
///
/// - The cursor move is skipped when the cell directly follows the last one
///   on the same row.
/// - An attribute change resets SGR state first (when any attribute was set),
///   which also forces both colors to be re-sent.
/// - Colors are sent only when they differ from the last ones sent.
/// - A continuation cell right after its wide character produces no output.
#[allow(clippy::struct_field_names)]
pub struct CellWriter {
    last_x: i32,
    last_y: i32,
    last_fg: Option<CellColor>,
    last_bg: Option<CellColor>,
    last_attrs: Attr,
}

impl CellWriter {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            last_x: -1,
            last_y: -1,
            last_fg: None,
            last_bg: None,
            last_attrs: Attr::empty(),
        }
    }

    /// Forget all tracked state. Call after a full clear or SGR reset.
    pub const fn reset_state(&mut self) {
        *self = Self::new();
    }

    pub fn render_cell(&mut self, out: &mut OutputBuffer, x: u16, y: u16, cell: &Cell) {
        let xi = i32::from(x);
        let yi = i32::from(y);

        if cell.is_continuation() && yi == self.last_y && xi == self.last_x + 1 {
            // The wide character before it already covered this column.
            self.last_x = xi;
            return;
        }

        if yi != self.last_y || xi != self.last_x + 1 {
            ansi::cursor_to(out, x, y).ok();
        }
        self.apply_style(out, cell);
        if cell.is_continuation() {
            out.buf.push(b' ');
        } else {
            out.write_codepoint(cell.ch);
        }

        self.last_x = xi;
        self.last_y = yi;
    }

    fn apply_style(&mut self, out: &mut OutputBuffer, cell: &Cell) {
        if cell.attrs != self.last_attrs {
            if !self.last_attrs.is_empty() {
                ansi::reset(out).ok();
                self.last_fg = None;
                self.last_bg = None;
            }
            ansi::attrs(out, cell.attrs).ok();
            self.last_attrs = cell.attrs;
        }
        if self.last_fg != Some(cell.fg) {
            ansi::fg(out, cell.fg).ok();
            self.last_fg = Some(cell.fg);
        }
        if self.last_bg != Some(cell.bg) {
            ansi::bg(out, cell.bg).ok();
            self.last_bg = Some(cell.bg);
        }
    }
}

impl Default for CellWriter {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn text(out: &OutputBuffer) -> String {
        String::from_utf8(out.as_bytes().to_vec()).unwrap()
    }

    // ── OutputBuffer ────────────────────────────────────────────────────

    #[test]
    fn write_trait_appends() {
        let mut buf = OutputBuffer::new();
        write!(buf, "gen {}", 7).unwrap();
        assert_eq!(buf.as_bytes(), b"gen 7");
        assert_eq!(buf.len(), 5);
    }

    #[test]
    fn codepoints_encode_as_utf8() {
        let mut buf = OutputBuffer::new();
        buf.write_codepoint(u32::from('A'));
        buf.write_codepoint(u32::from('█'));
        assert_eq!(buf.as_bytes(), "A█".as_bytes());
    }

    #[test]
    fn invalid_codepoints_become_question_marks() {
        let mut buf = OutputBuffer::new();
        buf.write_codepoint(0);
        buf.write_codepoint(0xD800);
        assert_eq!(buf.as_bytes(), b"??");
    }

    #[test]
    fn flush_to_drains() {
        let mut buf = OutputBuffer::new();
        buf.write_all(b"frame").unwrap();
        let mut sink = Vec::new();
        buf.flush_to(&mut sink).unwrap();
        assert_eq!(sink, b"frame");
        assert!(buf.is_empty());
    }

    // ── CellWriter ──────────────────────────────────────────────────────

    #[test]
    fn first_cell_positions_and_styles() {
        let mut out = OutputBuffer::new();
        let mut w = CellWriter::new();
        w.render_cell(&mut out, 2, 1, &Cell::new('x'));
        assert_eq!(text(&out), "\x1b[2;3H\x1b[39m\x1b[49mx");
    }

    #[test]
    fn adjacent_same_style_cells_emit_only_characters() {
        let mut out = OutputBuffer::new();
        let mut w = CellWriter::new();
        let cell = Cell::blank(CellColor::GREEN);
        w.render_cell(&mut out, 0, 0, &cell);
        out.clear();
        w.render_cell(&mut out, 1, 0, &cell);
        w.render_cell(&mut out, 2, 0, &cell);
        assert_eq!(text(&out), "  ");
    }

    #[test]
    fn gap_forces_cursor_move() {
        let mut out = OutputBuffer::new();
        let mut w = CellWriter::new();
        w.render_cell(&mut out, 0, 0, &Cell::new('a'));
        out.clear();
        w.render_cell(&mut out, 5, 0, &Cell::new('b'));
        assert_eq!(text(&out), "\x1b[1;6Hb");
    }

    #[test]
    fn background_change_emits_only_bg() {
        let mut out = OutputBuffer::new();
        let mut w = CellWriter::new();
        w.render_cell(&mut out, 0, 0, &Cell::blank(CellColor::BLACK));
        out.clear();
        w.render_cell(&mut out, 1, 0, &Cell::blank(CellColor::Ansi256(2)));
        assert_eq!(text(&out), "\x1b[42m ");
    }

    #[test]
    fn dropping_attrs_resets_and_resends_colors() {
        let mut out = OutputBuffer::new();
        let mut w = CellWriter::new();
        let bold = Cell::styled('a', CellColor::Default, CellColor::Default, Attr::BOLD);
        w.render_cell(&mut out, 0, 0, &bold);
        out.clear();
        w.render_cell(&mut out, 1, 0, &Cell::new('b'));
        assert_eq!(text(&out), "\x1b[0m\x1b[39m\x1b[49mb");
    }

    #[test]
    fn continuation_after_wide_char_is_silent() {
        let mut out = OutputBuffer::new();
        let mut w = CellWriter::new();
        w.render_cell(&mut out, 0, 0, &Cell::new('中'));
        out.clear();
        let cont = Cell::continuation(CellColor::Default, CellColor::Default, Attr::empty());
        w.render_cell(&mut out, 1, 0, &cont);
        assert!(out.is_empty());
    }

    #[test]
    fn orphan_continuation_renders_space() {
        let mut out = OutputBuffer::new();
        let mut w = CellWriter::new();
        let cont = Cell::continuation(CellColor::Default, CellColor::Default, Attr::empty());
        w.render_cell(&mut out, 4, 0, &cont);
        assert_eq!(text(&out), "\x1b[1;5H\x1b[39m\x1b[49m ");
    }
}
