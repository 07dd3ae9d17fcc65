// SPDX-License-Identifier: MIT
//
// Cell — one character position on screen.
//
// A cell holds a codepoint, foreground and background colors and text
// attributes. The frame buffer is a grid of these; the diff renderer
// compares them and emits escape sequences only for the ones that changed.
//
// Wide characters occupy two columns. The first cell holds the codepoint;
// the second is a continuation cell (ch = 0) that the renderer skips when
// writing characters but still paints with its background.

use crate::color::CellColor;

// ─── Text Attributes ─────────────────────────────────────────────────────────

bitflags::bitflags! {
    /// Text attributes, one bit per SGR parameter.
    ///
    /// ```
    /// use life_term::cell::Attr;
    ///
    /// let style = Attr::BOLD | Attr::INVERSE;
    /// assert!(style.contains(Attr::BOLD));
    /// assert!(!style.contains(Attr::DIM));
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct Attr: u8 {
        /// SGR 1.
        const BOLD    = 1 << 0;
        /// SGR 2.
        const DIM     = 1 << 1;
        /// SGR 3.
        const ITALIC  = 1 << 2;
        /// SGR 7, swap foreground and background.
        const INVERSE = 1 << 3;
    }
}

// ─── Cell ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// Unicode codepoint; `0` marks a continuation cell.
    pub ch: u32,
    pub fg: CellColor,
    pub bg: CellColor,
    pub attrs: Attr,
}

const CONTINUATION: u32 = 0;
const SPACE: u32 = b' ' as u32;

impl Cell {
    /// Space with default colors and no attributes.
    pub const EMPTY: Self = Self {
        ch: SPACE,
        fg: CellColor::Default,
        bg: CellColor::Default,
        attrs: Attr::empty(),
    };

    #[inline]
    #[must_use]
    pub const fn new(ch: char) -> Self {
        Self {
            ch: ch as u32,
            ..Self::EMPTY
        }
    }

    #[inline]
    #[must_use]
    pub const fn styled(ch: char, fg: CellColor, bg: CellColor, attrs: Attr) -> Self {
        Self {
            ch: ch as u32,
            fg,
            bg,
            attrs,
        }
    }

    /// A blank cell filled with `bg`.
    #[inline]
    #[must_use]
    pub const fn blank(bg: CellColor) -> Self {
        Self { bg, ..Self::EMPTY }
    }

    /// Second column of a wide character. Carries the parent's colors so the
    /// background fills correctly.
    #[inline]
    #[must_use]
    pub const fn continuation(fg: CellColor, bg: CellColor, attrs: Attr) -> Self {
        Self {
            ch: CONTINUATION,
            fg,
            bg,
            attrs,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_continuation(self) -> bool {
        self.ch == CONTINUATION
    }

    /// The codepoint as a `char`; `None` for continuation cells.
    #[inline]
    #[must_use]
    pub const fn character(self) -> Option<char> {
        if self.ch == CONTINUATION {
            return None;
        }
        char::from_u32(self.ch)
    }
}

impl Default for Cell {
    #[inline]
    fn default() -> Self {
        Self::EMPTY
    }
}

impl std::fmt::Debug for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_continuation() {
            return write!(f, "Cell(continuation)");
        }
        let ch = char::from_u32(self.ch).unwrap_or('?');
        write!(f, "Cell({ch:?}")?;
        if !self.fg.is_default() {
            write!(f, ", fg={:?}", self.fg)?;
        }
        if !self.bg.is_default() {
            write!(f, ", bg={:?}", self.bg)?;
        }
        if !self.attrs.is_empty() {
            write!(f, ", {:?}", self.attrs)?;
        }
        write!(f, ")")
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
