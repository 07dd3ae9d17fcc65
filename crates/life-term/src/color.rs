// SPDX-License-Identifier: MIT
//
// Terminal cell colors.
//
// A cell stores a fully resolved color: 24-bit RGB, an ANSI-256 palette
// index, or the terminal's own default. The diff renderer compares these in
// its hot loop, so the type is 4 bytes and `Copy`.

use std::fmt;

// ─── CellColor ───────────────────────────────────────────────────────────────

/// Color for one terminal cell, foreground or background.
///
/// Written into the [`FrameBuffer`](crate::buffer::FrameBuffer) and turned
/// into SGR parameters by the ANSI encoders.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellColor {
    /// 24-bit `TrueColor`.
    Rgb(u8, u8, u8),

    /// ANSI 256-color palette index.
    Ansi256(u8),

    /// Terminal default color (inherits from terminal settings).
    #[default]
    Default,
}

impl CellColor {
    pub const BLACK: Self = Self::Rgb(0, 0, 0);
    pub const WHITE: Self = Self::Rgb(255, 255, 255);
    pub const RED: Self = Self::Rgb(205, 49, 49);
    pub const GREEN: Self = Self::Rgb(13, 188, 121);
    pub const BLUE: Self = Self::Rgb(36, 114, 200);

    /// Whether this is the terminal default color.
    #[inline]
    #[must_use]
    pub const fn is_default(self) -> bool {
        matches!(self, Self::Default)
    }
}

impl fmt::Debug for CellColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rgb(r, g, b) => write!(f, "#{r:02x}{g:02x}{b:02x}"),
            Self::Ansi256(idx) => write!(f, "ansi({idx})"),
            Self::Default => write!(f, "default"),
        }
    }
}

impl fmt::Display for CellColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
