// SPDX-License-Identifier: MIT
//
// life-term — terminal layer for lifeterm.
//
// Raw mode and the alternate screen via termios, SGR mouse and key input
// parsed from raw stdin bytes, and differential rendering that sends only
// changed cells, one buffered write per frame. Direct ANSI output, no TUI
// framework underneath.
//
// The event loop paces frames at a fixed rate and hands the app one tick
// per frame, which the simulation uses as its generation clock.

pub mod ansi;
pub mod buffer;
pub mod cell;
pub mod color;
pub mod diff;
pub mod event_loop;
pub mod input;
pub mod output;
pub mod reader;
pub mod terminal;
