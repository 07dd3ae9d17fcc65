// SPDX-License-Identifier: MIT
//
// Terminal input parser.
//
// Turns raw stdin bytes into key and mouse events. Understands what
// `terminal.rs` turns on:
//
// - Plain ASCII, control characters and UTF-8 multi-byte characters
// - CSI and SS3 cursor keys, with xterm modifier parameters
// - SGR mouse reports (`ESC [ < b ; x ; y M|m`)
// - Alt+key (ESC followed by a printable character)
//
// Escape sequences can be split across reads, so the parser keeps a small
// byte buffer between calls to [`Parser::advance`]. A lone ESC is ambiguous
// until more bytes arrive or the caller gives up waiting and calls
// [`Parser::flush`].

use bitflags::bitflags;

// ─── Event Types ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Key(KeyEvent),
    Mouse(MouseEvent),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    #[must_use]
    pub const fn new(code: KeyCode, modifiers: Modifiers) -> Self {
        Self { code, modifiers }
    }

    #[must_use]
    pub const fn plain(code: KeyCode) -> Self {
        Self::new(code, Modifiers::empty())
    }

    /// Whether this is Ctrl plus the given letter.
    #[must_use]
    pub fn is_ctrl(&self, ch: char) -> bool {
        self.code == KeyCode::Char(ch) && self.modifiers.contains(Modifiers::CTRL)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCode {
    Char(char),
    Escape,
    Up,
    Down,
    Left,
    Right,
}

bitflags! {
    /// Modifier flags, in xterm's `param = 1 + bitmask` encoding order.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct Modifiers: u8 {
        const SHIFT = 0b0001;
        const ALT   = 0b0010;
        const CTRL  = 0b0100;
    }
}

/// A mouse report at a 0-indexed screen position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseEvent {
    pub kind: MouseEventKind,
    pub x: u16,
    pub y: u16,
    pub modifiers: Modifiers,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseEventKind {
    Press(MouseButton),
    Release(MouseButton),
    ScrollUp,
    ScrollDown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

// ─── Parser ─────────────────────────────────────────────────────────────────

/// Incremental byte-to-event parser.
pub struct Parser {
    buf: Vec<u8>,
}

impl Parser {
    #[must_use]
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(64),
        }
    }

    /// Feed bytes and return every complete event. An incomplete trailing
    /// sequence stays buffered for the next call.
    pub fn advance(&mut self, data: &[u8]) -> Vec<Event> {
        self.buf.extend_from_slice(data);
        let mut events = Vec::new();
        let mut pos = 0;

        while pos < self.buf.len() {
            match try_parse(&self.buf[pos..]) {
                Parsed::Event(event, consumed) => {
                    events.push(event);
                    pos += consumed;
                }
                Parsed::Incomplete => break,
                Parsed::Skip(n) => pos += n,
            }
        }

        self.buf.drain(..pos);
        events
    }

    /// Whether bytes are waiting for the rest of a sequence.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        !self.buf.is_empty()
    }

    /// Give up on completing the buffered bytes: a lone ESC becomes an
    /// Escape key, anything else printable becomes a literal key.
    pub fn flush(&mut self) -> Vec<Event> {
        let events = self
            .buf
            .iter()
            .filter_map(|&byte| match byte {
                0x1B => Some(key(KeyCode::Escape)),
                b @ 0x20..=0x7E => Some(key(KeyCode::Char(b as char))),
                _ => None,
            })
            .collect();
        self.buf.clear();
        events
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Stateless Parsing ──────────────────────────────────────────────────────

enum Parsed {
    /// An event and the bytes it consumed.
    Event(Event, usize),
    Incomplete,
    /// Unrecognized bytes to drop.
    Skip(usize),
}

fn try_parse(buf: &[u8]) -> Parsed {
    match buf[0] {
        0x1B => parse_escape(buf),
        b @ 0x01..=0x1A => Parsed::Event(ctrl(b), 1),
        b @ 0x20..=0x7E => Parsed::Event(key(KeyCode::Char(b as char)), 1),
        0xC0..=0xFF => parse_utf8(buf),
        _ => Parsed::Skip(1),
    }
}

fn parse_escape(buf: &[u8]) -> Parsed {
    let Some(&next) = buf.get(1) else {
        return Parsed::Incomplete;
    };
    match next {
        b'[' => parse_csi(buf),
        b'O' => parse_ss3(buf),
        b @ 0x20..=0x7E => Parsed::Event(
            Event::Key(KeyEvent::new(KeyCode::Char(b as char), Modifiers::ALT)),
            2,
        ),
        _ => Parsed::Event(key(KeyCode::Escape), 1),
    }
}

fn parse_csi(buf: &[u8]) -> Parsed {
    if buf.len() < 3 {
        return Parsed::Incomplete;
    }
    if buf[2] == b'<' {
        return parse_sgr_mouse(buf);
    }

    // Parameter and intermediate bytes run until a final byte in 0x40..=0x7E.
    let Some(offset) = buf[2..].iter().position(|b| (0x40..=0x7E).contains(b)) else {
        return if buf[2..].iter().all(|b| (0x20..=0x3F).contains(b)) {
            Parsed::Incomplete
        } else {
            Parsed::Skip(buf.len())
        };
    };
    let end = 2 + offset;
    let consumed = end + 1;
    let params = parse_params(&buf[2..end]);
    let modifiers = params.get(1).map_or(Modifiers::empty(), |&p| decode_modifiers(p));

    let code = match buf[end] {
        b'A' => KeyCode::Up,
        b'B' => KeyCode::Down,
        b'C' => KeyCode::Right,
        b'D' => KeyCode::Left,
        _ => return Parsed::Skip(consumed),
    };
    Parsed::Event(Event::Key(KeyEvent::new(code, modifiers)), consumed)
}

fn parse_ss3(buf: &[u8]) -> Parsed {
    let Some(&b) = buf.get(2) else {
        return Parsed::Incomplete;
    };
    let code = match b {
        b'A' => KeyCode::Up,
        b'B' => KeyCode::Down,
        b'C' => KeyCode::Right,
        b'D' => KeyCode::Left,
        _ => return Parsed::Skip(3),
    };
    Parsed::Event(key(code), 3)
}

/// `ESC [ < Cb ; Cx ; Cy M` (press) or `... m` (release). Motion reports
/// only arrive in tracking modes the terminal layer never enables and are
/// dropped.
fn parse_sgr_mouse(buf: &[u8]) -> Parsed {
    let body = &buf[3..];
    let Some(end) = body.iter().position(|&b| b == b'M' || b == b'm') else {
        return if body.iter().all(|&b| b.is_ascii_digit() || b == b';') {
            Parsed::Incomplete
        } else {
            Parsed::Skip(buf.len())
        };
    };
    let consumed = 3 + end + 1;
    let params = &body[..end];
    if !params.iter().all(|&b| b.is_ascii_digit() || b == b';') {
        return Parsed::Skip(consumed);
    }
    let values = parse_params(params);
    let [cb, raw_x, raw_y] = values[..] else {
        return Parsed::Skip(consumed);
    };

    let mut modifiers = Modifiers::empty();
    if cb & 4 != 0 {
        modifiers |= Modifiers::SHIFT;
    }
    if cb & 8 != 0 {
        modifiers |= Modifiers::ALT;
    }
    if cb & 16 != 0 {
        modifiers |= Modifiers::CTRL;
    }

    if cb & 32 != 0 {
        return Parsed::Skip(consumed);
    }

    let base = cb & 3;
    let kind = if cb & 64 != 0 {
        if base == 0 {
            MouseEventKind::ScrollUp
        } else {
            MouseEventKind::ScrollDown
        }
    } else if body[end] == b'm' {
        MouseEventKind::Release(decode_mouse_button(base))
    } else {
        MouseEventKind::Press(decode_mouse_button(base))
    };

    // SGR coordinates are 1-indexed.
    Parsed::Event(
        Event::Mouse(MouseEvent {
            kind,
            x: raw_x.saturating_sub(1),
            y: raw_y.saturating_sub(1),
            modifiers,
        }),
        consumed,
    )
}

fn parse_utf8(buf: &[u8]) -> Parsed {
    let expected = match buf[0] {
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF7 => 4,
        _ => return Parsed::Skip(1),
    };
    if buf.len() < expected {
        return Parsed::Incomplete;
    }
    std::str::from_utf8(&buf[..expected])
        .ok()
        .and_then(|s| s.chars().next())
        .map_or(Parsed::Skip(1), |ch| {
            Parsed::Event(key(KeyCode::Char(ch)), expected)
        })
}

// ─── Helpers ────────────────────────────────────────────────────────────────

const fn key(code: KeyCode) -> Event {
    Event::Key(KeyEvent::plain(code))
}

/// Ctrl+letter from its control byte (0x01 = Ctrl-A).
const fn ctrl(byte: u8) -> Event {
    Event::Key(KeyEvent::new(
        KeyCode::Char((byte + b'a' - 1) as char),
        Modifiers::CTRL,
    ))
}

/// Semicolon-separated decimal parameters; empty fields are 0.
fn parse_params(raw: &[u8]) -> Vec<u16> {
    if raw.is_empty() {
        return Vec::new();
    }
    raw.split(|&b| b == b';')
        .map(|field| {
            field
                .iter()
                .take_while(|b| b.is_ascii_digit())
                .fold(0u16, |acc, &d| {
                    acc.saturating_mul(10).saturating_add(u16::from(d - b'0'))
                })
        })
        .collect()
}

/// xterm modifier parameter: `1 + bitmask`.
#[allow(clippy::cast_possible_truncation)]
const fn decode_modifiers(param: u16) -> Modifiers {
    Modifiers::from_bits_truncate(param.saturating_sub(1) as u8)
}

const fn decode_mouse_button(base: u16) -> MouseButton {
    match base {
        0 => MouseButton::Left,
        1 => MouseButton::Middle,
        _ => MouseButton::Right,
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(bytes: &[u8]) -> Vec<Event> {
        Parser::new().advance(bytes)
    }

    fn press_at(x: u16, y: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Press(MouseButton::Left),
            x,
            y,
            modifiers: Modifiers::empty(),
        })
    }

    // ── Keys ────────────────────────────────────────────────────────────

    #[test]
    fn printable_ascii() {
        assert_eq!(
            parse(b"wS"),
            vec![key(KeyCode::Char('w')), key(KeyCode::Char('S'))]
        );
    }

    #[test]
    fn control_characters() {
        assert_eq!(
            parse(&[0x03]),
            vec![Event::Key(KeyEvent::new(KeyCode::Char('c'), Modifiers::CTRL))]
        );
        // Enter and Tab are plain control bytes here; the game binds neither.
        assert_eq!(
            parse(b"\r\t"),
            vec![
                Event::Key(KeyEvent::new(KeyCode::Char('m'), Modifiers::CTRL)),
                Event::Key(KeyEvent::new(KeyCode::Char('i'), Modifiers::CTRL)),
            ]
        );
        assert_eq!(parse(&[0x7F, b'x']), vec![key(KeyCode::Char('x'))]);
    }

    #[test]
    fn ctrl_c_helper() {
        let Event::Key(k) = parse(&[0x03])[0] else {
            panic!("expected key");
        };
        assert!(k.is_ctrl('c'));
        assert!(!KeyEvent::plain(KeyCode::Char('c')).is_ctrl('c'));
    }

    #[test]
    fn csi_arrows() {
        assert_eq!(
            parse(b"\x1b[A\x1b[B\x1b[C\x1b[D"),
            vec![
                key(KeyCode::Up),
                key(KeyCode::Down),
                key(KeyCode::Right),
                key(KeyCode::Left),
            ]
        );
    }

    #[test]
    fn ss3_arrows() {
        assert_eq!(parse(b"\x1bOA\x1bOD"), vec![key(KeyCode::Up), key(KeyCode::Left)]);
    }

    #[test]
    fn arrow_with_modifiers() {
        assert_eq!(
            parse(b"\x1b[1;5C"),
            vec![Event::Key(KeyEvent::new(KeyCode::Right, Modifiers::CTRL))]
        );
    }

    #[test]
    fn navigation_keys_are_skipped() {
        assert_eq!(parse(b"\x1b[H\x1b[1~\x1bOFn"), vec![key(KeyCode::Char('n'))]);
    }

    #[test]
    fn unknown_csi_is_skipped() {
        assert_eq!(parse(b"\x1b[15~x"), vec![key(KeyCode::Char('x'))]);
    }

    #[test]
    fn alt_letter() {
        assert_eq!(
            parse(b"\x1bq"),
            vec![Event::Key(KeyEvent::new(KeyCode::Char('q'), Modifiers::ALT))]
        );
    }

    #[test]
    fn utf8_character() {
        assert_eq!(parse("é".as_bytes()), vec![key(KeyCode::Char('é'))]);
    }

    // ── Mouse ───────────────────────────────────────────────────────────

    #[test]
    fn sgr_press_is_zero_indexed() {
        assert_eq!(parse(b"\x1b[<0;10;5M"), vec![press_at(9, 4)]);
    }

    #[test]
    fn sgr_release() {
        assert_eq!(
            parse(b"\x1b[<0;1;1m"),
            vec![Event::Mouse(MouseEvent {
                kind: MouseEventKind::Release(MouseButton::Left),
                x: 0,
                y: 0,
                modifiers: Modifiers::empty(),
            })]
        );
    }

    #[test]
    fn sgr_right_button_with_ctrl() {
        assert_eq!(
            parse(b"\x1b[<18;3;4M"),
            vec![Event::Mouse(MouseEvent {
                kind: MouseEventKind::Press(MouseButton::Right),
                x: 2,
                y: 3,
                modifiers: Modifiers::CTRL,
            })]
        );
    }

    #[test]
    fn sgr_scroll_and_motion() {
        let events = parse(b"\x1b[<64;1;1M\x1b[<32;2;2M\x1b[<65;1;1M");
        let kinds: Vec<_> = events
            .iter()
            .map(|e| match e {
                Event::Mouse(m) => m.kind,
                Event::Key(_) => panic!("expected mouse"),
            })
            .collect();
        assert_eq!(
            kinds,
            vec![
                MouseEventKind::ScrollUp,
                MouseEventKind::ScrollDown,
            ]
        );
    }

    #[test]
    fn sgr_large_coordinates() {
        assert_eq!(parse(b"\x1b[<0;751;50M"), vec![press_at(750, 49)]);
    }

    // ── Buffering ───────────────────────────────────────────────────────

    #[test]
    fn split_mouse_sequence_resumes() {
        let mut parser = Parser::new();
        assert!(parser.advance(b"\x1b[<0;1").is_empty());
        assert!(parser.has_pending());
        assert_eq!(parser.advance(b"2;7M"), vec![press_at(11, 6)]);
        assert!(!parser.has_pending());
    }

    #[test]
    fn lone_escape_waits_then_flushes() {
        let mut parser = Parser::new();
        assert!(parser.advance(b"\x1b").is_empty());
        assert!(parser.has_pending());
        assert_eq!(parser.flush(), vec![key(KeyCode::Escape)]);
        assert!(!parser.has_pending());
    }

    #[test]
    fn split_utf8_resumes() {
        let mut parser = Parser::new();
        let bytes = "中".as_bytes();
        assert!(parser.advance(&bytes[..1]).is_empty());
        assert_eq!(parser.advance(&bytes[1..]), vec![key(KeyCode::Char('中'))]);
    }

    #[test]
    fn parse_params_handles_empty_fields() {
        assert_eq!(parse_params(b"1;;3"), vec![1, 0, 3]);
        assert!(parse_params(b"").is_empty());
    }
}
