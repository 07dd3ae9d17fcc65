// SPDX-License-Identifier: MIT
//
// Key bindings.
//
//   w a s d / arrows   scroll the view        p / space   pause or resume
//   R                  randomize              c           clear
//   n                  step once              S / L       save / load
//   g b r W            tint green, blue, red, white
//   q / Ctrl-C         quit
//
// Letters are case-sensitive: `R`, `S`, `L` and `W` need Shift, so a stray
// lowercase press can't wipe or overwrite the field.

use life_core::{Command, Direction, Tint};
use life_term::input::{KeyCode, KeyEvent, Modifiers};

/// The command bound to `key`, if any.
pub fn command_for(key: &KeyEvent) -> Option<Command> {
    if key.is_ctrl('c') {
        return Some(Command::Quit);
    }
    if key.modifiers.intersects(Modifiers::CTRL | Modifiers::ALT) {
        return None;
    }

    let command = match key.code {
        KeyCode::Up | KeyCode::Char('w') => Command::Move(Direction::Up),
        KeyCode::Down | KeyCode::Char('s') => Command::Move(Direction::Down),
        KeyCode::Left | KeyCode::Char('a') => Command::Move(Direction::Left),
        KeyCode::Right | KeyCode::Char('d') => Command::Move(Direction::Right),
        KeyCode::Char('p' | ' ') => Command::TogglePause,
        KeyCode::Char('R') => Command::Randomize,
        KeyCode::Char('c') => Command::Clear,
        KeyCode::Char('n') => Command::Step,
        KeyCode::Char('S') => Command::Save,
        KeyCode::Char('L') => Command::Load,
        KeyCode::Char('g') => Command::SetTint(Tint::Green),
        KeyCode::Char('b') => Command::SetTint(Tint::Blue),
        KeyCode::Char('r') => Command::SetTint(Tint::Red),
        KeyCode::Char('W') => Command::SetTint(Tint::White),
        KeyCode::Char('q') => Command::Quit,
        _ => return None,
    };
    Some(command)
}
