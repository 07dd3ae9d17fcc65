// SPDX-License-Identifier: MIT
//
// LifeApp — the simulation wired into the terminal event loop.
//
// Layout:
//
//   ┌──────────────────────────────┐
//   │ field window, 3 cols / cell  │  ← rows - 1
//   ├──────────────────────────────┤
//   │ status line (INVERSE)        │  ← 1 row
//   └──────────────────────────────┘
//
// Keys go through the keymap. A left click toggles the cell under it and
// the wheel scrolls the view. Each frame tick advances the simulation if it
// is running.

use life_core::{Action as SimAction, Command, Direction, Simulation, Tint};
use life_term::buffer::FrameBuffer;
use life_term::cell::Attr;
use life_term::color::CellColor;
use life_term::event_loop::{Action, App};
use life_term::input::{Event, MouseButton, MouseEvent, MouseEventKind};
use life_term::terminal::Size;

use crate::keymap;

/// Terminal columns per field cell. Roughly square on most fonts.
pub const CELL_COLS: u16 = 3;

const DEAD: CellColor = CellColor::BLACK;

/// The field window a terminal of `size` has room for, in cells.
pub const fn view_dims(size: Size) -> (usize, usize) {
    (
        size.rows.saturating_sub(1) as usize,
        (size.cols / CELL_COLS) as usize,
    )
}

pub const fn tint_color(tint: Tint) -> CellColor {
    match tint {
        Tint::Green => CellColor::GREEN,
        Tint::Blue => CellColor::BLUE,
        Tint::Red => CellColor::RED,
        Tint::White => CellColor::WHITE,
    }
}

pub struct LifeApp {
    sim: Simulation,
    size: Size,
    /// Last status message from a command.
    message: Option<String>,
}

impl LifeApp {
    /// Wrap `sim`, whose viewport is resized to fit `size`.
    pub fn new(mut sim: Simulation, size: Size) -> Self {
        let (view_h, view_w) = view_dims(size);
        sim.resize_view(view_h, view_w);
        Self {
            sim,
            size,
            message: None,
        }
    }

    pub const fn simulation(&self) -> &Simulation {
        &self.sim
    }

    fn apply(&mut self, command: Command) -> Action {
        let outcome = self.sim.apply(command);
        if let Some(message) = outcome.message {
            log::info!("{message}");
            self.message = Some(message);
        }
        match outcome.action {
            SimAction::Continue => Action::Continue,
            SimAction::Quit => Action::Quit,
        }
    }

    /// A left press inside the field window toggles a cell; the wheel
    /// scrolls the view vertically.
    fn mouse_command(&self, mouse: &MouseEvent) -> Option<Command> {
        match mouse.kind {
            MouseEventKind::Press(MouseButton::Left) => {}
            MouseEventKind::ScrollUp => return Some(Command::Move(Direction::Up)),
            MouseEventKind::ScrollDown => return Some(Command::Move(Direction::Down)),
            _ => return None,
        }
        if mouse.y >= self.size.rows.saturating_sub(1) {
            return None;
        }
        Some(Command::Pointer {
            y: usize::from(mouse.y),
            x: usize::from(mouse.x / CELL_COLS),
            pressed: true,
        })
    }

    fn status_line(&self) -> String {
        let field = self.sim.field();
        let (off_y, off_x) = self.sim.viewport().offset();
        let state = if field.is_active() { "RUNNING" } else { "PAUSED" };
        let mut line = format!(
            " {state}  gen {}  pop {}  {}×{}  at {off_y},{off_x}",
            self.sim.generation(),
            field.population(),
            field.height(),
            field.width(),
        );
        if let Some(message) = &self.message {
            line.push_str("  ");
            line.push_str(message);
        }
        line
    }

    fn paint_field(&self, buf: &mut FrameBuffer) {
        let field = self.sim.field();
        let (off_y, off_x) = self.sim.viewport().offset();
        let alive = tint_color(self.sim.tint());

        // Only the part of the window the field covers is painted black.
        let rows = field.height().saturating_sub(off_y);
        let cols = field.width().saturating_sub(off_x);
        let width = u16::try_from(cols).map_or(u16::MAX, |c| c.saturating_mul(CELL_COLS));
        let height = u16::try_from(rows).unwrap_or(u16::MAX);
        buf.fill_rect(0, 0, width, height.min(buf.height().saturating_sub(1)), DEAD);

        for (y, row) in (0u16..).zip(self.sim.visible_cells()) {
            for (x, is_alive) in (0u16..).zip(row) {
                if is_alive {
                    buf.fill_rect(x.saturating_mul(CELL_COLS), y, CELL_COLS, 1, alive);
                }
            }
        }
    }
}

impl App for LifeApp {
    fn on_event(&mut self, event: &Event) -> Action {
        let command = match event {
            Event::Key(key) => keymap::command_for(key),
            Event::Mouse(mouse) => self.mouse_command(mouse),
        };
        command.map_or(Action::Continue, |c| self.apply(c))
    }

    fn on_resize(&mut self, size: Size) {
        self.size = size;
        let (view_h, view_w) = view_dims(size);
        self.sim.resize_view(view_h, view_w);
    }

    fn on_tick(&mut self) -> bool {
        self.sim.tick().is_some()
    }

    fn paint(&mut self, buf: &mut FrameBuffer) {
        if buf.height() == 0 {
            return;
        }
        self.paint_field(buf);

        let status_y = buf.height() - 1;
        let status = self.status_line();
        let used = buf.paint_text(
            0,
            status_y,
            &status,
            CellColor::Default,
            CellColor::Default,
            Attr::INVERSE,
        );
        let pad = " ".repeat(usize::from(buf.width().saturating_sub(used)));
        buf.paint_text(
            used,
            status_y,
            &pad,
            CellColor::Default,
            CellColor::Default,
            Attr::INVERSE,
        );
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use life_core::{Config, Field};
    use life_term::input::{KeyCode, KeyEvent, Modifiers};
    use pretty_assertions::assert_eq;

    fn app(rows: &[&str], size: Size) -> LifeApp {
        let field = Field::from_pattern(rows).unwrap();
        let sim = Simulation::from_field(field, &Config::default(), 1, 1);
        LifeApp::new(sim, size)
    }

    fn key(c: char) -> Event {
        Event::Key(KeyEvent::plain(KeyCode::Char(c)))
    }

    fn click(x: u16, y: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Press(MouseButton::Left),
            x,
            y,
            modifiers: Modifiers::empty(),
        })
    }

    fn bg_at(buf: &FrameBuffer, x: u16, y: u16) -> CellColor {
        buf.get(x, y).unwrap().bg
    }

    #[test]
    fn view_leaves_room_for_status_line() {
        assert_eq!(view_dims(Size { cols: 80, rows: 24 }), (23, 26));
        assert_eq!(view_dims(Size { cols: 2, rows: 0 }), (0, 0));
    }

    #[test]
    fn new_fits_viewport_to_terminal() {
        let a = app(&["....", "...."], Size { cols: 30, rows: 11 });
        assert_eq!(a.simulation().viewport().height(), 10);
        assert_eq!(a.simulation().viewport().width(), 10);
    }

    #[test]
    fn cells_are_three_columns_wide() {
        let mut a = app(&["#.", ".#"], Size { cols: 6, rows: 3 });
        let mut buf = FrameBuffer::new(6, 3);
        a.paint(&mut buf);

        for x in 0..3 {
            assert_eq!(bg_at(&buf, x, 0), CellColor::WHITE);
            assert_eq!(bg_at(&buf, x, 1), DEAD);
        }
        for x in 3..6 {
            assert_eq!(bg_at(&buf, x, 0), DEAD);
            assert_eq!(bg_at(&buf, x, 1), CellColor::WHITE);
        }
    }

    #[test]
    fn tint_key_changes_alive_color() {
        let mut a = app(&["#"], Size { cols: 3, rows: 2 });
        a.on_event(&key('g'));
        let mut buf = FrameBuffer::new(3, 2);
        a.paint(&mut buf);
        assert_eq!(bg_at(&buf, 1, 0), CellColor::GREEN);
    }

    #[test]
    fn window_beyond_field_is_not_painted() {
        let mut a = app(&["#"], Size { cols: 9, rows: 3 });
        let mut buf = FrameBuffer::new(9, 3);
        a.paint(&mut buf);
        assert_eq!(bg_at(&buf, 3, 0), CellColor::Default);
        assert_eq!(bg_at(&buf, 0, 1), CellColor::Default);
    }

    #[test]
    fn status_line_reports_state() {
        let mut a = app(&["##", "##"], Size { cols: 60, rows: 3 });
        let mut buf = FrameBuffer::new(60, 3);
        a.paint(&mut buf);

        let text: String = buf
            .row(2)
            .unwrap()
            .iter()
            .filter_map(|c| c.character())
            .collect();
        assert!(text.starts_with(" RUNNING  gen 0  pop 4  2×2  at 0,0"), "{text:?}");
        assert!(buf.row(2).unwrap().iter().all(|c| c.attrs == Attr::INVERSE));

        a.on_event(&key('p'));
        assert!(a.status_line().starts_with(" PAUSED"));
    }

    #[test]
    fn command_message_shows_in_status() {
        let mut a = app(&["##", "##"], Size { cols: 60, rows: 3 });
        a.on_event(&key('c'));
        assert!(a.status_line().ends_with("  cleared"));
        assert_eq!(a.simulation().field().population(), 0);
    }

    #[test]
    fn click_maps_column_to_cell() {
        let mut a = app(&["...", "...", "..."], Size { cols: 9, rows: 4 });
        a.on_event(&click(7, 1));
        assert!(a.simulation().field().get(1, 2).unwrap());
        assert_eq!(a.simulation().field().population(), 1);

        a.on_event(&click(6, 1));
        assert_eq!(a.simulation().field().population(), 0);
    }

    #[test]
    fn click_on_status_row_is_ignored() {
        let mut a = app(&["...", "...", "...", "..."], Size { cols: 9, rows: 4 });
        a.on_event(&click(0, 3));
        assert_eq!(a.simulation().field().population(), 0);
    }

    #[test]
    fn release_and_right_click_are_ignored() {
        let mut a = app(&["..."], Size { cols: 9, rows: 2 });
        for kind in [
            MouseEventKind::Release(MouseButton::Left),
            MouseEventKind::Press(MouseButton::Right),
        ] {
            a.on_event(&Event::Mouse(MouseEvent {
                kind,
                x: 0,
                y: 0,
                modifiers: Modifiers::empty(),
            }));
        }
        assert_eq!(a.simulation().field().population(), 0);
    }

    #[test]
    fn tick_advances_only_while_running() {
        let mut a = app(&["...", "###", "..."], Size { cols: 9, rows: 4 });
        assert!(a.on_tick());
        assert_eq!(a.simulation().generation(), 1);

        a.on_event(&key(' '));
        assert!(!a.on_tick());
        assert_eq!(a.simulation().generation(), 1);
    }

    #[test]
    fn quit_keys() {
        let mut a = app(&["."], Size { cols: 3, rows: 2 });
        assert_eq!(a.on_event(&key('x')), Action::Continue);
        assert_eq!(a.on_event(&key('q')), Action::Quit);
        let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), Modifiers::CTRL));
        assert_eq!(a.on_event(&ctrl_c), Action::Quit);
    }

    #[test]
    fn wheel_scrolls_view() {
        let rows = vec!["..."; 6];
        let mut a = app(&rows, Size { cols: 9, rows: 3 });
        let wheel = |kind| {
            Event::Mouse(MouseEvent {
                kind,
                x: 4,
                y: 0,
                modifiers: Modifiers::empty(),
            })
        };
        a.on_event(&wheel(MouseEventKind::ScrollDown));
        a.on_event(&wheel(MouseEventKind::ScrollDown));
        assert_eq!(a.simulation().viewport().offset(), (2, 0));
        a.on_event(&wheel(MouseEventKind::ScrollUp));
        assert_eq!(a.simulation().viewport().offset(), (1, 0));
        assert_eq!(a.simulation().field().population(), 0);
    }

    #[test]
    fn resize_reclamps_viewport() {
        let rows = vec!["......"; 6];
        let mut a = app(&rows, Size { cols: 6, rows: 3 });
        for _ in 0..5 {
            a.on_event(&key('s'));
            a.on_event(&key('d'));
        }
        assert_eq!(a.simulation().viewport().offset(), (4, 4));

        a.on_resize(Size { cols: 12, rows: 5 });
        assert_eq!(a.simulation().viewport().offset(), (2, 2));
    }
}
