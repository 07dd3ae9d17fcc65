// SPDX-License-Identifier: MIT
#![allow(unsafe_code)]
//
// Event loop: input and the frame clock on one thread.
//
// Stdin bytes arrive from the background reader and are parsed into
// events for the app. Independently of input, a frame clock fires
// `App::on_tick` once per frame period; that is the simulation's
// generation clock. After each wakeup the app repaints, but only if
// something changed, and the diff renderer sends only the changed cells.
//
// # Waiting
//
// The loop blocks in `recv_timeout` until either bytes arrive or the next
// frame is due, so an idle paused screen costs no CPU and a keypress is
// handled immediately rather than at the next frame boundary.
//
// # Escape timeout
//
// A lone ESC may be the start of an escape sequence. While the parser
// holds one, the wait is capped at `ESC_TIMEOUT`; if nothing follows, the
// pending bytes are flushed as literal keys.
//
// # SIGWINCH
//
// The signal handler only sets an `AtomicBool`. The loop checks it on every
// wakeup, resizes the frame, forces a full redraw and tells the app.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use crate::buffer::FrameBuffer;
use crate::diff::DiffRenderer;
use crate::input::{Event, Parser};
use crate::reader::StdinReader;
use crate::terminal::{Size, Terminal};

/// How long a lone ESC may wait for the rest of its sequence.
const ESC_TIMEOUT: Duration = Duration::from_millis(10);

// ─── SIGWINCH ────────────────────────────────────────────────────────────────

static SIGWINCH_RECEIVED: AtomicBool = AtomicBool::new(false);

#[cfg(unix)]
fn install_sigwinch_handler() {
    unsafe {
        let mut sa: libc::sigaction = std::mem::zeroed();
        sa.sa_sigaction = sigwinch_handler as *const () as usize;
        sa.sa_flags = libc::SA_RESTART;
        libc::sigemptyset(&raw mut sa.sa_mask);
        libc::sigaction(libc::SIGWINCH, &raw const sa, std::ptr::null_mut());
    }
}

#[cfg(unix)]
extern "C" fn sigwinch_handler(_sig: libc::c_int) {
    SIGWINCH_RECEIVED.store(true, Ordering::Relaxed);
}

#[cfg(not(unix))]
const fn install_sigwinch_handler() {}

// ─── App Trait ───────────────────────────────────────────────────────────────

/// What the loop does after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Continue,
    Quit,
}

/// A terminal application driven by [`EventLoop`].
///
/// Per wakeup the loop calls, in order: [`on_event`](App::on_event) for
/// each parsed event, [`on_resize`](App::on_resize) if the terminal
/// changed size, [`on_tick`](App::on_tick) if a frame period elapsed, and
/// [`paint`](App::paint) if any of those reported a change.
pub trait App {
    /// Handle one input event. Return [`Action::Quit`] to stop the loop.
    fn on_event(&mut self, _event: &Event) -> Action {
        Action::Continue
    }

    /// The terminal was resized. The frame buffer already has the new size.
    fn on_resize(&mut self, _size: Size) {}

    /// One frame period elapsed. Return `true` if a repaint is needed.
    fn on_tick(&mut self) -> bool {
        false
    }

    /// Paint the whole frame. The buffer is cleared before each call.
    fn paint(&mut self, buf: &mut FrameBuffer);
}

// ─── Frame Clock ─────────────────────────────────────────────────────────────

/// Loop timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopConfig {
    /// Time between [`App::on_tick`] calls.
    pub frame_interval: Duration,
}

impl LoopConfig {
    /// `fps` frames per second; 0 is treated as 1.
    #[must_use]
    pub fn from_fps(fps: u32) -> Self {
        Self {
            frame_interval: Duration::from_secs(1) / fps.max(1),
        }
    }
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self::from_fps(20)
    }
}

/// Fixed-rate deadline tracker. Fires at most once per poll; when the loop
/// falls more than a period behind, missed frames are dropped rather than
/// replayed in a burst.
#[derive(Debug, Clone, Copy)]
struct FrameClock {
    interval: Duration,
    next: Instant,
}

impl FrameClock {
    fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            next: now + interval,
        }
    }

    /// Time left until the next frame is due.
    fn until_next(&self, now: Instant) -> Duration {
        self.next.saturating_duration_since(now)
    }

    /// Whether a frame is due at `now`; advances the deadline if so.
    fn poll(&mut self, now: Instant) -> bool {
        if now < self.next {
            return false;
        }
        self.next += self.interval;
        if self.next <= now {
            self.next = now + self.interval;
        }
        true
    }
}

// ─── EventLoop ───────────────────────────────────────────────────────────────

/// Owns the terminal, parser and renderer. [`run`](Self::run) returns when
/// the app quits or stdin closes.
///
/// ```no_run
/// use life_term::buffer::FrameBuffer;
/// use life_term::event_loop::{Action, App, EventLoop, LoopConfig};
/// use life_term::input::{Event, KeyCode, KeyEvent};
///
/// struct Counter(u64);
///
/// impl App for Counter {
///     fn on_event(&mut self, event: &Event) -> Action {
///         match event {
///             Event::Key(KeyEvent { code: KeyCode::Char('q'), .. }) => Action::Quit,
///             _ => Action::Continue,
///         }
///     }
///
///     fn on_tick(&mut self) -> bool {
///         self.0 += 1;
///         true
///     }
///
///     fn paint(&mut self, _buf: &mut FrameBuffer) {}
/// }
///
/// EventLoop::with_config(LoopConfig::from_fps(30)).run(&mut Counter(0))?;
/// # Ok::<(), std::io::Error>(())
/// ```
pub struct EventLoop {
    terminal: Terminal,
    parser: Parser,
    renderer: DiffRenderer,
    config: LoopConfig,
}

impl EventLoop {
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(LoopConfig::default())
    }

    #[must_use]
    pub fn with_config(config: LoopConfig) -> Self {
        Self {
            terminal: Terminal::new(),
            parser: Parser::new(),
            renderer: DiffRenderer::new(),
            config,
        }
    }

    #[inline]
    #[must_use]
    pub const fn size(&self) -> Size {
        self.terminal.size()
    }

    /// Enter the terminal, run until quit, and restore the terminal even if
    /// the loop failed.
    ///
    /// # Errors
    ///
    /// Returns an error if entering, rendering to, or leaving the terminal
    /// fails.
    pub fn run(&mut self, app: &mut impl App) -> io::Result<()> {
        self.terminal.enter()?;
        install_sigwinch_handler();

        let result = StdinReader::spawn().and_then(|(mut reader, rx)| {
            let result = self.run_inner(app, &rx);
            reader.stop();
            result
        });

        self.terminal.leave()?;
        result
    }

    fn run_inner(&mut self, app: &mut impl App, rx: &Receiver<Vec<u8>>) -> io::Result<()> {
        let size = self.terminal.size();
        let mut frame = FrameBuffer::new(size.cols, size.rows);
        let mut clock = FrameClock::new(self.config.frame_interval, Instant::now());
        let mut pending_since: Option<Instant> = None;
        let mut dirty = true;

        loop {
            let now = Instant::now();
            let mut wait = clock.until_next(now);
            if let Some(since) = pending_since {
                wait = wait.min((since + ESC_TIMEOUT).saturating_duration_since(now));
            }

            let events = match rx.recv_timeout(wait) {
                Ok(bytes) => self.parser.advance(&bytes),
                Err(RecvTimeoutError::Timeout) => {
                    let expired = pending_since.is_some_and(|t| t.elapsed() >= ESC_TIMEOUT);
                    if expired { self.parser.flush() } else { Vec::new() }
                }
                Err(RecvTimeoutError::Disconnected) => {
                    log::info!("stdin closed, leaving event loop");
                    return Ok(());
                }
            };
            pending_since = match (self.parser.has_pending(), pending_since) {
                (false, _) => None,
                (true, Some(since)) => Some(since),
                (true, None) => Some(Instant::now()),
            };

            for event in &events {
                if app.on_event(event) == Action::Quit {
                    return Ok(());
                }
            }
            dirty |= !events.is_empty();

            if SIGWINCH_RECEIVED.swap(false, Ordering::Relaxed) {
                let new_size = self.terminal.refresh_size();
                log::debug!("resized to {}×{}", new_size.cols, new_size.rows);
                frame.resize(new_size.cols, new_size.rows);
                self.renderer.force_redraw();
                app.on_resize(new_size);
                dirty = true;
            }

            if clock.poll(Instant::now()) {
                dirty |= app.on_tick();
            }

            if dirty {
                frame.clear();
                app.paint(&mut frame);
                let stats = self.renderer.render(&frame);
                self.renderer.flush()?;
                log::trace!(
                    "frame: {} cells drawn, {} rows skipped, {} bytes",
                    stats.cells_rendered,
                    stats.rows_skipped,
                    stats.bytes_written
                );
                dirty = false;
            }
        }
    }
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
