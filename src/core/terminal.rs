//! Terminal session and event loop for explorer.
//!
//! Handles raw mode setup/teardown, waiting for input and signals, and dispatches
//! decoded keys to the app logic. Frames go to stderr so stdout stays free for the
//! selected path.
//!
//! Stdin and the signal pipe are registered with one [mio::Poll], so every wait for
//! a byte, including the ones in the middle of an escape sequence, also wakes for a
//! signal. A pending signal cuts the current key short and the loop handles it
//! before reading on.

use crate::app::{AppState, ByteSource, KeypressResult, LayoutMetrics, Redraw, read_key};
use crate::config::Editor;
use crate::core::signals::{self, PendingSignals};
use crate::error::Result;
use crate::ui;
use crate::utils::open_in_editor;

use crossterm::{
    cursor::{MoveTo, Show},
    queue,
    terminal::{self, Clear, ClearType, disable_raw_mode, enable_raw_mode},
};
use mio::{Events, Interest, Poll, Token, unix::SourceFd};
use signal_hook::consts::SIGINT;
use signal_hook_mio::v1_0::Signals;

use std::collections::VecDeque;
use std::ffi::OsStr;
use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::os::fd::{AsFd, AsRawFd};
use std::path::{Path, PathBuf};

const STDIN: Token = Token(0);
const SIGNALS: Token = Token(1);

/// Bytes taken from the terminal per readiness event.
const READ_CHUNK: usize = 256;

/// How a session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Quit,
    Selected(PathBuf),
    /// A deadly signal (or Ctrl-C) ended the session.
    Terminated(i32),
}

/// What the event loop needs from the terminal besides drawing.
pub trait TerminalIo: ByteSource {
    /// Signals received and not handled yet.
    fn pending(&mut self) -> &mut PendingSignals;

    /// No byte will ever arrive again.
    fn at_eof(&self) -> bool;

    fn window_metrics(&self) -> LayoutMetrics;

    /// Re-enters raw mode after the process was continued from outside.
    fn resume(&mut self) -> io::Result<()>;

    /// Leaves raw mode, stops the process and re-enters raw mode once continued.
    fn suspend(&mut self) -> io::Result<()>;

    fn open_editor(&mut self, editor: &Editor, dir: &Path, name: &OsStr) -> io::Result<()>;
}

/// Raw mode for as long as it lives; dropping restores the terminal on every exit path.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        Ok(TerminalGuard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut err = io::stderr();
        let _ = queue!(err, Clear(ClearType::All), MoveTo(0, 0), Show);
        let _ = err.flush();
        let _ = disable_raw_mode();
    }
}

/// The controlling terminal: unbuffered input plus the signal pipe.
pub struct Tty {
    input: File,
    poll: Poll,
    events: Events,
    signals: Signals,
    pending: PendingSignals,
    buffered: VecDeque<u8>,
    eof: bool,
}

impl Tty {
    /// Watches `input` together with the session signals.
    pub fn new(input: File) -> io::Result<Self> {
        let poll = Poll::new()?;
        let mut signals = signals::register()?;
        poll.registry()
            .register(&mut signals, SIGNALS, Interest::READABLE)?;
        poll.registry().register(
            &mut SourceFd(&input.as_raw_fd()),
            STDIN,
            Interest::READABLE,
        )?;

        Ok(Self {
            input,
            poll,
            events: Events::with_capacity(8),
            signals,
            pending: PendingSignals::default(),
            buffered: VecDeque::new(),
            eof: false,
        })
    }

    /// A terminal reading from a duplicate of fd 0.
    pub fn stdin() -> io::Result<Self> {
        let fd = io::stdin().as_fd().try_clone_to_owned()?;
        Self::new(File::from(fd))
    }

    fn drain_signals(&mut self) {
        for sig in self.signals.pending() {
            self.pending.record(sig);
        }
    }

    /// Blocks until stdin is readable or a signal arrived, then collects both.
    fn wait(&mut self) -> io::Result<()> {
        // Re-arm: bytes still queued in the kernel must wake the poll again.
        self.poll.registry().reregister(
            &mut SourceFd(&self.input.as_raw_fd()),
            STDIN,
            Interest::READABLE,
        )?;

        match self.poll.poll(&mut self.events, None) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::Interrupted => return Ok(()),
            Err(e) => return Err(e),
        }

        let mut signalled = false;
        let mut readable = false;
        for event in self.events.iter() {
            match event.token() {
                SIGNALS => signalled = true,
                STDIN => readable = true,
                _ => {}
            }
        }

        if signalled {
            self.drain_signals();
        }
        if readable {
            self.fill()?;
        }
        Ok(())
    }

    fn fill(&mut self) -> io::Result<()> {
        let mut chunk = [0u8; READ_CHUNK];
        match self.input.read(&mut chunk) {
            Ok(0) => self.eof = true,
            Ok(n) => self.buffered.extend(&chunk[..n]),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
        Ok(())
    }
}

impl ByteSource for Tty {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        loop {
            if let Some(b) = self.buffered.pop_front() {
                return Ok(Some(b));
            }
            if self.eof || !self.pending.is_empty() {
                return Ok(None);
            }
            self.wait()?;
        }
    }
}

impl TerminalIo for Tty {
    fn pending(&mut self) -> &mut PendingSignals {
        &mut self.pending
    }

    fn at_eof(&self) -> bool {
        self.eof && self.buffered.is_empty()
    }

    fn window_metrics(&self) -> LayoutMetrics {
        window_metrics()
    }

    fn resume(&mut self) -> io::Result<()> {
        enable_raw_mode()
    }

    fn suspend(&mut self) -> io::Result<()> {
        disable_raw_mode()?;
        signals::stop_self()?;
        enable_raw_mode()?;
        // The SIGCONT that woke us is already handled here.
        self.drain_signals();
        self.pending.take_resume();
        Ok(())
    }

    fn open_editor(&mut self, editor: &Editor, dir: &Path, name: &OsStr) -> io::Result<()> {
        open_in_editor(editor, dir, name)
    }
}

/// Current window size, falling back to 80x24.
pub fn window_metrics() -> LayoutMetrics {
    match terminal::size() {
        Ok((cols, rows)) => LayoutMetrics::new(cols, rows),
        Err(e) => {
            tracing::debug!("window size unavailable: {e}");
            LayoutMetrics::default()
        }
    }
}

/// Runs the interactive session until quit, selection or a terminating signal.
pub fn run_terminal(app: &mut AppState) -> Result<Outcome> {
    let mut tty = Tty::stdin()?;
    let _guard = TerminalGuard::enter()?;
    let mut out = BufWriter::new(io::stderr());

    app.resize(tty.window_metrics());
    ui::redraw(&mut out, app, Redraw::Full)?;

    let outcome = event_loop(&mut out, &mut tty, app)?;
    tracing::info!("session ended: {outcome:?}");
    Ok(outcome)
}

fn event_loop<W: Write, T: TerminalIo>(
    out: &mut W,
    term: &mut T,
    app: &mut AppState,
) -> Result<Outcome> {
    loop {
        let pending = term.pending();
        if let Some(sig) = pending.terminate_signal() {
            return Ok(Outcome::Terminated(sig));
        }
        let suspend = pending.take_suspend();
        let resume = pending.take_resume();
        let resize = pending.take_resize();

        if term.at_eof() {
            return Ok(Outcome::Quit);
        }
        if suspend {
            suspend_session(out, term, app)?;
        }
        if resume {
            term.resume()?;
        }
        if resume || resize {
            app.resize(term.window_metrics());
            ui::redraw(out, app, Redraw::Full)?;
        }

        // `None` here means a signal or the end of input; both are handled above.
        let result = if app.is_confirming() {
            match term.read_byte()? {
                Some(b) => app.handle_confirm_byte(b)?,
                None => continue,
            }
        } else {
            match read_key(term)? {
                Some(key) => app.handle_key(key)?,
                None => continue,
            }
        };

        match result {
            KeypressResult::Continue(redraw) => ui::redraw(out, app, redraw)?,
            KeypressResult::Quit => return Ok(Outcome::Quit),
            KeypressResult::Selected(path) => return Ok(Outcome::Selected(path)),
            KeypressResult::Interrupted => return Ok(Outcome::Terminated(SIGINT)),
            KeypressResult::Suspend => suspend_session(out, term, app)?,
            KeypressResult::OpenEditor(name) => {
                if let Some(editor) = app.config().editor()
                    && let Err(e) = term.open_editor(editor, app.current_dir(), &name)
                {
                    tracing::warn!("cannot run editor {:?}: {e}", editor.cmd());
                }
                ui::redraw(out, app, Redraw::Full)?;
            }
        }
    }
}

/// Hands the terminal back, stops the process and repaints once continued.
fn suspend_session<W: Write, T: TerminalIo>(
    out: &mut W,
    term: &mut T,
    app: &mut AppState,
) -> Result<()> {
    ui::clear_screen(out)?;
    queue!(out, Show)?;
    out.flush()?;

    term.suspend()?;

    app.resize(term.window_metrics());
    ui::redraw(out, app, Redraw::Full)?;
    Ok(())
}
