//! Signal handling for the explorer event loop.
//!
//! Signals arrive through a `signal-hook-mio` self-pipe that is polled next to stdin,
//! so a signal always wakes a blocked read. The loop folds what it drains into
//! [PendingSignals] and performs every side effect itself.

use signal_hook::consts::{SIGCONT, SIGHUP, SIGINT, SIGTERM, SIGTSTP, SIGWINCH};
use signal_hook_mio::v1_0::Signals;

use std::io;

/// Signals that end the session with status `128 + signal`.
pub const TERMINATING: [i32; 3] = [SIGINT, SIGTERM, SIGHUP];

/// Every signal the session listens for.
pub const HANDLED: [i32; 6] = [SIGWINCH, SIGTSTP, SIGCONT, SIGINT, SIGTERM, SIGHUP];

/// Installs the handlers and returns the pollable signal source.
pub fn register() -> io::Result<Signals> {
    Signals::new(HANDLED)
}

/// Signals received but not yet acted on.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PendingSignals {
    resize: bool,
    suspend: bool,
    resume: bool,
    terminate: Option<i32>,
}

impl PendingSignals {
    /// Notes one delivered signal. The first terminating signal is kept.
    pub fn record(&mut self, sig: i32) {
        match sig {
            SIGWINCH => self.resize = true,
            SIGTSTP => self.suspend = true,
            SIGCONT => self.resume = true,
            sig if TERMINATING.contains(&sig) => {
                self.terminate.get_or_insert(sig);
            }
            _ => {}
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn take_resize(&mut self) -> bool {
        std::mem::take(&mut self.resize)
    }

    pub fn take_suspend(&mut self) -> bool {
        std::mem::take(&mut self.suspend)
    }

    pub fn take_resume(&mut self) -> bool {
        std::mem::take(&mut self.resume)
    }

    #[inline]
    pub fn terminate_signal(&self) -> Option<i32> {
        self.terminate
    }
}

/// Stops the process the way an unhandled `SIGTSTP` would. Returns after `SIGCONT`.
pub fn stop_self() -> io::Result<()> {
    signal_hook::low_level::emulate_default_handler(SIGTSTP)
}
