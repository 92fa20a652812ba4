//! Ctrl-C handling.
//!
//! Prompts read with `ISIG` still set, so Ctrl-C arrives as SIGINT rather than
//! as an interrupted read. The handler puts the terminal back the way it was
//! found, runs a pending owner reset, prints `Exiting...` and exits 0.

use crate::core::owner::OwnerIdentity;
use anyhow::{Context, Result};
use nix::sys::termios::{tcgetattr, tcsetattr, SetArg, Termios};
use std::io::{self, Write};
use std::os::fd::AsFd;
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

/// Terminal attributes captured before the first prompt.
pub struct TerminalGuard<F: AsFd> {
    fd: F,
    saved: Option<Termios>,
}

impl<F: AsFd> TerminalGuard<F> {
    /// Snapshot the attributes of `fd`. A descriptor that is not a terminal yields an inert guard.
    pub fn capture(fd: F) -> Self {
        let saved = match tcgetattr(fd.as_fd()) {
            Ok(termios) => Some(termios),
            Err(e) => {
                debug!("not a terminal, nothing to restore: {}", e);
                None
            }
        };
        Self { fd, saved }
    }

    pub fn is_terminal(&self) -> bool {
        self.saved.is_some()
    }

    pub fn restore(&self) -> nix::Result<()> {
        match &self.saved {
            Some(termios) => tcsetattr(self.fd.as_fd(), SetArg::TCSANOW, termios),
            None => Ok(()),
        }
    }
}

/// Work that must still happen when the process is interrupted.
#[derive(Clone, Default)]
pub struct ExitHooks {
    reset: Arc<Mutex<Option<OwnerIdentity>>>,
}

impl ExitHooks {
    /// Clear `owner` if the session is interrupted before it finishes.
    pub fn arm_reset(&self, owner: OwnerIdentity) {
        if let Ok(mut slot) = self.reset.lock() {
            *slot = Some(owner);
        }
    }

    pub fn disarm_reset(&self) {
        self.take_reset();
    }

    fn take_reset(&self) -> Option<OwnerIdentity> {
        self.reset.lock().ok().and_then(|mut slot| slot.take())
    }
}

/// Body of the SIGINT handler, minus the process exit.
pub fn shutdown<F: AsFd, W: Write>(guard: &TerminalGuard<F>, hooks: &ExitHooks, out: &mut W) {
    if let Err(e) = guard.restore() {
        warn!("cannot restore terminal attributes: {}", e);
    }
    if let Some(owner) = hooks.take_reset() {
        match owner.reset() {
            Ok(()) => {
                let _ = writeln!(out, "\nOwner configuration cleared.");
            }
            Err(e) => warn!("cannot clear owner configuration: {}", e),
        }
    }
    let _ = writeln!(out, "\nExiting...");
    let _ = out.flush();
}

/// Install the SIGINT handler. Call once, before the first prompt.
pub fn install(hooks: ExitHooks) -> Result<()> {
    let guard = TerminalGuard::capture(io::stdin());
    ctrlc::set_handler(move || {
        shutdown(&guard, &hooks, &mut io::stdout());
        std::process::exit(0);
    })
    .context("install Ctrl-C handler")
}
