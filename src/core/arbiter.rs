//! Foreground/background arbitration
//!
//! One thread may claim the terminal ("foreground"). While it holds it, every
//! other thread's writes are collected in an ordered buffer that is flushed
//! when the owner hands the terminal back.
//!
//! ```text
//! Idle ──begin_background_mode()──▶ Arbitrating { owner, buffer }
//!  ▲                                     │
//!  └──────end_background_mode()──────────┘  (buffer drained, pending handed over)
//! ```
//!
//! The owner, the buffer, the line-pending flags and the sink itself share a
//! single mutex, so a buffer append can never race with the drain.

use std::io::Write;
use std::thread::{self, ThreadId};

use parking_lot::{Condvar, Mutex, MutexGuard};
use tracing::{debug, warn};

use super::pending::{ExecutionContext, LinePending};

/// Active background episode
struct Episode {
    owner: ThreadId,
    buffer: Vec<Vec<u8>>,
}

struct State {
    episode: Option<Episode>,
    pending: LinePending,
    sink: Box<dyn Write + Send>,
}

impl State {
    fn context(&self) -> ExecutionContext {
        match &self.episode {
            Some(episode) if episode.owner != thread::current().id() => {
                ExecutionContext::Background
            }
            _ => ExecutionContext::Foreground,
        }
    }

    fn write_to_sink(&mut self, bytes: &[u8]) {
        let result = self
            .sink
            .write_all(bytes)
            .and_then(|_| self.sink.flush());
        if let Err(e) = result {
            warn!("Failed to write to terminal: {}", e);
        }
    }
}

/// Single-writer coordinator for one terminal sink
pub struct Arbiter {
    state: Mutex<State>,
    /// Signalled whenever a background episode ends
    released: Condvar,
}

impl Arbiter {
    pub fn new(sink: Box<dyn Write + Send>) -> Self {
        Self {
            state: Mutex::new(State {
                episode: None,
                pending: LinePending::new(),
                sink,
            }),
            released: Condvar::new(),
        }
    }

    /// Lock the arbiter for a composite operation
    pub fn lock(&self) -> ArbiterGuard<'_> {
        ArbiterGuard {
            state: self.state.lock(),
        }
    }

    /// Make the calling thread the foreground owner.
    ///
    /// Returns false if an episode is already running (whoever owns it).
    pub fn begin_background_mode(&self) -> bool {
        let mut state = self.state.lock();
        if state.episode.is_some() {
            return false;
        }
        let owner = thread::current().id();
        debug!("Backgrounding other threads, foreground owner {:?}", owner);
        state.episode = Some(Episode {
            owner,
            buffer: Vec::new(),
        });
        true
    }

    /// Hand the terminal back: flush held output and end the episode.
    ///
    /// Only the owning thread can end an episode; returns whether it ended.
    pub fn end_background_mode(&self) -> bool {
        let mut state = self.state.lock();
        let owner = match &state.episode {
            Some(episode) => episode.owner,
            None => return false,
        };
        if owner != thread::current().id() {
            warn!(
                "Ignoring foreground handover from {:?}, owner is {:?}",
                thread::current().id(),
                owner
            );
            return false;
        }

        if let Some(episode) = state.episode.take() {
            debug!(
                "Foregrounding, flushing {} held back writes",
                episode.buffer.len()
            );
            for chunk in &episode.buffer {
                state.write_to_sink(chunk);
            }
        }
        state.pending.hand_over();
        drop(state);

        self.released.notify_all();
        true
    }

    /// True if another thread currently owns the terminal
    pub fn is_background(&self) -> bool {
        self.context().is_background()
    }

    pub fn context(&self) -> ExecutionContext {
        self.state.lock().context()
    }

    /// Write raw bytes, directly or into the background buffer
    pub fn write(&self, bytes: &[u8]) {
        self.lock().write(bytes);
    }

    pub fn line_pending(&self) -> bool {
        self.lock().line_pending()
    }

    pub fn set_line_pending(&self, pending: bool) {
        self.lock().set_line_pending(pending);
    }

    /// Block until the calling thread is no longer in the background
    pub fn wait_for_foreground(&self) {
        let mut state = self.state.lock();
        while state.context().is_background() {
            self.released.wait(&mut state);
        }
    }

    /// Begin background mode and end it again when the scope is dropped
    pub fn background_scope(&self) -> BackgroundScope<'_> {
        let started = self.begin_background_mode();
        BackgroundScope {
            arbiter: self,
            started,
        }
    }
}

/// Locked view of the arbiter for the calling thread
pub struct ArbiterGuard<'a> {
    state: MutexGuard<'a, State>,
}

impl ArbiterGuard<'_> {
    pub fn context(&self) -> ExecutionContext {
        self.state.context()
    }

    pub fn line_pending(&self) -> bool {
        let context = self.context();
        self.state.pending.get(context)
    }

    pub fn set_line_pending(&mut self, pending: bool) {
        let context = self.context();
        self.state.pending.set(context, pending);
    }

    pub fn write(&mut self, bytes: &[u8]) {
        if bytes.is_empty() {
            return;
        }
        if self.context().is_background() {
            if let Some(episode) = self.state.episode.as_mut() {
                episode.buffer.push(bytes.to_vec());
                return;
            }
        }
        self.state.write_to_sink(bytes);
    }
}

/// Ends background mode on drop, if this scope started it
#[must_use = "other threads are foregrounded again when the scope is dropped"]
pub struct BackgroundScope<'a> {
    arbiter: &'a Arbiter,
    started: bool,
}

impl BackgroundScope<'_> {
    /// Whether this scope opened a new episode
    pub fn started(&self) -> bool {
        self.started
    }
}

impl Drop for BackgroundScope<'_> {
    fn drop(&mut self) {
        if self.started {
            self.arbiter.end_background_mode();
        }
    }
}
