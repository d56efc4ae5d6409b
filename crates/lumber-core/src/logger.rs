//! Named loggers and the gating algorithm.
//!
//! A [`Logger`] passes a message only if its level clears both the logger's
//! own threshold and the registry's master level. Accepted messages are
//! recorded in the shared [`History`] and forwarded to the logger's target,
//! except TRACE messages, which skip history and always go to the console.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use crate::console::ConsoleTarget;
use crate::level::Level;
use crate::payload::Payload;
use crate::record::{History, LogRecord};
use crate::target::{NullTarget, SharedTarget, Target};

/// What happened to a single log call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// The level was at or above `None`; nothing happened.
    Rejected,
    /// A gate suppressed the message; nothing happened.
    Filtered,
    /// A trace was sent to the console target and not recorded.
    Traced {
        /// Whether the console target rendered it.
        delivered: bool,
    },
    /// The message was recorded in history and forwarded.
    Recorded {
        /// Whether the logger's target rendered it.
        delivered: bool,
    },
}

impl Dispatch {
    /// Returns true if the message passed both gates.
    #[must_use]
    pub const fn is_accepted(self) -> bool {
        matches!(self, Self::Traced { .. } | Self::Recorded { .. })
    }

    /// Returns true if the message was appended to history.
    #[must_use]
    pub const fn is_recorded(self) -> bool {
        matches!(self, Self::Recorded { .. })
    }
}

/// State shared by every logger of one registry.
pub(crate) struct Dispatcher {
    master: RwLock<Level>,
    history: History,
    trace_console: Arc<ConsoleTarget>,
    target_failures: AtomicU64,
}

impl Dispatcher {
    pub(crate) fn new(master: Level, trace_console: ConsoleTarget) -> Self {
        Self {
            master: RwLock::new(master),
            history: History::new(),
            trace_console: Arc::new(trace_console),
            target_failures: AtomicU64::new(0),
        }
    }

    pub(crate) fn master_level(&self) -> Level {
        *self.master.read()
    }

    pub(crate) fn set_master_level(&self, level: Level) {
        *self.master.write() = level;
    }

    pub(crate) const fn history(&self) -> &History {
        &self.history
    }

    pub(crate) fn target_failures(&self) -> u64 {
        self.target_failures.load(Ordering::Relaxed)
    }

    /// Runs a target, keeping its failure away from the caller.
    fn deliver(
        &self,
        target: &dyn Target,
        level: Level,
        name: &str,
        payload: &Payload,
        timestamp: DateTime<Utc>,
    ) -> bool {
        match target.output(level, name, payload, timestamp) {
            Ok(()) => true,
            Err(e) => {
                self.target_failures.fetch_add(1, Ordering::Relaxed);
                tracing::warn!(logger = name, %level, error = %e, "target failed to render record");
                false
            }
        }
    }
}

struct LoggerState {
    name: String,
    level: Level,
    target: SharedTarget,
}

/// A named emitter with its own threshold and target.
///
/// Loggers are created by a [`Registry`](crate::Registry) and shared as
/// `Arc<Logger>`; every setter takes effect for all holders at once.
pub struct Logger {
    state: RwLock<LoggerState>,
    dispatcher: Arc<Dispatcher>,
}

impl Logger {
    /// Starts silent, then applies `level` and `target` when given.
    pub(crate) fn new(
        name: impl Into<String>,
        level: Option<Level>,
        target: Option<SharedTarget>,
        dispatcher: Arc<Dispatcher>,
    ) -> Self {
        let logger = Self {
            state: RwLock::new(LoggerState {
                name: name.into(),
                level: Level::None,
                target: NullTarget::shared(),
            }),
            dispatcher,
        };
        logger.set_level(level);
        logger.set_target(target);
        logger
    }

    /// Returns the logger's name.
    #[must_use]
    pub fn name(&self) -> String {
        self.state.read().name.clone()
    }

    /// Returns the logger's own threshold.
    #[must_use]
    pub fn level(&self) -> Level {
        self.state.read().level
    }

    /// Returns the logger's target.
    #[must_use]
    pub fn target(&self) -> SharedTarget {
        Arc::clone(&self.state.read().target)
    }

    /// Renames the logger. `None` leaves the name unchanged.
    ///
    /// The registry keeps the logger under the name it was registered with.
    pub fn set_name(&self, name: Option<&str>) {
        if let Some(name) = name {
            self.state.write().name = name.to_string();
        }
    }

    /// Sets the threshold. `None` leaves the threshold unchanged.
    pub fn set_level(&self, level: impl Into<Option<Level>>) {
        if let Some(level) = level.into() {
            self.state.write().level = level;
        }
    }

    /// Sets the target. `None` leaves the target unchanged.
    pub fn set_target(&self, target: Option<SharedTarget>) {
        if let Some(target) = target {
            self.state.write().target = target;
        }
    }

    /// Logs at TRACE. Traces go to the console only and are never recorded.
    pub fn trace(&self, payload: impl Into<Payload>) -> Dispatch {
        self.log_at(Level::Trace, payload)
    }

    /// Logs at LOG.
    pub fn log(&self, payload: impl Into<Payload>) -> Dispatch {
        self.log_at(Level::Log, payload)
    }

    /// Logs at DEBUG.
    pub fn debug(&self, payload: impl Into<Payload>) -> Dispatch {
        self.log_at(Level::Debug, payload)
    }

    /// Logs at INFO.
    pub fn info(&self, payload: impl Into<Payload>) -> Dispatch {
        self.log_at(Level::Info, payload)
    }

    /// Logs at WARN.
    pub fn warn(&self, payload: impl Into<Payload>) -> Dispatch {
        self.log_at(Level::Warn, payload)
    }

    /// Logs at ERROR.
    pub fn error(&self, payload: impl Into<Payload>) -> Dispatch {
        self.log_at(Level::Error, payload)
    }

    /// Logs at FATAL.
    pub fn fatal(&self, payload: impl Into<Payload>) -> Dispatch {
        self.log_at(Level::Fatal, payload)
    }

    /// Runs a message at `level` through both gates and dispatches it.
    ///
    /// Never fails. A target error is counted, reported through `tracing`
    /// and surfaced as `delivered: false`; the record stays in history.
    pub fn log_at(&self, level: Level, payload: impl Into<Payload>) -> Dispatch {
        let timestamp = Utc::now();
        if level >= Level::None {
            return Dispatch::Rejected;
        }

        let (name, threshold, target) = {
            let state = self.state.read();
            (state.name.clone(), state.level, Arc::clone(&state.target))
        };

        // Held across the gate and the append so a master level change
        // cannot land between them.
        let master = self.dispatcher.master.read();
        if level < threshold || level < *master {
            return Dispatch::Filtered;
        }

        let payload = payload.into();
        if level == Level::Trace {
            drop(master);
            let console = Arc::clone(&self.dispatcher.trace_console);
            let delivered = self
                .dispatcher
                .deliver(&*console, level, &name, &payload, timestamp);
            return Dispatch::Traced { delivered };
        }

        self.dispatcher
            .history
            .append(LogRecord::new(name.clone(), level, payload.clone(), timestamp));
        drop(master);

        let delivered = self
            .dispatcher
            .deliver(&*target, level, &name, &payload, timestamp);
        Dispatch::Recorded { delivered }
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.read();
        f.debug_struct("Logger")
            .field("name", &state.name)
            .field("level", &state.level)
            .finish_non_exhaustive()
    }
}
