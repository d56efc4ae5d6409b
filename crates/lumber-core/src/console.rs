//! Console-style target.
//!
//! Renders one summary line per record on a console channel. Consoles have
//! no fatal or trace channel, so FATAL goes to the error channel and TRACE
//! goes to the log channel followed by a stack trace of the call site.

use std::backtrace::Backtrace;
use std::io::{self, Write};

use chrono::{DateTime, Local, Utc};
use parking_lot::Mutex;

use crate::error::Result;
use crate::level::Level;
use crate::payload::Payload;
use crate::target::Target;

/// Marker written on the summary line when the payload is rendered below it.
pub const ELISION: &str = "...";

/// The console channel a level renders on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConsoleChannel {
    /// Plain log output
    Log,
    /// Debug output
    Debug,
    /// Informational output
    Info,
    /// Warnings
    Warn,
    /// Errors
    Error,
}

impl ConsoleChannel {
    /// Maps a level onto its channel. The sentinels have none.
    #[must_use]
    pub const fn for_level(level: Level) -> Option<Self> {
        match level {
            Level::All | Level::None => None,
            Level::Trace | Level::Log => Some(Self::Log),
            Level::Debug => Some(Self::Debug),
            Level::Info => Some(Self::Info),
            Level::Warn => Some(Self::Warn),
            Level::Error | Level::Fatal => Some(Self::Error),
        }
    }

    /// Returns true if this channel writes to the error stream.
    #[must_use]
    pub const fn is_error_stream(self) -> bool {
        matches!(self, Self::Warn | Self::Error)
    }
}

/// Formats a timestamp as local wall-clock `HH:MM:SS`.
#[must_use]
pub fn clock_time(timestamp: DateTime<Utc>) -> String {
    timestamp
        .with_timezone(&Local)
        .format("%H:%M:%S")
        .to_string()
}

/// Builds the summary line for a record, without a trailing newline.
#[must_use]
pub fn summary_line(
    level: Level,
    name: &str,
    payload: &Payload,
    timestamp: DateTime<Utc>,
) -> String {
    let time = clock_time(timestamp);
    let label = level.label();
    if payload.is_primitive() {
        format!("{time} [{label}] [{name}] {payload}")
    } else {
        format!("{time} [{label}] [{name}]{ELISION}")
    }
}

type SharedWriter = Mutex<Box<dyn Write + Send>>;

/// Target that writes to a pair of console streams.
pub struct ConsoleTarget {
    out: SharedWriter,
    err: SharedWriter,
    backtraces: bool,
}

impl ConsoleTarget {
    /// Creates a console target on stdout and stderr.
    #[must_use]
    pub fn new() -> Self {
        Self::with_writers(io::stdout(), io::stderr())
    }

    /// Creates a console target on the given streams.
    ///
    /// `out` receives the log, debug and info channels; `err` receives
    /// warnings and errors.
    #[must_use]
    pub fn with_writers(
        out: impl Write + Send + 'static,
        err: impl Write + Send + 'static,
    ) -> Self {
        Self {
            out: Mutex::new(Box::new(out)),
            err: Mutex::new(Box::new(err)),
            backtraces: true,
        }
    }

    /// Enables or disables the stack trace written after trace records.
    #[must_use]
    pub fn with_backtraces(mut self, enabled: bool) -> Self {
        self.backtraces = enabled;
        self
    }

    /// Returns true if trace records are followed by a stack trace.
    #[must_use]
    pub const fn backtraces(&self) -> bool {
        self.backtraces
    }
}

impl Default for ConsoleTarget {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ConsoleTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleTarget")
            .field("backtraces", &self.backtraces)
            .finish_non_exhaustive()
    }
}

impl Target for ConsoleTarget {
    fn output(
        &self,
        level: Level,
        name: &str,
        payload: &Payload,
        timestamp: DateTime<Utc>,
    ) -> Result<()> {
        let Some(channel) = ConsoleChannel::for_level(level) else {
            return Ok(());
        };

        let stream = if channel.is_error_stream() {
            &self.err
        } else {
            &self.out
        };
        let mut writer = stream.lock();

        writeln!(writer, "{}", summary_line(level, name, payload, timestamp))?;
        if !payload.is_primitive() {
            writeln!(writer, "{}", payload.to_pretty_string())?;
        }
        if level == Level::Trace && self.backtraces {
            writeln!(writer, "{}", Backtrace::force_capture())?;
        }
        writer.flush()?;
        Ok(())
    }
}
