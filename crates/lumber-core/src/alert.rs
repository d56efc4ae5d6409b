//! Interrupting alert target.
//!
//! Each record is written as a single alert and the calling thread waits for
//! an acknowledgement line before the log call returns.

use std::io::{self, BufRead, BufReader, Write};

use chrono::{DateTime, Utc};
use parking_lot::Mutex;

use crate::console::clock_time;
use crate::error::Result;
use crate::level::Level;
use crate::payload::Payload;
use crate::target::Target;

/// Prompt written after each alert.
pub const DEFAULT_PROMPT: &str = "[press enter to continue]";

/// Builds the alert text for a record.
#[must_use]
pub fn alert_text(level: Level, name: &str, payload: &Payload, timestamp: DateTime<Utc>) -> String {
    format!(
        "{} [{}] [{name}] :\n{payload}",
        clock_time(timestamp),
        level.label()
    )
}

/// Target that blocks the caller until each alert is acknowledged.
pub struct AlertTarget {
    // One lock for both ends keeps an alert and its acknowledgement paired.
    io: Mutex<AlertIo>,
    prompt: String,
}

struct AlertIo {
    output: Box<dyn Write + Send>,
    input: Box<dyn BufRead + Send>,
}

impl AlertTarget {
    /// Creates an alert target that writes to stderr and waits on stdin.
    #[must_use]
    pub fn new() -> Self {
        Self::with_io(io::stderr(), BufReader::new(io::stdin()))
    }

    /// Creates an alert target on the given output and acknowledgement input.
    #[must_use]
    pub fn with_io(
        output: impl Write + Send + 'static,
        input: impl BufRead + Send + 'static,
    ) -> Self {
        Self {
            io: Mutex::new(AlertIo {
                output: Box::new(output),
                input: Box::new(input),
            }),
            prompt: DEFAULT_PROMPT.to_string(),
        }
    }

    /// Replaces the acknowledgement prompt.
    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Returns the acknowledgement prompt.
    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }
}

impl Default for AlertTarget {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AlertTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlertTarget")
            .field("prompt", &self.prompt)
            .finish_non_exhaustive()
    }
}

impl Target for AlertTarget {
    fn output(
        &self,
        level: Level,
        name: &str,
        payload: &Payload,
        timestamp: DateTime<Utc>,
    ) -> Result<()> {
        if !level.is_loggable() {
            return Ok(());
        }

        let mut io = self.io.lock();
        writeln!(io.output, "{}", alert_text(level, name, payload, timestamp))?;
        writeln!(io.output, "{}", self.prompt)?;
        io.output.flush()?;

        // End of input counts as an acknowledgement.
        let mut ack = String::new();
        io.input.read_line(&mut ack)?;
        Ok(())
    }
}
