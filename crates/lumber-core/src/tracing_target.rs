//! Target that forwards records into `tracing`.
//!
//! Levels map onto the nearest tracing level:
//! - Trace, Log → `tracing::trace!`
//! - Debug → `tracing::debug!`
//! - Info → `tracing::info!`
//! - Warn → `tracing::warn!`
//! - Error, Fatal → `tracing::error!`

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::level::Level;
use crate::payload::Payload;
use crate::target::Target;

/// Target that re-emits records as `tracing` events.
#[derive(Debug, Clone, Default)]
pub struct TracingTarget {
    /// Optional prefix for all messages.
    prefix: Option<String>,
}

impl TracingTarget {
    /// Creates a new tracing target.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a tracing target whose messages carry a prefix.
    #[must_use]
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
        }
    }

    /// Returns the nearest `tracing` level, if the level renders at all.
    #[must_use]
    pub const fn tracing_level(level: Level) -> Option<tracing::Level> {
        match level {
            Level::All | Level::None => None,
            Level::Trace | Level::Log => Some(tracing::Level::TRACE),
            Level::Debug => Some(tracing::Level::DEBUG),
            Level::Info => Some(tracing::Level::INFO),
            Level::Warn => Some(tracing::Level::WARN),
            Level::Error | Level::Fatal => Some(tracing::Level::ERROR),
        }
    }
}

impl Target for TracingTarget {
    fn output(
        &self,
        level: Level,
        name: &str,
        payload: &Payload,
        timestamp: DateTime<Utc>,
    ) -> Result<()> {
        let prefix = self.prefix.as_deref().unwrap_or("lumber");
        let label = level.label();

        match level {
            Level::All | Level::None => {}
            Level::Trace | Level::Log => {
                tracing::trace!(target: "lumber", logger = name, severity = label, %timestamp, %payload, "[{prefix}] {name}");
            }
            Level::Debug => {
                tracing::debug!(target: "lumber", logger = name, severity = label, %timestamp, %payload, "[{prefix}] {name}");
            }
            Level::Info => {
                tracing::info!(target: "lumber", logger = name, severity = label, %timestamp, %payload, "[{prefix}] {name}");
            }
            Level::Warn => {
                tracing::warn!(target: "lumber", logger = name, severity = label, %timestamp, %payload, "[{prefix}] {name}");
            }
            Level::Error | Level::Fatal => {
                tracing::error!(target: "lumber", logger = name, severity = label, %timestamp, %payload, "[{prefix}] {name}");
            }
        }
        Ok(())
    }
}
