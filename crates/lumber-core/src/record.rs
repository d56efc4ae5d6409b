//! Accepted log records and the shared history buffer.
//!
//! This module provides:
//! - [`LogRecord`] — One accepted message, immutable once created
//! - [`History`] — Live, append-only view of every accepted record

use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::level::Level;
use crate::payload::Payload;

/// A message that passed both gates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    /// Name of the logger that emitted the message
    pub logger: String,
    /// Level the message was emitted at
    pub level: Level,
    /// What the caller logged. Omitted from JSON when absent.
    #[serde(default, skip_serializing_if = "Payload::is_absent")]
    pub payload: Payload,
    /// When the call was made
    pub timestamp: DateTime<Utc>,
}

impl LogRecord {
    /// Creates a new record.
    #[must_use]
    pub fn new(
        logger: impl Into<String>,
        level: Level,
        payload: Payload,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            logger: logger.into(),
            level,
            payload,
            timestamp,
        }
    }
}

/// Shared, append-only record of every accepted non-trace message.
///
/// Cloning a `History` yields another handle onto the same buffer, so a
/// handle obtained early keeps observing later appends. The buffer is
/// unbounded and lives as long as its last handle.
#[derive(Debug, Clone, Default)]
pub struct History {
    records: Arc<RwLock<Vec<LogRecord>>>,
}

impl History {
    /// Creates an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn append(&self, record: LogRecord) {
        self.records.write().push(record);
    }

    /// Returns the number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// Returns true if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    /// Returns the record at `index`, in append order.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<LogRecord> {
        self.records.read().get(index).cloned()
    }

    /// Returns the most recent record.
    #[must_use]
    pub fn last(&self) -> Option<LogRecord> {
        self.records.read().last().cloned()
    }

    /// Copies out every record currently held.
    #[must_use]
    pub fn snapshot(&self) -> Vec<LogRecord> {
        self.records.read().clone()
    }

    /// Records emitted by the named logger, oldest first.
    #[must_use]
    pub fn for_logger(&self, name: &str) -> Vec<LogRecord> {
        self.records
            .read()
            .iter()
            .filter(|r| r.logger == name)
            .cloned()
            .collect()
    }

    /// Records emitted at exactly `level`, oldest first.
    #[must_use]
    pub fn at_level(&self, level: Level) -> Vec<LogRecord> {
        self.records
            .read()
            .iter()
            .filter(|r| r.level == level)
            .cloned()
            .collect()
    }

    /// Serializes the current contents as a JSON array.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        let records = self.records.read();
        Ok(serde_json::to_string_pretty(&*records)?)
    }

    /// Returns true if both handles refer to the same buffer.
    #[must_use]
    pub fn same_buffer(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.records, &other.records)
    }
}
