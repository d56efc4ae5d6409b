//! The output contract every sink implements.
//!
//! This module provides the [`Target`] trait, the inert [`NullTarget`] that
//! new loggers start with, and the [`SharedTarget`] alias loggers hold.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::level::Level;
use crate::payload::Payload;

/// A sink that renders accepted records.
///
/// Implement this trait to send records somewhere (a terminal, a prompt,
/// the `tracing` ecosystem, a test buffer). Targets are handed every level
/// including the `All` sentinel and should treat the sentinels as no-ops.
pub trait Target: Send + Sync {
    /// Renders one record.
    ///
    /// # Errors
    ///
    /// Returns an error if the record could not be rendered. The logger
    /// keeps the record in history regardless.
    fn output(
        &self,
        level: Level,
        name: &str,
        payload: &Payload,
        timestamp: DateTime<Utc>,
    ) -> Result<()>;
}

/// A target shared between loggers.
pub type SharedTarget = Arc<dyn Target>;

/// A boxed target for dynamic dispatch.
pub type BoxedTarget = Box<dyn Target>;

impl Target for BoxedTarget {
    fn output(
        &self,
        level: Level,
        name: &str,
        payload: &Payload,
        timestamp: DateTime<Utc>,
    ) -> Result<()> {
        (**self).output(level, name, payload, timestamp)
    }
}

impl<T: Target + ?Sized> Target for Arc<T> {
    fn output(
        &self,
        level: Level,
        name: &str,
        payload: &Payload,
        timestamp: DateTime<Utc>,
    ) -> Result<()> {
        (**self).output(level, name, payload, timestamp)
    }
}

/// A target that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullTarget;

impl NullTarget {
    /// Creates a new null target.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Returns a shared null target.
    #[must_use]
    pub fn shared() -> SharedTarget {
        Arc::new(Self)
    }
}

impl Target for NullTarget {
    fn output(
        &self,
        _level: Level,
        _name: &str,
        _payload: &Payload,
        _timestamp: DateTime<Utc>,
    ) -> Result<()> {
        Ok(())
    }
}
