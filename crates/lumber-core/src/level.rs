//! The severity scale.
//!
//! Levels are ranked `All < Trace < Log < Debug < Info < Warn < Error < Fatal < None`.
//! `All` and `None` are sentinels: a threshold may be set to either, but a
//! message is never rendered at them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LumberError;

/// Severity level, ordered from most permissive to fully suppressed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Level {
    /// Threshold sentinel that lets everything through
    All = 0,
    /// Call-site tracing, rerouted to the console
    Trace = 1,
    /// Plain log output
    Log = 2,
    /// Debugging information
    Debug = 3,
    /// General information
    Info = 4,
    /// Warning conditions
    Warn = 5,
    /// Error conditions
    Error = 6,
    /// Unrecoverable conditions
    Fatal = 7,
    /// Threshold sentinel that suppresses everything
    #[default]
    None = 8,
}

impl Level {
    /// Every level in rank order.
    pub const ALL_LEVELS: [Self; 9] = [
        Self::All,
        Self::Trace,
        Self::Log,
        Self::Debug,
        Self::Info,
        Self::Warn,
        Self::Error,
        Self::Fatal,
        Self::None,
    ];

    /// Levels a message can be emitted at, in rank order.
    pub const LOGGABLE: [Self; 7] = [
        Self::Trace,
        Self::Log,
        Self::Debug,
        Self::Info,
        Self::Warn,
        Self::Error,
        Self::Fatal,
    ];

    /// Returns the numeric rank.
    #[must_use]
    pub const fn rank(self) -> u8 {
        self as u8
    }

    /// Looks up a level by rank.
    #[must_use]
    pub const fn from_rank(rank: u8) -> Option<Self> {
        match rank {
            0 => Some(Self::All),
            1 => Some(Self::Trace),
            2 => Some(Self::Log),
            3 => Some(Self::Debug),
            4 => Some(Self::Info),
            5 => Some(Self::Warn),
            6 => Some(Self::Error),
            7 => Some(Self::Fatal),
            8 => Some(Self::None),
            _ => None,
        }
    }

    /// Returns the canonical lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Trace => "trace",
            Self::Log => "log",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
            Self::Fatal => "fatal",
            Self::None => "none",
        }
    }

    /// Returns the uppercase name used when rendering.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "ALL",
            Self::Trace => "TRACE",
            Self::Log => "LOG",
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
            Self::Fatal => "FATAL",
            Self::None => "NONE",
        }
    }

    /// Returns true if a message can be emitted at this level.
    #[must_use]
    pub const fn is_loggable(self) -> bool {
        !matches!(self, Self::All | Self::None)
    }

    /// Returns true if this level is at least as severe as `threshold`.
    #[must_use]
    pub fn is_at_least(self, threshold: Self) -> bool {
        self >= threshold
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = LumberError;

    /// Parses a level name (any case) or a numeric rank.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(rank) = trimmed.parse::<u8>() {
            return Self::from_rank(rank).ok_or_else(|| LumberError::InvalidLevel(s.to_string()));
        }
        Self::ALL_LEVELS
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| LumberError::InvalidLevel(s.to_string()))
    }
}

impl TryFrom<u8> for Level {
    type Error = LumberError;

    fn try_from(rank: u8) -> Result<Self, LumberError> {
        Self::from_rank(rank).ok_or_else(|| LumberError::InvalidLevel(rank.to_string()))
    }
}
