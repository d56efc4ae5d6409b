//! # lumber-core
//!
//! Named, leveled loggers with a shared in-process history.
//!
//! This crate provides:
//!
//! - [`Level`] — The nine-step severity scale, with `All` and `None` sentinels
//! - [`Payload`] — Whatever was logged (text, number, flag, structured, absent)
//! - [`Registry`] — One [`Logger`] per name, the master level, the history
//! - [`Logger`] — Per-level calls gated by its own level and the master level
//! - [`History`] — Live, append-only view of every accepted record
//! - [`Target`] — The sink contract, with [`ConsoleTarget`], [`AlertTarget`],
//!   [`TracingTarget`] and [`NullTarget`] built in
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use lumber_core::{ConsoleTarget, Dispatch, Level, Registry, SharedTarget};
//!
//! let registry = Registry::new();
//! let console: SharedTarget = Arc::new(ConsoleTarget::new());
//! let logger = registry.get_logger_with("logger_a", Some(Level::Warn), Some(console));
//!
//! // Below the logger's level: dropped.
//! assert_eq!(logger.log("hello"), Dispatch::Filtered);
//!
//! // At or above it: recorded and rendered.
//! assert!(logger.error("boom").is_recorded());
//! assert_eq!(registry.log().len(), 1);
//!
//! // The master level gates every logger at once.
//! registry.set_master_level(Level::Fatal);
//! assert_eq!(logger.error("quiet now"), Dispatch::Filtered);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod alert;
pub mod config;
pub mod console;
pub mod error;
pub mod level;
pub mod logger;
pub mod payload;
pub mod record;
pub mod registry;
pub mod target;
pub mod tracing_target;
pub mod writer;

// Re-export main types
pub use alert::AlertTarget;
pub use config::RegistryConfig;
pub use console::{ConsoleChannel, ConsoleTarget};
pub use error::{LumberError, Result};
pub use level::Level;
pub use logger::{Dispatch, Logger};
pub use payload::Payload;
pub use record::{History, LogRecord};
pub use registry::{Registry, RegistryBuilder};
pub use target::{BoxedTarget, NullTarget, SharedTarget, Target};
pub use tracing_target::TracingTarget;
pub use writer::SharedBuffer;
