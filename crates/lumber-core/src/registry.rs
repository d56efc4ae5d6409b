//! The logger registry.
//!
//! A [`Registry`] hands out one shared [`Logger`] per name, owns the master
//! level that gates every logger it created, and owns the history buffer
//! they all append to. Create one at start-up and pass it (or an `Arc` of
//! it) to whatever needs to log.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use crate::config::RegistryConfig;
use crate::console::ConsoleTarget;
use crate::level::Level;
use crate::logger::{Dispatcher, Logger};
use crate::record::History;
use crate::target::SharedTarget;

/// Owner of every logger, the master level and the shared history.
pub struct Registry {
    loggers: Mutex<HashMap<String, Arc<Logger>>>,
    dispatcher: Arc<Dispatcher>,
    config: RegistryConfig,
}

impl Registry {
    /// Creates a registry with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Creates a registry from a configuration.
    #[must_use]
    pub fn with_config(config: RegistryConfig) -> Self {
        Self::builder().config(config).build()
    }

    /// Returns a builder for a registry.
    #[must_use]
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Returns the logger registered under `name`, creating it if needed.
    ///
    /// A newly created logger takes its level from the configuration.
    pub fn get_logger(&self, name: &str) -> Arc<Logger> {
        self.get_logger_with(name, None, None)
    }

    /// Returns the logger registered under `name`, creating it with the
    /// given level and target if needed.
    ///
    /// The first registration wins: when `name` already exists, the
    /// existing logger is returned unchanged and `level` and `target` are
    /// ignored.
    pub fn get_logger_with(
        &self,
        name: &str,
        level: Option<Level>,
        target: Option<SharedTarget>,
    ) -> Arc<Logger> {
        let mut loggers = self.loggers.lock();
        if let Some(existing) = loggers.get(name) {
            return Arc::clone(existing);
        }

        let level = level.unwrap_or_else(|| self.config.level_for(name));
        let logger = Arc::new(Logger::new(
            name,
            Some(level),
            target,
            Arc::clone(&self.dispatcher),
        ));
        loggers.insert(name.to_string(), Arc::clone(&logger));
        debug!(logger = name, %level, "registered logger");
        logger
    }

    /// Returns a live handle on the shared history.
    ///
    /// The handle observes every later append; it is not a snapshot.
    #[must_use]
    pub fn log(&self) -> History {
        self.dispatcher.history().clone()
    }

    /// Returns the master level.
    #[must_use]
    pub fn master_level(&self) -> Level {
        self.dispatcher.master_level()
    }

    /// Sets the master level. Applies from the next log call on.
    pub fn set_master_level(&self, level: Level) {
        self.dispatcher.set_master_level(level);
        debug!(%level, "master level changed");
    }

    /// Returns true if `subject` is a logger or a shared logger.
    #[must_use]
    pub fn is_instance(subject: &dyn Any) -> bool {
        subject.is::<Logger>() || subject.is::<Arc<Logger>>()
    }

    /// Returns true if a logger is registered under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.loggers.lock().contains_key(name)
    }

    /// Returns the registered names, sorted.
    #[must_use]
    pub fn logger_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.loggers.lock().keys().cloned().collect();
        names.sort();
        names
    }

    /// Returns the number of registered loggers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.loggers.lock().len()
    }

    /// Returns true if no logger has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.loggers.lock().is_empty()
    }

    /// Returns how many target failures have been absorbed.
    #[must_use]
    pub fn target_failures(&self) -> u64 {
        self.dispatcher.target_failures()
    }

    /// Returns the configuration the registry was built with.
    #[must_use]
    pub const fn config(&self) -> &RegistryConfig {
        &self.config
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("loggers", &self.logger_names())
            .field("master_level", &self.master_level())
            .field("history_len", &self.dispatcher.history().len())
            .finish()
    }
}

/// Builder for a [`Registry`].
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    config: RegistryConfig,
    trace_console: Option<ConsoleTarget>,
}

impl RegistryBuilder {
    /// Uses `config` for the master level and logger defaults.
    #[must_use]
    pub fn config(mut self, config: RegistryConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the initial master level.
    #[must_use]
    pub fn master_level(mut self, level: Level) -> Self {
        self.config.master_level = level;
        self
    }

    /// Replaces the console target traces are routed to.
    ///
    /// Defaults to a [`ConsoleTarget`] on stdout and stderr.
    #[must_use]
    pub fn trace_console(mut self, console: ConsoleTarget) -> Self {
        self.trace_console = Some(console);
        self
    }

    /// Builds the registry.
    #[must_use]
    pub fn build(self) -> Registry {
        let console = self.trace_console.unwrap_or_default();
        Registry {
            loggers: Mutex::new(HashMap::new()),
            dispatcher: Arc::new(Dispatcher::new(self.config.master_level, console)),
            config: self.config,
        }
    }
}
