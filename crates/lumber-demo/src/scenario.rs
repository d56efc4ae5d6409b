//! The reference logging session.
//!
//! Two loggers log at every level, then the master level is raised and the
//! second logger tries again.

use lumber_core::{Dispatch, Level, Registry, SharedTarget};
use serde_json::json;
use tracing::info;

/// Counts of what happened to each call in a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    /// Calls at or above the `None` sentinel.
    pub rejected: usize,
    /// Calls stopped by a gate.
    pub filtered: usize,
    /// Traces sent to the console.
    pub traced: usize,
    /// Calls recorded in history.
    pub recorded: usize,
    /// Recorded calls whose target failed.
    pub undelivered: usize,
}

impl Tally {
    fn count(&mut self, dispatch: Dispatch) {
        match dispatch {
            Dispatch::Rejected => self.rejected += 1,
            Dispatch::Filtered => self.filtered += 1,
            Dispatch::Traced { .. } => self.traced += 1,
            Dispatch::Recorded { delivered } => {
                self.recorded += 1;
                if !delivered {
                    self.undelivered += 1;
                }
            }
        }
    }
}

/// Runs the session. `first` renders `logger_a`, `second` renders `logger_b`.
pub fn replay(
    registry: &Registry,
    first: SharedTarget,
    second: SharedTarget,
    raise_to: Level,
) -> Tally {
    let mut tally = Tally::default();
    let a = registry.get_logger_with("logger_a", Some(Level::Warn), Some(first));
    let b = registry.get_logger_with("logger_b", Some(Level::Trace), Some(second));

    for dispatch in [
        a.log("hello"),
        a.debug(3),
        a.info(json!({"hello": "there"})),
        a.warn("warning"),
        a.error("boom"),
        a.fatal("arrrrgh"),
        b.log(json!({"hi": "there"})),
        b.debug(json!([1, 2, 3, 4, "five", {"six": 6}])),
        b.info(3),
        b.warn("careful"),
        b.error("bang"),
        b.fatal("bluurrrrgh"),
        b.trace("tracey"),
        b.debug(serde_json::Value::Null),
        b.debug(None::<&str>),
    ] {
        tally.count(dispatch);
    }

    registry.set_master_level(raise_to);
    info!(master = %raise_to, "raised master level");

    for dispatch in [
        b.log("should not see me"),
        b.debug("should not see me"),
        b.info("should not see me"),
        b.warn("should not see me"),
        b.error("should fear me"),
        b.fatal("should be terrified by me"),
    ] {
        tally.count(dispatch);
    }

    tally
}
