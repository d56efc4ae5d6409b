//! Gating and dispatch behavior across the public API.
//!
//! These tests verify:
//! 1. The per-logger threshold and the master level both gate
//! 2. Trace messages reach only the console target
//! 3. One logger per name, first registration wins
//! 4. The history is shared, ordered and live
//! 5. Target failures stay away from the caller

use std::sync::Arc;
use std::thread;

use chrono::{DateTime, Utc};
use lumber_core::{
    AlertTarget, ConsoleTarget, Dispatch, Level, LumberError, Payload, Registry, Result,
    SharedBuffer, SharedTarget, Target,
};
use parking_lot::Mutex;
use proptest::prelude::*;
use serde_json::json;

/// Target that remembers every call it receives.
#[derive(Default)]
struct Recorder {
    calls: Mutex<Vec<(Level, String, Payload, DateTime<Utc>)>>,
}

impl Recorder {
    fn len(&self) -> usize {
        self.calls.lock().len()
    }
}

impl Target for Recorder {
    fn output(
        &self,
        level: Level,
        name: &str,
        payload: &Payload,
        timestamp: DateTime<Utc>,
    ) -> Result<()> {
        self.calls
            .lock()
            .push((level, name.to_string(), payload.clone(), timestamp));
        Ok(())
    }
}

fn capturing_registry() -> (Registry, SharedBuffer) {
    let console_out = SharedBuffer::new();
    let console = ConsoleTarget::with_writers(console_out.clone(), console_out.clone())
        .with_backtraces(false);
    (Registry::builder().trace_console(console).build(), console_out)
}

fn recorder() -> (Arc<Recorder>, SharedTarget) {
    let recorder = Arc::new(Recorder::default());
    let shared: SharedTarget = recorder.clone();
    (recorder, shared)
}

// ============================================================================
// Threshold gates
// ============================================================================

#[test]
fn below_threshold_is_dropped_at_or_above_is_dispatched() {
    for threshold in Level::LOGGABLE.into_iter().filter(|l| *l != Level::Trace) {
        let (registry, _) = capturing_registry();
        let (seen, target) = recorder();
        let logger = registry.get_logger_with("gate", Some(threshold), Some(target));

        for level in Level::LOGGABLE.into_iter().filter(|l| *l != Level::Trace) {
            let before = registry.log().len();
            let outcome = logger.log_at(level, "msg");
            if level < threshold {
                assert_eq!(outcome, Dispatch::Filtered, "{level} under {threshold}");
                assert_eq!(registry.log().len(), before);
            } else {
                assert_eq!(outcome, Dispatch::Recorded { delivered: true });
                assert_eq!(registry.log().len(), before + 1);
            }
        }
        assert_eq!(seen.len(), registry.log().len());
    }
}

#[test]
fn master_error_suppresses_lower_levels_on_every_logger() {
    let (registry, _) = capturing_registry();
    let a = registry.get_logger_with("a", Some(Level::All), None);
    let b = registry.get_logger_with("b", Some(Level::Log), None);
    registry.set_master_level(Level::Error);

    for logger in [&a, &b] {
        assert_eq!(logger.log("should not see me"), Dispatch::Filtered);
        assert_eq!(logger.debug("should not see me"), Dispatch::Filtered);
        assert_eq!(logger.info("should not see me"), Dispatch::Filtered);
        assert_eq!(logger.warn("should not see me"), Dispatch::Filtered);
        assert!(logger.error("should fear me").is_recorded());
        assert!(logger.fatal("should be terrified by me").is_recorded());
    }
    assert_eq!(registry.log().len(), 4);
}

#[test]
fn master_fatal_blocks_error_but_not_fatal() {
    let (registry, _) = capturing_registry();
    let (seen, target) = recorder();
    let logger = registry.get_logger_with("a", Some(Level::Warn), Some(target));
    registry.set_master_level(Level::Fatal);

    assert_eq!(logger.error("e"), Dispatch::Filtered);
    assert_eq!(seen.len(), 0);
    assert!(logger.fatal("f").is_recorded());
    assert_eq!(seen.len(), 1);
    assert_eq!(registry.log().len(), 1);
}

#[test]
fn master_none_silences_everything() {
    let (registry, console) = capturing_registry();
    let logger = registry.get_logger_with("a", Some(Level::All), None);
    registry.set_master_level(Level::None);

    for level in Level::LOGGABLE {
        assert_eq!(logger.log_at(level, "x"), Dispatch::Filtered);
    }
    assert!(registry.log().is_empty());
    assert!(console.is_empty());
}

#[test]
fn level_none_is_rejected_even_when_everything_is_open() {
    let (registry, _) = capturing_registry();
    let (seen, target) = recorder();
    let logger = registry.get_logger_with("a", Some(Level::All), Some(target));
    assert_eq!(logger.log_at(Level::None, "x"), Dispatch::Rejected);
    assert!(registry.log().is_empty());
    assert_eq!(seen.len(), 0);
}

// ============================================================================
// Scenario from the reference usage
// ============================================================================

#[test]
fn warn_logger_scenario() {
    let (registry, _) = capturing_registry();
    let (seen, target) = recorder();
    let a = registry.get_logger_with("a", Some(Level::Warn), Some(target));

    assert_eq!(a.log("hi"), Dispatch::Filtered);
    assert!(registry.log().is_empty());
    assert_eq!(seen.len(), 0);

    assert_eq!(a.error("boom"), Dispatch::Recorded { delivered: true });
    let record = registry.log().last();
    assert!(record.is_some());
    if let Some(record) = record {
        assert_eq!(record.logger, "a");
        assert_eq!(record.level, Level::Error);
        assert_eq!(record.payload, Payload::from("boom"));

        let calls = seen.calls.lock();
        assert_eq!(calls.len(), 1);
        assert_eq!(
            calls[0],
            (Level::Error, "a".to_string(), Payload::from("boom"), record.timestamp)
        );
    }
}

#[test]
fn console_scenario_renders_lines() {
    let out = SharedBuffer::new();
    let err = SharedBuffer::new();
    let console: SharedTarget =
        Arc::new(ConsoleTarget::with_writers(out.clone(), err.clone()).with_backtraces(false));
    let registry = Registry::new();
    let a = registry.get_logger_with("logger_a", Some(Level::Warn), Some(console));

    let _ = a.log("hello");
    let _ = a.debug(3);
    let _ = a.info(json!({"hello": "there"}));
    let _ = a.warn("warning");
    let _ = a.error("boom");
    let _ = a.fatal("arrrrgh");

    assert!(out.is_empty());
    let text = err.contents();
    assert!(text.contains("[WARN] [logger_a] warning"));
    assert!(text.contains("[ERROR] [logger_a] boom"));
    assert!(text.contains("[FATAL] [logger_a] arrrrgh"));
    assert_eq!(registry.log().len(), 3);
}

// ============================================================================
// Trace rerouting
// ============================================================================

#[test]
fn trace_goes_to_console_even_with_alert_target() {
    let (registry, console) = capturing_registry();
    let alert_out = SharedBuffer::new();
    let alert: SharedTarget = Arc::new(AlertTarget::with_io(
        alert_out.clone(),
        std::io::Cursor::new(Vec::new()),
    ));
    let b = registry.get_logger_with("b", Some(Level::Trace), Some(alert));

    assert_eq!(b.trace("tracey"), Dispatch::Traced { delivered: true });
    assert!(registry.log().is_empty());
    assert!(alert_out.is_empty());
    assert!(console.contents().contains("[TRACE] [b] tracey"));
}

#[test]
fn trace_goes_to_console_with_default_target() {
    let (registry, console) = capturing_registry();
    let b = registry.get_logger_with("b", Some(Level::All), None);

    assert!(b.trace(json!([1, 2, 3, 4, "five", {"six": 6}])).is_accepted());
    assert!(registry.log().is_empty());
    let text = console.contents();
    assert!(text.contains("[TRACE] [b]..."));
    assert!(text.contains("\"six\": 6"));
}

#[test]
fn trace_never_reaches_configured_target() {
    let (registry, _) = capturing_registry();
    let (seen, target) = recorder();
    let b = registry.get_logger_with("b", Some(Level::Trace), Some(target));

    for _ in 0..3 {
        let _ = b.trace("t");
    }
    assert_eq!(seen.len(), 0);
    assert!(registry.log().is_empty());
}

// ============================================================================
// Registry guarantees
// ============================================================================

#[test]
fn same_instance_per_name() {
    let (registry, _) = capturing_registry();
    let (_, t1) = recorder();
    let (_, t2) = recorder();

    let first = registry.get_logger_with("x", Some(Level::Warn), Some(Arc::clone(&t1)));
    let second = registry.get_logger_with("x", Some(Level::Debug), Some(t2));

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(second.level(), Level::Warn);
    assert!(Arc::ptr_eq(&second.target(), &t1));
}

#[test]
fn setter_changes_are_seen_through_every_handle() {
    let (registry, _) = capturing_registry();
    let first = registry.get_logger_with("x", Some(Level::Fatal), None);
    let second = registry.get_logger("x");

    assert_eq!(second.error("e"), Dispatch::Filtered);
    first.set_level(Level::Error);
    assert!(second.error("e").is_recorded());
}

#[test]
fn is_instance_checks() {
    let (registry, _) = capturing_registry();
    assert!(Registry::is_instance(&registry.get_logger("x")));
    assert!(!Registry::is_instance(&json!({})));
    assert!(!Registry::is_instance(&registry));
}

#[test]
fn concurrent_first_registration_yields_one_logger() {
    let registry = Arc::new(capturing_registry().0);
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                let level = if i % 2 == 0 { Level::Warn } else { Level::Debug };
                registry.get_logger_with("shared", Some(level), None)
            })
        })
        .collect();

    let loggers: Vec<_> = handles.into_iter().filter_map(|h| h.join().ok()).collect();
    assert_eq!(loggers.len(), 8);
    assert!(loggers.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
    assert_eq!(registry.len(), 1);
}

// ============================================================================
// History
// ============================================================================

#[test]
fn history_is_shared_across_loggers_in_call_order() {
    let (registry, _) = capturing_registry();
    let history = registry.log();
    let a = registry.get_logger_with("a", Some(Level::All), None);
    let b = registry.get_logger_with("b", Some(Level::All), None);

    let _ = a.info("1");
    let _ = b.warn("2");
    let _ = a.error("3");

    let records = history.snapshot();
    let order: Vec<_> = records.iter().map(|r| (r.logger.as_str(), r.level)).collect();
    assert_eq!(order, vec![("a", Level::Info), ("b", Level::Warn), ("a", Level::Error)]);
    assert!(records.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
}

#[test]
fn parallel_logging_appends_every_record_once() {
    let registry = Arc::new(capturing_registry().0);
    let threads = 4;
    let per_thread = 250;

    let handles: Vec<_> = (0..threads)
        .map(|t| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                let logger = registry.get_logger_with(&format!("worker-{t}"), Some(Level::All), None);
                for i in 0..per_thread {
                    let _ = logger.info(i);
                }
            })
        })
        .collect();
    for handle in handles {
        assert!(handle.join().is_ok());
    }

    let history = registry.log();
    assert_eq!(history.len(), threads * per_thread);
    for t in 0..threads {
        let records = history.for_logger(&format!("worker-{t}"));
        let values: Vec<_> = records.into_iter().map(|r| r.payload).collect();
        let expected: Vec<_> = (0..per_thread).map(Payload::from).collect();
        assert_eq!(values, expected);
    }
}

#[test]
fn payload_shapes_are_recorded_as_given() {
    let (registry, _) = capturing_registry();
    let b = registry.get_logger_with("b", Some(Level::Log), None);

    let _ = b.log(json!({"hi": "there"}));
    let _ = b.debug(None::<&str>);
    let _ = b.debug(serde_json::Value::Null);
    let _ = b.info(3);
    let _ = b.warn(true);

    let payloads: Vec<_> = registry.log().snapshot().into_iter().map(|r| r.payload).collect();
    assert!(matches!(payloads[0], Payload::Structured(_)));
    assert_eq!(payloads[1], Payload::Absent);
    assert_eq!(payloads[2], Payload::Null);
    assert_eq!(payloads[3], Payload::from(3));
    assert_eq!(payloads[4], Payload::Bool(true));
}

// ============================================================================
// Target failures
// ============================================================================

struct Broken;

impl Target for Broken {
    fn output(&self, _: Level, _: &str, _: &Payload, _: DateTime<Utc>) -> Result<()> {
        Err(LumberError::Target("disk full".to_string()))
    }
}

#[test]
fn broken_target_does_not_reach_caller() {
    let (registry, _) = capturing_registry();
    let broken: SharedTarget = Arc::new(Broken);
    let logger = registry.get_logger_with("a", Some(Level::All), Some(broken));

    assert_eq!(logger.error("boom"), Dispatch::Recorded { delivered: false });
    assert_eq!(logger.fatal("bang"), Dispatch::Recorded { delivered: false });
    assert_eq!(registry.log().len(), 2);
    assert_eq!(registry.target_failures(), 2);
}

// ============================================================================
// Properties
// ============================================================================

fn any_level() -> impl Strategy<Value = Level> {
    (0u8..=8).prop_filter_map("rank in range", Level::from_rank)
}

proptest! {
    #[test]
    fn dispatch_matches_both_gates(own in any_level(), master in any_level(), level in any_level()) {
        let (registry, console) = capturing_registry();
        let (seen, target) = recorder();
        let logger = registry.get_logger_with("p", Some(own), Some(target));
        registry.set_master_level(master);

        let outcome = logger.log_at(level, "payload");
        let passes = level < Level::None && level >= own && level >= master;

        if level >= Level::None {
            prop_assert_eq!(outcome, Dispatch::Rejected);
        } else if !passes {
            prop_assert_eq!(outcome, Dispatch::Filtered);
        } else if level == Level::Trace {
            prop_assert_eq!(outcome, Dispatch::Traced { delivered: true });
            prop_assert!(!console.is_empty());
        } else {
            prop_assert_eq!(outcome, Dispatch::Recorded { delivered: true });
        }

        let recorded = passes && level != Level::Trace;
        prop_assert_eq!(registry.log().len(), usize::from(recorded));
        prop_assert_eq!(seen.len(), usize::from(recorded));
    }
}
