//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use criteria::{from_fn, Accessor, AccessorError, Criteria};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

/// Route engine logs to the test output when `RUST_LOG` is set.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Parse a `json!` array literal into a criteria set.
pub fn set(criteria: Value) -> Vec<Value> {
    match criteria {
        Value::Array(items) => items,
        other => panic!("criteria set must be an array, got {other}"),
    }
}

/// Accessor that returns the same value for every key.
pub fn constant(value: Value) -> impl Accessor {
    from_fn(move |_key: &str| Ok::<_, AccessorError>(value.clone()))
}

/// Evaluate with a constant accessor, panicking on error.
pub fn eval_const(engine: &Criteria, criteria: &[Value], value: Value) -> bool {
    engine
        .evaluate(criteria, &constant(value))
        .unwrap_or_else(|e| panic!("evaluation failed: {e}"))
}
