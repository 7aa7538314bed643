//! Renamed criterion properties and disabled operators.

mod common;

use common::{constant, eval_const, init_tracing, set};
use criteria::{Criteria, CriteriaConfig, CriteriaError, ConfigurationError};
use serde_json::{json, Value};

fn renamed() -> Criteria {
    init_tracing();
    let config = CriteriaConfig::default()
        .with_override("and", "also")
        .with_override("bogus", "foo")
        .with_override("arg", "left")
        .with_override("name", "comment")
        .with_override("op", "with")
        .with_override("value", "right")
        .with_override("var", "from")
        .with_override("xor", "except");
    Criteria::new(&config).unwrap()
}

fn fail(criteria: Value, value: Value) -> String {
    renamed()
        .evaluate(&set(criteria), &constant(value))
        .unwrap_err()
        .to_string()
}

fn config_error(config: CriteriaConfig) -> ConfigurationError {
    match Criteria::new(&config) {
        Err(CriteriaError::Configuration(err)) => err,
        Err(other) => panic!("expected a configuration error, got {other}"),
        Ok(_) => panic!("expected a configuration error"),
    }
}

// ── Renamed properties ──────────────────────────────────────

#[test]
fn renaming_is_transparent() {
    let engine = renamed();
    let renamed_set = set(json!([{"left": "x", "with": "==", "right": "4"}]));
    let default_set = set(json!([{"arg": "x", "op": "==", "value": "4"}]));
    let defaults = Criteria::default();
    for value in [json!("4"), json!(4), json!("5")] {
        assert_eq!(
            eval_const(&engine, &renamed_set, value.clone()),
            eval_const(&defaults, &default_set, value.clone()),
            "value {value}"
        );
    }
}

#[test]
fn renamed_conjunction_and_var() {
    let engine = renamed();
    let criteria = set(json!([{
        "left": "a", "from": "b",
        "also": [{"left": "c", "with": "in", "right": ["x", "y"]}],
    }]));
    assert!(engine.evaluate(&criteria, &json!({"a": 1, "b": "1", "c": "y"})).unwrap());
    assert!(!engine.evaluate(&criteria, &json!({"a": 1, "b": "1", "c": "z"})).unwrap());
}

#[test]
fn default_names_lose_their_meaning() {
    let err = fail(json!([{"arg": "prop", "op": "==", "value": "4"}]), json!("4"));
    assert_eq!(err, "At 0: Property left missing from criterion.");
}

#[test]
fn and_with_xor() {
    let err = fail(
        json!([{"left": "prop", "with": "==", "right": "4", "also": [], "except": []}]),
        json!("4"),
    );
    assert_eq!(err, "At 0: Criterion has both \"also\" and \"except\" clauses.");
}

#[test]
fn bad_operator() {
    let err = fail(json!([{"left": "prop", "with": "=*=", "right": "4"}]), json!("4"));
    assert_eq!(err, "At 0: Unrecognized operator \"=*=\".");
}

#[test]
fn named_criterion() {
    let err = fail(
        json!([{"comment": "bobtest", "with": "==", "right": "4", "from": "prop2"}]),
        json!("4"),
    );
    assert_eq!(err, "At bobtest: Property left missing from criterion.");
}

#[test]
fn nested_criterion() {
    let err = fail(
        json!([{"left": "prop", "with": "==", "right": "4", "also": [{"with": "foo"}]}]),
        json!("7"),
    );
    assert!(err.starts_with("At 0.0"), "{err}");
}

#[test]
fn no_value_or_var() {
    let err = fail(json!([{"left": "prop", "with": "=="}]), json!("4"));
    assert_eq!(err, "At 0: Criterion has no right or from property.");
}

#[test]
fn unary_without_value_or_var_is_clean() {
    let criteria = set(json!([{"left": "prop", "with": "null"}]));
    assert!(renamed().evaluate(&criteria, &constant(json!("4"))).is_ok());
}

#[test]
fn second_criterion() {
    let err = fail(
        json!([{"left": "prop", "with": "==", "right": "4"}, {"with": "foo"}]),
        json!("7"),
    );
    assert!(err.starts_with("At 1"), "{err}");
}

#[test]
fn value_with_var() {
    let err = fail(
        json!([{"left": "prop", "with": "==", "right": "4", "from": "prop2"}]),
        json!("4"),
    );
    assert_eq!(err, "At 0: Criterion can't have both right and from properties.");
}

// ── Invalid overrides ───────────────────────────────────────

#[test]
fn blank_override() {
    let err = config_error(CriteriaConfig::default().with_override("name", ""));
    assert_eq!(err.to_string(), "Error: invalid overrides name for \"name\".");
}

#[test]
fn null_override() {
    let err = config_error(CriteriaConfig::default().with_override("arg", Value::Null));
    assert!(matches!(err, ConfigurationError::InvalidName { .. }));
    assert!(err.to_string().starts_with("Error:"));
}

#[test]
fn list_override() {
    let err = config_error(CriteriaConfig::default().with_override("op", json!(["with"])));
    assert_eq!(err.to_string(), "Error: invalid overrides name for \"op\".");
}

#[test]
fn duplicate_override() {
    let err = config_error(
        CriteriaConfig::default()
            .with_override("arg", "left")
            .with_override("value", "left"),
    );
    assert_eq!(
        err.to_string(),
        "Error: duplicate label name. \"left\" used for both \"arg\" and \"value\"."
    );
}

#[test]
fn override_colliding_with_a_default_name() {
    let err = config_error(CriteriaConfig::default().with_override("name", "value"));
    assert!(matches!(
        err,
        ConfigurationError::DuplicateName { first: "name", second: "value", .. }
    ));
}

#[test]
fn swapping_two_names_is_allowed() {
    init_tracing();
    let config = CriteriaConfig::default()
        .with_override("value", "var")
        .with_override("var", "value");
    let engine = Criteria::new(&config).unwrap();
    let criteria = set(json!([{"arg": "a", "value": "b"}]));
    assert!(engine.evaluate(&criteria, &json!({"a": 2, "b": 2})).unwrap());
}

// ── Operator state ──────────────────────────────────────────

#[test]
fn disabled_operator_is_unrecognized() {
    init_tracing();
    let config = CriteriaConfig::default()
        .with_operator("regex", false)
        .with_operator("~=", false);
    let engine = Criteria::new(&config).unwrap();
    assert!(!engine.operators().is_enabled("regex"));
    assert!(engine.operators().is_enabled("!regex"));

    let err = engine
        .evaluate(
            &set(json!([{"arg": "a", "op": "regex", "value": "/x/"}])),
            &constant(json!("x")),
        )
        .unwrap_err();
    assert_eq!(err.to_string(), "At 0: Unrecognized operator \"regex\".");
    assert_eq!(err.as_evaluation().unwrap().suggestion(), None);
}

#[test]
fn operators_can_be_re_enabled() {
    init_tracing();
    let config = CriteriaConfig::default().with_operator("in", true);
    let engine = Criteria::new(&config).unwrap();
    let criteria = set(json!([{"arg": "a", "op": "in", "value": [1, 2]}]));
    assert!(eval_const(&engine, &criteria, json!(2)));
}
