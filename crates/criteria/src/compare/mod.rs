//! Scalar and collection comparison primitives.
//!
//! - [`ComparisonEngine::compare_scalar`] applies one operator to an argument
//!   and a single comparison value.
//! - [`ComparisonEngine::compare_array`] applies a collection operator
//!   (`has`, `in`, `includes` and their negations) to a whole value list.
//!
//! Loose equality and ordering live in [`loose`]; delimited regular
//! expressions in [`pattern`].

pub mod loose;
pub mod pattern;

use std::cmp::Ordering;

use serde_json::Value;

use crate::error::EvaluationErrorKind;
use crate::operators::Operator;

use loose::{contains_loose, loose_cmp, loose_eq, to_text};
use pattern::PatternCache;

/// Comparison primitives. Holds only a cache of compiled patterns.
#[derive(Debug, Default)]
pub struct ComparisonEngine {
    patterns: PatternCache,
}

impl ComparisonEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compare `argument` against one `value`. Unary operators ignore `value`.
    pub fn compare_scalar(
        &self,
        argument: &Value,
        op: Operator,
        value: &Value,
    ) -> Result<bool, EvaluationErrorKind> {
        let result = match op {
            Operator::Eq => loose_eq(argument, value),
            Operator::NotEq => !loose_eq(argument, value),
            Operator::Identical => argument == value,
            Operator::NotIdentical => argument != value,
            Operator::Gt => loose_cmp(argument, value) == Some(Ordering::Greater),
            Operator::Gte => matches!(
                loose_cmp(argument, value),
                Some(Ordering::Greater | Ordering::Equal)
            ),
            Operator::Lt => loose_cmp(argument, value) == Some(Ordering::Less),
            Operator::Lte => matches!(
                loose_cmp(argument, value),
                Some(Ordering::Less | Ordering::Equal)
            ),
            Operator::Contains | Operator::NotContains => {
                let (haystack, needle) = text_operands(op, argument, value)?;
                haystack.contains(&*needle) == (op == Operator::Contains)
            }
            Operator::Regex | Operator::NotRegex => {
                let (subject, pattern) = text_operands(op, argument, value)?;
                let re = self.patterns.get(&pattern).map_err(|reason| {
                    EvaluationErrorKind::InvalidPattern {
                        pattern: pattern.to_string(),
                        reason,
                    }
                })?;
                re.is_match(&subject) == (op == Operator::Regex)
            }
            Operator::Null => argument.is_null(),
            Operator::NotNull => !argument.is_null(),
            Operator::Has
            | Operator::NotHas
            | Operator::In
            | Operator::NotIn
            | Operator::Includes
            | Operator::NotIncludes => {
                Self::compare_array(argument, op, std::slice::from_ref(value))
            }
        };
        Ok(result)
    }

    /// Apply a collection operator to the full list of comparison values.
    ///
    /// | argument   | values | has           | in              | includes        |
    /// |------------|--------|---------------|-----------------|-----------------|
    /// | collection | 1      | value ∈ arg   | false           | value ∈ arg     |
    /// | collection | many   | arg ∩ values  | arg ⊆ values    | values ⊆ arg    |
    /// | scalar     | any    | arg ∈ values  | arg ∈ values    | false           |
    ///
    /// Intersections count argument elements found in `values`. Negated
    /// operators invert the positive result.
    pub fn compare_array(argument: &Value, op: Operator, values: &[Value]) -> bool {
        let (base, negated) = op.base();
        let result = match argument {
            Value::Array(items) if values.len() == 1 => match base {
                Operator::In => false,
                // has, includes
                _ => contains_loose(items, &values[0]),
            },
            Value::Array(items) => {
                let shared = items
                    .iter()
                    .filter(|item| contains_loose(values, item))
                    .count();
                match base {
                    Operator::In => shared == items.len(),
                    Operator::Includes => shared == values.len(),
                    _ => shared != 0,
                }
            }
            scalar => match base {
                Operator::Includes => false,
                _ => contains_loose(values, scalar),
            },
        };
        result != negated
    }
}

fn text_operands<'a>(
    op: Operator,
    argument: &'a Value,
    value: &'a Value,
) -> Result<(std::borrow::Cow<'a, str>, std::borrow::Cow<'a, str>), EvaluationErrorKind> {
    match (to_text(argument), to_text(value)) {
        (Some(a), Some(v)) => Ok((a, v)),
        _ => Err(EvaluationErrorKind::NonTextOperand {
            operator: op.token().to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn scalar(argument: Value, op: Operator, value: Value) -> bool {
        ComparisonEngine::new()
            .compare_scalar(&argument, op, &value)
            .unwrap()
    }

    fn values(v: Value) -> Vec<Value> {
        match v {
            Value::Array(items) => items,
            other => vec![other],
        }
    }

    #[test]
    fn equality_operators() {
        assert!(scalar(json!("4"), Operator::Eq, json!(4)));
        assert!(!scalar(json!("4"), Operator::NotEq, json!(4)));
        assert!(scalar(json!(4), Operator::Identical, json!(4)));
        assert!(!scalar(json!("4"), Operator::Identical, json!(4)));
        assert!(scalar(json!("4"), Operator::NotIdentical, json!(4)));
        assert!(!scalar(json!(4), Operator::Identical, json!(4.0)));
    }

    #[test]
    fn ordering_operators() {
        assert!(scalar(json!(21), Operator::Gt, json!(18)));
        assert!(!scalar(json!(10), Operator::Gt, json!(18)));
        assert!(scalar(json!("4"), Operator::Gte, json!("4")));
        assert!(scalar(json!("2"), Operator::Lt, json!("4")));
        assert!(scalar(json!("4"), Operator::Lte, json!("4")));
        assert!(!scalar(json!("6"), Operator::Lte, json!("4")));
    }

    #[test]
    fn ordering_on_objects_is_always_false() {
        for op in [Operator::Gt, Operator::Gte, Operator::Lt, Operator::Lte] {
            assert!(!scalar(json!({"a": 1}), op, json!({"a": 1})));
        }
    }

    #[test]
    fn contains_operators() {
        assert!(scalar(json!("Hello Bob"), Operator::Contains, json!("Bob")));
        assert!(!scalar(json!("Hello Ted"), Operator::Contains, json!("Bob")));
        assert!(scalar(json!("Hello Ted"), Operator::NotContains, json!("Bob")));
        assert!(scalar(json!(1234), Operator::Contains, json!(23)));
        assert!(scalar(json!("anything"), Operator::Contains, json!("")));
    }

    #[test]
    fn contains_rejects_lists() {
        let err = ComparisonEngine::new()
            .compare_scalar(&json!(["a"]), Operator::Contains, &json!("a"))
            .unwrap_err();
        assert_eq!(err.to_string(), "Operator \"contains\" needs text operands.");
    }

    #[test]
    fn regex_operators() {
        assert!(scalar(json!("4"), Operator::Regex, json!("![0-9]!")));
        assert!(!scalar(json!("x"), Operator::Regex, json!("![0-9]!")));
        assert!(scalar(json!("x"), Operator::NotRegex, json!("![0-9]!")));
    }

    #[test]
    fn invalid_regex_is_reported() {
        let err = ComparisonEngine::new()
            .compare_scalar(&json!("x"), Operator::Regex, &json!("/[/"))
            .unwrap_err();
        assert!(matches!(err, EvaluationErrorKind::InvalidPattern { .. }));
    }

    #[test]
    fn null_operators_ignore_value() {
        assert!(scalar(Value::Null, Operator::Null, json!("ignored")));
        assert!(!scalar(json!(""), Operator::Null, Value::Null));
        assert!(scalar(json!(0), Operator::NotNull, Value::Null));
    }

    #[test]
    fn collection_argument_single_value() {
        let arg = json!(["y", "z"]);
        let one = values(json!("y"));
        assert!(ComparisonEngine::compare_array(&arg, Operator::Has, &one));
        assert!(!ComparisonEngine::compare_array(&arg, Operator::In, &one));
        assert!(ComparisonEngine::compare_array(&arg, Operator::Includes, &one));
        assert!(ComparisonEngine::compare_array(&arg, Operator::NotIn, &one));
    }

    #[test]
    fn collection_argument_many_values() {
        let vals = values(json!(["0", "4", "8"]));
        assert!(ComparisonEngine::compare_array(&json!(["4", "9"]), Operator::Has, &vals));
        assert!(!ComparisonEngine::compare_array(&json!(["2"]), Operator::Has, &vals));
        assert!(ComparisonEngine::compare_array(&json!(["4", "8"]), Operator::In, &vals));
        assert!(!ComparisonEngine::compare_array(&json!(["2", "4"]), Operator::In, &vals));
        assert!(ComparisonEngine::compare_array(&json!(["0", "4", "8", "9"]), Operator::Includes, &vals));
        assert!(!ComparisonEngine::compare_array(&json!(["4", "8"]), Operator::Includes, &vals));
        assert!(ComparisonEngine::compare_array(&json!(["2"]), Operator::NotHas, &vals));
    }

    #[test]
    fn scalar_argument() {
        let one = values(json!("4"));
        let many = values(json!(["0", "4", "8"]));
        for vals in [&one, &many] {
            assert!(ComparisonEngine::compare_array(&json!("4"), Operator::Has, vals));
            assert!(ComparisonEngine::compare_array(&json!(4), Operator::In, vals));
            assert!(!ComparisonEngine::compare_array(&json!("4"), Operator::Includes, vals));
            assert!(!ComparisonEngine::compare_array(&json!("2"), Operator::Has, vals));
            assert!(ComparisonEngine::compare_array(&json!("2"), Operator::NotIn, vals));
            assert!(ComparisonEngine::compare_array(&json!("4"), Operator::NotIncludes, vals));
        }
    }

    #[test]
    fn array_operator_through_scalar_entry_point() {
        assert!(scalar(json!(["a", "b"]), Operator::Has, json!("b")));
        assert!(!scalar(json!(["a", "b"]), Operator::In, json!("b")));
    }
}
