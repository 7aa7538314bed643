//! Recursive evaluation of one criterion and its nested `and`/`xor` lists.

use std::borrow::Cow;

use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::accessor::Accessor;
use crate::compare::loose::{is_truthy, to_text};
use crate::compare::ComparisonEngine;
use crate::error::{CriteriaError, EvaluationError, EvaluationErrorKind, Result};
use crate::operators::{Arity, Operator};
use crate::schema::{Property, PropertySchema};
use crate::validation::fuzzy::fuzzy_match;

use super::path::{ErrorPath, PathSegment};
use super::Criteria;

// ── Shared helpers ──────────────────────────────────────────────────

/// A property value, treating `null` as absent.
pub(crate) fn present<'c>(criterion: &'c Map<String, Value>, key: &str) -> Option<&'c Value> {
    criterion.get(key).filter(|v| !v.is_null())
}

/// Path segment for the entry at `index`: its `name` when it has a scalar
/// one, otherwise the index.
pub(crate) fn segment_for(schema: &PropertySchema, entry: &Value, index: usize) -> PathSegment {
    entry
        .as_object()
        .and_then(|criterion| present(criterion, schema.resolve(Property::Name)))
        .and_then(to_text)
        .map(|name| PathSegment::Name(name.into_owned()))
        .unwrap_or(PathSegment::Index(index))
}

/// Lowercased operator token; `==` when the property is absent.
pub(crate) fn operator_token(op: Option<&Value>) -> String {
    match op {
        None => Operator::Eq.token().to_string(),
        Some(value) => match to_text(value) {
            Some(text) => text.to_lowercase(),
            None => value.to_string(),
        },
    }
}

/// "Did you mean" candidate for an unknown operator token.
pub(crate) fn suggest_operator(criteria: &Criteria, token: &str) -> Option<String> {
    if Operator::from_token(token).is_some() {
        // Known but disabled: nothing better to offer.
        return None;
    }
    fuzzy_match(token, &criteria.operators().enabled_tokens()).map(str::to_string)
}

// ── Evaluation state ────────────────────────────────────────────────

/// State for a single `evaluate` call: the accessor and the path so far.
pub(super) struct Evaluation<'e, A: Accessor + ?Sized> {
    criteria: &'e Criteria,
    accessor: &'e A,
    path: ErrorPath,
}

impl<'e, A: Accessor + ?Sized> Evaluation<'e, A> {
    pub(super) fn new(criteria: &'e Criteria, accessor: &'e A) -> Self {
        Self {
            criteria,
            accessor,
            path: ErrorPath::new(),
        }
    }

    /// OR-walk a list of criteria, stopping at the first true entry.
    pub(super) fn any_of(&mut self, list: &[Value]) -> Result<bool> {
        for (index, entry) in list.iter().enumerate() {
            self.path.push(segment_for(self.criteria.schema(), entry, index));
            let pass = self.test(entry);
            self.path.pop();
            if pass? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Evaluate one criterion: comparison, then conjunction, then `invert`.
    fn test(&mut self, entry: &Value) -> Result<bool> {
        let criteria = self.criteria;
        let schema = criteria.schema();
        let Some(criterion) = entry.as_object() else {
            return Err(self.fail(EvaluationErrorKind::NotACriterion));
        };

        let arg_name = schema.resolve(Property::Arg);
        let Some(arg) = present(criterion, arg_name) else {
            return Err(self.fail(EvaluationErrorKind::MissingArgument {
                property: arg_name.to_string(),
            }));
        };
        let argument = self.fetch(Property::Arg, arg)?;

        let token = operator_token(present(criterion, schema.resolve(Property::Op)));
        let Some(op) = criteria.operators().lookup(&token) else {
            let suggestion = suggest_operator(criteria, &token);
            return Err(self.fail(EvaluationErrorKind::UnrecognizedOperator {
                operator: token,
                suggestion,
            }));
        };

        let value = present(criterion, schema.resolve(Property::Value));
        let var = present(criterion, schema.resolve(Property::Var));
        if value.is_some() && var.is_some() {
            return Err(self.fail(EvaluationErrorKind::ValueAndVar {
                value: schema.resolve(Property::Value).to_string(),
                var: schema.resolve(Property::Var).to_string(),
            }));
        }

        let base = match op.arity() {
            Arity::Unary => self.compare(&argument, op, &Value::Null)?,
            arity => {
                let resolved: Cow<'_, Value> = match (value, var) {
                    (Some(value), _) => Cow::Borrowed(value),
                    (None, Some(var)) => Cow::Owned(self.fetch(Property::Var, var)?),
                    (None, None) => {
                        return Err(self.fail(EvaluationErrorKind::NoValueOrVar {
                            value: schema.resolve(Property::Value).to_string(),
                            var: schema.resolve(Property::Var).to_string(),
                        }));
                    }
                };
                let values = match resolved.as_ref() {
                    Value::Array(items) => items.as_slice(),
                    single => std::slice::from_ref(single),
                };
                match (arity, op.inversion()) {
                    (Arity::Array, _) => ComparisonEngine::compare_array(&argument, op, values),
                    // Values are OR-joined, so a negated comparison becomes
                    // "matches none of the positive comparisons".
                    (_, Some(positive)) => !self.any_value(&argument, positive, values)?,
                    (_, None) => self.any_value(&argument, op, values)?,
                }
            }
        };

        let and = present(criterion, schema.resolve(Property::And));
        let xor = present(criterion, schema.resolve(Property::Xor));
        let combined = match (and, xor) {
            (Some(_), Some(_)) => {
                return Err(self.fail(EvaluationErrorKind::AndAndXor {
                    and: schema.resolve(Property::And).to_string(),
                    xor: schema.resolve(Property::Xor).to_string(),
                }));
            }
            (Some(list), None) => {
                let pass = self.conjunction(Property::And, list)?;
                base && pass
            }
            (None, Some(list)) => {
                let pass = self.conjunction(Property::Xor, list)?;
                base != pass
            }
            (None, None) => base,
        };

        let invert = present(criterion, schema.resolve(Property::Invert)).is_some_and(is_truthy);
        let result = combined != invert;
        trace!(path = %self.path, op = %op, base, invert, result, "criterion evaluated");
        Ok(result)
    }

    /// Evaluate a nested `and`/`xor` list as an OR-combined set.
    fn conjunction(&mut self, property: Property, list: &Value) -> Result<bool> {
        match list.as_array() {
            Some(items) => self.any_of(items),
            None => Err(self.fail(EvaluationErrorKind::InvalidConjunction {
                property: self.criteria.schema().resolve(property).to_string(),
            })),
        }
    }

    /// True when `op` holds for at least one value.
    fn any_value(&self, argument: &Value, op: Operator, values: &[Value]) -> Result<bool> {
        for value in values {
            if self.compare(argument, op, value)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn compare(&self, argument: &Value, op: Operator, value: &Value) -> Result<bool> {
        self.criteria
            .comparisons()
            .compare_scalar(argument, op, value)
            .map_err(|kind| self.fail(kind))
    }

    /// Fetch the value named by a key-valued property (`arg` or `var`).
    fn fetch(&self, property: Property, key: &Value) -> Result<Value> {
        let Some(key) = to_text(key) else {
            return Err(self.fail(EvaluationErrorKind::InvalidKey {
                property: self.criteria.schema().resolve(property).to_string(),
            }));
        };
        self.accessor.fetch(&key).map_err(CriteriaError::Accessor)
    }

    fn fail(&self, kind: EvaluationErrorKind) -> CriteriaError {
        debug!(path = %self.path, error = %kind, "criterion rejected");
        EvaluationError::new(&self.path, kind).into()
    }
}
