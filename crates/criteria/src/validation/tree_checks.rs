//! Per-criterion structural checks, applied recursively to nested lists.

use serde_json::{Map, Value};

use crate::compare::loose::to_text;
use crate::compare::pattern;
use crate::error::EvaluationErrorKind;
use crate::evaluator::{operator_token, present, segment_for, suggest_operator, Criteria, ErrorPath};
use crate::operators::{Arity, Operator};
use crate::schema::Property;

use super::fuzzy::fuzzy_match;
use super::ValidationResult;

// ── Lists ───────────────────────────────────────────────────────────

pub(super) fn validate_list(
    criteria: &Criteria,
    list: &[Value],
    path: &mut ErrorPath,
    result: &mut ValidationResult,
) {
    for (index, entry) in list.iter().enumerate() {
        path.push(segment_for(criteria.schema(), entry, index));
        validate_criterion(criteria, entry, path, result);
        path.pop();
    }
}

// ── Single criterion ────────────────────────────────────────────────

fn validate_criterion(
    criteria: &Criteria,
    entry: &Value,
    path: &mut ErrorPath,
    result: &mut ValidationResult,
) {
    let Some(criterion) = entry.as_object() else {
        result.error(path, EvaluationErrorKind::NotACriterion);
        return;
    };
    let schema = criteria.schema();

    check_unknown_properties(criteria, criterion, path, result);

    let arg_name = schema.resolve(Property::Arg);
    match present(criterion, arg_name) {
        None => result.error(
            path,
            EvaluationErrorKind::MissingArgument {
                property: arg_name.to_string(),
            },
        ),
        Some(arg) => check_key(criteria, Property::Arg, arg, path, result),
    }

    let token = operator_token(present(criterion, schema.resolve(Property::Op)));
    let op = criteria.operators().lookup(&token);
    if op.is_none() {
        let suggestion = suggest_operator(criteria, &token);
        result.error(
            path,
            EvaluationErrorKind::UnrecognizedOperator {
                operator: token,
                suggestion,
            },
        );
    }

    check_comparison_values(criteria, criterion, op, path, result);
    check_conjunctions(criteria, criterion, path, result);
}

fn check_unknown_properties(
    criteria: &Criteria,
    criterion: &Map<String, Value>,
    path: &ErrorPath,
    result: &mut ValidationResult,
) {
    let names: Vec<&str> = criteria.schema().names().collect();
    for key in criterion.keys() {
        if criteria.schema().property_for(key).is_none() {
            result.warn(
                path,
                format!("Unrecognized property \"{key}\" is ignored."),
                fuzzy_match(key, &names).map(str::to_string),
            );
        }
    }
}

fn check_key(
    criteria: &Criteria,
    property: Property,
    key: &Value,
    path: &ErrorPath,
    result: &mut ValidationResult,
) {
    if to_text(key).is_none() {
        result.error(
            path,
            EvaluationErrorKind::InvalidKey {
                property: criteria.schema().resolve(property).to_string(),
            },
        );
    }
}

// ── Comparison values ───────────────────────────────────────────────

fn check_comparison_values(
    criteria: &Criteria,
    criterion: &Map<String, Value>,
    op: Option<Operator>,
    path: &ErrorPath,
    result: &mut ValidationResult,
) {
    let schema = criteria.schema();
    let value_name = schema.resolve(Property::Value);
    let var_name = schema.resolve(Property::Var);
    let value = present(criterion, value_name);
    let var = present(criterion, var_name);

    if value.is_some() && var.is_some() {
        result.error(
            path,
            EvaluationErrorKind::ValueAndVar {
                value: value_name.to_string(),
                var: var_name.to_string(),
            },
        );
    }
    if let Some(var) = var {
        check_key(criteria, Property::Var, var, path, result);
    }

    // Everything below depends on knowing the operator.
    let Some(op) = op else {
        return;
    };
    if op.arity() == Arity::Unary {
        if value.is_some() || var.is_some() {
            result.warn(
                path,
                format!("Operator \"{op}\" ignores {value_name} and {var_name}."),
                None,
            );
        }
        return;
    }
    if value.is_none() && var.is_none() {
        result.error(
            path,
            EvaluationErrorKind::NoValueOrVar {
                value: value_name.to_string(),
                var: var_name.to_string(),
            },
        );
    }

    let Some(value) = value else {
        return;
    };
    let literals = match value {
        Value::Array(items) => items.as_slice(),
        single => std::slice::from_ref(single),
    };
    let (base, _) = op.base();
    if matches!(base, Operator::Contains | Operator::Regex) {
        for literal in literals {
            let Some(text) = to_text(literal) else {
                result.error(
                    path,
                    EvaluationErrorKind::NonTextOperand {
                        operator: op.token().to_string(),
                    },
                );
                continue;
            };
            if base == Operator::Regex {
                if let Err(reason) = pattern::compile(&text) {
                    result.error(
                        path,
                        EvaluationErrorKind::InvalidPattern {
                            pattern: text.into_owned(),
                            reason,
                        },
                    );
                }
            }
        }
    }
}

// ── Conjunctions ────────────────────────────────────────────────────

fn check_conjunctions(
    criteria: &Criteria,
    criterion: &Map<String, Value>,
    path: &mut ErrorPath,
    result: &mut ValidationResult,
) {
    let schema = criteria.schema();
    let and = present(criterion, schema.resolve(Property::And));
    let xor = present(criterion, schema.resolve(Property::Xor));
    if and.is_some() && xor.is_some() {
        result.error(
            path,
            EvaluationErrorKind::AndAndXor {
                and: schema.resolve(Property::And).to_string(),
                xor: schema.resolve(Property::Xor).to_string(),
            },
        );
    }

    for (property, list) in [(Property::And, and), (Property::Xor, xor)] {
        let Some(list) = list else {
            continue;
        };
        let name = schema.resolve(property);
        match list.as_array() {
            None => result.error(
                path,
                EvaluationErrorKind::InvalidConjunction {
                    property: name.to_string(),
                },
            ),
            Some(items) => {
                if items.is_empty() && property == Property::And {
                    result.warn(path, format!("Empty \"{name}\" list never matches."), None);
                }
                validate_list(criteria, items, path, result);
            }
        }
    }
}
