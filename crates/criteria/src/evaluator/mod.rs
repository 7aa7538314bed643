//! Criteria evaluator: the engine that decides a criteria set.
//!
//! A criteria set is a list of criterion objects joined by an implicit OR.
//! Each criterion fetches its argument through the caller's [`Accessor`],
//! compares it with a literal `value` or a fetched `var`, optionally
//! combines the result with a nested `and`/`xor` list, and may be inverted.
//!
//! Faults abort the whole call with an [`EvaluationError`] whose path names
//! the offending criterion.
//!
//! [`EvaluationError`]: crate::error::EvaluationError

mod criterion;
mod path;

pub use path::{ErrorPath, PathSegment};

pub(crate) use criterion::{operator_token, present, segment_for, suggest_operator};

use serde_json::Value;
use tracing::debug;

use crate::accessor::Accessor;
use crate::compare::ComparisonEngine;
use crate::config::CriteriaConfig;
use crate::error::Result;
use crate::operators::OperatorTable;
use crate::schema::PropertySchema;

use criterion::Evaluation;

// ── Engine ──────────────────────────────────────────────────────────

/// Evaluates criteria sets under one property schema and operator table.
///
/// The schema and operator table are fixed at construction. Each call to
/// [`Criteria::evaluate`] carries its own accessor and path, so one engine
/// can serve concurrent callers.
#[derive(Debug, Default)]
pub struct Criteria {
    schema: PropertySchema,
    operators: OperatorTable,
    comparisons: ComparisonEngine,
}

impl Criteria {
    /// Build an engine from configuration.
    ///
    /// Fails with a configuration error on blank, non-scalar or duplicate
    /// property-name overrides.
    pub fn new(config: &CriteriaConfig) -> Result<Self> {
        let schema = PropertySchema::new(&config.overrides)?;
        let operators = OperatorTable::new(&config.operator_state);
        Ok(Self {
            schema,
            operators,
            comparisons: ComparisonEngine::new(),
        })
    }

    pub fn schema(&self) -> &PropertySchema {
        &self.schema
    }

    pub fn operators(&self) -> &OperatorTable {
        &self.operators
    }

    pub(crate) fn comparisons(&self) -> &ComparisonEngine {
        &self.comparisons
    }

    /// Evaluate a criteria set.
    ///
    /// Returns `true` on the first criterion that holds, `false` when none
    /// do or the set is empty.
    ///
    /// ```
    /// use criteria::Criteria;
    /// use serde_json::json;
    ///
    /// let engine = Criteria::default();
    /// let set = vec![json!({"arg": "age", "op": ">", "value": 18})];
    /// assert!(engine.evaluate(&set, &json!({"age": 21})).unwrap());
    /// assert!(!engine.evaluate(&set, &json!({"age": 10})).unwrap());
    /// ```
    pub fn evaluate<A: Accessor + ?Sized>(&self, criteria: &[Value], accessor: &A) -> Result<bool> {
        debug!(criteria = criteria.len(), "evaluating criteria set");
        let result = Evaluation::new(self, accessor).any_of(criteria)?;
        debug!(result, "criteria set evaluated");
        Ok(result)
    }
}
