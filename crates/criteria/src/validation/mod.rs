//! Static validation of criteria trees with structured errors and suggestions.
//!
//! Unlike [`Criteria::evaluate`], validation needs no accessor, never stops at
//! the first problem, and walks every branch of the tree. Errors are the
//! faults evaluation would raise; warnings flag likely mistakes that still
//! evaluate.

pub(crate) mod fuzzy;
mod tree_checks;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::EvaluationErrorKind;
use crate::evaluator::{Criteria, ErrorPath};

// ── Result types ────────────────────────────────────────────────────

/// Overall validation outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

/// A fault that would abort evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationError {
    /// Dot-joined criterion path, e.g. `"0.age"`.
    pub path: String,
    pub message: String,
    /// Optional "Did you mean …?" suggestion.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

/// A non-blocking advisory warning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl ValidationResult {
    pub(crate) fn new() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub(crate) fn error(&mut self, path: &ErrorPath, kind: EvaluationErrorKind) {
        let suggestion = match &kind {
            EvaluationErrorKind::UnrecognizedOperator { suggestion, .. } => suggestion.clone(),
            _ => None,
        };
        self.valid = false;
        self.errors.push(ValidationError {
            path: path.to_string(),
            message: kind.to_string(),
            suggestion,
        });
    }

    pub(crate) fn warn(
        &mut self,
        path: &ErrorPath,
        message: impl Into<String>,
        suggestion: Option<String>,
    ) {
        self.warnings.push(ValidationWarning {
            path: path.to_string(),
            message: message.into(),
            suggestion,
        });
    }
}

// ── Public API ──────────────────────────────────────────────────────

impl Criteria {
    /// Check a criteria set for structural problems without evaluating it.
    pub fn validate(&self, criteria: &[Value]) -> ValidationResult {
        let mut result = ValidationResult::new();
        let mut path = ErrorPath::new();
        tree_checks::validate_list(self, criteria, &mut path, &mut result);
        result
    }
}
