//! Error types for engine construction and criteria evaluation.

use std::path::PathBuf;

use crate::accessor::AccessorError;
use crate::evaluator::ErrorPath;

/// Errors raised while building an engine or evaluating a criteria set.
#[derive(Debug, thiserror::Error)]
pub enum CriteriaError {
    /// Construction-time fault in the property schema or config source.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// Structural fault in a criterion, located by its path.
    #[error(transparent)]
    Evaluation(#[from] EvaluationError),

    /// Failure raised by the caller's accessor, passed through untouched.
    #[error(transparent)]
    Accessor(AccessorError),
}

impl CriteriaError {
    /// The evaluation error, if this is one.
    pub fn as_evaluation(&self) -> Option<&EvaluationError> {
        match self {
            CriteriaError::Evaluation(e) => Some(e),
            _ => None,
        }
    }
}

/// Result alias for criteria operations.
pub type Result<T> = std::result::Result<T, CriteriaError>;

/// Invalid engine configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    /// An override value is not a non-empty scalar.
    #[error("Error: invalid {label} name for \"{key}\".")]
    InvalidName { label: &'static str, key: String },

    /// Two canonical properties resolve to the same actual name.
    #[error("Error: duplicate label name. \"{actual}\" used for both \"{first}\" and \"{second}\".")]
    DuplicateName {
        actual: String,
        first: &'static str,
        second: &'static str,
    },

    /// Configuration file could not be read.
    #[error("Error: could not read configuration {}: {source}.", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration document could not be deserialized.
    #[error("Error: invalid configuration: {0}.")]
    Parse(#[from] serde_yaml::Error),
}

/// A structural fault found while evaluating one criterion.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("At {path}: {kind}")]
pub struct EvaluationError {
    /// Names or indices leading to the offending criterion.
    pub path: ErrorPath,
    pub kind: EvaluationErrorKind,
}

impl EvaluationError {
    pub(crate) fn new(path: &ErrorPath, kind: EvaluationErrorKind) -> Self {
        Self {
            path: path.clone(),
            kind,
        }
    }

    /// Closest known operator for an unrecognized one, if any is close enough.
    pub fn suggestion(&self) -> Option<&str> {
        match &self.kind {
            EvaluationErrorKind::UnrecognizedOperator { suggestion, .. } => suggestion.as_deref(),
            _ => None,
        }
    }
}

/// What went wrong in a criterion. Property names are the resolved (actual)
/// names so messages match what the caller wrote.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EvaluationErrorKind {
    #[error("Criterion must be an object.")]
    NotACriterion,

    #[error("Property {property} missing from criterion.")]
    MissingArgument { property: String },

    #[error("Property {property} must name a single key.")]
    InvalidKey { property: String },

    #[error("Unrecognized operator \"{operator}\".")]
    UnrecognizedOperator {
        operator: String,
        suggestion: Option<String>,
    },

    #[error("Criterion can't have both {value} and {var} properties.")]
    ValueAndVar { value: String, var: String },

    #[error("Criterion has no {value} or {var} property.")]
    NoValueOrVar { value: String, var: String },

    #[error("Criterion has both \"{and}\" and \"{xor}\" clauses.")]
    AndAndXor { and: String, xor: String },

    #[error("Property {property} must be a list of criteria.")]
    InvalidConjunction { property: String },

    #[error("Operator \"{operator}\" needs text operands.")]
    NonTextOperand { operator: String },

    #[error("Invalid pattern \"{pattern}\": {reason}.")]
    InvalidPattern { pattern: String, reason: String },
}
