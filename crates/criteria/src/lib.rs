//! Recursive criteria evaluation over caller-supplied values.
//!
//! This crate provides:
//! - A criteria engine that decides lists of criterion objects (implicit OR)
//!   with nested `and`/`xor` lists and inversion
//! - Twenty comparison operators with loose, type-juggling semantics
//! - Caller-supplied value lookup through the [`Accessor`] trait
//! - Renamable criterion properties and per-operator enable flags
//! - Static validation with "did you mean" suggestions
//!
//! ```
//! use criteria::{Criteria, CriteriaConfig};
//! use serde_json::json;
//!
//! let config = CriteriaConfig::default().with_override("arg", "field");
//! let engine = Criteria::new(&config).unwrap();
//! let set = vec![json!({
//!     "field": "role",
//!     "op": "in",
//!     "value": ["admin", "owner"],
//!     "and": [{"field": "disabled", "op": "null"}],
//! })];
//! assert!(engine.evaluate(&set, &json!({"role": "owner"})).unwrap());
//! ```

pub mod accessor;
pub mod compare;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod operators;
pub mod schema;
pub mod validation;

pub use accessor::{from_fn, Accessor, AccessorError};
pub use config::CriteriaConfig;
pub use error::{ConfigurationError, CriteriaError, EvaluationError, EvaluationErrorKind, Result};
pub use evaluator::{Criteria, ErrorPath, PathSegment};
pub use operators::{Arity, Operator, OperatorTable};
pub use schema::{Property, PropertySchema};
pub use validation::ValidationResult;
