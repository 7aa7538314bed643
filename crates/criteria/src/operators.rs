//! Operator catalog: tokens, arity classes and per-engine enabled state.

use std::collections::BTreeMap;
use std::fmt;

use tracing::debug;

/// How an operator consumes its comparison value(s).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Tests the argument alone; `value`/`var` are ignored.
    Unary,
    /// Scalar comparison, applied to each value in a list.
    Binary,
    /// Collection operator, applied to the whole value list.
    Array,
}

/// A recognized comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Eq,
    NotEq,
    Identical,
    NotIdentical,
    Gt,
    Gte,
    Lt,
    Lte,
    Contains,
    NotContains,
    Regex,
    NotRegex,
    Has,
    NotHas,
    In,
    NotIn,
    Includes,
    NotIncludes,
    Null,
    NotNull,
}

impl Operator {
    pub const ALL: [Operator; 20] = [
        Operator::Eq,
        Operator::NotEq,
        Operator::Identical,
        Operator::NotIdentical,
        Operator::Gt,
        Operator::Gte,
        Operator::Lt,
        Operator::Lte,
        Operator::Contains,
        Operator::NotContains,
        Operator::Regex,
        Operator::NotRegex,
        Operator::Has,
        Operator::NotHas,
        Operator::In,
        Operator::NotIn,
        Operator::Includes,
        Operator::NotIncludes,
        Operator::Null,
        Operator::NotNull,
    ];

    /// Token as written in a criterion.
    pub const fn token(self) -> &'static str {
        match self {
            Operator::Eq => "==",
            Operator::NotEq => "!=",
            Operator::Identical => "===",
            Operator::NotIdentical => "!==",
            Operator::Gt => ">",
            Operator::Gte => ">=",
            Operator::Lt => "<",
            Operator::Lte => "<=",
            Operator::Contains => "contains",
            Operator::NotContains => "!contains",
            Operator::Regex => "regex",
            Operator::NotRegex => "!regex",
            Operator::Has => "has",
            Operator::NotHas => "!has",
            Operator::In => "in",
            Operator::NotIn => "!in",
            Operator::Includes => "includes",
            Operator::NotIncludes => "!includes",
            Operator::Null => "null",
            Operator::NotNull => "!null",
        }
    }

    /// Parse an exact (already lowercased) token.
    pub fn from_token(token: &str) -> Option<Operator> {
        Operator::ALL.into_iter().find(|op| op.token() == token)
    }

    pub const fn arity(self) -> Arity {
        match self {
            Operator::Has
            | Operator::NotHas
            | Operator::In
            | Operator::NotIn
            | Operator::Includes
            | Operator::NotIncludes => Arity::Array,
            Operator::Null | Operator::NotNull => Arity::Unary,
            _ => Arity::Binary,
        }
    }

    /// Positive counterpart of a negated binary operator.
    ///
    /// Used to rewrite a negated comparison against a value list with
    /// De Morgan's law. Only `!=`, `!==`, `!contains` and `!regex` invert.
    pub const fn inversion(self) -> Option<Operator> {
        match self {
            Operator::NotEq => Some(Operator::Eq),
            Operator::NotIdentical => Some(Operator::Identical),
            Operator::NotContains => Some(Operator::Contains),
            Operator::NotRegex => Some(Operator::Regex),
            _ => None,
        }
    }

    /// Split a negated operator into its positive base; `(base, negated)`.
    pub const fn base(self) -> (Operator, bool) {
        match self {
            Operator::NotEq => (Operator::Eq, true),
            Operator::NotIdentical => (Operator::Identical, true),
            Operator::NotContains => (Operator::Contains, true),
            Operator::NotRegex => (Operator::Regex, true),
            Operator::NotHas => (Operator::Has, true),
            Operator::NotIn => (Operator::In, true),
            Operator::NotIncludes => (Operator::Includes, true),
            Operator::NotNull => (Operator::Null, true),
            op => (op, false),
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// The operator catalog with per-engine enabled flags.
///
/// Tokens can be disabled but never added or removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorTable {
    enabled: [bool; 20],
}

impl Default for OperatorTable {
    fn default() -> Self {
        Self { enabled: [true; 20] }
    }
}

impl OperatorTable {
    /// Start with every operator enabled, then apply `state` to known tokens.
    pub fn new(state: &BTreeMap<String, bool>) -> Self {
        let mut table = Self::default();
        for (token, &enabled) in state {
            match Operator::from_token(token) {
                Some(op) => table.enabled[op.index()] = enabled,
                None => debug!(token = %token, "ignoring state for unknown operator"),
            }
        }
        table
    }

    /// Arity class of a token, or `None` when the token is unknown.
    pub fn classify(&self, token: &str) -> Option<Arity> {
        Operator::from_token(token).map(Operator::arity)
    }

    /// Whether a token is known and enabled.
    pub fn is_enabled(&self, token: &str) -> bool {
        Operator::from_token(token).is_some_and(|op| self.enabled[op.index()])
    }

    /// Resolve a token to an operator usable by this engine.
    pub fn lookup(&self, token: &str) -> Option<Operator> {
        Operator::from_token(token).filter(|op| self.enabled[op.index()])
    }

    /// Tokens currently accepted, in catalog order.
    pub fn enabled_tokens(&self) -> Vec<&'static str> {
        Operator::ALL
            .into_iter()
            .filter(|op| self.enabled[op.index()])
            .map(Operator::token)
            .collect()
    }
}
