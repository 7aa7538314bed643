//! Caller-supplied value lookup.
//!
//! An [`Accessor`] resolves a key named by a criterion (`arg` or `var`) to a
//! value. Maps and JSON objects work directly; closures go through
//! [`from_fn`].

use std::collections::{BTreeMap, HashMap};

use serde_json::{Map, Value};

/// Error type an accessor may fail with. Returned to the caller as-is.
pub type AccessorError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Resolves a key to the value it names.
pub trait Accessor {
    fn fetch(&self, key: &str) -> Result<Value, AccessorError>;
}

impl<A: Accessor + ?Sized> Accessor for &A {
    fn fetch(&self, key: &str) -> Result<Value, AccessorError> {
        (**self).fetch(key)
    }
}

/// Accessor backed by a closure.
pub struct FnAccessor<F>(F);

/// Wrap a closure as an [`Accessor`].
///
/// ```
/// use criteria::accessor::{from_fn, Accessor};
/// use serde_json::json;
///
/// let accessor = from_fn(|key| Ok(json!(key.len())));
/// assert_eq!(accessor.fetch("four").unwrap(), json!(4));
/// ```
pub fn from_fn<F>(f: F) -> FnAccessor<F>
where
    F: Fn(&str) -> Result<Value, AccessorError>,
{
    FnAccessor(f)
}

impl<F> Accessor for FnAccessor<F>
where
    F: Fn(&str) -> Result<Value, AccessorError>,
{
    fn fetch(&self, key: &str) -> Result<Value, AccessorError> {
        (self.0)(key)
    }
}

// Missing keys resolve to null in every map-backed accessor.

impl Accessor for Map<String, Value> {
    fn fetch(&self, key: &str) -> Result<Value, AccessorError> {
        Ok(self.get(key).cloned().unwrap_or(Value::Null))
    }
}

impl<S: std::hash::BuildHasher> Accessor for HashMap<String, Value, S> {
    fn fetch(&self, key: &str) -> Result<Value, AccessorError> {
        Ok(self.get(key).cloned().unwrap_or(Value::Null))
    }
}

impl Accessor for BTreeMap<String, Value> {
    fn fetch(&self, key: &str) -> Result<Value, AccessorError> {
        Ok(self.get(key).cloned().unwrap_or(Value::Null))
    }
}

/// Objects are looked up by key; any other value answers every key.
impl Accessor for Value {
    fn fetch(&self, key: &str) -> Result<Value, AccessorError> {
        match self {
            Value::Object(map) => map.fetch(key),
            other => Ok(other.clone()),
        }
    }
}
