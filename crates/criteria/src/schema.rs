//! Property schema: canonical criterion keys and their configured names.
//!
//! Every criterion property has a canonical name (`arg`, `op`, ...) that can
//! be remapped to a different key at construction. The mapping is a fixed
//! table indexed by [`Property`], validated once and never mutated.

use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value;
use tracing::debug;

use crate::error::ConfigurationError;

/// The recognized criterion properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Property {
    And,
    Arg,
    Invert,
    Name,
    Op,
    Value,
    Var,
    Xor,
}

impl Property {
    /// All properties, in table order.
    pub const ALL: [Property; 8] = [
        Property::And,
        Property::Arg,
        Property::Invert,
        Property::Name,
        Property::Op,
        Property::Value,
        Property::Var,
        Property::Xor,
    ];

    /// Canonical key name.
    pub const fn canonical(self) -> &'static str {
        match self {
            Property::And => "and",
            Property::Arg => "arg",
            Property::Invert => "invert",
            Property::Name => "name",
            Property::Op => "op",
            Property::Value => "value",
            Property::Var => "var",
            Property::Xor => "xor",
        }
    }

    /// Look up a property by its canonical key name.
    pub fn from_canonical(name: &str) -> Option<Property> {
        Property::ALL.into_iter().find(|p| p.canonical() == name)
    }

    const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical())
    }
}

/// Resolved canonical → actual key names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertySchema {
    names: [String; 8],
}

impl Default for PropertySchema {
    fn default() -> Self {
        Self {
            names: Property::ALL.map(|p| p.canonical().to_string()),
        }
    }
}

impl PropertySchema {
    /// Build a schema from canonical-key overrides.
    ///
    /// Unknown canonical keys are dropped. Each override must be a non-empty
    /// scalar, and no two properties may end up sharing a name.
    pub fn new(overrides: &BTreeMap<String, Value>) -> Result<Self, ConfigurationError> {
        let mut names = Property::ALL.map(|p| p.canonical().to_string());

        for (key, value) in overrides {
            let Some(property) = Property::from_canonical(key) else {
                debug!(key = %key, "dropping override for unknown property");
                continue;
            };
            let name = scalar_name(value).ok_or_else(|| ConfigurationError::InvalidName {
                label: "overrides",
                key: key.clone(),
            })?;
            names[property.index()] = name;
        }

        for (i, first) in Property::ALL.iter().enumerate() {
            for second in &Property::ALL[i + 1..] {
                if names[first.index()] == names[second.index()] {
                    return Err(ConfigurationError::DuplicateName {
                        actual: names[first.index()].clone(),
                        first: first.canonical(),
                        second: second.canonical(),
                    });
                }
            }
        }

        Ok(Self { names })
    }

    /// Actual key name used for a property.
    pub fn resolve(&self, property: Property) -> &str {
        &self.names[property.index()]
    }

    /// Actual key name for a canonical key, if the key is known.
    pub fn resolve_canonical(&self, canonical: &str) -> Option<&str> {
        Property::from_canonical(canonical).map(|p| self.resolve(p))
    }

    /// The property an actual key name stands for, if any.
    pub fn property_for(&self, actual: &str) -> Option<Property> {
        Property::ALL
            .into_iter()
            .find(|p| self.names[p.index()] == actual)
    }

    /// All actual names, in table order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

/// Text form of a non-empty scalar override.
fn scalar_name(value: &Value) -> Option<String> {
    let name = match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(true) => "1".to_string(),
        _ => return None,
    };
    (!name.is_empty()).then_some(name)
}
