//! Engine configuration: property-name overrides and operator state.
//!
//! ```yaml
//! overrides:
//!   arg: left
//!   value: right
//! operatorState:
//!   regex: false
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ConfigurationError;

/// Construction-time settings for a [`Criteria`](crate::Criteria) engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct CriteriaConfig {
    /// Canonical property → actual key name. Validated when the engine is
    /// built, so any JSON value is accepted here.
    #[serde(default)]
    pub overrides: BTreeMap<String, Value>,
    /// Operator token → enabled. Unknown tokens are ignored.
    #[serde(default)]
    pub operator_state: BTreeMap<String, bool>,
}

impl CriteriaConfig {
    /// Parse a YAML (or JSON) configuration document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigurationError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Read and parse a configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigurationError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigurationError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&text)
    }

    /// Rename a canonical property.
    pub fn with_override(mut self, canonical: &str, actual: impl Into<Value>) -> Self {
        self.overrides.insert(canonical.to_string(), actual.into());
        self
    }

    /// Enable or disable an operator token.
    pub fn with_operator(mut self, token: &str, enabled: bool) -> Self {
        self.operator_state.insert(token.to_string(), enabled);
        self
    }
}
