//! Resource data handed between the host and a resource implementation
//!
//! `ResourceData` carries the resource id the host persists, the attributes
//! being written (planned config on create/update, observed values after a
//! read) and, when available, the prior state used for change detection.

use crate::error::{ProviderError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Attributes and identity of a single resource instance
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceData {
    /// Vendor-side identifier; `None` means the resource does not exist
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,

    /// Current attribute values
    #[serde(default)]
    attributes: Map<String, Value>,

    /// Attributes as last persisted by the host
    #[serde(skip)]
    prior: Option<Map<String, Value>>,
}

impl ResourceData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a configuration object
    pub fn from_config(config: Value) -> Result<Self> {
        match config {
            Value::Object(attributes) => Ok(Self {
                id: None,
                attributes,
                prior: None,
            }),
            Value::Null => Ok(Self::default()),
            other => Err(ProviderError::InvalidAttribute {
                key: "<root>".to_string(),
                message: format!("expected an object, got {}", type_name(&other)),
            }),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Attach the prior state so `has_change` can compare against it
    pub fn with_prior(mut self, prior: Map<String, Value>) -> Self {
        self.prior = Some(prior);
        self
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Returns the id or a `MissingAttribute` error
    pub fn require_id(&self) -> Result<&str> {
        self.id()
            .ok_or_else(|| ProviderError::MissingAttribute("id".to_string()))
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = Some(id.into());
    }

    /// Marks the resource as gone; the host drops it from state
    pub fn clear_id(&mut self) {
        if let Some(id) = self.id.take() {
            tracing::debug!("Cleared resource id {}", id);
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    /// Returns the attribute as a string, if present and a string
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.attributes.insert(key.into(), value.into());
    }

    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }

    pub fn prior(&self) -> Option<&Map<String, Value>> {
        self.prior.as_ref()
    }

    /// Whether `key` differs between prior and current attributes
    pub fn has_change(&self, key: &str) -> bool {
        self.has_change_by(key, Value::clone)
    }

    /// Like [`has_change`](Self::has_change), comparing canonical forms
    ///
    /// Without a prior state every key counts as changed.
    pub fn has_change_by<F>(&self, key: &str, canonicalize: F) -> bool
    where
        F: Fn(&Value) -> Value,
    {
        let Some(prior) = &self.prior else {
            return true;
        };
        let before = prior.get(key).map(&canonicalize).unwrap_or(Value::Null);
        let after = self.get(key).map(&canonicalize).unwrap_or(Value::Null);
        before != after
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
