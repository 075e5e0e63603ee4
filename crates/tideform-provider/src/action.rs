//! Planned actions for a single resource

use crate::data::ResourceData;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Type of action to perform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    /// Create a new resource
    Create,
    /// Update an existing resource
    Update,
    /// Delete a resource
    Delete,
    /// No changes needed
    NoOp,
}

impl std::fmt::Display for ActionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionType::Create => write!(f, "create"),
            ActionType::Update => write!(f, "update"),
            ActionType::Delete => write!(f, "delete"),
            ActionType::NoOp => write!(f, "no-op"),
        }
    }
}

/// Decision for one resource, with the keys that drove it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    pub action: ActionType,

    /// Attribute keys whose change caused an update
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub changed: Vec<String>,
}

impl Plan {
    /// Decide what to do with a resource
    ///
    /// `data` holds the desired attributes plus the prior state. A resource
    /// without an id is created; `desired_present == false` on an existing
    /// resource deletes it; otherwise any of `watched` keys changing (after
    /// `canonicalize`) yields an update.
    pub fn for_resource<F>(
        data: &ResourceData,
        desired_present: bool,
        watched: &[&str],
        canonicalize: F,
    ) -> Self
    where
        F: Fn(&Value) -> Value,
    {
        match (data.id(), desired_present) {
            (None, true) => Self::new(ActionType::Create),
            (None, false) => Self::new(ActionType::NoOp),
            (Some(_), false) => Self::new(ActionType::Delete),
            (Some(_), true) => {
                let changed: Vec<String> = watched
                    .iter()
                    .filter(|key| data.has_change_by(key, &canonicalize))
                    .map(|key| key.to_string())
                    .collect();
                if changed.is_empty() {
                    Self::new(ActionType::NoOp)
                } else {
                    Self {
                        action: ActionType::Update,
                        changed,
                    }
                }
            }
        }
    }

    fn new(action: ActionType) -> Self {
        Self {
            action,
            changed: Vec::new(),
        }
    }

    pub fn has_changes(&self) -> bool {
        self.action != ActionType::NoOp
    }
}

impl std::fmt::Display for Plan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.changed.is_empty() {
            write!(f, "{}", self.action)
        } else {
            write!(f, "{} ({})", self.action, self.changed.join(", "))
        }
    }
}
