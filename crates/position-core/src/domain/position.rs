//! Position Entity
//!
//! An organizational position with an optional single parent.

use serde::{Deserialize, Serialize};
use super::wire;

/// A position record as stored by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    /// Backend-assigned identifier
    #[serde(deserialize_with = "wire::id")]
    pub id: String,
    /// Display name (required, non-empty)
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Parent position ID (None = root level)
    #[serde(default, deserialize_with = "wire::optional_id", skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

impl Position {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            parent_id: None,
        }
    }

    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Parent reference with blank values treated as "no parent"
    pub fn effective_parent_id(&self) -> Option<&str> {
        self.parent_id.as_deref().filter(|id| !id.is_empty())
    }

    /// Strip the id, e.g. to resubmit the record as a new position
    pub fn to_draft(&self) -> PositionDraft {
        PositionDraft {
            name: self.name.clone(),
            description: self.description.clone(),
            parent_id: self.parent_id.clone(),
        }
    }
}

/// A position that has not been persisted yet (no id)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionDraft {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "wire::optional_id", skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

impl PositionDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Attach a backend-assigned id
    pub fn into_position(self, id: impl Into<String>) -> Position {
        Position {
            id: id.into(),
            name: self.name,
            description: self.description,
            parent_id: self.parent_id,
        }
    }
}
