//! Domain DTOs for the todo API.
//!
//! # Design
//! These types mirror the server's wire schema but are defined independently
//! so the client core carries no database or web-framework dependencies.
//! Integration tests catch any schema drift between the two crates.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Server-assigned identifier. Opaque to the client; only compared and
/// echoed back in request paths.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(String);

impl TodoId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TodoId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for TodoId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single todo item returned by the API. Accepts both `_id` and `id` as
/// the identifier key; a missing description reads as empty.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    #[serde(rename = "_id", alias = "id")]
    pub id: TodoId,
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// Request payload for create and update. Update replaces both fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoInput {
    pub title: String,
    pub description: String,
}

impl TodoInput {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }

    /// Both fields must hold something other than whitespace before the
    /// client will send them.
    pub fn is_complete(&self) -> bool {
        !self.title.trim().is_empty() && !self.description.trim().is_empty()
    }

    pub fn clear(&mut self) {
        self.title.clear();
        self.description.clear();
    }
}
