//! Wire types for the todo API.
//!
//! Records leave the service as `{"_id": "<hex>", "title": ..., "description": ...}`.
//! The identifier is the storage layer's ObjectId, rendered as its 24-character
//! hex string.

use std::fmt;
use std::str::FromStr;

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ApiError;

/// Identifier of a stored todo. Parsed from the request path before any
/// storage call is made.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TodoId(ObjectId);

impl TodoId {
    pub fn new() -> Self {
        Self(ObjectId::new())
    }

    pub fn object_id(&self) -> ObjectId {
        self.0
    }
}

impl Default for TodoId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<ObjectId> for TodoId {
    fn from(id: ObjectId) -> Self {
        Self(id)
    }
}

impl FromStr for TodoId {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ObjectId::parse_str(s)
            .map(Self)
            .map_err(|_| ApiError::InvalidId(s.to_string()))
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_hex())
    }
}

impl Serialize for TodoId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_hex())
    }
}

impl<'de> Deserialize<'de> for TodoId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        ObjectId::parse_str(&raw)
            .map(Self)
            .map_err(serde::de::Error::custom)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    #[serde(rename = "_id")]
    pub id: TodoId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Payload accepted by both create and update. Update replaces both fields,
/// so an omitted description clears the stored one.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct TodoInput {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl TodoInput {
    /// Only the title is required; the description may be absent or empty.
    pub fn validate(self) -> Result<Self, ApiError> {
        if self.title.trim().is_empty() {
            return Err(ApiError::BadRequest("Title is required".to_string()));
        }
        Ok(self)
    }
}
