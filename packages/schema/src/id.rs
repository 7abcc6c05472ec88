use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::SchemaError;

const PROVISIONAL_PREFIX: &str = "draft-";

/// Length of a store-issued id, in hex digits
pub const DURABLE_ID_LEN: usize = 24;

/// Project identity.
///
/// A project starts life with a client-generated provisional id and is
/// promoted to the durable id issued by the store the first time it is
/// saved. On the wire both are plain strings. Only the store's format,
/// exactly 24 hex digits, counts as durable; anything else (`draft-…`,
/// a template id like `proj1`) still has to be created.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProjectId(String);

impl ProjectId {
    /// New client-side placeholder id.
    pub fn provisional() -> Self {
        Self(format!("{}{}", PROVISIONAL_PREFIX, uuid::Uuid::new_v4().simple()))
    }

    /// Validate and wrap an id received from outside.
    pub fn parse(raw: impl Into<String>) -> Result<Self, SchemaError> {
        let raw = raw.into();
        if raw.is_empty() || raw.chars().any(|c| c.is_whitespace() || c == '/') {
            return Err(SchemaError::InvalidId(raw));
        }
        Ok(Self(raw))
    }

    pub fn is_durable(&self) -> bool {
        self.0.len() == DURABLE_ID_LEN && self.0.chars().all(|c| c.is_ascii_hexdigit())
    }

    pub fn is_provisional(&self) -> bool {
        !self.is_durable()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for ProjectId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ProjectId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        ProjectId::parse(raw).map_err(serde::de::Error::custom)
    }
}
