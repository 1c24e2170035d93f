//! Entity identifiers and id generation.
//!
//! Ids are opaque strings. Freshly created entities get UUID v4 ids by
//! default; data written by older versions may carry any non-empty string
//! (for example millisecond timestamps), so parsing only rejects blanks.

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur with entity IDs
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EntityIdError {
    #[error("Entity ID cannot be empty")]
    Empty,

    #[error("Entity ID cannot contain whitespace: {0:?}")]
    Whitespace(String),
}

/// Identifier of a workout, exercise or set.
///
/// Uniqueness is scoped: workout ids are unique across the collection,
/// exercise ids within their workout and set ids within their exercise.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    /// Generate a new random (UUID v4) id
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Parse an id supplied by a caller
    pub fn parse(s: &str) -> Result<Self, EntityIdError> {
        if s.is_empty() {
            return Err(EntityIdError::Empty);
        }
        if s.chars().any(char::is_whitespace) {
            return Err(EntityIdError::Whitespace(s.to_string()));
        }
        Ok(Self(s.to_string()))
    }

    /// Create from a UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(&self.0)
    }
}

impl std::str::FromStr for EntityId {
    type Err = EntityIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// Source of fresh entity ids, injected into the store.
pub trait IdGenerator: Send {
    fn generate(&mut self) -> EntityId;
}

/// Random UUID v4 ids.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn generate(&mut self) -> EntityId {
        EntityId::new()
    }
}

/// Monotonic counter ids (`<prefix>1`, `<prefix>2`, ...).
///
/// Deterministic, which makes it the generator of choice in tests.
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    /// Ids are `prefix` followed by a counter, so the prefix must not
    /// contain whitespace; anything else would not parse back.
    pub fn new(prefix: impl Into<String>) -> Result<Self, EntityIdError> {
        let prefix = prefix.into();
        if prefix.chars().any(char::is_whitespace) {
            return Err(EntityIdError::Whitespace(prefix));
        }
        Ok(Self { prefix, next: 1 })
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self {
            prefix: "id-".to_string(),
            next: 1,
        }
    }
}

impl IdGenerator for SequentialIds {
    fn generate(&mut self) -> EntityId {
        let id = EntityId(format!("{}{}", self.prefix, self.next));
        self.next += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_ids_are_unique() {
        let a = EntityId::new();
        let b = EntityId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn test_parse_accepts_legacy_timestamp_ids() {
        let id = EntityId::parse("1718031234567").unwrap();
        assert_eq!(id.as_str(), "1718031234567");
    }

    #[test]
    fn test_parse_rejects_blank() {
        assert_eq!(EntityId::parse(""), Err(EntityIdError::Empty));
        assert!(matches!(
            EntityId::parse("a b"),
            Err(EntityIdError::Whitespace(_))
        ));
    }

    #[test]
    fn test_from_uuid() {
        let uuid = Uuid::new_v4();
        assert_eq!(EntityId::from_uuid(uuid).to_string(), uuid.to_string());
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let id = EntityId::parse("abc").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc\"");

        let parsed: EntityId = serde_json::from_str("\"abc\"").unwrap();
        assert_eq!(parsed, id);

        assert!(serde_json::from_str::<EntityId>("\"\"").is_err());
    }

    #[test]
    fn test_sequential_ids() {
        let mut ids = SequentialIds::new("w").unwrap();
        assert_eq!(ids.generate().as_str(), "w1");
        assert_eq!(ids.generate().as_str(), "w2");
        assert_eq!(ids.generate().as_str(), "w3");
    }

    #[test]
    fn test_sequential_prefix_with_whitespace_rejected() {
        assert!(matches!(
            SequentialIds::new("w "),
            Err(EntityIdError::Whitespace(_))
        ));
        assert!(matches!(
            SequentialIds::new("a\tb"),
            Err(EntityIdError::Whitespace(_))
        ));
    }

    #[test]
    fn test_generated_ids_parse_back() {
        let mut generators: Vec<Box<dyn IdGenerator>> = vec![
            Box::new(UuidIds),
            Box::new(SequentialIds::default()),
            Box::new(SequentialIds::new("").unwrap()),
            Box::new(SequentialIds::new("set-").unwrap()),
        ];
        for ids in &mut generators {
            for _ in 0..3 {
                let id = ids.generate();
                let json = serde_json::to_string(&id).unwrap();
                assert_eq!(serde_json::from_str::<EntityId>(&json).unwrap(), id);
            }
        }
    }
}
