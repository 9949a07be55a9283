use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier for a vocabulary list.
///
/// Lists are identified by opaque strings; freshly created lists get a UUID.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListId(String);

impl ListId {
    /// Wraps an existing identifier.
    ///
    /// # Errors
    ///
    /// Returns `ParseIdError` if the identifier is blank.
    pub fn new(id: impl Into<String>) -> Result<Self, ParseIdError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ParseIdError {
                kind: "ListId".to_string(),
            });
        }
        Ok(Self(id))
    }

    /// Creates a new random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ListId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ListId({})", self.0)
    }
}

impl fmt::Display for ListId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Error type for parsing an id from a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    kind: String,
}

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse {} from string", self.kind)
    }
}

impl std::error::Error for ParseIdError {}

impl FromStr for ListId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ListId::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_id_display() {
        let id = ListId::new("gre-1").unwrap();
        assert_eq!(id.to_string(), "gre-1");
        assert_eq!(format!("{id:?}"), "ListId(gre-1)");
    }

    #[test]
    fn list_id_from_str_rejects_blank() {
        assert!("   ".parse::<ListId>().is_err());
        assert!("".parse::<ListId>().is_err());
    }

    #[test]
    fn generated_ids_are_unique() {
        let a = ListId::generate();
        let b = ListId::generate();
        assert_ne!(a, b);
        assert_eq!(a.as_str().len(), 36);
    }

    #[test]
    fn list_id_roundtrip() {
        let original = ListId::new("sat-words").unwrap();
        let parsed: ListId = original.to_string().parse().unwrap();
        assert_eq!(original, parsed);
    }
}
