//! Opaque server-assigned identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

/// Server-assigned record identifier.
///
/// The client never interprets identifiers. The backend may send them as
/// JSON strings (UUIDs) or integers; both are kept in their textual form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Id(String);

impl Id {
    /// Wrap a raw identifier.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Borrow the identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the identifier is blank.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl FromStr for Id {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s.trim()))
    }
}

impl From<&str> for Id {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for Id {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl From<i64> for Id {
    fn from(raw: i64) -> Self {
        Self(raw.to_string())
    }
}

impl<'de> Deserialize<'de> for Id {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Signed(i64),
            Unsigned(u64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(text) => Self(text),
            Raw::Signed(n) => Self(n.to_string()),
            Raw::Unsigned(n) => Self(n.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_from_string_or_number() {
        let text: Id = serde_json::from_str(r#""7f0c-42""#).unwrap();
        assert_eq!(text.as_str(), "7f0c-42");

        let number: Id = serde_json::from_str("10").unwrap();
        assert_eq!(number, Id::from(10));
    }

    #[test]
    fn serializes_as_string() {
        let json = serde_json::to_string(&Id::from(1)).unwrap();
        assert_eq!(json, r#""1""#);
    }

    #[test]
    fn parse_trims_whitespace() {
        let id: Id = "  abc  ".parse().unwrap();
        assert_eq!(id.as_str(), "abc");
        assert!(Id::new("   ").is_empty());
    }
}
