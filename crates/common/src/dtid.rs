//! Distributed transaction identifier
//!
//! A DTID names one distributed transaction across every participating shard.
//! It is assigned by the coordinator and treated as opaque here: no format
//! validation is performed, and an empty identifier is a legal value.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Opaque distributed transaction identifier
///
/// Implements `Borrow<str>` so maps keyed by `Dtid` can be queried with a
/// plain `&str`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dtid(String);

impl Dtid {
    /// Wrap an identifier string
    pub fn new(dtid: impl Into<String>) -> Self {
        Self(dtid.into())
    }

    /// Get the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the identifier, returning the inner string
    pub fn into_string(self) -> String {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Dtid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for Dtid {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Dtid {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for Dtid {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Dtid {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<Dtid> for String {
    fn from(dtid: Dtid) -> Self {
        dtid.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_display_is_raw_identifier() {
        let dtid = Dtid::new("ks:0:1234");
        assert_eq!(dtid.to_string(), "ks:0:1234");
        assert_eq!(dtid.as_str(), "ks:0:1234");
    }

    #[test]
    fn test_lookup_by_str() {
        let mut map = HashMap::new();
        map.insert(Dtid::from("dtid1"), 7);

        // Borrow<str> must hash identically to the owned key
        assert_eq!(map.get("dtid1"), Some(&7));
        assert_eq!(map.get("dtid2"), None);
    }

    #[test]
    fn test_empty_identifier_is_allowed() {
        let dtid = Dtid::from(String::new());
        assert!(dtid.is_empty());
        assert_eq!(dtid, Dtid::new(""));
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let dtid = Dtid::new("dtid-42");
        let json = serde_json::to_string(&dtid).unwrap();
        assert_eq!(json, "\"dtid-42\"");

        let parsed: Dtid = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, dtid);
    }
}
