//! Internal implementation of the Medical ID type.

use crate::{MedicalIdError, MedicalIdResult};
use std::{fmt, str::FromStr};

/// Re-exported for convenience.
pub use ::uuid::Uuid;

/// A patient's Medical ID (32 lowercase hex characters, no hyphens).
///
/// Once constructed, the contained UUID is known to be valid, and it always displays in
/// canonical form.
///
/// # Construction
/// - [`MedicalId::new`] generates a fresh random identifier (UUID v4).
/// - [`MedicalId::parse`] validates an identifier typed or scanned at the kiosk.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MedicalId(Uuid);

impl Default for MedicalId {
    fn default() -> Self {
        Self::new()
    }
}

impl MedicalId {
    /// Generates a new Medical ID.
    ///
    /// Identifiers are random version 4 UUIDs, so collisions within a session are negligible.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Validates and parses a Medical ID.
    ///
    /// Leading and trailing whitespace is ignored. The remainder must already be canonical:
    /// hyphenated or uppercase forms are rejected rather than normalised.
    ///
    /// # Errors
    ///
    /// Returns [`MedicalIdError::InvalidInput`] if `input` is not in canonical form.
    pub fn parse(input: &str) -> MedicalIdResult<Self> {
        let trimmed = input.trim();
        if !Self::is_canonical(trimmed) {
            return Err(MedicalIdError::InvalidInput(format!(
                "Medical ID must be 32 lowercase hex characters without hyphens, got: '{}'",
                trimmed
            )));
        }

        Uuid::parse_str(trimmed)
            .map(Self)
            .map_err(|e| MedicalIdError::InvalidInput(e.to_string()))
    }

    /// Returns true if `input` is in canonical Medical ID form.
    ///
    /// This is a purely syntactic check: exactly 32 bytes, each `0-9` or `a-f`.
    pub fn is_canonical(input: &str) -> bool {
        input.len() == 32
            && input
                .bytes()
                .all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
    }
}

impl fmt::Display for MedicalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

impl FromStr for MedicalId {
    type Err = MedicalIdError;

    /// Equivalent to [`MedicalId::parse`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MedicalId::parse(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for MedicalId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for MedicalId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        MedicalId::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_new_generates_canonical_id() {
        let id = MedicalId::new();
        let canonical = id.to_string();

        assert_eq!(canonical.len(), 32);
        assert!(MedicalId::is_canonical(&canonical));
    }

    #[test]
    fn test_new_ids_are_unique() {
        let ids: HashSet<MedicalId> = (0..500).map(|_| MedicalId::new()).collect();
        assert_eq!(ids.len(), 500);
    }

    #[test]
    fn test_parse_valid_canonical_id() {
        let canonical = "550e8400e29b41d4a716446655440000";
        let id = MedicalId::parse(canonical).expect("canonical id should parse");
        assert_eq!(id.to_string(), canonical);
    }

    #[test]
    fn test_parse_trims_scanner_whitespace() {
        let id = MedicalId::parse("  550e8400e29b41d4a716446655440000\n")
            .expect("surrounding whitespace should be ignored");
        assert_eq!(id.to_string(), "550e8400e29b41d4a716446655440000");
    }

    #[test]
    fn test_parse_rejects_hyphenated_id() {
        let result = MedicalId::parse("550e8400-e29b-41d4-a716-446655440000");

        match result {
            Err(MedicalIdError::InvalidInput(msg)) => {
                assert!(msg.contains("32 lowercase hex characters"));
            }
            _ => panic!("Expected InvalidInput error"),
        }
    }

    #[test]
    fn test_parse_rejects_uppercase_and_non_hex() {
        assert!(MedicalId::parse("550E8400E29B41D4A716446655440000").is_err());
        assert!(MedicalId::parse("550e8400e29b41d4a71644665544000g").is_err());
        assert!(MedicalId::parse("550e8400").is_err());
        assert!(MedicalId::parse("").is_err());
    }

    #[test]
    fn test_from_str_matches_parse() {
        let id: MedicalId = "550e8400e29b41d4a716446655440000"
            .parse()
            .expect("from_str should accept canonical id");
        assert_eq!(id, MedicalId::parse("550e8400e29b41d4a716446655440000").unwrap());
    }

    #[test]
    fn test_serde_uses_canonical_string() {
        let id = MedicalId::parse("550e8400e29b41d4a716446655440000").unwrap();
        let json = serde_json::to_string(&id).expect("serialize");
        assert_eq!(json, "\"550e8400e29b41d4a716446655440000\"");

        let back: MedicalId = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, id);

        let bad: Result<MedicalId, _> = serde_json::from_str("\"not-an-id\"");
        assert!(bad.is_err());
    }
}
