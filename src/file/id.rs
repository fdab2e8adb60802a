//! 24-character hexadecimal identifiers.
//!
//! Every id that arrives from a client goes through [`ObjectId::sanitize`]
//! before it reaches a persistence lookup. Malformed input becomes
//! [`ObjectId::null`], which never matches a stored entity, so callers see a
//! plain "not found" instead of an error.

use std::fmt;

use serde::{Serialize, Serializer};

/// Length of a well-formed identifier.
pub const ID_LENGTH: usize = 24;

const NULL_ID: &str = "000000000000000000000000";

/// Check whether `s` is a well-formed identifier.
///
/// Valid iff it has exactly 24 characters, all ASCII hex digits.
///
/// # Examples
///
/// ```
/// use files_manager::file::is_valid_id;
///
/// assert!(is_valid_id("5f1e7d3c2b1a09f8e7d6c5b4"));
/// assert!(is_valid_id("5F1E7D3C2B1A09F8E7D6C5B4"));
/// assert!(!is_valid_id("5f1e7d3c2b1a09f8e7d6c5b"));
/// assert!(!is_valid_id("5f1e7d3c2b1a09f8e7d6c5bz"));
/// ```
pub fn is_valid_id(s: &str) -> bool {
    s.len() == ID_LENGTH && s.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Opaque identifier assigned by the persistence layer.
///
/// Always stored in lower case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(String);

impl ObjectId {
    /// Parse a well-formed identifier.
    pub fn parse(s: &str) -> Option<Self> {
        if is_valid_id(s) {
            Some(Self(s.to_ascii_lowercase()))
        } else {
            None
        }
    }

    /// Parse `s`, substituting the null id when it is malformed.
    pub fn sanitize(s: &str) -> Self {
        Self::parse(s).unwrap_or_else(Self::null)
    }

    /// The reserved all-zero id. Never assigned to a stored entity.
    pub fn null() -> Self {
        Self(NULL_ID.to_string())
    }

    /// Whether this is the reserved all-zero id.
    pub fn is_null(&self) -> bool {
        self.0 == NULL_ID
    }

    /// Build an id from a persistence sequence number.
    ///
    /// Sequence numbers grow with insertion order, so ids sort by creation.
    pub fn from_sequence(seq: i64) -> Self {
        Self(format!("{:024x}", seq.max(0)))
    }

    /// Sequence number for this id, if it fits one.
    pub fn sequence(&self) -> Option<i64> {
        u128::from_str_radix(&self.0, 16)
            .ok()
            .and_then(|n| i64::try_from(n).ok())
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for ObjectId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_id() {
        assert!(is_valid_id("0123456789abcdefABCDEF00"));
        assert!(is_valid_id(NULL_ID));
        assert!(!is_valid_id(""));
        assert!(!is_valid_id("0"));
        assert!(!is_valid_id("0123456789abcdefABCDEF000"));
        assert!(!is_valid_id("0123456789abcdefABCDEFg0"));
        assert!(!is_valid_id("0123456789abcdef-BCDEF00"));
        // 24 bytes but not 24 ASCII hex characters
        assert!(!is_valid_id("ééééééééééée"));
    }

    #[test]
    fn test_parse_normalizes_case() {
        let id = ObjectId::parse("ABCDEF0123456789ABCDEF01").unwrap();
        assert_eq!(id.as_str(), "abcdef0123456789abcdef01");
    }

    #[test]
    fn test_sanitize_substitutes_null() {
        assert!(ObjectId::sanitize("not-an-id").is_null());
        assert!(ObjectId::sanitize("").is_null());
        assert!(!ObjectId::sanitize("00000000000000000000000a").is_null());
    }

    #[test]
    fn test_sequence_round_trip() {
        let id = ObjectId::from_sequence(42);
        assert_eq!(id.as_str(), "00000000000000000000002a");
        assert_eq!(id.sequence(), Some(42));
        assert_eq!(ObjectId::null().sequence(), Some(0));
    }

    #[test]
    fn test_sequence_out_of_range() {
        let id = ObjectId::parse("ffffffffffffffffffffffff").unwrap();
        assert_eq!(id.sequence(), None);
    }

    #[test]
    fn test_ids_sort_by_sequence() {
        let older = ObjectId::from_sequence(9);
        let newer = ObjectId::from_sequence(10);
        assert!(older < newer);
    }

    #[test]
    fn test_serialize_as_string() {
        let id = ObjectId::from_sequence(1);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"000000000000000000000001\"");
    }
}
