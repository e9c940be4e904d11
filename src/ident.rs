/**
 * Board Identifier Scheme
 *
 * Boards are addressed two ways:
 *
 * - New boards get a store-generated short public id: 8 independent
 *   uniform samples from a 62-character URL-safe alphabet. No uniqueness
 *   check is performed; the 62^8 space makes collisions negligible.
 * - Boards created before the short-id scheme are addressed only by
 *   their database ObjectId (24 hex characters).
 *
 * `BoardId::parse` classifies a raw id into a tagged variant so lookup
 * code never falls back through exception-driven control flow.
 */

use mongodb::bson::oid::ObjectId;
use rand::Rng;

use crate::error::ApiError;

/// URL-safe base62 alphabet for short ids
pub const ALPHABET: &[u8; 62] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Length of generated short ids
pub const SHORT_ID_LEN: usize = 8;

/// Generate a random short id
///
/// Draws `length` independent uniform samples from [`ALPHABET`]. Not
/// guaranteed unique; callers accept the collision risk.
pub fn generate(length: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..length)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}

/// A classified board identifier
///
/// A legacy identifier is one that parses as the database's native id
/// format (a 24-character hex ObjectId); anything else is treated as a
/// short identifier candidate. Short ids are 8 characters, so the two
/// forms never overlap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardId {
    Short(String),
    Legacy(ObjectId),
}

impl BoardId {
    /// Classify a raw id string
    ///
    /// Empty input is a validation error. No further shape validation is
    /// applied to short-id candidates.
    pub fn parse(raw: &str) -> Result<Self, ApiError> {
        if raw.is_empty() {
            return Err(ApiError::validation("board id is required"));
        }
        match ObjectId::parse_str(raw) {
            Ok(oid) => Ok(Self::Legacy(oid)),
            Err(_) => Ok(Self::Short(raw.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_generate_length_and_alphabet() {
        for _ in 0..100 {
            let id = generate(SHORT_ID_LEN);
            assert_eq!(id.len(), SHORT_ID_LEN);
            assert!(id.bytes().all(|b| ALPHABET.contains(&b)));
        }
    }

    #[test]
    fn test_generate_is_not_constant() {
        let ids: std::collections::HashSet<_> = (0..50).map(|_| generate(8)).collect();
        assert!(ids.len() > 1);
    }

    #[test]
    fn test_parse_short_id() {
        let id = BoardId::parse("aZ09bC1d").unwrap();
        assert_eq!(id, BoardId::Short("aZ09bC1d".to_string()));
    }

    #[test]
    fn test_parse_legacy_id() {
        let hex = "507f1f77bcf86cd799439011";
        let id = BoardId::parse(hex).unwrap();
        match id {
            BoardId::Legacy(oid) => assert_eq!(oid.to_hex(), hex),
            other => panic!("expected legacy id, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_empty_is_validation_error() {
        let err = BoardId::parse("").unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn test_non_hex_24_chars_is_short_candidate() {
        // Same length as an ObjectId but not hex
        let raw = "zzzzzzzzzzzzzzzzzzzzzzzz";
        assert_eq!(BoardId::parse(raw).unwrap(), BoardId::Short(raw.into()));
    }
}
