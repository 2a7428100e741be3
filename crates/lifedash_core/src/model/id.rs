//! Opaque short record identifiers.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const ID_LEN: usize = 9;
const ID_ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Nine-character base-36 identifier.
///
/// Randomness comes from a v4 UUID; uniqueness is only guaranteed within a
/// collection through `RecordId::generate_unique`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Wraps an existing identifier without checking its shape.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Generates a fresh random identifier.
    pub fn generate() -> Self {
        let mut bits = Uuid::new_v4().as_u128();
        let id = (0..ID_LEN)
            .map(|_| {
                let digit = (bits % 36) as usize;
                bits /= 36;
                char::from(ID_ALPHABET[digit])
            })
            .collect();
        Self(id)
    }

    /// Generates an identifier not present in `existing`.
    pub fn generate_unique<'a>(existing: impl IntoIterator<Item = &'a RecordId>) -> Self {
        let taken = existing.into_iter().collect::<HashSet<_>>();
        loop {
            let candidate = Self::generate();
            if !taken.contains(&candidate) {
                return candidate;
            }
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for RecordId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::RecordId;

    #[test]
    fn generated_ids_are_short_base36() {
        let id = RecordId::generate();
        assert_eq!(id.as_str().len(), 9);
        assert!(id
            .as_str()
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn generate_unique_skips_taken_ids() {
        let taken = (0..64).map(|_| RecordId::generate()).collect::<Vec<_>>();
        let fresh = RecordId::generate_unique(&taken);
        assert!(!taken.contains(&fresh));
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = RecordId::new("abc123xyz");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc123xyz\"");
    }
}
