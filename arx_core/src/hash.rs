//! Content ids based on BLAKE3.

use crate::error::{Error, Result};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Id digest size in bytes (BLAKE3 produces 256-bit hashes).
pub const ID_SIZE: usize = 32;

/// A 32-byte content id addressing one object in the store.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectId([u8; ID_SIZE]);

impl ObjectId {
    /// Create an ObjectId from raw bytes.
    pub fn from_bytes(bytes: [u8; ID_SIZE]) -> Self {
        ObjectId(bytes)
    }

    /// Create an ObjectId from a hex string (64 hex characters).
    pub fn from_hex(hex_str: &str) -> Result<Self> {
        if hex_str.len() != ID_SIZE * 2 {
            return Err(Error::invalid_id(format!(
                "Expected {} hex characters, got {}",
                ID_SIZE * 2,
                hex_str.len()
            )));
        }

        let bytes =
            hex::decode(hex_str).map_err(|e| Error::invalid_id(format!("Invalid hex: {}", e)))?;

        let mut id = [0u8; ID_SIZE];
        id.copy_from_slice(&bytes);
        Ok(ObjectId(id))
    }

    /// Convert to hex string (64 characters).
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Get the raw bytes.
    pub fn as_bytes(&self) -> &[u8; ID_SIZE] {
        &self.0
    }

    /// Hash raw bytes using BLAKE3.
    pub fn hash_bytes(data: &[u8]) -> Self {
        let hash = blake3::hash(data);
        ObjectId(*hash.as_bytes())
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId({})", self.to_hex())
    }
}

impl Serialize for ObjectId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for ObjectId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct HexVisitor;

        impl Visitor<'_> for HexVisitor {
            type Value = ObjectId;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "a {}-character hex string", ID_SIZE * 2)
            }

            fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<ObjectId, E> {
                ObjectId::from_hex(v).map_err(E::custom)
            }
        }

        deserializer.deserialize_str(HexVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_empty() {
        let id = ObjectId::hash_bytes(b"");
        assert_eq!(id.to_hex().len(), 64);
    }

    #[test]
    fn test_hash_hello_world() {
        let id = ObjectId::hash_bytes(b"hello world");
        // BLAKE3 of "hello world"
        assert_eq!(
            id.to_hex(),
            "d74981efa70a0c880b8d8c1985d075dbcbf679b99a5f9914e5aaf96b831a9e24"
        );
    }

    #[test]
    fn test_from_hex_roundtrip() {
        let original = ObjectId::hash_bytes(b"test data");
        let hex = original.to_hex();
        let parsed = ObjectId::from_hex(&hex).unwrap();
        assert_eq!(original, parsed);
    }

    #[test]
    fn test_from_hex_invalid_length() {
        assert!(ObjectId::from_hex("abcd").is_err());
        assert!(ObjectId::from_hex("").is_err());
    }

    #[test]
    fn test_from_hex_invalid_chars() {
        let invalid = "z".repeat(64);
        assert!(ObjectId::from_hex(&invalid).is_err());
    }

    // Property-based tests
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            max_shrink_iters: 10000,
            ..ProptestConfig::default()
        })]

        /// Hashing the same data always produces the same id.
        #[test]
        fn prop_hash_deterministic(data: Vec<u8>) {
            let id1 = ObjectId::hash_bytes(&data);
            let id2 = ObjectId::hash_bytes(&data);
            prop_assert_eq!(id1, id2);
        }

        /// Round-trip through hex preserves the id.
        #[test]
        fn prop_hex_roundtrip(bytes in prop::array::uniform32(any::<u8>())) {
            let id = ObjectId::from_bytes(bytes);
            let hex = id.to_hex();
            let parsed = ObjectId::from_hex(&hex)?;
            prop_assert_eq!(id, parsed);
        }

        /// Invalid hex length always fails.
        #[test]
        fn prop_invalid_hex_length_fails(
            s in "[0-9a-f]{0,63}|[0-9a-f]{65,128}"
        ) {
            prop_assert!(ObjectId::from_hex(&s).is_err());
        }
    }
}
