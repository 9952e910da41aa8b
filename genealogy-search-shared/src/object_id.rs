//! Primary store object identifiers.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Errors produced when parsing an [`ObjectId`] from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ObjectIdError {
    /// The input is not exactly 24 characters long.
    #[error("Invalid object id length: expected 24 hex characters, got {0}")]
    InvalidLength(usize),

    /// The input contains non-hexadecimal characters.
    #[error("Invalid object id: {0}")]
    InvalidHex(String),
}

/// A 12-byte identifier assigned by the primary store to every record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId([u8; 12]);

impl ObjectId {
    /// Build an identifier from its raw bytes.
    pub fn from_bytes(bytes: [u8; 12]) -> Self {
        Self(bytes)
    }

    /// Parse a 24 character hexadecimal identifier.
    pub fn parse_str(s: &str) -> Result<Self, ObjectIdError> {
        if s.len() != 24 {
            return Err(ObjectIdError::InvalidLength(s.len()));
        }

        let mut bytes = [0u8; 12];
        hex::decode_to_slice(s, &mut bytes)
            .map_err(|e| ObjectIdError::InvalidHex(e.to_string()))?;
        Ok(Self(bytes))
    }

    /// The raw identifier bytes.
    pub fn bytes(&self) -> [u8; 12] {
        self.0
    }

    /// Lowercase hexadecimal representation.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for ObjectId {
    type Err = ObjectIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}
