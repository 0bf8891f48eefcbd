//! Book identifiers
//!
//! Books are addressed externally by the 24-character hexadecimal form of the
//! store's native `ObjectId`. `BookId` is the only place the two meet.

use std::{fmt, str::FromStr};

use mongodb::bson::oid::ObjectId;
use serde::{Serialize, Serializer};

use crate::error::AppError;

/// Length of the external identifier form
pub const ID_HEX_LEN: usize = 24;

/// Store-assigned book identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BookId(ObjectId);

impl BookId {
    /// Generate a fresh identifier
    pub fn new() -> Self {
        Self(ObjectId::new())
    }

    /// True iff `s` is exactly 24 hexadecimal characters
    pub fn is_valid(s: &str) -> bool {
        s.len() == ID_HEX_LEN && s.bytes().all(|b| b.is_ascii_hexdigit())
    }

    /// Decode the external form
    pub fn parse(s: &str) -> Result<Self, AppError> {
        if !Self::is_valid(s) {
            return Err(AppError::InvalidIdentifier("Invalid ID".to_string()));
        }
        ObjectId::parse_str(s)
            .map(Self)
            .map_err(|_| AppError::InvalidIdentifier("Invalid ID".to_string()))
    }

    /// Canonical lowercase hexadecimal form
    pub fn to_hex(&self) -> String {
        self.0.to_hex()
    }

    pub fn object_id(&self) -> ObjectId {
        self.0
    }
}

impl Default for BookId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<ObjectId> for BookId {
    fn from(oid: ObjectId) -> Self {
        Self(oid)
    }
}

impl FromStr for BookId {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for BookId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}
