use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error types for RecordId parsing
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RecordIdError {
    #[error("Invalid record id: {0}")]
    Invalid(String),

    #[error("Record id must be positive")]
    Zero,
}

/// RecordId: 64-bit identifier for stored records
///
/// Ids are allocated per record kind from a monotonically increasing
/// counter starting at 1, so a higher id within a kind is always a newer
/// record. Zero is never allocated.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(u64);

impl RecordId {
    /// Width of the zero-padded key form, enough for any u64
    pub const KEY_WIDTH: usize = 20;

    /// Create a RecordId, rejecting zero
    pub fn new(value: u64) -> Result<Self, RecordIdError> {
        if value == 0 {
            return Err(RecordIdError::Zero);
        }
        Ok(Self(value))
    }

    /// Create a RecordId from a raw value (unchecked)
    pub fn from_raw(value: u64) -> Self {
        Self(value)
    }

    /// Get the raw 64-bit value
    pub fn as_raw(&self) -> u64 {
        self.0
    }

    /// Zero-padded form used inside storage keys.
    ///
    /// Padding keeps lexicographic key order equal to numeric id order.
    pub fn to_key(&self) -> String {
        format!("{:0width$}", self.0, width = Self::KEY_WIDTH)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RecordId {
    type Err = RecordIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: u64 = s
            .trim()
            .parse()
            .map_err(|_| RecordIdError::Invalid(s.to_string()))?;
        Self::new(value)
    }
}

impl From<RecordId> for u64 {
    fn from(id: RecordId) -> u64 {
        id.0
    }
}
