use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A 32-bit item code as stored in a save.
///
/// Records hold the code little-endian; the canonical text form is the
/// big-endian value as eight upper-case hex digits (`EF BE AD DE` on disk
/// reads as `DEADBEEF`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(pub u32);

impl ItemId {
    pub const TEXT_LEN: usize = 8;

    pub fn from_le_bytes(bytes: [u8; 4]) -> Self {
        Self(u32::from_le_bytes(bytes))
    }

    /// Reads the identifier from the first four bytes of a record.
    pub fn from_record(record: &[u8]) -> Option<Self> {
        let head: [u8; 4] = record.get(..4)?.try_into().ok()?;
        Some(Self::from_le_bytes(head))
    }

    pub fn to_le_bytes(self) -> [u8; 4] {
        self.0.to_le_bytes()
    }

    pub fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08X}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseItemIdError {
    input: String,
}

impl fmt::Display for ParseItemIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid item id '{}': expected {} hex digits",
            self.input,
            ItemId::TEXT_LEN
        )
    }
}

impl std::error::Error for ParseItemIdError {}

impl FromStr for ItemId {
    type Err = ParseItemIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.len() != Self::TEXT_LEN || !trimmed.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ParseItemIdError {
                input: s.to_string(),
            });
        }
        u32::from_str_radix(trimmed, 16)
            .map(Self)
            .map_err(|_| ParseItemIdError {
                input: s.to_string(),
            })
    }
}

impl Serialize for ItemId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ItemId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
