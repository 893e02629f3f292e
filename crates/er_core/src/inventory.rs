//! Locating and decoding the collected-item inventory inside a slot.
//!
//! Both save variants store the inventory as a packed list of fixed-width
//! records behind a marker. The base game writes an 8-byte marker followed
//! by 8 bytes of metadata and 16-byte records; saves touched by the
//! expansion only keep the first 5 marker bytes, 3 bytes of metadata and
//! 8-byte records. The list ends where a run of 50 zero bytes starts, except
//! that the first 6 bytes of that run still belong to the last record.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::item_id::ItemId;
use crate::layout::ByteRange;
use crate::scanner;

pub const STANDARD_MARKER: [u8; 8] = [0xB0, 0xAD, 0x01, 0x00, 0x01, 0xFF, 0xFF, 0xFF];
pub const EXPANSION_MARKER: [u8; 5] = [0xB0, 0xAD, 0x01, 0x00, 0x01];
pub const STANDARD_METADATA_LEN: usize = 8;
pub const EXPANSION_METADATA_LEN: usize = 3;
pub const TERMINATOR_RUN_LEN: usize = 50;
pub const TERMINATOR_TAIL_LEN: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordLayout {
    Standard,
    Expansion,
}

impl RecordLayout {
    pub fn record_width(&self) -> usize {
        match *self {
            Self::Standard => 16,
            Self::Expansion => 8,
        }
    }

    pub fn marker(&self) -> &'static [u8] {
        match *self {
            Self::Standard => &STANDARD_MARKER,
            Self::Expansion => &EXPANSION_MARKER,
        }
    }

    /// Distance from the marker's first byte to the first record.
    pub fn start_skip(&self) -> usize {
        match *self {
            Self::Standard => STANDARD_MARKER.len() + STANDARD_METADATA_LEN,
            Self::Expansion => EXPANSION_MARKER.len() + EXPANSION_METADATA_LEN,
        }
    }

    pub fn is_expansion(&self) -> bool {
        matches!(self, Self::Expansion)
    }

    pub fn as_str(&self) -> &'static str {
        match *self {
            Self::Standard => "Standard",
            Self::Expansion => "Expansion",
        }
    }
}

impl fmt::Display for RecordLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a slot's records live, relative to the start of the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InventoryRange {
    pub range: ByteRange,
    pub layout: RecordLayout,
}

impl InventoryRange {
    pub fn bytes<'a>(&self, slot: &'a [u8]) -> Option<&'a [u8]> {
        self.range.slice(slot)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InventoryNotFound {
    MarkerMissing,
    TerminatorMissing,
}

impl fmt::Display for InventoryNotFound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::MarkerMissing => f.write_str("no inventory marker in slot"),
            Self::TerminatorMissing => f.write_str("inventory list has no terminator"),
        }
    }
}

impl std::error::Error for InventoryNotFound {}

pub fn locate(slot: &[u8]) -> Result<InventoryRange, InventoryNotFound> {
    let (marker_at, layout) = [RecordLayout::Standard, RecordLayout::Expansion]
        .into_iter()
        .find_map(|layout| scanner::find(slot, layout.marker()).map(|at| (at, layout)))
        .ok_or(InventoryNotFound::MarkerMissing)?;

    let start = marker_at + layout.start_skip();
    let body = slot
        .get(start..)
        .ok_or(InventoryNotFound::TerminatorMissing)?;
    let run = scanner::find_zero_run(body, TERMINATOR_RUN_LEN)
        .ok_or(InventoryNotFound::TerminatorMissing)?;
    let end = start + run + TERMINATOR_TAIL_LEN;

    debug!(
        marker_at,
        start,
        end,
        layout = layout.as_str(),
        "located inventory records"
    );

    Ok(InventoryRange {
        range: ByteRange::new(start, end),
        layout,
    })
}

/// Splits `records` into `layout`-wide chunks and reads each identifier.
///
/// The terminator tail cuts the last record short, so a trailing partial
/// chunk is kept when it still holds the four identifier bytes. A partial
/// chunk whose identifier is zero is terminator padding, not a record.
pub fn decode(records: &[u8], layout: RecordLayout) -> Vec<ItemId> {
    let width = layout.record_width();
    records
        .chunks(width)
        .filter_map(|chunk| {
            let id = ItemId::from_record(chunk)?;
            if chunk.len() < width && id.raw() == 0 {
                return None;
            }
            Some(id)
        })
        .collect()
}

/// Locates and decodes a slot's inventory in one step.
pub fn read_slot(slot: &[u8]) -> Result<(Vec<ItemId>, RecordLayout), InventoryNotFound> {
    let located = locate(slot)?;
    let bytes = located
        .bytes(slot)
        .ok_or(InventoryNotFound::TerminatorMissing)?;
    let ids = decode(bytes, located.layout);
    debug!(count = ids.len(), layout = located.layout.as_str(), "decoded inventory");
    Ok((ids, located.layout))
}
