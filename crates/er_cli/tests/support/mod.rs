//! Save and catalog fixtures for the CLI tests.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use er_core::ItemId;
use er_core::inventory::{EXPANSION_MARKER, STANDARD_MARKER};
use er_core::layout::SlotTable;

const MARKER_OFFSET_IN_SLOT: usize = 0x1_0000;

/// Zeroed full-size save with a `BND4` header; names and inventories are
/// written in by slot.
pub struct SaveBuilder {
    bytes: Vec<u8>,
    table: SlotTable,
}

impl SaveBuilder {
    pub fn new() -> Self {
        let table = SlotTable::default();
        let mut bytes = vec![0u8; table.required_len()];
        bytes[..4].copy_from_slice(b"BND4");
        Self { bytes, table }
    }

    pub fn name(mut self, slot: usize, name: &str) -> Self {
        let range = self.table.names[slot];
        let encoded: Vec<u8> = name.encode_utf16().flat_map(u16::to_le_bytes).collect();
        let len = encoded.len().min(range.len());
        self.bytes[range.start..range.start + len].copy_from_slice(&encoded[..len]);
        self
    }

    pub fn standard_inventory(mut self, slot: usize, ids: &[ItemId]) -> Self {
        let mut section = STANDARD_MARKER.to_vec();
        section.extend([0x2C, 0x01, 0x00, 0x00, 0x0A, 0x00, 0x00, 0x00]);
        for id in ids {
            section.extend(id.to_le_bytes());
            section.extend(1u32.to_le_bytes());
            section.extend([0x01, 0x00, 0x00, 0x80]);
            section.extend([0x00; 4]);
        }
        self.write_in_slot(slot, &section);
        self
    }

    pub fn expansion_inventory(mut self, slot: usize, ids: &[ItemId]) -> Self {
        let mut section = EXPANSION_MARKER.to_vec();
        section.extend([0x2C, 0x01, 0x00]);
        for id in ids {
            section.extend(id.to_le_bytes());
            section.extend([0x01, 0x00, 0x00, 0x80]);
        }
        self.write_in_slot(slot, &section);
        self
    }

    pub fn build(self) -> Vec<u8> {
        self.bytes
    }

    fn write_in_slot(&mut self, slot: usize, section: &[u8]) {
        let at = self.table.slots[slot].start + MARKER_OFFSET_IN_SLOT;
        self.bytes[at..at + section.len()].copy_from_slice(section);
    }
}

pub fn ids(raw: &[u32]) -> Vec<ItemId> {
    raw.iter().copied().map(ItemId).collect()
}

pub const CATALOG_JSON: &str = r#"{
    "Limgrave": {
        "Church of Elleh": {
            "00F42400": {"name": "Dagger", "type": "merchant", "hint": "Sold by <b>Kalé</b>"},
            "40000800": {"name": "Smithing-Stone Miner's Bell Bearing [1]", "type": "boss"}
        },
        "Stormhill": {
            "10000000": {"name": "Knight Helm", "type": "foe", "farmable": true},
            "00F42400": {"name": "Dagger", "type": "chest"}
        }
    },
    "Liurnia": {
        "Raya Lucaria": {
            "40000BC0": {"name": "Crimson Crystal Tear", "type": "invader"},
            "90000000": {"name": "Wandering Noble Ashes", "type": "quest"}
        }
    }
}"#;

pub fn temp_path(prefix: &str, extension: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before unix epoch")
        .as_nanos();
    std::env::temp_dir().join(format!(
        "{prefix}_{}_{}.{extension}",
        std::process::id(),
        nanos
    ))
}
