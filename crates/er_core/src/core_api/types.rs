use serde::{Deserialize, Serialize};

use crate::category::{Category, classify};
use crate::inventory::{InventoryNotFound, RecordLayout};
use crate::item_id::ItemId;

use super::catalog::AcquisitionType;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SlotSummary {
    pub index: usize,
    pub name: String,
}

impl SlotSummary {
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DecodedSlot {
    pub slot: usize,
    pub character_name: String,
    pub layout: RecordLayout,
    pub ids: Vec<ItemId>,
}

impl DecodedSlot {
    pub fn is_expansion(&self) -> bool {
        self.layout.is_expansion()
    }
}

/// Result of decoding one slot. A slot without inventory data is a normal
/// outcome, not an error: fresh or unused slots look like that.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DecodeOutcome {
    Decoded(DecodedSlot),
    NoInventory {
        slot: usize,
        character_name: String,
        reason: InventoryNotFound,
    },
}

impl DecodeOutcome {
    pub fn slot(&self) -> usize {
        match self {
            Self::Decoded(decoded) => decoded.slot,
            Self::NoInventory { slot, .. } => *slot,
        }
    }

    pub fn character_name(&self) -> &str {
        match self {
            Self::Decoded(decoded) => &decoded.character_name,
            Self::NoInventory { character_name, .. } => character_name,
        }
    }

    /// Decoded ids; empty when the slot has no inventory data.
    pub fn ids(&self) -> &[ItemId] {
        match self {
            Self::Decoded(decoded) => &decoded.ids,
            Self::NoInventory { .. } => &[],
        }
    }

    pub fn is_decoded(&self) -> bool {
        matches!(self, Self::Decoded(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnrichedItem {
    /// Catalog key, upper-cased when it is a well-formed id.
    pub id: String,
    pub name: String,
    pub region: String,
    pub subregion: String,
    pub acquisition: AcquisitionType,
    pub hint: String,
    pub farmable: bool,
    pub owned: bool,
    pub url: String,
}

impl EnrichedItem {
    pub fn item_id(&self) -> Option<ItemId> {
        self.id.parse().ok()
    }

    /// Classified on every call so range changes apply to existing lists.
    pub fn category(&self) -> Category {
        self.item_id().map(classify).unwrap_or(Category::Other)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompletionStats {
    pub total: usize,
    pub owned: usize,
    pub missing: usize,
    pub percentage: u32,
}

impl CompletionStats {
    pub fn from_counts(total: usize, owned: usize) -> Self {
        let percentage = if total == 0 {
            0
        } else {
            (owned as f64 / total as f64 * 100.0).round() as u32
        };
        Self {
            total,
            owned,
            missing: total.saturating_sub(owned),
            percentage,
        }
    }

    pub fn record(&mut self, owned: bool) {
        let owned_count = self.owned + usize::from(owned);
        *self = Self::from_counts(self.total + 1, owned_count);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CategoryStats {
    pub category: Category,
    pub stats: CompletionStats,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegionStats {
    pub region: String,
    pub stats: CompletionStats,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StatsSnapshot {
    pub global: CompletionStats,
    pub categories: Vec<CategoryStats>,
    pub regions: Vec<RegionStats>,
}

impl StatsSnapshot {
    pub fn category(&self, category: Category) -> Option<&CompletionStats> {
        self.categories
            .iter()
            .find(|row| row.category == category)
            .map(|row| &row.stats)
    }

    pub fn region(&self, region: &str) -> Option<&CompletionStats> {
        self.regions
            .iter()
            .find(|row| row.region == region)
            .map(|row| &row.stats)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CrossReference {
    pub items: Vec<EnrichedItem>,
    pub stats: StatsSnapshot,
}
