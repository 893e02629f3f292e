use std::collections::HashSet;

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::category::{Category, classify};
use crate::item_id::ItemId;

use super::catalog::Catalog;
use super::types::{
    CategoryStats, CompletionStats, CrossReference, EnrichedItem, RegionStats, StatsSnapshot,
};

pub const REFERENCE_URL_BASE: &str = "https://eldenring.wiki.fextralife.com/";

/// Annotates every catalog triple with whether `ids` contains it.
///
/// Catalog keys are normalized before the join: any 8-digit hex key, in
/// either case, is parsed to an [`ItemId`] and reported in canonical
/// upper-case form, so `deadbeef` and `DEADBEEF` are the same item. Keys
/// that do not parse are kept verbatim and never owned.
pub fn cross_reference(ids: &[ItemId], catalog: &Catalog) -> CrossReference {
    let owned_ids: HashSet<ItemId> = ids.iter().copied().collect();

    let items: Vec<EnrichedItem> = catalog
        .records()
        .map(|record| {
            let parsed = record.id.parse::<ItemId>();
            if parsed.is_err() {
                warn!(
                    id = record.id,
                    region = record.region,
                    "catalog id is not an 8-digit hex code; it can never be owned"
                );
            }
            let owned = parsed
                .as_ref()
                .is_ok_and(|id| owned_ids.contains(id));
            let id = match parsed {
                Ok(id) => id.to_string(),
                Err(_) => record.id.to_string(),
            };

            EnrichedItem {
                id,
                name: record.entry.name.clone(),
                region: record.region.to_string(),
                subregion: record.subregion.to_string(),
                acquisition: record.entry.acquisition,
                hint: record.entry.hint.clone(),
                farmable: record.entry.farmable,
                owned,
                url: reference_url(&record.entry.name),
            }
        })
        .collect();

    let stats = compute_stats(&items);
    debug!(
        decoded = ids.len(),
        catalog = items.len(),
        owned = stats.global.owned,
        "cross-referenced inventory"
    );

    CrossReference { items, stats }
}

/// Global, per-category and per-region completion in one pass.
pub fn compute_stats(items: &[EnrichedItem]) -> StatsSnapshot {
    let mut global = CompletionStats::default();
    let mut categories: IndexMap<Category, CompletionStats> = Category::all()
        .map(|category| (category, CompletionStats::default()))
        .collect();
    let mut regions: IndexMap<&str, CompletionStats> = IndexMap::new();

    for item in items {
        global.record(item.owned);
        let category = item.item_id().map(classify).unwrap_or(Category::Other);
        categories.entry(category).or_default().record(item.owned);
        regions
            .entry(item.region.as_str())
            .or_default()
            .record(item.owned);
    }

    StatsSnapshot {
        global,
        categories: categories
            .into_iter()
            .map(|(category, stats)| CategoryStats { category, stats })
            .collect(),
        regions: region_rows(regions),
    }
}

/// Region-level completion over any subset of items, in first-seen order.
pub fn region_stats<'a, I>(items: I) -> Vec<RegionStats>
where
    I: IntoIterator<Item = &'a EnrichedItem>,
{
    let mut regions: IndexMap<&str, CompletionStats> = IndexMap::new();
    for item in items {
        regions
            .entry(item.region.as_str())
            .or_default()
            .record(item.owned);
    }
    region_rows(regions)
}

fn region_rows(regions: IndexMap<&str, CompletionStats>) -> Vec<RegionStats> {
    regions
        .into_iter()
        .map(|(region, stats)| RegionStats {
            region: region.to_string(),
            stats,
        })
        .collect()
}

/// Decoded ids that no catalog entry mentions, deduplicated, first-seen
/// order.
pub fn unmatched(ids: &[ItemId], catalog: &Catalog) -> Vec<ItemId> {
    let known: HashSet<ItemId> = catalog
        .records()
        .filter_map(|record| record.id.parse().ok())
        .collect();
    let mut seen = HashSet::new();
    ids.iter()
        .copied()
        .filter(|id| !known.contains(id) && seen.insert(*id))
        .collect()
}

/// Wiki page for an item name.
pub fn reference_url(name: &str) -> String {
    let mut out = String::with_capacity(REFERENCE_URL_BASE.len() + name.len());
    out.push_str(REFERENCE_URL_BASE);
    for ch in name.trim().chars() {
        match ch {
            ' ' => out.push('+'),
            'A'..='Z' | 'a'..='z' | '0'..='9' | '-' | '_' | '.' | '~' | '\'' | '(' | ')' => {
                out.push(ch)
            }
            other => {
                let mut buf = [0u8; 4];
                for byte in other.encode_utf8(&mut buf).bytes() {
                    out.push_str(&format!("%{byte:02X}"));
                }
            }
        }
    }
    out
}
