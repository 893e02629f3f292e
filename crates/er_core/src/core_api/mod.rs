mod catalog;
mod cross_ref;
mod engine;
mod error;
mod filter;
mod types;

pub use catalog::{
    AcquisitionType, Catalog, CatalogCache, CatalogEntry, CatalogRecord, Region, Subregion,
};
pub use cross_ref::{
    REFERENCE_URL_BASE, compute_stats, cross_reference, reference_url, region_stats, unmatched,
};
pub use engine::{Engine, Session};
pub use error::{CoreError, CoreErrorCode};
pub use filter::{
    FilterCriteria, FilteredView, OwnershipFilter, RegionGroup, SubregionGroup, apply, filter,
    group_by_region,
};
pub use types::{
    CategoryStats, CompletionStats, CrossReference, DecodeOutcome, DecodedSlot, EnrichedItem,
    RegionStats, SlotSummary, StatsSnapshot,
};
