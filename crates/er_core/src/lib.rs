//! Decoding of Elden Ring `BND4` saves into collected-item ids, and
//! cross-referencing of those ids against a collectible catalog.
//!
//! ```no_run
//! use er_core::core_api::{Catalog, Engine, FilterCriteria, OwnershipFilter, filter};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let bytes = std::fs::read("ER0000.sl2")?;
//! let catalog = Catalog::from_json_str(&std::fs::read_to_string("catalog.json")?)?;
//!
//! let session = Engine::new().open_bytes(&bytes)?;
//! let (_, result) = session.cross_reference(0, &catalog)?;
//! println!("{}% complete", result.stats.global.percentage);
//!
//! let criteria = FilterCriteria {
//!     status: OwnershipFilter::Missing,
//!     ..FilterCriteria::default()
//! };
//! for item in filter(&result.items, &criteria) {
//!     println!("{} ({})", item.name, item.region);
//! }
//! # Ok(())
//! # }
//! ```

pub mod category;
pub mod core_api;
pub mod inventory;
pub mod item_id;
pub mod layout;
pub mod save;
pub mod scanner;

pub use category::{Category, classify};
pub use item_id::ItemId;
