use std::collections::HashMap;
use std::fmt;
use std::io::Read;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::error::CoreError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum AcquisitionType {
    Boss,
    Foe,
    Chest,
    Quest,
    Merchant,
    Invader,
    Scarab,
    #[default]
    Unrecognized,
}

impl AcquisitionType {
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "boss" => Self::Boss,
            "foe" => Self::Foe,
            "chest" => Self::Chest,
            "quest" => Self::Quest,
            "merchant" => Self::Merchant,
            "invader" => Self::Invader,
            "scarab" => Self::Scarab,
            _ => Self::Unrecognized,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match *self {
            Self::Boss => "boss",
            Self::Foe => "foe",
            Self::Chest => "chest",
            Self::Quest => "quest",
            Self::Merchant => "merchant",
            Self::Invader => "invader",
            Self::Scarab => "scarab",
            Self::Unrecognized => "unrecognized",
        }
    }
}

impl fmt::Display for AcquisitionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for AcquisitionType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for AcquisitionType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = Option::<String>::deserialize(deserializer)?;
        Ok(tag.as_deref().map(Self::from_tag).unwrap_or_default())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
    #[serde(rename = "type", default)]
    pub acquisition: AcquisitionType,
    #[serde(default)]
    pub hint: String,
    #[serde(default, alias = "repeatable")]
    pub farmable: bool,
}

impl CatalogEntry {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            acquisition: AcquisitionType::Unrecognized,
            hint: String::new(),
            farmable: false,
        }
    }
}

pub type Subregion = IndexMap<String, CatalogEntry>;
pub type Region = IndexMap<String, Subregion>;

/// Region → subregion → item id → entry, in source order.
///
/// Iteration order is the order items are listed and counted in, so the
/// maps keep insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    regions: IndexMap<String, Region>,
}

/// One (region, subregion, id) triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogRecord<'a> {
    pub region: &'a str,
    pub subregion: &'a str,
    pub id: &'a str,
    pub entry: &'a CatalogEntry,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(json: &str) -> Result<Self, CoreError> {
        serde_json::from_str(json)
            .map_err(|e| CoreError::catalog(format!("failed to parse catalog JSON: {e}")))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CoreError> {
        serde_json::from_reader(reader)
            .map_err(|e| CoreError::catalog(format!("failed to parse catalog JSON: {e}")))
    }

    /// Combines the base and expansion partitions. A region present in both
    /// takes the expansion's contents wholesale and keeps its base position.
    pub fn merge(base: Catalog, expansion: Catalog) -> Catalog {
        let mut merged = base;
        merged.extend(expansion);
        merged
    }

    /// Adds every region of `other`, replacing regions with the same name.
    pub fn extend(&mut self, other: Catalog) {
        for (region, subregions) in other.regions {
            self.regions.insert(region, subregions);
        }
    }

    pub fn insert(
        &mut self,
        region: impl Into<String>,
        subregion: impl Into<String>,
        id: impl Into<String>,
        entry: CatalogEntry,
    ) -> Option<CatalogEntry> {
        self.regions
            .entry(region.into())
            .or_default()
            .entry(subregion.into())
            .or_default()
            .insert(id.into(), entry)
    }

    pub fn regions(&self) -> impl Iterator<Item = (&str, &Region)> {
        self.regions
            .iter()
            .map(|(name, region)| (name.as_str(), region))
    }

    pub fn region(&self, name: &str) -> Option<&Region> {
        self.regions.get(name)
    }

    pub fn records(&self) -> impl Iterator<Item = CatalogRecord<'_>> {
        self.regions.iter().flat_map(|(region, subregions)| {
            subregions.iter().flat_map(move |(subregion, entries)| {
                entries.iter().map(move |(id, entry)| CatalogRecord {
                    region: region.as_str(),
                    subregion: subregion.as_str(),
                    id: id.as_str(),
                    entry,
                })
            })
        })
    }

    /// Number of (region, subregion, id) triples.
    pub fn len(&self) -> usize {
        self.regions
            .values()
            .flat_map(|subregions| subregions.values())
            .map(IndexMap::len)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Caller-owned catalog cache keyed by source (a path, a URL, a partition
/// name). Nothing is evicted implicitly.
#[derive(Debug, Default)]
pub struct CatalogCache {
    entries: HashMap<String, Catalog>,
}

impl CatalogCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Catalog> {
        self.entries.get(key)
    }

    pub fn get_or_load<F>(&mut self, key: &str, load: F) -> Result<&Catalog, CoreError>
    where
        F: FnOnce() -> Result<Catalog, CoreError>,
    {
        if !self.entries.contains_key(key) {
            let catalog = load()?;
            self.entries.insert(key.to_string(), catalog);
        }
        self.entries
            .get(key)
            .ok_or_else(|| CoreError::catalog(format!("catalog cache lost entry {key}")))
    }

    pub fn invalidate(&mut self, key: &str) -> Option<Catalog> {
        self.entries.remove(key)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
