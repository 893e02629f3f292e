use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::category::Category;

use super::cross_ref::region_stats;
use super::types::{EnrichedItem, RegionStats};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OwnershipFilter {
    #[default]
    All,
    Owned,
    Missing,
}

impl OwnershipFilter {
    pub fn matches(&self, owned: bool) -> bool {
        match *self {
            Self::All => true,
            Self::Owned => owned,
            Self::Missing => !owned,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match *self {
            Self::All => "all",
            Self::Owned => "owned",
            Self::Missing => "missing",
        }
    }
}

impl fmt::Display for OwnershipFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OwnershipFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "all" => Ok(Self::All),
            "owned" => Ok(Self::Owned),
            "missing" => Ok(Self::Missing),
            _ => Err(format!(
                "invalid status '{s}', expected one of: all, owned, missing"
            )),
        }
    }
}

/// Conjunctive filter; `None` fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
    pub status: OwnershipFilter,
    pub region: Option<String>,
    pub category: Option<Category>,
    pub search: Option<String>,
}

impl FilterCriteria {
    pub fn is_unfiltered(&self) -> bool {
        self.status == OwnershipFilter::All
            && self.region.is_none()
            && self.category.is_none()
            && self.search.as_deref().is_none_or(str::is_empty)
    }

    fn matcher(&self) -> impl Fn(&EnrichedItem) -> bool + '_ {
        let needle = self
            .search
            .as_deref()
            .map(str::to_lowercase)
            .filter(|needle| !needle.is_empty());
        move |item: &EnrichedItem| {
            self.status.matches(item.owned)
                && self.region.as_deref().is_none_or(|r| item.region == r)
                && self.category.is_none_or(|c| item.category() == c)
                && needle
                    .as_deref()
                    .is_none_or(|n| item.name.to_lowercase().contains(n))
        }
    }
}

pub fn filter<'a>(items: &'a [EnrichedItem], criteria: &FilterCriteria) -> Vec<&'a EnrichedItem> {
    let matches = criteria.matcher();
    items.iter().filter(|&item| matches(item)).collect()
}

/// A filtered subset with region stats recomputed over it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredView<'a> {
    pub items: Vec<&'a EnrichedItem>,
    pub regions: Vec<RegionStats>,
}

pub fn apply<'a>(items: &'a [EnrichedItem], criteria: &FilterCriteria) -> FilteredView<'a> {
    let items = filter(items, criteria);
    let regions = region_stats(items.iter().copied());
    FilteredView { items, regions }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubregionGroup<'a> {
    pub name: &'a str,
    pub items: Vec<&'a EnrichedItem>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionGroup<'a> {
    pub name: &'a str,
    pub subregions: Vec<SubregionGroup<'a>>,
}

impl RegionGroup<'_> {
    pub fn item_count(&self) -> usize {
        self.subregions.iter().map(|s| s.items.len()).sum()
    }
}

/// Partitions items by region, then subregion, keeping first-seen order at
/// both levels and item order within each group.
pub fn group_by_region<'a, I>(items: I) -> Vec<RegionGroup<'a>>
where
    I: IntoIterator<Item = &'a EnrichedItem>,
{
    let mut groups: Vec<RegionGroup<'a>> = Vec::new();
    for item in items {
        let region_index = match groups.iter().position(|g| g.name == item.region) {
            Some(index) => index,
            None => {
                groups.push(RegionGroup {
                    name: &item.region,
                    subregions: Vec::new(),
                });
                groups.len() - 1
            }
        };
        let region = &mut groups[region_index];
        match region
            .subregions
            .iter_mut()
            .find(|s| s.name == item.subregion)
        {
            Some(subregion) => subregion.items.push(item),
            None => region.subregions.push(SubregionGroup {
                name: &item.subregion,
                items: vec![item],
            }),
        }
    }
    groups
}
