use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::item_id::ItemId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Weapons,
    Armor,
    Talismans,
    Magic,
    #[serde(alias = "Ashes of War")]
    AshesOfWar,
    #[serde(alias = "Spirit Ashes")]
    SpiritAshes,
    #[serde(alias = "Bell Bearings")]
    BellBearings,
    Cookbooks,
    #[serde(alias = "Crystal Tears")]
    CrystalTears,
    #[serde(alias = "Key Items")]
    KeyItems,
    Other,
}

/// Declared categories in table order. [`classify`] tests them top to
/// bottom and stats list them the same way. `Other` is not a declared range.
pub const DECLARED: [Category; 10] = [
    Category::Weapons,
    Category::Armor,
    Category::Talismans,
    Category::Magic,
    Category::AshesOfWar,
    Category::SpiritAshes,
    Category::BellBearings,
    Category::Cookbooks,
    Category::CrystalTears,
    Category::KeyItems,
];

impl Category {
    /// Inclusive id range, or `None` for `Other`.
    pub fn range(&self) -> Option<(u32, u32)> {
        match *self {
            Self::Weapons => Some((0x00F4_2400, 0x017D_7840)),
            Self::Armor => Some((0x1000_0000, 0x1400_0000)),
            Self::Talismans => Some((0x2000_0000, 0x2400_0000)),
            Self::Magic => Some((0x4000_0000, 0x4800_0000)),
            Self::AshesOfWar => Some((0x8000_0000, 0x8800_0000)),
            Self::SpiritAshes => Some((0x9000_0000, 0x9800_0000)),
            Self::BellBearings => Some((0x4000_07F0, 0x4000_0850)),
            Self::Cookbooks => Some((0x4000_2400, 0x4000_2500)),
            Self::CrystalTears => Some((0x4000_0BC0, 0x4000_0BF0)),
            Self::KeyItems => Some((0x4000_0000, 0x4000_1000)),
            Self::Other => None,
        }
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.range()
            .is_some_and(|(lo, hi)| (lo..=hi).contains(&id.raw()))
    }

    pub fn as_str(&self) -> &'static str {
        match *self {
            Self::Weapons => "Weapons",
            Self::Armor => "Armor",
            Self::Talismans => "Talismans",
            Self::Magic => "Magic",
            Self::AshesOfWar => "Ashes of War",
            Self::SpiritAshes => "Spirit Ashes",
            Self::BellBearings => "Bell Bearings",
            Self::Cookbooks => "Cookbooks",
            Self::CrystalTears => "Crystal Tears",
            Self::KeyItems => "Key Items",
            Self::Other => "Other",
        }
    }

    /// Declared categories followed by `Other`.
    pub fn all() -> impl Iterator<Item = Category> {
        DECLARED.into_iter().chain(std::iter::once(Self::Other))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::all()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                let names: Vec<&str> = Self::all().map(|c| c.as_str()).collect();
                format!("unknown category '{s}', expected one of: {}", names.join(", "))
            })
    }
}

/// Classifies an item id by numeric range, first row of [`DECLARED`] to
/// contain it wins. Total: ids outside every range are `Other`.
///
/// Magic spans `40000000-48000000` and is tested before the Bell Bearings,
/// Cookbooks, Crystal Tears and Key Items rows nested inside it, so those
/// rows never match.
pub fn classify(id: ItemId) -> Category {
    DECLARED
        .into_iter()
        .find(|category| category.contains(id))
        .unwrap_or(Category::Other)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disjoint_rows_classify_at_their_bounds() {
        for category in [
            Category::Weapons,
            Category::Armor,
            Category::Talismans,
            Category::Magic,
            Category::AshesOfWar,
            Category::SpiritAshes,
        ] {
            let (lo, hi) = category.range().expect("declared categories have ranges");
            assert_eq!(classify(ItemId(lo)), category, "{category} lower bound");
            assert_eq!(classify(ItemId(hi)), category, "{category} upper bound");
        }
    }

    #[test]
    fn first_declared_row_wins_inside_magic() {
        assert_eq!(classify(ItemId(0x4000_0000)), Category::Magic);
        assert_eq!(classify(ItemId(0x4000_07F0)), Category::Magic);
        assert_eq!(classify(ItemId(0x4000_0BC0)), Category::Magic);
        assert_eq!(classify(ItemId(0x4000_2400)), Category::Magic);
        assert_eq!(classify(ItemId(0x4000_1000)), Category::Magic);
    }

    #[test]
    fn nested_rows_still_describe_their_ranges() {
        assert!(Category::BellBearings.contains(ItemId(0x4000_07F0)));
        assert!(Category::CrystalTears.contains(ItemId(0x4000_0BF0)));
        assert!(!Category::Cookbooks.contains(ItemId(0x4000_2501)));
        assert!(Category::KeyItems.contains(ItemId(0x4000_0000)));
    }

    #[test]
    fn upper_bounds_are_inclusive() {
        assert_eq!(classify(ItemId(0x017D_7840)), Category::Weapons);
        assert_eq!(classify(ItemId(0x017D_7841)), Category::Other);
        assert_eq!(classify(ItemId(0x4800_0000)), Category::Magic);
        assert_eq!(classify(ItemId(0x4800_0001)), Category::Other);
    }

    #[test]
    fn unmatched_ids_are_other() {
        assert_eq!(classify(ItemId(0)), Category::Other);
        assert_eq!(classify(ItemId(0xDEAD_BEEF)), Category::Other);
        assert_eq!(classify(ItemId(u32::MAX)), Category::Other);
    }

    #[test]
    fn names_parse_back() {
        for category in Category::all() {
            assert_eq!(category.as_str().parse::<Category>(), Ok(category));
        }
        assert_eq!("key items".parse::<Category>(), Ok(Category::KeyItems));
        assert!("Shields".parse::<Category>().is_err());
    }
}
