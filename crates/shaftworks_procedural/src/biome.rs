//! # Biome Classification
//!
//! Biomes are described to the generator as sets of upper-case tags
//! (`HOT`, `SANDY`, `MESA`, `OCEAN`, ...). Themes match on tag sets, and the
//! ocean exclusion rule checks for the `OCEAN` tag.
//!
//! The host answers "which tags apply at this position" through
//! [`BiomeSource`]. [`Biome`] provides a small catalogue of vanilla-like
//! biomes with their usual tags for tests and headless hosts.

use std::collections::BTreeSet;
use std::fmt;

use shaftworks_shared::{BlockPos, OCEAN_TAG};

/// Biome types with a fixed tag set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Biome {
    /// Deep ocean
    DeepOcean = 0,
    /// Shallow ocean
    Ocean = 1,
    /// Beach/coastline
    Beach = 2,
    /// Plains/grassland
    Plains = 3,
    /// Forest
    Forest = 4,
    /// Dense jungle
    Jungle = 5,
    /// Arid desert
    Desert = 6,
    /// Desert lakes (rare desert)
    DesertLakes = 7,
    /// Snowy tundra
    Tundra = 8,
    /// Conifer forest
    Taiga = 9,
    /// High mountains
    Mountains = 10,
    /// Swamp/wetland
    Swamp = 11,
    /// Savanna grassland
    Savanna = 12,
    /// Badlands (mesa)
    Badlands = 13,
    /// Eroded badlands (rare mesa)
    ErodedBadlands = 14,
    /// Mushroom fields
    MushroomFields = 15,
}

impl Biome {
    /// Tags carried by this biome.
    #[must_use]
    pub const fn tag_names(self) -> &'static [&'static str] {
        match self {
            Self::DeepOcean | Self::Ocean => &["OCEAN", "WATER", "OVERWORLD"],
            Self::Beach => &["BEACH", "OVERWORLD"],
            Self::Plains => &["PLAINS", "OVERWORLD"],
            Self::Forest => &["FOREST", "OVERWORLD"],
            Self::Jungle => &["HOT", "WET", "DENSE", "JUNGLE", "FOREST", "OVERWORLD"],
            Self::Desert => &["HOT", "DRY", "SANDY", "OVERWORLD"],
            Self::DesertLakes => &["HOT", "DRY", "SANDY", "RARE", "OVERWORLD"],
            Self::Tundra => &["COLD", "SNOWY", "WASTELAND", "OVERWORLD"],
            Self::Taiga => &["COLD", "CONIFEROUS", "FOREST", "OVERWORLD"],
            Self::Mountains => &["MOUNTAIN", "HILLS", "OVERWORLD"],
            Self::Swamp => &["WET", "SWAMP", "OVERWORLD"],
            Self::Savanna => &["HOT", "SAVANNA", "PLAINS", "SPARSE", "OVERWORLD"],
            Self::Badlands => &["MESA", "SANDY", "DRY", "OVERWORLD"],
            Self::ErodedBadlands => &["MESA", "SANDY", "DRY", "RARE", "OVERWORLD"],
            Self::MushroomFields => &["MUSHROOM", "RARE", "OVERWORLD"],
        }
    }

    /// Tag set of this biome.
    #[must_use]
    pub fn tags(self) -> BiomeTags {
        self.tag_names().iter().copied().collect()
    }

    /// Returns true for ocean biomes.
    #[must_use]
    pub const fn is_ocean(self) -> bool {
        matches!(self, Self::DeepOcean | Self::Ocean)
    }

    /// Converts from u8.
    #[must_use]
    pub const fn from_u8(value: u8) -> Option<Self> {
        Some(match value {
            0 => Self::DeepOcean,
            1 => Self::Ocean,
            2 => Self::Beach,
            3 => Self::Plains,
            4 => Self::Forest,
            5 => Self::Jungle,
            6 => Self::Desert,
            7 => Self::DesertLakes,
            8 => Self::Tundra,
            9 => Self::Taiga,
            10 => Self::Mountains,
            11 => Self::Swamp,
            12 => Self::Savanna,
            13 => Self::Badlands,
            14 => Self::ErodedBadlands,
            15 => Self::MushroomFields,
            _ => return None,
        })
    }
}

/// Set of biome tags at one position.
///
/// Tags compare case-insensitively; they are stored upper-case.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BiomeTags(BTreeSet<String>);

impl BiomeTags {
    /// Empty tag set.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// Adds a tag.
    pub fn insert(&mut self, tag: &str) {
        self.0.insert(tag.to_ascii_uppercase());
    }

    /// Returns true if `tag` is present.
    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        if tag.bytes().any(|b| b.is_ascii_lowercase()) {
            self.0.contains(&tag.to_ascii_uppercase())
        } else {
            self.0.contains(tag)
        }
    }

    /// Returns true if every tag of `required` is present.
    ///
    /// An empty requirement is trivially satisfied.
    #[must_use]
    pub fn contains_all<S: AsRef<str>>(&self, required: &[S]) -> bool {
        required.iter().all(|tag| self.contains(tag.as_ref()))
    }

    /// Returns true if the `OCEAN` tag is present.
    #[must_use]
    pub fn is_ocean(&self) -> bool {
        self.contains(OCEAN_TAG)
    }

    /// Number of tags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no tags.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates tags in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<'a> FromIterator<&'a str> for BiomeTags {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut tags = Self::new();
        for tag in iter {
            tags.insert(tag);
        }
        tags
    }
}

impl From<Biome> for BiomeTags {
    fn from(biome: Biome) -> Self {
        biome.tags()
    }
}

impl fmt::Display for BiomeTags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, tag) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(tag)?;
        }
        f.write_str("]")
    }
}

/// Answers which biome tags apply at a world position.
pub trait BiomeSource {
    /// Tags of the biome at `pos`.
    fn biome_tags(&self, pos: BlockPos) -> BiomeTags;
}

impl BiomeSource for Biome {
    fn biome_tags(&self, _pos: BlockPos) -> BiomeTags {
        self.tags()
    }
}

impl BiomeSource for BiomeTags {
    fn biome_tags(&self, _pos: BlockPos) -> BiomeTags {
        self.clone()
    }
}

impl<T: BiomeSource + ?Sized> BiomeSource for &T {
    fn biome_tags(&self, pos: BlockPos) -> BiomeTags {
        (**self).biome_tags(pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_biome_roundtrip() {
        for i in 0..16u8 {
            let biome = Biome::from_u8(i).unwrap();
            assert_eq!(biome as u8, i);
        }
        assert_eq!(Biome::from_u8(16), None);
    }

    #[test]
    fn test_ocean_tagging() {
        for i in 0..16u8 {
            let biome = Biome::from_u8(i).unwrap();
            assert_eq!(biome.tags().is_ocean(), biome.is_ocean(), "{biome:?}");
        }
    }

    #[test]
    fn test_tags_case_insensitive() {
        let tags: BiomeTags = ["hot", "Dry"].into_iter().collect();
        assert!(tags.contains("HOT"));
        assert!(tags.contains("dry"));
        assert!(tags.contains_all(&["HOT", "DRY"]));
        assert!(!tags.contains_all(&["HOT", "SANDY"]));
        assert!(tags.contains_all::<&str>(&[]));
        assert_eq!(tags.to_string(), "[DRY, HOT]");
    }

    #[test]
    fn test_uniform_sources() {
        let pos = BlockPos::new(100, 30, -40);
        assert!(Biome::Desert.biome_tags(pos).contains_all(&["HOT", "DRY", "SANDY"]));
        let tags = Biome::Ocean.tags();
        assert!(tags.biome_tags(pos).is_ocean());
    }
}
