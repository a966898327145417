//! # Themes
//!
//! A theme ([`ThemeVariant`]) decides which blocks a mineshaft is built from
//! and how it is decorated. Themes are keyed by biome tag groups and resolved
//! once per structure from the tags at its starting chunk.
//!
//! ## Resolution
//!
//! [`ThemeRepository::resolve`] searches the variant list in order and stops
//! at the first match. A variant matches when at least one of its tag groups
//! is fully contained in the biome's tags. Order matters: a rare variant must
//! come before the common variant whose tags it extends.
//!
//! ## Sharing
//!
//! Repositories are immutable. [`ThemeStore`] holds the current snapshot and
//! swaps in a new one on reload; structures that already hold an `Arc` to the
//! old snapshot are unaffected.
//!
//! ## File Format
//!
//! ```toml
//! [default_variant]
//! name = "oak"
//! main_block = "minecraft:oak_planks"
//! # ...
//!
//! [[variants]]
//! name = "desert"
//! biome_tags = [["HOT", "DRY", "SANDY"]]
//! # ...
//! ```

use std::path::Path;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use shaftworks_shared::BlockId;

use crate::biome::BiomeTags;
use crate::error::{ConfigError, ConfigResult};
use crate::selector::BlockSelector;

/// How legs under a tunnel spanning open air are built.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum LegVariant {
    /// Leg selector base with a support-block column.
    Support = 1,
    /// Solid leg selector column.
    Solid = 2,
}

impl TryFrom<u8> for LegVariant {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Support),
            2 => Ok(Self::Solid),
            other => Err(format!("leg_variant must be 1 or 2, got {other}")),
        }
    }
}

impl From<LegVariant> for u8 {
    fn from(value: LegVariant) -> Self {
        value as u8
    }
}

/// Biome-dependent block palette and decoration odds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ThemeVariant {
    /// Unique name, persisted with structures.
    pub name: String,
    /// Tag groups; the variant matches if any group is fully present.
    #[serde(default)]
    pub biome_tags: Vec<Vec<String>>,
    /// Walls and ceiling.
    pub main_selector: BlockSelector,
    /// Floors.
    pub floor_selector: BlockSelector,
    /// Brick-like areas: rooms, doorways, flammable legs over lava.
    pub brick_selector: BlockSelector,
    /// Legs under tunnels spanning open air.
    pub leg_selector: BlockSelector,
    /// Base and top of small supports, gap bridges.
    pub main_block: BlockId,
    /// Middle of small supports, type 1 legs.
    pub support_block: BlockId,
    /// Stair half-steps.
    pub slab_block: BlockId,
    /// Floor deposits.
    pub gravel_block: BlockId,
    /// Entrance doorway sides.
    pub stone_wall_block: BlockId,
    /// Entrance doorway lintel.
    pub stone_slab_block: BlockId,
    /// Room hatch.
    pub trapdoor_block: BlockId,
    /// Per wall-adjacent air cell.
    pub vine_chance: f64,
    /// Per floor cell.
    pub snow_chance: f64,
    /// Per floor cell, sand only.
    pub cactus_chance: f64,
    /// Per floor cell, sand/terracotta/dirt only.
    pub dead_bush_chance: f64,
    /// Per floor cell, mycelium/dirt only.
    pub mushroom_chance: f64,
    /// Leg construction.
    pub leg_variant: LegVariant,
    /// Use the brick selector for legs standing in lava.
    pub flammable_legs: bool,
    /// Share of existing solid blocks the selectors replace.
    pub replacement_rate: f64,
}

impl ThemeVariant {
    /// Returns true if any tag group is fully contained in `tags`.
    ///
    /// Empty groups never match.
    #[must_use]
    pub fn matches(&self, tags: &BiomeTags) -> bool {
        self.biome_tags
            .iter()
            .any(|group| !group.is_empty() && tags.contains_all(group))
    }

    /// Wooden theme built around `wood` (e.g. `"oak"`, `"spruce"`).
    fn wooden(name: &str, wood: &str, biome_tags: &[&[&str]]) -> Self {
        let planks = BlockId::new(format!("minecraft:{wood}_planks"));
        Self {
            name: name.to_owned(),
            biome_tags: biome_tags
                .iter()
                .map(|group| group.iter().map(|t| (*t).to_owned()).collect())
                .collect(),
            main_selector: BlockSelector::new(planks.clone())
                .with("minecraft:cobblestone", 0.1)
                .with("minecraft:mossy_cobblestone", 0.1)
                .with("minecraft:air", 0.1),
            floor_selector: BlockSelector::new(planks.clone())
                .with("minecraft:cobblestone", 0.1)
                .with("minecraft:mossy_cobblestone", 0.05)
                .with("minecraft:gravel", 0.05),
            brick_selector: BlockSelector::new("minecraft:stone_bricks")
                .with("minecraft:mossy_stone_bricks", 0.1)
                .with("minecraft:cracked_stone_bricks", 0.1)
                .with("minecraft:cobblestone", 0.1),
            leg_selector: BlockSelector::new(BlockId::new(format!("minecraft:{wood}_log[axis=y]")))
                .with("minecraft:cobblestone", 0.2)
                .with("minecraft:mossy_cobblestone", 0.1),
            main_block: planks,
            support_block: BlockId::new(format!("minecraft:{wood}_fence")),
            slab_block: BlockId::new(format!("minecraft:{wood}_slab")),
            gravel_block: BlockId::from_static("minecraft:gravel"),
            stone_wall_block: BlockId::from_static("minecraft:cobblestone_wall"),
            stone_slab_block: BlockId::from_static("minecraft:stone_brick_slab"),
            trapdoor_block: BlockId::new(format!("minecraft:{wood}_trapdoor")),
            vine_chance: 0.25,
            snow_chance: 0.0,
            cactus_chance: 0.0,
            dead_bush_chance: 0.0,
            mushroom_chance: 0.0,
            leg_variant: LegVariant::Support,
            flammable_legs: true,
            replacement_rate: 0.6,
        }
    }

    /// Plain oak mineshaft used where no variant matches.
    #[must_use]
    pub fn oak() -> Self {
        Self::wooden("oak", "oak", &[])
    }
}

/// Ordered theme variants plus a default.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ThemeRepository {
    /// Searched in order, first match wins.
    #[serde(default)]
    pub variants: Vec<ThemeVariant>,
    /// Used when no variant matches. Its tag groups are ignored.
    pub default_variant: ThemeVariant,
}

impl ThemeRepository {
    /// Creates a repository.
    #[must_use]
    pub fn new(variants: Vec<ThemeVariant>, default_variant: ThemeVariant) -> Self {
        Self {
            variants,
            default_variant,
        }
    }

    /// First variant matching `tags`, else the default.
    #[must_use]
    pub fn resolve(&self, tags: &BiomeTags) -> &ThemeVariant {
        self.variants
            .iter()
            .find(|variant| variant.matches(tags))
            .unwrap_or(&self.default_variant)
    }

    /// Variant with the given name (the default included).
    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<&ThemeVariant> {
        if self.default_variant.name == name {
            return Some(&self.default_variant);
        }
        self.variants.iter().find(|variant| variant.name == name)
    }

    /// Built-in variant set.
    #[must_use]
    pub fn builtin() -> Self {
        let mut red_desert = ThemeVariant::wooden(
            "red_desert",
            "dark_oak",
            &[&["HOT", "DRY", "SANDY", "RARE"], &["MESA", "RARE"]],
        );
        red_desert.main_selector = BlockSelector::new("minecraft:red_sandstone")
            .with("minecraft:cut_red_sandstone", 0.2)
            .with("minecraft:smooth_red_sandstone", 0.1)
            .with("minecraft:red_sand", 0.1);
        red_desert.floor_selector = BlockSelector::new("minecraft:red_sandstone")
            .with("minecraft:red_sand", 0.3);
        red_desert.brick_selector = BlockSelector::new("minecraft:cut_red_sandstone")
            .with("minecraft:chiseled_red_sandstone", 0.1);
        red_desert.leg_selector = BlockSelector::new("minecraft:red_sandstone");
        red_desert.gravel_block = BlockId::from_static("minecraft:red_sand");
        red_desert.stone_wall_block = BlockId::from_static("minecraft:red_sandstone_wall");
        red_desert.stone_slab_block = BlockId::from_static("minecraft:red_sandstone_slab");
        red_desert.vine_chance = 0.0;
        red_desert.cactus_chance = 0.0025;
        red_desert.dead_bush_chance = 0.01;
        red_desert.flammable_legs = false;

        let mut mesa = ThemeVariant::wooden("mesa", "dark_oak", &[&["MESA"]]);
        mesa.main_selector = BlockSelector::new("minecraft:terracotta")
            .with("minecraft:orange_terracotta", 0.15)
            .with("minecraft:red_terracotta", 0.15)
            .with("minecraft:brown_terracotta", 0.1)
            .with("minecraft:red_sand", 0.05);
        mesa.floor_selector = BlockSelector::new("minecraft:terracotta")
            .with("minecraft:red_sand", 0.3)
            .with("minecraft:coarse_dirt", 0.1);
        mesa.gravel_block = BlockId::from_static("minecraft:red_sand");
        mesa.vine_chance = 0.0;
        mesa.cactus_chance = 0.0025;
        mesa.dead_bush_chance = 0.01;

        let mut desert = ThemeVariant::wooden("desert", "birch", &[&["HOT", "DRY", "SANDY"]]);
        desert.main_selector = BlockSelector::new("minecraft:sandstone")
            .with("minecraft:cut_sandstone", 0.2)
            .with("minecraft:smooth_sandstone", 0.1)
            .with("minecraft:sand", 0.1);
        desert.floor_selector = BlockSelector::new("minecraft:sandstone")
            .with("minecraft:sand", 0.3);
        desert.brick_selector = BlockSelector::new("minecraft:cut_sandstone")
            .with("minecraft:chiseled_sandstone", 0.1);
        desert.leg_selector = BlockSelector::new("minecraft:sandstone");
        desert.gravel_block = BlockId::from_static("minecraft:sand");
        desert.stone_wall_block = BlockId::from_static("minecraft:sandstone_wall");
        desert.stone_slab_block = BlockId::from_static("minecraft:sandstone_slab");
        desert.vine_chance = 0.0;
        desert.cactus_chance = 0.0025;
        desert.dead_bush_chance = 0.01;
        desert.flammable_legs = false;

        let mut ice = ThemeVariant::wooden("ice", "spruce", &[&["SNOWY"]]);
        ice.main_selector = BlockSelector::new("minecraft:packed_ice")
            .with("minecraft:ice", 0.1)
            .with("minecraft:snow_block", 0.2)
            .with("minecraft:blue_ice", 0.05);
        ice.floor_selector = BlockSelector::new("minecraft:snow_block")
            .with("minecraft:packed_ice", 0.2);
        ice.brick_selector = BlockSelector::new("minecraft:packed_ice")
            .with("minecraft:snow_block", 0.2);
        ice.leg_selector = BlockSelector::new("minecraft:packed_ice")
            .with("minecraft:blue_ice", 0.2);
        ice.main_block = BlockId::from_static("minecraft:packed_ice");
        ice.gravel_block = BlockId::from_static("minecraft:snow_block");
        ice.vine_chance = 0.0;
        ice.snow_chance = 0.1;
        ice.leg_variant = LegVariant::Solid;
        ice.flammable_legs = false;

        let mut mushroom = ThemeVariant::wooden("mushroom", "oak", &[&["MUSHROOM"]]);
        mushroom.main_selector = BlockSelector::new("minecraft:mushroom_stem")
            .with("minecraft:red_mushroom_block", 0.2)
            .with("minecraft:brown_mushroom_block", 0.2);
        mushroom.floor_selector = BlockSelector::new("minecraft:mycelium")
            .with("minecraft:dirt", 0.2);
        mushroom.leg_selector = BlockSelector::new("minecraft:mushroom_stem");
        mushroom.main_block = BlockId::from_static("minecraft:mushroom_stem");
        mushroom.support_block = BlockId::from_static("minecraft:mushroom_stem");
        mushroom.vine_chance = 0.0;
        mushroom.mushroom_chance = 0.1;
        mushroom.leg_variant = LegVariant::Solid;
        mushroom.flammable_legs = false;

        let mut jungle = ThemeVariant::wooden("jungle", "jungle", &[&["JUNGLE"]]);
        jungle.main_selector = BlockSelector::new("minecraft:jungle_planks")
            .with("minecraft:mossy_cobblestone", 0.3)
            .with("minecraft:mossy_stone_bricks", 0.1);
        jungle.floor_selector = BlockSelector::new("minecraft:jungle_planks")
            .with("minecraft:mossy_cobblestone", 0.2)
            .with("minecraft:dirt", 0.1);
        jungle.vine_chance = 0.6;
        jungle.mushroom_chance = 0.01;

        let mut savanna = ThemeVariant::wooden("savanna", "acacia", &[&["SAVANNA"]]);
        savanna.floor_selector = BlockSelector::new("minecraft:acacia_planks")
            .with("minecraft:coarse_dirt", 0.2)
            .with("minecraft:cobblestone", 0.1);
        savanna.vine_chance = 0.1;
        savanna.dead_bush_chance = 0.005;

        let spruce = ThemeVariant::wooden("spruce", "spruce", &[&["CONIFEROUS"]]);

        Self::new(
            vec![red_desert, mesa, desert, ice, mushroom, jungle, savanna, spruce],
            ThemeVariant::oak(),
        )
    }

    /// Parses a repository from TOML text and validates it.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` for malformed text and
    /// `ConfigError::Invalid` for duplicate or empty names.
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        let repo: Self = toml::from_str(text)?;
        repo.validate()?;
        Ok(repo)
    }

    /// Loads a repository from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Io` if the file cannot be read, otherwise the
    /// errors of [`ThemeRepository::from_toml_str`].
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Loads a repository, falling back to [`ThemeRepository::builtin`] on
    /// any error.
    #[must_use]
    pub fn load_or_builtin(path: &Path) -> Self {
        match Self::load(path) {
            Ok(repo) => {
                tracing::debug!(
                    "Loaded {} theme variants from {}",
                    repo.variants.len(),
                    path.display()
                );
                repo
            }
            Err(err) => {
                tracing::warn!("Theme configuration unusable ({}), using built-in themes", err);
                Self::builtin()
            }
        }
    }

    /// Checks that names are non-empty and unique.
    ///
    /// Selector overflow is allowed and only logged.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` describing the first problem found.
    pub fn validate(&self) -> ConfigResult<()> {
        let all = std::iter::once(&self.default_variant).chain(&self.variants);
        let mut names: Vec<&str> = Vec::with_capacity(self.variants.len() + 1);
        for variant in all {
            if variant.name.trim().is_empty() {
                return Err(ConfigError::Invalid("theme variant with empty name".into()));
            }
            if names.contains(&variant.name.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate theme variant name '{}'",
                    variant.name
                )));
            }
            names.push(&variant.name);

            for (label, selector) in [
                ("main_selector", &variant.main_selector),
                ("floor_selector", &variant.floor_selector),
                ("brick_selector", &variant.brick_selector),
                ("leg_selector", &variant.leg_selector),
            ] {
                if selector.overflows() {
                    tracing::warn!(
                        "Theme '{}': {} chances sum to {:.3}, default block is unreachable",
                        variant.name,
                        label,
                        selector.total_chance()
                    );
                }
            }
        }
        Ok(())
    }
}

impl Default for ThemeRepository {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Shared handle to the current theme snapshot.
#[derive(Debug)]
pub struct ThemeStore {
    current: RwLock<Arc<ThemeRepository>>,
}

impl ThemeStore {
    /// Creates a store holding `repo`.
    #[must_use]
    pub fn new(repo: ThemeRepository) -> Self {
        Self {
            current: RwLock::new(Arc::new(repo)),
        }
    }

    /// Current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Arc<ThemeRepository> {
        Arc::clone(&*self.current.read())
    }

    /// Installs a new snapshot and returns the previous one.
    pub fn replace(&self, repo: ThemeRepository) -> Arc<ThemeRepository> {
        std::mem::replace(&mut *self.current.write(), Arc::new(repo))
    }

    /// Loads `path` and installs it. The current snapshot is kept on error.
    ///
    /// # Errors
    ///
    /// Returns the load error; nothing is replaced in that case.
    pub fn reload(&self, path: &Path) -> ConfigResult<()> {
        let repo = ThemeRepository::load(path)?;
        self.replace(repo);
        Ok(())
    }
}

impl Default for ThemeStore {
    fn default() -> Self {
        Self::new(ThemeRepository::builtin())
    }
}
