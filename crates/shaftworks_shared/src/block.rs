//! Block identifiers.
//!
//! Blocks are named the way the host's block registry names them
//! (`namespace:path`, optionally followed by `[property=value,...]`), so
//! theme configuration can refer to any block the host knows about.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::math::Direction;

/// Blocks a cactus may stand on.
pub const CACTUS_SOIL: &[&str] = &["minecraft:sand", "minecraft:red_sand"];

/// Blocks a dead bush may stand on.
pub const DEAD_BUSH_SOIL: &[&str] = &[
    "minecraft:sand",
    "minecraft:red_sand",
    "minecraft:terracotta",
    "minecraft:white_terracotta",
    "minecraft:orange_terracotta",
    "minecraft:yellow_terracotta",
    "minecraft:brown_terracotta",
    "minecraft:red_terracotta",
    "minecraft:light_gray_terracotta",
    "minecraft:dirt",
    "minecraft:coarse_dirt",
    "minecraft:podzol",
];

/// Blocks a mushroom may stand on.
pub const MUSHROOM_SOIL: &[&str] = &["minecraft:mycelium", "minecraft:dirt"];

/// Block names that never count as solid ground or wall.
const PASSABLE: &[&str] = &[
    "minecraft:air",
    "minecraft:cave_air",
    "minecraft:void_air",
    "minecraft:water",
    "minecraft:lava",
    "minecraft:flowing_water",
    "minecraft:flowing_lava",
    "minecraft:rail",
    "minecraft:vine",
    "minecraft:ladder",
    "minecraft:snow",
    "minecraft:dead_bush",
    "minecraft:brown_mushroom",
    "minecraft:red_mushroom",
    "minecraft:cobweb",
    "minecraft:torch",
];

/// Identifier of a block state in the host's registry.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(Cow<'static, str>);

impl BlockId {
    /// Air block (empty).
    pub const AIR: Self = Self::from_static("minecraft:air");
    /// Stone block.
    pub const STONE: Self = Self::from_static("minecraft:stone");
    /// Still water.
    pub const WATER: Self = Self::from_static("minecraft:water");
    /// Still lava.
    pub const LAVA: Self = Self::from_static("minecraft:lava");
    /// Straight north-south rail.
    pub const RAIL: Self = Self::from_static("minecraft:rail");
    /// Single snow layer.
    pub const SNOW: Self = Self::from_static("minecraft:snow");
    /// Cactus.
    pub const CACTUS: Self = Self::from_static("minecraft:cactus");
    /// Dead bush.
    pub const DEAD_BUSH: Self = Self::from_static("minecraft:dead_bush");
    /// Brown mushroom.
    pub const BROWN_MUSHROOM: Self = Self::from_static("minecraft:brown_mushroom");
    /// Red mushroom.
    pub const RED_MUSHROOM: Self = Self::from_static("minecraft:red_mushroom");

    /// Creates an identifier from a static name without allocating.
    #[inline]
    #[must_use]
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    /// Creates an identifier from an owned name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(Cow::Owned(name.into()))
    }

    /// Full identifier including block state properties.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Identifier without the `[...]` property suffix.
    #[must_use]
    pub fn base_name(&self) -> &str {
        match self.0.find('[') {
            Some(idx) => &self.0[..idx],
            None => &self.0,
        }
    }

    /// Returns true for air-like blocks.
    #[must_use]
    pub fn is_air(&self) -> bool {
        matches!(
            self.base_name(),
            "minecraft:air" | "minecraft:cave_air" | "minecraft:void_air"
        )
    }

    /// Returns true for lava.
    #[must_use]
    pub fn is_lava(&self) -> bool {
        self.base_name() == "minecraft:lava"
    }

    /// Returns true for water and lava.
    #[must_use]
    pub fn is_liquid(&self) -> bool {
        matches!(
            self.base_name(),
            "minecraft:water" | "minecraft:lava" | "minecraft:flowing_water" | "minecraft:flowing_lava"
        )
    }

    /// Returns true if this block can carry decorations or vines.
    #[must_use]
    pub fn is_solid(&self) -> bool {
        !self.is_one_of(PASSABLE)
    }

    /// Returns true if the base name is in `names`.
    #[must_use]
    pub fn is_one_of(&self, names: &[&str]) -> bool {
        let base = self.base_name();
        names.iter().any(|name| *name == base)
    }

    /// Rail block with the given shape.
    #[must_use]
    pub fn rail(shape: RailShape) -> Self {
        match shape {
            RailShape::NorthSouth => Self::RAIL,
            other => Self::new(format!("minecraft:rail[shape={}]", other.name())),
        }
    }

    /// Vine hanging on the wall that lies towards `wall`.
    #[must_use]
    pub fn vine(wall: Direction) -> Self {
        Self::new(format!("minecraft:vine[{}=true]", wall.name()))
    }

    /// Ladder facing `facing`, hung on the wall behind it.
    #[must_use]
    pub fn ladder(facing: Direction) -> Self {
        Self::new(format!("minecraft:ladder[facing={}]", facing.name()))
    }
}

impl Default for BlockId {
    fn default() -> Self {
        Self::AIR
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for BlockId {
    fn from(name: &'static str) -> Self {
        Self::from_static(name)
    }
}

/// Shape of a flat rail, named by the two sides it connects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RailShape {
    /// Straight along Z
    NorthSouth,
    /// Straight along X
    EastWest,
    /// Curve joining north and east
    NorthEast,
    /// Curve joining north and west
    NorthWest,
    /// Curve joining south and east
    SouthEast,
    /// Curve joining south and west
    SouthWest,
}

impl RailShape {
    /// The two sides this rail connects.
    #[must_use]
    pub const fn connections(self) -> (Direction, Direction) {
        match self {
            Self::NorthSouth => (Direction::North, Direction::South),
            Self::EastWest => (Direction::East, Direction::West),
            Self::NorthEast => (Direction::North, Direction::East),
            Self::NorthWest => (Direction::North, Direction::West),
            Self::SouthEast => (Direction::South, Direction::East),
            Self::SouthWest => (Direction::South, Direction::West),
        }
    }

    /// Shape connecting `a` and `b` (order does not matter).
    ///
    /// A degenerate pair collapses to the straight rail on its axis.
    #[must_use]
    pub const fn from_connections(a: Direction, b: Direction) -> Self {
        use Direction::{East, North, South, West};
        match (a, b) {
            (North | South, North | South) => Self::NorthSouth,
            (East | West, East | West) => Self::EastWest,
            (North, East) | (East, North) => Self::NorthEast,
            (North, West) | (West, North) => Self::NorthWest,
            (South, East) | (East, South) => Self::SouthEast,
            (South, West) | (West, South) => Self::SouthWest,
        }
    }

    /// Maps a shape authored in a piece's local frame to world space.
    #[must_use]
    pub const fn oriented(self, facing: Direction) -> Self {
        let (a, b) = self.connections();
        Self::from_connections(facing.orient(a), facing.orient(b))
    }

    /// Block state property value.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::NorthSouth => "north_south",
            Self::EastWest => "east_west",
            Self::NorthEast => "north_east",
            Self::NorthWest => "north_west",
            Self::SouthEast => "south_east",
            Self::SouthWest => "south_west",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_name_strips_properties() {
        let id = BlockId::new("minecraft:stone_bricks[variant=mossy]");
        assert_eq!(id.base_name(), "minecraft:stone_bricks");
        assert_eq!(BlockId::STONE.base_name(), "minecraft:stone");
    }

    #[test]
    fn test_solidity() {
        assert!(BlockId::STONE.is_solid());
        assert!(!BlockId::AIR.is_solid());
        assert!(!BlockId::rail(RailShape::EastWest).is_solid());
        assert!(!BlockId::vine(Direction::East).is_solid());
        assert!(!BlockId::ladder(Direction::South).is_solid());
        assert_eq!(BlockId::ladder(Direction::West).as_str(), "minecraft:ladder[facing=west]");
        assert!(BlockId::new("minecraft:sand").is_one_of(CACTUS_SOIL));
        assert!(!BlockId::new("minecraft:dirt").is_one_of(CACTUS_SOIL));
        assert!(BlockId::WATER.is_liquid());
        assert!(BlockId::new("minecraft:lava[level=3]").is_liquid());
        assert!(!BlockId::STONE.is_liquid());
    }

    #[test]
    fn test_rail_orientation() {
        // Authored facing north: unchanged.
        assert_eq!(RailShape::SouthWest.oriented(Direction::North), RailShape::SouthWest);
        // Mirrored across X for south.
        assert_eq!(RailShape::SouthWest.oriented(Direction::South), RailShape::NorthWest);
        // Rotated for east, mirrored and rotated for west.
        assert_eq!(RailShape::NorthSouth.oriented(Direction::East), RailShape::EastWest);
        assert_eq!(RailShape::SouthWest.oriented(Direction::East), RailShape::NorthWest);
        assert_eq!(RailShape::SouthWest.oriented(Direction::West), RailShape::NorthEast);
    }

    #[test]
    fn test_rail_block_names() {
        assert_eq!(BlockId::rail(RailShape::NorthSouth), BlockId::RAIL);
        assert_eq!(
            BlockId::rail(RailShape::SouthEast).as_str(),
            "minecraft:rail[shape=south_east]"
        );
    }
}
