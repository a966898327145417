//! Geometry types shared between the generator and the host.
//!
//! These are the canonical representations used in piece layout and in the
//! persisted structure records.

use std::fmt;

use crate::constants::CHUNK_SIZE;

/// Integer block position in world space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockPos {
    /// X component
    pub x: i32,
    /// Y component
    pub y: i32,
    /// Z component
    pub z: i32,
}

impl BlockPos {
    /// Creates a new position
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// World origin
    pub const ORIGIN: Self = Self::new(0, 0, 0);

    /// Returns this position moved by the given deltas.
    #[inline]
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.z + dz)
    }

    /// Returns the position `distance` blocks towards `direction`.
    #[inline]
    #[must_use]
    pub const fn step(self, direction: Direction, distance: i32) -> Self {
        let (dx, dz) = direction.offset();
        self.offset(dx * distance, 0, dz * distance)
    }
}

impl fmt::Display for BlockPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Chunk coordinate (identifies a chunk in the world grid).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ChunkCoord {
    /// X coordinate (in chunks, not blocks).
    pub x: i32,
    /// Z coordinate (in chunks, not blocks).
    pub z: i32,
}

impl ChunkCoord {
    /// Creates a new chunk coordinate.
    #[inline]
    #[must_use]
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Converts world block coordinates to chunk coordinate.
    #[inline]
    #[must_use]
    pub const fn from_block_pos(block_x: i32, block_z: i32) -> Self {
        Self {
            x: block_x.div_euclid(CHUNK_SIZE),
            z: block_z.div_euclid(CHUNK_SIZE),
        }
    }

    /// Returns the world X coordinate of the chunk's origin (corner).
    #[inline]
    #[must_use]
    pub const fn world_x(self) -> i32 {
        self.x * CHUNK_SIZE
    }

    /// Returns the world Z coordinate of the chunk's origin.
    #[inline]
    #[must_use]
    pub const fn world_z(self) -> i32 {
        self.z * CHUNK_SIZE
    }

    /// Returns the block position at the horizontal centre of the chunk.
    #[inline]
    #[must_use]
    pub const fn center(self, y: i32) -> BlockPos {
        BlockPos::new(self.world_x() + CHUNK_SIZE / 2, y, self.world_z() + CHUNK_SIZE / 2)
    }
}

/// Horizontal facing of a piece.
///
/// North is -Z, South is +Z, East is +X, West is -X.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Direction {
    /// Towards -Z
    North = 0,
    /// Towards +Z
    South = 1,
    /// Towards +X
    East = 2,
    /// Towards -X
    West = 3,
}

impl Direction {
    /// All horizontal directions, in discriminant order.
    pub const ALL: [Self; 4] = [Self::North, Self::South, Self::East, Self::West];

    /// Rotates 90 degrees clockwise (seen from above).
    #[inline]
    #[must_use]
    pub const fn rotate_cw(self) -> Self {
        match self {
            Self::North => Self::East,
            Self::East => Self::South,
            Self::South => Self::West,
            Self::West => Self::North,
        }
    }

    /// Rotates 90 degrees counter-clockwise (seen from above).
    #[inline]
    #[must_use]
    pub const fn rotate_ccw(self) -> Self {
        match self {
            Self::North => Self::West,
            Self::West => Self::South,
            Self::South => Self::East,
            Self::East => Self::North,
        }
    }

    /// Returns the opposite direction.
    #[inline]
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::South => Self::North,
            Self::East => Self::West,
            Self::West => Self::East,
        }
    }

    /// Unit step `(dx, dz)` of this direction.
    #[inline]
    #[must_use]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::North => (0, -1),
            Self::South => (0, 1),
            Self::East => (1, 0),
            Self::West => (-1, 0),
        }
    }

    /// World axis `(dx, dz)` that a piece's local X axis maps to.
    #[inline]
    #[must_use]
    pub const fn local_x_axis(self) -> (i32, i32) {
        match self {
            Self::North | Self::South => (1, 0),
            Self::East | Self::West => (0, 1),
        }
    }

    /// Maps a direction expressed in a piece's local frame to world space.
    ///
    /// Local frames are authored as if the piece faced north. South and
    /// west facings mirror the frame across the X axis, east and west
    /// facings then rotate it clockwise.
    #[must_use]
    pub const fn orient(self, local: Self) -> Self {
        let mirrored = match (self, local) {
            (Self::South | Self::West, Self::North) => Self::South,
            (Self::South | Self::West, Self::South) => Self::North,
            (_, other) => other,
        };
        match self {
            Self::East | Self::West => mirrored.rotate_cw(),
            Self::North | Self::South => mirrored,
        }
    }

    /// Converts from u8.
    #[must_use]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::North),
            1 => Some(Self::South),
            2 => Some(Self::East),
            3 => Some(Self::West),
            _ => None,
        }
    }

    /// Lowercase name, as used in block state properties.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::North => "north",
            Self::South => "south",
            Self::East => "east",
            Self::West => "west",
        }
    }
}

/// Axis-aligned box with inclusive bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BoundingBox {
    /// Minimum corner (inclusive)
    pub min: BlockPos,
    /// Maximum corner (inclusive)
    pub max: BlockPos,
}

impl BoundingBox {
    /// Creates a box spanning two corners in any order.
    #[must_use]
    pub fn new(a: BlockPos, b: BlockPos) -> Self {
        Self {
            min: BlockPos::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
            max: BlockPos::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
        }
    }

    /// Computes the box of a piece from its anchor, size and facing.
    ///
    /// The anchor is the world position of the piece's local origin. `length`
    /// extends along `facing`, `width` along the local X axis, so east and
    /// west facings swap the roles of width and length on the world axes.
    ///
    /// # Arguments
    ///
    /// * `anchor` - World position of local `(0, 0, 0)`
    /// * `width` - Size across the facing (local X), at least 1
    /// * `height` - Vertical size, at least 1
    /// * `length` - Size along the facing (local Z), at least 1
    /// * `facing` - Direction the piece extends towards
    #[must_use]
    pub const fn from_anchor(
        anchor: BlockPos,
        width: i32,
        height: i32,
        length: i32,
        facing: Direction,
    ) -> Self {
        let BlockPos { x, y, z } = anchor;
        let top = y + height - 1;
        let (min, max) = match facing {
            Direction::North => (
                BlockPos::new(x, y, z - length + 1),
                BlockPos::new(x + width - 1, top, z),
            ),
            Direction::South => (
                BlockPos::new(x, y, z),
                BlockPos::new(x + width - 1, top, z + length - 1),
            ),
            Direction::East => (
                BlockPos::new(x, y, z),
                BlockPos::new(x + length - 1, top, z + width - 1),
            ),
            Direction::West => (
                BlockPos::new(x - length + 1, y, z),
                BlockPos::new(x, top, z + width - 1),
            ),
        };
        Self { min, max }
    }

    /// Maps local piece coordinates to world space.
    ///
    /// Consistent with [`BoundingBox::from_anchor`]: local `(0, 0, 0)` is
    /// the anchor and local Z grows along `facing`.
    #[inline]
    #[must_use]
    pub const fn local_to_world(&self, facing: Direction, x: i32, y: i32, z: i32) -> BlockPos {
        let wy = self.min.y + y;
        match facing {
            Direction::North => BlockPos::new(self.min.x + x, wy, self.max.z - z),
            Direction::South => BlockPos::new(self.min.x + x, wy, self.min.z + z),
            Direction::East => BlockPos::new(self.min.x + z, wy, self.min.z + x),
            Direction::West => BlockPos::new(self.max.x - z, wy, self.min.z + x),
        }
    }

    /// Returns true if the boxes overlap on all three axes.
    #[inline]
    #[must_use]
    pub const fn intersects(&self, other: &Self) -> bool {
        self.max.x >= other.min.x
            && self.min.x <= other.max.x
            && self.max.y >= other.min.y
            && self.min.y <= other.max.y
            && self.max.z >= other.min.z
            && self.min.z <= other.max.z
    }

    /// Returns true if the position lies inside the box.
    #[inline]
    #[must_use]
    pub const fn contains(&self, pos: BlockPos) -> bool {
        pos.x >= self.min.x
            && pos.x <= self.max.x
            && pos.y >= self.min.y
            && pos.y <= self.max.y
            && pos.z >= self.min.z
            && pos.z <= self.max.z
    }

    /// Size along X.
    #[inline]
    #[must_use]
    pub const fn span_x(&self) -> i32 {
        self.max.x - self.min.x + 1
    }

    /// Size along Z.
    #[inline]
    #[must_use]
    pub const fn span_z(&self) -> i32 {
        self.max.z - self.min.z + 1
    }

    /// Centre block (rounded towards the minimum corner).
    #[inline]
    #[must_use]
    pub const fn center(&self) -> BlockPos {
        BlockPos::new(
            self.min.x + (self.max.x - self.min.x) / 2,
            self.min.y + (self.max.y - self.min.y) / 2,
            self.min.z + (self.max.z - self.min.z) / 2,
        )
    }

    /// First block outside the face towards `direction`, centred on that face.
    ///
    /// This is where a successor piece leaving through that face begins.
    #[must_use]
    pub const fn exit_point(&self, direction: Direction, y: i32) -> BlockPos {
        let center = self.center();
        match direction {
            Direction::North => BlockPos::new(center.x, y, self.min.z - 1),
            Direction::South => BlockPos::new(center.x, y, self.max.z + 1),
            Direction::East => BlockPos::new(self.max.x + 1, y, center.z),
            Direction::West => BlockPos::new(self.min.x - 1, y, center.z),
        }
    }

    /// Smallest box containing both boxes.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self::new(
            BlockPos::new(
                self.min.x.min(other.min.x),
                self.min.y.min(other.min.y),
                self.min.z.min(other.min.z),
            ),
            BlockPos::new(
                self.max.x.max(other.max.x),
                self.max.y.max(other.max.y),
                self.max.z.max(other.max.z),
            ),
        )
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} -> {}]", self.min, self.max)
    }
}
