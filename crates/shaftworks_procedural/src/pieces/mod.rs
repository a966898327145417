//! # Mineshaft Pieces
//!
//! A mineshaft is a list of pieces, each an oriented box with a kind:
//!
//! | Kind     | W x H x L | Successors                                     |
//! |----------|-----------|------------------------------------------------|
//! | Entrance | 9 x 6 x 9 | corridor on every side                         |
//! | Tunnel   | 5 x 5 x 8 | corridor ahead, optional side rooms            |
//! | Turn     | 5 x 5 x 5 | one corridor to the left or right              |
//! | Stairs   | 5 x 9 x 8 | corridor ahead, four blocks lower              |
//! | Crossing | 5 x 5 x 5 | optional corridors ahead, left and right       |
//! | Room     | 9 x 6 x 7 | corridor through the far wall if it has an exit |
//! | DeadEnd  | 5 x 5 x 3 | none                                           |
//!
//! ## Local Frame
//!
//! Every piece is authored in a local frame: X across the piece, Y up, Z
//! along its facing. Local `(0, 0, 0)` is the anchor corner; see
//! [`BoundingBox::local_to_world`] for the mapping to world space.
//!
//! ## Lifecycle
//!
//! Growth asks a piece for [`Proposal`]s and never writes blocks. Carving
//! happens later, in placement order, through a [`PieceCanvas`].

mod canvas;
mod crossing;
mod dead_end;
mod entrance;
mod room;
mod stairs;
mod tunnel;
mod turn;

use shaftworks_shared::{BlockPos, BoundingBox, Direction};

use crate::config::GeneratorConfig;
use crate::error::{PersistenceError, PersistenceResult};
use crate::persistence::{ByteReader, ByteWriter};
use crate::random::StructureRandom;
use crate::theme::ThemeVariant;
use crate::world::WorldAccess;

pub use canvas::{Local, PieceCanvas};
pub use turn::uses_left_layout;

/// Piece kind discriminator, also the persisted type tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum PieceTag {
    /// Start hub
    Entrance = 0,
    /// Straight corridor
    Tunnel = 1,
    /// 90 degree turn
    Turn = 2,
    /// Descending stairs
    Stairs = 3,
    /// Three-way crossing
    Crossing = 4,
    /// Side room
    Room = 5,
    /// Terminal cap
    DeadEnd = 6,
}

impl PieceTag {
    /// All kinds, in tag order.
    pub const ALL: [Self; 7] = [
        Self::Entrance,
        Self::Tunnel,
        Self::Turn,
        Self::Stairs,
        Self::Crossing,
        Self::Room,
        Self::DeadEnd,
    ];

    /// Local `(width, height, length)`.
    #[must_use]
    pub const fn dimensions(self) -> (i32, i32, i32) {
        match self {
            Self::Entrance => entrance::SIZE,
            Self::Tunnel => tunnel::SIZE,
            Self::Turn => turn::SIZE,
            Self::Stairs => stairs::SIZE,
            Self::Crossing => crossing::SIZE,
            Self::Room => room::SIZE,
            Self::DeadEnd => dead_end::SIZE,
        }
    }

    /// Converts from u8.
    #[must_use]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Entrance),
            1 => Some(Self::Tunnel),
            2 => Some(Self::Turn),
            3 => Some(Self::Stairs),
            4 => Some(Self::Crossing),
            5 => Some(Self::Room),
            6 => Some(Self::DeadEnd),
            _ => None,
        }
    }

    /// Lowercase name for logs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Entrance => "entrance",
            Self::Tunnel => "tunnel",
            Self::Turn => "turn",
            Self::Stairs => "stairs",
            Self::Crossing => "crossing",
            Self::Room => "room",
            Self::DeadEnd => "dead_end",
        }
    }
}

/// Which way a turn bends, relative to its facing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TurnSide {
    /// Counter-clockwise
    Left = 0,
    /// Clockwise
    Right = 1,
}

impl TurnSide {
    /// Direction of travel after turning from `facing`.
    #[must_use]
    pub const fn apply(self, facing: Direction) -> Direction {
        match self {
            Self::Left => facing.rotate_ccw(),
            Self::Right => facing.rotate_cw(),
        }
    }

    /// Converts from u8.
    #[must_use]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Left),
            1 => Some(Self::Right),
            _ => None,
        }
    }
}

/// Piece kind plus the per-kind state fixed at creation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PieceVariant {
    /// Start hub.
    Entrance,
    /// Straight corridor.
    Tunnel,
    /// Turn towards `side`.
    Turn {
        /// Bend direction.
        side: TurnSide,
    },
    /// Descending stairs.
    Stairs,
    /// Three-way crossing.
    Crossing,
    /// Side room.
    Room {
        /// Whether a corridor continues through the far wall.
        has_exit: bool,
    },
    /// Terminal cap.
    DeadEnd,
}

impl PieceVariant {
    /// Kind discriminator.
    #[must_use]
    pub const fn tag(self) -> PieceTag {
        match self {
            Self::Entrance => PieceTag::Entrance,
            Self::Tunnel => PieceTag::Tunnel,
            Self::Turn { .. } => PieceTag::Turn,
            Self::Stairs => PieceTag::Stairs,
            Self::Crossing => PieceTag::Crossing,
            Self::Room { .. } => PieceTag::Room,
            Self::DeadEnd => PieceTag::DeadEnd,
        }
    }

    /// Creates a variant of kind `tag`, rolling any per-kind state.
    pub fn roll(tag: PieceTag, config: &GeneratorConfig, rng: &mut StructureRandom) -> Self {
        match tag {
            PieceTag::Entrance => Self::Entrance,
            PieceTag::Tunnel => Self::Tunnel,
            PieceTag::Turn => Self::Turn {
                side: if rng.next_bool() { TurnSide::Right } else { TurnSide::Left },
            },
            PieceTag::Stairs => Self::Stairs,
            PieceTag::Crossing => Self::Crossing,
            PieceTag::Room => Self::Room {
                has_exit: rng.chance(config.room_exit_chance),
            },
            PieceTag::DeadEnd => Self::DeadEnd,
        }
    }
}

/// What a proposed successor should be.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SuccessorHint {
    /// Any corridor kind; the generator rolls it.
    Corridor,
    /// A side room.
    SideRoom,
    /// This exact kind.
    Exact(PieceTag),
}

/// A candidate successor leaving a piece through one of its faces.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Proposal {
    /// First cell beyond the exit face, centred, at the exit floor level.
    pub entry: BlockPos,
    /// Facing of the successor.
    pub facing: Direction,
    /// Requested kind.
    pub hint: SuccessorHint,
}

/// Why a piece was not carved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VetoReason {
    /// A cell on the box shell holds water or lava.
    Liquid,
    /// Both opposite floor corners lie in an ocean biome.
    Ocean,
}

/// Result of carving one piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CarveOutcome {
    /// Blocks were written.
    Placed,
    /// Nothing was written.
    Vetoed(VetoReason),
}

/// A placed piece: kind, immutable geometry and remaining chain length.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    /// Kind and per-kind state.
    pub variant: PieceVariant,
    /// World-space box.
    pub bounding_box: BoundingBox,
    /// Direction the piece extends towards.
    pub facing: Direction,
    /// Remaining growth allowance; 0 means no successors.
    pub chain_length: u32,
}

impl Piece {
    /// Creates a piece whose local origin sits at `anchor`.
    #[must_use]
    pub fn new(variant: PieceVariant, anchor: BlockPos, facing: Direction, chain_length: u32) -> Self {
        let (width, height, length) = variant.tag().dimensions();
        Self {
            variant,
            bounding_box: BoundingBox::from_anchor(anchor, width, height, length, facing),
            facing,
            chain_length,
        }
    }

    /// Creates a piece with an explicit box (used by restore).
    #[must_use]
    pub const fn with_box(
        variant: PieceVariant,
        bounding_box: BoundingBox,
        facing: Direction,
        chain_length: u32,
    ) -> Self {
        Self {
            variant,
            bounding_box,
            facing,
            chain_length,
        }
    }

    /// Kind discriminator.
    #[inline]
    #[must_use]
    pub const fn tag(&self) -> PieceTag {
        self.variant.tag()
    }

    /// Anchor of a piece of kind `tag` entered at `entry` while facing `facing`.
    ///
    /// The entry cell is centred across the piece. Stairs are entered at
    /// their upper floor, so their anchor sits four blocks lower.
    #[must_use]
    pub const fn anchor_for_entry(tag: PieceTag, entry: BlockPos, facing: Direction) -> BlockPos {
        let (width, _, _) = tag.dimensions();
        let (ax, az) = facing.local_x_axis();
        let half = width / 2;
        let drop = match tag {
            PieceTag::Stairs => stairs::DESCENT,
            _ => 0,
        };
        entry.offset(-ax * half, -drop, -az * half)
    }

    /// Floor level successors leave at.
    #[inline]
    #[must_use]
    pub const fn exit_floor_y(&self) -> i32 {
        self.bounding_box.min.y
    }

    /// Proposal leaving through the face towards `direction`.
    #[must_use]
    pub const fn exit(&self, direction: Direction, hint: SuccessorHint) -> Proposal {
        Proposal {
            entry: self.bounding_box.exit_point(direction, self.exit_floor_y()),
            facing: direction,
            hint,
        }
    }

    /// Successor candidates. Consumes randomness for optional branches only.
    pub fn propose_successors(&self, config: &GeneratorConfig, rng: &mut StructureRandom) -> Vec<Proposal> {
        match self.variant {
            PieceVariant::Entrance => entrance::propose(self),
            PieceVariant::Tunnel => tunnel::propose(self, config, rng),
            PieceVariant::Turn { side } => turn::propose(self, side),
            PieceVariant::Stairs => stairs::propose(self),
            PieceVariant::Crossing => crossing::propose(self, config, rng),
            PieceVariant::Room { has_exit } => room::propose(self, has_exit),
            PieceVariant::DeadEnd => Vec::new(),
        }
    }

    /// Re-validates the piece against the world and carves it.
    ///
    /// A vetoed piece writes nothing.
    pub fn carve<W: WorldAccess + ?Sized>(
        &self,
        world: &mut W,
        theme: &ThemeVariant,
        rng: &mut StructureRandom,
    ) -> CarveOutcome {
        let mut canvas = PieceCanvas::new(world, theme, rng, self);
        if let Some(reason) = canvas.veto() {
            tracing::trace!("Vetoed {} at {}: {:?}", self.tag().name(), self.bounding_box, reason);
            return CarveOutcome::Vetoed(reason);
        }
        match self.variant {
            PieceVariant::Entrance => entrance::carve(&mut canvas),
            PieceVariant::Tunnel => tunnel::carve(&mut canvas),
            PieceVariant::Turn { side } => turn::carve(&mut canvas, side),
            PieceVariant::Stairs => stairs::carve(&mut canvas),
            PieceVariant::Crossing => crossing::carve(&mut canvas),
            PieceVariant::Room { has_exit } => room::carve(&mut canvas, has_exit),
            PieceVariant::DeadEnd => dead_end::carve(&mut canvas),
        }
        CarveOutcome::Placed
    }

    /// Appends the piece record.
    pub fn write_record(&self, out: &mut ByteWriter) {
        let bb = &self.bounding_box;
        out.put_u8(self.tag() as u8);
        for value in [bb.min.x, bb.min.y, bb.min.z, bb.max.x, bb.max.y, bb.max.z] {
            out.put_i32(value);
        }
        out.put_u8(self.facing as u8);
        out.put_u32(self.chain_length);
        match self.variant {
            PieceVariant::Turn { side } => out.put_u8(side as u8),
            PieceVariant::Room { has_exit } => out.put_u8(u8::from(has_exit)),
            _ => {}
        }
    }

    /// Reads one piece record.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError` on truncated input or invalid tag,
    /// direction or payload bytes.
    pub fn read_record(reader: &mut ByteReader<'_>) -> PersistenceResult<Self> {
        let raw_tag = reader.get_u8()?;
        let tag = PieceTag::from_u8(raw_tag).ok_or(PersistenceError::UnknownPieceTag(raw_tag))?;
        let mut coords = [0i32; 6];
        for value in &mut coords {
            *value = reader.get_i32()?;
        }
        let raw_facing = reader.get_u8()?;
        let facing = Direction::from_u8(raw_facing).ok_or(PersistenceError::InvalidDirection(raw_facing))?;
        let chain_length = reader.get_u32()?;
        let variant = match tag {
            PieceTag::Entrance => PieceVariant::Entrance,
            PieceTag::Tunnel => PieceVariant::Tunnel,
            PieceTag::Turn => {
                let raw = reader.get_u8()?;
                PieceVariant::Turn {
                    side: TurnSide::from_u8(raw).ok_or(PersistenceError::InvalidTurnSide(raw))?,
                }
            }
            PieceTag::Stairs => PieceVariant::Stairs,
            PieceTag::Crossing => PieceVariant::Crossing,
            PieceTag::Room => {
                let has_exit = match reader.get_u8()? {
                    0 => false,
                    1 => true,
                    raw => return Err(PersistenceError::InvalidRoomExit(raw)),
                };
                PieceVariant::Room { has_exit }
            }
            PieceTag::DeadEnd => PieceVariant::DeadEnd,
        };
        let [x0, y0, z0, x1, y1, z1] = coords;
        let bounding_box = BoundingBox::new(BlockPos::new(x0, y0, z0), BlockPos::new(x1, y1, z1));
        Ok(Self::with_box(variant, bounding_box, facing, chain_length))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::WorldSeed;

    #[test]
    fn test_dimensions() {
        assert_eq!(PieceTag::Entrance.dimensions(), (9, 6, 9));
        assert_eq!(PieceTag::Tunnel.dimensions(), (5, 5, 8));
        assert_eq!(PieceTag::Turn.dimensions(), (5, 5, 5));
        assert_eq!(PieceTag::Stairs.dimensions(), (5, 9, 8));
        assert_eq!(PieceTag::Crossing.dimensions(), (5, 5, 5));
        assert_eq!(PieceTag::Room.dimensions(), (9, 6, 7));
        assert_eq!(PieceTag::DeadEnd.dimensions(), (5, 5, 3));
    }

    #[test]
    fn test_tag_roundtrip() {
        for tag in PieceTag::ALL {
            assert_eq!(PieceTag::from_u8(tag as u8), Some(tag));
        }
        assert_eq!(PieceTag::from_u8(7), None);
    }

    #[test]
    fn test_turn_side_direction() {
        assert_eq!(TurnSide::Left.apply(Direction::North), Direction::West);
        assert_eq!(TurnSide::Right.apply(Direction::North), Direction::East);
        assert_eq!(TurnSide::Left.apply(Direction::East), Direction::North);
    }

    #[test]
    fn test_successor_box_is_adjacent_to_exit() {
        let parent = Piece::new(PieceVariant::Tunnel, BlockPos::new(0, 30, 0), Direction::East, 5);
        for dir in [Direction::East, Direction::North, Direction::South] {
            let proposal = parent.exit(dir, SuccessorHint::Corridor);
            let anchor = Piece::anchor_for_entry(PieceTag::Tunnel, proposal.entry, dir);
            let child = Piece::new(PieceVariant::Tunnel, anchor, dir, 4);
            assert!(!child.bounding_box.intersects(&parent.bounding_box), "{dir:?}");
            assert!(child.bounding_box.contains(proposal.entry));
            let (dx, dz) = dir.offset();
            assert!(parent.bounding_box.contains(proposal.entry.offset(-dx, 0, -dz)));
        }
    }

    #[test]
    fn test_stairs_entered_at_upper_floor() {
        let entry = BlockPos::new(10, 40, 10);
        let anchor = Piece::anchor_for_entry(PieceTag::Stairs, entry, Direction::South);
        let stairs = Piece::new(PieceVariant::Stairs, anchor, Direction::South, 3);
        assert_eq!(stairs.bounding_box.min.y, 36);
        assert_eq!(stairs.exit_floor_y(), 36);
        assert!(stairs.bounding_box.contains(entry));
    }

    #[test]
    fn test_roll_is_deterministic() {
        let config = GeneratorConfig::default();
        let mut a = StructureRandom::new(WorldSeed::new(9));
        let mut b = StructureRandom::new(WorldSeed::new(9));
        for tag in PieceTag::ALL {
            assert_eq!(PieceVariant::roll(tag, &config, &mut a), PieceVariant::roll(tag, &config, &mut b));
            assert_eq!(PieceVariant::roll(tag, &config, &mut a).tag(), tag);
            let _ = PieceVariant::roll(tag, &config, &mut b);
        }
    }

    #[test]
    fn test_dead_end_has_no_successors() {
        let config = GeneratorConfig::default();
        let mut rng = StructureRandom::new(WorldSeed::new(1));
        let piece = Piece::new(PieceVariant::DeadEnd, BlockPos::ORIGIN, Direction::West, 9);
        assert!(piece.propose_successors(&config, &mut rng).is_empty());
        assert_eq!(rng.draws(), 0);
    }
}
