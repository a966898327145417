//! Carving helpers shared by every piece kind.
//!
//! All coordinates are local to the piece being carved. Regions are
//! inclusive and may be given with their corners in any order.

use shaftworks_shared::{
    BlockId, BlockPos, BoundingBox, Direction, RailShape, CACTUS_SOIL, DEAD_BUSH_SOIL, MUSHROOM_SOIL,
};

use super::{Piece, VetoReason};
use crate::random::StructureRandom;
use crate::selector::BlockSelector;
use crate::theme::{LegVariant, ThemeVariant};
use crate::world::WorldAccess;

/// Local `(x, y, z)` coordinate inside a piece.
pub type Local = (i32, i32, i32);

/// Deepest a leg may reach below a floor before it is abandoned.
const MAX_LEG_DEPTH: i32 = 24;

/// Cells of the inclusive region between two corners, Y outermost.
fn cells(a: Local, b: Local) -> impl Iterator<Item = Local> {
    let (x0, x1) = (a.0.min(b.0), a.0.max(b.0));
    let (y0, y1) = (a.1.min(b.1), a.1.max(b.1));
    let (z0, z1) = (a.2.min(b.2), a.2.max(b.2));
    (y0..=y1).flat_map(move |y| (z0..=z1).flat_map(move |z| (x0..=x1).map(move |x| (x, y, z))))
}

/// Write access to the world in one piece's local frame.
pub struct PieceCanvas<'a, W: WorldAccess + ?Sized> {
    world: &'a mut W,
    theme: &'a ThemeVariant,
    rng: &'a mut StructureRandom,
    bounds: BoundingBox,
    facing: Direction,
    far_corner: (i32, i32),
}

impl<'a, W: WorldAccess + ?Sized> PieceCanvas<'a, W> {
    /// Creates a canvas for `piece`.
    pub fn new(
        world: &'a mut W,
        theme: &'a ThemeVariant,
        rng: &'a mut StructureRandom,
        piece: &Piece,
    ) -> Self {
        let (width, _, length) = piece.tag().dimensions();
        Self {
            world,
            theme,
            rng,
            bounds: piece.bounding_box,
            facing: piece.facing,
            far_corner: (width - 1, length - 1),
        }
    }

    /// Theme the piece is carved with.
    #[must_use]
    pub fn theme(&self) -> &'a ThemeVariant {
        self.theme
    }

    /// Facing of the piece being carved.
    #[must_use]
    pub fn facing(&self) -> Direction {
        self.facing
    }

    /// World position of a local cell.
    #[inline]
    #[must_use]
    pub fn pos(&self, local: Local) -> BlockPos {
        self.bounds.local_to_world(self.facing, local.0, local.1, local.2)
    }

    /// Block at a local cell.
    #[must_use]
    pub fn get(&self, local: Local) -> BlockId {
        self.world.block(self.pos(local))
    }

    /// Writes a block at a local cell.
    pub fn set(&mut self, local: Local, block: BlockId) {
        let pos = self.pos(local);
        self.world.set_block(pos, block);
    }

    /// Fills a region with one block.
    pub fn fill(&mut self, a: Local, b: Local, block: &BlockId) {
        for cell in cells(a, b) {
            self.set(cell, block.clone());
        }
    }

    /// Clears a region to air.
    pub fn fill_air(&mut self, a: Local, b: Local) {
        self.fill(a, b, &BlockId::AIR);
    }

    /// Fills a region with one selector pick per cell.
    pub fn fill_selector(&mut self, a: Local, b: Local, selector: &BlockSelector) {
        for cell in cells(a, b) {
            let block = selector.pick(self.rng).clone();
            self.set(cell, block);
        }
    }

    /// Writes `block` into the air cells of a region.
    pub fn replace_air(&mut self, a: Local, b: Local, block: &BlockId) {
        for cell in cells(a, b) {
            if self.get(cell).is_air() {
                self.set(cell, block.clone());
            }
        }
    }

    /// Replaces non-air cells of a region with selector picks, each with the
    /// theme's replacement rate.
    pub fn chance_replace_non_air(&mut self, a: Local, b: Local, selector: &BlockSelector) {
        let rate = self.theme.replacement_rate;
        for cell in cells(a, b) {
            if self.get(cell).is_air() {
                continue;
            }
            if self.rng.chance(rate) {
                let block = selector.pick(self.rng).clone();
                self.set(cell, block);
            }
        }
    }

    /// Carves the standard 5-wide corridor shell from local `z0` to `z1`:
    /// retextured walls, ceiling and floor, a 3x3 air core and a bridged floor.
    pub fn corridor_shell(&mut self, z0: i32, z1: i32) {
        let theme = self.theme;
        self.chance_replace_non_air((0, 1, z0), (4, 4, z1), &theme.main_selector);
        self.chance_replace_non_air((0, 0, z0), (4, 0, z1), &theme.floor_selector);
        self.fill_air((1, 1, z0), (3, 3, z1));
        self.replace_air((1, 0, z0), (3, 0, z1), &theme.main_block);
    }

    /// Places a rail authored in the local frame.
    pub fn rail(&mut self, local: Local, shape: RailShape) {
        self.set(local, BlockId::rail(shape.oriented(self.facing)));
    }

    /// Places a straight run of rails along local Z.
    pub fn rail_run(&mut self, x: i32, y: i32, z0: i32, z1: i32) {
        for z in z0.min(z1)..=z0.max(z1) {
            self.rail((x, y, z), RailShape::NorthSouth);
        }
    }

    /// Small support across a corridor at local `z`: posts against both walls
    /// with a main-block base and cap, joined by a beam.
    pub fn support(&mut self, z: i32) {
        let theme = self.theme;
        for x in [1, 3] {
            self.set((x, 1, z), theme.main_block.clone());
            self.set((x, 2, z), theme.support_block.clone());
            self.set((x, 3, z), theme.main_block.clone());
        }
        self.set((2, 3, z), theme.main_block.clone());
    }

    /// Scatters gravel on air cells of a region that stand on solid ground.
    pub fn gravel(&mut self, a: Local, b: Local, chance: f64) {
        let theme = self.theme;
        for cell in cells(a, b) {
            let open = self.get(cell).is_air() && self.get((cell.0, cell.1 - 1, cell.2)).is_solid();
            if open && self.rng.chance(chance) {
                self.set(cell, theme.gravel_block.clone());
            }
        }
    }

    /// Builds a leg under the floor cell at local `(x, 0, z)` if the floor
    /// spans open air or liquid and solid ground lies within reach.
    pub fn leg(&mut self, x: i32, z: i32) {
        let theme = self.theme;
        let mut depth = 1;
        while depth <= MAX_LEG_DEPTH {
            let below = self.get((x, -depth, z));
            if below.is_solid() {
                break;
            }
            depth += 1;
        }
        if depth == 1 || depth > MAX_LEG_DEPTH {
            return;
        }
        let bottom = -(depth - 1);
        let in_lava = self.get((x, bottom, z)).is_lava();
        let selector = if theme.flammable_legs && in_lava {
            &theme.brick_selector
        } else {
            &theme.leg_selector
        };
        tracing::trace!("Leg at {} reaching {} blocks down", self.pos((x, 0, z)), depth - 1);
        match theme.leg_variant {
            LegVariant::Support => {
                let base = selector.pick(self.rng).clone();
                self.set((x, bottom, z), base);
                if bottom < -1 {
                    self.fill((x, bottom + 1, z), (x, -1, z), &theme.support_block);
                }
            }
            LegVariant::Solid => self.fill_selector((x, bottom, z), (x, -1, z), selector),
        }
    }

    /// Rolls floor decorations on air cells of a region that stand on solid
    /// ground. At most one decoration is placed per cell.
    pub fn decorate(&mut self, a: Local, b: Local) {
        let theme = self.theme;
        for cell in cells(a, b) {
            if !self.get(cell).is_air() {
                continue;
            }
            let below = self.get((cell.0, cell.1 - 1, cell.2));
            if !below.is_solid() {
                continue;
            }
            if self.rng.chance(theme.snow_chance) {
                self.set(cell, BlockId::SNOW);
            } else if below.is_one_of(CACTUS_SOIL) && self.rng.chance(theme.cactus_chance) {
                self.set(cell, BlockId::CACTUS);
            } else if below.is_one_of(DEAD_BUSH_SOIL) && self.rng.chance(theme.dead_bush_chance) {
                self.set(cell, BlockId::DEAD_BUSH);
            } else if below.is_one_of(MUSHROOM_SOIL) && self.rng.chance(theme.mushroom_chance) {
                let mushroom = if self.rng.next_bool() {
                    BlockId::RED_MUSHROOM
                } else {
                    BlockId::BROWN_MUSHROOM
                };
                self.set(cell, mushroom);
            }
        }
    }

    /// Rolls vines on air cells of a region next to a solid side wall.
    pub fn vines(&mut self, a: Local, b: Local) {
        let chance = self.theme.vine_chance;
        for cell in cells(a, b) {
            if !self.get(cell).is_air() {
                continue;
            }
            for (dx, wall) in [(-1, Direction::West), (1, Direction::East)] {
                if self.get((cell.0 + dx, cell.1, cell.2)).is_solid() && self.rng.chance(chance) {
                    self.set(cell, BlockId::vine(self.facing.orient(wall)));
                    break;
                }
            }
        }
    }

    /// Returns true if every cell of a region is solid rock or block.
    #[must_use]
    pub fn is_solid_region(&self, a: Local, b: Local) -> bool {
        cells(a, b).all(|cell| self.get(cell).is_solid())
    }

    /// Returns true if any cell on the box shell holds liquid.
    #[must_use]
    pub fn is_touching_liquid(&self) -> bool {
        let BoundingBox { min, max } = self.bounds;
        let on_shell = |x: i32, y: i32, z: i32| {
            x == min.x || x == max.x || y == min.y || y == max.y || z == min.z || z == max.z
        };
        for y in min.y..=max.y {
            for z in min.z..=max.z {
                for x in min.x..=max.x {
                    if on_shell(x, y, z) && self.world.is_liquid(BlockPos::new(x, y, z)) {
                        return true;
                    }
                }
            }
        }
        false
    }

    /// Returns true if the local floor corners `(0, 0)` and
    /// `(END_X, END_Z)` both lie in an ocean biome.
    #[must_use]
    pub fn is_in_ocean(&self) -> bool {
        let (end_x, end_z) = self.far_corner;
        let near = self.world.biome_at(self.pos((0, 0, 0)));
        let far = self.world.biome_at(self.pos((end_x, 0, end_z)));
        near.is_ocean() && far.is_ocean()
    }

    /// Reason the piece must not be carved, if any.
    #[must_use]
    pub fn veto(&self) -> Option<VetoReason> {
        if self.is_touching_liquid() {
            Some(VetoReason::Liquid)
        } else if self.is_in_ocean() {
            Some(VetoReason::Ocean)
        } else {
            None
        }
    }
}
