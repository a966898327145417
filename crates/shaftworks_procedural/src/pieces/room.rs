//! Side room with a brick floor and a hatch down to a cellar.
//!
//! The doorway is punched through the wall of the piece the room branches
//! from, one cell in front of local z = 0. The cellar sits below the room's
//! box and is only dug into intact rock; without it the hatch is left out.

use shaftworks_shared::{BlockId, Direction};

use super::{Piece, PieceCanvas, Proposal, SuccessorHint};
use crate::world::WorldAccess;

pub(super) const SIZE: (i32, i32, i32) = (9, 6, 7);

const END_X: i32 = SIZE.0 - 1;
const END_Y: i32 = SIZE.1 - 1;
const END_Z: i32 = SIZE.2 - 1;
const MID_X: i32 = SIZE.0 / 2;

/// Floor cell holding the trapdoor, against the far wall.
const HATCH: (i32, i32) = (END_X - 2, END_Z - 1);
/// Air height of the cellar below the floor.
const CELLAR_DEPTH: i32 = 3;

pub(super) fn propose(piece: &Piece, has_exit: bool) -> Vec<Proposal> {
    if has_exit {
        vec![piece.exit(piece.facing, SuccessorHint::Corridor)]
    } else {
        Vec::new()
    }
}

pub(super) fn carve<W: WorldAccess + ?Sized>(canvas: &mut PieceCanvas<'_, W>, has_exit: bool) {
    let theme = canvas.theme();
    canvas.chance_replace_non_air((0, 1, 0), (END_X, END_Y, END_Z), &theme.main_selector);
    canvas.chance_replace_non_air((0, 0, 0), (END_X, 0, END_Z), &theme.brick_selector);
    canvas.fill_air((1, 1, 1), (END_X - 1, END_Y - 1, END_Z - 1));
    canvas.fill_selector((1, 0, 1), (END_X - 1, 0, END_Z - 1), &theme.brick_selector);

    let mut doorways = vec![0];
    if has_exit {
        doorways.push(END_Z);
    }
    for z in doorways {
        canvas.fill_air((MID_X - 1, 1, z), (MID_X + 1, 3, z));
        canvas.replace_air((MID_X - 1, 0, z), (MID_X + 1, 0, z), &theme.main_block);
    }
    if !canvas.get((MID_X, 1, -1)).is_liquid() {
        canvas.fill_air((MID_X, 1, -1), (MID_X, 3, -1));
    }

    for x in [1, END_X - 1] {
        canvas.fill((x, 1, 1), (x, END_Y - 2, 1), &theme.support_block);
        canvas.set((x, END_Y - 1, 1), theme.main_block.clone());
    }

    canvas.decorate((1, 1, 1), (END_X - 1, END_Y - 1, END_Z - 1));
    canvas.vines((1, 1, 1), (END_X - 1, END_Y - 1, END_Z - 1));
    if !cellar(canvas) {
        tracing::trace!("No cellar under room hatch at {}", canvas.pos((HATCH.0, 0, HATCH.1)));
    }
}

/// Digs a brick-lined cellar under the hatch with a ladder on its far
/// wall. Returns false, writing nothing, unless the rock around it is
/// intact.
fn cellar<W: WorldAccess + ?Sized>(canvas: &mut PieceCanvas<'_, W>) -> bool {
    let (hx, hz) = HATCH;
    let shell_low = (hx - 2, -CELLAR_DEPTH - 1, hz - 3);
    let shell_high = (hx + 2, -1, hz + 1);
    if !canvas.is_solid_region(shell_low, shell_high) {
        return false;
    }

    let theme = canvas.theme();
    canvas.fill_selector(shell_low, shell_high, &theme.brick_selector);
    canvas.fill_air((hx - 1, -CELLAR_DEPTH, hz - 2), (hx + 1, -1, hz));

    // Ladder backs onto the far wall (local +z).
    let ladder = BlockId::ladder(canvas.facing().orient(Direction::South));
    canvas.fill((hx, -CELLAR_DEPTH, hz), (hx, -1, hz), &ladder);
    canvas.set((hx, 0, hz), theme.trapdoor_block.clone());
    canvas.set((hx, 1, hz), BlockId::AIR);
    true
}
