//! Start hub with a framed doorway on every side.

use shaftworks_shared::{BlockId, Direction};

use super::{Local, Piece, PieceCanvas, Proposal, SuccessorHint};
use crate::world::WorldAccess;

pub(super) const SIZE: (i32, i32, i32) = (9, 6, 9);

const END_X: i32 = SIZE.0 - 1;
const END_Y: i32 = SIZE.1 - 1;
const END_Z: i32 = SIZE.2 - 1;
const MID: i32 = SIZE.0 / 2;

pub(super) fn propose(piece: &Piece) -> Vec<Proposal> {
    Direction::ALL
        .into_iter()
        .map(|dir| piece.exit(dir, SuccessorHint::Corridor))
        .collect()
}

/// Doorway cells of one side, given as a mapping from the position along the
/// wall to a local cell.
fn doorway<W: WorldAccess + ?Sized>(canvas: &mut PieceCanvas<'_, W>, at: impl Fn(i32, i32) -> Local) {
    let theme = canvas.theme();
    for along in MID - 1..=MID + 1 {
        for y in 1..=3 {
            canvas.set(at(along, y), BlockId::AIR);
        }
        let sill = at(along, 0);
        if canvas.get(sill).is_air() {
            canvas.set(sill, theme.main_block.clone());
        }
        canvas.set(at(along, 4), theme.stone_slab_block.clone());
    }
    for along in [MID - 2, MID + 2] {
        for y in 1..=3 {
            canvas.set(at(along, y), theme.stone_wall_block.clone());
        }
        canvas.set(at(along, 4), theme.stone_slab_block.clone());
    }
}

pub(super) fn carve<W: WorldAccess + ?Sized>(canvas: &mut PieceCanvas<'_, W>) {
    let theme = canvas.theme();
    canvas.chance_replace_non_air((0, 1, 0), (END_X, END_Y, END_Z), &theme.main_selector);
    canvas.chance_replace_non_air((0, 0, 0), (END_X, 0, END_Z), &theme.floor_selector);
    canvas.fill_air((1, 1, 1), (END_X - 1, END_Y - 1, END_Z - 1));
    canvas.fill_selector((1, 0, 1), (END_X - 1, 0, END_Z - 1), &theme.brick_selector);

    doorway(canvas, |along, y| (along, y, 0));
    doorway(canvas, |along, y| (along, y, END_Z));
    doorway(canvas, |along, y| (0, y, along));
    doorway(canvas, |along, y| (END_X, y, along));

    canvas.decorate((1, 1, 1), (END_X - 1, END_Y - 1, END_Z - 1));
    canvas.vines((1, 1, 1), (END_X - 1, END_Y - 1, END_Z - 1));
}
