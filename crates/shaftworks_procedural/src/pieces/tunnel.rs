//! Straight corridor with rails, supports and optional side rooms.

use super::{Piece, PieceCanvas, Proposal, SuccessorHint};
use crate::config::GeneratorConfig;
use crate::random::StructureRandom;
use crate::world::WorldAccess;

pub(super) const SIZE: (i32, i32, i32) = (5, 5, 8);

const END_Z: i32 = SIZE.2 - 1;

/// Share of floor cells beside the rails covered in gravel.
const GRAVEL_CHANCE: f64 = 0.05;

pub(super) fn propose(piece: &Piece, config: &GeneratorConfig, rng: &mut StructureRandom) -> Vec<Proposal> {
    let mut out = vec![piece.exit(piece.facing, SuccessorHint::Corridor)];
    for side in [piece.facing.rotate_ccw(), piece.facing.rotate_cw()] {
        if rng.chance(config.side_room_chance) {
            out.push(piece.exit(side, SuccessorHint::SideRoom));
        }
    }
    out
}

pub(super) fn carve<W: WorldAccess + ?Sized>(canvas: &mut PieceCanvas<'_, W>) {
    canvas.corridor_shell(0, END_Z);
    canvas.gravel((1, 1, 0), (1, 1, END_Z), GRAVEL_CHANCE);
    canvas.gravel((3, 1, 0), (3, 1, END_Z), GRAVEL_CHANCE);
    canvas.support(1);
    canvas.support(END_Z - 1);
    canvas.rail_run(2, 1, 0, END_Z);
    for z in [1, END_Z - 1] {
        canvas.leg(1, z);
        canvas.leg(3, z);
    }
    canvas.decorate((0, 0, 0), (4, 3, END_Z));
    canvas.vines((1, 0, 0), (3, 4, END_Z));
}
