//! Three-way crossing. Each branch is optional.

use super::{Piece, PieceCanvas, Proposal, SuccessorHint};
use crate::config::GeneratorConfig;
use crate::random::StructureRandom;
use crate::world::WorldAccess;

pub(super) const SIZE: (i32, i32, i32) = (5, 5, 5);

const END: i32 = 4;

pub(super) fn propose(piece: &Piece, config: &GeneratorConfig, rng: &mut StructureRandom) -> Vec<Proposal> {
    [piece.facing, piece.facing.rotate_ccw(), piece.facing.rotate_cw()]
        .into_iter()
        .filter(|_| rng.chance(config.crossing_branch_chance))
        .map(|dir| piece.exit(dir, SuccessorHint::Corridor))
        .collect()
}

pub(super) fn carve<W: WorldAccess + ?Sized>(canvas: &mut PieceCanvas<'_, W>) {
    let theme = canvas.theme();
    canvas.corridor_shell(0, END);
    for x in [0, END] {
        canvas.fill_air((x, 1, 1), (x, 3, 3));
        canvas.replace_air((x, 0, 1), (x, 0, 3), &theme.main_block);
    }
    canvas.support(0);
    canvas.support(END);
    canvas.rail_run(2, 1, 0, END);
    canvas.decorate((0, 0, 0), (END, 3, END));
    canvas.vines((1, 0, 0), (3, END, END));
}
