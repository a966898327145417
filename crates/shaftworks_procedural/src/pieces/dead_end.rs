//! Blocked corridor end with a gravel pile.

use super::PieceCanvas;
use crate::world::WorldAccess;

pub(super) const SIZE: (i32, i32, i32) = (5, 5, 3);

const END_Z: i32 = SIZE.2 - 1;

pub(super) fn carve<W: WorldAccess + ?Sized>(canvas: &mut PieceCanvas<'_, W>) {
    let theme = canvas.theme();
    canvas.chance_replace_non_air((0, 1, 0), (4, 4, END_Z), &theme.main_selector);
    canvas.chance_replace_non_air((0, 0, 0), (4, 0, END_Z), &theme.floor_selector);
    canvas.fill_air((1, 1, 0), (3, 3, END_Z - 1));
    canvas.replace_air((1, 0, 0), (3, 0, END_Z - 1), &theme.main_block);
    canvas.rail_run(2, 1, 0, 0);

    canvas.fill((1, 1, END_Z - 1), (3, 1, END_Z - 1), &theme.gravel_block);
    canvas.set((2, 2, END_Z - 1), theme.gravel_block.clone());
    canvas.gravel((1, 1, 0), (3, 1, 0), 0.25);

    canvas.decorate((0, 0, 0), (4, 3, END_Z));
    canvas.vines((1, 0, 0), (3, 4, END_Z - 1));
}
