//! Stairs descending four blocks over eight.
//!
//! Floor height per local Z:
//!
//! ```text
//! z:      0  1  2  3  4  5  6  7
//! floor:  4  4  3  2  1  0  0  0
//! ```
//!
//! Each drop gets a slab half-step.

use super::{Piece, PieceCanvas, Proposal, SuccessorHint};
use crate::world::WorldAccess;

pub(super) const SIZE: (i32, i32, i32) = (5, 9, 8);

/// Height difference between the entry and exit floors.
pub(super) const DESCENT: i32 = 4;

const END_Z: i32 = SIZE.2 - 1;

/// Floor height at local `z`.
const fn floor_at(z: i32) -> i32 {
    let step = z - 1;
    let clamped = if step < 0 {
        0
    } else if step > DESCENT {
        DESCENT
    } else {
        step
    };
    DESCENT - clamped
}

pub(super) fn propose(piece: &Piece) -> Vec<Proposal> {
    vec![piece.exit(piece.facing, SuccessorHint::Corridor)]
}

pub(super) fn carve<W: WorldAccess + ?Sized>(canvas: &mut PieceCanvas<'_, W>) {
    let theme = canvas.theme();
    for z in 0..=END_Z {
        let floor = floor_at(z);
        // Keep the headroom of the step above so the descent is walkable.
        let top = floor_at(z - 1).max(floor) + 3;
        canvas.chance_replace_non_air((0, floor + 1, z), (4, top + 1, z), &theme.main_selector);
        canvas.chance_replace_non_air((0, floor, z), (4, floor, z), &theme.floor_selector);
        canvas.fill_air((1, floor + 1, z), (3, top, z));
        canvas.replace_air((1, floor, z), (3, floor, z), &theme.main_block);
        if z > 0 && floor < floor_at(z - 1) {
            canvas.fill((1, floor + 1, z), (3, floor + 1, z), &theme.slab_block);
        }
    }
    canvas.decorate((0, 0, 0), (4, SIZE.1 - 2, END_Z));
    canvas.vines((1, 0, 0), (3, SIZE.1 - 1, END_Z));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_floor_profile() {
        let floors: Vec<i32> = (0..=END_Z).map(floor_at).collect();
        assert_eq!(floors, vec![4, 4, 3, 2, 1, 0, 0, 0]);
        assert_eq!(floor_at(0) - floor_at(END_Z), DESCENT);
    }

    #[test]
    fn test_headroom_fits_box() {
        for z in 0..=END_Z {
            let top = floor_at(z - 1).max(floor_at(z)) + 3;
            assert!(top + 1 < SIZE.1, "ceiling at z={z} leaves the box");
        }
    }
}
