//! 90 degree turn.
//!
//! Two layouts exist. The *left* layout opens the local -X wall and curves
//! the rail towards it; the *right* layout mirrors it onto local +X. Because
//! the local frame is mirrored for south and west facings, which layout a
//! turn needs depends on both its side and its facing.

use shaftworks_shared::{Direction, RailShape};

use super::{Piece, PieceCanvas, Proposal, SuccessorHint, TurnSide};
use crate::world::WorldAccess;

pub(super) const SIZE: (i32, i32, i32) = (5, 5, 5);

const END: i32 = 4;

/// Returns true if a turn towards `side` while facing `facing` uses the
/// left layout.
#[must_use]
pub fn uses_left_layout(side: TurnSide, facing: Direction) -> bool {
    (side == TurnSide::Right) ^ matches!(facing, Direction::North | Direction::East)
}

pub(super) fn propose(piece: &Piece, side: TurnSide) -> Vec<Proposal> {
    vec![piece.exit(side.apply(piece.facing), SuccessorHint::Corridor)]
}

pub(super) fn carve<W: WorldAccess + ?Sized>(canvas: &mut PieceCanvas<'_, W>, side: TurnSide) {
    let theme = canvas.theme();
    canvas.chance_replace_non_air((0, 1, 0), (END, END, END), &theme.main_selector);
    canvas.chance_replace_non_air((0, 0, 0), (END, 0, END), &theme.floor_selector);
    canvas.fill_air((1, 1, 0), (3, 3, 3));
    canvas.replace_air((1, 0, 0), (3, 0, END), &theme.main_block);
    canvas.rail_run(2, 1, 0, 1);

    if uses_left_layout(side, canvas.facing()) {
        canvas.fill_air((0, 1, 1), (0, 3, 3));
        canvas.fill((0, 0, 0), (0, 0, 3), &theme.main_block);
        canvas.rail((2, 1, 2), RailShape::SouthWest);
        canvas.rail((0, 1, 2), RailShape::EastWest);
        canvas.rail((1, 1, 2), RailShape::EastWest);
    } else {
        canvas.fill_air((END, 1, 1), (END, 3, 3));
        canvas.fill((END, 0, 0), (END, 0, 3), &theme.main_block);
        canvas.rail((2, 1, 2), RailShape::SouthEast);
        canvas.rail((3, 1, 2), RailShape::EastWest);
        canvas.rail((END, 1, 2), RailShape::EastWest);
    }

    canvas.decorate((0, 0, 0), (END, 3, END));
    canvas.vines((1, 0, 1), (3, END, 3));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_selection() {
        use Direction::{East, North, South, West};
        assert!(uses_left_layout(TurnSide::Left, North));
        assert!(uses_left_layout(TurnSide::Left, East));
        assert!(!uses_left_layout(TurnSide::Left, South));
        assert!(!uses_left_layout(TurnSide::Left, West));
        assert!(!uses_left_layout(TurnSide::Right, North));
        assert!(!uses_left_layout(TurnSide::Right, East));
        assert!(uses_left_layout(TurnSide::Right, South));
        assert!(uses_left_layout(TurnSide::Right, West));
    }
}
