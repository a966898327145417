//! # Placement Checks
//!
//! Candidate boxes are accepted only if they overlap no placed piece and
//! stay inside the placement bounds. Both checks are pure; growth never
//! touches the world.

use shaftworks_shared::{BlockPos, BoundingBox};

use crate::pieces::Piece;

/// Returns true if `candidate` overlaps any placed piece.
#[must_use]
pub fn intersects_any(candidate: &BoundingBox, pieces: &[Piece]) -> bool {
    find_intersecting(candidate, pieces).is_some()
}

/// Index of the first placed piece overlapping `candidate`.
#[must_use]
pub fn find_intersecting(candidate: &BoundingBox, pieces: &[Piece]) -> Option<usize> {
    pieces
        .iter()
        .position(|piece| piece.bounding_box.intersects(candidate))
}

/// Region a structure may grow into.
///
/// Vertical limits are the world's build range; horizontally every box must
/// stay within `max_extent` blocks (Chebyshev distance) of `center`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlacementBounds {
    /// Lowest Y any piece may occupy.
    pub min_y: i32,
    /// Highest Y any piece may occupy.
    pub max_y: i32,
    /// Centre of the start piece.
    pub center: BlockPos,
    /// Horizontal reach from `center`.
    pub max_extent: i32,
}

impl PlacementBounds {
    /// Creates bounds around `center`.
    #[must_use]
    pub const fn new(min_y: i32, max_y: i32, center: BlockPos, max_extent: i32) -> Self {
        Self {
            min_y,
            max_y,
            center,
            max_extent,
        }
    }

    /// Returns true if `candidate` lies fully inside the bounds.
    #[must_use]
    pub const fn admits(&self, candidate: &BoundingBox) -> bool {
        candidate.min.y >= self.min_y
            && candidate.max.y <= self.max_y
            && candidate.min.x >= self.center.x.saturating_sub(self.max_extent)
            && candidate.max.x <= self.center.x.saturating_add(self.max_extent)
            && candidate.min.z >= self.center.z.saturating_sub(self.max_extent)
            && candidate.max.z <= self.center.z.saturating_add(self.max_extent)
    }
}
