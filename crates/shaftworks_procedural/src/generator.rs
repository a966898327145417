//! # Piece Generator
//!
//! Grows a mineshaft layout from a start piece by a constrained random walk.
//!
//! ## Algorithm
//!
//! ```text
//! frontier = [start]
//! while let Some(parent) = frontier.pop_front():
//!     if parent.chain_length == 0: continue
//!     for proposal in parent.propose_successors():
//!         kind  = resolve(proposal.hint)           // corridor odds, side room, exact
//!         box   = box_for(kind, proposal)
//!         if box out of bounds or overlaps a placed piece:
//!             corridors retry once as a dead end
//!             continue
//!         child = Piece(kind, box, chain = parent.chain - cost(kind))
//!         frontier.push_back(child)
//! ```
//!
//! ## Guarantees
//!
//! - **Termination**: every child has a strictly smaller chain length than
//!   its parent (costs are at least 1), and placed boxes never overlap inside
//!   finite bounds.
//! - **Non-overlap**: no two placed boxes intersect.
//! - **Determinism**: the same config, start piece and random source yield
//!   the same piece list.
//! - **No side effects**: growth never touches the world.

use std::collections::VecDeque;

use shaftworks_shared::BoundingBox;

use crate::config::GeneratorConfig;
use crate::pieces::{Piece, PieceTag, PieceVariant, Proposal, SuccessorHint};
use crate::placement::{intersects_any, PlacementBounds};
use crate::random::StructureRandom;
use crate::selector::cumulative_pick;

/// Lifecycle of a generator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GrowthState {
    /// Created, nothing expanded yet.
    Idle,
    /// Frontier still has pieces to expand.
    Growing,
    /// Frontier exhausted; the piece list is final.
    Terminated,
}

/// Counters collected during growth.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GrowthStats {
    /// Frontier entries expanded.
    pub expanded: u32,
    /// Successor proposals received.
    pub proposals: u32,
    /// Pieces placed, the start piece excluded.
    pub placed: u32,
    /// Candidates rejected for overlapping a placed piece.
    pub collisions: u32,
    /// Candidates rejected for leaving the placement bounds.
    pub out_of_bounds: u32,
    /// Blocked corridors replaced by a dead end.
    pub capped: u32,
}

/// Growth engine for one structure.
#[derive(Debug)]
pub struct PieceGenerator<'c> {
    config: &'c GeneratorConfig,
    bounds: PlacementBounds,
    pieces: Vec<Piece>,
    frontier: VecDeque<usize>,
    state: GrowthState,
    stats: GrowthStats,
}

impl<'c> PieceGenerator<'c> {
    /// Creates a generator holding only `start`.
    #[must_use]
    pub fn new(config: &'c GeneratorConfig, bounds: PlacementBounds, start: Piece) -> Self {
        let mut frontier = VecDeque::with_capacity(64);
        frontier.push_back(0);
        Self {
            config,
            bounds,
            pieces: vec![start],
            frontier,
            state: GrowthState::Idle,
            stats: GrowthStats::default(),
        }
    }

    /// Current state.
    #[inline]
    #[must_use]
    pub const fn state(&self) -> GrowthState {
        self.state
    }

    /// Pieces placed so far, in placement order.
    #[must_use]
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// Counters so far.
    #[must_use]
    pub const fn stats(&self) -> GrowthStats {
        self.stats
    }

    /// Number of pieces waiting to be expanded.
    #[must_use]
    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    /// Expands one frontier entry.
    pub fn step(&mut self, rng: &mut StructureRandom) -> GrowthState {
        if self.state == GrowthState::Terminated {
            return self.state;
        }
        self.state = GrowthState::Growing;

        if let Some(index) = self.frontier.pop_front() {
            let parent = self.pieces[index];
            if parent.chain_length > 0 {
                self.stats.expanded += 1;
                for proposal in parent.propose_successors(self.config, rng) {
                    self.stats.proposals += 1;
                    self.try_place(&parent, proposal, rng);
                }
            }
        }

        if self.frontier.is_empty() {
            self.state = GrowthState::Terminated;
        }
        self.state
    }

    /// Steps until the frontier is exhausted.
    pub fn run(&mut self, rng: &mut StructureRandom) -> GrowthStats {
        while self.step(rng) != GrowthState::Terminated {}
        self.stats
    }

    /// Consumes the generator, returning the placed pieces.
    #[must_use]
    pub fn into_pieces(self) -> Vec<Piece> {
        self.pieces
    }

    fn roll_corridor(&self, rng: &mut StructureRandom) -> PieceTag {
        let table = self.config.corridor_weights.table();
        cumulative_pick(table, rng.next_f64()).unwrap_or(PieceTag::Tunnel)
    }

    fn try_place(&mut self, parent: &Piece, proposal: Proposal, rng: &mut StructureRandom) -> bool {
        let tag = match proposal.hint {
            SuccessorHint::Corridor => self.roll_corridor(rng),
            SuccessorHint::SideRoom => PieceTag::Room,
            SuccessorHint::Exact(tag) => tag,
        };
        if self.place(tag, parent, proposal, rng) {
            return true;
        }
        let may_cap = proposal.hint == SuccessorHint::Corridor
            && self.config.cap_blocked_corridors
            && tag != PieceTag::DeadEnd;
        if may_cap && self.place(PieceTag::DeadEnd, parent, proposal, rng) {
            self.stats.capped += 1;
            return true;
        }
        false
    }

    fn place(&mut self, tag: PieceTag, parent: &Piece, proposal: Proposal, rng: &mut StructureRandom) -> bool {
        let anchor = Piece::anchor_for_entry(tag, proposal.entry, proposal.facing);
        let (width, height, length) = tag.dimensions();
        let candidate = BoundingBox::from_anchor(anchor, width, height, length, proposal.facing);

        if !self.bounds.admits(&candidate) {
            self.stats.out_of_bounds += 1;
            tracing::trace!("Rejected {} at {}: out of bounds", tag.name(), candidate);
            return false;
        }
        if intersects_any(&candidate, &self.pieces) {
            self.stats.collisions += 1;
            tracing::trace!("Rejected {} at {}: collision", tag.name(), candidate);
            return false;
        }

        let variant = PieceVariant::roll(tag, self.config, rng);
        let chain_length = parent
            .chain_length
            .saturating_sub(self.config.chain_costs.cost(tag));
        let index = self.pieces.len();
        self.pieces
            .push(Piece::with_box(variant, candidate, proposal.facing, chain_length));
        self.frontier.push_back(index);
        self.stats.placed += 1;
        tracing::trace!(
            "Placed {} #{} at {} facing {} (chain {})",
            tag.name(),
            index,
            candidate,
            proposal.facing.name(),
            chain_length
        );
        true
    }
}
