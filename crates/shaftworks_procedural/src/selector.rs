//! # Block Selectors
//!
//! Weighted random block choice used by themes.
//!
//! A selector is an ordered list of `(block, chance)` entries plus a default
//! block that absorbs the leftover probability mass:
//!
//! ```text
//! draw:  0.0        0.25       0.45  0.55                  1.0
//!        |cobblestone|   air    |brick|      default ...     |
//! ```
//!
//! ## Overflow
//!
//! Chances are expected to sum to at most 1.0. Tables that overflow never
//! panic: the walk simply stops at the first bracket containing the draw, so
//! entries past 1.0 and the default block become unreachable.

use serde::{Deserialize, Serialize};

use shaftworks_shared::BlockId;

use crate::random::StructureRandom;

/// Width of a probability bracket; negative or NaN chances are empty.
#[inline]
fn bracket_width(chance: f64) -> f64 {
    if chance.is_nan() {
        0.0
    } else {
        chance.max(0.0)
    }
}

/// Walks `(item, chance)` pairs accumulating probability mass and returns the
/// first item whose bracket contains `draw`.
///
/// Negative or NaN chances count as zero width. Returns `None` when the draw
/// falls into the leftover mass.
#[must_use]
pub fn cumulative_pick<T, I>(entries: I, draw: f64) -> Option<T>
where
    I: IntoIterator<Item = (T, f64)>,
{
    let mut lower = 0.0f64;
    for (item, chance) in entries {
        let upper = lower + bracket_width(chance);
        if draw >= lower && draw < upper {
            return Some(item);
        }
        lower = upper;
    }
    None
}

/// A single selector entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SelectorEntry {
    /// Block chosen when the draw lands in this entry's bracket.
    pub block: BlockId,
    /// Width of the bracket.
    pub chance: f64,
}

/// Weighted random block-choice table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BlockSelector {
    /// Entries in evaluation order.
    #[serde(default)]
    pub entries: Vec<SelectorEntry>,
    /// Block used for leftover probability mass.
    pub default_block: BlockId,
}

impl BlockSelector {
    /// Creates a selector that always returns `default_block`.
    #[must_use]
    pub fn new(default_block: impl Into<BlockId>) -> Self {
        Self {
            entries: Vec::new(),
            default_block: default_block.into(),
        }
    }

    /// Appends an entry (builder style).
    #[must_use]
    pub fn with(mut self, block: impl Into<BlockId>, chance: f64) -> Self {
        self.entries.push(SelectorEntry {
            block: block.into(),
            chance,
        });
        self
    }

    /// Chooses a block for a uniform draw in `[0, 1)`.
    ///
    /// Pure: the same draw always yields the same block.
    #[must_use]
    pub fn choose(&self, draw: f64) -> &BlockId {
        let entries = self.entries.iter().map(|e| (&e.block, e.chance));
        cumulative_pick(entries, draw).unwrap_or(&self.default_block)
    }

    /// Draws once from `rng` and chooses a block.
    pub fn pick(&self, rng: &mut StructureRandom) -> &BlockId {
        self.choose(rng.next_f64())
    }

    /// Sum of all (non-negative) entry chances.
    #[must_use]
    pub fn total_chance(&self) -> f64 {
        self.entries
            .iter()
            .map(|e| bracket_width(e.chance))
            .sum()
    }

    /// Returns true if the entries leave no mass for the default block.
    #[must_use]
    pub fn overflows(&self) -> bool {
        self.total_chance() > 1.0
    }
}
