//! # World Constants
//!
//! Limits of the host world the generator places structures into.
//!
//! **CRITICAL:** Pieces outside `WORLD_MIN_Y..=WORLD_MAX_Y` are never placed.
//! Hosts with a different build height pass their own bounds through the
//! generator configuration instead of editing these values.

// =============================================================================
// WORLD LAYOUT
// =============================================================================

/// Chunk width/depth in blocks.
pub const CHUNK_SIZE: i32 = 16;

/// Lowest buildable Y level.
pub const WORLD_MIN_Y: i32 = 0;

/// Highest buildable Y level.
pub const WORLD_MAX_Y: i32 = 255;

/// Biome tag marking ocean biomes (pieces are never carved into them).
pub const OCEAN_TAG: &str = "OCEAN";
