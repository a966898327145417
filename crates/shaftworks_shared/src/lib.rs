//! # SHAFTWORKS Shared
//!
//! Common types used by both the generator and the host world.
//!
//! ## CRITICAL RULE
//!
//! This crate must NEVER depend on:
//! - a random number generator
//! - world storage
//! - anything that makes geometry depend on more than its inputs
//!
//! If you need generator state, put it in `shaftworks_procedural`.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod block;
pub mod constants;
pub mod math;

pub use block::{BlockId, RailShape, CACTUS_SOIL, DEAD_BUSH_SOIL, MUSHROOM_SOIL};
pub use constants::{CHUNK_SIZE, OCEAN_TAG, WORLD_MAX_Y, WORLD_MIN_Y};
pub use math::{BlockPos, BoundingBox, ChunkCoord, Direction};
