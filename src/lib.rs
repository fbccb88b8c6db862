//! Procedural arena generation for a simulated-agent benchmark: themed
//! levels of typed, sized, rotated objects placed in a 40x40 playfield under
//! non-overlap and in-bounds constraints.

pub mod arena;
pub mod avoidance;
pub mod constants;
pub mod food;
pub mod generation;
pub mod geometry;
pub mod maze;
pub mod obstacles;
pub mod placement;
pub mod preferences;
pub mod spatial_reasoning;

pub use arena::{Arena, ArenaCollection, Entity, Instance, ItemKind, Rgb};
pub use generation::{generate_arena_collection, ArenaBuilder, ArenaGenConfig, GenerationError};
pub use maze::{Maze, MazeCell, WallSide};
pub use placement::{place_with_retry, PlacementError, PoseError};
