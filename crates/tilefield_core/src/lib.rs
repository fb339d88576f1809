//! Core data structures for tilefield
//!
//! This crate provides the fundamental types for representing tile-based levels:
//! - `TileGrid` - A resizable 2D buffer of tile ids (`0` is an empty cell)
//! - `LevelLayer` - A named grid plane
//! - `LevelAsset` - An ordered stack of layers sharing one field size
//! - `TileCatalog` - The id -> `TileDefinition` mapping used by tools and renderers
//! - `LevelDocument` - The on-disk layout of a level

mod catalog;
mod grid;
mod layer;
mod level;

pub use catalog::{CatalogError, TileCatalog, TileDefinition, NO_SPEED_MODIFIER};
pub use grid::{tile_id, GridError, TileGrid, TileId, EMPTY_TILE};
pub use layer::LevelLayer;
pub use level::{LayerDocument, LevelAsset, LevelDocument, LevelError, MAX_FIELD_CELLS};

pub use glam::{IVec2, UVec2};
