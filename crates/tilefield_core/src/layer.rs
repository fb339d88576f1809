//! Named grid planes

use crate::grid::{GridError, TileGrid, TileId};
use glam::UVec2;

/// One grid plane of a level.
///
/// Cell writes go through the layer; resizing only happens through the
/// owning `LevelAsset` so every layer keeps the level's field size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelLayer {
    pub name: String,
    grid: TileGrid,
}

impl LevelLayer {
    /// Create an empty layer of the given size
    pub fn new(name: impl Into<String>, size: UVec2) -> Self {
        Self {
            name: name.into(),
            grid: TileGrid::new(size.x, size.y),
        }
    }

    pub(crate) fn from_grid(name: String, grid: TileGrid) -> Self {
        Self { name, grid }
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    pub fn get(&self, x: i64, y: i64) -> Result<TileId, GridError> {
        self.grid.get(x, y)
    }

    /// Write a tile id, returning the id it replaced
    pub fn set(&mut self, x: i64, y: i64, value: TileId) -> Result<TileId, GridError> {
        self.grid.set(x, y, value)
    }

    pub fn set_raw(&mut self, x: i64, y: i64, value: i64) -> Result<TileId, GridError> {
        self.grid.set_raw(x, y, value)
    }

    pub fn fill(&mut self, value: TileId) {
        self.grid.fill(value);
    }

    pub(crate) fn resize(&mut self, size: UVec2) {
        self.grid.resize(size.x, size.y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_layer() {
        let layer = LevelLayer::new("Ground", UVec2::new(4, 2));
        assert_eq!(layer.name, "Ground");
        assert_eq!(layer.grid().size(), UVec2::new(4, 2));
        assert_eq!(layer.grid().cells().count(), 0);
    }

    #[test]
    fn test_layer_cell_access() {
        let mut layer = LevelLayer::new("Walls", UVec2::new(2, 2));
        layer.set(1, 1, 3).unwrap();
        assert_eq!(layer.get(1, 1), Ok(3));
        assert!(layer.set_raw(0, 0, -2).is_err());
        assert!(layer.get(2, 0).is_err());
    }
}
