//! Single-plane tile storage

use glam::UVec2;
use thiserror::Error;

/// Identifier of a tile type. `0` marks an empty cell.
pub type TileId = u32;

/// The id stored in cells that hold no tile
pub const EMPTY_TILE: TileId = 0;

/// Errors raised by grid access and grid decoding
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("cell ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: i64,
        y: i64,
        width: u32,
        height: u32,
    },
    #[error("invalid tile id {0}: tile ids must be in 0..=u32::MAX")]
    InvalidTileId(i64),
    #[error("rows do not match a {width}x{height} grid: {detail}")]
    DimensionMismatch {
        width: u32,
        height: u32,
        detail: String,
    },
}

/// Convert a raw (possibly negative) value into a tile id
pub fn tile_id(raw: i64) -> Result<TileId, GridError> {
    TileId::try_from(raw).map_err(|_| GridError::InvalidTileId(raw))
}

/// A width x height buffer of tile ids.
///
/// Cells live in one flat buffer where the column index varies fastest:
/// cell `(x, y)` is stored at `x * height + y`. The serialized form mirrors
/// this: `rows[x][y]`, with `width` rows of `height` entries each.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TileGrid {
    width: u32,
    height: u32,
    cells: Vec<TileId>,
}

impl TileGrid {
    /// Create a grid with every cell empty
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![EMPTY_TILE; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Grid dimensions as `(width, height)`
    pub fn size(&self) -> UVec2 {
        UVec2::new(self.width, self.height)
    }

    /// True when the grid has no cells at all
    pub fn is_zero_area(&self) -> bool {
        self.cells.is_empty()
    }

    /// Check whether `(x, y)` addresses a cell of this grid
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < self.width as i64 && y < self.height as i64
    }

    fn index(&self, x: i64, y: i64) -> Result<usize, GridError> {
        if !self.contains(x, y) {
            return Err(GridError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(x as usize * self.height as usize + y as usize)
    }

    /// Read the tile id at `(x, y)`
    pub fn get(&self, x: i64, y: i64) -> Result<TileId, GridError> {
        let index = self.index(x, y)?;
        Ok(self.cells[index])
    }

    /// Write a tile id at `(x, y)`, returning the id it replaced
    pub fn set(&mut self, x: i64, y: i64, value: TileId) -> Result<TileId, GridError> {
        let index = self.index(x, y)?;
        Ok(std::mem::replace(&mut self.cells[index], value))
    }

    /// Write an unchecked integer at `(x, y)`. Negative values are rejected.
    pub fn set_raw(&mut self, x: i64, y: i64, value: i64) -> Result<TileId, GridError> {
        let value = tile_id(value)?;
        self.set(x, y, value)
    }

    /// Resize to `width` x `height`.
    ///
    /// Cells inside both the old and the new bounds keep their values, every
    /// other cell is empty. The old buffer is dropped.
    pub fn resize(&mut self, width: u32, height: u32) {
        let mut cells = vec![EMPTY_TILE; width as usize * height as usize];
        let keep_width = self.width.min(width) as usize;
        let keep_height = self.height.min(height) as usize;

        for x in 0..keep_width {
            let src = x * self.height as usize;
            let dst = x * height as usize;
            cells[dst..dst + keep_height].copy_from_slice(&self.cells[src..src + keep_height]);
        }

        self.width = width;
        self.height = height;
        self.cells = cells;
    }

    /// Set every cell to `value`
    pub fn fill(&mut self, value: TileId) {
        self.cells.fill(value);
    }

    /// Iterate over non-empty cells as `(x, y, id)`
    pub fn cells(&self) -> impl Iterator<Item = (u32, u32, TileId)> + '_ {
        let height = self.height as usize;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, id)| **id != EMPTY_TILE)
            .map(move |(index, id)| ((index / height) as u32, (index % height) as u32, *id))
    }

    /// Encode as `rows[x][y]`
    pub fn to_rows(&self) -> Vec<Vec<TileId>> {
        let height = self.height as usize;
        (0..self.width as usize)
            .map(|x| self.cells[x * height..(x + 1) * height].to_vec())
            .collect()
    }

    /// Decode rows produced by [`TileGrid::to_rows`].
    ///
    /// `size` is the expected `(width, height)`; it carries the height of
    /// grids that have no rows. Rows of the wrong count or length and
    /// negative values are errors, nothing is truncated or padded.
    pub fn from_rows<T>(size: UVec2, rows: &[Vec<T>]) -> Result<Self, GridError>
    where
        T: Copy + Into<i64>,
    {
        let mismatch = |detail: String| GridError::DimensionMismatch {
            width: size.x,
            height: size.y,
            detail,
        };

        if rows.len() != size.x as usize {
            return Err(mismatch(format!("found {} rows", rows.len())));
        }

        if let Some((x, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != size.y as usize)
        {
            return Err(mismatch(format!("row {x} has {} cells", row.len())));
        }

        let capacity = (size.x as usize)
            .checked_mul(size.y as usize)
            .ok_or_else(|| mismatch("cell count overflows".to_string()))?;
        let mut cells = Vec::new();
        cells
            .try_reserve_exact(capacity)
            .map_err(|_| mismatch(format!("cannot allocate {capacity} cells")))?;
        for value in rows.iter().flatten() {
            cells.push(tile_id((*value).into())?);
        }

        Ok(Self {
            width: size.x,
            height: size.y,
            cells,
        })
    }
}
