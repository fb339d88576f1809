//! Level assets: an ordered stack of layers sharing one field size

use crate::grid::{GridError, TileGrid};
use crate::layer::LevelLayer;
use glam::{IVec2, UVec2};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Largest number of cells a level field may hold
pub const MAX_FIELD_CELLS: u64 = 1 << 24;

/// Errors raised while addressing or decoding a level
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("layer index {index} out of range (level has {len} layers)")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("layer '{layer}' does not match the level field size: {detail}")]
    DimensionMismatch { layer: String, detail: String },
    #[error("layer '{layer}' holds invalid data: {source}")]
    InvalidCell {
        layer: String,
        #[source]
        source: GridError,
    },
    #[error("field size {width}x{height} exceeds {MAX_FIELD_CELLS} cells")]
    FieldTooLarge { width: u32, height: u32 },
    #[error("failed to parse level document: {0}")]
    Json(#[from] serde_json::Error),
}

/// Serialized form of a level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelDocument {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    #[serde(default)]
    pub name: String,
    /// `[x, y]`: the number of rows and the length of every row
    pub field_size: [u32; 2],
    #[serde(default)]
    pub layers: Vec<LayerDocument>,
}

/// Serialized form of one layer. `rows[x][y]` is the tile id at `(x, y)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerDocument {
    pub name: String,
    #[serde(default)]
    pub rows: Vec<Vec<i64>>,
}

/// A complete level: every layer has exactly `field_size` cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelAsset {
    pub id: Uuid,
    pub name: String,
    field_size: UVec2,
    layers: Vec<LevelLayer>,
}

impl LevelAsset {
    /// Create a level without layers
    pub fn new(name: impl Into<String>, field_size: UVec2) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            field_size,
            layers: Vec::new(),
        }
    }

    /// Create a level with `layer_count` empty layers named "Layer 1", "Layer 2", ...
    pub fn new_level(name: impl Into<String>, field_size: UVec2, layer_count: usize) -> Self {
        let mut level = Self::new(name, field_size);
        for i in 0..layer_count {
            level.add_layer(format!("Layer {}", i + 1));
        }
        level
    }

    pub fn field_size(&self) -> UVec2 {
        self.field_size
    }

    /// Check that a field of `size` stays within [`MAX_FIELD_CELLS`]
    pub fn check_field_size(size: UVec2) -> Result<(), LevelError> {
        if u64::from(size.x) * u64::from(size.y) > MAX_FIELD_CELLS {
            return Err(LevelError::FieldTooLarge {
                width: size.x,
                height: size.y,
            });
        }
        Ok(())
    }

    /// Change the field size and resize every layer to match
    pub fn set_field_size(&mut self, size: UVec2) {
        self.field_size = size;
        for layer in &mut self.layers {
            layer.resize(size);
        }
    }

    /// Append an empty layer at the current field size
    pub fn add_layer(&mut self, name: impl Into<String>) -> &mut LevelLayer {
        self.layers.push(LevelLayer::new(name, self.field_size));
        let last = self.layers.len() - 1;
        &mut self.layers[last]
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Layers from bottom to top
    pub fn layers(&self) -> impl Iterator<Item = &LevelLayer> {
        self.layers.iter()
    }

    pub fn layer(&self, index: usize) -> Result<&LevelLayer, LevelError> {
        let len = self.layers.len();
        self.layers
            .get(index)
            .ok_or(LevelError::IndexOutOfRange { index, len })
    }

    pub fn layer_mut(&mut self, index: usize) -> Result<&mut LevelLayer, LevelError> {
        let len = self.layers.len();
        self.layers
            .get_mut(index)
            .ok_or(LevelError::IndexOutOfRange { index, len })
    }

    /// Check whether a grid point lies inside the field
    pub fn contains(&self, point: IVec2) -> bool {
        point.x >= 0
            && point.y >= 0
            && (point.x as u32) < self.field_size.x
            && (point.y as u32) < self.field_size.y
    }

    /// Encode the level in its document layout
    pub fn to_document(&self) -> LevelDocument {
        LevelDocument {
            id: self.id,
            name: self.name.clone(),
            field_size: self.field_size.to_array(),
            layers: self
                .layers
                .iter()
                .map(|layer| LayerDocument {
                    name: layer.name.clone(),
                    rows: layer
                        .grid()
                        .to_rows()
                        .into_iter()
                        .map(|row| row.into_iter().map(i64::from).collect())
                        .collect(),
                })
                .collect(),
        }
    }

    /// Decode a level document, checking every layer against `fieldSize`
    pub fn from_document(document: LevelDocument) -> Result<Self, LevelError> {
        let field_size = UVec2::from_array(document.field_size);
        Self::check_field_size(field_size)?;
        let mut layers = Vec::with_capacity(document.layers.len());

        for layer in document.layers {
            let grid = TileGrid::from_rows(field_size, &layer.rows).map_err(|err| match err {
                GridError::DimensionMismatch { detail, .. } => LevelError::DimensionMismatch {
                    layer: layer.name.clone(),
                    detail,
                },
                source => LevelError::InvalidCell {
                    layer: layer.name.clone(),
                    source,
                },
            })?;
            layers.push(LevelLayer::from_grid(layer.name, grid));
        }

        Ok(Self {
            id: document.id,
            name: document.name,
            field_size,
            layers,
        })
    }

    pub fn to_json(&self) -> Result<String, LevelError> {
        Ok(serde_json::to_string_pretty(&self.to_document())?)
    }

    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        let document: LevelDocument = serde_json::from_str(json)?;
        Self::from_document(document)
    }
}
