//! Tile catalog: what each tile id means

use crate::grid::TileId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// `speed_modifier` value meaning "this tile does not change movement speed"
pub const NO_SPEED_MODIFIER: f32 = -1.0;

/// Errors raised while building a catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("duplicate tile id {id} ('{first}' and '{second}')")]
    DuplicateId {
        id: TileId,
        first: String,
        second: String,
    },
    #[error("invalid tile definition '{name}': {reason}")]
    InvalidDefinition { name: String, reason: String },
    #[error("failed to parse tile catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Authoring metadata for one tile id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileDefinition {
    pub id: TileId,
    pub name: String,
    #[serde(default)]
    pub sprite_ref: String,
    #[serde(default)]
    pub walkable: bool,
    #[serde(default)]
    pub breakable: bool,
    #[serde(rename = "health", default = "default_hit_points")]
    pub hit_points: u32,
    /// Index of the level layer this tile is painted into
    #[serde(rename = "layer", default)]
    pub render_layer: usize,
    #[serde(default)]
    pub animation_ref: Option<String>,
    #[serde(default = "default_speed_modifier")]
    pub speed_modifier: f32,
}

fn default_hit_points() -> u32 {
    1
}

fn default_speed_modifier() -> f32 {
    NO_SPEED_MODIFIER
}

impl TileDefinition {
    /// Create a definition with the catalog defaults
    pub fn new(id: TileId, name: impl Into<String>, sprite_ref: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            sprite_ref: sprite_ref.into(),
            walkable: false,
            breakable: false,
            hit_points: default_hit_points(),
            render_layer: 0,
            animation_ref: None,
            speed_modifier: NO_SPEED_MODIFIER,
        }
    }

    pub fn with_render_layer(mut self, layer: usize) -> Self {
        self.render_layer = layer;
        self
    }

    pub fn with_walkable(mut self, walkable: bool) -> Self {
        self.walkable = walkable;
        self
    }

    pub fn with_breakable(mut self, breakable: bool, hit_points: u32) -> Self {
        self.breakable = breakable;
        self.hit_points = hit_points;
        self
    }

    pub fn with_speed_modifier(mut self, modifier: f32) -> Self {
        self.speed_modifier = modifier;
        self
    }

    /// The movement speed multiplier, if this tile has one
    pub fn speed_modifier(&self) -> Option<f32> {
        (self.speed_modifier != NO_SPEED_MODIFIER).then_some(self.speed_modifier)
    }

    pub fn is_animated(&self) -> bool {
        self.animation_ref.as_deref().is_some_and(|r| !r.is_empty())
    }

    fn validate(&self) -> Result<(), CatalogError> {
        let invalid = |reason: &str| CatalogError::InvalidDefinition {
            name: self.name.clone(),
            reason: reason.to_string(),
        };
        if self.id == 0 {
            return Err(invalid("id 0 is reserved for empty cells"));
        }
        if self.hit_points == 0 {
            return Err(invalid("health must be at least 1"));
        }
        Ok(())
    }
}

/// Read-only id -> definition lookup, built once from an ordered list
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "bevy", derive(bevy::prelude::Resource))]
pub struct TileCatalog {
    definitions: Vec<TileDefinition>,
    by_id: HashMap<TileId, usize>,
}

impl TileCatalog {
    /// Build a catalog. Nothing is built if any definition is rejected.
    pub fn load(definitions: Vec<TileDefinition>) -> Result<Self, CatalogError> {
        let mut by_id = HashMap::with_capacity(definitions.len());
        for (index, definition) in definitions.iter().enumerate() {
            definition.validate()?;
            if let Some(previous) = by_id.insert(definition.id, index) {
                return Err(CatalogError::DuplicateId {
                    id: definition.id,
                    first: definitions[previous].name.clone(),
                    second: definition.name.clone(),
                });
            }
        }
        Ok(Self { definitions, by_id })
    }

    /// Parse a catalog document (a JSON list of definitions) and build it
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let definitions: Vec<TileDefinition> = serde_json::from_str(json)?;
        Self::load(definitions)
    }

    pub fn to_json(&self) -> Result<String, CatalogError> {
        Ok(serde_json::to_string_pretty(&self.definitions)?)
    }

    pub fn get(&self, id: TileId) -> Option<&TileDefinition> {
        self.by_id.get(&id).map(|&index| &self.definitions[index])
    }

    /// Definitions in load order
    pub fn definitions(&self) -> &[TileDefinition] {
        &self.definitions
    }

    pub fn first(&self) -> Option<&TileDefinition> {
        self.definitions.first()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}
