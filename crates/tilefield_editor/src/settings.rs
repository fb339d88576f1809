//! Editor settings and the configured toolset
//!
//! Settings are stored as TOML:
//!
//! ```toml
//! default_field_size = [16, 16]
//! tile_size = [32.0, 32.0]
//! field_ratio = 0.75
//! toolset = [
//!     "tilefield_editor::tools::TileBrushTool",
//!     { type_path = "tilefield_editor::tools::RectFillTool", base = "pointer_up" },
//! ]
//! ```

use egui::Vec2;
use glam::UVec2;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigurationError;
use crate::layout::GridTransform;
use crate::tools::{RectFillTool, RegisteredTool, TileBrushTool};

/// Reference to a tool implementation by its fully-qualified type path.
///
/// `base` optionally names a capability (`pointer_up`, `render_panel`, ...)
/// the tool is expected to have; it only narrows the candidate list shown
/// when authoring settings. Two references are equal when their type paths
/// are equal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "ToolReferenceRepr", into = "ToolReferenceRepr")]
pub struct ToolReference {
    pub type_path: String,
    pub base: Option<String>,
}

impl ToolReference {
    pub fn new(type_path: impl Into<String>) -> Self {
        Self {
            type_path: type_path.into(),
            base: None,
        }
    }

    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.base = Some(base.into());
        self
    }
}

impl PartialEq for ToolReference {
    fn eq(&self, other: &Self) -> bool {
        self.type_path == other.type_path
    }
}

impl Eq for ToolReference {}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum ToolReferenceRepr {
    Path(String),
    Table {
        type_path: String,
        #[serde(default)]
        base: Option<String>,
    },
}

impl From<ToolReferenceRepr> for ToolReference {
    fn from(repr: ToolReferenceRepr) -> Self {
        match repr {
            ToolReferenceRepr::Path(type_path) => Self::new(type_path),
            ToolReferenceRepr::Table { type_path, base } => Self { type_path, base },
        }
    }
}

impl From<ToolReference> for ToolReferenceRepr {
    fn from(reference: ToolReference) -> Self {
        match reference.base {
            None => ToolReferenceRepr::Path(reference.type_path),
            Some(base) => ToolReferenceRepr::Table {
                type_path: reference.type_path,
                base: Some(base),
            },
        }
    }
}

/// Editor configuration loaded once per session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "bevy", derive(bevy::prelude::Resource))]
#[serde(default)]
pub struct EditorSettings {
    /// Field size of newly created levels
    pub default_field_size: [u32; 2],
    /// Size of one grid cell in panel units
    pub tile_size: [f32; 2],
    /// Share of the window width given to the edit area
    pub field_ratio: f32,
    /// Layers created with a new level
    pub default_layer_count: usize,
    pub toolbar_height: f32,
    /// Ordered tool list shown in the toolbar
    pub toolset: Vec<ToolReference>,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            default_field_size: [16, 16],
            tile_size: [32.0, 32.0],
            field_ratio: 0.75,
            default_layer_count: 2,
            toolbar_height: 20.0,
            toolset: vec![
                ToolReference::new(TileBrushTool::TYPE_PATH),
                ToolReference::new(RectFillTool::TYPE_PATH),
            ],
        }
    }
}

impl EditorSettings {
    /// Parse and validate settings from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigurationError> {
        let settings: Self = toml::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigurationError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigurationError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let [tile_w, tile_h] = self.tile_size;
        if !(tile_w.is_finite() && tile_h.is_finite() && tile_w > 0.0 && tile_h > 0.0) {
            return Err(ConfigurationError::InvalidSettings(format!(
                "tile_size must be positive, got [{tile_w}, {tile_h}]"
            )));
        }
        if !(self.field_ratio > 0.0 && self.field_ratio <= 1.0) {
            return Err(ConfigurationError::InvalidSettings(format!(
                "field_ratio must be in (0, 1], got {}",
                self.field_ratio
            )));
        }
        if !(self.toolbar_height.is_finite() && self.toolbar_height >= 0.0) {
            return Err(ConfigurationError::InvalidSettings(format!(
                "toolbar_height must not be negative, got {}",
                self.toolbar_height
            )));
        }
        if let Some(empty) = self.toolset.iter().position(|r| r.type_path.trim().is_empty()) {
            return Err(ConfigurationError::InvalidSettings(format!(
                "toolset entry {empty} has an empty type path"
            )));
        }
        Ok(())
    }

    pub fn default_field_size(&self) -> UVec2 {
        UVec2::from(self.default_field_size)
    }

    pub fn tile_size(&self) -> Vec2 {
        Vec2::new(self.tile_size[0], self.tile_size[1])
    }

    pub fn grid_transform(&self) -> GridTransform {
        GridTransform::new(self.tile_size())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toolset_accepts_strings_and_tables() {
        let settings = EditorSettings::from_toml_str(
            r#"
            tile_size = [16.0, 24.0]
            toolset = [
                "tilefield_editor::tools::TileBrushTool",
                { type_path = "game::SpawnTool", base = "pointer_up" },
            ]
            "#,
        )
        .unwrap();

        assert_eq!(settings.tile_size(), Vec2::new(16.0, 24.0));
        assert_eq!(settings.default_field_size(), UVec2::new(16, 16));
        assert_eq!(settings.toolset.len(), 2);
        assert_eq!(settings.toolset[0].base, None);
        assert_eq!(settings.toolset[1].type_path, "game::SpawnTool");
        assert_eq!(settings.toolset[1].base.as_deref(), Some("pointer_up"));
    }

    #[test]
    fn test_reference_equality_ignores_base() {
        let plain = ToolReference::new("game::SpawnTool");
        let based = ToolReference::new("game::SpawnTool").with_base("render_panel");
        assert_eq!(plain, based);
    }

    #[test]
    fn test_rejects_non_positive_tile_size() {
        let err = EditorSettings::from_toml_str("tile_size = [0.0, 32.0]").unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidSettings(_)));
    }

    #[test]
    fn test_rejects_field_ratio_out_of_range() {
        let err = EditorSettings::from_toml_str("field_ratio = 1.5").unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidSettings(_)));
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let err = EditorSettings::from_toml_str("tile_size = [").unwrap_err();
        assert!(matches!(err, ConfigurationError::Parse(_)));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config").join("editor.toml");

        let settings = EditorSettings {
            default_layer_count: 3,
            ..EditorSettings::default()
        };
        settings.save(&path).unwrap();

        let loaded = EditorSettings::load(&path).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = EditorSettings::load(dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, ConfigurationError::Io(_)));
    }
}
