//! Editing tools
//!
//! A tool advertises the pointer phases it handles through
//! [`ToolCapabilities`]; the session only forwards the phases a tool
//! declares. Tools are created from their type path by the [`ToolRegistry`].

mod brush;
mod palette;
mod rect_fill;
mod registry;

pub use brush::TileBrushTool;
pub use palette::TilePalette;
pub use rect_fill::RectFillTool;
pub use registry::{ToolFactory, ToolRegistry};

use glam::IVec2;
use std::ops::BitOr;
use tilefield_core::{LevelAsset, TileCatalog};

use crate::input::PointerEvent;
use crate::settings::EditorSettings;

/// Set of optional tool capabilities
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ToolCapabilities(u8);

impl ToolCapabilities {
    pub const NONE: Self = Self(0);
    pub const POINTER_DOWN: Self = Self(1);
    pub const POINTER_DRAG: Self = Self(1 << 1);
    pub const POINTER_UP: Self = Self(1 << 2);
    pub const RENDER_PANEL: Self = Self(1 << 3);

    const NAMED: [(&'static str, Self); 4] = [
        ("pointer_down", Self::POINTER_DOWN),
        ("pointer_drag", Self::POINTER_DRAG),
        ("pointer_up", Self::POINTER_UP),
        ("render_panel", Self::RENDER_PANEL),
    ];

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Look up a single capability by its settings name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::NAMED
            .iter()
            .find(|(candidate, _)| *candidate == name)
            .map(|(_, capability)| *capability)
    }

    pub fn names(self) -> impl Iterator<Item = &'static str> {
        Self::NAMED
            .into_iter()
            .filter(move |(_, capability)| self.contains(*capability))
            .map(|(name, _)| name)
    }
}

impl BitOr for ToolCapabilities {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

/// Inputs available when a tool is constructed
#[derive(Debug, Clone, Copy)]
pub struct ToolInit<'a> {
    pub catalog: &'a TileCatalog,
    pub settings: &'a EditorSettings,
}

/// Level access lent to a tool for one pointer callback
#[derive(Debug)]
pub struct ToolContext<'a> {
    level: &'a mut LevelAsset,
    catalog: &'a TileCatalog,
    modified: bool,
}

impl<'a> ToolContext<'a> {
    pub fn new(level: &'a mut LevelAsset, catalog: &'a TileCatalog) -> Self {
        Self {
            level,
            catalog,
            modified: false,
        }
    }

    pub fn level(&self) -> &LevelAsset {
        self.level
    }

    /// Mutations made through this reference must be followed by
    /// [`ToolContext::mark_modified`]
    pub fn level_mut(&mut self) -> &mut LevelAsset {
        self.level
    }

    pub fn catalog(&self) -> &'a TileCatalog {
        self.catalog
    }

    pub fn mark_modified(&mut self) {
        self.modified = true;
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }
}

/// A user-selectable editing tool.
///
/// Pointer callbacks receive the grid point under the pointer, already
/// converted from panel space. Only callbacks whose capability is declared
/// are ever invoked.
pub trait EditTool: Send + Sync {
    /// Label shown in the toolbar
    fn name(&self) -> &str;

    fn capabilities(&self) -> ToolCapabilities;

    fn pointer_down(
        &mut self,
        _point: IVec2,
        _event: &mut PointerEvent,
        _ctx: &mut ToolContext<'_>,
    ) {
    }

    fn pointer_drag(
        &mut self,
        _point: IVec2,
        _event: &mut PointerEvent,
        _ctx: &mut ToolContext<'_>,
    ) {
    }

    fn pointer_up(&mut self, _point: IVec2, _event: &mut PointerEvent, _ctx: &mut ToolContext<'_>) {
    }

    /// Draw the tool's options into the toolset panel
    fn render_panel(&mut self, _ui: &mut egui::Ui, _catalog: &TileCatalog) {}
}

/// A tool that can be registered by type
pub trait RegisteredTool: EditTool + Sized + 'static {
    /// Fully-qualified path used in settings files
    const TYPE_PATH: &'static str;
    const CAPABILITIES: ToolCapabilities;

    fn create(init: &ToolInit<'_>) -> Self;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capability_names() {
        let caps = ToolCapabilities::POINTER_DOWN | ToolCapabilities::RENDER_PANEL;
        assert!(caps.contains(ToolCapabilities::POINTER_DOWN));
        assert!(!caps.contains(ToolCapabilities::POINTER_UP));
        assert_eq!(caps.names().collect::<Vec<_>>(), ["pointer_down", "render_panel"]);
        assert_eq!(
            ToolCapabilities::from_name("pointer_drag"),
            Some(ToolCapabilities::POINTER_DRAG)
        );
        assert_eq!(ToolCapabilities::from_name("hover"), None);
        assert!(ToolCapabilities::NONE.is_empty());
    }
}
