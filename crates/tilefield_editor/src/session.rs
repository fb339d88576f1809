//! The editing session
//!
//! An `EditorSession` owns the level being edited, the instantiated toolset
//! and the pointer state machine:
//!
//! - `Idle`: waiting for a pointer down inside the field
//! - `Capturing { tool }`: a gesture is in progress; drag and up events go to
//!   the tool that was active when it started
//!
//! The exclusive capture slot is owned by the host and passed into
//! [`EditorSession::handle_pointer`] so other controls can take part.

use egui::Vec2;
use glam::{IVec2, UVec2};
use tilefield_core::{LevelAsset, LevelLayer, TileCatalog, TileDefinition};
use tracing::{debug, error, info, warn};

use crate::error::{ConfigurationError, EditorError, StorageError};
use crate::input::{ControlId, PointerCapture, PointerEvent, PointerKind};
use crate::layout::{EditorLayout, GridTransform};
use crate::render::{FieldDrawList, LayerMask};
use crate::settings::EditorSettings;
use crate::storage::LevelStore;
use crate::tools::{EditTool, ToolCapabilities, ToolContext, ToolInit, ToolRegistry};

/// Pointer state of a session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CaptureState {
    #[default]
    Idle,
    /// A gesture is in progress. `tool` is `None` when the toolbar was empty
    /// at pointer down.
    Capturing { tool: Option<usize> },
}

/// Editing state for one level at a time
#[cfg_attr(feature = "bevy", derive(bevy::prelude::Resource))]
pub struct EditorSession {
    control_id: ControlId,
    settings: EditorSettings,
    catalog: TileCatalog,
    tools: Vec<Box<dyn EditTool>>,
    toolset_error: Option<String>,
    active_tool: usize,
    capture: CaptureState,
    level: Option<LevelAsset>,
    dirty: bool,
    layer_mask: LayerMask,
    layout: EditorLayout,
    /// Text of the jump-to-level search field
    pub search_text: String,
}

impl EditorSession {
    /// Create a session without tools. Call [`EditorSession::load_toolset`]
    /// to populate the toolbar.
    pub fn new(settings: EditorSettings, catalog: TileCatalog) -> Self {
        Self {
            control_id: ControlId::new(),
            settings,
            catalog,
            tools: Vec::new(),
            toolset_error: None,
            active_tool: 0,
            capture: CaptureState::Idle,
            level: None,
            dirty: false,
            layer_mask: LayerMask::default(),
            layout: EditorLayout::default(),
            search_text: String::new(),
        }
    }

    pub fn control_id(&self) -> ControlId {
        self.control_id
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    // ------------------------------------------------------------------
    // Toolset
    // ------------------------------------------------------------------

    /// Instantiate the configured toolset.
    ///
    /// On failure the toolbar is left empty and the error is kept for the
    /// toolset panel to show; the session itself stays usable. A gesture in
    /// progress loses its tool and ends on the next pointer up.
    pub fn load_toolset(&mut self, registry: &ToolRegistry) -> Result<usize, ConfigurationError> {
        if self.is_capturing() {
            debug!("Toolset reloaded during a gesture, detaching its tool");
            self.capture = CaptureState::Capturing { tool: None };
        }
        self.tools.clear();
        self.active_tool = 0;
        self.toolset_error = None;

        let init = ToolInit {
            catalog: &self.catalog,
            settings: &self.settings,
        };
        match registry.instantiate_toolset(&self.settings.toolset, &init) {
            Ok(tools) => {
                info!("Loaded {} editing tools", tools.len());
                self.tools = tools;
                Ok(self.tools.len())
            }
            Err(e) => {
                error!("Toolset unavailable: {}", e);
                self.toolset_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    pub fn toolset_error(&self) -> Option<&str> {
        self.toolset_error.as_deref()
    }

    pub fn tools(&self) -> &[Box<dyn EditTool>] {
        &self.tools
    }

    pub fn tool_names(&self) -> impl Iterator<Item = &str> {
        self.tools.iter().map(|tool| tool.name())
    }

    pub fn active_tool_index(&self) -> usize {
        self.active_tool
    }

    pub fn active_tool(&self) -> Option<&dyn EditTool> {
        self.tools.get(self.active_tool).map(|tool| tool.as_ref())
    }

    /// Make a tool active. Out-of-range indices are ignored. A gesture in
    /// progress keeps going to the tool that started it.
    pub fn select_tool(&mut self, index: usize) -> bool {
        if index >= self.tools.len() {
            debug!("Ignoring selection of tool {} of {}", index, self.tools.len());
            return false;
        }
        self.active_tool = index;
        true
    }

    /// Let the active tool draw its options
    pub fn render_active_tool_panel(&mut self, ui: &mut egui::Ui) {
        let Some(tool) = self.tools.get_mut(self.active_tool) else {
            return;
        };
        if tool.capabilities().contains(ToolCapabilities::RENDER_PANEL) {
            tool.render_panel(ui, &self.catalog);
        }
    }

    // ------------------------------------------------------------------
    // Catalog
    // ------------------------------------------------------------------

    pub fn catalog(&self) -> &TileCatalog {
        &self.catalog
    }

    /// Replace the catalog with freshly loaded definitions. On failure the
    /// current catalog stays in place.
    pub fn reload_catalog(
        &mut self,
        definitions: Vec<TileDefinition>,
    ) -> Result<(), ConfigurationError> {
        match TileCatalog::load(definitions) {
            Ok(catalog) => {
                info!("Reloaded tile catalog with {} definitions", catalog.len());
                self.catalog = catalog;
                Ok(())
            }
            Err(e) => {
                warn!("Keeping previous tile catalog: {}", e);
                Err(e.into())
            }
        }
    }

    // ------------------------------------------------------------------
    // Pointer input
    // ------------------------------------------------------------------

    pub fn capture_state(&self) -> CaptureState {
        self.capture
    }

    pub fn is_capturing(&self) -> bool {
        matches!(self.capture, CaptureState::Capturing { .. })
    }

    /// Grid point under a window position
    pub fn grid_point(&self, position: egui::Pos2) -> IVec2 {
        self.settings
            .grid_transform()
            .panel_to_grid(self.layout.window_to_field(position))
    }

    /// Route a pointer event. Returns true when the session took part in
    /// the gesture; whether a tool consumed it is on `event`.
    pub fn handle_pointer(&mut self, event: &mut PointerEvent, capture: &mut PointerCapture) -> bool {
        if capture.is_held_by_other(self.control_id) {
            return false;
        }
        let point = self.grid_point(event.position);

        match event.kind {
            PointerKind::Down => {
                if !capture.is_free() || self.level.is_none() {
                    return false;
                }
                capture.try_acquire(self.control_id);
                let tool = (self.active_tool < self.tools.len()).then_some(self.active_tool);
                self.capture = CaptureState::Capturing { tool };
                self.dispatch(tool, point, event);
                true
            }
            PointerKind::Drag => {
                let CaptureState::Capturing { tool } = self.capture else {
                    return false;
                };
                if !capture.is_held_by(self.control_id) {
                    return false;
                }
                self.dispatch(tool, point, event);
                true
            }
            PointerKind::Up => {
                let tool = match self.capture {
                    CaptureState::Capturing { tool } => tool,
                    CaptureState::Idle if capture.is_held_by(self.control_id) => None,
                    CaptureState::Idle => return false,
                };
                self.dispatch(tool, point, event);
                self.capture = CaptureState::Idle;
                capture.release(self.control_id);
                true
            }
        }
    }

    fn dispatch(&mut self, tool: Option<usize>, point: IVec2, event: &mut PointerEvent) {
        let Some(index) = tool else {
            return;
        };
        let Some(level) = self.level.as_mut() else {
            return;
        };
        let Some(tool) = self.tools.get_mut(index) else {
            return;
        };
        if !tool.capabilities().contains(event.kind.capability()) {
            return;
        }

        let mut ctx = ToolContext::new(level, &self.catalog);
        match event.kind {
            PointerKind::Down => tool.pointer_down(point, event, &mut ctx),
            PointerKind::Drag => tool.pointer_drag(point, event, &mut ctx),
            PointerKind::Up => tool.pointer_up(point, event, &mut ctx),
        }
        if ctx.is_modified() {
            self.dirty = true;
        }
    }

    // ------------------------------------------------------------------
    // Layout and drawing
    // ------------------------------------------------------------------

    pub fn layout(&self) -> &EditorLayout {
        &self.layout
    }

    pub fn grid_transform(&self) -> GridTransform {
        self.settings.grid_transform()
    }

    /// Recompute the layout for a window size
    pub fn update_layout(&mut self, window: Vec2) {
        let extent = self
            .level
            .as_ref()
            .map(|level| self.grid_transform().field_extent(level.field_size()));
        self.layout = EditorLayout::compute(
            window,
            self.settings.toolbar_height,
            self.settings.field_ratio,
            extent,
        );
    }

    fn refresh_layout(&mut self) {
        if self.layout.window != Vec2::ZERO {
            self.update_layout(self.layout.window);
        }
    }

    pub fn layer_mask(&self) -> LayerMask {
        self.layer_mask
    }

    pub fn set_layer_visible(&mut self, layer: usize, visible: bool) {
        self.layer_mask.set_visible(layer, visible);
    }

    /// Tiles and grid lines of the open level, in window space
    pub fn field_draw_list(&self) -> Option<FieldDrawList<'_>> {
        let level = self.level.as_ref()?;
        Some(FieldDrawList::build(
            level,
            &self.catalog,
            self.layer_mask,
            &self.grid_transform(),
            self.layout.field.min,
        ))
    }

    // ------------------------------------------------------------------
    // Level lifecycle
    // ------------------------------------------------------------------

    pub fn is_editing(&self) -> bool {
        self.level.is_some()
    }

    pub fn level(&self) -> Option<&LevelAsset> {
        self.level.as_ref()
    }

    /// Direct access to the open level. Changes made here are not tracked;
    /// follow them with [`EditorSession::mark_modified`].
    pub fn level_mut(&mut self) -> Option<&mut LevelAsset> {
        self.level.as_mut()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_modified(&mut self) {
        if self.level.is_some() {
            self.dirty = true;
        }
    }

    /// Open a level, saving the current one first. `None` is a no-op.
    ///
    /// If saving the current level fails it stays open and the error is
    /// returned.
    pub fn open_level(
        &mut self,
        level: Option<LevelAsset>,
        store: &mut dyn LevelStore,
    ) -> Result<(), EditorError> {
        let Some(level) = level else {
            return Ok(());
        };
        self.save(store)?;

        info!("Opened level '{}' ({})", level.name, level.id);
        self.level = Some(level);
        self.dirty = false;
        self.capture = CaptureState::Idle;
        self.refresh_layout();
        Ok(())
    }

    /// Build a level from the settings defaults, persist it and open it
    pub fn create_level(
        &mut self,
        name: &str,
        store: &mut dyn LevelStore,
    ) -> Result<(), EditorError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(EditorError::InvalidInput(
                "level name must not be empty".to_string(),
            ));
        }

        let level = LevelAsset::new_level(
            name,
            self.settings.default_field_size(),
            self.settings.default_layer_count,
        );
        store.save(&level)?;
        self.open_level(Some(level), store)
    }

    /// Open the stored level with this exact name. Returns false when there
    /// is none.
    pub fn jump_to_level(
        &mut self,
        name: &str,
        store: &mut dyn LevelStore,
    ) -> Result<bool, EditorError> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(false);
        }
        let found = match store.find_by_name(name) {
            Ok(found) => found,
            Err(StorageError::Corrupt { path, source }) => {
                error!("Level file {} is corrupted: {}", path.display(), source);
                return Err(EditorError::DataIntegrity(source));
            }
            Err(e) => return Err(e.into()),
        };
        match found {
            Some(level) => {
                self.open_level(Some(level), store)?;
                Ok(true)
            }
            None => {
                debug!("No level named '{}'", name);
                Ok(false)
            }
        }
    }

    /// Persist the open level. The dirty flag is cleared only on success.
    pub fn save(&mut self, store: &mut dyn LevelStore) -> Result<(), StorageError> {
        let Some(level) = self.level.as_ref() else {
            return Ok(());
        };
        match store.save(level) {
            Ok(()) => {
                self.dirty = false;
                Ok(())
            }
            Err(e) => {
                error!("Failed to save level '{}': {}", level.name, e);
                Err(e)
            }
        }
    }

    /// Save and close the open level. A failed save leaves it open.
    pub fn close(&mut self, store: &mut dyn LevelStore) -> Result<(), StorageError> {
        self.save(store)?;
        if let Some(level) = self.level.take() {
            info!("Closed level '{}'", level.name);
        }
        self.dirty = false;
        self.capture = CaptureState::Idle;
        self.refresh_layout();
        Ok(())
    }

    /// Resize every layer of the open level
    pub fn set_field_size(&mut self, size: UVec2) -> Result<(), EditorError> {
        let level = self
            .level
            .as_mut()
            .ok_or_else(|| EditorError::InvalidInput("no level is open".to_string()))?;
        LevelAsset::check_field_size(size)
            .map_err(|e| EditorError::InvalidInput(e.to_string()))?;
        level.set_field_size(size);
        self.dirty = true;
        self.refresh_layout();
        Ok(())
    }

    /// Append an empty layer to the open level
    pub fn add_layer(&mut self, name: impl Into<String>) -> Result<&mut LevelLayer, EditorError> {
        let level = self
            .level
            .as_mut()
            .ok_or_else(|| EditorError::InvalidInput("no level is open".to_string()))?;
        self.dirty = true;
        Ok(level.add_layer(name))
    }
}
