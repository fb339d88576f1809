//! Test helpers for `tilefield_editor`.
//!
//! Fixtures, a recording tool and an in-memory level store for use in
//! `#[cfg(test)]` modules within this crate.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use egui::Pos2;
use egui_kittest::Harness;
use glam::{IVec2, UVec2};
use tilefield_core::{LevelAsset, TileCatalog, TileDefinition};

use crate::error::StorageError;
use crate::input::PointerEvent;
use crate::session::EditorSession;
use crate::settings::{EditorSettings, ToolReference};
use crate::storage::LevelStore;
use crate::tools::{EditTool, ToolCapabilities, ToolContext, ToolRegistry};

// ============================================================================
// Fixtures
// ============================================================================

/// Grass (id 5) on layer 0, then Wall (id 7) on layer 1
pub fn sample_catalog() -> TileCatalog {
    TileCatalog::load(vec![
        TileDefinition::new(5, "Grass", "tiles/grass.png").with_walkable(true),
        TileDefinition::new(7, "Wall", "tiles/wall.png")
            .with_render_layer(1)
            .with_breakable(true, 3),
    ])
    .unwrap()
}

/// Settings with 32x32 tiles and the built-in toolset
pub fn sample_settings() -> EditorSettings {
    EditorSettings {
        tile_size: [32.0, 32.0],
        default_field_size: [4, 4],
        default_layer_count: 2,
        ..EditorSettings::default()
    }
}

/// Session with the built-in tools and a fresh level open.
///
/// The layout is left at its default so window and field coordinates coincide.
pub fn session_with_level(width: u32, height: u32, layers: usize) -> EditorSession {
    let mut session = EditorSession::new(sample_settings(), sample_catalog());
    session.load_toolset(&ToolRegistry::with_builtin_tools()).unwrap();
    let level = LevelAsset::new_level("Test", UVec2::new(width, height), layers);
    session
        .open_level(Some(level), &mut MemoryStore::default())
        .unwrap();
    session
}

/// Window position at the center of a grid cell for 32x32 tiles
pub fn cell_center(x: i32, y: i32) -> Pos2 {
    Pos2::new(y as f32 * 32.0 + 16.0, x as f32 * 32.0 + 16.0)
}

// ============================================================================
// Recording tool
// ============================================================================

/// Tool that records every callback it receives
pub struct RecordingTool {
    name: String,
    capabilities: ToolCapabilities,
    pub log: Arc<Mutex<Vec<String>>>,
}

impl RecordingTool {
    pub fn new(name: &str, capabilities: ToolCapabilities) -> Self {
        Self {
            name: name.to_string(),
            capabilities,
            log: Arc::default(),
        }
    }

    pub fn with_log(mut self, log: Arc<Mutex<Vec<String>>>) -> Self {
        self.log = log;
        self
    }

    fn record(&self, phase: &str, point: IVec2) {
        self.log
            .lock()
            .unwrap()
            .push(format!("{} {} ({}, {})", self.name, phase, point.x, point.y));
    }
}

impl EditTool for RecordingTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn capabilities(&self) -> ToolCapabilities {
        self.capabilities
    }

    fn pointer_down(&mut self, point: IVec2, event: &mut PointerEvent, _ctx: &mut ToolContext<'_>) {
        self.record("down", point);
        event.use_event();
    }

    fn pointer_drag(&mut self, point: IVec2, _event: &mut PointerEvent, _ctx: &mut ToolContext<'_>) {
        self.record("drag", point);
    }

    fn pointer_up(&mut self, point: IVec2, _event: &mut PointerEvent, _ctx: &mut ToolContext<'_>) {
        self.record("up", point);
    }

    fn render_panel(&mut self, ui: &mut egui::Ui, _catalog: &TileCatalog) {
        ui.label(format!("{} options", self.name));
    }
}

/// Registry with two recording tools sharing one log, plus the toolset
/// that references them
pub fn recording_registry(
    log: &Arc<Mutex<Vec<String>>>,
) -> (ToolRegistry, Vec<ToolReference>) {
    let all = ToolCapabilities::POINTER_DOWN
        | ToolCapabilities::POINTER_DRAG
        | ToolCapabilities::POINTER_UP
        | ToolCapabilities::RENDER_PANEL;

    let mut registry = ToolRegistry::default();
    for name in ["First", "Second"] {
        let log = log.clone();
        registry.register_fn(format!("test::{name}"), all, move |_| {
            Box::new(RecordingTool::new(name, all).with_log(log.clone()))
        });
    }
    let toolset = vec![
        ToolReference::new("test::First"),
        ToolReference::new("test::Second"),
    ];
    (registry, toolset)
}

pub fn take_log(log: &Arc<Mutex<Vec<String>>>) -> Vec<String> {
    std::mem::take(&mut *log.lock().unwrap())
}

// ============================================================================
// In-memory store
// ============================================================================

/// Level store backed by a map, with switchable save failures
#[derive(Debug, Default)]
pub struct MemoryStore {
    pub levels: HashMap<String, LevelAsset>,
    pub saves: usize,
    pub fail_saves: bool,
}

impl LevelStore for MemoryStore {
    fn save(&mut self, level: &LevelAsset) -> Result<(), StorageError> {
        if self.fail_saves {
            return Err(StorageError::Io {
                path: format!("memory://{}", level.name).into(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            });
        }
        self.saves += 1;
        self.levels.insert(level.name.clone(), level.clone());
        Ok(())
    }

    fn find_by_name(&mut self, name: &str) -> Result<Option<LevelAsset>, StorageError> {
        Ok(self.levels.get(name).cloned())
    }
}

// ============================================================================
// Harness builders
// ============================================================================

/// Build a `Harness` that renders the toolset panel for a session
pub fn harness_for_toolset_panel(session: EditorSession) -> Harness<'static, EditorSession> {
    Harness::new_ui_state(
        |ui, session: &mut EditorSession| {
            crate::ui::render_toolset_panel(ui, session);
        },
        session,
    )
}

/// Build a `Harness` that renders the layer visibility toggles
pub fn harness_for_layer_toggles(session: EditorSession) -> Harness<'static, EditorSession> {
    Harness::new_ui_state(
        |ui, session: &mut EditorSession| {
            crate::ui::render_layer_toggles(ui, session);
        },
        session,
    )
}
