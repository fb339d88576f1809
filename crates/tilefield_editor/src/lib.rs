//! tilefield_editor - level editing session for tile-based levels
//!
//! This crate drives the editing of a [`tilefield_core::LevelAsset`]:
//! - Editor settings and the configured toolset (TOML)
//! - A registry that resolves tool type paths to tool factories
//! - Tools with optional pointer and panel capabilities
//! - Exclusive pointer capture for drag gestures
//! - Dirty tracking and explicit saves through a [`LevelStore`]
//!
//! # Usage
//!
//! ```rust,ignore
//! use tilefield_editor::{EditorSession, EditorSettings, ToolRegistry, PointerCapture};
//!
//! let mut session = EditorSession::new(EditorSettings::default(), catalog);
//! session.load_toolset(&ToolRegistry::with_builtin_tools())?;
//! session.create_level("Intro", &mut store)?;
//!
//! let mut capture = PointerCapture::default();
//! session.handle_pointer(&mut event, &mut capture);
//! session.save(&mut store)?;
//! ```

mod error;
pub mod input;
pub mod layout;
pub mod render;
pub mod session;
pub mod settings;
pub mod storage;
pub mod tools;
pub mod ui;

#[cfg(test)]
pub(crate) mod testing;

pub use tilefield_core;

pub use error::{ConfigurationError, EditorError, StorageError};
pub use input::{ControlId, PointerCapture, PointerEvent, PointerKind};
pub use layout::{EditorLayout, GridTransform};
pub use render::{FieldDrawList, LayerMask, TileDraw};
pub use session::{CaptureState, EditorSession};
pub use settings::{EditorSettings, ToolReference};
pub use storage::{DirectoryStore, LevelStore};
pub use tools::{
    EditTool, RectFillTool, RegisteredTool, TileBrushTool, TilePalette, ToolCapabilities,
    ToolContext, ToolInit, ToolRegistry,
};
