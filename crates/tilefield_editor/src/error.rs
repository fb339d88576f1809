//! Error types for the editing session

use std::path::PathBuf;
use thiserror::Error;
use tilefield_core::{CatalogError, LevelError};

/// Problems with editor settings, the toolset or the tile catalog.
///
/// These block tool availability but never bring the host down.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("tool type '{type_path}' could not be resolved")]
    UnresolvedTool { type_path: String },
    #[error("unknown tool capability '{0}'")]
    UnknownCapability(String),
    #[error("invalid editor settings: {0}")]
    InvalidSettings(String),
    #[error("failed to parse editor settings: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to write editor settings: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("tile catalog rejected: {0}")]
    Catalog(#[from] CatalogError),
}

/// Failures reported by a level store
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("level file {} could not be loaded: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: LevelError,
    },
    #[error("level '{name}' could not be encoded: {source}")]
    Encode {
        name: String,
        #[source]
        source: LevelError,
    },
    #[error("invalid level name '{0}'")]
    InvalidName(String),
}

/// Any error an editing action can surface to the user
#[derive(Debug, Error)]
pub enum EditorError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error("level data is corrupted: {0}")]
    DataIntegrity(#[from] LevelError),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
