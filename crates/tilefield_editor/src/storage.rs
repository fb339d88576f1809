//! Level persistence

use std::path::{Path, PathBuf};
use tilefield_core::LevelAsset;
use tracing::{debug, info};

use crate::error::StorageError;

/// File suffix of level documents written by [`DirectoryStore`]
pub const LEVEL_EXTENSION: &str = ".level.json";

/// Persistence collaborator used by the editing session.
///
/// Failures are reported as-is; the session never retries.
pub trait LevelStore {
    fn save(&mut self, level: &LevelAsset) -> Result<(), StorageError>;

    /// Look up a level by its exact name
    fn find_by_name(&mut self, name: &str) -> Result<Option<LevelAsset>, StorageError>;
}

/// Stores each level as `<root>/<name>.level.json`
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, name: &str) -> Result<PathBuf, StorageError> {
        let valid = !name.trim().is_empty()
            && !name.contains(['/', '\\'])
            && name != "."
            && name != "..";
        if !valid {
            return Err(StorageError::InvalidName(name.to_string()));
        }
        Ok(self.root.join(format!("{name}{LEVEL_EXTENSION}")))
    }

    /// Names of every level in the directory, sorted
    pub fn level_names(&self) -> Result<Vec<String>, StorageError> {
        let entries = match std::fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(StorageError::Io {
                    path: self.root.clone(),
                    source,
                })
            }
        };

        let mut names: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                let file_name = entry.file_name().into_string().ok()?;
                file_name.strip_suffix(LEVEL_EXTENSION).map(str::to_string)
            })
            .collect();
        names.sort();
        Ok(names)
    }
}

impl LevelStore for DirectoryStore {
    fn save(&mut self, level: &LevelAsset) -> Result<(), StorageError> {
        let path = self.path_for(&level.name)?;
        let json = level.to_json().map_err(|source| StorageError::Encode {
            name: level.name.clone(),
            source,
        })?;

        std::fs::create_dir_all(&self.root).map_err(|source| StorageError::Io {
            path: self.root.clone(),
            source,
        })?;
        std::fs::write(&path, json).map_err(|source| StorageError::Io {
            path: path.clone(),
            source,
        })?;

        info!("Saved level '{}' to {}", level.name, path.display());
        Ok(())
    }

    fn find_by_name(&mut self, name: &str) -> Result<Option<LevelAsset>, StorageError> {
        let path = self.path_for(name)?;
        let json = match std::fs::read_to_string(&path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No level named '{}' in {}", name, self.root.display());
                return Ok(None);
            }
            Err(source) => return Err(StorageError::Io { path, source }),
        };

        LevelAsset::from_json(&json)
            .map(Some)
            .map_err(|source| StorageError::Corrupt { path, source })
    }
}
