//! Selection store service
//!
//! Persists the selection map between CLI invocations. The navigation core
//! only ever sees [`SelectionMap`] values; this is the outside collaborator.

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::{ApplicationError, ApplicationResult, PathContextExt};
use crate::domain::SelectionMap;
use crate::infrastructure::traits::FileSystem;

/// On-disk selection document.
///
/// ```toml
/// [selection]
/// GB10111 = "completed"
/// GB10234 = "planned"
/// ```
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct SelectionFile {
    selection: SelectionMap,
}

/// Service for loading and saving the selection map.
pub struct SelectionService {
    fs: Arc<dyn FileSystem>,
}

impl SelectionService {
    /// Create a new selection service.
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Load the selection at `path`; a missing file is an empty selection.
    pub fn load(&self, path: &Path) -> ApplicationResult<SelectionMap> {
        if !self.fs.exists(path) {
            debug!("load: no selection file at {}", path.display());
            return Ok(SelectionMap::new());
        }
        let content = self
            .fs
            .read_to_string(path)
            .with_path_context("read selection", path)?;
        let file: SelectionFile =
            toml::from_str(&content).map_err(|e| ApplicationError::InvalidFile {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        debug!("load: {} selected courses", file.selection.len());
        Ok(file.selection)
    }

    /// Write `selection` to `path`, creating parent directories.
    pub fn save(&self, path: &Path, selection: &SelectionMap) -> ApplicationResult<()> {
        let file = SelectionFile {
            selection: selection.clone(),
        };
        let content = toml::to_string_pretty(&file).map_err(|e| ApplicationError::InvalidFile {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        self.fs
            .ensure_parent(path)
            .with_path_context("create selection directory", path)?;
        self.fs
            .write(path, &content)
            .with_path_context("write selection", path)?;
        debug!("save: {} selected courses to {}", selection.len(), path.display());
        Ok(())
    }
}
