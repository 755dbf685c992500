//! Catalog loading service
//!
//! Reads the course catalog from a TOML file and validates it into a [`Catalog`].

use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use tracing::debug;

use crate::application::{ApplicationError, ApplicationResult, PathContextExt};
use crate::domain::{Catalog, CategoryLayout, Course};
use crate::infrastructure::traits::FileSystem;

/// On-disk catalog document.
///
/// ```toml
/// [layout]
/// categories = ["Major/Required", "Major/Elective", "Liberal Arts"]
///
/// [[courses]]
/// code = "GB10234"
/// name = "Data Structures"
/// category = ["Major", "Required"]
/// prerequisites = ["GB10111"]
/// credits = 2.0
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CatalogFile {
    layout: LayoutSection,
    courses: Vec<Course>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LayoutSection {
    categories: Vec<String>,
}

/// Service for loading the read-only course catalog.
pub struct CatalogService {
    fs: Arc<dyn FileSystem>,
}

impl CatalogService {
    /// Create a new catalog service.
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Load and validate the catalog at `path`.
    ///
    /// A non-empty `category_order` replaces the file's own `[layout]`.
    pub fn load(&self, path: &Path, category_order: &[String]) -> ApplicationResult<Catalog> {
        debug!("load: catalog={}", path.display());
        let content = self
            .fs
            .read_to_string(path)
            .with_path_context("read catalog", path)?;
        Self::parse(&content, path, category_order)
    }

    /// Parse catalog TOML; `path` is only used for error messages.
    pub fn parse(
        content: &str,
        path: &Path,
        category_order: &[String],
    ) -> ApplicationResult<Catalog> {
        let file: CatalogFile =
            toml::from_str(content).map_err(|e| ApplicationError::InvalidFile {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        let layout = if category_order.is_empty() {
            CategoryLayout::parse(&file.layout.categories)
        } else {
            CategoryLayout::parse(category_order)
        };
        debug!(
            "parse: {} courses, {} declared categories",
            file.courses.len(),
            layout.paths().len()
        );

        Ok(Catalog::with_layout(file.courses, layout)?)
    }
}
