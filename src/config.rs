//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/coursenav/coursenav.toml`
//! 3. Local config: file passed with `--config`
//! 4. Environment variables: `COURSENAV_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;

/// Raw settings for intermediate parsing (Option to detect "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub catalog_path: Option<PathBuf>,
    pub selection_path: Option<PathBuf>,
    pub category_order: Option<Vec<String>>,
}

/// Unified configuration for coursenav.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Course catalog TOML file
    pub catalog_path: PathBuf,
    /// Selection store TOML file
    pub selection_path: PathBuf,
    /// Top-down tab order as `"Category/Sub"` entries; empty keeps the catalog's layout
    pub category_order: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        let data_dir = default_data_dir();
        Self {
            catalog_path: data_dir.join("catalog.toml"),
            selection_path: data_dir.join("selection.toml"),
            category_order: Vec::new(),
        }
    }
}

/// Default data directory (XDG data dir, falling back to ~/.coursenav).
fn default_data_dir() -> PathBuf {
    ProjectDirs::from("", "", "coursenav")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("~/.coursenav"))
}

/// Get the XDG config directory for coursenav.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "coursenav").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("coursenav.toml"))
}

/// Expand `~`, `$VAR` and `${VAR}`; unresolvable input is returned unchanged.
fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    shellexpand::full(raw.as_ref())
        .map(|s| PathBuf::from(s.into_owned()))
        .unwrap_or_else(|_| path.to_path_buf())
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Expand shell variables and tilde in path fields.
    fn expand_paths(&mut self) {
        self.catalog_path = expand_path(&self.catalog_path);
        self.selection_path = expand_path(&self.selection_path);
    }

    /// Overlay wins wherever it specifies a value.
    ///
    /// `category_order` is replaced as a whole: a tab order has no sensible union.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            catalog_path: overlay
                .catalog_path
                .clone()
                .unwrap_or_else(|| self.catalog_path.clone()),
            selection_path: overlay
                .selection_path
                .clone()
                .unwrap_or_else(|| self.selection_path.clone()),
            category_order: overlay
                .category_order
                .clone()
                .unwrap_or_else(|| self.category_order.clone()),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_config` - Optional explicit config file, applied over the global one
    pub fn load(local_config: Option<&Path>) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        // 3. Explicit local config must exist when given
        if let Some(local_path) = local_config {
            if !local_path.exists() {
                return Err(ApplicationError::Config {
                    message: format!("config file not found: {}", local_path.display()),
                });
            }
            let raw = load_raw_settings(local_path)?;
            current = current.merge_with(&raw);
        }

        // 4. Environment variables (explicit override)
        current = Self::apply_env_overrides(current)?;

        current.expand_paths();

        Ok(current)
    }

    /// Apply COURSENAV_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let builder = Config::builder().add_source(
            Environment::with_prefix("COURSENAV")
                .prefix_separator("_")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("category_order")
                .try_parsing(true),
        );

        let config = builder.build().map_err(config_err)?;

        if let Ok(val) = config.get_string("catalog_path") {
            settings.catalog_path = PathBuf::from(val);
        }
        if let Ok(val) = config.get_string("selection_path") {
            settings.selection_path = PathBuf::from(val);
        }
        if let Ok(val) = config.get::<Vec<String>>("category_order") {
            settings.category_order = val;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# coursenav configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/coursenav/coursenav.toml
#   Local:  file passed with --config
#   Env:    COURSENAV_* environment variables (e.g. COURSENAV_CATALOG_PATH)

# Course catalog (TOML with [[courses]] entries)
# catalog_path = "~/.local/share/coursenav/catalog.toml"

# Where tagged courses are stored
# selection_path = "~/.local/share/coursenav/selection.toml"

# Tab order, top-level first; overrides the catalog's [layout]
# category_order = ["Major/Required", "Major/Elective", "Liberal Arts"]
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
