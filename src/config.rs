//! Editor configuration.
//!
//! Read from `<config_dir>/folioboard/config.json`. Every field has a
//! default, so a partial file (or no file at all) is fine.

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::constants::{
    APP_DIR_NAME, DEFAULT_BLOCK_POSITION, DEFAULT_BLOCK_SIZE, MAX_HISTORY_STATES,
    MIN_HISTORY_STATES,
};
use crate::document::MissingBlockPolicy;
use crate::persistence::default_store_dir;
use crate::types::{Position, Size};

const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Maximum snapshots kept, baseline included
    pub history_limit: usize,
    pub default_position: Position,
    pub default_size: Size,
    pub missing_block_policy: MissingBlockPolicy,
    /// Where [`crate::persistence::FileStore`] keeps portfolios; the
    /// platform data dir when unset
    pub store_dir: Option<PathBuf>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_limit: MAX_HISTORY_STATES,
            default_position: DEFAULT_BLOCK_POSITION,
            default_size: DEFAULT_BLOCK_SIZE,
            missing_block_policy: MissingBlockPolicy::default(),
            store_dir: None,
        }
    }
}

impl EditorConfig {
    /// Load and validate a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: EditorConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from the default location, falling back to defaults when the
    /// file is missing or invalid.
    pub fn load_or_default() -> Self {
        let Some(path) = default_config_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load(&path) {
            Ok(config) => {
                info!(path = %path.display(), "Loaded editor config");
                config
            }
            Err(err) => {
                warn!(error = format!("{err:#}"), "Invalid editor config, using defaults");
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.history_limit < MIN_HISTORY_STATES {
            bail!(
                "history_limit must be at least {MIN_HISTORY_STATES}, got {}",
                self.history_limit
            );
        }
        if !self.default_size.is_valid() {
            bail!("default_size must be positive, got {:?}", self.default_size);
        }
        if !self.default_position.is_finite() {
            bail!("default_position must be finite");
        }
        Ok(())
    }

    /// The configured store dir, else the platform default.
    pub fn resolved_store_dir(&self) -> Option<PathBuf> {
        self.store_dir.clone().or_else(default_store_dir)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }
}

/// `<config_dir>/folioboard/config.json`, if the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
}
