//! File-backed portfolio store.
//!
//! Each portfolio is `<dir>/<id>.json`. Writes go to a temp file in the
//! same directory and are renamed into place, so a crash mid-save leaves
//! the previous version intact.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use super::{Portfolio, PortfolioStore, StoreError, StoreResult, sort_newest_first};
use crate::config::EditorConfig;
use crate::constants::APP_DIR_NAME;

const PORTFOLIO_DIR_NAME: &str = "portfolios";

#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `dir`, creating it if needed.
    pub fn open(dir: impl Into<PathBuf>) -> StoreResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Open the configured store dir, or the one under the platform data dir.
    pub fn from_config(config: &EditorConfig) -> StoreResult<Self> {
        let dir = config
            .resolved_store_dir()
            .ok_or_else(|| StoreError::Backend("no data directory on this platform".to_string()))?;
        Self::open(dir)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// `None` unless `id` is a plain file stem of `[A-Za-z0-9-]`.
    fn lookup_path(&self, id: &str) -> Option<PathBuf> {
        let plain = !id.is_empty() && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-');
        plain.then(|| self.dir.join(format!("{id}.json")))
    }

    fn path_for(&self, id: &str) -> StoreResult<PathBuf> {
        self.lookup_path(id)
            .ok_or_else(|| StoreError::Backend(format!("invalid portfolio id: {id:?}")))
    }

    fn read(&self, path: &Path) -> StoreResult<Portfolio> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn write(&self, portfolio: &Portfolio) -> StoreResult<()> {
        let path = self.path_for(&portfolio.id)?;
        let json = serde_json::to_vec_pretty(portfolio)?;

        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(&json)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&path).map_err(|err| StoreError::Io(err.error))?;

        debug!(id = %portfolio.id, path = %path.display(), "Wrote portfolio");
        Ok(())
    }

    /// Every readable portfolio in the directory. Unreadable files are
    /// skipped with a warning.
    fn load_all(&self) -> StoreResult<Vec<Portfolio>> {
        let mut portfolios = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            match self.read(&path) {
                Ok(portfolio) => portfolios.push(portfolio),
                Err(err) => warn!(path = %path.display(), error = %err, "Skipping unreadable portfolio"),
            }
        }
        Ok(portfolios)
    }
}

impl PortfolioStore for FileStore {
    fn find_by_owner(&self, user_id: &str) -> StoreResult<Option<Portfolio>> {
        Ok(self.list_by_owner(user_id)?.into_iter().next())
    }

    fn list_by_owner(&self, user_id: &str) -> StoreResult<Vec<Portfolio>> {
        let mut owned: Vec<Portfolio> = self
            .load_all()?
            .into_iter()
            .filter(|portfolio| portfolio.user_id == user_id)
            .collect();
        sort_newest_first(&mut owned);
        Ok(owned)
    }

    fn get(&self, id: &str) -> StoreResult<Option<Portfolio>> {
        // No file can be stored under an id that is not a plain stem
        let Some(path) = self.lookup_path(id) else {
            debug!(id, "Lookup with non-storable id");
            return Ok(None);
        };
        if !path.exists() {
            return Ok(None);
        }
        self.read(&path).map(Some)
    }

    fn insert(&self, portfolio: Portfolio) -> StoreResult<Portfolio> {
        self.write(&portfolio)?;
        Ok(portfolio)
    }

    fn update(&self, portfolio: Portfolio) -> StoreResult<Portfolio> {
        if !self.path_for(&portfolio.id)?.exists() {
            return Err(StoreError::Missing(portfolio.id));
        }
        self.write(&portfolio)?;
        Ok(portfolio)
    }
}

/// `<data_dir>/folioboard/portfolios`, if the platform has a data dir.
pub fn default_store_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join(APP_DIR_NAME).join(PORTFOLIO_DIR_NAME))
}
