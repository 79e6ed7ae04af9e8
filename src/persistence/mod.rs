//! Portfolio persistence boundary.
//!
//! A portfolio is one saved composition owned by a user. Stores only offer
//! record-level operations; the upsert-by-owner rule and the public error
//! taxonomy live in [`crate::service`].
//!
//! ## Modules
//!
//! - `error` - `StoreError` and `StoreResult`
//! - `memory` - In-process store behind a mutex
//! - `file` - One JSON file per portfolio, written atomically

mod error;
mod file;
mod memory;

pub use error::{StoreError, StoreResult};
pub use file::{FileStore, default_store_dir};
pub use memory::MemoryStore;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::codec::blocks_from_stored;
use crate::error::LayoutResult;
use crate::types::{Block, now_millis};

/// A stored composition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    pub id: String,
    pub user_id: String,
    pub title: String,
    /// `{ "blocks": [...] }`, kept as raw JSON so older records still load
    pub layout_json: Value,
    /// Unix milliseconds
    pub created_at: u64,
    /// Unix milliseconds
    pub updated_at: u64,
}

impl Portfolio {
    /// A new record with a fresh UUID v4 id, created and updated now.
    pub fn new(user_id: impl Into<String>, title: impl Into<String>, layout_json: Value) -> Self {
        let now = now_millis();
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.into(),
            title: title.into(),
            layout_json,
            created_at: now,
            updated_at: now,
        }
    }

    /// Decode the stored blocks. A missing `blocks` key opens as empty.
    pub fn blocks(&self) -> LayoutResult<Vec<Block>> {
        blocks_from_stored(&self.layout_json)
    }

    /// Bump `updated_at`, never moving it backwards.
    pub fn touch(&mut self) {
        self.updated_at = now_millis().max(self.updated_at);
    }
}

/// The payload of a save: who owns it, its title and the encoded layout.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SaveRequest {
    pub user_id: String,
    pub title: String,
    pub layout_json: Value,
}

impl SaveRequest {
    pub fn new(user_id: impl Into<String>, title: impl Into<String>, layout_json: Value) -> Self {
        Self {
            user_id: user_id.into(),
            title: title.into(),
            layout_json,
        }
    }

    /// Extract a request from a loosely typed body. Returns `None` when
    /// `user_id` or `title` is not a non-empty string, or `layout_json` is
    /// absent, null, false, zero or an empty string.
    pub fn from_body(body: &Value) -> Option<Self> {
        let user_id = non_empty_str(body.get("user_id"))?;
        let title = non_empty_str(body.get("title"))?;
        let layout_json = body.get("layout_json").filter(|value| is_present(value))?;
        Some(Self::new(user_id, title, layout_json.clone()))
    }

    /// All three fields are present and non-empty.
    pub fn is_complete(&self) -> bool {
        !self.user_id.is_empty() && !self.title.is_empty() && is_present(&self.layout_json)
    }
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|s| !s.is_empty())
}

fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Record-level storage for portfolios.
pub trait PortfolioStore: Send + Sync {
    /// The portfolio owned by `user_id`, if any.
    fn find_by_owner(&self, user_id: &str) -> StoreResult<Option<Portfolio>>;

    /// All portfolios owned by `user_id`, most recently created first.
    fn list_by_owner(&self, user_id: &str) -> StoreResult<Vec<Portfolio>>;

    fn get(&self, id: &str) -> StoreResult<Option<Portfolio>>;

    fn insert(&self, portfolio: Portfolio) -> StoreResult<Portfolio>;

    /// Replace an existing record. [`StoreError::Missing`] if its id is
    /// not stored.
    fn update(&self, portfolio: Portfolio) -> StoreResult<Portfolio>;
}

/// Most recently created first; ties broken by id for a stable order.
pub(crate) fn sort_newest_first(portfolios: &mut [Portfolio]) {
    portfolios.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
}
