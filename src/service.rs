//! Portfolio API surface over a [`PortfolioStore`].
//!
//! Typed operations (`save`, `fetch`, `fetch_by_id`) return [`ApiError`];
//! the `handle_*` methods turn those into status-coded JSON responses the
//! way an HTTP route would. Failures are logged here and nowhere else.

use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;
use tracing::{error, info};

use crate::persistence::{Portfolio, PortfolioStore, SaveRequest, StoreError};

const MISSING_FIELDS: &str = "Missing required fields";
const USER_ID_REQUIRED: &str = "User ID is required";
const NOT_FOUND: &str = "Portfolio not found";
const DATABASE_ERROR: &str = "Database error";
const SAVE_FAILED: &str = "Failed to save portfolio";
const FETCH_FAILED: &str = "Failed to fetch portfolios";
const LOAD_FAILED: &str = "Failed to load portfolio";
const INTERNAL_ERROR: &str = "Internal server error";

#[derive(Error, Debug)]
pub enum ApiError {
    /// A required request field is missing or empty
    #[error("{0}")]
    Validation(&'static str),

    /// No portfolio with this id
    #[error("portfolio not found: {0}")]
    NotFound(String),

    /// The store failed; `message` is what the caller sees
    #[error("{message}: {source}")]
    Persistence {
        message: &'static str,
        #[source]
        source: StoreError,
    },

    /// Anything else; details are logged, never returned
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type alias for service operations
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    fn persistence(message: &'static str) -> impl FnOnce(StoreError) -> ApiError {
        move |source| ApiError::Persistence { message, source }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::Validation(_) => 400,
            ApiError::NotFound(_) => 404,
            ApiError::Persistence { .. } | ApiError::Internal(_) => 500,
        }
    }

    /// The message returned to callers. Backend details stay in the logs.
    pub fn public_message(&self) -> &'static str {
        match self {
            ApiError::Validation(message) => *message,
            ApiError::NotFound(_) => NOT_FOUND,
            ApiError::Persistence { message, .. } => *message,
            ApiError::Internal(_) => INTERNAL_ERROR,
        }
    }
}

/// A status code and JSON body.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    pub fn ok(body: Value) -> Self {
        Self { status: 200, body }
    }

    pub fn from_error(err: &ApiError) -> Self {
        Self {
            status: err.status_code(),
            body: json!({ "error": err.public_message() }),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

pub struct PortfolioService<S> {
    store: S,
}

impl<S: PortfolioStore> PortfolioService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    // ==================== Typed operations ====================

    /// Upsert by owner: update the user's portfolio if one exists,
    /// otherwise create it.
    pub fn save(&self, request: &SaveRequest) -> ApiResult<Portfolio> {
        if !request.is_complete() {
            return Err(ApiError::Validation(MISSING_FIELDS));
        }

        let existing = self
            .store
            .find_by_owner(&request.user_id)
            .map_err(ApiError::persistence(DATABASE_ERROR))?;

        let saved = match existing {
            Some(mut portfolio) => {
                portfolio.title = request.title.clone();
                portfolio.layout_json = request.layout_json.clone();
                portfolio.touch();
                self.store.update(portfolio)
            }
            None => self.store.insert(Portfolio::new(
                request.user_id.clone(),
                request.title.clone(),
                request.layout_json.clone(),
            )),
        }
        .map_err(ApiError::persistence(SAVE_FAILED))?;

        info!(id = %saved.id, user_id = %saved.user_id, "Saved portfolio");
        Ok(saved)
    }

    /// All of a user's portfolios, most recently created first.
    pub fn fetch(&self, user_id: &str) -> ApiResult<Vec<Portfolio>> {
        if user_id.is_empty() {
            return Err(ApiError::Validation(USER_ID_REQUIRED));
        }
        self.store
            .list_by_owner(user_id)
            .map_err(ApiError::persistence(FETCH_FAILED))
    }

    /// One portfolio by id, for public viewing.
    pub fn fetch_by_id(&self, id: &str) -> ApiResult<Portfolio> {
        self.store
            .get(id)
            .map_err(ApiError::persistence(LOAD_FAILED))?
            .ok_or_else(|| ApiError::NotFound(id.to_string()))
    }

    // ==================== Route handlers ====================

    /// Handle a raw save request body.
    pub fn handle_save_str(&self, body: &str) -> ApiResponse {
        match serde_json::from_str::<Value>(body) {
            Ok(body) => self.handle_save(&body),
            Err(err) => respond(Err(ApiError::Internal(format!("unparseable body: {err}"))), "save"),
        }
    }

    pub fn handle_save(&self, body: &Value) -> ApiResponse {
        let result = SaveRequest::from_body(body)
            .ok_or(ApiError::Validation(MISSING_FIELDS))
            .and_then(|request| self.save(&request))
            .and_then(|portfolio| {
                Ok(json!({ "success": true, "portfolio": to_json(&portfolio)? }))
            });
        respond(result, "save")
    }

    pub fn handle_fetch(&self, user_id: Option<&str>) -> ApiResponse {
        let result = self
            .fetch(user_id.unwrap_or_default())
            .and_then(|portfolios| {
                Ok(json!({ "success": true, "portfolios": to_json(&portfolios)? }))
            });
        respond(result, "fetch")
    }

    pub fn handle_view(&self, id: &str) -> ApiResponse {
        let result = self
            .fetch_by_id(id)
            .and_then(|portfolio| Ok(json!({ "success": true, "portfolio": to_json(&portfolio)? })));
        respond(result, "view")
    }
}

fn to_json<T: Serialize>(value: &T) -> ApiResult<Value> {
    serde_json::to_value(value).map_err(|err| ApiError::Internal(err.to_string()))
}

fn respond(result: ApiResult<Value>, route: &'static str) -> ApiResponse {
    match result {
        Ok(body) => ApiResponse::ok(body),
        Err(err) => {
            error!(route, status = err.status_code(), error = %err, "Portfolio request failed");
            ApiResponse::from_error(&err)
        }
    }
}
