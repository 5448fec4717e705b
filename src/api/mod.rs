//! Remote API seam
//!
//! Everything the client knows about the PrimeTask server lives behind the
//! [`TaskApi`] trait: the HTTP implementation ([`http::HttpApi`]) attaches the
//! bearer token and talks JSON, while tests swap in [`mock::MockApi`]. The
//! session store and task list controller only ever see the trait.

pub mod http;
pub mod types;

#[cfg(test)]
pub mod mock;

use thiserror::Error;

use types::{
    ProfileUpdate, SignupRequest, TaskCreate, TaskFilters, TaskRecord, TaskUpdate, TokenResponse,
    UserRecord,
};

/// Remote call failure taxonomy.
///
/// Callers rarely match on the exact variant; they mostly want
/// [`ApiError::detail_or`] for an inline message, plus the 401/403 check in
/// the session store.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network-level failure: DNS, refused connection, timeout.
    #[error("transport error: {0}")]
    Transport(String),

    /// The server answered with a non-success status. `detail` carries the
    /// body's `detail` field when the server sent one.
    #[error("HTTP {code}{}", .detail.as_deref().map(|d| format!(": {d}")).unwrap_or_default())]
    Status { code: u16, detail: Option<String> },

    /// The body could not be decoded into the expected shape.
    #[error("decode error: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    pub fn status(code: u16, detail: Option<String>) -> Self {
        Self::Status { code, detail }
    }

    /// Server-supplied detail message, or the given default. This is the
    /// message shown inline to the user for auth-affecting operations.
    pub fn detail_or(&self, default: &str) -> String {
        match self {
            ApiError::Status {
                detail: Some(detail),
                ..
            } => detail.clone(),
            _ => default.to_string(),
        }
    }
}

/// The PrimeTask server surface consumed by this client.
///
/// Token handling is explicit: operations that require authentication take
/// the bearer token as a parameter, so the implementations stay stateless.
pub trait TaskApi {
    // --- auth ---
    fn login(&self, username: &str, password: &str) -> Result<TokenResponse, ApiError>;
    fn signup(&self, payload: &SignupRequest) -> Result<UserRecord, ApiError>;
    fn current_user(&self, token: &str) -> Result<UserRecord, ApiError>;

    // --- profile ---
    fn update_profile(&self, token: &str, update: &ProfileUpdate) -> Result<UserRecord, ApiError>;

    // --- tasks ---
    fn list_tasks(&self, token: &str, filters: &TaskFilters) -> Result<Vec<TaskRecord>, ApiError>;
    fn create_task(&self, token: &str, payload: &TaskCreate) -> Result<TaskRecord, ApiError>;
    fn update_task(&self, token: &str, id: i64, payload: &TaskUpdate)
        -> Result<TaskRecord, ApiError>;
    fn delete_task(&self, token: &str, id: i64) -> Result<(), ApiError>;

    // --- misc ---
    fn health(&self) -> Result<(), ApiError>;
}
