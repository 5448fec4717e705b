//! `ureq`-backed implementation of [`TaskApi`]
//!
//! One blocking request per call, with the timeout taken from client config.
//! Token attachment happens here and nowhere else; callers never build an
//! `Authorization` header themselves.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::types::{
    ProfileUpdate, SignupRequest, TaskCreate, TaskFilters, TaskRecord, TaskUpdate, TokenResponse,
    UserRecord,
};
use super::{ApiError, TaskApi};
use crate::storage::config::ApiConfig;

/// HTTP client for the PrimeTask server.
pub struct HttpApi {
    agent: ureq::Agent,
    base_url: String,
}

/// Error body shape: FastAPI sends `{"detail": ...}` where detail is a plain
/// string for auth/lookup failures and a structured list for validation ones.
#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<serde_json::Value>,
}

impl HttpApi {
    pub fn new(config: &ApiConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build();
        Self {
            agent,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn bearer(token: &str) -> String {
        format!("Bearer {}", token)
    }

    /// Map a `ureq` failure into the client taxonomy, pulling the server's
    /// `detail` out of the body when there is one.
    fn map_err(err: ureq::Error) -> ApiError {
        match err {
            ureq::Error::Status(code, response) => {
                let detail = response
                    .into_json::<ErrorBody>()
                    .ok()
                    .and_then(|body| body.detail)
                    .map(|v| match v {
                        serde_json::Value::String(s) => s,
                        other => other.to_string(),
                    });
                ApiError::status(code, detail)
            }
            ureq::Error::Transport(transport) => ApiError::transport(transport.to_string()),
        }
    }

    fn read_json<T: DeserializeOwned>(response: ureq::Response) -> Result<T, ApiError> {
        response
            .into_json::<T>()
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

impl TaskApi for HttpApi {
    fn login(&self, username: &str, password: &str) -> Result<TokenResponse, ApiError> {
        let response = self
            .agent
            .post(&self.url("/api/auth/login"))
            .send_json(serde_json::json!({
                "username": username,
                "password": password,
            }))
            .map_err(Self::map_err)?;
        Self::read_json(response)
    }

    fn signup(&self, payload: &SignupRequest) -> Result<UserRecord, ApiError> {
        let response = self
            .agent
            .post(&self.url("/api/auth/signup"))
            .send_json(payload)
            .map_err(Self::map_err)?;
        Self::read_json(response)
    }

    fn current_user(&self, token: &str) -> Result<UserRecord, ApiError> {
        let response = self
            .agent
            .get(&self.url("/api/auth/me"))
            .set("Authorization", &Self::bearer(token))
            .call()
            .map_err(Self::map_err)?;
        Self::read_json(response)
    }

    fn update_profile(&self, token: &str, update: &ProfileUpdate) -> Result<UserRecord, ApiError> {
        let response = self
            .agent
            .put(&self.url("/api/users/me"))
            .set("Authorization", &Self::bearer(token))
            .send_json(update)
            .map_err(Self::map_err)?;
        Self::read_json(response)
    }

    fn list_tasks(&self, token: &str, filters: &TaskFilters) -> Result<Vec<TaskRecord>, ApiError> {
        let mut request = self
            .agent
            .get(&self.url("/api/tasks"))
            .set("Authorization", &Self::bearer(token));
        for (key, value) in filters.query_pairs() {
            request = request.query(key, &value);
        }
        let response = request.call().map_err(Self::map_err)?;
        Self::read_json(response)
    }

    fn create_task(&self, token: &str, payload: &TaskCreate) -> Result<TaskRecord, ApiError> {
        let response = self
            .agent
            .post(&self.url("/api/tasks"))
            .set("Authorization", &Self::bearer(token))
            .send_json(payload)
            .map_err(Self::map_err)?;
        Self::read_json(response)
    }

    fn update_task(
        &self,
        token: &str,
        id: i64,
        payload: &TaskUpdate,
    ) -> Result<TaskRecord, ApiError> {
        let response = self
            .agent
            .put(&self.url(&format!("/api/tasks/{}", id)))
            .set("Authorization", &Self::bearer(token))
            .send_json(payload)
            .map_err(Self::map_err)?;
        Self::read_json(response)
    }

    fn delete_task(&self, token: &str, id: i64) -> Result<(), ApiError> {
        // 204 No Content on success
        self.agent
            .delete(&self.url(&format!("/api/tasks/{}", id)))
            .set("Authorization", &Self::bearer(token))
            .call()
            .map_err(Self::map_err)?;
        Ok(())
    }

    fn health(&self) -> Result<(), ApiError> {
        self.agent
            .get(&self.url("/health"))
            .call()
            .map_err(Self::map_err)?;
        Ok(())
    }
}
