//! Session lifecycle: who is signed in, across process restarts
//!
//! [`SessionStore`] is the single source of truth for the authenticated
//! identity. Consumers read from it; nothing else touches the persisted
//! token/user entries.
//!
//! ## State machine
//!
//! ```text
//!             ┌── no persisted entries ──────────────► Anonymous
//! Unknown ────┤
//!             └── token+user on disk ──► Restoring ──► verify /auth/me
//!                                            │  ok        │ fail
//!                                            ▼            ▼
//!                                       Authenticated  Anonymous (entries cleared)
//! ```
//!
//! `Authenticated` is never stored as a flag: it is derived from
//! `user.is_some()`, so it cannot go stale.

use log::{debug, warn};

use crate::api::types::{ProfileUpdate, SignupRequest, UserRecord};
use crate::api::TaskApi;
use crate::storage::credentials::CredentialStore;

/// Result of an auth-affecting operation, surfaced inline to the user.
/// These operations never propagate raw API errors to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    Success,
    /// Server-supplied detail message, or a per-operation default.
    Failure(String),
    /// Signup created the account but the chained login failed; the user
    /// should sign in manually. Distinct from `Failure` so the caller can
    /// say "account created, please sign in" instead of a bare error.
    CreatedButLoginFailed(String),
}

impl AuthOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, AuthOutcome::Success)
    }

    /// Error message, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            AuthOutcome::Success => None,
            AuthOutcome::Failure(msg) | AuthOutcome::CreatedButLoginFailed(msg) => Some(msg),
        }
    }
}

/// Owns the session: current user record, bearer token, restore flag.
pub struct SessionStore<'a, A: TaskApi> {
    api: &'a A,
    creds: CredentialStore,
    token: Option<String>,
    user: Option<UserRecord>,
    /// True only while the initial restore check is in flight. While set,
    /// consumers must not assume a definitive authentication state.
    loading: bool,
}

impl<'a, A: TaskApi> SessionStore<'a, A> {
    /// Empty session. Call [`restore`](Self::restore) before reading state.
    pub fn new(api: &'a A, creds: CredentialStore) -> Self {
        Self {
            api,
            creds,
            token: None,
            user: None,
            loading: false,
        }
    }

    // --- derived state ---

    /// Derived, never stored: authenticated ⇔ a user record is present.
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn user(&self) -> Option<&UserRecord> {
        self.user.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    #[allow(dead_code)] // the synchronous CLI never observes an in-flight restore
    pub fn loading(&self) -> bool {
        self.loading
    }

    // --- lifecycle operations ---

    /// Silent session restore at process start.
    ///
    /// Adopts the cached user optimistically, then verifies the token against
    /// `/auth/me`. Any verification failure means "session invalid": the
    /// persisted entries are cleared and the session demotes to anonymous
    /// without surfacing an error.
    pub fn restore(&mut self) {
        let Some((token, cached_user)) = self.creds.load() else {
            return;
        };

        // Optimistic: show the cached identity while verification runs.
        self.token = Some(token.clone());
        self.user = Some(cached_user);
        self.loading = true;

        match self.api.current_user(&token) {
            Ok(fresh) => {
                self.persist_user(&fresh);
                self.user = Some(fresh);
            }
            Err(e) => {
                debug!("session restore failed, signing out: {}", e);
                self.logout();
            }
        }
        self.loading = false;
    }

    /// Exchange credentials for a token, then fetch and store the user.
    pub fn login(&mut self, username: &str, password: &str) -> AuthOutcome {
        let token = match self.api.login(username, password) {
            Ok(response) => response.access_token,
            Err(e) => return AuthOutcome::Failure(e.detail_or("Login failed")),
        };

        if let Err(e) = self.creds.save_token(&token) {
            warn!("failed to persist token: {}", e);
        }

        let user = match self.api.current_user(&token) {
            Ok(user) => user,
            Err(e) => {
                // Token issued but unusable. Drop it so the persisted state
                // never holds a token without a user record.
                self.creds.clear();
                return AuthOutcome::Failure(e.detail_or("Login failed"));
            }
        };

        self.persist_user(&user);
        self.token = Some(token);
        self.user = Some(user);
        AuthOutcome::Success
    }

    /// Create the account, then chain into [`login`](Self::login) with the
    /// same credentials.
    pub fn signup(&mut self, payload: &SignupRequest) -> AuthOutcome {
        if let Err(e) = self.api.signup(payload) {
            return AuthOutcome::Failure(e.detail_or("Signup failed"));
        }

        match self.login(&payload.username, &payload.password) {
            AuthOutcome::Failure(msg) => AuthOutcome::CreatedButLoginFailed(msg),
            outcome => outcome,
        }
    }

    /// Synchronous and unconditional; never fails.
    pub fn logout(&mut self) {
        self.creds.clear();
        self.token = None;
        self.user = None;
    }

    /// Update the editable profile fields.
    ///
    /// The record is persisted only after the server acknowledges, from the
    /// server's response, and then propagated into this store directly.
    pub fn update_profile(&mut self, update: &ProfileUpdate) -> AuthOutcome {
        let Some(token) = self.token.clone() else {
            return AuthOutcome::Failure("Not signed in".to_string());
        };

        match self.api.update_profile(&token, update) {
            Ok(user) => {
                self.persist_user(&user);
                self.user = Some(user);
                AuthOutcome::Success
            }
            Err(e) => AuthOutcome::Failure(e.detail_or("Failed to update profile")),
        }
    }

    /// Write the user record to disk. A persistence failure leaves the
    /// in-memory session valid and is only logged.
    fn persist_user(&self, user: &UserRecord) {
        if let Err(e) = self.creds.save_user(user) {
            warn!("failed to persist user record: {}", e);
        }
    }
}
