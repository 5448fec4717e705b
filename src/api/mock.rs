//! In-memory [`TaskApi`] implementation for tests
//!
//! Behaves like a tiny single-tenant server: signup registers a user, login
//! checks credentials and issues `token-{username}`, task mutations edit an
//! in-memory list. Failure injection is flag-based (`deny_login`,
//! `fail_list_with`) and every `list_tasks` call records the filters it was
//! given so tests can assert the exact fetch traffic.

use std::cell::RefCell;

use chrono::Utc;

use super::types::{
    ProfileUpdate, SignupRequest, TaskCreate, TaskFilters, TaskPriority, TaskRecord, TaskStatus,
    TaskUpdate, TokenResponse, UserRecord,
};
use super::{ApiError, TaskApi};

struct MockUser {
    password: String,
    record: UserRecord,
}

#[derive(Default)]
struct MockState {
    users: Vec<MockUser>,
    tasks: Vec<TaskRecord>,
    next_task_id: i64,
    next_user_id: i64,
    list_calls: Vec<TaskFilters>,
    /// When true, every login attempt fails with 401 regardless of credentials.
    deny_login: bool,
    /// When set, `list_tasks` fails with this HTTP status.
    fail_list_with: Option<u16>,
}

pub struct MockApi {
    state: RefCell<MockState>,
}

impl MockApi {
    pub fn new() -> Self {
        Self {
            state: RefCell::new(MockState {
                next_task_id: 1,
                next_user_id: 1,
                ..Default::default()
            }),
        }
    }

    /// Register a user; returns the record the server would hand back.
    pub fn with_user(self, username: &str, password: &str) -> Self {
        {
            let mut state = self.state.borrow_mut();
            let id = state.next_user_id;
            state.next_user_id += 1;
            state.users.push(MockUser {
                password: password.to_string(),
                record: UserRecord {
                    id,
                    username: username.to_string(),
                    email: format!("{}@example.com", username),
                    full_name: None,
                    is_active: true,
                    created_at: Utc::now(),
                },
            });
        }
        self
    }

    pub fn seed_task(&self, title: &str, status: TaskStatus, priority: TaskPriority) -> i64 {
        let mut state = self.state.borrow_mut();
        let id = state.next_task_id;
        state.next_task_id += 1;
        state.tasks.push(TaskRecord {
            id,
            title: title.to_string(),
            description: None,
            status,
            priority,
            owner_id: 1,
            created_at: Utc::now(),
            updated_at: None,
        });
        id
    }

    pub fn deny_login(&self, deny: bool) {
        self.state.borrow_mut().deny_login = deny;
    }

    pub fn fail_list_with(&self, code: Option<u16>) {
        self.state.borrow_mut().fail_list_with = code;
    }

    /// Drain the recorded `list_tasks` filter sets.
    pub fn take_list_calls(&self) -> Vec<TaskFilters> {
        std::mem::take(&mut self.state.borrow_mut().list_calls)
    }

    pub fn token_for(username: &str) -> String {
        format!("token-{}", username)
    }

    fn check_token(state: &MockState, token: &str) -> Result<usize, ApiError> {
        state
            .users
            .iter()
            .position(|u| Self::token_for(&u.record.username) == token)
            .ok_or_else(|| ApiError::status(401, Some("Could not validate credentials".into())))
    }
}

impl TaskApi for MockApi {
    fn login(&self, username: &str, password: &str) -> Result<TokenResponse, ApiError> {
        let state = self.state.borrow();
        let ok = !state.deny_login
            && state
                .users
                .iter()
                .any(|u| u.record.username == username && u.password == password);
        if !ok {
            return Err(ApiError::status(
                401,
                Some("Incorrect username or password".into()),
            ));
        }
        Ok(TokenResponse {
            access_token: Self::token_for(username),
            token_type: Some("bearer".into()),
        })
    }

    fn signup(&self, payload: &SignupRequest) -> Result<UserRecord, ApiError> {
        let mut state = self.state.borrow_mut();
        if state
            .users
            .iter()
            .any(|u| u.record.username == payload.username)
        {
            return Err(ApiError::status(
                400,
                Some("Username already registered".into()),
            ));
        }
        let id = state.next_user_id;
        state.next_user_id += 1;
        let record = UserRecord {
            id,
            username: payload.username.clone(),
            email: payload.email.clone(),
            full_name: payload.full_name.clone(),
            is_active: true,
            created_at: Utc::now(),
        };
        state.users.push(MockUser {
            password: payload.password.clone(),
            record: record.clone(),
        });
        Ok(record)
    }

    fn current_user(&self, token: &str) -> Result<UserRecord, ApiError> {
        let state = self.state.borrow();
        let idx = Self::check_token(&state, token)?;
        Ok(state.users[idx].record.clone())
    }

    fn update_profile(&self, token: &str, update: &ProfileUpdate) -> Result<UserRecord, ApiError> {
        let mut state = self.state.borrow_mut();
        let idx = Self::check_token(&state, token)?;
        let record = &mut state.users[idx].record;
        if let Some(full_name) = &update.full_name {
            record.full_name = Some(full_name.clone());
        }
        if let Some(email) = &update.email {
            record.email = email.clone();
        }
        Ok(record.clone())
    }

    fn list_tasks(&self, token: &str, filters: &TaskFilters) -> Result<Vec<TaskRecord>, ApiError> {
        let mut state = self.state.borrow_mut();
        Self::check_token(&state, token)?;
        state.list_calls.push(filters.clone());
        if let Some(code) = state.fail_list_with {
            return Err(ApiError::status(code, None));
        }
        let search = filters.search.to_lowercase();
        Ok(state
            .tasks
            .iter()
            .filter(|t| search.is_empty() || t.title.to_lowercase().contains(&search))
            .filter(|t| filters.status.map_or(true, |s| t.status == s))
            .filter(|t| filters.priority.map_or(true, |p| t.priority == p))
            .cloned()
            .collect())
    }

    fn create_task(&self, token: &str, payload: &TaskCreate) -> Result<TaskRecord, ApiError> {
        let mut state = self.state.borrow_mut();
        Self::check_token(&state, token)?;
        let id = state.next_task_id;
        state.next_task_id += 1;
        let record = TaskRecord {
            id,
            title: payload.title.clone(),
            description: payload.description.clone(),
            status: payload.status,
            priority: payload.priority,
            owner_id: 1,
            created_at: Utc::now(),
            updated_at: None,
        };
        state.tasks.push(record.clone());
        Ok(record)
    }

    fn update_task(
        &self,
        token: &str,
        id: i64,
        payload: &TaskUpdate,
    ) -> Result<TaskRecord, ApiError> {
        let mut state = self.state.borrow_mut();
        Self::check_token(&state, token)?;
        let task = state
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| ApiError::status(404, Some("Task not found".into())))?;
        if let Some(title) = &payload.title {
            task.title = title.clone();
        }
        if let Some(description) = &payload.description {
            task.description = Some(description.clone());
        }
        if let Some(status) = payload.status {
            task.status = status;
        }
        if let Some(priority) = payload.priority {
            task.priority = priority;
        }
        task.updated_at = Some(Utc::now());
        Ok(task.clone())
    }

    fn delete_task(&self, token: &str, id: i64) -> Result<(), ApiError> {
        let mut state = self.state.borrow_mut();
        Self::check_token(&state, token)?;
        let before = state.tasks.len();
        state.tasks.retain(|t| t.id != id);
        if state.tasks.len() == before {
            return Err(ApiError::status(404, Some("Task not found".into())));
        }
        Ok(())
    }

    fn health(&self) -> Result<(), ApiError> {
        Ok(())
    }
}
