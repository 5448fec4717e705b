//! Task list state: filters, fetch cycle, mutations
//!
//! [`TaskListController`] keeps the visible task collection consistent with
//! the active filter set and the server. Any filter change and every
//! successful mutation triggers a full re-fetch — no optimistic local edits,
//! no incremental merge. Fetch failures keep the previous collection and are
//! only logged; the caller decides how to surface mutation failures.
//!
//! The session is a read-only dependency: this controller reads the token
//! and the greeting name, never writes auth state.

use log::{debug, warn};

use crate::api::types::{TaskCreate, TaskFilters, TaskPriority, TaskRecord, TaskStatus, TaskUpdate};
use crate::api::{ApiError, TaskApi};
use crate::session::SessionStore;

/// Owns the visible task collection and the active filter set.
pub struct TaskListController<'a, A: TaskApi> {
    api: &'a A,
    session: &'a SessionStore<'a, A>,
    filters: TaskFilters,
    tasks: Vec<TaskRecord>,
    loading: bool,
    /// Generation of the most recently issued fetch. A completion tagged
    /// with an older generation lost the race and is discarded, so a stale
    /// response can never overwrite a newer one.
    latest_generation: u64,
}

impl<'a, A: TaskApi> TaskListController<'a, A> {
    /// Empty controller; call [`refresh`](Self::refresh) (or set a filter)
    /// to populate it.
    pub fn new(api: &'a A, session: &'a SessionStore<'a, A>) -> Self {
        Self {
            api,
            session,
            filters: TaskFilters::default(),
            tasks: Vec::new(),
            loading: false,
            latest_generation: 0,
        }
    }

    // --- read access ---

    pub fn tasks(&self) -> &[TaskRecord] {
        &self.tasks
    }

    pub fn filters(&self) -> &TaskFilters {
        &self.filters
    }

    #[allow(dead_code)] // the synchronous CLI never observes an in-flight fetch
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Greeting name from the session (read-only dependency).
    pub fn greeting_name(&self) -> Option<&str> {
        self.session.user().map(|u| u.display_name())
    }

    /// O(n) scan over the in-memory collection, uncached.
    pub fn count_by_status(&self, status: TaskStatus) -> usize {
        self.tasks.iter().filter(|t| t.status == status).count()
    }

    // --- filter mutations (each one re-fetches) ---

    #[allow(dead_code)] // single-field updates for interactive frontends; the CLI uses set_filters
    pub fn set_search(&mut self, search: impl Into<String>) {
        self.filters.search = search.into();
        self.refresh();
    }

    #[allow(dead_code)] // single-field updates for interactive frontends; the CLI uses set_filters
    pub fn set_status(&mut self, status: Option<TaskStatus>) {
        self.filters.status = status;
        self.refresh();
    }

    #[allow(dead_code)] // single-field updates for interactive frontends; the CLI uses set_filters
    pub fn set_priority(&mut self, priority: Option<TaskPriority>) {
        self.filters.priority = priority;
        self.refresh();
    }

    /// Replace the whole filter set at once with a single re-fetch. Used by
    /// the CLI, which knows every filter up front.
    pub fn set_filters(&mut self, filters: TaskFilters) {
        self.filters = filters;
        self.refresh();
    }

    /// Reset all three filter fields and re-fetch without parameters.
    #[allow(dead_code)] // single-field updates for interactive frontends; the CLI uses set_filters
    pub fn clear_filters(&mut self) {
        self.filters = TaskFilters::default();
        self.refresh();
    }

    // --- fetch cycle ---

    /// Re-fetch the collection scoped by the active filters.
    ///
    /// On success the collection is replaced wholesale; on failure the
    /// previous collection stays in place and the error is only logged.
    pub fn refresh(&mut self) {
        let generation = self.begin_fetch();
        let result = match self.session.token() {
            Some(token) => self.api.list_tasks(token, &self.filters),
            None => Err(ApiError::status(401, Some("Not signed in".to_string()))),
        };
        self.finish_fetch(generation, result);
    }

    /// Issue a new fetch generation and flag loading.
    fn begin_fetch(&mut self) -> u64 {
        self.latest_generation += 1;
        self.loading = true;
        self.latest_generation
    }

    /// Apply a fetch completion, unless a newer fetch has been issued since.
    fn finish_fetch(&mut self, generation: u64, result: Result<Vec<TaskRecord>, ApiError>) {
        if generation != self.latest_generation {
            debug!(
                "discarding stale task fetch (generation {} < {})",
                generation, self.latest_generation
            );
            return;
        }
        self.loading = false;
        match result {
            Ok(tasks) => self.tasks = tasks,
            Err(e) => warn!("failed to fetch tasks: {}", e),
        }
    }

    // --- mutations (refresh after ack, no optimistic update) ---

    pub fn create(&mut self, payload: &TaskCreate) -> Result<TaskRecord, ApiError> {
        let created = self.api.create_task(self.require_token()?, payload)?;
        self.refresh();
        Ok(created)
    }

    pub fn update(&mut self, id: i64, payload: &TaskUpdate) -> Result<TaskRecord, ApiError> {
        let updated = self.api.update_task(self.require_token()?, id, payload)?;
        self.refresh();
        Ok(updated)
    }

    /// Issue the delete request. The explicit user confirmation step happens
    /// in the CLI layer, before this is called.
    pub fn delete(&mut self, id: i64) -> Result<(), ApiError> {
        self.api.delete_task(self.require_token()?, id)?;
        self.refresh();
        Ok(())
    }

    fn require_token(&self) -> Result<&str, ApiError> {
        self.session
            .token()
            .ok_or_else(|| ApiError::status(401, Some("Not signed in".to_string())))
    }
}
