//! Task store use-case service.
//!
//! # Responsibility
//! - Own the canonical [`TaskList`] for the process.
//! - Persist the full list after every successful mutation.
//! - Seed the list from the stored snapshot at startup.
//!
//! # Invariants
//! - Each successful add/delete/commit_edit/clear_all performs exactly one
//!   snapshot write; rejected operations and reads perform none.
//! - Persistence failures are logged and swallowed. Memory stays authoritative
//!   and is never rolled back; the next successful write re-syncs storage.
//! - Task text is never written to logs.

use crate::model::task::Task;
use crate::model::task_list::{EditSession, PersistRequest, TaskList, TaskListError};
use crate::repo::snapshot_repo::TaskSnapshotRepository;
use log::{error, info, warn};
use std::time::Instant;

/// Result of seeding the store from storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A snapshot was found and replaced the in-memory list.
    Restored { count: usize },
    /// Nothing was ever saved; the list is left as is.
    Absent,
    /// The snapshot could not be read; the list is left as is.
    Unreadable,
}

/// Task list plus the snapshot repository that mirrors it.
pub struct TaskStore<R: TaskSnapshotRepository> {
    repo: R,
    list: TaskList,
}

impl<R: TaskSnapshotRepository> TaskStore<R> {
    /// Creates an empty store without reading storage.
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            list: TaskList::new(),
        }
    }

    /// Creates a store and seeds it from the stored snapshot.
    pub fn open(repo: R) -> Self {
        let mut store = Self::new(repo);
        store.load();
        store
    }

    /// Replaces the in-memory list with the stored snapshot, if any.
    ///
    /// Never writes. An unreadable snapshot is logged for operators and the
    /// list is not touched, so a startup load yields an empty list.
    pub fn load(&mut self) -> LoadOutcome {
        let started_at = Instant::now();
        match self.repo.read_tasks() {
            Ok(Some(tasks)) => {
                let count = tasks.len();
                self.list.replace_tasks(tasks);
                info!(
                    "event=task_load module=service status=ok outcome=restored count={count} duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                LoadOutcome::Restored { count }
            }
            Ok(None) => {
                info!(
                    "event=task_load module=service status=ok outcome=absent duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                LoadOutcome::Absent
            }
            Err(err) => {
                error!(
                    "event=task_load module=service status=error error_code={} error={err}",
                    err.code()
                );
                LoadOutcome::Unreadable
            }
        }
    }

    /// Appends `text` (untrimmed) when it is not blank, then persists.
    ///
    /// # Errors
    /// - [`TaskListError::Validation`] when `text` is empty or whitespace-only;
    ///   nothing is mutated or written.
    pub fn add(&mut self, text: impl Into<String>) -> Result<(), TaskListError> {
        let request = self
            .list
            .add(text)
            .map_err(|err| rejected("task_add", self.list.len(), err))?;
        self.persist("task_add", request);
        Ok(())
    }

    /// Removes the task at `index`, then persists.
    pub fn delete(&mut self, index: usize) -> Result<(), TaskListError> {
        let request = self
            .list
            .delete(index)
            .map_err(|err| rejected("task_delete", self.list.len(), err))?;
        self.persist("task_delete", request);
        Ok(())
    }

    /// Starts an edit session on `index`. Does not write.
    pub fn begin_edit(&mut self, index: usize) -> Result<&EditSession, TaskListError> {
        let count = self.list.len();
        self.list
            .begin_edit(index)
            .map_err(|err| rejected("task_begin_edit", count, err))
    }

    /// Replaces the active draft. Returns `false` when no session is active.
    pub fn update_draft(&mut self, text: impl Into<String>) -> bool {
        self.list.update_draft(text)
    }

    /// Writes the draft verbatim to the edited row, ends the session, persists.
    pub fn commit_edit(&mut self) -> Result<(), TaskListError> {
        let request = self
            .list
            .commit_edit()
            .map_err(|err| rejected("task_commit_edit", self.list.len(), err))?;
        self.persist("task_commit_edit", request);
        Ok(())
    }

    /// Empties the list and persists the empty snapshot.
    pub fn clear_all(&mut self) {
        let request = self.list.clear_all();
        self.persist("task_clear_all", request);
    }

    pub fn tasks(&self) -> &[Task] {
        self.list.tasks()
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Whether a "clear all" action should be offered.
    pub fn can_clear(&self) -> bool {
        !self.list.is_empty()
    }

    pub fn edit_session(&self) -> Option<&EditSession> {
        self.list.edit_session()
    }

    pub fn repo(&self) -> &R {
        &self.repo
    }

    fn persist(&self, event: &'static str, request: PersistRequest) {
        let started_at = Instant::now();
        let count = request.tasks().len();
        match self.repo.save_tasks(request.tasks()) {
            Ok(()) => info!(
                "event={event} module=service status=ok count={count} duration_ms={}",
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event={event} module=service status=error count={count} error_code={} error={err}",
                err.code()
            ),
        }
    }
}

fn rejected(event: &'static str, count: usize, err: TaskListError) -> TaskListError {
    warn!(
        "event={event} module=service status=rejected count={count} error_code={}",
        err.code()
    );
    err
}
