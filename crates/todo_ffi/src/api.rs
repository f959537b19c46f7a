//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose the task list operations to Dart via FRB as sync functions.
//! - Own the process-wide task store between calls.
//! - Turn core results into envelopes the presentation layer can render.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Persistence failures never reach the envelope; only validation and
//!   precondition failures do.
//! - Calls are serialized through one mutex, so at most one mutation is in
//!   flight at a time.

use log::warn;
use once_cell::sync::Lazy;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};
use todo_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, open_sqlite_store,
    CoreConfig, SqliteTaskStore, TaskListError,
};

static STORE: Lazy<Mutex<Option<SqliteTaskStore>>> = Lazy::new(|| Mutex::new(None));

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Read model of the task list for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskListView {
    /// Task texts in display order; row index is the task identity.
    pub tasks: Vec<String>,
    /// Row currently in edit mode, if any.
    pub editing_index: Option<u32>,
    /// Draft text of the row in edit mode (empty when not editing).
    pub draft: String,
    /// Whether the "clear all" action should be shown.
    pub can_clear: bool,
}

/// Result envelope for every task action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskActionResponse {
    /// Whether the action was applied.
    pub ok: bool,
    /// Stable code of a user-facing notice (`task_required`), if any.
    pub notice: Option<String>,
    /// Human-readable message for diagnostics or the warning dialog.
    pub message: String,
    /// List state after the action.
    pub view: TaskListView,
}

/// Opens (or re-opens) the task database and loads the stored snapshot.
///
/// `db_path` empty → `TODO_DB_PATH` env or the platform default location.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Replaces any previously opened store; an active edit session is lost.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn init_store(db_path: String) -> TaskActionResponse {
    let path = resolve_db_path(db_path.as_str());
    match open_sqlite_store(&path) {
        Ok(store) => {
            let mut slot = lock_store();
            let view = view_of(&store);
            *slot = Some(store);
            TaskActionResponse::success("Task store ready.", view)
        }
        Err(err) => TaskActionResponse::failure(
            None,
            format!("init_store failed: {err}"),
            TaskListView::default(),
        ),
    }
}

/// Returns the current list state.
#[flutter_rust_bridge::frb(sync)]
pub fn task_list() -> TaskListView {
    let mut slot = lock_store();
    match ensure_store(&mut slot) {
        Ok(store) => view_of(store),
        Err(_) => TaskListView::default(),
    }
}

/// Adds a task. Blank input yields `notice = "task_required"`.
#[flutter_rust_bridge::frb(sync)]
pub fn task_add(text: String) -> TaskActionResponse {
    with_store("task_add", |store| store.add(text).map(|()| "Task added."))
}

/// Deletes the task at `index`.
#[flutter_rust_bridge::frb(sync)]
pub fn task_delete(index: u32) -> TaskActionResponse {
    with_store("task_delete", |store| {
        store.delete(index_from_ffi(index)).map(|()| "Task deleted.")
    })
}

/// Puts the row at `index` into edit mode with its text as the draft.
#[flutter_rust_bridge::frb(sync)]
pub fn task_begin_edit(index: u32) -> TaskActionResponse {
    with_store("task_begin_edit", |store| {
        store.begin_edit(index_from_ffi(index)).map(|_| "Editing task.")
    })
}

/// Replaces the draft of the row in edit mode; ignored when nothing is edited.
#[flutter_rust_bridge::frb(sync)]
pub fn task_update_draft(text: String) -> TaskActionResponse {
    with_store("task_update_draft", |store| {
        Ok(if store.update_draft(text) {
            "Draft updated."
        } else {
            "No task is being edited."
        })
    })
}

/// Saves the draft into the edited row and leaves edit mode.
#[flutter_rust_bridge::frb(sync)]
pub fn task_commit_edit() -> TaskActionResponse {
    with_store("task_commit_edit", |store| {
        store.commit_edit().map(|()| "Task updated.")
    })
}

/// Removes every task.
#[flutter_rust_bridge::frb(sync)]
pub fn task_clear_all() -> TaskActionResponse {
    with_store("task_clear_all", |store| {
        store.clear_all();
        Ok("All tasks cleared.")
    })
}

impl TaskActionResponse {
    fn success(message: impl Into<String>, view: TaskListView) -> Self {
        Self {
            ok: true,
            notice: None,
            message: message.into(),
            view,
        }
    }

    fn failure(notice: Option<&str>, message: impl Into<String>, view: TaskListView) -> Self {
        Self {
            ok: false,
            notice: notice.map(str::to_owned),
            message: message.into(),
            view,
        }
    }
}

fn with_store(
    action: &'static str,
    f: impl FnOnce(&mut SqliteTaskStore) -> Result<&'static str, TaskListError>,
) -> TaskActionResponse {
    let mut slot = lock_store();
    let store = match ensure_store(&mut slot) {
        Ok(store) => store,
        Err(message) => {
            return TaskActionResponse::failure(None, message, TaskListView::default());
        }
    };

    match f(&mut *store) {
        Ok(message) => TaskActionResponse::success(message, view_of(store)),
        Err(err @ TaskListError::Validation(_)) => {
            TaskActionResponse::failure(Some(err.code()), err.to_string(), view_of(store))
        }
        Err(err) => TaskActionResponse::failure(
            None,
            format!("{action} failed: {err}"),
            view_of(store),
        ),
    }
}

/// Lazily opens the default store when the host skipped `init_store`.
fn ensure_store(slot: &mut Option<SqliteTaskStore>) -> Result<&mut SqliteTaskStore, String> {
    if slot.is_none() {
        let path = resolve_db_path("");
        let store = open_sqlite_store(&path).map_err(|err| {
            warn!("event=ffi_store_open module=ffi status=error error={err}");
            format!("task store unavailable: {err}")
        })?;
        *slot = Some(store);
    }
    slot.as_mut()
        .ok_or_else(|| "task store unavailable".to_string())
}

fn lock_store() -> MutexGuard<'static, Option<SqliteTaskStore>> {
    // Mutations are single Vec operations, so a poisoned lock still guards a
    // consistent list.
    STORE.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn resolve_db_path(raw: &str) -> PathBuf {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        CoreConfig::from_env().db_path
    } else {
        PathBuf::from(trimmed)
    }
}

/// Indices that do not fit `usize` can never be in range; they map to
/// `usize::MAX` so the core rejects them as out of range.
fn index_from_ffi(index: u32) -> usize {
    usize::try_from(index).unwrap_or(usize::MAX)
}

fn index_to_ffi(index: usize) -> Option<u32> {
    match u32::try_from(index) {
        Ok(index) => Some(index),
        Err(_) => {
            warn!("event=ffi_index module=ffi status=error error_code=index_overflow index={index}");
            None
        }
    }
}

fn view_of(store: &SqliteTaskStore) -> TaskListView {
    let session = store.edit_session();
    TaskListView {
        tasks: store
            .tasks()
            .iter()
            .map(|task| task.text().to_owned())
            .collect(),
        editing_index: session.and_then(|session| index_to_ffi(session.index())),
        draft: session
            .map(|session| session.draft().to_owned())
            .unwrap_or_default(),
        can_clear: store.can_clear(),
    }
}
