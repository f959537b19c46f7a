//! Owned task list state and its mutation rules.
//!
//! # Responsibility
//! - Hold the canonical ordered task list and the optional edit session.
//! - Apply add/delete/edit/clear rules without touching storage.
//! - Hand every successful mutation back as a [`PersistRequest`].
//!
//! # Invariants
//! - Order is insertion order, except where an edit commit overwrites a row.
//! - Rejected operations leave both the list and the edit session untouched.
//! - An active edit session always points at an existing row.

use crate::model::task::{Task, TaskValidationError};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Precondition failures for task list operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskListError {
    /// New task text was blank.
    Validation(TaskValidationError),
    /// Index does not reference an existing row.
    IndexOutOfRange { index: usize, len: usize },
    /// `commit_edit` was called without an active edit session.
    NoActiveEdit,
}

impl TaskListError {
    /// Stable machine-readable code for envelopes and logs.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(err) => err.code(),
            Self::IndexOutOfRange { .. } => "index_out_of_range",
            Self::NoActiveEdit => "no_active_edit",
        }
    }
}

impl Display for TaskListError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::IndexOutOfRange { index, len } => {
                write!(f, "task index {index} is out of range (list has {len} tasks)")
            }
            Self::NoActiveEdit => f.write_str("no task is being edited"),
        }
    }
}

impl Error for TaskListError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TaskValidationError> for TaskListError {
    fn from(value: TaskValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Transient edit state: which row is being edited and its draft text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    index: usize,
    draft: String,
}

impl EditSession {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }
}

/// Snapshot that must be written after a successful mutation.
///
/// Holds a copy of the complete post-mutation list; storage never sees the
/// live state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistRequest {
    tasks: Vec<Task>,
}

impl PersistRequest {
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn into_tasks(self) -> Vec<Task> {
        self.tasks
    }
}

/// In-memory task list plus at most one edit session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskList {
    tasks: Vec<Task>,
    edit: Option<EditSession>,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a list seeded with already-persisted tasks.
    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        Self { tasks, edit: None }
    }

    /// Replaces the whole list, e.g. with a freshly loaded snapshot.
    ///
    /// Any edit session is dropped because its index no longer has meaning.
    pub fn replace_tasks(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
        self.edit = None;
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn edit_session(&self) -> Option<&EditSession> {
        self.edit.as_ref()
    }

    /// Appends a task if its trimmed text is non-empty.
    ///
    /// The stored text is the untrimmed input.
    pub fn add(&mut self, text: impl Into<String>) -> Result<PersistRequest, TaskListError> {
        let task = Task::new(text)?;
        self.tasks.push(task);
        Ok(self.snapshot())
    }

    /// Removes exactly the row at `index`, shifting later rows left.
    ///
    /// A session editing the removed row is dropped; a session editing a
    /// later row follows its task to the new position.
    pub fn delete(&mut self, index: usize) -> Result<PersistRequest, TaskListError> {
        self.check_index(index)?;
        self.tasks.remove(index);

        self.edit = match self.edit.take() {
            Some(session) if session.index == index => None,
            Some(mut session) if session.index > index => {
                session.index -= 1;
                Some(session)
            }
            other => other,
        };

        Ok(self.snapshot())
    }

    /// Starts editing `index`, seeding the draft with its current text.
    ///
    /// A previous session is abandoned without being committed.
    pub fn begin_edit(&mut self, index: usize) -> Result<&EditSession, TaskListError> {
        let draft = self.checked_task(index)?.text().to_string();
        Ok(&*self.edit.insert(EditSession { index, draft }))
    }

    /// Replaces the draft text of the active session.
    ///
    /// Returns `false` (and does nothing) when no session is active.
    pub fn update_draft(&mut self, text: impl Into<String>) -> bool {
        match self.edit.as_mut() {
            Some(session) => {
                session.draft = text.into();
                true
            }
            None => false,
        }
    }

    /// Writes the draft verbatim to the session row and ends the session.
    ///
    /// No trim or emptiness check is applied to the draft.
    pub fn commit_edit(&mut self) -> Result<PersistRequest, TaskListError> {
        let session = self.edit.as_ref().ok_or(TaskListError::NoActiveEdit)?;
        self.check_index(session.index)?;

        if let Some(session) = self.edit.take() {
            self.tasks[session.index] = Task::from_raw(session.draft);
        }
        Ok(self.snapshot())
    }

    /// Empties the list unconditionally and drops any edit session.
    pub fn clear_all(&mut self) -> PersistRequest {
        self.tasks.clear();
        self.edit = None;
        self.snapshot()
    }

    fn snapshot(&self) -> PersistRequest {
        PersistRequest {
            tasks: self.tasks.clone(),
        }
    }

    fn checked_task(&self, index: usize) -> Result<&Task, TaskListError> {
        self.tasks.get(index).ok_or(TaskListError::IndexOutOfRange {
            index,
            len: self.tasks.len(),
        })
    }

    fn check_index(&self, index: usize) -> Result<(), TaskListError> {
        self.checked_task(index).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::{TaskList, TaskListError};
    use crate::model::task::{Task, TaskValidationError};

    fn texts(list: &TaskList) -> Vec<&str> {
        list.tasks().iter().map(Task::text).collect()
    }

    fn list_of(items: &[&str]) -> TaskList {
        TaskList::from_tasks(items.iter().map(|text| Task::from_raw(*text)).collect())
    }

    #[test]
    fn add_appends_untrimmed_text_and_returns_full_snapshot() {
        let mut list = list_of(&["first"]);
        let request = list.add("  second  ").unwrap();

        assert_eq!(texts(&list), vec!["first", "  second  "]);
        assert_eq!(request.tasks(), list.tasks());
    }

    #[test]
    fn add_rejects_blank_text_without_mutation() {
        let mut list = list_of(&["keep"]);

        for input in ["", "   "] {
            let err = list.add(input).unwrap_err();
            assert_eq!(err, TaskListError::Validation(TaskValidationError::EmptyText));
        }
        assert_eq!(texts(&list), vec!["keep"]);
    }

    #[test]
    fn delete_removes_only_target_and_keeps_order() {
        let mut list = list_of(&["a", "b", "c", "d"]);
        let request = list.delete(1).unwrap();

        assert_eq!(texts(&list), vec!["a", "c", "d"]);
        assert_eq!(request.into_tasks().len(), 3);
    }

    #[test]
    fn delete_out_of_range_is_rejected() {
        let mut list = list_of(&["a"]);
        let err = list.delete(1).unwrap_err();
        assert_eq!(err, TaskListError::IndexOutOfRange { index: 1, len: 1 });
        assert_eq!(texts(&list), vec!["a"]);
    }

    #[test]
    fn edit_session_lifecycle_overwrites_target_row() {
        let mut list = list_of(&["a", "b", "c"]);

        let session = list.begin_edit(1).unwrap();
        assert_eq!(session.index(), 1);
        assert_eq!(session.draft(), "b");

        assert!(list.update_draft("bee"));
        list.commit_edit().unwrap();

        assert_eq!(texts(&list), vec!["a", "bee", "c"]);
        assert!(list.edit_session().is_none());
    }

    #[test]
    fn commit_writes_blank_draft_verbatim() {
        let mut list = list_of(&["a"]);
        list.begin_edit(0).unwrap();
        list.update_draft("  ");
        list.commit_edit().unwrap();
        assert_eq!(texts(&list), vec!["  "]);
    }

    #[test]
    fn begin_edit_abandons_previous_session() {
        let mut list = list_of(&["a", "b"]);
        list.begin_edit(0).unwrap();
        list.update_draft("never saved");
        list.begin_edit(1).unwrap();

        let session = list.edit_session().unwrap();
        assert_eq!(session.index(), 1);
        assert_eq!(session.draft(), "b");
        assert_eq!(texts(&list), vec!["a", "b"]);
    }

    #[test]
    fn begin_edit_out_of_range_keeps_existing_session() {
        let mut list = list_of(&["a"]);
        list.begin_edit(0).unwrap();
        assert!(list.begin_edit(3).is_err());
        assert_eq!(list.edit_session().map(|s| s.index()), Some(0));
    }

    #[test]
    fn update_draft_without_session_is_noop() {
        let mut list = list_of(&["a"]);
        assert!(!list.update_draft("x"));
        assert!(list.edit_session().is_none());
        assert_eq!(texts(&list), vec!["a"]);
    }

    #[test]
    fn commit_without_session_is_rejected() {
        let mut list = list_of(&["a"]);
        assert_eq!(list.commit_edit().unwrap_err(), TaskListError::NoActiveEdit);
    }

    #[test]
    fn delete_before_edited_row_shifts_session() {
        let mut list = list_of(&["a", "b", "c"]);
        list.begin_edit(2).unwrap();
        list.update_draft("see");
        list.delete(0).unwrap();

        assert_eq!(list.edit_session().map(|s| s.index()), Some(1));
        list.commit_edit().unwrap();
        assert_eq!(texts(&list), vec!["b", "see"]);
    }

    #[test]
    fn delete_of_edited_row_drops_session() {
        let mut list = list_of(&["a", "b"]);
        list.begin_edit(1).unwrap();
        list.delete(1).unwrap();
        assert!(list.edit_session().is_none());
    }

    #[test]
    fn clear_all_empties_list_and_session() {
        let mut list = list_of(&["a", "b"]);
        list.begin_edit(0).unwrap();
        let request = list.clear_all();

        assert!(list.is_empty());
        assert!(list.edit_session().is_none());
        assert!(request.tasks().is_empty());
    }
}
