//! Interactive line-driven front-end.
//!
//! # Responsibility
//! - Parse one command per input line and apply it to the task store.
//! - Render the list and user notices after each command.
//!
//! # Invariants
//! - Lines are processed strictly in order; each runs to completion first.
//! - Text arguments are taken verbatim after the single whitespace character
//!   that ends the keyword.

use std::io::{self, BufRead, Write};
use todo_core::{TaskListError, TaskSnapshotRepository, TaskStore};

pub const HELP: &str = "\
commands:
  list            show tasks
  add <text>      append a task
  del <index>     delete a task
  edit <index>    start editing a task (draft starts as its text)
  draft <text>    replace the draft of the task being edited
  save            write the draft back to the task
  clear           remove every task
  help            show this help
  quit            leave the shell";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    List,
    Add(String),
    Delete(usize),
    Edit(usize),
    Draft(String),
    Save,
    Clear,
    Help,
    Quit,
    Empty,
}

/// Parses one input line. The trailing newline must already be stripped.
pub fn parse_line(line: &str) -> Result<ShellCommand, String> {
    let (keyword, rest) = match line.trim_start().split_once(char::is_whitespace) {
        Some((keyword, rest)) => (keyword, Some(rest)),
        None => (line.trim(), None),
    };

    let command = match keyword {
        "" => ShellCommand::Empty,
        "list" | "ls" => ShellCommand::List,
        "add" => ShellCommand::Add(rest.unwrap_or_default().to_string()),
        "del" | "delete" => ShellCommand::Delete(parse_index(rest)?),
        "edit" => ShellCommand::Edit(parse_index(rest)?),
        "draft" => ShellCommand::Draft(rest.unwrap_or_default().to_string()),
        "save" => ShellCommand::Save,
        "clear" => ShellCommand::Clear,
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" => ShellCommand::Quit,
        other => return Err(format!("unknown command `{other}`; type `help`")),
    };
    Ok(command)
}

fn parse_index(rest: Option<&str>) -> Result<usize, String> {
    let raw = rest.map(str::trim).unwrap_or_default();
    raw.parse::<usize>()
        .map_err(|_| format!("expected a task index, got `{raw}`"))
}

/// Runs the shell until `quit` or end of input.
pub fn run_shell<R, S, W>(store: &mut TaskStore<R>, input: S, mut out: W) -> io::Result<()>
where
    R: TaskSnapshotRepository,
    S: BufRead,
    W: Write,
{
    writeln!(out, "{HELP}")?;
    render_tasks(store, &mut out)?;

    for line in input.lines() {
        let line = line?;
        let command = match parse_line(&line) {
            Ok(command) => command,
            Err(message) => {
                writeln!(out, "{message}")?;
                continue;
            }
        };

        match command {
            ShellCommand::Quit => break,
            ShellCommand::Empty => continue,
            ShellCommand::Help => writeln!(out, "{HELP}")?,
            ShellCommand::List => render_tasks(store, &mut out)?,
            ShellCommand::Draft(text) => {
                if !store.update_draft(text) {
                    writeln!(out, "no task is being edited; use `edit <index>` first")?;
                }
            }
            other => {
                match apply(store, other) {
                    Ok(()) => {}
                    Err(err @ TaskListError::Validation(_)) => writeln!(out, "Warning: {err}")?,
                    Err(err) => writeln!(out, "{err}")?,
                }
                render_tasks(store, &mut out)?;
            }
        }
    }
    Ok(())
}

fn apply<R: TaskSnapshotRepository>(
    store: &mut TaskStore<R>,
    command: ShellCommand,
) -> Result<(), TaskListError> {
    match command {
        ShellCommand::Add(text) => store.add(text),
        ShellCommand::Delete(index) => store.delete(index),
        ShellCommand::Edit(index) => store.begin_edit(index).map(|_| ()),
        ShellCommand::Save => store.commit_edit(),
        ShellCommand::Clear => {
            store.clear_all();
            Ok(())
        }
        _ => Ok(()),
    }
}

/// Writes one row per task; the row in edit mode shows its draft.
pub fn render_tasks<R: TaskSnapshotRepository>(
    store: &TaskStore<R>,
    out: &mut impl Write,
) -> io::Result<()> {
    if store.is_empty() {
        return writeln!(out, "(no tasks)");
    }

    let editing = store.edit_session();
    for (index, task) in store.tasks().iter().enumerate() {
        match editing {
            Some(session) if session.index() == index => {
                writeln!(out, "{index:>3}* {} (editing)", session.draft())?
            }
            _ => writeln!(out, "{index:>3}. {task}")?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{parse_line, run_shell, ShellCommand};
    use todo_core::db::open_db_in_memory;
    use todo_core::{KvTaskSnapshotRepository, SqliteKeyValueRepository, Task, TaskStore};

    fn store() -> TaskStore<KvTaskSnapshotRepository<SqliteKeyValueRepository>> {
        TaskStore::open(KvTaskSnapshotRepository::new(SqliteKeyValueRepository::new(
            open_db_in_memory().unwrap(),
        )))
    }

    #[test]
    fn parse_keeps_text_after_first_space() {
        assert_eq!(
            parse_line("add   padded ").unwrap(),
            ShellCommand::Add("  padded ".to_string())
        );
        assert_eq!(parse_line("draft").unwrap(), ShellCommand::Draft(String::new()));
        assert_eq!(parse_line("del 2").unwrap(), ShellCommand::Delete(2));
        assert_eq!(parse_line("   ").unwrap(), ShellCommand::Empty);
    }

    #[test]
    fn parse_accepts_tab_after_keyword() {
        assert_eq!(
            parse_line("add\tBuy milk").unwrap(),
            ShellCommand::Add("Buy milk".to_string())
        );
        assert_eq!(
            parse_line("draft\t\tindented").unwrap(),
            ShellCommand::Draft("\tindented".to_string())
        );
        assert_eq!(parse_line("del\t1").unwrap(), ShellCommand::Delete(1));
    }

    #[test]
    fn parse_rejects_unknown_and_bad_index() {
        assert!(parse_line("launch").unwrap_err().contains("unknown"));
        assert!(parse_line("edit x").unwrap_err().contains("index"));
        assert!(parse_line("del").is_err());
    }

    #[test]
    fn shell_runs_full_scenario() {
        let mut store = store();
        let input = "add Buy milk\nadd Walk dog\nedit 0\ndraft Buy oat milk\nsave\ndel 1\nquit\nadd ignored\n";
        let mut out = Vec::new();

        run_shell(&mut store, input.as_bytes(), &mut out).unwrap();

        let texts: Vec<&str> = store.tasks().iter().map(Task::text).collect();
        assert_eq!(texts, vec!["Buy oat milk"]);
        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("  0* Buy milk (editing)"));
        assert!(printed.contains("  0. Buy oat milk"));
    }

    #[test]
    fn shell_reports_blank_add_warning() {
        let mut store = store();
        let mut out = Vec::new();

        run_shell(&mut store, "add    \nclear\n".as_bytes(), &mut out).unwrap();

        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("Warning: Add a task, please"));
        assert!(store.is_empty());
    }

    #[test]
    fn draft_without_edit_is_reported() {
        let mut store = store();
        let mut out = Vec::new();

        run_shell(&mut store, "draft hello\n".as_bytes(), &mut out).unwrap();

        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("no task is being edited"));
    }
}
