//! Terminal front-end for the to-do list.
//!
//! # Responsibility
//! - Resolve config from env and flags, start file logging, open the store.
//! - Map each subcommand onto exactly one task store operation.

mod args;
mod shell;

use anyhow::{bail, Context};
use args::{Args, Command};
use clap::Parser;
use log::info;
use std::io;
use std::process::ExitCode;
use todo_core::{
    core_version, init_logging_with_config, open_sqlite_store, CoreConfig, SqliteTaskStore,
    TaskListError,
};

fn main() -> ExitCode {
    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let config = args.apply_overrides(CoreConfig::from_env());
    let command = args.command.unwrap_or(Command::List);

    if command == Command::Version {
        println!("todo_core version={}", core_version());
        return Ok(());
    }

    if let Err(err) = init_logging_with_config(&config) {
        eprintln!("logging disabled: {err}");
    }

    let mut store = open_sqlite_store(&config.db_path)
        .with_context(|| format!("failed to open task database `{}`", config.db_path.display()))?;
    info!(
        "event=cli_start module=cli status=ok version={} count={}",
        core_version(),
        store.len()
    );

    match command {
        Command::List => print_tasks(&store)?,
        Command::Add { text } => {
            report(store.add(text))?;
            print_tasks(&store)?;
        }
        Command::Delete { index } => {
            report(store.delete(index))?;
            print_tasks(&store)?;
        }
        Command::Edit { index, text } => {
            report(store.begin_edit(index).map(|_| ()))?;
            store.update_draft(text);
            report(store.commit_edit())?;
            print_tasks(&store)?;
        }
        Command::Clear => {
            store.clear_all();
            print_tasks(&store)?;
        }
        Command::Shell => {
            let stdin = io::stdin();
            shell::run_shell(&mut store, stdin.lock(), io::stdout().lock())?;
        }
        Command::Version => {}
    }
    Ok(())
}

fn report(result: Result<(), TaskListError>) -> anyhow::Result<()> {
    match result {
        Ok(()) => Ok(()),
        Err(err @ TaskListError::Validation(_)) => bail!("Warning: {err}"),
        Err(err) => Err(err.into()),
    }
}

fn print_tasks(store: &SqliteTaskStore) -> io::Result<()> {
    shell::render_tasks(store, &mut io::stdout().lock())
}
