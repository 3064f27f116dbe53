//! Terminal front end for the task list.
//!
//! # Responsibility
//! - Translate one command line into one core intent.
//! - Paint the resulting display model to stdout.
//!
//! # Invariants
//! - A database that cannot be opened degrades to an in-memory session; only
//!   validation errors change the exit status.

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use daydream_core::db::open_db;
use daydream_core::view::format::task_row;
use daydream_core::{
    default_log_level, init_logging, CoreConfig, DisplayModel, Intent, KvBackend, SqliteKvStore,
    TodoSession,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "daydream", about = "Local task list", version)]
struct Cli {
    /// SQLite file holding tasks and the active filter.
    #[arg(long, env = "DAYDREAM_DB", default_value = "daydream.sqlite3")]
    db: PathBuf,
    /// Directory for rolling log files; logging is off when unset.
    #[arg(long, env = "DAYDREAM_LOG_DIR")]
    log_dir: Option<PathBuf>,
    #[arg(long, env = "DAYDREAM_LOG_LEVEL")]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Add a task
    Add {
        #[arg(required = true, value_name = "TITLE")]
        title: Vec<String>,
        /// Due date as YYYY-MM-DD
        #[arg(long)]
        due: Option<String>,
    },
    /// Flip completion of a task (id or unique id prefix)
    Toggle { id: String },
    /// Delete a task (id or unique id prefix)
    Delete { id: String },
    /// Remove every completed task
    ClearCompleted,
    /// Select the view: all, active or completed
    Filter { value: String },
    /// Show the current view
    List,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        if let Err(err) = init_logging(level, absolute(log_dir)) {
            eprintln!("daydream: {err}");
            return ExitCode::from(1);
        }
    }

    let conn = match open_db(&cli.db) {
        Ok(conn) => Some(conn),
        Err(err) => {
            log::warn!("event=cli_open module=cli status=error error={err}");
            eprintln!(
                "daydream: cannot open `{}` ({err}); changes will not be saved",
                cli.db.display()
            );
            None
        }
    };
    let backend = conn.as_ref().map(SqliteKvStore::new);
    let mut session = TodoSession::open(backend, &CoreConfig::default());

    let intent = match cli.command.unwrap_or(Command::List) {
        Command::Add { title, due } => Intent::Create {
            title: title.join(" "),
            due_date: due,
        },
        Command::Toggle { id } => Intent::Toggle(resolve_id(&session, &id)),
        Command::Delete { id } => Intent::Delete(resolve_id(&session, &id)),
        Command::ClearCompleted => Intent::ClearCompleted,
        Command::Filter { value } => Intent::SetFilter(value),
        Command::List => {
            paint(&session.display_model(), Local::now().date_naive());
            return ExitCode::SUCCESS;
        }
    };

    match session.dispatch(intent) {
        Ok(model) => {
            paint(&model, Local::now().date_naive());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("daydream: {err}");
            ExitCode::from(2)
        }
    }
}

fn absolute(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .unwrap_or_else(|_| path.to_path_buf())
}

/// Expands a unique id prefix to the full id; anything else passes through.
fn resolve_id<B: KvBackend>(session: &TodoSession<B>, raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }
    let mut matches = session
        .tasks()
        .tasks()
        .iter()
        .filter(|task| task.id.starts_with(raw));
    match (matches.next(), matches.next()) {
        (Some(task), None) => task.id.clone(),
        _ => raw.to_string(),
    }
}

fn paint(model: &DisplayModel, today: NaiveDate) {
    println!("{}", model.counter_label());
    if model.empty_state_visible {
        println!("  {}", model.empty_state_message());
    }
    for task in &model.visible_tasks {
        let row = task_row(task, today);
        let mark = if row.completed { "x" } else { " " };
        let short_id: String = row.id.chars().take(8).collect();
        let mut line = format!("  [{mark}] {short_id}  {}", row.title);
        if let Some(due) = &row.due {
            line.push_str(&format!("  ({})", due.badge()));
        }
        line.push_str(&format!("  {}", row.created));
        println!("{line}");
    }
    println!("clear-completed: {}", model.clear_button_hint());
}
