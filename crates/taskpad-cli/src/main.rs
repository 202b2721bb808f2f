use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use taskpad_core::config;
use taskpad_core::store::{StoreError, TaskStore};
use taskpad_core::task::{render_task_line, Task};

mod interactive;
mod version;

#[derive(Parser)]
#[command(name = "taskpad", version = version::FULL, about = "Command-line task list manager")]
struct Cli {
    /// Tasks file to use instead of the configured one
    #[arg(long, global = true, value_name = "PATH")]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Add a task
    Add { description: String },
    /// View all tasks
    List,
    /// Toggle task completion
    Toggle { id: u64 },
    /// Remove a task
    Remove { id: u64 },
    /// Update a task description
    Update { id: u64, description: String },
    /// Search tasks by keyword
    Search { keyword: String },
    /// Print version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if matches!(cli.command, Some(Command::Version)) {
        println!("taskpad {}", version::FULL);
        return Ok(());
    }

    let tasks_file = match cli.file {
        Some(path) => path,
        None => {
            let cwd = std::env::current_dir().context("Failed to resolve working directory")?;
            config::resolve_tasks_file(&cwd)
        }
    };
    let mut store = TaskStore::open(&tasks_file)
        .with_context(|| format!("Cannot load tasks from {}", tasks_file.display()))?;

    match cli.command {
        Some(Command::Add { description }) => {
            store.add(&description)?;
            println!("Task added successfully!");
        }
        Some(Command::List) => print_tasks(store.tasks()),
        Some(Command::Toggle { id }) => match store.toggle(id) {
            Ok(task) => println!("Task {} status updated to: {}", task.id, task.status_label()),
            Err(err) => report(err)?,
        },
        Some(Command::Remove { id }) => match store.remove(id) {
            Ok(task) => println!("Task {} removed.", task.id),
            Err(err) => report(err)?,
        },
        Some(Command::Update { id, description }) => match store.update(id, &description) {
            Ok(task) => println!("Task {} description updated.", task.id),
            Err(err) => report(err)?,
        },
        Some(Command::Search { keyword }) => {
            let hits = store.search(&keyword);
            if hits.is_empty() {
                println!("No tasks found with keyword: {}", keyword);
            } else {
                for task in hits {
                    println!("{}", render_task_line(task));
                }
            }
        }
        Some(Command::Version) => unreachable!("handled above"),
        None => interactive::run(&mut store)?,
    }
    Ok(())
}

fn print_tasks(tasks: &[Task]) {
    if tasks.is_empty() {
        println!("No tasks available.");
    } else {
        for task in tasks {
            println!("{}", render_task_line(task));
        }
    }
}

/// A missing id is informational, not a process failure; a failed write in
/// one-shot mode is fatal since nothing outlives the process.
fn report(err: StoreError) -> Result<()> {
    match err {
        StoreError::NotFound(id) => {
            println!("Task with ID {} not found.", id);
            Ok(())
        }
        StoreError::Persist(err) => Err(err.into()),
    }
}
