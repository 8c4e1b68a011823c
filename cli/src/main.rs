use anyhow::Result;
use chrono::NaiveDateTime;
use clap::{CommandFactory, Parser};
use tabled::settings::object::Rows;
use tabled::settings::{Color, Modify, Style};
use tabled::{Table, Tabled};
use taskbook_core::time::TIME_FMT;
use taskbook_core::{FileTaskRepository, SortOrder, StoreError, Task, TaskService};

#[derive(Parser)]
#[command(name = "taskbook")]
#[command(about = "A flat-file task tracker", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// List all tasks
    List,
    /// Add a new task
    Add {
        /// Task description (multiple words are joined)
        #[arg(trailing_var_arg = true, required = true)]
        description: Vec<String>,
    },
    /// Mark a task as done
    Done {
        /// ID of the task to mark done
        id: u64,
    },
    /// Remove a task
    Remove {
        /// ID of the task to remove
        id: u64,
    },
    /// Replace a task's description
    Edit {
        /// ID of the task to edit
        id: u64,
        /// New description
        #[arg(trailing_var_arg = true, required = true)]
        description: Vec<String>,
    },
}

// Helper struct for Table Row
#[derive(Tabled)]
struct TaskRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Done")]
    done: String,
    #[tabled(rename = "Description")]
    desc: String,
    #[tabled(rename = "Created")]
    created: String,
    #[tabled(rename = "Completed")]
    completed: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let repo = FileTaskRepository::new(None)?;
    let mut service = TaskService::load(repo)?;

    match cli.command {
        Some(Commands::List) => {
            let tasks = service.list(SortOrder::CreatedAt);
            if tasks.is_empty() {
                println!("No tasks yet.");
            } else {
                print_table(&tasks);
            }
        }
        Some(Commands::Add { description }) => {
            let desc = description.join(" ");
            let desc = desc.trim();
            if desc.is_empty() {
                println!("Error: task description is required.");
                return Ok(());
            }
            let task = service.add(desc)?;
            println!("Added task [{}]: {}", task.id, task.desc);
        }
        Some(Commands::Done { id }) => match service.get(id).map(|t| t.done) {
            Ok(true) => println!("Task [{}] is already completed.", id),
            Ok(false) => {
                let task = service.toggle_done(id)?;
                println!("Marked task [{}] as done.", task.id);
            }
            Err(StoreError::NotFound(_)) => println!("No task found with id {}.", id),
            Err(e) => return Err(e.into()),
        },
        Some(Commands::Remove { id }) => match service.remove(id) {
            Ok(task) => println!("Removed task [{}]: {}", task.id, task.desc),
            Err(StoreError::NotFound(_)) => println!("No task found with id {}.", id),
            Err(e) => return Err(e.into()),
        },
        Some(Commands::Edit { id, description }) => {
            let desc = description.join(" ");
            let desc = desc.trim();
            if desc.is_empty() {
                println!("Error: task description is required.");
                return Ok(());
            }
            match service.edit(id, desc) {
                Ok(task) => println!("Updated task [{}]: {}", task.id, task.desc),
                Err(StoreError::NotFound(_)) => println!("No task found with id {}.", id),
                Err(e) => return Err(e.into()),
            }
        }
        None => {
            Cli::command().print_help()?;
        }
    }
    Ok(())
}

fn print_table(tasks: &[Task]) {
    let rows: Vec<TaskRow> = tasks
        .iter()
        .map(|t| TaskRow {
            id: t.id,
            done: if t.done { "✓".to_string() } else { String::new() },
            desc: t.desc.clone(),
            created: t.created_at.format(TIME_FMT).to_string(),
            completed: stamp_col(t.completed_at),
        })
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::modern())
        .with(Modify::new(Rows::first()).with(Color::FG_CYAN));
    println!("{}", table);
}

fn stamp_col(stamp: Option<NaiveDateTime>) -> String {
    stamp
        .map(|t| t.format(TIME_FMT).to_string())
        .unwrap_or_else(|| "-".to_string())
}
