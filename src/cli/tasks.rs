//! `tasks list|create|edit|delete|stats` commands
//!
//! Thin rendering layer over [`TaskListController`]: parse flags, drive the
//! controller, print its state. Fetch failures are logged by the controller;
//! mutation failures are logged here and exit non-zero.

use clap::Subcommand;
use log::warn;

use crate::api::types::{TaskCreate, TaskFilters, TaskStatus, TaskUpdate};
use crate::error::Result;
use crate::tasks::TaskListController;

use super::{api_client, confirm, require_session};

#[derive(Subcommand)]
pub enum TaskAction {
    /// List tasks, optionally filtered
    List {
        /// Substring match on title/description
        #[arg(short, long)]
        search: Option<String>,
        /// pending | in_progress | completed
        #[arg(long)]
        status: Option<String>,
        /// low | medium | high
        #[arg(long)]
        priority: Option<String>,
    },
    /// Create a task
    Create {
        title: String,
        #[arg(short, long)]
        description: Option<String>,
        /// pending | in_progress | completed
        #[arg(long, default_value = "pending")]
        status: String,
        /// low | medium | high
        #[arg(long, default_value = "medium")]
        priority: String,
    },
    /// Edit a task
    Edit {
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        priority: Option<String>,
    },
    /// Delete a task (asks for confirmation)
    Delete {
        id: i64,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Show task counts by status
    Stats,
}

pub fn execute(action: TaskAction) -> Result<()> {
    let api = api_client();
    let session = require_session(&api);
    let mut controller = TaskListController::new(&api, &session);

    match action {
        TaskAction::List {
            search,
            status,
            priority,
        } => {
            let filters = TaskFilters {
                search: search.unwrap_or_default(),
                status: status.as_deref().map(str::parse).transpose()?,
                priority: priority.as_deref().map(str::parse).transpose()?,
            };
            controller.set_filters(filters);
            print_list(&controller);
        }
        TaskAction::Create {
            title,
            description,
            status,
            priority,
        } => {
            let payload = TaskCreate {
                title,
                description,
                status: status.parse()?,
                priority: priority.parse()?,
            };
            match controller.create(&payload) {
                Ok(task) => println!("Created task #{}: {}", task.id, task.title),
                Err(e) => {
                    warn!("failed to create task: {}", e);
                    std::process::exit(1);
                }
            }
        }
        TaskAction::Edit {
            id,
            title,
            description,
            status,
            priority,
        } => {
            let payload = TaskUpdate {
                title,
                description,
                status: status.as_deref().map(str::parse).transpose()?,
                priority: priority.as_deref().map(str::parse).transpose()?,
            };
            if payload.is_empty() {
                println!("Nothing to update.");
                return Ok(());
            }
            match controller.update(id, &payload) {
                Ok(task) => println!("Updated task #{}: {}", task.id, task.title),
                Err(e) => {
                    warn!("failed to update task #{}: {}", id, e);
                    std::process::exit(1);
                }
            }
        }
        TaskAction::Delete { id, yes } => {
            if !yes && !confirm("Are you sure you want to delete this task?")? {
                println!("Aborted.");
                return Ok(());
            }
            match controller.delete(id) {
                Ok(()) => println!("Deleted task #{}.", id),
                Err(e) => {
                    warn!("failed to delete task #{}: {}", id, e);
                    std::process::exit(1);
                }
            }
        }
        TaskAction::Stats => {
            controller.refresh();
            if let Some(name) = controller.greeting_name() {
                println!("Tasks for {}:", name);
            }
            println!("  Pending:     {}", controller.count_by_status(TaskStatus::Pending));
            println!(
                "  In Progress: {}",
                controller.count_by_status(TaskStatus::InProgress)
            );
            println!(
                "  Completed:   {}",
                controller.count_by_status(TaskStatus::Completed)
            );
            println!("  Total:       {}", controller.tasks().len());
        }
    }

    Ok(())
}

/// Render the task collection; an empty result is a valid terminal state.
fn print_list<A: crate::api::TaskApi>(controller: &TaskListController<'_, A>) {
    if controller.tasks().is_empty() {
        println!("No tasks found");
        return;
    }

    for task in controller.tasks() {
        println!(
            "#{:<4} [{:<11}] ({:<6}) {}",
            task.id,
            task.status.label(),
            task.priority.as_str(),
            task.title
        );
        if let Some(description) = task.description.as_deref().filter(|d| !d.is_empty()) {
            println!("      {}", description);
        }
    }
    println!(
        "{} task(s){}",
        controller.tasks().len(),
        if controller.filters().is_empty() {
            String::new()
        } else {
            " (filtered)".to_string()
        }
    );
}
