//! Task command implementations.

use chrono::Utc;
use colored::Colorize;
use serde::Serialize;

use crate::app::App;
use crate::cli::{TaskAddArgs, TaskCommands, TaskListArgs, TaskUpdateArgs};
use crate::error::{Error, Result};
use crate::model::{ContactId, NewTask, Priority, Task, TaskId, TaskPatch, TaskStatus};
use crate::nav::Route;
use crate::query::tasks::{overdue, upcoming};
use crate::query::{TaskFilter, TaskStats};
use crate::store::parse_numeric_id;
use crate::validate;

use super::contact::clean_tags;

#[derive(Serialize)]
struct TaskListOutput<'a> {
    tasks: Vec<&'a Task>,
    count: usize,
    stats: TaskStats,
}

/// Execute task commands.
///
/// # Errors
///
/// Returns an error if the route is gated, input is invalid, or the task
/// does not exist.
pub fn execute(app: &mut App, command: &TaskCommands, json: bool) -> Result<()> {
    match command {
        TaskCommands::List(args) => list(app, args, json),
        TaskCommands::Show { id } => show(app, id, json),
        TaskCommands::Add(args) => add(app, args, json),
        TaskCommands::Update(args) => update(app, args, json),
        TaskCommands::Complete { id } => complete(app, id, json),
        TaskCommands::Delete { id } => delete(app, id, json),
    }
}

fn list(app: &App, args: &TaskListArgs, json: bool) -> Result<()> {
    app.require(Route::Tasks)?;
    let now = Utc::now();

    let filter = TaskFilter {
        status: args.status.as_deref().map(validate::task_status).transpose()?,
        priority: args.priority.as_deref().map(validate::priority).transpose()?,
        task_type: args.task_type.as_deref().map(validate::task_type).transpose()?,
        assignee: args.assignee.clone(),
        contact_id: args.contact,
        search: args.search.clone(),
    };

    let all = app.tasks.list();
    let window: Vec<&Task> = if args.overdue {
        overdue(&all, now)
    } else if let Some(days) = args.upcoming {
        upcoming(&all, now, days)
    } else {
        all.iter().collect()
    };
    let tasks: Vec<&Task> = window.into_iter().filter(|t| filter.matches(t)).collect();

    if json {
        return super::print_json(&TaskListOutput {
            count: tasks.len(),
            stats: app.tasks.stats(now),
            tasks,
        });
    }

    if tasks.is_empty() {
        println!("No tasks found.");
        return Ok(());
    }

    println!("Tasks ({} found):", tasks.len());
    println!();
    for t in &tasks {
        let icon = match t.status {
            TaskStatus::Pending => "○",
            TaskStatus::InProgress => "●",
            TaskStatus::Completed => "✓",
            TaskStatus::Cancelled => "⊘",
        };
        let priority = match t.priority {
            Priority::Urgent => "!!".red(),
            Priority::High => "! ".yellow(),
            Priority::Medium => "  ".normal(),
            Priority::Low => "- ".dimmed(),
        };
        let due = t.due_date.format("%Y-%m-%d %H:%M").to_string();
        let due = if t.is_overdue(now) { due.red() } else { due.normal() };
        println!("{icon} [{}] {priority} {} ({}, due {due})", t.id, t.title, t.task_type.as_str());
        if !t.description.is_empty() {
            println!("        {}", super::truncate(&t.description, 60));
        }
    }
    Ok(())
}

fn show(app: &App, id: &str, json: bool) -> Result<()> {
    app.require(Route::Task(id.to_string()))?;

    let task = app
        .tasks
        .find(id)
        .ok_or_else(|| Error::TaskNotFound { id: id.to_string() })?;

    if json {
        return super::print_json(&task);
    }

    println!("{} {}", task.title.bold(), format!("[{}]", task.id).dimmed());
    if !task.description.is_empty() {
        println!("  {}", task.description);
    }
    println!("  Type:        {}", task.task_type.as_str());
    println!("  Status:      {}", task.status.as_str());
    println!("  Priority:    {}", task.priority.as_str());
    println!("  Assigned to: {}", task.assigned_to);
    if let Some(contact_id) = task.related_contact_id {
        println!("  Contact:     {} [{contact_id}]", task.related_contact);
    }
    println!("  Due:         {}", task.due_date.format("%Y-%m-%d %H:%M"));
    if let Some(done) = task.completed_date {
        println!("  Completed:   {}", done.format("%Y-%m-%d %H:%M"));
    }
    println!("  Created:     {}", task.created_at.format("%Y-%m-%d %H:%M"));
    if !task.tags.is_empty() {
        println!("  Tags:        {}", task.tags.join(", "));
    }
    if !task.notes.is_empty() {
        println!("  Notes:       {}", task.notes);
    }
    Ok(())
}

fn add(app: &mut App, args: &TaskAddArgs, json: bool) -> Result<()> {
    app.require(Route::AddTask)?;

    let mut new = NewTask::new(
        &args.title,
        &args.assigned_to,
        super::parse_datetime("due date", &args.due)?,
    )
    .with_type(validate::task_type(&args.task_type)?)
    .with_status(validate::task_status(&args.status)?)
    .with_priority(validate::priority(&args.priority)?)
    .with_description(&args.description)
    .with_tags(clean_tags(&args.tags));
    if let Some(contact_id) = args.contact {
        new = new.with_contact(contact_id, &contact_name(app, contact_id)?);
    }
    new.notes.clone_from(&args.notes);
    validate::new_task(&new)?;

    app.simulate_latency();
    let task = app.tasks.add(new);
    print_mutation("Added", &task, json)
}

fn update(app: &mut App, args: &TaskUpdateArgs, json: bool) -> Result<()> {
    app.require(Route::Task(args.id.clone()))?;
    let id = task_id(&args.id)?;

    let related_contact = if args.unlink_contact {
        Some(None)
    } else if let Some(contact_id) = args.contact {
        Some(Some((contact_id, contact_name(app, contact_id)?)))
    } else {
        None
    };

    if let Some(title) = &args.title {
        validate::required("Task title", title)?;
    }
    if let Some(assignee) = &args.assigned_to {
        validate::required("Assigned to", assignee)?;
    }

    let patch = TaskPatch {
        title: args.title.clone(),
        description: args.description.clone(),
        task_type: args.task_type.as_deref().map(validate::task_type).transpose()?,
        status: args.status.as_deref().map(validate::task_status).transpose()?,
        priority: args.priority.as_deref().map(validate::priority).transpose()?,
        assigned_to: args.assigned_to.clone(),
        related_contact,
        due_date: args
            .due
            .as_deref()
            .map(|d| super::parse_datetime("due date", d))
            .transpose()?,
        completed_date: None,
        notes: args.notes.clone(),
        tags: args.tags.as_deref().map(clean_tags),
    };

    app.simulate_latency();
    let task = app.tasks.update(id, patch)?;
    print_mutation("Updated", &task, json)
}

fn complete(app: &mut App, id: &str, json: bool) -> Result<()> {
    app.require(Route::Task(id.to_string()))?;
    let key = task_id(id)?;
    let task = app.tasks.complete(key)?;
    print_mutation("Completed", &task, json)
}

fn delete(app: &mut App, id: &str, json: bool) -> Result<()> {
    app.require(Route::Task(id.to_string()))?;
    let key = task_id(id)?;
    let removed = app
        .tasks
        .remove(key)
        .ok_or_else(|| Error::TaskNotFound { id: id.to_string() })?;
    print_mutation("Deleted", &removed, json)
}

fn print_mutation(verb: &str, task: &Task, json: bool) -> Result<()> {
    if crate::is_silent() {
        println!("{}", task.id);
        return Ok(());
    }
    if json {
        return super::print_json(task);
    }
    println!("{verb} task {}: {}", task.id, task.title.bold());
    Ok(())
}

fn task_id(raw: &str) -> Result<TaskId> {
    parse_numeric_id(raw).ok_or_else(|| Error::TaskNotFound { id: raw.to_string() })
}

/// Display name stored alongside a contact link.
fn contact_name(app: &App, id: ContactId) -> Result<String> {
    app.contacts
        .get_by_id(id)
        .map(|c| c.full_name())
        .ok_or_else(|| Error::ContactNotFound { id: id.to_string() })
}
