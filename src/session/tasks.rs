//! Task flow - adding, listing, completing and deleting tasks

use std::io::{BufRead, Write};

use colored::Colorize;

use super::console::Console;
use super::SessionError;
use crate::core::task::{Priority, Task, TaskRegistry};
use crate::core::InputError;

/// Menu option 1
pub fn add<R: BufRead, W: Write>(
    con: &mut Console<R, W>,
    tasks: &mut TaskRegistry,
) -> Result<(), SessionError> {
    con.heading("📝 ADD NEW TASK", 40)?;

    let description = con.prompt("Task description: ")?;
    if description.trim().is_empty() {
        return con.error(InputError::EmptyDescription);
    }

    writeln!(con, "\nPriority levels:")?;
    writeln!(con, "1. 🔴 High (Urgent)")?;
    writeln!(con, "2. 🟡 Medium (Important)")?;
    writeln!(con, "3. 🟢 Low (Whenever)")?;
    let priority = Priority::from_choice(&con.prompt("\nSelect priority (1-3): ")?);

    match tasks.add(&description, priority) {
        Ok(task) => {
            let summary = format!(
                "   ID: {} | Priority: {} {}",
                task.id,
                task.priority,
                task.priority.marker()
            );
            con.success("Task added successfully!")?;
            writeln!(con, "{}", summary)?;
            Ok(())
        }
        Err(e) => con.error(e),
    }
}

/// Menu option 2
pub fn manage<R: BufRead, W: Write>(
    con: &mut Console<R, W>,
    tasks: &mut TaskRegistry,
) -> Result<(), SessionError> {
    if tasks.is_empty() {
        writeln!(con, "\n📭 No tasks found!")?;
        return Ok(());
    }

    print_listing(con, tasks, false)?;

    con.heading("✅ TASK MANAGEMENT", 40)?;
    writeln!(con, "1. Mark task as completed")?;
    writeln!(con, "2. Delete task")?;
    writeln!(con, "3. Show completed tasks")?;
    writeln!(con, "4. Back to menu")?;

    match con.prompt("\nSelect action (1-4): ")?.trim() {
        "1" => {
            let Some(id) = read_id(con, "Enter task ID to complete: ")? else {
                return Ok(());
            };
            if tasks.complete(id) {
                con.success(format!("Task {} marked as completed!", id))
            } else {
                con.error("Task not found or already completed!")
            }
        }
        "2" => {
            let Some(id) = read_id(con, "Enter task ID to delete: ")? else {
                return Ok(());
            };
            match tasks.delete(id) {
                Some(removed) => {
                    writeln!(con, "\n🗑️  Task deleted: '{}'", removed.description)?;
                    Ok(())
                }
                None => con.error("Task not found!"),
            }
        }
        "3" => print_listing(con, tasks, true),
        "4" => Ok(()),
        other => con.error(InputError::InvalidChoice {
            input: other.to_string(),
            max: 4,
        }),
    }
}

fn print_listing<R: BufRead, W: Write>(
    con: &mut Console<R, W>,
    tasks: &TaskRegistry,
    include_completed: bool,
) -> Result<(), SessionError> {
    con.heading("📋 YOUR TASKS", 50)?;

    let listing = tasks.list(include_completed);
    if !listing.pending.is_empty() {
        writeln!(con, "\n{}", "⏳ PENDING TASKS:".yellow())?;
        for task in &listing.pending {
            print_task(con, task)?;
        }
    }
    if !listing.completed.is_empty() {
        writeln!(con, "\n{}", "✅ COMPLETED TASKS:".green())?;
        for task in &listing.completed {
            print_task(con, task)?;
        }
    }

    let (pending, completed) = tasks.counts();
    writeln!(con, "\n{}", "=".repeat(50))?;
    writeln!(con, "📊 Summary: {} pending, {} completed", pending, completed)?;
    Ok(())
}

fn print_task<W: Write>(out: &mut W, task: &Task) -> std::io::Result<()> {
    let status = if task.completed { "✓" } else { "○" };
    writeln!(out, "\n{}. [{}] {}", task.id, status, task.description)?;
    writeln!(out, "   Priority: {} {}", task.priority, task.priority.marker())?;
    writeln!(out, "   Created: {}", task.created.format("%Y-%m-%d %H:%M"))?;
    if let Some(done) = task.completed_at {
        writeln!(out, "   Completed: {}", done.format("%Y-%m-%d %H:%M"))?;
    }
    Ok(())
}

/// Read a task id; a malformed id is reported and yields `None`.
fn read_id<R: BufRead, W: Write>(
    con: &mut Console<R, W>,
    label: &str,
) -> Result<Option<u32>, SessionError> {
    let raw = con.prompt(label)?;
    match parse_id(&raw) {
        Ok(id) => Ok(Some(id)),
        Err(e) => {
            con.error(e)?;
            Ok(None)
        }
    }
}

pub fn parse_id(input: &str) -> Result<u32, InputError> {
    let trimmed = input.trim();
    trimmed
        .parse::<u32>()
        .map_err(|_| InputError::InvalidNumber(trimmed.to_string()))
}
