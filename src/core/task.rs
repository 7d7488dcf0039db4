//! Task - prioritised to-do items and their registry
//!
//! # Key Properties
//! - **id**: dense `1..N`, always equal to the task's list position + 1
//! - **priority**: High / Medium / Low, Medium when unspecified
//! - **completed**: one-way flag; completing twice is rejected

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::time;
use super::InputError;

/// Task priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Priority {
    #[serde(alias = "High 🔴")]
    High,
    #[default]
    #[serde(alias = "Medium 🟡")]
    Medium,
    #[serde(alias = "Low 🟢")]
    Low,
}

impl Priority {
    /// Map a menu answer (`1`-`3`) to a priority.
    ///
    /// Anything else, including non-numeric input, falls back to Medium.
    pub fn from_choice(input: &str) -> Self {
        match input.trim().parse::<i64>() {
            Ok(1) => Priority::High,
            Ok(3) => Priority::Low,
            _ => Priority::Medium,
        }
    }

    pub fn marker(&self) -> &'static str {
        match self {
            Priority::High => "🔴",
            Priority::Medium => "🟡",
            Priority::Low => "🟢",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::High => write!(f, "High"),
            Priority::Medium => write!(f, "Medium"),
            Priority::Low => write!(f, "Low"),
        }
    }
}

/// A single to-do item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: u32,

    /// What needs doing
    #[serde(rename = "task")]
    pub description: String,

    #[serde(default)]
    pub priority: Priority,

    #[serde(with = "time::minute")]
    pub created: NaiveDateTime,

    #[serde(default)]
    pub completed: bool,

    #[serde(
        default,
        with = "time::minute_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub completed_at: Option<NaiveDateTime>,
}

impl Task {
    fn new(id: u32, description: impl Into<String>, priority: Priority) -> Self {
        Self {
            id,
            description: description.into(),
            priority,
            created: time::now_minute(),
            completed: false,
            completed_at: None,
        }
    }
}

/// Tasks split by completion state, each half in list order
#[derive(Debug, Default)]
pub struct TaskListing<'a> {
    pub pending: Vec<&'a Task>,
    pub completed: Vec<&'a Task>,
}

/// Owns the task list and keeps its identifiers dense
#[derive(Debug, Default, Clone)]
pub struct TaskRegistry {
    tasks: Vec<Task>,
}

impl TaskRegistry {
    /// Adopt tasks loaded from the data file.
    ///
    /// Identifiers are re-established from list order so a hand-edited
    /// file cannot leave gaps.
    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        let mut registry = Self { tasks };
        registry.renumber_from(0);
        registry
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn into_tasks(self) -> Vec<Task> {
        self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Append a task. Empty (after trim) descriptions are rejected.
    pub fn add(&mut self, description: &str, priority: Priority) -> Result<&Task, InputError> {
        let description = description.trim();
        if description.is_empty() {
            return Err(InputError::EmptyDescription);
        }

        let id = self.next_id();
        self.tasks.push(Task::new(id, description, priority));
        debug!(id, %priority, "task added");

        Ok(&self.tasks[self.tasks.len() - 1])
    }

    /// Partition into pending and completed tasks.
    ///
    /// The completed half is left empty unless `include_completed` is set.
    pub fn list(&self, include_completed: bool) -> TaskListing<'_> {
        let mut listing = TaskListing::default();
        for task in &self.tasks {
            if !task.completed {
                listing.pending.push(task);
            } else if include_completed {
                listing.completed.push(task);
            }
        }
        listing
    }

    /// (pending, completed) counts
    pub fn counts(&self) -> (usize, usize) {
        let completed = self.tasks.iter().filter(|t| t.completed).count();
        (self.tasks.len() - completed, completed)
    }

    /// Mark the first pending task with this id as completed.
    ///
    /// Returns false when no such task exists or it is already completed.
    pub fn complete(&mut self, id: u32) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == id && !t.completed) {
            Some(task) => {
                task.completed = true;
                task.completed_at = Some(time::now_minute());
                debug!(id, "task completed");
                true
            }
            None => false,
        }
    }

    /// Remove the first task with this id and renumber everything after it.
    pub fn delete(&mut self, id: u32) -> Option<Task> {
        let index = self.tasks.iter().position(|t| t.id == id)?;
        let removed = self.tasks.remove(index);
        self.renumber_from(index);
        debug!(id, remaining = self.tasks.len(), "task deleted");
        Some(removed)
    }

    pub fn clear(&mut self) {
        self.tasks.clear();
    }

    fn next_id(&self) -> u32 {
        self.tasks.len() as u32 + 1
    }

    fn renumber_from(&mut self, start: usize) {
        for (index, task) in self.tasks.iter_mut().enumerate().skip(start) {
            task.id = index as u32 + 1;
        }
    }
}
