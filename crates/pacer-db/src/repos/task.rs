//! Task repository: CRUD and status transitions over the `tasks` slot.

use std::collections::HashSet;

use chrono::Utc;

use pacer_core::entities::{Task, TaskDraft};
use pacer_core::enums::{Category, TaskStatus};
use pacer_core::errors::CoreError;
use pacer_core::ids::{PREFIX_TASK, generate_id};

use crate::error::DatabaseError;
use crate::storage::{SLOT_TASKS, SlotStorage};
use crate::updates::task::TaskUpdate;

/// Collisions on a 32-bit id space are rare; give up after a handful.
const MAX_ID_ATTEMPTS: usize = 8;

/// Narrows `TaskStore::list`. Empty filter matches everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskFilter {
    pub status: Option<TaskStatus>,
    pub category: Option<Category>,
}

impl TaskFilter {
    #[must_use]
    pub const fn active() -> Self {
        Self {
            status: Some(TaskStatus::Active),
            category: None,
        }
    }

    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        self.status.is_none_or(|s| s == task.status)
            && self.category.is_none_or(|c| c == task.category)
    }
}

fn not_found(id: &str) -> DatabaseError {
    CoreError::NotFound {
        entity_type: "task".to_string(),
        id: id.to_string(),
    }
    .into()
}

/// The ordered task list, persisted as one JSON array.
pub struct TaskStore<S> {
    storage: S,
}

impl<S: SlotStorage> TaskStore<S> {
    pub const fn new(storage: S) -> Self {
        Self { storage }
    }

    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Read every task in stored order. A missing slot is an empty list.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Serialization` if the slot holds malformed JSON.
    pub async fn load(&self) -> Result<Vec<Task>, DatabaseError> {
        match self.storage.get_slot(SLOT_TASKS).await? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    /// Replace the stored list.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` (wrapped) if any task breaks its
    /// invariants or two tasks share an id. Nothing is written in that case.
    pub async fn save(&self, tasks: &[Task]) -> Result<(), DatabaseError> {
        let mut seen = HashSet::with_capacity(tasks.len());
        for task in tasks {
            task.validate()?;
            if !seen.insert(task.id.as_str()) {
                return Err(CoreError::Validation(format!("duplicate task id {}", task.id)).into());
            }
        }
        let raw = serde_json::to_string(tasks)?;
        self.storage.set_slot(SLOT_TASKS, &raw).await?;
        tracing::debug!(count = tasks.len(), "saved tasks");
        Ok(())
    }

    /// Materialize a draft, append it, and persist.
    pub async fn create(&self, draft: TaskDraft) -> Result<Task, DatabaseError> {
        if draft.title.trim().is_empty() {
            return Err(CoreError::Validation("task title must not be empty".into()).into());
        }

        let mut tasks = self.load().await?;
        let id = Self::fresh_id(&tasks)?;
        let task = Task::from_draft(id, draft, Utc::now());
        tasks.push(task.clone());
        self.save(&tasks).await?;

        tracing::info!(id = %task.id, title = %task.title, "created task");
        Ok(task)
    }

    pub async fn get(&self, id: &str) -> Result<Task, DatabaseError> {
        self.load()
            .await?
            .into_iter()
            .find(|t| t.id == id)
            .ok_or_else(|| not_found(id))
    }

    /// Apply a field update. An empty update returns the task untouched
    /// without writing.
    pub async fn update(&self, id: &str, update: &TaskUpdate) -> Result<Task, DatabaseError> {
        let tasks = self.load().await?;
        let current = tasks
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or_else(|| not_found(id))?;

        if update.is_empty() {
            return Ok(current);
        }

        let updated = update.apply(&current);
        if updated.title.trim().is_empty() {
            return Err(CoreError::Validation("task title must not be empty".into()).into());
        }

        let tasks: Vec<Task> = tasks
            .into_iter()
            .map(|t| if t.id == id { updated.clone() } else { t })
            .collect();
        self.save(&tasks).await?;
        Ok(updated)
    }

    /// Transition active → done and stamp `done_at`.
    ///
    /// # Errors
    ///
    /// `CoreError::InvalidTransition` if the task is already done.
    pub async fn complete(&self, id: &str) -> Result<Task, DatabaseError> {
        let tasks = self.load().await?;
        let current = tasks
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| not_found(id))?;

        if !current.status.can_transition_to(TaskStatus::Done) {
            return Err(CoreError::InvalidTransition {
                entity_type: "task".to_string(),
                id: id.to_string(),
                from: current.status.to_string(),
                to: TaskStatus::Done.to_string(),
            }
            .into());
        }

        let done = Task {
            status: TaskStatus::Done,
            done_at: Some(Utc::now()),
            ..current.clone()
        };
        let tasks: Vec<Task> = tasks
            .into_iter()
            .map(|t| if t.id == id { done.clone() } else { t })
            .collect();
        self.save(&tasks).await?;

        tracing::info!(id, "completed task");
        Ok(done)
    }

    /// Remove a task and return it.
    pub async fn delete(&self, id: &str) -> Result<Task, DatabaseError> {
        let (removed, kept): (Vec<Task>, Vec<Task>) =
            self.load().await?.into_iter().partition(|t| t.id == id);
        let removed = removed.into_iter().next().ok_or_else(|| not_found(id))?;
        self.save(&kept).await?;

        tracing::info!(id, "deleted task");
        Ok(removed)
    }

    /// Tasks matching `filter`, in stored order.
    pub async fn list(&self, filter: &TaskFilter) -> Result<Vec<Task>, DatabaseError> {
        Ok(self
            .load()
            .await?
            .into_iter()
            .filter(|t| filter.matches(t))
            .collect())
    }

    fn fresh_id(existing: &[Task]) -> Result<String, DatabaseError> {
        for _ in 0..MAX_ID_ATTEMPTS {
            let id = generate_id(PREFIX_TASK)?;
            if !existing.iter().any(|t| t.id == id) {
                return Ok(id);
            }
        }
        Err(DatabaseError::InvalidState(
            "could not generate a unique task id".into(),
        ))
    }
}
