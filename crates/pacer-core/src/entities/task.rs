use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::TaskDraft;
use crate::enums::{Category, Energy, Priority, TaskStatus};
use crate::errors::CoreError;

/// A single unit of work the user wants to get done.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub deadline: Option<NaiveDate>,
    pub priority: Priority,
    pub category: Category,
    pub energy: Energy,
    pub status: TaskStatus,
    pub created_at: DateTime<Utc>,
    pub done_at: Option<DateTime<Utc>>,
    pub priority_reason: Option<String>,
    pub note: Option<String>,
}

impl Task {
    /// Materialize a draft into an active task.
    #[must_use]
    pub fn from_draft(id: String, draft: TaskDraft, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: draft.title,
            deadline: draft.deadline,
            priority: draft.priority,
            category: draft.category,
            energy: draft.energy,
            status: TaskStatus::Active,
            created_at,
            done_at: None,
            priority_reason: None,
            note: draft.note,
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == TaskStatus::Active
    }

    /// Check the `done_at` ⇔ `status == done` invariant.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` describing the violated invariant.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.title.trim().is_empty() {
            return Err(CoreError::Validation(format!(
                "task {} has an empty title",
                self.id
            )));
        }
        match (self.status, self.done_at) {
            (TaskStatus::Done, None) => Err(CoreError::Validation(format!(
                "task {} is done but has no done_at",
                self.id
            ))),
            (TaskStatus::Active, Some(_)) => Err(CoreError::Validation(format!(
                "task {} is active but has done_at set",
                self.id
            ))),
            _ => Ok(()),
        }
    }
}
