//! Task update builder.

use chrono::NaiveDate;
use pacer_core::entities::Task;
use pacer_core::enums::{Category, Energy, Priority};
use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct TaskUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<Option<NaiveDate>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub energy: Option<Energy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<Option<String>>,
}

impl TaskUpdate {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.deadline.is_none()
            && self.priority.is_none()
            && self.category.is_none()
            && self.energy.is_none()
            && self.note.is_none()
    }

    /// Produce the updated copy of `task`. Identity, status, and timestamps
    /// are never touched.
    #[must_use]
    pub fn apply(&self, task: &Task) -> Task {
        Task {
            title: self.title.clone().unwrap_or_else(|| task.title.clone()),
            deadline: self.deadline.unwrap_or(task.deadline),
            priority: self.priority.unwrap_or(task.priority),
            category: self.category.unwrap_or(task.category),
            energy: self.energy.unwrap_or(task.energy),
            note: self.note.clone().unwrap_or_else(|| task.note.clone()),
            ..task.clone()
        }
    }
}

pub struct TaskUpdateBuilder(TaskUpdate);

impl Default for TaskUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(TaskUpdate::default())
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.0.title = Some(title.into());
        self
    }

    #[must_use]
    pub const fn deadline(mut self, deadline: Option<NaiveDate>) -> Self {
        self.0.deadline = Some(deadline);
        self
    }

    #[must_use]
    pub const fn priority(mut self, priority: Priority) -> Self {
        self.0.priority = Some(priority);
        self
    }

    #[must_use]
    pub const fn category(mut self, category: Category) -> Self {
        self.0.category = Some(category);
        self
    }

    #[must_use]
    pub const fn energy(mut self, energy: Energy) -> Self {
        self.0.energy = Some(energy);
        self
    }

    #[must_use]
    pub fn note(mut self, note: Option<String>) -> Self {
        self.0.note = Some(note);
        self
    }

    #[must_use]
    pub fn build(self) -> TaskUpdate {
        self.0
    }
}
