//! # pacer-oracle
//!
//! The external capabilities Pacer leans on:
//! - [`RankingOracle`] proposes a presentation order for active tasks plus a
//!   one-line reason per task.
//! - [`TaskParser`] turns free text into a [`TaskDraft`].
//!
//! [`LlmOracle`] implements both over any [`LlmClient`]; the production
//! client is [`HttpLlmClient`] (OpenAI-compatible chat completions).

mod client;
mod error;
mod http;
mod oracle;
mod parse;
mod prompt;

pub use client::{HttpLlmClient, LlmClient, LlmRequest, MockLlmClient, UnconfiguredClient};
pub use error::OracleError;
pub use oracle::LlmOracle;
pub use parse::extract_json;

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use pacer_core::entities::{Task, TaskDraft};
use pacer_core::enums::{Category, Energy, Priority, TimeOfDay};
use serde::{Deserialize, Serialize};

// ── Types ──────────────────────────────────────────────────────────

/// What the oracle sees of a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSummary {
    pub id: String,
    pub title: String,
    pub priority: Priority,
    pub energy: Energy,
    pub deadline: Option<NaiveDate>,
    pub category: Category,
}

impl From<&Task> for TaskSummary {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id.clone(),
            title: task.title.clone(),
            priority: task.priority,
            energy: task.energy,
            deadline: task.deadline,
            category: task.category,
        }
    }
}

/// A proposed order. `order` may omit, repeat, or invent ids; callers
/// decide what to keep.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ranking {
    pub order: Vec<String>,
    pub reasons: HashMap<String, String>,
}

// ── Capabilities ───────────────────────────────────────────────────

#[async_trait]
pub trait RankingOracle: Send + Sync {
    async fn rank(
        &self,
        tasks: &[TaskSummary],
        time_of_day: TimeOfDay,
    ) -> Result<Ranking, OracleError>;
}

#[async_trait]
impl<T: RankingOracle + ?Sized> RankingOracle for Arc<T> {
    async fn rank(
        &self,
        tasks: &[TaskSummary],
        time_of_day: TimeOfDay,
    ) -> Result<Ranking, OracleError> {
        (**self).rank(tasks, time_of_day).await
    }
}

#[async_trait]
pub trait TaskParser: Send + Sync {
    async fn parse_task(&self, text: &str) -> Result<TaskDraft, OracleError>;
}

#[async_trait]
impl<T: TaskParser + ?Sized> TaskParser for Arc<T> {
    async fn parse_task(&self, text: &str) -> Result<TaskDraft, OracleError> {
        (**self).parse_task(text).await
    }
}
