//! LLM-backed ranking and capture.

use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use pacer_config::OracleConfig;
use pacer_core::entities::TaskDraft;
use pacer_core::enums::TimeOfDay;

use crate::client::{LlmClient, LlmRequest};
use crate::error::OracleError;
use crate::parse::{parse_draft, parse_ranking};
use crate::prompt::{capture_prompt, rank_prompt};
use crate::{Ranking, RankingOracle, TaskParser, TaskSummary};

pub struct LlmOracle<C> {
    client: C,
    model: String,
    temperature: f32,
}

impl<C: LlmClient> LlmOracle<C> {
    pub fn new(client: C, model: impl Into<String>, temperature: f32) -> Self {
        Self {
            client,
            model: model.into(),
            temperature,
        }
    }

    pub fn from_config(client: C, config: &OracleConfig) -> Self {
        Self::new(client, config.model.clone(), config.temperature)
    }

    pub const fn client(&self) -> &C {
        &self.client
    }

    fn request(&self, (system, user): (String, String)) -> LlmRequest {
        LlmRequest {
            system,
            user,
            model: self.model.clone(),
            temperature: self.temperature,
        }
    }

    fn today() -> NaiveDate {
        Local::now().date_naive()
    }
}

#[async_trait]
impl<C: LlmClient> RankingOracle for LlmOracle<C> {
    async fn rank(
        &self,
        tasks: &[TaskSummary],
        time_of_day: TimeOfDay,
    ) -> Result<Ranking, OracleError> {
        let prompts = rank_prompt(tasks, time_of_day, Self::today())
            .map_err(|e| OracleError::Parse(format!("could not encode tasks: {e}")))?;
        let request = self.request(prompts);
        tracing::debug!(
            model = %self.model,
            tasks = tasks.len(),
            %time_of_day,
            prompt_len = request.system.len() + request.user.len(),
            "ranking request prepared"
        );

        let output = self.client.complete(request).await?;
        let ranking = parse_ranking(&output)?;
        tracing::debug!(
            ordered = ranking.order.len(),
            reasons = ranking.reasons.len(),
            "ranking reply parsed"
        );
        Ok(ranking)
    }
}

#[async_trait]
impl<C: LlmClient> TaskParser for LlmOracle<C> {
    async fn parse_task(&self, text: &str) -> Result<TaskDraft, OracleError> {
        let request = self.request(capture_prompt(text, Self::today()));
        tracing::debug!(model = %self.model, text_len = text.len(), "capture request prepared");
        let output = self.client.complete(request).await?;
        parse_draft(&output, text)
    }
}

#[cfg(test)]
mod tests {
    use pacer_core::enums::{Category, Energy, Priority};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::client::MockLlmClient;

    fn summaries() -> Vec<TaskSummary> {
        ["tsk-00000001", "tsk-00000002"]
            .into_iter()
            .map(|id| TaskSummary {
                id: id.into(),
                title: format!("task {id}"),
                priority: Priority::Medium,
                energy: Energy::Medium,
                deadline: None,
                category: Category::Personal,
            })
            .collect()
    }

    #[tokio::test]
    async fn rank_sends_model_and_parses_reply() {
        let oracle = LlmOracle::new(
            MockLlmClient::replying(
                r#"{"order":["tsk-00000002","tsk-00000001"],"reasons":{"tsk-00000002":"due soon"}}"#,
            ),
            "test-model",
            0.1,
        );

        let ranking = oracle.rank(&summaries(), TimeOfDay::Morning).await.unwrap();
        assert_eq!(ranking.order, vec!["tsk-00000002", "tsk-00000001"]);

        let requests = oracle.client().requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].model, "test-model");
        assert!(requests[0].system.contains("morning"));
        assert!(requests[0].user.contains("tsk-00000001"));
    }

    #[tokio::test]
    async fn rank_propagates_transport_failure() {
        let oracle = LlmOracle::new(MockLlmClient::failing(500), "m", 0.0);
        assert!(matches!(
            oracle.rank(&summaries(), TimeOfDay::Evening).await,
            Err(OracleError::Api { status: 500, .. })
        ));
    }

    #[tokio::test]
    async fn parse_task_uses_reply() {
        let oracle = LlmOracle::from_config(
            MockLlmClient::replying(r#"{"title":"Pay rent","category":"personal","priority":"high"}"#),
            &OracleConfig::default(),
        );
        let draft = oracle.parse_task("pay rent tomorrow").await.unwrap();
        assert_eq!(draft.title, "Pay rent");
        assert_eq!(draft.priority, Priority::High);
        assert_eq!(oracle.client().requests()[0].model, "gpt-4o-mini");
    }
}
