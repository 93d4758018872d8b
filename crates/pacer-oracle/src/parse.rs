//! Reply parsing. LLM output is often wrapped in prose or a fenced block;
//! the outermost `{…}` is what gets parsed.

use std::collections::HashMap;

use chrono::NaiveDate;
use pacer_core::entities::TaskDraft;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::Ranking;
use crate::error::OracleError;

/// Slice from the first `{` to the last `}`.
pub fn extract_json(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end <= start {
        return None;
    }
    Some(&text[start..=end])
}

#[derive(Deserialize)]
struct RankingReply {
    order: Vec<String>,
    #[serde(default)]
    reasons: HashMap<String, Option<String>>,
}

pub fn parse_ranking(text: &str) -> Result<Ranking, OracleError> {
    let json = extract_json(text)
        .ok_or_else(|| OracleError::Parse("ranking reply did not contain JSON".to_string()))?;
    let reply: RankingReply = serde_json::from_str(json)
        .map_err(|e| OracleError::Parse(format!("invalid ranking JSON: {e}")))?;

    let reasons = reply
        .reasons
        .into_iter()
        .filter_map(|(id, reason)| reason.map(|r| (id, r)))
        .collect();
    Ok(Ranking {
        order: reply.order,
        reasons,
    })
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct DraftReply {
    title: Option<String>,
    deadline: Option<String>,
    priority: Option<String>,
    category: Option<String>,
    energy: Option<String>,
    note: Option<String>,
}

/// Lenient enum lookup: anything unrecognized takes the type's default.
fn enum_or_default<T: DeserializeOwned + Default>(value: Option<&str>) -> T {
    value
        .map(|v| v.trim().to_ascii_lowercase())
        .and_then(|v| serde_json::from_value(serde_json::Value::String(v)).ok())
        .unwrap_or_default()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty() && v != "null")
}

/// Build a draft from a capture reply. Only a reply with no JSON at all is
/// an error; every field falls back to something usable.
pub fn parse_draft(text: &str, original: &str) -> Result<TaskDraft, OracleError> {
    let json = extract_json(text)
        .ok_or_else(|| OracleError::Parse("capture reply did not contain JSON".to_string()))?;
    let reply: DraftReply = serde_json::from_str(json)
        .map_err(|e| OracleError::Parse(format!("invalid capture JSON: {e}")))?;

    let title = non_empty(reply.title).unwrap_or_else(|| original.trim().to_string());
    let deadline = non_empty(reply.deadline)
        .and_then(|d| NaiveDate::parse_from_str(&d, "%Y-%m-%d").ok());

    Ok(TaskDraft {
        title,
        deadline,
        priority: enum_or_default(reply.priority.as_deref()),
        category: enum_or_default(reply.category.as_deref()),
        energy: enum_or_default(reply.energy.as_deref()),
        note: non_empty(reply.note),
    })
}
