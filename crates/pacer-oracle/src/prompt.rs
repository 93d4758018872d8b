//! Prompt construction for ranking and capture.

use std::fmt::Write;

use chrono::NaiveDate;
use pacer_core::enums::TimeOfDay;

use crate::TaskSummary;

const RANK_SYSTEM: &str = "You are a personal productivity assistant. \
Order the user's open tasks so the most sensible next task comes first. \
Weigh deadlines, stated priority, and how much energy a task takes against \
the time of day. Return ONLY one JSON object.";

const CAPTURE_SYSTEM: &str = "You turn a free-text note into a single task. \
Return ONLY one JSON object.";

fn energy_guidance(time_of_day: TimeOfDay) -> &'static str {
    match time_of_day {
        TimeOfDay::Morning => "It is morning: energy is high, favor demanding tasks.",
        TimeOfDay::Afternoon => "It is afternoon: energy is moderate, favor medium-effort tasks.",
        TimeOfDay::Evening => "It is evening: energy is low, favor light tasks.",
    }
}

/// System and user prompts for a ranking request.
pub fn rank_prompt(
    tasks: &[TaskSummary],
    time_of_day: TimeOfDay,
    today: NaiveDate,
) -> Result<(String, String), serde_json::Error> {
    let mut system = String::from(RANK_SYSTEM);
    let _ = write!(system, "\n\nToday is {}. {}", today.format("%Y-%m-%d"), energy_guidance(time_of_day));

    let mut user = String::from("Tasks:\n");
    user.push_str(&serde_json::to_string_pretty(tasks)?);
    user.push_str("\n\nReturn a JSON object with shape:\n");
    user.push_str(r#"{"order":["<id>", "..."],"reasons":{"<id>":"<one short sentence>"}}"#);
    user.push_str("\nInclude every id exactly once. Use only the ids listed above.\n");

    Ok((system, user))
}

/// System and user prompts for turning free text into a draft.
pub fn capture_prompt(text: &str, today: NaiveDate) -> (String, String) {
    let mut system = String::from(CAPTURE_SYSTEM);
    let _ = write!(system, "\n\nToday is {}.", today.format("%Y-%m-%d (%A)"));

    let mut user = String::new();
    let _ = writeln!(user, "Note:\n{}\n", text.trim());
    user.push_str("Return a JSON object with shape:\n");
    user.push_str(
        r#"{"title":"...","deadline":"YYYY-MM-DD or null","priority":"high|medium|low","category":"work|study|personal","energy":"high|medium|low","note":"... or null"}"#,
    );
    user.push_str("\nResolve relative dates such as \"next Friday\" against today.\n");

    (system, user)
}
