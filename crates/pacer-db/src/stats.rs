//! Productivity statistics over the task list.
//!
//! Day boundaries are taken in the caller's time zone, so "done today" means
//! the user's today rather than UTC's.

use std::collections::BTreeSet;

use chrono::{DateTime, Days, NaiveDate, TimeZone};

use pacer_core::entities::Task;
use pacer_core::enums::{Category, TaskStatus};
use pacer_core::responses::{CategoryStats, StatsResponse};

pub struct TaskStats;

impl TaskStats {
    /// Summarize `tasks` as seen at `now`.
    #[must_use]
    pub fn compute<Tz: TimeZone>(tasks: &[Task], now: &DateTime<Tz>) -> StatsResponse {
        let tz = now.timezone();
        let today = now.date_naive();
        let week_start = today.checked_sub_days(Days::new(6)).unwrap_or(today);

        let completion_days: BTreeSet<NaiveDate> = tasks
            .iter()
            .filter_map(|t| t.done_at)
            .map(|at| at.with_timezone(&tz).date_naive())
            .collect();

        let completions_on = |pred: &dyn Fn(NaiveDate) -> bool| {
            tasks
                .iter()
                .filter_map(|t| t.done_at)
                .filter(|at| pred(at.with_timezone(&tz).date_naive()))
                .count()
        };

        let total = tasks.len();
        let done = tasks.iter().filter(|t| t.status == TaskStatus::Done).count();
        let active = total - done;
        let overdue = tasks
            .iter()
            .filter(|t| t.is_active() && t.deadline.is_some_and(|d| d < today))
            .count();

        let by_category = Category::ALL
            .iter()
            .map(|&category| {
                let in_category = tasks.iter().filter(|t| t.category == category);
                let done = in_category.clone().filter(|t| !t.is_active()).count();
                let active = in_category.count() - done;
                CategoryStats {
                    category,
                    active: to_u32(active),
                    done: to_u32(done),
                }
            })
            .collect();

        #[allow(clippy::cast_precision_loss)]
        let completion_rate = if total == 0 {
            0.0
        } else {
            done as f64 / total as f64
        };

        StatsResponse {
            total: to_u32(total),
            active: to_u32(active),
            done: to_u32(done),
            completion_rate,
            done_today: to_u32(completions_on(&|d| d == today)),
            done_last_7_days: to_u32(completions_on(&|d| d >= week_start && d <= today)),
            overdue: to_u32(overdue),
            streak_days: streak(&completion_days, today),
            by_category,
        }
    }
}

/// Consecutive completion days ending today, or yesterday if nothing is done
/// yet today.
fn streak(days: &BTreeSet<NaiveDate>, today: NaiveDate) -> u32 {
    let start = if days.contains(&today) {
        today
    } else {
        match today.pred_opt() {
            Some(yesterday) if days.contains(&yesterday) => yesterday,
            _ => return 0,
        }
    };

    let mut count = 0;
    let mut day = Some(start);
    while let Some(d) = day.filter(|d| days.contains(d)) {
        count += 1;
        day = d.pred_opt();
    }
    count
}

fn to_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}
