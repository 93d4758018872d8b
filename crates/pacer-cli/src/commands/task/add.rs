use pacer_core::entities::TaskDraft;

use crate::cli::GlobalFlags;
use crate::commands::shared::parse::{parse_date, parse_optional_enum};
use crate::commands::shared::rank::auto_rank;
use crate::context::AppContext;
use crate::output::output;

pub struct AddArgs<'a> {
    pub title: &'a str,
    pub deadline: Option<&'a str>,
    pub priority: Option<&'a str>,
    pub category: Option<&'a str>,
    pub energy: Option<&'a str>,
    pub note: Option<&'a str>,
}

pub async fn run(args: AddArgs<'_>, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let draft = build_draft(&args)?;
    let task = ctx.store.create(draft).await?;
    auto_rank(ctx).await?;
    output(&task, flags.format)
}

fn build_draft(args: &AddArgs<'_>) -> anyhow::Result<TaskDraft> {
    let defaults = TaskDraft::titled(args.title);
    Ok(TaskDraft {
        deadline: args.deadline.map(parse_date).transpose()?,
        priority: parse_optional_enum(args.priority, "priority")?.unwrap_or(defaults.priority),
        category: parse_optional_enum(args.category, "category")?.unwrap_or(defaults.category),
        energy: parse_optional_enum(args.energy, "energy")?.unwrap_or(defaults.energy),
        note: args.note.map(str::to_string),
        ..defaults
    })
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use pacer_core::enums::{Category, Energy, Priority};

    use super::*;

    fn args(title: &str) -> AddArgs<'_> {
        AddArgs {
            title,
            deadline: None,
            priority: None,
            category: None,
            energy: None,
            note: None,
        }
    }

    #[test]
    fn unset_flags_use_draft_defaults() {
        let draft = build_draft(&args("Water plants")).unwrap();
        assert_eq!(draft, TaskDraft::titled("Water plants"));
    }

    #[test]
    fn flags_fill_the_draft() {
        let draft = build_draft(&AddArgs {
            deadline: Some("2026-03-14"),
            priority: Some("high"),
            category: Some("work"),
            energy: Some("low"),
            note: Some("bring slides"),
            ..args("Finish report")
        })
        .unwrap();

        assert_eq!(draft.deadline, NaiveDate::from_ymd_opt(2026, 3, 14));
        assert_eq!(draft.priority, Priority::High);
        assert_eq!(draft.category, Category::Work);
        assert_eq!(draft.energy, Energy::Low);
        assert_eq!(draft.note.as_deref(), Some("bring slides"));
    }

    #[test]
    fn bad_enum_flag_is_an_error() {
        let result = build_draft(&AddArgs {
            priority: Some("urgent"),
            ..args("x")
        });
        assert!(result.is_err());
    }
}
