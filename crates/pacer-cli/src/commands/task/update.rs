use pacer_core::enums::{Category, Energy, Priority};
use pacer_db::updates::{TaskUpdate, TaskUpdateBuilder};

use crate::cli::GlobalFlags;
use crate::commands::shared::parse::{parse_date, parse_optional_enum};
use crate::context::AppContext;
use crate::output::output;

pub struct UpdateArgs<'a> {
    pub title: Option<&'a str>,
    pub deadline: Option<&'a str>,
    pub clear_deadline: bool,
    pub priority: Option<&'a str>,
    pub category: Option<&'a str>,
    pub energy: Option<&'a str>,
    pub note: Option<&'a str>,
    pub clear_note: bool,
}

pub async fn run(
    id: &str,
    args: UpdateArgs<'_>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let update = build_update(&args)?;
    if update.is_empty() {
        anyhow::bail!("nothing to update; pass at least one field flag");
    }
    let task = ctx.store.update(id, &update).await?;
    output(&task, flags.format)
}

fn build_update(args: &UpdateArgs<'_>) -> anyhow::Result<TaskUpdate> {
    let mut builder = TaskUpdateBuilder::new();
    if let Some(title) = args.title {
        builder = builder.title(title);
    }
    if args.clear_deadline {
        builder = builder.deadline(None);
    } else if let Some(deadline) = args.deadline {
        builder = builder.deadline(Some(parse_date(deadline)?));
    }
    if let Some(priority) = parse_optional_enum::<Priority>(args.priority, "priority")? {
        builder = builder.priority(priority);
    }
    if let Some(category) = parse_optional_enum::<Category>(args.category, "category")? {
        builder = builder.category(category);
    }
    if let Some(energy) = parse_optional_enum::<Energy>(args.energy, "energy")? {
        builder = builder.energy(energy);
    }
    if args.clear_note {
        builder = builder.note(None);
    } else if let Some(note) = args.note {
        builder = builder.note(Some(note.to_string()));
    }
    Ok(builder.build())
}
