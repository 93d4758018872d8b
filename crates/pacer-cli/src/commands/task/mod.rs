mod add;
mod capture;
mod complete;
mod delete;
mod get;
mod list;
mod update;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::TaskCommands;
use crate::context::AppContext;

/// Handle `pacer task`.
pub async fn handle(action: &TaskCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        TaskCommands::Add {
            title,
            deadline,
            priority,
            category,
            energy,
            note,
        } => {
            add::run(
                add::AddArgs {
                    title,
                    deadline: deadline.as_deref(),
                    priority: priority.as_deref(),
                    category: category.as_deref(),
                    energy: energy.as_deref(),
                    note: note.as_deref(),
                },
                ctx,
                flags,
            )
            .await
        }
        TaskCommands::Capture { text } => capture::run(&text.join(" "), ctx, flags).await,
        TaskCommands::List {
            status,
            category,
            limit,
        } => list::run(status.as_deref(), category.as_deref(), *limit, ctx, flags).await,
        TaskCommands::Get { id } => get::run(id, ctx, flags).await,
        TaskCommands::Update {
            id,
            title,
            deadline,
            clear_deadline,
            priority,
            category,
            energy,
            note,
            clear_note,
        } => {
            update::run(
                id,
                update::UpdateArgs {
                    title: title.as_deref(),
                    deadline: deadline.as_deref(),
                    clear_deadline: *clear_deadline,
                    priority: priority.as_deref(),
                    category: category.as_deref(),
                    energy: energy.as_deref(),
                    note: note.as_deref(),
                    clear_note: *clear_note,
                },
                ctx,
                flags,
            )
            .await
        }
        TaskCommands::Complete { id } => complete::run(id, ctx, flags).await,
        TaskCommands::Delete { id } => delete::run(id, ctx, flags).await,
    }
}
