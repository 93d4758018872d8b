use clap::Subcommand;

/// Task entity commands.
#[derive(Clone, Debug, Subcommand)]
pub enum TaskCommands {
    /// Add a task from explicit fields.
    Add {
        title: String,
        /// Due date: YYYY-MM-DD, today, or tomorrow.
        #[arg(long)]
        deadline: Option<String>,
        #[arg(long)]
        priority: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        energy: Option<String>,
        #[arg(long)]
        note: Option<String>,
    },
    /// Add a task from free text, letting the LLM fill in the fields.
    Capture {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// List tasks in presentation order.
    List {
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Get a task by ID.
    Get { id: String },
    /// Update a task.
    Update {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long, conflicts_with = "clear_deadline")]
        deadline: Option<String>,
        #[arg(long)]
        clear_deadline: bool,
        #[arg(long)]
        priority: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        energy: Option<String>,
        #[arg(long, conflicts_with = "clear_note")]
        note: Option<String>,
        #[arg(long)]
        clear_note: bool,
    },
    /// Mark a task done.
    Complete { id: String },
    /// Delete a task.
    Delete { id: String },
}
