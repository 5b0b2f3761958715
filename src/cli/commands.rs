use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tk", about = concat!("taskpad v", env!("CARGO_PKG_VERSION"), " - your tasks, one JSON file"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Use a different task file (default: the platform data directory)
    #[arg(short = 'f', long = "file", global = true)]
    pub file: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a new task
    Add(AddArgs),
    /// List tasks, filtered and sorted
    List(ListArgs),
    /// Toggle a task's completed state
    Done(IdArgs),
    /// Toggle a task's star
    Star(IdArgs),
    /// Replace a task's text
    Edit(EditArgs),
    /// Set or clear a task's due date
    Due(DueArgs),
    /// Set or clear a task's priority
    Priority(PriorityArgs),
    /// Set or clear a task's notes
    Note(NoteArgs),
    /// Delete a task
    Rm(IdArgs),
    /// Remove all completed tasks
    Clear,
    /// Show task counts
    Stats,
}

#[derive(Args)]
pub struct AddArgs {
    /// Task text
    pub text: String,
}

#[derive(Args)]
pub struct ListArgs {
    /// Status filter: all, active, completed, starred
    #[arg(short, long)]
    pub status: Option<String>,
    /// Sort key: created, due, priority, alpha
    #[arg(long)]
    pub sort: Option<String>,
    /// Sort order: asc, desc
    #[arg(long)]
    pub order: Option<String>,
}

#[derive(Args)]
pub struct IdArgs {
    /// Task ID (a unique prefix is enough)
    pub id: String,
}

#[derive(Args)]
pub struct EditArgs {
    /// Task ID (a unique prefix is enough)
    pub id: String,
    /// New task text
    pub text: String,
}

#[derive(Args)]
pub struct DueArgs {
    /// Task ID (a unique prefix is enough)
    pub id: String,
    /// Due date as YYYY-MM-DD; omit to clear
    pub date: Option<String>,
}

#[derive(Args)]
pub struct PriorityArgs {
    /// Task ID (a unique prefix is enough)
    pub id: String,
    /// Priority: low, medium, high; omit to clear
    pub level: Option<String>,
}

#[derive(Args)]
pub struct NoteArgs {
    /// Task ID (a unique prefix is enough)
    pub id: String,
    /// Note text; omit to clear
    pub text: Option<String>,
}
