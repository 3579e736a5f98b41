use clap::{Args, Parser, Subcommand};
use sprintboard_domain::{TaskId, TaskPriority};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sprintboard")]
#[command(about = "A sprint task board backed by a remote task service", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Base URL of the task service API (or set SPRINTBOARD_URL)
    #[arg(long, env = "SPRINTBOARD_URL", global = true)]
    pub url: Option<String>,

    /// Bearer token for the task service (or set SPRINTBOARD_TOKEN)
    #[arg(long, env = "SPRINTBOARD_TOKEN", global = true, hide_env_values = true)]
    pub token: Option<String>,

    /// Config file to read instead of the per-user default
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show a sprint's tasks grouped into board columns
    Board(BoardArgs),
    /// Move a task by dropping it on a column, sub-section or another task
    Move(MoveArgs),
    /// Delete a task
    Delete(DeleteArgs),
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Args)]
pub struct BoardArgs {
    #[arg(long)]
    pub sprint: u64,
    /// Case-insensitive match on title or description
    #[arg(long, default_value = "")]
    pub search: String,
    /// Only show tasks of this priority (low, medium, high)
    #[arg(long)]
    pub priority: Option<TaskPriority>,
}

#[derive(Args)]
pub struct MoveArgs {
    #[arg(long)]
    pub sprint: u64,
    #[arg(long)]
    pub task: TaskId,
    /// Drop target: a column id, a sub-section id or a task id
    #[arg(long)]
    pub to: String,
}

#[derive(Args)]
pub struct DeleteArgs {
    #[arg(long)]
    pub sprint: u64,
    #[arg(long)]
    pub task: TaskId,
}
