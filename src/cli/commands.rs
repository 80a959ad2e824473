use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "ck", about = concat!("[x] checklist v", env!("CARGO_PKG_VERSION"), " - a personal checklist"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Run against a different workspace directory
    #[arg(short = 'C', long = "project-dir", global = true)]
    pub project_dir: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a checklist workspace in the current directory
    Init(InitArgs),
    /// List items
    List(ListArgs),
    /// Add an item to the top of the list
    Add(AddArgs),
    /// Mark an item done
    Done(IdArgs),
    /// Mark an item open again
    Reopen(IdArgs),
    /// Flip an item between open and done
    Toggle(IdArgs),
    /// Remove an item
    Rm(IdArgs),
    /// View the recovery log
    Recovery(RecoveryArgs),
}

#[derive(Args)]
pub struct InitArgs {
    /// Storage key (items are stored in .checklist/<key>.json)
    #[arg(long)]
    pub key: Option<String>,
    /// Overwrite an existing config.toml
    #[arg(long)]
    pub force: bool,
}

#[derive(Args)]
pub struct ListArgs {
    /// Filter by status (open, done)
    #[arg(long)]
    pub status: Option<String>,
}

#[derive(Args)]
pub struct AddArgs {
    /// Item title (multiple words are joined with spaces)
    #[arg(required = true, num_args = 1..)]
    pub title: Vec<String>,
}

#[derive(Args)]
pub struct IdArgs {
    /// Item id or unique id prefix
    pub id: String,
}

#[derive(Args)]
pub struct RecoveryArgs {
    /// Show only the newest N entries
    #[arg(long)]
    pub tail: Option<usize>,
}
