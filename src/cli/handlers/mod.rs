mod init;
pub use init::cmd_init;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::recovery;
use crate::io::store_io::Store;
use crate::io::workspace_io;
use crate::model::collection::Collection;
use crate::model::item::ItemStatus;
use crate::model::workspace::Workspace;
use crate::ops::gateway::Gateway;
use crate::ops::rows;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;
    let project_dir = cli.project_dir.as_deref();

    match cli.command {
        None => Err("no subcommand given (run `ck` without arguments for the TUI)".into()),
        Some(cmd) => match cmd {
            Commands::Init(args) => cmd_init(args, project_dir),
            Commands::List(args) => cmd_list(args, project_dir, json),
            Commands::Add(args) => cmd_add(args, project_dir, json),
            Commands::Done(args) => cmd_set_status(args, true, project_dir, json),
            Commands::Reopen(args) => cmd_set_status(args, false, project_dir, json),
            Commands::Toggle(args) => cmd_toggle(args, project_dir, json),
            Commands::Rm(args) => cmd_rm(args, project_dir, json),
            Commands::Recovery(args) => cmd_recovery(args, project_dir),
        },
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn open_workspace(project_dir: Option<&str>) -> Result<Workspace, Box<dyn std::error::Error>> {
    let start = workspace_io::resolve_start_dir(project_dir)?;
    Ok(workspace_io::open_workspace(&start)?)
}

fn open_gateway(project_dir: Option<&str>) -> Result<Gateway, Box<dyn std::error::Error>> {
    let workspace = open_workspace(project_dir)?;
    Ok(Gateway::open(Store::for_workspace(&workspace)))
}

/// Print the full list after a change (or the whole collection as JSON).
fn print_collection(gateway: &Gateway, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(gateway.collection())?);
    } else {
        for line in format_rows(&rows::project(gateway.collection())) {
            println!("{}", line);
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_list(
    args: ListArgs,
    project_dir: Option<&str>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let gateway = open_gateway(project_dir)?;

    let filter = match args.status.as_deref() {
        Some(s) => Some(
            ItemStatus::parse_status(s)
                .ok_or_else(|| format!("invalid status: {} (expected open or done)", s))?,
        ),
        None => None,
    };

    let shown = match filter {
        None => gateway.collection().clone(),
        Some(status) => Collection::from_items(
            gateway
                .collection()
                .iter()
                .filter(|it| it.status == status)
                .cloned()
                .collect(),
        ),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&shown)?);
        return Ok(());
    }
    for line in format_rows(&rows::project(&shown)) {
        println!("{}", line);
    }
    if filter.is_none() && !shown.is_empty() {
        let (open, done) = shown.counts();
        println!("{}", format_counts(open, done));
    }
    Ok(())
}

fn cmd_recovery(
    args: RecoveryArgs,
    project_dir: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let workspace = open_workspace(project_dir)?;
    let entries = recovery::read_recovery_entries(&workspace.store_dir, args.tail);
    if entries.is_empty() {
        println!("(recovery log is empty)");
        return Ok(());
    }
    for (i, entry) in entries.iter().enumerate() {
        if i > 0 {
            println!();
        }
        for line in format_recovery_entry(entry) {
            println!("{}", line);
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_add(
    args: AddArgs,
    project_dir: Option<&str>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut gateway = open_gateway(project_dir)?;
    let raw = args.title.join(" ");
    if gateway.add_requested(&raw)?.is_none() {
        return Err("title cannot be empty".into());
    }
    print_collection(&gateway, json)
}

fn cmd_set_status(
    args: IdArgs,
    done: bool,
    project_dir: Option<&str>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut gateway = open_gateway(project_dir)?;
    let id = gateway.resolve(&args.id)?;
    gateway.toggle_requested(&id, done)?;
    print_collection(&gateway, json)
}

fn cmd_toggle(
    args: IdArgs,
    project_dir: Option<&str>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut gateway = open_gateway(project_dir)?;
    let id = gateway.resolve(&args.id)?;
    gateway.toggle(&id)?;
    print_collection(&gateway, json)
}

fn cmd_rm(
    args: IdArgs,
    project_dir: Option<&str>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut gateway = open_gateway(project_dir)?;
    let id = gateway.resolve(&args.id)?;
    gateway.remove_requested(&id)?;
    print_collection(&gateway, json)
}
