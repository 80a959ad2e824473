use clap::Parser;
use checklist::cli::commands::Cli;
use checklist::cli::handlers;

fn main() {
    let cli = Cli::parse();

    if cli.command.is_none() {
        // No subcommand → launch TUI
        if let Err(e) = checklist::tui::run(cli.project_dir.as_deref()) {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
        return;
    }

    if let Err(e) = handlers::dispatch(cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
