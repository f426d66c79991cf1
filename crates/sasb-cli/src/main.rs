//! SASB CLI - Command-line interface for the SASB annotation toolkit.

use clap::Parser;
use sasb_cli::commands;
use sasb_cli::{Cli, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // stdout carries command output
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

fn run() -> sasb_cli::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Load config, falling back to defaults
    let loaded = Config::load(cli.config.as_deref());
    let config = loaded.as_ref().cloned().unwrap_or_default();

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    // Create formatter
    let formatter = Formatter::new(format, color_enabled);
    if let Err(e) = &loaded {
        eprintln!("{}", formatter.warning(&format!("Ignoring unreadable config: {}", e)));
    }

    let project = cli.project.as_path();
    match cli.command {
        Command::Mine(args) => commands::execute_mine(args, project, &config, &formatter)?,
        Command::Pages(args) => commands::execute_pages(args, project, &formatter)?,
        Command::Annotate(args) => commands::execute_annotate(args, project, &formatter)?,
        Command::Show(args) => commands::execute_show(args, project, &formatter)?,
        Command::Export(args) => commands::execute_export(args, project, &formatter)?,
    }

    Ok(())
}
