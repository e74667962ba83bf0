mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};

fn main() -> Result<()> {
    xtb_runtime::init_logging();

    let cli = Cli::parse();

    // Handle init command early (doesn't need config)
    if let Commands::Init { path } = &cli.command {
        return commands::init::run_init(path);
    }

    let config = xtb_runtime::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Init { .. } => unreachable!(),
        Commands::Locate { name, json } => commands::locate::execute(name, json, &config),
        Commands::Load { name, json } => commands::load::execute(name, json, &config),
        Commands::Inspect { path, json } => commands::inspect::execute(&path, json),
    }
}
