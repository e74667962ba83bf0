use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "xtbctl")]
#[command(about = "Locate, load and inspect native xtb framework modules", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new config file
    Init {
        /// Path for new config file
        #[arg(default_value = "xtbctl.toml")]
        path: PathBuf,
    },
    /// Show where a module artifact would be searched for, without loading it
    Locate {
        /// Module name (defaults to the configured one)
        #[arg(long)]
        name: Option<String>,
        /// Print a JSON report
        #[arg(long)]
        json: bool,
    },
    /// Find and register a module, then list what it provides
    Load {
        /// Module name (defaults to the configured one)
        #[arg(long)]
        name: Option<String>,
        /// Print a JSON report
        #[arg(long)]
        json: bool,
    },
    /// Load a single module artifact and list what it provides
    Inspect {
        /// Path to the shared library
        path: PathBuf,
        /// Print a JSON report
        #[arg(long)]
        json: bool,
    },
}
