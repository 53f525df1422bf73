//! CLI argument definitions and config resolution.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use clap_complete::Shell;

use verihub_infra::config::{load_config, ServiceConfig};

pub mod list;

#[derive(Parser)]
#[command(
    name = "verihub",
    about = "Hot-reloading registry and dispatcher for verification modules",
    version
)]
pub struct Cli {
    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server with hot module reload
    Serve {
        /// Bind address, e.g. 0.0.0.0:8085 (overrides config.toml)
        #[arg(long)]
        bind: Option<String>,

        /// Module root directory (overrides config.toml)
        #[arg(long)]
        modules_dir: Option<PathBuf>,

        /// Path to config.toml
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Scan the module tree once and print what would be registered
    List {
        /// Module root directory
        #[arg(long, default_value = "modules")]
        modules_dir: PathBuf,

        /// Print the listing as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Load `config.toml` and apply CLI flag overrides on top.
pub async fn resolve_config(
    config_path: Option<&Path>,
    bind: Option<String>,
    modules_dir: Option<PathBuf>,
) -> ServiceConfig {
    let mut config = load_config(config_path.unwrap_or(Path::new("config.toml"))).await;
    if let Some(bind) = bind {
        config.bind_addr = bind;
    }
    if let Some(dir) = modules_dir {
        config.modules_dir = dir;
    }
    config
}
