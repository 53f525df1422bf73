//! Verihub CLI and REST API entry point.
//!
//! Binary name: `verihub`
//!
//! Parses CLI arguments, wires the module catalog and registry, then either
//! starts the HTTP server with hot reload (`serve`) or runs a one-shot scan
//! (`list`).

mod cli;
mod http;
mod state;

use clap::Parser;
use clap_complete::generate;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "info",
        1 => "info,verihub=debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    match cli.command {
        Commands::Serve {
            bind,
            modules_dir,
            config,
        } => {
            let config = cli::resolve_config(config.as_deref(), bind, modules_dir).await;
            let (state, _reload) = AppState::init(&config)?;

            let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
            tracing::info!(addr = %config.bind_addr, "verihub listening");

            let router = http::router::build_router(state);
            axum::serve(listener, router).await?;
        }

        Commands::List { modules_dir, json } => {
            cli::list::run(&modules_dir, json)?;
        }

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            generate(shell, &mut cmd, "verihub", &mut std::io::stdout());
        }
    }

    Ok(())
}
