//! CLI entry point for taskdeck.

use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rmcp::ServiceExt;
use taskdeck_app::{AppConfig, BackendKind, Backends, TaskService};
use taskdeck_store_sqlite::SqliteStore;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

mod commands;
mod http;
mod mcp;

/// Task tracker with a web front end and a tool bridge.
#[derive(Parser, Debug)]
#[command(
    name = "taskdeck",
    version,
    about = "taskdeck: tasks in SQLite behind an HTTP API, a CLI and an MCP server"
)]
struct Cli {
    /// Config file (defaults to ./taskdeck.toml when present).
    #[arg(long)]
    config: Option<PathBuf>,

    /// SQLite database file; overrides config and environment.
    #[arg(long)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the HTTP API and the static front end.
    Serve {
        /// Listen address as host:port.
        #[arg(long)]
        bind: Option<String>,
        /// Repository implementation: sqlite or memory.
        #[arg(long)]
        backend: Option<BackendKind>,
    },

    /// Start MCP server on stdio.
    Mcp,

    /// Create the database schema.
    InitDb {
        /// Also insert the demo task set.
        #[arg(long)]
        seed: bool,
    },

    /// Print tasks.
    Ls {
        #[arg(long)]
        query: Option<String>,
        #[arg(long)]
        only_incomplete: bool,
    },
}

fn main() -> Result<()> {
    let Cli { config, db, cmd } = Cli::parse();
    install_tracing();

    let config = resolve_config(config.as_deref(), db, &cmd)?;
    execute_command(&config, cmd)
}

/// File, then environment, then command-line flags.
fn resolve_config(path: Option<&Path>, db: Option<PathBuf>, cmd: &Command) -> Result<AppConfig> {
    let mut config = AppConfig::load(path)?;
    config.apply_env()?;
    if let Some(db) = db {
        config.storage.path = db;
    }
    if let Command::Serve { bind, backend } = cmd {
        if let Some(bind) = bind {
            config.server.bind.clone_from(bind);
        }
        if let Some(backend) = backend {
            config.storage.backend = *backend;
        }
    }
    config.validate()?;
    Ok(config)
}

fn execute_command(config: &AppConfig, command: Command) -> Result<()> {
    match command {
        Command::Serve { .. } => {
            let backends = Backends::open(&config.storage)?;
            actix_web::rt::System::new().block_on(http::serve(&config.server, backends))
        }

        Command::Mcp => {
            if config.storage.backend == BackendKind::Memory {
                warn!("MCP server always uses SQLite; ignoring storage.backend = memory");
            }
            let store = SqliteStore::open(&config.storage.path)
                .with_context(|| format!("failed to open database {}", config.storage.path.display()))?;
            info!(db = %store.path().display(), "Starting MCP server on stdio");
            let server = mcp::TaskdeckServer::new(store);
            tokio::runtime::Runtime::new()?
                .block_on(async move {
                    let transport = (tokio::io::stdin(), tokio::io::stdout());
                    let server = server
                        .serve(transport)
                        .await
                        .map_err(|e| anyhow::anyhow!("{e:?}"))?;
                    server.waiting().await.map_err(|e| anyhow::anyhow!("{e:?}"))
                })
                .map(|_| ())
        }

        Command::InitDb { seed } => commands::init_db(&config.storage.path, seed, &mut io::stdout().lock()),

        Command::Ls { query, only_incomplete } => {
            let backends = Backends::open(&config.storage)?;
            let service = TaskService::new(backends.tasks);
            tokio::runtime::Runtime::new()?.block_on(commands::ls(
                &service,
                query.as_deref(),
                only_incomplete,
                &mut io::stdout().lock(),
            ))
        }
    }
}

fn install_tracing() {
    // RUST_LOG is honored; INFO by default. Always stderr so MCP keeps stdout.
    let filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .with_span_events(FmtSpan::NONE)
        .compact()
        .try_init();
}
