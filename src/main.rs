use anyhow::Context;
use clap::Parser;
use laneboard::{api, ClientStore, SqliteStore};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "laneboard", about = "Kanban-style client board service", version)]
struct Cli {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:8620")]
    bind: String,

    /// Path to the SQLite database file
    #[arg(long, default_value = "laneboard.db")]
    database: PathBuf,

    /// Insert demo clients when the database is empty
    #[arg(long)]
    seed: bool,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let default_filter = match verbose {
        0 => "laneboard=info",
        1 => "laneboard=debug",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let store = SqliteStore::open(&cli.database)
        .with_context(|| format!("opening database {}", cli.database.display()))?;
    store.initialize().await.context("initializing schema")?;

    let store = Arc::new(store);
    if cli.seed {
        let seeded = store.seed_demo().await.context("seeding demo clients")?;
        if seeded == 0 {
            tracing::info!("database already has clients, seed skipped");
        }
    }

    let app = api::router(store);
    let listener = tokio::net::TcpListener::bind(&cli.bind)
        .await
        .with_context(|| format!("binding {}", cli.bind))?;
    tracing::info!(addr = %cli.bind, database = %cli.database.display(), "laneboard listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("laneboard stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        return;
    }
    tracing::info!("shutdown signal received");
}
