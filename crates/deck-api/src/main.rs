use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use deck_api::{AppState, router};
use deck_config::DeckConfig;
use deck_db::DeckDb;

#[derive(Debug, Parser)]
#[command(name = "deckd", about = "Task board API server")]
struct Args {
    /// Listen address (overrides server.listen from config).
    #[arg(long)]
    listen: Option<String>,

    /// Database path (overrides database.path from config).
    #[arg(long)]
    db: Option<String>,

    /// Only log errors.
    #[arg(short, long)]
    quiet: bool,

    /// Debug logging.
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("deckd error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.quiet, args.verbose)?;

    let config = DeckConfig::load_with_dotenv().context("failed to load configuration")?;

    let db_path = args.db.unwrap_or_else(|| config.database.path.clone());
    let db = DeckDb::open_local(&db_path)
        .await
        .with_context(|| format!("failed to open database at '{db_path}'"))?;

    let mut server = config.server;
    if let Some(listen) = args.listen {
        server.listen = listen;
    }
    let addr = server
        .socket_addr()
        .context("invalid server listen address")?;

    let state = AppState::new(Arc::new(db), config.auth);
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("bind server listener failed")?;
    tracing::info!(%addr, "deckd listening");
    axum::serve(listener, app)
        .await
        .context("server terminated with error")
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "info"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("TASKDECK_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
