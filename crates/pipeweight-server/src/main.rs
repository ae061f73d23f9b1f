use std::path::PathBuf;

use clap::Parser;
use pipeweight_app::config::Config;
use pipeweight_app::repository::load_spec_table;
use pipeweight_server::{build_router, cors_layer, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "pipe-weight-server")]
#[command(about = "Pipe weight and price calculation endpoint")]
#[command(version)]
struct Args {
    /// Address to bind (default from config: 0.0.0.0)
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (default from config: 3001)
    #[arg(short, long)]
    port: Option<u16>,

    /// Spec table TOML replacing the built-in catalogue
    #[arg(long)]
    spec_table: Option<PathBuf>,

    /// Config file (default: ~/.config/pipe-weight/config.json)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(host) = args.host {
        config.server_host = host;
    }
    if let Some(port) = args.port {
        config.server_port = port;
    }

    let table = load_spec_table(&config, args.spec_table)?;
    tracing::info!("Loaded {} pipe specs", table.len());

    let app = build_router(AppState::new(table), cors_layer(&config)?);

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    tracing::info!("Backend running on http://localhost:{}", config.server_port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,pipeweight_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
