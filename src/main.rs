mod config;
mod context;
mod domain;
mod error;
mod http;
mod infra;
mod services;
mod workflow;

use std::sync::Arc;

use clap::Parser;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::context::AppContext;
use crate::error::AppResult;

#[derive(Parser)]
#[command(name = "trackgate", version, about = "HTTP gateway bridging ticket dashboards to Jira")]
struct Cli {
    /// Address to bind the listener on.
    #[arg(long, default_value = "0.0.0.0")]
    bind: String,
    /// Listener port; falls back to the PORT environment variable, then 8080.
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> AppResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();
    let port = cli
        .port
        .or_else(|| std::env::var("PORT").ok().and_then(|value| value.parse().ok()))
        .unwrap_or(8080);

    let config = AppConfig::from_env();
    if !config.has_credentials() {
        warn!("Jira credentials not fully configured; all responses will use mock data");
    }

    let context = Arc::new(AppContext::new(config));
    let app = http::build_router(context);

    let addr = format!("{}:{port}", cli.bind);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("trackgate listening on {addr}");
    axum::serve(listener, app).await?;

    Ok(())
}
