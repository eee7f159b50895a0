//! Nimbus server entrypoint.

use clap::Parser;
use nimbus_api::routes::create_router;
use nimbus_api::state::AppState;
use nimbus_blob::HttpBlobStore;
use nimbus_core::config::ServiceConfig;
use nimbus_upstream::ForecastClient;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "nimbusd")]
#[command(author, version, about = "Scheduled forecast snapshot cache", long_about = None)]
struct Cli {
    /// Address to bind the HTTP server to.
    #[arg(long, default_value = "0.0.0.0:8080")]
    bind: SocketAddr,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = ServiceConfig::load()?;

    let source = ForecastClient::new(&config.upstream)?;
    let store = HttpBlobStore::new(&config.store);
    let state = AppState::new(config, Arc::new(source), Arc::new(store));
    let router = create_router(Arc::new(state));

    let listener = tokio::net::TcpListener::bind(cli.bind).await?;
    info!(addr = %cli.bind, "nimbusd listening");
    axum::serve(listener, router).await?;

    Ok(())
}
