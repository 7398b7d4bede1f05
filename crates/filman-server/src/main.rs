//! # Filman Server
//!
//! Personal web front-end for filman.cc: search, browse seasons and pull
//! embedded player links, with session cookies and theme kept in a local
//! JSON preferences file.

use clap::Parser;
use filman_core::PreferencesStore;
use filman_server::{AppState, config::ServerArgs, router};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = ServerArgs::parse();
    let preferences = PreferencesStore::open(&args.settings).await?;
    let state = AppState::new(args.client_config(), preferences);

    let listener = tokio::net::TcpListener::bind(args.bind_addr()).await?;
    info!(
        addr = %listener.local_addr()?,
        site = %args.base_url,
        settings = %args.settings.display(),
        "filman server listening"
    );

    axum::serve(listener, router(state)).await?;
    Ok(())
}
