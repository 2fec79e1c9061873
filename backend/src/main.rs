use anyhow::Result;
use axum::Router;
use tracing::info;
use tracing_subscriber::EnvFilter;

use dmc_dashboard::config::{DashboardConfig, StoreKind};
use dmc_dashboard::storage::{MemoryConnection, SupabaseConnection};
use dmc_dashboard::{create_router, initialize_backend};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = DashboardConfig::load()?;

    let app: Router = match config.store {
        StoreKind::Supabase => {
            let (url, anon_key) = config.supabase_credentials()?;
            info!("Using Supabase store at {}", url);
            let connection = SupabaseConnection::new(url, anon_key)?;
            create_router(initialize_backend(connection, &config), &config)?
        }
        StoreKind::Memory => {
            info!("Using in-memory store; data is lost on shutdown");
            create_router(initialize_backend(MemoryConnection::new(), &config), &config)?
        }
    };

    info!("Starting server on {}", config.bind_address);
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
