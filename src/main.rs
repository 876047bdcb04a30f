//! greengrocer — produce inventory REST API.

use std::sync::Arc;

use greengrocer::{http, Config, FileStore, ProduceService};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::load()?;
    info!(storage_dir = %config.storage_dir.display(), "starting greengrocer");

    let store = Arc::new(FileStore::new(config.storage_dir.clone()));
    let service = Arc::new(ProduceService::with_store(store));

    http::serve(service, &config.listen_addr).await?;
    Ok(())
}
