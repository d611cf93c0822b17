//! spam-server: web page and JSON API for checking messages
//!
//! Usage: `spam-server [config.toml]`

use spam_server::{build_classifier, logging, ApiServer, Config};
use std::path::PathBuf;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = Config::load(config_path.as_deref())?;

    logging::init(&config.logging)?;

    info!("Starting spam-server v{}", env!("CARGO_PKG_VERSION"));
    if let Some(path) = &config_path {
        info!("Loaded configuration from {}", path.display());
    }

    // Resources and artifacts load once; failure here stops the process
    let classifier = build_classifier(&config)?;

    let server = ApiServer::new(classifier, config.listen_addr());
    info!("🌐 Open http://{} in a browser", config.listen_addr());
    server.run().await?;

    Ok(())
}
