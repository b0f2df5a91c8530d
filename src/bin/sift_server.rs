//! Research form server.
//!
//! Usage: `sift-server [CONFIG_PATH]`
//!
//! Reads `BING_API_KEY` and `GEMINI_API_KEY` from the environment (optionally
//! on top of a TOML config file), serves the research form, and runs until
//! Ctrl-C. Tracing output goes to stderr; set `RUST_LOG` to adjust.

use std::path::PathBuf;
use std::sync::Arc;

use sift::{LiveResearcher, ResearchConfig, ResearchServer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config_path = std::env::args_os().nth(1).map(PathBuf::from);

    let config = ResearchConfig::load(config_path.as_deref()).map_err(|e| {
        tracing::error!(error = %e, "configuration rejected");
        anyhow::anyhow!("sift-server cannot start: {e}")
    })?;

    let researcher = LiveResearcher::from_config(&config)?;
    let server = ResearchServer::start(Arc::new(researcher), &config.server).await?;

    tracing::info!(url = %server.url(), "sift-server ready");

    tokio::signal::ctrl_c().await?;

    server.shutdown();
    tracing::info!("sift-server shut down cleanly");
    Ok(())
}
