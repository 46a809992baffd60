//! Cooking pot session simulator.
//!
//! Loads pot content, starts a session of participants sharing one pot and
//! plays a scripted round of cooking against it, logging every replica's
//! state along the way.
//!
//! # Examples
//!
//! ```bash
//! POT_PARTICIPANTS=4 POT_SEED=7 RUST_LOG=pot_runtime=debug cargo run -p pot-cli
//! ```

mod config;
mod session;

use anyhow::{Context, Result};
use pot_content::ContentFactory;
use pot_runtime::{Runtime, RuntimeConfig};

use crate::config::SimConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = SimConfig::from_env();
    tracing::info!(
        data_dir = %config.data_dir.display(),
        participants = config.participants,
        seed = config.seed,
        "starting cooking pot simulator"
    );

    let factory = ContentFactory::new(&config.data_dir);
    let runtime = Runtime::builder()
        .config(RuntimeConfig {
            participants: config.participants,
            seed: config.seed,
            persistence_dir: config.save_dir.clone(),
            ..RuntimeConfig::default()
        })
        .content(&factory)
        .context("failed to load pot content")?
        .build()
        .await
        .context("failed to start runtime")?;

    let outcome = session::run(&runtime).await;
    runtime.shutdown().await.context("failed to stop runtime")?;
    outcome
}
