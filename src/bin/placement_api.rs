//! placement_api - HTTP placement service
//!
//! This daemon:
//! 1. Loads service configuration (LUXEPLAN_CONFIG + environment)
//! 2. Builds the placement engine with the built-in category policies
//! 3. Serves the placement API until Ctrl-C

use anyhow::Result;
use std::sync::mpsc;

use luxeplan_vision::{
    api::{ApiConfig, ApiServer},
    config::ServiceConfig,
    PlacementEngine,
};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ServiceConfig::load()?;
    let engine = PlacementEngine::new();
    log::info!(
        "placement engine ready with {} category policies",
        engine.registry().categories().len()
    );

    let api_handle = ApiServer::new(ApiConfig::from(&config), engine).spawn()?;
    log::info!("placement api listening on {}", api_handle.addr);

    let (tx, rx) = mpsc::channel();
    ctrlc::set_handler(move || {
        let _ = tx.send(());
    })
    .expect("error setting Ctrl-C handler");

    log::info!("placement_api waiting for shutdown signal (Ctrl-C)...");
    let _ = rx.recv();
    log::info!("shutdown signal received, stopping API server...");
    api_handle.stop()?;

    Ok(())
}
