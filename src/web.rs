#![cfg(not(tarpaulin_include))]

use brd_viewer::app;
use brd_viewer::config::Config;

/// Main entry point for the BRD viewer web service
///
/// Reads settings from the environment (see [`Config::load`]) and serves the
/// viewer API until the process is stopped.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::load();
    log::info!(
        "Starting BRD viewer on {} (static files from {})",
        config.bind_addr,
        config.static_dir
    );
    app::run(config).await
}
