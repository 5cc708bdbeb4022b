use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::{web, App, HttpServer};
use tracing_subscriber::EnvFilter;

use tiny_dpo_pay::config::AppConfig;
use tiny_dpo_pay::dpo::{dpo_checkout, DpoClient};
use tiny_dpo_pay::utils;

/// The main entry point for the application.
///
/// Loads the env file named by the first command-line argument (default
/// `.env`), builds the DPO client from it and serves the DPO endpoints behind
/// a rate limiter.
///
/// # Returns
///
/// A `std::io::Result<()>`: an error means the configuration could not be
/// loaded or the server could not bind its port.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // 👇 Load env file from args
    if let Some(path) = std::env::args().nth(1) {
        std::env::set_var("DPO_ENV_FILE", path);
    }
    let env_file = utils::ensure_dotenv_loaded();
    tracing::info!("📦 Loading environment from {env_file}");

    let config = AppConfig::load().map_err(|e| {
        tracing::error!("🚨 Configuration failed: {e}");
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
    })?;
    tracing::info!(dpo = ?config.dpo_config, "DPO configuration loaded");

    let client = DpoClient::new(config.dpo_config.clone());

    tracing::info!("🚀 Server starting on http://127.0.0.1:{}", config.server_port);
    tracing::info!(
        "🔗 Test: http://127.0.0.1:{}/api/dpo/payment-url?token=TEST",
        config.server_port
    );

    let governor_conf = GovernorConfigBuilder::default()
        .burst_size(config.governor_burst)
        .seconds_per_request(config.governor_per_second)
        .finish()
        .ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "GOVERNOR_BURST and GOVERNOR_PER_SECOND must be non-zero",
            )
        })?;

    HttpServer::new(move || {
        App::new()
            .wrap(Governor::new(&governor_conf))
            .app_data(web::Data::new(client.clone()))
            .configure(dpo_checkout::configure)
    })
    .bind(("127.0.0.1", config.server_port))?
    .run()
    .await
}
