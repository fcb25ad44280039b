use status_bot::config::{self, BotConfig, Credentials, Settings};
use status_bot::logging;
use status_bot::monitor::Poller;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let log_dir = config::log_dir_from_env();

    // Keep the guard alive so the file writer flushes on exit
    let _log_guard = logging::init_logging(&log_dir)?;

    if let Err(e) = logging::cleanup_old_logs(&log_dir, logging::LOG_RETENTION_DAYS).await {
        warn!(error = %e, "Failed to cleanup old logs");
    }

    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            error!(fatal = true, error = %e, "Invalid settings, refusing to start");
            return Err(e.into());
        }
    };

    let credentials = match Credentials::from_env() {
        Ok(credentials) => credentials,
        Err(e) => {
            error!(fatal = true, error = %e, "Required credentials are missing, refusing to start");
            return Err(e.into());
        }
    };

    let config = BotConfig::new(credentials, settings);
    let poller = Poller::from_config(&config)?;

    info!(
        endpoint = %config.settings.endpoint,
        version = env!("CARGO_PKG_VERSION"),
        "status-bot starting"
    );

    tokio::select! {
        _ = poller.run() => {}
        result = tokio::signal::ctrl_c() => {
            if let Err(e) = result {
                error!(error = %e, "Failed to listen for shutdown signal");
            }
            info!("Shutdown signal received, stopping");
        }
    }

    Ok(())
}
