//! Upwatch uptime monitor
//!
//! Run with: cargo run -- [site ...]
//!
//! Positional arguments are extra sites appended to those read from
//! `sites.txt` in the data folder.
//!
//! Environment variables:
//! - DELAY: Seconds between polling cycles (default: 60)
//! - EMAIL_INTERVAL: Seconds between alert emails per site (default: 1800)
//! - ALERT_COUNT_THRESHOLD: Consecutive failures before alerting (default: 2)
//! - DATA_FOLDER: Directory for sites.txt and monitor.log (default: ./)
//! - EMAIL_SENDER: From address for alert mail (default: monitor@example.com)
//! - SMTP_USER / SMTP_PASSWORD: SMTP account credentials
//! - SMTP_HOST / SMTP_PORT: SMTP server, implicit TLS (default port: 465)
//! - EMAIL_RECEIVERS: Comma-separated alert recipients
//! - RUST_LOG: Log level (default: info)

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use upwatch::alerts::notifier::EmailNotifier;
use upwatch::alerts::tracker::AlertTracker;
use upwatch::config::{MonitorConfig, SmtpConfig};
use upwatch::monitor::logfile::StatusLog;
use upwatch::monitor::Monitor;
use upwatch::registry;

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "upwatch=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = MonitorConfig::from_env();
    let smtp = SmtpConfig::from_env();

    tracing::info!("Upwatch configuration:");
    tracing::info!("  Poll delay: {} seconds", config.poll_delay_secs);
    tracing::info!(
        "  Alert threshold: {} consecutive failures",
        config.alert_threshold
    );
    tracing::info!(
        "  Email resend interval: {} seconds",
        config.email_interval_secs
    );
    tracing::info!("  Data folder: {}", config.data_dir.display());
    tracing::info!("  SMTP server: {}:{}", smtp.host, smtp.port);
    tracing::info!("  Alert recipients: {}", smtp.recipients.len());

    let sites = registry::resolve(std::env::args().skip(1), &config.sites_path());
    if sites.is_empty() {
        tracing::error!("No site(s) input to monitor");
        return;
    }

    let tracker = Arc::new(AlertTracker::new(
        config.alert_threshold,
        config.email_interval_secs,
    ));
    let monitor = Monitor::new(
        sites,
        tracker,
        EmailNotifier::new(smtp),
        StatusLog::new(config.log_path()),
        Duration::from_secs(config.poll_delay_secs),
    );

    let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>(1);
    tokio::spawn(async move {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install CTRL+C signal handler");
        tracing::info!("Shutdown signal received, stopping monitor...");
        let _ = shutdown_tx.send(()).await;
    });

    monitor.run(shutdown_rx).await;

    tracing::info!("Upwatch stopped");
}
