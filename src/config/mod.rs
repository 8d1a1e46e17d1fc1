//! Environment-driven configuration
//!
//! Every setting is an optional environment variable with a default. Parsing
//! is lenient: an unset or unparsable value falls back to the default rather
//! than failing startup.

use std::path::PathBuf;

/// Monitoring knobs
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Seconds between polling cycles
    pub poll_delay_secs: u64,
    /// Minimum seconds between two alert emails for one site
    pub email_interval_secs: i64,
    /// Consecutive failures required before the first alert
    pub alert_threshold: u32,
    /// Directory holding the site-list file and the status log
    pub data_dir: PathBuf,
}

impl MonitorConfig {
    /// Load from `DELAY`, `EMAIL_INTERVAL`, `ALERT_COUNT_THRESHOLD` and
    /// `DATA_FOLDER`.
    pub fn from_env() -> Self {
        Self {
            poll_delay_secs: env_parse("DELAY", 60),
            email_interval_secs: env_parse("EMAIL_INTERVAL", 1800),
            alert_threshold: env_parse("ALERT_COUNT_THRESHOLD", 2),
            data_dir: std::env::var("DATA_FOLDER")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./")),
        }
    }

    /// Path of the site-list file
    pub fn sites_path(&self) -> PathBuf {
        self.data_dir.join("sites.txt")
    }

    /// Path of the append-only status log
    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join("monitor.log")
    }
}

/// SMTP account used to deliver alert emails
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    /// From address on outgoing mail
    pub sender: String,
    /// SMTP auth username
    pub user: String,
    /// SMTP auth password
    pub password: String,
    /// SMTP server host
    pub host: String,
    /// SMTP server port (implicit TLS)
    pub port: u16,
    /// Alert recipient addresses
    pub recipients: Vec<String>,
}

impl SmtpConfig {
    /// Load from `EMAIL_SENDER`, `SMTP_USER`, `SMTP_PASSWORD`, `SMTP_HOST`,
    /// `SMTP_PORT` and `EMAIL_RECEIVERS`.
    pub fn from_env() -> Self {
        Self {
            sender: env_or("EMAIL_SENDER", "monitor@example.com"),
            user: env_or("SMTP_USER", "exampleuser"),
            password: env_or("SMTP_PASSWORD", "examplepassword"),
            host: env_or("SMTP_HOST", "mail.example.com"),
            port: env_parse("SMTP_PORT", 465),
            recipients: parse_recipients(&env_or("EMAIL_RECEIVERS", "john.doe@gmail.com")),
        }
    }
}

/// Split a comma-separated recipient list, trimming whitespace and dropping
/// empty entries.
pub fn parse_recipients(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
