//! Email notifier for alerts and resolutions

use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::SmtpConfig;

fn alert_subject(site: &str) -> String {
    format!("ALERT: Monitor Service Notification for {}", site)
}

fn alert_body(site: &str, status: i32) -> String {
    format!(
        "You are being notified that {} is experiencing a {} status!",
        site, status
    )
}

fn resolved_subject(site: &str) -> String {
    format!("RESOLVED: Monitor Service Notification for {}", site)
}

fn resolved_body(site: &str) -> String {
    format!(
        "You are being notified that {} is responding as expected again!",
        site
    )
}

/// Sends alert and resolution emails over SMTP.
///
/// Every send opens a fresh TLS connection, authenticates, delivers and
/// drops the transport; connections are never pooled, so a failed send
/// leaks nothing into the next attempt.
pub struct EmailNotifier {
    config: SmtpConfig,
}

impl EmailNotifier {
    pub fn new(config: SmtpConfig) -> Self {
        Self { config }
    }

    /// Send an alert email for `site` carrying the observed status code.
    /// Returns `true` only on confirmed delivery.
    pub async fn send_alert(&self, site: &str, status: i32) -> bool {
        self.send(alert_subject(site), alert_body(site, status)).await
    }

    /// Send a recovery notice for `site`. Returns `true` only on confirmed
    /// delivery.
    pub async fn send_resolution(&self, site: &str) -> bool {
        self.send(resolved_subject(site), resolved_body(site)).await
    }

    async fn send(&self, subject: String, body: String) -> bool {
        match self.try_send(subject, body).await {
            Ok(()) => {
                tracing::info!("Successfully sent email");
                true
            }
            Err(e) => {
                tracing::error!(
                    host = %self.config.host,
                    port = self.config.port,
                    error = %e,
                    "Error sending email"
                );
                false
            }
        }
    }

    async fn try_send(&self, subject: String, body: String) -> Result<(), NotifyError> {
        let message = self.build_message(subject, body)?;

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::relay(&self.config.host)?
            .port(self.config.port)
            .credentials(Credentials::new(
                self.config.user.clone(),
                self.config.password.clone(),
            ))
            .build();

        mailer.send(message).await?;
        Ok(())
    }

    /// Build a plain-text message with From, To, Subject and Date headers.
    fn build_message(&self, subject: String, body: String) -> Result<Message, NotifyError> {
        let from: Mailbox = self.config.sender.parse()?;

        let mut builder = Message::builder().from(from).subject(subject).date_now();
        for recipient in &self.config.recipients {
            let to: Mailbox = recipient.parse()?;
            builder = builder.to(to);
        }

        let message = builder.header(ContentType::TEXT_PLAIN).body(body)?;
        Ok(message)
    }
}

/// Notification errors
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("Invalid email address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("Failed to build message: {0}")]
    Build(#[from] lettre::error::Error),

    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}
