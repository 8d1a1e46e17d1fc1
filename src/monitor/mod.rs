//! Polling scheduler loop
//!
//! Drives the fixed-interval cycle: probe every site in sequence, feed each
//! result to the tracker, dispatch whatever action comes back, then sleep.
//! Shutdown is a channel signal observed both during the sleep and between
//! individual probes within a cycle; an in-flight send is allowed to finish.

pub mod logfile;

use std::ops::ControlFlow;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::mpsc;

use crate::alerts::notifier::EmailNotifier;
use crate::alerts::tracker::{Action, AlertTracker};
use crate::monitor::logfile::StatusLog;
use crate::probe::{Classification, Prober};

/// Fixed-interval polling loop over the registered sites
pub struct Monitor {
    sites: Vec<String>,
    prober: Prober,
    tracker: Arc<AlertTracker>,
    notifier: EmailNotifier,
    status_log: StatusLog,
    poll_delay: Duration,
}

impl Monitor {
    pub fn new(
        sites: Vec<String>,
        tracker: Arc<AlertTracker>,
        notifier: EmailNotifier,
        status_log: StatusLog,
        poll_delay: Duration,
    ) -> Self {
        for site in &sites {
            tracker.register(site);
        }

        Self {
            sites,
            prober: Prober::new(),
            tracker,
            notifier,
            status_log,
            poll_delay,
        }
    }

    /// Run polling cycles until the shutdown channel fires. Returns
    /// immediately when no sites are registered.
    pub async fn run(&self, mut shutdown: mpsc::Receiver<()>) {
        if self.sites.is_empty() {
            tracing::error!("No site(s) input to monitor");
            return;
        }

        for site in &self.sites {
            tracing::info!(site = %site, "Beginning monitoring");
        }

        loop {
            if self.run_cycle(&mut shutdown).await.is_break() {
                break;
            }

            tokio::select! {
                _ = tokio::time::sleep(self.poll_delay) => {}
                _ = shutdown.recv() => {
                    tracing::info!("Monitoring canceled");
                    break;
                }
            }
        }
    }

    /// Probe every site once. Breaks when shutdown fires mid-cycle, leaving
    /// the remaining sites unprobed.
    async fn run_cycle(&self, shutdown: &mut mpsc::Receiver<()>) -> ControlFlow<()> {
        for site in &self.sites {
            let classification = tokio::select! {
                classification = self.prober.probe(site) => classification,
                _ = shutdown.recv() => {
                    tracing::info!("Monitoring canceled");
                    return ControlFlow::Break(());
                }
            };

            self.handle_observation(site, &classification).await;
        }

        ControlFlow::Continue(())
    }

    /// Feed one classification through the tracker and dispatch the result.
    async fn handle_observation(&self, site: &str, classification: &Classification) {
        if classification.is_failure() {
            tracing::warn!(
                site = %site,
                status = classification.status_code(),
                "Site check failed"
            );
            self.status_log.record(site, classification.status_code());
        } else {
            tracing::debug!(site = %site, "Site up");
        }

        match self.tracker.observe(site, classification, Utc::now()) {
            Action::None => {}
            Action::SendAlert(status) => {
                // The cooldown clock only starts on a confirmed delivery;
                // a failed send retries on the next failing cycle.
                if self.notifier.send_alert(site, status).await {
                    self.tracker.mark_alert_sent(site, Utc::now());
                }
            }
            Action::SendResolution => {
                tracing::info!(site = %site, "Current active alert resolved");
                // Best-effort: a resolution send gates no state.
                self.notifier.send_resolution(site).await;
            }
        }
    }
}
