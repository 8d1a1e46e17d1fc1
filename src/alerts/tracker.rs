//! Per-site alert state tracking

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;

use crate::probe::Classification;

/// Mutable per-site state, owned exclusively by the tracker
#[derive(Debug, Clone, Default)]
pub struct SiteState {
    /// Failures observed since the last success
    pub consecutive_failures: u32,
    /// Time of the last alert email that was actually delivered. `None`
    /// until the first delivery, so the first alert of an episode is never
    /// suppressed by the cooldown.
    pub last_alert_time: Option<DateTime<Utc>>,
}

/// What the scheduler should do after one observation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Nothing to send
    None,
    /// Send an alert email carrying the observed status code
    SendAlert(i32),
    /// Send a recovery notice for a site that was alerting
    SendResolution,
}

/// Tracks consecutive failures per site and gates alert emails behind the
/// failure threshold and the resend cooldown.
pub struct AlertTracker {
    /// Site → state table
    states: RwLock<HashMap<String, SiteState>>,
    /// Consecutive failures required before the first alert
    threshold: u32,
    /// Minimum seconds between two alert emails for one site
    email_interval_secs: i64,
}

impl AlertTracker {
    pub fn new(threshold: u32, email_interval_secs: i64) -> Self {
        Self {
            states: RwLock::new(HashMap::new()),
            threshold,
            email_interval_secs,
        }
    }

    /// Initialize state for a site. Idempotent; an already registered site
    /// keeps its state.
    pub fn register(&self, site: &str) {
        let mut states = self.states.write();
        states.entry(site.to_string()).or_default();
    }

    /// Consume one probe classification and decide what to send.
    ///
    /// Only `consecutive_failures` is mutated here. `last_alert_time` is
    /// advanced separately via [`mark_alert_sent`](Self::mark_alert_sent)
    /// once delivery is confirmed, so a failed send never starts a cooldown
    /// period and the next failing cycle retries immediately.
    pub fn observe(
        &self,
        site: &str,
        classification: &Classification,
        now: DateTime<Utc>,
    ) -> Action {
        let mut states = self.states.write();
        let state = states.entry(site.to_string()).or_default();

        if !classification.is_failure() {
            // A success ends the episode; notify once if it was alerting.
            let was_alerting = state.consecutive_failures >= self.threshold;
            state.consecutive_failures = 0;
            return if was_alerting {
                Action::SendResolution
            } else {
                Action::None
            };
        }

        state.consecutive_failures += 1;

        let cooldown_elapsed = match state.last_alert_time {
            None => true,
            Some(last) => {
                now.signed_duration_since(last) > Duration::seconds(self.email_interval_secs)
            }
        };

        if state.consecutive_failures >= self.threshold && cooldown_elapsed {
            Action::SendAlert(classification.status_code())
        } else {
            Action::None
        }
    }

    /// Record a confirmed alert delivery, starting the cooldown clock.
    /// Resolution sends gate no state and are never recorded here.
    pub fn mark_alert_sent(&self, site: &str, now: DateTime<Utc>) {
        let mut states = self.states.write();
        if let Some(state) = states.get_mut(site) {
            state.last_alert_time = Some(now);
        }
    }

    /// Snapshot of one site's state
    pub fn get(&self, site: &str) -> Option<SiteState> {
        let states = self.states.read();
        states.get(site).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SITE: &str = "http://example.com";

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, 0).unwrap()
    }

    fn tracker_with_threshold_2() -> AlertTracker {
        let tracker = AlertTracker::new(2, 1800);
        tracker.register(SITE);
        tracker
    }

    #[test]
    fn test_failures_count_up_and_reset_on_success() {
        let tracker = AlertTracker::new(5, 1800);
        tracker.register(SITE);

        for n in 1..=4 {
            tracker.observe(SITE, &Classification::Failure(500), at(n));
            assert_eq!(tracker.get(SITE).unwrap().consecutive_failures, n as u32);
        }

        tracker.observe(SITE, &Classification::Success, at(5));
        assert_eq!(tracker.get(SITE).unwrap().consecutive_failures, 0);
    }

    #[test]
    fn test_no_alert_below_threshold() {
        let tracker = tracker_with_threshold_2();

        let action = tracker.observe(SITE, &Classification::Failure(500), at(0));
        assert_eq!(action, Action::None);
    }

    #[test]
    fn test_alert_fires_at_threshold() {
        let tracker = tracker_with_threshold_2();

        assert_eq!(
            tracker.observe(SITE, &Classification::Failure(503), at(0)),
            Action::None
        );
        assert_eq!(
            tracker.observe(SITE, &Classification::Failure(503), at(60)),
            Action::SendAlert(503)
        );
    }

    #[test]
    fn test_network_error_counts_like_http_failure() {
        let tracker = tracker_with_threshold_2();

        tracker.observe(SITE, &Classification::NetworkError, at(0));
        let action = tracker.observe(SITE, &Classification::NetworkError, at(60));
        assert_eq!(action, Action::SendAlert(-1));
    }

    #[test]
    fn test_cooldown_suppresses_and_then_releases() {
        let tracker = tracker_with_threshold_2();

        tracker.observe(SITE, &Classification::Failure(500), at(0));
        let action = tracker.observe(SITE, &Classification::Failure(500), at(60));
        assert_eq!(action, Action::SendAlert(500));
        tracker.mark_alert_sent(SITE, at(60));

        // Still failing 1000 seconds after the alert: inside the cooldown.
        let action = tracker.observe(SITE, &Classification::Failure(500), at(60 + 1000));
        assert_eq!(action, Action::None);

        // 1801 seconds after the alert: cooldown elapsed, alert again.
        let action = tracker.observe(SITE, &Classification::Failure(500), at(60 + 1801));
        assert_eq!(action, Action::SendAlert(500));
    }

    #[test]
    fn test_cooldown_boundary_is_strict() {
        let tracker = tracker_with_threshold_2();

        tracker.observe(SITE, &Classification::Failure(500), at(0));
        tracker.observe(SITE, &Classification::Failure(500), at(10));
        tracker.mark_alert_sent(SITE, at(10));

        // Exactly EMAIL_INTERVAL seconds later is not yet "more than".
        let action = tracker.observe(SITE, &Classification::Failure(500), at(10 + 1800));
        assert_eq!(action, Action::None);
    }

    #[test]
    fn test_resolution_sent_once_per_episode() {
        let tracker = tracker_with_threshold_2();

        tracker.observe(SITE, &Classification::Failure(500), at(0));
        tracker.observe(SITE, &Classification::Failure(500), at(60));

        let action = tracker.observe(SITE, &Classification::Success, at(120));
        assert_eq!(action, Action::SendResolution);

        let action = tracker.observe(SITE, &Classification::Success, at(180));
        assert_eq!(action, Action::None);
    }

    #[test]
    fn test_no_resolution_when_threshold_never_reached() {
        let tracker = tracker_with_threshold_2();

        tracker.observe(SITE, &Classification::Failure(500), at(0));
        let action = tracker.observe(SITE, &Classification::Success, at(60));
        assert_eq!(action, Action::None);
    }

    #[test]
    fn test_failed_send_leaves_cooldown_unarmed() {
        let tracker = tracker_with_threshold_2();

        tracker.observe(SITE, &Classification::Failure(500), at(0));
        let action = tracker.observe(SITE, &Classification::Failure(500), at(60));
        assert_eq!(action, Action::SendAlert(500));
        // Delivery failed: mark_alert_sent is not called.

        // The very next failing cycle is still alert-eligible.
        let action = tracker.observe(SITE, &Classification::Failure(500), at(120));
        assert_eq!(action, Action::SendAlert(500));
        assert!(tracker.get(SITE).unwrap().last_alert_time.is_none());
    }

    #[test]
    fn test_new_episode_respects_previous_alert_cooldown() {
        let tracker = tracker_with_threshold_2();

        tracker.observe(SITE, &Classification::Failure(500), at(0));
        tracker.observe(SITE, &Classification::Failure(500), at(10));
        tracker.mark_alert_sent(SITE, at(10));
        tracker.observe(SITE, &Classification::Success, at(20));

        // A fresh episode shortly after the last alert stays quiet until
        // the cooldown from that alert has elapsed.
        tracker.observe(SITE, &Classification::Failure(500), at(30));
        let action = tracker.observe(SITE, &Classification::Failure(500), at(40));
        assert_eq!(action, Action::None);
    }

    #[test]
    fn test_sites_are_tracked_independently() {
        let tracker = AlertTracker::new(2, 1800);
        tracker.register("http://a.example.com");
        tracker.register("http://b.example.com");

        tracker.observe("http://a.example.com", &Classification::Failure(500), at(0));
        tracker.observe("http://a.example.com", &Classification::Failure(500), at(60));

        assert_eq!(
            tracker
                .get("http://a.example.com")
                .unwrap()
                .consecutive_failures,
            2
        );
        assert_eq!(
            tracker
                .get("http://b.example.com")
                .unwrap()
                .consecutive_failures,
            0
        );
    }

    #[test]
    fn test_register_is_idempotent() {
        let tracker = tracker_with_threshold_2();

        tracker.observe(SITE, &Classification::Failure(500), at(0));
        tracker.register(SITE);
        assert_eq!(tracker.get(SITE).unwrap().consecutive_failures, 1);
    }
}
