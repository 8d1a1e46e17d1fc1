//! Upwatch: HTTP(S) Uptime Monitor with Email Alerts
//!
//! A long-running monitor that polls a set of sites at a fixed interval,
//! tracks consecutive failures per site, and emails an alert when a site
//! crosses the failure threshold (and a recovery notice when it comes back).
//!
//! # Features
//!
//! - **Three-way probe classification**: success (HTTP 200), HTTP failure
//!   with the real status code, or network error (DNS, connect, TLS, timeout)
//! - **Consecutive-failure threshold**: alerts fire only after a configurable
//!   number of failures in a row, so one flaky response stays quiet
//! - **Alert cooldown**: at most one alert email per resend interval per
//!   site, so a long outage does not flood the recipients
//! - **Resolution notices**: one email when an alerting site recovers
//! - **Append-only status log**: every failure observation is written to
//!   `monitor.log` in the data folder
//!
//! # Example
//!
//! ```no_run
//! use upwatch::alerts::tracker::{Action, AlertTracker};
//! use upwatch::probe::Classification;
//!
//! // Alert after 2 consecutive failures, resend at most every 1800 seconds
//! let tracker = AlertTracker::new(2, 1800);
//! tracker.register("http://example.com");
//!
//! let now = chrono::Utc::now();
//! tracker.observe("http://example.com", &Classification::Failure(503), now);
//! let action = tracker.observe("http://example.com", &Classification::Failure(503), now);
//! assert_eq!(action, Action::SendAlert(503));
//! ```

pub mod alerts;
pub mod config;
pub mod monitor;
pub mod probe;
pub mod registry;

// Re-export commonly used types
pub use alerts::notifier::{EmailNotifier, NotifyError};
pub use alerts::tracker::{Action, AlertTracker, SiteState};
pub use config::{MonitorConfig, SmtpConfig};
pub use monitor::Monitor;
pub use probe::{Classification, Prober};
