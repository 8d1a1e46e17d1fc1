//! Alert tracking and notification
//!
//! The alerting path is split in two: the tracker decides *whether* an email
//! is due, the notifier *delivers* it. The scheduler loop wires them
//! together and reports confirmed deliveries back into the tracker.

pub mod notifier;
pub mod tracker;

pub use notifier::EmailNotifier;
pub use tracker::{Action, AlertTracker, SiteState};
