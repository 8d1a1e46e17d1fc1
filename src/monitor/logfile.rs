//! Append-only status log

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use chrono::Local;

/// Timestamp layout for log lines, e.g. `Thu Aug 27 2026 14:03:09`
const TIMESTAMP_FORMAT: &str = "%a %b %d %Y %H:%M:%S";

/// Appends one line per failure observation to the monitor log.
///
/// The file is opened per write, so a log rotated or deleted underneath the
/// monitor picks up cleanly on the next event. Write errors are logged and
/// swallowed; the log must never take the monitor down.
pub struct StatusLog {
    path: PathBuf,
}

impl StatusLog {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Record one status event as `(<timestamp>) <site> STATUS: <code>`.
    pub fn record(&self, site: &str, status: i32) {
        let line = format!(
            "({}) {} STATUS: {}\n",
            Local::now().format(TIMESTAMP_FORMAT),
            site,
            status
        );

        if let Err(e) = self.append(&line) {
            tracing::warn!(
                path = %self.path.display(),
                error = %e,
                "Failed to write status log"
            );
        }
    }

    fn append(&self, line: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())
    }
}
