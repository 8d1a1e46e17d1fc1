//! Site registry
//!
//! Resolves the set of monitored sites once at startup from CLI arguments
//! plus an optional site-list file, normalizes the scheme, and drops exact
//! duplicates.

use std::collections::HashSet;
use std::path::Path;

/// Resolve the set of sites to monitor.
///
/// `cli_args` are taken as-is; `sites_file` contributes one entry per
/// non-blank line, trimmed. A missing file is not an error and contributes
/// nothing. Entries without an `http://` or `https://` prefix get `http://`
/// prepended, then exact string duplicates are dropped. No further
/// canonicalization is applied: `http://x.com` and `http://x.com/` remain
/// distinct sites.
pub fn resolve(cli_args: impl IntoIterator<Item = String>, sites_file: &Path) -> Vec<String> {
    let mut entries: Vec<String> = cli_args.into_iter().collect();

    match std::fs::read_to_string(sites_file) {
        Ok(contents) => {
            entries.extend(
                contents
                    .lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty())
                    .map(String::from),
            );
        }
        Err(e) => {
            tracing::warn!(
                path = %sites_file.display(),
                error = %e,
                "No site-list file found"
            );
        }
    }

    let sites: HashSet<String> = entries.into_iter().map(normalize).collect();
    sites.into_iter().collect()
}

/// Prefix `http://` when the entry names no scheme.
fn normalize(entry: String) -> String {
    if entry.starts_with("http://") || entry.starts_with("https://") {
        entry
    } else {
        format!("http://{}", entry)
    }
}
