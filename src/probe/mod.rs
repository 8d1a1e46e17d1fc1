//! Site prober
//!
//! One GET request per site per cycle, reduced to a three-way
//! classification. The prober never retries and never mutates shared state.

use std::time::Duration;

/// Identifying header sent with every probe
const USER_AGENT: &str = "Uptime monitor";

/// Per-request timeout so a hung site cannot stall the whole polling cycle
const PROBE_TIMEOUT_SECS: u64 = 30;

/// Outcome of a single probe attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// HTTP 200
    Success,
    /// Any other HTTP status, redirects included
    Failure(u16),
    /// Transport-level error: DNS, connection refused, TLS, timeout
    NetworkError,
}

impl Classification {
    /// Status code for alert text and log lines. Network errors render as
    /// the sentinel `-1` so they stay distinguishable from real HTTP codes.
    pub fn status_code(&self) -> i32 {
        match self {
            Classification::Success => 200,
            Classification::Failure(code) => i32::from(*code),
            Classification::NetworkError => -1,
        }
    }

    /// Whether this outcome counts toward the failure threshold
    pub fn is_failure(&self) -> bool {
        !matches!(self, Classification::Success)
    }
}

/// HTTP prober shared across all sites
pub struct Prober {
    client: reqwest::Client,
}

impl Prober {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::none())
            .timeout(Duration::from_secs(PROBE_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }

    /// Send one GET request to `site` and classify the outcome.
    ///
    /// Transport errors are logged and classified, never propagated.
    pub async fn probe(&self, site: &str) -> Classification {
        match self.client.get(site).send().await {
            Ok(response) => {
                let status = response.status().as_u16();
                if status == 200 {
                    Classification::Success
                } else {
                    Classification::Failure(status)
                }
            }
            Err(e) => {
                tracing::warn!(site = %site, error = %e, "Error pinging site");
                Classification::NetworkError
            }
        }
    }
}

impl Default for Prober {
    fn default() -> Self {
        Self::new()
    }
}
