use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the verification core
///
/// The only tunable is the key-fetch timeout. The remote service expects a
/// reply to synchronous callbacks within roughly five seconds, so the
/// default keeps the single outbound key fetch well inside that window: a
/// slow key endpoint surfaces as a fast `KeyUnavailable` failure instead of
/// silently blowing the reply budget.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VerificationConfig {
    /// Timeout for a single outbound key fetch, in seconds (default: 3)
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,
}

impl VerificationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fetch_timeout_secs(mut self, secs: u64) -> Self {
        self.fetch_timeout_secs = secs;
        self
    }

    /// The key-fetch timeout as a `Duration`
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            fetch_timeout_secs: default_fetch_timeout_secs(),
        }
    }
}

fn default_fetch_timeout_secs() -> u64 {
    3
}
