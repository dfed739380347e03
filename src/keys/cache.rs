//! Single-flight key cache.

use super::{KeyFetcher, PublicKey, PublicKeyProvider};
use crate::config::VerificationConfig;
use crate::error::{PixwayError, Result};
use async_trait::async_trait;
use std::time::Duration;
use tokio::sync::RwLock;

const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(3);

/// Caching [`PublicKeyProvider`] backed by a [`KeyFetcher`]
///
/// The key is fetched lazily on the first `get_key` call and then cached
/// for the process lifetime. `invalidate` drops it wholesale; the next
/// caller refetches. Readers never observe a partially written key, and a
/// burst of concurrent cold-cache callers performs exactly one underlying
/// fetch: misses funnel through the write lock and re-check the slot before
/// fetching.
///
/// The fetch itself is bounded by a timeout shorter than the ~5 second
/// window the remote service allows for synchronous callback replies, so a
/// slow key endpoint fails fast as `KeyUnavailable` instead of eating the
/// caller's reply budget.
pub struct CachedKeyProvider<F: KeyFetcher> {
    fetcher: F,
    fetch_timeout: Duration,
    cached: RwLock<Option<PublicKey>>,
}

impl<F: KeyFetcher> CachedKeyProvider<F> {
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            cached: RwLock::new(None),
        }
    }

    pub fn from_config(fetcher: F, config: &VerificationConfig) -> Self {
        Self::new(fetcher).with_fetch_timeout(config.fetch_timeout())
    }

    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    async fn fetch_fresh(&self) -> Result<PublicKey> {
        let material = tokio::time::timeout(self.fetch_timeout, self.fetcher.fetch_key())
            .await
            .map_err(|_| {
                PixwayError::key_unavailable(format!(
                    "key fetch timed out after {:?}",
                    self.fetch_timeout
                ))
            })??;
        PublicKey::from_pem(&material)
    }
}

#[async_trait]
impl<F: KeyFetcher> PublicKeyProvider for CachedKeyProvider<F> {
    async fn get_key(&self) -> Result<PublicKey> {
        if let Some(key) = self.cached.read().await.as_ref() {
            return Ok(key.clone());
        }

        // Miss: everyone queues on the write lock and re-checks the slot,
        // so only the first caller actually hits the key endpoint.
        let mut slot = self.cached.write().await;
        if let Some(key) = slot.as_ref() {
            return Ok(key.clone());
        }

        let key = self.fetch_fresh().await?;
        *slot = Some(key.clone());
        tracing::debug!("service public key fetched and cached");
        Ok(key)
    }

    async fn invalidate(&self) {
        let mut slot = self.cached.write().await;
        *slot = None;
        tracing::debug!("cached service public key invalidated");
    }
}
