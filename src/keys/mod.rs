//! Public-key retrieval and caching.
//!
//! The remote service signs every callback with its secp256k1 key and
//! publishes the verifying half at a key-distribution endpoint. This module
//! owns the narrow seam to that endpoint ([`KeyFetcher`]), the parsed key
//! itself ([`PublicKey`]), and the caching policy ([`CachedKeyProvider`]):
//! fetch lazily, cache for the process lifetime, drop wholesale when a
//! verification failure suggests the service rotated its key.

pub mod cache;

pub use cache::CachedKeyProvider;

use crate::error::{PixwayError, Result};
use async_trait::async_trait;
use k256::ecdsa::signature::DigestVerifier;
use k256::ecdsa::{Signature, VerifyingKey};
use k256::pkcs8::DecodePublicKey;
use sha2::{Digest, Sha256};

/// A secp256k1 public verification key belonging to the remote service
///
/// Immutable once parsed. There is no key identifier on the wire; a key is
/// implicitly "current" while cached and "stale" once invalidated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicKey {
    key: VerifyingKey,
}

impl PublicKey {
    /// Parse key material as served by the key-distribution endpoint
    /// (PEM-encoded SPKI text).
    pub fn from_pem(material: &[u8]) -> Result<Self> {
        let pem = std::str::from_utf8(material)
            .map_err(|_| PixwayError::key_unavailable("key material is not valid UTF-8"))?;
        let key = VerifyingKey::from_public_key_pem(pem).map_err(|e| {
            PixwayError::key_unavailable(format!("key material is not a valid public key: {e}"))
        })?;
        Ok(Self { key })
    }

    /// Check an ECDSA (r, s) signature over the SHA-256 digest of `content`.
    ///
    /// The signed payload is exactly the bytes received; no canonicalization
    /// is applied before hashing.
    pub fn verify_content(&self, content: &[u8], signature: &Signature) -> bool {
        self.key
            .verify_digest(Sha256::new_with_prefix(content), signature)
            .is_ok()
    }
}

/// The out-of-scope HTTP collaborator that retrieves key material
///
/// Implementations perform one signed GET against the remote service's
/// key-distribution endpoint and return the body verbatim. Retry/backoff
/// for that request is the implementation's business; the cache layer above
/// never retries a failed fetch on its own.
#[async_trait]
pub trait KeyFetcher: Send + Sync {
    /// Fetch the current key material as raw bytes
    async fn fetch_key(&self) -> Result<Vec<u8>>;
}

/// Source of the service's current verification key
///
/// Injectable so tests can substitute a fake or spy provider; production
/// code uses [`CachedKeyProvider`].
#[async_trait]
pub trait PublicKeyProvider: Send + Sync {
    /// Return the current key, fetching it on first call
    ///
    /// Fails with `KeyUnavailable` if the fetch fails or the material does
    /// not parse.
    async fn get_key(&self) -> Result<PublicKey>;

    /// Drop the cached key so the next `get_key` forces a refetch
    ///
    /// Called only after a failed verification, to tolerate key rotation on
    /// the remote side.
    async fn invalidate(&self);
}
