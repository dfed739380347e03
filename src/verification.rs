//! Digital-signature verification for inbound callbacks.
//!
//! Every callback from the remote service carries a `Digital-Signature`
//! header: a base64, DER-encoded secp256k1 ECDSA signature over the raw
//! request body. Nothing in the body may be trusted until that signature
//! checks out against the service's published key.

use crate::error::{PixwayError, Result};
use crate::keys::PublicKeyProvider;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use k256::ecdsa::Signature;

/// Raw callback body plus the signature header value, captured at the
/// trust boundary
///
/// Built once per inbound request and consumed exactly once by
/// [`SignatureVerifier::verify`].
#[derive(Debug, Clone)]
pub struct SignedPayload {
    content: Vec<u8>,
    signature_b64: String,
}

impl SignedPayload {
    pub fn new(content: impl Into<Vec<u8>>, signature_b64: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            signature_b64: signature_b64.into(),
        }
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }
}

/// Content whose signature has been checked
///
/// Only [`SignatureVerifier`] can construct this, so the decoding layer
/// cannot be handed bytes that skipped verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedPayload {
    content: Vec<u8>,
}

impl VerifiedPayload {
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    pub fn into_content(self) -> Vec<u8> {
        self.content
    }
}

#[cfg(test)]
impl VerifiedPayload {
    /// Bypass verification for decoder unit tests.
    pub(crate) fn from_raw(content: impl Into<Vec<u8>>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

/// Verifies callback signatures against the service's current public key
///
/// Verification tolerates one key rotation: if the signature is rejected by
/// the cached key, the key is invalidated and the check repeats exactly
/// once with a freshly fetched key. A single retry covers the rotation
/// window without letting a flood of bad signatures hammer the key
/// endpoint.
pub struct SignatureVerifier<P: PublicKeyProvider> {
    keys: P,
}

impl<P: PublicKeyProvider> SignatureVerifier<P> {
    pub fn new(keys: P) -> Self {
        Self { keys }
    }

    /// Verify `payload` and release its content for decoding
    ///
    /// Malformed signatures (bad base64, bad DER structure) fail before any
    /// key lookup. A structurally valid signature that still does not
    /// verify after the one rotation retry is `InvalidSignature`.
    pub async fn verify(&self, payload: SignedPayload) -> Result<VerifiedPayload> {
        let der = BASE64.decode(payload.signature_b64.as_bytes()).map_err(|e| {
            PixwayError::malformed_signature(format!("signature is not valid base64: {e}"))
        })?;

        let signature = Signature::from_der(&der).map_err(|e| {
            PixwayError::malformed_signature(format!(
                "signature is not a valid DER-encoded (r, s) pair: {e}"
            ))
        })?;

        let key = self.keys.get_key().await?;
        if key.verify_content(&payload.content, &signature) {
            return Ok(VerifiedPayload {
                content: payload.content,
            });
        }

        // The cached key may be stale if the service rotated its signing
        // key. Refresh and retry exactly once.
        tracing::warn!("signature rejected by cached key, refetching key for one retry");
        self.keys.invalidate().await;
        let key = self.keys.get_key().await?;
        if key.verify_content(&payload.content, &signature) {
            return Ok(VerifiedPayload {
                content: payload.content,
            });
        }

        tracing::debug!("signature verification failed with refreshed key");
        Err(PixwayError::InvalidSignature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::{CachedKeyProvider, KeyFetcher, PublicKey};
    use async_trait::async_trait;
    use k256::ecdsa::signature::DigestSigner;
    use k256::ecdsa::SigningKey;
    use k256::pkcs8::{EncodePublicKey, LineEnding};
    use sha2::{Digest, Sha256};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn keypair() -> (SigningKey, Vec<u8>) {
        let signing_key = SigningKey::random(&mut rand::thread_rng());
        let pem = signing_key
            .verifying_key()
            .to_public_key_pem(LineEnding::LF)
            .unwrap();
        (signing_key, pem.into_bytes())
    }

    fn sign(signing_key: &SigningKey, content: &[u8]) -> String {
        let signature: Signature = signing_key.sign_digest(Sha256::new_with_prefix(content));
        BASE64.encode(signature.to_der())
    }

    struct StaticFetcher {
        pem: Vec<u8>,
        fetches: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl KeyFetcher for StaticFetcher {
        async fn fetch_key(&self) -> crate::Result<Vec<u8>> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            Ok(self.pem.clone())
        }
    }

    /// Serves one PEM on the first fetch and another afterwards, modelling
    /// a key rotation between cache population and refetch.
    struct RotatingFetcher {
        stale_pem: Vec<u8>,
        fresh_pem: Vec<u8>,
        fetches: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl KeyFetcher for RotatingFetcher {
        async fn fetch_key(&self) -> crate::Result<Vec<u8>> {
            let n = self.fetches.fetch_add(1, Ordering::SeqCst);
            if n == 0 {
                Ok(self.stale_pem.clone())
            } else {
                Ok(self.fresh_pem.clone())
            }
        }
    }

    /// Records `get_key` calls; used to prove malformed signatures never
    /// reach the key layer.
    struct SpyProvider {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl PublicKeyProvider for SpyProvider {
        async fn get_key(&self) -> crate::Result<PublicKey> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(PixwayError::key_unavailable("spy"))
        }

        async fn invalidate(&self) {}
    }

    #[tokio::test]
    async fn test_valid_signature_verifies() {
        let (signing_key, pem) = keypair();
        let fetches = Arc::new(AtomicUsize::new(0));
        let verifier = SignatureVerifier::new(CachedKeyProvider::new(StaticFetcher {
            pem,
            fetches: fetches.clone(),
        }));

        let content = br#"{"event":{"id":"6046987522670592"}}"#.to_vec();
        let signature = sign(&signing_key, &content);

        let verified = verifier
            .verify(SignedPayload::new(content.clone(), signature))
            .await
            .unwrap();

        assert_eq!(verified.content(), content.as_slice());
        assert_eq!(fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_flipped_content_byte_is_invalid_signature() {
        let (signing_key, pem) = keypair();
        let verifier = SignatureVerifier::new(CachedKeyProvider::new(StaticFetcher {
            pem,
            fetches: Arc::new(AtomicUsize::new(0)),
        }));

        let mut content = br#"{"event":{"id":"6046987522670592"}}"#.to_vec();
        let signature = sign(&signing_key, &content);
        content[10] ^= 0x01;

        let err = verifier
            .verify(SignedPayload::new(content, signature))
            .await
            .unwrap_err();
        assert!(matches!(err, PixwayError::InvalidSignature));
    }

    #[tokio::test]
    async fn test_bad_base64_fails_without_key_lookup() {
        let calls = Arc::new(AtomicUsize::new(0));
        let verifier = SignatureVerifier::new(SpyProvider {
            calls: calls.clone(),
        });

        let err = verifier
            .verify(SignedPayload::new(b"body".to_vec(), "%%% not base64 %%%"))
            .await
            .unwrap_err();

        assert!(matches!(err, PixwayError::MalformedSignature(_)));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_valid_base64_bad_der_fails_without_key_lookup() {
        let calls = Arc::new(AtomicUsize::new(0));
        let verifier = SignatureVerifier::new(SpyProvider {
            calls: calls.clone(),
        });

        let not_der = BASE64.encode(b"definitely not a DER signature");
        let err = verifier
            .verify(SignedPayload::new(b"body".to_vec(), not_der))
            .await
            .unwrap_err();

        assert!(matches!(err, PixwayError::MalformedSignature(_)));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_rotation_invalidates_once_and_succeeds() {
        // Cache holds the stale key; the payload is signed with the fresh
        // one. One invalidate + refetch must rescue it.
        let (_stale_key, stale_pem) = keypair();
        let (fresh_key, fresh_pem) = keypair();
        let fetches = Arc::new(AtomicUsize::new(0));
        let verifier = SignatureVerifier::new(CachedKeyProvider::new(RotatingFetcher {
            stale_pem,
            fresh_pem,
            fetches: fetches.clone(),
        }));

        let content = b"rotated payload".to_vec();
        let signature = sign(&fresh_key, &content);

        let verified = verifier
            .verify(SignedPayload::new(content.clone(), signature))
            .await
            .unwrap();

        assert_eq!(verified.content(), content.as_slice());
        // One fetch for the initial cache population, one for the retry.
        assert_eq!(fetches.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_invalid_under_both_keys_fails_after_one_retry() {
        let (_stale_key, stale_pem) = keypair();
        let (_fresh_key, fresh_pem) = keypair();
        let (unrelated_key, _) = keypair();
        let fetches = Arc::new(AtomicUsize::new(0));
        let verifier = SignatureVerifier::new(CachedKeyProvider::new(RotatingFetcher {
            stale_pem,
            fresh_pem,
            fetches: fetches.clone(),
        }));

        let content = b"forged payload".to_vec();
        let signature = sign(&unrelated_key, &content);

        let err = verifier
            .verify(SignedPayload::new(content, signature))
            .await
            .unwrap_err();

        assert!(matches!(err, PixwayError::InvalidSignature));
        assert_eq!(fetches.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_key_unavailable_propagates_distinctly() {
        struct DownFetcher;

        #[async_trait]
        impl KeyFetcher for DownFetcher {
            async fn fetch_key(&self) -> crate::Result<Vec<u8>> {
                Err(PixwayError::key_unavailable("endpoint down"))
            }
        }

        let (signing_key, _) = keypair();
        let verifier = SignatureVerifier::new(CachedKeyProvider::new(DownFetcher));

        let content = b"payload".to_vec();
        let signature = sign(&signing_key, &content);

        let err = verifier
            .verify(SignedPayload::new(content, signature))
            .await
            .unwrap_err();
        assert!(matches!(err, PixwayError::KeyUnavailable(_)));
    }
}
