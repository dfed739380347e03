/// The main error type for pixway operations
///
/// Every failure a callback handler can see is one of these variants. The
/// split between `KeyUnavailable` and `InvalidSignature` is deliberate:
/// the former means the key infrastructure is unreachable or serving
/// garbage (an operational problem worth alerting on), the latter means a
/// well-formed signature did not verify (a tampering/fraud signal). Callers
/// should treat any of these as "reject this callback" — log and drop,
/// never act on the payload.
#[derive(Debug, thiserror::Error)]
pub enum PixwayError {
    /// The public-key fetch failed (network error, timeout, or malformed
    /// key material). Distinct from signature rejection so callers can
    /// alert on infrastructure problems separately.
    #[error("public key unavailable: {0}")]
    KeyUnavailable(String),

    /// The signature string is not valid base64 or not a structurally
    /// valid DER-encoded (r, s) pair. Fails fast; no key lookup happens.
    #[error("malformed signature: {0}")]
    MalformedSignature(String),

    /// A structurally valid signature that does not verify against the
    /// current key, even after one key refresh. The security-relevant
    /// rejection.
    #[error("signature did not verify against the service public key")]
    InvalidSignature,

    /// Verified content that does not parse as the expected event
    /// envelope, or whose topic-family payload is missing required fields.
    #[error("malformed event: {0}")]
    MalformedEvent(String),
}

impl PixwayError {
    pub fn key_unavailable(msg: impl Into<String>) -> Self {
        Self::KeyUnavailable(msg.into())
    }

    pub fn malformed_signature(msg: impl Into<String>) -> Self {
        Self::MalformedSignature(msg.into())
    }

    pub fn malformed_event(msg: impl Into<String>) -> Self {
        Self::MalformedEvent(msg.into())
    }
}

/// Convenience result type for pixway operations
pub type Result<T> = std::result::Result<T, PixwayError>;
