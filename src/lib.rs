//! Pixway - verification core for Pix webhook callbacks
//!
//! Pixway sits at the trust boundary of a Pix integration: the remote
//! service delivers webhook events and synchronous BR code callbacks over
//! HTTP, signing every body with its secp256k1 key, and nothing in a body
//! may be acted on until that signature verifies. The crate covers the
//! whole inbound-to-outbound path:
//!
//! - **Keys**: lazy, single-flight cached retrieval of the service's
//!   public key, with explicit invalidation for key rotation
//! - **Verification**: base64 + DER decoding of the `Digital-Signature`
//!   header and ECDSA/SHA-256 verification, retrying exactly once on a
//!   suspected rotation
//! - **Events**: typed decoding of verified payloads into per-topic log
//!   structs via an auditable dispatch table
//! - **Responses**: canonical JSON bodies for authorization and BR code
//!   read replies, with bit-exact field naming
//!
//! HTTP transport is out of scope: implement [`KeyFetcher`] over your
//! client for the key-distribution endpoint, and hand the raw body plus
//! header value to [`SignatureVerifier`].
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use pixway::{CachedKeyProvider, SignatureVerifier, SignedPayload, decode_event};
//!
//! let provider = CachedKeyProvider::new(MyKeyFetcher::new(client));
//! let verifier = SignatureVerifier::new(provider);
//!
//! // In the callback handler: body bytes + Digital-Signature header.
//! let verified = verifier
//!     .verify(SignedPayload::new(body, signature_header))
//!     .await?;
//! let event = decode_event(&verified)?;
//! ```

pub mod config;
mod error;
pub mod events;
pub mod keys;
pub mod response;
mod verification;

// Re-exports for public API
pub use config::VerificationConfig;
pub use error::{PixwayError, Result};
pub use events::{decode_event, DomainEvent, EventLog};
pub use keys::{CachedKeyProvider, KeyFetcher, PublicKey, PublicKeyProvider};
pub use response::{
    build_authorization_response, AuthorizationDecision, AuthorizationStatus, BrcodeStatus,
    DenialReason, DueReadResponse, InstantReadResponse,
};
pub use verification::{SignatureVerifier, SignedPayload, VerifiedPayload};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing/logging with sensible defaults
///
/// Call this early, typically in main(), before handling callbacks.
///
/// # Environment Variables
///
/// - `RUST_LOG`: Set log level (e.g., "info", "debug", "pixway=debug")
/// - `PIXWAY_LOG_JSON`: Set to "true" for JSON formatted logs
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let json_logs = std::env::var("PIXWAY_LOG_JSON")
        .map(|v| v.parse::<bool>().unwrap_or(false))
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}
