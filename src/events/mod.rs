//! Typed decoding of verified callback events.
//!
//! Events arrive as a JSON envelope `{"event": {...}}` whose `subscription`
//! field names the topic (e.g. `pix-request.in`, `pix-key`, `credit-note`).
//! Dispatch runs over an explicit ordered table of substring predicates so
//! the matching order and the fallback are auditable in one place; the
//! first matching family wins, and a topic matching no family is rejected
//! outright rather than returned half-decoded.

pub mod logs;

pub use logs::{
    CreditNote, CreditNoteLog, PixClaim, PixClaimLog, PixKey, PixKeyLog, PixRequest,
    PixRequestLog, PixReversal, PixReversalLog,
};

use crate::error::{PixwayError, Result};
use crate::verification::VerifiedPayload;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A decoded callback event
///
/// Only ever constructed from a [`VerifiedPayload`]; read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainEvent {
    pub id: String,
    pub subscription: String,
    pub created: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace_id: Option<String>,
    pub log: EventLog,
}

/// Per-family log payload, keyed by the event's topic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventLog {
    PixRequest(PixRequestLog),
    PixReversal(PixReversalLog),
    PixKey(PixKeyLog),
    PixClaim(PixClaimLog),
    CreditNote(CreditNoteLog),
}

#[derive(Deserialize)]
struct Envelope {
    event: RawEvent,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEvent {
    id: String,
    created: DateTime<Utc>,
    subscription: String,
    #[serde(default)]
    workspace_id: Option<String>,
    log: Value,
}

type LogDecoder = fn(Value) -> Result<EventLog>;

/// Ordered topic-family table: the first entry whose substring occurs in
/// the subscription decodes the log. `pix-request.in` and
/// `pix-request.out` both land on `pix-request`.
const TOPIC_FAMILIES: &[(&str, LogDecoder)] = &[
    ("pix-request", |log| {
        decode_family("pix-request", log, EventLog::PixRequest)
    }),
    ("pix-reversal", |log| {
        decode_family("pix-reversal", log, EventLog::PixReversal)
    }),
    ("pix-key", |log| {
        decode_family("pix-key", log, EventLog::PixKey)
    }),
    ("pix-claim", |log| {
        decode_family("pix-claim", log, EventLog::PixClaim)
    }),
    ("credit-note", |log| {
        decode_family("credit-note", log, EventLog::CreditNote)
    }),
];

fn decode_family<T: DeserializeOwned>(
    family: &str,
    log: Value,
    wrap: fn(T) -> EventLog,
) -> Result<EventLog> {
    serde_json::from_value(log)
        .map(wrap)
        .map_err(|e| PixwayError::malformed_event(format!("{family} log: {e}")))
}

/// Decode verified content into a typed [`DomainEvent`]
///
/// The envelope shape, the topic family, and the family's own required
/// fields are all validated here; any mismatch is `MalformedEvent`.
pub fn decode_event(payload: &VerifiedPayload) -> Result<DomainEvent> {
    let envelope: Envelope = serde_json::from_slice(payload.content()).map_err(|e| {
        PixwayError::malformed_event(format!("body is not a valid event envelope: {e}"))
    })?;
    let raw = envelope.event;

    let decoder = TOPIC_FAMILIES
        .iter()
        .find(|(family, _)| raw.subscription.contains(family))
        .map(|(_, decoder)| *decoder)
        .ok_or_else(|| {
            PixwayError::malformed_event(format!("unknown topic family: {}", raw.subscription))
        })?;

    let log = decoder(raw.log)?;

    tracing::debug!(
        event_id = %raw.id,
        subscription = %raw.subscription,
        "callback event decoded"
    );

    Ok(DomainEvent {
        id: raw.id,
        subscription: raw.subscription,
        created: raw.created,
        workspace_id: raw.workspace_id,
        log,
    })
}
