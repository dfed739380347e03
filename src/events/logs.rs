//! Typed log payloads, one family per remote resource kind.
//!
//! Each struct names its required fields outright so a malformed payload
//! fails at decode time with a family-scoped error, instead of surfacing
//! later as a missing-field surprise in handler code.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Log entry for an inbound or outbound Pix transfer request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PixRequestLog {
    pub id: String,
    pub created: DateTime<Utc>,
    #[serde(rename = "type")]
    pub log_type: String,
    #[serde(default)]
    pub errors: Vec<String>,
    pub request: PixRequest,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PixRequest {
    pub id: String,
    pub end_to_end_id: String,
    pub amount: i64,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender_tax_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receiver_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receiver_tax_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Log entry for a Pix reversal (refund of a settled transfer)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PixReversalLog {
    pub id: String,
    pub created: DateTime<Utc>,
    #[serde(rename = "type")]
    pub log_type: String,
    #[serde(default)]
    pub errors: Vec<String>,
    pub reversal: PixReversal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PixReversal {
    pub id: String,
    pub amount: i64,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Log entry for a Pix addressing-key lifecycle change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PixKeyLog {
    pub id: String,
    pub created: DateTime<Utc>,
    #[serde(rename = "type")]
    pub log_type: String,
    #[serde(default)]
    pub errors: Vec<String>,
    pub key: PixKey,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PixKey {
    pub id: String,
    pub status: String,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub key_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_id: Option<String>,
}

/// Log entry for a Pix key ownership claim
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PixClaimLog {
    pub id: String,
    pub created: DateTime<Utc>,
    #[serde(rename = "type")]
    pub log_type: String,
    #[serde(default)]
    pub errors: Vec<String>,
    pub claim: PixClaim,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PixClaim {
    pub id: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_id: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub claim_type: Option<String>,
}

/// Log entry for a credit note lifecycle change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditNoteLog {
    pub id: String,
    pub created: DateTime<Utc>,
    #[serde(rename = "type")]
    pub log_type: String,
    #[serde(default)]
    pub errors: Vec<String>,
    pub note: CreditNote,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditNote {
    pub id: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
}
