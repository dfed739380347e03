//! Outbound response bodies for synchronous callbacks.
//!
//! Some callbacks (transaction authorization, BR code reads) are answered
//! in-band: the remote service waits for the reply and enforces a budget of
//! roughly five seconds before treating the callback as unanswered. The
//! builders here are pure and allocation-cheap so the budget is spent on
//! the caller's decision, not on serialization. Field names are bit-exact:
//! the service parses replies strictly and `reconciliationId` is not the
//! same field as `reconciliationID`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Verdict for a synchronous authorization callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthorizationStatus {
    Approved,
    Denied,
}

/// Why an authorization was denied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DenialReason {
    InvalidAccountNumber,
    BlockedAccount,
    AccountClosed,
    InvalidAccountType,
    TransactionNotAllowed,
    InsufficientBalance,
    OrderRejected,
}

/// The caller's decision on a synchronous authorization callback
///
/// Outbound only; unrelated to the inbound event types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthorizationDecision {
    pub status: AuthorizationStatus,
    pub reason: Option<DenialReason>,
}

impl AuthorizationDecision {
    pub fn approve() -> Self {
        Self {
            status: AuthorizationStatus::Approved,
            reason: None,
        }
    }

    pub fn deny(reason: DenialReason) -> Self {
        Self {
            status: AuthorizationStatus::Denied,
            reason: Some(reason),
        }
    }
}

#[derive(Serialize)]
struct AuthorizationResponse {
    authorization: AuthorizationBody,
}

#[derive(Serialize)]
struct AuthorizationBody {
    status: AuthorizationStatus,
    // Serialized as an explicit null when absent; the service expects the
    // field to be present either way.
    reason: Option<DenialReason>,
}

/// Serialize the JSON body to return for an authorization callback
///
/// Deterministic: the same decision always produces the same bytes.
pub fn build_authorization_response(decision: &AuthorizationDecision) -> Vec<u8> {
    let response = AuthorizationResponse {
        authorization: AuthorizationBody {
            status: decision.status,
            reason: decision.reason,
        },
    };
    serde_json::to_vec(&response).expect("authorization response serializes infallibly")
}

/// Lifecycle status reported in a BR code read reply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrcodeStatus {
    Created,
    Overdue,
    Paid,
    Canceled,
    Expired,
}

/// Reply body for a due (dated, interest-bearing) BR code read callback
///
/// Required fields come in through [`DueReadResponse::new`]; optionals are
/// attached with the `with_*` methods and omitted from the JSON entirely
/// when unset.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DueReadResponse {
    version: i32,
    created: DateTime<Utc>,
    due: DateTime<Utc>,
    key_id: String,
    status: BrcodeStatus,
    reconciliation_id: String,
    nominal_amount: i64,
    sender_name: String,
    sender_tax_id: String,
    receiver_name: String,
    receiver_tax_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    receiver_street_line: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    receiver_city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    receiver_state_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    receiver_zip_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    expiration: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fine: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    interest: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

impl DueReadResponse {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        created: DateTime<Utc>,
        due: DateTime<Utc>,
        key_id: impl Into<String>,
        status: BrcodeStatus,
        reconciliation_id: impl Into<String>,
        nominal_amount: i64,
        sender_name: impl Into<String>,
        sender_tax_id: impl Into<String>,
        receiver_name: impl Into<String>,
        receiver_tax_id: impl Into<String>,
    ) -> Self {
        Self {
            version: 1,
            created,
            due,
            key_id: key_id.into(),
            status,
            reconciliation_id: reconciliation_id.into(),
            nominal_amount,
            sender_name: sender_name.into(),
            sender_tax_id: sender_tax_id.into(),
            receiver_name: receiver_name.into(),
            receiver_tax_id: receiver_tax_id.into(),
            receiver_street_line: None,
            receiver_city: None,
            receiver_state_code: None,
            receiver_zip_code: None,
            expiration: None,
            fine: None,
            interest: None,
            description: None,
        }
    }

    pub fn with_receiver_address(
        mut self,
        street_line: impl Into<String>,
        city: impl Into<String>,
        state_code: impl Into<String>,
        zip_code: impl Into<String>,
    ) -> Self {
        self.receiver_street_line = Some(street_line.into());
        self.receiver_city = Some(city.into());
        self.receiver_state_code = Some(state_code.into());
        self.receiver_zip_code = Some(zip_code.into());
        self
    }

    pub fn with_expiration(mut self, seconds: i64) -> Self {
        self.expiration = Some(seconds);
        self
    }

    pub fn with_fine(mut self, percentage: f64) -> Self {
        self.fine = Some(percentage);
        self
    }

    pub fn with_interest(mut self, percentage: f64) -> Self {
        self.interest = Some(percentage);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Serialize to the JSON body the caller returns to the service
    pub fn to_bytes(&self) -> Vec<u8> {
        serde_json::to_vec(self).expect("due read response serializes infallibly")
    }
}

/// Reply body for an instant BR code read callback
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstantReadResponse {
    version: i32,
    created: DateTime<Utc>,
    key_id: String,
    status: BrcodeStatus,
    reconciliation_id: String,
    amount: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    expiration: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sender_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

impl InstantReadResponse {
    pub fn new(
        created: DateTime<Utc>,
        key_id: impl Into<String>,
        status: BrcodeStatus,
        reconciliation_id: impl Into<String>,
        amount: i64,
    ) -> Self {
        Self {
            version: 1,
            created,
            key_id: key_id.into(),
            status,
            reconciliation_id: reconciliation_id.into(),
            amount,
            expiration: None,
            sender_name: None,
            description: None,
        }
    }

    pub fn with_expiration(mut self, seconds: i64) -> Self {
        self.expiration = Some(seconds);
        self
    }

    pub fn with_sender_name(mut self, name: impl Into<String>) -> Self {
        self.sender_name = Some(name.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Serialize to the JSON body the caller returns to the service
    pub fn to_bytes(&self) -> Vec<u8> {
        serde_json::to_vec(self).expect("instant read response serializes infallibly")
    }
}
