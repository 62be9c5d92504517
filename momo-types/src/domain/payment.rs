//! Request-to-pay payloads.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Kind of identifier used to address a payer's wallet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PartyIdType {
    /// Phone number in international format without the leading `+`
    #[default]
    Msisdn,
    Email,
    PartyCode,
}

/// The wallet to be charged.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Payer {
    #[serde(default)]
    pub party_id_type: PartyIdType,
    #[serde(default)]
    #[schema(example = "46733123453")]
    pub party_id: String,
}

impl Payer {
    /// Addresses a payer by phone number.
    pub fn msisdn(party_id: impl Into<String>) -> Self {
        Self {
            party_id_type: PartyIdType::Msisdn,
            party_id: party_id.into(),
        }
    }
}

/// Body of a request-to-pay call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    /// Decimal amount as a string
    #[schema(example = "100")]
    pub amount: String,
    #[schema(example = "EUR")]
    pub currency: String,
    /// Caller-side correlation id, echoed back in the payment result
    #[schema(example = "7890")]
    pub external_id: String,
    pub payer: Payer,
    #[serde(default)]
    #[schema(example = "Payment for services")]
    pub payer_message: String,
    #[serde(default)]
    #[schema(example = "Thank you")]
    pub payee_note: String,
}

/// Final or intermediate state of a request to pay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Successful,
    Failed,
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentStatus::Pending => write!(f, "PENDING"),
            PaymentStatus::Successful => write!(f, "SUCCESSFUL"),
            PaymentStatus::Failed => write!(f, "FAILED"),
        }
    }
}

/// Provider error payload.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub struct ErrorReason {
    #[serde(default)]
    #[schema(example = "PAYER_NOT_FOUND")]
    pub code: String,
    #[serde(default)]
    pub message: String,
}

/// Status of a request to pay, as reported by the provider.
///
/// Any field the provider leaves out keeps its default value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct PaymentResult {
    pub amount: String,
    pub currency: String,
    pub financial_transaction_id: String,
    pub external_id: String,
    pub payer: Payer,
    pub status: PaymentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<ErrorReason>,
}

impl PaymentResult {
    /// Returns true once the provider reports a terminal status.
    pub fn is_final(&self) -> bool {
        !matches!(self.status, PaymentStatus::Pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serializes_provider_names() {
        let req = PaymentRequest {
            amount: "100".into(),
            currency: "EUR".into(),
            external_id: "7890".into(),
            payer: Payer::msisdn("46733123453"),
            payer_message: "pay".into(),
            payee_note: "thanks".into(),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["externalId"], "7890");
        assert_eq!(json["payer"]["partyIdType"], "MSISDN");
        assert_eq!(json["payer"]["partyId"], "46733123453");
        assert_eq!(json["payerMessage"], "pay");
        assert_eq!(json["payeeNote"], "thanks");
    }

    #[test]
    fn test_result_without_reason() {
        let result: PaymentResult = serde_json::from_str(
            r#"{"amount":"100","currency":"EUR","financialTransactionId":"23503452",
                "externalId":"947354","payer":{"partyIdType":"MSISDN","partyId":"4656473839"},
                "status":"SUCCESSFUL"}"#,
        )
        .unwrap();
        assert_eq!(result.status, PaymentStatus::Successful);
        assert_eq!(result.financial_transaction_id, "23503452");
        assert!(result.reason.is_none());
        assert!(result.is_final());
    }

    #[test]
    fn test_failed_result_carries_reason() {
        let result: PaymentResult = serde_json::from_str(
            r#"{"status":"FAILED","reason":{"code":"PAYER_NOT_FOUND","message":"Payer not found"}}"#,
        )
        .unwrap();
        assert_eq!(result.status, PaymentStatus::Failed);
        assert_eq!(result.reason.unwrap().code, "PAYER_NOT_FOUND");
        assert!(result.amount.is_empty());
    }

    #[test]
    fn test_pending_is_not_final() {
        let result = PaymentResult::default();
        assert_eq!(result.status, PaymentStatus::Pending);
        assert!(!result.is_final());
    }
}
