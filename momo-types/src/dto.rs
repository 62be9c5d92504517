//! Data Transfer Objects (DTOs) for the HTTP facade.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{AuthToken, Balance, ReferenceId};

// ─────────────────────────────────────────────────────────────────────────────
// Provisioning DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to provision an API user.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CreateApiUserRequest {
    /// Reference id to register; a UUID is generated when blank
    #[serde(default)]
    #[schema(example = "3f1c5a4e-8b7d-4e2f-9a61-0d2c7b9e4f10")]
    pub reference_id: String,
    /// Host the provider calls back on payment updates
    #[serde(default)]
    #[schema(example = "webhook.example.com")]
    pub callback_host: String,
}

/// Response after provisioning an API user.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateApiUserResponse {
    pub message: String,
    pub reference_id: ReferenceId,
}

/// Request to issue an API key.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CreateApiKeyRequest {
    #[serde(default)]
    #[schema(example = "3f1c5a4e-8b7d-4e2f-9a61-0d2c7b9e4f10")]
    pub reference_id: String,
}

/// Response containing the newly issued API key.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateApiKeyResponse {
    pub api_key: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Authentication DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Bearer token handed back to facade callers.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthTokenResponse {
    pub token: String,
    pub token_type: String,
    #[schema(example = 3600)]
    pub expires_in: i64,
}

impl From<AuthToken> for AuthTokenResponse {
    fn from(token: AuthToken) -> Self {
        Self {
            token: token.access_token,
            token_type: token.token_type,
            expires_in: token.expires_in,
        }
    }
}

/// Form body of the backchannel token call.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Oauth2TokenRequest {
    pub auth_req_id: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Collection DTOs
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BalanceResponse {
    pub balance: Balance,
}

/// Response after a request to pay has been accepted.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RequestToPayResponse {
    pub message: String,
    /// Handle to poll `/payment-status/{reference_id}` with
    pub reference_id: ReferenceId,
}
