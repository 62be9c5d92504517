//! Collection provider port.
//!
//! Implemented by `momo_client::MomoClient` over HTTP.

use crate::domain::{
    ApiUserDetails, AuthToken, Balance, Oauth2Token, PaymentRequest, PaymentResult, ReferenceId,
};
use crate::error::MomoError;

/// Operations offered by the mobile-money collection API.
///
/// Every call is one request/response exchange with the provider. Nothing is
/// cached and nothing is retried.
#[async_trait::async_trait]
pub trait CollectionApi: Send + Sync + 'static {
    // ─────────────────────────────────────────────────────────────────────────────
    // Provisioning
    // ─────────────────────────────────────────────────────────────────────────────

    /// Registers an API user under `reference_id`.
    async fn create_api_user(
        &self,
        reference_id: &str,
        callback_host: &str,
    ) -> Result<(), MomoError>;

    /// Issues a new API key for the user registered under `reference_id`.
    async fn create_api_key(&self, reference_id: &str) -> Result<String, MomoError>;

    /// Fetches what the provider knows about an API user.
    async fn get_api_user_details(&self, reference_id: &str) -> Result<ApiUserDetails, MomoError>;

    // ─────────────────────────────────────────────────────────────────────────────
    // Authentication
    // ─────────────────────────────────────────────────────────────────────────────

    /// Requests a fresh bearer token.
    async fn get_auth_token(&self) -> Result<AuthToken, MomoError>;

    /// Polls the backchannel (CIBA) token endpoint for `auth_req_id`.
    async fn create_oauth2_token(&self, auth_req_id: &str) -> Result<Oauth2Token, MomoError>;

    // ─────────────────────────────────────────────────────────────────────────────
    // Collection
    // ─────────────────────────────────────────────────────────────────────────────

    /// Reads the collection account balance.
    async fn get_account_balance(&self, bearer_token: &str) -> Result<Balance, MomoError>;

    /// Submits a request to pay and returns the generated reference id.
    ///
    /// Every call generates a new id, so retrying creates a new payment attempt.
    async fn request_to_pay(
        &self,
        bearer_token: &str,
        request: &PaymentRequest,
    ) -> Result<ReferenceId, MomoError>;

    /// Polls the status of a previously submitted request to pay.
    async fn get_payment_status(
        &self,
        reference_id: &str,
        bearer_token: &str,
    ) -> Result<PaymentResult, MomoError>;
}
