//! Collection Application Service
//!
//! Orchestrates provider calls through the `CollectionApi` port.
//! Contains NO transport logic - only the facade's input rules.

use momo_types::{
    ApiUserDetails, AppError, AuthToken, Balance, CollectionApi, CreateApiUserRequest, Oauth2Token,
    PaymentRequest, PaymentResult, ReferenceId,
};

/// Application service behind the HTTP facade.
///
/// Generic over `A: CollectionApi` - the provider client is injected at
/// compile time, so handlers can be exercised against an in-memory double.
pub struct CollectionService<A: CollectionApi> {
    api: A,
}

impl<A: CollectionApi> CollectionService<A> {
    /// Creates a new service over the given provider client.
    pub fn new(api: A) -> Self {
        Self { api }
    }

    /// Returns a reference to the underlying provider client.
    pub fn api(&self) -> &A {
        &self.api
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Provisioning
    // ─────────────────────────────────────────────────────────────────────────────

    /// Provisions an API user, generating a reference id when none is given.
    pub async fn create_api_user(
        &self,
        req: CreateApiUserRequest,
    ) -> Result<ReferenceId, AppError> {
        let reference_id = if req.reference_id.trim().is_empty() {
            ReferenceId::generate()
        } else {
            ReferenceId::parse(req.reference_id.trim())?
        };

        self.api
            .create_api_user(reference_id.as_str(), &req.callback_host)
            .await?;
        Ok(reference_id)
    }

    /// Issues an API key. The reference id is mandatory here.
    pub async fn create_api_key(&self, reference_id: &str) -> Result<String, AppError> {
        if reference_id.trim().is_empty() {
            return Err(AppError::BadRequest("Reference ID is required".into()));
        }
        self.api
            .create_api_key(reference_id.trim())
            .await
            .map_err(Into::into)
    }

    pub async fn get_api_user_details(
        &self,
        reference_id: &str,
    ) -> Result<ApiUserDetails, AppError> {
        self.api
            .get_api_user_details(reference_id)
            .await
            .map_err(Into::into)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Authentication
    // ─────────────────────────────────────────────────────────────────────────────

    pub async fn get_auth_token(&self) -> Result<AuthToken, AppError> {
        self.api.get_auth_token().await.map_err(Into::into)
    }

    pub async fn create_oauth2_token(&self, auth_req_id: &str) -> Result<Oauth2Token, AppError> {
        self.api
            .create_oauth2_token(auth_req_id)
            .await
            .map_err(Into::into)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Collection
    // ─────────────────────────────────────────────────────────────────────────────

    pub async fn get_account_balance(&self, bearer_token: &str) -> Result<Balance, AppError> {
        self.api
            .get_account_balance(bearer_token)
            .await
            .map_err(Into::into)
    }

    /// Submits a request to pay; the returned id is the polling handle.
    pub async fn request_to_pay(
        &self,
        bearer_token: &str,
        req: PaymentRequest,
    ) -> Result<ReferenceId, AppError> {
        self.api
            .request_to_pay(bearer_token, &req)
            .await
            .map_err(Into::into)
    }

    pub async fn get_payment_status(
        &self,
        reference_id: &str,
        bearer_token: &str,
    ) -> Result<PaymentResult, AppError> {
        self.api
            .get_payment_status(reference_id, bearer_token)
            .await
            .map_err(Into::into)
    }
}
