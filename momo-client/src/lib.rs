//! # MoMo Client
//!
//! A typed async client for the mobile-money collection API: API user
//! provisioning, token issuance, balance inquiry and request to pay.
//!
//! Every operation is a single request/response exchange. The client keeps
//! no mutable state, so one instance (or any of its cheap clones) can be
//! shared across tasks.

mod config;

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

pub use config::{
    AuthScheme, ClientConfig, DEFAULT_PROVISIONING_PREFIX, SANDBOX_BASE_URL, TargetEnvironment,
};
pub use momo_types::{
    ApiUserDetails, AuthToken, Balance, CollectionApi, ErrorReason, MomoError, Oauth2Token,
    PartyIdType, Payer, PaymentRequest, PaymentResult, PaymentStatus, ReferenceId,
    TransportError, TransportErrorKind,
};

const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";
const TARGET_ENVIRONMENT_HEADER: &str = "X-Target-Environment";
const REFERENCE_ID_HEADER: &str = "X-Reference-Id";

const CIBA_GRANT_TYPE: &str = "urn:openid:params:grant-type:ciba";

/// Mobile-money collection API client.
#[derive(Clone)]
pub struct MomoClient {
    config: Arc<ClientConfig>,
    http: reqwest::Client,
    call_timeout: Option<Duration>,
    cancel: Option<CancellationToken>,
}

impl MomoClient {
    /// Creates a new client. No request is sent and credentials are not
    /// checked until the first call.
    pub fn new(mut config: ClientConfig) -> Result<Self, MomoError> {
        config.base_url = config.base_url.trim_end_matches('/').to_string();
        config.provisioning_prefix = config::normalize_prefix(&config.provisioning_prefix);

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(|e| {
            TransportError::new(
                TransportErrorKind::Other,
                format!("failed to build HTTP client: {}", e),
            )
        })?;

        debug!(
            base_url = %config.base_url,
            environment = %config.environment,
            auth_scheme = %config.auth_scheme,
            "Initialized collection client"
        );

        Ok(Self {
            config: Arc::new(config),
            http,
            call_timeout: None,
            cancel: None,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns a client whose requests must complete within `timeout`.
    ///
    /// Expiry surfaces as a [`TransportErrorKind::Timeout`] transport error.
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        Self {
            call_timeout: Some(timeout),
            ..self.clone()
        }
    }

    /// Returns a client whose in-flight requests are aborted once `token`
    /// is cancelled, surfacing [`TransportErrorKind::Cancelled`].
    pub fn with_cancellation(&self, token: CancellationToken) -> Self {
        Self {
            cancel: Some(token),
            ..self.clone()
        }
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Provisioning
    // ─────────────────────────────────────────────────────────────────────────────

    /// Registers an API user. Succeeds only on `201 Created`.
    pub async fn create_api_user(
        &self,
        reference_id: &str,
        callback_host: &str,
    ) -> Result<(), MomoError> {
        let reference_id = ReferenceId::parse(reference_id)?;
        if callback_host.trim().is_empty() {
            return Err(MomoError::Validation("callback host is required".into()));
        }

        let path = format!("{}/apiuser", self.config.provisioning_prefix);
        let req = self
            .request(Method::POST, &path)
            .header(REFERENCE_ID_HEADER, reference_id.as_str())
            .json(&serde_json::json!({ "providerCallbackHost": callback_host }));

        let (status, body) = self.execute("create_api_user", req).await?;
        expect_status(status, StatusCode::CREATED, body)?;
        Ok(())
    }

    /// Issues an API key for a provisioned user. Succeeds only on `201 Created`.
    pub async fn create_api_key(&self, reference_id: &str) -> Result<String, MomoError> {
        #[derive(serde::Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct ApiKeyBody {
            #[serde(default)]
            api_key: String,
        }

        let reference_id = ReferenceId::parse(reference_id)?;
        let path = format!(
            "{}/apiuser/{}/apikey",
            self.config.provisioning_prefix, reference_id
        );
        let req = self.request(Method::POST, &path);

        let (status, body) = self.execute("create_api_key", req).await?;
        let body = expect_status(status, StatusCode::CREATED, body)?;
        let parsed: ApiKeyBody = decode(&body)?;
        Ok(parsed.api_key)
    }

    /// Fetches the provider's record of an API user.
    pub async fn get_api_user_details(
        &self,
        reference_id: &str,
    ) -> Result<ApiUserDetails, MomoError> {
        let reference_id = ReferenceId::parse(reference_id)?;
        let path = format!("{}/apiuser/{}", self.config.provisioning_prefix, reference_id);
        let req = self.request(Method::GET, &path);

        let (status, body) = self.execute("get_api_user_details", req).await?;
        decode(&expect_status(status, StatusCode::OK, body)?)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Authentication
    // ─────────────────────────────────────────────────────────────────────────────

    /// Requests a new bearer token. The token is not cached; every call is
    /// a round trip to the provider.
    pub async fn get_auth_token(&self) -> Result<AuthToken, MomoError> {
        let mut req = self.request(Method::POST, "/collection/token/");
        if self.config.auth_scheme == AuthScheme::Basic {
            req = req.basic_auth(&self.config.api_user_id, Some(&self.config.api_key));
        }

        let (status, body) = self.execute("get_auth_token", req).await?;
        decode(&expect_status(status, StatusCode::OK, body)?)
    }

    /// Exchanges a backchannel authentication request id for a token.
    ///
    /// Callers poll this until it succeeds or the provider answers with a
    /// denial, which arrives as [`MomoError::Api`] with a decoded reason.
    pub async fn create_oauth2_token(&self, auth_req_id: &str) -> Result<Oauth2Token, MomoError> {
        if auth_req_id.trim().is_empty() {
            return Err(MomoError::Validation("auth_req_id is required".into()));
        }

        let req = self
            .request(Method::POST, "/collection/oauth2/token/")
            .header(TARGET_ENVIRONMENT_HEADER, self.config.environment.as_str())
            .basic_auth(&self.config.api_user_id, Some(&self.config.api_key))
            .form(&[("grant_type", CIBA_GRANT_TYPE), ("auth_req_id", auth_req_id)]);

        let (status, body) = self.execute("create_oauth2_token", req).await?;
        decode(&expect_status(status, StatusCode::OK, body)?)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Collection
    // ─────────────────────────────────────────────────────────────────────────────

    /// Reads the collection account balance.
    pub async fn get_account_balance(&self, bearer_token: &str) -> Result<Balance, MomoError> {
        let req = self.authorized(Method::GET, "/collection/v1_0/account/balance", bearer_token)?;

        let (status, body) = self.execute("get_account_balance", req).await?;
        decode(&expect_status(status, StatusCode::OK, body)?)
    }

    /// Submits a request to pay and returns the reference id generated for it.
    ///
    /// The provider answers `202 Accepted` before the payment settles, so the
    /// response body is ignored; poll [`MomoClient::get_payment_status`] with
    /// the returned id. A new id is generated on every call.
    pub async fn request_to_pay(
        &self,
        bearer_token: &str,
        request: &PaymentRequest,
    ) -> Result<ReferenceId, MomoError> {
        validate_payment(request)?;
        let reference_id = ReferenceId::generate();

        let req = self
            .authorized(Method::POST, "/collection/v1_0/requesttopay", bearer_token)?
            .header(REFERENCE_ID_HEADER, reference_id.as_str())
            .json(request);

        debug!(reference_id = %reference_id, external_id = %request.external_id, "Submitting request to pay");
        let (status, body) = self.execute("request_to_pay", req).await?;
        expect_status(status, StatusCode::ACCEPTED, body)?;
        Ok(reference_id)
    }

    /// Fetches the status of a request to pay.
    pub async fn get_payment_status(
        &self,
        reference_id: &str,
        bearer_token: &str,
    ) -> Result<PaymentResult, MomoError> {
        let reference_id = ReferenceId::parse(reference_id)?;
        let path = format!("/collection/v1_0/requesttopay/{}", reference_id);
        let req = self.authorized(Method::GET, &path, bearer_token)?;

        let (status, body) = self.execute("get_payment_status", req).await?;
        decode(&expect_status(status, StatusCode::OK, body)?)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Transport
    // ─────────────────────────────────────────────────────────────────────────────

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut req = self
            .http
            .request(method, format!("{}{}", self.config.base_url, path))
            .header(SUBSCRIPTION_KEY_HEADER, &self.config.subscription_key)
            .header(reqwest::header::CACHE_CONTROL, "no-cache");
        if let Some(timeout) = self.call_timeout {
            req = req.timeout(timeout);
        }
        req
    }

    /// Bearer-authenticated request against the target environment.
    fn authorized(
        &self,
        method: Method,
        path: &str,
        bearer_token: &str,
    ) -> Result<RequestBuilder, MomoError> {
        let bearer_token = bearer_token.trim();
        if bearer_token.is_empty() {
            return Err(MomoError::Validation("bearer token is required".into()));
        }
        Ok(self
            .request(method, path)
            .bearer_auth(bearer_token)
            .header(TARGET_ENVIRONMENT_HEADER, self.config.environment.as_str()))
    }

    /// Sends the request and reads the full body, honouring the caller's
    /// cancellation token.
    async fn execute(
        &self,
        operation: &'static str,
        req: RequestBuilder,
    ) -> Result<(StatusCode, String), MomoError> {
        let exchange = async {
            let resp = req.send().await?;
            let status = resp.status();
            let body = resp.text().await?;
            Ok::<_, reqwest::Error>((status, body))
        };

        let result = match &self.cancel {
            Some(token) => tokio::select! {
                biased;
                _ = token.cancelled() => {
                    warn!(operation, "Request cancelled");
                    return Err(TransportError::cancelled().into());
                }
                result = exchange => result,
            },
            None => exchange.await,
        };

        match result {
            Ok((status, body)) => {
                debug!(operation, status = status.as_u16(), "Received response");
                Ok((status, body))
            }
            Err(e) if e.is_builder() => Err(MomoError::Validation(format!(
                "invalid request for {}: {}",
                operation, e
            ))),
            Err(e) => {
                let err = transport_error(&e);
                warn!(operation, kind = %err.kind, "Transport failure: {}", err.message);
                Err(err.into())
            }
        }
    }
}

fn transport_error(err: &reqwest::Error) -> TransportError {
    let kind = if err.is_timeout() {
        TransportErrorKind::Timeout
    } else if err.is_connect() {
        TransportErrorKind::Connect
    } else {
        TransportErrorKind::Other
    };
    let message = match std::error::Error::source(err) {
        Some(source) => format!("{}: {}", err, source),
        None => err.to_string(),
    };
    TransportError::new(kind, message)
}

/// Passes the body through when the status is the one the operation expects.
fn expect_status(status: StatusCode, expected: StatusCode, body: String) -> Result<String, MomoError> {
    if status == expected {
        Ok(body)
    } else {
        warn!(status = status.as_u16(), expected = expected.as_u16(), "Unexpected provider status");
        Err(MomoError::api(status.as_u16(), body))
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, MomoError> {
    serde_json::from_str(body).map_err(|e| MomoError::decode(&e, body))
}

fn validate_payment(request: &PaymentRequest) -> Result<(), MomoError> {
    if request.amount.trim().is_empty() {
        return Err(MomoError::Validation("amount is required".into()));
    }
    if request.currency.trim().is_empty() {
        return Err(MomoError::Validation("currency is required".into()));
    }
    if request.payer.party_id.trim().is_empty() {
        return Err(MomoError::Validation("payer party id is required".into()));
    }
    Ok(())
}

#[async_trait::async_trait]
impl CollectionApi for MomoClient {
    async fn create_api_user(
        &self,
        reference_id: &str,
        callback_host: &str,
    ) -> Result<(), MomoError> {
        MomoClient::create_api_user(self, reference_id, callback_host).await
    }

    async fn create_api_key(&self, reference_id: &str) -> Result<String, MomoError> {
        MomoClient::create_api_key(self, reference_id).await
    }

    async fn get_api_user_details(&self, reference_id: &str) -> Result<ApiUserDetails, MomoError> {
        MomoClient::get_api_user_details(self, reference_id).await
    }

    async fn get_auth_token(&self) -> Result<AuthToken, MomoError> {
        MomoClient::get_auth_token(self).await
    }

    async fn create_oauth2_token(&self, auth_req_id: &str) -> Result<Oauth2Token, MomoError> {
        MomoClient::create_oauth2_token(self, auth_req_id).await
    }

    async fn get_account_balance(&self, bearer_token: &str) -> Result<Balance, MomoError> {
        MomoClient::get_account_balance(self, bearer_token).await
    }

    async fn request_to_pay(
        &self,
        bearer_token: &str,
        request: &PaymentRequest,
    ) -> Result<ReferenceId, MomoError> {
        MomoClient::request_to_pay(self, bearer_token, request).await
    }

    async fn get_payment_status(
        &self,
        reference_id: &str,
        bearer_token: &str,
    ) -> Result<PaymentResult, MomoError> {
        MomoClient::get_payment_status(self, reference_id, bearer_token).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ClientConfig {
        ClientConfig::new("sub", "key", "user", TargetEnvironment::Sandbox)
    }

    #[test]
    fn test_client_creation() {
        let client = MomoClient::new(config().with_base_url("http://localhost:3000")).unwrap();
        assert_eq!(client.config().base_url, "http://localhost:3000");
    }

    #[test]
    fn test_client_with_trailing_slash() {
        let mut cfg = config();
        cfg.base_url = "http://localhost:3000/".into();
        let client = MomoClient::new(cfg).unwrap();
        assert_eq!(client.config().base_url, "http://localhost:3000");
    }

    #[test]
    fn test_client_normalizes_provisioning_prefix() {
        let mut cfg = config();
        cfg.provisioning_prefix = "provisioning/v1_0".into();
        let client = MomoClient::new(cfg).unwrap();
        assert_eq!(client.config().provisioning_prefix, "/provisioning/v1_0");

        let mut cfg = config();
        cfg.provisioning_prefix = "/".into();
        let client = MomoClient::new(cfg).unwrap();
        assert_eq!(client.config().provisioning_prefix, "");
    }

    #[test]
    fn test_blank_credentials_accepted() {
        let client = MomoClient::new(ClientConfig::new("", "", "", TargetEnvironment::Sandbox));
        assert!(client.is_ok());
    }

    #[test]
    fn test_call_options_do_not_touch_original() {
        let client = MomoClient::new(config()).unwrap();
        let scoped = client
            .with_timeout(Duration::from_secs(5))
            .with_cancellation(CancellationToken::new());
        assert_eq!(scoped.call_timeout, Some(Duration::from_secs(5)));
        assert!(scoped.cancel.is_some());
        assert!(client.call_timeout.is_none());
        assert!(client.cancel.is_none());
    }

    #[test]
    fn test_expect_status_mismatch_is_api_error() {
        let err = expect_status(StatusCode::CONFLICT, StatusCode::CREATED, "dup".into()).unwrap_err();
        assert!(matches!(err, MomoError::Api { status: 409, ref body, .. } if body == "dup"));
    }

    #[test]
    fn test_decode_failure_is_decode_error() {
        let err = decode::<AuthToken>("not json").unwrap_err();
        assert!(matches!(err, MomoError::Decode { ref body, .. } if body == "not json"));
    }

    #[test]
    fn test_payment_validation() {
        let mut req = PaymentRequest {
            amount: "100".into(),
            currency: "EUR".into(),
            external_id: "1".into(),
            payer: Payer::msisdn("46733123453"),
            payer_message: String::new(),
            payee_note: String::new(),
        };
        assert!(validate_payment(&req).is_ok());
        req.payer.party_id.clear();
        assert!(matches!(validate_payment(&req), Err(MomoError::Validation(_))));
    }

    #[test]
    fn test_client_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MomoClient>();
    }
}
