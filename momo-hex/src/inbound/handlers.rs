//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Form, Json,
    extract::{
        Path, State,
        rejection::{FormRejection, JsonRejection},
    },
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    response::{IntoResponse, Response},
};

use momo_types::{
    AppError, AuthTokenResponse, BalanceResponse, CollectionApi, CreateApiKeyRequest,
    CreateApiKeyResponse, CreateApiUserRequest, CreateApiUserResponse, Oauth2TokenRequest,
    PaymentRequest, RequestToPayResponse,
};

use crate::CollectionService;

/// Application state shared across handlers.
pub struct AppState<A: CollectionApi> {
    pub service: CollectionService<A>,
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError(AppError::BadRequest(rejection.body_text()))
    }
}

impl From<FormRejection> for ApiError {
    fn from(rejection: FormRejection) -> Self {
        ApiError(AppError::BadRequest(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self.0 {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), "{}", message);
        }

        let body = serde_json::json!({
            "error": message,
            "code": status.as_u16()
        });

        (status, Json(body)).into_response()
    }
}

/// Extracts the caller's bearer token from the Authorization header.
/// Expected format: "Bearer <token>" or just "<token>"
fn bearer_token(headers: &HeaderMap) -> Result<String, AppError> {
    let raw = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .trim();

    let token = match raw.split_once(' ') {
        Some((scheme, rest)) if scheme.eq_ignore_ascii_case("bearer") => rest.trim(),
        _ if raw.eq_ignore_ascii_case("bearer") => "",
        _ => raw,
    };
    if token.is_empty() {
        return Err(AppError::BadRequest("Authorization header missing".into()));
    }
    Ok(token.to_string())
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

// ─────────────────────────────────────────────────────────────────────────────
// Provisioning
// ─────────────────────────────────────────────────────────────────────────────

/// Provision an API user.
#[tracing::instrument(skip_all)]
pub async fn create_api_user<A: CollectionApi>(
    State(state): State<Arc<AppState<A>>>,
    payload: Result<Json<CreateApiUserRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload?;
    let reference_id = state.service.create_api_user(req).await?;
    tracing::info!(reference_id = %reference_id, "API user created");

    Ok((
        StatusCode::CREATED,
        Json(CreateApiUserResponse {
            message: "API user created successfully".into(),
            reference_id,
        }),
    ))
}

/// Issue an API key for a provisioned user.
#[tracing::instrument(skip_all)]
pub async fn create_api_key<A: CollectionApi>(
    State(state): State<Arc<AppState<A>>>,
    payload: Result<Json<CreateApiKeyRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload?;
    let api_key = state.service.create_api_key(&req.reference_id).await?;

    Ok((StatusCode::CREATED, Json(CreateApiKeyResponse { api_key })))
}

/// Get the provider's record of an API user.
#[tracing::instrument(skip(state))]
pub async fn get_api_user_details<A: CollectionApi>(
    State(state): State<Arc<AppState<A>>>,
    Path(reference_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let details = state.service.get_api_user_details(&reference_id).await?;
    Ok(Json(details))
}

// ─────────────────────────────────────────────────────────────────────────────
// Authentication
// ─────────────────────────────────────────────────────────────────────────────

/// Fetch a fresh bearer token with the configured credentials.
#[tracing::instrument(skip_all)]
pub async fn get_auth_token<A: CollectionApi>(
    State(state): State<Arc<AppState<A>>>,
) -> Result<impl IntoResponse, ApiError> {
    let token = state.service.get_auth_token().await?;
    Ok(Json(AuthTokenResponse::from(token)))
}

/// Poll the backchannel token endpoint.
#[tracing::instrument(skip_all)]
pub async fn create_oauth2_token<A: CollectionApi>(
    State(state): State<Arc<AppState<A>>>,
    payload: Result<Form<Oauth2TokenRequest>, FormRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Form(req) = payload?;
    let token = state.service.create_oauth2_token(&req.auth_req_id).await?;
    Ok(Json(token))
}

// ─────────────────────────────────────────────────────────────────────────────
// Collection
// ─────────────────────────────────────────────────────────────────────────────

/// Read the collection account balance.
#[tracing::instrument(skip_all)]
pub async fn get_account_balance<A: CollectionApi>(
    State(state): State<Arc<AppState<A>>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let token = bearer_token(&headers)?;
    let balance = state.service.get_account_balance(&token).await?;
    Ok(Json(BalanceResponse { balance }))
}

/// Submit a request to pay.
#[tracing::instrument(skip_all)]
pub async fn request_to_pay<A: CollectionApi>(
    State(state): State<Arc<AppState<A>>>,
    headers: HeaderMap,
    payload: Result<Json<PaymentRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let token = bearer_token(&headers)?;
    let Json(req) = payload?;
    let reference_id = state.service.request_to_pay(&token, req).await?;
    tracing::info!(reference_id = %reference_id, "Request to pay accepted");

    Ok((
        StatusCode::ACCEPTED,
        Json(RequestToPayResponse {
            message: "Payment request created successfully".into(),
            reference_id,
        }),
    ))
}

/// Poll the status of a request to pay.
#[tracing::instrument(skip(state, headers))]
pub async fn get_payment_status<A: CollectionApi>(
    State(state): State<Arc<AppState<A>>>,
    headers: HeaderMap,
    Path(reference_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let token = bearer_token(&headers)?;
    let result = state
        .service
        .get_payment_status(&reference_id, &token)
        .await?;
    Ok(Json(result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_bearer_token_with_prefix() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        assert_eq!(bearer_token(&headers).unwrap(), "abc");
    }

    #[test]
    fn test_bearer_token_without_prefix() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("abc"));
        assert_eq!(bearer_token(&headers).unwrap(), "abc");
    }

    #[test]
    fn test_bearer_token_missing() {
        assert!(matches!(
            bearer_token(&HeaderMap::new()),
            Err(AppError::BadRequest(_))
        ));

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert!(matches!(bearer_token(&headers), Err(AppError::BadRequest(_))));
    }
}
