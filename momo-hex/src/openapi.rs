//! OpenAPI specification and documentation.

#![allow(dead_code)] // Path functions are only used by utoipa for documentation generation

use momo_types::domain::{
    AuthToken, Balance, ErrorReason, Oauth2Token, PartyIdType, Payer, PaymentRequest,
    PaymentResult, PaymentStatus, ReferenceId,
};
use momo_types::dto::{
    AuthTokenResponse, BalanceResponse, CreateApiKeyRequest, CreateApiKeyResponse,
    CreateApiUserRequest, CreateApiUserResponse, Oauth2TokenRequest, RequestToPayResponse,
};
use utoipa::{
    Modify, OpenApi,
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
};

// Dummy functions to generate path documentation
// These are not the actual handlers, just for OpenAPI path generation

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = inline(serde_json::Value), example = json!({"status": "healthy"}))
    )
)]
async fn health() {}

/// Provision an API user
#[utoipa::path(
    post,
    path = "/create-api-user",
    tag = "provisioning",
    request_body = CreateApiUserRequest,
    responses(
        (status = 201, description = "API user created", body = CreateApiUserResponse),
        (status = 400, description = "Invalid reference id or missing callback host"),
        (status = 500, description = "Provider rejected the call")
    )
)]
async fn create_api_user() {}

/// Issue an API key
#[utoipa::path(
    post,
    path = "/create-api-key",
    tag = "provisioning",
    request_body = CreateApiKeyRequest,
    responses(
        (status = 201, description = "API key issued", body = CreateApiKeyResponse),
        (status = 400, description = "Reference ID is required"),
        (status = 500, description = "Provider rejected the call")
    )
)]
async fn create_api_key() {}

/// Get API user details
#[utoipa::path(
    get,
    path = "/api-user/{reference_id}",
    tag = "provisioning",
    params(
        ("reference_id" = String, Path, description = "Reference id the user was registered with")
    ),
    responses(
        (status = 200, description = "Provider's record of the user", body = inline(serde_json::Value)),
        (status = 500, description = "Provider rejected the call")
    )
)]
async fn get_api_user_details() {}

/// Fetch a bearer token
#[utoipa::path(
    post,
    path = "/get-auth-token",
    tag = "auth",
    responses(
        (status = 200, description = "Token issued", body = AuthTokenResponse),
        (status = 500, description = "Provider rejected the credentials")
    )
)]
async fn get_auth_token() {}

/// Poll the backchannel (CIBA) token endpoint
#[utoipa::path(
    post,
    path = "/create-oauth2-token",
    tag = "auth",
    request_body(content = Oauth2TokenRequest, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Token issued", body = Oauth2Token),
        (status = 400, description = "auth_req_id is required"),
        (status = 500, description = "Authorization pending, denied or expired")
    )
)]
async fn create_oauth2_token() {}

/// Read the collection account balance
#[utoipa::path(
    get,
    path = "/get-account-balance",
    tag = "collection",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current balance", body = BalanceResponse),
        (status = 400, description = "Authorization header missing"),
        (status = 500, description = "Provider rejected the call")
    )
)]
async fn get_account_balance() {}

/// Submit a request to pay
#[utoipa::path(
    post,
    path = "/request-to-pay",
    tag = "collection",
    security(("bearer_auth" = [])),
    request_body = PaymentRequest,
    responses(
        (status = 202, description = "Accepted; poll the returned reference id", body = RequestToPayResponse),
        (status = 400, description = "Authorization header missing or invalid body"),
        (status = 500, description = "Provider rejected the call")
    )
)]
async fn request_to_pay() {}

/// Poll the status of a request to pay
#[utoipa::path(
    get,
    path = "/payment-status/{reference_id}",
    tag = "collection",
    security(("bearer_auth" = [])),
    params(
        ("reference_id" = String, Path, description = "Reference id returned by /request-to-pay")
    ),
    responses(
        (status = 200, description = "Current payment status", body = PaymentResult),
        (status = 400, description = "Authorization header missing"),
        (status = 500, description = "Provider rejected the call")
    )
)]
async fn get_payment_status() {}

/// OpenAPI documentation for the collection facade.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Mobile Money Collection API",
        version = "1.0.0",
        description = "HTTP facade over the mobile-money collection API: API user provisioning, token issuance, balance inquiry and request to pay.\n\n## Authentication\n\nCollection endpoints forward the caller's bearer token to the provider. Obtain one from `/get-auth-token`, then send it in the `Authorization` header:\n\n```\nAuthorization: Bearer <access_token>\n```",
        license(name = "MIT"),
    ),
    paths(
        health,
        create_api_user,
        create_api_key,
        get_api_user_details,
        get_auth_token,
        create_oauth2_token,
        get_account_balance,
        request_to_pay,
        get_payment_status,
    ),
    components(
        schemas(
            CreateApiUserRequest,
            CreateApiUserResponse,
            CreateApiKeyRequest,
            CreateApiKeyResponse,
            AuthTokenResponse,
            AuthToken,
            Oauth2TokenRequest,
            Oauth2Token,
            BalanceResponse,
            Balance,
            PaymentRequest,
            Payer,
            PartyIdType,
            RequestToPayResponse,
            PaymentResult,
            PaymentStatus,
            ErrorReason,
            ReferenceId,
        )
    ),

    modifiers(&SecurityAddon),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "provisioning", description = "API user and API key provisioning"),
        (name = "auth", description = "Token issuance"),
        (name = "collection", description = "Balance inquiry and request to pay"),
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for Bearer token authentication.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();
        for expected in [
            "/health",
            "/create-api-user",
            "/create-api-key",
            "/api-user/{reference_id}",
            "/get-auth-token",
            "/create-oauth2-token",
            "/get-account-balance",
            "/request-to-pay",
            "/payment-status/{reference_id}",
        ] {
            assert!(paths.contains(&expected), "missing {expected}");
        }
    }
}
