//! Access tokens issued by the provider.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Bearer token returned by the collection token endpoint.
///
/// Tokens are never cached by the client; callers reuse one for at most
/// `expires_in` seconds. Fields the provider leaves out stay at their
/// default value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct AuthToken {
    pub access_token: String,
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// Lifetime in seconds
    #[schema(example = 3600)]
    pub expires_in: i64,
}

/// Token returned by the backchannel (CIBA) OAuth2 flow.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub struct Oauth2Token {
    #[serde(default)]
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
    #[serde(default)]
    pub expires_in: i64,
    #[serde(default)]
    pub scope: String,
    #[serde(default)]
    pub refresh_token: String,
    #[serde(default)]
    pub refresh_token_expired_in: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_token_decodes_snake_case() {
        let token: AuthToken = serde_json::from_str(
            r#"{"access_token":"tok","token_type":"Bearer","expires_in":3600}"#,
        )
        .unwrap();
        assert_eq!(token.access_token, "tok");
        assert_eq!(token.token_type, "Bearer");
        assert_eq!(token.expires_in, 3600);
    }

    #[test]
    fn test_auth_token_tolerates_missing_fields() {
        let token: AuthToken =
            serde_json::from_str(r#"{"access_token":"tok","token_type":"Bearer"}"#).unwrap();
        assert_eq!(token.access_token, "tok");
        assert_eq!(token.expires_in, 0);
    }

    #[test]
    fn test_oauth2_token_tolerates_missing_fields() {
        let token: Oauth2Token =
            serde_json::from_str(r#"{"access_token":"tok","scope":"profile"}"#).unwrap();
        assert_eq!(token.scope, "profile");
        assert!(token.refresh_token.is_empty());
        assert_eq!(token.refresh_token_expired_in, 0);
    }
}
