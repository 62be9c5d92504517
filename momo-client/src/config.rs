//! Client configuration.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Provider host used when no base URL is configured.
pub const SANDBOX_BASE_URL: &str = "https://sandbox.momodeveloper.mtn.com";

/// Path prefix of the provisioning endpoints. Some deployments expose them
/// under `/provisioning/v1_0` instead.
pub const DEFAULT_PROVISIONING_PREFIX: &str = "/v1_0";

/// Value of the `X-Target-Environment` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TargetEnvironment {
    #[default]
    Sandbox,
    Production,
}

impl TargetEnvironment {
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetEnvironment::Sandbox => "sandbox",
            TargetEnvironment::Production => "production",
        }
    }
}

impl fmt::Display for TargetEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetEnvironment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "sandbox" => Ok(TargetEnvironment::Sandbox),
            "production" => Ok(TargetEnvironment::Production),
            other => Err(format!(
                "Unknown environment: {}. Supported: sandbox, production",
                other
            )),
        }
    }
}

/// How the token endpoint authenticates the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthScheme {
    /// Only the `Ocp-Apim-Subscription-Key` header
    SubscriptionKey,
    /// HTTP Basic over `api_user_id:api_key`, plus the subscription key
    #[default]
    Basic,
}

impl fmt::Display for AuthScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthScheme::SubscriptionKey => write!(f, "subscription-key"),
            AuthScheme::Basic => write!(f, "basic"),
        }
    }
}

impl FromStr for AuthScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "" | "basic" => Ok(AuthScheme::Basic),
            "subscription-key" | "subscription" => Ok(AuthScheme::SubscriptionKey),
            other => Err(format!(
                "Unknown auth scheme: {}. Supported: basic, subscription-key",
                other
            )),
        }
    }
}

/// Credentials and endpoint settings for one [`crate::MomoClient`].
///
/// Blank credentials are accepted; the provider rejects them on first use.
#[derive(Clone)]
pub struct ClientConfig {
    pub subscription_key: String,
    pub api_key: String,
    pub api_user_id: String,
    pub environment: TargetEnvironment,
    pub auth_scheme: AuthScheme,
    pub base_url: String,
    pub provisioning_prefix: String,
    /// Default deadline for every request; `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    /// Creates a configuration against the sandbox host with Basic auth.
    pub fn new(
        subscription_key: impl Into<String>,
        api_key: impl Into<String>,
        api_user_id: impl Into<String>,
        environment: TargetEnvironment,
    ) -> Self {
        Self {
            subscription_key: subscription_key.into(),
            api_key: api_key.into(),
            api_user_id: api_user_id.into(),
            environment,
            auth_scheme: AuthScheme::default(),
            base_url: SANDBOX_BASE_URL.to_string(),
            provisioning_prefix: DEFAULT_PROVISIONING_PREFIX.to_string(),
            timeout: None,
        }
    }

    /// Points the client at another host (a test double, a production host).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_auth_scheme(mut self, auth_scheme: AuthScheme) -> Self {
        self.auth_scheme = auth_scheme;
        self
    }

    /// Leading and trailing slashes are normalized; `/` means no prefix.
    pub fn with_provisioning_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.provisioning_prefix = normalize_prefix(&prefix.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("subscription_key", &redact(&self.subscription_key))
            .field("api_key", &redact(&self.api_key))
            .field("api_user_id", &self.api_user_id)
            .field("environment", &self.environment)
            .field("auth_scheme", &self.auth_scheme)
            .field("base_url", &self.base_url)
            .field("provisioning_prefix", &self.provisioning_prefix)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// `"provisioning/v1_0/"` becomes `"/provisioning/v1_0"`, `"/"` becomes `""`.
pub(crate) fn normalize_prefix(prefix: &str) -> String {
    match prefix.trim().trim_matches('/') {
        "" => String::new(),
        trimmed => format!("/{}", trimmed),
    }
}

fn redact(secret: &str) -> &'static str {
    if secret.is_empty() { "" } else { "[REDACTED]" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::new("sub", "key", "user", TargetEnvironment::Sandbox);
        assert_eq!(config.base_url, SANDBOX_BASE_URL);
        assert_eq!(config.provisioning_prefix, "/v1_0");
        assert_eq!(config.auth_scheme, AuthScheme::Basic);
        assert!(config.timeout.is_none());
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let config = ClientConfig::new("", "", "", TargetEnvironment::Sandbox)
            .with_base_url("http://localhost:8080/");
        assert_eq!(config.base_url, "http://localhost:8080");
    }

    #[test]
    fn test_provisioning_prefix_normalized() {
        let config = ClientConfig::new("", "", "", TargetEnvironment::Sandbox)
            .with_provisioning_prefix("provisioning/v1_0/");
        assert_eq!(config.provisioning_prefix, "/provisioning/v1_0");
    }

    #[test]
    fn test_root_provisioning_prefix_is_empty() {
        let config = ClientConfig::new("", "", "", TargetEnvironment::Sandbox)
            .with_provisioning_prefix("/");
        assert_eq!(config.provisioning_prefix, "");
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = ClientConfig::new("sub-secret", "key-secret", "user", TargetEnvironment::Sandbox);
        let debug = format!("{:?}", config);
        assert!(!debug.contains("sub-secret"));
        assert!(!debug.contains("key-secret"));
        assert!(debug.contains("user"));
    }

    #[test]
    fn test_parse_environment() {
        assert_eq!("sandbox".parse(), Ok(TargetEnvironment::Sandbox));
        assert_eq!("PRODUCTION".parse(), Ok(TargetEnvironment::Production));
        assert!("staging".parse::<TargetEnvironment>().is_err());
    }

    #[test]
    fn test_parse_auth_scheme() {
        assert_eq!("basic".parse(), Ok(AuthScheme::Basic));
        assert_eq!("subscription_key".parse(), Ok(AuthScheme::SubscriptionKey));
        assert_eq!("Subscription-Key".parse(), Ok(AuthScheme::SubscriptionKey));
        assert!("oauth".parse::<AuthScheme>().is_err());
    }
}
