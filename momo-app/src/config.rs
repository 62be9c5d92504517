//! Configuration loading from environment.

use std::env;
use std::time::Duration;

use anyhow::Context;
use momo_client::{AuthScheme, ClientConfig, TargetEnvironment};

/// Application configuration.
pub struct Config {
    pub port: u16,
    pub client: ClientConfig,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Credentials may be blank; the provider rejects them on first use.
    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |key: &str| get(key).map(|v| v.trim().to_string()).unwrap_or_default();

        let port = match var("PORT").as_str() {
            "" => 8080,
            raw => raw.parse().with_context(|| format!("invalid PORT: {raw}"))?,
        };

        let environment: TargetEnvironment = var("MOMO_ENVIRONMENT")
            .parse()
            .map_err(|e: String| anyhow::anyhow!(e))?;
        let auth_scheme: AuthScheme = var("MOMO_AUTH_SCHEME")
            .parse()
            .map_err(|e: String| anyhow::anyhow!(e))?;

        let mut client = ClientConfig::new(
            var("MOMO_SUBSCRIPTION_KEY"),
            var("MOMO_API_KEY"),
            var("MOMO_API_USER_ID"),
            environment,
        )
        .with_auth_scheme(auth_scheme);

        let base_url = var("MOMO_BASE_URL");
        if !base_url.is_empty() {
            client = client.with_base_url(base_url);
        }

        let prefix = var("MOMO_PROVISIONING_PREFIX");
        if !prefix.is_empty() {
            client = client.with_provisioning_prefix(prefix);
        }

        let timeout = var("MOMO_TIMEOUT_SECS");
        if !timeout.is_empty() {
            let secs: u64 = timeout
                .parse()
                .with_context(|| format!("invalid MOMO_TIMEOUT_SECS: {timeout}"))?;
            client = client.with_timeout(Duration::from_secs(secs));
        }

        Ok(Self { port, client })
    }
}
