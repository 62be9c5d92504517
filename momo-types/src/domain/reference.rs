//! Correlation identifiers for provisioning and payment operations.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::MomoError;

/// Identifier sent as `X-Reference-Id` and used as a path segment.
///
/// Only ASCII alphanumerics, `-`, `_` and `.` are accepted, so a value is
/// always a legal header value and never escapes its path segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
#[schema(value_type = String, example = "3f1c5a4e-8b7d-4e2f-9a61-0d2c7b9e4f10")]
pub struct ReferenceId(String);

impl ReferenceId {
    /// Creates a new random (UUID v4) reference id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Validates a caller-supplied reference id.
    pub fn parse(value: &str) -> Result<Self, MomoError> {
        if value.is_empty() {
            return Err(MomoError::Validation("reference id is required".into()));
        }
        if let Some(c) = value
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')))
        {
            return Err(MomoError::Validation(format!(
                "reference id contains invalid character {:?}",
                c
            )));
        }
        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for ReferenceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for ReferenceId {
    type Err = MomoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ReferenceId {
    type Error = MomoError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ReferenceId> for String {
    fn from(id: ReferenceId) -> Self {
        id.0
    }
}

impl AsRef<str> for ReferenceId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
