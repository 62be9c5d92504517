//! Account-level provider payloads.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Details of a provisioned API user.
///
/// The provider does not publish a fixed schema for this payload, so it is
/// kept as an open key/value map.
pub type ApiUserDetails = BTreeMap<String, serde_json::Value>;

/// Available balance of the collection account.
///
/// The amount is kept as the provider's decimal string to avoid any
/// floating-point rounding.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Balance {
    #[serde(default)]
    #[schema(example = "1000")]
    pub available_balance: String,
    /// ISO-4217 currency code
    #[serde(default)]
    #[schema(example = "EUR")]
    pub currency: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balance_wire_names() {
        let balance: Balance =
            serde_json::from_str(r#"{"availableBalance":"1000","currency":"USD"}"#).unwrap();
        assert_eq!(
            balance,
            Balance {
                available_balance: "1000".into(),
                currency: "USD".into(),
            }
        );
    }

    #[test]
    fn test_user_details_is_open_map() {
        let details: ApiUserDetails = serde_json::from_str(
            r#"{"providerCallbackHost":"example.com","targetEnvironment":"sandbox","extra":1}"#,
        )
        .unwrap();
        assert_eq!(details["providerCallbackHost"], "example.com");
        assert_eq!(details["extra"], 1);
    }
}
