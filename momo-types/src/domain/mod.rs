//! Domain models exchanged with the mobile-money provider.

pub mod account;
pub mod payment;
pub mod reference;
pub mod token;

pub use account::{ApiUserDetails, Balance};
pub use payment::{ErrorReason, PartyIdType, Payer, PaymentRequest, PaymentResult, PaymentStatus};
pub use reference::ReferenceId;
pub use token::{AuthToken, Oauth2Token};
