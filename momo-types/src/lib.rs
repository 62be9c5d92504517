//! # MoMo Types
//!
//! Value objects and port traits for the mobile-money collection API.
//! This crate has ZERO IO dependencies - only data structures, the error
//! taxonomy callers match on, and trait definitions.
//!
//! ## Architecture
//!
//! - `domain/` - Provider payloads (tokens, balance, payments, reference ids)
//! - `ports/` - The `CollectionApi` trait the HTTP client implements
//! - `dto/` - Request/response bodies of the HTTP facade
//! - `error/` - Client error taxonomy and facade error mapping

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    ApiUserDetails, AuthToken, Balance, ErrorReason, Oauth2Token, PartyIdType, Payer,
    PaymentRequest, PaymentResult, PaymentStatus, ReferenceId,
};
pub use dto::*;
pub use error::{AppError, MomoError, TransportError, TransportErrorKind};
pub use ports::CollectionApi;
