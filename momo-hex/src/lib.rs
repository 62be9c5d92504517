//! # MoMo Hex
//!
//! Application service layer and HTTP facade for the collection client.
//!
//! ## Architecture
//!
//! - `service/` - Application service (facade input rules over the port)
//! - `inbound/` - HTTP adapter (Axum server)
//! - `openapi/` - OpenAPI document served next to the routes
//!
//! The service is generic over `A: CollectionApi`, so the HTTP client and
//! test doubles are interchangeable.

pub mod inbound;
pub mod openapi;
pub mod service;

#[cfg(test)]
mod service_tests;

pub use service::CollectionService;
