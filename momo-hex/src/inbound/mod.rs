//! HTTP Inbound Adapter
//!
//! Axum-based HTTP facade that drives the collection service.

mod handlers;
mod server;

pub use server::HttpServer;
