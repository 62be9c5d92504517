//! Port traits (interfaces for adapters).
//!
//! The facade's service layer depends on these traits, not on the concrete
//! HTTP client, so it can be driven by a test double.

mod collection;

pub use collection::CollectionApi;
