//! Lineup Core - Domain entities, services, and traits.
//!
//! This crate contains the business logic for browsing and curating event
//! line-ups. It is database-agnostic and defines traits that are implemented
//! by the `storage-sqlite` crate.

pub mod errors;
pub mod events;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
