//! Salesforce object metadata to OpenAPI.
//!
//! Fetches the describe result for one object and specializes a generic
//! OpenAPI template into a contract for that object's CRUD and query
//! endpoints. The binary in `services/cli` is a thin wrapper around
//! [`pipeline::generate`].

pub mod client;
pub mod error;
pub mod mapping;
pub mod metadata;
pub mod output;
pub mod pipeline;
pub mod specializer;
pub mod template;
pub mod urls;

pub use error::{Error, Result};
