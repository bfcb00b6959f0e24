//! Error taxonomy for fetching metadata and specializing the template.

use std::path::PathBuf;

/// A convenience alias used across the core crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Fatal failures. Unmapped field types are not errors; they are recorded as
/// [`crate::mapping::UnmappedFieldType`] warnings instead.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The authorization server rejected the client-credentials grant.
    #[error("Authentication failed with status {status}: {body}")]
    Authentication { status: u16, body: String },

    /// The describe call returned a status outside 200..=299.
    #[error("Describe call failed with status {status}: {body}")]
    RemoteMetadata { status: u16, body: String },

    /// The template lacks a structure the specializer relies on.
    #[error("Template is missing expected structure: {0}")]
    TemplateShape(String),

    /// The template file could not be read or is not valid JSON.
    #[error("Could not load template from {path}: {message}")]
    Template { path: PathBuf, message: String },

    #[error("Could not write output to {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A 2xx response whose body did not have the expected shape.
    #[error("Unexpected response body: {0}")]
    InvalidResponse(#[from] serde_json::Error),
}
