use thiserror::Error;

mod colors;
mod domain_types;
mod ids;
mod time;

pub use colors::*;
pub use domain_types::*;
pub use ids::*;
pub use time::*;

/// A request that could not be formed locally.
///
/// Every variant is raised before any network call is attempted.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid Notion ID format: {0}")]
    InvalidId(String),

    #[error("Invalid API key format: {reason}")]
    InvalidApiKey { reason: String },

    #[error("Invalid URL: {url} - {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Invalid header value for {name}: {reason}")]
    InvalidHeader { name: &'static str, reason: String },

    #[error("Empty required field: {0}")]
    EmptyField(&'static str),

    #[error("Page parent is missing: set either a parent page or a parent database")]
    MissingParent,

    #[error("Page parent is ambiguous: both a parent page and a parent database are set")]
    ConflictingParents,

    #[error("A title is required when the parent is a page")]
    MissingTitle,

    #[error("Malformed {field}: {reason}")]
    MalformedQuery { field: &'static str, reason: String },

    #[error("Failed to encode request body: {0}")]
    BodyEncoding(#[source] serde_json::Error),
}
