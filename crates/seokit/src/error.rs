//! Error type shared by the library.

use thiserror::Error;

/// Errors raised while assembling or persisting SEO metadata.
///
/// Invalid enumerated values (Open Graph type, card type, determiner) are
/// never errors; they are coerced or ignored by the builders.
#[derive(Debug, Error)]
pub enum SeoError {
    /// Structured data could not be encoded as JSON.
    #[error("failed to encode structured data: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A schema helper received something other than a JSON object.
    #[error("structured data must be a JSON object, got {0}")]
    InvalidSchema(&'static str),

    /// The override table name is not a plain SQL identifier.
    #[error("invalid table name: {0:?}")]
    InvalidTableName(String),

    /// The override database failed.
    #[error("override store error: {0}")]
    Store(#[from] rusqlite::Error),

    /// Configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A request URL could not be parsed.
    #[error("invalid request url {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = SeoError> = std::result::Result<T, E>;
