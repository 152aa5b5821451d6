//! Resolution error types

use thiserror::Error;

/// Broad category of a [`DefinitionError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The URL or gist reference was malformed (no network call was made)
    Url,
    /// A network call failed or returned an unusable response
    Fetch,
    /// The fetched content is not a valid server definition document
    Validation,
}

/// Errors that can occur while resolving and validating server definitions
#[derive(Error, Debug)]
pub enum DefinitionError {
    /// Malformed gist reference or unparseable URL
    #[error("Invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Non-success HTTP status
    #[error("Failed to fetch {url}: {status} {status_text}")]
    Status {
        url: String,
        status: u16,
        status_text: String,
    },

    /// Transport fault (DNS, timeout, body decode)
    #[error("Failed to fetch {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// HTTP client could not be constructed from the resolver settings
    #[error("HTTP client error: {0}")]
    Client(#[source] reqwest::Error),

    /// Gist metadata listed no files
    #[error("Gist {id} contains no files")]
    EmptyGist { id: String },

    /// Gist metadata is missing the fields needed to read the first file
    #[error("Malformed gist {id}: {reason}")]
    MalformedGist { id: String, reason: String },

    /// Content is not a valid server definition array
    #[error("Invalid server definitions from {url}: {reason}")]
    Validation { url: String, reason: String },
}

impl DefinitionError {
    /// Create an invalid URL error
    pub fn invalid_url(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Create a status error from a response status
    pub fn status(url: impl Into<String>, status: reqwest::StatusCode) -> Self {
        Self::Status {
            url: url.into(),
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
        }
    }

    /// Create a network error
    pub fn network(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            url: url.into(),
            source,
        }
    }

    /// Create a malformed gist error
    pub fn malformed_gist(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedGist {
            id: id.into(),
            reason: reason.into(),
        }
    }

    /// Create a validation error
    pub fn validation(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidUrl { .. } => ErrorKind::Url,
            Self::Status { .. }
            | Self::Network { .. }
            | Self::Client(_)
            | Self::EmptyGist { .. }
            | Self::MalformedGist { .. } => ErrorKind::Fetch,
            Self::Validation { .. } => ErrorKind::Validation,
        }
    }

    /// HTTP status code, when the failure came from a response
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Network { source, .. } => source.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

pub type DefinitionResult<T> = Result<T, DefinitionError>;
