// src/error.rs
// =============================================================================
// Error types for the library.
//
// The binary uses anyhow (any error, printed and turned into an exit code).
// The library returns this typed Error so a caller can tell a network problem
// from a broken article or a bad slug.
//
// Nothing in the library swallows an error: every failure travels back to the
// caller unchanged. The only extra thing we do is log remote failures where
// they happen (see src/github/client.rs).
// =============================================================================

use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Everything that can go wrong while reading articles.
#[derive(Error, Debug)]
pub enum Error {
    /// Could not reach or understand the remote repository API.
    ///
    /// Covers network errors, auth failures, 404s, malformed JSON, bad
    /// base64 payloads and empty commit lists.
    #[error("Remote access error: {message}")]
    RemoteAccess {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    /// The front matter of an article is structurally invalid or does not
    /// have the fields we need.
    #[error("Front matter error in {path}: {message}")]
    Parse { path: String, message: String },

    /// A slug could not be turned back into a file name.
    #[error("Invalid slug {slug:?}: {reason}")]
    Decode { slug: String, reason: String },

    /// Invalid configuration (base URL, locale, offset...).
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a remote access error without an underlying cause.
    pub fn remote(message: impl Into<String>) -> Self {
        Self::RemoteAccess {
            message: message.into(),
            source: None,
        }
    }

    /// Create a remote access error wrapping the error that caused it.
    pub fn remote_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::RemoteAccess {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn parse(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn decode(slug: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Decode {
            slug: slug.into(),
            reason: reason.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// True for failures that came from the remote API.
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::RemoteAccess { .. })
    }
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
