//! Error types for the two ingestion pipelines and the contact form.
//!
//! Pipeline errors never leave their pipeline: [`crate::fetch`] catches them,
//! logs them and turns them into a fallback state for the page.

use std::time::Duration;

use thiserror::Error;

/// A single HTTP exchange that did not produce a response.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("timed out after {0:?}")]
    Timeout(Duration),

    /// Raised by scripted transports in tests and by anything that fails
    /// before a request is issued.
    #[error("{0}")]
    Other(String),
}

/// Failure of the repository listing call.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("repository listing returned HTTP {status}")]
    Status { status: u16 },

    #[error("could not decode repository listing: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Failure of the newsletter relay chain or of the accepted document.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("no relay returned a feed document ({} attempted)", .failures.len())]
    Unavailable { failures: Vec<RelayFailure> },

    #[error("feed document unusable: {0}")]
    Empty(String),
}

/// Why one relay in the chain was passed over.
#[derive(Debug, Error)]
pub enum RelayFailure {
    #[error("{relay}: {source}")]
    Transport {
        relay: String,
        #[source]
        source: TransportError,
    },

    #[error("{relay}: HTTP {status}")]
    Status { relay: String, status: u16 },

    #[error("{relay}: body has no feed root")]
    NotAFeed { relay: String },
}

/// A contact form submission that failed validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContactError {
    #[error("name must be at least 2 characters")]
    NameTooShort,

    #[error("e-mail address is not valid")]
    InvalidEmail,

    #[error("message must be at least 10 characters")]
    MessageTooShort,
}
