//! Error types for the HTTP client.
//!
//! # Design
//! Each variant corresponds to one stage of the request pipeline, so callers
//! can tell "the request was never sent" apart from "the server could not be
//! reached" or "the body was not the JSON I expected". Variants carry the
//! underlying message as a `String` so the error stays `Clone`: the same value
//! is returned to the caller and kept on the `Client` for later inspection.

use thiserror::Error;

/// Errors produced while building, sending, reading or decoding a request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// The URL, method, query or headers could not form a valid request.
    /// Nothing was sent.
    #[error("invalid request: {0}")]
    Build(String),

    /// The transport failed: DNS, connection refused, timeout expiry.
    #[error("transport failed: {0}")]
    Transport(String),

    /// The response arrived but its body could not be drained.
    #[error("reading response body failed: {0}")]
    Read(String),

    /// The stored body is not valid JSON for the requested shape.
    #[error("decoding response body failed: {0}")]
    Decode(String),
}

impl From<ureq::Error> for ClientError {
    fn from(err: ureq::Error) -> Self {
        ClientError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}
