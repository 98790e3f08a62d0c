//! Error types for the todo API client.
//!
//! # Design
//! `NotFound` and `BadRequest` get dedicated variants because callers act on
//! them differently from an unexpected status. All other non-2xx responses
//! land in `HttpError`. The server's `{message}` body is decoded when present;
//! otherwise the raw body is kept. `Transport` is produced by the host when
//! the request never got a response.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404.
    #[error("not found: {0}")]
    NotFound(String),

    /// The server returned 400 (invalid id, missing title, malformed body).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Any other unexpected status.
    #[error("HTTP {status}: {message}")]
    HttpError { status: u16, message: String },

    /// The host could not complete the round-trip.
    #[error("transport failed: {0}")]
    Transport(String),

    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    #[error("serialization failed: {0}")]
    SerializationError(String),
}
