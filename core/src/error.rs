//! Error types for the todo API client and store.
//!
//! # Design
//! `NotFound` gets a dedicated variant because callers frequently
//! distinguish "the record does not exist" from "the server returned an
//! unexpected status." Other non-2xx responses land in `Server` with the
//! raw status and body for debugging. `Network` is constructed by the
//! host when a request never produced a response at all; the core never
//! creates it itself.
//!
//! None of these are fatal to the store: every variant is caught at the
//! operation boundary, logged, and turned into a transient notice.

use thiserror::Error;

/// Errors surfaced by `TodoApi` parsing and by hosts executing requests.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404 — the requested todo does not exist.
    #[error("record not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("server returned HTTP {status}: {body}")]
    Server { status: u16, body: String },

    /// The request was never answered (DNS failure, refused connection,
    /// dropped socket). Reported by the host, not by the core.
    #[error("request failed in transit: {0}")]
    Network(String),

    /// The response body could not be decoded into the expected envelope.
    #[error("response could not be decoded: {0}")]
    Decode(String),

    /// The request payload could not be encoded to JSON.
    #[error("request could not be encoded: {0}")]
    Encode(String),
}
