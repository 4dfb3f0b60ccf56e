//! Error types for otasync-store.

use thiserror::Error;

/// All errors that can arise talking to the remote content store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store answered with a non-success status.
    #[error("request for {path} failed with status {status}")]
    Status { path: String, status: u16 },

    /// Transport-level failure (DNS, TLS, connect, read).
    #[error("request for {path} failed: {source}")]
    Request {
        path: String,
        #[source]
        source: Box<ureq::Error>,
    },

    /// The response body was not the expected JSON envelope.
    #[error("unexpected response body for {path}: {source}")]
    Envelope {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The envelope's `content` field was not valid base64.
    #[error("malformed base64 content at {path}: {source}")]
    Base64 {
        path: String,
        #[source]
        source: base64::DecodeError,
    },

    /// The decoded content was not valid UTF-8.
    #[error("content at {path} is not valid UTF-8")]
    Utf8 { path: String },
}
