//! Error types for the avatar service client.
//!
//! # Design
//! A non-2xx status or a `success: false` envelope is an expected outcome of
//! talking to the service and is returned as a value
//! ([`AvatarResult::Failure`](crate::types::AvatarResult)), not as an error.
//! `ApiError` is reserved for faults the caller cannot recover from inside
//! one operation: the round trip never happened, the service answered with a
//! body that does not match the contract, or the payload could not be written.

use std::io;
use std::path::PathBuf;

/// Faults raised by `AvatarClient` and `AvatarService`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The transport could not complete the round trip (connection refused,
    /// DNS failure, broken body stream).
    #[error("transport failed: {0}")]
    Transport(String),

    /// A 2xx response whose body does not match the expected JSON shape.
    #[error("unexpected response shape: {0}")]
    UnexpectedShape(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// An asset filename that does not name a single entry inside the
    /// output directory (empty, absolute, or containing separators or `..`).
    #[error("invalid asset filename: {0:?}")]
    InvalidFilename(String),

    /// A downloaded asset could not be written to disk.
    #[error("failed to persist {}: {source}", path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Errors returned by a [`Presenter`](crate::presenter::Presenter).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PresentError {
    #[error("surface not found: {0}")]
    SurfaceNotFound(String),
}
