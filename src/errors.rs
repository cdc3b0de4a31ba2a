//! Error taxonomy for the bind pipeline.
//!
//! Each stage has its own error enum -- descriptor validation, object
//! fetch, payload decode -- and [`BindError`] composes them for the
//! synchronous initial bind.  Background refresh cycles reuse the same
//! types but report them through `tracing` instead of propagating.

use thiserror::Error;

use crate::descriptor::AuthMode;

/// A descriptor failed validation.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The descriptor carries no region.
    #[error("region is required for auth mode '{mode}'")]
    MissingRegion { mode: AuthMode },

    /// Static-key auth was selected but the key pair is absent or empty.
    #[error("static-key auth requires a non-empty access key and secret key")]
    MissingCredentials,

    /// Bucket or object name is empty.
    #[error("bucket and object name must be non-empty")]
    MissingLocation,

    /// An auth-mode string did not name a recognized mode.
    #[error("unrecognized auth mode '{0}'")]
    UnknownAuthMode(String),
}

/// The remote object could not be retrieved.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The store reported the object absent or inaccessible.
    #[error("object not found [{bucket}/{key}]: {reason}")]
    ObjectNotFound {
        bucket: String,
        key: String,
        reason: String,
    },

    /// The object exists but its body could not be fully read.
    #[error("failed to read object body [{bucket}/{key}]: {reason}")]
    ReadError {
        bucket: String,
        key: String,
        reason: String,
    },
}

/// The fetched payload could not be decoded into the target type.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Not valid YAML, or valid YAML whose shape does not match the target.
    #[error("malformed configuration payload: {source} (payload: {snippet})")]
    MalformedPayload {
        #[source]
        source: serde_yaml::Error,
        /// Truncated rendering of the offending payload.
        snippet: String,
    },
}

/// Everything the synchronous initial bind can fail with.
#[derive(Debug, Error)]
pub enum BindError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}
