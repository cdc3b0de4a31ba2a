//! Abstract object-fetch trait.
//!
//! The binder works in terms of [`ObjectFetch`] so it does not need to
//! know where the bytes physically come from.  [`crate::s3::S3ObjectClient`]
//! is the production implementation; tests and alternate stores supply
//! their own via [`crate::bind_with`].

use bytes::Bytes;
use std::future::Future;
use std::pin::Pin;

use crate::errors::FetchError;

/// Async "get object bytes by bucket and key" contract.
pub trait ObjectFetch: Send + Sync + 'static {
    /// Fetch the full object at `bucket`/`key`.
    fn fetch_object(
        &self,
        bucket: &str,
        key: &str,
    ) -> Pin<Box<dyn Future<Output = Result<Bytes, FetchError>> + Send + '_>>;
}
