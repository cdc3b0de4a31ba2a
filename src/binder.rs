//! Initial bind and background refresh.
//!
//! [`bind`] performs the first fetch+decode synchronously -- all-or-nothing,
//! any failure propagates and no background work starts.  On success it
//! spawns one refresh task per session.  The task re-fetches on a fixed
//! interval, decodes into a fresh value, and publishes it with an atomic
//! pointer swap so readers always see a complete snapshot.  A failed cycle
//! is logged and skipped; the previous snapshot stays live.

use std::sync::Arc;

use arc_swap::ArcSwap;
use serde::de::DeserializeOwned;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::credentials;
use crate::decode::decode_yaml;
use crate::descriptor::ConfigDescriptor;
use crate::errors::BindError;
use crate::fetch::ObjectFetch;
use crate::s3::S3ObjectClient;

/// Live handle to a bound configuration.
///
/// Created by [`bind`] after the initial fetch+decode succeeds.  Owns the
/// background refresh task.  Dropping the handle does not stop the task;
/// call [`SyncSession::shutdown`] for that.
#[derive(Debug)]
pub struct SyncSession<T> {
    snapshot: Arc<ArcSwap<T>>,
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl<T> SyncSession<T> {
    /// Current configuration snapshot.
    ///
    /// Lock-free.  The returned `Arc` stays valid and unchanged even if a
    /// refresh publishes a newer snapshot meanwhile.
    pub fn current(&self) -> Arc<T> {
        self.snapshot.load_full()
    }

    /// Ask the refresh loop to stop.  Honored cooperatively before the
    /// next sleep/fetch cycle; never interrupts a cycle in flight.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    /// Whether the refresh task has exited.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

/// Bind `T` to the YAML document named by `descriptor`.
///
/// Validates the descriptor, resolves credentials for its auth mode,
/// connects an S3 client, and performs the initial fetch+decode on the
/// caller's task.  Only after that succeeds is the refresh loop spawned.
pub async fn bind<T>(descriptor: ConfigDescriptor) -> Result<SyncSession<T>, BindError>
where
    T: DeserializeOwned + Send + Sync + 'static,
{
    let descriptor = descriptor.validate()?;
    let creds = credentials::resolve(&descriptor);
    let client = S3ObjectClient::connect(&descriptor, creds).await;
    bind_with(descriptor, Arc::new(client)).await
}

/// [`bind`] over a caller-supplied fetcher instead of a real S3 client.
pub async fn bind_with<T>(
    descriptor: ConfigDescriptor,
    fetcher: Arc<dyn ObjectFetch>,
) -> Result<SyncSession<T>, BindError>
where
    T: DeserializeOwned + Send + Sync + 'static,
{
    let descriptor = descriptor.validate()?;
    let key = descriptor.object_key();

    // Initial bind is fail-fast: no session, no background task on error.
    let bytes = fetcher.fetch_object(&descriptor.bucket, &key).await?;
    let initial: T = decode_yaml(&bytes)?;

    let snapshot = Arc::new(ArcSwap::from_pointee(initial));
    let cancel = CancellationToken::new();

    info!(
        bucket = %descriptor.bucket,
        key = %key,
        interval_secs = descriptor.refresh_interval.as_secs(),
        "configuration bound; starting refresh loop"
    );

    let task = tokio::spawn(refresh_loop(
        descriptor,
        key,
        fetcher,
        Arc::clone(&snapshot),
        cancel.clone(),
    ));

    Ok(SyncSession {
        snapshot,
        cancel,
        task,
    })
}

/// Periodic re-fetch.  Strictly sequential: a cycle finishes (or fails)
/// before the next sleep begins, so one bound target never has two
/// fetches in flight.
async fn refresh_loop<T>(
    descriptor: ConfigDescriptor,
    key: String,
    fetcher: Arc<dyn ObjectFetch>,
    snapshot: Arc<ArcSwap<T>>,
    cancel: CancellationToken,
) where
    T: DeserializeOwned + Send + Sync + 'static,
{
    loop {
        tokio::select! {
            biased;

            () = cancel.cancelled() => {
                info!(bucket = %descriptor.bucket, key = %key, "refresh loop stopped");
                return;
            }

            () = tokio::time::sleep(descriptor.refresh_interval) => {}
        }

        match refresh_once::<T>(&descriptor, &key, fetcher.as_ref()).await {
            Ok(next) => {
                snapshot.store(Arc::new(next));
                debug!(bucket = %descriptor.bucket, key = %key, "configuration refreshed");
            }
            // A bad cycle never tears down the loop or the live snapshot.
            Err(err) => {
                warn!(
                    bucket = %descriptor.bucket,
                    key = %key,
                    error = %err,
                    "configuration refresh failed; keeping previous snapshot"
                );
            }
        }
    }
}

/// One fetch+decode cycle into a fresh value.  The live snapshot is only
/// replaced by the caller after this returns `Ok`.
async fn refresh_once<T>(
    descriptor: &ConfigDescriptor,
    key: &str,
    fetcher: &dyn ObjectFetch,
) -> Result<T, BindError>
where
    T: DeserializeOwned,
{
    let bytes = fetcher.fetch_object(&descriptor.bucket, key).await?;
    Ok(decode_yaml(&bytes)?)
}

// -- Tests -------------------------------------------------------------------
