//! s3config -- keep a typed configuration value synchronized with a YAML
//! document stored in S3.
//!
//! The initial [`bind`] fetches and decodes the document synchronously and
//! fails fast; on success a background task re-fetches on a fixed interval
//! and publishes each successfully decoded document as a new snapshot.
//! Readers are lock-free and never observe a partially written value.
//!
//! ```no_run
//! use std::time::Duration;
//!
//! use s3config::{bind, AuthMode, ConfigDescriptor};
//! use serde::Deserialize;
//!
//! #[derive(Debug, Default, Deserialize)]
//! struct AppConfig {
//!     #[serde(default)]
//!     server: Server,
//! }
//!
//! #[derive(Debug, Default, Deserialize)]
//! struct Server {
//!     #[serde(default)]
//!     port: String,
//! }
//!
//! # async fn run() -> Result<(), s3config::BindError> {
//! let descriptor = ConfigDescriptor::new(
//!     AuthMode::Environment,
//!     "ap-northeast-1",
//!     "bucket",
//!     "config.yml",
//! )
//! .folder("folder")
//! .refresh_interval(Duration::from_secs(60));
//!
//! let session = bind::<AppConfig>(descriptor).await?;
//! println!("port: {}", session.current().server.port);
//! # Ok(())
//! # }
//! ```

pub mod binder;
pub mod credentials;
pub mod decode;
pub mod descriptor;
pub mod errors;
pub mod fetch;
pub mod s3;

pub use binder::{bind, bind_with, SyncSession};
pub use descriptor::{AuthMode, ConfigDescriptor, StaticCredentials, MIN_REFRESH_INTERVAL};
pub use errors::{BindError, DecodeError, FetchError, ValidationError};
pub use fetch::ObjectFetch;
pub use s3::S3ObjectClient;
