//! S3 fetch client.
//!
//! Wraps an `aws-sdk-s3` client scoped to one region and credentials
//! provider, exposing the single [`ObjectFetch`] operation the binder
//! needs.  Stateless per call aside from the held client.

use aws_credential_types::provider::SharedCredentialsProvider;
use aws_sdk_s3::Client;
use bytes::Bytes;
use std::future::Future;
use std::pin::Pin;
use tracing::debug;

use crate::descriptor::ConfigDescriptor;
use crate::errors::FetchError;
use crate::fetch::ObjectFetch;

/// Fetch client backed by the AWS S3 SDK.
pub struct S3ObjectClient {
    client: Client,
}

impl S3ObjectClient {
    /// Build an SDK client scoped to the descriptor's region, endpoint,
    /// and the supplied credentials provider.
    pub async fn connect(
        descriptor: &ConfigDescriptor,
        credentials: SharedCredentialsProvider,
    ) -> Self {
        let mut config_loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(descriptor.region.clone()))
            .credentials_provider(credentials);

        if let Some(ref endpoint) = descriptor.endpoint_url {
            config_loader = config_loader.endpoint_url(endpoint);
        }

        let sdk_config = config_loader.load().await;

        let s3_config_builder = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(descriptor.force_path_style);

        Self {
            client: Client::from_conf(s3_config_builder.build()),
        }
    }
}

impl ObjectFetch for S3ObjectClient {
    fn fetch_object(
        &self,
        bucket: &str,
        key: &str,
    ) -> Pin<Box<dyn Future<Output = Result<Bytes, FetchError>> + Send + '_>> {
        let bucket = bucket.to_string();
        let key = key.to_string();
        Box::pin(async move {
            debug!("S3 get_object: bucket={} key={}", bucket, key);

            let resp = self
                .client
                .get_object()
                .bucket(&bucket)
                .key(&key)
                .send()
                .await
                .map_err(|e| {
                    // Absent and inaccessible collapse to the same variant;
                    // the caller cannot act differently on either.
                    let service_err = e.into_service_error();
                    FetchError::ObjectNotFound {
                        bucket: bucket.clone(),
                        key: key.clone(),
                        reason: service_err.to_string(),
                    }
                })?;

            let body = resp.body.collect().await.map_err(|e| FetchError::ReadError {
                bucket: bucket.clone(),
                key: key.clone(),
                reason: e.to_string(),
            })?;

            Ok(body.into_bytes())
        })
    }
}
