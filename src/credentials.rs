//! Credential resolution for the three auth modes.
//!
//! Resolution is infallible by contract: it only selects and wraps a
//! provider.  A role lookup or missing environment variable surfaces
//! later, when the provider is asked to sign an actual request.

use aws_config::environment::credentials::EnvironmentVariableCredentialsProvider;
use aws_config::imds::credentials::ImdsCredentialsProvider;
use aws_credential_types::provider::SharedCredentialsProvider;
use aws_credential_types::Credentials;

use crate::descriptor::{AuthMode, ConfigDescriptor};

/// Provider name attached to static credentials, visible in SDK traces.
const STATIC_PROVIDER_NAME: &str = "s3config-static";

/// Select the credentials provider matching the descriptor's auth mode.
pub fn resolve(descriptor: &ConfigDescriptor) -> SharedCredentialsProvider {
    match descriptor.auth {
        AuthMode::Role => {
            SharedCredentialsProvider::new(ImdsCredentialsProvider::builder().build())
        }
        AuthMode::Environment => {
            SharedCredentialsProvider::new(EnvironmentVariableCredentialsProvider::new())
        }
        AuthMode::StaticKeys => {
            // validate() guarantees the pair for this mode; an empty pair
            // would fail at request signing, matching the lazy-failure
            // contract of the other modes.
            let (access_key, secret_key) = match &descriptor.static_credentials {
                Some(c) => (c.access_key.clone(), c.secret_key.clone()),
                None => (String::new(), String::new()),
            };
            SharedCredentialsProvider::new(Credentials::new(
                access_key,
                secret_key,
                None,
                None,
                STATIC_PROVIDER_NAME,
            ))
        }
    }
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use aws_credential_types::provider::ProvideCredentials;

    #[tokio::test]
    async fn test_static_keys_resolve_to_supplied_pair() {
        let descriptor = ConfigDescriptor::new(
            AuthMode::StaticKeys,
            "us-east-1",
            "bucket",
            "config.yml",
        )
        .static_keys("AKIAEXAMPLE", "wJalrXUtnFEMI");

        let provider = resolve(&descriptor);
        let creds = provider.provide_credentials().await.unwrap();
        assert_eq!(creds.access_key_id(), "AKIAEXAMPLE");
        assert_eq!(creds.secret_access_key(), "wJalrXUtnFEMI");
    }

    #[tokio::test]
    async fn test_environment_mode_reads_process_env() {
        // Resolution itself must not fail even when the variables are
        // absent; only provide_credentials() may.
        let descriptor =
            ConfigDescriptor::new(AuthMode::Environment, "us-east-1", "bucket", "config.yml");
        let _provider = resolve(&descriptor);
    }
}
