//! Configuration descriptor and validation policy.
//!
//! A [`ConfigDescriptor`] names a YAML document in S3 -- bucket, optional
//! folder prefix, object name -- plus the credential strategy and refresh
//! cadence used to keep it bound.  [`ConfigDescriptor::validate`] enforces
//! the required-field invariants and normalizes the refresh interval up to
//! [`MIN_REFRESH_INTERVAL`].

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::errors::ValidationError;

/// Minimum allowed refresh interval.  Descriptors asking for less are
/// silently raised to this floor during validation, never rejected.
pub const MIN_REFRESH_INTERVAL: Duration = Duration::from_secs(30);

/// Credential strategy used to authenticate against S3.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    /// Instance-role credentials issued by the EC2 metadata service.
    Role,
    /// `AWS_ACCESS_KEY_ID` / `AWS_SECRET_ACCESS_KEY` from the process
    /// environment, read at resolution time.
    Environment,
    /// An explicit access/secret key pair supplied in the descriptor.
    StaticKeys,
}

impl AuthMode {
    /// Canonical name, used in logs and error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthMode::Role => "role",
            AuthMode::Environment => "env",
            AuthMode::StaticKeys => "key",
        }
    }
}

impl fmt::Display for AuthMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuthMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "role" => Ok(AuthMode::Role),
            "env" | "environment" => Ok(AuthMode::Environment),
            "key" | "static" => Ok(AuthMode::StaticKeys),
            other => Err(ValidationError::UnknownAuthMode(other.to_string())),
        }
    }
}

/// Explicit key pair for [`AuthMode::StaticKeys`].
#[derive(Debug, Clone)]
pub struct StaticCredentials {
    pub access_key: String,
    pub secret_key: String,
}

/// Where the configuration document lives and how to keep it bound.
#[derive(Debug, Clone)]
pub struct ConfigDescriptor {
    /// Credential strategy for the fetch client.
    pub auth: AuthMode,

    /// AWS region.  Required for every auth mode.
    pub region: String,

    /// Key pair, required iff `auth` is [`AuthMode::StaticKeys`].
    pub static_credentials: Option<StaticCredentials>,

    /// Bucket holding the configuration document.
    pub bucket: String,

    /// Key prefix inside the bucket.  Empty means the object sits at the
    /// bucket root.
    pub folder: String,

    /// Object name of the configuration document.
    pub object_name: String,

    /// Period between background re-fetches.  Clamped up to
    /// [`MIN_REFRESH_INTERVAL`] at validation time.
    pub refresh_interval: Duration,

    /// Custom S3-compatible endpoint (e.g. MinIO, LocalStack).
    pub endpoint_url: Option<String>,

    /// Force path-style URL addressing.
    pub force_path_style: bool,
}

impl ConfigDescriptor {
    /// Descriptor for `bucket`/`object_name` in `region`, with no folder
    /// prefix and the minimum refresh interval.
    pub fn new(
        auth: AuthMode,
        region: impl Into<String>,
        bucket: impl Into<String>,
        object_name: impl Into<String>,
    ) -> Self {
        Self {
            auth,
            region: region.into(),
            static_credentials: None,
            bucket: bucket.into(),
            folder: String::new(),
            object_name: object_name.into(),
            refresh_interval: MIN_REFRESH_INTERVAL,
            endpoint_url: None,
            force_path_style: false,
        }
    }

    /// Set the folder prefix.
    pub fn folder(mut self, folder: impl Into<String>) -> Self {
        self.folder = folder.into();
        self
    }

    /// Set the static key pair (only meaningful with [`AuthMode::StaticKeys`]).
    pub fn static_keys(
        mut self,
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Self {
        self.static_credentials = Some(StaticCredentials {
            access_key: access_key.into(),
            secret_key: secret_key.into(),
        });
        self
    }

    /// Set the refresh interval (subject to the floor at validation).
    pub fn refresh_interval(mut self, interval: Duration) -> Self {
        self.refresh_interval = interval;
        self
    }

    /// Point the client at a custom S3-compatible endpoint.
    pub fn endpoint_url(mut self, url: impl Into<String>) -> Self {
        self.endpoint_url = Some(url.into());
        self
    }

    /// Use path-style addressing (required by most non-AWS endpoints).
    pub fn force_path_style(mut self, force: bool) -> Self {
        self.force_path_style = force;
        self
    }

    /// Check the descriptor's invariants and normalize the refresh interval.
    ///
    /// Intervals below [`MIN_REFRESH_INTERVAL`] are raised to the floor;
    /// values at or above it pass through unchanged.
    pub fn validate(mut self) -> Result<Self, ValidationError> {
        if self.region.is_empty() {
            return Err(ValidationError::MissingRegion { mode: self.auth });
        }
        if self.bucket.is_empty() || self.object_name.is_empty() {
            return Err(ValidationError::MissingLocation);
        }
        if self.auth == AuthMode::StaticKeys {
            match &self.static_credentials {
                Some(c) if !c.access_key.is_empty() && !c.secret_key.is_empty() => {}
                _ => return Err(ValidationError::MissingCredentials),
            }
        }
        if self.refresh_interval < MIN_REFRESH_INTERVAL {
            self.refresh_interval = MIN_REFRESH_INTERVAL;
        }
        Ok(self)
    }

    /// Full object key: `{folder}/{object_name}`, or `object_name` verbatim
    /// when the folder is empty.  No slash normalization.
    pub fn object_key(&self) -> String {
        if self.folder.is_empty() {
            self.object_name.clone()
        } else {
            format!("{}/{}", self.folder, self.object_name)
        }
    }
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> ConfigDescriptor {
        ConfigDescriptor::new(AuthMode::Environment, "ap-northeast-1", "bucket", "config.yml")
    }

    #[test]
    fn test_validate_accepts_well_formed_descriptor() {
        let d = base().validate().unwrap();
        assert_eq!(d.bucket, "bucket");
        assert_eq!(d.object_name, "config.yml");
    }

    #[test]
    fn test_validate_rejects_empty_region() {
        let err = ConfigDescriptor::new(AuthMode::Role, "", "bucket", "config.yml")
            .validate()
            .unwrap_err();
        assert!(matches!(
            err,
            ValidationError::MissingRegion {
                mode: AuthMode::Role
            }
        ));
    }

    #[test]
    fn test_validate_rejects_empty_bucket() {
        let err = ConfigDescriptor::new(AuthMode::Environment, "us-east-1", "", "config.yml")
            .validate()
            .unwrap_err();
        assert!(matches!(err, ValidationError::MissingLocation));
    }

    #[test]
    fn test_validate_rejects_empty_object_name() {
        let err = ConfigDescriptor::new(AuthMode::Environment, "us-east-1", "bucket", "")
            .validate()
            .unwrap_err();
        assert!(matches!(err, ValidationError::MissingLocation));
    }

    #[test]
    fn test_static_keys_require_both_fields() {
        let missing = ConfigDescriptor::new(AuthMode::StaticKeys, "us-east-1", "b", "c.yml")
            .validate()
            .unwrap_err();
        assert!(matches!(missing, ValidationError::MissingCredentials));

        let empty_secret = ConfigDescriptor::new(AuthMode::StaticKeys, "us-east-1", "b", "c.yml")
            .static_keys("AKIA123", "")
            .validate()
            .unwrap_err();
        assert!(matches!(empty_secret, ValidationError::MissingCredentials));

        let empty_access = ConfigDescriptor::new(AuthMode::StaticKeys, "us-east-1", "b", "c.yml")
            .static_keys("", "secret")
            .validate()
            .unwrap_err();
        assert!(matches!(empty_access, ValidationError::MissingCredentials));

        let ok = ConfigDescriptor::new(AuthMode::StaticKeys, "us-east-1", "b", "c.yml")
            .static_keys("AKIA123", "secret")
            .validate();
        assert!(ok.is_ok());
    }

    #[test]
    fn test_interval_below_floor_is_raised() {
        let d = base()
            .refresh_interval(Duration::from_secs(10))
            .validate()
            .unwrap();
        assert_eq!(d.refresh_interval, MIN_REFRESH_INTERVAL);
    }

    #[test]
    fn test_interval_at_or_above_floor_is_unchanged() {
        let at = base()
            .refresh_interval(MIN_REFRESH_INTERVAL)
            .validate()
            .unwrap();
        assert_eq!(at.refresh_interval, MIN_REFRESH_INTERVAL);

        let above = base()
            .refresh_interval(Duration::from_secs(300))
            .validate()
            .unwrap();
        assert_eq!(above.refresh_interval, Duration::from_secs(300));
    }

    #[test]
    fn test_object_key_with_folder() {
        let d = base().folder("folder");
        assert_eq!(d.object_key(), "folder/config.yml");
    }

    #[test]
    fn test_object_key_without_folder() {
        assert_eq!(base().object_key(), "config.yml");
    }

    #[test]
    fn test_auth_mode_parsing() {
        assert_eq!("role".parse::<AuthMode>().unwrap(), AuthMode::Role);
        assert_eq!("env".parse::<AuthMode>().unwrap(), AuthMode::Environment);
        assert_eq!(
            "environment".parse::<AuthMode>().unwrap(),
            AuthMode::Environment
        );
        assert_eq!("key".parse::<AuthMode>().unwrap(), AuthMode::StaticKeys);
        assert_eq!("static".parse::<AuthMode>().unwrap(), AuthMode::StaticKeys);

        let err = "oauth".parse::<AuthMode>().unwrap_err();
        assert!(matches!(err, ValidationError::UnknownAuthMode(ref s) if s == "oauth"));
    }
}
