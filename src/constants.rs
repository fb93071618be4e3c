//! # Constants
//!
//! Shared constants used throughout the crate.
//!
//! Field names are the keys expected in the Kubernetes secret that holds the
//! OpenStack credentials.

/// Keystone identity endpoint
pub const OS_AUTH_URL: &str = "os-authURL";
/// OpenStack region
pub const OS_REGION: &str = "os-region";
/// CA bundle used to verify the identity endpoint
pub const OS_CERT_AUTHORITY: &str = "os-certAuthority";
/// Skip TLS verification (`true` or `false`)
pub const OS_TLS_INSECURE: &str = "os-TLSInsecure";

pub const OS_PASSWORD: &str = "os-password";
pub const OS_USER_ID: &str = "os-userID";
pub const OS_USER_NAME: &str = "os-userName";
pub const OS_DOMAIN_ID: &str = "os-domainID";
pub const OS_DOMAIN_NAME: &str = "os-domainName";
pub const OS_PROJECT_ID: &str = "os-projectID";
pub const OS_PROJECT_NAME: &str = "os-projectName";

pub const OS_TRUST_ID: &str = "os-trustID";
pub const OS_TRUSTEE_ID: &str = "os-trusteeID";
pub const OS_TRUSTEE_PASSWORD: &str = "os-trusteePassword";

/// Pattern for boolean-valued string fields
pub const BOOLEAN_PATTERN: &str = "^(true|false)$";

/// Placeholder printed instead of secret values
pub const REDACTED: &str = "***";

/// Namespace used when a secret reference does not name one
pub const DEFAULT_SECRET_NAMESPACE: &str = "default";

/// Default global log level
pub const DEFAULT_LOG_LEVEL: &str = "INFO";

/// Default log output format
pub const DEFAULT_LOG_FORMAT: &str = "text";
