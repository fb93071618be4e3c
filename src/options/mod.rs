//! # OpenStack Options
//!
//! Validated OpenStack credentials read from a flat parameter map.
//!
//! Two credential flows are supported:
//!
//! - **Password**: `os-password` plus one of each of {domain ID/name},
//!   {project ID/name} and {user ID/name}
//! - **Trust**: `os-trustID` plus the trustee's ID and password
//!
//! The dependency rules make each flow's fields travel together. They do not
//! forbid setting both flows at once; when a trust ID is set the trustee
//! credentials win in [`OpenStackOptions::to_auth_options`].

pub mod auth;
pub mod loader;

pub use auth::{AuthOptions, AuthOptionsExt};
pub use loader::{OptionsError, OptionsLoader};

use crate::constants::{
    BOOLEAN_PATTERN, OS_AUTH_URL, OS_CERT_AUTHORITY, OS_DOMAIN_ID, OS_DOMAIN_NAME, OS_PASSWORD,
    OS_PROJECT_ID, OS_PROJECT_NAME, OS_REGION, OS_TLS_INSECURE, OS_TRUSTEE_ID,
    OS_TRUSTEE_PASSWORD, OS_TRUST_ID, OS_USER_ID, OS_USER_NAME, REDACTED,
};
use crate::validator::{FieldSchema, Schema};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Fields used for authenticating to OpenStack
///
/// Every field holds the raw string from the parameter map; absent optional
/// fields are empty.
#[derive(Clone, Default, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct OpenStackOptions {
    // Common options
    pub os_auth_url: String,
    pub os_region_name: String,
    pub os_cert_authority: String,
    pub os_tls_insecure: String,

    // User authentication
    pub os_password: String,
    pub os_user_id: String,
    pub os_username: String,
    pub os_domain_id: String,
    pub os_domain_name: String,
    pub os_project_id: String,
    pub os_project_name: String,

    // Trustee authentication
    pub os_trust_id: String,
    pub os_trustee_id: String,
    pub os_trustee_password: String,
}

impl Schema for OpenStackOptions {
    fn schema() -> Vec<FieldSchema<Self>> {
        vec![
            FieldSchema::required(OS_AUTH_URL, |o: &mut Self| &mut o.os_auth_url)
                .depends_on("os-password|os-trustID"),
            FieldSchema::optional(OS_REGION, |o: &mut Self| &mut o.os_region_name),
            FieldSchema::optional(OS_CERT_AUTHORITY, |o: &mut Self| &mut o.os_cert_authority),
            FieldSchema::optional(OS_TLS_INSECURE, |o: &mut Self| &mut o.os_tls_insecure)
                .depends_on("os-certAuthority")
                .matches(BOOLEAN_PATTERN),
            FieldSchema::optional(OS_PASSWORD, |o: &mut Self| &mut o.os_password).depends_on(
                "os-domainID|os-domainName,os-projectID|os-projectName,os-userID|os-userName",
            ),
            FieldSchema::optional(OS_USER_ID, |o: &mut Self| &mut o.os_user_id)
                .depends_on("os-password"),
            FieldSchema::optional(OS_USER_NAME, |o: &mut Self| &mut o.os_username)
                .depends_on("os-password"),
            FieldSchema::optional(OS_DOMAIN_ID, |o: &mut Self| &mut o.os_domain_id)
                .depends_on("os-password"),
            FieldSchema::optional(OS_DOMAIN_NAME, |o: &mut Self| &mut o.os_domain_name)
                .depends_on("os-password"),
            FieldSchema::optional(OS_PROJECT_ID, |o: &mut Self| &mut o.os_project_id)
                .depends_on("os-password"),
            FieldSchema::optional(OS_PROJECT_NAME, |o: &mut Self| &mut o.os_project_name)
                .depends_on("os-password"),
            FieldSchema::optional(OS_TRUST_ID, |o: &mut Self| &mut o.os_trust_id)
                .depends_on("os-trusteeID,os-trusteePassword"),
            FieldSchema::optional(OS_TRUSTEE_ID, |o: &mut Self| &mut o.os_trustee_id)
                .depends_on("os-trustID"),
            FieldSchema::optional(OS_TRUSTEE_PASSWORD, |o: &mut Self| &mut o.os_trustee_password)
                .depends_on("os-trustID"),
        ]
    }
}

impl OpenStackOptions {
    /// Whether the trust (delegated) flow is configured
    #[must_use]
    pub fn uses_trust(&self) -> bool {
        !self.os_trust_id.is_empty()
    }

    /// Convert to Keystone authentication options
    ///
    /// The identity API has no dedicated slots for trustee credentials, so
    /// when a trust ID is set the trustee ID and password replace the user ID
    /// and password. The trust ID itself travels in [`AuthOptionsExt`].
    #[must_use]
    pub fn to_auth_options(&self) -> AuthOptions {
        let mut auth = AuthOptions {
            identity_endpoint: self.os_auth_url.clone(),
            user_id: self.os_user_id.clone(),
            username: self.os_username.clone(),
            password: self.os_password.clone(),
            tenant_id: self.os_project_id.clone(),
            tenant_name: self.os_project_name.clone(),
            domain_id: self.os_domain_id.clone(),
            domain_name: self.os_domain_name.clone(),
        };

        if self.uses_trust() {
            auth.user_id.clone_from(&self.os_trustee_id);
            auth.password.clone_from(&self.os_trustee_password);
        }

        auth
    }

    /// Convert to trust-scoped authentication options
    #[must_use]
    pub fn to_auth_options_ext(&self) -> AuthOptionsExt {
        AuthOptionsExt {
            auth_options: self.to_auth_options(),
            trust_id: self.os_trust_id.clone(),
        }
    }
}

fn redact(value: &str) -> &str {
    if value.is_empty() {
        value
    } else {
        REDACTED
    }
}

impl fmt::Debug for OpenStackOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenStackOptions")
            .field("os_auth_url", &self.os_auth_url)
            .field("os_region_name", &self.os_region_name)
            .field("os_cert_authority", &self.os_cert_authority)
            .field("os_tls_insecure", &self.os_tls_insecure)
            .field("os_password", &redact(&self.os_password))
            .field("os_user_id", &self.os_user_id)
            .field("os_username", &self.os_username)
            .field("os_domain_id", &self.os_domain_id)
            .field("os_domain_name", &self.os_domain_name)
            .field("os_project_id", &self.os_project_id)
            .field("os_project_name", &self.os_project_name)
            .field("os_trust_id", &self.os_trust_id)
            .field("os_trustee_id", &self.os_trustee_id)
            .field("os_trustee_password", &redact(&self.os_trustee_password))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn password_options() -> OpenStackOptions {
        let mut options = OpenStackOptions::default();
        options.os_auth_url = "https://keystone.example:5000/v3".to_string();
        options.os_password = "secret".to_string();
        options.os_user_id = "user-1".to_string();
        options.os_username = "alice".to_string();
        options.os_domain_id = "default".to_string();
        options.os_domain_name = "Default".to_string();
        options.os_project_id = "proj-1".to_string();
        options.os_project_name = "storage".to_string();
        options
    }

    fn trust_options() -> OpenStackOptions {
        let mut options = password_options();
        options.os_trust_id = "trust-1".to_string();
        options.os_trustee_id = "trustee-1".to_string();
        options.os_trustee_password = "trustee-secret".to_string();
        options
    }

    #[test]
    fn test_password_flow_maps_project_to_tenant() {
        let auth = password_options().to_auth_options();
        assert_eq!(auth.identity_endpoint, "https://keystone.example:5000/v3");
        assert_eq!(auth.user_id, "user-1");
        assert_eq!(auth.username, "alice");
        assert_eq!(auth.password, "secret");
        assert_eq!(auth.tenant_id, "proj-1");
        assert_eq!(auth.tenant_name, "storage");
        assert_eq!(auth.domain_id, "default");
        assert_eq!(auth.domain_name, "Default");
    }

    #[test]
    fn test_trust_flow_substitutes_trustee_credentials() {
        let options = trust_options();
        assert!(options.uses_trust());

        let auth = options.to_auth_options();
        assert_eq!(auth.user_id, "trustee-1");
        assert_eq!(auth.password, "trustee-secret");
        // Only the user ID and password are swapped
        assert_eq!(auth.username, "alice");
        assert_eq!(auth.tenant_id, "proj-1");

        let ext = options.to_auth_options_ext();
        assert_eq!(ext.trust_id, "trust-1");
        assert_eq!(ext.auth_options, auth);
    }

    #[test]
    fn test_ext_without_trust_has_empty_trust_id() {
        let options = password_options();
        assert!(!options.uses_trust());

        let ext = options.to_auth_options_ext();
        assert_eq!(ext.trust_id, "");
        assert_eq!(ext.auth_options.user_id, "user-1");
    }

    #[test]
    fn test_debug_redacts_passwords() {
        let rendered = format!("{:?}", trust_options());
        assert!(!rendered.contains("\"secret\""));
        assert!(!rendered.contains("trustee-secret"));
        assert!(rendered.contains("os_password: \"***\""));
        assert!(rendered.contains("alice"));
    }

    #[test]
    fn test_debug_leaves_unset_passwords_empty() {
        let rendered = format!("{:?}", OpenStackOptions::default());
        assert!(rendered.contains("os_password: \"\""));
    }
}
