//! # Keystone Authentication Options
//!
//! Read-only projections of [`OpenStackOptions`](super::OpenStackOptions) in the
//! shape expected by an OpenStack identity v3 client. Serialized field names
//! follow the client's camelCase JSON convention.

use crate::constants::REDACTED;
use serde::Serialize;
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Credentials for direct authentication
#[derive(Clone, Default, PartialEq, Eq, Serialize, Zeroize, ZeroizeOnDrop)]
#[serde(rename_all = "camelCase")]
pub struct AuthOptions {
    pub identity_endpoint: String,
    #[serde(rename = "userID")]
    pub user_id: String,
    pub username: String,
    pub password: String,
    #[serde(rename = "tenantID")]
    pub tenant_id: String,
    pub tenant_name: String,
    #[serde(rename = "domainID")]
    pub domain_id: String,
    pub domain_name: String,
}

impl AuthOptions {
    /// Copy with the password replaced by a placeholder, safe to print
    #[must_use]
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if !copy.password.is_empty() {
            copy.password = REDACTED.to_string();
        }
        copy
    }
}

/// Credentials for trust-scoped (delegated) authentication
#[derive(Clone, Default, PartialEq, Eq, Serialize, Zeroize, ZeroizeOnDrop)]
#[serde(rename_all = "camelCase")]
pub struct AuthOptionsExt {
    #[serde(flatten)]
    pub auth_options: AuthOptions,
    #[serde(rename = "trustID")]
    pub trust_id: String,
}

impl AuthOptionsExt {
    /// Copy with the password replaced by a placeholder, safe to print
    #[must_use]
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        copy.auth_options = self.auth_options.redacted();
        copy
    }
}

impl fmt::Debug for AuthOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redacted = self.redacted();
        f.debug_struct("AuthOptions")
            .field("identity_endpoint", &redacted.identity_endpoint)
            .field("user_id", &redacted.user_id)
            .field("username", &redacted.username)
            .field("password", &redacted.password)
            .field("tenant_id", &redacted.tenant_id)
            .field("tenant_name", &redacted.tenant_name)
            .field("domain_id", &redacted.domain_id)
            .field("domain_name", &redacted.domain_name)
            .finish()
    }
}

impl fmt::Debug for AuthOptionsExt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthOptionsExt")
            .field("auth_options", &self.auth_options)
            .field("trust_id", &self.trust_id)
            .finish()
    }
}
