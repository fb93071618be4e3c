//! # Options Loader
//!
//! Builds [`OpenStackOptions`] from a parameter map or from a secret.
//!
//! The loader owns the compiled validator. Build it once at startup with
//! [`OptionsLoader::new`] and pass it to whatever needs to load credentials.

use super::OpenStackOptions;
use crate::secrets::SecretSource;
use crate::validator::{ParameterMap, ValidationError, Validator};
use k8s_openapi::api::core::v1::SecretReference;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Error returned when loading options from a secret
#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("invalid OpenStack options: {0}")]
    Validation(#[from] ValidationError),
    /// Failure reported by the secret source, passed through unchanged
    #[error(transparent)]
    SecretSource(anyhow::Error),
}

impl OptionsError {
    /// The validation error, if this is one
    #[must_use]
    pub fn as_validation_error(&self) -> Option<&ValidationError> {
        match self {
            OptionsError::Validation(e) => Some(e),
            OptionsError::SecretSource(_) => None,
        }
    }
}

/// Validates parameter maps against the [`OpenStackOptions`] schema
#[derive(Debug)]
pub struct OptionsLoader {
    validator: Validator<OpenStackOptions>,
}

impl OptionsLoader {
    /// Compile the [`OpenStackOptions`] schema
    pub fn new() -> Result<Self, ValidationError> {
        Ok(Self {
            validator: Validator::for_schema()?,
        })
    }

    #[must_use]
    pub fn validator(&self) -> &Validator<OpenStackOptions> {
        &self.validator
    }

    /// Validate `params` and populate a fresh [`OpenStackOptions`]
    pub fn from_map(&self, params: &ParameterMap) -> Result<OpenStackOptions, ValidationError> {
        let mut options = OpenStackOptions::default();
        if let Err(e) = self.validator.populate(params, &mut options) {
            debug!(field = e.field(), reason = e.reason(), "OpenStack options rejected");
            return Err(e);
        }

        if options.os_tls_insecure == "true" {
            warn!("⚠️  os-TLSInsecure=true: the identity endpoint certificate will not be verified");
        }

        Ok(options)
    }

    /// Read the referenced secret and validate its contents
    pub async fn from_secret_reference<S>(
        &self,
        source: &S,
        reference: &SecretReference,
    ) -> Result<OpenStackOptions, OptionsError>
    where
        S: SecretSource + ?Sized,
    {
        let params = source
            .read_secret(reference)
            .await
            .map_err(OptionsError::SecretSource)?;

        info!(
            "Read {} OpenStack parameters from secret {}/{}",
            params.len(),
            reference.namespace.as_deref().unwrap_or_default(),
            reference.name.as_deref().unwrap_or_default()
        );

        Ok(self.from_map(&params)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_compiles() {
        let loader = OptionsLoader::new().unwrap();
        assert_eq!(loader.validator().fields().count(), 14);
    }

    #[test]
    fn test_from_map_returns_validator_error() {
        let loader = OptionsLoader::new().unwrap();
        let err = loader.from_map(&ParameterMap::new()).unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingRequiredField("os-authURL".to_string())
        );
    }

    #[test]
    fn test_options_error_exposes_validation_error() {
        let err = OptionsError::from(ValidationError::MissingRequiredField("x".to_string()));
        assert!(err.as_validation_error().is_some());
        assert_eq!(err.to_string(), "invalid OpenStack options: missing required field 'x'");

        let err = OptionsError::SecretSource(anyhow::anyhow!("secret not found"));
        assert!(err.as_validation_error().is_none());
        assert_eq!(err.to_string(), "secret not found");
    }
}
