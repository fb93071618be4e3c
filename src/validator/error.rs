//! # Validation Errors

use thiserror::Error;

/// Error returned by schema construction and by [`Validator::populate`](super::Validator::populate)
///
/// Validation is fail-fast, so a single error describes the first violated rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is absent from the parameter map
    #[error("missing required field '{0}'")]
    MissingRequiredField(String),
    /// A field is present but the fields its dependency expression names are not
    #[error("field '{0}' requires '{1}' to be set")]
    UnsatisfiedDependency(String, String),
    /// A present value does not match the field's pattern
    #[error("value '{1}' of field '{0}' does not match pattern '{2}'")]
    PatternMismatch(String, String, String),
    /// The schema table itself is malformed (construction time only)
    #[error("invalid schema declaration for field '{0}': {1}")]
    SchemaDeclaration(String, String),
}

impl ValidationError {
    /// Name of the field the error refers to
    #[must_use]
    pub fn field(&self) -> &str {
        match self {
            ValidationError::MissingRequiredField(name)
            | ValidationError::UnsatisfiedDependency(name, _)
            | ValidationError::PatternMismatch(name, _, _)
            | ValidationError::SchemaDeclaration(name, _) => name,
        }
    }

    /// Short machine-friendly reason, used as a structured log field
    #[must_use]
    pub fn reason(&self) -> &'static str {
        match self {
            ValidationError::MissingRequiredField(_) => "MissingRequiredField",
            ValidationError::UnsatisfiedDependency(_, _) => "UnsatisfiedDependency",
            ValidationError::PatternMismatch(_, _, _) => "PatternMismatch",
            ValidationError::SchemaDeclaration(_, _) => "SchemaDeclaration",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_carry_field_and_rule() {
        let err = ValidationError::UnsatisfiedDependency(
            "os-password".to_string(),
            "os-domainID|os-domainName".to_string(),
        );
        assert_eq!(
            err.to_string(),
            "field 'os-password' requires 'os-domainID|os-domainName' to be set"
        );
        assert_eq!(err.field(), "os-password");
        assert_eq!(err.reason(), "UnsatisfiedDependency");

        let err = ValidationError::PatternMismatch(
            "os-TLSInsecure".to_string(),
            "yes".to_string(),
            "^(true|false)$".to_string(),
        );
        assert_eq!(
            err.to_string(),
            "value 'yes' of field 'os-TLSInsecure' does not match pattern '^(true|false)$'"
        );
    }
}
