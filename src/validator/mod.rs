//! # Schema Validator
//!
//! Enforces a declarative schema against a flat parameter map and populates a
//! target structure.
//!
//! The schema table is compiled once by [`Validator::new`]: dependency
//! expressions are parsed, patterns are compiled and every name a dependency
//! refers to is checked against the declared fields. The compiled validator is
//! immutable and can be shared between callers.
//!
//! [`Validator::populate`] walks the fields in declaration order and stops at
//! the first violation:
//!
//! 1. absent and required → [`ValidationError::MissingRequiredField`]
//! 2. present with an unsatisfied dependency → [`ValidationError::UnsatisfiedDependency`]
//! 3. present and not matching its pattern → [`ValidationError::PatternMismatch`]
//! 4. otherwise the value is copied verbatim into the target slot

pub mod error;
pub mod expr;
pub mod schema;

pub use error::ValidationError;
pub use expr::DependencyExpr;
pub use schema::{FieldSchema, Requirement, Schema};

use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::fmt;
use tracing::debug;

/// Flat mapping from external field name to raw value
pub type ParameterMap = HashMap<String, String>;

struct CompiledField<T> {
    decl: FieldSchema<T>,
    depends_on: Option<DependencyExpr>,
    pattern: Option<Regex>,
}

/// Compiled, read-only schema for target type `T`
pub struct Validator<T> {
    fields: Vec<CompiledField<T>>,
}

impl<T: Schema> Validator<T> {
    /// Compile the schema declared by `T`
    pub fn for_schema() -> Result<Self, ValidationError> {
        Self::new(T::schema())
    }
}

impl<T> Validator<T> {
    /// Compile a schema table
    ///
    /// Fails with [`ValidationError::SchemaDeclaration`] on duplicate field
    /// names, malformed dependency expressions, dependencies on undeclared
    /// fields and invalid patterns.
    pub fn new(fields: Vec<FieldSchema<T>>) -> Result<Self, ValidationError> {
        let mut declared = HashSet::new();
        for field in &fields {
            if !declared.insert(field.name()) {
                return Err(ValidationError::SchemaDeclaration(
                    field.name().to_string(),
                    "field is declared more than once".to_string(),
                ));
            }
        }

        let mut compiled = Vec::with_capacity(fields.len());
        for decl in fields {
            let depends_on = decl
                .dependency_expr()
                .map(|source| compile_dependency(decl.name(), source, &declared))
                .transpose()?;

            let pattern = decl
                .value_pattern()
                .map(|source| {
                    Regex::new(source).map_err(|e| {
                        ValidationError::SchemaDeclaration(
                            decl.name().to_string(),
                            format!("invalid pattern '{source}': {e}"),
                        )
                    })
                })
                .transpose()?;

            compiled.push(CompiledField {
                decl,
                depends_on,
                pattern,
            });
        }

        Ok(Self { fields: compiled })
    }

    /// Validate `params` and copy every present value into `target`
    ///
    /// On error the target may be partially populated and must be discarded.
    pub fn populate(&self, params: &ParameterMap, target: &mut T) -> Result<(), ValidationError> {
        for field in &self.fields {
            let name = field.decl.name();

            let Some(value) = params.get(name) else {
                if field.decl.is_required() {
                    debug!(field = name, "required field is missing");
                    return Err(ValidationError::MissingRequiredField(name.to_string()));
                }
                continue;
            };

            if let Some(expr) = &field.depends_on {
                if !expr.is_satisfied(params) {
                    debug!(field = name, depends_on = %expr, "dependency not satisfied");
                    return Err(ValidationError::UnsatisfiedDependency(
                        name.to_string(),
                        expr.to_string(),
                    ));
                }
            }

            if let Some(pattern) = &field.pattern {
                if !pattern.is_match(value) {
                    debug!(field = name, pattern = pattern.as_str(), "value does not match pattern");
                    return Err(ValidationError::PatternMismatch(
                        name.to_string(),
                        value.clone(),
                        pattern.as_str().to_string(),
                    ));
                }
            }

            field.decl.slot(target).clone_from(value);
        }

        Ok(())
    }

    /// The declared schema table, in validation order
    pub fn fields(&self) -> impl Iterator<Item = &FieldSchema<T>> {
        self.fields.iter().map(|field| &field.decl)
    }
}

fn compile_dependency(
    field: &str,
    source: &str,
    declared: &HashSet<&'static str>,
) -> Result<DependencyExpr, ValidationError> {
    let expr = DependencyExpr::parse(source)
        .map_err(|e| ValidationError::SchemaDeclaration(field.to_string(), e.to_string()))?;

    if let Some(unknown) = expr.names().find(|name| !declared.contains(*name)) {
        return Err(ValidationError::SchemaDeclaration(
            field.to_string(),
            format!("dependency expression '{source}' references undeclared field '{unknown}'"),
        ));
    }

    Ok(expr)
}

impl<T> fmt::Debug for Validator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator")
            .field("fields", &self.fields().map(FieldSchema::name).collect::<Vec<_>>())
            .finish()
    }
}
