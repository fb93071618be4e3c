//! # Field Schema
//!
//! Declarative description of one configuration key.
//!
//! A schema is an explicit table of [`FieldSchema`] records built by the target
//! type's [`Schema`] implementation. Each record maps an external key to a
//! `String` slot of the target and declares its requiredness, dependency
//! expression and value pattern.

use std::fmt;

/// Whether a field must be present in the parameter map
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    Required,
    Optional,
}

impl Requirement {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Requirement::Required => "required",
            Requirement::Optional => "optional",
        }
    }
}

/// Accessor returning the target slot a field is written into
pub type Slot<T> = fn(&mut T) -> &mut String;

/// One entry of a schema table
pub struct FieldSchema<T> {
    name: &'static str,
    requirement: Requirement,
    depends_on: Option<&'static str>,
    value_pattern: Option<&'static str>,
    slot: Slot<T>,
}

impl<T> FieldSchema<T> {
    /// A field that must be present
    pub fn required(name: &'static str, slot: Slot<T>) -> Self {
        Self {
            name,
            requirement: Requirement::Required,
            depends_on: None,
            value_pattern: None,
            slot,
        }
    }

    /// A field that may be absent; absent optional fields keep their default value
    pub fn optional(name: &'static str, slot: Slot<T>) -> Self {
        Self {
            requirement: Requirement::Optional,
            ..Self::required(name, slot)
        }
    }

    /// Declare a dependency expression (`,` = AND, `|` = OR)
    #[must_use]
    pub fn depends_on(mut self, expr: &'static str) -> Self {
        self.depends_on = Some(expr);
        self
    }

    /// Declare a regular expression the value must match when present
    #[must_use]
    pub fn matches(mut self, pattern: &'static str) -> Self {
        self.value_pattern = Some(pattern);
        self
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn requirement(&self) -> Requirement {
        self.requirement
    }

    #[must_use]
    pub fn is_required(&self) -> bool {
        self.requirement == Requirement::Required
    }

    #[must_use]
    pub fn dependency_expr(&self) -> Option<&'static str> {
        self.depends_on
    }

    #[must_use]
    pub fn value_pattern(&self) -> Option<&'static str> {
        self.value_pattern
    }

    pub(crate) fn slot<'a>(&self, target: &'a mut T) -> &'a mut String {
        (self.slot)(target)
    }
}

// Manual impls: the derives would needlessly require `T: Clone` / `T: Debug`.
impl<T> Clone for FieldSchema<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for FieldSchema<T> {}

impl<T> fmt::Debug for FieldSchema<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldSchema")
            .field("name", &self.name)
            .field("requirement", &self.requirement)
            .field("depends_on", &self.depends_on)
            .field("value_pattern", &self.value_pattern)
            .finish_non_exhaustive()
    }
}

/// A structure whose fields are populated from a flat parameter map
pub trait Schema: Default {
    /// The schema table, in validation order
    fn schema() -> Vec<FieldSchema<Self>>;
}
