//! # Dependency Expressions
//!
//! Parser and evaluator for the `dependsOn` mini-language used by field schemas.
//!
//! Groups separated by `,` must all hold. Within a group, at least one of the
//! `|`-separated field names must be present in the parameter map.
//!
//! ```text
//! os-domainID|os-domainName,os-projectID|os-projectName
//! ```

use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// Error produced when a dependency expression cannot be parsed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExprParseError {
    #[error("dependency expression is empty")]
    Empty,
    #[error("group {0} of the dependency expression is empty")]
    EmptyGroup(usize),
    #[error("group {0} of the dependency expression contains an empty field name")]
    EmptyName(usize),
}

/// A parsed dependency expression: a conjunction of alternations of field names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyExpr {
    source: String,
    groups: Vec<Vec<String>>,
}

impl DependencyExpr {
    /// Parse an expression such as `os-userID|os-userName,os-password`
    pub fn parse(source: &str) -> Result<Self, ExprParseError> {
        if source.trim().is_empty() {
            return Err(ExprParseError::Empty);
        }

        let mut groups = Vec::new();
        for (index, group) in source.split(',').enumerate() {
            if group.trim().is_empty() {
                return Err(ExprParseError::EmptyGroup(index));
            }

            let names = group
                .split('|')
                .map(str::trim)
                .map(|name| {
                    if name.is_empty() {
                        Err(ExprParseError::EmptyName(index))
                    } else {
                        Ok(name.to_string())
                    }
                })
                .collect::<Result<Vec<_>, _>>()?;

            groups.push(names);
        }

        Ok(Self {
            source: source.to_string(),
            groups,
        })
    }

    /// Every field name referenced by the expression, in declaration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().flatten().map(String::as_str)
    }

    /// Presence check only: a name is satisfied when it is a key of `params`,
    /// regardless of whether its own value would pass validation.
    #[must_use]
    pub fn is_satisfied(&self, params: &HashMap<String, String>) -> bool {
        self.groups
            .iter()
            .all(|group| group.iter().any(|name| params.contains_key(name)))
    }

    /// The expression text as declared
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl fmt::Display for DependencyExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(keys: &[&str]) -> HashMap<String, String> {
        keys.iter()
            .map(|k| ((*k).to_string(), "x".to_string()))
            .collect()
    }

    #[test]
    fn test_parse_groups_and_alternatives() {
        let expr = DependencyExpr::parse("a|b,c,d|e|f").unwrap();
        assert_eq!(expr.names().collect::<Vec<_>>(), vec!["a", "b", "c", "d", "e", "f"]);
        assert_eq!(expr.as_str(), "a|b,c,d|e|f");
        assert_eq!(expr.to_string(), "a|b,c,d|e|f");
    }

    #[test]
    fn test_parse_rejects_malformed_expressions() {
        assert_eq!(DependencyExpr::parse(""), Err(ExprParseError::Empty));
        assert_eq!(DependencyExpr::parse("  "), Err(ExprParseError::Empty));
        assert_eq!(DependencyExpr::parse("a,,b"), Err(ExprParseError::EmptyGroup(1)));
        assert_eq!(DependencyExpr::parse("a,b|"), Err(ExprParseError::EmptyName(1)));
        assert_eq!(DependencyExpr::parse("|a"), Err(ExprParseError::EmptyName(0)));
    }

    #[test]
    fn test_single_name() {
        let expr = DependencyExpr::parse("os-password").unwrap();
        assert!(expr.is_satisfied(&params(&["os-password"])));
        assert!(!expr.is_satisfied(&params(&["os-userID"])));
    }

    #[test]
    fn test_alternation_needs_any_member() {
        let expr = DependencyExpr::parse("a|b").unwrap();
        assert!(expr.is_satisfied(&params(&["a"])));
        assert!(expr.is_satisfied(&params(&["b"])));
        assert!(expr.is_satisfied(&params(&["a", "b"])));
        assert!(!expr.is_satisfied(&params(&["c"])));
    }

    #[test]
    fn test_conjunction_needs_every_group() {
        let expr = DependencyExpr::parse("a|b,c|d,e").unwrap();
        assert!(expr.is_satisfied(&params(&["a", "d", "e"])));
        assert!(expr.is_satisfied(&params(&["b", "c", "e"])));
        assert!(!expr.is_satisfied(&params(&["a", "c"])));
        assert!(!expr.is_satisfied(&params(&["a", "e"])));
        assert!(!expr.is_satisfied(&params(&[])));
    }

    #[test]
    fn test_empty_value_counts_as_present() {
        let expr = DependencyExpr::parse("a").unwrap();
        let mut map = HashMap::new();
        map.insert("a".to_string(), String::new());
        assert!(expr.is_satisfied(&map));
    }
}
