//! Stored field paths.

use std::fmt;

use crate::error::Result;
use crate::expr::{Expr, ValueType};

/// A dotted path to a stored field, plus the type of the value found there.
///
/// The root path (the document itself) is the empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathExpression {
    pub path: String,
    pub member_type: ValueType,
}

impl PathExpression {
    pub fn new(path: impl Into<String>, member_type: ValueType) -> Self {
        Self {
            path: path.into(),
            member_type,
        }
    }

    /// The path of the document itself.
    pub fn root(member_type: ValueType) -> Self {
        Self::new(String::new(), member_type)
    }

    /// The path of a property below this one.
    pub fn child(&self, name: &str, member_type: ValueType) -> Self {
        Self::new(join(&self.path, name), member_type)
    }

    pub fn is_root(&self) -> bool {
        self.path.is_empty()
    }
}

impl fmt::Display for PathExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.member_type)
    }
}

/// Joins two path segments with a dot, skipping empty segments.
pub fn join(parent: &str, name: &str) -> String {
    match (parent.is_empty(), name.is_empty()) {
        (true, _) => name.to_string(),
        (false, true) => parent.to_string(),
        (false, false) => format!("{}.{}", parent, name),
    }
}

/// Resolves the receiver of a query expression to a stored field path.
///
/// This is the host's side of the contract: translators call back into the
/// resolver for the part of the expression they do not handle themselves.
pub trait PathResolver {
    fn resolve(&self, expr: &Expr) -> Result<PathExpression>;
}
