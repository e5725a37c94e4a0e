//! # Predicate Compiler
//!
//! Turns a predicate expression into a [`Filter`] over stored field paths.
//! Each comparison is normalized to `path op operand`, with the operand
//! encoded exactly as the codecs write a stored field of the member's type,
//! so a store can compare stored and query values in one representation.

use serde_json::Value as JsonValue;
use tracing::debug;

use crate::config::QueryConfig;
use crate::error::{QueryError, Result};
use crate::expr::{CompareOp, Expr, QueryValue, ValueType};
use crate::path::{PathExpression, PathResolver};
use crate::provider::PathProvider;

// =============================================================================
// Filters
// =============================================================================

/// A single `path op operand` test.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    /// Dotted path of the stored field.
    pub path: String,
    /// Type of the value at `path`, after translation.
    pub member_type: ValueType,
    pub op: CompareOp,
    /// The constant in its stored encoding.
    pub operand: JsonValue,
}

/// A compiled predicate.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    Compare(Comparison),
    And(Vec<Filter>),
    Or(Vec<Filter>),
}

impl Filter {
    /// Every comparison in the filter, depth first.
    pub fn comparisons(&self) -> Vec<&Comparison> {
        let mut out = Vec::new();
        self.collect(&mut out);
        out
    }

    fn collect<'a>(&'a self, out: &mut Vec<&'a Comparison>) {
        match self {
            Filter::Compare(comparison) => out.push(comparison),
            Filter::And(items) | Filter::Or(items) => {
                for item in items {
                    item.collect(out);
                }
            }
        }
    }
}

// =============================================================================
// Compiler
// =============================================================================

/// Compiles predicates against a path resolver.
#[derive(Debug, Clone)]
pub struct QueryCompiler<R = PathProvider> {
    resolver: R,
}

impl QueryCompiler<PathProvider> {
    /// Creates a compiler over a [`PathProvider`] built from `config`.
    pub fn with_config(config: QueryConfig) -> Self {
        Self::new(PathProvider::new(config))
    }
}

impl Default for QueryCompiler<PathProvider> {
    fn default() -> Self {
        Self::with_config(QueryConfig::default())
    }
}

impl<R: PathResolver> QueryCompiler<R> {
    pub fn new(resolver: R) -> Self {
        Self { resolver }
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Compiles a predicate.
    ///
    /// # Errors
    ///
    /// * `UnsupportedQueryShape` - a comparison without exactly one field side
    /// * `UnorderedComparison` - `<`, `<=`, `>` or `>=` on a type with no total order
    /// * `TypeMismatch` - the constant cannot be compared with the field
    /// * `NonFiniteNumber` - the constant is NaN or infinite
    pub fn compile(&self, expr: &Expr) -> Result<Filter> {
        match expr {
            Expr::Compare { op, left, right } => self.compile_comparison(*op, left, right),
            Expr::And(items) => Ok(Filter::And(self.compile_all(items)?)),
            Expr::Or(items) => Ok(Filter::Or(self.compile_all(items)?)),
            Expr::Member { ty: ValueType::Boolean, .. } => {
                self.compile_comparison(CompareOp::Eq, expr, &Expr::constant(true))
            }
            _ => Err(QueryError::unsupported(expr)),
        }
    }

    fn compile_all(&self, items: &[Expr]) -> Result<Vec<Filter>> {
        items.iter().map(|item| self.compile(item)).collect()
    }

    fn compile_comparison(&self, op: CompareOp, left: &Expr, right: &Expr) -> Result<Filter> {
        let (op, field, value) = match (left, right) {
            (Expr::Constant(_), Expr::Constant(_)) => {
                return Err(QueryError::unsupported(format!("{} {} {}", left, op, right)));
            }
            (Expr::Constant(value), field) => (op.mirror(), field, value),
            (field, Expr::Constant(value)) => (op, field, value),
            _ => return Err(QueryError::unsupported(format!("{} {} {}", left, op, right))),
        };

        let path = self.resolver.resolve(field)?;

        if op.is_ordering() && !path.member_type.is_ordered() {
            return Err(QueryError::UnorderedComparison {
                path: path.path,
                value_type: path.member_type.to_string(),
                op: op.to_string(),
            });
        }

        let operand = coerce(&path, op, value)?.encode()?;

        debug!(
            path = %path.path,
            member_type = %path.member_type,
            op = %op,
            operand = %operand,
            "Compiled comparison"
        );

        Ok(Filter::Compare(Comparison {
            path: path.path,
            member_type: path.member_type,
            op,
            operand,
        }))
    }
}

/// Converts a constant to the member's type, or rejects the pair.
fn coerce(path: &PathExpression, op: CompareOp, value: &QueryValue) -> Result<QueryValue> {
    let Some(value_type) = value.value_type() else {
        if op.is_ordering() {
            return Err(mismatch(path, "null"));
        }
        return Ok(QueryValue::Null);
    };

    if path.member_type == ValueType::Instant {
        return value
            .to_instant()
            .map(QueryValue::Instant)
            .ok_or_else(|| mismatch(path, value_type.name()));
    }

    if value_type == path.member_type {
        Ok(value.clone())
    } else {
        Err(mismatch(path, value_type.name()))
    }
}

fn mismatch(path: &PathExpression, value_type: &str) -> QueryError {
    QueryError::TypeMismatch {
        path: path.path.clone(),
        member_type: path.member_type.to_string(),
        value_type: value_type.to_string(),
    }
}
