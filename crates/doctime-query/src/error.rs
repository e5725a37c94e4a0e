//! Query translation error types.
#![allow(unused_assignments)]

use miette::Diagnostic;
use thiserror::Error;

/// Result type alias for query translation.
pub type Result<T> = std::result::Result<T, QueryError>;

/// Errors that can occur while turning a query expression into field paths.
#[allow(unused_assignments)]
#[derive(Error, Diagnostic, Debug)]
pub enum QueryError {
    // =========================================================================
    // Shape Errors
    // =========================================================================
    #[error("Unsupported query expression: {expression}")]
    #[diagnostic(
        code(doctime::query::unsupported_shape),
        help("Only member access and registered translators (ToInstant(), LocalDateTime) can be mapped to a stored field")
    )]
    UnsupportedQueryShape {
        expression: String,
    },

    #[error("Expression does not read a stored field: {expression}")]
    #[diagnostic(code(doctime::query::not_a_path))]
    NotAPath {
        expression: String,
    },

    // =========================================================================
    // Type Errors
    // =========================================================================
    #[error("'{value_type}' has no total order, so '{op}' cannot be used on '{path}'")]
    #[diagnostic(
        code(doctime::query::unordered_comparison),
        help("Periods and zoned values only support == and !=. To order zoned values, compare their ToInstant() instead.")
    )]
    UnorderedComparison {
        path: String,
        value_type: String,
        op: String,
    },

    #[error("Cannot compare '{path}' of type '{member_type}' with a {value_type} constant")]
    #[diagnostic(code(doctime::query::type_mismatch))]
    TypeMismatch {
        path: String,
        member_type: String,
        value_type: String,
    },

    #[error("Query constant {value} is not a finite number")]
    #[diagnostic(
        code(doctime::query::non_finite_number),
        help("JSON has no representation for NaN or infinity")
    )]
    NonFiniteNumber {
        value: f64,
    },

    // =========================================================================
    // Encoding Errors
    // =========================================================================
    #[error("Failed to encode query constant: {0}")]
    #[diagnostic(code(doctime::query::encode_failed))]
    Encode(#[from] doctime::Error),
}

impl QueryError {
    /// Creates an unsupported shape error for an expression.
    pub fn unsupported(expression: impl ToString) -> Self {
        Self::UnsupportedQueryShape {
            expression: expression.to_string(),
        }
    }
}
