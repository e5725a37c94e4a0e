//! # doctime-query
//!
//! Lets document queries be written against the time types' own API while
//! the store filters on their stored JSON shape.
//!
//! ## Architecture
//!
//! ```text
//! Predicate (Expr)
//!        │
//!        ▼
//! ┌────────────────┐      ┌──────────────────┐
//! │ QueryCompiler  │─────▶│   PathProvider   │  receiver → field path
//! │ (Expr → Filter)│      │  (PathResolver)  │
//! └───────┬────────┘      └────────┬─────────┘
//!         │                        │ recognized member?
//!         │                        ▼
//!         │               ┌──────────────────┐
//!         │               │    Translator    │  ToInstant(), LocalDateTime
//!         │               └──────────────────┘
//!         ▼
//!  Filter { path op operand }   operand encoded by the doctime codecs
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use doctime_query::{Expr, QueryCompiler, ValueType};
//!
//! let predicate = Expr::parameter("x", ValueType::Document("Foo".into()))
//!     .member("ZonedDateTime", ValueType::ZonedDateTime)
//!     .call("ToInstant", ValueType::Instant)
//!     .less_than(cutoff);
//!
//! let filter = QueryCompiler::default().compile(&predicate)?;
//! ```

pub mod compile;
pub mod config;
pub mod error;
pub mod expr;
pub mod path;
pub mod provider;
pub mod translate;

pub use compile::{Comparison, Filter, QueryCompiler};
pub use config::QueryConfig;
pub use error::{QueryError, Result};
pub use expr::{CompareOp, Expr, QueryValue, ValueType};
pub use path::{PathExpression, PathResolver};
pub use provider::PathProvider;
pub use translate::{
    MemberKind, MemberSignature, Translator, TranslatorRegistry, LOCAL_DATE_TIME_SUFFIX,
};
