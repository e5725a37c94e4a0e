//! Query expression model.
//!
//! A predicate such as `x => x.ZonedDateTime.ToInstant() < cutoff` is
//! represented as a small tree: parameters, member accesses and method
//! calls form the receiver chain, constants carry values from the caller,
//! and comparisons and boolean connectives combine them. Every node that
//! reads a value knows its static [`ValueType`].

use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};
use doctime::codec::format_local_date_time;
use doctime::{
    Codec, InstantCodec, Offset, OffsetCodec, OffsetDateTimeCodec, Period, PeriodCodec,
    TzdbProvider, ZonedDateTime, ZonedDateTimeCodec,
};
use serde_json::Value as JsonValue;

use crate::error::{QueryError, Result};

// =============================================================================
// Types
// =============================================================================

/// Static type of a value in a query expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueType {
    /// A stored document (or embedded object) of the named type.
    Document(String),
    String,
    Number,
    Boolean,
    Instant,
    OffsetDateTime,
    LocalDateTime,
    ZonedDateTime,
    Offset,
    Period,
}

impl ValueType {
    /// Returns the type name.
    pub fn name(&self) -> &str {
        match self {
            ValueType::Document(name) => name,
            ValueType::String => "String",
            ValueType::Number => "Number",
            ValueType::Boolean => "Boolean",
            ValueType::Instant => "Instant",
            ValueType::OffsetDateTime => "OffsetDateTime",
            ValueType::LocalDateTime => "LocalDateTime",
            ValueType::ZonedDateTime => "ZonedDateTime",
            ValueType::Offset => "Offset",
            ValueType::Period => "Period",
        }
    }

    /// Whether values of this type can be range-compared.
    ///
    /// A period has no fixed length without an anchor, and two zoned values
    /// in different zones have no natural order beyond their instants.
    pub fn is_ordered(&self) -> bool {
        match self {
            ValueType::String
            | ValueType::Number
            | ValueType::Instant
            | ValueType::OffsetDateTime
            | ValueType::LocalDateTime
            | ValueType::Offset => true,
            ValueType::Document(_)
            | ValueType::Boolean
            | ValueType::ZonedDateTime
            | ValueType::Period => false,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl CompareOp {
    /// Whether the operator needs a total order.
    pub fn is_ordering(self) -> bool {
        !matches!(self, CompareOp::Eq | CompareOp::Ne)
    }

    /// The operator with its operands swapped: `a < b` is `b > a`.
    pub fn mirror(self) -> CompareOp {
        match self {
            CompareOp::Eq => CompareOp::Eq,
            CompareOp::Ne => CompareOp::Ne,
            CompareOp::Lt => CompareOp::Gt,
            CompareOp::Le => CompareOp::Ge,
            CompareOp::Gt => CompareOp::Lt,
            CompareOp::Ge => CompareOp::Le,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CompareOp::Eq => "==",
            CompareOp::Ne => "!=",
            CompareOp::Lt => "<",
            CompareOp::Le => "<=",
            CompareOp::Gt => ">",
            CompareOp::Ge => ">=",
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Constants
// =============================================================================

/// A constant supplied by the caller of a query.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryValue {
    Null,
    Boolean(bool),
    Number(f64),
    String(String),
    Instant(DateTime<Utc>),
    OffsetDateTime(DateTime<FixedOffset>),
    LocalDateTime(NaiveDateTime),
    ZonedDateTime(ZonedDateTime),
    Offset(Offset),
    Period(Period),
}

impl QueryValue {
    /// Static type of the constant; `None` for null.
    pub fn value_type(&self) -> Option<ValueType> {
        let ty = match self {
            QueryValue::Null => return None,
            QueryValue::Boolean(_) => ValueType::Boolean,
            QueryValue::Number(_) => ValueType::Number,
            QueryValue::String(_) => ValueType::String,
            QueryValue::Instant(_) => ValueType::Instant,
            QueryValue::OffsetDateTime(_) => ValueType::OffsetDateTime,
            QueryValue::LocalDateTime(_) => ValueType::LocalDateTime,
            QueryValue::ZonedDateTime(_) => ValueType::ZonedDateTime,
            QueryValue::Offset(_) => ValueType::Offset,
            QueryValue::Period(_) => ValueType::Period,
        };
        Some(ty)
    }

    /// The instant denoted by the constant, if it denotes one.
    pub fn to_instant(&self) -> Option<DateTime<Utc>> {
        match self {
            QueryValue::Instant(instant) => Some(*instant),
            QueryValue::OffsetDateTime(odt) => Some(odt.with_timezone(&Utc)),
            QueryValue::ZonedDateTime(zdt) => Some(zdt.to_instant()),
            _ => None,
        }
    }

    /// Encodes the constant the way a stored field of its type is written.
    ///
    /// Fails for NaN and infinite numbers, which JSON cannot carry.
    pub fn encode(&self) -> Result<JsonValue> {
        let encoded = match self {
            QueryValue::Null => JsonValue::Null,
            QueryValue::Boolean(value) => JsonValue::Bool(*value),
            QueryValue::Number(value) => serde_json::Number::from_f64(*value)
                .map(JsonValue::Number)
                .ok_or(QueryError::NonFiniteNumber { value: *value })?,
            QueryValue::String(value) => JsonValue::String(value.clone()),
            QueryValue::Instant(value) => InstantCodec.encode_value(value)?,
            QueryValue::OffsetDateTime(value) => OffsetDateTimeCodec.encode_value(value)?,
            QueryValue::LocalDateTime(value) => JsonValue::String(format_local_date_time(value)),
            QueryValue::ZonedDateTime(value) => {
                ZonedDateTimeCodec::<TzdbProvider>::default().encode_value(value)?
            }
            QueryValue::Offset(value) => OffsetCodec.encode_value(value)?,
            QueryValue::Period(value) => PeriodCodec.encode_value(value)?,
        };
        Ok(encoded)
    }
}

impl From<bool> for QueryValue {
    fn from(value: bool) -> Self {
        QueryValue::Boolean(value)
    }
}

impl From<f64> for QueryValue {
    fn from(value: f64) -> Self {
        QueryValue::Number(value)
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        QueryValue::String(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        QueryValue::String(value)
    }
}

impl From<DateTime<Utc>> for QueryValue {
    fn from(value: DateTime<Utc>) -> Self {
        QueryValue::Instant(value)
    }
}

impl From<DateTime<FixedOffset>> for QueryValue {
    fn from(value: DateTime<FixedOffset>) -> Self {
        QueryValue::OffsetDateTime(value)
    }
}

impl From<NaiveDateTime> for QueryValue {
    fn from(value: NaiveDateTime) -> Self {
        QueryValue::LocalDateTime(value)
    }
}

impl From<ZonedDateTime> for QueryValue {
    fn from(value: ZonedDateTime) -> Self {
        QueryValue::ZonedDateTime(value)
    }
}

impl From<Offset> for QueryValue {
    fn from(value: Offset) -> Self {
        QueryValue::Offset(value)
    }
}

impl From<Period> for QueryValue {
    fn from(value: Period) -> Self {
        QueryValue::Period(value)
    }
}

impl fmt::Display for QueryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryValue::Null => f.write_str("null"),
            QueryValue::Boolean(value) => write!(f, "{}", value),
            QueryValue::Number(value) => write!(f, "{}", value),
            QueryValue::String(value) => write!(f, "{:?}", value),
            QueryValue::Instant(value) => write!(f, "{}", value.to_rfc3339()),
            QueryValue::OffsetDateTime(value) => write!(f, "{}", value.to_rfc3339()),
            QueryValue::LocalDateTime(value) => write!(f, "{}", value),
            QueryValue::ZonedDateTime(value) => write!(f, "{}", value),
            QueryValue::Offset(value) => write!(f, "{}", value),
            QueryValue::Period(value) => write!(f, "{}", value),
        }
    }
}

// =============================================================================
// Expressions
// =============================================================================

/// A node in a query expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// The lambda parameter, i.e. the document being filtered.
    Parameter { name: String, ty: ValueType },

    /// Property access: `target.name`.
    Member {
        target: Box<Expr>,
        name: String,
        ty: ValueType,
    },

    /// Parameterless method call: `target.method()`.
    Call {
        target: Box<Expr>,
        method: String,
        ty: ValueType,
    },

    Constant(QueryValue),

    Compare {
        op: CompareOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    And(Vec<Expr>),

    Or(Vec<Expr>),
}

impl Expr {
    pub fn parameter(name: impl Into<String>, ty: ValueType) -> Self {
        Expr::Parameter {
            name: name.into(),
            ty,
        }
    }

    pub fn constant(value: impl Into<QueryValue>) -> Self {
        Expr::Constant(value.into())
    }

    /// Accesses a property of this expression.
    pub fn member(self, name: impl Into<String>, ty: ValueType) -> Self {
        Expr::Member {
            target: Box::new(self),
            name: name.into(),
            ty,
        }
    }

    /// Calls a method on this expression.
    pub fn call(self, method: impl Into<String>, ty: ValueType) -> Self {
        Expr::Call {
            target: Box::new(self),
            method: method.into(),
            ty,
        }
    }

    pub fn compare(self, op: CompareOp, right: Expr) -> Self {
        Expr::Compare {
            op,
            left: Box::new(self),
            right: Box::new(right),
        }
    }

    pub fn equals(self, value: impl Into<QueryValue>) -> Self {
        self.compare(CompareOp::Eq, Expr::constant(value))
    }

    pub fn not_equals(self, value: impl Into<QueryValue>) -> Self {
        self.compare(CompareOp::Ne, Expr::constant(value))
    }

    pub fn less_than(self, value: impl Into<QueryValue>) -> Self {
        self.compare(CompareOp::Lt, Expr::constant(value))
    }

    pub fn less_or_equal(self, value: impl Into<QueryValue>) -> Self {
        self.compare(CompareOp::Le, Expr::constant(value))
    }

    pub fn greater_than(self, value: impl Into<QueryValue>) -> Self {
        self.compare(CompareOp::Gt, Expr::constant(value))
    }

    pub fn greater_or_equal(self, value: impl Into<QueryValue>) -> Self {
        self.compare(CompareOp::Ge, Expr::constant(value))
    }

    /// Conjunction; nested conjunctions are flattened.
    pub fn and(self, other: Expr) -> Self {
        let mut items = match self {
            Expr::And(items) => items,
            single => vec![single],
        };
        match other {
            Expr::And(more) => items.extend(more),
            single => items.push(single),
        }
        Expr::And(items)
    }

    /// Disjunction; nested disjunctions are flattened.
    pub fn or(self, other: Expr) -> Self {
        let mut items = match self {
            Expr::Or(items) => items,
            single => vec![single],
        };
        match other {
            Expr::Or(more) => items.extend(more),
            single => items.push(single),
        }
        Expr::Or(items)
    }

    /// Static type of the value this node produces.
    pub fn value_type(&self) -> Option<ValueType> {
        match self {
            Expr::Parameter { ty, .. } | Expr::Member { ty, .. } | Expr::Call { ty, .. } => {
                Some(ty.clone())
            }
            Expr::Constant(value) => value.value_type(),
            Expr::Compare { .. } | Expr::And(_) | Expr::Or(_) => Some(ValueType::Boolean),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Parameter { name, .. } => f.write_str(name),
            Expr::Member { target, name, .. } => write!(f, "{}.{}", target, name),
            Expr::Call { target, method, .. } => write!(f, "{}.{}()", target, method),
            Expr::Constant(value) => write!(f, "{}", value),
            Expr::Compare { op, left, right } => write!(f, "{} {} {}", left, op, right),
            Expr::And(items) => write_joined(f, items, " && "),
            Expr::Or(items) => write_joined(f, items, " || "),
        }
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, items: &[Expr], separator: &str) -> fmt::Result {
    f.write_str("(")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(separator)?;
        }
        write!(f, "{}", item)?;
    }
    f.write_str(")")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn foo() -> Expr {
        Expr::parameter("x", ValueType::Document("Foo".to_string()))
    }

    #[test]
    fn test_display_receiver_chain() {
        let expr = foo()
            .member("ZonedDateTime", ValueType::ZonedDateTime)
            .call("ToInstant", ValueType::Instant);
        assert_eq!(expr.to_string(), "x.ZonedDateTime.ToInstant()");
        assert_eq!(expr.value_type(), Some(ValueType::Instant));
    }

    #[test]
    fn test_and_flattens() {
        let a = foo().member("A", ValueType::Number).equals(1.0);
        let b = foo().member("B", ValueType::Number).equals(2.0);
        let c = foo().member("C", ValueType::Number).equals(3.0);

        let Expr::And(items) = a.and(b).and(c) else {
            panic!("expected conjunction");
        };
        assert_eq!(items.len(), 3);
    }

    #[test]
    fn test_mirror() {
        assert_eq!(CompareOp::Lt.mirror(), CompareOp::Gt);
        assert_eq!(CompareOp::Ge.mirror(), CompareOp::Le);
        assert_eq!(CompareOp::Eq.mirror(), CompareOp::Eq);
    }

    #[test]
    fn test_ordered_types() {
        assert!(ValueType::Instant.is_ordered());
        assert!(ValueType::Offset.is_ordered());
        assert!(!ValueType::Period.is_ordered());
        assert!(!ValueType::ZonedDateTime.is_ordered());
    }

    #[test]
    fn test_encode_instant_constant() {
        let instant = Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap();
        assert_eq!(
            QueryValue::from(instant).encode().unwrap(),
            json!("2024-05-06T07:08:09.000000000+00:00")
        );
    }

    #[test]
    fn test_encode_period_and_offset_constants() {
        assert_eq!(QueryValue::from(Period::from_days(3)).encode().unwrap(), json!("P3D"));
        assert_eq!(
            QueryValue::from(Offset::from_hours(-3).unwrap()).encode().unwrap(),
            json!("-03:00:00")
        );
    }

    #[test]
    fn test_encode_rejects_non_finite_numbers() {
        for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = QueryValue::from(value).encode().unwrap_err();
            assert!(matches!(err, QueryError::NonFiniteNumber { .. }));
        }
        assert_eq!(QueryValue::from(2.5).encode().unwrap(), json!(2.5));
    }

    #[test]
    fn test_to_instant() {
        let zdt = ZonedDateTime::from_instant(
            Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap(),
            doctime::Tz::Asia__Kolkata,
        );
        assert_eq!(QueryValue::from(zdt).to_instant(), Some(zdt.to_instant()));
        assert_eq!(QueryValue::from("text").to_instant(), None);
    }
}
