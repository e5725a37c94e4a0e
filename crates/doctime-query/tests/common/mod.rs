//! A small JSON document store backed by SQLite, standing in for the host
//! database in integration tests. Documents are stored as JSON text and
//! compiled filters are evaluated over the decoded bodies.
#![allow(dead_code)]

use std::cmp::Ordering;

use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value as JsonValue;
use tempfile::TempDir;

use doctime::codec::{format_local_date_time, parse_offset_date_time, DATE_TIME_FIELD};
use doctime::{Offset, Period};
use doctime_query::{CompareOp, Comparison, Filter, ValueType, LOCAL_DATE_TIME_SUFFIX};

pub struct DocumentStore {
    _dir: TempDir,
    conn: Connection,
}

impl DocumentStore {
    pub fn open() -> Self {
        let dir = TempDir::new().unwrap();
        let conn = Connection::open(dir.path().join("documents.db")).unwrap();
        conn.execute(
            "CREATE TABLE documents (id TEXT PRIMARY KEY, body TEXT NOT NULL)",
            [],
        )
        .unwrap();
        Self { _dir: dir, conn }
    }

    pub fn store<T: Serialize>(&self, id: &str, document: &T) {
        let body = serde_json::to_string(document).unwrap();
        self.conn
            .execute(
                "INSERT OR REPLACE INTO documents (id, body) VALUES (?1, ?2)",
                params![id, body],
            )
            .unwrap();
    }

    pub fn load<T: DeserializeOwned>(&self, id: &str) -> Option<T> {
        self.raw(id).map(|body| serde_json::from_value(body).unwrap())
    }

    /// The stored JSON of a document.
    pub fn raw(&self, id: &str) -> Option<JsonValue> {
        let body: Option<String> = self
            .conn
            .query_row(
                "SELECT body FROM documents WHERE id = ?1",
                params![id],
                |row| row.get(0),
            )
            .optional()
            .unwrap();
        body.map(|text| serde_json::from_str(&text).unwrap())
    }

    /// Documents matching `filter`, in id order.
    pub fn query<T: DeserializeOwned>(&self, filter: &Filter) -> Vec<T> {
        let mut stmt = self
            .conn
            .prepare("SELECT body FROM documents ORDER BY id")
            .unwrap();
        let bodies = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .unwrap()
            .map(|row| serde_json::from_str::<JsonValue>(&row.unwrap()).unwrap())
            .collect::<Vec<_>>();

        bodies
            .into_iter()
            .filter(|body| matches(filter, body))
            .map(|body| serde_json::from_value(body).unwrap())
            .collect()
    }
}

// =============================================================================
// Filter evaluation
// =============================================================================

pub fn matches(filter: &Filter, body: &JsonValue) -> bool {
    match filter {
        Filter::Compare(comparison) => compare(comparison, body),
        Filter::And(items) => items.iter().all(|item| matches(item, body)),
        Filter::Or(items) => items.iter().any(|item| matches(item, body)),
    }
}

fn compare(comparison: &Comparison, body: &JsonValue) -> bool {
    let stored = lookup(body, &comparison.path).unwrap_or(JsonValue::Null);
    let operand = &comparison.operand;

    if stored.is_null() || operand.is_null() || !comparison.member_type.is_ordered() {
        return match comparison.op {
            CompareOp::Eq => stored == *operand,
            CompareOp::Ne => stored != *operand,
            _ => false,
        };
    }

    let Some(ordering) = order(&comparison.member_type, &stored, operand) else {
        return false;
    };
    match comparison.op {
        CompareOp::Eq => ordering == Ordering::Equal,
        CompareOp::Ne => ordering != Ordering::Equal,
        CompareOp::Lt => ordering == Ordering::Less,
        CompareOp::Le => ordering != Ordering::Greater,
        CompareOp::Gt => ordering == Ordering::Greater,
        CompareOp::Ge => ordering != Ordering::Less,
    }
}

/// Reads a dotted path. The local-clock sub-field of an offset date-time
/// stored as text is derived from that text.
pub fn lookup(body: &JsonValue, path: &str) -> Option<JsonValue> {
    if path.is_empty() {
        return Some(body.clone());
    }

    let mut current = body.clone();
    for segment in path.split('.') {
        current = match current {
            JsonValue::Object(mut fields) => fields.remove(segment)?,
            JsonValue::String(text) if segment == LOCAL_DATE_TIME_SUFFIX => {
                let local = parse_offset_date_time(&text).ok()?.naive_local();
                JsonValue::String(format_local_date_time(&local))
            }
            _ => return None,
        };
    }
    Some(current)
}

fn order(member_type: &ValueType, stored: &JsonValue, operand: &JsonValue) -> Option<Ordering> {
    match member_type {
        ValueType::Instant => Some(instant(stored)?.cmp(&instant(operand)?)),
        ValueType::OffsetDateTime => {
            Some(offset_date_time(stored)?.cmp(&offset_date_time(operand)?))
        }
        ValueType::LocalDateTime => Some(local(stored)?.cmp(&local(operand)?)),
        ValueType::Offset => {
            let stored: Offset = stored.as_str()?.parse().ok()?;
            let operand: Offset = operand.as_str()?.parse().ok()?;
            Some(stored.cmp(&operand))
        }
        ValueType::Number => stored.as_f64()?.partial_cmp(&operand.as_f64()?),
        ValueType::String => Some(stored.as_str()?.cmp(operand.as_str()?)),
        _ => None,
    }
}

/// An instant stored as text, or inside a zoned value's `DateTime` field.
fn instant(value: &JsonValue) -> Option<DateTime<Utc>> {
    match value {
        JsonValue::Object(fields) => instant(fields.get(DATE_TIME_FIELD)?),
        other => Some(offset_date_time(other)?.with_timezone(&Utc)),
    }
}

fn offset_date_time(value: &JsonValue) -> Option<DateTime<FixedOffset>> {
    parse_offset_date_time(value.as_str()?).ok()
}

fn local(value: &JsonValue) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value.as_str()?, "%Y-%m-%dT%H:%M:%S%.f").ok()
}

/// Wire text of a period, for asserting stored documents.
pub fn period_text(period: &Period) -> JsonValue {
    JsonValue::String(period.to_string())
}
