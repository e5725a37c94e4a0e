mod common;

use serde::{Deserialize, Serialize};
use serde_json::json;

use common::DocumentStore;
use doctime::Offset;
use doctime_query::{Expr, Filter, QueryCompiler, ValueType};

#[derive(Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Foo {
    id: String,
    offset: Offset,
}

fn offset_member() -> Expr {
    Expr::parameter("x", ValueType::Document("Foo".to_string())).member("Offset", ValueType::Offset)
}

fn hours(value: i32) -> Offset {
    Offset::from_hours(value).unwrap()
}

/// Stores -1h, +2h and +5h.
fn seeded() -> DocumentStore {
    let store = DocumentStore::open();
    for (i, offset) in [hours(-1), hours(2), hours(5)].into_iter().enumerate() {
        let id = format!("foos/{}", i + 1);
        store.store(&id, &Foo { id: id.clone(), offset });
    }
    store
}

fn compile(expr: Expr) -> Filter {
    QueryCompiler::default().compile(&expr).unwrap()
}

#[test]
fn offset_equality_query() {
    let store = seeded();
    let docs: Vec<Foo> = store.query(&compile(offset_member().equals(hours(2))));
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].offset, hours(2));
}

#[test]
fn offset_range_queries() {
    let store = seeded();

    let count = |expr: Expr| store.query::<Foo>(&compile(expr)).len();

    assert_eq!(count(offset_member().greater_than(hours(2))), 1);
    assert_eq!(count(offset_member().greater_or_equal(hours(2))), 2);
    assert_eq!(count(offset_member().greater_or_equal(hours(-1))), 3);
    assert_eq!(count(offset_member().less_than(hours(2))), 1);
    assert_eq!(count(offset_member().less_or_equal(hours(2))), 2);
    assert_eq!(count(offset_member().less_or_equal(hours(5))), 3);
    assert_eq!(count(offset_member().not_equals(hours(5))), 2);
}

#[test]
fn offset_stored_as_text() {
    let store = seeded();
    assert_eq!(store.raw("foos/1").unwrap()["Offset"], json!("-01:00:00"));
    assert_eq!(store.raw("foos/2").unwrap()["Offset"], json!("02:00:00"));

    let loaded: Foo = store.load("foos/3").unwrap();
    assert_eq!(loaded.offset, hours(5));
}

#[test]
fn offset_extremes_query() {
    let store = DocumentStore::open();
    for (id, offset) in [("foos/min", Offset::MIN), ("foos/max", Offset::MAX)] {
        store.store(id, &Foo { id: id.to_string(), offset });
    }

    let docs: Vec<Foo> = store.query(&compile(offset_member().less_than(Offset::ZERO)));
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].offset, Offset::MIN);
    assert_eq!(store.raw("foos/max").unwrap()["Offset"], json!("18:00:00"));
}
