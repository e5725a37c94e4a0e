mod common;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use common::DocumentStore;
use doctime::codec::format_offset_date_time;
use doctime::{max_iso_instant, Tz, TzdbProvider, ZoneConfig, ZoneProvider, ZonedDateTime};
use doctime_query::{Expr, QueryCompiler, QueryError, ValueType};

#[derive(Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Foo {
    id: String,
    zoned_date_time: ZonedDateTime,
}

fn system_zone() -> Tz {
    TzdbProvider::from_config(&ZoneConfig::from_env())
        .unwrap()
        .system_default()
}

fn foo() -> Expr {
    Expr::parameter("x", ValueType::Document("Foo".to_string()))
}

fn zoned_date_time() -> Expr {
    foo().member("ZonedDateTime", ValueType::ZonedDateTime)
}

fn to_instant() -> Expr {
    zoned_date_time().call("ToInstant", ValueType::Instant)
}

/// Stores T, T+1h and T+2h and checks equality and instant range queries.
fn assert_three_hour_scenario(start: DateTime<Utc>, zone: Tz) {
    let store = DocumentStore::open();
    let values: Vec<ZonedDateTime> = (0..3)
        .map(|hours| ZonedDateTime::from_instant(start + TimeDelta::hours(hours), zone))
        .collect();

    for (i, value) in values.iter().enumerate() {
        let id = format!("foos/{}", i + 1);
        store.store(
            &id,
            &Foo {
                id: id.clone(),
                zoned_date_time: *value,
            },
        );
    }

    let compiler = QueryCompiler::default();
    let last = values[2];

    let equal: Vec<Foo> = store.query(&compiler.compile(&zoned_date_time().equals(values[0])).unwrap());
    assert_eq!(equal.len(), 1);
    assert_eq!(equal[0].zoned_date_time, values[0]);

    let before: Vec<Foo> =
        store.query(&compiler.compile(&to_instant().less_than(last.to_instant())).unwrap());
    assert_eq!(before.len(), 2);
    assert!(before.iter().all(|doc| doc.zoned_date_time != last));

    let up_to: Vec<Foo> =
        store.query(&compiler.compile(&to_instant().less_or_equal(last.to_instant())).unwrap());
    assert_eq!(up_to.len(), 3);
}

#[test]
fn zoned_date_time_query_now() {
    assert_three_hour_scenario(Utc::now(), system_zone());
}

#[test]
fn zoned_date_time_query_near_iso_max() {
    let start = max_iso_instant() - TimeDelta::hours(24);
    assert_three_hour_scenario(start, system_zone());
}

#[test]
fn zoned_date_time_query_across_dst_change() {
    // Berlin leaves CEST at 01:00 UTC on 2024-10-27; the three values carry
    // two different offsets but still order by instant.
    let start = "2024-10-27T00:30:00Z".parse::<DateTime<Utc>>().unwrap();
    assert_three_hour_scenario(start, Tz::Europe__Berlin);
}

#[test]
fn zoned_date_time_instant_query_accepts_zoned_constant() {
    let store = DocumentStore::open();
    let start = "2024-06-01T08:00:00Z".parse::<DateTime<Utc>>().unwrap();
    for hours in 0..3 {
        let id = format!("foos/{}", hours + 1);
        let zdt = ZonedDateTime::from_instant(start + TimeDelta::hours(hours), Tz::Asia__Tokyo);
        store.store(&id, &Foo { id: id.clone(), zoned_date_time: zdt });
    }

    // Same instant as the second document, seen from another zone.
    let pivot = ZonedDateTime::from_instant(start + TimeDelta::hours(1), Tz::America__Sao_Paulo);
    let filter = QueryCompiler::default()
        .compile(&to_instant().greater_or_equal(pivot))
        .unwrap();

    let docs: Vec<Foo> = store.query(&filter);
    let ids: Vec<_> = docs.iter().map(|doc| doc.id.as_str()).collect();
    assert_eq!(ids, ["foos/2", "foos/3"]);
}

#[test]
fn stored_zoned_date_time_has_wire_shape() {
    let store = DocumentStore::open();
    let zdt = ZonedDateTime::from_instant(
        "2024-01-15T12:00:00Z".parse::<DateTime<Utc>>().unwrap(),
        Tz::Europe__Berlin,
    );
    store.store(
        "foos/1",
        &Foo {
            id: "foos/1".to_string(),
            zoned_date_time: zdt,
        },
    );

    let raw = store.raw("foos/1").unwrap();
    assert_eq!(
        raw["ZonedDateTime"],
        json!({
            "DateTime": format_offset_date_time(&zdt.to_offset_date_time()),
            "Zone": "Europe/Berlin",
        })
    );
    assert_eq!(raw["ZonedDateTime"]["DateTime"], json!("2024-01-15T13:00:00.000000000+01:00"));

    let loaded: Foo = store.load("foos/1").unwrap();
    assert_eq!(loaded.zoned_date_time, zdt);
}

#[test]
fn zoned_date_time_ordering_query_is_rejected() {
    let err = QueryCompiler::default()
        .compile(&zoned_date_time().less_than(ZonedDateTime::now(Tz::UTC)))
        .unwrap_err();
    assert!(matches!(err, QueryError::UnorderedComparison { .. }));
}
