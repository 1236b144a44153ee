//! Conversion between JSON parameters, Bolt values, and the gateway's
//! [`GraphValue`] model.

use std::time::Duration;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use neo4rs::{
    BoltDate, BoltDateTime, BoltDateTimeZoneId, BoltDuration, BoltList, BoltLocalDateTime,
    BoltLocalTime, BoltMap, BoltNode, BoltNull, BoltRelation, BoltString, BoltTime, BoltType,
    BoltUnboundedRelation, Row,
};
use serde_json::Value;

use cyphergate_core::types::{GraphNode, GraphPath, GraphRelationship, Properties};
use cyphergate_core::{GraphValue, Query, Record};

use crate::client::GraphError;

// ── Outbound ─────────────────────────────────────────────────────

/// Build a neo4rs query with every JSON parameter bound.
pub fn to_neo4j_query(query: &Query) -> neo4rs::Query {
    query
        .params()
        .iter()
        .fold(neo4rs::query(query.text()), |q, (key, value)| {
            q.param(key, json_to_bolt(value))
        })
}

/// Convert a JSON parameter value into its Bolt equivalent.
///
/// Integers that do not fit in `i64` are sent as floats.
pub fn json_to_bolt(value: &Value) -> BoltType {
    match value {
        Value::Null => BoltType::Null(BoltNull),
        Value::Bool(b) => BoltType::from(*b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => BoltType::from(i),
            None => BoltType::from(n.as_f64().unwrap_or(f64::NAN)),
        },
        Value::String(s) => BoltType::String(BoltString::new(s)),
        Value::Array(items) => {
            let mut list = BoltList::new();
            for item in items {
                list.push(json_to_bolt(item));
            }
            BoltType::List(list)
        }
        Value::Object(entries) => {
            let mut map = BoltMap::new();
            for (key, item) in entries {
                map.put(BoltString::new(key), json_to_bolt(item));
            }
            BoltType::Map(map)
        }
    }
}

// ── Inbound ──────────────────────────────────────────────────────

/// Convert a result row.
///
/// The driver hands rows over as a hash map, so the `RETURN` order is gone
/// by the time we see them. Columns are sorted by name, the same way map
/// and property keys are.
pub fn row_to_record(row: &Row) -> Result<Record, GraphError> {
    let mut names: Vec<String> = row.keys().into_iter().map(|k| k.value.clone()).collect();
    names.sort();

    let mut columns = Vec::with_capacity(names.len());
    for name in names {
        let value: BoltType = row
            .get(&name)
            .map_err(|e| GraphError::Conversion(format!("column {name}: {e}")))?;
        let value = bolt_to_value(&value);
        columns.push((name, value));
    }
    Ok(Record::new(columns))
}

/// Convert a Bolt value.
///
/// Temporal values become ISO-8601 text. Anything else without a structural
/// counterpart (points, bytes) is kept as its debug rendering.
pub fn bolt_to_value(value: &BoltType) -> GraphValue {
    match value {
        BoltType::Null(_) => GraphValue::Null,
        BoltType::Boolean(b) => GraphValue::Boolean(b.value),
        BoltType::Integer(i) => GraphValue::Integer(i.value),
        BoltType::Float(f) => GraphValue::Float(f.value),
        BoltType::String(s) => GraphValue::String(s.value.clone()),
        BoltType::List(list) => GraphValue::List(list.value.iter().map(bolt_to_value).collect()),
        BoltType::Map(map) => GraphValue::Map(map_to_properties(map)),
        BoltType::Node(node) => GraphValue::Node(node_to_model(node)),
        BoltType::Relation(rel) => GraphValue::Relationship(relation_to_model(rel)),
        BoltType::UnboundedRelation(rel) => {
            GraphValue::Relationship(unbounded_relation_to_model(rel))
        }
        BoltType::Path(path) => GraphValue::Path(GraphPath {
            nodes: path
                .nodes
                .value
                .iter()
                .filter_map(|n| match n {
                    BoltType::Node(node) => Some(node_to_model(node)),
                    _ => None,
                })
                .collect(),
            relationships: path
                .rels
                .value
                .iter()
                .filter_map(|r| match r {
                    BoltType::UnboundedRelation(rel) => Some(unbounded_relation_to_model(rel)),
                    BoltType::Relation(rel) => Some(relation_to_model(rel)),
                    _ => None,
                })
                .collect(),
        }),
        BoltType::Date(date) => temporal(date_text(date), value),
        BoltType::Time(time) => GraphValue::Other(time_text(time)),
        BoltType::LocalTime(time) => GraphValue::Other(NaiveTime::from(time).to_string()),
        BoltType::DateTime(dt) => temporal(date_time_text(dt), value),
        BoltType::LocalDateTime(dt) => temporal(local_date_time_text(dt), value),
        BoltType::DateTimeZoneId(dt) => temporal(zoned_date_time_text(dt), value),
        BoltType::Duration(d) => GraphValue::Other(duration_text(d)),
        other => GraphValue::Other(format!("{other:?}")),
    }
}

// ── Temporal ─────────────────────────────────────────────────────

/// Out-of-range temporals fall back to the debug rendering.
fn temporal(text: Option<String>, raw: &BoltType) -> GraphValue {
    GraphValue::Other(text.unwrap_or_else(|| format!("{raw:?}")))
}

fn date_text(date: &BoltDate) -> Option<String> {
    NaiveDate::try_from(date).ok().map(|d| d.to_string())
}

fn time_text(time: &BoltTime) -> String {
    let (time, offset): (NaiveTime, FixedOffset) = time.into();
    format!("{time}{offset}")
}

fn date_time_text(dt: &BoltDateTime) -> Option<String> {
    DateTime::<FixedOffset>::try_from(dt)
        .ok()
        .map(|d| d.to_rfc3339())
}

fn local_date_time_text(dt: &BoltLocalDateTime) -> Option<String> {
    NaiveDateTime::try_from(dt)
        .ok()
        .map(|d| d.format("%Y-%m-%dT%H:%M:%S%.f").to_string())
}

/// Zoned date-times render as `<offset date-time>[<zone id>]`.
fn zoned_date_time_text(dt: &BoltDateTimeZoneId) -> Option<String> {
    match DateTime::<FixedOffset>::try_from(dt) {
        Ok(d) => Some(format!("{}[{}]", d.to_rfc3339(), dt.tz_id())),
        Err(_) => NaiveDateTime::try_from(dt)
            .ok()
            .map(|d| format!("{}[{}]", d.format("%Y-%m-%dT%H:%M:%S%.f"), dt.tz_id())),
    }
}

/// Durations are flattened to seconds; months count as 30.4375 days.
fn duration_text(d: &BoltDuration) -> String {
    let d = Duration::from(d.clone());
    match d.subsec_nanos() {
        0 => format!("PT{}S", d.as_secs()),
        nanos => format!("PT{}.{:09}S", d.as_secs(), nanos),
    }
}

/// Bolt maps are unordered; keys are sorted so output is stable.
fn map_to_properties(map: &BoltMap) -> Properties {
    let mut entries: Properties = map
        .value
        .iter()
        .map(|(key, value)| (key.value.clone(), bolt_to_value(value)))
        .collect();
    entries.sort_by(|a, b| a.0.cmp(&b.0));
    entries
}

fn node_to_model(node: &BoltNode) -> GraphNode {
    GraphNode {
        id: node.id.value,
        labels: node
            .labels
            .value
            .iter()
            .filter_map(|l| match l {
                BoltType::String(s) => Some(s.value.clone()),
                _ => None,
            })
            .collect(),
        properties: map_to_properties(&node.properties),
    }
}

fn relation_to_model(rel: &BoltRelation) -> GraphRelationship {
    GraphRelationship {
        id: rel.id.value,
        rel_type: rel.typ.value.clone(),
        properties: map_to_properties(&rel.properties),
        start: Some(rel.start_node_id.value),
        end: Some(rel.end_node_id.value),
    }
}

fn unbounded_relation_to_model(rel: &BoltUnboundedRelation) -> GraphRelationship {
    GraphRelationship {
        id: rel.id.value,
        rel_type: rel.typ.value.clone(),
        properties: map_to_properties(&rel.properties),
        start: None,
        end: None,
    }
}

#[cfg(test)]
mod tests {
    use neo4rs::{BoltBoolean, BoltFloat, BoltInteger};
    use serde_json::json;

    use super::*;

    #[test]
    fn json_scalars_map_to_bolt() {
        assert_eq!(json_to_bolt(&json!(null)), BoltType::Null(BoltNull));
        assert_eq!(
            json_to_bolt(&json!(true)),
            BoltType::Boolean(BoltBoolean::new(true))
        );
        assert_eq!(json_to_bolt(&json!(42)), BoltType::Integer(BoltInteger::new(42)));
        assert_eq!(json_to_bolt(&json!(1.5)), BoltType::Float(BoltFloat::new(1.5)));
        assert_eq!(
            json_to_bolt(&json!("Alice")),
            BoltType::String(BoltString::new("Alice"))
        );
    }

    #[test]
    fn json_collections_map_to_bolt() {
        match json_to_bolt(&json!(["a", 1])) {
            BoltType::List(list) => assert_eq!(list.value.len(), 2),
            other => panic!("expected list, got {other:?}"),
        }
        match json_to_bolt(&json!({"name": "Alice", "tags": ["x"]})) {
            BoltType::Map(map) => assert_eq!(map.value.len(), 2),
            other => panic!("expected map, got {other:?}"),
        }
    }

    #[test]
    fn bolt_scalars_convert_back() {
        assert_eq!(
            bolt_to_value(&BoltType::Integer(BoltInteger::new(7))),
            GraphValue::Integer(7)
        );
        assert_eq!(
            bolt_to_value(&BoltType::String(BoltString::new("x"))),
            GraphValue::from("x")
        );
        assert_eq!(bolt_to_value(&BoltType::Null(BoltNull)), GraphValue::Null);
    }

    #[test]
    fn row_columns_come_back_sorted_by_name() {
        let names = ["zeta", "alpha", "mid", "beta", "omega", "c1", "c2", "c3"];
        let fields: BoltList = names
            .iter()
            .map(|n| BoltType::String(BoltString::new(n)))
            .collect::<Vec<_>>()
            .into();
        let data: BoltList = (0..names.len() as i64)
            .map(|i| BoltType::Integer(BoltInteger::new(i)))
            .collect::<Vec<_>>()
            .into();

        let record = row_to_record(&Row::new(fields, data)).unwrap();
        let columns: Vec<_> = record.columns().iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(
            columns,
            vec!["alpha", "beta", "c1", "c2", "c3", "mid", "omega", "zeta"]
        );
        assert_eq!(record.get("zeta"), Some(&GraphValue::Integer(0)));
        assert_eq!(record.get("omega"), Some(&GraphValue::Integer(4)));
    }

    #[test]
    fn dates_and_times_render_as_iso_text() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let time = NaiveTime::from_hms_opt(10, 15, 30).unwrap();
        let offset = FixedOffset::east_opt(3600).unwrap();

        assert_eq!(
            bolt_to_value(&BoltType::Date(BoltDate::from(date))),
            GraphValue::Other("2024-01-02".into())
        );
        assert_eq!(
            bolt_to_value(&BoltType::LocalTime(BoltLocalTime::from(time))),
            GraphValue::Other("10:15:30".into())
        );
        assert_eq!(
            bolt_to_value(&BoltType::Time(BoltTime::from((time, offset)))),
            GraphValue::Other("10:15:30+01:00".into())
        );
    }

    #[test]
    fn date_times_render_as_iso_text() {
        let local = NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(10, 15, 30)
            .unwrap();
        let offset = DateTime::parse_from_rfc3339("2024-01-02T10:15:30+01:00").unwrap();

        assert_eq!(
            bolt_to_value(&BoltType::LocalDateTime(BoltLocalDateTime::from(local))),
            GraphValue::Other("2024-01-02T10:15:30".into())
        );
        assert_eq!(
            bolt_to_value(&BoltType::DateTime(BoltDateTime::from(offset))),
            GraphValue::Other("2024-01-02T10:15:30+01:00".into())
        );
        assert_eq!(
            bolt_to_value(&BoltType::DateTimeZoneId(BoltDateTimeZoneId::from((
                local,
                "Europe/Berlin"
            )))),
            GraphValue::Other("2024-01-02T10:15:30+01:00[Europe/Berlin]".into())
        );
    }

    #[test]
    fn durations_render_as_iso_seconds() {
        assert_eq!(
            bolt_to_value(&BoltType::Duration(BoltDuration::from(Duration::from_secs(3600)))),
            GraphValue::Other("PT3600S".into())
        );
        assert_eq!(
            bolt_to_value(&BoltType::Duration(BoltDuration::from(Duration::new(90, 500)))),
            GraphValue::Other("PT90.000000500S".into())
        );
    }

    #[test]
    fn bolt_map_keys_are_sorted() {
        let value = json_to_bolt(&json!({"b": 2, "a": 1, "c": 3}));
        match bolt_to_value(&value) {
            GraphValue::Map(entries) => {
                let keys: Vec<_> = entries.iter().map(|(k, _)| k.as_str()).collect();
                assert_eq!(keys, vec!["a", "b", "c"]);
            }
            other => panic!("expected map, got {other:?}"),
        }
    }
}
