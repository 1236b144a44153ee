//! Conversion of query results into the JSON text handed to tool callers.

use serde_json::{json, Map, Value};

use crate::error::Result;
use crate::types::{GraphNode, GraphPath, GraphRelationship, GraphValue, Properties, Record};

/// Serialize records as a JSON array, one object per record, in input order.
pub fn normalize(records: &[Record]) -> Result<String> {
    let rows: Vec<Value> = records.iter().map(record_to_json).collect();
    Ok(serde_json::to_string(&rows)?)
}

/// Serialize plain values (e.g. a single unwrapped column) as a JSON array.
pub fn normalize_values(values: &[GraphValue]) -> Result<String> {
    let items: Vec<Value> = values.iter().map(value_to_json).collect();
    Ok(serde_json::to_string(&items)?)
}

pub fn record_to_json(record: &Record) -> Value {
    let mut row = Map::with_capacity(record.len());
    for (column, value) in record.columns() {
        row.insert(column.clone(), value_to_json(value));
    }
    Value::Object(row)
}

/// Total conversion: every value has a JSON form, falling back to a string.
pub fn value_to_json(value: &GraphValue) -> Value {
    match value {
        GraphValue::Null => Value::Null,
        GraphValue::Boolean(b) => Value::Bool(*b),
        GraphValue::Integer(i) => Value::from(*i),
        GraphValue::Float(f) => serde_json::Number::from_f64(*f)
            .map(Value::Number)
            .unwrap_or_else(|| Value::String(f.to_string())),
        GraphValue::String(s) => Value::String(s.clone()),
        GraphValue::List(items) => Value::Array(items.iter().map(value_to_json).collect()),
        GraphValue::Map(entries) => properties_to_json(entries),
        GraphValue::Node(node) => node_to_json(node),
        GraphValue::Relationship(rel) => relationship_to_json(rel),
        GraphValue::Path(path) => path_to_json(path),
        GraphValue::Other(text) => Value::String(text.clone()),
    }
}

fn properties_to_json(entries: &Properties) -> Value {
    let mut map = Map::with_capacity(entries.len());
    for (key, value) in entries {
        map.insert(key.clone(), value_to_json(value));
    }
    Value::Object(map)
}

fn node_to_json(node: &GraphNode) -> Value {
    json!({
        "labels": node.labels,
        "properties": properties_to_json(&node.properties),
    })
}

fn relationship_to_json(rel: &GraphRelationship) -> Value {
    json!({
        "type": rel.rel_type,
        "properties": properties_to_json(&rel.properties),
        "start": rel.start,
        "end": rel.end,
    })
}

fn path_to_json(path: &GraphPath) -> Value {
    json!({
        "nodes": path.nodes.iter().map(node_to_json).collect::<Vec<_>>(),
        "relationships": path.relationships.iter().map(relationship_to_json).collect::<Vec<_>>(),
    })
}
