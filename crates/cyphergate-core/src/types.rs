//! Query and result model shared by the executor, the normalizer, and the
//! Neo4j client.
//!
//! Values coming back from the store are converted into [`GraphValue`] at the
//! driver boundary so nothing above it depends on Bolt types.

use std::fmt;

use serde::{Deserialize, Serialize};

// ── Query ─────────────────────────────────────────────────────────

/// Read/write classification of a query.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum QueryIntent {
    Read,
    Write,
}

impl fmt::Display for QueryIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read => f.write_str("READ"),
            Self::Write => f.write_str("WRITE"),
        }
    }
}

/// Cypher text plus its named parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    text: String,
    params: serde_json::Map<String, serde_json::Value>,
}

impl Query {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            params: serde_json::Map::new(),
        }
    }

    pub fn with_params(
        text: impl Into<String>,
        params: serde_json::Map<String, serde_json::Value>,
    ) -> Self {
        Self {
            text: text.into(),
            params,
        }
    }

    /// Add a single parameter.
    pub fn param(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        self.params.insert(key.to_string(), value.into());
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn params(&self) -> &serde_json::Map<String, serde_json::Value> {
        &self.params
    }
}

// ── Values ────────────────────────────────────────────────────────

/// Ordered property map. Order is whatever the producer supplied.
pub type Properties = Vec<(String, GraphValue)>;

/// A node as returned by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphNode {
    pub id: i64,
    pub labels: Vec<String>,
    pub properties: Properties,
}

/// A relationship. `start`/`end` are absent for unbound relationships
/// carried inside a path.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphRelationship {
    pub id: i64,
    pub rel_type: String,
    pub properties: Properties,
    pub start: Option<i64>,
    pub end: Option<i64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GraphPath {
    pub nodes: Vec<GraphNode>,
    pub relationships: Vec<GraphRelationship>,
}

/// Any value a record column can hold.
#[derive(Debug, Clone, PartialEq)]
pub enum GraphValue {
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
    List(Vec<GraphValue>),
    Map(Properties),
    Node(GraphNode),
    Relationship(GraphRelationship),
    Path(GraphPath),
    /// Stringified native value with no JSON counterpart (temporal,
    /// spatial, bytes).
    Other(String),
}

impl GraphValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// String elements of a list value; non-string elements are skipped.
    pub fn as_string_list(&self) -> Vec<String> {
        match self {
            Self::List(items) => items
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect(),
            _ => Vec::new(),
        }
    }
}

impl From<&str> for GraphValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<i64> for GraphValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

// ── Records ───────────────────────────────────────────────────────

/// One result row: column alias → value, in column order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    columns: Vec<(String, GraphValue)>,
}

impl Record {
    pub fn new(columns: Vec<(String, GraphValue)>) -> Self {
        Self { columns }
    }

    pub fn get(&self, column: &str) -> Option<&GraphValue> {
        self.columns
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    pub fn columns(&self) -> &[(String, GraphValue)] {
        &self.columns
    }

    pub fn into_columns(self) -> Vec<(String, GraphValue)> {
        self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

// ── Execution results ─────────────────────────────────────────────

/// Counters reported by the store after a committed write.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MutationSummary {
    pub nodes_created: u64,
    pub nodes_deleted: u64,
    pub relationships_created: u64,
    pub relationships_deleted: u64,
    pub properties_set: u64,
    pub labels_added: u64,
    pub labels_removed: u64,
    pub indexes_added: u64,
    pub indexes_removed: u64,
    pub constraints_added: u64,
    pub constraints_removed: u64,
    pub system_updates: u64,
    pub contains_updates: bool,
}

impl MutationSummary {
    /// Recompute `contains_updates` from the counters.
    pub fn finalize(mut self) -> Self {
        self.contains_updates = self.nodes_created
            + self.nodes_deleted
            + self.relationships_created
            + self.relationships_deleted
            + self.properties_set
            + self.labels_added
            + self.labels_removed
            + self.indexes_added
            + self.indexes_removed
            + self.constraints_added
            + self.constraints_removed
            > 0;
        self
    }
}

/// Outcome of one executor call.
#[derive(Debug, Clone, PartialEq)]
pub enum ExecutionResult {
    Records(Vec<Record>),
    Summary(MutationSummary),
}
