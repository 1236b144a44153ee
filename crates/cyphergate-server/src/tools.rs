//! Tool dispatch table.
//!
//! Each tool validates its arguments, derives a query, runs it through the
//! [`QueryExecutor`], and renders the result as one text block. Every failure
//! is turned into an `Error: ...` block here; nothing escapes to the
//! transport.

use std::fmt::Display;
use std::sync::{Arc, LazyLock};

use regex::Regex;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Map, Value};

use cyphergate_core::normalize::{normalize, normalize_values};
use cyphergate_core::{
    ExecutionResult, GatewayError, GraphStore, GraphValue, Query, QueryExecutor, QueryIntent,
    Record,
};

use crate::registry::{self, ToolDescriptor, ToolKind};

const SCHEMA_QUERY: &str = "
CALL apoc.meta.data() YIELD label, property, type, other, unique, index, elementType
WHERE elementType = 'node' AND NOT label STARTS WITH '_'
WITH label,
    collect(CASE WHEN type <> 'RELATIONSHIP' THEN [property, type + CASE WHEN unique THEN ' unique' ELSE '' END + CASE WHEN index THEN ' indexed' ELSE '' END] END) AS attributes,
    collect(CASE WHEN type = 'RELATIONSHIP' THEN [property, head(other)] END) AS relationships
RETURN label, apoc.map.fromPairs(attributes) AS attributes, apoc.map.fromPairs(relationships) AS relationships
";

const LABELS_QUERY: &str = "
CALL db.labels() YIELD label
WITH collect(label) AS labels
RETURN reduce(joined = '', l IN labels | joined + CASE WHEN joined = '' THEN '' ELSE ',' END + l) AS labels
";

const FIND_CUSTOMER_QUERY: &str = "
MATCH (c:customer)
WHERE toLower(c.name) CONTAINS toLower($name)
RETURN c
ORDER BY c.name
LIMIT 5
";

const CUSTOMER_REQUESTS_QUERY: &str = "
MATCH (c:customer)-[:CUSTOMER]-(cr:customer_request)
WHERE c.id = $customer_id
RETURN cr
ORDER BY cr.created_on DESC
";

static PLAIN_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("static regex"));

static QUOTED_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^`[^`]+`$").expect("static regex"));

/// Rendered result of one tool call: a single text block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    pub text: String,
    pub is_error: bool,
}

impl ToolOutput {
    pub fn ok(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    pub fn error(message: impl Display) -> Self {
        Self {
            text: format!("Error: {message}"),
            is_error: true,
        }
    }

    /// Error block that repeats the query and its parameters so the caller
    /// can fix and resubmit them.
    fn error_with_query(message: impl Display, query: &Query) -> Self {
        let params = Value::Object(query.params().clone());
        Self {
            text: format!("Error: {message}\n{}\n{params}", query.text()),
            is_error: true,
        }
    }
}

impl From<cyphergate_core::Result<String>> for ToolOutput {
    fn from(result: cyphergate_core::Result<String>) -> Self {
        match result {
            Ok(text) => Self::ok(text),
            Err(e) => Self::error(e),
        }
    }
}

// ── Arguments ────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct CypherArgs {
    query: String,
    #[serde(default)]
    params: Option<Map<String, Value>>,
}

#[derive(Debug, Deserialize)]
struct LabelArgs {
    label: String,
}

#[derive(Debug, Deserialize)]
struct LabelPairArgs {
    node1: String,
    node2: String,
}

#[derive(Debug, Deserialize)]
struct NameArgs {
    name: String,
}

#[derive(Debug, Deserialize)]
struct CustomerArgs {
    customer_id: String,
}

fn parse_args<T: DeserializeOwned>(tool: &str, args: Map<String, Value>) -> Result<T, ToolOutput> {
    serde_json::from_value(Value::Object(args))
        .map_err(|e| ToolOutput::error(format!("invalid arguments for {tool}: {e}")))
}

// ── Label interpolation ──────────────────────────────────────────

/// Build the node pattern `(var:label)`.
///
/// Labels cannot be bound as query parameters, so they are spliced into the
/// text. Only a plain identifier or a single backtick-quoted name is
/// accepted; the value is never rewritten. Callers should pass labels
/// obtained from `get_graph_labels`.
pub fn label_pattern(var: &str, label: &str) -> cyphergate_core::Result<String> {
    if PLAIN_LABEL.is_match(label) || QUOTED_LABEL.is_match(label) {
        Ok(format!("({var}:{label})"))
    } else {
        Err(GatewayError::Validation(format!(
            "label {label:?} is not a valid node label"
        )))
    }
}

/// Format relationship types between two labels.
///
/// Emits `label1->label2:T` per forward type, `label2->label1:T` per
/// backward type, then one `label1-label2:...` entry listing the undirected
/// scan's types that appear in neither direction.
pub fn relationship_lines(
    label1: &str,
    label2: &str,
    forward: &[String],
    backward: &[String],
    undirected: &[String],
) -> Vec<String> {
    let mut lines = Vec::with_capacity(forward.len() + backward.len() + 1);
    lines.extend(forward.iter().map(|t| format!("{label1}->{label2}:{t}")));
    lines.extend(backward.iter().map(|t| format!("{label2}->{label1}:{t}")));

    let truly_undirected: Vec<&str> = undirected
        .iter()
        .filter(|t| !forward.contains(t) && !backward.contains(t))
        .map(String::as_str)
        .collect();
    lines.push(format!("{label1}-{label2}:{}", truly_undirected.join(",")));
    lines
}

fn column_values(records: Vec<Record>, column: &str) -> Vec<GraphValue> {
    records
        .into_iter()
        .filter_map(|record| {
            record
                .into_columns()
                .into_iter()
                .find(|(name, _)| name == column)
                .map(|(_, value)| value)
        })
        .collect()
}

// ── Dispatch ─────────────────────────────────────────────────────

/// The stateless tool handlers, bound to one executor.
///
/// Clone is cheap (inner Arc).
#[derive(Clone)]
pub struct GatewayTools {
    executor: QueryExecutor,
    read_only: bool,
}

impl GatewayTools {
    pub fn new(store: Arc<dyn GraphStore>, read_only: bool) -> Self {
        Self {
            executor: QueryExecutor::new(store),
            read_only,
        }
    }

    /// Dispatch a tool call by name.
    pub async fn call(&self, name: &str, args: Map<String, Value>) -> ToolOutput {
        let Some(tool) = registry::find(name) else {
            tracing::warn!(tool = name, "Unknown tool");
            return ToolOutput::error(format!("unknown tool: {name}"));
        };
        tracing::info!(tool = tool.name, "Tool call");

        let output = match self.dispatch(tool, args).await {
            Ok(output) | Err(output) => output,
        };
        if output.is_error {
            tracing::info!(tool = tool.name, error = %output.text, "Tool call failed");
        }
        output
    }

    async fn dispatch(
        &self,
        tool: &ToolDescriptor,
        args: Map<String, Value>,
    ) -> Result<ToolOutput, ToolOutput> {
        let name = tool.name;
        Ok(match tool.kind {
            ToolKind::ReadCypher | ToolKind::WriteCypher => {
                let a: CypherArgs = parse_args(name, args)?;
                self.cypher(tool, a.query, a.params.unwrap_or_default()).await
            }
            ToolKind::Schema => self.schema().await,
            ToolKind::Labels => self.labels().await,
            ToolKind::CountByLabel => {
                let a: LabelArgs = parse_args(name, args)?;
                self.count_by_label(&a.label).await
            }
            ToolKind::RelationshipsBetween => {
                let a: LabelPairArgs = parse_args(name, args)?;
                self.relationships_between(&a.node1, &a.node2).await
            }
            ToolKind::FindCustomer => {
                let a: NameArgs = parse_args(name, args)?;
                self.find_customer_by_name(&a.name).await
            }
            ToolKind::CustomerRequests => {
                let a: CustomerArgs = parse_args(name, args)?;
                self.customer_requests(&a.customer_id).await
            }
        })
    }

    /// Generic Cypher under the tool's declared intent.
    ///
    /// Text that classifies differently is refused before the store is
    /// contacted. Reads return normalized records; writes return the
    /// mutation counters as a JSON object.
    pub async fn cypher(
        &self,
        tool: &ToolDescriptor,
        text: String,
        params: Map<String, Value>,
    ) -> ToolOutput {
        tracing::info!(tool = tool.name, intent = %tool.intent, query = %text, "Running Cypher query");
        if self.read_only && tool.intent == QueryIntent::Write {
            return ToolOutput::error(GatewayError::Policy(format!(
                "{} is disabled: the gateway is read-only",
                tool.name
            )));
        }

        let query = Query::with_params(text, params);
        match self.executor.execute(&query, tool.intent).await {
            Ok(ExecutionResult::Records(records)) => normalize(&records).into(),
            Ok(ExecutionResult::Summary(summary)) => serde_json::to_string(&summary)
                .map_err(GatewayError::from)
                .into(),
            Err(GatewayError::Classification { expected, .. }) => {
                ToolOutput::error(GatewayError::Policy(format!(
                    "Only {} queries are allowed for {}",
                    expected.to_string().to_lowercase(),
                    tool.name
                )))
            }
            Err(e) => ToolOutput::error_with_query(e, &query),
        }
    }

    /// Introspect the schema via APOC. A missing APOC install comes back as
    /// the engine's own error text.
    pub async fn schema(&self) -> ToolOutput {
        let result = self.executor.read(&Query::new(SCHEMA_QUERY)).await;
        if let Err(e) = &result {
            tracing::error!(error = %e, "Database error retrieving schema");
        }
        result.and_then(|records| normalize(&records)).into()
    }

    /// All labels as a single comma-joined `labels` column.
    pub async fn labels(&self) -> ToolOutput {
        self.executor
            .read(&Query::new(LABELS_QUERY))
            .await
            .and_then(|records| normalize(&records))
            .into()
    }

    pub async fn count_by_label(&self, label: &str) -> ToolOutput {
        let result: cyphergate_core::Result<String> = async {
            let pattern = label_pattern("n", label)?;
            let query = Query::new(format!("MATCH {pattern} RETURN count(n) AS count"));
            let records = self.executor.read(&query).await?;
            normalize(&records)
        }
        .await;
        result.into()
    }

    pub async fn relationships_between(&self, node1: &str, node2: &str) -> ToolOutput {
        let result: cyphergate_core::Result<String> = async {
            let n1 = label_pattern("n1", node1)?;
            let n2 = label_pattern("n2", node2)?;

            let forward = self
                .relationship_types(format!("MATCH {n1}-[r]->{n2}"))
                .await?;
            let backward = self
                .relationship_types(format!("MATCH {n2}-[r]->{n1}"))
                .await?;
            let undirected = self
                .relationship_types(format!("MATCH {n1}-[r]-{n2}"))
                .await?;

            let lines = relationship_lines(node1, node2, &forward, &backward, &undirected);
            tracing::debug!(entries = lines.len(), "Directional relationship query completed");
            Ok(serde_json::to_string(&json!([{ "relationship_types": lines }]))?)
        }
        .await;
        result.into()
    }

    async fn relationship_types(&self, pattern: String) -> cyphergate_core::Result<Vec<String>> {
        let query = Query::new(format!(
            "{pattern} RETURN collect(DISTINCT type(r)) AS relationship_types"
        ));
        let records = self.executor.read(&query).await?;
        Ok(records
            .first()
            .and_then(|r| r.get("relationship_types"))
            .map(GraphValue::as_string_list)
            .unwrap_or_default())
    }

    /// Case-insensitive substring search on customer names. A blank name
    /// returns `[]` without a query.
    pub async fn find_customer_by_name(&self, name: &str) -> ToolOutput {
        let name = name.trim();
        if name.is_empty() {
            return ToolOutput::ok("[]");
        }

        let query = Query::new(FIND_CUSTOMER_QUERY).param("name", name);
        self.executor
            .read(&query)
            .await
            .and_then(|records| {
                let customers = column_values(records, "c");
                tracing::debug!(count = customers.len(), "Customer search completed");
                normalize_values(&customers)
            })
            .into()
    }

    /// Requests linked to one customer, newest first. A blank id returns
    /// `[]` without a query.
    pub async fn customer_requests(&self, customer_id: &str) -> ToolOutput {
        let customer_id = customer_id.trim();
        if customer_id.is_empty() {
            return ToolOutput::ok("[]");
        }

        let query = Query::new(CUSTOMER_REQUESTS_QUERY).param("customer_id", customer_id);
        self.executor
            .read(&query)
            .await
            .and_then(|records| normalize_values(&column_values(records, "cr")))
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn relationship_lines_split_directed_and_undirected() {
        let lines = relationship_lines(
            "x",
            "y",
            &strings(&["A"]),
            &strings(&["B"]),
            &strings(&["A", "B", "C"]),
        );
        assert_eq!(lines, vec!["x->y:A", "y->x:B", "x-y:C"]);
    }

    #[test]
    fn relationship_lines_always_end_with_undirected_entry() {
        let lines = relationship_lines("x", "y", &[], &[], &[]);
        assert_eq!(lines, vec!["x-y:"]);

        let lines = relationship_lines(
            "Person",
            "Company",
            &strings(&["WORKS_AT", "OWNS"]),
            &[],
            &strings(&["WORKS_AT", "OWNS", "KNOWS", "LIKES"]),
        );
        assert_eq!(
            lines,
            vec![
                "Person->Company:WORKS_AT",
                "Person->Company:OWNS",
                "Person-Company:KNOWS,LIKES"
            ]
        );
    }

    #[test]
    fn label_pattern_accepts_identifiers() {
        assert_eq!(label_pattern("n", "Person").unwrap(), "(n:Person)");
        assert_eq!(label_pattern("n", "customer_request").unwrap(), "(n:customer_request)");
        assert_eq!(label_pattern("n", "`Movie Star`").unwrap(), "(n:`Movie Star`)");
    }

    #[test]
    fn label_pattern_rejects_injection() {
        for label in [
            "",
            "Person) DETACH DELETE (n",
            "Person {name: 'x'}",
            "`a`b`",
            "1Person",
            "Person:Admin",
        ] {
            let err = label_pattern("n", label).unwrap_err();
            assert!(matches!(err, GatewayError::Validation(_)), "{label}");
        }
    }

    #[test]
    fn error_output_is_prefixed() {
        let out = ToolOutput::error("boom");
        assert_eq!(out.text, "Error: boom");
        assert!(out.is_error);
    }

    #[test]
    fn error_with_query_appends_diagnostics() {
        let query = Query::new("MATCH (n) RETURN n").param("x", 1);
        let out = ToolOutput::error_with_query("bad", &query);
        assert_eq!(out.text, "Error: bad\nMATCH (n) RETURN n\n{\"x\":1}");
    }

    #[test]
    fn column_values_unwrap_named_column() {
        let records = vec![
            Record::new(vec![("c".to_string(), GraphValue::from("a"))]),
            Record::new(vec![("other".to_string(), GraphValue::from("b"))]),
            Record::new(vec![("c".to_string(), GraphValue::from("c"))]),
        ];
        assert_eq!(
            column_values(records, "c"),
            vec![GraphValue::from("a"), GraphValue::from("c")]
        );
    }
}
