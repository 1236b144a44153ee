//! The closed set of tools exposed over MCP.
//!
//! Every tool is described once here; `tools/list` and argument handling are
//! both driven from this table.

use serde_json::{json, Map, Value};

use cyphergate_core::QueryIntent;

/// Which handler a descriptor dispatches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    ReadCypher,
    WriteCypher,
    Schema,
    Labels,
    CountByLabel,
    RelationshipsBetween,
    FindCustomer,
    CustomerRequests,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    String,
    Object,
}

impl ParamType {
    fn as_json_type(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Object => "object",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ParamSpec {
    pub name: &'static str,
    pub kind: ParamType,
    pub required: bool,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub params: &'static [ParamSpec],
    pub intent: QueryIntent,
    pub kind: ToolKind,
}

impl ToolDescriptor {
    /// JSON Schema for the tool's arguments object.
    pub fn input_schema(&self) -> Map<String, Value> {
        let mut properties = Map::new();
        for p in self.params {
            properties.insert(
                p.name.to_string(),
                json!({ "type": p.kind.as_json_type(), "description": p.description }),
            );
        }
        let required: Vec<&str> = self
            .params
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name)
            .collect();

        let mut schema = Map::new();
        schema.insert("type".to_string(), json!("object"));
        schema.insert("properties".to_string(), Value::Object(properties));
        schema.insert("required".to_string(), json!(required));
        schema
    }
}

const CYPHER_PARAMS: &[ParamSpec] = &[
    ParamSpec {
        name: "query",
        kind: ParamType::String,
        required: true,
        description: "The Cypher query to execute.",
    },
    ParamSpec {
        name: "params",
        kind: ParamType::Object,
        required: false,
        description: "The parameters to pass to the Cypher query.",
    },
];

pub static TOOLS: &[ToolDescriptor] = &[
    ToolDescriptor {
        name: "read_neo4j_cypher",
        description: "Execute a read Cypher query on the neo4j database.",
        params: CYPHER_PARAMS,
        intent: QueryIntent::Read,
        kind: ToolKind::ReadCypher,
    },
    ToolDescriptor {
        name: "write_neo4j_cypher",
        description: "Execute a write Cypher query on the neo4j database.",
        params: CYPHER_PARAMS,
        intent: QueryIntent::Write,
        kind: ToolKind::WriteCypher,
    },
    ToolDescriptor {
        name: "get_neo4j_schema",
        description: "List all node types, their attributes and their relationships to other node \
                      types in the neo4j database. If this fails with a message that includes \
                      \"Neo.ClientError.Procedure.ProcedureNotFound\" suggest that the user install \
                      and enable the APOC plugin.",
        params: &[],
        intent: QueryIntent::Read,
        kind: ToolKind::Schema,
    },
    ToolDescriptor {
        name: "get_graph_labels",
        description: "Fetch and return all labels in the graph as one comma-separated string. \
                      Returned labels are required for future queries, and are case-sensitive.",
        params: &[],
        intent: QueryIntent::Read,
        kind: ToolKind::Labels,
    },
    ToolDescriptor {
        name: "get_count_nodes_by_label",
        description: "Fetch and return the number of nodes in the graph with the given label. \
                      Only labels returned by get_graph_labels are valid.",
        params: &[ParamSpec {
            name: "label",
            kind: ParamType::String,
            required: true,
            description: "The label of the node type to count.",
        }],
        intent: QueryIntent::Read,
        kind: ToolKind::CountByLabel,
    },
    ToolDescriptor {
        name: "get_relationships_between_nodes",
        description: "Fetch and return the distinct relationship types between the two given node \
                      types. Returns directional relationship information in the format \
                      node1->node2:TYPE, node2->node1:TYPE, node1-node2:TYPES. \
                      Only labels returned by get_graph_labels are valid.",
        params: &[
            ParamSpec {
                name: "node1",
                kind: ParamType::String,
                required: true,
                description: "The label of the first node type.",
            },
            ParamSpec {
                name: "node2",
                kind: ParamType::String,
                required: true,
                description: "The label of the second node type.",
            },
        ],
        intent: QueryIntent::Read,
        kind: ToolKind::RelationshipsBetween,
    },
    ToolDescriptor {
        name: "find_customer_by_name",
        description: "Find customers by name using case-insensitive search. Returns the customer \
                      nodes whose name contains the search term, limited to 5 results.",
        params: &[ParamSpec {
            name: "name",
            kind: ParamType::String,
            required: true,
            description: "The customer name to search for (case insensitive).",
        }],
        intent: QueryIntent::Read,
        kind: ToolKind::FindCustomer,
    },
    ToolDescriptor {
        name: "get_customer_requests",
        description: "Find customer requests for a specific customer, ordered by creation date, \
                      newest first.",
        params: &[ParamSpec {
            name: "customer_id",
            kind: ParamType::String,
            required: true,
            description: "The customer ID to get requests for.",
        }],
        intent: QueryIntent::Read,
        kind: ToolKind::CustomerRequests,
    },
];

/// Look up a tool by name.
pub fn find(name: &str) -> Option<&'static ToolDescriptor> {
    TOOLS.iter().find(|t| t.name == name)
}
