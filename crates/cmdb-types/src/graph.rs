//! Graph visualization API types
//!
//! The backend returns a flat `{nodes, edges}` structure; the console maps
//! it to a render scene without interpreting the payloads further.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub node_type: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub size: Option<f32>,
    #[serde(default)]
    pub data: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(default)]
    pub label: String,
    #[serde(rename = "type", default)]
    pub edge_type: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub data: Value,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphData {
    #[serde(default)]
    pub nodes: Vec<GraphNode>,
    #[serde(default)]
    pub edges: Vec<GraphEdge>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_type_field_uses_wire_name() {
        let json = r#"{"id":"n1","label":"web-01","type":"Server","data":{}}"#;
        let node: GraphNode = serde_json::from_str(json).unwrap();
        assert_eq!(node.node_type, "Server");
        assert!(node.color.is_none());
    }
}
