//! Structured projection of the thought chain for programmatic consumers.

use serde::{Deserialize, Serialize};
use tm_core::{ROOT_LABEL, Role, ThoughtGroup, ThoughtNode, ThoughtmapError, chain_edges};

/// Serialized node entry. Field order is the key order in the output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocumentNode {
    pub id: String,
    pub text: String,
    pub role: Role,
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ThoughtmapDocument {
    pub root: String,
    pub nodes: Vec<DocumentNode>,
    /// `[from, to]` pairs of the linear chain, starting at `"root"`.
    pub edges: Vec<[String; 2]>,
    pub groups: Vec<ThoughtGroup>,
}

#[must_use]
pub fn project_document(nodes: &[ThoughtNode], groups: Vec<ThoughtGroup>) -> ThoughtmapDocument {
    ThoughtmapDocument {
        root: ROOT_LABEL.to_string(),
        nodes: nodes
            .iter()
            .map(|node| DocumentNode {
                id: node.id.clone(),
                text: node.text.clone(),
                role: node.role,
                timestamp: node.timestamp.clone(),
            })
            .collect(),
        edges: chain_edges(nodes)
            .into_iter()
            .map(|edge| [edge.from, edge.to])
            .collect(),
        groups,
    }
}

/// Two-space indented JSON with a trailing newline.
pub fn to_pretty_json(document: &ThoughtmapDocument) -> Result<String, ThoughtmapError> {
    let mut json = serde_json::to_string_pretty(document)?;
    json.push('\n');
    Ok(json)
}
