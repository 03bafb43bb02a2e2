//! Pluggable grouping of thoughts into clusters.

use serde::{Deserialize, Serialize};

use crate::ThoughtNode;

/// A named cluster of thought node ids.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ThoughtGroup {
    pub label: String,
    pub node_ids: Vec<String>,
}

/// Strategy that clusters related thoughts.
///
/// The output is passed straight through to the JSON projection, so an
/// implementation can be swapped in without touching the builder or renderers.
pub trait GroupingStrategy {
    fn group(&self, nodes: &[ThoughtNode]) -> Vec<ThoughtGroup>;
}

/// Default strategy: no clustering.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoGrouping;

impl GroupingStrategy for NoGrouping {
    fn group(&self, _nodes: &[ThoughtNode]) -> Vec<ThoughtGroup> {
        Vec::new()
    }
}
