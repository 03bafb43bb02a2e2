//! Follow-up suggestions for the current conversation.

use serde::{Deserialize, Serialize};
use tm_core::ThoughtNode;

/// Produces suggestion strings. The response shape stays the same whichever
/// engine fills it.
pub trait SuggestionEngine {
    fn suggest(&self, nodes: &[ThoughtNode]) -> Vec<String>;
}

/// Placeholder engine driven by node counts.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicSuggestions;

impl SuggestionEngine for HeuristicSuggestions {
    fn suggest(&self, nodes: &[ThoughtNode]) -> Vec<String> {
        let mut suggestions = Vec::new();
        if nodes.is_empty() {
            suggestions.push("Add a first thought to start the map.".to_string());
        }
        if nodes.len() >= 2 {
            suggestions.push("Connect the latest thought to an earlier one.".to_string());
        }
        if nodes.len() >= 4 {
            suggestions.push("Summarize the conversation so far into a single node.".to_string());
        }
        suggestions
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct SuggestionReport {
    pub suggestions: Vec<String>,
}

#[must_use]
pub fn suggest_with(engine: &dyn SuggestionEngine, nodes: &[ThoughtNode]) -> SuggestionReport {
    SuggestionReport {
        suggestions: engine.suggest(nodes),
    }
}
