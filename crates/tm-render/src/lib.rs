#![forbid(unsafe_code)]

mod config;
mod json;
mod mermaid;
mod suggest;

pub use config::{DiagramStyle, GraphDirection, MermaidRenderConfig};
pub use json::{DocumentNode, ThoughtmapDocument, project_document, to_pretty_json};
pub use mermaid::{render_mermaid, render_mermaid_with_config};
pub use suggest::{HeuristicSuggestions, SuggestionEngine, SuggestionReport, suggest_with};
