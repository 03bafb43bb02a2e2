use tm_core::{ThoughtNode, sanitize_label};

use crate::ParseResult;
use crate::line::ParsedLine;

pub(crate) struct ThoughtBuilder {
    nodes: Vec<ThoughtNode>,
    warnings: Vec<String>,
}

impl ThoughtBuilder {
    pub(crate) fn new() -> Self {
        Self {
            nodes: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Record a line that could not be parsed. The raw text is kept only when
    /// sanitizing leaves nothing to show.
    pub(crate) fn add_warning(&mut self, raw_line: &str) {
        let sanitized = sanitize_label(raw_line);
        let detail = if sanitized.is_empty() {
            raw_line.trim().to_string()
        } else {
            sanitized
        };
        self.warnings.push(detail);
    }

    /// Ids are dense over accepted lines: rejected lines never consume one.
    pub(crate) fn push_node(&mut self, parsed: ParsedLine) -> &ThoughtNode {
        let node = ThoughtNode {
            id: format!("n{}", self.nodes.len()),
            timestamp: parsed.timestamp,
            role: parsed.role,
            text: parsed.text,
        };
        self.nodes.push(node);
        &self.nodes[self.nodes.len() - 1]
    }

    pub(crate) fn finish(self) -> ParseResult {
        ParseResult {
            nodes: self.nodes,
            warnings: self.warnings,
        }
    }
}
