#![forbid(unsafe_code)]

mod builder;
mod entry;
mod line;

use serde::Serialize;
use tm_core::{ThoughtEdge, ThoughtNode, chain_edges};

use builder::ThoughtBuilder;

pub use entry::{TIMESTAMP_FORMAT, format_entry};
pub use line::{ParsedLine, parse_line};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct ParseResult {
    pub nodes: Vec<ThoughtNode>,
    /// Sanitized text of every rejected line, in log order.
    pub warnings: Vec<String>,
}

impl ParseResult {
    /// The linear chain `root -> n0 -> n1 -> ...`.
    #[must_use]
    pub fn edges(&self) -> Vec<ThoughtEdge> {
        chain_edges(&self.nodes)
    }
}

/// Split raw log text into trimmed, non-empty lines.
#[must_use]
pub fn log_lines(source: &str) -> Vec<&str> {
    source
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

/// Turn already-filtered log lines into thought nodes and warnings.
///
/// Never fails: a line that does not parse becomes a warning and processing
/// continues with the next one.
#[must_use]
pub fn build_thoughts<'a>(lines: impl IntoIterator<Item = &'a str>) -> ParseResult {
    let mut builder = ThoughtBuilder::new();
    for raw_line in lines {
        match parse_line(raw_line) {
            Some(parsed) => {
                builder.push_node(parsed);
            }
            None => builder.add_warning(raw_line),
        }
    }
    builder.finish()
}

/// Parse a whole thought log.
#[must_use]
pub fn parse_log(source: &str) -> ParseResult {
    build_thoughts(log_lines(source))
}
