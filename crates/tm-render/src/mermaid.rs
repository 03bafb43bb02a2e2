//! Mermaid source emission.
//!
//! Output is a fenced Markdown block. Node declarations come first, then one
//! `%%` comment per skipped log line, then the edges of the chain. The same
//! input always produces byte-identical output.

use std::fmt::Write as _;

use tm_core::{ROOT_ID, ROOT_LABEL, ThoughtNode, chain_edges};

use crate::config::{DiagramStyle, MermaidRenderConfig};

const FENCE_OPEN: &str = "```mermaid";
const FENCE_CLOSE: &str = "```";
const INDENT: &str = "  ";
const WARNING_PREFIX: &str = "%% Skipped unparseable line: ";

#[must_use]
pub fn render_mermaid(nodes: &[ThoughtNode], warnings: &[String]) -> String {
    render_mermaid_with_config(nodes, warnings, &MermaidRenderConfig::default())
}

#[must_use]
pub fn render_mermaid_with_config(
    nodes: &[ThoughtNode],
    warnings: &[String],
    config: &MermaidRenderConfig,
) -> String {
    let mut out = String::new();
    out.push_str(FENCE_OPEN);
    out.push('\n');
    match config.style {
        DiagramStyle::Flowchart => write_flowchart(&mut out, nodes, warnings, config),
        DiagramStyle::Mindmap => write_mindmap(&mut out, nodes, warnings),
    }
    out.push_str(FENCE_CLOSE);
    out.push('\n');
    out
}

fn write_flowchart(
    out: &mut String,
    nodes: &[ThoughtNode],
    warnings: &[String],
    config: &MermaidRenderConfig,
) {
    let _ = writeln!(out, "graph {}", config.direction);
    let _ = writeln!(out, "{INDENT}{ROOT_ID}[\"{}\"]", quote_safe(ROOT_LABEL));
    for node in nodes {
        let _ = writeln!(out, "{INDENT}{}[\"{}\"]", node.id, quote_safe(&node.label()));
    }
    write_warnings(out, warnings, INDENT);
    for edge in chain_edges(nodes) {
        let _ = writeln!(out, "{INDENT}{} --> {}", edge.from, edge.to);
    }
}

fn write_mindmap(out: &mut String, nodes: &[ThoughtNode], warnings: &[String]) {
    out.push_str("mindmap\n");
    let _ = writeln!(out, "{INDENT}{ROOT_ID}(({ROOT_LABEL}))");
    let child_indent = INDENT.repeat(2);
    for node in nodes {
        let _ = writeln!(out, "{child_indent}{}", node.label());
    }
    write_warnings(out, warnings, &child_indent);
}

fn write_warnings(out: &mut String, warnings: &[String], indent: &str) {
    for warning in warnings {
        let _ = writeln!(out, "{indent}{WARNING_PREFIX}{warning}");
    }
}

/// Double quotes terminate a quoted Mermaid label.
fn quote_safe(label: &str) -> String {
    label.replace('"', "#quot;")
}

#[cfg(test)]
mod tests {
    use super::{render_mermaid, render_mermaid_with_config};
    use crate::config::{GraphDirection, MermaidRenderConfig};
    use proptest::prelude::*;
    use tm_core::{Role, ThoughtNode};

    fn node(id: &str, timestamp: &str, role: Role, text: &str) -> ThoughtNode {
        ThoughtNode {
            id: id.to_string(),
            timestamp: timestamp.to_string(),
            role,
            text: text.to_string(),
        }
    }

    #[test]
    fn empty_log_renders_root_only() {
        let output = render_mermaid(&[], &[]);
        assert_eq!(
            output,
            "```mermaid\ngraph TD\n  root[\"Conversation\"]\n```\n"
        );
    }

    #[test]
    fn flowchart_layout_is_nodes_then_warnings_then_edges() {
        let nodes = vec![
            node("n0", "2024-01-01 10:00", Role::User, "Hi there"),
            node("n1", "", Role::Assistant, "fix the (bug)"),
        ];
        let warnings = vec!["no colon here".to_string()];
        let output = render_mermaid(&nodes, &warnings);
        let expected = "\
```mermaid
graph TD
  root[\"Conversation\"]
  n0[\"2024-01-01 10:00 User: Hi there\"]
  n1[\"Assistant: fix the bug\"]
  %% Skipped unparseable line: no colon here
  root --> n0
  n0 --> n1
```
";
        assert_eq!(output, expected);
    }

    #[test]
    fn direction_is_configurable() {
        let config = MermaidRenderConfig {
            direction: GraphDirection::LR,
            ..MermaidRenderConfig::default()
        };
        let output = render_mermaid_with_config(&[], &[], &config);
        assert!(output.contains("\ngraph LR\n"));
    }

    #[test]
    fn double_quotes_are_escaped() {
        let nodes = vec![node("n0", "", Role::User, "say \"hi\"")];
        let output = render_mermaid(&nodes, &[]);
        assert!(output.contains("n0[\"User: say #quot;hi#quot;\"]"));
    }

    #[test]
    fn mindmap_lists_every_thought_under_root() {
        let nodes = vec![
            node("n0", "", Role::User, "first"),
            node("n1", "", Role::Assistant, "second"),
        ];
        let output =
            render_mermaid_with_config(&nodes, &["bad".to_string()], &MermaidRenderConfig::mindmap());
        let expected = "\
```mermaid
mindmap
  root((Conversation))
    User: first
    Assistant: second
    %% Skipped unparseable line: bad
```
";
        assert_eq!(output, expected);
        assert!(!output.contains("-->"));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_render_is_deterministic(texts in prop::collection::vec("[a-zA-Z0-9 (){}\\[\\]\"]{1,24}", 0..8)) {
            let nodes: Vec<ThoughtNode> = texts
                .iter()
                .enumerate()
                .map(|(index, text)| node(&format!("n{index}"), "", Role::User, text))
                .collect();
            let first = render_mermaid(&nodes, &[]);
            let second = render_mermaid(&nodes, &[]);
            prop_assert_eq!(&first, &second);
            prop_assert_eq!(first.matches(" --> ").count(), nodes.len());
        }
    }
}
