//! File-level operations around the pure parse/render core.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use time::OffsetDateTime;
use time::macros::format_description;
use tm_core::{GroupingStrategy, ThoughtmapError};
use tm_parser::{format_entry, parse_log};
use tm_render::{
    MermaidRenderConfig, SuggestionEngine, SuggestionReport, project_document,
    render_mermaid_with_config, suggest_with, to_pretty_json,
};
use tracing::{debug, info, warn};

/// Outcome of one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateReport {
    pub diagram_path: PathBuf,
    pub json_path: PathBuf,
    pub node_count: usize,
    pub warning_count: usize,
}

/// Read the thought log, failing before any processing when it is missing.
///
/// Invalid UTF-8 is replaced with U+FFFD rather than rejected.
pub fn read_log(path: &Path) -> Result<String, ThoughtmapError> {
    if !path.exists() {
        return Err(ThoughtmapError::MissingInput {
            path: path.to_path_buf(),
        });
    }
    let bytes = fs::read(path).map_err(|source| ThoughtmapError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// The JSON projection sits next to the diagram with its extension swapped.
#[must_use]
pub fn json_path_for(diagram_path: &Path) -> PathBuf {
    diagram_path.with_extension("json")
}

/// Write `content`, creating missing parent directories first.
pub fn write_artifact(path: &Path, content: &str) -> Result<(), ThoughtmapError> {
    let write_error = |source| ThoughtmapError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_error)?;
    }
    fs::write(path, content).map_err(write_error)
}

/// Parse the log and write both the Mermaid diagram and its JSON projection.
pub fn generate(
    log: &Path,
    out: &Path,
    config: &MermaidRenderConfig,
    grouping: &dyn GroupingStrategy,
) -> Result<GenerateReport, ThoughtmapError> {
    let source = read_log(log)?;
    let parsed = parse_log(&source);

    debug!(
        "Parsed {}: nodes={}, warnings={}",
        log.display(),
        parsed.nodes.len(),
        parsed.warnings.len()
    );
    for warning in &parsed.warnings {
        warn!("Skipped unparseable line: {warning}");
    }

    let diagram = render_mermaid_with_config(&parsed.nodes, &parsed.warnings, config);
    let document = project_document(&parsed.nodes, grouping.group(&parsed.nodes));
    let json = to_pretty_json(&document)?;

    let json_path = json_path_for(out);
    write_artifact(out, &diagram)?;
    write_artifact(&json_path, &json)?;

    info!(
        "Rendered {} with {} nodes to {}",
        config.style,
        parsed.nodes.len(),
        out.display()
    );

    Ok(GenerateReport {
        diagram_path: out.to_path_buf(),
        json_path,
        node_count: parsed.nodes.len(),
        warning_count: parsed.warnings.len(),
    })
}

/// Current local time at minute precision, UTC when the offset is unknown.
pub fn current_timestamp() -> Result<String, time::error::Format> {
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    now.format(format_description!("[year]-[month]-[day] [hour]:[minute]"))
}

/// Append one formatted entry to the log and return the written line.
pub fn append_entry(log: &Path, text: &str, timestamp: &str) -> Result<String, ThoughtmapError> {
    let line = format_entry(text, timestamp)?;
    let write_error = |source| ThoughtmapError::Write {
        path: log.to_path_buf(),
        source,
    };

    if let Some(parent) = log.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_error)?;
    }

    let needs_separator = fs::read(log)
        .map(|existing| existing.last().is_some_and(|byte| *byte != b'\n'))
        .unwrap_or(false);

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log)
        .map_err(write_error)?;
    if needs_separator {
        file.write_all(b"\n").map_err(write_error)?;
    }
    writeln!(file, "{line}").map_err(write_error)?;

    info!("Appended entry to {}", log.display());
    Ok(line)
}

pub fn suggest(
    log: &Path,
    engine: &dyn SuggestionEngine,
) -> Result<SuggestionReport, ThoughtmapError> {
    let source = read_log(log)?;
    let parsed = parse_log(&source);
    Ok(suggest_with(engine, &parsed.nodes))
}
