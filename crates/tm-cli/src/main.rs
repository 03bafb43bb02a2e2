#![forbid(unsafe_code)]

//! Thoughtmap CLI - turn a conversation log into a Mermaid mindmap.
//!
//! # Commands
//!
//! - `generate`: Write the Mermaid diagram and its JSON projection
//! - `add`: Append a timestamped entry to the log
//! - `suggest`: Print placeholder suggestions as JSON
//! - `watch`: Regenerate on log changes (requires `watch` feature)
//! - `serve`: HTTP endpoints for add, generate and the diagram (requires `serve` feature)

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tm_cli::{
    FileConfig, Overrides, Settings, append_entry, current_timestamp, default_base_dir, generate,
    suggest,
};
use tm_core::NoGrouping;
use tm_render::{DiagramStyle, GraphDirection, HeuristicSuggestions};
use tracing::debug;

/// Thoughtmap CLI - turn a conversation log into a Mermaid mindmap.
#[derive(Debug, Parser)]
#[command(
    name = "thoughtmap",
    version,
    about = "Thoughtmap CLI - turn a conversation log into a Mermaid mindmap",
    long_about = "Reads a log of `[timestamp] role: message` lines and writes a Mermaid\n\
        flowchart or mindmap plus a JSON projection of the same chain."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable verbose logging (can be repeated for more detail: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// TOML file with default paths and render options
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct LogArgs {
    /// Thought log path (default: thought_log.txt next to the executable)
    #[arg(short, long)]
    log: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct OutputArgs {
    /// Markdown output path; the JSON lands beside it with a .json extension
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Diagram style
    #[arg(short, long, value_enum)]
    style: Option<StyleArg>,

    /// Flowchart direction
    #[arg(short, long, value_enum, ignore_case = true)]
    direction: Option<DirectionArg>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Convert the thought log into a Mermaid diagram and JSON document.
    Generate {
        #[command(flatten)]
        log: LogArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Append a timestamped entry to the thought log.
    Add {
        /// Entry text; a leading `assistant:` or `user:` selects the role
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,

        #[command(flatten)]
        log: LogArgs,
    },

    /// Print suggestions for the current log as JSON.
    Suggest {
        #[command(flatten)]
        log: LogArgs,
    },

    /// Watch the log and regenerate on changes (requires `watch` feature).
    #[cfg(feature = "watch")]
    Watch {
        #[command(flatten)]
        log: LogArgs,

        #[command(flatten)]
        output: OutputArgs,

        /// Minimum milliseconds between regenerations
        #[arg(long)]
        debounce_ms: Option<u64>,
    },

    /// Serve the add/generate/mindmap HTTP endpoints (requires `serve` feature).
    #[cfg(feature = "serve")]
    Serve {
        #[command(flatten)]
        log: LogArgs,

        #[command(flatten)]
        output: OutputArgs,

        /// Port to listen on
        #[arg(short, long, default_value = "8080")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
enum StyleArg {
    Flowchart,
    Mindmap,
}

impl From<StyleArg> for DiagramStyle {
    fn from(value: StyleArg) -> Self {
        match value {
            StyleArg::Flowchart => Self::Flowchart,
            StyleArg::Mindmap => Self::Mindmap,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
#[value(rename_all = "UPPER")]
enum DirectionArg {
    Tb,
    Td,
    Lr,
    Rl,
    Bt,
}

impl From<DirectionArg> for GraphDirection {
    fn from(value: DirectionArg) -> Self {
        match value {
            DirectionArg::Tb => Self::TB,
            DirectionArg::Td => Self::TD,
            DirectionArg::Lr => Self::LR,
            DirectionArg::Rl => Self::RL,
            DirectionArg::Bt => Self::BT,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.quiet);

    let file_config = match &cli.config {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::default(),
    };

    match cli.command {
        Command::Generate { log, output } => {
            let settings = resolve(file_config, log, Some(output), None);
            cmd_generate(&settings, cli.quiet)
        }

        Command::Add { text, log } => {
            let settings = resolve(file_config, log, None, None);
            cmd_add(&settings, &text.join(" "), cli.quiet)
        }

        Command::Suggest { log } => {
            let settings = resolve(file_config, log, None, None);
            cmd_suggest(&settings)
        }

        #[cfg(feature = "watch")]
        Command::Watch {
            log,
            output,
            debounce_ms,
        } => {
            let settings = resolve(file_config, log, Some(output), debounce_ms);
            tm_cli::watch::watch(&settings)
        }

        #[cfg(feature = "serve")]
        Command::Serve {
            log,
            output,
            port,
            host,
        } => {
            let settings = resolve(file_config, log, Some(output), None);
            tm_cli::serve::serve(&settings, &host, port)
        }
    }
}

fn init_tracing(verbose: u8, quiet: bool) {
    let filter = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .without_time()
        .try_init();
}

fn resolve(
    file_config: FileConfig,
    log: LogArgs,
    output: Option<OutputArgs>,
    debounce_ms: Option<u64>,
) -> Settings {
    let (out, style, direction) = match output {
        Some(output) => (
            output.out,
            output.style.map(DiagramStyle::from),
            output.direction.map(GraphDirection::from),
        ),
        None => (None, None, None),
    };
    let settings = Settings::resolve(
        &default_base_dir(),
        file_config,
        Overrides {
            log: log.log,
            out,
            style,
            direction,
            debounce_ms,
        },
    );
    debug!("Resolved settings: {settings:?}");
    settings
}

// =============================================================================
// Command: generate
// =============================================================================

fn cmd_generate(settings: &Settings, quiet: bool) -> Result<()> {
    let report = generate(&settings.log, &settings.out, &settings.render, &NoGrouping)?;

    if !quiet {
        println!(
            "Wrote {} and {} ({} nodes, {} warnings)",
            report.diagram_path.display(),
            report.json_path.display(),
            report.node_count,
            report.warning_count
        );
    }

    Ok(())
}

// =============================================================================
// Command: add
// =============================================================================

fn cmd_add(settings: &Settings, text: &str, quiet: bool) -> Result<()> {
    let timestamp = current_timestamp().context("Failed to format timestamp")?;
    let line = append_entry(&settings.log, text, &timestamp)?;

    if !quiet {
        println!("Appended to {}: {line}", settings.log.display());
    }

    Ok(())
}

// =============================================================================
// Command: suggest
// =============================================================================

fn cmd_suggest(settings: &Settings) -> Result<()> {
    let report = suggest(&settings.log, &HeuristicSuggestions)?;
    let output = serde_json::to_string_pretty(&report)?;
    println!("{output}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command, DirectionArg, StyleArg};
    use clap::{CommandFactory, Parser};
    use std::path::PathBuf;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn generate_accepts_style_and_direction() {
        let cli = Cli::try_parse_from([
            "thoughtmap",
            "generate",
            "--log",
            "log.txt",
            "--out",
            "map.md",
            "--style",
            "mindmap",
            "--direction",
            "LR",
        ])
        .expect("valid arguments");

        match cli.command {
            Command::Generate { log, output } => {
                assert_eq!(log.log, Some(PathBuf::from("log.txt")));
                assert_eq!(output.out, Some(PathBuf::from("map.md")));
                assert_eq!(output.style, Some(StyleArg::Mindmap));
                assert_eq!(output.direction, Some(DirectionArg::Lr));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn add_joins_words() {
        let cli = Cli::try_parse_from(["thoughtmap", "-q", "add", "assistant:", "fix", "it"])
            .expect("valid arguments");
        assert!(cli.quiet);
        match cli.command {
            Command::Add { text, .. } => assert_eq!(text.join(" "), "assistant: fix it"),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn add_requires_text() {
        assert!(Cli::try_parse_from(["thoughtmap", "add"]).is_err());
    }

    #[cfg(feature = "serve")]
    #[test]
    fn serve_defaults_to_localhost_8080() {
        let cli = Cli::try_parse_from(["thoughtmap", "serve"]).expect("valid arguments");
        match cli.command {
            Command::Serve { port, host, .. } => {
                assert_eq!(port, 8080);
                assert_eq!(host, "127.0.0.1");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
