#![forbid(unsafe_code)]

mod grouping;
mod sanitize;

pub use grouping::{GroupingStrategy, NoGrouping, ThoughtGroup};
pub use sanitize::{collapse_whitespace, sanitize_label};

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Id of the synthetic node that anchors every chain.
pub const ROOT_ID: &str = "root";

/// Label of the synthetic root node.
pub const ROOT_LABEL: &str = "Conversation";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Assistant,
}

impl Role {
    /// Resolve a speaker token. Anything that is not an assistant is a user.
    #[must_use]
    pub fn from_token(token: &str) -> Self {
        let lower = token.trim().to_ascii_lowercase();
        if lower.starts_with("assistant") {
            Self::Assistant
        } else {
            Self::User
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Assistant => "Assistant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One parsed entry of the thought log.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ThoughtNode {
    pub id: String,
    /// Text found between the leading brackets; empty when the line had none.
    pub timestamp: String,
    pub role: Role,
    pub text: String,
}

impl ThoughtNode {
    /// Raw label before sanitization, always carrying the bracket pair.
    #[must_use]
    pub fn raw_label(&self) -> String {
        format!("[{}] {}: {}", self.timestamp, self.role, self.text)
    }

    /// Label safe to embed in a Mermaid node declaration.
    #[must_use]
    pub fn label(&self) -> String {
        sanitize_label(&self.raw_label())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ThoughtEdge {
    pub from: String,
    pub to: String,
}

/// Link the root and every node into a single path, in the order given.
#[must_use]
pub fn chain_edges(nodes: &[ThoughtNode]) -> Vec<ThoughtEdge> {
    let mut edges = Vec::with_capacity(nodes.len());
    let mut previous = ROOT_ID;
    for node in nodes {
        edges.push(ThoughtEdge {
            from: previous.to_string(),
            to: node.id.clone(),
        });
        previous = node.id.as_str();
    }
    edges
}

#[derive(Debug, Error)]
pub enum ThoughtmapError {
    #[error("Log file not found: {}", path.display())]
    MissingInput { path: PathBuf },
    #[error("Failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Entry text is required")]
    EmptyEntry,
    #[error("Failed to serialize thoughtmap document")]
    Json(#[from] serde_json::Error),
}

impl ThoughtmapError {
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::MissingInput { .. } => "thoughtmap/error/missing-input",
            Self::Read { .. } => "thoughtmap/error/read",
            Self::Write { .. } => "thoughtmap/error/write",
            Self::EmptyEntry => "thoughtmap/error/empty-entry",
            Self::Json(_) => "thoughtmap/error/json",
        }
    }
}
