//! Diagram renderer configuration types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which Mermaid diagram family to emit.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum DiagramStyle {
    /// `graph <dir>` with an explicit edge per consecutive pair.
    #[default]
    Flowchart,
    /// `mindmap` with every thought hanging off the root.
    Mindmap,
}

impl DiagramStyle {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Flowchart => "flowchart",
            Self::Mindmap => "mindmap",
        }
    }
}

impl fmt::Display for DiagramStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DiagramStyle {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "flowchart" | "graph" => Ok(Self::Flowchart),
            "mindmap" => Ok(Self::Mindmap),
            other => Err(format!("unknown diagram style '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum GraphDirection {
    TB,
    #[default]
    TD,
    LR,
    RL,
    BT,
}

impl GraphDirection {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TB => "TB",
            Self::TD => "TD",
            Self::LR => "LR",
            Self::RL => "RL",
            Self::BT => "BT",
        }
    }
}

impl fmt::Display for GraphDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GraphDirection {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "TB" => Ok(Self::TB),
            "TD" => Ok(Self::TD),
            "LR" => Ok(Self::LR),
            "RL" => Ok(Self::RL),
            "BT" => Ok(Self::BT),
            other => Err(format!("unknown graph direction '{other}'")),
        }
    }
}

/// Configuration for Mermaid output.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct MermaidRenderConfig {
    pub style: DiagramStyle,
    /// Flowchart direction; ignored for mindmaps.
    pub direction: GraphDirection,
}

impl MermaidRenderConfig {
    /// Top-down flowchart.
    #[must_use]
    pub fn flowchart() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn mindmap() -> Self {
        Self {
            style: DiagramStyle::Mindmap,
            ..Self::default()
        }
    }
}
