//! Settings resolution: command-line flags over the TOML file over defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;
use tm_render::{DiagramStyle, GraphDirection, MermaidRenderConfig};

use crate::watch::DEFAULT_DEBOUNCE;

pub const DEFAULT_LOG_FILE: &str = "thought_log.txt";
pub const DEFAULT_OUTPUT_FILE: &str = "mindmap.md";

/// Contents of an optional `thoughtmap.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub log: Option<PathBuf>,
    pub out: Option<PathBuf>,
    pub style: Option<DiagramStyle>,
    pub direction: Option<GraphDirection>,
    pub debounce_ms: Option<u64>,
}

impl FileConfig {
    /// Load a config file. Relative `log` and `out` paths are taken relative
    /// to the directory holding the file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config =
            Self::from_toml(&raw).with_context(|| format!("Invalid config: {}", path.display()))?;
        Ok(match path.parent() {
            Some(dir) => config.relative_to(dir),
            None => config,
        })
    }

    pub fn from_toml(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// Join relative paths onto `dir`; absolute paths are left alone.
    #[must_use]
    pub fn relative_to(self, dir: &Path) -> Self {
        let rebase = |path: PathBuf| {
            if path.is_relative() {
                dir.join(path)
            } else {
                path
            }
        };
        Self {
            log: self.log.map(rebase),
            out: self.out.map(rebase),
            ..self
        }
    }
}

/// Values given on the command line. `None` means "not given".
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub log: Option<PathBuf>,
    pub out: Option<PathBuf>,
    pub style: Option<DiagramStyle>,
    pub direction: Option<GraphDirection>,
    pub debounce_ms: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub log: PathBuf,
    pub out: PathBuf,
    pub render: MermaidRenderConfig,
    pub debounce: Duration,
}

impl Settings {
    #[must_use]
    pub fn resolve(base_dir: &Path, file: FileConfig, overrides: Overrides) -> Self {
        let defaults = MermaidRenderConfig::default();
        Self {
            log: overrides
                .log
                .or(file.log)
                .unwrap_or_else(|| base_dir.join(DEFAULT_LOG_FILE)),
            out: overrides
                .out
                .or(file.out)
                .unwrap_or_else(|| base_dir.join(DEFAULT_OUTPUT_FILE)),
            render: MermaidRenderConfig {
                style: overrides.style.or(file.style).unwrap_or(defaults.style),
                direction: overrides
                    .direction
                    .or(file.direction)
                    .unwrap_or(defaults.direction),
            },
            debounce: overrides
                .debounce_ms
                .or(file.debounce_ms)
                .map_or(DEFAULT_DEBOUNCE, Duration::from_millis),
        }
    }
}

/// Directory holding the running executable; default paths live next to it.
#[must_use]
pub fn default_base_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::{FileConfig, Overrides, Settings};
    use std::path::{Path, PathBuf};
    use std::time::Duration;
    use tm_render::{DiagramStyle, GraphDirection};

    #[test]
    fn defaults_resolve_against_base_dir() {
        let settings = Settings::resolve(
            Path::new("/opt/thoughtmap"),
            FileConfig::default(),
            Overrides::default(),
        );
        assert_eq!(settings.log, PathBuf::from("/opt/thoughtmap/thought_log.txt"));
        assert_eq!(settings.out, PathBuf::from("/opt/thoughtmap/mindmap.md"));
        assert_eq!(settings.render.style, DiagramStyle::Flowchart);
        assert_eq!(settings.render.direction, GraphDirection::TD);
        assert_eq!(settings.debounce, Duration::from_millis(500));
    }

    #[test]
    fn flags_override_file_values() {
        let file = FileConfig::from_toml(
            r#"
log = "from-file.txt"
out = "from-file.md"
style = "mindmap"
direction = "LR"
debounce_ms = 900
"#,
        )
        .expect("valid config");
        let overrides = Overrides {
            out: Some(PathBuf::from("flag.md")),
            style: Some(DiagramStyle::Flowchart),
            ..Overrides::default()
        };

        let settings = Settings::resolve(Path::new("/base"), file, overrides);
        assert_eq!(settings.log, PathBuf::from("from-file.txt"));
        assert_eq!(settings.out, PathBuf::from("flag.md"));
        assert_eq!(settings.render.style, DiagramStyle::Flowchart);
        assert_eq!(settings.render.direction, GraphDirection::LR);
        assert_eq!(settings.debounce, Duration::from_millis(900));
    }

    #[test]
    fn load_resolves_paths_against_config_dir() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config_path = dir.path().join("thoughtmap.toml");
        let absolute = dir.path().join("elsewhere").join("map.md");
        std::fs::write(
            &config_path,
            format!("log = \"logs/thoughts.txt\"\nout = '{}'\n", absolute.display()),
        )
        .expect("write config");

        let file = FileConfig::load(&config_path).expect("load config");
        assert_eq!(file.log, Some(dir.path().join("logs").join("thoughts.txt")));
        assert_eq!(file.out, Some(absolute));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(FileConfig::from_toml("colour = \"red\"").is_err());
    }
}
