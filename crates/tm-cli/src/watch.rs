//! Regenerate the diagram whenever the thought log changes.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Enforces a minimum interval between triggered runs.
#[derive(Debug, Clone)]
pub struct Debouncer {
    interval: Duration,
    last_run: Option<Instant>,
}

impl Debouncer {
    #[must_use]
    pub const fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_run: None,
        }
    }

    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns `true` and records `now` when the window has elapsed.
    pub fn should_run(&mut self, now: Instant) -> bool {
        let within_window = self
            .last_run
            .is_some_and(|last_run| now.saturating_duration_since(last_run) < self.interval);
        if within_window {
            return false;
        }
        self.mark_run(now);
        true
    }

    /// Start a new window at `now` regardless of the previous one.
    pub fn mark_run(&mut self, now: Instant) {
        self.last_run = Some(now);
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

/// Decide whether a change touching `changed` should trigger a run.
pub fn should_regenerate(
    log: &Path,
    changed: &[PathBuf],
    debouncer: &mut Debouncer,
    now: Instant,
) -> bool {
    changed.iter().any(|path| same_file(path, log)) && debouncer.should_run(now)
}

fn same_file(changed: &Path, log: &Path) -> bool {
    if changed == log {
        return true;
    }
    match (changed.canonicalize(), log.canonicalize()) {
        (Ok(left), Ok(right)) => left == right,
        _ => changed.file_name() == log.file_name() && changed.parent() == log.parent(),
    }
}

#[cfg(feature = "watch")]
pub use notify_loop::watch;

#[cfg(feature = "watch")]
mod notify_loop {
    use std::path::Path;
    use std::sync::mpsc::{RecvTimeoutError, channel};
    use std::time::{Duration, Instant};

    use anyhow::{Context, Result};
    use notify::{Config, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
    use tm_core::{NoGrouping, ThoughtmapError};
    use tracing::{debug, error, info};

    use super::{Debouncer, should_regenerate};
    use crate::config::Settings;
    use crate::pipeline::generate;

    /// Block until the event channel closes, regenerating on every change.
    pub fn watch(settings: &Settings) -> Result<()> {
        if !settings.log.exists() {
            return Err(ThoughtmapError::MissingInput {
                path: settings.log.clone(),
            }
            .into());
        }
        let log = settings
            .log
            .canonicalize()
            .with_context(|| format!("Failed to resolve {}", settings.log.display()))?;
        let directory = log.parent().unwrap_or_else(|| Path::new("."));

        let (tx, rx) = channel();
        let mut watcher = RecommendedWatcher::new(tx, Config::default())?;
        // The directory is watched so editors that replace the file are seen.
        watcher.watch(directory, RecursiveMode::NonRecursive)?;

        println!(
            "Watching {} for changes... (Ctrl+C to stop)",
            settings.log.display()
        );

        let mut debouncer = Debouncer::new(settings.debounce);
        run_once(settings);
        debouncer.mark_run(Instant::now());

        loop {
            match rx.recv_timeout(Duration::from_secs(1)) {
                Ok(Ok(event)) => {
                    if !matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_)) {
                        continue;
                    }
                    if should_regenerate(&log, &event.paths, &mut debouncer, Instant::now()) {
                        run_once(settings);
                    } else {
                        debug!("Ignored event {:?} on {:?}", event.kind, event.paths);
                    }
                }
                Ok(Err(err)) => {
                    error!("Watch error: {err}");
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }

        Ok(())
    }

    fn run_once(settings: &Settings) {
        info!("Regenerating {}", settings.out.display());
        match generate(&settings.log, &settings.out, &settings.render, &NoGrouping) {
            Ok(report) => println!(
                "{} updated ({} nodes, {} warnings).",
                report.diagram_path.display(),
                report.node_count,
                report.warning_count
            ),
            Err(err) => error!("Regeneration failed: {err}"),
        }
    }
}
