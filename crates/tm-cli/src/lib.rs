#![forbid(unsafe_code)]

//! Library half of the `thoughtmap` binary: settings, file I/O, the watch
//! loop and the HTTP routes around the pure parse and render crates.

pub mod config;
pub mod pipeline;
pub mod serve;
pub mod watch;

pub use config::{FileConfig, Overrides, Settings, default_base_dir};
pub use pipeline::{
    GenerateReport, append_entry, current_timestamp, generate, json_path_for, read_log, suggest,
    write_artifact,
};
pub use watch::{DEFAULT_DEBOUNCE, Debouncer, should_regenerate};
