// src/config/loader.rs

use std::path::Path;

use crate::config::model::RawRunnerConfig;
use crate::errors::{Result, RunnerError};
use crate::exec::Runner;
use crate::fs::{FileSystem, RealFileSystem};

/// Parse a runner description from TOML text.
///
/// This only performs deserialization; use [`load_runner`] to also validate
/// and build the [`Runner`].
pub fn parse_config(contents: &str) -> Result<RawRunnerConfig> {
    let config: RawRunnerConfig = toml::from_str(contents)?;
    Ok(config)
}

/// Load a runner description from `path` on `fs`.
pub fn load_from_fs(fs: &dyn FileSystem, path: impl AsRef<Path>) -> Result<RawRunnerConfig> {
    let path = path.as_ref();
    let contents = fs.read_to_string(path).map_err(|e| {
        RunnerError::ConfigError(format!("cannot read config {:?}: {}", path, e))
    })?;
    parse_config(&contents)
}

pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawRunnerConfig> {
    load_from_fs(&RealFileSystem, path)
}

/// Load, validate and build a [`Runner`] from a TOML file.
pub fn load_runner(path: impl AsRef<Path>) -> Result<Runner> {
    let raw = load_from_path(path)?;
    Runner::try_from(raw)
}
