// src/config/mod.rs

//! Runner configuration files.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file (`loader.rs`).
//! - Validate it and build a [`Runner`](crate::exec::Runner) (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_from_fs, load_from_path, load_runner, parse_config};
pub use model::{
    InterpreterSection, IterationSection, RawRunnerConfig, RuleSection, RunnerSection,
};
