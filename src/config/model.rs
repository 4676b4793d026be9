// src/config/model.rs

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::types::ValueKind;

/// Runner description as read from a TOML file.
///
/// ```toml
/// [runner]
/// program = "heat.edp"
/// dir = "scripts"
///
/// [runner.args]
/// nx = 32
///
/// [interpreter]
/// preset = "freefem"
///
/// [iteration]
/// marker = "^iteration"
///
/// [iteration.rules.residual]
/// pattern = "residual = {}"
/// type = "float"
/// ```
///
/// Only `[runner]` is required.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawRunnerConfig {
    pub runner: RunnerSection,

    #[serde(default)]
    pub interpreter: Option<InterpreterSection>,

    #[serde(default)]
    pub iteration: Option<IterationSection>,
}

/// `[runner]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunnerSection {
    pub program: String,

    #[serde(default)]
    pub dir: Option<String>,

    /// Placed between an argument key and its value. Defaults to `" "`.
    #[serde(default = "default_separator")]
    pub separator: String,

    #[serde(default = "default_retain_output")]
    pub retain_output: bool,

    /// Emit the last, unterminated iteration when the output ends.
    #[serde(default)]
    pub emit_trailing_block: bool,

    /// Program arguments, in file order.
    #[serde(default)]
    pub args: toml::Table,
}

fn default_separator() -> String {
    " ".to_string()
}

fn default_retain_output() -> bool {
    true
}

/// `[interpreter]` section. Exactly one of `preset` / `name` must be set.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InterpreterSection {
    #[serde(default)]
    pub preset: Option<String>,

    #[serde(default)]
    pub name: Option<String>,

    /// Replaces the preset's arguments when given.
    #[serde(default)]
    pub args: Option<toml::Table>,
}

/// `[iteration]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IterationSection {
    pub marker: String,

    #[serde(default)]
    pub rules: BTreeMap<String, RuleSection>,
}

/// `[iteration.rules.<key>]`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleSection {
    pub pattern: String,

    #[serde(default, rename = "type")]
    pub kind: ValueKind,
}
