// src/exec/command.rs

//! Command-line string construction.
//!
//! The grammar produced here is
//!
//! ```text
//! command      = [ directory "/" ] program *( " " argkey SEP argval )
//! full-command = interpreter *( " " ikey " " ivalue ) " " command
//! ```
//!
//! The result is handed to the host shell as one string; nothing is quoted or
//! escaped.

use std::fmt;

use tokio::process::Command;

/// Key/value arguments, kept in insertion order.
///
/// Setting an existing key replaces its value in place, so the key keeps its
/// original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Arguments {
    entries: Vec<(String, String)>,
}

impl Arguments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl fmt::Display) -> &mut Self {
        let key = key.into();
        let value = value.to_string();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
        self
    }

    /// Builder-style [`Arguments::set`].
    pub fn with(mut self, key: impl Into<String>, value: impl fmt::Display) -> Self {
        self.set(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        let idx = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(idx).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Arguments
where
    K: Into<String>,
    V: fmt::Display,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut args = Arguments::new();
        for (k, v) in iter {
            args.set(k, v);
        }
        args
    }
}

/// Space-joined list of command-line parts.
#[derive(Debug, Clone, Default)]
pub struct CommandLine {
    parts: Vec<String>,
}

impl CommandLine {
    pub fn new(head: impl Into<String>) -> Self {
        Self {
            parts: vec![head.into()],
        }
    }

    pub fn push(&mut self, part: impl Into<String>) -> &mut Self {
        self.parts.push(part.into());
        self
    }

    /// Append every argument as one `key SEP value` part.
    pub fn push_args(&mut self, args: &Arguments, separator: &str) -> &mut Self {
        for (key, value) in args.iter() {
            self.parts.push(format!("{key}{separator}{value}"));
        }
        self
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.parts.join(" "))
    }
}

/// `dir/program`, with any trailing `/` on `dir` collapsed to one.
///
/// An empty or missing directory yields `program` unchanged.
pub fn program_path(dir: Option<&str>, program: &str) -> String {
    match dir {
        Some(dir) if !dir.is_empty() => format!("{}/{}", dir.trim_end_matches('/'), program),
        _ => program.to_string(),
    }
}

/// Build the command string for running `program` with `args`.
pub fn build_command(
    program: &str,
    dir: Option<&str>,
    args: &Arguments,
    separator: &str,
) -> String {
    let mut line = CommandLine::new(program_path(dir, program));
    line.push_args(args, separator);
    line.to_string()
}

/// Build a shell command appropriate for the platform.
pub(crate) fn shell_command(command: &str) -> Command {
    Command::from(std_shell_command(command))
}

/// Blocking-API variant of [`shell_command`], usable without a Tokio runtime.
pub(crate) fn std_shell_command(command: &str) -> std::process::Command {
    if cfg!(windows) {
        let mut c = std::process::Command::new("cmd");
        c.arg("/C").arg(command);
        c
    } else {
        let mut c = std::process::Command::new("sh");
        c.arg("-c").arg(command);
        c
    }
}
