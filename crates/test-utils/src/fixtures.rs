#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Temporary directory holding script files for a test.
pub struct ScriptDir {
    dir: TempDir,
}

impl ScriptDir {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Directory as a string, for `Runner::with_dir`.
    pub fn dir_str(&self) -> String {
        self.dir.path().to_string_lossy().into_owned()
    }

    /// Write `name` with the given contents and return its full path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, contents).expect("Failed to write script file");
        path
    }

    /// A `sh` script that prints `lines` (one per line) to stdout.
    pub fn echo_script(&self, name: &str, lines: &[&str]) -> PathBuf {
        let mut body = String::new();
        for line in lines {
            body.push_str(&format!("printf '%s\\n' '{}'\n", line));
        }
        self.write(name, &body)
    }
}

impl Default for ScriptDir {
    fn default() -> Self {
        Self::new()
    }
}
