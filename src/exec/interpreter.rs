// src/exec/interpreter.rs

use crate::exec::command::{Arguments, CommandLine};

/// Interpreter used to run a script, plus its own flags.
///
/// Interpreter arguments are always rendered as `key value` (space
/// separated), independent of the program's argument separator. A flag with
/// an empty value therefore leaves a trailing space: `-nw ""` renders as
/// `"-nw "`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interpreter {
    pub name: String,
    pub args: Arguments,
}

impl Interpreter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Arguments::new(),
        }
    }

    pub fn with_args(mut self, args: Arguments) -> Self {
        self.args = args;
        self
    }

    /// `interpreter *( " " ikey " " ivalue )`
    pub fn prefix(&self) -> String {
        let mut line = CommandLine::new(self.name.clone());
        line.push_args(&self.args, " ");
        line.to_string()
    }

    /// Prepend the interpreter prefix to an already-built program command.
    pub fn compose(&self, command: &str) -> String {
        format!("{} {}", self.prefix(), command)
    }
}
