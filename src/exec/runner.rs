// src/exec/runner.rs

//! Program / script runner.
//!
//! A [`Runner`] points at a program (or a script run by an [`Interpreter`]),
//! keeps the command string that runs it, and offers three run modes:
//!
//! - [`Runner::run_discard`]: start the program and return immediately
//! - [`Runner::run_stream_lines`]: stream its stdout as [`Line`](crate::scan::Line)s
//! - [`Runner::run_stream_iterations`]: stream completed output blocks
//!
//! The command string is recomputed by every setter, so [`Runner::command`]
//! never goes stale.

use std::io::Write;
use std::path::PathBuf;
use std::process::Stdio;
use std::sync::Arc;

use tokio::io::BufReader;
use tokio::process::Child;
use tracing::{debug, info, trace, warn};

use crate::errors::{Result, RunnerError};
use crate::exec::command::{
    Arguments, build_command, program_path, shell_command, std_shell_command,
};
use crate::exec::interpreter::Interpreter;
use crate::exec::stream::{IterationStream, LineStream};
use crate::fs::{FileSystem, RealFileSystem};
use crate::scan::{IterationCounter, IterationRules};

/// Written by [`Runner::write_buffered_output`] when retention is off.
pub const NOT_RETAINED_NOTICE: &str = "the output of the program was not retained";

#[derive(Debug)]
pub struct Runner {
    program: String,
    dir: Option<String>,
    args: Arguments,
    separator: String,
    interpreter: Option<Interpreter>,
    command: String,

    retain_output: bool,
    output_lines: Vec<String>,

    counter: Option<IterationCounter>,
    emit_trailing_block: bool,

    fs: Arc<dyn FileSystem>,
}

impl Runner {
    /// Runner for `program` with no directory, no arguments, a `" "`
    /// separator and output retention on.
    pub fn new(program: impl Into<String>) -> Self {
        let mut runner = Self {
            program: program.into(),
            dir: None,
            args: Arguments::new(),
            separator: " ".to_string(),
            interpreter: None,
            command: String::new(),
            retain_output: true,
            output_lines: Vec::new(),
            counter: None,
            emit_trailing_block: false,
            fs: Arc::new(RealFileSystem),
        };
        runner.refresh_command();
        runner
    }

    /// Runner for a script executed by `interpreter`.
    pub fn script(program: impl Into<String>, interpreter: Interpreter) -> Self {
        Self::new(program).with_interpreter(interpreter)
    }

    pub fn with_dir(mut self, dir: impl Into<String>) -> Self {
        self.set_dir(Some(dir.into()));
        self
    }

    pub fn with_args(mut self, args: Arguments) -> Self {
        self.set_arguments(args);
        self
    }

    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.set_separator(separator);
        self
    }

    pub fn with_interpreter(mut self, interpreter: Interpreter) -> Self {
        self.set_interpreter(Some(interpreter));
        self
    }

    pub fn with_iteration_rules(mut self, rules: IterationRules) -> Self {
        self.set_iteration_rules(rules);
        self
    }

    pub fn with_retain_output(mut self, retain: bool) -> Self {
        self.retain_output = retain;
        self
    }

    pub fn with_emit_trailing_block(mut self, emit: bool) -> Self {
        self.emit_trailing_block = emit;
        self
    }

    pub fn with_filesystem(mut self, fs: Arc<dyn FileSystem>) -> Self {
        self.fs = fs;
        self
    }

    pub fn set_program(&mut self, program: impl Into<String>) {
        self.program = program.into();
        self.refresh_command();
    }

    pub fn set_dir(&mut self, dir: Option<String>) {
        self.dir = dir;
        self.refresh_command();
    }

    /// Replace the program arguments.
    pub fn set_arguments(&mut self, args: Arguments) {
        self.args = args;
        self.refresh_command();
    }

    pub fn set_separator(&mut self, separator: impl Into<String>) {
        self.separator = separator.into();
        self.refresh_command();
    }

    pub fn set_interpreter(&mut self, interpreter: Option<Interpreter>) {
        self.interpreter = interpreter;
        self.refresh_command();
    }

    /// Replace the interpreter's own arguments.
    ///
    /// Fails if no interpreter is configured.
    pub fn set_interpreter_args(&mut self, args: Arguments) -> Result<()> {
        let interpreter = self.interpreter.as_mut().ok_or_else(|| {
            RunnerError::ConfigError(format!(
                "cannot set interpreter arguments: '{}' has no interpreter",
                self.program
            ))
        })?;
        interpreter.args = args;
        self.refresh_command();
        Ok(())
    }

    pub fn set_retain_output(&mut self, retain: bool) {
        self.retain_output = retain;
    }

    pub fn set_emit_trailing_block(&mut self, emit: bool) {
        self.emit_trailing_block = emit;
    }

    /// Attach iteration rules; the block counter starts again from zero.
    pub fn set_iteration_rules(&mut self, rules: IterationRules) {
        self.counter = Some(IterationCounter::new(rules));
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn dir(&self) -> Option<&str> {
        self.dir.as_deref()
    }

    pub fn arguments(&self) -> &Arguments {
        &self.args
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    pub fn interpreter(&self) -> Option<&Interpreter> {
        self.interpreter.as_ref()
    }

    pub fn retain_output(&self) -> bool {
        self.retain_output
    }

    pub fn emit_trailing_block(&self) -> bool {
        self.emit_trailing_block
    }

    pub fn iteration_counter(&self) -> Option<&IterationCounter> {
        self.counter.as_ref()
    }

    /// Lines retained from previous runs, oldest first.
    pub fn output_lines(&self) -> &[String] {
        &self.output_lines
    }

    pub fn clear_output(&mut self) {
        self.output_lines.clear();
    }

    /// The string sent to the shell when running.
    pub fn command(&self) -> &str {
        &self.command
    }

    /// `[dir/]program` plus program arguments, without any interpreter.
    pub fn build_command(&self) -> String {
        build_command(
            &self.program,
            self.dir.as_deref(),
            &self.args,
            &self.separator,
        )
    }

    /// Interpreter prefix (if any) followed by [`Runner::build_command`].
    pub fn compose_full_command(&self) -> String {
        let command = self.build_command();
        match &self.interpreter {
            Some(interpreter) => interpreter.compose(&command),
            None => command,
        }
    }

    /// Path of the program / script file.
    pub fn program_path(&self) -> PathBuf {
        PathBuf::from(program_path(self.dir.as_deref(), &self.program))
    }

    fn refresh_command(&mut self) {
        self.command = self.compose_full_command();
        trace!(cmd = %self.command, "command updated");
    }

    fn spawn(&self, stdout: Stdio) -> Result<Child> {
        info!(cmd = %self.command, "starting program");

        let mut cmd = shell_command(&self.command);
        cmd.stdout(stdout);

        cmd.spawn().map_err(|source| RunnerError::Spawn {
            command: self.command.clone(),
            source,
        })
    }

    /// Start the program without capturing its output and return at once.
    ///
    /// The child is neither waited for nor killed; its exit status is never
    /// observed. No async runtime is needed.
    pub fn run_discard(&self) -> Result<()> {
        info!(cmd = %self.command, "starting program (detached)");

        let child = std_shell_command(&self.command)
            .stdout(Stdio::inherit())
            .spawn()
            .map_err(|source| RunnerError::Spawn {
                command: self.command.clone(),
                source,
            })?;
        debug!(pid = child.id(), "program detached");
        Ok(())
    }

    /// Start the program and stream its stdout line by line.
    ///
    /// With retention on, each yielded line is also appended to
    /// [`Runner::output_lines`].
    pub fn run_stream_lines(&mut self) -> Result<LineStream<'_>> {
        let mut child = self.spawn(Stdio::piped())?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| anyhow::anyhow!("stdout of '{}' was not captured", self.command))?;

        let stream = LineStream::from_reader(BufReader::new(stdout)).with_child(child);
        Ok(if self.retain_output {
            stream.retain_into(&mut self.output_lines)
        } else {
            stream
        })
    }

    /// Start the program and stream completed iterations.
    ///
    /// Requires iteration rules (see [`Runner::set_iteration_rules`]). Output
    /// scanned here is not retained.
    pub fn run_stream_iterations(&mut self) -> Result<IterationStream<'_>> {
        if self.counter.is_none() {
            return Err(RunnerError::NoIterationRules);
        }

        let mut child = self.spawn(Stdio::piped())?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| anyhow::anyhow!("stdout of '{}' was not captured", self.command))?;
        let lines = LineStream::from_reader(BufReader::new(stdout)).with_child(child);

        let emit_trailing_block = self.emit_trailing_block;
        let counter = self
            .counter
            .as_mut()
            .ok_or(RunnerError::NoIterationRules)?;
        Ok(IterationStream::new(lines, counter, emit_trailing_block))
    }

    /// Write retained output to `out`, or a notice when retention is off.
    pub fn write_buffered_output<W: Write>(&self, out: &mut W) -> Result<()> {
        if !self.retain_output {
            warn!(program = %self.program, "output was not retained; nothing to print");
            writeln!(out, "{NOT_RETAINED_NOTICE}")?;
            return Ok(());
        }

        for line in &self.output_lines {
            writeln!(out, "{line}")?;
        }
        Ok(())
    }

    pub fn print_buffered_output(&self) -> Result<()> {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        self.write_buffered_output(&mut out)
    }

    /// Write the script source to `out`, one line at a time.
    ///
    /// The whole file is read before anything is written, so an unreadable
    /// file produces no output.
    pub fn write_source<W: Write>(&self, out: &mut W) -> Result<()> {
        let path = self.program_path();
        let source = self
            .fs
            .read_to_string(&path)
            .map_err(|source| RunnerError::SourceAccess {
                path: path.clone(),
                source,
            })?;

        debug!(path = ?path, "dumping script source");
        for line in source.lines() {
            writeln!(out, "{line}")?;
        }
        Ok(())
    }

    pub fn dump_source(&self) -> Result<()> {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        self.write_source(&mut out)
    }
}
