// src/exec/mod.rs

//! Process execution layer.
//!
//! This module builds command strings and runs them through the host shell
//! using `tokio::process::Command`.
//!
//! - [`command`] holds the argument map and command-string builder.
//! - [`interpreter`] describes the interpreter prefix of script runners.
//! - [`runner`] owns [`Runner`] and its run modes.
//! - [`stream`] provides the lazy line / iteration streams over stdout.

pub mod command;
pub mod interpreter;
pub mod runner;
pub mod stream;

pub use command::{Arguments, CommandLine, build_command, program_path};
pub use interpreter::Interpreter;
pub use runner::{NOT_RETAINED_NOTICE, Runner};
pub use stream::{IterationStream, LineStream};
