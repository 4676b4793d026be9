// src/presets.rs

//! Ready-made runner configurations for specific tools.

use crate::exec::{Arguments, Interpreter, Runner};

pub const FREEFEM_INTERPRETER: &str = "FreeFem++";

/// FreeFem++ with no graphics, no script echo and `cd` into the script's
/// directory (`-ne -nw -cd`).
pub fn freefem_interpreter() -> Interpreter {
    let args = Arguments::new()
        .with("-ne", "")
        .with("-nw", "")
        .with("-cd", "");
    Interpreter::new(FREEFEM_INTERPRETER).with_args(args)
}

/// Runner for a FreeFem++ script located in the current directory.
///
/// Program, directory and arguments can still be changed afterwards.
pub fn freefem(program: impl Into<String>) -> Runner {
    Runner::script(program, freefem_interpreter()).with_dir(".")
}

/// Interpreter preset by name, as used in runner config files.
pub fn interpreter_preset(name: &str) -> Option<Interpreter> {
    match name.trim().to_lowercase().as_str() {
        "freefem" | "freefem++" => Some(freefem_interpreter()),
        _ => None,
    }
}
