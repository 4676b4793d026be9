// src/config/validate.rs

use crate::config::model::{InterpreterSection, IterationSection, RawRunnerConfig};
use crate::errors::{Result, RunnerError};
use crate::exec::{Arguments, Interpreter, Runner};
use crate::presets::interpreter_preset;
use crate::scan::IterationRules;

impl TryFrom<RawRunnerConfig> for Runner {
    type Error = RunnerError;

    fn try_from(raw: RawRunnerConfig) -> std::result::Result<Self, Self::Error> {
        let section = raw.runner;
        if section.program.trim().is_empty() {
            return Err(RunnerError::ConfigError(
                "[runner].program must not be empty".to_string(),
            ));
        }

        let args = arguments_from_table(&section.args, "[runner.args]")?;

        let mut runner = Runner::new(section.program)
            .with_args(args)
            .with_separator(section.separator)
            .with_retain_output(section.retain_output)
            .with_emit_trailing_block(section.emit_trailing_block);

        if let Some(dir) = section.dir {
            runner.set_dir(Some(dir));
        }

        if let Some(interpreter) = raw.interpreter {
            runner.set_interpreter(Some(build_interpreter(interpreter)?));
        }

        if let Some(iteration) = raw.iteration {
            runner.set_iteration_rules(build_rules(iteration)?);
        }

        Ok(runner)
    }
}

fn build_interpreter(section: InterpreterSection) -> Result<Interpreter> {
    let mut interpreter = match (section.preset, section.name) {
        (Some(_), Some(_)) => {
            return Err(RunnerError::ConfigError(
                "[interpreter] accepts either `preset` or `name`, not both".to_string(),
            ));
        }
        (None, None) => {
            return Err(RunnerError::ConfigError(
                "[interpreter] requires `preset` or `name`".to_string(),
            ));
        }
        (Some(preset), None) => interpreter_preset(&preset).ok_or_else(|| {
            RunnerError::ConfigError(format!("unknown interpreter preset '{preset}'"))
        })?,
        (None, Some(name)) => {
            if name.trim().is_empty() {
                return Err(RunnerError::ConfigError(
                    "[interpreter].name must not be empty".to_string(),
                ));
            }
            Interpreter::new(name)
        }
    };

    if let Some(args) = section.args {
        interpreter.args = arguments_from_table(&args, "[interpreter.args]")?;
    }
    Ok(interpreter)
}

fn build_rules(section: IterationSection) -> Result<IterationRules> {
    let mut rules = IterationRules::new(&section.marker)?;
    for (key, rule) in section.rules {
        rules.register(key, &rule.pattern, rule.kind)?;
    }
    Ok(rules)
}

fn arguments_from_table(table: &toml::Table, section: &str) -> Result<Arguments> {
    let mut args = Arguments::new();
    for (key, value) in table {
        args.set(key.as_str(), render_value(key, value, section)?);
    }
    Ok(args)
}

/// Plain decimal notation with at least one fractional digit.
///
/// `Display` for `f64` never switches to exponent form, so `1e20` and `1e-7`
/// come out as digits a solver can read. Non-finite values stay `inf`/`NaN`.
fn render_float(f: f64) -> String {
    let s = f.to_string();
    if f.is_finite() && !s.contains('.') {
        format!("{s}.0")
    } else {
        s
    }
}

/// Render a scalar argument the way it should appear on the command line.
fn render_value(key: &str, value: &toml::Value, section: &str) -> Result<String> {
    match value {
        toml::Value::String(s) => Ok(s.clone()),
        toml::Value::Integer(i) => Ok(i.to_string()),
        toml::Value::Float(f) => Ok(render_float(*f)),
        toml::Value::Boolean(b) => Ok(b.to_string()),
        toml::Value::Datetime(d) => Ok(d.to_string()),
        toml::Value::Array(_) | toml::Value::Table(_) => Err(RunnerError::ConfigError(format!(
            "{section} '{key}' must be a string, number or boolean"
        ))),
    }
}
