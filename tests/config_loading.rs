// tests/config_loading.rs
mod common;
use crate::common::init_tracing;

use std::io::Write;

use scriptrun::config::{load_from_fs, load_runner, parse_config};
use scriptrun::errors::RunnerError;
use scriptrun::exec::Runner;
use scriptrun::fs::mock::MockFileSystem;
use scriptrun::types::ValueKind;
use tempfile::NamedTempFile;

type TestResult = Result<(), Box<dyn std::error::Error>>;

#[test]
fn full_config_builds_a_runner() -> TestResult {
    init_tracing();

    let mut file = NamedTempFile::new()?;
    write!(
        file,
        r#"
[runner]
program = "heat.edp"
dir = "cases"
retain_output = false
emit_trailing_block = true

[runner.args]
nx = 32
dt = 1.0
scheme = "implicit"
verbose = true

[interpreter]
preset = "freefem"

[iteration]
marker = "^iteration"

[iteration.rules.residual]
pattern = "residual = {{}}"
type = "float"

[iteration.rules.step]
pattern = "step {{}}"
type = "int"
"#
    )?;

    let runner = load_runner(file.path())?;
    assert_eq!(
        runner.command(),
        "FreeFem++ -ne  -nw  -cd  cases/heat.edp nx 32 dt 1.0 scheme implicit verbose true"
    );
    assert!(!runner.retain_output());
    assert!(runner.emit_trailing_block());

    let counter = runner.iteration_counter().expect("iteration rules attached");
    let rules = counter.rules();
    assert_eq!(rules.marker(), "^iteration");
    assert_eq!(rules.keys().collect::<Vec<_>>(), vec!["residual", "step"]);
    assert_eq!(rules.rule("step").map(|r| r.kind()), Some(ValueKind::Int));
    Ok(())
}

#[test]
fn minimal_config_uses_defaults() -> TestResult {
    let raw = parse_config("[runner]\nprogram = \"solver\"\n")?;
    let runner = Runner::try_from(raw)?;
    assert_eq!(runner.command(), "solver");
    assert_eq!(runner.separator(), " ");
    assert!(runner.retain_output());
    assert!(!runner.emit_trailing_block());
    assert!(runner.interpreter().is_none());
    assert!(runner.iteration_counter().is_none());
    Ok(())
}

#[test]
fn named_interpreter_with_args_and_separator() -> TestResult {
    let fs = MockFileSystem::new();
    fs.add_file(
        "run.toml",
        r#"
[runner]
program = "fit.py"
separator = "="

[runner.args]
"--order" = 2

[interpreter]
name = "python3"

[interpreter.args]
"-W" = "ignore"
"#,
    );

    let runner = Runner::try_from(load_from_fs(&fs, "run.toml")?)?;
    assert_eq!(runner.command(), "python3 -W ignore fit.py --order=2");
    Ok(())
}

#[test]
fn float_arguments_never_use_exponent_form() -> TestResult {
    let raw = parse_config(
        r#"
[runner]
program = "solver"

[runner.args]
big = 1e20
small = 1e-7
dt = 1.0
"#,
    )?;
    let runner = Runner::try_from(raw)?;
    let args = runner.arguments();
    assert_eq!(args.get("big"), Some("100000000000000000000.0"));
    assert_eq!(args.get("small"), Some("0.0000001"));
    assert_eq!(args.get("dt"), Some("1.0"));
    assert_eq!(
        runner.command(),
        "solver big 100000000000000000000.0 small 0.0000001 dt 1.0"
    );
    Ok(())
}

#[test]
fn invalid_configs_are_rejected() {
    let cases = [
        ("[runner]\nprogram = \"\"\n", "must not be empty"),
        (
            "[runner]\nprogram = \"p\"\n[interpreter]\npreset = \"freefem\"\nname = \"x\"\n",
            "not both",
        ),
        ("[runner]\nprogram = \"p\"\n[interpreter]\n", "requires"),
        (
            "[runner]\nprogram = \"p\"\n[interpreter]\npreset = \"matlab\"\n",
            "unknown interpreter preset",
        ),
        (
            "[runner]\nprogram = \"p\"\n[runner.args]\nlist = [1, 2]\n",
            "must be a string",
        ),
    ];

    for (toml_src, needle) in cases {
        let raw = parse_config(toml_src).expect("syntactically valid TOML");
        match Runner::try_from(raw) {
            Err(RunnerError::ConfigError(msg)) => {
                assert!(msg.contains(needle), "'{msg}' should contain '{needle}'")
            }
            other => panic!("expected ConfigError for {toml_src:?}, got {:?}", other.map(|r| r.command().to_string())),
        }
    }
}

#[test]
fn bad_rule_pattern_and_unknown_type_are_rejected() {
    let raw = parse_config(
        "[runner]\nprogram = \"p\"\n[iteration]\nmarker = \"it\"\n[iteration.rules.x]\npattern = \"x=({}\"\n",
    )
    .expect("syntactically valid TOML");
    assert!(matches!(
        Runner::try_from(raw),
        Err(RunnerError::InvalidPattern { .. })
    ));

    let err = parse_config(
        "[runner]\nprogram = \"p\"\n[iteration]\nmarker = \"it\"\n[iteration.rules.x]\npattern = \"x={}\"\ntype = \"complex\"\n",
    );
    assert!(matches!(err, Err(RunnerError::TomlError(_))));
}

#[test]
fn missing_config_file_is_reported() {
    let fs = MockFileSystem::new();
    assert!(matches!(
        load_from_fs(&fs, "nope.toml"),
        Err(RunnerError::ConfigError(_))
    ));
}
