// tests/process_runner.rs
#![cfg(unix)]

mod common;
use crate::common::init_tracing;

use scriptrun::errors::RunnerError;
use scriptrun::exec::{Arguments, Interpreter, NOT_RETAINED_NOTICE, Runner};
use scriptrun::scan::Line;
use scriptrun_test_utils::builders::RulesBuilder;
use scriptrun_test_utils::fixtures::ScriptDir;
use scriptrun_test_utils::{PROCESS_DEADLINE, within_deadline};

use std::time::{Duration, Instant};

type TestResult = Result<(), Box<dyn std::error::Error>>;

fn sh_script(dir: &ScriptDir, name: &str) -> Runner {
    Runner::script(name, Interpreter::new("sh")).with_dir(dir.dir_str())
}

#[tokio::test]
async fn streams_lines_in_order() -> TestResult {
    init_tracing();

    let dir = ScriptDir::new();
    dir.echo_script("lines.sh", &["alpha", "beta  ", "gamma"]);
    let mut runner = sh_script(&dir, "lines.sh").with_retain_output(false);

    let lines = within_deadline(runner.run_stream_lines()?.collect()).await?;
    let texts: Vec<&str> = lines.iter().map(Line::text).collect();
    assert_eq!(texts, vec!["alpha", "beta", "gamma"]);
    assert!(runner.output_lines().is_empty());
    Ok(())
}

#[tokio::test]
async fn retained_buffer_matches_yielded_lines() -> TestResult {
    init_tracing();

    let dir = ScriptDir::new();
    dir.echo_script("out.sh", &["one", "two", "three"]);
    let mut runner = sh_script(&dir, "out.sh");
    assert!(runner.retain_output());

    let mut yielded = Vec::new();
    {
        let mut stream = runner.run_stream_lines()?;
        while let Some(line) = within_deadline(stream.next()).await? {
            yielded.push(line.text().to_string());
        }
        assert!(stream.is_finished());
        assert!(stream.next().await?.is_none(), "stream is not restartable");
    }

    assert_eq!(runner.output_lines(), yielded.as_slice());

    let mut printed = Vec::new();
    runner.write_buffered_output(&mut printed)?;
    assert_eq!(String::from_utf8(printed)?, "one\ntwo\nthree\n");
    Ok(())
}

#[tokio::test]
async fn program_arguments_reach_the_script() -> TestResult {
    let dir = ScriptDir::new();
    dir.write("args.sh", "for a in \"$@\"; do printf '%s\\n' \"$a\"; done\n");
    let mut runner = sh_script(&dir, "args.sh")
        .with_args(Arguments::new().with("-n", 4).with("--tol", 0.25));

    let lines = within_deadline(runner.run_stream_lines()?.collect()).await?;
    let texts: Vec<&str> = lines.iter().map(Line::text).collect();
    assert_eq!(texts, vec!["-n", "4", "--tol", "0.25"]);
    Ok(())
}

#[tokio::test]
async fn iterations_from_a_real_process() -> TestResult {
    init_tracing();

    let dir = ScriptDir::new();
    dir.echo_script(
        "solve.sh",
        &[
            "starting solver",
            "iteration 1",
            "residual = 0.5",
            "iteration 2",
            "residual = 0.25",
            "iteration 3",
            "residual = 0.125",
        ],
    );
    let rules = RulesBuilder::new("^iteration")
        .float("residual", "residual = {}")
        .build();
    let mut runner = sh_script(&dir, "solve.sh").with_iteration_rules(rules);

    let blocks = within_deadline(runner.run_stream_iterations()?.collect()).await?;
    let residuals: Vec<Option<f64>> = blocks.iter().map(|b| b.float("residual")).collect();
    assert_eq!(residuals, vec![Some(0.5), Some(0.25)]);
    assert_eq!(runner.iteration_counter().map(|c| c.count()), Some(3));
    assert!(runner.output_lines().is_empty(), "iteration mode does not retain");

    runner.set_emit_trailing_block(true);
    runner.set_iteration_rules(
        RulesBuilder::new("^iteration")
            .float("residual", "residual = {}")
            .build(),
    );
    let blocks = within_deadline(runner.run_stream_iterations()?.collect()).await?;
    assert_eq!(blocks.len(), 3);
    assert_eq!(blocks[2].float("residual"), Some(0.125));
    Ok(())
}

#[tokio::test]
async fn iterations_require_rules() {
    let mut runner = Runner::new("true");
    assert!(matches!(
        runner.run_stream_iterations(),
        Err(RunnerError::NoIterationRules)
    ));
}

#[test]
fn discard_mode_runs_without_an_async_runtime() -> TestResult {
    init_tracing();

    let dir = ScriptDir::new();
    let marker = dir.path().join("touched");
    dir.write(
        "touch.sh",
        &format!("touch '{}'\n", marker.to_string_lossy()),
    );
    let runner = sh_script(&dir, "touch.sh");
    runner.run_discard()?;

    let deadline = Instant::now() + PROCESS_DEADLINE;
    while !marker.exists() {
        assert!(Instant::now() < deadline, "detached program never ran");
        std::thread::sleep(Duration::from_millis(20));
    }
    Ok(())
}

#[test]
fn unretained_output_reports_notice() -> TestResult {
    let runner = Runner::new("true").with_retain_output(false);
    let mut printed = Vec::new();
    runner.write_buffered_output(&mut printed)?;
    assert_eq!(String::from_utf8(printed)?.trim_end(), NOT_RETAINED_NOTICE);
    Ok(())
}
