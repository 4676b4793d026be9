// tests/iteration_stream.rs
mod common;
use crate::common::init_tracing;

use scriptrun::exec::{IterationStream, LineStream};
use scriptrun::scan::{IterationCounter, IterationScanner, Line};
use scriptrun::types::Value;
use scriptrun_test_utils::builders::RulesBuilder;

type TestResult = Result<(), Box<dyn std::error::Error>>;

const THREE_MARKERS: &str = "iteration 1\nx=1.0\niteration 2\nx=2.0\niteration 3\n";

#[tokio::test]
async fn last_block_is_dropped_at_end_of_stream() -> TestResult {
    init_tracing();

    let mut counter = IterationCounter::new(RulesBuilder::new("iteration").float("x", "x={}").build());
    let lines = LineStream::from_reader(THREE_MARKERS.as_bytes());
    let mut stream = IterationStream::new(lines, &mut counter, false);

    let first = stream.next().await?.expect("first block");
    assert_eq!(first.index, 1);
    assert_eq!(first.float("x"), Some(1.0));

    let second = stream.next().await?.expect("second block");
    assert_eq!(second.index, 2);
    assert_eq!(second.float("x"), Some(2.0));

    assert!(stream.next().await?.is_none());
    assert!(stream.next().await?.is_none(), "stream must stay exhausted");
    assert_eq!(stream.count(), 3);

    drop(stream);
    assert_eq!(counter.count(), 3);
    Ok(())
}

#[tokio::test]
async fn trailing_block_is_emitted_when_enabled() -> TestResult {
    init_tracing();

    let mut counter = IterationCounter::new(RulesBuilder::new("iteration").float("x", "x={}").build());
    let input = "iteration 1\nx=1.0\niteration 2\nx=2.0\n";
    let stream = IterationStream::new(LineStream::from_reader(input.as_bytes()), &mut counter, true);

    let blocks = stream.collect().await?;
    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[1].index, 2);
    assert_eq!(blocks[1].float("x"), Some(2.0));
    Ok(())
}

#[tokio::test]
async fn lines_before_first_marker_are_ignored() -> TestResult {
    let mut counter = IterationCounter::new(RulesBuilder::new("^iter").float("x", "x={}").build());
    let input = "x=9.0\nbanner\niter\nx=1.5\niter\n";
    let stream = IterationStream::new(LineStream::from_reader(input.as_bytes()), &mut counter, false);

    let blocks = stream.collect().await?;
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].float("x"), Some(1.5));
    Ok(())
}

#[tokio::test]
async fn values_reset_between_blocks() -> TestResult {
    let mut counter = IterationCounter::new(
        RulesBuilder::new("^iter")
            .float("x", "x={}")
            .int("n", "n={}")
            .build(),
    );
    let input = "iter\nx=1.0\nn=3\niter\nx=2.0\niter\n";
    let stream = IterationStream::new(LineStream::from_reader(input.as_bytes()), &mut counter, false);

    let blocks = stream.collect().await?;
    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[0].integer("n"), Some(3));
    assert_eq!(blocks[1].get("n"), Some(&Value::Unset));
    assert_eq!(blocks[1].float("x"), Some(2.0));
    Ok(())
}

#[test]
fn scanner_keeps_first_matching_line_of_a_block() {
    init_tracing();

    let mut counter = IterationCounter::new(RulesBuilder::new("^iter").float("x", "x={}").build());
    let mut scanner = IterationScanner::new(&mut counter, false);

    assert!(scanner.feed(&Line::new("iter")).is_none());
    assert!(scanner.in_block());
    assert!(scanner.feed(&Line::new("x=1.0")).is_none());
    assert!(scanner.feed(&Line::new("x=5.0")).is_none());

    let snap = scanner.feed(&Line::new("iter")).expect("completed block");
    assert_eq!(snap.float("x"), Some(1.0));
    assert!(scanner.finish().is_none());
    assert!(!scanner.in_block());
}

#[test]
fn scanner_without_marker_never_emits() {
    let mut counter = IterationCounter::new(RulesBuilder::new("^iter").float("x", "x={}").build());
    let mut scanner = IterationScanner::new(&mut counter, true);

    for text in ["x=1.0", "x=2.0", "done"] {
        assert!(scanner.feed(&Line::new(text)).is_none());
    }
    assert!(scanner.finish().is_none());
    assert_eq!(scanner.counter().count(), 0);
}

#[tokio::test]
async fn line_stream_strips_trailing_whitespace_and_retains() -> TestResult {
    let mut retained = Vec::new();
    let input = "first  \r\nsecond\n\nlast";
    let lines = LineStream::from_reader(input.as_bytes())
        .retain_into(&mut retained)
        .collect()
        .await?;

    let texts: Vec<&str> = lines.iter().map(Line::text).collect();
    assert_eq!(texts, vec!["first", "second", "", "last"]);
    assert_eq!(retained, vec!["first", "second", "", "last"]);
    Ok(())
}
