// src/exec/stream.rs

//! Pull-based streams over a child's standard output.
//!
//! Both streams are lazy: each `next().await` reads just enough output to
//! produce one item and suspends until it is available. Once the end of the
//! output is reached they keep returning `Ok(None)`; a stream cannot be
//! restarted.
//!
//! Dropping a stream early does not kill the child process. It keeps running
//! until it exits on its own (writes to the closed pipe may make it fail).

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::process::Child;
use tracing::debug;

use crate::errors::Result;
use crate::scan::{IterationCounter, IterationScanner, IterationSnapshot, Line};

/// Output lines of a program, one [`Line`] at a time.
///
/// Lines are decoded as UTF-8 (invalid sequences are replaced) and trailing
/// whitespace, including the line terminator, is stripped.
pub struct LineStream<'a> {
    reader: Box<dyn AsyncBufRead + Send + Unpin + 'a>,
    child: Option<Child>,
    retained: Option<&'a mut Vec<String>>,
    buf: Vec<u8>,
    finished: bool,
}

impl<'a> LineStream<'a> {
    /// Stream lines from any buffered reader (no child process attached).
    pub fn from_reader(reader: impl AsyncBufRead + Send + Unpin + 'a) -> Self {
        Self {
            reader: Box::new(reader),
            child: None,
            retained: None,
            buf: Vec::new(),
            finished: false,
        }
    }

    pub(crate) fn with_child(mut self, child: Child) -> Self {
        self.child = Some(child);
        self
    }

    /// Append every yielded line to `buffer` as well.
    pub fn retain_into(mut self, buffer: &'a mut Vec<String>) -> Self {
        self.retained = Some(buffer);
        self
    }

    /// OS id of the child producing the output, if any.
    pub fn child_id(&self) -> Option<u32> {
        self.child.as_ref().and_then(Child::id)
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub async fn next(&mut self) -> Result<Option<Line>> {
        if self.finished {
            return Ok(None);
        }

        self.buf.clear();
        let n = self.reader.read_until(b'\n', &mut self.buf).await?;
        if n == 0 {
            self.finished = true;
            debug!(pid = ?self.child_id(), "end of program output");
            return Ok(None);
        }

        let text = String::from_utf8_lossy(&self.buf).trim_end().to_string();
        if let Some(buffer) = self.retained.as_mut() {
            buffer.push(text.clone());
        }
        Ok(Some(Line::from(text)))
    }

    /// Drain the remaining lines.
    pub async fn collect(mut self) -> Result<Vec<Line>> {
        let mut lines = Vec::new();
        while let Some(line) = self.next().await? {
            lines.push(line);
        }
        Ok(lines)
    }
}

/// Completed output blocks of a program, one [`IterationSnapshot`] at a time.
///
/// A block is only emitted once the marker of the following block is seen,
/// so the last block of the output is dropped unless the stream was built
/// with `emit_trailing_block`.
pub struct IterationStream<'a> {
    lines: LineStream<'a>,
    scanner: IterationScanner<'a>,
}

impl<'a> IterationStream<'a> {
    pub fn new(
        lines: LineStream<'a>,
        counter: &'a mut IterationCounter,
        emit_trailing_block: bool,
    ) -> Self {
        Self {
            lines,
            scanner: IterationScanner::new(counter, emit_trailing_block),
        }
    }

    /// Number of blocks started so far.
    pub fn count(&self) -> usize {
        self.scanner.counter().count()
    }

    pub async fn next(&mut self) -> Result<Option<IterationSnapshot>> {
        while let Some(line) = self.lines.next().await? {
            if let Some(snap) = self.scanner.feed(&line) {
                return Ok(Some(snap));
            }
        }
        Ok(self.scanner.finish())
    }

    pub async fn collect(mut self) -> Result<Vec<IterationSnapshot>> {
        let mut out = Vec::new();
        while let Some(snap) = self.next().await? {
            out.push(snap);
        }
        Ok(out)
    }
}
