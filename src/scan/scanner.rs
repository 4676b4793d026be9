// src/scan/scanner.rs

//! Pure iteration scanner.
//!
//! Consumes output lines one at a time and reports completed blocks. It
//! performs no IO, so the block-detection rules can be tested with plain
//! strings; [`IterationStream`](crate::exec::IterationStream) is the async
//! shell that feeds it from a child process.
//!
//! Rules:
//! - lines before the first marker are discarded
//! - a marker line increments the counter, resets the values and starts a
//!   new block; the previous block (if any) is emitted at that point
//! - other lines fill any value still unset in the current block
//! - at end of stream the active block is dropped, unless
//!   `emit_trailing_block` is set

use tracing::{debug, trace};

use crate::scan::counter::{IterationCounter, IterationSnapshot};
use crate::scan::line::Line;

#[derive(Debug)]
pub struct IterationScanner<'a> {
    counter: &'a mut IterationCounter,
    in_block: bool,
    emit_trailing_block: bool,
}

impl<'a> IterationScanner<'a> {
    pub fn new(counter: &'a mut IterationCounter, emit_trailing_block: bool) -> Self {
        Self {
            counter,
            in_block: false,
            emit_trailing_block,
        }
    }

    pub fn in_block(&self) -> bool {
        self.in_block
    }

    pub fn counter(&self) -> &IterationCounter {
        self.counter
    }

    /// Feed one line; returns the block it completed, if any.
    pub fn feed(&mut self, line: &Line) -> Option<IterationSnapshot> {
        if self.counter.rules().is_block_start(line) {
            let completed = self.in_block.then(|| self.counter.snapshot());
            if let Some(ref snap) = completed {
                debug!(iteration = snap.index, "iteration completed");
            }
            self.begin_block();
            return completed;
        }

        if !self.in_block {
            trace!(line = %line, "skipping line before first iteration marker");
            return None;
        }

        self.counter.rules_mut().fill_from(line);
        None
    }

    /// Signal end of stream.
    pub fn finish(&mut self) -> Option<IterationSnapshot> {
        if !std::mem::replace(&mut self.in_block, false) {
            return None;
        }

        if self.emit_trailing_block {
            let snap = self.counter.snapshot();
            debug!(iteration = snap.index, "emitting trailing iteration at end of stream");
            Some(snap)
        } else {
            debug!(
                iteration = self.counter.count(),
                "end of stream inside an iteration; trailing block not emitted"
            );
            None
        }
    }

    fn begin_block(&mut self) {
        self.counter.increase();
        self.counter.rules_mut().reset();
        self.in_block = true;
        debug!(iteration = self.counter.count(), "iteration started");
    }
}
