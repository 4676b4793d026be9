// src/scan/mod.rs

//! Line-oriented scanning of program output.
//!
//! - [`line`] wraps one output line and its regex search helpers.
//! - [`rules`] holds per-key extraction rules and the block marker.
//! - [`counter`] counts blocks and produces owned snapshots of them.
//! - [`scanner`] is the IO-free state machine that turns lines into
//!   completed blocks.

pub mod counter;
pub mod line;
pub mod rules;
pub mod scanner;

pub use counter::{IterationCounter, IterationSnapshot};
pub use line::Line;
pub use rules::{ExtractionRule, IterationRules};
pub use scanner::IterationScanner;
