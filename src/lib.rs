// src/lib.rs

//! Run programs and interpreted scripts, stream their output line by line
//! and extract typed values from repeating output blocks.
//!
//! ```no_run
//! use scriptrun::exec::Arguments;
//! use scriptrun::presets;
//! use scriptrun::scan::IterationRules;
//! use scriptrun::types::ValueKind;
//!
//! # async fn demo() -> scriptrun::errors::Result<()> {
//! let mut rules = IterationRules::new("^iteration")?;
//! rules.register("residual", "residual = {}", ValueKind::Float)?;
//!
//! let mut runner = presets::freefem("heat.edp")
//!     .with_args(Arguments::new().with("-nx", 32))
//!     .with_iteration_rules(rules);
//!
//! let mut iterations = runner.run_stream_iterations()?;
//! while let Some(it) = iterations.next().await? {
//!     println!("{} {:?}", it.index, it.float("residual"));
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod logging;
pub mod presets;
pub mod scan;
pub mod types;

pub use errors::{Result, RunnerError};
pub use exec::{Arguments, Interpreter, IterationStream, LineStream, Runner};
pub use scan::{IterationCounter, IterationRules, IterationSnapshot, Line};
pub use types::{Value, ValueKind};
