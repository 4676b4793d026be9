//! Shared helpers for the `scriptrun` integration tests.

pub mod builders;
pub mod fixtures;

use std::future::Future;
use std::sync::Once;
use std::time::Duration;

use tracing_subscriber::{EnvFilter, fmt};

/// Longest a test waits on a child process before giving up.
pub const PROCESS_DEADLINE: Duration = Duration::from_secs(5);

static INIT: Once = Once::new();

/// Install a test-writer subscriber once per test binary.
///
/// The filter comes from `SCRIPTRUN_LOG` (same syntax as `RUST_LOG`) and
/// falls back to `scriptrun=debug`, so runner and scanner events show up
/// for failing tests.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = std::env::var("SCRIPTRUN_LOG")
            .ok()
            .and_then(|spec| EnvFilter::try_new(spec).ok())
            .unwrap_or_else(|| EnvFilter::new("scriptrun=debug"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .init();
    });
}

/// Await one step of a process stream, failing the test if the child has
/// not produced it within [`PROCESS_DEADLINE`].
///
/// A hung script would otherwise block the whole test binary.
pub async fn within_deadline<F, T>(step: F) -> T
where
    F: Future<Output = T>,
{
    match tokio::time::timeout(PROCESS_DEADLINE, step).await {
        Ok(out) => out,
        Err(_) => panic!("child process produced nothing for {PROCESS_DEADLINE:?}"),
    }
}
