#[allow(unused_imports)]
pub use scriptrun_test_utils::init_tracing;
