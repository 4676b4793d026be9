// tests/logging_levels.rs

use scriptrun::logging::{LogLevel, init_logging};

#[test]
fn log_levels_parse_case_insensitively() {
    assert_eq!("INFO".parse::<LogLevel>(), Ok(LogLevel::Info));
    assert_eq!(" warning ".parse::<LogLevel>(), Ok(LogLevel::Warn));
    assert_eq!("trace".parse::<LogLevel>(), Ok(LogLevel::Trace));
    assert!("loud".parse::<LogLevel>().is_err());
}

#[test]
fn subscriber_installs_once() {
    assert!(init_logging(Some(LogLevel::Debug)).is_ok());
    assert!(init_logging(None).is_err(), "a second global subscriber is refused");
}
