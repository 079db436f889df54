use tracing::Level;
use vmx3::{parse_log_level, setup_logging};

#[test]
fn test_logging_setup() {
    // Calling twice must not panic: the second call keeps the first subscriber.
    let result = std::panic::catch_unwind(|| {
        setup_logging(Level::INFO);
        setup_logging(Level::DEBUG);
    });

    assert!(result.is_ok(), "setup_logging function should not panic");
}

#[test]
fn test_parse_log_level_accepts_python_names() {
    assert_eq!(parse_log_level("DEBUG"), Some(Level::DEBUG));
    assert_eq!(parse_log_level("info"), Some(Level::INFO));
    assert_eq!(parse_log_level("WARNING"), Some(Level::WARN));
    assert_eq!(parse_log_level("CRITICAL"), Some(Level::ERROR));
    assert_eq!(parse_log_level(" error "), Some(Level::ERROR));
    assert_eq!(parse_log_level("verbose"), None);
}
